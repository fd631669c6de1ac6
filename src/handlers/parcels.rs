// src/handlers/parcels.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterParcelPayload {
    pub room_id: Uuid,
    pub tenant_id: Option<Uuid>,
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParcelsQuery {
    #[serde(default)]
    pub only_pending: bool,
}

pub async fn register_parcel(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<RegisterParcelPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let parcel = app_state
        .parcel_repo
        .register_parcel(
            user.id,
            payload.room_id,
            payload.tenant_id,
            &payload.description,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(parcel)))
}

pub async fn list_parcels(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ListParcelsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let parcels = app_state
        .parcel_repo
        .list_parcels(user.id, query.only_pending)
        .await?;
    Ok(Json(parcels))
}

pub async fn mark_picked_up(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let parcel = app_state.parcel_repo.mark_picked_up(user.id, id).await?;
    Ok(Json(parcel))
}

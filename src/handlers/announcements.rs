// src/handlers/announcements.rs

use axum::{
    extract::{Path, State},
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
pub struct CreateAnnouncementPayload {
    // None = aviso global para todos os prédios do locador.
    pub building_id: Option<Uuid>,
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,
    #[validate(length(min = 1, message = "O corpo é obrigatório."))]
    pub body: String,
}

pub async fn create_announcement(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateAnnouncementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let announcement = app_state
        .announcement_repo
        .create_announcement(user.id, payload.building_id, &payload.title, &payload.body)
        .await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

pub async fn list_announcements(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let announcements = app_state
        .announcement_repo
        .list_announcements(user.id)
        .await?;
    Ok(Json(announcements))
}

pub async fn list_for_building(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(building_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let announcements = app_state
        .announcement_repo
        .list_for_building(user.id, building_id)
        .await?;
    Ok(Json(announcements))
}

pub async fn delete_announcement(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .announcement_repo
        .delete_announcement(user.id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

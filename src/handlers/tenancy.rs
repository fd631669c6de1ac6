// src/handlers/tenancy.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    services::tenancy_service::CheckInData,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CheckInPayload {
    pub room_id: Uuid,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: String,

    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    pub phone: String,

    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,

    pub line_user_id: Option<String>,

    #[serde(default)]
    pub deposit: Decimal,

    pub lease_start: NaiveDate,
    pub lease_end: NaiveDate,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactPayload {
    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    pub phone: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    pub line_user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTenantsQuery {
    #[serde(default)]
    pub only_active: bool,
}

// Check-in: cria o inquilino e ocupa o quarto numa operação só.
pub async fn check_in(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CheckInPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tenant = app_state
        .tenancy_service
        .check_in(
            user.id,
            CheckInData {
                room_id: payload.room_id,
                full_name: payload.full_name,
                phone: payload.phone,
                email: payload.email,
                line_user_id: payload.line_user_id,
                deposit: payload.deposit,
                lease_start: payload.lease_start,
                lease_end: payload.lease_end,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(tenant)))
}

// Check-out: desativa o inquilino e libera o quarto.
pub async fn check_out(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = app_state.tenancy_service.check_out(user.id, id).await?;
    Ok(Json(tenant))
}

pub async fn list_tenants(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ListTenantsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tenants = app_state
        .tenancy_service
        .list_tenants(user.id, query.only_active)
        .await?;
    Ok(Json(tenants))
}

pub async fn list_tenants_by_room(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(room_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tenants = app_state
        .tenancy_service
        .list_by_room(user.id, room_id)
        .await?;
    Ok(Json(tenants))
}

pub async fn get_tenant(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tenant = app_state.tenancy_service.get_tenant(user.id, id).await?;
    Ok(Json(tenant))
}

pub async fn update_tenant_contact(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateContactPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tenant = app_state
        .tenancy_service
        .update_contact(
            user.id,
            id,
            &payload.phone,
            payload.email.as_deref(),
            payload.line_user_id.as_deref(),
        )
        .await?;
    Ok(Json(tenant))
}

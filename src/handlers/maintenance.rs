// src/handlers/maintenance.rs

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
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::maintenance::TicketStatus,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketPayload {
    pub tenant_id: Uuid,

    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,

    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusPayload {
    pub status: TicketStatus,

    #[validate(length(min = 1, message = "O nome do autor é obrigatório."))]
    pub actor_name: String,

    #[validate(length(min = 1, message = "O papel do autor é obrigatório."))]
    pub actor_role: String,

    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignStaffPayload {
    pub staff_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTicketsQuery {
    pub status: Option<TicketStatus>,
}

pub async fn create_ticket(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateTicketPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let ticket = app_state
        .maintenance_service
        .create_ticket(
            user.id,
            payload.tenant_id,
            &payload.title,
            &payload.description,
            &user.email,
            "landlord",
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ticket)))
}

// Troca de status: grava exatamente uma entrada de histórico e tenta
// notificar o inquilino (melhor-esforço).
pub async fn update_ticket_status(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let ticket = app_state
        .maintenance_service
        .update_status(
            user.id,
            id,
            payload.status,
            &payload.actor_name,
            &payload.actor_role,
            payload.comment.as_deref(),
        )
        .await?;

    Ok(Json(ticket))
}

pub async fn assign_staff(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignStaffPayload>,
) -> Result<impl IntoResponse, AppError> {
    let ticket = app_state
        .maintenance_service
        .assign_staff(user.id, id, payload.staff_id, &user.email, "landlord")
        .await?;
    Ok(Json(ticket))
}

pub async fn get_ticket(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let ticket = app_state.maintenance_service.get_ticket(user.id, id).await?;
    Ok(Json(ticket))
}

pub async fn list_tickets(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ListTicketsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let tickets = app_state
        .maintenance_service
        .list_tickets(user.id, query.status)
        .await?;
    Ok(Json(tickets))
}

pub async fn list_tickets_by_room(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(room_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tickets = app_state
        .maintenance_service
        .list_by_room(user.id, room_id)
        .await?;
    Ok(Json(tickets))
}

pub async fn list_tickets_by_tenant(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let tickets = app_state
        .maintenance_service
        .list_by_tenant(user.id, tenant_id)
        .await?;
    Ok(Json(tickets))
}

pub async fn get_ticket_history(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let history = app_state
        .maintenance_service
        .list_history(user.id, id)
        .await?;
    Ok(Json(history))
}

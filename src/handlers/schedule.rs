// src/handlers/schedule.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveTime;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangePayload {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchedulePayload {
    pub building_id: Uuid,
    pub month: String,
    // Dias ISO: 1 = segunda ... 7 = domingo.
    pub weekdays: Vec<i16>,
    pub ranges: Vec<TimeRangePayload>,
    pub slot_minutes: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookSlotPayload {
    pub tenant_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSchedulesQuery {
    pub building_id: Option<Uuid>,
}

// Cria a agenda do mês, já com todos os slots pré-gerados.
pub async fn create_schedule(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateSchedulePayload>,
) -> Result<impl IntoResponse, AppError> {
    let ranges = payload
        .ranges
        .iter()
        .map(|r| (r.start, r.end))
        .collect::<Vec<_>>();

    let schedule = app_state
        .schedule_service
        .create_schedule(
            user.id,
            payload.building_id,
            &payload.month,
            payload.weekdays,
            ranges,
            payload.slot_minutes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(schedule)))
}

pub async fn list_schedules(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ListSchedulesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let schedules = app_state
        .schedule_service
        .list_schedules(user.id, query.building_id)
        .await?;
    Ok(Json(schedules))
}

pub async fn get_schedule(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let schedule = app_state.schedule_service.get_schedule(user.id, id).await?;
    Ok(Json(schedule))
}

// Reserva condicional: conflito se o horário já estiver tomado.
pub async fn book_slot(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(slot_id): Path<Uuid>,
    Json(payload): Json<BookSlotPayload>,
) -> Result<impl IntoResponse, AppError> {
    let slot = app_state
        .schedule_service
        .book_slot(user.id, slot_id, payload.tenant_id)
        .await?;
    Ok(Json(slot))
}

pub async fn cancel_booking(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(slot_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let slot = app_state
        .schedule_service
        .cancel_booking(user.id, slot_id)
        .await?;
    Ok(Json(slot))
}

pub async fn list_bookings_by_tenant(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(tenant_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let slots = app_state
        .schedule_service
        .list_bookings_by_tenant(user.id, tenant_id)
        .await?;
    Ok(Json(slots))
}

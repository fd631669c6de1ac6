// src/handlers/billing.rs

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
    models::billing::BillStatus,
    services::billing_service::MeterReadings,
};

// ---
// Payloads
// ---
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBillPayload {
    pub room_id: Uuid,
    // Aceita "YYYY-MM" ou uma data; o service normaliza.
    pub month: String,
    #[serde(default)]
    pub other_amount: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnsureBillsPayload {
    pub month: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListBillsQuery {
    pub month: Option<String>,
    pub status: Option<BillStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordUsagePayload {
    pub room_id: Uuid,
    pub month: String,
    pub electricity_previous: Decimal,
    pub electricity_current: Decimal,
    pub water_previous: Decimal,
    pub water_current: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsagePayload {
    pub electricity_previous: Decimal,
    pub electricity_current: Decimal,
    pub water_previous: Decimal,
    pub water_current: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsagesQuery {
    pub month: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpensePayload {
    #[validate(length(min = 1, message = "A descrição é obrigatória."))]
    pub description: String,
    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,
    pub amount: Decimal,
    pub spent_on: NaiveDate,
}

// ---
// Handlers: Faturas
// ---
pub async fn create_bill(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateBillPayload>,
) -> Result<impl IntoResponse, AppError> {
    let bill = app_state
        .billing_service
        .create_bill(user.id, payload.room_id, &payload.month, payload.other_amount)
        .await?;
    Ok((StatusCode::CREATED, Json(bill)))
}

// Gera as faturas que faltam para os quartos ocupados do mês.
pub async fn ensure_bills(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<EnsureBillsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let bills = app_state
        .billing_service
        .ensure_bills_for_month(user.id, &payload.month)
        .await?;
    Ok((StatusCode::CREATED, Json(bills)))
}

pub async fn list_bills(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ListBillsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let bills = app_state
        .billing_service
        .list_bills(user.id, query.month.as_deref(), query.status)
        .await?;
    Ok(Json(bills))
}

pub async fn get_bill(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let bill = app_state.billing_service.get_bill(user.id, id).await?;
    Ok(Json(bill))
}

pub async fn mark_bill_paid(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let bill = app_state.billing_service.mark_paid(user.id, id).await?;
    Ok(Json(bill))
}

// ---
// Handlers: Consumo
// ---
pub async fn record_usage(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<RecordUsagePayload>,
) -> Result<impl IntoResponse, AppError> {
    let usage = app_state
        .billing_service
        .record_usage(
            user.id,
            payload.room_id,
            &payload.month,
            MeterReadings {
                electricity_previous: payload.electricity_previous,
                electricity_current: payload.electricity_current,
                water_previous: payload.water_previous,
                water_current: payload.water_current,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(usage)))
}

// Editar leituras recalcula todos os valores derivados.
pub async fn update_usage(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUsagePayload>,
) -> Result<impl IntoResponse, AppError> {
    let usage = app_state
        .billing_service
        .update_usage_readings(
            user.id,
            id,
            MeterReadings {
                electricity_previous: payload.electricity_previous,
                electricity_current: payload.electricity_current,
                water_previous: payload.water_previous,
                water_current: payload.water_current,
            },
        )
        .await?;
    Ok(Json(usage))
}

pub async fn list_usages(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ListUsagesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let usages = app_state
        .billing_service
        .list_usages(user.id, query.month.as_deref())
        .await?;
    Ok(Json(usages))
}

// ---
// Handlers: Despesas
// ---
pub async fn create_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let expense = app_state
        .billing_service
        .create_expense(
            user.id,
            &payload.description,
            &payload.category,
            payload.amount,
            payload.spent_on,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(expense)))
}

pub async fn list_expenses(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let expenses = app_state.billing_service.list_expenses(user.id).await?;
    Ok(Json(expenses))
}

pub async fn delete_expense(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.billing_service.delete_expense(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

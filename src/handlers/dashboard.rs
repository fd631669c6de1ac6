// src/handlers/dashboard.rs

use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
};

pub async fn monthly_income(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state.dashboard_service.monthly_income(user.id).await?;
    Ok(Json(entries))
}

pub async fn monthly_expenses(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state
        .dashboard_service
        .monthly_expenses(user.id)
        .await?;
    Ok(Json(entries))
}

pub async fn occupancy_summary(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .dashboard_service
        .occupancy_summary(user.id)
        .await?;
    Ok(Json(summary))
}

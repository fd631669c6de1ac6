// src/handlers/property.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError, config::AppState, middleware::auth::AuthenticatedUser,
};

// ---
// Payloads
// ---
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildingPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub electricity_rate: Decimal,
    pub water_rate: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RenameBuildingPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRatesPayload {
    pub electricity_rate: Decimal,
    pub water_rate: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFloorPayload {
    pub floor_number: i32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomPayload {
    pub floor_id: Uuid,
    #[validate(length(min = 1, message = "O número do quarto é obrigatório."))]
    pub room_number: String,
    pub price: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomPayload {
    pub price: Decimal,
}

// ---
// Handlers: Prédios
// ---
pub async fn create_building(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateBuildingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let building = app_state
        .property_service
        .create_building(
            user.id,
            &payload.name,
            payload.electricity_rate,
            payload.water_rate,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(building)))
}

pub async fn list_buildings(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let buildings = app_state.property_service.list_buildings(user.id).await?;
    Ok(Json(buildings))
}

pub async fn get_building(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let building = app_state.property_service.get_building(user.id, id).await?;
    Ok(Json(building))
}

// Renomear o prédio dispara a renumeração de todos os quartos.
pub async fn rename_building(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<RenameBuildingPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let outcome = app_state
        .property_service
        .rename_building(user.id, id, &payload.name)
        .await?;

    Ok(Json(outcome))
}

pub async fn update_building_rates(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRatesPayload>,
) -> Result<impl IntoResponse, AppError> {
    let building = app_state
        .property_service
        .update_building_rates(user.id, id, payload.electricity_rate, payload.water_rate)
        .await?;
    Ok(Json(building))
}

// ---
// Handlers: Andares
// ---
pub async fn create_floor(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(building_id): Path<Uuid>,
    Json(payload): Json<CreateFloorPayload>,
) -> Result<impl IntoResponse, AppError> {
    let floor = app_state
        .property_service
        .create_floor(user.id, building_id, payload.floor_number)
        .await?;
    Ok((StatusCode::CREATED, Json(floor)))
}

pub async fn list_floors(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(building_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let floors = app_state
        .property_service
        .list_floors(user.id, building_id)
        .await?;
    Ok(Json(floors))
}

// ---
// Handlers: Quartos
// ---
pub async fn create_room(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(building_id): Path<Uuid>,
    Json(payload): Json<CreateRoomPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let room = app_state
        .property_service
        .create_room(
            user.id,
            building_id,
            payload.floor_id,
            &payload.room_number,
            payload.price,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(room)))
}

pub async fn list_rooms(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, AppError> {
    let rooms = app_state.property_service.list_rooms(user.id).await?;
    Ok(Json(rooms))
}

pub async fn list_rooms_by_building(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(building_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let rooms = app_state
        .property_service
        .list_rooms_by_building(user.id, building_id)
        .await?;
    Ok(Json(rooms))
}

pub async fn get_room(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let room = app_state.property_service.get_room(user.id, id).await?;
    Ok(Json(room))
}

pub async fn update_room(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoomPayload>,
) -> Result<impl IntoResponse, AppError> {
    let room = app_state
        .property_service
        .update_room_price(user.id, id, payload.price)
        .await?;
    Ok(Json(room))
}

pub async fn delete_room(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.property_service.delete_room(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

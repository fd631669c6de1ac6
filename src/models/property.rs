// src/models/property.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Occupied,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub landlord_id: Uuid,

    pub name: String,

    // Tarifas por unidade consumida, usadas na derivação das cobranças.
    pub electricity_rate: Decimal,
    pub water_rate: Decimal,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub landlord_id: Uuid,

    pub building_id: Uuid,
    pub floor_number: i32,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub landlord_id: Uuid,

    pub building_id: Uuid,
    pub floor_id: Uuid,

    pub room_number: String,
    pub status: RoomStatus,
    pub price: Decimal,

    // Inquilino atual. O CHECK do banco garante a consistência com `status`.
    pub tenant_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}

// Resultado de uma renumeração de quartos após renomear o prédio.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenumberOutcome {
    pub building: Building,
    pub renumbered: i64,
    // Quartos cujo número não termina em dígitos e por isso ficou como estava.
    pub skipped: Vec<String>,
}

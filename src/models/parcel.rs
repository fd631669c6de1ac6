// src/models/parcel.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Parcel {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub landlord_id: Uuid,

    pub room_id: Uuid,
    pub tenant_id: Option<Uuid>,

    pub description: String,
    pub arrived_at: DateTime<Utc>,
    pub picked_up: bool,
    pub picked_up_at: Option<DateTime<Utc>>,
}

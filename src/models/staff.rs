// src/models/staff.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub landlord_id: Uuid,

    pub name: String,
    pub phone: Option<String>,
    pub role: String,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
}

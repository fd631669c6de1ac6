// src/models/announcement.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub landlord_id: Uuid,

    // None = aviso para todos os prédios do locador.
    pub building_id: Option<Uuid>,

    pub title: String,
    pub body: String,
    pub published_at: DateTime<Utc>,
}

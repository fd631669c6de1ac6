// src/models/maintenance.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Qualquer status pode suceder qualquer outro; o contrato do chamado é o
// histórico append-only, não uma tabela de transições.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "ticket_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTicket {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub landlord_id: Uuid,

    pub room_id: Uuid,
    pub tenant_id: Uuid,
    pub staff_id: Option<Uuid>,

    pub title: String,
    pub description: String,
    pub current_status: TicketStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Uma entrada do histórico. Só é inserida, nunca alterada.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct StatusHistoryEntry {
    pub id: Uuid,
    pub ticket_id: Uuid,
    pub status: TicketStatus,
    pub actor_name: String,
    pub actor_role: String,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

// src/models/tenancy.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

// O inquilino (morador) de um quarto. Não confundir com a conta do locador.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub landlord_id: Uuid,

    pub room_id: Uuid,

    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,

    // Identificador na plataforma de mensagens (LINE). Único quando presente.
    pub line_user_id: Option<String>,

    pub deposit: Decimal,
    pub lease_start: NaiveDate,
    pub lease_end: NaiveDate,
    pub is_active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// src/models/billing.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "bill_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillStatus {
    Unpaid,
    Paid,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub landlord_id: Uuid,

    pub room_id: Uuid,
    pub tenant_id: Uuid,

    // Sempre "YYYY-MM". O banco também valida o formato.
    pub bill_month: String,

    pub rent_amount: Decimal,
    pub electricity_amount: Decimal,
    pub water_amount: Decimal,
    pub other_amount: Decimal,
    pub total_amount: Decimal,

    pub status: BillStatus,
    pub paid_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
}

// Leituras de medidor de um quarto num mês, com os valores derivados.
// Os campos derivados são SEMPRE recalculados quando as leituras mudam.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UtilityUsage {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub landlord_id: Uuid,

    pub room_id: Uuid,
    pub usage_month: String,

    pub electricity_previous: Decimal,
    pub electricity_current: Decimal,
    pub water_previous: Decimal,
    pub water_current: Decimal,

    // Derivados: units = atual - anterior, charge = units * tarifa.
    pub electricity_units: Decimal,
    pub electricity_charge: Decimal,
    pub water_units: Decimal,
    pub water_charge: Decimal,
    pub total_charge: Decimal,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Projeção usada pela geração de faturas pendentes: quartos ocupados que
// ainda não têm fatura no mês.
#[derive(Debug, Clone, FromRow)]
pub struct RoomBillingInfo {
    pub room_id: Uuid,
    pub tenant_id: Uuid,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub landlord_id: Uuid,

    pub description: String,
    pub category: String,
    pub amount: Decimal,
    pub spent_on: NaiveDate,

    pub created_at: DateTime<Utc>,
}

// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

// Projeções de leitura para o painel. Nenhuma regra de negócio aqui.

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyIncomeEntry {
    pub month: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyExpenseEntry {
    pub month: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct OccupancySummary {
    pub total_rooms: i64,
    pub occupied: i64,
    pub available: i64,
    pub unpaid_bills: i64,
}

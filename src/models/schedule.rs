// src/models/schedule.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CleaningSchedule {
    pub id: Uuid,

    #[serde(skip_serializing)]
    pub landlord_id: Uuid,

    pub building_id: Uuid,
    pub month: String,

    // Dias da semana ISO (1 = segunda ... 7 = domingo).
    pub weekdays: Vec<i16>,
    pub slot_minutes: i32,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CleaningRange {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

// Um horário concreto, pré-gerado a partir das faixas da agenda.
// `tenant_id` preenchido = reservado.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CleaningSlot {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub slot_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub tenant_id: Option<Uuid>,
    pub booked_at: Option<DateTime<Utc>>,
}

// Agenda completa, como o app LIFF consome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleWithSlots {
    #[serde(flatten)]
    pub schedule: CleaningSchedule,
    pub ranges: Vec<CleaningRange>,
    pub slots: Vec<CleaningSlot>,
}

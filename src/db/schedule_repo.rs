// src/db/schedule_repo.rs

use chrono::{NaiveDate, NaiveTime};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::schedule::{CleaningRange, CleaningSchedule, CleaningSlot},
};

#[derive(Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_schedule<'e, E>(
        &self,
        executor: E,
        landlord_id: Uuid,
        building_id: Uuid,
        month: &str,
        weekdays: &[i16],
        slot_minutes: i32,
    ) -> Result<CleaningSchedule, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let schedule = sqlx::query_as::<_, CleaningSchedule>(
            r#"
            INSERT INTO cleaning_schedules (landlord_id, building_id, month, weekdays, slot_minutes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(landlord_id)
        .bind(building_id)
        .bind(month)
        .bind(weekdays)
        .bind(slot_minutes)
        .fetch_one(executor)
        .await?;
        Ok(schedule)
    }

    pub async fn insert_range<'e, E>(
        &self,
        executor: E,
        schedule_id: Uuid,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<CleaningRange, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let range = sqlx::query_as::<_, CleaningRange>(
            r#"
            INSERT INTO cleaning_ranges (schedule_id, start_time, end_time)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(schedule_id)
        .bind(start_time)
        .bind(end_time)
        .fetch_one(executor)
        .await?;
        Ok(range)
    }

    pub async fn insert_slot<'e, E>(
        &self,
        executor: E,
        schedule_id: Uuid,
        slot_date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            INSERT INTO cleaning_slots (schedule_id, slot_date, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(schedule_id)
        .bind(slot_date)
        .bind(start_time)
        .bind(end_time)
        .execute(executor)
        .await?;
        Ok(())
    }

    pub async fn find_schedule(
        &self,
        landlord_id: Uuid,
        id: Uuid,
    ) -> Result<Option<CleaningSchedule>, AppError> {
        let schedule = sqlx::query_as::<_, CleaningSchedule>(
            "SELECT * FROM cleaning_schedules WHERE id = $1 AND landlord_id = $2",
        )
        .bind(id)
        .bind(landlord_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(schedule)
    }

    pub async fn list_schedules(
        &self,
        landlord_id: Uuid,
        building_id: Option<Uuid>,
    ) -> Result<Vec<CleaningSchedule>, AppError> {
        let schedules = sqlx::query_as::<_, CleaningSchedule>(
            r#"
            SELECT * FROM cleaning_schedules
            WHERE landlord_id = $1 AND ($2::UUID IS NULL OR building_id = $2)
            ORDER BY month DESC
            "#,
        )
        .bind(landlord_id)
        .bind(building_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(schedules)
    }

    pub async fn list_ranges(&self, schedule_id: Uuid) -> Result<Vec<CleaningRange>, AppError> {
        let ranges = sqlx::query_as::<_, CleaningRange>(
            "SELECT * FROM cleaning_ranges WHERE schedule_id = $1 ORDER BY start_time",
        )
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(ranges)
    }

    pub async fn list_slots(&self, schedule_id: Uuid) -> Result<Vec<CleaningSlot>, AppError> {
        let slots = sqlx::query_as::<_, CleaningSlot>(
            r#"
            SELECT * FROM cleaning_slots
            WHERE schedule_id = $1
            ORDER BY slot_date, start_time
            "#,
        )
        .bind(schedule_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(slots)
    }

    // UPDATE condicional: só reserva se o horário ainda estiver livre.
    // É essa cláusula `tenant_id IS NULL` que impede reserva dupla, mesmo
    // com duas requisições concorrentes.
    pub async fn book_slot(
        &self,
        landlord_id: Uuid,
        slot_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<CleaningSlot, AppError> {
        // O inquilino precisa ser do locador; id alheio vira "não encontrado".
        let tenant_ok = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM tenants WHERE id = $1 AND landlord_id = $2)",
        )
        .bind(tenant_id)
        .bind(landlord_id)
        .fetch_one(&self.pool)
        .await?;
        if !tenant_ok {
            return Err(AppError::TenantNotFound);
        }

        let booked = sqlx::query_as::<_, CleaningSlot>(
            r#"
            UPDATE cleaning_slots s
            SET tenant_id = $3, booked_at = now()
            FROM cleaning_schedules cs
            WHERE s.id = $1
              AND s.schedule_id = cs.id
              AND cs.landlord_id = $2
              AND s.tenant_id IS NULL
            RETURNING s.*
            "#,
        )
        .bind(slot_id)
        .bind(landlord_id)
        .bind(tenant_id)
        .fetch_optional(&self.pool)
        .await?;

        match booked {
            Some(slot) => Ok(slot),
            // Zero linhas: ou o horário não existe, ou já está reservado.
            None => {
                let exists = sqlx::query_scalar::<_, bool>(
                    r#"
                    SELECT EXISTS (
                        SELECT 1 FROM cleaning_slots s
                        JOIN cleaning_schedules cs ON cs.id = s.schedule_id
                        WHERE s.id = $1 AND cs.landlord_id = $2
                    )
                    "#,
                )
                .bind(slot_id)
                .bind(landlord_id)
                .fetch_one(&self.pool)
                .await?;

                if exists {
                    Err(AppError::SlotAlreadyBooked)
                } else {
                    Err(AppError::SlotNotFound)
                }
            }
        }
    }

    pub async fn cancel_booking(
        &self,
        landlord_id: Uuid,
        slot_id: Uuid,
    ) -> Result<CleaningSlot, AppError> {
        sqlx::query_as::<_, CleaningSlot>(
            r#"
            UPDATE cleaning_slots s
            SET tenant_id = NULL, booked_at = NULL
            FROM cleaning_schedules cs
            WHERE s.id = $1
              AND s.schedule_id = cs.id
              AND cs.landlord_id = $2
            RETURNING s.*
            "#,
        )
        .bind(slot_id)
        .bind(landlord_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::SlotNotFound)
    }

    pub async fn list_bookings_by_tenant(
        &self,
        landlord_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Vec<CleaningSlot>, AppError> {
        let slots = sqlx::query_as::<_, CleaningSlot>(
            r#"
            SELECT s.* FROM cleaning_slots s
            JOIN cleaning_schedules cs ON cs.id = s.schedule_id
            WHERE s.tenant_id = $1 AND cs.landlord_id = $2
            ORDER BY s.slot_date, s.start_time
            "#,
        )
        .bind(tenant_id)
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(slots)
    }
}

// src/db/billing_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::billing::{Bill, BillStatus, Expense, RoomBillingInfo, UtilityUsage},
};

#[derive(Clone)]
pub struct BillingRepository {
    pool: PgPool,
}

// Valores de uma fatura, já derivados pelo service.
pub struct BillAmounts {
    pub rent: Decimal,
    pub electricity: Decimal,
    pub water: Decimal,
    pub other: Decimal,
    pub total: Decimal,
}

// Leituras + derivados de consumo, recalculados pelo service a cada escrita.
pub struct UsageValues {
    pub electricity_previous: Decimal,
    pub electricity_current: Decimal,
    pub water_previous: Decimal,
    pub water_current: Decimal,
    pub electricity_units: Decimal,
    pub electricity_charge: Decimal,
    pub water_units: Decimal,
    pub water_charge: Decimal,
    pub total_charge: Decimal,
}

impl BillingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Faturas ---

    // A constraint UNIQUE (room_id, bill_month) é quem garante "uma fatura
    // por quarto por mês"; aqui só traduzimos a violação num erro de conflito.
    pub async fn create_bill<'e, E>(
        &self,
        executor: E,
        landlord_id: Uuid,
        room_id: Uuid,
        tenant_id: Uuid,
        bill_month: &str,
        amounts: BillAmounts,
    ) -> Result<Bill, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Bill>(
            r#"
            INSERT INTO bills
                (landlord_id, room_id, tenant_id, bill_month,
                 rent_amount, electricity_amount, water_amount, other_amount, total_amount)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(landlord_id)
        .bind(room_id)
        .bind(tenant_id)
        .bind(bill_month)
        .bind(amounts.rent)
        .bind(amounts.electricity)
        .bind(amounts.water)
        .bind(amounts.other)
        .bind(amounts.total)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::BillAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn list_bills(
        &self,
        landlord_id: Uuid,
        month: Option<&str>,
        status: Option<BillStatus>,
    ) -> Result<Vec<Bill>, AppError> {
        let bills = sqlx::query_as::<_, Bill>(
            r#"
            SELECT * FROM bills
            WHERE landlord_id = $1
              AND ($2::TEXT IS NULL OR bill_month = $2)
              AND ($3::bill_status IS NULL OR status = $3)
            ORDER BY bill_month DESC, created_at DESC
            "#,
        )
        .bind(landlord_id)
        .bind(month)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(bills)
    }

    pub async fn find_bill(&self, landlord_id: Uuid, id: Uuid) -> Result<Option<Bill>, AppError> {
        let bill =
            sqlx::query_as::<_, Bill>("SELECT * FROM bills WHERE id = $1 AND landlord_id = $2")
                .bind(id)
                .bind(landlord_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(bill)
    }

    pub async fn mark_paid(&self, landlord_id: Uuid, id: Uuid) -> Result<Bill, AppError> {
        sqlx::query_as::<_, Bill>(
            r#"
            UPDATE bills
            SET status = 'PAID', paid_at = now()
            WHERE id = $1 AND landlord_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(landlord_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::BillNotFound)
    }

    // Quartos ocupados ainda sem fatura no mês (reconciliação).
    pub async fn rooms_without_bill<'e, E>(
        &self,
        executor: E,
        landlord_id: Uuid,
        bill_month: &str,
    ) -> Result<Vec<RoomBillingInfo>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rooms = sqlx::query_as::<_, RoomBillingInfo>(
            r#"
            SELECT r.id AS room_id, r.tenant_id, r.price
            FROM rooms r
            WHERE r.landlord_id = $1
              AND r.status = 'OCCUPIED'
              AND NOT EXISTS (
                  SELECT 1 FROM bills b
                  WHERE b.room_id = r.id AND b.bill_month = $2
              )
            "#,
        )
        .bind(landlord_id)
        .bind(bill_month)
        .fetch_all(executor)
        .await?;
        Ok(rooms)
    }

    // --- Consumo (água/luz) ---

    pub async fn create_usage(
        &self,
        landlord_id: Uuid,
        room_id: Uuid,
        usage_month: &str,
        values: UsageValues,
    ) -> Result<UtilityUsage, AppError> {
        sqlx::query_as::<_, UtilityUsage>(
            r#"
            INSERT INTO utility_usages
                (landlord_id, room_id, usage_month,
                 electricity_previous, electricity_current, water_previous, water_current,
                 electricity_units, electricity_charge, water_units, water_charge, total_charge)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(landlord_id)
        .bind(room_id)
        .bind(usage_month)
        .bind(values.electricity_previous)
        .bind(values.electricity_current)
        .bind(values.water_previous)
        .bind(values.water_current)
        .bind(values.electricity_units)
        .bind(values.electricity_charge)
        .bind(values.water_units)
        .bind(values.water_charge)
        .bind(values.total_charge)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::UsageAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn update_usage(
        &self,
        landlord_id: Uuid,
        id: Uuid,
        values: UsageValues,
    ) -> Result<UtilityUsage, AppError> {
        sqlx::query_as::<_, UtilityUsage>(
            r#"
            UPDATE utility_usages
            SET electricity_previous = $3, electricity_current = $4,
                water_previous = $5, water_current = $6,
                electricity_units = $7, electricity_charge = $8,
                water_units = $9, water_charge = $10, total_charge = $11,
                updated_at = now()
            WHERE id = $1 AND landlord_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(landlord_id)
        .bind(values.electricity_previous)
        .bind(values.electricity_current)
        .bind(values.water_previous)
        .bind(values.water_current)
        .bind(values.electricity_units)
        .bind(values.electricity_charge)
        .bind(values.water_units)
        .bind(values.water_charge)
        .bind(values.total_charge)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::UsageNotFound)
    }

    pub async fn find_usage(
        &self,
        landlord_id: Uuid,
        id: Uuid,
    ) -> Result<Option<UtilityUsage>, AppError> {
        let usage = sqlx::query_as::<_, UtilityUsage>(
            "SELECT * FROM utility_usages WHERE id = $1 AND landlord_id = $2",
        )
        .bind(id)
        .bind(landlord_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(usage)
    }

    pub async fn find_usage_for_room_month<'e, E>(
        &self,
        executor: E,
        landlord_id: Uuid,
        room_id: Uuid,
        usage_month: &str,
    ) -> Result<Option<UtilityUsage>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let usage = sqlx::query_as::<_, UtilityUsage>(
            r#"
            SELECT * FROM utility_usages
            WHERE room_id = $2 AND usage_month = $3 AND landlord_id = $1
            "#,
        )
        .bind(landlord_id)
        .bind(room_id)
        .bind(usage_month)
        .fetch_optional(executor)
        .await?;
        Ok(usage)
    }

    pub async fn list_usages(
        &self,
        landlord_id: Uuid,
        month: Option<&str>,
    ) -> Result<Vec<UtilityUsage>, AppError> {
        let usages = sqlx::query_as::<_, UtilityUsage>(
            r#"
            SELECT * FROM utility_usages
            WHERE landlord_id = $1 AND ($2::TEXT IS NULL OR usage_month = $2)
            ORDER BY usage_month DESC
            "#,
        )
        .bind(landlord_id)
        .bind(month)
        .fetch_all(&self.pool)
        .await?;
        Ok(usages)
    }

    // --- Despesas ---

    pub async fn create_expense(
        &self,
        landlord_id: Uuid,
        description: &str,
        category: &str,
        amount: Decimal,
        spent_on: NaiveDate,
    ) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (landlord_id, description, category, amount, spent_on)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(landlord_id)
        .bind(description)
        .bind(category)
        .bind(amount)
        .bind(spent_on)
        .fetch_one(&self.pool)
        .await?;
        Ok(expense)
    }

    pub async fn list_expenses(&self, landlord_id: Uuid) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses WHERE landlord_id = $1 ORDER BY spent_on DESC",
        )
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(expenses)
    }

    pub async fn delete_expense(&self, landlord_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND landlord_id = $2")
            .bind(id)
            .bind(landlord_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::ExpenseNotFound);
        }
        Ok(())
    }
}

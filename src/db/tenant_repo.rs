// src/db/tenant_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::tenancy::Tenant};

#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

pub struct NewTenant<'a> {
    pub room_id: Uuid,
    pub full_name: &'a str,
    pub phone: &'a str,
    pub email: Option<&'a str>,
    pub line_user_id: Option<&'a str>,
    pub deposit: Decimal,
    pub lease_start: NaiveDate,
    pub lease_end: NaiveDate,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Insere o inquilino dentro da transação de check-in (junto com a
    // atualização do quarto). O índice parcial do banco garante no máximo
    // um inquilino ativo por quarto.
    pub async fn create_tenant<'e, E>(
        &self,
        executor: E,
        landlord_id: Uuid,
        new: NewTenant<'_>,
    ) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants
                (landlord_id, room_id, full_name, phone, email, line_user_id,
                 deposit, lease_start, lease_end)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(landlord_id)
        .bind(new.room_id)
        .bind(new.full_name)
        .bind(new.phone)
        .bind(new.email)
        .bind(new.line_user_id)
        .bind(new.deposit)
        .bind(new.lease_start)
        .bind(new.lease_end)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    // Distingue pelo nome da constraint violada.
                    match db_err.constraint() {
                        Some("tenants_one_active_per_room") => {
                            return AppError::RoomAlreadyOccupied;
                        }
                        Some("tenants_line_user_id_key") => {
                            return AppError::LineUserIdAlreadyExists;
                        }
                        _ => {}
                    }
                }
            }
            e.into()
        })
    }

    pub async fn list_tenants(
        &self,
        landlord_id: Uuid,
        only_active: bool,
    ) -> Result<Vec<Tenant>, AppError> {
        let tenants = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT * FROM tenants
            WHERE landlord_id = $1 AND (NOT $2 OR is_active)
            ORDER BY full_name
            "#,
        )
        .bind(landlord_id)
        .bind(only_active)
        .fetch_all(&self.pool)
        .await?;
        Ok(tenants)
    }

    pub async fn list_by_room(
        &self,
        landlord_id: Uuid,
        room_id: Uuid,
    ) -> Result<Vec<Tenant>, AppError> {
        let tenants = sqlx::query_as::<_, Tenant>(
            r#"
            SELECT * FROM tenants
            WHERE room_id = $1 AND landlord_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(room_id)
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tenants)
    }

    pub async fn find_tenant(
        &self,
        landlord_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Tenant>, AppError> {
        let tenant =
            sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1 AND landlord_id = $2")
                .bind(id)
                .bind(landlord_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(tenant)
    }

    pub async fn update_contact(
        &self,
        landlord_id: Uuid,
        id: Uuid,
        phone: &str,
        email: Option<&str>,
        line_user_id: Option<&str>,
    ) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            r#"
            UPDATE tenants
            SET phone = $3, email = $4, line_user_id = $5, updated_at = now()
            WHERE id = $1 AND landlord_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(landlord_id)
        .bind(phone)
        .bind(email)
        .bind(line_user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint() == Some("tenants_line_user_id_key") {
                    return AppError::LineUserIdAlreadyExists;
                }
            }
            AppError::from(e)
        })?
        .ok_or(AppError::TenantNotFound)
    }

    // Desativação acontece na mesma transação que libera o quarto.
    pub async fn deactivate<'e, E>(
        &self,
        executor: E,
        landlord_id: Uuid,
        id: Uuid,
    ) -> Result<Tenant, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Tenant>(
            r#"
            UPDATE tenants
            SET is_active = FALSE, updated_at = now()
            WHERE id = $1 AND landlord_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(landlord_id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::TenantNotFound)
    }
}

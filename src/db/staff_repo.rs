// src/db/staff_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::staff::Staff};

#[derive(Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_staff(
        &self,
        landlord_id: Uuid,
        name: &str,
        phone: Option<&str>,
        role: &str,
    ) -> Result<Staff, AppError> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            INSERT INTO staff (landlord_id, name, phone, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(landlord_id)
        .bind(name)
        .bind(phone)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;
        Ok(staff)
    }

    pub async fn list_staff(&self, landlord_id: Uuid) -> Result<Vec<Staff>, AppError> {
        let staff = sqlx::query_as::<_, Staff>(
            "SELECT * FROM staff WHERE landlord_id = $1 ORDER BY name",
        )
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(staff)
    }

    pub async fn find_staff(&self, landlord_id: Uuid, id: Uuid) -> Result<Option<Staff>, AppError> {
        let staff =
            sqlx::query_as::<_, Staff>("SELECT * FROM staff WHERE id = $1 AND landlord_id = $2")
                .bind(id)
                .bind(landlord_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(staff)
    }

    pub async fn set_active(
        &self,
        landlord_id: Uuid,
        id: Uuid,
        is_active: bool,
    ) -> Result<Staff, AppError> {
        sqlx::query_as::<_, Staff>(
            r#"
            UPDATE staff SET is_active = $3
            WHERE id = $1 AND landlord_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(landlord_id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::StaffNotFound)
    }
}

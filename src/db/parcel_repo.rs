// src/db/parcel_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::parcel::Parcel};

#[derive(Clone)]
pub struct ParcelRepository {
    pool: PgPool,
}

impl ParcelRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Quarto e inquilino precisam pertencer ao locador; um id alheio é
    // tratado como inexistente, igual a um id inválido.
    pub async fn register_parcel(
        &self,
        landlord_id: Uuid,
        room_id: Uuid,
        tenant_id: Option<Uuid>,
        description: &str,
    ) -> Result<Parcel, AppError> {
        let room_ok = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM rooms WHERE id = $1 AND landlord_id = $2)",
        )
        .bind(room_id)
        .bind(landlord_id)
        .fetch_one(&self.pool)
        .await?;
        if !room_ok {
            return Err(AppError::RoomNotFound);
        }

        if let Some(tenant_id) = tenant_id {
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
        }

        let parcel = sqlx::query_as::<_, Parcel>(
            r#"
            INSERT INTO parcels (landlord_id, room_id, tenant_id, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(landlord_id)
        .bind(room_id)
        .bind(tenant_id)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;
        Ok(parcel)
    }

    pub async fn list_parcels(
        &self,
        landlord_id: Uuid,
        only_pending: bool,
    ) -> Result<Vec<Parcel>, AppError> {
        let parcels = sqlx::query_as::<_, Parcel>(
            r#"
            SELECT * FROM parcels
            WHERE landlord_id = $1 AND (NOT $2 OR NOT picked_up)
            ORDER BY arrived_at DESC
            "#,
        )
        .bind(landlord_id)
        .bind(only_pending)
        .fetch_all(&self.pool)
        .await?;
        Ok(parcels)
    }

    pub async fn mark_picked_up(&self, landlord_id: Uuid, id: Uuid) -> Result<Parcel, AppError> {
        sqlx::query_as::<_, Parcel>(
            r#"
            UPDATE parcels
            SET picked_up = TRUE, picked_up_at = now()
            WHERE id = $1 AND landlord_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(landlord_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::ParcelNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn quarto_de_outro_locador_e_tratado_como_inexistente(pool: PgPool) {
        let locador_a = testutil::seed_landlord(&pool).await;
        let locador_b = testutil::seed_landlord(&pool).await;
        let predio_b = testutil::seed_building(&pool, locador_b, "GB").await;
        let andar_b = testutil::seed_floor(&pool, locador_b, predio_b, 1).await;
        let quarto_b = testutil::seed_room(&pool, locador_b, predio_b, andar_b, "GB101").await;

        let repo = ParcelRepository::new(pool.clone());
        let err = repo
            .register_parcel(locador_a, quarto_b, None, "Caixa grande")
            .await;
        assert!(matches!(err, Err(AppError::RoomNotFound)));
    }

    #[sqlx::test]
    async fn inquilino_de_outro_locador_e_tratado_como_inexistente(pool: PgPool) {
        let locador_a = testutil::seed_landlord(&pool).await;
        let predio_a = testutil::seed_building(&pool, locador_a, "GA").await;
        let andar_a = testutil::seed_floor(&pool, locador_a, predio_a, 1).await;
        let quarto_a = testutil::seed_room(&pool, locador_a, predio_a, andar_a, "GA101").await;

        let locador_b = testutil::seed_landlord(&pool).await;
        let predio_b = testutil::seed_building(&pool, locador_b, "GB").await;
        let andar_b = testutil::seed_floor(&pool, locador_b, predio_b, 1).await;
        let quarto_b = testutil::seed_room(&pool, locador_b, predio_b, andar_b, "GB101").await;
        let inquilino_b =
            testutil::seed_checked_in_tenant(&pool, locador_b, quarto_b, None).await;

        let repo = ParcelRepository::new(pool.clone());
        let err = repo
            .register_parcel(locador_a, quarto_a, Some(inquilino_b.id), "Envelope")
            .await;
        assert!(matches!(err, Err(AppError::TenantNotFound)));
    }
}

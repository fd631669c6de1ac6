// src/db/announcement_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::announcement::Announcement};

#[derive(Clone)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Um aviso só pode ser escopado a um prédio do próprio locador.
    pub async fn create_announcement(
        &self,
        landlord_id: Uuid,
        building_id: Option<Uuid>,
        title: &str,
        body: &str,
    ) -> Result<Announcement, AppError> {
        if let Some(building_id) = building_id {
            let building_ok = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM buildings WHERE id = $1 AND landlord_id = $2)",
            )
            .bind(building_id)
            .bind(landlord_id)
            .fetch_one(&self.pool)
            .await?;
            if !building_ok {
                return Err(AppError::BuildingNotFound);
            }
        }

        let announcement = sqlx::query_as::<_, Announcement>(
            r#"
            INSERT INTO announcements (landlord_id, building_id, title, body)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(landlord_id)
        .bind(building_id)
        .bind(title)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;
        Ok(announcement)
    }

    pub async fn list_announcements(
        &self,
        landlord_id: Uuid,
    ) -> Result<Vec<Announcement>, AppError> {
        let announcements = sqlx::query_as::<_, Announcement>(
            "SELECT * FROM announcements WHERE landlord_id = $1 ORDER BY published_at DESC",
        )
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(announcements)
    }

    // Avisos visíveis num prédio: os do prédio + os globais do locador.
    pub async fn list_for_building(
        &self,
        landlord_id: Uuid,
        building_id: Uuid,
    ) -> Result<Vec<Announcement>, AppError> {
        let announcements = sqlx::query_as::<_, Announcement>(
            r#"
            SELECT * FROM announcements
            WHERE landlord_id = $1 AND (building_id = $2 OR building_id IS NULL)
            ORDER BY published_at DESC
            "#,
        )
        .bind(landlord_id)
        .bind(building_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(announcements)
    }

    pub async fn delete_announcement(&self, landlord_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1 AND landlord_id = $2")
            .bind(id)
            .bind(landlord_id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::AnnouncementNotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn predio_de_outro_locador_e_tratado_como_inexistente(pool: PgPool) {
        let locador_a = testutil::seed_landlord(&pool).await;
        let locador_b = testutil::seed_landlord(&pool).await;
        let predio_b = testutil::seed_building(&pool, locador_b, "GB").await;

        let repo = AnnouncementRepository::new(pool.clone());
        let err = repo
            .create_announcement(locador_a, Some(predio_b), "Manutenção", "Água fechada amanhã.")
            .await;
        assert!(matches!(err, Err(AppError::BuildingNotFound)));

        // O aviso global e o aviso no próprio prédio continuam passando.
        repo.create_announcement(locador_a, None, "Geral", "Aviso geral.")
            .await
            .unwrap();
        repo.create_announcement(locador_b, Some(predio_b), "GB", "Aviso do prédio.")
            .await
            .unwrap();
    }
}

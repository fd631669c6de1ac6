// src/services/tenancy_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{tenant_repo::NewTenant, PropertyRepository, TenantRepository},
    models::{
        property::RoomStatus,
        tenancy::Tenant,
    },
};

pub struct CheckInData {
    pub room_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub line_user_id: Option<String>,
    pub deposit: Decimal,
    pub lease_start: NaiveDate,
    pub lease_end: NaiveDate,
}

#[derive(Clone)]
pub struct TenancyService {
    tenant_repo: TenantRepository,
    property_repo: PropertyRepository,
    pool: PgPool,
}

impl TenancyService {
    pub fn new(
        tenant_repo: TenantRepository,
        property_repo: PropertyRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            tenant_repo,
            property_repo,
            pool,
        }
    }

    // Check-in: cria o inquilino e ocupa o quarto na mesma transação.
    // O quarto nunca fica "ocupado sem inquilino" nem o contrário.
    pub async fn check_in(
        &self,
        landlord_id: Uuid,
        data: CheckInData,
    ) -> Result<Tenant, AppError> {
        if data.lease_end <= data.lease_start {
            let mut errors = validator::ValidationErrors::new();
            let mut err = validator::ValidationError::new("lease");
            err.message = Some("O fim do contrato deve ser depois do início.".into());
            errors.add("leaseEnd", err);
            return Err(AppError::ValidationError(errors));
        }

        let room = self
            .property_repo
            .find_room(landlord_id, data.room_id)
            .await?
            .ok_or(AppError::RoomNotFound)?;
        if room.status == RoomStatus::Occupied {
            return Err(AppError::RoomAlreadyOccupied);
        }

        let mut tx = self.pool.begin().await?;

        let tenant = self
            .tenant_repo
            .create_tenant(
                &mut *tx,
                landlord_id,
                NewTenant {
                    room_id: data.room_id,
                    full_name: &data.full_name,
                    phone: &data.phone,
                    email: data.email.as_deref(),
                    line_user_id: data.line_user_id.as_deref(),
                    deposit: data.deposit,
                    lease_start: data.lease_start,
                    lease_end: data.lease_end,
                },
            )
            .await?;

        self.property_repo
            .set_room_occupancy(
                &mut *tx,
                landlord_id,
                data.room_id,
                RoomStatus::Occupied,
                Some(tenant.id),
            )
            .await?;

        tx.commit().await?;
        Ok(tenant)
    }

    // Check-out: desativa o inquilino e libera o quarto atomicamente.
    pub async fn check_out(&self, landlord_id: Uuid, tenant_id: Uuid) -> Result<Tenant, AppError> {
        let tenant = self
            .tenant_repo
            .find_tenant(landlord_id, tenant_id)
            .await?
            .ok_or(AppError::TenantNotFound)?;
        if !tenant.is_active {
            return Err(AppError::RoomNotOccupied);
        }

        let mut tx = self.pool.begin().await?;

        let tenant = self
            .tenant_repo
            .deactivate(&mut *tx, landlord_id, tenant_id)
            .await?;

        self.property_repo
            .set_room_occupancy(
                &mut *tx,
                landlord_id,
                tenant.room_id,
                RoomStatus::Available,
                None,
            )
            .await?;

        tx.commit().await?;
        Ok(tenant)
    }

    pub async fn list_tenants(
        &self,
        landlord_id: Uuid,
        only_active: bool,
    ) -> Result<Vec<Tenant>, AppError> {
        self.tenant_repo.list_tenants(landlord_id, only_active).await
    }

    pub async fn list_by_room(
        &self,
        landlord_id: Uuid,
        room_id: Uuid,
    ) -> Result<Vec<Tenant>, AppError> {
        self.tenant_repo.list_by_room(landlord_id, room_id).await
    }

    pub async fn get_tenant(&self, landlord_id: Uuid, id: Uuid) -> Result<Tenant, AppError> {
        self.tenant_repo
            .find_tenant(landlord_id, id)
            .await?
            .ok_or(AppError::TenantNotFound)
    }

    pub async fn update_contact(
        &self,
        landlord_id: Uuid,
        id: Uuid,
        phone: &str,
        email: Option<&str>,
        line_user_id: Option<&str>,
    ) -> Result<Tenant, AppError> {
        self.tenant_repo
            .update_contact(landlord_id, id, phone, email, line_user_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{db::PropertyRepository, testutil};
    use sqlx::PgPool;

    #[sqlx::test]
    async fn check_in_ocupa_o_quarto_e_check_out_libera(pool: PgPool) {
        let locador = testutil::seed_landlord(&pool).await;
        let predio = testutil::seed_building(&pool, locador, "GA").await;
        let andar = testutil::seed_floor(&pool, locador, predio, 1).await;
        let quarto = testutil::seed_room(&pool, locador, predio, andar, "GA101").await;

        let service = testutil::tenancy_service(&pool);
        let property_repo = PropertyRepository::new(pool.clone());

        let inquilino = testutil::seed_checked_in_tenant(&pool, locador, quarto, None).await;
        assert!(inquilino.is_active);

        let sala = property_repo.find_room(locador, quarto).await.unwrap().unwrap();
        assert_eq!(sala.status, RoomStatus::Occupied);
        assert_eq!(sala.tenant_id, Some(inquilino.id));

        let inquilino = service.check_out(locador, inquilino.id).await.unwrap();
        assert!(!inquilino.is_active);

        let sala = property_repo.find_room(locador, quarto).await.unwrap().unwrap();
        assert_eq!(sala.status, RoomStatus::Available);
        assert_eq!(sala.tenant_id, None);
    }

    #[sqlx::test]
    async fn quarto_ocupado_rejeita_segundo_check_in(pool: PgPool) {
        let locador = testutil::seed_landlord(&pool).await;
        let predio = testutil::seed_building(&pool, locador, "GA").await;
        let andar = testutil::seed_floor(&pool, locador, predio, 1).await;
        let quarto = testutil::seed_room(&pool, locador, predio, andar, "GA101").await;

        testutil::seed_checked_in_tenant(&pool, locador, quarto, None).await;

        let err = testutil::tenancy_service(&pool)
            .check_in(
                locador,
                CheckInData {
                    room_id: quarto,
                    full_name: "João Souza".into(),
                    phone: "11988880000".into(),
                    email: None,
                    line_user_id: None,
                    deposit: Decimal::from(1000),
                    lease_start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                    lease_end: NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
                },
            )
            .await;
        assert!(matches!(err, Err(AppError::RoomAlreadyOccupied)));
    }

    #[sqlx::test]
    async fn line_user_id_duplicado_vira_conflito(pool: PgPool) {
        let locador = testutil::seed_landlord(&pool).await;
        let predio = testutil::seed_building(&pool, locador, "GA").await;
        let andar = testutil::seed_floor(&pool, locador, predio, 1).await;
        let quarto_1 = testutil::seed_room(&pool, locador, predio, andar, "GA101").await;
        let quarto_2 = testutil::seed_room(&pool, locador, predio, andar, "GA102").await;
        let quarto_3 = testutil::seed_room(&pool, locador, predio, andar, "GA103").await;

        let line_id = "U4af4980629e2c0c1b2345678901234567";
        testutil::seed_checked_in_tenant(&pool, locador, quarto_1, Some(line_id)).await;
        let vizinho = testutil::seed_checked_in_tenant(&pool, locador, quarto_2, None).await;

        // Check-in num quarto livre com um line_user_id já usado.
        let err = testutil::tenancy_service(&pool)
            .check_in(
                locador,
                CheckInData {
                    room_id: quarto_3,
                    full_name: "João Souza".into(),
                    phone: "11988880000".into(),
                    email: None,
                    line_user_id: Some(line_id.into()),
                    deposit: Decimal::ZERO,
                    lease_start: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                    lease_end: NaiveDate::from_ymd_opt(2024, 11, 30).unwrap(),
                },
            )
            .await;
        assert!(matches!(err, Err(AppError::LineUserIdAlreadyExists)));

        // O mesmo conflito via atualização de contato.
        let err = testutil::tenancy_service(&pool)
            .update_contact(locador, vizinho.id, "11988880000", None, Some(line_id))
            .await;
        assert!(matches!(err, Err(AppError::LineUserIdAlreadyExists)));
    }
}

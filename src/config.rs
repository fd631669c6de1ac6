// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        AnnouncementRepository, BillingRepository, DashboardRepository, MaintenanceRepository,
        ParcelRepository, PropertyRepository, ScheduleRepository, StaffRepository,
        TenantRepository, UserRepository,
    },
    services::{
        AuthService, BillingService, DashboardService, LineNotifier, MaintenanceService,
        PropertyService, ScheduleService, TenancyService,
    },
};

// O estado compartilhado da aplicação. Todo o grafo de repositórios e
// serviços é montado UMA vez aqui e injetado por referência. Nada de
// registro global de modelos.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub property_service: PropertyService,
    pub tenancy_service: TenancyService,
    pub billing_service: BillingService,
    pub maintenance_service: MaintenanceService,
    pub schedule_service: ScheduleService,
    pub dashboard_service: DashboardService,
    pub staff_repo: StaffRepository,
    pub parcel_repo: ParcelRepository,
    pub announcement_repo: AnnouncementRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        // Opcional: sem o token, os pushes são simplesmente ignorados.
        let line_channel_token = env::var("LINE_CHANNEL_ACCESS_TOKEN").ok();

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o grafo de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let property_repo = PropertyRepository::new(db_pool.clone());
        let tenant_repo = TenantRepository::new(db_pool.clone());
        let billing_repo = BillingRepository::new(db_pool.clone());
        let maintenance_repo = MaintenanceRepository::new(db_pool.clone());
        let schedule_repo = ScheduleRepository::new(db_pool.clone());
        let staff_repo = StaffRepository::new(db_pool.clone());
        let parcel_repo = ParcelRepository::new(db_pool.clone());
        let announcement_repo = AnnouncementRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        let notifier = LineNotifier::new(line_channel_token);

        let auth_service = AuthService::new(user_repo, jwt_secret);
        let property_service = PropertyService::new(property_repo.clone(), db_pool.clone());
        let tenancy_service = TenancyService::new(
            tenant_repo.clone(),
            property_repo.clone(),
            db_pool.clone(),
        );
        let billing_service = BillingService::new(
            billing_repo,
            property_repo.clone(),
            db_pool.clone(),
        );
        let maintenance_service = MaintenanceService::new(
            maintenance_repo,
            tenant_repo,
            staff_repo.clone(),
            notifier,
            db_pool.clone(),
        );
        let schedule_service =
            ScheduleService::new(schedule_repo, property_repo, db_pool.clone());
        let dashboard_service = DashboardService::new(dashboard_repo);

        Ok(Self {
            db_pool,
            auth_service,
            property_service,
            tenancy_service,
            billing_service,
            maintenance_service,
            schedule_service,
            dashboard_service,
            staff_repo,
            parcel_repo,
            announcement_repo,
        })
    }
}

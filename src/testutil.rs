// src/testutil.rs
//
// Semeadura de dados para os testes que falam com o banco.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::{
        BillingRepository, MaintenanceRepository, PropertyRepository, ScheduleRepository,
        StaffRepository, TenantRepository,
    },
    models::tenancy::Tenant,
    services::{
        notify::LineNotifier,
        tenancy_service::CheckInData,
        BillingService, MaintenanceService, PropertyService, ScheduleService, TenancyService,
    },
};

pub async fn seed_landlord(pool: &PgPool) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO users (email, password_hash) VALUES ($1, 'hash-de-teste') RETURNING id",
    )
    .bind(format!("locador-{}@example.com", Uuid::new_v4()))
    .fetch_one(pool)
    .await
    .unwrap()
}

// Tarifas fixas (luz 8, água 18) para os testes de cobrança derivada.
pub async fn seed_building(pool: &PgPool, landlord_id: Uuid, name: &str) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO buildings (landlord_id, name, electricity_rate, water_rate)
        VALUES ($1, $2, 8, 18)
        RETURNING id
        "#,
    )
    .bind(landlord_id)
    .bind(name)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_floor(
    pool: &PgPool,
    landlord_id: Uuid,
    building_id: Uuid,
    floor_number: i32,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO floors (landlord_id, building_id, floor_number)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(landlord_id)
    .bind(building_id)
    .bind(floor_number)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn seed_room(
    pool: &PgPool,
    landlord_id: Uuid,
    building_id: Uuid,
    floor_id: Uuid,
    room_number: &str,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO rooms (landlord_id, building_id, floor_id, room_number, price)
        VALUES ($1, $2, $3, $4, 3000)
        RETURNING id
        "#,
    )
    .bind(landlord_id)
    .bind(building_id)
    .bind(floor_id)
    .bind(room_number)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub fn property_service(pool: &PgPool) -> PropertyService {
    PropertyService::new(PropertyRepository::new(pool.clone()), pool.clone())
}

pub fn tenancy_service(pool: &PgPool) -> TenancyService {
    TenancyService::new(
        TenantRepository::new(pool.clone()),
        PropertyRepository::new(pool.clone()),
        pool.clone(),
    )
}

pub fn billing_service(pool: &PgPool) -> BillingService {
    BillingService::new(
        BillingRepository::new(pool.clone()),
        PropertyRepository::new(pool.clone()),
        pool.clone(),
    )
}

pub fn maintenance_service(pool: &PgPool) -> MaintenanceService {
    MaintenanceService::new(
        MaintenanceRepository::new(pool.clone()),
        TenantRepository::new(pool.clone()),
        StaffRepository::new(pool.clone()),
        LineNotifier::new(None),
        pool.clone(),
    )
}

pub fn schedule_service(pool: &PgPool) -> ScheduleService {
    ScheduleService::new(
        ScheduleRepository::new(pool.clone()),
        PropertyRepository::new(pool.clone()),
        pool.clone(),
    )
}

// Check-in completo de um inquilino via service, para os testes que só
// precisam de um quarto ocupado.
pub async fn seed_checked_in_tenant(
    pool: &PgPool,
    landlord_id: Uuid,
    room_id: Uuid,
    line_user_id: Option<&str>,
) -> Tenant {
    tenancy_service(pool)
        .check_in(
            landlord_id,
            CheckInData {
                room_id,
                full_name: "Maria Silva".into(),
                phone: "11999990000".into(),
                email: None,
                line_user_id: line_user_id.map(str::to_string),
                deposit: Decimal::from(1000),
                lease_start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                lease_end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
            },
        )
        .await
        .unwrap()
}

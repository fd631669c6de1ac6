// src/db/property_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::property::{Building, Floor, Room, RoomStatus},
};

// Repositório da hierarquia Prédio -> Andar -> Quarto.
// Toda consulta filtra por landlord_id; a autorização passa por aqui, não
// por cada rota lembrar de filtrar.
#[derive(Clone)]
pub struct PropertyRepository {
    pool: PgPool,
}

impl PropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Prédios ---

    pub async fn create_building(
        &self,
        landlord_id: Uuid,
        name: &str,
        electricity_rate: Decimal,
        water_rate: Decimal,
    ) -> Result<Building, AppError> {
        sqlx::query_as::<_, Building>(
            r#"
            INSERT INTO buildings (landlord_id, name, electricity_rate, water_rate)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(landlord_id)
        .bind(name)
        .bind(electricity_rate)
        .bind(water_rate)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateBuildingName;
                }
            }
            e.into()
        })
    }

    pub async fn list_buildings(&self, landlord_id: Uuid) -> Result<Vec<Building>, AppError> {
        let buildings = sqlx::query_as::<_, Building>(
            "SELECT * FROM buildings WHERE landlord_id = $1 ORDER BY name",
        )
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(buildings)
    }

    pub async fn find_building(
        &self,
        landlord_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Building>, AppError> {
        let building = sqlx::query_as::<_, Building>(
            "SELECT * FROM buildings WHERE id = $1 AND landlord_id = $2",
        )
        .bind(id)
        .bind(landlord_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(building)
    }

    pub async fn update_building_rates(
        &self,
        landlord_id: Uuid,
        id: Uuid,
        electricity_rate: Decimal,
        water_rate: Decimal,
    ) -> Result<Building, AppError> {
        sqlx::query_as::<_, Building>(
            r#"
            UPDATE buildings
            SET electricity_rate = $3, water_rate = $4
            WHERE id = $1 AND landlord_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(landlord_id)
        .bind(electricity_rate)
        .bind(water_rate)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::BuildingNotFound)
    }

    // Renomeia o prédio dentro de uma transação (a renumeração dos quartos
    // acontece na mesma transação, no service).
    pub async fn rename_building<'e, E>(
        &self,
        executor: E,
        landlord_id: Uuid,
        id: Uuid,
        new_name: &str,
    ) -> Result<Building, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Building>(
            r#"
            UPDATE buildings
            SET name = $3
            WHERE id = $1 AND landlord_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(landlord_id)
        .bind(new_name)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateBuildingName;
                }
            }
            AppError::from(e)
        })?
        .ok_or(AppError::BuildingNotFound)
    }

    // --- Andares ---

    pub async fn create_floor(
        &self,
        landlord_id: Uuid,
        building_id: Uuid,
        floor_number: i32,
    ) -> Result<Floor, AppError> {
        let floor = sqlx::query_as::<_, Floor>(
            r#"
            INSERT INTO floors (landlord_id, building_id, floor_number)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(landlord_id)
        .bind(building_id)
        .bind(floor_number)
        .fetch_one(&self.pool)
        .await?;
        Ok(floor)
    }

    pub async fn list_floors(
        &self,
        landlord_id: Uuid,
        building_id: Uuid,
    ) -> Result<Vec<Floor>, AppError> {
        let floors = sqlx::query_as::<_, Floor>(
            r#"
            SELECT * FROM floors
            WHERE building_id = $1 AND landlord_id = $2
            ORDER BY floor_number
            "#,
        )
        .bind(building_id)
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(floors)
    }

    pub async fn find_floor(
        &self,
        landlord_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Floor>, AppError> {
        let floor =
            sqlx::query_as::<_, Floor>("SELECT * FROM floors WHERE id = $1 AND landlord_id = $2")
                .bind(id)
                .bind(landlord_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(floor)
    }

    // --- Quartos ---

    pub async fn create_room(
        &self,
        landlord_id: Uuid,
        building_id: Uuid,
        floor_id: Uuid,
        room_number: &str,
        price: Decimal,
    ) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (landlord_id, building_id, floor_id, room_number, price)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(landlord_id)
        .bind(building_id)
        .bind(floor_id)
        .bind(room_number)
        .bind(price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::DuplicateRoomNumber;
                }
            }
            e.into()
        })
    }

    pub async fn list_rooms(&self, landlord_id: Uuid) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE landlord_id = $1 ORDER BY room_number",
        )
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rooms)
    }

    pub async fn list_rooms_by_building(
        &self,
        landlord_id: Uuid,
        building_id: Uuid,
    ) -> Result<Vec<Room>, AppError> {
        let rooms = sqlx::query_as::<_, Room>(
            r#"
            SELECT * FROM rooms
            WHERE building_id = $1 AND landlord_id = $2
            ORDER BY room_number
            "#,
        )
        .bind(building_id)
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rooms)
    }

    pub async fn find_room(&self, landlord_id: Uuid, id: Uuid) -> Result<Option<Room>, AppError> {
        let room =
            sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1 AND landlord_id = $2")
                .bind(id)
                .bind(landlord_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(room)
    }

    pub async fn update_room_price(
        &self,
        landlord_id: Uuid,
        id: Uuid,
        price: Decimal,
    ) -> Result<Room, AppError> {
        sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms SET price = $3
            WHERE id = $1 AND landlord_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(landlord_id)
        .bind(price)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::RoomNotFound)
    }

    // Quartos com faturas, leituras ou chamados vinculados não podem sumir;
    // a violação de FK vira um conflito, não um 500.
    pub async fn delete_room(&self, landlord_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1 AND landlord_id = $2")
            .bind(id)
            .bind(landlord_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_foreign_key_violation() {
                        return AppError::RoomInUse;
                    }
                }
                AppError::from(e)
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::RoomNotFound);
        }
        Ok(())
    }

    // Lista os quartos de um prédio dentro da transação de renumeração.
    pub async fn list_rooms_for_update<'e, E>(
        &self,
        executor: E,
        landlord_id: Uuid,
        building_id: Uuid,
    ) -> Result<Vec<Room>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let rooms = sqlx::query_as::<_, Room>(
            r#"
            SELECT * FROM rooms
            WHERE building_id = $1 AND landlord_id = $2
            ORDER BY room_number
            FOR UPDATE
            "#,
        )
        .bind(building_id)
        .bind(landlord_id)
        .fetch_all(executor)
        .await?;
        Ok(rooms)
    }

    pub async fn update_room_number<'e, E>(
        &self,
        executor: E,
        room_id: Uuid,
        new_number: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE rooms SET room_number = $2 WHERE id = $1")
            .bind(room_id)
            .bind(new_number)
            .execute(executor)
            .await
            .map_err(|e| {
                if let Some(db_err) = e.as_database_error() {
                    if db_err.is_unique_violation() {
                        return AppError::DuplicateRoomNumber;
                    }
                }
                e.into()
            })?;
        Ok(())
    }

    // Status e vínculo de inquilino mudam SEMPRE juntos (o CHECK do banco
    // rejeita qualquer combinação inconsistente).
    pub async fn set_room_occupancy<'e, E>(
        &self,
        executor: E,
        landlord_id: Uuid,
        room_id: Uuid,
        status: RoomStatus,
        tenant_id: Option<Uuid>,
    ) -> Result<Room, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms SET status = $3, tenant_id = $4
            WHERE id = $1 AND landlord_id = $2
            RETURNING *
            "#,
        )
        .bind(room_id)
        .bind(landlord_id)
        .bind(status)
        .bind(tenant_id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::RoomNotFound)
    }
}

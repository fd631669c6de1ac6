// src/services/property_service.rs

use std::collections::HashSet;

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::PropertyRepository,
    models::property::{Building, Floor, RenumberOutcome, Room},
};

// Regra canônica de renumeração: preserva o sufixo numérico (dígitos ASCII
// no final) do número antigo e prepõe o nome novo do prédio.
// "GA101" + prédio "GB" -> "GB101". Números sem sufixo numérico não são
// renumerados (retorna None) e ficam como estão.
pub fn renumber_room(new_building_name: &str, room_number: &str) -> Option<String> {
    let suffix_len = room_number
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .count();
    if suffix_len == 0 {
        return None;
    }
    // Sufixo é ASCII puro, então o corte por bytes é seguro.
    let suffix = &room_number[room_number.len() - suffix_len..];
    Some(format!("{new_building_name}{suffix}"))
}

#[derive(Clone)]
pub struct PropertyService {
    repo: PropertyRepository,
    pool: PgPool,
}

impl PropertyService {
    pub fn new(repo: PropertyRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // --- Prédios ---

    pub async fn create_building(
        &self,
        landlord_id: Uuid,
        name: &str,
        electricity_rate: Decimal,
        water_rate: Decimal,
    ) -> Result<Building, AppError> {
        self.repo
            .create_building(landlord_id, name, electricity_rate, water_rate)
            .await
    }

    pub async fn list_buildings(&self, landlord_id: Uuid) -> Result<Vec<Building>, AppError> {
        self.repo.list_buildings(landlord_id).await
    }

    pub async fn get_building(&self, landlord_id: Uuid, id: Uuid) -> Result<Building, AppError> {
        self.repo
            .find_building(landlord_id, id)
            .await?
            .ok_or(AppError::BuildingNotFound)
    }

    pub async fn update_building_rates(
        &self,
        landlord_id: Uuid,
        id: Uuid,
        electricity_rate: Decimal,
        water_rate: Decimal,
    ) -> Result<Building, AppError> {
        self.repo
            .update_building_rates(landlord_id, id, electricity_rate, water_rate)
            .await
    }

    // Renomeia o prédio e renumera todos os quartos na MESMA transação:
    // ou tudo muda, ou nada muda. Se a renumeração produzir números
    // duplicados dentro do prédio, a transação inteira é abortada.
    pub async fn rename_building(
        &self,
        landlord_id: Uuid,
        building_id: Uuid,
        new_name: &str,
    ) -> Result<RenumberOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        // A unique de número de quarto é deferível; adiamos a checagem para
        // o COMMIT, senão trocas de número dentro do lote conflitam entre si.
        sqlx::query("SET CONSTRAINTS rooms_building_number_key DEFERRED")
            .execute(&mut *tx)
            .await?;

        let building = self
            .repo
            .rename_building(&mut *tx, landlord_id, building_id, new_name)
            .await?;

        let rooms = self
            .repo
            .list_rooms_for_update(&mut *tx, landlord_id, building_id)
            .await?;

        // Planeja os números novos e valida unicidade antes de escrever.
        let mut final_numbers: HashSet<String> = HashSet::new();
        let mut planned: Vec<(Uuid, String)> = Vec::new();
        let mut skipped: Vec<String> = Vec::new();

        for room in &rooms {
            match renumber_room(new_name, &room.room_number) {
                Some(new_number) => {
                    if !final_numbers.insert(new_number.clone()) {
                        return Err(AppError::DuplicateRoomNumber);
                    }
                    if new_number != room.room_number {
                        planned.push((room.id, new_number));
                    }
                }
                None => {
                    if !final_numbers.insert(room.room_number.clone()) {
                        return Err(AppError::DuplicateRoomNumber);
                    }
                    skipped.push(room.room_number.clone());
                }
            }
        }

        let renumbered = planned.len() as i64;
        for (room_id, new_number) in planned {
            self.repo
                .update_room_number(&mut *tx, room_id, &new_number)
                .await?;
        }

        tx.commit().await?;

        if !skipped.is_empty() {
            tracing::warn!(
                "Renumeração do prédio {} manteve {} quarto(s) sem sufixo numérico",
                building_id,
                skipped.len()
            );
        }

        Ok(RenumberOutcome {
            building,
            renumbered,
            skipped,
        })
    }

    // --- Andares ---

    pub async fn create_floor(
        &self,
        landlord_id: Uuid,
        building_id: Uuid,
        floor_number: i32,
    ) -> Result<Floor, AppError> {
        // Garante que o prédio é do locador antes de criar o andar.
        self.get_building(landlord_id, building_id).await?;
        self.repo
            .create_floor(landlord_id, building_id, floor_number)
            .await
    }

    pub async fn list_floors(
        &self,
        landlord_id: Uuid,
        building_id: Uuid,
    ) -> Result<Vec<Floor>, AppError> {
        self.repo.list_floors(landlord_id, building_id).await
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
        self.get_building(landlord_id, building_id).await?;
        let floor = self
            .repo
            .find_floor(landlord_id, floor_id)
            .await?
            .ok_or(AppError::FloorNotFound)?;
        if floor.building_id != building_id {
            return Err(AppError::FloorNotFound);
        }
        self.repo
            .create_room(landlord_id, building_id, floor_id, room_number, price)
            .await
    }

    pub async fn list_rooms(&self, landlord_id: Uuid) -> Result<Vec<Room>, AppError> {
        self.repo.list_rooms(landlord_id).await
    }

    pub async fn list_rooms_by_building(
        &self,
        landlord_id: Uuid,
        building_id: Uuid,
    ) -> Result<Vec<Room>, AppError> {
        self.repo
            .list_rooms_by_building(landlord_id, building_id)
            .await
    }

    pub async fn get_room(&self, landlord_id: Uuid, id: Uuid) -> Result<Room, AppError> {
        self.repo
            .find_room(landlord_id, id)
            .await?
            .ok_or(AppError::RoomNotFound)
    }

    pub async fn update_room_price(
        &self,
        landlord_id: Uuid,
        id: Uuid,
        price: Decimal,
    ) -> Result<Room, AppError> {
        self.repo.update_room_price(landlord_id, id, price).await
    }

    pub async fn delete_room(&self, landlord_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let room = self.get_room(landlord_id, id).await?;
        if room.tenant_id.is_some() {
            return Err(AppError::RoomAlreadyOccupied);
        }
        self.repo.delete_room(landlord_id, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::renumber_room;

    #[test]
    fn preserva_sufixo_numerico_e_prepoe_nome_novo() {
        assert_eq!(renumber_room("GB", "GA101").as_deref(), Some("GB101"));
        assert_eq!(renumber_room("Torre B", "Torre A12").as_deref(), Some("Torre B12"));
    }

    #[test]
    fn sufixo_pode_ter_mais_ou_menos_de_tres_digitos() {
        assert_eq!(renumber_room("GB", "GA1").as_deref(), Some("GB1"));
        assert_eq!(renumber_room("GB", "GA1024").as_deref(), Some("GB1024"));
    }

    #[test]
    fn numero_sem_digitos_nao_e_renumerado() {
        assert_eq!(renumber_room("GB", "Suite-Master"), None);
        assert_eq!(renumber_room("GB", ""), None);
    }

    #[test]
    fn renumerar_duas_vezes_equivale_a_uma() {
        let once = renumber_room("GB", "GA101").unwrap();
        let twice = renumber_room("GB", &once).unwrap();
        assert_eq!(once, twice);
    }

    #[sqlx::test]
    async fn quarto_com_faturas_nao_pode_ser_excluido(pool: sqlx::PgPool) {
        use crate::{common::error::AppError, testutil};
        use rust_decimal::Decimal;

        let locador = testutil::seed_landlord(&pool).await;
        let predio = testutil::seed_building(&pool, locador, "GA").await;
        let andar = testutil::seed_floor(&pool, locador, predio, 1).await;
        let quarto = testutil::seed_room(&pool, locador, predio, andar, "GA101").await;

        let inquilino = testutil::seed_checked_in_tenant(&pool, locador, quarto, None).await;
        testutil::billing_service(&pool)
            .create_bill(locador, quarto, "2024-07", Decimal::ZERO)
            .await
            .unwrap();
        testutil::tenancy_service(&pool)
            .check_out(locador, inquilino.id)
            .await
            .unwrap();

        // Vago, mas com fatura histórica: conflito, não 500.
        let err = testutil::property_service(&pool)
            .delete_room(locador, quarto)
            .await;
        assert!(matches!(err, Err(AppError::RoomInUse)));
    }

    #[sqlx::test]
    async fn renomear_predio_renumera_os_quartos_na_mesma_transacao(pool: sqlx::PgPool) {
        use crate::testutil;

        let locador = testutil::seed_landlord(&pool).await;
        let predio = testutil::seed_building(&pool, locador, "GA").await;
        let andar = testutil::seed_floor(&pool, locador, predio, 1).await;
        testutil::seed_room(&pool, locador, predio, andar, "GA101").await;
        testutil::seed_room(&pool, locador, predio, andar, "GA102").await;
        testutil::seed_room(&pool, locador, predio, andar, "Suite-Master").await;

        let service = testutil::property_service(&pool);
        let outcome = service.rename_building(locador, predio, "GB").await.unwrap();

        assert_eq!(outcome.building.name, "GB");
        assert_eq!(outcome.renumbered, 2);
        assert_eq!(outcome.skipped, vec!["Suite-Master".to_string()]);

        let numbers: Vec<String> = service
            .list_rooms_by_building(locador, predio)
            .await
            .unwrap()
            .into_iter()
            .map(|room| room.room_number)
            .collect();
        assert!(numbers.contains(&"GB101".to_string()));
        assert!(numbers.contains(&"GB102".to_string()));
        assert!(numbers.contains(&"Suite-Master".to_string()));
    }
}

// src/services/billing_service.rs

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        billing_repo::{BillAmounts, UsageValues},
        BillingRepository, PropertyRepository,
    },
    models::billing::{Bill, BillStatus, Expense, UtilityUsage},
};

// Normaliza uma entrada arbitrária para a chave de mês "YYYY-MM".
// Valores já no formato passam verbatim; datas são formatadas; o resto é
// rejeitado pelo chamador (nada de descartar em silêncio).
pub fn billing_month_key(raw: &str) -> Option<String> {
    let bytes = raw.as_bytes();
    let is_month_key = bytes.len() == 7
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..].iter().all(u8::is_ascii_digit)
        && (1..=12).contains(&raw[5..7].parse::<u8>().unwrap_or(0));
    if is_month_key {
        return Some(raw.to_string());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.format("%Y-%m").to_string());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.format("%Y-%m").to_string());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.format("%Y-%m").to_string());
    }
    None
}

pub struct MeterReadings {
    pub electricity_previous: Decimal,
    pub electricity_current: Decimal,
    pub water_previous: Decimal,
    pub water_current: Decimal,
}

// Derivação das cobranças de consumo: units = atual - anterior,
// charge = units * tarifa, total = luz + água. Sempre recalculada a cada
// escrita; leitura atual menor que a anterior é erro, não cobrança negativa.
pub fn compute_usage_values(
    readings: &MeterReadings,
    electricity_rate: Decimal,
    water_rate: Decimal,
) -> Result<UsageValues, AppError> {
    let electricity_units = readings.electricity_current - readings.electricity_previous;
    let water_units = readings.water_current - readings.water_previous;
    if electricity_units < Decimal::ZERO || water_units < Decimal::ZERO {
        return Err(AppError::NegativeMeterDelta);
    }

    let electricity_charge = electricity_units * electricity_rate;
    let water_charge = water_units * water_rate;

    Ok(UsageValues {
        electricity_previous: readings.electricity_previous,
        electricity_current: readings.electricity_current,
        water_previous: readings.water_previous,
        water_current: readings.water_current,
        electricity_units,
        electricity_charge,
        water_units,
        water_charge,
        total_charge: electricity_charge + water_charge,
    })
}

#[derive(Clone)]
pub struct BillingService {
    repo: BillingRepository,
    property_repo: PropertyRepository,
    pool: PgPool,
}

impl BillingService {
    pub fn new(repo: BillingRepository, property_repo: PropertyRepository, pool: PgPool) -> Self {
        Self {
            repo,
            property_repo,
            pool,
        }
    }

    fn month_key(&self, raw: &str) -> Result<String, AppError> {
        billing_month_key(raw).ok_or_else(|| AppError::InvalidBillingMonth(raw.to_string()))
    }

    // Cria a fatura de um quarto ocupado: aluguel do quarto + consumo do mês
    // (se houver leitura) + valor avulso. A unique (room_id, bill_month)
    // garante uma fatura por mês.
    pub async fn create_bill(
        &self,
        landlord_id: Uuid,
        room_id: Uuid,
        month_raw: &str,
        other_amount: Decimal,
    ) -> Result<Bill, AppError> {
        let bill_month = self.month_key(month_raw)?;

        let room = self
            .property_repo
            .find_room(landlord_id, room_id)
            .await?
            .ok_or(AppError::RoomNotFound)?;
        let tenant_id = room.tenant_id.ok_or(AppError::RoomNotOccupied)?;

        let usage = self
            .repo
            .find_usage_for_room_month(&self.pool, landlord_id, room_id, &bill_month)
            .await?;
        let (electricity, water) = match &usage {
            Some(u) => (u.electricity_charge, u.water_charge),
            None => (Decimal::ZERO, Decimal::ZERO),
        };

        let amounts = BillAmounts {
            rent: room.price,
            electricity,
            water,
            other: other_amount,
            total: room.price + electricity + water + other_amount,
        };

        self.repo
            .create_bill(&self.pool, landlord_id, room_id, tenant_id, &bill_month, amounts)
            .await
    }

    // Reconciliação: gera a fatura que falta para cada quarto ocupado do mês.
    // Tudo numa transação: ou o mês fecha inteiro, ou não fecha.
    pub async fn ensure_bills_for_month(
        &self,
        landlord_id: Uuid,
        month_raw: &str,
    ) -> Result<Vec<Bill>, AppError> {
        let bill_month = self.month_key(month_raw)?;

        let mut tx = self.pool.begin().await?;

        let missing = self
            .repo
            .rooms_without_bill(&mut *tx, landlord_id, &bill_month)
            .await?;

        let mut created = Vec::with_capacity(missing.len());
        for info in missing {
            let usage = self
                .repo
                .find_usage_for_room_month(&mut *tx, landlord_id, info.room_id, &bill_month)
                .await?;
            let (electricity, water) = match &usage {
                Some(u) => (u.electricity_charge, u.water_charge),
                None => (Decimal::ZERO, Decimal::ZERO),
            };

            let amounts = BillAmounts {
                rent: info.price,
                electricity,
                water,
                other: Decimal::ZERO,
                total: info.price + electricity + water,
            };

            let bill = self
                .repo
                .create_bill(
                    &mut *tx,
                    landlord_id,
                    info.room_id,
                    info.tenant_id,
                    &bill_month,
                    amounts,
                )
                .await?;
            created.push(bill);
        }

        tx.commit().await?;

        tracing::info!(
            "Geradas {} fatura(s) pendente(s) para o mês {}",
            created.len(),
            bill_month
        );
        Ok(created)
    }

    pub async fn list_bills(
        &self,
        landlord_id: Uuid,
        month: Option<&str>,
        status: Option<BillStatus>,
    ) -> Result<Vec<Bill>, AppError> {
        let month = match month {
            Some(raw) => Some(self.month_key(raw)?),
            None => None,
        };
        self.repo
            .list_bills(landlord_id, month.as_deref(), status)
            .await
    }

    pub async fn get_bill(&self, landlord_id: Uuid, id: Uuid) -> Result<Bill, AppError> {
        self.repo
            .find_bill(landlord_id, id)
            .await?
            .ok_or(AppError::BillNotFound)
    }

    pub async fn mark_paid(&self, landlord_id: Uuid, id: Uuid) -> Result<Bill, AppError> {
        self.repo.mark_paid(landlord_id, id).await
    }

    // --- Consumo ---

    pub async fn record_usage(
        &self,
        landlord_id: Uuid,
        room_id: Uuid,
        month_raw: &str,
        readings: MeterReadings,
    ) -> Result<UtilityUsage, AppError> {
        let usage_month = self.month_key(month_raw)?;

        let room = self
            .property_repo
            .find_room(landlord_id, room_id)
            .await?
            .ok_or(AppError::RoomNotFound)?;
        let building = self
            .property_repo
            .find_building(landlord_id, room.building_id)
            .await?
            .ok_or(AppError::BuildingNotFound)?;

        let values =
            compute_usage_values(&readings, building.electricity_rate, building.water_rate)?;

        self.repo
            .create_usage(landlord_id, room_id, &usage_month, values)
            .await
    }

    // Editar leituras recalcula TODOS os derivados com as tarifas atuais do
    // prédio. Nunca fica valor velho gravado.
    pub async fn update_usage_readings(
        &self,
        landlord_id: Uuid,
        usage_id: Uuid,
        readings: MeterReadings,
    ) -> Result<UtilityUsage, AppError> {
        let usage = self
            .repo
            .find_usage(landlord_id, usage_id)
            .await?
            .ok_or(AppError::UsageNotFound)?;

        let room = self
            .property_repo
            .find_room(landlord_id, usage.room_id)
            .await?
            .ok_or(AppError::RoomNotFound)?;
        let building = self
            .property_repo
            .find_building(landlord_id, room.building_id)
            .await?
            .ok_or(AppError::BuildingNotFound)?;

        let values =
            compute_usage_values(&readings, building.electricity_rate, building.water_rate)?;

        self.repo.update_usage(landlord_id, usage_id, values).await
    }

    pub async fn list_usages(
        &self,
        landlord_id: Uuid,
        month: Option<&str>,
    ) -> Result<Vec<UtilityUsage>, AppError> {
        let month = match month {
            Some(raw) => Some(self.month_key(raw)?),
            None => None,
        };
        self.repo.list_usages(landlord_id, month.as_deref()).await
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
        self.repo
            .create_expense(landlord_id, description, category, amount, spent_on)
            .await
    }

    pub async fn list_expenses(&self, landlord_id: Uuid) -> Result<Vec<Expense>, AppError> {
        self.repo.list_expenses(landlord_id).await
    }

    pub async fn delete_expense(&self, landlord_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.repo.delete_expense(landlord_id, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    #[test]
    fn mes_ja_formatado_passa_verbatim() {
        assert_eq!(billing_month_key("2024-07").as_deref(), Some("2024-07"));
        assert_eq!(billing_month_key("1999-12").as_deref(), Some("1999-12"));
    }

    #[test]
    fn data_vira_chave_de_mes() {
        assert_eq!(billing_month_key("2024-07-15").as_deref(), Some("2024-07"));
        assert_eq!(
            billing_month_key("2024-07-15T08:30:00+07:00").as_deref(),
            Some("2024-07")
        );
        assert_eq!(
            billing_month_key("2024-07-15 08:30:00").as_deref(),
            Some("2024-07")
        );
    }

    #[test]
    fn entrada_invalida_e_rejeitada_em_vez_de_descartada() {
        assert_eq!(billing_month_key(""), None);
        assert_eq!(billing_month_key("julho de 2024"), None);
        assert_eq!(billing_month_key("2024-13"), None);
        assert_eq!(billing_month_key("2024-00"), None);
    }

    fn readings(e_prev: i64, e_cur: i64, w_prev: i64, w_cur: i64) -> MeterReadings {
        MeterReadings {
            electricity_previous: Decimal::from(e_prev),
            electricity_current: Decimal::from(e_cur),
            water_previous: Decimal::from(w_prev),
            water_current: Decimal::from(w_cur),
        }
    }

    #[test]
    fn total_e_soma_das_cobrancas_derivadas() {
        // (120 - 100) * 8 + (35 - 30) * 18 = 160 + 90 = 250
        let values = compute_usage_values(
            &readings(100, 120, 30, 35),
            Decimal::from(8),
            Decimal::from(18),
        )
        .unwrap();

        assert_eq!(values.electricity_units, Decimal::from(20));
        assert_eq!(values.electricity_charge, Decimal::from(160));
        assert_eq!(values.water_units, Decimal::from(5));
        assert_eq!(values.water_charge, Decimal::from(90));
        assert_eq!(values.total_charge, Decimal::from(250));
    }

    #[test]
    fn consumo_zero_e_valido() {
        let values = compute_usage_values(
            &readings(100, 100, 30, 30),
            Decimal::from(8),
            Decimal::from(18),
        )
        .unwrap();
        assert_eq!(values.total_charge, Decimal::ZERO);
    }

    #[test]
    fn leitura_regressiva_e_rejeitada() {
        let err = compute_usage_values(
            &readings(120, 100, 30, 35),
            Decimal::from(8),
            Decimal::from(18),
        );
        assert!(matches!(err, Err(AppError::NegativeMeterDelta)));
    }

    #[sqlx::test]
    async fn segunda_fatura_no_mesmo_mes_conflita(pool: sqlx::PgPool) {
        let locador = testutil::seed_landlord(&pool).await;
        let predio = testutil::seed_building(&pool, locador, "GA").await;
        let andar = testutil::seed_floor(&pool, locador, predio, 1).await;
        let quarto = testutil::seed_room(&pool, locador, predio, andar, "GA101").await;
        testutil::seed_checked_in_tenant(&pool, locador, quarto, None).await;

        let service = testutil::billing_service(&pool);
        service
            .create_bill(locador, quarto, "2024-07", Decimal::ZERO)
            .await
            .unwrap();

        let err = service
            .create_bill(locador, quarto, "2024-07", Decimal::ZERO)
            .await;
        assert!(matches!(err, Err(AppError::BillAlreadyExists)));
    }

    #[sqlx::test]
    async fn fatura_soma_aluguel_consumo_e_avulso(pool: sqlx::PgPool) {
        let locador = testutil::seed_landlord(&pool).await;
        let predio = testutil::seed_building(&pool, locador, "GA").await;
        let andar = testutil::seed_floor(&pool, locador, predio, 1).await;
        let quarto = testutil::seed_room(&pool, locador, predio, andar, "GA101").await;
        testutil::seed_checked_in_tenant(&pool, locador, quarto, None).await;

        let service = testutil::billing_service(&pool);
        service
            .record_usage(
                locador,
                quarto,
                "2024-07",
                readings(100, 120, 30, 35),
            )
            .await
            .unwrap();

        // Aluguel 3000 + luz 20*8 + água 5*18 + avulso 50.
        let bill = service
            .create_bill(locador, quarto, "2024-07", Decimal::from(50))
            .await
            .unwrap();
        assert_eq!(bill.rent_amount, Decimal::from(3000));
        assert_eq!(bill.electricity_amount, Decimal::from(160));
        assert_eq!(bill.water_amount, Decimal::from(90));
        assert_eq!(bill.total_amount, Decimal::from(3300));
    }
}

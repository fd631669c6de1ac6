// src/services/schedule_service.rs

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{PropertyRepository, ScheduleRepository},
    models::schedule::{CleaningSlot, ScheduleWithSlots},
    services::billing_service::billing_month_key,
};

// Gera os horários concretos de um mês a partir dos dias da semana
// escolhidos, das faixas diárias e da duração do slot. Como os slots só
// nascem daqui, todo slot reservável cai, por construção, dentro de uma
// faixa declarada.
pub fn generate_slots(
    year: i32,
    month: u32,
    weekdays: &[i16],
    ranges: &[(NaiveTime, NaiveTime)],
    slot_minutes: i64,
) -> Vec<(NaiveDate, NaiveTime, NaiveTime)> {
    let mut slots = Vec::new();
    if slot_minutes <= 0 {
        return slots;
    }

    let mut day = 1u32;
    while let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
        let iso_weekday = date.weekday().number_from_monday() as i16;
        if weekdays.contains(&iso_weekday) {
            for &(start, end) in ranges {
                let total_minutes = (end - start).num_minutes();
                let count = total_minutes / slot_minutes;
                for i in 0..count {
                    let slot_start = start + Duration::minutes(i * slot_minutes);
                    let slot_end = start + Duration::minutes((i + 1) * slot_minutes);
                    slots.push((date, slot_start, slot_end));
                }
            }
        }
        day += 1;
    }
    slots
}

// Faixas sobrepostas gerariam slots com o mesmo (data, início) e violariam
// a unique de cleaning_slots; são rejeitadas na validação.
pub fn ranges_overlap(ranges: &[(NaiveTime, NaiveTime)]) -> bool {
    let mut sorted = ranges.to_vec();
    sorted.sort();
    sorted.windows(2).any(|pair| pair[1].0 < pair[0].1)
}

#[derive(Clone)]
pub struct ScheduleService {
    repo: ScheduleRepository,
    property_repo: PropertyRepository,
    pool: PgPool,
}

impl ScheduleService {
    pub fn new(repo: ScheduleRepository, property_repo: PropertyRepository, pool: PgPool) -> Self {
        Self {
            repo,
            property_repo,
            pool,
        }
    }

    // Cria a agenda e pré-gera todos os slots do mês numa transação só.
    pub async fn create_schedule(
        &self,
        landlord_id: Uuid,
        building_id: Uuid,
        month_raw: &str,
        weekdays: Vec<i16>,
        ranges: Vec<(NaiveTime, NaiveTime)>,
        slot_minutes: i32,
    ) -> Result<ScheduleWithSlots, AppError> {
        let month = billing_month_key(month_raw)
            .ok_or_else(|| AppError::InvalidBillingMonth(month_raw.to_string()))?;

        let mut errors = validator::ValidationErrors::new();
        if weekdays.is_empty() || weekdays.iter().any(|d| !(1..=7).contains(d)) {
            let mut err = validator::ValidationError::new("weekdays");
            err.message = Some("Dias da semana devem ser valores ISO entre 1 e 7.".into());
            errors.add("weekdays", err);
        }
        if ranges.is_empty() || ranges.iter().any(|(s, e)| e <= s) {
            let mut err = validator::ValidationError::new("ranges");
            err.message = Some("Cada faixa precisa de fim depois do início.".into());
            errors.add("ranges", err);
        } else if ranges_overlap(&ranges) {
            let mut err = validator::ValidationError::new("ranges");
            err.message = Some("As faixas não podem se sobrepor.".into());
            errors.add("ranges", err);
        }
        if slot_minutes <= 0 {
            let mut err = validator::ValidationError::new("slotMinutes");
            err.message = Some("A duração do slot deve ser positiva.".into());
            errors.add("slotMinutes", err);
        }
        if !errors.is_empty() {
            return Err(AppError::ValidationError(errors));
        }

        self.property_repo
            .find_building(landlord_id, building_id)
            .await?
            .ok_or(AppError::BuildingNotFound)?;

        let year: i32 = month[..4].parse().map_err(|_| {
            AppError::InvalidBillingMonth(month.clone())
        })?;
        let month_number: u32 = month[5..].parse().map_err(|_| {
            AppError::InvalidBillingMonth(month.clone())
        })?;

        let mut tx = self.pool.begin().await?;

        let schedule = self
            .repo
            .create_schedule(&mut *tx, landlord_id, building_id, &month, &weekdays, slot_minutes)
            .await?;

        let mut saved_ranges = Vec::with_capacity(ranges.len());
        for (start, end) in &ranges {
            let range = self
                .repo
                .insert_range(&mut *tx, schedule.id, *start, *end)
                .await?;
            saved_ranges.push(range);
        }

        let generated = generate_slots(year, month_number, &weekdays, &ranges, slot_minutes as i64);
        for (date, start, end) in &generated {
            self.repo
                .insert_slot(&mut *tx, schedule.id, *date, *start, *end)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "Agenda de limpeza criada para {} com {} slot(s)",
            month,
            generated.len()
        );

        let slots = self.repo.list_slots(schedule.id).await?;
        Ok(ScheduleWithSlots {
            schedule,
            ranges: saved_ranges,
            slots,
        })
    }

    pub async fn get_schedule(
        &self,
        landlord_id: Uuid,
        id: Uuid,
    ) -> Result<ScheduleWithSlots, AppError> {
        let schedule = self
            .repo
            .find_schedule(landlord_id, id)
            .await?
            .ok_or(AppError::ScheduleNotFound)?;
        let ranges = self.repo.list_ranges(schedule.id).await?;
        let slots = self.repo.list_slots(schedule.id).await?;
        Ok(ScheduleWithSlots {
            schedule,
            ranges,
            slots,
        })
    }

    pub async fn list_schedules(
        &self,
        landlord_id: Uuid,
        building_id: Option<Uuid>,
    ) -> Result<Vec<crate::models::schedule::CleaningSchedule>, AppError> {
        self.repo.list_schedules(landlord_id, building_id).await
    }

    pub async fn book_slot(
        &self,
        landlord_id: Uuid,
        slot_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<CleaningSlot, AppError> {
        self.repo.book_slot(landlord_id, slot_id, tenant_id).await
    }

    pub async fn cancel_booking(
        &self,
        landlord_id: Uuid,
        slot_id: Uuid,
    ) -> Result<CleaningSlot, AppError> {
        self.repo.cancel_booking(landlord_id, slot_id).await
    }

    pub async fn list_bookings_by_tenant(
        &self,
        landlord_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Vec<CleaningSlot>, AppError> {
        self.repo.list_bookings_by_tenant(landlord_id, tenant_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn gera_slots_apenas_nos_dias_escolhidos() {
        // Julho de 2024: terças = 2, 9, 16, 23, 30 (cinco datas).
        let slots = generate_slots(2024, 7, &[2], &[(t(9, 0), t(10, 0))], 30);
        assert_eq!(slots.len(), 5 * 2);
        for (date, _, _) in &slots {
            assert_eq!(date.weekday().number_from_monday(), 2);
        }
    }

    #[test]
    fn slots_cabem_dentro_da_faixa_declarada() {
        let start = t(9, 0);
        let end = t(11, 30);
        let slots = generate_slots(2024, 7, &[1], &[(start, end)], 45);
        // 150 minutos / 45 = 3 slots inteiros; a sobra de 15min é descartada.
        let mondays = 5; // julho de 2024 tem 5 segundas (1, 8, 15, 22, 29)
        assert_eq!(slots.len(), mondays * 3);
        for (_, s, e) in &slots {
            assert!(*s >= start && *e <= end);
            assert_eq!((*e - *s).num_minutes(), 45);
        }
    }

    #[test]
    fn faixa_menor_que_o_slot_nao_gera_nada() {
        let slots = generate_slots(2024, 7, &[1], &[(t(9, 0), t(9, 20))], 30);
        assert!(slots.is_empty());
    }

    #[test]
    fn varias_faixas_no_mesmo_dia() {
        let slots = generate_slots(
            2024,
            2, // fevereiro bissexto: 29 dias
            &[4],
            &[(t(9, 0), t(10, 0)), (t(14, 0), t(15, 0))],
            60,
        );
        // Quintas de fev/2024: 1, 8, 15, 22, 29.
        assert_eq!(slots.len(), 5 * 2);
    }

    #[test]
    fn duracao_invalida_nao_gera_slots() {
        assert!(generate_slots(2024, 7, &[1], &[(t(9, 0), t(12, 0))], 0).is_empty());
    }

    #[test]
    fn faixas_sobrepostas_sao_detectadas() {
        assert!(ranges_overlap(&[(t(9, 0), t(10, 0)), (t(9, 0), t(11, 0))]));
        assert!(ranges_overlap(&[(t(14, 0), t(16, 0)), (t(9, 0), t(15, 0))]));
        // Faixas encostadas não se sobrepõem.
        assert!(!ranges_overlap(&[(t(9, 0), t(10, 0)), (t(10, 0), t(11, 0))]));
        assert!(!ranges_overlap(&[(t(9, 0), t(10, 0))]));
    }

    #[test]
    fn faixas_sem_sobreposicao_geram_inicios_unicos() {
        let slots = generate_slots(
            2024,
            7,
            &[1],
            &[(t(9, 0), t(10, 0)), (t(10, 0), t(12, 0))],
            60,
        );
        let distinct: std::collections::HashSet<_> =
            slots.iter().map(|(date, start, _)| (*date, *start)).collect();
        assert_eq!(slots.len(), distinct.len());
    }

    #[sqlx::test]
    async fn agenda_com_faixas_sobrepostas_e_rejeitada(pool: sqlx::PgPool) {
        let locador = testutil::seed_landlord(&pool).await;
        let predio = testutil::seed_building(&pool, locador, "GA").await;

        let service = testutil::schedule_service(&pool);
        let err = service
            .create_schedule(
                locador,
                predio,
                "2024-07",
                vec![1],
                vec![(t(9, 0), t(10, 0)), (t(9, 0), t(11, 0))],
                60,
            )
            .await;
        assert!(matches!(err, Err(AppError::ValidationError(_))));
    }

    #[sqlx::test]
    async fn horario_ja_reservado_conflita(pool: sqlx::PgPool) {
        let locador = testutil::seed_landlord(&pool).await;
        let predio = testutil::seed_building(&pool, locador, "GA").await;
        let andar = testutil::seed_floor(&pool, locador, predio, 1).await;
        let quarto_1 = testutil::seed_room(&pool, locador, predio, andar, "GA101").await;
        let quarto_2 = testutil::seed_room(&pool, locador, predio, andar, "GA102").await;
        let inquilino_1 = testutil::seed_checked_in_tenant(&pool, locador, quarto_1, None).await;
        let inquilino_2 = testutil::seed_checked_in_tenant(&pool, locador, quarto_2, None).await;

        let service = testutil::schedule_service(&pool);
        let schedule = service
            .create_schedule(
                locador,
                predio,
                "2024-07",
                vec![1],
                vec![(t(9, 0), t(10, 0))],
                30,
            )
            .await
            .unwrap();
        let slot_id = schedule.slots[0].id;

        let booked = service.book_slot(locador, slot_id, inquilino_1.id).await.unwrap();
        assert_eq!(booked.tenant_id, Some(inquilino_1.id));

        let err = service.book_slot(locador, slot_id, inquilino_2.id).await;
        assert!(matches!(err, Err(AppError::SlotAlreadyBooked)));
    }

    #[sqlx::test]
    async fn inquilino_de_outro_locador_nao_reserva(pool: sqlx::PgPool) {
        let locador_a = testutil::seed_landlord(&pool).await;
        let predio_a = testutil::seed_building(&pool, locador_a, "GA").await;

        let locador_b = testutil::seed_landlord(&pool).await;
        let predio_b = testutil::seed_building(&pool, locador_b, "GB").await;
        let andar_b = testutil::seed_floor(&pool, locador_b, predio_b, 1).await;
        let quarto_b = testutil::seed_room(&pool, locador_b, predio_b, andar_b, "GB101").await;
        let inquilino_b =
            testutil::seed_checked_in_tenant(&pool, locador_b, quarto_b, None).await;

        let service = testutil::schedule_service(&pool);
        let schedule = service
            .create_schedule(
                locador_a,
                predio_a,
                "2024-07",
                vec![1],
                vec![(t(9, 0), t(10, 0))],
                30,
            )
            .await
            .unwrap();
        let slot_id = schedule.slots[0].id;

        let err = service.book_slot(locador_a, slot_id, inquilino_b.id).await;
        assert!(matches!(err, Err(AppError::TenantNotFound)));
    }
}

// src/db/dashboard_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::dashboard::{MonthlyExpenseEntry, MonthlyIncomeEntry, OccupancySummary},
};

// Projeções de leitura do painel. Nenhuma escrita acontece aqui.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Receita por mês: soma das faturas pagas agrupadas por bill_month.
    pub async fn monthly_income(
        &self,
        landlord_id: Uuid,
    ) -> Result<Vec<MonthlyIncomeEntry>, AppError> {
        let entries = sqlx::query_as::<_, MonthlyIncomeEntry>(
            r#"
            SELECT bill_month AS month, COALESCE(SUM(total_amount), 0) AS total
            FROM bills
            WHERE landlord_id = $1 AND status = 'PAID'
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    pub async fn monthly_expenses(
        &self,
        landlord_id: Uuid,
    ) -> Result<Vec<MonthlyExpenseEntry>, AppError> {
        let entries = sqlx::query_as::<_, MonthlyExpenseEntry>(
            r#"
            SELECT to_char(spent_on, 'YYYY-MM') AS month, COALESCE(SUM(amount), 0) AS total
            FROM expenses
            WHERE landlord_id = $1
            GROUP BY 1
            ORDER BY 1
            "#,
        )
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    // Resumo de ocupação num snapshot consistente (uma transação de leitura).
    pub async fn occupancy_summary(
        &self,
        landlord_id: Uuid,
    ) -> Result<OccupancySummary, AppError> {
        let mut tx = self.pool.begin().await?;

        // Em READ COMMITTED cada SELECT teria seu próprio snapshot; aqui as
        // duas contagens precisam enxergar o mesmo estado.
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ")
            .execute(&mut *tx)
            .await?;

        let (total_rooms, occupied, available) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'OCCUPIED'),
                COUNT(*) FILTER (WHERE status = 'AVAILABLE')
            FROM rooms
            WHERE landlord_id = $1
            "#,
        )
        .bind(landlord_id)
        .fetch_one(&mut *tx)
        .await?;

        let unpaid_bills = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM bills WHERE landlord_id = $1 AND status = 'UNPAID'",
        )
        .bind(landlord_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(OccupancySummary {
            total_rooms,
            occupied,
            available,
            unpaid_bills,
        })
    }
}

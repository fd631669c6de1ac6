// src/services/dashboard_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{MonthlyExpenseEntry, MonthlyIncomeEntry, OccupancySummary},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    pub async fn monthly_income(
        &self,
        landlord_id: Uuid,
    ) -> Result<Vec<MonthlyIncomeEntry>, AppError> {
        self.repo.monthly_income(landlord_id).await
    }

    pub async fn monthly_expenses(
        &self,
        landlord_id: Uuid,
    ) -> Result<Vec<MonthlyExpenseEntry>, AppError> {
        self.repo.monthly_expenses(landlord_id).await
    }

    pub async fn occupancy_summary(
        &self,
        landlord_id: Uuid,
    ) -> Result<OccupancySummary, AppError> {
        self.repo.occupancy_summary(landlord_id).await
    }
}

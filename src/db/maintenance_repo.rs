// src/db/maintenance_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::maintenance::{MaintenanceTicket, StatusHistoryEntry, TicketStatus},
};

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_ticket<'e, E>(
        &self,
        executor: E,
        landlord_id: Uuid,
        room_id: Uuid,
        tenant_id: Uuid,
        title: &str,
        description: &str,
    ) -> Result<MaintenanceTicket, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ticket = sqlx::query_as::<_, MaintenanceTicket>(
            r#"
            INSERT INTO maintenance_tickets (landlord_id, room_id, tenant_id, title, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(landlord_id)
        .bind(room_id)
        .bind(tenant_id)
        .bind(title)
        .bind(description)
        .fetch_one(executor)
        .await?;
        Ok(ticket)
    }

    // Troca o status na mesma transação em que o histórico é gravado.
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        landlord_id: Uuid,
        id: Uuid,
        status: TicketStatus,
    ) -> Result<MaintenanceTicket, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, MaintenanceTicket>(
            r#"
            UPDATE maintenance_tickets
            SET current_status = $3, updated_at = now()
            WHERE id = $1 AND landlord_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(landlord_id)
        .bind(status)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::TicketNotFound)
    }

    // A atribuição também grava histórico, por isso roda via executor.
    pub async fn assign_staff<'e, E>(
        &self,
        executor: E,
        landlord_id: Uuid,
        id: Uuid,
        staff_id: Uuid,
    ) -> Result<MaintenanceTicket, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, MaintenanceTicket>(
            r#"
            UPDATE maintenance_tickets
            SET staff_id = $3, updated_at = now()
            WHERE id = $1 AND landlord_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(landlord_id)
        .bind(staff_id)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::TicketNotFound)
    }

    // Histórico é append-only: este INSERT é a única escrita na tabela.
    pub async fn append_history<'e, E>(
        &self,
        executor: E,
        ticket_id: Uuid,
        status: TicketStatus,
        actor_name: &str,
        actor_role: &str,
        comment: Option<&str>,
    ) -> Result<StatusHistoryEntry, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, StatusHistoryEntry>(
            r#"
            INSERT INTO maintenance_status_history
                (ticket_id, status, actor_name, actor_role, comment)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(ticket_id)
        .bind(status)
        .bind(actor_name)
        .bind(actor_role)
        .bind(comment)
        .fetch_one(executor)
        .await?;
        Ok(entry)
    }

    pub async fn find_ticket(
        &self,
        landlord_id: Uuid,
        id: Uuid,
    ) -> Result<Option<MaintenanceTicket>, AppError> {
        let ticket = sqlx::query_as::<_, MaintenanceTicket>(
            "SELECT * FROM maintenance_tickets WHERE id = $1 AND landlord_id = $2",
        )
        .bind(id)
        .bind(landlord_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(ticket)
    }

    pub async fn list_tickets(
        &self,
        landlord_id: Uuid,
        status: Option<TicketStatus>,
    ) -> Result<Vec<MaintenanceTicket>, AppError> {
        let tickets = sqlx::query_as::<_, MaintenanceTicket>(
            r#"
            SELECT * FROM maintenance_tickets
            WHERE landlord_id = $1 AND ($2::ticket_status IS NULL OR current_status = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(landlord_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(tickets)
    }

    pub async fn list_by_room(
        &self,
        landlord_id: Uuid,
        room_id: Uuid,
    ) -> Result<Vec<MaintenanceTicket>, AppError> {
        let tickets = sqlx::query_as::<_, MaintenanceTicket>(
            r#"
            SELECT * FROM maintenance_tickets
            WHERE room_id = $1 AND landlord_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(room_id)
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tickets)
    }

    pub async fn list_by_tenant(
        &self,
        landlord_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Vec<MaintenanceTicket>, AppError> {
        let tickets = sqlx::query_as::<_, MaintenanceTicket>(
            r#"
            SELECT * FROM maintenance_tickets
            WHERE tenant_id = $1 AND landlord_id = $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(tenant_id)
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(tickets)
    }

    // A posse é checada via junção com o chamado.
    pub async fn list_history(
        &self,
        landlord_id: Uuid,
        ticket_id: Uuid,
    ) -> Result<Vec<StatusHistoryEntry>, AppError> {
        let entries = sqlx::query_as::<_, StatusHistoryEntry>(
            r#"
            SELECT h.* FROM maintenance_status_history h
            JOIN maintenance_tickets t ON t.id = h.ticket_id
            WHERE h.ticket_id = $1 AND t.landlord_id = $2
            ORDER BY h.created_at
            "#,
        )
        .bind(ticket_id)
        .bind(landlord_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }
}

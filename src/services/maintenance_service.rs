// src/services/maintenance_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{MaintenanceRepository, StaffRepository, TenantRepository},
    models::maintenance::{MaintenanceTicket, StatusHistoryEntry, TicketStatus},
    services::notify::LineNotifier,
};

fn status_label(status: TicketStatus) -> &'static str {
    match status {
        TicketStatus::Pending => "Pendente",
        TicketStatus::InProgress => "Em andamento",
        TicketStatus::Completed => "Concluído",
        TicketStatus::Cancelled => "Cancelado",
    }
}

#[derive(Clone)]
pub struct MaintenanceService {
    repo: MaintenanceRepository,
    tenant_repo: TenantRepository,
    staff_repo: StaffRepository,
    notifier: LineNotifier,
    pool: PgPool,
}

impl MaintenanceService {
    pub fn new(
        repo: MaintenanceRepository,
        tenant_repo: TenantRepository,
        staff_repo: StaffRepository,
        notifier: LineNotifier,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            tenant_repo,
            staff_repo,
            notifier,
            pool,
        }
    }

    // Abre o chamado já com a primeira entrada do histórico (Pendente),
    // na mesma transação.
    pub async fn create_ticket(
        &self,
        landlord_id: Uuid,
        tenant_id: Uuid,
        title: &str,
        description: &str,
        actor_name: &str,
        actor_role: &str,
    ) -> Result<MaintenanceTicket, AppError> {
        let tenant = self
            .tenant_repo
            .find_tenant(landlord_id, tenant_id)
            .await?
            .ok_or(AppError::TenantNotFound)?;

        let mut tx = self.pool.begin().await?;

        let ticket = self
            .repo
            .create_ticket(
                &mut *tx,
                landlord_id,
                tenant.room_id,
                tenant_id,
                title,
                description,
            )
            .await?;

        self.repo
            .append_history(
                &mut *tx,
                ticket.id,
                TicketStatus::Pending,
                actor_name,
                actor_role,
                None,
            )
            .await?;

        tx.commit().await?;
        Ok(ticket)
    }

    // Qualquer status pode suceder qualquer outro. O contrato é: cada
    // atualização grava exatamente UMA entrada de histórico, na mesma
    // transação da troca de status.
    pub async fn update_status(
        &self,
        landlord_id: Uuid,
        ticket_id: Uuid,
        new_status: TicketStatus,
        actor_name: &str,
        actor_role: &str,
        comment: Option<&str>,
    ) -> Result<MaintenanceTicket, AppError> {
        let mut tx = self.pool.begin().await?;

        let ticket = self
            .repo
            .update_status(&mut *tx, landlord_id, ticket_id, new_status)
            .await?;

        self.repo
            .append_history(
                &mut *tx,
                ticket.id,
                new_status,
                actor_name,
                actor_role,
                comment,
            )
            .await?;

        tx.commit().await?;

        // Notificação melhor-esforço DEPOIS do commit: a mutação nunca
        // falha por causa do canal de mensagens.
        if let Ok(Some(tenant)) = self.tenant_repo.find_tenant(landlord_id, ticket.tenant_id).await
        {
            if let Some(line_user_id) = tenant.line_user_id.as_deref() {
                let text = format!(
                    "Seu chamado \"{}\" mudou para: {}",
                    ticket.title,
                    status_label(new_status)
                );
                self.notifier.push_text(line_user_id, &text).await;
            }
        }

        Ok(ticket)
    }

    // A atribuição não muda o status, mas entra no histórico do chamado.
    pub async fn assign_staff(
        &self,
        landlord_id: Uuid,
        ticket_id: Uuid,
        staff_id: Uuid,
        actor_name: &str,
        actor_role: &str,
    ) -> Result<MaintenanceTicket, AppError> {
        let staff = self
            .staff_repo
            .find_staff(landlord_id, staff_id)
            .await?
            .ok_or(AppError::StaffNotFound)?;

        let mut tx = self.pool.begin().await?;

        let ticket = self
            .repo
            .assign_staff(&mut *tx, landlord_id, ticket_id, staff_id)
            .await?;

        let comment = format!("Atribuído a {}", staff.name);
        self.repo
            .append_history(
                &mut *tx,
                ticket.id,
                ticket.current_status,
                actor_name,
                actor_role,
                Some(&comment),
            )
            .await?;

        tx.commit().await?;
        Ok(ticket)
    }

    pub async fn get_ticket(
        &self,
        landlord_id: Uuid,
        id: Uuid,
    ) -> Result<MaintenanceTicket, AppError> {
        self.repo
            .find_ticket(landlord_id, id)
            .await?
            .ok_or(AppError::TicketNotFound)
    }

    pub async fn list_tickets(
        &self,
        landlord_id: Uuid,
        status: Option<TicketStatus>,
    ) -> Result<Vec<MaintenanceTicket>, AppError> {
        self.repo.list_tickets(landlord_id, status).await
    }

    pub async fn list_by_room(
        &self,
        landlord_id: Uuid,
        room_id: Uuid,
    ) -> Result<Vec<MaintenanceTicket>, AppError> {
        self.repo.list_by_room(landlord_id, room_id).await
    }

    pub async fn list_by_tenant(
        &self,
        landlord_id: Uuid,
        tenant_id: Uuid,
    ) -> Result<Vec<MaintenanceTicket>, AppError> {
        self.repo.list_by_tenant(landlord_id, tenant_id).await
    }

    pub async fn list_history(
        &self,
        landlord_id: Uuid,
        ticket_id: Uuid,
    ) -> Result<Vec<StatusHistoryEntry>, AppError> {
        self.get_ticket(landlord_id, ticket_id).await?;
        self.repo.list_history(landlord_id, ticket_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn cada_atualizacao_grava_exatamente_uma_entrada_de_historico(pool: PgPool) {
        let locador = testutil::seed_landlord(&pool).await;
        let predio = testutil::seed_building(&pool, locador, "GA").await;
        let andar = testutil::seed_floor(&pool, locador, predio, 1).await;
        let quarto = testutil::seed_room(&pool, locador, predio, andar, "GA101").await;
        let inquilino = testutil::seed_checked_in_tenant(&pool, locador, quarto, None).await;

        let service = testutil::maintenance_service(&pool);
        let ticket = service
            .create_ticket(
                locador,
                inquilino.id,
                "Chuveiro pingando",
                "Pinga a noite toda.",
                "dono@example.com",
                "landlord",
            )
            .await
            .unwrap();

        let history = service.list_history(locador, ticket.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, TicketStatus::Pending);

        let ticket = service
            .update_status(
                locador,
                ticket.id,
                TicketStatus::InProgress,
                "dono@example.com",
                "landlord",
                Some("Encanador a caminho."),
            )
            .await
            .unwrap();
        let history = service.list_history(locador, ticket.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().status, ticket.current_status);

        // Reabrir um chamado concluído também é uma transição válida.
        let ticket = service
            .update_status(
                locador,
                ticket.id,
                TicketStatus::Completed,
                "dono@example.com",
                "landlord",
                None,
            )
            .await
            .unwrap();
        let ticket = service
            .update_status(
                locador,
                ticket.id,
                TicketStatus::Pending,
                "dono@example.com",
                "landlord",
                Some("Voltou a pingar."),
            )
            .await
            .unwrap();
        let history = service.list_history(locador, ticket.id).await.unwrap();
        assert_eq!(history.len(), 4);
        assert_eq!(history.last().unwrap().status, ticket.current_status);
    }

    #[sqlx::test]
    async fn atribuicao_de_funcionario_entra_no_historico(pool: PgPool) {
        let locador = testutil::seed_landlord(&pool).await;
        let predio = testutil::seed_building(&pool, locador, "GA").await;
        let andar = testutil::seed_floor(&pool, locador, predio, 1).await;
        let quarto = testutil::seed_room(&pool, locador, predio, andar, "GA101").await;
        let inquilino = testutil::seed_checked_in_tenant(&pool, locador, quarto, None).await;

        let staff_id = sqlx::query_scalar::<_, uuid::Uuid>(
            r#"
            INSERT INTO staff (landlord_id, name, role)
            VALUES ($1, 'Carlos', 'encanador')
            RETURNING id
            "#,
        )
        .bind(locador)
        .fetch_one(&pool)
        .await
        .unwrap();

        let service = testutil::maintenance_service(&pool);
        let ticket = service
            .create_ticket(
                locador,
                inquilino.id,
                "Tomada solta",
                "Na parede da cozinha.",
                "dono@example.com",
                "landlord",
            )
            .await
            .unwrap();

        let ticket = service
            .assign_staff(locador, ticket.id, staff_id, "dono@example.com", "landlord")
            .await
            .unwrap();
        assert_eq!(ticket.staff_id, Some(staff_id));

        let history = service.list_history(locador, ticket.id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().unwrap().comment.as_deref(), Some("Atribuído a Carlos"));
    }
}

//src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod handlers;
mod middleware;
mod models;
mod services;
#[cfg(test)]
mod testutil;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger. RUST_LOG controla o nível; "info" é o padrão.
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new().route("/me", get(handlers::auth::get_me));

    // Prédios, andares e quartos
    let property_routes = Router::new()
        .route(
            "/buildings",
            post(handlers::property::create_building).get(handlers::property::list_buildings),
        )
        .route("/buildings/{id}", get(handlers::property::get_building))
        .route(
            "/buildings/{id}/rename",
            patch(handlers::property::rename_building),
        )
        .route(
            "/buildings/{id}/rates",
            patch(handlers::property::update_building_rates),
        )
        .route(
            "/buildings/{building_id}/floors",
            post(handlers::property::create_floor).get(handlers::property::list_floors),
        )
        .route(
            "/buildings/{building_id}/rooms",
            post(handlers::property::create_room)
                .get(handlers::property::list_rooms_by_building),
        )
        .route("/rooms", get(handlers::property::list_rooms))
        .route(
            "/rooms/{id}",
            get(handlers::property::get_room)
                .patch(handlers::property::update_room)
                .delete(handlers::property::delete_room),
        );

    // Inquilinos: entrada, saída e consultas
    let tenancy_routes = Router::new()
        .route(
            "/",
            post(handlers::tenancy::check_in).get(handlers::tenancy::list_tenants),
        )
        .route(
            "/{id}",
            get(handlers::tenancy::get_tenant).patch(handlers::tenancy::update_tenant_contact),
        )
        .route("/{id}/check-out", post(handlers::tenancy::check_out))
        .route(
            "/by-room/{room_id}",
            get(handlers::tenancy::list_tenants_by_room),
        );

    // Faturas, consumo e despesas
    let billing_routes = Router::new()
        .route(
            "/bills",
            post(handlers::billing::create_bill).get(handlers::billing::list_bills),
        )
        .route("/bills/ensure", post(handlers::billing::ensure_bills))
        .route("/bills/{id}", get(handlers::billing::get_bill))
        .route("/bills/{id}/pay", post(handlers::billing::mark_bill_paid))
        .route(
            "/usages",
            post(handlers::billing::record_usage).get(handlers::billing::list_usages),
        )
        .route("/usages/{id}", patch(handlers::billing::update_usage))
        .route(
            "/expenses",
            post(handlers::billing::create_expense).get(handlers::billing::list_expenses),
        )
        .route(
            "/expenses/{id}",
            axum::routing::delete(handlers::billing::delete_expense),
        );

    // Chamados de manutenção
    let maintenance_routes = Router::new()
        .route(
            "/",
            post(handlers::maintenance::create_ticket).get(handlers::maintenance::list_tickets),
        )
        .route("/{id}", get(handlers::maintenance::get_ticket))
        .route(
            "/{id}/status",
            patch(handlers::maintenance::update_ticket_status),
        )
        .route("/{id}/assign", patch(handlers::maintenance::assign_staff))
        .route(
            "/{id}/history",
            get(handlers::maintenance::get_ticket_history),
        )
        .route(
            "/by-room/{room_id}",
            get(handlers::maintenance::list_tickets_by_room),
        )
        .route(
            "/by-tenant/{tenant_id}",
            get(handlers::maintenance::list_tickets_by_tenant),
        );

    // Agendas de limpeza e reservas de horário
    let schedule_routes = Router::new()
        .route(
            "/",
            post(handlers::schedule::create_schedule).get(handlers::schedule::list_schedules),
        )
        .route("/{id}", get(handlers::schedule::get_schedule))
        .route("/slots/{slot_id}/book", post(handlers::schedule::book_slot))
        .route(
            "/slots/{slot_id}/cancel",
            post(handlers::schedule::cancel_booking),
        )
        .route(
            "/bookings/by-tenant/{tenant_id}",
            get(handlers::schedule::list_bookings_by_tenant),
        );

    let parcel_routes = Router::new()
        .route(
            "/",
            post(handlers::parcels::register_parcel).get(handlers::parcels::list_parcels),
        )
        .route("/{id}/pickup", post(handlers::parcels::mark_picked_up));

    let staff_routes = Router::new()
        .route(
            "/",
            post(handlers::staff::create_staff).get(handlers::staff::list_staff),
        )
        .route("/{id}/active", patch(handlers::staff::set_active));

    let announcement_routes = Router::new()
        .route(
            "/",
            post(handlers::announcements::create_announcement)
                .get(handlers::announcements::list_announcements),
        )
        .route(
            "/{id}",
            axum::routing::delete(handlers::announcements::delete_announcement),
        )
        .route(
            "/by-building/{building_id}",
            get(handlers::announcements::list_for_building),
        );

    let dashboard_routes = Router::new()
        .route("/income", get(handlers::dashboard::monthly_income))
        .route("/expenses", get(handlers::dashboard::monthly_expenses))
        .route("/occupancy", get(handlers::dashboard::occupancy_summary));

    // Tudo que não é auth fica atrás do middleware
    let protected_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/properties", property_routes)
        .nest("/tenants", tenancy_routes)
        .nest("/billing", billing_routes)
        .nest("/maintenance", maintenance_routes)
        .nest("/schedules", schedule_routes)
        .nest("/parcels", parcel_routes)
        .nest("/staff", staff_routes)
        .nest("/announcements", announcement_routes)
        .nest("/dashboard", dashboard_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}

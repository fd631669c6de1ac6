pub mod auth;
pub use auth::AuthService;
pub mod billing_service;
pub use billing_service::BillingService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
pub mod maintenance_service;
pub use maintenance_service::MaintenanceService;
pub mod notify;
pub use notify::LineNotifier;
pub mod property_service;
pub use property_service::PropertyService;
pub mod schedule_service;
pub use schedule_service::ScheduleService;
pub mod tenancy_service;
pub use tenancy_service::TenancyService;

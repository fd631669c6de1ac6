pub mod announcement_repo;
pub use announcement_repo::AnnouncementRepository;
pub mod billing_repo;
pub use billing_repo::BillingRepository;
pub mod dashboard_repo;
pub use dashboard_repo::DashboardRepository;
pub mod maintenance_repo;
pub use maintenance_repo::MaintenanceRepository;
pub mod parcel_repo;
pub use parcel_repo::ParcelRepository;
pub mod property_repo;
pub use property_repo::PropertyRepository;
pub mod schedule_repo;
pub use schedule_repo::ScheduleRepository;
pub mod staff_repo;
pub use staff_repo::StaffRepository;
pub mod tenant_repo;
pub use tenant_repo::TenantRepository;
pub mod user_repo;
pub use user_repo::UserRepository;

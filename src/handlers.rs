pub mod announcements;
pub mod auth;
pub mod billing;
pub mod dashboard;
pub mod maintenance;
pub mod parcels;
pub mod property;
pub mod schedule;
pub mod staff;
pub mod tenancy;

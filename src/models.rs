pub mod announcement;
pub mod auth;
pub mod billing;
pub mod dashboard;
pub mod maintenance;
pub mod parcel;
pub mod property;
pub mod schedule;
pub mod staff;
pub mod tenancy;

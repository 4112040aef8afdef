pub mod account_service;
pub mod accounting_service;
pub mod activity_service;
pub mod assignment_service;
pub mod camp_service;
pub mod commands;
pub mod errors;
pub mod mappers;
pub mod models;
pub mod schedule;

pub use account_service::AccountService;
pub use accounting_service::AccountingService;
pub use activity_service::ActivityService;
pub use assignment_service::AssignmentService;
pub use camp_service::CampService;
pub use errors::DomainError;

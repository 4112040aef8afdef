//! # JSON/Text Storage Module
//!
//! File-backed implementations of the storage traits. Every document lives
//! under one base directory managed by [`JsonConnection`]; writes go
//! through an atomic temp-file + rename so a crash mid-write never leaves a
//! half-written document behind.

pub mod account_repository;
pub mod camp_store;
pub mod connection;
pub mod food_requirement_repository;
pub mod global_config_repository;
pub mod notification_repository;

pub use account_repository::AccountRepository;
pub use camp_store::{CampStore, StoreError};
pub use connection::JsonConnection;
pub use food_requirement_repository::FoodRequirementRepository;
pub use global_config_repository::{GlobalConfig, GlobalConfigRepository};
pub use notification_repository::NotificationRepository;

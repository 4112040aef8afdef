//! Domain error taxonomy.
//!
//! Services return `anyhow::Result`; every rejection they produce themselves
//! is one of these variants, so callers (the UI shell, tests) can recover the
//! category with `err.downcast_ref::<DomainError>()` and render a message
//! without the process ever dying on a bad request.

use crate::domain::models::camp::CampValidationError;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Camp(#[from] CampValidationError),
    #[error("camp '{0}' not found")]
    CampNotFound(String),
    #[error("camp index {0} is out of range")]
    CampIndexOutOfRange(usize),
    #[error("a camp named '{0}' already exists")]
    DuplicateCampName(String),
    #[error("camps '{0}' and '{1}' overlap")]
    ScheduleConflict(String, String),
    #[error("no food requirement set for camp '{0}'")]
    RequirementNotSet(String),
    #[error("user '{0}' not found")]
    UserNotFound(String),
    #[error("username '{0}' already exists")]
    DuplicateUsername(String),
}

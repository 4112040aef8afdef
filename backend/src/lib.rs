//! # CampTrack Backend
//!
//! Domain services and flat-file storage for the CampTrack desktop app.
//! The UI shell (forms or their CLI equivalents) talks to the [`Backend`]
//! facade; nothing here owns a window, a prompt or a session.
//!
//! All operations are synchronous and stateless between calls: each one
//! loads the backing documents, computes or mutates in memory, and saves.
//! Concurrent writers are caught by the camp store's revision check rather
//! than silently losing the slower writer's changes.

pub mod domain;
pub mod storage;

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use crate::domain::{
    AccountService, AccountingService, ActivityService, AssignmentService, CampService,
};
use crate::storage::json::GlobalConfigRepository;

pub use crate::storage::json::JsonConnection;

/// Main backend struct that wires every service over one shared store
/// connection.
pub struct Backend {
    pub camp_service: CampService,
    pub accounting_service: AccountingService,
    pub assignment_service: AssignmentService,
    pub activity_service: ActivityService,
    pub account_service: AccountService,
    pub global_config: GlobalConfigRepository,
}

impl Backend {
    /// Open the backend in the default data directory
    /// (`~/Documents/CampTrack`, or wherever the global config points).
    pub fn new() -> Result<Self> {
        Self::with_connection(Arc::new(JsonConnection::new_default()?))
    }

    /// Open the backend over an explicit data directory.
    pub fn open<P: AsRef<Path>>(data_directory: P) -> Result<Self> {
        Self::with_connection(Arc::new(JsonConnection::new(data_directory)?))
    }

    fn with_connection(connection: Arc<JsonConnection>) -> Result<Self> {
        Ok(Backend {
            camp_service: CampService::new(connection.clone()),
            accounting_service: AccountingService::new(connection.clone()),
            assignment_service: AssignmentService::new(connection.clone()),
            activity_service: ActivityService::new(connection.clone()),
            account_service: AccountService::new(connection.clone()),
            global_config: GlobalConfigRepository::new(connection),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::accounting::SetFoodRequirementCommand;
    use crate::domain::commands::camps::{CreateCampCommand, SetPayRateCommand};
    use crate::domain::models::camp::CampType;
    use tempfile::TempDir;

    #[test]
    fn test_services_share_one_store() {
        let temp_dir = TempDir::new().unwrap();
        let backend = Backend::open(temp_dir.path()).unwrap();

        backend
            .camp_service
            .create_camp(CreateCampCommand {
                name: "Eagle Ridge".to_string(),
                location: "Peak District".to_string(),
                camp_type: CampType::MultiDay,
                start_date: "2024-06-01".to_string(),
                nights: Some(2),
                initial_food_stock: 10,
            })
            .unwrap();
        backend
            .camp_service
            .set_pay_rate(SetPayRateCommand {
                camp_name: "Eagle Ridge".to_string(),
                pay_rate: 40,
            })
            .unwrap();

        // A different service sees the same camp through its own repository
        backend
            .accounting_service
            .set_food_requirement(SetFoodRequirementCommand {
                camp_name: "Eagle Ridge".to_string(),
                food_per_camper: 2,
            })
            .unwrap();
        let earnings = backend
            .accounting_service
            .camp_earnings("Eagle Ridge")
            .unwrap();
        assert_eq!(earnings.earned, 120);

        let config = backend.global_config.get_global_config().unwrap();
        assert_eq!(config.data_format_version, "1.0");
    }
}

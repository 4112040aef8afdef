//! # Storage Traits
//!
//! Storage abstraction traits that keep the domain layer independent of the
//! concrete file formats. Everything is synchronous: this is a desktop app
//! with one actor per process, and every operation is a single
//! load -> compute -> save transaction.

use anyhow::Result;

use crate::domain::models::account::UserAccount;
use crate::domain::models::camp::Camp;

/// A full copy of the camp store as read from disk, together with the
/// document revision it was read at. Saving a snapshot whose revision no
/// longer matches the document on disk is rejected, so concurrent edits
/// surface as an error instead of silently losing the slower writer.
#[derive(Debug, Clone, Default)]
pub struct CampSnapshot {
    pub revision: u64,
    pub camps: Vec<Camp>,
}

/// Trait defining the interface for camp store operations.
///
/// No identity is preserved across calls: every `load` returns fresh camp
/// values, and a mutation is invisible to other call sites until `save`
/// writes the full document back.
pub trait CampStorage: Send + Sync {
    /// Read the entire camp document. Absent, empty, or corrupted documents
    /// yield an empty snapshot (corruption is reported, not fatal).
    fn load(&self) -> Result<CampSnapshot>;

    /// Serialize the full camp list, overwriting the document. Fails with a
    /// typed [`super::json::StoreError::StaleSnapshot`] when the document
    /// was rewritten since this snapshot was loaded. Returns the new
    /// document revision.
    fn save(&self, snapshot: &CampSnapshot) -> Result<u64>;
}

/// Trait for the per-camp food requirement side store (units per camper per
/// day, keyed by camp name).
pub trait FoodRequirementStorage: Send + Sync {
    fn set_requirement(&self, camp_name: &str, food_per_camper: i64) -> Result<()>;

    fn get_requirement(&self, camp_name: &str) -> Result<Option<i64>>;
}

/// Trait for the append-only notification list consumed by the reporting
/// UI.
pub trait NotificationStorage: Send + Sync {
    fn add_notification(&self, message: &str) -> Result<()>;

    fn list_notifications(&self) -> Result<Vec<String>>;
}

/// Trait for the role-tagged credential store and the disabled-login list.
pub trait AccountStorage: Send + Sync {
    fn load_accounts(&self) -> Result<Vec<UserAccount>>;

    fn save_accounts(&self, accounts: &[UserAccount]) -> Result<()>;

    fn disabled_usernames(&self) -> Result<Vec<String>>;

    fn is_disabled(&self, username: &str) -> Result<bool>;

    fn disable(&self, username: &str) -> Result<()>;

    /// Remove a username from the disabled list. Returns true when the
    /// username was present.
    fn enable(&self, username: &str) -> Result<bool>;
}

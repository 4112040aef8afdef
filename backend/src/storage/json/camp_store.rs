//! # Camp Store
//!
//! The persistent camp store: one JSON document holding every camp record.
//!
//! ## Document format
//!
//! ```json
//! {
//!   "revision": 7,
//!   "camps": [
//!     {
//!       "name": "Eagle Ridge",
//!       "location": "Peak District",
//!       "camp_type": 3,
//!       "start_date": "2024-06-01",
//!       "end_date": "2024-06-03",
//!       "food_stock": 40,
//!       "scout_leaders": ["alice"],
//!       "campers": ["Sam"],
//!       "activities": {"2024-06-01": [{"activity": "Canoeing", ...}]},
//!       "daily_food_usage": {"2024-06-01": 6},
//!       "daily_records": {"2024-06-01": ["river session"]},
//!       "pay_rate": 55
//!     }
//!   ]
//! }
//! ```
//!
//! A legacy document that is a bare array of camp records (no envelope) is
//! accepted on load as revision 0 and migrates into the enveloped format on
//! the next save.

use anyhow::Result;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;

use super::connection::JsonConnection;
use crate::domain::models::camp::{ActivityEntry, Camp, CampType};
use crate::storage::traits::{CampSnapshot, CampStorage};

/// Storage-level failures that callers may want to handle specifically.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(
        "camp store was modified by another writer (disk revision {disk}, snapshot revision {snapshot})"
    )]
    StaleSnapshot { disk: u64, snapshot: u64 },
}

/// Intermediate struct matching the on-disk record shape, with the camp
/// type as its numeric code (1 = Day, 2 = Overnight, 3 = Multi-Day).
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CampRecord {
    name: String,
    location: String,
    camp_type: u8,
    start_date: String,
    end_date: String,
    food_stock: i64,
    #[serde(default)]
    scout_leaders: Vec<String>,
    #[serde(default)]
    campers: Vec<String>,
    #[serde(default)]
    activities: BTreeMap<String, Vec<ActivityEntry>>,
    #[serde(default)]
    daily_food_usage: BTreeMap<String, i64>,
    #[serde(default)]
    daily_records: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pay_rate: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct CampDocument {
    #[serde(default)]
    revision: u64,
    #[serde(default)]
    camps: Vec<CampRecord>,
}

impl CampRecord {
    fn from_camp(camp: &Camp) -> Self {
        Self {
            name: camp.name.clone(),
            location: camp.location.clone(),
            camp_type: camp.camp_type.code(),
            start_date: camp.start_date.clone(),
            end_date: camp.end_date.clone(),
            food_stock: camp.food_stock,
            scout_leaders: camp.scout_leaders.clone(),
            campers: camp.campers.clone(),
            activities: camp.activities.clone(),
            daily_food_usage: camp.daily_food_usage.clone(),
            daily_records: camp.daily_records.clone(),
            pay_rate: camp.pay_rate,
        }
    }

    fn into_camp(self) -> Result<Camp, crate::domain::models::camp::CampValidationError> {
        let camp_type = CampType::from_code(self.camp_type)?;
        Ok(Camp {
            name: self.name,
            location: self.location,
            camp_type,
            start_date: self.start_date,
            end_date: self.end_date,
            food_stock: self.food_stock,
            scout_leaders: self.scout_leaders,
            campers: self.campers,
            activities: self.activities,
            daily_food_usage: self.daily_food_usage,
            daily_records: self.daily_records,
            pay_rate: self.pay_rate,
        })
    }
}

/// JSON-document-backed camp store.
#[derive(Clone)]
pub struct CampStore {
    connection: Arc<JsonConnection>,
}

impl CampStore {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    /// Read and parse the raw document. Absent/empty files yield an empty
    /// document; a corrupted file is reported and treated as empty rather
    /// than crashing the interactive loop.
    fn read_document(&self) -> Result<CampDocument> {
        let path = self.connection.camp_data_path();

        if !path.exists() {
            debug!("camp document not found at {}, starting empty", path.display());
            return Ok(CampDocument {
                revision: 0,
                camps: Vec::new(),
            });
        }

        let contents = fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(CampDocument {
                revision: 0,
                camps: Vec::new(),
            });
        }

        match serde_json::from_str::<CampDocument>(&contents) {
            Ok(document) => Ok(document),
            // Legacy format: a bare array of camp records
            Err(_) => match serde_json::from_str::<Vec<CampRecord>>(&contents) {
                Ok(camps) => {
                    debug!("loaded legacy camp document (bare array), treating as revision 0");
                    Ok(CampDocument { revision: 0, camps })
                }
                Err(e) => {
                    error!(
                        "camp document at {} is corrupted ({}); treating store as empty",
                        path.display(),
                        e
                    );
                    Ok(CampDocument {
                        revision: 0,
                        camps: Vec::new(),
                    })
                }
            },
        }
    }
}

impl CampStorage for CampStore {
    fn load(&self) -> Result<CampSnapshot> {
        let document = self.read_document()?;
        let mut camps = Vec::with_capacity(document.camps.len());
        for record in document.camps {
            let name = record.name.clone();
            match record.into_camp() {
                Ok(camp) => camps.push(camp),
                Err(e) => warn!("skipping camp record '{}': {}", name, e),
            }
        }
        debug!("loaded {} camps at revision {}", camps.len(), document.revision);
        Ok(CampSnapshot {
            revision: document.revision,
            camps,
        })
    }

    fn save(&self, snapshot: &CampSnapshot) -> Result<u64> {
        let disk_revision = self.read_document()?.revision;
        if disk_revision != snapshot.revision {
            return Err(StoreError::StaleSnapshot {
                disk: disk_revision,
                snapshot: snapshot.revision,
            }
            .into());
        }

        let next_revision = snapshot.revision + 1;
        let document = CampDocument {
            revision: next_revision,
            camps: snapshot.camps.iter().map(CampRecord::from_camp).collect(),
        };
        let json = serde_json::to_string_pretty(&document)?;
        self.connection
            .write_atomic(&self.connection.camp_data_path(), &json)?;

        debug!(
            "saved {} camps at revision {}",
            snapshot.camps.len(),
            next_revision
        );
        Ok(next_revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_store() -> (CampStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (CampStore::new(Arc::new(connection)), temp_dir)
    }

    fn sample_camp(name: &str) -> Camp {
        let mut camp = Camp::new(
            name.to_string(),
            "Lakeside".to_string(),
            CampType::MultiDay,
            "2024-06-01".to_string(),
            "2024-06-03".to_string(),
            40,
        );
        camp.pay_rate = 55;
        camp.assign_leader("alice");
        camp.assign_campers(vec!["Sam".to_string()]);
        camp.log_activity(
            "2024-06-01",
            ActivityEntry::new(
                Some("Canoeing".to_string()),
                Some("10:00".to_string()),
                "river session".to_string(),
                Some(6),
            ),
        );
        camp
    }

    #[test]
    fn test_load_missing_document_is_empty() {
        let (store, _temp_dir) = setup_test_store();
        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.revision, 0);
        assert!(snapshot.camps.is_empty());
    }

    #[test]
    fn test_save_load_round_trip_preserves_fields() {
        let (store, _temp_dir) = setup_test_store();

        let mut snapshot = store.load().unwrap();
        snapshot.camps.push(sample_camp("Eagle Ridge"));
        store.save(&snapshot).unwrap();

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.revision, 1);
        assert_eq!(reloaded.camps.len(), 1);
        assert_eq!(reloaded.camps[0], snapshot.camps[0]);
    }

    #[test]
    fn test_corrupted_document_recovers_as_empty() {
        let (store, temp_dir) = setup_test_store();
        fs::write(temp_dir.path().join("camp_data.json"), "{not json").unwrap();

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.revision, 0);
        assert!(snapshot.camps.is_empty());
    }

    #[test]
    fn test_legacy_bare_array_loads_as_revision_zero() {
        let (store, temp_dir) = setup_test_store();
        let legacy = r#"[
            {
                "name": "Old Camp",
                "location": "Moorland",
                "camp_type": 2,
                "start_date": "2024-05-10",
                "end_date": "2024-05-11",
                "food_stock": 12
            }
        ]"#;
        fs::write(temp_dir.path().join("camp_data.json"), legacy).unwrap();

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.revision, 0);
        assert_eq!(snapshot.camps.len(), 1);
        assert_eq!(snapshot.camps[0].name, "Old Camp");
        assert_eq!(snapshot.camps[0].camp_type, CampType::Overnight);
        // Omitted collections default to empty
        assert!(snapshot.camps[0].campers.is_empty());
        assert_eq!(snapshot.camps[0].pay_rate, 0);

        // Saving migrates to the enveloped format
        store.save(&snapshot).unwrap();
        let migrated = store.load().unwrap();
        assert_eq!(migrated.revision, 1);
        assert_eq!(migrated.camps[0].name, "Old Camp");
    }

    #[test]
    fn test_record_with_unknown_camp_type_is_skipped() {
        let (store, temp_dir) = setup_test_store();
        let document = r#"{
            "revision": 3,
            "camps": [
                {
                    "name": "Bad Type",
                    "location": "Nowhere",
                    "camp_type": 9,
                    "start_date": "2024-05-10",
                    "end_date": "2024-05-11",
                    "food_stock": 0
                }
            ]
        }"#;
        fs::write(temp_dir.path().join("camp_data.json"), document).unwrap();

        let snapshot = store.load().unwrap();
        assert_eq!(snapshot.revision, 3);
        assert!(snapshot.camps.is_empty());
    }

    #[test]
    fn test_stale_snapshot_is_rejected() {
        let (store, _temp_dir) = setup_test_store();

        let mut first = store.load().unwrap();
        let mut second = store.load().unwrap();

        first.camps.push(sample_camp("First Writer"));
        store.save(&first).unwrap();

        second.camps.push(sample_camp("Second Writer"));
        let err = store.save(&second).unwrap_err();
        let store_err = err.downcast_ref::<StoreError>();
        assert!(matches!(
            store_err,
            Some(StoreError::StaleSnapshot {
                disk: 1,
                snapshot: 0
            })
        ));

        // The first writer's data is intact
        let current = store.load().unwrap();
        assert_eq!(current.camps.len(), 1);
        assert_eq!(current.camps[0].name, "First Writer");
    }

    #[test]
    fn test_revision_increments_on_each_save() {
        let (store, _temp_dir) = setup_test_store();

        let mut snapshot = store.load().unwrap();
        snapshot.camps.push(sample_camp("Eagle Ridge"));
        assert_eq!(store.save(&snapshot).unwrap(), 1);

        let mut snapshot = store.load().unwrap();
        snapshot.camps[0].food_stock += 5;
        assert_eq!(store.save(&snapshot).unwrap(), 2);
    }
}

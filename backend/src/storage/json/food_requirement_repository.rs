use anyhow::Result;
use log::{debug, warn};
use std::collections::BTreeMap;
use std::fs;
use std::sync::Arc;

use super::connection::JsonConnection;
use crate::storage::traits::FoodRequirementStorage;

/// Side store mapping camp name -> food units per camper per day, kept in
/// `food_requirements.json` independently of the camp document. Scout
/// leaders write it; the shortage check reads it.
#[derive(Clone)]
pub struct FoodRequirementRepository {
    connection: Arc<JsonConnection>,
}

impl FoodRequirementRepository {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    /// Load the full requirement map. Missing or corrupted files are
    /// treated as an empty map (corruption is reported).
    fn load_map(&self) -> Result<BTreeMap<String, i64>> {
        let path = self.connection.food_requirements_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&contents) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!(
                    "food requirement file at {} is corrupted ({}); treating as empty",
                    path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn save_map(&self, map: &BTreeMap<String, i64>) -> Result<()> {
        let json = serde_json::to_string_pretty(map)?;
        self.connection
            .write_atomic(&self.connection.food_requirements_path(), &json)
    }
}

impl FoodRequirementStorage for FoodRequirementRepository {
    fn set_requirement(&self, camp_name: &str, food_per_camper: i64) -> Result<()> {
        let mut map = self.load_map()?;
        map.insert(camp_name.to_string(), food_per_camper);
        self.save_map(&map)?;
        debug!(
            "set food requirement for '{}' to {} units/camper/day",
            camp_name, food_per_camper
        );
        Ok(())
    }

    fn get_requirement(&self, camp_name: &str) -> Result<Option<i64>> {
        Ok(self.load_map()?.get(camp_name).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_repo() -> (FoodRequirementRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        (FoodRequirementRepository::new(Arc::new(connection)), temp_dir)
    }

    #[test]
    fn test_missing_file_yields_no_requirement() {
        let (repo, _temp_dir) = setup_test_repo();
        assert_eq!(repo.get_requirement("Eagle Ridge").unwrap(), None);
    }

    #[test]
    fn test_set_and_get_requirement() {
        let (repo, _temp_dir) = setup_test_repo();
        repo.set_requirement("Eagle Ridge", 4).unwrap();
        repo.set_requirement("Lakeside", 2).unwrap();

        assert_eq!(repo.get_requirement("Eagle Ridge").unwrap(), Some(4));
        assert_eq!(repo.get_requirement("Lakeside").unwrap(), Some(2));
        assert_eq!(repo.get_requirement("Unknown").unwrap(), None);

        // Overwriting replaces the previous value
        repo.set_requirement("Eagle Ridge", 5).unwrap();
        assert_eq!(repo.get_requirement("Eagle Ridge").unwrap(), Some(5));
    }

    #[test]
    fn test_corrupted_file_treated_as_empty() {
        let (repo, temp_dir) = setup_test_repo();
        fs::write(temp_dir.path().join("food_requirements.json"), "oops").unwrap();
        assert_eq!(repo.get_requirement("Eagle Ridge").unwrap(), None);

        // Writing through the corruption resets the file
        repo.set_requirement("Eagle Ridge", 3).unwrap();
        assert_eq!(repo.get_requirement("Eagle Ridge").unwrap(), Some(3));
    }
}

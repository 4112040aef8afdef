use anyhow::Result;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use super::global_config_repository::GlobalConfig;

/// JsonConnection owns the base data directory and hands out the paths of
/// every backing document. All repositories share one connection, so the
/// whole store lives under a single directory:
///
/// ```text
/// data/
/// ├── global_config.yaml
/// ├── camp_data.json
/// ├── food_requirements.json
/// ├── notifications.json
/// ├── logins.txt
/// └── disabled_logins.txt
/// ```
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a connection rooted at the given directory, creating it if
    /// necessary.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory
    /// (`~/Documents/CampTrack`), honouring a data-directory override in
    /// `global_config.yaml` when one is present and valid.
    pub fn new_default() -> Result<Self> {
        let default_dir = Self::default_data_directory()?;
        let config_path = default_dir.join("global_config.yaml");

        let actual_dir = if config_path.exists() {
            let override_dir = fs::read_to_string(&config_path)
                .ok()
                .and_then(|contents| serde_yaml::from_str::<GlobalConfig>(&contents).ok())
                .and_then(|config| config.data_directory);

            match override_dir {
                Some(redirected) => {
                    let path = PathBuf::from(&redirected);
                    if path.exists() {
                        info!("Using configured data directory: {}", path.display());
                        path
                    } else {
                        warn!(
                            "Configured data directory does not exist: {}. Using default.",
                            redirected
                        );
                        default_dir
                    }
                }
                None => default_dir,
            }
        } else {
            info!(
                "No global config found, using default data directory: {}",
                default_dir.display()
            );
            default_dir
        };

        Self::new(actual_dir)
    }

    fn default_data_directory() -> Result<PathBuf> {
        let documents_dir = dirs::document_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(documents_dir.join("CampTrack"))
    }

    pub fn base_directory(&self) -> PathBuf {
        self.base_directory.clone()
    }

    pub fn camp_data_path(&self) -> PathBuf {
        self.base_directory.join("camp_data.json")
    }

    pub fn food_requirements_path(&self) -> PathBuf {
        self.base_directory.join("food_requirements.json")
    }

    pub fn notifications_path(&self) -> PathBuf {
        self.base_directory.join("notifications.json")
    }

    pub fn logins_path(&self) -> PathBuf {
        self.base_directory.join("logins.txt")
    }

    pub fn disabled_logins_path(&self) -> PathBuf {
        self.base_directory.join("disabled_logins.txt")
    }

    pub fn global_config_path(&self) -> PathBuf {
        self.base_directory.join("global_config.yaml")
    }

    /// Write a file atomically: write to a temp file next to the target,
    /// then rename over it. A crash mid-write leaves the old document
    /// intact rather than a half-written one.
    pub fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("nested").join("data");
        let connection = JsonConnection::new(&base).unwrap();
        assert!(base.exists());
        assert_eq!(connection.base_directory(), base);
    }

    #[test]
    fn test_paths_live_under_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        assert_eq!(
            connection.camp_data_path(),
            temp_dir.path().join("camp_data.json")
        );
        assert_eq!(
            connection.logins_path(),
            temp_dir.path().join("logins.txt")
        );
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let target = temp_dir.path().join("camp_data.json");

        connection.write_atomic(&target, "first").unwrap();
        connection.write_atomic(&target, "second").unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
        assert!(!target.with_extension("tmp").exists());
    }
}

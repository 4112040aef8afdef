use anyhow::Result;
use log::{debug, warn};
use std::fs;
use std::sync::Arc;

use super::connection::JsonConnection;
use crate::storage::traits::NotificationStorage;

/// Append-only notification list in `notifications.json`, consumed by the
/// coordinator's notifications screen. Only the shortage check writes to
/// it.
#[derive(Clone)]
pub struct NotificationRepository {
    connection: Arc<JsonConnection>,
}

impl NotificationRepository {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    fn load_all(&self) -> Result<Vec<String>> {
        let path = self.connection.notifications_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str(&contents) {
            Ok(notifications) => Ok(notifications),
            Err(e) => {
                warn!(
                    "notification file at {} is corrupted ({}); treating as empty",
                    path.display(),
                    e
                );
                Ok(Vec::new())
            }
        }
    }
}

impl NotificationStorage for NotificationRepository {
    fn add_notification(&self, message: &str) -> Result<()> {
        let mut notifications = self.load_all()?;
        notifications.push(message.to_string());
        let json = serde_json::to_string_pretty(&notifications)?;
        self.connection
            .write_atomic(&self.connection.notifications_path(), &json)?;
        debug!("recorded notification: {}", message);
        Ok(())
    }

    fn list_notifications(&self) -> Result<Vec<String>> {
        self.load_all()
    }
}

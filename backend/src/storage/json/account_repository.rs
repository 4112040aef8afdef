//! # Account Repository
//!
//! Credential storage in two plain-text files:
//!
//! - `logins.txt` — one `role,username,password` line per account
//! - `disabled_logins.txt` — comma-separated usernames that may not log in
//!
//! Passwords are plaintext by design scope; the formats match the documents
//! the desktop app has always shipped with, so existing data files keep
//! working.

use anyhow::Result;
use log::{info, warn};
use std::fs;
use std::sync::Arc;

use super::connection::JsonConnection;
use crate::domain::models::account::{Role, UserAccount};
use crate::storage::traits::AccountStorage;

#[derive(Clone)]
pub struct AccountRepository {
    connection: Arc<JsonConnection>,
}

impl AccountRepository {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }

    /// The account present before any admin has saved one: the built-in
    /// admin with a blank password.
    fn default_accounts() -> Vec<UserAccount> {
        vec![UserAccount::new(Role::Admin, "admin", "")]
    }

    fn save_disabled(&self, disabled: &[String]) -> Result<()> {
        let contents = if disabled.is_empty() {
            String::new()
        } else {
            // Trailing comma matches the historical file format
            format!("{},", disabled.join(","))
        };
        self.connection
            .write_atomic(&self.connection.disabled_logins_path(), &contents)
    }
}

impl AccountStorage for AccountRepository {
    fn load_accounts(&self) -> Result<Vec<UserAccount>> {
        let path = self.connection.logins_path();
        if !path.exists() {
            info!("logins file not found, using built-in admin account");
            return Ok(Self::default_accounts());
        }

        let contents = fs::read_to_string(&path)?;
        let mut accounts = Vec::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let parts: Vec<&str> = line.split(',').map(|part| part.trim()).collect();
            if parts.len() < 3 {
                warn!("skipping malformed login line: {}", line);
                continue;
            }

            match Role::parse(parts[0]) {
                Some(role) => accounts.push(UserAccount::new(role, parts[1], parts[2])),
                None => warn!("skipping login line with unknown role: {}", line),
            }
        }
        Ok(accounts)
    }

    fn save_accounts(&self, accounts: &[UserAccount]) -> Result<()> {
        // Keep the historical grouping: admin first, then scout leaders,
        // then logistics coordinators.
        let mut lines = String::new();
        for role in [Role::Admin, Role::ScoutLeader, Role::LogisticsCoordinator] {
            for account in accounts.iter().filter(|account| account.role == role) {
                lines.push_str(&format!(
                    "{},{},{}\n",
                    account.role.as_str(),
                    account.username,
                    account.password
                ));
            }
        }
        self.connection
            .write_atomic(&self.connection.logins_path(), &lines)
    }

    fn disabled_usernames(&self) -> Result<Vec<String>> {
        let path = self.connection.disabled_logins_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&path)?;
        Ok(contents
            .split(',')
            .map(|username| username.trim())
            .filter(|username| !username.is_empty())
            .map(|username| username.to_string())
            .collect())
    }

    fn is_disabled(&self, username: &str) -> Result<bool> {
        Ok(self
            .disabled_usernames()?
            .iter()
            .any(|disabled| disabled == username))
    }

    fn disable(&self, username: &str) -> Result<()> {
        let mut disabled = self.disabled_usernames()?;
        if !disabled.iter().any(|existing| existing == username) {
            disabled.push(username.to_string());
            self.save_disabled(&disabled)?;
        }
        Ok(())
    }

    fn enable(&self, username: &str) -> Result<bool> {
        let mut disabled = self.disabled_usernames()?;
        let before = disabled.len();
        disabled.retain(|existing| existing != username);
        if disabled.len() == before {
            return Ok(false);
        }
        self.save_disabled(&disabled)?;
        Ok(true)
    }
}

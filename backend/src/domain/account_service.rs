use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::accounts::{
    AddUserCommand, AddUserResult, AuthenticateCommand, AuthenticateResult,
    AuthenticationOutcome, DeleteUserCommand, ListUsersResult, SetPasswordCommand,
};
use crate::domain::errors::DomainError;
use crate::domain::models::account::{Role, UserAccount};
use crate::storage::json::{AccountRepository, JsonConnection};
use crate::storage::traits::AccountStorage;

/// Service for the administrator's user management and for login checks.
///
/// Credentials are compared in plaintext; anything stronger is explicitly
/// outside this system's scope. Session handling belongs to the UI shell.
#[derive(Clone)]
pub struct AccountService {
    account_repository: AccountRepository,
}

impl AccountService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self {
            account_repository: AccountRepository::new(connection),
        }
    }

    pub fn list_users(&self) -> Result<ListUsersResult> {
        Ok(ListUsersResult {
            users: self.account_repository.load_accounts()?,
        })
    }

    /// Add a user. Usernames are unique across all roles; adding an admin
    /// replaces the single admin account.
    pub fn add_user(&self, command: AddUserCommand) -> Result<AddUserResult> {
        let username = command.username.trim().to_string();
        if username.is_empty() {
            return Err(DomainError::Validation("Username cannot be blank.".to_string()).into());
        }

        let mut accounts = self.account_repository.load_accounts()?;
        if accounts.iter().any(|account| account.username == username) {
            return Err(DomainError::DuplicateUsername(username).into());
        }

        let user = UserAccount::new(command.role, username, command.password);
        if command.role == Role::Admin {
            // There is exactly one admin account
            accounts.retain(|account| account.role != Role::Admin);
        }
        accounts.push(user.clone());
        self.account_repository.save_accounts(&accounts)?;

        info!("Added user '{}' as {}", user.username, user.role.as_str());
        Ok(AddUserResult { user })
    }

    pub fn set_password(&self, command: SetPasswordCommand) -> Result<()> {
        let mut accounts = self.account_repository.load_accounts()?;
        let account = accounts
            .iter_mut()
            .find(|account| account.username == command.username)
            .ok_or_else(|| DomainError::UserNotFound(command.username.clone()))?;
        account.password = command.new_password;
        self.account_repository.save_accounts(&accounts)?;

        info!("Updated password for '{}'", command.username);
        Ok(())
    }

    /// Delete a non-admin user. The admin account cannot be deleted.
    pub fn delete_user(&self, command: DeleteUserCommand) -> Result<()> {
        let mut accounts = self.account_repository.load_accounts()?;
        let index = accounts
            .iter()
            .position(|account| account.username == command.username)
            .ok_or_else(|| DomainError::UserNotFound(command.username.clone()))?;
        if accounts[index].role == Role::Admin {
            return Err(DomainError::Validation(
                "The admin account cannot be deleted.".to_string(),
            )
            .into());
        }

        accounts.remove(index);
        self.account_repository.save_accounts(&accounts)?;

        info!("Deleted user '{}'", command.username);
        Ok(())
    }

    /// Block a non-admin user from logging in.
    pub fn disable_user(&self, username: &str) -> Result<()> {
        let accounts = self.account_repository.load_accounts()?;
        let account = accounts
            .iter()
            .find(|account| account.username == username)
            .ok_or_else(|| DomainError::UserNotFound(username.to_string()))?;
        if account.role == Role::Admin {
            return Err(DomainError::Validation(
                "The admin account cannot be disabled.".to_string(),
            )
            .into());
        }

        self.account_repository.disable(username)?;
        info!("Disabled user '{}'", username);
        Ok(())
    }

    /// Re-enable a disabled user.
    pub fn enable_user(&self, username: &str) -> Result<()> {
        if !self.account_repository.enable(username)? {
            return Err(DomainError::Validation(format!(
                "User '{}' is not disabled.",
                username
            ))
            .into());
        }
        info!("Enabled user '{}'", username);
        Ok(())
    }

    pub fn disabled_users(&self) -> Result<Vec<String>> {
        self.account_repository.disabled_usernames()
    }

    /// Plaintext credential check. Disabled accounts are refused before the
    /// password is even compared.
    pub fn authenticate(&self, command: AuthenticateCommand) -> Result<AuthenticateResult> {
        if self.account_repository.is_disabled(&command.username)? {
            warn!("Refused login for disabled account '{}'", command.username);
            return Ok(AuthenticateResult {
                outcome: AuthenticationOutcome::Disabled,
            });
        }

        let accounts = self.account_repository.load_accounts()?;
        let outcome = match accounts.iter().find(|account| {
            account.username == command.username && account.password == command.password
        }) {
            Some(account) => {
                info!(
                    "Login successful for '{}' ({})",
                    account.username,
                    account.role.as_str()
                );
                AuthenticationOutcome::Success(account.role)
            }
            None => AuthenticationOutcome::InvalidCredentials,
        };
        Ok(AuthenticateResult { outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test() -> (AccountService, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = Arc::new(JsonConnection::new(temp_dir.path()).unwrap());
        (AccountService::new(connection), temp_dir)
    }

    fn add_leader(service: &AccountService, username: &str) {
        service
            .add_user(AddUserCommand {
                role: Role::ScoutLeader,
                username: username.to_string(),
                password: "pw".to_string(),
            })
            .unwrap();
    }

    #[test]
    fn test_builtin_admin_is_present() {
        let (service, _temp_dir) = setup_test();
        let users = service.list_users().unwrap().users;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].role, Role::Admin);
        assert_eq!(users[0].username, "admin");
    }

    #[test]
    fn test_add_user_and_duplicate_rejection() {
        let (service, _temp_dir) = setup_test();
        add_leader(&service, "leader1");

        let users = service.list_users().unwrap().users;
        assert_eq!(users.len(), 2);

        let err = service
            .add_user(AddUserCommand {
                role: Role::LogisticsCoordinator,
                username: "leader1".to_string(),
                password: "other".to_string(),
            })
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::DuplicateUsername("leader1".to_string()))
        );

        let err = service
            .add_user(AddUserCommand {
                role: Role::ScoutLeader,
                username: "  ".to_string(),
                password: "pw".to_string(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_adding_admin_replaces_the_admin_account() {
        let (service, _temp_dir) = setup_test();
        service
            .add_user(AddUserCommand {
                role: Role::Admin,
                username: "root".to_string(),
                password: "secret".to_string(),
            })
            .unwrap();

        let users = service.list_users().unwrap().users;
        let admins: Vec<_> = users
            .iter()
            .filter(|user| user.role == Role::Admin)
            .collect();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].username, "root");
    }

    #[test]
    fn test_set_password_and_authenticate() {
        let (service, _temp_dir) = setup_test();
        add_leader(&service, "leader1");

        service
            .set_password(SetPasswordCommand {
                username: "leader1".to_string(),
                new_password: "new-pw".to_string(),
            })
            .unwrap();

        let result = service
            .authenticate(AuthenticateCommand {
                username: "leader1".to_string(),
                password: "new-pw".to_string(),
            })
            .unwrap();
        assert_eq!(
            result.outcome,
            AuthenticationOutcome::Success(Role::ScoutLeader)
        );

        let result = service
            .authenticate(AuthenticateCommand {
                username: "leader1".to_string(),
                password: "wrong".to_string(),
            })
            .unwrap();
        assert_eq!(result.outcome, AuthenticationOutcome::InvalidCredentials);
    }

    #[test]
    fn test_disable_blocks_login_until_enabled() {
        let (service, _temp_dir) = setup_test();
        add_leader(&service, "leader1");

        service.disable_user("leader1").unwrap();
        let result = service
            .authenticate(AuthenticateCommand {
                username: "leader1".to_string(),
                password: "pw".to_string(),
            })
            .unwrap();
        assert_eq!(result.outcome, AuthenticationOutcome::Disabled);
        assert_eq!(service.disabled_users().unwrap(), vec!["leader1".to_string()]);

        service.enable_user("leader1").unwrap();
        let result = service
            .authenticate(AuthenticateCommand {
                username: "leader1".to_string(),
                password: "pw".to_string(),
            })
            .unwrap();
        assert_eq!(
            result.outcome,
            AuthenticationOutcome::Success(Role::ScoutLeader)
        );

        let err = service.enable_user("leader1").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_admin_cannot_be_deleted_or_disabled() {
        let (service, _temp_dir) = setup_test();

        let err = service
            .delete_user(DeleteUserCommand {
                username: "admin".to_string(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));

        let err = service.disable_user("admin").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_delete_user() {
        let (service, _temp_dir) = setup_test();
        add_leader(&service, "leader1");

        service
            .delete_user(DeleteUserCommand {
                username: "leader1".to_string(),
            })
            .unwrap();
        assert_eq!(service.list_users().unwrap().users.len(), 1);

        let err = service
            .delete_user(DeleteUserCommand {
                username: "leader1".to_string(),
            })
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<DomainError>(),
            Some(&DomainError::UserNotFound("leader1".to_string()))
        );
    }
}

use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::User;
use anyhow::{Result, anyhow};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, instrument, trace};

/// Roster held in memory for the lifetime of the process, in registration order.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Seeds the roster, typically with the users loaded from the data file.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            storage: Arc::new(RwLock::new(users)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<User>>> {
        self.storage
            .read()
            .map_err(|_| anyhow!("user storage lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<User>>> {
        self.storage
            .write()
            .map_err(|_| anyhow!("user storage lock poisoned"))
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self, user), fields(email = %user.email))]
    fn save_user(&self, user: User) -> Result<()> {
        trace!("Acquiring write lock for user storage");
        let mut storage = self.write()?;
        storage.push(user);
        debug!(users = storage.len(), "User appended to roster");
        Ok(())
    }

    #[instrument(skip(self), fields(email = email))]
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        trace!("Acquiring read lock for user storage");
        let storage = self.read()?;
        let user = storage.iter().find(|u| u.email == email).cloned();
        match &user {
            Some(u) => debug!(email = %u.email, projects = u.projects.len(), "User found in roster"),
            None => trace!(email = email, "User not found in roster"),
        }
        Ok(user)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    fn update_user(&self, user: User) -> Result<()> {
        trace!("Acquiring write lock for user storage");
        let mut storage = self.write()?;
        let slot = storage
            .iter_mut()
            .find(|u| u.email == user.email)
            .ok_or_else(|| DomainError::UserNotFound(user.email.clone()))?;
        *slot = user;
        debug!("User updated in roster");
        Ok(())
    }

    fn all_users(&self) -> Result<Vec<User>> {
        Ok(self.read()?.clone())
    }
}

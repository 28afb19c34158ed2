use crate::domain::user::User;
use anyhow::Result;

/// The roster of registered users. Lookups are exact, case-sensitive matches.
pub trait UserRepository: Send + Sync {
    fn save_user(&self, user: User) -> Result<()>;
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    fn update_user(&self, user: User) -> Result<()>;
    fn all_users(&self) -> Result<Vec<User>>;
}

use crate::domain::project::Project;
use serde::{Deserialize, Serialize};

/// A registered person and the projects they own.
///
/// The password is kept verbatim; the document format has no hashed form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Invalid Egyptian phone number")]
    InvalidPhone,
    #[error("Email already registered")]
    EmailTaken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid target amount")]
    InvalidTarget,
    #[error("Invalid date format")]
    InvalidDateFormat,
    #[error("End date must be after start date")]
    InvalidDateOrder,
    #[error("Invalid project number")]
    InvalidProjectNumber,
    #[error("User not found: {0}")]
    UserNotFound(String),
}

use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{CreateUser, LoginRequest, User};
use crate::domain::validation::is_valid_phone;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, instrument, trace, warn};

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>) -> Self {
        Self { user_repository }
    }

    /// Appends a new user with no projects.
    ///
    /// Checks run in order: password confirmation, phone shape, email uniqueness.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub fn register_user(&self, req: CreateUser) -> Result<User> {
        trace!("Starting user registration");

        // Check password confirmation
        if req.password != req.confirm_password {
            warn!("Password confirmation does not match");
            return Err(DomainError::PasswordMismatch.into());
        }

        // Validate phone
        if !is_valid_phone(&req.phone) {
            warn!(phone = %req.phone, "Rejected phone number");
            return Err(DomainError::InvalidPhone.into());
        }

        // Check if user already exists
        if self.user_repository.find_user_by_email(&req.email)?.is_some() {
            warn!("User already exists");
            return Err(DomainError::EmailTaken.into());
        }

        // Create user
        let user = User {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            phone: req.phone,
            projects: Vec::new(),
        };
        self.user_repository.save_user(user.clone())?;

        info!(email = %user.email, "User registered successfully");
        Ok(user)
    }

    /// Returns the user whose email and password both match exactly.
    ///
    /// An unknown email and a wrong password produce the same error.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub fn login(&self, req: LoginRequest) -> Result<User> {
        trace!("Starting login");

        // Email and password must both match
        let user = self
            .user_repository
            .find_user_by_email(&req.email)?
            .filter(|u| u.password == req.password)
            .ok_or_else(|| {
                warn!("Login rejected");
                DomainError::InvalidCredentials
            })?;

        info!(email = %user.email, "Login successful");
        Ok(user)
    }
}

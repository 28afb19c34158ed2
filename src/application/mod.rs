pub mod auth_service;
pub mod project_service;

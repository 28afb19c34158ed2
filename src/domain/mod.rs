pub mod error;
pub mod project;
pub mod repository;
pub mod user;
pub mod validation;

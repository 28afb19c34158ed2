pub mod json_store;
pub mod user_repository;

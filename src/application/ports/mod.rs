pub mod note_repository;
pub mod password_hasher;
pub mod token_service;
pub mod user_repository;

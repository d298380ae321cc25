pub mod meeting_repository;
pub mod role_repository;
pub mod user_repository;

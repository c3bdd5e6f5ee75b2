pub mod arena;
pub mod repository;
pub mod types;

//! Diesel/PostgreSQL persistence adapters.

pub mod diesel_application_repository;
pub(crate) mod diesel_helpers;
#[cfg(feature = "example-data")]
pub mod diesel_seed_repository;
pub mod diesel_tag_repository;
pub(crate) mod models;
pub mod pool;
pub mod schema;

pub use diesel_application_repository::DieselApplicationRepository;
pub use diesel_tag_repository::DieselTagRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

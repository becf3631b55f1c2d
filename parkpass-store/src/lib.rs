pub mod app_config;
pub mod database;
pub mod fastpass_repo;
pub mod memory;
pub mod ride_repo;

pub use database::DbClient;
pub use fastpass_repo::StoreFastPassRepository;
pub use memory::MemoryStore;
pub use ride_repo::StoreRideRepository;

use parkpass_core::CoreError;

pub(crate) fn storage_error(err: sqlx::Error) -> CoreError {
    tracing::error!("Database error: {}", err);
    CoreError::Storage(err.to_string())
}

use std::sync::Arc;

use parkpass_core::{FastPassRepository, RideRepository};
use parkpass_store::app_config::PaginationConfig;
use parkpass_store::{DbClient, MemoryStore, StoreFastPassRepository, StoreRideRepository};

#[derive(Clone)]
pub struct AppState {
    pub rides: Arc<dyn RideRepository>,
    pub fastpasses: Arc<dyn FastPassRepository>,
    pub pagination: PaginationConfig,
}

impl AppState {
    pub fn postgres(db: &DbClient, pagination: PaginationConfig) -> Self {
        Self {
            rides: Arc::new(StoreRideRepository::new(db.pool.clone())),
            fastpasses: Arc::new(StoreFastPassRepository::new(db.pool.clone())),
            pagination,
        }
    }

    pub fn in_memory(pagination: PaginationConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self {
            rides: store.clone(),
            fastpasses: store,
            pagination,
        }
    }
}

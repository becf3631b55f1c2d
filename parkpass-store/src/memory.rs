use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use parkpass_core::fastpass::require_visitor_passes;
use parkpass_core::{
    CheckInResult, CoreError, CoreResult, FastPass, FastPassRepository, FastPassUpdate,
    NewFastPass, NewRide, Ride, RideRepository, RideUpdate,
};

#[derive(Default)]
struct Tables {
    rides: BTreeMap<i64, Ride>,
    fastpasses: BTreeMap<i64, FastPass>,
    last_ride_id: i64,
    last_fastpass_id: i64,
}

/// Process-local store for development and tests.
///
/// Every mutation takes the write lock for its whole read-check-write
/// sequence, so check-ins on one pass never interleave. Ids start at 1 and
/// are never reused.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn page<T: Clone>(rows: &BTreeMap<i64, T>, skip: i64, limit: i64) -> Vec<T> {
    rows.values()
        .skip(skip.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl RideRepository for MemoryStore {
    async fn list_rides(&self, skip: i64, limit: i64) -> CoreResult<Vec<Ride>> {
        let tables = self.tables.read().await;
        Ok(page(&tables.rides, skip, limit))
    }

    async fn get_ride(&self, id: i64) -> CoreResult<Ride> {
        let tables = self.tables.read().await;
        tables.rides.get(&id).cloned().ok_or_else(CoreError::ride_not_found)
    }

    async fn create_ride(&self, ride: NewRide) -> CoreResult<Ride> {
        let mut tables = self.tables.write().await;
        tables.last_ride_id += 1;
        let ride = ride.into_ride(tables.last_ride_id, Utc::now());
        tables.rides.insert(ride.id, ride.clone());
        Ok(ride)
    }

    async fn update_ride(&self, id: i64, update: RideUpdate) -> CoreResult<Ride> {
        let mut tables = self.tables.write().await;
        let ride = tables.rides.get_mut(&id).ok_or_else(CoreError::ride_not_found)?;
        ride.apply_update(update, Utc::now());
        Ok(ride.clone())
    }
}

#[async_trait]
impl FastPassRepository for MemoryStore {
    async fn list_fastpasses(&self, skip: i64, limit: i64) -> CoreResult<Vec<FastPass>> {
        let tables = self.tables.read().await;
        Ok(page(&tables.fastpasses, skip, limit))
    }

    async fn get_fastpass(&self, id: i64) -> CoreResult<FastPass> {
        let tables = self.tables.read().await;
        tables
            .fastpasses
            .get(&id)
            .cloned()
            .ok_or_else(CoreError::fastpass_not_found)
    }

    async fn list_by_visitor_email(&self, email: &str) -> CoreResult<Vec<FastPass>> {
        let tables = self.tables.read().await;
        let passes = tables
            .fastpasses
            .values()
            .filter(|fp| fp.visitor_email == email)
            .cloned()
            .collect();
        require_visitor_passes(passes)
    }

    async fn create_fastpass(&self, fastpass: NewFastPass) -> CoreResult<FastPass> {
        let mut tables = self.tables.write().await;
        if !tables.rides.contains_key(&fastpass.ride_id) {
            return Err(CoreError::ride_not_found());
        }
        fastpass.ensure_valid_window()?;

        tables.last_fastpass_id += 1;
        let fastpass = fastpass.into_fastpass(tables.last_fastpass_id, Utc::now());
        tables.fastpasses.insert(fastpass.id, fastpass.clone());
        Ok(fastpass)
    }

    async fn update_fastpass(&self, id: i64, update: FastPassUpdate) -> CoreResult<FastPass> {
        let mut tables = self.tables.write().await;
        let fastpass = tables
            .fastpasses
            .get_mut(&id)
            .ok_or_else(CoreError::fastpass_not_found)?;
        fastpass.apply_update(update, Utc::now())?;
        Ok(fastpass.clone())
    }

    async fn delete_fastpass(&self, id: i64) -> CoreResult<()> {
        let mut tables = self.tables.write().await;
        tables
            .fastpasses
            .remove(&id)
            .map(|_| ())
            .ok_or_else(CoreError::fastpass_not_found)
    }

    async fn check_in(&self, id: i64, now: DateTime<Utc>) -> CoreResult<CheckInResult> {
        let mut tables = self.tables.write().await;
        let fastpass = tables
            .fastpasses
            .get_mut(&id)
            .ok_or_else(CoreError::fastpass_not_found)?;
        fastpass.check_in(now)
    }
}

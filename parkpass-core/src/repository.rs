use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    CheckInResult, CoreResult, FastPass, FastPassUpdate, NewFastPass, NewRide, Ride, RideUpdate,
};

/// Persistence for rides.
///
/// Payloads are expected to have passed schema validation already.
#[async_trait]
pub trait RideRepository: Send + Sync {
    /// Rides in insertion order, skipping `skip` and returning at most `limit`.
    async fn list_rides(&self, skip: i64, limit: i64) -> CoreResult<Vec<Ride>>;

    async fn get_ride(&self, id: i64) -> CoreResult<Ride>;

    async fn create_ride(&self, ride: NewRide) -> CoreResult<Ride>;

    async fn update_ride(&self, id: i64, update: RideUpdate) -> CoreResult<Ride>;
}

/// Persistence for fast passes.
#[async_trait]
pub trait FastPassRepository: Send + Sync {
    async fn list_fastpasses(&self, skip: i64, limit: i64) -> CoreResult<Vec<FastPass>>;

    async fn get_fastpass(&self, id: i64) -> CoreResult<FastPass>;

    /// Exact-match lookup. Zero matches is a `NotFound` error.
    async fn list_by_visitor_email(&self, email: &str) -> CoreResult<Vec<FastPass>>;

    /// Fails with `NotFound` for an unknown ride and `InvalidInput` when the
    /// validity window is empty, in that order.
    async fn create_fastpass(&self, fastpass: NewFastPass) -> CoreResult<FastPass>;

    async fn update_fastpass(&self, id: i64, update: FastPassUpdate) -> CoreResult<FastPass>;

    async fn delete_fastpass(&self, id: i64) -> CoreResult<()>;

    /// Redeems one use of the pass at `now`. The read-check-write sequence is
    /// atomic per pass: concurrent check-ins on one id are serialized.
    async fn check_in(&self, id: i64, now: DateTime<Utc>) -> CoreResult<CheckInResult>;
}

//! Postgres repository tests.
//!
//! These need a reachable database and are ignored by default. Run with:
//! `DATABASE_URL=postgres://localhost/parkpass_test cargo test -p parkpass-store --test postgres_test -- --ignored`

use std::sync::Arc;

use chrono::{Duration, Utc};
use parkpass_core::{
    CoreError, FastPassRepository, FastPassTier, NewFastPass, NewRide, Patch, RideRepository,
    RideUpdate,
};
use parkpass_store::app_config::DatabaseConfig;
use parkpass_store::{DbClient, StoreFastPassRepository, StoreRideRepository};

async fn connect() -> DbClient {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for Postgres tests");
    let db = DbClient::new(&DatabaseConfig {
        url,
        max_connections: 20,
        acquire_timeout_secs: 10,
        run_migrations: true,
    })
    .await
    .expect("connect to Postgres");
    db.migrate().await.expect("run migrations");
    db
}

fn ride(name: &str) -> NewRide {
    NewRide {
        name: name.to_string(),
        location: "Animal Kingdom - Pandora".to_string(),
        description: Some("Banshee flight simulator".to_string()),
        min_height: Some(3.6),
        queue_time: 90,
        park_area: Some("Pandora".to_string()),
    }
}

fn purchase(ride_id: i64, max_uses: i32) -> NewFastPass {
    let now = Utc::now();
    NewFastPass {
        ride_id,
        visitor_name: "Ada".to_string(),
        visitor_email: "ada@example.com".to_string(),
        tier: FastPassTier::Premium,
        max_uses,
        valid_from: now - Duration::hours(1),
        valid_until: now + Duration::hours(1),
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_partial_ride_update_round_trip() {
    let db = connect().await;
    let rides = StoreRideRepository::new(db.pool.clone());

    let created = rides.create_ride(ride("Avatar Flight of Passage")).await.unwrap();
    assert!(created.updated_at.is_none());

    let update = RideUpdate {
        queue_time: Patch::Value(15),
        description: Patch::Null,
        ..Default::default()
    };
    let updated = rides.update_ride(created.id, update).await.unwrap();
    assert_eq!(updated.queue_time, 15);
    assert_eq!(updated.description, None);
    assert!(updated.updated_at.is_some());

    let stored = rides.get_ride(created.id).await.unwrap();
    assert_eq!(stored.name, "Avatar Flight of Passage");
    assert_eq!(stored.min_height, Some(3.6));
    assert_eq!(stored.queue_time, 15);
    assert_eq!(stored.description, None);
    assert_eq!(stored.created_at, created.created_at);

    let missing = rides.update_ride(i64::MAX, RideUpdate::default()).await;
    assert!(matches!(missing, Err(CoreError::NotFound(_))));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_purchase_checks_ride_then_window() {
    let db = connect().await;
    let rides = StoreRideRepository::new(db.pool.clone());
    let passes = StoreFastPassRepository::new(db.pool.clone());

    let mut req = purchase(i64::MAX, 1);
    req.valid_until = req.valid_from - Duration::hours(1);
    assert!(matches!(
        passes.create_fastpass(req.clone()).await,
        Err(CoreError::NotFound(msg)) if msg == "Ride not found"
    ));

    let ride = rides.create_ride(ride("Na'vi River Journey")).await.unwrap();
    req.ride_id = ride.id;
    assert!(matches!(
        passes.create_fastpass(req).await,
        Err(CoreError::InvalidInput(msg)) if msg == "Valid from date must be before valid until date"
    ));

    let created = passes.create_fastpass(purchase(ride.id, 2)).await.unwrap();
    assert_eq!(created.tier, FastPassTier::Premium);
    assert_eq!(created.times_used, 0);
    assert!(created.is_active);
    assert_eq!(passes.get_fastpass(created.id).await.unwrap(), created);

    passes.delete_fastpass(created.id).await.unwrap();
    assert!(matches!(
        passes.delete_fastpass(created.id).await,
        Err(CoreError::NotFound(_))
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_check_ins_on_last_use() {
    let db = connect().await;
    let rides = StoreRideRepository::new(db.pool.clone());
    let passes = Arc::new(StoreFastPassRepository::new(db.pool.clone()));

    let ride = rides.create_ride(ride("Expedition Everest")).await.unwrap();
    let fp = passes.create_fastpass(purchase(ride.id, 1)).await.unwrap();

    let id = fp.id;
    let attempts = (0..16).map(|_| {
        let passes = passes.clone();
        tokio::spawn(async move { passes.check_in(id, Utc::now()).await })
    });
    let results = futures_util::future::join_all(attempts).await;

    let mut successes = 0;
    for result in results {
        match result.unwrap() {
            Ok(checked_in) => {
                assert_eq!(checked_in.remaining_uses, 0);
                successes += 1;
            }
            Err(CoreError::InvalidInput(msg)) => {
                assert_eq!(msg, "Fast pass has no remaining uses")
            }
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }
    assert_eq!(successes, 1);

    let stored = passes.get_fastpass(id).await.unwrap();
    assert_eq!(stored.times_used, 1);
    assert!(!stored.is_active);
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use parkpass_core::{CoreError, CoreResult, NewRide, Ride, RideRepository, RideUpdate};

use crate::storage_error;

pub struct StoreRideRepository {
    pool: PgPool,
}

impl StoreRideRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const RIDE_COLUMNS: &str =
    "id, name, location, description, min_height, queue_time, park_area, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct RideRow {
    id: i64,
    name: String,
    location: String,
    description: Option<String>,
    min_height: Option<f64>,
    queue_time: i32,
    park_area: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<RideRow> for Ride {
    fn from(row: RideRow) -> Self {
        Ride {
            id: row.id,
            name: row.name,
            location: row.location,
            description: row.description,
            min_height: row.min_height,
            queue_time: row.queue_time,
            park_area: row.park_area,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl RideRepository for StoreRideRepository {
    async fn list_rides(&self, skip: i64, limit: i64) -> CoreResult<Vec<Ride>> {
        let rows: Vec<RideRow> = sqlx::query_as(&format!(
            "SELECT {RIDE_COLUMNS} FROM rides ORDER BY id OFFSET $1 LIMIT $2"
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows.into_iter().map(Ride::from).collect())
    }

    async fn get_ride(&self, id: i64) -> CoreResult<Ride> {
        let row: Option<RideRow> =
            sqlx::query_as(&format!("SELECT {RIDE_COLUMNS} FROM rides WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error)?;

        row.map(Ride::from).ok_or_else(CoreError::ride_not_found)
    }

    async fn create_ride(&self, ride: NewRide) -> CoreResult<Ride> {
        let row: RideRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO rides (name, location, description, min_height, queue_time, park_area)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {RIDE_COLUMNS}
            "#
        ))
        .bind(&ride.name)
        .bind(&ride.location)
        .bind(&ride.description)
        .bind(ride.min_height)
        .bind(ride.queue_time)
        .bind(&ride.park_area)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.into())
    }

    async fn update_ride(&self, id: i64, update: RideUpdate) -> CoreResult<Ride> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let row: Option<RideRow> = sqlx::query_as(&format!(
            "SELECT {RIDE_COLUMNS} FROM rides WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(storage_error)?;

        let mut ride: Ride = row.map(Ride::from).ok_or_else(CoreError::ride_not_found)?;
        ride.apply_update(update, Utc::now());

        sqlx::query(
            r#"
            UPDATE rides
            SET name = $1, location = $2, description = $3, min_height = $4,
                queue_time = $5, park_area = $6, updated_at = $7
            WHERE id = $8
            "#,
        )
        .bind(&ride.name)
        .bind(&ride.location)
        .bind(&ride.description)
        .bind(ride.min_height)
        .bind(ride.queue_time)
        .bind(&ride.park_area)
        .bind(ride.updated_at)
        .bind(ride.id)
        .execute(&mut *tx)
        .await
        .map_err(storage_error)?;

        tx.commit().await.map_err(storage_error)?;
        Ok(ride)
    }
}

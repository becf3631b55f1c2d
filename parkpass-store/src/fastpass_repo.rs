use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use parkpass_core::fastpass::require_visitor_passes;
use parkpass_core::{
    CheckInResult, CoreError, CoreResult, FastPass, FastPassRepository, FastPassTier,
    FastPassUpdate, NewFastPass,
};

use crate::storage_error;

pub struct StoreFastPassRepository {
    pool: PgPool,
}

impl StoreFastPassRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const FASTPASS_COLUMNS: &str = "id, ride_id, visitor_name, visitor_email, tier, times_used, \
     max_uses, is_active, valid_from, valid_until, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct FastPassRow {
    id: i64,
    ride_id: i64,
    visitor_name: String,
    visitor_email: String,
    tier: String,
    times_used: i32,
    max_uses: i32,
    is_active: bool,
    valid_from: DateTime<Utc>,
    valid_until: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl TryFrom<FastPassRow> for FastPass {
    type Error = CoreError;

    fn try_from(row: FastPassRow) -> Result<Self, Self::Error> {
        Ok(FastPass {
            id: row.id,
            ride_id: row.ride_id,
            visitor_name: row.visitor_name,
            visitor_email: row.visitor_email,
            tier: row.tier.parse::<FastPassTier>()?,
            times_used: row.times_used,
            max_uses: row.max_uses,
            is_active: row.is_active,
            valid_from: row.valid_from,
            valid_until: row.valid_until,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_fastpasses(rows: Vec<FastPassRow>) -> CoreResult<Vec<FastPass>> {
    rows.into_iter().map(FastPass::try_from).collect()
}

impl StoreFastPassRepository {
    /// Loads a pass and holds its row lock until `tx` ends.
    async fn lock_fastpass(
        tx: &mut Transaction<'_, Postgres>,
        id: i64,
    ) -> CoreResult<FastPass> {
        let row: Option<FastPassRow> = sqlx::query_as(&format!(
            "SELECT {FASTPASS_COLUMNS} FROM fastpasses WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(storage_error)?;

        row.ok_or_else(CoreError::fastpass_not_found)?.try_into()
    }

    async fn write_usage(
        tx: &mut Transaction<'_, Postgres>,
        fastpass: &FastPass,
    ) -> CoreResult<()> {
        sqlx::query(
            r#"
            UPDATE fastpasses
            SET times_used = $1, is_active = $2, tier = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(fastpass.times_used)
        .bind(fastpass.is_active)
        .bind(fastpass.tier.as_str())
        .bind(fastpass.updated_at)
        .bind(fastpass.id)
        .execute(&mut **tx)
        .await
        .map_err(storage_error)?;

        Ok(())
    }
}

#[async_trait]
impl FastPassRepository for StoreFastPassRepository {
    async fn list_fastpasses(&self, skip: i64, limit: i64) -> CoreResult<Vec<FastPass>> {
        let rows: Vec<FastPassRow> = sqlx::query_as(&format!(
            "SELECT {FASTPASS_COLUMNS} FROM fastpasses ORDER BY id OFFSET $1 LIMIT $2"
        ))
        .bind(skip)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        into_fastpasses(rows)
    }

    async fn get_fastpass(&self, id: i64) -> CoreResult<FastPass> {
        let row: Option<FastPassRow> = sqlx::query_as(&format!(
            "SELECT {FASTPASS_COLUMNS} FROM fastpasses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.ok_or_else(CoreError::fastpass_not_found)?.try_into()
    }

    async fn list_by_visitor_email(&self, email: &str) -> CoreResult<Vec<FastPass>> {
        let rows: Vec<FastPassRow> = sqlx::query_as(&format!(
            "SELECT {FASTPASS_COLUMNS} FROM fastpasses WHERE visitor_email = $1 ORDER BY id"
        ))
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        require_visitor_passes(into_fastpasses(rows)?)
    }

    async fn create_fastpass(&self, fastpass: NewFastPass) -> CoreResult<FastPass> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let ride_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM rides WHERE id = $1)")
                .bind(fastpass.ride_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(storage_error)?;
        if !ride_exists {
            return Err(CoreError::ride_not_found());
        }
        fastpass.ensure_valid_window()?;

        let row: FastPassRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO fastpasses (ride_id, visitor_name, visitor_email, tier, max_uses, valid_from, valid_until)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {FASTPASS_COLUMNS}
            "#
        ))
        .bind(fastpass.ride_id)
        .bind(&fastpass.visitor_name)
        .bind(&fastpass.visitor_email)
        .bind(fastpass.tier.as_str())
        .bind(fastpass.max_uses)
        .bind(fastpass.valid_from)
        .bind(fastpass.valid_until)
        .fetch_one(&mut *tx)
        .await
        .map_err(storage_error)?;

        tx.commit().await.map_err(storage_error)?;

        row.try_into()
    }

    async fn update_fastpass(&self, id: i64, update: FastPassUpdate) -> CoreResult<FastPass> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        let mut fastpass = Self::lock_fastpass(&mut tx, id).await?;
        fastpass.apply_update(update, Utc::now())?;
        Self::write_usage(&mut tx, &fastpass).await?;

        tx.commit().await.map_err(storage_error)?;
        Ok(fastpass)
    }

    async fn delete_fastpass(&self, id: i64) -> CoreResult<()> {
        let result = sqlx::query("DELETE FROM fastpasses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(CoreError::fastpass_not_found());
        }
        Ok(())
    }

    async fn check_in(&self, id: i64, now: DateTime<Utc>) -> CoreResult<CheckInResult> {
        let mut tx = self.pool.begin().await.map_err(storage_error)?;

        // The row lock serializes concurrent check-ins on the same pass.
        let mut fastpass = Self::lock_fastpass(&mut tx, id).await?;
        let result = fastpass.check_in(now)?;
        Self::write_usage(&mut tx, &fastpass).await?;

        tx.commit().await.map_err(storage_error)?;
        Ok(result)
    }
}

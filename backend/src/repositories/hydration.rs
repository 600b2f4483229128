//! Water log repository

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use nutrition_tracker_shared::WaterEntry;
use sqlx::PgPool;
use uuid::Uuid;

/// Water log record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WaterLogRecord {
    pub id: Uuid,
    pub amount_ml: i32,
    pub logged_at: DateTime<Utc>,
}

impl From<WaterLogRecord> for WaterEntry {
    fn from(record: WaterLogRecord) -> Self {
        WaterEntry {
            intake_ml: record.amount_ml,
        }
    }
}

/// Hydration repository
pub struct HydrationRepository;

impl HydrationRepository {
    pub async fn log(
        pool: &PgPool,
        user_id: Uuid,
        amount_ml: i32,
        logged_at: DateTime<Utc>,
    ) -> Result<WaterLogRecord> {
        let record = sqlx::query_as::<_, WaterLogRecord>(
            r#"
            INSERT INTO water_log (user_id, amount_ml, logged_at)
            VALUES ($1, $2, $3)
            RETURNING id, amount_ml, logged_at
            "#,
        )
        .bind(user_id)
        .bind(amount_ml)
        .bind(logged_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn get_by_date(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<WaterLogRecord>> {
        let records = sqlx::query_as::<_, WaterLogRecord>(
            r#"
            SELECT id, amount_ml, logged_at
            FROM water_log
            WHERE user_id = $1
              AND (logged_at AT TIME ZONE 'UTC')::date = $2
            ORDER BY logged_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}

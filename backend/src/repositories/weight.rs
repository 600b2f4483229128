//! Weight log repository

use super::decimal_to_f64;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use nutrition_tracker_shared::WeightSample;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Weight log record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeightLogRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub weight_kg: Decimal,
    pub logged_at: DateTime<Utc>,
    pub log_date: NaiveDate,
}

impl From<WeightLogRecord> for WeightSample {
    fn from(record: WeightLogRecord) -> Self {
        WeightSample {
            weight_kg: decimal_to_f64(&record.weight_kg),
            logged_at: record.logged_at,
        }
    }
}

/// Weight repository
pub struct WeightRepository;

impl WeightRepository {
    /// Record a weight; a second entry on the same UTC day replaces the first
    pub async fn record(
        pool: &PgPool,
        user_id: Uuid,
        weight_kg: Decimal,
        logged_at: DateTime<Utc>,
    ) -> Result<WeightLogRecord> {
        let record = sqlx::query_as::<_, WeightLogRecord>(
            r#"
            INSERT INTO weight_log (user_id, weight_kg, logged_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, log_date) DO UPDATE SET
                weight_kg = EXCLUDED.weight_kg,
                logged_at = EXCLUDED.logged_at
            RETURNING id, user_id, weight_kg, logged_at, log_date
            "#,
        )
        .bind(user_id)
        .bind(weight_kg)
        .bind(logged_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Most recent sample whose day is on or before `date`
    pub async fn latest_on_or_before(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<WeightLogRecord>> {
        let record = sqlx::query_as::<_, WeightLogRecord>(
            r#"
            SELECT id, user_id, weight_kg, logged_at, log_date
            FROM weight_log
            WHERE user_id = $1 AND log_date <= $2
            ORDER BY log_date DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }
}

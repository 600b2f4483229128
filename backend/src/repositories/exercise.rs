//! Exercise log repository

use super::decimal_to_f64;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use nutrition_tracker_shared::ExerciseEntry;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Exercise log joined with its type's MET value
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseLogRecord {
    pub id: Uuid,
    pub duration_min: i32,
    /// Zero when the log has no type or the type has no MET value
    pub mets: Decimal,
    pub logged_at: DateTime<Utc>,
}

impl From<ExerciseLogRecord> for ExerciseEntry {
    fn from(record: ExerciseLogRecord) -> Self {
        ExerciseEntry {
            met: decimal_to_f64(&record.mets),
            duration_min: record.duration_min,
        }
    }
}

/// Exercise repository
pub struct ExerciseRepository;

impl ExerciseRepository {
    /// Create or update an exercise type, returning its id
    pub async fn upsert_type(pool: &PgPool, name: &str, mets: Option<Decimal>) -> Result<i32> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO exercise_type (name, mets)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET mets = EXCLUDED.mets
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(mets)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Log one session
    pub async fn log(
        pool: &PgPool,
        user_id: Uuid,
        exercise_type_id: Option<i32>,
        duration_min: i32,
        logged_at: DateTime<Utc>,
    ) -> Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO exercise_log (user_id, exercise_type_id, duration_min, logged_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(exercise_type_id)
        .bind(duration_min)
        .bind(logged_at)
        .fetch_one(pool)
        .await?;

        Ok(id)
    }

    /// Sessions logged between two days, both inclusive
    pub async fn count_between(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM exercise_log
            WHERE user_id = $1
              AND (logged_at AT TIME ZONE 'UTC')::date BETWEEN $2 AND $3
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Sessions logged on one day
    pub async fn get_by_date(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ExerciseLogRecord>> {
        let records = sqlx::query_as::<_, ExerciseLogRecord>(
            r#"
            SELECT l.id, l.duration_min, COALESCE(t.mets, 0) AS mets, l.logged_at
            FROM exercise_log l
            LEFT JOIN exercise_type t ON t.id = l.exercise_type_id
            WHERE l.user_id = $1
              AND (l.logged_at AT TIME ZONE 'UTC')::date = $2
            ORDER BY l.logged_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }
}

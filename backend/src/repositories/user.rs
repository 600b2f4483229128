//! Profile and settings repository

use super::decimal_to_f64;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use nutrition_tracker_shared::{MacroStyle, Profile, UserSettings};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Profile record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub height_cm: Option<Decimal>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileRecord> for Profile {
    fn from(record: ProfileRecord) -> Self {
        Profile {
            user_id: record.user_id,
            height_cm: record.height_cm.as_ref().map(decimal_to_f64),
            date_of_birth: record.date_of_birth,
            gender: record.gender,
        }
    }
}

/// Settings record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserSettingsRecord {
    pub user_id: Uuid,
    pub default_target_calories: Option<i32>,
    pub macro_style: String,
    pub updated_at: DateTime<Utc>,
}

impl From<UserSettingsRecord> for UserSettings {
    fn from(record: UserSettingsRecord) -> Self {
        UserSettings {
            user_id: record.user_id,
            default_target_calories: record.default_target_calories,
            // Unrecognized stored styles fall back to balanced
            macro_style: record.macro_style.parse().unwrap_or_default(),
        }
    }
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Register a user id issued by the identity provider
    pub async fn ensure_user(pool: &PgPool, user_id: Uuid) -> Result<()> {
        sqlx::query("INSERT INTO users (id) VALUES ($1) ON CONFLICT (id) DO NOTHING")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Get the body profile
    pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRecord>> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r#"
            SELECT user_id, height_cm, date_of_birth, gender, updated_at
            FROM user_profile
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Create or replace the body profile
    pub async fn upsert_profile(
        pool: &PgPool,
        user_id: Uuid,
        height_cm: Option<Decimal>,
        date_of_birth: Option<NaiveDate>,
        gender: Option<&str>,
    ) -> Result<ProfileRecord> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r#"
            INSERT INTO user_profile (user_id, height_cm, date_of_birth, gender)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                height_cm = EXCLUDED.height_cm,
                date_of_birth = EXCLUDED.date_of_birth,
                gender = EXCLUDED.gender,
                updated_at = NOW()
            RETURNING user_id, height_cm, date_of_birth, gender, updated_at
            "#,
        )
        .bind(user_id)
        .bind(height_cm)
        .bind(date_of_birth)
        .bind(gender)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Get settings, if a row exists
    pub async fn get_settings(pool: &PgPool, user_id: Uuid) -> Result<Option<UserSettingsRecord>> {
        let record = sqlx::query_as::<_, UserSettingsRecord>(
            r#"
            SELECT user_id, default_target_calories, macro_style, updated_at
            FROM user_settings
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Set the preferred macro style
    pub async fn set_macro_style(pool: &PgPool, user_id: Uuid, style: MacroStyle) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_settings (user_id, macro_style)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET
                macro_style = EXCLUDED.macro_style,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(style.as_str())
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Store the last computed calorie target (last write wins)
    pub async fn save_default_target_calories(
        pool: &PgPool,
        user_id: Uuid,
        calories: i32,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_settings (user_id, default_target_calories)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET
                default_target_calories = EXCLUDED.default_target_calories,
                updated_at = NOW()
            "#,
        )
        .bind(user_id)
        .bind(calories)
        .execute(pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_stored_style_falls_back() {
        let record = UserSettingsRecord {
            user_id: Uuid::new_v4(),
            default_target_calories: Some(2100),
            macro_style: "keto".to_string(),
            updated_at: Utc::now(),
        };
        let settings = UserSettings::from(record);
        assert_eq!(settings.macro_style, MacroStyle::Balanced);
        assert_eq!(settings.default_target_calories, Some(2100));
    }

    #[test]
    fn test_profile_record_conversion() {
        let record = ProfileRecord {
            user_id: Uuid::new_v4(),
            height_cm: Some(Decimal::new(1755, 1)),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 2),
            gender: None,
            updated_at: Utc::now(),
        };
        let profile = Profile::from(record);
        assert_eq!(profile.height_cm, Some(175.5));
        assert!(profile.gender.is_none());
    }
}

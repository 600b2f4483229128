//! Data access seen by the metrics and goal services
//!
//! `MetricsStore` is the only way the services touch persistent state:
//! a handful of reads plus the goal append and the settings cache write.

use super::{
    ExerciseRepository, GoalRepository, HydrationRepository, NutritionRepository, UserRepository,
    WeightRepository,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use nutrition_tracker_shared::{
    ExerciseEntry, Goal, MealEntry, NewGoal, Profile, UserSettings, WaterEntry, WeightSample,
};
use sqlx::PgPool;
use uuid::Uuid;

#[async_trait]
pub trait MetricsStore: Send + Sync {
    async fn profile(&self, user_id: Uuid) -> Result<Option<Profile>>;

    /// Settings, or defaults when the user has none stored
    async fn settings(&self, user_id: Uuid) -> Result<UserSettings>;

    async fn save_default_target_calories(&self, user_id: Uuid, calories: i32) -> Result<()>;

    /// Most recent weight sample on or before `date`
    async fn latest_weight(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<WeightSample>>;

    /// Most recently created goal
    async fn active_goal(&self, user_id: Uuid) -> Result<Option<Goal>>;

    async fn append_goal(&self, goal: NewGoal) -> Result<Goal>;

    /// Exercise sessions between two days, both inclusive
    async fn sessions_between(&self, user_id: Uuid, start: NaiveDate, end: NaiveDate)
        -> Result<i64>;

    async fn exercise_entries(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<ExerciseEntry>>;

    async fn meal_entries(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<MealEntry>>;

    async fn water_entries(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<WaterEntry>>;
}

/// PostgreSQL-backed store
#[derive(Clone)]
pub struct PgMetricsStore {
    pool: PgPool,
}

impl PgMetricsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetricsStore for PgMetricsStore {
    async fn profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        Ok(UserRepository::get_profile(&self.pool, user_id)
            .await?
            .map(Profile::from))
    }

    async fn settings(&self, user_id: Uuid) -> Result<UserSettings> {
        let settings = UserRepository::get_settings(&self.pool, user_id)
            .await?
            .map(UserSettings::from)
            .unwrap_or_else(|| UserSettings {
                user_id,
                ..Default::default()
            });
        Ok(settings)
    }

    async fn save_default_target_calories(&self, user_id: Uuid, calories: i32) -> Result<()> {
        UserRepository::save_default_target_calories(&self.pool, user_id, calories).await
    }

    async fn latest_weight(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<WeightSample>> {
        Ok(WeightRepository::latest_on_or_before(&self.pool, user_id, date)
            .await?
            .map(WeightSample::from))
    }

    async fn active_goal(&self, user_id: Uuid) -> Result<Option<Goal>> {
        Ok(GoalRepository::latest(&self.pool, user_id)
            .await?
            .map(Goal::from))
    }

    async fn append_goal(&self, goal: NewGoal) -> Result<Goal> {
        Ok(GoalRepository::create(&self.pool, &goal).await?.into())
    }

    async fn sessions_between(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64> {
        ExerciseRepository::count_between(&self.pool, user_id, start, end).await
    }

    async fn exercise_entries(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<ExerciseEntry>> {
        let records = ExerciseRepository::get_by_date(&self.pool, user_id, date).await?;
        Ok(records.into_iter().map(ExerciseEntry::from).collect())
    }

    async fn meal_entries(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<MealEntry>> {
        let records = NutritionRepository::get_entries_by_date(&self.pool, user_id, date).await?;
        Ok(records.into_iter().map(MealEntry::from).collect())
    }

    async fn water_entries(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<WaterEntry>> {
        let records = HydrationRepository::get_by_date(&self.pool, user_id, date).await?;
        Ok(records.into_iter().map(WaterEntry::from).collect())
    }
}

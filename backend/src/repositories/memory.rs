//! In-memory `MetricsStore`
//!
//! Holds everything in maps behind a lock. Used by the service tests and for
//! running the engine without a database.

use super::MetricsStore;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use nutrition_tracker_shared::{
    ExerciseEntry, Goal, MacroStyle, MealEntry, NewGoal, Profile, UserSettings, WaterEntry,
    WeightSample,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    profiles: HashMap<Uuid, Profile>,
    settings: HashMap<Uuid, UserSettings>,
    weights: HashMap<Uuid, Vec<WeightSample>>,
    goals: HashMap<Uuid, Vec<Goal>>,
    exercise: HashMap<Uuid, Vec<(NaiveDate, ExerciseEntry)>>,
    meals: HashMap<Uuid, Vec<(NaiveDate, MealEntry)>>,
    water: HashMap<Uuid, Vec<(NaiveDate, WaterEntry)>>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    fail_settings_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn put_profile(&self, profile: Profile) {
        self.tables
            .write()
            .await
            .profiles
            .insert(profile.user_id, profile);
    }

    /// Log a weight; a second sample on the same day replaces the first
    pub async fn log_weight(&self, user_id: Uuid, weight_kg: f64, logged_at: DateTime<Utc>) {
        let mut tables = self.tables.write().await;
        let samples = tables.weights.entry(user_id).or_default();
        samples.retain(|s| s.logged_at.date_naive() != logged_at.date_naive());
        samples.push(WeightSample {
            weight_kg,
            logged_at,
        });
    }

    pub async fn log_exercise(&self, user_id: Uuid, date: NaiveDate, entry: ExerciseEntry) {
        self.tables
            .write()
            .await
            .exercise
            .entry(user_id)
            .or_default()
            .push((date, entry));
    }

    pub async fn log_meal(&self, user_id: Uuid, date: NaiveDate, entry: MealEntry) {
        self.tables
            .write()
            .await
            .meals
            .entry(user_id)
            .or_default()
            .push((date, entry));
    }

    pub async fn log_water(&self, user_id: Uuid, date: NaiveDate, intake_ml: i32) {
        self.tables
            .write()
            .await
            .water
            .entry(user_id)
            .or_default()
            .push((date, WaterEntry { intake_ml }));
    }

    pub async fn set_macro_style(&self, user_id: Uuid, macro_style: MacroStyle) {
        let mut tables = self.tables.write().await;
        let settings = tables.settings.entry(user_id).or_insert_with(|| UserSettings {
            user_id,
            ..Default::default()
        });
        settings.macro_style = macro_style;
    }

    /// Make every settings write fail, to exercise the best-effort path
    pub fn fail_settings_writes(&self, fail: bool) {
        self.fail_settings_writes.store(fail, Ordering::SeqCst);
    }

    pub async fn goal_count(&self, user_id: Uuid) -> usize {
        self.tables
            .read()
            .await
            .goals
            .get(&user_id)
            .map_or(0, Vec::len)
    }
}

fn on_date<T: Copy>(rows: Option<&Vec<(NaiveDate, T)>>, date: NaiveDate) -> Vec<T> {
    rows.map(|rows| {
        rows.iter()
            .filter(|(day, _)| *day == date)
            .map(|(_, row)| *row)
            .collect()
    })
    .unwrap_or_default()
}

#[async_trait]
impl MetricsStore for InMemoryStore {
    async fn profile(&self, user_id: Uuid) -> Result<Option<Profile>> {
        Ok(self.tables.read().await.profiles.get(&user_id).cloned())
    }

    async fn settings(&self, user_id: Uuid) -> Result<UserSettings> {
        let tables = self.tables.read().await;
        Ok(tables.settings.get(&user_id).cloned().unwrap_or_else(|| UserSettings {
            user_id,
            ..Default::default()
        }))
    }

    async fn save_default_target_calories(&self, user_id: Uuid, calories: i32) -> Result<()> {
        if self.fail_settings_writes.load(Ordering::SeqCst) {
            anyhow::bail!("settings store unavailable");
        }
        let mut tables = self.tables.write().await;
        let settings = tables.settings.entry(user_id).or_insert_with(|| UserSettings {
            user_id,
            ..Default::default()
        });
        settings.default_target_calories = Some(calories);
        Ok(())
    }

    async fn latest_weight(&self, user_id: Uuid, date: NaiveDate) -> Result<Option<WeightSample>> {
        let tables = self.tables.read().await;
        Ok(tables.weights.get(&user_id).and_then(|samples| {
            samples
                .iter()
                .filter(|s| s.logged_at.date_naive() <= date)
                .max_by_key(|s| s.logged_at)
                .cloned()
        }))
    }

    async fn active_goal(&self, user_id: Uuid) -> Result<Option<Goal>> {
        let tables = self.tables.read().await;
        Ok(tables.goals.get(&user_id).and_then(|goals| goals.last().cloned()))
    }

    async fn append_goal(&self, goal: NewGoal) -> Result<Goal> {
        let goal = Goal {
            id: Uuid::new_v4(),
            user_id: goal.user_id,
            goal_type: "weight".to_string(),
            target_weight_kg: goal.target_weight_kg,
            direction: goal.direction,
            weekly_rate_kg: goal.weekly_rate_kg,
            duration_weeks: goal.duration_weeks,
            start_date: goal.start_date,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .goals
            .entry(goal.user_id)
            .or_default()
            .push(goal.clone());
        Ok(goal)
    }

    async fn sessions_between(
        &self,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<i64> {
        let tables = self.tables.read().await;
        let count = tables.exercise.get(&user_id).map_or(0, |rows| {
            rows.iter()
                .filter(|(day, _)| (start..=end).contains(day))
                .count()
        });
        Ok(count as i64)
    }

    async fn exercise_entries(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<ExerciseEntry>> {
        Ok(on_date(self.tables.read().await.exercise.get(&user_id), date))
    }

    async fn meal_entries(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<MealEntry>> {
        Ok(on_date(self.tables.read().await.meals.get(&user_id), date))
    }

    async fn water_entries(&self, user_id: Uuid, date: NaiveDate) -> Result<Vec<WaterEntry>> {
        Ok(on_date(self.tables.read().await.water.get(&user_id), date))
    }
}

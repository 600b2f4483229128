//! Meal and food item repository

use super::decimal_to_f64;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use nutrition_tracker_shared::MealEntry;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Per-serving nutrition of a food item
#[derive(Debug, Clone)]
pub struct CreateFoodItem {
    pub name: String,
    pub serving_size: Option<Decimal>,
    pub calories: Decimal,
    pub protein_g: Decimal,
    pub carbs_g: Decimal,
    pub fat_g: Decimal,
}

/// Meal entry joined with its food item
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MealEntryRecord {
    pub id: Uuid,
    pub quantity: Decimal,
    pub serving_size: Option<Decimal>,
    pub calories: Decimal,
    pub protein_g: Decimal,
    pub carbs_g: Decimal,
    pub fat_g: Decimal,
}

impl From<MealEntryRecord> for MealEntry {
    fn from(record: MealEntryRecord) -> Self {
        MealEntry {
            quantity: decimal_to_f64(&record.quantity),
            serving_size: record.serving_size.as_ref().map(decimal_to_f64),
            calories: decimal_to_f64(&record.calories),
            protein_g: decimal_to_f64(&record.protein_g),
            carbs_g: decimal_to_f64(&record.carbs_g),
            fat_g: decimal_to_f64(&record.fat_g),
        }
    }
}

/// Nutrition repository
pub struct NutritionRepository;

impl NutritionRepository {
    pub async fn create_food_item(db: &PgPool, input: &CreateFoodItem) -> Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO food_items (name, serving_size, calories, protein_g, carbs_g, fat_g)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&input.name)
        .bind(input.serving_size)
        .bind(input.calories)
        .bind(input.protein_g)
        .bind(input.carbs_g)
        .bind(input.fat_g)
        .fetch_one(db)
        .await?;

        Ok(id)
    }

    pub async fn create_meal(
        db: &PgPool,
        user_id: Uuid,
        meal_type: &str,
        logged_at: DateTime<Utc>,
    ) -> Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO meal (user_id, meal_type, logged_at)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(meal_type)
        .bind(logged_at)
        .fetch_one(db)
        .await?;

        Ok(id)
    }

    /// Add a food to a meal; `quantity` is in the food's serving unit
    pub async fn add_entry(
        db: &PgPool,
        meal_id: Uuid,
        food_item_id: Uuid,
        quantity: Decimal,
    ) -> Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO meal_entries (meal_id, food_item_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(meal_id)
        .bind(food_item_id)
        .bind(quantity)
        .fetch_one(db)
        .await?;

        Ok(id)
    }

    /// Every meal entry eaten on one day
    pub async fn get_entries_by_date(
        db: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<MealEntryRecord>> {
        let records = sqlx::query_as::<_, MealEntryRecord>(
            r#"
            SELECT e.id, e.quantity, f.serving_size, f.calories,
                   f.protein_g, f.carbs_g, f.fat_g
            FROM meal_entries e
            JOIN meal m ON m.id = e.meal_id
            JOIN food_items f ON f.id = e.food_item_id
            WHERE m.user_id = $1
              AND (m.logged_at AT TIME ZONE 'UTC')::date = $2
            ORDER BY m.logged_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(db)
        .await?;

        Ok(records)
    }
}

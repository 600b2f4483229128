//! Nutrition Tracker WASM Module
//!
//! Browser bindings for the energy formulas, so a client can preview targets
//! with exactly the server's arithmetic and rounding.

use nutrition_tracker_shared::metrics::{self, Gender, GoalDirection, MacroStyle};
use wasm_bindgen::prelude::*;

/// BMI from weight (kg) and height (cm), one decimal; 0 for a non-positive height
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    metrics::calculate_bmi(weight_kg, height_cm)
}

/// Mifflin-St Jeor BMR (kcal/day). Any gender other than "male" is female.
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: i32, gender: Option<String>) -> i32 {
    metrics::calculate_bmr(
        weight_kg,
        height_cm,
        age_years,
        Gender::from_profile(gender.as_deref()),
    )
}

/// Activity multiplier for the sessions logged in a trailing week
#[wasm_bindgen]
pub fn activity_factor(sessions_per_week: u32) -> f64 {
    metrics::activity_factor(i64::from(sessions_per_week))
}

#[wasm_bindgen]
pub fn calculate_tdee(bmr: i32, sessions_per_week: u32) -> i32 {
    metrics::calculate_tdee(bmr, i64::from(sessions_per_week))
}

/// Macro grams for a calorie target as `[protein_g, fat_g, carbs_g]`
///
/// Unknown directions fall back to maintain and unknown styles to balanced.
#[wasm_bindgen]
pub fn macro_split(calories: i32, direction: &str, style: Option<String>) -> Vec<f64> {
    let direction = GoalDirection::from_stored(direction);
    let style = style
        .as_deref()
        .and_then(|s| s.parse::<MacroStyle>().ok())
        .unwrap_or_default();
    let grams = metrics::calculate_macros(calories, direction, style);
    vec![grams.protein_g, grams.fat_g, grams.carbs_g]
}

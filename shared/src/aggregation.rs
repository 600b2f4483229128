//! Daily log aggregation
//!
//! Turns the raw meal, exercise and water rows of one day into the totals the
//! metrics snapshot reports. Storage only has to hand over the rows; every
//! scaling and rounding rule lives here.

use crate::metrics::{round_to, MacroGrams};
use crate::models::{ExerciseEntry, MealEntry, WaterEntry};
use chrono::{Duration, NaiveDate};

/// Days in the trailing activity window, query date included
pub const SESSION_WINDOW_DAYS: i64 = 7;

/// First and last day of the activity window ending at `date`
pub fn session_window(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    (date - Duration::days(SESSION_WINDOW_DAYS - 1), date)
}

// ============================================================================
// Exercise
// ============================================================================

/// Estimated burn for one session
///
/// Formula: kcal = MET × weight(kg) × duration(h), rounded to 2 decimals
pub fn exercise_calories(met: f64, weight_kg: f64, duration_min: i32) -> f64 {
    round_to(met * weight_kg * (f64::from(duration_min) / 60.0), 2)
}

/// Total calories burned and the number of sessions counted
pub fn calories_burned(entries: &[ExerciseEntry], weight_kg: f64) -> (f64, usize) {
    let total: f64 = entries
        .iter()
        .map(|e| exercise_calories(e.met, weight_kg, e.duration_min))
        .sum();
    (round_to(total, 2), entries.len())
}

// ============================================================================
// Meals
// ============================================================================

/// Portion multiplier for a meal entry
///
/// A missing or non-positive serving size counts as one full serving.
pub fn serving_ratio(quantity: f64, serving_size: Option<f64>) -> f64 {
    match serving_size {
        Some(size) if size > 0.0 => quantity / size,
        _ => 1.0,
    }
}

/// Calories eaten, rounded to 2 decimals
pub fn calories_consumed(entries: &[MealEntry]) -> f64 {
    let total: f64 = entries
        .iter()
        .map(|e| e.calories * serving_ratio(e.quantity, e.serving_size))
        .sum();
    round_to(total, 2)
}

/// Macros eaten, each rounded to 1 decimal
pub fn macros_consumed(entries: &[MealEntry]) -> MacroGrams {
    let (protein, carbs, fat) = entries.iter().fold((0.0, 0.0, 0.0), |(p, c, f), e| {
        let ratio = serving_ratio(e.quantity, e.serving_size);
        (
            p + e.protein_g * ratio,
            c + e.carbs_g * ratio,
            f + e.fat_g * ratio,
        )
    });

    MacroGrams {
        protein_g: round_to(protein, 1),
        carbs_g: round_to(carbs, 1),
        fat_g: round_to(fat, 1),
    }
}

// ============================================================================
// Water
// ============================================================================

/// Total water drunk (ml)
pub fn water_intake_ml(entries: &[WaterEntry]) -> i64 {
    entries.iter().map(|e| i64::from(e.intake_ml)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn meal(calories: f64, quantity: f64, serving_size: Option<f64>) -> MealEntry {
        MealEntry {
            quantity,
            serving_size,
            calories,
            protein_g: 10.0,
            carbs_g: 20.0,
            fat_g: 5.0,
        }
    }

    #[test]
    fn test_session_window_is_seven_days_inclusive() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let (start, end) = session_window(date);
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
        assert_eq!(end, date);
        assert_eq!((end - start).num_days() + 1, SESSION_WINDOW_DAYS);
    }

    #[test]
    fn test_exercise_calories() {
        // 8 MET, 70kg, 45min -> 8 * 70 * 0.75 = 420
        assert_eq!(exercise_calories(8.0, 70.0, 45), 420.0);
        // 3.5 MET, 82.3kg, 20min -> 96.0166...
        assert_eq!(exercise_calories(3.5, 82.3, 20), 96.02);
    }

    #[test]
    fn test_calories_burned_sums_sessions() {
        let entries = vec![
            ExerciseEntry { met: 8.0, duration_min: 45 },
            ExerciseEntry { met: 3.5, duration_min: 30 },
        ];
        let (total, count) = calories_burned(&entries, 70.0);
        // 420 + 122.5
        assert_eq!(total, 542.5);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_calories_burned_empty() {
        assert_eq!(calories_burned(&[], 70.0), (0.0, 0));
    }

    #[test]
    fn test_serving_ratio() {
        assert_eq!(serving_ratio(150.0, Some(100.0)), 1.5);
        assert_eq!(serving_ratio(150.0, Some(0.0)), 1.0);
        assert_eq!(serving_ratio(150.0, None), 1.0);
    }

    #[test]
    fn test_calories_consumed_scales_by_serving() {
        let entries = vec![meal(200.0, 150.0, Some(100.0)), meal(95.5, 1.0, None)];
        assert_eq!(calories_consumed(&entries), 395.5);
    }

    #[test]
    fn test_macros_consumed() {
        let entries = vec![meal(200.0, 50.0, Some(100.0)), meal(100.0, 2.0, Some(1.0))];
        let macros = macros_consumed(&entries);
        // ratios 0.5 and 2.0
        assert_eq!(macros.protein_g, 25.0);
        assert_eq!(macros.carbs_g, 50.0);
        assert_eq!(macros.fat_g, 12.5);
    }

    #[test]
    fn test_water_intake() {
        let entries = vec![
            WaterEntry { intake_ml: 250 },
            WaterEntry { intake_ml: 500 },
            WaterEntry { intake_ml: 330 },
        ];
        assert_eq!(water_intake_ml(&entries), 1080);
        assert_eq!(water_intake_ml(&[]), 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: consumption totals do not depend on entry order
        #[test]
        fn prop_calories_consumed_order_independent(
            rows in prop::collection::vec((0.0f64..900.0, 1.0f64..400.0, 1.0f64..200.0), 0..20)
        ) {
            let entries: Vec<MealEntry> = rows
                .iter()
                .map(|&(cal, qty, size)| meal(cal, qty, Some(size)))
                .collect();
            let mut reversed = entries.clone();
            reversed.reverse();

            let forward = calories_consumed(&entries);
            let backward = calories_consumed(&reversed);
            prop_assert!((forward - backward).abs() <= 0.011);
        }

        /// Property: burn grows with session duration
        #[test]
        fn prop_burn_monotonic_in_duration(
            met in 1.0f64..15.0,
            weight in 40.0f64..150.0,
            short in 1i32..60,
            extra in 1i32..120
        ) {
            prop_assert!(
                exercise_calories(met, weight, short + extra) >= exercise_calories(met, weight, short)
            );
        }
    }
}

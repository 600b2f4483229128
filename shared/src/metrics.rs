//! Daily energy metrics formulas
//!
//! Provides the calculation chain behind the daily metrics snapshot:
//! BMI → BMR → TDEE → calorie target → macro split.
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: No I/O, every figure is derived from its arguments
//! 2. **One Rounding Rule**: Half-away-from-zero (`f64::round`) everywhere
//! 3. **Safety Clamps**: Daily adjustment ceiling and calorie floor are enforced here
//! 4. **Type Safety**: Directions, styles and sex are enums, not strings

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Energy stored in one kilogram of body mass (kcal)
pub const KCAL_PER_KG: f64 = 7700.0;

/// Ceiling on the daily calorie adjustment derived from a weekly rate
pub const MAX_DAILY_ADJUSTMENT_KCAL: i32 = 1200;

/// Absolute minimum daily calorie target
pub const MIN_TARGET_CALORIES: i32 = 1200;

/// Energy density of protein (kcal/g)
pub const PROTEIN_KCAL_PER_G: f64 = 4.0;

/// Energy density of carbohydrates (kcal/g)
pub const CARBS_KCAL_PER_G: f64 = 4.0;

/// Energy density of fat (kcal/g)
pub const FAT_KCAL_PER_G: f64 = 9.0;

/// Round half away from zero to a fixed number of decimals
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ============================================================================
// Profile Types
// ============================================================================

/// Sex used by the Mifflin-St Jeor equation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Resolve the stored profile value
    ///
    /// Absent values default to male. Only a case-insensitive "male" maps to
    /// male; every other value is treated as female.
    pub fn from_profile(value: Option<&str>) -> Self {
        match value {
            None => Gender::Male,
            Some(v) if v.trim().eq_ignore_ascii_case("male") => Gender::Male,
            Some(_) => Gender::Female,
        }
    }
}

/// Direction of the active weight goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalDirection {
    Lose,
    Gain,
    #[default]
    Maintain,
}

impl GoalDirection {
    /// Canonical storage label
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalDirection::Lose => "lose",
            GoalDirection::Gain => "gain",
            GoalDirection::Maintain => "maintain",
        }
    }

    /// Lenient parse for values read back from storage
    pub fn from_stored(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl fmt::Display for GoalDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GoalDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lose" | "lose_weight" | "lose weight" | "giảm cân" => Ok(GoalDirection::Lose),
            "gain" | "gain_weight" | "gain weight" | "tăng cân" => Ok(GoalDirection::Gain),
            "maintain" | "maintain_weight" | "giữ nguyên" => Ok(GoalDirection::Maintain),
            _ => Err(format!("Unknown goal direction: {}", s)),
        }
    }
}

/// Macro distribution style chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MacroStyle {
    /// Split follows the goal direction
    #[default]
    Balanced,
    HighProtein,
    LowCarb,
}

impl MacroStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            MacroStyle::Balanced => "balanced",
            MacroStyle::HighProtein => "high_protein",
            MacroStyle::LowCarb => "low_carb",
        }
    }
}

impl fmt::Display for MacroStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MacroStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "balanced" | "default" => Ok(MacroStyle::Balanced),
            "high_protein" | "high-protein" => Ok(MacroStyle::HighProtein),
            "low_carb" | "low-carb" => Ok(MacroStyle::LowCarb),
            _ => Err(format!("Unknown macro style: {}", s)),
        }
    }
}

// ============================================================================
// BMI
// ============================================================================

/// Calculate BMI rounded to one decimal
///
/// Formula: BMI = weight(kg) / height(m)²
///
/// Returns 0.0 when height is not positive.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    round_to(weight_kg / (height_m * height_m), 1)
}

// ============================================================================
// BMR and TDEE
// ============================================================================

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: i32, gender: Gender) -> i32 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years);
    let bmr = match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    };
    bmr.round() as i32
}

/// Activity level inferred from exercise sessions in the trailing week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// No sessions
    Sedentary,
    /// 1-3 sessions
    LightlyActive,
    /// 4-5 sessions
    ModeratelyActive,
    /// 6-7 sessions
    VeryActive,
    /// 8 or more sessions
    ExtraActive,
}

impl ActivityLevel {
    /// Bucket a weekly session count
    pub fn from_sessions(sessions_per_week: i64) -> Self {
        match sessions_per_week {
            i64::MIN..=0 => ActivityLevel::Sedentary,
            1..=3 => ActivityLevel::LightlyActive,
            4..=5 => ActivityLevel::ModeratelyActive,
            6..=7 => ActivityLevel::VeryActive,
            _ => ActivityLevel::ExtraActive,
        }
    }

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }
}

/// Activity multiplier for a weekly session count
pub fn activity_factor(sessions_per_week: i64) -> f64 {
    ActivityLevel::from_sessions(sessions_per_week).multiplier()
}

/// Calculate Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn calculate_tdee(bmr: i32, sessions_per_week: i64) -> i32 {
    (f64::from(bmr) * activity_factor(sessions_per_week)).round() as i32
}

// ============================================================================
// Calorie Target
// ============================================================================

/// Daily adjustment implied by a weekly rate, before any clamp
///
/// adjustment = weekly_rate(kg) × 7700 / 7
pub fn raw_daily_adjustment(weekly_rate_kg: f64) -> i32 {
    (weekly_rate_kg * KCAL_PER_KG / 7.0).round() as i32
}

/// Daily adjustment clamped to `[0, MAX_DAILY_ADJUSTMENT_KCAL]`
pub fn daily_adjustment(weekly_rate_kg: f64) -> i32 {
    raw_daily_adjustment(weekly_rate_kg).clamp(0, MAX_DAILY_ADJUSTMENT_KCAL)
}

/// Largest weekly rate whose adjustment stays within the ceiling
pub fn max_weekly_rate_kg() -> f64 {
    round_to(f64::from(MAX_DAILY_ADJUSTMENT_KCAL) * 7.0 / KCAL_PER_KG, 2)
}

/// Lowest acceptable calorie target: `max(1200, ceil(bmr × 1.1))`
///
/// Computed in integer arithmetic so 1.1 never picks up float noise.
pub fn calorie_floor(bmr: i32) -> i32 {
    let scaled = i64::from(bmr) * 11;
    let floor = scaled.div_euclid(10) + i64::from(scaled.rem_euclid(10) != 0);
    i32::try_from(floor)
        .unwrap_or(i32::MAX)
        .max(MIN_TARGET_CALORIES)
}

/// TDEE shifted by the adjustment in the goal's direction, unclamped
///
/// Saturates at the `i32` bounds.
pub fn directional_target(tdee: i32, adjustment: i32, direction: GoalDirection) -> i32 {
    match direction {
        GoalDirection::Lose => tdee.saturating_sub(adjustment),
        GoalDirection::Gain => tdee.saturating_add(adjustment),
        GoalDirection::Maintain => tdee,
    }
}

/// Daily calorie target with the adjustment ceiling and calorie floor applied
pub fn calculate_target_calories(
    tdee: i32,
    bmr: i32,
    weekly_rate_kg: f64,
    direction: GoalDirection,
) -> i32 {
    let target = directional_target(tdee, daily_adjustment(weekly_rate_kg), direction);
    target.max(calorie_floor(bmr))
}

// ============================================================================
// Macro Split
// ============================================================================

/// Percent of calories allotted to each macro; always sums to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroRatio {
    pub protein_pct: u8,
    pub fat_pct: u8,
    pub carbs_pct: u8,
}

impl MacroRatio {
    const fn new(protein_pct: u8, fat_pct: u8, carbs_pct: u8) -> Self {
        debug_assert!(protein_pct as u16 + fat_pct as u16 + carbs_pct as u16 == 100);
        Self {
            protein_pct,
            fat_pct,
            carbs_pct,
        }
    }

    /// Ratio for a goal direction and macro style
    pub fn for_goal(direction: GoalDirection, style: MacroStyle) -> Self {
        match (style, direction) {
            (MacroStyle::HighProtein, _) => Self::new(35, 25, 40),
            (MacroStyle::LowCarb, _) => Self::new(30, 40, 30),
            (MacroStyle::Balanced, GoalDirection::Lose) => Self::new(25, 25, 50),
            (MacroStyle::Balanced, GoalDirection::Gain) => Self::new(20, 25, 55),
            (MacroStyle::Balanced, GoalDirection::Maintain) => Self::new(20, 30, 50),
        }
    }
}

/// Macro grams, either targets or consumed totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MacroGrams {
    #[serde(rename = "protein")]
    pub protein_g: f64,
    #[serde(rename = "carbs")]
    pub carbs_g: f64,
    #[serde(rename = "fat")]
    pub fat_g: f64,
}

impl MacroGrams {
    /// Energy represented by these grams (kcal)
    pub fn energy_kcal(&self) -> f64 {
        self.protein_g * PROTEIN_KCAL_PER_G
            + self.carbs_g * CARBS_KCAL_PER_G
            + self.fat_g * FAT_KCAL_PER_G
    }
}

/// Split a calorie target into macro grams, each rounded to one decimal
pub fn calculate_macros(calories: i32, direction: GoalDirection, style: MacroStyle) -> MacroGrams {
    let ratio = MacroRatio::for_goal(direction, style);
    let kcal = f64::from(calories);
    let share = |pct: u8| kcal * f64::from(pct) / 100.0;

    MacroGrams {
        protein_g: round_to(share(ratio.protein_pct) / PROTEIN_KCAL_PER_G, 1),
        carbs_g: round_to(share(ratio.carbs_pct) / CARBS_KCAL_PER_G, 1),
        fat_g: round_to(share(ratio.fat_pct) / FAT_KCAL_PER_G, 1),
    }
}

// ============================================================================
// Age
// ============================================================================

/// Whole years between birth and `on`, using 365-day years
pub fn age_on(date_of_birth: NaiveDate, on: NaiveDate) -> i32 {
    (on - date_of_birth).num_days().div_euclid(365) as i32
}

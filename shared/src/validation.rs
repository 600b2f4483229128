//! Input validation functions
//!
//! Range checks applied at the API boundary, before values reach the
//! formulas. Request structs additionally use the `validator` derive rules.

use chrono::NaiveDate;

/// Date format accepted in query strings and request bodies
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate a weekly weight change rate (kg/week)
pub fn validate_weekly_rate(rate_kg: f64) -> Result<(), String> {
    if rate_kg.is_nan() || rate_kg.is_infinite() {
        return Err("Weekly rate must be a valid number".to_string());
    }
    if rate_kg < 0.0 {
        return Err("Weekly rate cannot be negative".to_string());
    }
    Ok(())
}

/// Validate a goal duration
pub fn validate_duration_weeks(weeks: i32) -> Result<(), String> {
    if !(1..=520).contains(&weeks) {
        return Err("Duration must be between 1 and 520 weeks".to_string());
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

//! Weight goal safety checks
//!
//! A proposed goal must point the same way as the gap between current and
//! target weight, ask for a daily adjustment within the ceiling, and leave a
//! calorie target at or above the floor. Unlike the daily metrics, where the
//! adjustment is clamped, an oversized adjustment here is rejected.

use crate::errors::{DomainError, DomainResult};
use crate::metrics::{
    calorie_floor, directional_target, max_weekly_rate_kg, raw_daily_adjustment, GoalDirection,
    MAX_DAILY_ADJUSTMENT_KCAL,
};
use serde::{Deserialize, Serialize};

/// Energy figures behind an accepted goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalPlan {
    pub bmr: i32,
    pub tdee: i32,
    pub daily_adjustment: i32,
    pub calorie_floor: i32,
    pub target_calories: i32,
}

/// Proposed goal parameters
#[derive(Debug, Clone, Copy)]
pub struct GoalProposal {
    pub current_weight_kg: f64,
    pub target_weight_kg: f64,
    pub direction: GoalDirection,
    pub weekly_rate_kg: f64,
}

/// Check a proposed goal against current state and the safety thresholds
pub fn plan_weight_goal(proposal: &GoalProposal, bmr: i32, tdee: i32) -> DomainResult<GoalPlan> {
    let GoalProposal {
        current_weight_kg,
        target_weight_kg,
        direction,
        weekly_rate_kg,
    } = *proposal;

    match direction {
        GoalDirection::Lose if target_weight_kg >= current_weight_kg => {
            return Err(DomainError::validation(format!(
                "Target weight {:.1} kg must be below current weight {:.1} kg for a lose goal",
                target_weight_kg, current_weight_kg
            )));
        }
        GoalDirection::Gain if target_weight_kg <= current_weight_kg => {
            return Err(DomainError::validation(format!(
                "Target weight {:.1} kg must be above current weight {:.1} kg for a gain goal",
                target_weight_kg, current_weight_kg
            )));
        }
        _ => {}
    }

    if weekly_rate_kg < 0.0 || !weekly_rate_kg.is_finite() {
        return Err(DomainError::validation("Weekly rate must be a non-negative number"));
    }

    let adjustment = raw_daily_adjustment(weekly_rate_kg);
    if adjustment > MAX_DAILY_ADJUSTMENT_KCAL {
        return Err(DomainError::validation(format!(
            "Weekly rate of {} kg is too aggressive: {} kcal/day exceeds the {} kcal/day limit (max {} kg/week)",
            weekly_rate_kg,
            adjustment,
            MAX_DAILY_ADJUSTMENT_KCAL,
            max_weekly_rate_kg()
        )));
    }

    let daily_adjustment = match direction {
        GoalDirection::Maintain => 0,
        _ => adjustment,
    };
    let floor = calorie_floor(bmr);
    let target_calories = directional_target(tdee, daily_adjustment, direction);

    if target_calories < floor {
        return Err(DomainError::validation(format!(
            "Target of {} kcal/day is below the safe minimum of {} kcal/day; choose a slower weekly rate",
            target_calories, floor
        )));
    }

    Ok(GoalPlan {
        bmr,
        tdee,
        daily_adjustment,
        calorie_floor: floor,
        target_calories,
    })
}

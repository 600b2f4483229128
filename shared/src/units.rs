//! Body weight units
//!
//! Weights are stored in kilograms. Requests may carry pounds or stone; they are
//! converted once at the API boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

const KG_PER_LB: f64 = 0.453592;
const KG_PER_STONE: f64 = 6.35029;

/// Unit a client submits a weight in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
    Stone,
}

impl WeightUnit {
    /// Convert a value in this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value * KG_PER_LB,
            WeightUnit::Stone => value * KG_PER_STONE,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
            WeightUnit::Stone => "st",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            "st" | "stone" | "stones" => Ok(WeightUnit::Stone),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_pounds_to_kg() {
        // 176 lbs is about 79.83 kg
        assert!((WeightUnit::Lbs.to_kg(176.0) - 79.832).abs() < 0.001);
        assert_eq!(WeightUnit::Kg.to_kg(80.0), 80.0);
        // 12 st = 76.2 kg
        assert!((WeightUnit::Stone.to_kg(12.0) - 76.203).abs() < 0.001);
    }

    #[test]
    fn test_weight_unit_parsing() {
        assert_eq!("kg".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
        assert_eq!(" LBS ".parse::<WeightUnit>().unwrap(), WeightUnit::Lbs);
        assert_eq!("pounds".parse::<WeightUnit>().unwrap(), WeightUnit::Lbs);
        assert_eq!("st".parse::<WeightUnit>().unwrap(), WeightUnit::Stone);
        assert!("grams".parse::<WeightUnit>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let unit: WeightUnit = serde_json::from_str("\"lbs\"").unwrap();
        assert_eq!(unit, WeightUnit::Lbs);
        assert_eq!(serde_json::to_string(&WeightUnit::Kg).unwrap(), "\"kg\"");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: a pound weighs less than a kilogram, a stone more
        #[test]
        fn prop_unit_ordering(value in 1.0f64..1500.0) {
            prop_assert!(WeightUnit::Lbs.to_kg(value) < value);
            prop_assert!(WeightUnit::Stone.to_kg(value) > value);
            prop_assert_eq!(WeightUnit::Kg.to_kg(value), value);
        }
    }
}

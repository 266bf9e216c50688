//! Species model
//!
//! Laboratory rodent species and their FDA body-surface-area Km factors.

use serde::Serialize;

use crate::dose::units::{GUINEA_PIG_KM, HAMSTER_KM, HUMAN_KM, MOUSE_KM, RAT_KM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Mouse,
    Rat,
    Hamster,
    GuineaPig,
}

impl Species {
    pub const ALL: [Species; 4] = [
        Species::Mouse,
        Species::Rat,
        Species::Hamster,
        Species::GuineaPig,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Mouse => "mouse",
            Species::Rat => "rat",
            Species::Hamster => "hamster",
            Species::GuineaPig => "guinea_pig",
        }
    }

    /// Parse a user-supplied species name; `None` if unrecognized
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mouse" | "mice" => Some(Species::Mouse),
            "rat" | "rats" => Some(Species::Rat),
            "hamster" | "hamsters" => Some(Species::Hamster),
            "guinea_pig" | "guinea pig" | "guineapig" | "guinea_pigs" | "guinea pigs" => {
                Some(Species::GuineaPig)
            }
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Species::Mouse => "Mouse",
            Species::Rat => "Rat",
            Species::Hamster => "Hamster",
            Species::GuineaPig => "Guinea Pig",
        }
    }

    pub fn km_factor(&self) -> f64 {
        match self {
            Species::Mouse => MOUSE_KM,
            Species::Rat => RAT_KM,
            Species::Hamster => HAMSTER_KM,
            Species::GuineaPig => GUINEA_PIG_KM,
        }
    }

    /// Multiplier from a human mg/kg dose to this species' mg/kg dose
    pub fn km_ratio(&self) -> f64 {
        HUMAN_KM / self.km_factor()
    }

    /// Typical adult body weight range in grams (min, max)
    pub fn typical_weight_range_g(&self) -> (f64, f64) {
        match self {
            Species::Mouse => (10.0, 60.0),
            Species::Rat => (150.0, 600.0),
            Species::Hamster => (80.0, 150.0),
            Species::GuineaPig => (250.0, 1200.0),
        }
    }

    pub fn is_typical_weight(&self, weight_g: f64) -> bool {
        let (min, max) = self.typical_weight_range_g();
        weight_g >= min && weight_g <= max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_species() {
        assert_eq!(Species::parse("mouse"), Some(Species::Mouse));
        assert_eq!(Species::parse(" Mice "), Some(Species::Mouse));
        assert_eq!(Species::parse("RAT"), Some(Species::Rat));
        assert_eq!(Species::parse("guinea pig"), Some(Species::GuineaPig));
        assert_eq!(Species::parse("guinea_pig"), Some(Species::GuineaPig));
        assert_eq!(Species::parse("dog"), None);
    }

    #[test]
    fn test_parse_roundtrips_as_str() {
        for species in Species::ALL {
            assert_eq!(Species::parse(species.as_str()), Some(species));
        }
    }

    #[test]
    fn test_km_factors() {
        assert_eq!(Species::Mouse.km_factor(), 3.0);
        assert_eq!(Species::Rat.km_factor(), 6.0);
        assert!((Species::Mouse.km_ratio() - 12.333).abs() < 1e-3);
        assert!((Species::Rat.km_ratio() - 6.1667).abs() < 1e-3);
    }

    #[test]
    fn test_typical_weight() {
        assert!(Species::Mouse.is_typical_weight(25.0));
        assert!(Species::Mouse.is_typical_weight(10.0));
        assert!(Species::Mouse.is_typical_weight(60.0));
        assert!(!Species::Mouse.is_typical_weight(250.0));
        assert!(Species::Rat.is_typical_weight(250.0));
    }
}

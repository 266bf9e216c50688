//! Dose unit types and conversion constants
//!
//! Standard conversion factors, FDA Km factors, and the enums the dose math
//! hands back to callers.

use serde::Serialize;

// ============================================================================
// Conversion Constants
// ============================================================================

/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Microliters per milliliter
pub const UL_PER_ML: f64 = 1000.0;

// ============================================================================
// FDA Body-Surface-Area Km Factors
// ============================================================================

/// Km for a 60 kg adult human
pub const HUMAN_KM: f64 = 37.0;
pub const MOUSE_KM: f64 = 3.0;
pub const HAMSTER_KM: f64 = 5.0;
pub const RAT_KM: f64 = 6.0;
pub const GUINEA_PIG_KM: f64 = 8.0;

// ============================================================================
// IP Volume Thresholds
// ============================================================================

/// Volumes strictly above this are flagged as too high
pub const MAX_IP_VOLUME_UL: f64 = 500.0;
/// Volumes strictly below this are flagged as too small to draw accurately
pub const MIN_MEASURABLE_VOLUME_UL: f64 = 10.0;

// ============================================================================
// Dose Ladder
// ============================================================================

pub const LOW_DOSE_MULTIPLIER: f64 = 0.5;
pub const MID_DOSE_MULTIPLIER: f64 = 1.0;
pub const HIGH_DOSE_MULTIPLIER: f64 = 2.0;

/// Advisory classification of an injection volume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeSafety {
    /// Within the drawable IP range
    Ok,
    /// Above the IP volume ceiling
    High,
    /// Below what a syringe can measure reliably
    Low,
}

impl VolumeSafety {
    pub fn display_name(&self) -> &'static str {
        match self {
            VolumeSafety::Ok => "in range",
            VolumeSafety::High => "too high",
            VolumeSafety::Low => "too small",
        }
    }

    pub fn is_flagged(&self) -> bool {
        !matches!(self, VolumeSafety::Ok)
    }

    /// Suggested remedy shown next to a flagged row
    pub fn advice(&self) -> Option<&'static str> {
        match self {
            VolumeSafety::Ok => None,
            VolumeSafety::High => Some("Volume exceeds 500 µL; use a more concentrated stock"),
            VolumeSafety::Low => Some("Volume below 10 µL; dilute the stock for accurate dosing"),
        }
    }
}

/// Row of the fixed Low/Mid/High dose ladder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DoseLevel {
    Low,
    Mid,
    High,
}

impl DoseLevel {
    /// Presentation order
    pub const ALL: [DoseLevel; 3] = [DoseLevel::Low, DoseLevel::Mid, DoseLevel::High];

    pub fn multiplier(&self) -> f64 {
        match self {
            DoseLevel::Low => LOW_DOSE_MULTIPLIER,
            DoseLevel::Mid => MID_DOSE_MULTIPLIER,
            DoseLevel::High => HIGH_DOSE_MULTIPLIER,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DoseLevel::Low => "Low (0.5x)",
            DoseLevel::Mid => "Mid (1x)",
            DoseLevel::High => "High (2x)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_order_and_multipliers() {
        let multipliers: Vec<f64> = DoseLevel::ALL.iter().map(|l| l.multiplier()).collect();
        assert_eq!(multipliers, vec![0.5, 1.0, 2.0]);
    }

    #[test]
    fn test_safety_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&VolumeSafety::High).unwrap(), "\"high\"");
        assert_eq!(serde_json::to_string(&DoseLevel::Mid).unwrap(), "\"mid\"");
    }

    #[test]
    fn test_safety_flags() {
        assert!(!VolumeSafety::Ok.is_flagged());
        assert!(VolumeSafety::High.is_flagged());
        assert!(VolumeSafety::Low.is_flagged());
        assert_eq!(VolumeSafety::Ok.advice(), None);
        assert_eq!(VolumeSafety::Low.display_name(), "too small");
    }
}

//! Dose conversion functions
//!
//! Pure arithmetic for weight-based dosing, stock dilution, and BSA scaling.
//! Inputs are assumed pre-validated; the only guards here keep degenerate
//! values (zero weight, zero concentration) from turning into NaN or infinity.

use super::units::{
    DoseLevel, VolumeSafety, G_PER_KG, MAX_IP_VOLUME_UL, MIN_MEASURABLE_VOLUME_UL, UL_PER_ML,
};
use serde::Serialize;

/// Amount of drug (mg or U) one animal needs at the given per-kg dose
///
/// Returns 0 for non-positive or non-finite weights.
pub fn mass_per_animal(dose_per_kg: f64, weight_grams: f64) -> f64 {
    if !(weight_grams > 0.0) || !weight_grams.is_finite() {
        return 0.0;
    }
    dose_per_kg * (weight_grams / G_PER_KG)
}

/// Injection volume in mL for `amount` drawn from a stock of `stock_conc_per_ml`
///
/// A zero concentration yields 0 rather than infinity.
pub fn volume_ml_from_stock(amount: f64, stock_conc_per_ml: f64) -> f64 {
    if stock_conc_per_ml == 0.0 {
        return 0.0;
    }
    amount / stock_conc_per_ml
}

/// Injection volume in µL; always exactly `volume_ml_from_stock * 1000`
pub fn volume_from_stock(amount: f64, stock_conc_per_ml: f64) -> f64 {
    volume_ml_from_stock(amount, stock_conc_per_ml) * UL_PER_ML
}

/// Convert a flat daily human dose to mg/kg for a reference body weight
///
/// Returns 0 for a non-positive reference weight.
pub fn human_mg_per_kg_from_daily(daily_dose_mg: f64, human_weight_kg: f64) -> f64 {
    if !(human_weight_kg > 0.0) {
        return 0.0;
    }
    daily_dose_mg / human_weight_kg
}

/// BSA-normalize a human per-kg dose to an animal per-kg dose
///
/// `animal = human * (human_km / species_km)`
pub fn scale_hed(human_mg_per_kg: f64, species_km: f64, human_km: f64) -> f64 {
    human_mg_per_kg * (human_km / species_km)
}

/// The fixed half / base / double ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoseLevels {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl DoseLevels {
    pub fn get(&self, level: DoseLevel) -> f64 {
        match level {
            DoseLevel::Low => self.low,
            DoseLevel::Mid => self.mid,
            DoseLevel::High => self.high,
        }
    }

    /// Levels in Low, Mid, High order
    pub fn iter(&self) -> impl Iterator<Item = (DoseLevel, f64)> + '_ {
        DoseLevel::ALL.into_iter().map(move |level| (level, self.get(level)))
    }
}

pub fn dose_levels(base: f64) -> DoseLevels {
    DoseLevels {
        low: base * DoseLevel::Low.multiplier(),
        mid: base * DoseLevel::Mid.multiplier(),
        high: base * DoseLevel::High.multiplier(),
    }
}

/// Classify an injection volume (µL) against the IP thresholds
///
/// Both boundaries are inclusive on the "ok" side.
pub fn classify_volume(volume_ul: f64) -> VolumeSafety {
    if volume_ul > MAX_IP_VOLUME_UL {
        VolumeSafety::High
    } else if volume_ul < MIN_MEASURABLE_VOLUME_UL {
        VolumeSafety::Low
    } else {
        VolumeSafety::Ok
    }
}

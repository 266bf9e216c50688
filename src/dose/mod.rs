//! Dose calculation module
//!
//! Handles unit conversion, BSA scaling, and injection-volume math.

pub mod math;
pub mod units;

pub use math::{
    classify_volume, dose_levels, human_mg_per_kg_from_daily, mass_per_animal, scale_hed,
    volume_from_stock, volume_ml_from_stock, DoseLevels,
};
pub use units::{DoseLevel, VolumeSafety};

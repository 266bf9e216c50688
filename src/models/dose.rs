//! Dose input/result models
//!
//! Transient values recomputed on every request; nothing here is stored.

use serde::Serialize;

use crate::dose::units::HUMAN_KM;
use crate::dose::{
    classify_volume, dose_levels, mass_per_animal, scale_hed, volume_from_stock,
    volume_ml_from_stock, DoseLevel, VolumeSafety,
};
use crate::models::drug::DrugProfile;
use crate::models::species::Species;

/// Inputs for a single weight-based injection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoseInput {
    pub weight_g: f64,
    /// mg/kg or U/kg
    pub dose_per_kg: f64,
    /// mg/mL or U/mL
    pub stock_concentration_per_ml: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DoseResult {
    /// mg or U per animal
    pub amount: f64,
    pub volume_ml: f64,
    pub volume_ul: f64,
    pub safety: VolumeSafety,
}

impl DoseInput {
    pub fn new(weight_g: f64, dose_per_kg: f64, stock_concentration_per_ml: f64) -> Self {
        Self {
            weight_g,
            dose_per_kg,
            stock_concentration_per_ml,
        }
    }

    pub fn compute(&self) -> DoseResult {
        let amount = mass_per_animal(self.dose_per_kg, self.weight_g);
        let volume_ml = volume_ml_from_stock(amount, self.stock_concentration_per_ml);
        let volume_ul = volume_from_stock(amount, self.stock_concentration_per_ml);
        DoseResult {
            amount,
            volume_ml,
            volume_ul,
            safety: classify_volume(volume_ul),
        }
    }
}

/// How the human dose is carried over to the animal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Scaling {
    /// FDA Km ratio for the species
    Bsa { species_km: f64, human_km: f64 },
    /// Caller-supplied BSA factor
    BsaOverride { factor: f64 },
    /// Unit-dosed agents: human per-kg dose times a multiplier, no BSA
    UnitMultiplier { multiplier: f64 },
}

impl Scaling {
    /// Pick the scaling for a drug/species pair
    pub fn for_drug(
        drug: &DrugProfile,
        species: Species,
        bsa_factor: Option<f64>,
        unit_multiplier: f64,
    ) -> Self {
        if !drug.dose_unit.is_bsa_scaled() {
            return Scaling::UnitMultiplier {
                multiplier: unit_multiplier,
            };
        }
        match bsa_factor {
            Some(factor) => Scaling::BsaOverride { factor },
            None => Scaling::Bsa {
                species_km: species.km_factor(),
                human_km: HUMAN_KM,
            },
        }
    }

    /// Effective human-to-animal multiplier
    pub fn factor(&self) -> f64 {
        match *self {
            Scaling::Bsa {
                species_km,
                human_km,
            } => human_km / species_km,
            Scaling::BsaOverride { factor } => factor,
            Scaling::UnitMultiplier { multiplier } => multiplier,
        }
    }

    pub fn apply(&self, human_dose_per_kg: f64) -> f64 {
        match *self {
            Scaling::Bsa {
                species_km,
                human_km,
            } => scale_hed(human_dose_per_kg, species_km, human_km),
            Scaling::BsaOverride { factor } => human_dose_per_kg * factor,
            Scaling::UnitMultiplier { multiplier } => human_dose_per_kg * multiplier,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DosingRow {
    pub level: DoseLevel,
    pub dose_per_kg: f64,
    #[serde(flatten)]
    pub result: DoseResult,
}

/// Low/Mid/High dosing table for one drug in one animal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DosingTable {
    pub drug: &'static DrugProfile,
    pub species: Species,
    pub weight_g: f64,
    pub stock_concentration_per_ml: f64,
    pub human_dose_per_kg: f64,
    pub scaling: Scaling,
    pub animal_dose_per_kg: f64,
    pub rows: Vec<DosingRow>,
}

impl DosingTable {
    /// Build the three-row table; rows are always Low, Mid, High
    pub fn build(
        drug: &'static DrugProfile,
        species: Species,
        human_dose_per_kg: f64,
        scaling: Scaling,
        weight_g: f64,
        stock_concentration_per_ml: f64,
    ) -> Self {
        let animal_dose_per_kg = scaling.apply(human_dose_per_kg);
        let rows = dose_levels(animal_dose_per_kg)
            .iter()
            .map(|(level, dose_per_kg)| DosingRow {
                level,
                dose_per_kg,
                result: DoseInput::new(weight_g, dose_per_kg, stock_concentration_per_ml)
                    .compute(),
            })
            .collect();

        Self {
            drug,
            species,
            weight_g,
            stock_concentration_per_ml,
            human_dose_per_kg,
            scaling,
            animal_dose_per_kg,
            rows,
        }
    }

    pub fn flagged_rows(&self) -> impl Iterator<Item = &DosingRow> {
        self.rows.iter().filter(|r| r.result.safety.is_flagged())
    }
}

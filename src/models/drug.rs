//! Drug registry
//!
//! Static metadata for the agents the translational calculator knows about.

use serde::Serialize;

use crate::dose::human_mg_per_kg_from_daily;
use crate::error::{CalcError, CalcResult};

/// Reference adult body weight used for flat daily doses
pub const REFERENCE_HUMAN_WEIGHT_KG: f64 = 70.0;

/// Per-kg unit a drug is dosed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DoseUnit {
    #[serde(rename = "mg/kg")]
    MgPerKg,
    #[serde(rename = "U/kg")]
    UnitsPerKg,
}

impl DoseUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoseUnit::MgPerKg => "mg/kg",
            DoseUnit::UnitsPerKg => "U/kg",
        }
    }

    /// Unit of the per-animal amount ("mg" or "U")
    pub fn amount_unit(&self) -> &'static str {
        match self {
            DoseUnit::MgPerKg => "mg",
            DoseUnit::UnitsPerKg => "U",
        }
    }

    /// Unit of the stock concentration ("mg/mL" or "U/mL")
    pub fn concentration_unit(&self) -> &'static str {
        match self {
            DoseUnit::MgPerKg => "mg/mL",
            DoseUnit::UnitsPerKg => "U/mL",
        }
    }

    /// Mass-dosed agents are BSA scaled; unit-dosed agents use a multiplier
    pub fn is_bsa_scaled(&self) -> bool {
        matches!(self, DoseUnit::MgPerKg)
    }
}

/// Typical clinical dose, as published
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "form", rename_all = "snake_case")]
pub enum TypicalHumanDose {
    /// Already normalized per kg of body weight
    PerKg { dose_per_kg: f64 },
    /// Flat daily dose for a reference adult
    Daily { dose_mg: f64, reference_weight_kg: f64 },
}

impl TypicalHumanDose {
    pub fn per_kg(&self) -> f64 {
        match *self {
            TypicalHumanDose::PerKg { dose_per_kg } => dose_per_kg,
            TypicalHumanDose::Daily {
                dose_mg,
                reference_weight_kg,
            } => human_mg_per_kg_from_daily(dose_mg, reference_weight_kg),
        }
    }

    /// Same dose re-normalized to a different human body weight
    ///
    /// Only flat daily doses depend on the weight.
    pub fn per_kg_for_weight(&self, human_weight_kg: f64) -> f64 {
        match *self {
            TypicalHumanDose::PerKg { dose_per_kg } => dose_per_kg,
            TypicalHumanDose::Daily { dose_mg, .. } => {
                human_mg_per_kg_from_daily(dose_mg, human_weight_kg)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrugProfile {
    pub key: &'static str,
    pub label: &'static str,
    pub drug_class: &'static str,
    pub dose_unit: DoseUnit,
    pub typical_human_dose: TypicalHumanDose,
}

impl DrugProfile {
    /// Clinical default dose per kg of human body weight
    pub fn human_dose_per_kg(&self) -> f64 {
        self.typical_human_dose.per_kg()
    }
}

const fn daily(dose_mg: f64) -> TypicalHumanDose {
    TypicalHumanDose::Daily {
        dose_mg,
        reference_weight_kg: REFERENCE_HUMAN_WEIGHT_KG,
    }
}

static DRUGS: &[DrugProfile] = &[
    DrugProfile {
        key: "metformin",
        label: "Metformin",
        drug_class: "Biguanide",
        dose_unit: DoseUnit::MgPerKg,
        typical_human_dose: daily(2000.0),
    },
    DrugProfile {
        key: "empagliflozin",
        label: "Empagliflozin",
        drug_class: "SGLT2 inhibitor",
        dose_unit: DoseUnit::MgPerKg,
        typical_human_dose: daily(10.0),
    },
    DrugProfile {
        key: "dapagliflozin",
        label: "Dapagliflozin",
        drug_class: "SGLT2 inhibitor",
        dose_unit: DoseUnit::MgPerKg,
        typical_human_dose: daily(10.0),
    },
    DrugProfile {
        key: "sitagliptin",
        label: "Sitagliptin",
        drug_class: "DPP-4 inhibitor",
        dose_unit: DoseUnit::MgPerKg,
        typical_human_dose: daily(100.0),
    },
    DrugProfile {
        key: "pioglitazone",
        label: "Pioglitazone",
        drug_class: "Thiazolidinedione",
        dose_unit: DoseUnit::MgPerKg,
        typical_human_dose: daily(30.0),
    },
    DrugProfile {
        key: "glibenclamide",
        label: "Glibenclamide (Glyburide)",
        drug_class: "Sulfonylurea",
        dose_unit: DoseUnit::MgPerKg,
        typical_human_dose: daily(5.0),
    },
    DrugProfile {
        key: "liraglutide",
        label: "Liraglutide",
        drug_class: "GLP-1 receptor agonist",
        dose_unit: DoseUnit::MgPerKg,
        typical_human_dose: daily(1.8),
    },
    DrugProfile {
        key: "exenatide",
        label: "Exenatide",
        drug_class: "GLP-1 receptor agonist",
        dose_unit: DoseUnit::MgPerKg,
        typical_human_dose: daily(0.02),
    },
    DrugProfile {
        key: "rapamycin",
        label: "Rapamycin (Sirolimus)",
        drug_class: "mTOR inhibitor",
        dose_unit: DoseUnit::MgPerKg,
        typical_human_dose: daily(2.0),
    },
    DrugProfile {
        key: "dexamethasone",
        label: "Dexamethasone",
        drug_class: "Corticosteroid",
        dose_unit: DoseUnit::MgPerKg,
        typical_human_dose: TypicalHumanDose::PerKg { dose_per_kg: 0.15 },
    },
    DrugProfile {
        key: "insulin_regular",
        label: "Insulin (Regular)",
        drug_class: "Insulin",
        dose_unit: DoseUnit::UnitsPerKg,
        typical_human_dose: TypicalHumanDose::PerKg { dose_per_kg: 0.1 },
    },
];

/// All registered drugs, in declaration order
pub fn list_drugs() -> &'static [DrugProfile] {
    DRUGS
}

/// Look up a drug by key (case-insensitive, surrounding whitespace ignored)
pub fn find_drug(key: &str) -> CalcResult<&'static DrugProfile> {
    let needle = key.trim();
    DRUGS
        .iter()
        .find(|d| d.key.eq_ignore_ascii_case(needle))
        .ok_or_else(|| CalcError::DrugNotFound(needle.to_string()))
}

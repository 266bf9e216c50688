//! Registry MCP Tools
//!
//! Read-only views over the drug registry and species table.

use serde::Serialize;

use crate::dose::units::HUMAN_KM;
use crate::error::CalcResult;
use crate::models::{find_drug, list_drugs as registry, DrugProfile, Species, TypicalHumanDose};

/// Drug summary for listing
#[derive(Debug, Serialize)]
pub struct DrugSummary {
    pub key: String,
    pub label: String,
    pub drug_class: String,
    pub dose_unit: String,
    pub human_dose_per_kg: f64,
}

/// Full drug detail
#[derive(Debug, Serialize)]
pub struct DrugDetail {
    pub key: String,
    pub label: String,
    pub drug_class: String,
    pub dose_unit: String,
    pub typical_human_dose: TypicalHumanDose,
    pub typical_human_dose_display: String,
    pub human_dose_per_kg: f64,
    pub bsa_scaled: bool,
}

impl From<&DrugProfile> for DrugSummary {
    fn from(drug: &DrugProfile) -> Self {
        Self {
            key: drug.key.to_string(),
            label: drug.label.to_string(),
            drug_class: drug.drug_class.to_string(),
            dose_unit: drug.dose_unit.as_str().to_string(),
            human_dose_per_kg: drug.human_dose_per_kg(),
        }
    }
}

impl From<&DrugProfile> for DrugDetail {
    fn from(drug: &DrugProfile) -> Self {
        let typical_human_dose_display = match drug.typical_human_dose {
            TypicalHumanDose::PerKg { dose_per_kg } => {
                format!("{} {}", dose_per_kg, drug.dose_unit.as_str())
            }
            TypicalHumanDose::Daily {
                dose_mg,
                reference_weight_kg,
            } => format!("{} mg/day for a {} kg adult", dose_mg, reference_weight_kg),
        };
        Self {
            key: drug.key.to_string(),
            label: drug.label.to_string(),
            drug_class: drug.drug_class.to_string(),
            dose_unit: drug.dose_unit.as_str().to_string(),
            typical_human_dose: drug.typical_human_dose,
            typical_human_dose_display,
            human_dose_per_kg: drug.human_dose_per_kg(),
            bsa_scaled: drug.dose_unit.is_bsa_scaled(),
        }
    }
}

/// Response for list_drugs
#[derive(Debug, Serialize)]
pub struct ListDrugsResponse {
    pub drugs: Vec<DrugSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct SpeciesSummary {
    pub key: String,
    pub name: String,
    pub km_factor: f64,
    pub km_ratio: f64,
    pub typical_weight_min_g: f64,
    pub typical_weight_max_g: f64,
}

/// Response for list_species
#[derive(Debug, Serialize)]
pub struct ListSpeciesResponse {
    pub species: Vec<SpeciesSummary>,
    pub human_km: f64,
}

/// List drugs, optionally filtered by a case-insensitive match on label or class
pub fn list_drugs(query: Option<&str>) -> ListDrugsResponse {
    let needle = query.map(|q| q.trim().to_lowercase()).filter(|q| !q.is_empty());
    let drugs: Vec<DrugSummary> = registry()
        .iter()
        .filter(|d| match &needle {
            Some(q) => {
                d.key.contains(q.as_str())
                    || d.label.to_lowercase().contains(q.as_str())
                    || d.drug_class.to_lowercase().contains(q.as_str())
            }
            None => true,
        })
        .map(DrugSummary::from)
        .collect();
    let total = drugs.len();
    ListDrugsResponse { drugs, total }
}

/// Get a drug by key
pub fn get_drug(key: &str) -> CalcResult<DrugDetail> {
    find_drug(key).map(DrugDetail::from)
}

pub fn list_species() -> ListSpeciesResponse {
    let species = Species::ALL
        .iter()
        .map(|s| {
            let (min, max) = s.typical_weight_range_g();
            SpeciesSummary {
                key: s.as_str().to_string(),
                name: s.display_name().to_string(),
                km_factor: s.km_factor(),
                km_ratio: s.km_ratio(),
                typical_weight_min_g: min,
                typical_weight_max_g: max,
            }
        })
        .collect();
    ListSpeciesResponse {
        species,
        human_km: HUMAN_KM,
    }
}

//! Translational (human to animal) dose calculator
//!
//! Resolves a drug's clinical dose, carries it to the animal through BSA
//! scaling (or the unit-dose multiplier), and lays out the Low/Mid/High table.

use serde::Serialize;

use super::injection::format_volume;
use super::validation::{require_non_negative, require_positive, weight_warning};
use crate::dose::{DoseLevel, VolumeSafety};
use crate::error::CalcResult;
use crate::models::{find_drug, DosingTable, Scaling, Species, TypicalHumanDose};

/// Unit-dose multipliers outside this range are unusual enough to mention
const USUAL_UNIT_MULTIPLIER_RANGE: (f64, f64) = (1.0, 10.0);

/// Everything needed to build a dosing table
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationalRequest {
    pub drug_key: String,
    pub species: Species,
    pub weight_g: f64,
    pub stock_concentration_per_ml: f64,
    /// Replaces the registry's clinical default
    pub human_dose_per_kg: Option<f64>,
    /// Re-normalizes a flat daily dose to this body weight; per-kg doses ignore it
    pub human_weight_kg: Option<f64>,
    /// Replaces the species Km ratio for mass-dosed agents
    pub bsa_factor: Option<f64>,
    /// Applied to unit-dosed agents instead of BSA scaling
    pub unit_multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HumanDoseSource {
    ClinicalDefault,
    WeightAdjusted,
    Override,
}

/// One row of the table as returned to callers
#[derive(Debug, Serialize)]
pub struct DosingRowSummary {
    pub level: DoseLevel,
    pub level_display: String,
    pub dose_per_kg: f64,
    pub amount: f64,
    pub volume_ml: f64,
    pub volume_ul: f64,
    pub volume_display: String,
    pub safety: VolumeSafety,
    pub safety_display: String,
    pub advice: Option<String>,
}

/// Response for calculate_translational_dose
#[derive(Debug, Serialize)]
pub struct TranslationalResponse {
    pub drug_key: String,
    pub drug_label: String,
    pub drug_class: String,
    pub dose_unit: String,
    pub amount_unit: String,
    pub concentration_unit: String,
    pub species: String,
    pub species_km: f64,
    pub weight_g: f64,
    pub stock_concentration_per_ml: f64,
    pub human_dose_per_kg: f64,
    pub human_dose_source: HumanDoseSource,
    pub scaling: Scaling,
    pub scaling_factor: f64,
    pub animal_dose_per_kg: f64,
    pub rows: Vec<DosingRowSummary>,
    pub warnings: Vec<String>,
}

/// Response for export_dosing_table_markdown
#[derive(Debug, Serialize)]
pub struct ExportDosingTableResponse {
    pub markdown: String,
    pub flagged_rows: usize,
    pub generated_at: String,
}

/// Validate the request and build the table
///
/// An unknown drug fails the whole request; no partial table is produced.
pub fn build_table(req: &TranslationalRequest) -> CalcResult<(DosingTable, HumanDoseSource)> {
    let drug = find_drug(&req.drug_key)?;
    require_positive("weight_g", req.weight_g)?;
    require_non_negative("stock_concentration", req.stock_concentration_per_ml)?;
    require_non_negative("unit_multiplier", req.unit_multiplier)?;
    // Unit-dosed agents never read bsa_factor
    if let Some(factor) = req.bsa_factor.filter(|_| drug.dose_unit.is_bsa_scaled()) {
        require_positive("bsa_factor", factor)?;
    }
    let human_weight_kg = req
        .human_weight_kg
        .map(|w| require_positive("human_weight_kg", w))
        .transpose()?;

    let is_daily = matches!(drug.typical_human_dose, TypicalHumanDose::Daily { .. });
    let (human_dose_per_kg, source) = match (req.human_dose_per_kg, human_weight_kg) {
        (Some(dose), _) => (
            require_positive("human_dose_per_kg", dose)?,
            HumanDoseSource::Override,
        ),
        (None, Some(weight)) if is_daily => (
            drug.typical_human_dose.per_kg_for_weight(weight),
            HumanDoseSource::WeightAdjusted,
        ),
        (None, _) => (drug.human_dose_per_kg(), HumanDoseSource::ClinicalDefault),
    };

    let scaling = Scaling::for_drug(drug, req.species, req.bsa_factor, req.unit_multiplier);
    let table = DosingTable::build(
        drug,
        req.species,
        human_dose_per_kg,
        scaling,
        req.weight_g,
        req.stock_concentration_per_ml,
    );

    tracing::debug!(
        drug = drug.key,
        species = req.species.as_str(),
        human_dose_per_kg,
        animal_dose_per_kg = table.animal_dose_per_kg,
        "Built dosing table"
    );

    Ok((table, source))
}

fn collect_warnings(
    req: &TranslationalRequest,
    table: &DosingTable,
    source: HumanDoseSource,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if req.stock_concentration_per_ml == 0.0 {
        warnings.push("Stock concentration is 0; no injection volume can be drawn".to_string());
    } else {
        for row in table.flagged_rows() {
            tracing::warn!(
                drug = table.drug.key,
                level = row.level.display_name(),
                volume_ul = row.result.volume_ul,
                "Dosing row {}",
                row.result.safety.display_name()
            );
            warnings.push(format!(
                "{}: {:.1} µL is {}",
                row.level.display_name(),
                row.result.volume_ul,
                row.result.safety.display_name()
            ));
        }
    }

    if !table.drug.dose_unit.is_bsa_scaled() {
        if req.bsa_factor.is_some() {
            warnings.push(format!(
                "bsa_factor ignored: {} is dosed in {}",
                table.drug.label,
                table.drug.dose_unit.as_str()
            ));
        }
        let (lo, hi) = USUAL_UNIT_MULTIPLIER_RANGE;
        if req.unit_multiplier < lo || req.unit_multiplier > hi {
            warnings.push(format!(
                "unit_multiplier {} is outside the usual {}x-{}x range",
                req.unit_multiplier, lo, hi
            ));
        }
    }

    if req.human_weight_kg.is_some() {
        match source {
            HumanDoseSource::WeightAdjusted => {}
            HumanDoseSource::Override => warnings.push(
                "human_weight_kg ignored: human_dose_per_kg was given explicitly".to_string(),
            ),
            HumanDoseSource::ClinicalDefault => warnings.push(format!(
                "human_weight_kg ignored: {} is already dosed per kg",
                table.drug.label
            )),
        }
    }

    if let Some(w) = weight_warning(req.species, req.weight_g) {
        warnings.push(w);
    }

    warnings
}

/// Calculate the Low/Mid/High dosing table for a registered drug
pub fn calculate_translational_dose(
    req: &TranslationalRequest,
) -> Result<TranslationalResponse, String> {
    let (table, source) = build_table(req).map_err(|e| e.to_string())?;
    let warnings = collect_warnings(req, &table, source);

    let rows = table
        .rows
        .iter()
        .map(|row| DosingRowSummary {
            level: row.level,
            level_display: row.level.display_name().to_string(),
            dose_per_kg: row.dose_per_kg,
            amount: row.result.amount,
            volume_ml: row.result.volume_ml,
            volume_ul: row.result.volume_ul,
            volume_display: format_volume(row.result.volume_ul, row.result.volume_ml),
            safety: row.result.safety,
            safety_display: row.result.safety.display_name().to_string(),
            advice: row.result.safety.advice().map(str::to_string),
        })
        .collect();

    Ok(TranslationalResponse {
        drug_key: table.drug.key.to_string(),
        drug_label: table.drug.label.to_string(),
        drug_class: table.drug.drug_class.to_string(),
        dose_unit: table.drug.dose_unit.as_str().to_string(),
        amount_unit: table.drug.dose_unit.amount_unit().to_string(),
        concentration_unit: table.drug.dose_unit.concentration_unit().to_string(),
        species: table.species.as_str().to_string(),
        species_km: table.species.km_factor(),
        weight_g: table.weight_g,
        stock_concentration_per_ml: table.stock_concentration_per_ml,
        human_dose_per_kg: table.human_dose_per_kg,
        human_dose_source: source,
        scaling: table.scaling,
        scaling_factor: table.scaling.factor(),
        animal_dose_per_kg: table.animal_dose_per_kg,
        rows,
        warnings,
    })
}

/// Render a dosing table as Markdown
pub fn render_markdown(table: &DosingTable, warnings: &[String], generated_at: &str) -> String {
    let unit = table.drug.dose_unit;
    let mut markdown = String::new();

    markdown.push_str(&format!("# Dosing Table: {}\n\n", table.drug.label));
    markdown.push_str(&format!("**Class:** {}\n\n", table.drug.drug_class));
    markdown.push_str(&format!(
        "**Species:** {} ({} g)\n\n",
        table.species.display_name(),
        table.weight_g
    ));
    markdown.push_str(&format!(
        "**Stock:** {} {}\n\n",
        table.stock_concentration_per_ml,
        unit.concentration_unit()
    ));
    markdown.push_str(&format!(
        "**Human dose:** {:.4} {}\n\n",
        table.human_dose_per_kg,
        unit.as_str()
    ));
    let method = match table.scaling {
        Scaling::Bsa { .. } => "BSA (Km ratio)",
        Scaling::BsaOverride { .. } => "BSA (custom factor)",
        Scaling::UnitMultiplier { .. } => "unit-dose multiplier",
    };
    markdown.push_str(&format!(
        "**Scaling:** {} x{:.3}\n\n",
        method,
        table.scaling.factor()
    ));
    markdown.push_str(&format!("**Generated:** {}\n\n", generated_at));
    markdown.push_str("---\n\n");

    markdown.push_str(&format!(
        "| Level | Dose ({}) | Amount ({}) | Volume (µL) | Volume (mL) | Status |\n",
        unit.as_str(),
        unit.amount_unit()
    ));
    markdown.push_str("|-------|------|--------|-------------|-------------|--------|\n");
    for row in &table.rows {
        markdown.push_str(&format!(
            "| {} | {:.3} | {:.4} | {:.1} | {:.3} | {} |\n",
            row.level.display_name(),
            row.dose_per_kg,
            row.result.amount,
            row.result.volume_ul,
            row.result.volume_ml,
            row.result.safety.display_name()
        ));
    }

    if !warnings.is_empty() {
        markdown.push_str("\n## Warnings\n\n");
        for w in warnings {
            markdown.push_str(&format!("- {}\n", w));
        }
    }

    markdown
}

/// Export a dosing table as Markdown for lab notebooks
pub fn export_dosing_table_markdown(
    req: &TranslationalRequest,
) -> Result<ExportDosingTableResponse, String> {
    let (table, source) = build_table(req).map_err(|e| e.to_string())?;
    let warnings = collect_warnings(req, &table, source);
    let generated_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    Ok(ExportDosingTableResponse {
        markdown: render_markdown(&table, &warnings, &generated_at),
        flagged_rows: table.flagged_rows().count(),
        generated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(drug_key: &str) -> TranslationalRequest {
        TranslationalRequest {
            drug_key: drug_key.to_string(),
            species: Species::Mouse,
            weight_g: 25.0,
            stock_concentration_per_ml: 0.5,
            human_dose_per_kg: None,
            human_weight_kg: None,
            bsa_factor: None,
            unit_multiplier: 1.0,
        }
    }

    #[test]
    fn test_clinical_default_scaled_to_mouse() {
        let r = calculate_translational_dose(&request("pioglitazone")).unwrap();
        assert_eq!(r.human_dose_source, HumanDoseSource::ClinicalDefault);
        assert!((r.human_dose_per_kg - 0.428571).abs() < 1e-5);
        assert!((r.animal_dose_per_kg - 5.2857).abs() < 1e-3);
        assert_eq!(r.species_km, 3.0);
        assert_eq!(r.rows.len(), 3);
        assert_eq!(r.rows[0].level, DoseLevel::Low);
        assert_eq!(r.rows[2].level, DoseLevel::High);
        assert_eq!(r.rows[2].safety, VolumeSafety::High);
        assert!(r.rows[2].advice.is_some());
        assert_eq!(r.warnings.len(), 1);
    }

    #[test]
    fn test_unknown_drug_fails_whole_request() {
        let err = calculate_translational_dose(&request("nope")).unwrap_err();
        assert!(err.contains("Drug not found"));
    }

    #[test]
    fn test_human_dose_override() {
        let mut req = request("metformin");
        req.human_dose_per_kg = Some(1.0);
        let r = calculate_translational_dose(&req).unwrap();
        assert_eq!(r.human_dose_source, HumanDoseSource::Override);
        assert!((r.animal_dose_per_kg - 37.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_human_weight_adjusts_daily_dose() {
        let mut req = request("pioglitazone");
        req.human_weight_kg = Some(60.0);
        let r = calculate_translational_dose(&req).unwrap();
        assert_eq!(r.human_dose_source, HumanDoseSource::WeightAdjusted);
        assert!((r.human_dose_per_kg - 0.5).abs() < 1e-12);
        assert!(!r.warnings.iter().any(|w| w.contains("human_weight_kg ignored")));
    }

    #[test]
    fn test_human_weight_ignored_for_per_kg_drug() {
        let mut req = request("dexamethasone");
        req.human_weight_kg = Some(90.0);
        let r = calculate_translational_dose(&req).unwrap();
        assert_eq!(r.human_dose_source, HumanDoseSource::ClinicalDefault);
        assert_eq!(r.human_dose_per_kg, 0.15);
        assert!(r
            .warnings
            .iter()
            .any(|w| w.contains("human_weight_kg ignored") && w.contains("per kg")));
    }

    #[test]
    fn test_human_weight_ignored_when_dose_overridden() {
        let mut req = request("pioglitazone");
        req.human_dose_per_kg = Some(1.0);
        req.human_weight_kg = Some(60.0);
        let r = calculate_translational_dose(&req).unwrap();
        assert_eq!(r.human_dose_source, HumanDoseSource::Override);
        assert_eq!(r.human_dose_per_kg, 1.0);
        assert!(r
            .warnings
            .iter()
            .any(|w| w.contains("human_weight_kg ignored") && w.contains("explicitly")));
    }

    #[test]
    fn test_rat_uses_rat_km() {
        let mut req = request("pioglitazone");
        req.species = Species::Rat;
        req.weight_g = 250.0;
        let r = calculate_translational_dose(&req).unwrap();
        assert!((r.scaling_factor - 37.0 / 6.0).abs() < 1e-12);
        assert!(!r.warnings.iter().any(|w| w.contains("typical")));
    }

    #[test]
    fn test_insulin_multiplier() {
        let mut req = request("insulin_regular");
        req.unit_multiplier = 7.5;
        req.stock_concentration_per_ml = 0.1;
        let r = calculate_translational_dose(&req).unwrap();
        // 0.1 U/kg * 7.5 = 0.75 U/kg; 0.75 * 0.025 kg / 0.1 U/mL = 187.5 µL
        assert!((r.animal_dose_per_kg - 0.75).abs() < 1e-12);
        assert!((r.rows[1].volume_ul - 187.5).abs() < 1e-9);
        assert_eq!(r.amount_unit, "U");
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn test_insulin_warns_on_ignored_bsa_and_unusual_multiplier() {
        let mut req = request("insulin_regular");
        req.bsa_factor = Some(12.0);
        req.unit_multiplier = 20.0;
        req.stock_concentration_per_ml = 1.0;
        let r = calculate_translational_dose(&req).unwrap();
        assert!(r.warnings.iter().any(|w| w.contains("bsa_factor ignored")));
        assert!(r.warnings.iter().any(|w| w.contains("unit_multiplier 20")));
    }

    #[test]
    fn test_unused_bsa_factor_is_not_validated() {
        let mut req = request("insulin_regular");
        req.bsa_factor = Some(0.0);
        req.stock_concentration_per_ml = 0.1;
        let r = calculate_translational_dose(&req).unwrap();
        assert!((r.animal_dose_per_kg - 0.1).abs() < 1e-12);
        assert!(r.warnings.iter().any(|w| w.contains("bsa_factor ignored")));
    }

    #[test]
    fn test_zero_stock_reports_single_warning() {
        let mut req = request("metformin");
        req.stock_concentration_per_ml = 0.0;
        let r = calculate_translational_dose(&req).unwrap();
        assert!(r.rows.iter().all(|row| row.volume_ul == 0.0));
        assert_eq!(r.warnings.len(), 1);
    }

    #[test]
    fn test_rejects_invalid_overrides() {
        let mut req = request("metformin");
        req.bsa_factor = Some(0.0);
        assert!(calculate_translational_dose(&req).is_err());

        let mut req = request("metformin");
        req.human_weight_kg = Some(-70.0);
        assert!(calculate_translational_dose(&req).is_err());

        let mut req = request("metformin");
        req.weight_g = 0.0;
        assert!(calculate_translational_dose(&req).is_err());
    }

    #[test]
    fn test_markdown_export() {
        let export = export_dosing_table_markdown(&request("pioglitazone")).unwrap();
        assert!(export.markdown.starts_with("# Dosing Table: Pioglitazone"));
        assert!(export.markdown.contains("| Low (0.5x) |"));
        assert!(export.markdown.contains("| High (2x) |"));
        assert!(export.markdown.contains("## Warnings"));
        assert_eq!(export.flagged_rows, 1);
    }
}

//! Simple IP-injection calculator
//!
//! Weight, target per-kg dose and stock concentration in; injection volume out.

use serde::Serialize;

use super::validation::{require_non_negative, require_positive, weight_warning};
use crate::dose::VolumeSafety;
use crate::error::CalcResult;
use crate::models::{DoseInput, Species};

/// Response for calculate_ip_injection
#[derive(Debug, Serialize)]
pub struct InjectionResponse {
    pub species: String,
    pub weight_g: f64,
    pub dose_mg_per_kg: f64,
    pub stock_concentration_mg_per_ml: f64,
    pub amount_mg: f64,
    pub volume_ml: f64,
    pub volume_ul: f64,
    pub safety: VolumeSafety,
    pub safety_display: String,
    pub volume_display: String,
    pub warnings: Vec<String>,
}

/// Format a volume as "250.0 µL (0.250 mL)"
pub fn format_volume(volume_ul: f64, volume_ml: f64) -> String {
    format!("{:.1} µL ({:.3} mL)", volume_ul, volume_ml)
}

fn validated_input(
    weight_g: f64,
    dose_per_kg: f64,
    stock_concentration_per_ml: f64,
) -> CalcResult<DoseInput> {
    Ok(DoseInput::new(
        require_positive("weight_g", weight_g)?,
        require_positive("dose_per_kg", dose_per_kg)?,
        require_non_negative("stock_concentration", stock_concentration_per_ml)?,
    ))
}

/// Calculate the injection volume for a single animal
pub fn calculate_ip_injection(
    species: Species,
    weight_g: f64,
    dose_mg_per_kg: f64,
    stock_concentration_mg_per_ml: f64,
) -> Result<InjectionResponse, String> {
    let input = validated_input(weight_g, dose_mg_per_kg, stock_concentration_mg_per_ml)
        .map_err(|e| e.to_string())?;

    let result = input.compute();
    tracing::debug!(
        weight_g,
        dose_mg_per_kg,
        stock_concentration_mg_per_ml,
        volume_ul = result.volume_ul,
        "Computed IP injection"
    );

    let mut warnings = Vec::new();
    if input.stock_concentration_per_ml == 0.0 {
        warnings.push("Stock concentration is 0; no injection volume can be drawn".to_string());
    } else if let Some(advice) = result.safety.advice() {
        tracing::warn!(
            volume_ul = result.volume_ul,
            "Injection volume {}",
            result.safety.display_name()
        );
        warnings.push(advice.to_string());
    }
    if let Some(w) = weight_warning(species, weight_g) {
        warnings.push(w);
    }

    Ok(InjectionResponse {
        species: species.as_str().to_string(),
        weight_g: input.weight_g,
        dose_mg_per_kg: input.dose_per_kg,
        stock_concentration_mg_per_ml: input.stock_concentration_per_ml,
        amount_mg: result.amount,
        volume_ml: result.volume_ml,
        volume_ul: result.volume_ul,
        safety: result.safety,
        safety_display: result.safety.display_name().to_string(),
        volume_display: format_volume(result.volume_ul, result.volume_ml),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_mouse_injection() {
        let r = calculate_ip_injection(Species::Mouse, 25.0, 10.0, 1.0).unwrap();
        assert!((r.amount_mg - 0.25).abs() < 1e-12);
        assert!((r.volume_ul - 250.0).abs() < 1e-9);
        assert_eq!(r.safety, VolumeSafety::Ok);
        assert_eq!(r.volume_display, "250.0 µL (0.250 mL)");
        assert!(r.warnings.is_empty());
    }

    #[test]
    fn test_dilute_stock_flags_high() {
        let r = calculate_ip_injection(Species::Mouse, 25.0, 10.0, 0.01).unwrap();
        assert!((r.volume_ul - 25000.0).abs() < 1e-6);
        assert_eq!(r.safety, VolumeSafety::High);
        assert_eq!(r.safety_display, "too high");
        assert_eq!(r.warnings.len(), 1);
    }

    #[test]
    fn test_zero_stock_is_not_an_error() {
        let r = calculate_ip_injection(Species::Mouse, 25.0, 10.0, 0.0).unwrap();
        assert_eq!(r.volume_ul, 0.0);
        assert!(r.warnings[0].contains("Stock concentration is 0"));
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(calculate_ip_injection(Species::Mouse, 0.0, 10.0, 1.0).is_err());
        assert!(calculate_ip_injection(Species::Mouse, 25.0, -1.0, 1.0).is_err());
        assert!(calculate_ip_injection(Species::Mouse, 25.0, 10.0, -1.0).is_err());
        let err = calculate_ip_injection(Species::Mouse, f64::NAN, 10.0, 1.0).unwrap_err();
        assert!(err.contains("weight_g"));
    }

    #[test]
    fn test_atypical_weight_warns() {
        let r = calculate_ip_injection(Species::Mouse, 300.0, 10.0, 10.0).unwrap();
        assert!(r.warnings.iter().any(|w| w.contains("typical mouse weight")));
    }
}

//! Input checks for tool parameters
//!
//! The dose math assumes clean inputs; these run before it is called.

use crate::error::{CalcError, CalcResult};
use crate::models::Species;

pub fn require_positive(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::InvalidInput(format!(
            "{} must be a finite number greater than 0 (got {})",
            field, value
        )));
    }
    Ok(value)
}

pub fn require_non_negative(field: &str, value: f64) -> CalcResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::InvalidInput(format!(
            "{} must be a finite number of at least 0 (got {})",
            field, value
        )));
    }
    Ok(value)
}

/// Resolve an optional species name, falling back to `default`
pub fn resolve_species(name: Option<&str>, default: Species) -> CalcResult<Species> {
    match name {
        None => Ok(default),
        Some(s) if s.trim().is_empty() => Ok(default),
        Some(s) => {
            Species::parse(s).ok_or_else(|| CalcError::UnknownSpecies(s.trim().to_string()))
        }
    }
}

/// Advisory note when a weight is outside the species' usual adult range
pub fn weight_warning(species: Species, weight_g: f64) -> Option<String> {
    if species.is_typical_weight(weight_g) {
        return None;
    }
    let (min, max) = species.typical_weight_range_g();
    Some(format!(
        "{} g is outside the typical {} weight range ({}-{} g)",
        weight_g,
        species.display_name().to_lowercase(),
        min,
        max
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert_eq!(require_positive("weight_g", 25.0), Ok(25.0));
        assert!(require_positive("weight_g", 0.0).is_err());
        assert!(require_positive("weight_g", -1.0).is_err());
        assert!(require_positive("weight_g", f64::NAN).is_err());
        assert!(require_positive("weight_g", f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert_eq!(require_non_negative("stock", 0.0), Ok(0.0));
        assert!(require_non_negative("stock", -0.01).is_err());
    }

    #[test]
    fn test_resolve_species() {
        assert_eq!(resolve_species(None, Species::Rat), Ok(Species::Rat));
        assert_eq!(resolve_species(Some(""), Species::Rat), Ok(Species::Rat));
        assert_eq!(resolve_species(Some("mouse"), Species::Rat), Ok(Species::Mouse));
        assert_eq!(
            resolve_species(Some("dog"), Species::Mouse),
            Err(CalcError::UnknownSpecies("dog".to_string()))
        );
    }

    #[test]
    fn test_weight_warning() {
        assert!(weight_warning(Species::Mouse, 25.0).is_none());
        let warning = weight_warning(Species::Mouse, 250.0).unwrap();
        assert!(warning.contains("mouse"));
    }
}

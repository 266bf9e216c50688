//! Runtime configuration
//!
//! Read once from the environment at startup.

use crate::models::Species;

pub const DEFAULT_SPECIES_ENV: &str = "DOSECALC_DEFAULT_SPECIES";
pub const UNIT_DOSE_MULTIPLIER_ENV: &str = "DOSECALC_UNIT_DOSE_MULTIPLIER";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Species used when a request doesn't name one
    pub default_species: Species,
    /// Multiplier for unit-dosed agents (insulin) when a request doesn't supply one
    pub unit_dose_multiplier: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_species: Species::Mouse,
            unit_dose_multiplier: 1.0,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unparseable values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_species = match lookup(DEFAULT_SPECIES_ENV) {
            Some(raw) => Species::parse(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    "Ignoring {}='{}': unknown species, using {}",
                    DEFAULT_SPECIES_ENV,
                    raw,
                    defaults.default_species.as_str()
                );
                defaults.default_species
            }),
            None => defaults.default_species,
        };

        let unit_dose_multiplier = match lookup(UNIT_DOSE_MULTIPLIER_ENV) {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => v,
                _ => {
                    tracing::warn!(
                        "Ignoring {}='{}': expected a non-negative number, using {}",
                        UNIT_DOSE_MULTIPLIER_ENV,
                        raw,
                        defaults.unit_dose_multiplier
                    );
                    defaults.unit_dose_multiplier
                }
            },
            None => defaults.unit_dose_multiplier,
        };

        Self {
            default_species,
            unit_dose_multiplier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(Config::from_lookup(|_| None), Config::default());
    }

    #[test]
    fn test_reads_values() {
        let config = Config::from_lookup(lookup_from(&[
            (DEFAULT_SPECIES_ENV, "rat"),
            (UNIT_DOSE_MULTIPLIER_ENV, "5"),
        ]));
        assert_eq!(config.default_species, Species::Rat);
        assert_eq!(config.unit_dose_multiplier, 5.0);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = Config::from_lookup(lookup_from(&[
            (DEFAULT_SPECIES_ENV, "ferret"),
            (UNIT_DOSE_MULTIPLIER_ENV, "-2"),
        ]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_zero_multiplier_accepted() {
        // Same lower bound the tools apply to a per-request multiplier
        let config = Config::from_lookup(lookup_from(&[(UNIT_DOSE_MULTIPLIER_ENV, "0")]));
        assert_eq!(config.unit_dose_multiplier, 0.0);

        let config = Config::from_lookup(lookup_from(&[(UNIT_DOSE_MULTIPLIER_ENV, "inf")]));
        assert_eq!(config.unit_dose_multiplier, 1.0);
    }
}

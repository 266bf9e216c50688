//! dosecalc Status Tool
//!
//! Provides runtime status information about the dosecalc service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::Config;
use crate::models::list_drugs;

/// Dosing instructions for AI assistants
pub const DOSING_INSTRUCTIONS: &str = r#"
# dosecalc Dosing Instructions

This guide explains how to compute rodent injection volumes with the dosecalc tools.

## Overview

There are two calculators:
1. **calculate_ip_injection** - you already know the animal dose in mg/kg
2. **calculate_translational_dose** - you start from a human clinical dose and need
   the equivalent animal dose (Low / Mid / High)

Every call recomputes from scratch. Nothing is stored between calls.

---

## Simple IP Injection

**Tool:** `calculate_ip_injection`

| Parameter | Unit | Notes |
|-----------|------|-------|
| weight_g | g | animal body weight, > 0 |
| dose_mg_per_kg | mg/kg | target dose, > 0 |
| stock_concentration_mg_per_ml | mg/mL | 0 is allowed and gives 0 volume |
| species | - | optional, only used for weight-range warnings |

**Formula:**
- amount (mg) = dose (mg/kg) x weight (g) / 1000
- volume (µL) = amount / concentration x 1000

**Example:** 25 g mouse, 10 mg/kg, 1 mg/mL stock → 0.25 mg, **250 µL**

---

## Translational (Human → Animal)

**Tool:** `calculate_translational_dose`

1. Call `list_drugs` to find the `drug_key`
2. Pick the species (default is the server's configured species, usually mouse)
3. Leave `human_dose_per_kg` empty to use the clinical default from the registry
4. Provide the animal weight and the stock concentration

### BSA Scaling

Mass-dosed drugs (mg/kg) are scaled with FDA Km factors:

**animal mg/kg = human mg/kg x (37 / species Km)**

| Species | Km | Factor |
|---------|----|--------|
| Mouse | 3 | 12.3 |
| Hamster | 5 | 7.4 |
| Rat | 6 | 6.2 |
| Guinea Pig | 8 | 4.6 |

Pass `bsa_factor` to replace the Km ratio with your own factor.

### Unit-Dosed Agents (Insulin)

Drugs dosed in U/kg are NOT BSA scaled. The animal dose is:

**animal U/kg = human U/kg x unit_multiplier**

Typical multipliers are 1x-10x; start at 1x (the default) unless your protocol says otherwise.

---

## Reading the Results

Each row has a `safety` flag:

| safety | Meaning | Action |
|--------|---------|--------|
| ok | 10-500 µL | inject as computed |
| high | > 500 µL | use a more concentrated stock |
| low | < 10 µL | dilute the stock |

Flags are advisory. The calculation is always returned in full.

Use `export_dosing_table_markdown` to get a table you can paste into a lab notebook.
"#;

/// Status information returned by dosecalc_status
#[derive(Debug, Serialize)]
pub struct DoseCalcStatus {
    /// Build information
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,

    /// Effective configuration
    pub default_species: &'static str,
    pub unit_dose_multiplier: f64,
    pub registered_drugs: usize,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    config: Config,
}

impl StatusTracker {
    pub fn new(config: Config) -> Self {
        Self {
            start_time: Instant::now(),
            config,
        }
    }

    pub fn get_status(&self) -> DoseCalcStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        DoseCalcStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            default_species: self.config.default_species.as_str(),
            unit_dose_multiplier: self.config.unit_dose_multiplier,
            registered_drugs: list_drugs().len(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reports_config() {
        let tracker = StatusTracker::new(Config::default());
        let status = tracker.get_status();
        assert_eq!(status.default_species, "mouse");
        assert_eq!(status.unit_dose_multiplier, 1.0);
        assert_eq!(status.registered_drugs, list_drugs().len());
        assert_eq!(status.process_id, std::process::id());
    }

    #[test]
    fn test_instructions_name_the_tools() {
        assert!(DOSING_INSTRUCTIONS.contains("calculate_ip_injection"));
        assert!(DOSING_INSTRUCTIONS.contains("calculate_translational_dose"));
    }
}

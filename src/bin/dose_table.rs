//! Utility to print a translational dosing table as Markdown
//!
//! Usage: dose_table <drug_key> <weight_g> <stock_concentration_per_ml> [species]

use dosecalc::config::Config;
use dosecalc::models::list_drugs;
use dosecalc::tools::translational::{export_dosing_table_markdown, TranslationalRequest};
use dosecalc::tools::validation::resolve_species;

fn usage() -> String {
    let keys: Vec<&str> = list_drugs().iter().map(|d| d.key).collect();
    format!(
        "Usage: dose_table <drug_key> <weight_g> <stock_concentration_per_ml> [species]\n\
         Drugs: {}",
        keys.join(", ")
    )
}

fn parse_number(name: &str, raw: &str) -> Result<f64, String> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| format!("{} must be a number (got '{}')", name, raw))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        eprintln!("{}", usage());
        std::process::exit(2);
    }

    let config = Config::from_env();
    let species = resolve_species(args.get(3).map(String::as_str), config.default_species)?;

    let req = TranslationalRequest {
        drug_key: args[0].clone(),
        species,
        weight_g: parse_number("weight_g", &args[1])?,
        stock_concentration_per_ml: parse_number("stock_concentration_per_ml", &args[2])?,
        human_dose_per_kg: None,
        human_weight_kg: None,
        bsa_factor: None,
        unit_multiplier: config.unit_dose_multiplier,
    };

    let export = export_dosing_table_markdown(&req)?;
    println!("{}", export.markdown);

    Ok(())
}

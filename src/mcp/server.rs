//! dosecalc MCP Server Implementation
//!
//! Implements the MCP server with all dosecalc tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::error::CalcError;
use crate::tools::drugs;
use crate::tools::injection;
use crate::tools::status::StatusTracker;
use crate::tools::translational::{self, TranslationalRequest};
use crate::tools::validation::resolve_species;

/// dosecalc MCP Service
#[derive(Clone)]
pub struct DoseCalcService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    config: Config,
    tool_router: ToolRouter<DoseCalcService>,
}

impl DoseCalcService {
    pub fn new(config: Config) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(config))),
            config,
            tool_router: Self::tool_router(),
        }
    }

    fn translational_request(
        &self,
        p: TranslationalDoseParams,
    ) -> Result<TranslationalRequest, McpError> {
        let species = resolve_species(p.species.as_deref(), self.config.default_species)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        Ok(TranslationalRequest {
            drug_key: p.drug_key,
            species,
            weight_g: p.weight_g,
            stock_concentration_per_ml: p.stock_concentration_per_ml,
            human_dose_per_kg: p.human_dose_per_kg,
            human_weight_kg: p.human_weight_kg,
            bsa_factor: p.bsa_factor,
            unit_multiplier: p.unit_multiplier.unwrap_or(self.config.unit_dose_multiplier),
        })
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Calculator Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct IpInjectionParams {
    /// Animal body weight in grams
    #[serde(default = "default_weight_g")]
    pub weight_g: f64,
    /// Target dose in mg/kg
    #[serde(default = "default_dose_mg_per_kg")]
    pub dose_mg_per_kg: f64,
    /// Stock concentration in mg/mL
    #[serde(default = "default_stock_concentration")]
    pub stock_concentration_mg_per_ml: f64,
    /// mouse, rat, hamster or guinea_pig (used for weight warnings only)
    pub species: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct TranslationalDoseParams {
    /// Registry key from list_drugs
    pub drug_key: String,
    /// mouse, rat, hamster or guinea_pig
    pub species: Option<String>,
    /// Animal body weight in grams
    #[serde(default = "default_weight_g")]
    pub weight_g: f64,
    /// Stock concentration in mg/mL (or U/mL for unit-dosed drugs)
    #[serde(default = "default_stock_concentration")]
    pub stock_concentration_per_ml: f64,
    /// Human dose per kg; omit to use the clinical default
    pub human_dose_per_kg: Option<f64>,
    /// Human body weight for flat daily doses; omit for the 70 kg reference
    pub human_weight_kg: Option<f64>,
    /// Custom BSA factor replacing the species Km ratio
    pub bsa_factor: Option<f64>,
    /// Multiplier for U/kg drugs such as insulin
    pub unit_multiplier: Option<f64>,
}

fn default_weight_g() -> f64 { 25.0 }
fn default_dose_mg_per_kg() -> f64 { 10.0 }
fn default_stock_concentration() -> f64 { 1.0 }

// ============================================================================
// Registry Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListDrugsParams {
    /// Optional filter on key, label or drug class
    pub query: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDrugParams {
    pub key: String,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl DoseCalcService {
    // --- Status ---

    #[tool(description = "Get the current status of the dosecalc service including build info, configuration, and process information")]
    async fn dosecalc_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        to_json(&tracker.get_status())
    }

    #[tool(description = "Get step-by-step instructions for computing rodent doses. Call this when starting a dosing session or when unsure how to use the calculators.")]
    fn dosing_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::DOSING_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(DOSING_INSTRUCTIONS)]))
    }

    // --- Calculators ---

    #[tool(description = "Calculate the IP injection volume for one animal from body weight (g), target dose (mg/kg) and stock concentration (mg/mL). Volumes above 500 µL or below 10 µL are flagged.")]
    fn calculate_ip_injection(&self, Parameters(p): Parameters<IpInjectionParams>) -> Result<CallToolResult, McpError> {
        let species = resolve_species(p.species.as_deref(), self.config.default_species)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
        let result = injection::calculate_ip_injection(
            species,
            p.weight_g,
            p.dose_mg_per_kg,
            p.stock_concentration_mg_per_ml,
        )
        .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Convert a human clinical dose into a Low/Mid/High rodent dosing table using FDA BSA scaling (insulin uses unit_multiplier instead). Returns per-row injection volume and safety flag.")]
    fn calculate_translational_dose(&self, Parameters(p): Parameters<TranslationalDoseParams>) -> Result<CallToolResult, McpError> {
        let req = self.translational_request(p)?;
        let result = translational::calculate_translational_dose(&req)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Export a translational dosing table as Markdown for a lab notebook. Takes the same parameters as calculate_translational_dose.")]
    fn export_dosing_table_markdown(&self, Parameters(p): Parameters<TranslationalDoseParams>) -> Result<CallToolResult, McpError> {
        let req = self.translational_request(p)?;
        let result = translational::export_dosing_table_markdown(&req)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }

    // --- Registry ---

    #[tool(description = "List registered drugs with their dose unit and clinical default dose per kg")]
    fn list_drugs(&self, Parameters(p): Parameters<ListDrugsParams>) -> Result<CallToolResult, McpError> {
        to_json(&drugs::list_drugs(p.query.as_deref()))
    }

    #[tool(description = "Get full details for a registered drug")]
    fn get_drug(&self, Parameters(p): Parameters<GetDrugParams>) -> Result<CallToolResult, McpError> {
        match drugs::get_drug(&p.key) {
            Ok(drug) => to_json(&drug),
            Err(CalcError::DrugNotFound(key)) => {
                to_json(&serde_json::json!({ "error": "Drug not found", "key": key }))
            }
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    #[tool(description = "List supported species with their FDA Km factors and typical body weight ranges")]
    fn list_species(&self) -> Result<CallToolResult, McpError> {
        to_json(&drugs::list_species())
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for DoseCalcService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "dosecalc".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Rodent Dose Calculator".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Rodent Dose Calculator - human-to-rodent dose translation and IP injection volumes. \
                 IMPORTANT: Call dosing_instructions before the first calculation. \
                 Calculators: calculate_ip_injection, calculate_translational_dose, export_dosing_table_markdown. \
                 Registry: list_drugs, get_drug, list_species. \
                 Results flag volumes above 500 µL or below 10 µL; flags are advisory."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Species;

    fn params(drug_key: &str) -> TranslationalDoseParams {
        TranslationalDoseParams {
            drug_key: drug_key.to_string(),
            species: None,
            weight_g: 25.0,
            stock_concentration_per_ml: 1.0,
            human_dose_per_kg: None,
            human_weight_kg: None,
            bsa_factor: None,
            unit_multiplier: None,
        }
    }

    #[test]
    fn test_request_uses_config_defaults() {
        let service = DoseCalcService::new(Config {
            default_species: Species::Rat,
            unit_dose_multiplier: 4.0,
        });
        let req = service.translational_request(params("insulin_regular")).unwrap();
        assert_eq!(req.species, Species::Rat);
        assert_eq!(req.unit_multiplier, 4.0);
    }

    #[test]
    fn test_request_explicit_values_win() {
        let service = DoseCalcService::new(Config::default());
        let mut p = params("insulin_regular");
        p.species = Some("hamster".to_string());
        p.unit_multiplier = Some(2.0);
        let req = service.translational_request(p).unwrap();
        assert_eq!(req.species, Species::Hamster);
        assert_eq!(req.unit_multiplier, 2.0);
    }

    #[test]
    fn test_request_rejects_unknown_species() {
        let service = DoseCalcService::new(Config::default());
        let mut p = params("metformin");
        p.species = Some("ferret".to_string());
        assert!(service.translational_request(p).is_err());
    }

    #[test]
    fn test_params_defaults_from_json() {
        let p: IpInjectionParams = serde_json::from_str("{}").unwrap();
        assert_eq!(p.weight_g, 25.0);
        assert_eq!(p.dose_mg_per_kg, 10.0);
        assert_eq!(p.stock_concentration_mg_per_ml, 1.0);
        assert!(p.species.is_none());
    }
}

//! Rodent Dose Calculator (dosecalc)
//!
//! An MCP server for translational rodent dosing.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use dosecalc::build_info;
use dosecalc::config::Config;
use dosecalc::mcp::DoseCalcService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr so it doesn't interfere with MCP stdio
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("dosecalc=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();

    let config = Config::from_env();
    tracing::info!(
        default_species = config.default_species.as_str(),
        unit_dose_multiplier = config.unit_dose_multiplier,
        "Loaded configuration"
    );

    eprintln!("Starting MCP server on stdio...");
    let service = DoseCalcService::new(config);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}

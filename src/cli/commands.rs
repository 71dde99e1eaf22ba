//! CLI command implementations

use anyhow::Result;
use std::fs;

use crate::api;
use crate::auth::{evaluate, is_guarded, Session};
use crate::cli::{format_decision, info, print_check_table, print_routes_table, success, warn, CheckReport, OutputFormat};
use crate::config::{self, loader::CONFIG_FILENAME};

/// Initialize a new schoolgate.toml configuration file
pub async fn init(force: bool) -> Result<()> {
    let config_path = std::path::Path::new(CONFIG_FILENAME);

    if config_path.exists() && !force {
        warn("schoolgate.toml already exists (use --force to overwrite)");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created schoolgate.toml");
    info("Point [backend].base_url at the school API and run 'schoolgate serve'");

    Ok(())
}

/// Start the edge server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = config::load_config_or_default()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting schoolgate on {}:{}", host, port));
    api::run_server(config, &host, port).await?;
    Ok(())
}

/// Evaluate the route guard offline
pub fn check(path: &str, token: bool, role: Option<String>, format: OutputFormat) -> Result<()> {
    let session = Session::new(token, role.filter(|r| !r.is_empty()));
    let report = CheckReport {
        path,
        session: &session,
        guarded: is_guarded(path),
        decision: evaluate(path, &session),
    };

    match format {
        OutputFormat::Table => {
            print_check_table(&report);
            info(&format!("{} {}", path, format_decision(&report.decision)));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&report)?;
            println!("{}", yaml);
        }
    }

    Ok(())
}

/// List role areas and menus
pub fn routes() -> Result<()> {
    print_routes_table();
    Ok(())
}

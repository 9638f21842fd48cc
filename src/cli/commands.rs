// ABOUTME: Command implementations for the crashplate CLI
// ABOUTME: Handles execution of the render, info and tokens commands

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, info};

use super::args::InfoFormat;
use crate::info::{EnvironmentInfo, MachineSummary};
use crate::report::{GeneralInfo, Report};
use crate::template::{TemplateRenderer, BUILTIN_TOKENS};

/// Render a template file and write the result to `output` or stdout
pub async fn render_template(
    template_path: PathBuf,
    report_path: Option<PathBuf>,
    tokens: &HashMap<String, String>,
    output: Option<PathBuf>,
    environment: &EnvironmentInfo,
) -> Result<()> {
    info!("Rendering template: {}", template_path.display());

    let template = fs::read_to_string(&template_path)
        .await
        .with_context(|| format!("Failed to read template '{}'", template_path.display()))?;

    let report = match report_path {
        Some(path) => Report::load(&path)
            .await
            .with_context(|| format!("Failed to load report '{}'", path.display()))?,
        None => {
            debug!("No report given, collecting one for this process");
            Report::new(GeneralInfo::collect(environment))
        }
    };

    let rendered = render_report(&report, &template, tokens, environment)?;

    match output {
        Some(output_path) => {
            fs::write(&output_path, rendered).await.with_context(|| {
                format!("Failed to write output file '{}'", output_path.display())
            })?;
            info!("Report written to: {}", output_path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Render `template` for `report`, binding the report's own exception
pub fn render_report(
    report: &Report,
    template: &str,
    tokens: &HashMap<String, String>,
    environment: &EnvironmentInfo,
) -> Result<String> {
    let mut renderer = TemplateRenderer::with_environment(report, report.exception(), environment);

    for (name, value) in tokens {
        renderer.add_token(name, value.as_str())?;
    }
    debug!("Registered {} custom tokens", renderer.tokens().len());

    Ok(renderer.render(template))
}

#[derive(Debug, Serialize)]
pub struct InfoSummary {
    pub application: IndexMap<String, String>,
    pub machine: MachineSummary,
}

impl InfoSummary {
    pub fn collect(environment: &EnvironmentInfo) -> Self {
        Self {
            application: environment.snapshot().values().clone(),
            machine: environment.machine().facts().summary(),
        }
    }
}

/// Format collected metadata in the requested format
pub fn format_info(summary: &InfoSummary, format: InfoFormat) -> Result<String> {
    match format {
        InfoFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
        InfoFormat::Yaml => Ok(serde_yaml::to_string(summary)?),
        InfoFormat::Text => {
            let mut text = String::from("Application:\n");
            for (key, value) in &summary.application {
                text.push_str(&format!("  {}: {}\n", key, value));
            }

            let machine = &summary.machine;
            text.push_str("Machine:\n");
            text.push_str(&format!(
                "  hostname: {}\n",
                machine.hostname.as_deref().unwrap_or("unknown")
            ));
            text.push_str(&format!("  runtime_version: {}\n", machine.runtime_version));
            text.push_str(&format!("  culture: {}\n", machine.culture));
            text.push_str(&format!(
                "  local_ip: {}\n",
                machine.local_ip.as_deref().unwrap_or("unavailable")
            ));
            text.push_str(&format!("  user: {}\n", machine.user));
            Ok(text)
        }
    }
}

/// Print collected metadata
pub fn show_info(format: InfoFormat, environment: &EnvironmentInfo) -> Result<()> {
    let summary = InfoSummary::collect(environment);
    print!("{}", format_info(&summary, format)?);
    Ok(())
}

/// Print the built-in token names, one per line
pub fn list_tokens() -> Result<()> {
    for token in BUILTIN_TOKENS {
        println!("{}", token);
    }
    Ok(())
}

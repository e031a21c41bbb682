//! `validate`: regenerate every built-in topology (plus any custom
//! documents) and check the cross-entity rules.

use std::fmt::Write as _;

use tabled::Tabled;
use tracing::{info, warn};

use merakimock_core::{TopologyValidation, ValidationReport, validate_builtin, validate_topology};

use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

/// Seed validation uses unless `--seed` or the config sets one.
const VALIDATE_SEED: u64 = 42;

#[derive(Tabled)]
struct ValidationRow {
    #[tabled(rename = "Topology")]
    topology: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Issues")]
    issues: usize,
    #[tabled(rename = "Networks")]
    networks: usize,
    #[tabled(rename = "Devices")]
    devices: usize,
    #[tabled(rename = "Clients")]
    clients: usize,
}

pub fn handle(args: ValidateArgs, settings: &Settings) -> Result<(), CliError> {
    let options = settings.options_with_default_seed(VALIDATE_SEED);
    let mut report = validate_builtin(&options);

    for path in &args.files {
        let topology = util::generate_custom(path, &settings.custom_options())?;
        report.topologies.push(TopologyValidation {
            issues: validate_topology(&topology),
            topology: topology.topology_name,
            stats: topology.stats,
        });
    }

    for issue in report.issues() {
        warn!(%issue, "validation issue");
    }

    let out = render(&report, settings)?;
    output::print_output(&out, settings.quiet);

    if report.is_ok() {
        info!(topologies = report.topologies.len(), "all topologies valid");
        Ok(())
    } else {
        Err(CliError::ValidationFailed {
            issues: report.issue_count(),
            topologies: report
                .topologies
                .iter()
                .filter(|t| !t.issues.is_empty())
                .count(),
        })
    }
}

fn render(report: &ValidationReport, settings: &Settings) -> Result<String, CliError> {
    let color = settings.use_color();
    match settings.output {
        OutputFormat::Table => {
            let rows = report.topologies.iter().map(|t| ValidationRow {
                topology: t.topology.clone(),
                status: output::status_label(t.issues.is_empty(), color),
                issues: t.issues.len(),
                networks: t.stats.networks,
                devices: t.stats.devices,
                clients: t.stats.clients,
            });
            let mut out = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            for issue in report.issues() {
                let _ = write!(out, "\n{issue}");
            }
            Ok(out)
        }
        OutputFormat::Plain => Ok(report
            .topologies
            .iter()
            .map(|t| {
                format!(
                    "{}\t{}",
                    t.topology,
                    output::status_label(t.issues.is_empty(), false)
                )
            })
            .chain(report.issues().map(ToString::to_string))
            .collect::<Vec<_>>()
            .join("\n")),
        structured => output::render_structured(structured, report),
    }
}

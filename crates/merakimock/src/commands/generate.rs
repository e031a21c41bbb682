//! `generate`: build one topology and print or write it.

use tracing::info;

use merakimock_core::Topology;

use crate::cli::{GenerateArgs, OutputFormat};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::stats::StatsRow;
use super::util;

pub fn handle(args: GenerateArgs, settings: &Settings) -> Result<(), CliError> {
    let topology = match (&args.from_file, &args.topology) {
        (Some(path), _) => util::generate_custom(path, &settings.custom_options())?,
        (None, Some(name)) => util::generate_builtin(name, settings)?,
        (None, None) => util::generate_builtin(settings.default_topology(), settings)?,
    };

    if let Some(path) = &args.out {
        output::write_file(path, &topology)?;
        info!(path = %path.display(), "topology written");
        output::print_output(&summary(&topology, settings.output)?, settings.quiet);
        return Ok(());
    }

    let out = match settings.output {
        OutputFormat::Table | OutputFormat::Plain => summary(&topology, settings.output)?,
        structured => output::render_structured(structured, &topology)?,
    };
    output::print_output(&out, settings.quiet);
    Ok(())
}

/// Terminal-friendly view: entity counts instead of the full document.
fn summary(topology: &Topology, format: OutputFormat) -> Result<String, CliError> {
    output::render_single(
        format,
        &topology.stats,
        |stats| {
            let table = tabled::Table::new([StatsRow::new(&topology.topology_name, stats)])
                .with(tabled::settings::Style::rounded())
                .to_string();
            format!("{}\n{table}", topology.description)
        },
        |_| topology.topology_name.clone(),
    )
}

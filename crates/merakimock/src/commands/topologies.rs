//! Built-in topology listing.

use serde::Serialize;
use tabled::Tabled;

use merakimock_core::TopologyKind;

use crate::config::Settings;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct TopologyEntry {
    name: String,
    seed: u64,
    default: bool,
    description: &'static str,
}

#[derive(Tabled)]
struct TopologyRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Seed")]
    seed: u64,
    #[tabled(rename = "Description")]
    description: &'static str,
}

pub fn handle(settings: &Settings) -> Result<(), CliError> {
    let default = settings.config.default_kind();
    let entries: Vec<TopologyEntry> = TopologyKind::all()
        .map(|kind| TopologyEntry {
            name: kind.to_string(),
            seed: settings
                .options_for(kind)
                .seed
                .unwrap_or_else(|| kind.default_seed()),
            default: default == Some(kind),
            description: kind.description(),
        })
        .collect();

    let out = output::render_list(
        settings.output,
        &entries,
        |e| TopologyRow {
            name: if e.default {
                format!("{} *", e.name)
            } else {
                e.name.clone()
            },
            seed: e.seed,
            description: e.description,
        },
        |e| e.name.clone(),
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}

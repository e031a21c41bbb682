//! `query`: seed an in-memory store with one topology and read it back
//! the way a mock API handler would.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use merakimock_core::{EntityKind, TopologyStore, seed_topology};

use crate::cli::{OutputFormat, QueryArgs};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

/// Fields tried, in order, to name a record in plain output.
const ID_FIELDS: &[&str] = &["id", "serial", "networkId", "vlanId", "mac"];

pub fn handle(args: QueryArgs, settings: &Settings) -> Result<(), CliError> {
    let kind = EntityKind::from_name(&args.entity)?;
    let topology = util::generate_builtin(&args.topology, settings)?;

    let store = TopologyStore::new(settings.default_topology());
    let written = seed_topology(&store, &topology)?;
    debug!(records = written, "store seeded");

    let name = store.resolve_topology(Some(topology.topology_name.as_str()), None);

    if let Some(id) = &args.id {
        let record = store.get_entity(&name, kind, id)?;
        let out = output::render_single(
            settings.output,
            record.as_ref(),
            pretty,
            |v| record_id(v).unwrap_or_else(|| id.clone()),
        )?;
        output::print_output(&out, settings.quiet);
        return Ok(());
    }

    let records = match &args.parent {
        Some(parent) => {
            let (parent_kind, parent_id) = parse_parent(parent)?;
            store.get_entities_by_parent(&name, parent_kind, parent_id, kind)
        }
        None => store.get_entities(&name, kind),
    };

    let out = render_records(settings.output, &records)?;
    output::print_output(&out, settings.quiet);
    Ok(())
}

/// Records have no fixed columns, so table output is pretty JSON.
fn render_records(format: OutputFormat, records: &[Arc<Value>]) -> Result<String, CliError> {
    match format {
        OutputFormat::Plain => Ok(records
            .iter()
            .filter_map(|v| record_id(v))
            .collect::<Vec<_>>()
            .join("\n")),
        OutputFormat::Table => output::render_structured(OutputFormat::Json, records),
        structured => output::render_structured(structured, records),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn record_id(value: &Value) -> Option<String> {
    ID_FIELDS.iter().find_map(|field| match value.get(field)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// `KIND:ID`, e.g. `network:N_HQ001` or `device:Q2XX-AAAA-0001`.
fn parse_parent(raw: &str) -> Result<(EntityKind, &str), CliError> {
    let invalid = || CliError::Validation {
        field: "parent".into(),
        reason: format!("expected KIND:ID, got '{raw}'"),
    };
    let (kind, id) = raw.split_once(':').ok_or_else(invalid)?;
    if id.is_empty() {
        return Err(invalid());
    }
    Ok((EntityKind::from_name(kind)?, id))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parent_reference_parsing() {
        let (kind, id) = parse_parent("network:N_HQ001").unwrap();
        assert_eq!(kind, EntityKind::Network);
        assert_eq!(id, "N_HQ001");

        let (kind, _) = parse_parent("vlan-profile:x").unwrap();
        assert_eq!(kind, EntityKind::VlanProfile);

        assert!(matches!(parse_parent("network"), Err(CliError::Validation { .. })));
        assert!(matches!(parse_parent("network:"), Err(CliError::Validation { .. })));
        assert!(matches!(
            parse_parent("router:1"),
            Err(CliError::UnknownEntityType { .. })
        ));
    }

    #[test]
    fn record_ids_follow_field_priority() {
        assert_eq!(record_id(&json!({"id": "k1", "serial": "Q"})).unwrap(), "k1");
        assert_eq!(record_id(&json!({"serial": "Q2XX"})).unwrap(), "Q2XX");
        assert_eq!(record_id(&json!({"vlanId": 10})).unwrap(), "10");
        assert!(record_id(&json!({"name": "x"})).is_none());
    }
}

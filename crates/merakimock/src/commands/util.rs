//! Shared helpers for command handlers.

use std::path::Path;

use tracing::info;

use merakimock_core::{CustomTopology, DocumentFormat, Topology, TopologyKind};

use crate::config::Settings;
use crate::error::CliError;

/// Parse a built-in topology name, accepting dashes for underscores.
pub fn resolve_kind(name: &str) -> Result<TopologyKind, CliError> {
    name.parse().map_err(|_| {
        merakimock_core::CoreError::UnknownTopology {
            name: name.to_owned(),
        }
        .into()
    })
}

/// Generate a built-in topology with the seed and reference time the
/// settings resolve for it.
pub fn generate_builtin(name: &str, settings: &Settings) -> Result<Topology, CliError> {
    let kind = resolve_kind(name)?;
    let options = settings.options_for(kind);
    info!(topology = %kind, seed = ?options.seed, "generating built-in topology");
    Ok(kind.generate(&options))
}

/// Read and parse a custom topology document, picking the format from the
/// file extension.
pub fn load_custom(path: &Path) -> Result<CustomTopology, CliError> {
    let format = DocumentFormat::from_path(path).ok_or_else(|| CliError::Validation {
        field: "from-file".into(),
        reason: format!(
            "cannot tell the format of {} (expected .toml, .yaml, .yml or .json)",
            path.display()
        ),
    })?;
    let text = std::fs::read_to_string(path)?;
    Ok(CustomTopology::parse(&text, format)?)
}

/// Generate a custom topology document from disk.
pub fn generate_custom(
    path: &Path,
    options: &merakimock_core::GenerationOptions,
) -> Result<Topology, CliError> {
    let document = load_custom(path)?;
    info!(topology = %document.name, path = %path.display(), "generating custom topology");
    Ok(document.generate(options)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_accept_dashes() {
        assert_eq!(resolve_kind("hub-spoke").unwrap(), TopologyKind::HubSpoke);
        assert_eq!(resolve_kind("MULTI_ORG").unwrap(), TopologyKind::MultiOrg);
        assert!(matches!(
            resolve_kind("ring"),
            Err(CliError::UnknownTopology { .. })
        ));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.txt");
        std::fs::write(&path, "name = 'x'").unwrap();
        assert!(matches!(
            load_custom(&path),
            Err(CliError::Validation { ref field, .. }) if field == "from-file"
        ));
    }

    #[test]
    fn parse_errors_carry_the_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_custom(&path),
            Err(CliError::Parse { ref format, .. }) if format == "json"
        ));
    }
}

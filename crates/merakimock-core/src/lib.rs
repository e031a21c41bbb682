//! Deterministic synthetic fleet data for a mock Meraki Dashboard API.
//!
//! This crate produces complete, self-consistent topologies (organizations,
//! networks, devices, VLANs, clients, VPN and cellular settings) shaped
//! like Dashboard API responses, and serves them back through a small
//! keyed store:
//!
//! - **[`GenerationRng`]**: the single random stream and reference time a
//!   generation run draws from. The same seed and reference time always
//!   reproduce byte-identical output.
//!
//! - **Generators** ([`generate`]): [`NetworkGenerator`],
//!   [`DeviceGenerator`] and [`ClientGenerator`] build entity records from
//!   typed plans ([`DevicePlan`], [`VlanType`], [`SiteKind`]).
//!
//! - **Topologies** ([`topology`]): the built-in hub-spoke, mesh and
//!   multi-org fleets ([`TopologyKind`]) plus user-declared
//!   [`CustomTopology`] documents, all assembled through
//!   [`TopologyBuilder`].
//!
//! - **Validation** ([`validate`]): required fields and every cross-entity
//!   invariant, reported as a list of [`ValidationIssue`]s.
//!
//! - **[`TopologyStore`]**: thread-safe `(topology, kind, id)` storage
//!   with a parent index, seeded from a topology by [`seed_topology`].

pub mod error;
pub mod generate;
pub mod model;
pub mod rng;
pub mod store;
pub mod topology;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use generate::{
    ClientGenerator, DeviceGenerator, DeviceGroup, DevicePlan, NetworkGenerator, SingleDevice,
    SiteKind, VlanType,
};
pub use model::{Topology, TopologyStats};
pub use rng::GenerationRng;
pub use store::{EntityKind, ParentRef, StoreItem, TopologyInfo, TopologyStore, seed_topology};
pub use topology::{
    CustomTopology, DocumentFormat, GenerationOptions, TopologyBuilder, TopologyKind,
    generate_by_name,
};
pub use validate::{
    TopologyValidation, ValidationIssue, ValidationReport, validate_builtin, validate_topology,
};

//! Process-wide component registry.
//!
//! Maps component names to their declarations so the asset server can find
//! a bundle's directory per request. The registry is in-memory only; nothing
//! survives a restart.

pub mod component_registry;

pub use component_registry::{ComponentRegistry, RegisterOutcome};

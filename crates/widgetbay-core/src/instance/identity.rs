//! Instance identity across re-executions.
//!
//! An instance keeps its frontend state as long as its identity is stable.
//! Without a user key the identity covers everything sent to the frontend,
//! so any argument change yields a new instance. With a user key it covers
//! only the component, its source and the key, so arguments can change
//! without remounting the frontend.

use crate::component::{ComponentDeclaration, ComponentSource};
use crate::instance::args::MarshalledArgs;
use sha2::{Digest, Sha256};
use std::fmt;

/// The exact bytes an identity is derived from.
///
/// Fields are length-prefixed so adjacent fields cannot be confused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityInput {
    bytes: Vec<u8>,
}

impl IdentityInput {
    fn start(element_kind: &str, component: &ComponentDeclaration, mode: &str) -> Self {
        let mut input = Self { bytes: Vec::new() };
        input.push(mode.as_bytes());
        input.push(element_kind.as_bytes());
        input.push(component.name().as_bytes());
        match component.source() {
            ComponentSource::Url(url) => {
                input.push(b"url");
                input.push(url.as_bytes());
            }
            ComponentSource::Path(_) => {
                let abspath = component.abspath().unwrap_or_default();
                input.push(b"path");
                input.push(abspath.to_string_lossy().as_bytes());
            }
        }
        input
    }

    /// Identity input for a call without a user key: component, source and
    /// every encoded argument.
    pub fn from_args(
        element_kind: &str,
        component: &ComponentDeclaration,
        args: &MarshalledArgs,
    ) -> Self {
        let mut input = Self::start(element_kind, component, "args");
        input.push(args.args_json.as_bytes());
        for table in &args.tables {
            input.push(table.key.as_bytes());
            input.push(&table.data);
        }
        input
    }

    /// Identity input for a keyed call: component, source and key only.
    pub fn from_user_key(
        element_kind: &str,
        component: &ComponentDeclaration,
        user_key: &str,
    ) -> Self {
        let mut input = Self::start(element_kind, component, "key");
        input.push(user_key.as_bytes());
        input
    }

    fn push(&mut self, field: &[u8]) {
        self.bytes
            .extend_from_slice(&(field.len() as u64).to_le_bytes());
        self.bytes.extend_from_slice(field);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Stable identity of a component instance (hex SHA-256).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetIdentity(String);

impl WidgetIdentity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WidgetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hash an identity input.
pub fn compute_identity(input: &IdentityInput) -> WidgetIdentity {
    let digest = Sha256::digest(input.as_bytes());
    WidgetIdentity(hex::encode(digest))
}

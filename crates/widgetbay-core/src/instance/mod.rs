//! Component instances.
//!
//! Each call on a declared component marshals its arguments, derives the
//! instance identity, and enqueues one [`ComponentNode`] through the host.
//! The host owns three collaborators, expressed as traits:
//!
//! - [`ValueStore`]: the latest value the frontend reported per identity,
//! - [`NodeSink`]: the render pipeline that accepts new UI nodes,
//! - [`TableEncoder`]: the columnar encoder for tabular arguments.
//!
//! # Identity
//!
//! Without a user key, the identity hashes the component, its source and all
//! encoded arguments: changing any argument creates a new instance and drops
//! its reported value. With a user key, the identity hashes the component,
//! its source and the key only, so arguments can change while the frontend
//! keeps its state. The hash input is built explicitly by
//! [`IdentityInput`] before the value store is consulted.

pub mod args;
pub mod identity;
pub mod node;

pub use args::{ComponentArg, InstanceCall, MarshalledArgs, NoTable};
pub use identity::{compute_identity, IdentityInput, WidgetIdentity};
pub use node::{ComponentNode, TableArg};

use crate::component::ComponentDeclaration;
use crate::config::InstanceConfig;
use crate::error::Result;
use serde_json::Value;
use tracing::debug;

/// Value returned by a component instance.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetValue {
    /// The frontend has not reported a value and no default was given.
    NoValue,
    /// A reported value or the caller's default. May be JSON `null` when the
    /// component explicitly reported one.
    Value(Value),
}

impl WidgetValue {
    /// Pick the reported value, else the default, else [`WidgetValue::NoValue`].
    pub fn resolve(reported: Option<Value>, default: Option<Value>) -> Self {
        match reported.or(default) {
            Some(value) => WidgetValue::Value(value),
            None => WidgetValue::NoValue,
        }
    }

    pub fn is_no_value(&self) -> bool {
        matches!(self, WidgetValue::NoValue)
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            WidgetValue::Value(value) => Some(value),
            WidgetValue::NoValue => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            WidgetValue::Value(value) => Some(value),
            WidgetValue::NoValue => None,
        }
    }
}

/// Values reported by the frontend, keyed by instance identity.
pub trait ValueStore {
    /// The most recent value reported for `identity`, or `None` if the
    /// frontend has not reported one yet.
    fn current_value(
        &self,
        element_kind: &str,
        identity: &WidgetIdentity,
        user_key: Option<&str>,
        callable_name: &str,
    ) -> Option<Value>;
}

/// The host's render pipeline.
pub trait NodeSink {
    /// Enqueue a new node of `node_kind`, populated by `build`, and return
    /// the builder's result.
    fn enqueue<F>(&self, node_kind: &str, build: F) -> Result<WidgetValue>
    where
        F: FnOnce(&mut ComponentNode) -> Result<WidgetValue>;
}

/// Encoder for tabular arguments.
pub trait TableEncoder {
    type Table;

    /// Encode `table` into `slot`.
    fn encode_table(&self, slot: &mut Vec<u8>, table: &Self::Table) -> Result<()>;
}

impl ComponentDeclaration {
    /// Create an instance of this component and return its current value.
    ///
    /// Fails with a usage error for positional arguments and a marshalling
    /// error for arguments that cannot be encoded; neither enqueues a node.
    pub fn create_instance<H, T>(&self, host: &H, mut call: InstanceCall<T>) -> Result<WidgetValue>
    where
        H: ValueStore + NodeSink + TableEncoder<Table = T>,
    {
        call.check_positional()?;
        let marshalled = call.marshal(host)?;

        let identity_input = match call.user_key() {
            Some(user_key) => {
                IdentityInput::from_user_key(InstanceConfig::ELEMENT_KIND, self, user_key)
            }
            None => IdentityInput::from_args(InstanceConfig::ELEMENT_KIND, self, &marshalled),
        };
        let identity = compute_identity(&identity_input);
        debug!("Component {} instance identity {}", self.name(), identity);

        let user_key = call.key.take();
        let default = call.default.take();

        host.enqueue(InstanceConfig::NODE_KIND, move |node| {
            node.component_name = self.name().to_string();
            node.url = self.url().map(str::to_string);
            node.args_json = marshalled.args_json;
            node.args_tables = marshalled.tables;

            let reported = host.current_value(
                InstanceConfig::ELEMENT_KIND,
                &identity,
                user_key.as_deref(),
                self.name(),
            );
            Ok(WidgetValue::resolve(reported, default))
        })
    }
}

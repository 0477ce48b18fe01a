//! widgetbay core - headless library for third-party UI components.
//!
//! A host application declares components (widgets backed by a separately
//! deployed frontend bundle), serves their local bundles, and exchanges state
//! with them across repeated re-executions of the host's logic.
//!
//! - [`registry`]: process-wide name -> declaration map,
//! - [`assets`]: per-request resolution of bundle files,
//! - [`declare`]: naming components after the declaring module,
//! - [`instance`]: instance identity, argument marshalling, value resolution.
//!
//! The HTTP surface lives in the `widgetbay-server` crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use widgetbay_core::{declare_component, ComponentRegistry, InstanceCall};
//!
//! let registry = ComponentRegistry::instance();
//! let slider = declare_component!(&registry, path = "frontend/build")?;
//!
//! // On every re-execution:
//! let value = slider.create_instance(&host, InstanceCall::new().arg("max", &100).key("volume"))?;
//! ```

pub mod assets;
pub mod component;
pub mod config;
pub mod declare;
pub mod error;
pub mod instance;
pub mod registry;

// Re-export commonly used types
pub use assets::{component_url, load_asset, Asset, AssetRequest};
pub use component::{ComponentDeclaration, ComponentSource};
pub use config::{AppConfig, AssetConfig, InstanceConfig};
pub use declare::{declare_component, CallerContext};
pub use error::{Result, WidgetError};
pub use instance::{
    ComponentArg, ComponentNode, InstanceCall, NoTable, NodeSink, TableArg, TableEncoder,
    ValueStore, WidgetIdentity, WidgetValue,
};
pub use registry::{ComponentRegistry, RegisterOutcome};

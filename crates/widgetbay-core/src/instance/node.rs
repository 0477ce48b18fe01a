//! The UI node produced by one component instance.

use serde::Serialize;

/// A tabular argument after encoding, tagged with its argument name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableArg {
    pub key: String,
    pub data: Vec<u8>,
}

/// Render instruction for one component instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentNode {
    pub component_name: String,
    /// Set only for url-backed components.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// JSON object of all non-tabular arguments.
    pub args_json: String,
    pub args_tables: Vec<TableArg>,
}

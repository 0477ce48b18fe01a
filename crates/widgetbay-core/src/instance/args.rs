//! Call-time arguments of a component instance.

use crate::error::{Result, WidgetError};
use crate::instance::node::TableArg;
use crate::instance::TableEncoder;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Table type for calls that never pass tabular arguments.
///
/// Uninhabited: a host without a columnar encoder can implement
/// `TableEncoder<Table = NoTable>` with `match *table {}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoTable {}

/// One named argument, partitioned by its static type.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentArg<T> {
    Json(Value),
    Table(T),
}

/// Arguments and options for one instance call.
///
/// ```rust,ignore
/// let value = slider.create_instance(
///     &host,
///     InstanceCall::new()
///         .arg("min", &0)
///         .arg("max", &100)
///         .key("volume")
///         .default(&50),
/// )?;
/// ```
#[derive(Debug)]
pub struct InstanceCall<T = NoTable> {
    pub(crate) positional: Vec<String>,
    pub(crate) args: BTreeMap<String, ComponentArg<T>>,
    pub(crate) key: Option<String>,
    pub(crate) default: Option<Value>,
    encode_error: Option<(String, serde_json::Error)>,
}

impl<T> Default for InstanceCall<T> {
    fn default() -> Self {
        Self {
            positional: Vec::new(),
            args: BTreeMap::new(),
            key: None,
            default: None,
            encode_error: None,
        }
    }
}

impl<T> InstanceCall<T> {
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// Pass an unnamed argument. Components only accept named arguments, so
    /// any positional argument fails the call with a usage error.
    pub fn positional(mut self, value: impl fmt::Display) -> Self {
        self.positional.push(value.to_string());
        self
    }

    /// Pass a JSON-encodable named argument.
    ///
    /// Encoding happens here; a failure is reported when the instance is
    /// created.
    pub fn arg<S: Serialize + ?Sized>(mut self, name: impl Into<String>, value: &S) -> Self {
        let name = name.into();
        if let Some(value) = self.encode(&name, value) {
            self.args.insert(name, ComponentArg::Json(value));
        }
        self
    }

    /// Pass a tabular named argument, encoded by the host's table encoder.
    pub fn table(mut self, name: impl Into<String>, table: T) -> Self {
        self.args.insert(name.into(), ComponentArg::Table(table));
        self
    }

    /// Pin the instance identity to this key instead of the arguments.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Value returned until the frontend reports one.
    ///
    /// Encoded like [`InstanceCall::arg`].
    pub fn default<S: Serialize + ?Sized>(mut self, value: &S) -> Self {
        if let Some(value) = self.encode("default", value) {
            self.default = Some(value);
        }
        self
    }

    /// Encode `value`, keeping the first failure for [`InstanceCall::marshal`].
    fn encode<S: Serialize + ?Sized>(&mut self, name: &str, value: &S) -> Option<Value> {
        match serde_json::to_value(value) {
            Ok(value) => Some(value),
            Err(err) => {
                if self.encode_error.is_none() {
                    self.encode_error = Some((name.to_string(), err));
                }
                None
            }
        }
    }

    pub(crate) fn user_key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Fail with a usage error if any positional argument was given.
    pub(crate) fn check_positional(&self) -> Result<()> {
        match self.positional.first() {
            Some(value) => Err(WidgetError::Usage {
                message: format!("Argument '{}' needs a label", value),
            }),
            None => Ok(()),
        }
    }

    /// Encode all arguments: JSON ones into a single object, tables through
    /// the encoder.
    pub(crate) fn marshal<E>(&mut self, encoder: &E) -> Result<MarshalledArgs>
    where
        E: TableEncoder<Table = T> + ?Sized,
    {
        if let Some((name, err)) = self.encode_error.take() {
            debug!("Argument '{}' is not JSON-encodable", name);
            return Err(WidgetError::marshalling(err));
        }

        let mut json_args = Map::new();
        let mut tables = Vec::new();
        for (name, arg) in &self.args {
            match arg {
                ComponentArg::Json(value) => {
                    json_args.insert(name.clone(), value.clone());
                }
                ComponentArg::Table(table) => {
                    let mut data = Vec::new();
                    encoder.encode_table(&mut data, table)?;
                    tables.push(TableArg {
                        key: name.clone(),
                        data,
                    });
                }
            }
        }

        let args_json = serde_json::to_string(&json_args).map_err(WidgetError::marshalling)?;

        Ok(MarshalledArgs { args_json, tables })
    }
}

/// Encoded arguments, in the form they are written into the node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarshalledArgs {
    pub args_json: String,
    pub tables: Vec<TableArg>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    struct JsonOnly;

    impl TableEncoder for JsonOnly {
        type Table = NoTable;

        fn encode_table(&self, _slot: &mut Vec<u8>, table: &NoTable) -> Result<()> {
            match *table {}
        }
    }

    #[test]
    fn test_marshal_json_args_sorted() {
        let mut call: InstanceCall = InstanceCall::new()
            .arg("max", &100)
            .arg("label", "Volume")
            .arg("min", &0);

        let marshalled = call.marshal(&JsonOnly).unwrap();

        assert_eq!(
            marshalled.args_json,
            r#"{"label":"Volume","max":100,"min":0}"#
        );
        assert!(marshalled.tables.is_empty());
    }

    #[test]
    fn test_marshal_empty_args() {
        let mut call: InstanceCall = InstanceCall::new();
        assert_eq!(call.marshal(&JsonOnly).unwrap().args_json, "{}");
    }

    #[test]
    fn test_later_arg_overrides_earlier() {
        let mut call: InstanceCall = InstanceCall::new().arg("x", &1).arg("x", &json!([1, 2]));
        assert_eq!(call.marshal(&JsonOnly).unwrap().args_json, r#"{"x":[1,2]}"#);
    }

    #[test]
    fn test_unencodable_arg_is_marshalling_error() {
        let bad: HashMap<(i32, i32), i32> = [((1, 2), 3)].into_iter().collect();
        let mut call: InstanceCall = InstanceCall::new().arg("ok", &1).arg("bad", &bad);

        let err = call.marshal(&JsonOnly).unwrap_err();
        assert!(matches!(err, WidgetError::Marshalling { source: Some(_), .. }));
    }

    #[test]
    fn test_default_is_encoded() {
        let call: InstanceCall = InstanceCall::new().default(&[1, 2]);
        assert_eq!(call.default, Some(json!([1, 2])));

        let bad: HashMap<(i32, i32), i32> = [((1, 2), 3)].into_iter().collect();
        let mut call: InstanceCall = InstanceCall::new().arg("ok", &1).default(&bad);
        assert!(call.default.is_none());
        let err = call.marshal(&JsonOnly).unwrap_err();
        assert!(matches!(err, WidgetError::Marshalling { source: Some(_), .. }));
    }

    #[test]
    fn test_positional_is_usage_error() {
        let call: InstanceCall = InstanceCall::new().positional("hello").arg("x", &1);

        match call.check_positional() {
            Err(WidgetError::Usage { message }) => {
                assert_eq!(message, "Argument 'hello' needs a label");
            }
            other => panic!("expected usage error, got {:?}", other),
        }
    }
}

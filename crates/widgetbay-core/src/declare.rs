//! Component declaration helper.
//!
//! Names a component after the module that declares it, so integrating crates
//! never have to pick a registry key by hand. Use the [`declare_component!`]
//! macro, which captures the caller's `module_path!()` and `file!()`.
//!
//! [`declare_component!`]: crate::declare_component

use crate::component::ComponentDeclaration;
use crate::error::Result;
use crate::registry::ComponentRegistry;
use std::path::{Path, PathBuf};

/// Where a declaration was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext {
    module_path: Option<String>,
    file: String,
}

impl CallerContext {
    /// A caller inside a named module, e.g. `my_crate::widgets`.
    pub fn new(module_path: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            module_path: Some(module_path.into()),
            file: file.into(),
        }
    }

    /// A top-level script with no qualified module name.
    pub fn script(file: impl Into<String>) -> Self {
        Self {
            module_path: None,
            file: file.into(),
        }
    }

    /// The component name this caller declares.
    ///
    /// Module paths are dotted (`my_crate::widgets` -> `my_crate.widgets`) so
    /// the name is usable as a URL path segment. Without a module path the
    /// file stem is used (`scripts/slider.rs` -> `slider`).
    pub fn component_name(&self) -> String {
        match self.module_path.as_deref() {
            Some(module_path) if !module_path.is_empty() => module_path.replace("::", "."),
            _ => Path::new(&self.file)
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.file.clone()),
        }
    }
}

/// Declare a component and register it.
///
/// Exactly one of `path` and `url` must be set. Returns the declaration,
/// which is the handle used to create instances.
pub fn declare_component(
    registry: &ComponentRegistry,
    caller: &CallerContext,
    path: Option<PathBuf>,
    url: Option<String>,
) -> Result<ComponentDeclaration> {
    let component = ComponentDeclaration::new(caller.component_name(), path, url)?;
    registry.register(component.clone())?;
    Ok(component)
}

/// Declare a component named after the calling module.
///
/// ```rust,ignore
/// let registry = ComponentRegistry::instance();
/// let slider = declare_component!(&registry, path = "frontend/build")?;
/// let remote = declare_component!(&registry, url = "http://localhost:3001")?;
/// ```
#[macro_export]
macro_rules! declare_component {
    ($registry:expr, path = $path:expr) => {
        $crate::declare::declare_component(
            $registry,
            &$crate::declare::CallerContext::new(module_path!(), file!()),
            Some(::std::path::PathBuf::from($path)),
            None,
        )
    };
    ($registry:expr, url = $url:expr) => {
        $crate::declare::declare_component(
            $registry,
            &$crate::declare::CallerContext::new(module_path!(), file!()),
            None,
            Some(::std::string::String::from($url)),
        )
    };
}

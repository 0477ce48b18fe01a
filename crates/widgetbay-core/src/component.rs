//! Component declarations.
//!
//! A [`ComponentDeclaration`] names one integratable widget type and says
//! where its frontend bundle lives: a local directory served by the asset
//! server, or a remote URL served by someone else.

use crate::error::{Result, WidgetError};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Where a component's frontend bundle is hosted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentSource {
    /// A directory on this machine, served under the component route.
    Path(PathBuf),
    /// A remote URL; never served locally.
    Url(String),
}

/// A declared component type.
///
/// Immutable after construction. Two declarations are equal iff their name
/// and source (path or url) match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ComponentDeclaration {
    name: String,
    source: ComponentSource,
}

impl ComponentDeclaration {
    /// Create a declaration from an optional path and an optional url.
    ///
    /// Exactly one of `path` and `url` must be set.
    pub fn new(
        name: impl Into<String>,
        path: Option<PathBuf>,
        url: Option<String>,
    ) -> Result<Self> {
        let source = match (path, url) {
            (Some(path), None) => ComponentSource::Path(path),
            (None, Some(url)) => ComponentSource::Url(url),
            _ => {
                return Err(WidgetError::config(
                    "Either 'path' or 'url' must be set, but not both.",
                ))
            }
        };

        Ok(Self {
            name: name.into(),
            source,
        })
    }

    /// Declare a component served from a local directory.
    pub fn from_path(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: ComponentSource::Path(path.into()),
        }
    }

    /// Declare a component served from a remote URL.
    pub fn from_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: ComponentSource::Url(url.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &ComponentSource {
        &self.source
    }

    /// The declared path, if this component is local.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            ComponentSource::Path(path) => Some(path),
            ComponentSource::Url(_) => None,
        }
    }

    /// The declared url, if this component is remote.
    pub fn url(&self) -> Option<&str> {
        match &self.source {
            ComponentSource::Path(_) => None,
            ComponentSource::Url(url) => Some(url),
        }
    }

    /// The absolute directory the component is served from, with `.` and
    /// `..` collapsed lexically.
    ///
    /// `None` for url-backed components.
    pub fn abspath(&self) -> Option<PathBuf> {
        self.path().map(|path| {
            let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
            normalize_lexically(&absolute)
        })
    }
}

/// Collapse `.` and `..` without touching the filesystem. `..` at the root
/// stays at the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(
                    normalized.components().next_back(),
                    None | Some(Component::RootDir) | Some(Component::Prefix(_))
                ) {
                    normalized.pop();
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

impl fmt::Display for ComponentDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            ComponentSource::Path(path) => write!(f, "'{}': {}", self.name, path.display()),
            ComponentSource::Url(url) => write!(f, "'{}': {}", self.name, url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_exactly_one_source() {
        let both = ComponentDeclaration::new(
            "slider",
            Some(PathBuf::from("frontend/build")),
            Some("http://localhost:3001".to_string()),
        );
        assert!(matches!(both, Err(WidgetError::Config { .. })));

        let neither = ComponentDeclaration::new("slider", None, None);
        assert!(matches!(neither, Err(WidgetError::Config { .. })));
    }

    #[test]
    fn test_url_component_has_no_abspath() {
        let component =
            ComponentDeclaration::new("slider", None, Some("http://localhost:3001".into()))
                .unwrap();
        assert_eq!(component.url(), Some("http://localhost:3001"));
        assert!(component.path().is_none());
        assert!(component.abspath().is_none());
    }

    #[test]
    fn test_path_component_abspath_is_absolute() {
        let component = ComponentDeclaration::from_path("slider", "frontend/build");
        let abspath = component.abspath().unwrap();
        assert!(abspath.is_absolute());
        assert!(abspath.ends_with("frontend/build"));
    }

    #[test]
    fn test_abspath_collapses_parent_segments() {
        let direct = ComponentDeclaration::from_path("slider", "frontend/build");
        let roundabout = ComponentDeclaration::from_path("slider", "frontend/src/../build/.");
        assert_eq!(direct.abspath(), roundabout.abspath());
        assert!(!roundabout
            .abspath()
            .unwrap()
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::CurDir)));
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/srv/a/../b/./c")),
            PathBuf::from("/srv/b/c")
        );
        assert_eq!(normalize_lexically(Path::new("/../a")), PathBuf::from("/a"));
    }

    #[test]
    fn test_equality() {
        let a = ComponentDeclaration::from_path("slider", "a");
        assert_eq!(a, ComponentDeclaration::from_path("slider", "a"));
        assert_ne!(a, ComponentDeclaration::from_path("slider", "b"));
        assert_ne!(a, ComponentDeclaration::from_path("knob", "a"));
        assert_ne!(a, ComponentDeclaration::from_url("slider", "a"));
    }

    #[test]
    fn test_display() {
        let component = ComponentDeclaration::from_url("slider", "http://localhost:3001");
        assert_eq!(component.to_string(), "'slider': http://localhost:3001");
    }
}

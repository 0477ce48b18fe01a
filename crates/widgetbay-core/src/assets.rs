//! Static asset resolution for component bundles.
//!
//! Works like a scoped static file server whose root directory is looked up
//! in the [`ComponentRegistry`] per request. The HTTP layer only has to turn
//! an [`Asset`] into a 200 and a [`WidgetError::AssetNotFound`] into a 404.

use crate::config::AssetConfig;
use crate::error::{Result, WidgetError};
use crate::registry::ComponentRegistry;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Request path used by the rest of the system to address a component file.
pub fn component_url(file_id: &str) -> String {
    format!("{}/{}", AssetConfig::ROUTE_PREFIX, file_id)
}

/// A request path split into component name and bundle-relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRequest<'a> {
    pub component_name: &'a str,
    /// Path inside the bundle; empty for the bundle's default document.
    pub relative_path: String,
}

impl<'a> AssetRequest<'a> {
    /// Split `<component>/<relative...>` on `/`.
    pub fn parse(request_path: &'a str) -> Self {
        let mut parts = request_path.split('/');
        let component_name = parts.next().unwrap_or_default();
        let relative_path = parts.collect::<Vec<_>>().join("/");
        Self {
            component_name,
            relative_path,
        }
    }

    /// Whether this request targets the bundle's entry document.
    pub fn is_index(&self) -> bool {
        self.relative_path.is_empty()
    }
}

/// A resolved, read asset ready to be written to a response.
#[derive(Debug, Clone)]
pub struct Asset {
    pub path: PathBuf,
    pub body: Vec<u8>,
    pub content_type: &'static str,
    pub cache_control: &'static str,
}

/// `Cache-Control` value for a bundle-relative path.
///
/// HTML is the mutable entry point of a bundle; everything else is assumed
/// to be content-hashed.
pub fn cache_control_for(relative_path: &str) -> &'static str {
    if relative_path.is_empty() || relative_path.ends_with(".html") {
        AssetConfig::CACHE_CONTROL_MUTABLE
    } else {
        AssetConfig::CACHE_CONTROL_IMMUTABLE
    }
}

/// `Content-Type` value for a file path.
///
/// Compressed files are typed by their encoding: gzip per RFC 6713, and
/// octet-stream for everything else since no other type is registered.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or_default();

    if AssetConfig::GZIP_EXTENSIONS.contains(&extension) {
        return AssetConfig::GZIP_CONTENT_TYPE;
    }
    if AssetConfig::OTHER_ENCODING_EXTENSIONS.contains(&extension) {
        return AssetConfig::DEFAULT_CONTENT_TYPE;
    }

    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(AssetConfig::DEFAULT_CONTENT_TYPE)
}

/// Join a bundle-relative path onto `root` without leaving it.
///
/// Returns `None` for `..` segments, absolute paths and drive prefixes.
pub fn resolve_within(root: &Path, relative_path: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    for component in Path::new(relative_path).components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(resolved)
}

/// Resolve and read the asset addressed by `request_path`.
///
/// Every failure is an [`WidgetError::AssetNotFound`] carrying the original
/// request path.
pub async fn load_asset(registry: &ComponentRegistry, request_path: &str) -> Result<Asset> {
    let request = AssetRequest::parse(request_path);

    let Some(component_root) = registry.component_path(request.component_name) else {
        debug!("Asset request for unknown component: {}", request_path);
        return Err(WidgetError::asset_not_found(request_path, "not found"));
    };

    let relative_path = if request.is_index() {
        AssetConfig::DEFAULT_DOCUMENT
    } else {
        request.relative_path.as_str()
    };

    let Some(abspath) = resolve_within(&component_root, relative_path) else {
        debug!("Rejected asset path outside component root: {}", request_path);
        return Err(WidgetError::asset_not_found(
            request_path,
            "read error: path escapes the component directory",
        ));
    };

    debug!("Component asset GET: {} -> {}", request_path, abspath.display());

    let body = read_contained(&component_root, &abspath)
        .await
        .map_err(|e| {
            debug!("Asset read failed for {}: {}", request_path, e);
            WidgetError::asset_not_found(request_path, format!("read error: {}", e))
        })?;

    Ok(Asset {
        content_type: content_type_for(&abspath),
        cache_control: cache_control_for(&request.relative_path),
        path: abspath,
        body,
    })
}

/// Read `path`, refusing files whose real location is outside `root`.
async fn read_contained(root: &Path, path: &Path) -> std::io::Result<Vec<u8>> {
    let real_root = tokio::fs::canonicalize(root).await?;
    let real_path = tokio::fs::canonicalize(path).await?;
    if !real_path.starts_with(&real_root) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "path escapes the component directory",
        ));
    }
    tokio::fs::read(&real_path).await
}

//! Centralized configuration for widgetbay.
//!
//! Constants for the asset route, cache headers, and the instance protocol.

/// Application-level configuration.
pub struct AppConfig;

impl AppConfig {
    pub const APP_NAME: &'static str = "widgetbay";
}

/// Static asset serving configuration.
pub struct AssetConfig;

impl AssetConfig {
    /// Path prefix under which component bundles are served. Both the HTTP
    /// route and [`crate::assets::component_url`] derive from this.
    pub const ROUTE_PREFIX: &'static str = "components";

    /// File served when a request names only the component.
    pub const DEFAULT_DOCUMENT: &'static str = "index.html";

    /// Entry-point documents change between builds.
    pub const CACHE_CONTROL_MUTABLE: &'static str = "no-cache";
    /// Bundled JS/CSS are content-hashed by the bundle's own build.
    pub const CACHE_CONTROL_IMMUTABLE: &'static str = "public";

    pub const DEFAULT_CONTENT_TYPE: &'static str = "application/octet-stream";
    pub const GZIP_CONTENT_TYPE: &'static str = "application/gzip";

    /// Compression suffixes that carry a content-encoding rather than a type.
    /// Shorthands like `tgz` (for `.tar.gz`) count as their encoding.
    pub const GZIP_EXTENSIONS: &'static [&'static str] = &["gz", "svgz", "tgz", "taz", "tz"];
    pub const OTHER_ENCODING_EXTENSIONS: &'static [&'static str] =
        &["bz2", "xz", "br", "Z", "tbz2", "txz"];
}

/// Instance protocol configuration.
pub struct InstanceConfig;

impl InstanceConfig {
    /// Element kind handed to the value store.
    pub const ELEMENT_KIND: &'static str = "component_instance";
    /// Node kind handed to the node sink.
    pub const NODE_KIND: &'static str = "component";
}

//! Application identity baked into the configured build.

pub const APP_NAME: &str = "element";

pub const VERSION: &str = "0.46.0b3";

/// Plugin builds carry the standalone version bumped by one major, since VST
/// hosts do not handle versions below 1.0.
pub const PLUGIN_VERSION: &str = "1.46.0b3";

//! User build options.
//!
//! Options disable optional features or point the probes at SDKs outside the
//! default search paths. They can come from command-line flags or from a TOML
//! file such as:
//!
//! ```toml
//! no_jack = true
//! vstsdk24 = "/opt/vstsdk"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptionsError {
  #[error("failed to read options file {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse options file {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildOptions {
  pub no_lua: bool,
  pub no_jack: bool,
  pub no_vst: bool,
  pub no_vst3: bool,
  pub no_lv2: bool,
  pub no_ladspa: bool,
  pub no_alsa: bool,
  /// Root of a VST 2.4 SDK checkout, added to the include path.
  pub vstsdk24: Option<String>,
}

impl BuildOptions {
  /// Load options from a TOML file.
  pub fn from_file(path: &Path) -> Result<Self, OptionsError> {
    let content = std::fs::read_to_string(path).map_err(|source| OptionsError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    toml::from_str(&content).map_err(|source| OptionsError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Layer `overrides` on top of these options.
  ///
  /// A feature disabled in either set stays disabled; an SDK path in
  /// `overrides` replaces this one.
  pub fn merged_with(self, overrides: BuildOptions) -> Self {
    Self {
      no_lua: self.no_lua || overrides.no_lua,
      no_jack: self.no_jack || overrides.no_jack,
      no_vst: self.no_vst || overrides.no_vst,
      no_vst3: self.no_vst3 || overrides.no_vst3,
      no_lv2: self.no_lv2 || overrides.no_lv2,
      no_ladspa: self.no_ladspa || overrides.no_ladspa,
      no_alsa: self.no_alsa || overrides.no_alsa,
      vstsdk24: overrides.vstsdk24.or(self.vstsdk24),
    }
  }

  /// The VST SDK path, if one was given and is non-empty.
  pub fn vst_sdk_path(&self) -> Option<&str> {
    self.vstsdk24.as_deref().filter(|p| !p.is_empty())
  }
}

//! Target platform selection.
//!
//! Configuration branches on the platform the native build targets, which is
//! not necessarily the platform `elconf` itself runs on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Platforms the native build can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetPlatform {
  Linux,
  #[serde(rename = "darwin")]
  MacOs,
  Mingw,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported platform '{0}' (expected one of: linux, darwin, mingw)")]
pub struct UnknownPlatform(pub String);

impl TargetPlatform {
  /// Detect the platform `elconf` is running on.
  ///
  /// Returns `None` if the OS has no configuration routine.
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::MacOs),
      "windows" => Some(Self::Mingw),
      _ => None,
    }
  }

  /// Returns the lowercase identifier for this platform
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "linux",
      Self::MacOs => "darwin",
      Self::Mingw => "mingw",
    }
  }

  pub fn is_mac(&self) -> bool {
    matches!(self, Self::MacOs)
  }
}

impl fmt::Display for TargetPlatform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for TargetPlatform {
  type Err = UnknownPlatform;

  /// Accepts the short names as well as the usual target-triple spellings
  /// (`x86_64-w64-mingw32`, `aarch64-apple-darwin`, ...).
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let lower = s.trim().to_ascii_lowercase();
    match lower.as_str() {
      "linux" => return Ok(Self::Linux),
      "darwin" | "mac" | "macos" | "osx" => return Ok(Self::MacOs),
      "mingw" | "win32" | "windows" => return Ok(Self::Mingw),
      _ => {}
    }

    if lower.contains("mingw") || lower.contains("windows") {
      Ok(Self::Mingw)
    } else if lower.contains("darwin") || lower.contains("apple") {
      Ok(Self::MacOs)
    } else if lower.contains("linux") {
      Ok(Self::Linux)
    } else {
      Err(UnknownPlatform(s.to_string()))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_short_names() {
    assert_eq!("linux".parse::<TargetPlatform>(), Ok(TargetPlatform::Linux));
    assert_eq!("darwin".parse::<TargetPlatform>(), Ok(TargetPlatform::MacOs));
    assert_eq!("MacOS".parse::<TargetPlatform>(), Ok(TargetPlatform::MacOs));
    assert_eq!("mingw".parse::<TargetPlatform>(), Ok(TargetPlatform::Mingw));
  }

  #[test]
  fn parses_target_triples() {
    assert_eq!("x86_64-w64-mingw32".parse::<TargetPlatform>(), Ok(TargetPlatform::Mingw));
    assert_eq!("aarch64-apple-darwin".parse::<TargetPlatform>(), Ok(TargetPlatform::MacOs));
    assert_eq!("x86_64-unknown-linux-gnu".parse::<TargetPlatform>(), Ok(TargetPlatform::Linux));
  }

  #[test]
  fn rejects_unknown_platform() {
    let err = "haiku".parse::<TargetPlatform>().unwrap_err();
    assert_eq!(err, UnknownPlatform("haiku".to_string()));
  }

  #[test]
  fn macos_uses_darwin_identifier() {
    assert_eq!(TargetPlatform::MacOs.as_str(), "darwin");
    assert_eq!(TargetPlatform::MacOs.to_string(), "darwin");
  }
}

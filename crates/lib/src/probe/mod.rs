//! Probing the host system.
//!
//! A [`Check`] describes one question about the host: is a header usable, does
//! a library link, does pkg-config know a package, does a code fragment
//! compile. A [`Probe`] answers it. The resolver only talks to the trait, so
//! the real [`SystemProbe`] can be swapped for a [`SimulatedProbe`] in tests
//! and what-if runs.

mod simulated;
mod system;

pub use simulated::{SeenCheck, SimulatedProbe};
pub use system::{SystemProbe, default_triple};

use std::fmt;

use serde::Serialize;

use crate::env::{ConfigEnv, UseLib};

/// Language a check is compiled as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Lang {
  C,
  Cxx,
}

impl Lang {
  pub fn extension(&self) -> &'static str {
    match self {
      Lang::C => "c",
      Lang::Cxx => "cpp",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckKind {
  /// A header that must be includable.
  Header { name: String },
  /// A library that must link.
  Library { name: String },
  /// A pkg-config package.
  Package { name: String, cflags: bool, libs: bool },
  /// A program that must compile and link against the listed stores.
  Fragment {
    label: String,
    source: String,
    uses: Vec<String>,
  },
}

/// A single probe request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
  pub kind: CheckKind,
  pub lang: Lang,
  pub store: String,
  pub mandatory: bool,
}

impl Check {
  pub fn header(name: &str) -> Self {
    Self::new(CheckKind::Header { name: name.to_string() }, store_name(name))
  }

  pub fn library(name: &str) -> Self {
    Self::new(CheckKind::Library { name: name.to_string() }, store_name(name))
  }

  /// A package queried with `--cflags --libs`.
  pub fn package(name: &str) -> Self {
    Self::new(
      CheckKind::Package {
        name: name.to_string(),
        cflags: true,
        libs: true,
      },
      store_name(name),
    )
  }

  pub fn fragment(label: &str, source: &str) -> Self {
    Self::new(
      CheckKind::Fragment {
        label: label.to_string(),
        source: source.to_string(),
        uses: Vec::new(),
      },
      store_name(label),
    )
    .cxx()
  }

  fn new(kind: CheckKind, store: String) -> Self {
    Self {
      kind,
      lang: Lang::C,
      store,
      mandatory: false,
    }
  }

  pub fn cxx(mut self) -> Self {
    self.lang = Lang::Cxx;
    self
  }

  pub fn store(mut self, store: &str) -> Self {
    self.store = store.to_string();
    self
  }

  pub fn mandatory(mut self) -> Self {
    self.mandatory = true;
    self
  }

  /// Only collect compile flags from a package (`--cflags`).
  pub fn cflags_only(mut self) -> Self {
    if let CheckKind::Package { libs, .. } = &mut self.kind {
      *libs = false;
    }
    self
  }

  /// Build a fragment against a previously recorded store.
  pub fn uses(mut self, store: &str) -> Self {
    if let CheckKind::Fragment { uses, .. } = &mut self.kind {
      uses.push(store.to_string());
    }
    self
  }

  /// Name of the thing being checked: header, library or package name, or
  /// the label of a fragment.
  /// Macro defined when the check succeeds: `HAVE_<HEADER>` for headers
  /// (`HAVE_CURL_CURL_H`), `HAVE_<STORE>` for everything else.
  pub fn define_name(&self) -> String {
    match &self.kind {
      CheckKind::Header { name } => format!("HAVE_{}", store_name(name)),
      _ => format!("HAVE_{}", self.store),
    }
  }

  pub fn name(&self) -> &str {
    match &self.kind {
      CheckKind::Header { name } | CheckKind::Library { name } | CheckKind::Package { name, .. } => name,
      CheckKind::Fragment { label, .. } => label,
    }
  }
}

impl fmt::Display for Check {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.kind {
      CheckKind::Header { name } => write!(f, "header {}", name),
      CheckKind::Library { name } => write!(f, "library {}", name),
      CheckKind::Package { name, .. } => write!(f, "'{}'", name),
      CheckKind::Fragment { label, .. } => write!(f, "{}", label),
    }
  }
}

/// Answer to a [`Check`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
  Found(UseLib),
  Missing { reason: String },
}

impl ProbeOutcome {
  pub fn missing(reason: impl Into<String>) -> Self {
    Self::Missing { reason: reason.into() }
  }

  pub fn is_found(&self) -> bool {
    matches!(self, Self::Found(_))
  }
}

/// Something that can answer checks about the host system.
///
/// `env` is the configuration accumulated so far; compile checks must honour
/// its flags (an SDK include path appended earlier, for example).
pub trait Probe {
  fn run(&mut self, check: &Check, env: &ConfigEnv) -> ProbeOutcome;
}

/// Uselib store name for a header, library or package name:
/// uppercased, with every non-alphanumeric character replaced by `_`.
pub fn store_name(name: &str) -> String {
  name
    .chars()
    .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
    .collect()
}

//! The configuration environment.
//!
//! [`ConfigEnv`] accumulates the results of one configuration run: capability
//! flags, compiler flags, macro definitions and the per-library "uselib"
//! stores recorded by successful probes. When the run completes it is frozen
//! into an [`Environment`], which downstream build steps only read.

mod types;

pub use types::{Capabilities, CheckRecord, DefineValue, UseLib};

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::platform::TargetPlatform;
use crate::probe::Lang;

/// Mutable accumulator threaded through every resolver step.
#[derive(Debug, Clone, Default)]
pub struct ConfigEnv {
  caps: Capabilities,
  cflags: Vec<String>,
  cxxflags: Vec<String>,
  defines: BTreeMap<String, DefineValue>,
  uselib: BTreeMap<String, UseLib>,
  have: BTreeSet<String>,
  checks: Vec<CheckRecord>,
}

impl ConfigEnv {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn caps(&self) -> &Capabilities {
    &self.caps
  }

  pub fn caps_mut(&mut self) -> &mut Capabilities {
    &mut self.caps
  }

  /// Set a macro definition. Later writes replace earlier ones.
  pub fn define(&mut self, name: &str, value: impl Into<DefineValue>) {
    self.defines.insert(name.to_string(), value.into());
  }

  pub fn defines(&self) -> &BTreeMap<String, DefineValue> {
    &self.defines
  }

  pub fn get_define(&self, name: &str) -> Option<&DefineValue> {
    self.defines.get(name)
  }

  /// Append a flag to both the C and C++ flag lists, skipping duplicates.
  pub fn append_unique_cflag(&mut self, flag: &str) {
    append_unique(&mut self.cflags, flag);
    append_unique(&mut self.cxxflags, flag);
  }

  /// Append a flag to the C++ flag list only, skipping duplicates.
  pub fn append_unique_cxxflag(&mut self, flag: &str) {
    append_unique(&mut self.cxxflags, flag);
  }

  pub fn cflags(&self) -> &[String] {
    &self.cflags
  }

  pub fn cxxflags(&self) -> &[String] {
    &self.cxxflags
  }

  /// Flags a compiler for `lang` should see at this point of the run.
  pub fn flags_for(&self, lang: Lang) -> &[String] {
    match lang {
      Lang::C => &self.cflags,
      Lang::Cxx => &self.cxxflags,
    }
  }

  /// Record a found probe under `store`, merging into any earlier entry for
  /// the same store.
  pub fn store(&mut self, store: &str, lib: UseLib) {
    self.uselib.entry(store.to_string()).or_default().merge(lib);
    self.have.insert(store.to_string());
  }

  /// Whether a probe recorded a store under `store`.
  pub fn has(&self, store: &str) -> bool {
    self.have.contains(store)
  }

  pub fn uselib(&self, store: &str) -> Option<&UseLib> {
    self.uselib.get(store)
  }

  pub fn record_check(&mut self, record: CheckRecord) {
    self.checks.push(record);
  }

  pub fn checks(&self) -> &[CheckRecord] {
    &self.checks
  }

  /// Freeze the accumulated state.
  pub fn finish(self, platform: TargetPlatform) -> Environment {
    Environment {
      platform,
      capabilities: self.caps,
      cflags: self.cflags,
      cxxflags: self.cxxflags,
      defines: self.defines,
      uselib: self.uselib,
      checks: self.checks,
    }
  }
}

fn append_unique(list: &mut Vec<String>, flag: &str) {
  if !list.iter().any(|f| f == flag) {
    list.push(flag.to_string());
  }
}

/// Read-only result of a completed configuration run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Environment {
  platform: TargetPlatform,
  capabilities: Capabilities,
  cflags: Vec<String>,
  cxxflags: Vec<String>,
  defines: BTreeMap<String, DefineValue>,
  uselib: BTreeMap<String, UseLib>,
  checks: Vec<CheckRecord>,
}

impl Environment {
  pub fn platform(&self) -> TargetPlatform {
    self.platform
  }

  pub fn capabilities(&self) -> &Capabilities {
    &self.capabilities
  }

  pub fn cflags(&self) -> &[String] {
    &self.cflags
  }

  pub fn cxxflags(&self) -> &[String] {
    &self.cxxflags
  }

  pub fn defines(&self) -> &BTreeMap<String, DefineValue> {
    &self.defines
  }

  pub fn define(&self, name: &str) -> Option<&DefineValue> {
    self.defines.get(name)
  }

  pub fn uselib(&self, store: &str) -> Option<&UseLib> {
    self.uselib.get(store)
  }

  pub fn uselibs(&self) -> &BTreeMap<String, UseLib> {
    &self.uselib
  }

  pub fn checks(&self) -> &[CheckRecord] {
    &self.checks
  }
}

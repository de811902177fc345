//! A probe that answers from a list instead of the host system.

use std::collections::BTreeSet;

use super::{Check, CheckKind, Probe, ProbeOutcome};
use crate::env::{ConfigEnv, UseLib};

/// A check as the simulated probe saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenCheck {
  pub name: String,
  pub store: String,
  /// Compiler flags in effect when the check ran.
  pub flags: Vec<String>,
}

/// Reports every check as found unless its name or store was marked missing.
///
/// Every check is recorded in order, along with the compiler flags visible to
/// it, so callers can assert on probe order and flag propagation.
#[derive(Debug, Clone, Default)]
pub struct SimulatedProbe {
  missing: BTreeSet<String>,
  seen: Vec<SeenCheck>,
}

impl SimulatedProbe {
  /// A probe for which everything is present.
  pub fn new() -> Self {
    Self::default()
  }

  /// A probe for which the named checks fail. Names match either the checked
  /// header/library/package name or the store name.
  pub fn missing<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      missing: names.into_iter().map(Into::into).collect(),
      seen: Vec::new(),
    }
  }

  pub fn seen(&self) -> &[SeenCheck] {
    &self.seen
  }

  pub fn was_checked(&self, name: &str) -> bool {
    self.seen.iter().any(|c| c.name == name)
  }

  /// Flags that were visible when `name` was checked.
  pub fn flags_at(&self, name: &str) -> Option<&[String]> {
    self.seen.iter().find(|c| c.name == name).map(|c| c.flags.as_slice())
  }
}

impl Probe for SimulatedProbe {
  fn run(&mut self, check: &Check, env: &ConfigEnv) -> ProbeOutcome {
    let flags = env.flags_for(check.lang);
    self.seen.push(SeenCheck {
      name: check.name().to_string(),
      store: check.store.clone(),
      flags: flags.to_vec(),
    });

    if self.missing.contains(check.name()) || self.missing.contains(&check.store) {
      return ProbeOutcome::missing("simulated as missing");
    }

    let lib = match &check.kind {
      CheckKind::Library { name } => UseLib::library(name),
      CheckKind::Package { name, libs: true, .. } => UseLib::library(name),
      _ => UseLib::default(),
    };
    ProbeOutcome::Found(lib)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn matches_by_name_or_store() {
    let mut probe = SimulatedProbe::missing(["jack", "AEFFECT_H"]);
    let env = ConfigEnv::new();

    assert!(!probe.run(&Check::package("jack"), &env).is_found());
    assert!(!probe.run(&Check::header("pluginterfaces/vst2.x/aeffect.h").store("AEFFECT_H"), &env).is_found());
    assert!(probe.run(&Check::library("dl"), &env).is_found());
    assert_eq!(probe.seen().len(), 3);
  }

  #[test]
  fn records_flags_per_language() {
    let mut probe = SimulatedProbe::new();
    let mut env = ConfigEnv::new();
    env.append_unique_cxxflag("-Wno-register");

    probe.run(&Check::header("stdbool.h"), &env);
    probe.run(&Check::header("boost/signals2.hpp").cxx(), &env);

    assert_eq!(probe.flags_at("stdbool.h"), Some(&[][..]));
    assert_eq!(probe.flags_at("boost/signals2.hpp").unwrap(), ["-Wno-register"]);
  }

  #[test]
  fn cflags_only_package_records_no_libs() {
    let mut probe = SimulatedProbe::new();
    let env = ConfigEnv::new();
    let outcome = probe.run(&Check::package("lv2").cflags_only(), &env);
    assert_eq!(outcome, ProbeOutcome::Found(UseLib::default()));
  }
}

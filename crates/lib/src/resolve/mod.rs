//! Feature resolution.
//!
//! Resolution runs in two steps over one exclusively owned [`ConfigEnv`]:
//! [`resolve_common_features`] probes what every platform needs, then
//! [`resolve_platform_features`] extends the result for the target platform.
//! [`configure`] runs both and freezes the outcome.
//!
//! Probes run strictly in order because later checks see the compiler flags
//! earlier steps appended. A missing mandatory dependency aborts the whole
//! run; optional misses only leave the corresponding feature disabled.

mod common;
mod platform;

pub use common::resolve_common_features;
pub use platform::{MINGW_LIBS, resolve_platform_features};

use thiserror::Error;
use tracing::{info, warn};

use crate::env::{CheckRecord, ConfigEnv, Environment};
use crate::options::BuildOptions;
use crate::platform::TargetPlatform;
use crate::probe::{Check, Probe, ProbeOutcome};

#[derive(Debug, Error)]
pub enum ConfigureError {
  /// A dependency the build cannot do without is not available.
  #[error("missing mandatory dependency: {check} ({reason})")]
  MissingMandatory { check: String, reason: String },
}

/// Run the full configuration for `platform`.
pub fn configure(
  platform: TargetPlatform,
  probe: &mut dyn Probe,
  options: &BuildOptions,
) -> Result<Environment, ConfigureError> {
  info!(%platform, "configuring");
  let env = resolve_common_features(probe, options)?;
  let env = resolve_platform_features(platform, probe, options, env)?;
  Ok(env.finish(platform))
}

/// Run one check, record it, and store its result.
///
/// Returns whether the check was found. A missing mandatory check is an
/// error.
pub(crate) fn run_check(probe: &mut dyn Probe, env: &mut ConfigEnv, check: Check) -> Result<bool, ConfigureError> {
  let outcome = probe.run(&check, env);

  let (found, reason) = match outcome {
    ProbeOutcome::Found(lib) => {
      env.store(&check.store, lib);
      env.define(&check.define_name(), true);
      (true, None)
    }
    ProbeOutcome::Missing { reason } => (false, Some(reason)),
  };

  info!(result = if found { "yes" } else { "not found" }, "Checking for {}", check);

  env.record_check(CheckRecord {
    label: check.to_string(),
    store: check.store.clone(),
    found,
    mandatory: check.mandatory,
    reason: reason.clone(),
  });

  if !found && check.mandatory {
    let reason = reason.unwrap_or_default();
    warn!(check = %check, %reason, "mandatory check failed");
    return Err(ConfigureError::MissingMandatory {
      check: check.to_string(),
      reason,
    });
  }

  Ok(found)
}

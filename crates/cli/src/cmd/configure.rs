//! Implementation of the `elconf configure` command.
//!
//! Probes the system (or a simulated one), resolves the build features and
//! reports them as a check listing or as JSON, optionally writing the
//! definitions to a C header.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use elconf_lib::header::write_config_header;
use elconf_lib::probe::{Probe, SimulatedProbe, SystemProbe};
use elconf_lib::{BuildOptions, Environment, TargetPlatform, configure};

use super::target_platform;
use crate::ConfigureArgs;
use crate::output::{print_check, print_info, print_json, print_stat, print_success, print_warning, yes_no};

pub fn cmd_configure(args: &ConfigureArgs, verbose: bool) -> Result<()> {
  let platform = target_platform(args.platform)?;
  let options = build_options(args)?;
  debug!(?options, %platform, "resolved options");

  let mut probe: Box<dyn Probe> = if args.simulate {
    Box::new(SimulatedProbe::missing(args.assume_missing.iter().cloned()))
  } else {
    let probe = match &args.target_triple {
      Some(triple) => {
        if let Some(mismatch) = triple_mismatch(platform, triple) {
          warn!("{}", mismatch);
        }
        SystemProbe::with_target(triple)
      }
      None => SystemProbe::for_platform(platform),
    };
    Box::new(probe.context("Failed to create probe scratch directory")?)
  };

  let env = configure(platform, probe.as_mut(), &options).context("Configuration failed")?;

  if let Some(path) = &args.header {
    write_config_header(&env, path).with_context(|| format!("Failed to write config header: {}", path.display()))?;
  }

  if args.json {
    return print_json(&env);
  }

  print_report(&env, verbose);
  if let Some(path) = &args.header {
    print_info(&format!("Wrote {}", path.display()));
  }
  print_success(&format!("Configured for {}", platform));
  Ok(())
}

/// Describe a `--target-triple` that does not build for the configured platform.
fn triple_mismatch(platform: TargetPlatform, triple: &str) -> Option<String> {
  match triple.parse::<TargetPlatform>() {
    Ok(p) if p == platform => None,
    Ok(p) => Some(format!("target triple {} builds for {}, not {}", triple, p, platform)),
    Err(_) => Some(format!("cannot tell which platform target triple {} builds for", triple)),
  }
}

/// Options from the file, if any, with command-line flags layered on top.
fn build_options(args: &ConfigureArgs) -> Result<BuildOptions> {
  let from_flags = BuildOptions {
    no_lua: args.no_lua,
    no_jack: args.no_jack,
    no_vst: args.no_vst,
    no_vst3: args.no_vst3,
    no_lv2: args.no_lv2,
    no_ladspa: args.no_ladspa,
    no_alsa: args.no_alsa,
    vstsdk24: args.vstsdk24.clone(),
  };

  match &args.options {
    Some(path) => Ok(BuildOptions::from_file(path)?.merged_with(from_flags)),
    None => Ok(from_flags),
  }
}

fn print_report(env: &Environment, verbose: bool) {
  for check in env.checks() {
    print_check(&check.label, check.found, check.mandatory);
    if verbose && !check.found {
      if let Some(reason) = &check.reason {
        print_stat("reason", reason);
      }
    }
  }

  let caps = env.capabilities();
  println!();
  println!("Features:");
  print_stat("Lua", yes_no(caps.lua));
  print_stat("JACK", yes_no(caps.jack));
  print_stat("VST2", yes_no(caps.vst));
  print_stat("VST3", yes_no(caps.vst3));
  print_stat("LV2", yes_no(caps.lv2));
  print_stat("ALSA", yes_no(caps.alsa));
  print_stat("LADSPA", yes_no(caps.ladspa));

  if verbose {
    println!();
    println!("Defines:");
    for (name, value) in env.defines() {
      print_stat(name, &value.render());
    }
    if !env.cflags().is_empty() || !env.cxxflags().is_empty() {
      println!();
      print_stat("CFLAGS", &env.cflags().join(" "));
      print_stat("CXXFLAGS", &env.cxxflags().join(" "));
    }
  }

  let missed = env.checks().iter().filter(|c| !c.found).count();
  if missed > 0 {
    println!();
    print_warning(&format!("{} optional check(s) not found", missed));
  }
}

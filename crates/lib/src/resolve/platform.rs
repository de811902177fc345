//! Per-platform checks, run after the common ones.

use tracing::{debug, warn};

use super::{ConfigureError, run_check};
use crate::env::ConfigEnv;
use crate::options::BuildOptions;
use crate::platform::TargetPlatform;
use crate::probe::{Check, Probe};

/// Windows system libraries linked into mingw builds.
pub const MINGW_LIBS: [&str; 13] = [
  "uuid", "wsock32", "wininet", "version", "ole32", "ws2_32", "oleaut32", "imm32", "comdlg32", "shlwapi", "rpcrt4",
  "winmm", "gdi32",
];

const MINGW_WARNING_FLAGS: [&str; 2] = ["-Wno-multichar", "-Wno-deprecated-declarations"];

/// X11 packages the Linux GUI cannot build without.
const LINUX_X11_PACKAGES: [&str; 6] = ["x11", "xext", "xrandr", "xcomposite", "xinerama", "xcursor"];

const LINUX_X11_MACROS: [&str; 5] = [
  "JUCE_USE_XRANDR",
  "JUCE_USE_XINERAMA",
  "JUCE_USE_XSHM",
  "JUCE_USE_XRENDER",
  "JUCE_USE_XCURSOR",
];

/// Extend `env` with the checks and definitions specific to `platform`.
pub fn resolve_platform_features(
  platform: TargetPlatform,
  probe: &mut dyn Probe,
  options: &BuildOptions,
  mut env: ConfigEnv,
) -> Result<ConfigEnv, ConfigureError> {
  match platform {
    TargetPlatform::Mingw => resolve_mingw(probe, &mut env)?,
    TargetPlatform::MacOs => resolve_mac(probe, &mut env)?,
    TargetPlatform::Linux => resolve_linux(probe, options, &mut env)?,
  }
  Ok(env)
}

fn resolve_mingw(probe: &mut dyn Probe, env: &mut ConfigEnv) -> Result<(), ConfigureError> {
  for lib in MINGW_LIBS {
    let store = lib.to_uppercase();
    if !run_check(probe, env, Check::library(lib).cxx().store(&store))? {
      warn!(library = lib, "windows system library not found; linking will likely fail");
    }
  }

  env.define("JUCE_PLUGINHOST_VST3", 0);
  // Keyed on a `VST` store, not the VST capability resolved by the common
  // step; nothing records that store today, so this stays off.
  let have_vst = env.has("VST");
  env.define("JUCE_PLUGINHOST_VST", have_vst);
  env.define("JUCE_PLUGINHOST_AU", 0);

  for flag in MINGW_WARNING_FLAGS {
    env.append_unique_cflag(flag);
  }
  Ok(())
}

fn resolve_mac(probe: &mut dyn Probe, env: &mut ConfigEnv) -> Result<(), ConfigureError> {
  run_check(probe, env, Check::library("readline").cxx().store("READLINE").mandatory())?;

  if env.caps().jack {
    // JackOSX headers use `register`, which C++17 rejects.
    env.append_unique_cxxflag("-Wno-register");
  }
  Ok(())
}

fn resolve_linux(probe: &mut dyn Probe, options: &BuildOptions, env: &mut ConfigEnv) -> Result<(), ConfigureError> {
  run_check(probe, env, Check::library("pthread").mandatory())?;
  run_check(probe, env, Check::library("dl").store("DL").mandatory())?;

  let readline = run_check(probe, env, Check::library("readline").cxx().store("READLINE"))?;
  env.define("LUA_USE_READLINE", readline);

  run_check(probe, env, Check::header("curl/curl.h").store("CURL").mandatory())?;
  run_check(probe, env, Check::library("curl").store("CURL").mandatory())?;

  let ladspa = if options.no_ladspa {
    debug!("LADSPA hosting disabled");
    false
  } else {
    run_check(probe, env, Check::header("ladspa.h").store("LADSPA"))?
  };
  env.caps_mut().ladspa = ladspa;
  env.define("JUCE_PLUGINHOST_LADSPA", ladspa);

  let alsa = if options.no_alsa {
    debug!("ALSA disabled");
    false
  } else {
    run_check(probe, env, Check::package("alsa").store("ALSA"))?
  };
  env.caps_mut().alsa = alsa;
  env.define("JUCE_ALSA", alsa);

  if env.caps().lua {
    env.define("LUA_USE_LINUX", true);
  }

  run_check(probe, env, Check::package("freetype2").mandatory())?;
  for package in LINUX_X11_PACKAGES {
    run_check(probe, env, Check::package(package).mandatory())?;
  }
  run_check(probe, env, Check::package("gtk+-3.0").store("GTK"))?;

  for name in LINUX_X11_MACROS {
    env.define(name, true);
  }
  env.define("JLV2_GTKUI", false);
  Ok(())
}

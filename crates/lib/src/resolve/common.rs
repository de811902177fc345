//! Checks shared by every target platform.

use tracing::debug;

use super::{ConfigureError, run_check};
use crate::env::ConfigEnv;
use crate::options::BuildOptions;
use crate::probe::{Check, Probe};

const SUIL_INIT_PROGRAM: &str = r#"
#include <suil/suil.h>
int main(int, char**) {
    suil_init (nullptr, nullptr, SUIL_ARG_NONE);
    return 0;
}
"#;

/// Probe the platform-independent dependencies and resolve the shared
/// feature flags into a fresh [`ConfigEnv`].
pub fn resolve_common_features(probe: &mut dyn Probe, options: &BuildOptions) -> Result<ConfigEnv, ConfigureError> {
  let mut env = ConfigEnv::new();

  run_check(probe, &mut env, Check::library("curl"))?;
  run_check(probe, &mut env, Check::header("stdbool.h").mandatory())?;
  run_check(
    probe,
    &mut env,
    Check::header("boost/signals2.hpp").cxx().store("BOOST_SIGNALS").mandatory(),
  )?;
  run_check(probe, &mut env, Check::header("iasiodrv.h").cxx().store("ASIO"))?;

  env.define("JUCE_WEB_BROWSER", 0);

  // Lua
  let lua = !options.no_lua;
  env.caps_mut().lua = lua;
  env.define("EL_USE_LUA", lua);

  // JACK
  let have_jack = run_check(probe, &mut env, Check::package("jack").store("JACK"))?;
  let jack = have_jack && !options.no_jack;
  env.caps_mut().jack = jack;
  env.define("KV_JACK_AUDIO", jack);
  env.define("EL_USE_JACK", jack);

  // VST2 hosting
  let vst = if options.no_vst {
    debug!("VST2 hosting disabled");
    false
  } else {
    if let Some(sdk) = options.vst_sdk_path() {
      env.append_unique_cflag(&format!("-I{}", sdk));
    }
    let aeffect = run_check(
      probe,
      &mut env,
      Check::header("pluginterfaces/vst2.x/aeffect.h").store("AEFFECT_H"),
    )?;
    let aeffectx = run_check(
      probe,
      &mut env,
      Check::header("pluginterfaces/vst2.x/aeffectx.h").store("AEFFECTX_H"),
    )?;
    aeffect && aeffectx
  };
  env.caps_mut().vst = vst;
  env.define("JUCE_PLUGINHOST_VST", vst);

  // VST3 hosting
  let vst3 = !options.no_vst3;
  env.caps_mut().vst3 = vst3;
  env.define("JUCE_PLUGINHOST_VST3", vst3);

  // LV2 hosting
  let lv2 = if options.no_lv2 {
    debug!("LV2 hosting disabled");
    false
  } else {
    run_check(probe, &mut env, Check::package("lv2").store("LV2").cflags_only())?;
    let lilv = run_check(probe, &mut env, Check::package("lilv-0").store("LILV"))?;
    let suil = run_check(probe, &mut env, Check::package("suil-0").store("SUIL"))?;
    if suil {
      let suil_init = run_check(
        probe,
        &mut env,
        Check::fragment("suil_init(...)", SUIL_INIT_PROGRAM)
          .uses("SUIL")
          .store("SUIL_INIT"),
      )?;
      env.define("JLV2_SUIL_INIT", suil_init);
    }
    lilv && suil
  };
  env.caps_mut().lv2 = lv2;
  env.define("JLV2_PLUGINHOST_LV2", lv2);

  // Platform routines decide these.
  env.caps_mut().alsa = false;
  env.caps_mut().ladspa = false;

  Ok(env)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::env::DefineValue;
  use crate::probe::SimulatedProbe;

  fn defined_true(env: &ConfigEnv, name: &str) -> bool {
    env.get_define(name).is_some_and(DefineValue::is_true)
  }

  #[test]
  fn all_found_enables_everything() {
    let mut probe = SimulatedProbe::new();
    let env = resolve_common_features(&mut probe, &BuildOptions::default()).unwrap();

    let caps = env.caps();
    assert!(caps.lua && caps.jack && caps.vst && caps.vst3 && caps.lv2);
    assert!(!caps.alsa && !caps.ladspa);
    assert_eq!(env.get_define("JUCE_WEB_BROWSER"), Some(&DefineValue::Int(0)));
    assert!(defined_true(&env, "JLV2_SUIL_INIT"));
    assert!(defined_true(&env, "KV_JACK_AUDIO"));
    assert!(defined_true(&env, "EL_USE_JACK"));
  }

  #[test]
  fn no_vst_skips_header_probes() {
    let mut probe = SimulatedProbe::new();
    let options = BuildOptions {
      no_vst: true,
      vstsdk24: Some("/opt/vstsdk".into()),
      ..Default::default()
    };
    let env = resolve_common_features(&mut probe, &options).unwrap();

    assert!(!env.caps().vst);
    assert!(!defined_true(&env, "JUCE_PLUGINHOST_VST"));
    assert!(!probe.was_checked("pluginterfaces/vst2.x/aeffect.h"));
    assert!(!probe.was_checked("pluginterfaces/vst2.x/aeffectx.h"));
    assert!(env.cflags().is_empty());
  }

  #[test]
  fn vst_needs_both_headers() {
    let mut probe = SimulatedProbe::missing(["AEFFECTX_H"]);
    let env = resolve_common_features(&mut probe, &BuildOptions::default()).unwrap();
    assert!(!env.caps().vst);
    assert!(env.has("AEFFECT_H"));
  }

  #[test]
  fn vst_sdk_path_precedes_header_probes() {
    let mut probe = SimulatedProbe::new();
    let options = BuildOptions {
      vstsdk24: Some("/opt/vstsdk".into()),
      ..Default::default()
    };
    let env = resolve_common_features(&mut probe, &options).unwrap();

    let flags = probe.flags_at("pluginterfaces/vst2.x/aeffect.h").unwrap();
    assert_eq!(flags, ["-I/opt/vstsdk"]);
    assert!(!probe.flags_at("stdbool.h").unwrap().contains(&"-I/opt/vstsdk".to_string()));
    assert_eq!(env.cflags(), ["-I/opt/vstsdk"]);
    assert_eq!(env.cxxflags(), ["-I/opt/vstsdk"]);
  }

  #[test]
  fn jack_requires_probe_and_option() {
    let mut probe = SimulatedProbe::missing(["jack"]);
    let env = resolve_common_features(&mut probe, &BuildOptions::default()).unwrap();
    assert!(!env.caps().jack);

    let mut probe = SimulatedProbe::new();
    let options = BuildOptions {
      no_jack: true,
      ..Default::default()
    };
    let env = resolve_common_features(&mut probe, &options).unwrap();
    assert!(!env.caps().jack);
    assert!(env.has("JACK"));
  }

  #[test]
  fn lv2_ignores_lv2_package_result() {
    let mut probe = SimulatedProbe::missing(["lv2"]);
    let env = resolve_common_features(&mut probe, &BuildOptions::default()).unwrap();
    assert!(env.caps().lv2);
  }

  #[test]
  fn lv2_needs_lilv_and_suil() {
    for missing in ["lilv-0", "suil-0"] {
      let mut probe = SimulatedProbe::missing([missing]);
      let env = resolve_common_features(&mut probe, &BuildOptions::default()).unwrap();
      assert!(!env.caps().lv2, "{} missing should disable LV2", missing);
    }
  }

  #[test]
  fn suil_init_only_checked_with_suil() {
    let mut probe = SimulatedProbe::missing(["suil-0"]);
    let env = resolve_common_features(&mut probe, &BuildOptions::default()).unwrap();
    assert!(!probe.was_checked("suil_init(...)"));
    assert_eq!(env.get_define("JLV2_SUIL_INIT"), None);
  }

  #[test]
  fn suil_init_variant_detected_separately() {
    let mut probe = SimulatedProbe::missing(["SUIL_INIT"]);
    let env = resolve_common_features(&mut probe, &BuildOptions::default()).unwrap();
    assert!(env.caps().lv2);
    assert_eq!(env.get_define("JLV2_SUIL_INIT"), Some(&DefineValue::Bool(false)));
  }

  #[test]
  fn no_lv2_skips_packages() {
    let mut probe = SimulatedProbe::new();
    let options = BuildOptions {
      no_lv2: true,
      ..Default::default()
    };
    let env = resolve_common_features(&mut probe, &options).unwrap();
    assert!(!env.caps().lv2);
    assert!(!probe.was_checked("lilv-0"));
  }

  #[test]
  fn disabled_lua_and_vst3() {
    let mut probe = SimulatedProbe::new();
    let options = BuildOptions {
      no_lua: true,
      no_vst3: true,
      ..Default::default()
    };
    let env = resolve_common_features(&mut probe, &options).unwrap();
    assert!(!env.caps().lua);
    assert!(!env.caps().vst3);
    assert_eq!(env.get_define("EL_USE_LUA"), Some(&DefineValue::Bool(false)));
  }

  #[test]
  fn optional_curl_and_asio_misses_are_tolerated() {
    let mut probe = SimulatedProbe::missing(["curl", "iasiodrv.h"]);
    assert!(resolve_common_features(&mut probe, &BuildOptions::default()).is_ok());
  }

  #[test]
  fn mandatory_headers_abort() {
    for missing in ["stdbool.h", "boost/signals2.hpp"] {
      let mut probe = SimulatedProbe::missing([missing]);
      let err = resolve_common_features(&mut probe, &BuildOptions::default()).unwrap_err();
      assert!(err.to_string().contains(missing));
      assert!(!probe.was_checked("jack"), "probing must stop at {}", missing);
    }
  }
}

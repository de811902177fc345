//! C configuration header output.

use std::path::Path;

use tracing::info;

use crate::consts::APP_NAME;
use crate::env::Environment;

/// Render the environment's definitions as a C header.
pub fn render_config_header(env: &Environment) -> String {
  let guard = format!("_{}_CONFIG_H_", APP_NAME.to_uppercase());
  let mut out = String::new();
  out.push_str(&format!("/* generated by elconf for {} */\n", env.platform()));
  out.push_str(&format!("#ifndef {}\n#define {}\n\n", guard, guard));
  for (name, value) in env.defines() {
    out.push_str(&format!("#define {} {}\n", name, value.render()));
  }
  out.push_str(&format!("\n#endif /* {} */\n", guard));
  out
}

/// Write the rendered header to `path`, creating parent directories.
pub fn write_config_header(env: &Environment, path: &Path) -> std::io::Result<()> {
  if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
    std::fs::create_dir_all(parent)?;
  }
  std::fs::write(path, render_config_header(env))?;
  info!(path = %path.display(), "wrote config header");
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::env::ConfigEnv;
  use crate::platform::TargetPlatform;
  use tempfile::TempDir;

  fn sample() -> Environment {
    let mut env = ConfigEnv::new();
    env.define("JUCE_WEB_BROWSER", 0);
    env.define("EL_USE_LUA", true);
    env.define("JUCE_ALSA", false);
    env.finish(TargetPlatform::Linux)
  }

  #[test]
  fn renders_guarded_defines() {
    let header = render_config_header(&sample());
    assert!(header.contains("#ifndef _ELEMENT_CONFIG_H_"));
    assert!(header.contains("#define EL_USE_LUA 1\n"));
    assert!(header.contains("#define JUCE_ALSA 0\n"));
    assert!(header.contains("#define JUCE_WEB_BROWSER 0\n"));
    assert!(header.trim_end().ends_with("#endif /* _ELEMENT_CONFIG_H_ */"));
  }

  #[test]
  fn writes_into_new_directory() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("build").join("config.h");
    write_config_header(&sample(), &path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("EL_USE_LUA"));
  }
}

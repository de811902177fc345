use anyhow::Result;
use elconf_lib::TargetPlatform;
use elconf_lib::sources::list_optional_module_sources;

use super::target_platform;

pub fn cmd_sources(prefix: &str, ext: Option<&str>, platform: Option<TargetPlatform>) -> Result<()> {
  let platform = target_platform(platform)?;
  for path in list_optional_module_sources(prefix, ext, platform) {
    println!("{}", path);
  }
  Ok(())
}

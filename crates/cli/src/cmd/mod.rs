mod configure;
mod info;
mod libs;
mod sources;

pub use configure::cmd_configure;
pub use info::cmd_info;
pub use libs::cmd_libs;
pub use sources::cmd_sources;

use anyhow::{Result, anyhow};
use elconf_lib::TargetPlatform;

/// The requested platform, or the one we are running on.
fn target_platform(requested: Option<TargetPlatform>) -> Result<TargetPlatform> {
  requested
    .or_else(TargetPlatform::current)
    .ok_or_else(|| anyhow!("Could not detect platform; pass --platform"))
}

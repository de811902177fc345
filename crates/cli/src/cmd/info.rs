use elconf_lib::TargetPlatform;
use elconf_lib::consts::{APP_NAME, PLUGIN_VERSION, VERSION};

use crate::output::print_stat;

pub fn cmd_info() {
  println!("Application:");
  print_stat("Name", APP_NAME);
  print_stat("Version", VERSION);
  print_stat("Plugin version", PLUGIN_VERSION);
  println!("System:");
  match TargetPlatform::current() {
    Some(platform) => print_stat("Platform", platform.as_str()),
    None => println!("Could not detect platform."),
  }
}

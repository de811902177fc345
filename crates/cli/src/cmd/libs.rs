use elconf_lib::sources::list_platform_library_names;

pub fn cmd_libs() {
  for name in list_platform_library_names() {
    println!("{}", name);
  }
}

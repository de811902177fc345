// Bake the compilation target into the crate so trial compiles at runtime can
// ask `cc` for a matching compiler.
fn main() {
  let target = std::env::var("TARGET").unwrap_or_default();
  println!("cargo:rustc-env=ELCONF_HOST_TRIPLE={}", target);
  println!("cargo:rerun-if-changed=build.rs");
}

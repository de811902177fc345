//! Probing the real host with a C/C++ compiler and pkg-config.

use std::io;
use std::path::PathBuf;

use tempfile::TempDir;
use tracing::{debug, warn};

use super::{Check, CheckKind, Lang, Probe, ProbeOutcome};
use crate::env::{ConfigEnv, UseLib};
use crate::platform::TargetPlatform;

const HOST_TRIPLE: &str = env!("ELCONF_HOST_TRIPLE");

/// Probe backed by trial compilation and `pkg-config`.
///
/// The compiler is located through `cc`, so the usual `CC`, `CXX`, `CFLAGS`
/// and `CXXFLAGS` environment variables apply. Trial programs are written to
/// a scratch directory that lives as long as the probe.
pub struct SystemProbe {
  target: String,
  scratch: TempDir,
  counter: usize,
}

impl SystemProbe {
  /// Probe for the triple `elconf` itself was built for.
  pub fn new() -> io::Result<Self> {
    Self::with_target(HOST_TRIPLE)
  }

  /// Probe with a compiler for `target` (e.g. `x86_64-w64-mingw32`).
  pub fn with_target(target: &str) -> io::Result<Self> {
    Ok(Self {
      target: target.to_string(),
      scratch: tempfile::Builder::new().prefix("elconf-").tempdir()?,
      counter: 0,
    })
  }

  /// Probe with a compiler for `platform`.
  ///
  /// The host triple is used when it already targets `platform`, otherwise
  /// a conventional triple for the host architecture (see [`default_triple`]).
  pub fn for_platform(platform: TargetPlatform) -> io::Result<Self> {
    let target = default_triple(platform, HOST_TRIPLE);
    if target != HOST_TRIPLE {
      warn!(
        %platform,
        target = %target,
        "cross-configuring; pkg-config still answers for the host unless PKG_CONFIG_PATH or PKG_CONFIG_SYSROOT_DIR point at the target"
      );
    }
    Self::with_target(&target)
  }

  pub fn target(&self) -> &str {
    &self.target
  }

  fn compiler(&self, lang: Lang) -> Result<cc::Tool, cc::Error> {
    cc::Build::new()
      .cpp(lang == Lang::Cxx)
      .target(&self.target)
      .host(HOST_TRIPLE)
      .opt_level(0)
      .debug(false)
      .cargo_metadata(false)
      .cargo_warnings(false)
      .try_get_compiler()
  }

  fn next_path(&mut self, lang: Lang) -> PathBuf {
    self.counter += 1;
    self
      .scratch
      .path()
      .join(format!("check_{}.{}", self.counter, lang.extension()))
  }

  /// Compile `source`, and link it when `link` is given.
  fn try_build(
    &mut self,
    lang: Lang,
    source: &str,
    env: &ConfigEnv,
    compile: &[String],
    link: Option<&[String]>,
  ) -> Result<(), String> {
    let tool = self.compiler(lang).map_err(|e| format!("no {:?} compiler: {}", lang, e))?;
    let src = self.next_path(lang);
    std::fs::write(&src, source).map_err(|e| format!("failed to write {}: {}", src.display(), e))?;

    let mut cmd = tool.to_command();
    cmd.args(env.flags_for(lang)).args(compile).arg(&src);
    match link {
      Some(link_args) => {
        cmd.arg("-o").arg(src.with_extension("out")).args(link_args);
      }
      None => {
        cmd.arg("-c").arg("-o").arg(src.with_extension("o"));
      }
    }
    cmd.current_dir(self.scratch.path());

    debug!(command = ?cmd, "trial compile");

    let output = cmd.output().map_err(|e| format!("failed to run compiler: {}", e))?;
    if output.status.success() {
      return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
      debug!(stderr = %stderr, "trial compile failed");
    }
    Err(first_line(&stderr).unwrap_or("compilation failed").to_string())
  }

  fn probe_package(&self, name: &str, cflags: bool, libs: bool) -> ProbeOutcome {
    let result = pkg_config::Config::new()
      .cargo_metadata(false)
      .env_metadata(false)
      .print_system_libs(false)
      .probe(name);

    match result {
      Ok(library) => {
        debug!(package = name, version = %library.version, "pkg-config found package");
        ProbeOutcome::Found(package_uselib(&library, cflags, libs))
      }
      Err(e) => ProbeOutcome::missing(package_error_reason(name, &e.to_string())),
    }
  }
}

impl Probe for SystemProbe {
  fn run(&mut self, check: &Check, env: &ConfigEnv) -> ProbeOutcome {
    let result = match &check.kind {
      CheckKind::Header { name } => self
        .try_build(check.lang, &header_program(name), env, &[], None)
        .map(|_| UseLib::default()),
      CheckKind::Library { name } => {
        let link = vec![format!("-l{}", name)];
        self
          .try_build(check.lang, MAIN_PROGRAM, env, &[], Some(link.as_slice()))
          .map(|_| UseLib::library(name))
      }
      CheckKind::Package { name, cflags, libs } => return self.probe_package(name, *cflags, *libs),
      CheckKind::Fragment { source, uses, .. } => {
        let mut compile = Vec::new();
        let mut link = Vec::new();
        for store in uses {
          if let Some(lib) = env.uselib(store) {
            compile.extend(lib.compile_args());
            link.extend(lib.link_args());
          }
        }
        self
          .try_build(check.lang, source, env, &compile, Some(link.as_slice()))
          .map(|_| UseLib::default())
      }
    };

    match result {
      Ok(lib) => ProbeOutcome::Found(lib),
      Err(reason) => ProbeOutcome::Missing { reason },
    }
  }
}

const MAIN_PROGRAM: &str = "int main(void) { return 0; }\n";

fn header_program(header: &str) -> String {
  format!("#include <{}>\n\nint main(void) {{ return 0; }}\n", header)
}

fn first_line(text: &str) -> Option<&str> {
  text.lines().map(str::trim).find(|l| !l.is_empty())
}

/// Triple to compile for when targeting `platform` from `host`.
///
/// Keeps `host` when it already targets `platform`, and otherwise swaps in the
/// usual vendor/OS parts for the host's architecture.
pub fn default_triple(platform: TargetPlatform, host: &str) -> String {
  if host.parse::<TargetPlatform>().ok() == Some(platform) {
    return host.to_string();
  }
  let arch = host.split('-').next().unwrap_or("x86_64");
  match platform {
    TargetPlatform::Linux => format!("{}-unknown-linux-gnu", arch),
    TargetPlatform::MacOs => format!("{}-apple-darwin", arch),
    TargetPlatform::Mingw => format!("{}-w64-mingw32", arch),
  }
}

/// Pick the line of a pkg-config failure that says the package is missing;
/// the first line is usually just the exit status.
fn package_error_reason(name: &str, text: &str) -> String {
  let mut named = text.lines().map(str::trim).filter(|l| l.contains(name));
  let missing = named.clone().find(|l| l.contains("not found"));
  missing
    .or_else(|| named.next())
    .or_else(|| first_line(text))
    .unwrap_or("not found")
    .to_string()
}

fn package_uselib(library: &pkg_config::Library, cflags: bool, libs: bool) -> UseLib {
  let mut lib = UseLib::default();

  if cflags {
    lib.includes = library.include_paths.clone();
    let mut defines: Vec<String> = library
      .defines
      .iter()
      .map(|(k, v)| match v {
        Some(v) => format!("{}={}", k, v),
        None => k.clone(),
      })
      .collect();
    defines.sort();
    lib.defines = defines;
  }

  if libs {
    lib.libs = library.libs.clone();
    lib.lib_paths = library.link_paths.clone();
    lib.frameworks = library.frameworks.clone();
    lib.link_args = library
      .ld_args
      .iter()
      .map(|args| format!("-Wl,{}", args.join(",")))
      .collect();
  }

  lib
}

#[cfg(test)]
mod tests {
  use super::*;
  use serial_test::serial;

  #[test]
  fn header_program_includes_header() {
    let program = header_program("curl/curl.h");
    assert!(program.starts_with("#include <curl/curl.h>"));
    assert!(program.contains("int main"));
  }

  #[test]
  fn first_line_skips_blank_lines() {
    assert_eq!(first_line("\n  \nfatal error: x.h\nmore"), Some("fatal error: x.h"));
    assert_eq!(first_line(""), None);
  }

  #[test]
  fn package_reason_names_the_package() {
    let text = "pkg-config exited with status code 1\n> PKG_CONFIG_ALLOW_SYSTEM_CFLAGS=1 pkg-config --libs --cflags lv2\n\nThe system library `lv2` required by crate `elconf` was not found.\n";
    assert_eq!(
      package_error_reason("lv2", text),
      "The system library `lv2` required by crate `elconf` was not found."
    );

    let text = "pkg-config exited with status code 1\n> pkg-config --libs --cflags suil-0\n";
    assert_eq!(package_error_reason("suil-0", text), "> pkg-config --libs --cflags suil-0");

    let text = "pkg-config exited with status code 1\nPackage lilv-0 was not found in the pkg-config search path.";
    assert_eq!(
      package_error_reason("lilv-0", text),
      "Package lilv-0 was not found in the pkg-config search path."
    );
  }

  #[test]
  fn package_reason_falls_back_to_first_line() {
    assert_eq!(package_error_reason("jack", "\ncould not run `pkg-config`\n"), "could not run `pkg-config`");
    assert_eq!(package_error_reason("jack", ""), "not found");
  }

  #[test]
  fn default_triple_keeps_matching_host() {
    assert_eq!(
      default_triple(TargetPlatform::Linux, "aarch64-unknown-linux-gnu"),
      "aarch64-unknown-linux-gnu"
    );
    assert_eq!(default_triple(TargetPlatform::Mingw, "x86_64-pc-windows-gnu"), "x86_64-pc-windows-gnu");
  }

  #[test]
  fn default_triple_crosses_to_other_platforms() {
    assert_eq!(default_triple(TargetPlatform::Mingw, "x86_64-unknown-linux-gnu"), "x86_64-w64-mingw32");
    assert_eq!(default_triple(TargetPlatform::MacOs, "aarch64-unknown-linux-gnu"), "aarch64-apple-darwin");
    assert_eq!(default_triple(TargetPlatform::Linux, "x86_64-apple-darwin"), "x86_64-unknown-linux-gnu");
  }

  #[test]
  #[serial]
  fn for_platform_targets_platform() {
    let probe = SystemProbe::for_platform(TargetPlatform::Mingw).unwrap();
    assert_eq!(probe.target().parse::<TargetPlatform>(), Ok(TargetPlatform::Mingw));
  }

  #[test]
  #[serial]
  fn scratch_paths_are_unique() {
    let mut probe = SystemProbe::new().unwrap();
    let a = probe.next_path(Lang::C);
    let b = probe.next_path(Lang::Cxx);
    assert_ne!(a, b);
    assert!(a.starts_with(probe.scratch.path()));
    assert_eq!(b.extension().unwrap(), "cpp");
  }

  #[test]
  #[serial]
  fn missing_package_is_not_found() {
    let mut probe = SystemProbe::new().unwrap();
    let env = ConfigEnv::new();
    let outcome = probe.run(&Check::package("elconf-no-such-package-0"), &env);
    assert!(!outcome.is_found());
  }

  #[test]
  #[serial]
  fn missing_header_is_not_found() {
    let mut probe = SystemProbe::new().unwrap();
    let env = ConfigEnv::new();
    let outcome = probe.run(&Check::header("elconf_no_such_header_0.h"), &env);
    assert!(matches!(outcome, ProbeOutcome::Missing { .. }));
  }

  #[test]
  #[serial]
  fn unusable_compiler_reports_missing() {
    temp_env::with_vars(
      [
        ("CC", Some("/nonexistent/elconf-cc")),
        ("CXX", Some("/nonexistent/elconf-cxx")),
      ],
      || {
        let mut probe = SystemProbe::new().unwrap();
        let outcome = probe.run(&Check::header("stdbool.h"), &ConfigEnv::new());
        assert!(!outcome.is_found());
      },
    );
  }
}

use std::path::PathBuf;

use serde::Serialize;

/// Value of a preprocessor definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DefineValue {
  Bool(bool),
  Int(i64),
  Str(String),
}

impl DefineValue {
  /// Text written after `#define NAME`. Booleans become 0/1, strings are quoted.
  pub fn render(&self) -> String {
    match self {
      Self::Bool(b) => i64::from(*b).to_string(),
      Self::Int(i) => i.to_string(),
      Self::Str(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
    }
  }

  /// Whether the macro evaluates to a non-zero value in the preprocessor.
  pub fn is_true(&self) -> bool {
    match self {
      Self::Bool(b) => *b,
      Self::Int(i) => *i != 0,
      Self::Str(_) => true,
    }
  }
}

impl From<bool> for DefineValue {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}

impl From<i64> for DefineValue {
  fn from(value: i64) -> Self {
    Self::Int(value)
  }
}

impl From<i32> for DefineValue {
  fn from(value: i32) -> Self {
    Self::Int(value.into())
  }
}

impl From<&str> for DefineValue {
  fn from(value: &str) -> Self {
    Self::Str(value.to_string())
  }
}

/// Compile and link information recorded by a successful probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UseLib {
  pub includes: Vec<PathBuf>,
  pub defines: Vec<String>,
  pub libs: Vec<String>,
  pub lib_paths: Vec<PathBuf>,
  pub frameworks: Vec<String>,
  pub link_args: Vec<String>,
}

impl UseLib {
  /// A store that only names a library to link.
  pub fn library(name: &str) -> Self {
    Self {
      libs: vec![name.to_string()],
      ..Default::default()
    }
  }

  /// Arguments a compiler needs to build against this library.
  pub fn compile_args(&self) -> Vec<String> {
    let mut args: Vec<String> = self.includes.iter().map(|p| format!("-I{}", p.display())).collect();
    args.extend(self.defines.iter().map(|d| format!("-D{}", d)));
    args
  }

  /// Arguments a linker needs to link against this library.
  pub fn link_args(&self) -> Vec<String> {
    let mut args: Vec<String> = self.lib_paths.iter().map(|p| format!("-L{}", p.display())).collect();
    args.extend(self.libs.iter().map(|l| format!("-l{}", l)));
    for framework in &self.frameworks {
      args.push("-framework".to_string());
      args.push(framework.clone());
    }
    args.extend(self.link_args.iter().cloned());
    args
  }

  /// Fold `other` into this store, keeping first occurrences.
  pub fn merge(&mut self, other: UseLib) {
    extend_unique(&mut self.includes, other.includes);
    extend_unique(&mut self.defines, other.defines);
    extend_unique(&mut self.libs, other.libs);
    extend_unique(&mut self.lib_paths, other.lib_paths);
    extend_unique(&mut self.frameworks, other.frameworks);
    extend_unique(&mut self.link_args, other.link_args);
  }
}

fn extend_unique<T: PartialEq>(into: &mut Vec<T>, from: Vec<T>) {
  for item in from {
    if !into.contains(&item) {
      into.push(item);
    }
  }
}

/// Optional features compiled into the build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
  pub lua: bool,
  pub jack: bool,
  pub vst: bool,
  pub vst3: bool,
  pub lv2: bool,
  pub alsa: bool,
  pub ladspa: bool,
}

/// One line of the configuration log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckRecord {
  pub label: String,
  pub store: String,
  pub found: bool,
  pub mandatory: bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub reason: Option<String>,
}

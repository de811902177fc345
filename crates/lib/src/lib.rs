//! elconf-lib: build configuration for the Element plugin host
//!
//! This crate probes the host system for the libraries the native build can
//! use and resolves them into what the compile step needs:
//! - `BuildOptions`: user switches that disable optional features
//! - `Probe`: the seam over the host (trial compiles, pkg-config)
//! - `ConfigEnv` / `Environment`: capability flags, macros, compiler flags
//!   and per-library link information
//! - source and library lists for the compile and link steps

pub mod consts;
pub mod env;
pub mod header;
pub mod options;
pub mod platform;
pub mod probe;
pub mod resolve;
pub mod sources;

pub use env::{Capabilities, ConfigEnv, DefineValue, Environment, UseLib};
pub use options::BuildOptions;
pub use platform::TargetPlatform;
pub use resolve::{ConfigureError, configure, resolve_common_features, resolve_platform_features};

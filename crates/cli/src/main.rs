mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use elconf_lib::TargetPlatform;
use tracing_subscriber::EnvFilter;

use cmd::{cmd_configure, cmd_info, cmd_libs, cmd_sources};

/// elconf - configure the Element native build
#[derive(Parser)]
#[command(name = "elconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Probe the system and resolve build features
  Configure(ConfigureArgs),

  /// List the feature-module source files to compile
  Sources {
    /// Directory holding the include_<module> files
    #[arg(long)]
    prefix: String,

    /// Source extension override (e.g. ".cpp")
    #[arg(long)]
    ext: Option<String>,

    /// Target platform (defaults to the running platform)
    #[arg(long, env = "ELCONF_PLATFORM")]
    platform: Option<TargetPlatform>,
  },

  /// List the mingw system libraries to link
  Libs,

  /// Show application and platform information
  Info,
}

#[derive(Args, Debug)]
pub struct ConfigureArgs {
  /// Target platform (defaults to the running platform)
  #[arg(long, env = "ELCONF_PLATFORM")]
  pub platform: Option<TargetPlatform>,

  /// TOML file with build options; flags given here take precedence
  #[arg(long)]
  pub options: Option<PathBuf>,

  /// Disable Lua scripting
  #[arg(long)]
  pub no_lua: bool,

  /// Disable JACK audio
  #[arg(long)]
  pub no_jack: bool,

  /// Disable VST2 hosting
  #[arg(long)]
  pub no_vst: bool,

  /// Disable VST3 hosting
  #[arg(long)]
  pub no_vst3: bool,

  /// Disable LV2 hosting
  #[arg(long)]
  pub no_lv2: bool,

  /// Disable LADSPA hosting
  #[arg(long)]
  pub no_ladspa: bool,

  /// Disable ALSA
  #[arg(long)]
  pub no_alsa: bool,

  /// Path to the VST 2.4 SDK
  #[arg(long, env = "ELCONF_VSTSDK24")]
  pub vstsdk24: Option<String>,

  /// Compiler target triple for trial compiles
  #[arg(long)]
  pub target_triple: Option<String>,

  /// Write the definitions as a C header
  #[arg(long)]
  pub header: Option<PathBuf>,

  /// Print the resolved environment as JSON
  #[arg(long)]
  pub json: bool,

  /// Answer checks without touching the system
  #[arg(long)]
  pub simulate: bool,

  /// With --simulate, treat this check (name or store) as missing
  #[arg(long, requires = "simulate")]
  pub assume_missing: Vec<String>,
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(err) = run(cli) {
    output::print_error(&format!("{:#}", err));
    std::process::exit(1);
  }
}

fn run(cli: Cli) -> Result<()> {
  match cli.command {
    Commands::Configure(args) => cmd_configure(&args, cli.verbose),
    Commands::Sources { prefix, ext, platform } => cmd_sources(&prefix, ext.as_deref(), platform),
    Commands::Libs => {
      cmd_libs();
      Ok(())
    }
    Commands::Info => {
      cmd_info();
      Ok(())
    }
  }
}

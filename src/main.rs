//! raymap - trigger-script compiler and map tool for the ray map editor
//!
//! # Commands
//!
//! - `raymap check` - compile a script listing and report the bad lines
//! - `raymap new` - write a blank map file
//! - `raymap dump` - describe a map file and print its scripts
//! - `raymap scripts` - replace the scripts stored in a map file
//!
//! # Settings (raymap.toml)
//!
//! ```toml
//! default_width = 32
//! default_height = 32
//! log_level = "warn"
//! ```
//!
//! Every key can be overridden with a `RAYMAP_` environment variable, e.g.
//! `RAYMAP_DEFAULT_WIDTH=64`.

mod check;
mod dump;
mod new;
mod scripts;
mod settings;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;

use crate::settings::Settings;

/// Trigger-script compiler and map tool for the ray map editor
#[derive(Parser)]
#[command(name = "raymap")]
#[command(version, about)]
struct Cli {
    /// Settings file; missing is fine
    #[arg(short, long, global = true, default_value = "raymap.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile every line of a script listing
    Check(check::CheckArgs),

    /// Write a blank map
    New(new::NewArgs),

    /// Print a map's size, objects and scripts
    Dump(dump::DumpArgs),

    /// Replace a map's scripts with the valid lines of a listing
    Scripts(scripts::ScriptsArgs),
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let settings = Settings::load(&cli.config)?;
    env_logger::Builder::new()
        .parse_filters(&settings.log_level)
        .parse_default_env()
        .init();
    log::debug!("settings: {settings:?}");

    match cli.command {
        Commands::Check(args) => check::execute(args),
        Commands::New(args) => new::execute(args, &settings),
        Commands::Dump(args) => dump::execute(args),
        Commands::Scripts(args) => scripts::execute(args),
    }
}

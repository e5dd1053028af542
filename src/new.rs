//! New command - write a blank map

use std::path::PathBuf;

use clap::Args;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use raymap_map::MapDocument;

use crate::settings::Settings;

#[derive(Args)]
pub struct NewArgs {
    /// Map file to create
    pub map: PathBuf,

    /// Width in cells (defaults to the `default_width` setting)
    #[arg(long)]
    pub width: Option<usize>,

    /// Height in cells (defaults to the `default_height` setting)
    #[arg(long)]
    pub height: Option<usize>,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

pub fn execute(args: NewArgs, settings: &Settings) -> Result<()> {
    if args.map.exists() && !args.force {
        bail!("{} already exists, pass --force to overwrite", args.map.display());
    }

    let width = args.width.unwrap_or(settings.default_width);
    let height = args.height.unwrap_or(settings.default_height);
    let doc = MapDocument::new(width, height)?;
    doc.save_file(&args.map)
        .wrap_err_with(|| format!("writing {}", args.map.display()))?;

    println!("Created {}x{} map {}", width, height, args.map.display());
    Ok(())
}

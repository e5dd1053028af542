//! Scripts command - replace the scripts stored in a map

use std::path::PathBuf;

use clap::Args;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use raymap_map::MapDocument;

#[derive(Args)]
pub struct ScriptsArgs {
    /// Map file to update in place
    pub map: PathBuf,

    /// Script listing, one script per line
    pub file: PathBuf,
}

pub fn execute(args: ScriptsArgs) -> Result<()> {
    let mut doc = MapDocument::load_file(&args.map)
        .wrap_err_with(|| format!("loading {}", args.map.display()))?;
    let text = std::fs::read_to_string(&args.file)
        .wrap_err_with(|| format!("reading {}", args.file.display()))?;

    for report in doc.set_script_text(&text) {
        if let Some(e) = report.error()
            && !report.is_blank()
        {
            log::warn!("{}:{}: skipped, {e}", args.file.display(), report.number);
        }
    }

    doc.save_file(&args.map)
        .wrap_err_with(|| format!("writing {}", args.map.display()))?;
    println!(
        "Stored {} scripts in {} ({} object ids in use)",
        doc.scripts().count(),
        args.map.display(),
        doc.ids().len()
    );
    Ok(())
}

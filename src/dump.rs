//! Dump command - describe a map file

use std::path::PathBuf;

use clap::Args;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use raymap_map::MapDocument;

#[derive(Args)]
pub struct DumpArgs {
    /// Map file to read
    pub map: PathBuf,

    /// List every object with its cell and id
    #[arg(short, long)]
    pub objects: bool,
}

pub fn execute(args: DumpArgs) -> Result<()> {
    let doc = MapDocument::load_file(&args.map)
        .wrap_err_with(|| format!("loading {}", args.map.display()))?;

    println!("{}", args.map.display());
    println!("  Size: {}x{}", doc.width(), doc.height());
    println!("  Objects: {}", doc.object_count());
    let ids: Vec<String> = doc.ids().iter().map(|id| id.to_string()).collect();
    println!("  Ids in use ({}): {}", ids.len(), ids.join(", "));

    if args.objects {
        for (x, y, tile) in doc.grid().iter() {
            if let Some(id) = tile.object_id() {
                println!("    {{{x}.{y}}} {} #{id} on {}", tile.object(), tile.background());
            }
        }
    }

    println!("  Scripts ({}):", doc.scripts().count());
    for script in doc.scripts() {
        println!("    {script}");
    }

    if !doc.warnings().is_empty() {
        println!("  Warnings:");
        for warning in doc.warnings() {
            println!("    {warning}");
        }
    }
    Ok(())
}

//! Check command - compile a script listing line by line

use std::path::PathBuf;

use clap::Args;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, bail};
use raymap_script::compile_lines;

#[derive(Args)]
pub struct CheckArgs {
    /// Script listing, one script per line
    pub file: PathBuf,

    /// Also print the canonical form of every valid line
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn execute(args: CheckArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .wrap_err_with(|| format!("reading {}", args.file.display()))?;

    let reports = compile_lines(&text);
    let mut valid = 0;
    let mut invalid = 0;
    for report in reports.iter().filter(|r| !r.is_blank()) {
        match &report.result {
            Ok(script) => {
                valid += 1;
                if args.verbose {
                    println!("{:>4}: {script}", report.number);
                }
            }
            Err(e) => {
                invalid += 1;
                println!("{:>4}: {e}", report.number);
                println!("      {}", report.text.trim());
            }
        }
    }

    println!("{valid} valid, {invalid} invalid");
    if invalid > 0 {
        bail!("{} has {invalid} invalid lines", args.file.display());
    }
    Ok(())
}

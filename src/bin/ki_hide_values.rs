use clap::Parser;
use kifields::{
    hide_values::{output_path, process},
    parse_file::Result,
};
use std::{io::stdout, path::PathBuf};

/// Hide the value and show the reference of every footprint,
/// saving the board as mod_<INPUT> in the working directory.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// KiCad board file (.kicad_pcb)
    input: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();
    let args = Args::parse();

    let output = output_path(&args.input)?;
    process(&args.input, &output, &mut stdout().lock())?;
    Ok(())
}

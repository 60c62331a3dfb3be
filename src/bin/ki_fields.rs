use clap::Parser;
use kifields::{
    board::{report::report, Board},
    parse_file::{write_stdout, Result},
};
use std::path::PathBuf;

/// Print the reference and value of every footprint as JSON.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// KiCad board file (.kicad_pcb)
    input: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env().init();
    let args = Args::parse();

    let board = Board::load(&args.input)?;
    let json = serde_json::to_string_pretty(&report(&board))?;
    write_stdout(&json)?;
    Ok(())
}

//! Hide the value text and show the reference text of every footprint on a board.

use crate::{board::Board, error::BoardError, parse_file::Result};
use log::info;
use std::{
    ffi::OsString,
    io::Write,
    path::{Path, PathBuf},
};

/// Prepended to the input's file name to name the output
pub const OUTPUT_PREFIX: &str = "mod_";

/// `mod_<file name>` relative to the working directory,
/// whatever directory the input lives in.
pub fn output_path(input: &Path) -> std::result::Result<PathBuf, BoardError> {
    let name = input
        .file_name()
        .ok_or_else(|| BoardError::NoFileName(input.to_owned()))?;
    let mut out = OsString::from(OUTPUT_PREFIX);
    out.push(name);
    Ok(PathBuf::from(out))
}

/// Print one line per footprint to `out` and flip its texts.
/// Returns the number of footprints. The first footprint lacking
/// either text stops the run.
pub fn hide_values(board: &mut Board, out: &mut impl Write) -> Result<usize> {
    let mut count = 0;
    for mut footprint in board.footprints_mut() {
        let reference = footprint.reference_text()?;
        writeln!(out, "* Module: {reference}")?;
        footprint.value()?.set_visible(false);
        footprint.reference()?.set_visible(true);
        count += 1;
    }
    Ok(count)
}

/// Load `input`, edit it and save it as `output`.
/// Nothing is written to `output` unless every footprint was edited.
pub fn process(input: &Path, output: &Path, out: &mut impl Write) -> Result<usize> {
    let mut board = Board::load(input)?;
    let count = hide_values(&mut board, out)?;
    board.save(output)?;
    info!("{count} footprints updated, saved {}", output.display());
    Ok(count)
}

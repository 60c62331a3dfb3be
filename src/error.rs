use crate::board::FieldKind;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("syntax error\n{0}")]
    Syntax(String),

    #[error("not a KiCad board: expected `kicad_pcb`, found `{0}`")]
    NotABoard(String),

    #[error("footprint #{number} has no {field} field")]
    MissingField { number: usize, field: FieldKind },

    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),
}

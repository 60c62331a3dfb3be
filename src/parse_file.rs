use crate::error::BoardError;
use log::debug;
use nom::error::{VerboseError, VerboseErrorKind};
use nom::{Offset, Parser};
use std::fmt::Display;
use std::fs;
use std::io::{stdout, Write};
use std::path::Path;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

pub fn parse_file<P, T>(path: &Path, parser: P) -> Result<T>
where
    P: for<'a> Parser<&'a str, T, VerboseError<&'a str>>,
    T: 'static,
{
    let buf = fs::read_to_string(path).map_err(|source| BoardError::Read {
        path: path.to_owned(),
        source,
    })?;
    debug!("read {} bytes from {}", buf.len(), path.display());
    parse_with(&buf, parser)
}

/// Render the content completely before the file is created,
/// so a failure while formatting leaves nothing behind.
pub fn write_file<A: Display>(path: &Path, content: &A) -> Result<()> {
    let text = content.to_string();
    fs::write(path, text.as_bytes()).map_err(|source| BoardError::Write {
        path: path.to_owned(),
        source,
    })?;
    debug!("wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

pub fn write_stdout<A: Display>(content: &A) -> Result<()> {
    let mut out = stdout().lock();
    writeln!(out, "{content}")?;
    Ok(())
}

pub fn parse_with<P, T>(text: &str, mut parser: P) -> Result<T>
where
    P: for<'a> Parser<&'a str, T, VerboseError<&'a str>>,
    T: 'static,
{
    match parser.parse(text) {
        Ok((_, data)) => Ok(data),
        Err(nom::Err::Error(err) | nom::Err::Failure(err)) => {
            Err(BoardError::Syntax(describe(text, err)).into())
        }
        Err(nom::Err::Incomplete(_)) => {
            Err(BoardError::Syntax("unexpected end of input".into()).into())
        }
    }
}

/// Innermost error entries reported; a deeply nested board
/// otherwise reports every enclosing list.
const FRAMES: usize = 4;

/// Characters of input shown with each entry. Board files can
/// hold their whole content on one line.
const CONTEXT: usize = 160;

fn describe(text: &str, err: VerboseError<&str>) -> String {
    err.errors
        .into_iter()
        .take(FRAMES)
        .enumerate()
        .map(|(i, (at, kind))| {
            let offset = text.offset(at);
            let before = &text[..offset];
            let line = before.matches('\n').count() + 1;
            let column = before.chars().rev().take_while(|&c| c != '\n').count() + 1;
            let what = match kind {
                VerboseErrorKind::Context(c) => format!("in {c}"),
                VerboseErrorKind::Char(c) => format!("expected '{c}'"),
                VerboseErrorKind::Nom(k) => format!("{k:?}"),
            };
            let near: String = at
                .chars()
                .take_while(|&c| c != '\n')
                .take(CONTEXT)
                .collect();
            format!("{i}: line {line}, column {column}, {what}: {near}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

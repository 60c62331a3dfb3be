//! Read and edit KiCad board files.
//!
//! The files are parsed into a generic S-expression tree ([`sexpr`]) which
//! [`board`] views as footprints with reference and value texts.

pub mod board;
pub mod error;
pub mod hide_values;
pub mod parse_file;
pub mod sexpr;
pub mod strings;

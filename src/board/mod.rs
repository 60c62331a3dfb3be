//! A KiCad board document and the footprints placed on it.
//!
//! The whole file is held as one `Expr` tree. Only footprints and their
//! reference and value texts get typed views; everything else is carried
//! through untouched so that a saved board differs from the loaded one
//! only where it was edited (and in layout).

pub mod field;
pub mod footprint;
pub mod report;

pub use field::{Field, FieldKind, FieldMut};
pub use footprint::{Footprint, FootprintMut};

use crate::{
    error::BoardError,
    parse_file::{parse_file, parse_with, write_file, Result},
    sexpr::{
        parser::parse_s_expr,
        simplifier::{AnyNum, Cons, Discard, Find, Head, Simplifier},
        Expr,
    },
};
use log::debug;
use std::{fmt::Display, path::Path};

/// The heading of a board file
pub const BOARD: &str = "kicad_pcb";

/// Footprint heading since KiCad 6
pub const FOOTPRINT: &str = "footprint";

/// Footprint heading in KiCad 5 and earlier
pub const MODULE: &str = "module";

const VERSION: &str = "version";

#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    root: Expr,
}

impl Board {
    pub fn from_expr(root: Expr) -> std::result::Result<Self, BoardError> {
        if root.is_keyed(BOARD) {
            Ok(Self { root })
        } else {
            let found = root
                .head()
                .map(str::to_owned)
                .unwrap_or_else(|| root.to_string().chars().take(40).collect());
            Err(BoardError::NotABoard(found))
        }
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(Self::from_expr(parse_with(text, parse_s_expr)?)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let board = Self::from_expr(parse_file(path, parse_s_expr)?)?;
        debug!(
            "loaded {} (version {:?}) with {} footprints",
            path.display(),
            board.version(),
            board.footprints().count()
        );
        Ok(board)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_file(path.as_ref(), self)
    }

    /// The file format version, a date such as 20221018.
    pub fn version(&self) -> Option<f64> {
        Cons(Discard(BOARD), Find(Cons(Discard(VERSION), Head(AnyNum))))
            .simplify(&self.root)?
            .as_atom()?
            .as_num()
    }

    pub fn footprints(&self) -> impl Iterator<Item = Footprint<'_>> {
        self.root
            .as_list()
            .into_iter()
            .flatten()
            .filter(|x| is_footprint(x))
            .enumerate()
            .map(|(i, x)| Footprint::new(i + 1, x))
    }

    pub fn footprints_mut(&mut self) -> impl Iterator<Item = FootprintMut<'_>> {
        self.root
            .as_list_mut()
            .into_iter()
            .flatten()
            .filter(|x| is_footprint(x))
            .enumerate()
            .map(|(i, x)| FootprintMut::new(i + 1, x))
    }
}

fn is_footprint(x: &Expr) -> bool {
    Head(FOOTPRINT.or(MODULE)).matches(x)
}

/// Board files end with a newline.
impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.root)
    }
}

#[cfg(test)]
mod test {
    use super::Board;
    use crate::error::BoardError;

    const BOARD: &str = r#"
        (kicad_pcb (version 20221018) (generator pcbnew)
            (general (thickness 1.6))
            (footprint "Resistor_SMD:R_0603" (layer "F.Cu")
                (fp_text reference "R1" (at 0 -1.43) (layer "F.SilkS"))
                (fp_text value "10k" (at 0 1.43) (layer "F.Fab")))
            (gr_line (start 0 0) (end 10 0) (layer "Edge.Cuts"))
            (footprint "Capacitor_SMD:C_0603" (layer "F.Cu")
                (fp_text reference "C1" (at 0 -1.43) (layer "F.SilkS"))
                (fp_text value "100n" (at 0 1.43) (layer "F.Fab"))))
        "#;

    #[test]
    fn version() {
        let board = Board::parse(BOARD).unwrap();
        assert_eq!(board.version(), Some(20221018.0));
    }

    #[test]
    fn only_footprints_are_listed() {
        let board = Board::parse(BOARD).unwrap();
        let refs: Vec<_> = board
            .footprints()
            .map(|fp| (fp.number(), fp.reference_text().unwrap()))
            .collect();
        assert_eq!(refs, vec![(1, "R1".to_string()), (2, "C1".to_string())]);
    }

    #[test]
    fn mutable_and_shared_views_agree() {
        let mut board = Board::parse(BOARD).unwrap();
        let refs: Vec<_> = board
            .footprints_mut()
            .map(|fp| fp.reference_text().unwrap())
            .collect();
        assert_eq!(refs, vec!["R1", "C1"]);
    }

    #[test]
    fn printed_board_ends_with_newline() {
        let board = Board::parse(BOARD).unwrap();
        let text = board.to_string();
        assert!(text.starts_with("(kicad_pcb"));
        assert!(text.ends_with(")\n"));
        assert_eq!(Board::parse(&text).unwrap(), board);
    }

    #[test]
    fn schematic_is_not_a_board() {
        let err = Board::parse(r#"(kicad_sch (version 20250114) (generator "eeschema"))"#)
            .unwrap_err();
        let err = err.downcast::<BoardError>().unwrap();
        assert!(matches!(*err, BoardError::NotABoard(ref found) if found == "kicad_sch"));
    }

    #[test]
    fn bare_atom_is_not_a_board() {
        assert!(Board::parse("kicad_pcb").is_err());
    }
}

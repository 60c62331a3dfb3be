//! Reference and value texts of a footprint and their visibility.
//!
//! Two spellings exist in board files:
//!
//! ```text
//! (fp_text value "10k" (at 0 1.43) (layer "F.Fab") hide (effects ...))       KiCad 5-7
//! (property "Value" "10k" (at 0 1.43 0) (layer "F.Fab") (hide yes) ...)      KiCad 8+
//! ```
//!
//! A text is hidden by a bare `hide`, by `(hide)` or `(hide yes)`, either
//! directly in the field or inside its `effects`.

use crate::sexpr::{
    simplifier::{Anything, Cons, Simplifier},
    Atom, Expr,
};
use log::trace;
use std::{collections::VecDeque, fmt::Display};

const FP_TEXT: &str = "fp_text";
const PROPERTY: &str = "property";
const HIDE: &str = "hide";
const LAYER: &str = "layer";
const EFFECTS: &str = "effects";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Reference,
    Value,
}

impl FieldKind {
    /// Second word of an `fp_text` list
    fn text_key(self) -> &'static str {
        match self {
            FieldKind::Reference => "reference",
            FieldKind::Value => "value",
        }
    }

    /// Name of a footprint `property`
    fn property_key(self) -> &'static str {
        match self {
            FieldKind::Reference => "Reference",
            FieldKind::Value => "Value",
        }
    }

    /// Matches the list holding this field within a footprint.
    pub(crate) fn pattern(self) -> impl Simplifier {
        Cons(FP_TEXT, Cons(self.text_key(), Anything)).or(Cons(
            PROPERTY,
            Cons(Atom::from(self.property_key()), Anything),
        ))
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.text_key().fmt(f)
    }
}

/// A hide flag in any of its spellings, including `(hide no)`.
fn is_hide_entry(x: &Expr) -> bool {
    x.is_symbol(HIDE) || x.is_keyed(HIDE)
}

/// A hide flag that actually hides.
fn hides(x: &Expr) -> bool {
    if x.is_symbol(HIDE) {
        return true;
    }
    match x.as_list() {
        Some(elems) if x.is_keyed(HIDE) => !elems.get(1).is_some_and(|v| v.is_symbol("no")),
        _ => false,
    }
}

/// Entries of the `effects` lists among `elems`.
fn effects(elems: &VecDeque<Expr>) -> impl Iterator<Item = &Expr> {
    elems
        .iter()
        .filter(|x| x.is_keyed(EFFECTS))
        .filter_map(|x| x.as_list())
        .flatten()
}

#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    kind: FieldKind,
    expr: &'a Expr,
}

impl<'a> Field<'a> {
    pub(crate) fn new(kind: FieldKind, expr: &'a Expr) -> Self {
        Self { kind, expr }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// True for the KiCad 8+ `property` spelling
    pub fn is_property(&self) -> bool {
        self.expr.is_keyed(PROPERTY)
    }

    /// The displayed text, e.g. `R1` or `10k`.
    pub fn text(&self) -> Option<String> {
        Some(self.expr.as_list()?.get(2)?.as_atom()?.text())
    }

    pub fn is_visible(&self) -> bool {
        let Some(elems) = self.expr.as_list() else {
            return true;
        };
        !(elems.iter().any(hides) || effects(elems).any(hides))
    }
}

#[derive(Debug)]
pub struct FieldMut<'a> {
    kind: FieldKind,
    expr: &'a mut Expr,
}

impl<'a> FieldMut<'a> {
    pub(crate) fn new(kind: FieldKind, expr: &'a mut Expr) -> Self {
        Self { kind, expr }
    }

    pub fn as_field(&self) -> Field<'_> {
        Field::new(self.kind, self.expr)
    }

    pub fn is_visible(&self) -> bool {
        self.as_field().is_visible()
    }

    /// Show or hide the text. Any existing hide flags are removed first,
    /// then hiding adds a single flag in the field's own spelling.
    /// Applying the same setting twice leaves the field unchanged.
    pub fn set_visible(&mut self, visible: bool) {
        let is_property = self.as_field().is_property();
        let Some(elems) = self.expr.as_list_mut() else {
            return;
        };

        elems.retain(|x| !is_hide_entry(x));
        for x in elems.iter_mut().filter(|x| x.is_keyed(EFFECTS)) {
            if let Some(inner) = x.as_list_mut() {
                inner.retain(|x| !is_hide_entry(x));
            }
        }

        if !visible {
            let flag = if is_property {
                Expr::keyed(HIDE, [Expr::key("yes")])
            } else {
                Expr::key(HIDE)
            };
            let at = elems
                .iter()
                .position(|x| x.is_keyed(LAYER))
                .map(|i| i + 1)
                .or_else(|| elems.iter().position(|x| x.is_keyed(EFFECTS)))
                .unwrap_or(elems.len());
            elems.insert(at, flag);
        }
        trace!("{} visible: {visible}", self.kind);
    }
}

#[cfg(test)]
mod test {
    use super::{Field, FieldKind, FieldMut};
    use crate::{parse_file::parse_with, sexpr::parser::parse_s_expr, sexpr::Expr};

    fn parse(s: &str) -> Expr {
        parse_with(s, parse_s_expr).unwrap()
    }

    fn visible(s: &str) -> bool {
        Field::new(FieldKind::Value, &parse(s)).is_visible()
    }

    fn set(s: &str, visible: bool) -> Expr {
        let mut e = parse(s);
        FieldMut::new(FieldKind::Value, &mut e).set_visible(visible);
        e
    }

    #[test]
    fn hide_spellings() {
        assert!(visible(r#"(fp_text value "10k" (at 0 1) (layer "F.Fab"))"#));
        assert!(!visible(r#"(fp_text value "10k" (at 0 1) (layer "F.Fab") hide)"#));
        assert!(!visible(r#"(property "Value" "10k" (layer "F.Fab") (hide yes))"#));
        assert!(!visible(r#"(property "Value" "10k" (layer "F.Fab") (hide))"#));
        assert!(visible(r#"(property "Value" "10k" (layer "F.Fab") (hide no))"#));
        assert!(!visible(
            r#"(property "Value" "10k" (effects (font (size 1 1)) (hide yes)))"#
        ));
        assert!(!visible(
            r#"(fp_text value "10k" (effects (font (size 1 1)) hide))"#
        ));
    }

    #[test]
    fn pattern_matches_both_spellings() {
        use crate::sexpr::simplifier::Simplifier;
        let value = FieldKind::Value.pattern();
        assert!(value.matches(&parse(r#"(fp_text value "10k")"#)));
        assert!(value.matches(&parse(r#"(property "Value" "10k")"#)));
        assert!(!value.matches(&parse(r#"(fp_text reference "R1")"#)));
        assert!(!value.matches(&parse(r#"(property "Footprint" "R_0603")"#)));
        assert!(!value.matches(&parse(r#"(fp_text user "${VALUE}")"#)));
    }

    #[test]
    fn text() {
        let e = parse(r#"(property "Reference" "R1" (at 0 0))"#);
        assert_eq!(Field::new(FieldKind::Reference, &e).text().as_deref(), Some("R1"));
        let e = parse("(fp_text reference U3 (at 0 0))");
        assert_eq!(Field::new(FieldKind::Reference, &e).text().as_deref(), Some("U3"));
    }

    #[test]
    fn hide_fp_text_after_layer() {
        assert_eq!(
            set(
                r#"(fp_text value "10k" (at 0 1) (layer "F.Fab") (effects (font (size 1 1))))"#,
                false
            ),
            parse(r#"(fp_text value "10k" (at 0 1) (layer "F.Fab") hide (effects (font (size 1 1))))"#)
        );
    }

    #[test]
    fn hide_property_after_layer() {
        assert_eq!(
            set(
                r#"(property "Value" "10k" (at 0 1 0) (layer "F.Fab") (uuid "a") (effects (font (size 1 1))))"#,
                false
            ),
            parse(
                r#"(property "Value" "10k" (at 0 1 0) (layer "F.Fab") (hide yes) (uuid "a") (effects (font (size 1 1))))"#
            )
        );
    }

    #[test]
    fn hide_without_layer() {
        assert_eq!(
            set(r#"(fp_text value "10k" (at 0 1) (effects (font (size 1 1))))"#, false),
            parse(r#"(fp_text value "10k" (at 0 1) hide (effects (font (size 1 1))))"#)
        );
        assert_eq!(
            set(r#"(fp_text value "10k")"#, false),
            parse(r#"(fp_text value "10k" hide)"#)
        );
    }

    #[test]
    fn show_removes_every_flag() {
        assert_eq!(
            set(
                r#"(property "Value" "10k" (layer "F.Fab") (hide no) (effects (font (size 1 1)) (hide yes)))"#,
                true
            ),
            parse(r#"(property "Value" "10k" (layer "F.Fab") (effects (font (size 1 1))))"#)
        );
        assert_eq!(
            set(r#"(fp_text value "10k" (layer "F.Fab") hide (effects hide))"#, true),
            parse(r#"(fp_text value "10k" (layer "F.Fab") (effects))"#)
        );
    }

    #[test]
    fn setting_twice_changes_nothing() {
        let src = r#"(property "Value" "10k" (layer "F.Fab") (hide no) (effects (hide yes)))"#;
        for visible in [true, false] {
            let once = set(src, visible);
            let mut twice = once.clone();
            FieldMut::new(FieldKind::Value, &mut twice).set_visible(visible);
            assert_eq!(once, twice);
        }
    }
}

use super::field::{Field, FieldKind, FieldMut};
use crate::{
    error::BoardError,
    sexpr::{
        simplifier::{AnyText, Cons, Discard, Find, Head, Simplifier},
        Expr,
    },
};
use uuid::Uuid;

const UUID: &str = "uuid";

/// The identifier heading before KiCad 8
const TSTAMP: &str = "tstamp";

/// A footprint on a board, numbered from 1 in file order.
#[derive(Debug, Clone, Copy)]
pub struct Footprint<'a> {
    number: usize,
    expr: &'a Expr,
}

impl<'a> Footprint<'a> {
    pub(crate) fn new(number: usize, expr: &'a Expr) -> Self {
        Self { number, expr }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    /// Library identifier such as `Resistor_SMD:R_0603_1608Metric`
    pub fn lib_id(&self) -> Option<String> {
        let name = super::FOOTPRINT.or(super::MODULE);
        let id = Cons(Discard(name), Head(AnyText)).simplify(self.expr)?;
        Some(id.as_atom()?.text())
    }

    /// The footprint's own identifier: `(uuid "..")` since KiCad 8,
    /// `(tstamp ..)` before. KiCad 5 timestamps are not UUIDs and give `None`.
    pub fn id(&self) -> Option<Uuid> {
        let id = Find(Cons(Discard(UUID.or(TSTAMP)), Head(AnyText))).simplify(self.expr)?;
        Uuid::try_parse(&id.as_atom()?.text()).ok()
    }

    pub fn field(&self, kind: FieldKind) -> Result<Field<'a>, BoardError> {
        let pattern = kind.pattern();
        self.expr
            .as_list()
            .and_then(|elems| elems.iter().find(|x| pattern.matches(x)))
            .map(|x| Field::new(kind, x))
            .ok_or(BoardError::MissingField {
                number: self.number,
                field: kind,
            })
    }

    pub fn reference(&self) -> Result<Field<'a>, BoardError> {
        self.field(FieldKind::Reference)
    }

    pub fn value(&self) -> Result<Field<'a>, BoardError> {
        self.field(FieldKind::Value)
    }

    /// The reference designator, e.g. `R1`.
    pub fn reference_text(&self) -> Result<String, BoardError> {
        self.text(FieldKind::Reference)
    }

    pub fn value_text(&self) -> Result<String, BoardError> {
        self.text(FieldKind::Value)
    }

    fn text(&self, kind: FieldKind) -> Result<String, BoardError> {
        self.field(kind)?.text().ok_or(BoardError::MissingField {
            number: self.number,
            field: kind,
        })
    }
}

/// A footprint with its texts open for editing.
#[derive(Debug)]
pub struct FootprintMut<'a> {
    number: usize,
    expr: &'a mut Expr,
}

impl<'a> FootprintMut<'a> {
    pub(crate) fn new(number: usize, expr: &'a mut Expr) -> Self {
        Self { number, expr }
    }

    pub fn as_footprint(&self) -> Footprint<'_> {
        Footprint::new(self.number, self.expr)
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn reference_text(&self) -> Result<String, BoardError> {
        self.as_footprint().reference_text()
    }

    pub fn field(&mut self, kind: FieldKind) -> Result<FieldMut<'_>, BoardError> {
        let number = self.number;
        let pattern = kind.pattern();
        self.expr
            .as_list_mut()
            .and_then(|elems| elems.iter_mut().find(|x| pattern.matches(x)))
            .map(|x| FieldMut::new(kind, x))
            .ok_or(BoardError::MissingField {
                number,
                field: kind,
            })
    }

    pub fn reference(&mut self) -> Result<FieldMut<'_>, BoardError> {
        self.field(FieldKind::Reference)
    }

    pub fn value(&mut self) -> Result<FieldMut<'_>, BoardError> {
        self.field(FieldKind::Value)
    }
}

pub mod parser;
pub mod simplifier;

use crate::strings::escape;
use std::{collections::VecDeque, fmt::Display};

/// A numeric token. The text is kept as written so a number
/// prints back exactly as it was read, e.g. `1.50` or `0805`.
#[derive(Debug, Clone)]
pub struct Number {
    value: f64,
    text: String,
}

impl Number {
    pub(crate) fn new(value: f64, text: &str) -> Self {
        Self {
            value,
            text: text.to_owned(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Two numbers are the same token when they are written the same.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self {
            value,
            text: value.to_string(),
        }
    }
}

/// Indivisible values in an S-expression
#[derive(Debug, PartialEq, Clone)]
pub enum Atom {
    Symbol(String),
    Str(String),
    Num(Number),
}

impl Atom {
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Atom::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Atom::Num(n) => Some(n.value()),
            _ => None,
        }
    }

    /// The text of an atom as a user would read it.
    /// Older board files leave short texts such as `R1` or `100` unquoted.
    pub fn text(&self) -> String {
        match self {
            Atom::Str(s) | Atom::Symbol(s) => s.clone(),
            Atom::Num(n) => n.text().to_owned(),
        }
    }
}

impl From<&str> for Atom {
    fn from(value: &str) -> Self {
        Atom::Str(value.to_owned())
    }
}

impl From<String> for Atom {
    fn from(value: String) -> Self {
        Atom::Str(value)
    }
}

impl From<f64> for Atom {
    fn from(value: f64) -> Self {
        Atom::Num(value.into())
    }
}

/// An S-expression
#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    Constant(Atom),
    List(VecDeque<Expr>),
}

impl Expr {
    pub fn key(name: &str) -> Expr {
        Expr::Constant(Atom::Symbol(name.to_string()))
    }

    pub fn list(values: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::List(values.into_iter().collect())
    }

    /// A list headed by the symbol `name`
    pub fn keyed(name: &str, values: impl IntoIterator<Item = Expr>) -> Expr {
        Expr::List(std::iter::once(Expr::key(name)).chain(values).collect())
    }

    pub fn empty() -> Expr {
        Expr::List(VecDeque::new())
    }

    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Expr::Constant(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&VecDeque<Expr>> {
        match self {
            Expr::List(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut VecDeque<Expr>> {
        match self {
            Expr::List(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Expr::List(value) => value.is_empty(),
            _ => false,
        }
    }

    /// The symbol at the front of a list, e.g. `layer` in `(layer "F.Cu")`.
    pub fn head(&self) -> Option<&str> {
        self.as_list()?.front()?.as_atom()?.as_symbol()
    }

    pub fn is_keyed(&self, name: &str) -> bool {
        self.head() == Some(name)
    }

    /// True for the bare symbol `name`.
    pub fn is_symbol(&self, name: &str) -> bool {
        self.as_atom().and_then(Atom::as_symbol) == Some(name)
    }
}

impl<A> From<A> for Expr
where
    A: Into<Atom>,
{
    fn from(value: A) -> Self {
        Expr::Constant(value.into())
    }
}

impl Default for Expr {
    fn default() -> Self {
        Self::empty()
    }
}

impl Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Atom::Symbol(v) => v.fmt(f),
            Atom::Str(v) => {
                "\"".fmt(f)?;
                escape(v).fmt(f)?;
                "\"".fmt(f)
            }
            Atom::Num(n) => n.text().fmt(f),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fmt_expr(self, 0, f)
    }
}

fn fmt_expr(expr: &Expr, indent: usize, target: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match expr {
        Expr::Constant(atom) => atom.fmt(target)?,
        Expr::List(exprs) => {
            "(".fmt(target)?;
            let mut iter = exprs.iter();
            if let Some(expr) = iter.next() {
                fmt_expr(expr, indent, target)?;
                let n = exprs.len();
                if n <= 4 {
                    for expr in iter {
                        " ".fmt(target)?;
                        fmt_expr(expr, indent, target)?
                    }
                } else {
                    let indent = indent + 2;
                    for expr in iter {
                        "\n".fmt(target)?;
                        for _ in 0..indent {
                            " ".fmt(target)?
                        }
                        fmt_expr(expr, indent, target)?
                    }
                }
            }
            ")".fmt(target)?;
        }
    }
    Ok(())
}

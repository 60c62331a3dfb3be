use super::{Atom, Expr};

/// A pattern over an `Expr` that yields a (usually smaller) `Expr` on a match.
pub trait Simplifier: Clone {
    fn simplify(&self, subject: &Expr) -> Option<Expr>;

    fn matches(&self, subject: &Expr) -> bool {
        self.simplify(subject).is_some()
    }

    fn or(self, other: impl Simplifier) -> impl Simplifier
    where
        Self: Sized,
    {
        Or(self, other)
    }
}

impl<F> Simplifier for F
where
    F: Fn(&Expr) -> Option<Expr> + Clone,
{
    fn simplify(&self, subject: &Expr) -> Option<Expr> {
        (self)(subject)
    }
}

impl Simplifier for Atom {
    fn simplify(&self, subject: &Expr) -> Option<Expr> {
        if subject.as_atom()? == self {
            Some(subject.clone())
        } else {
            None
        }
    }
}

impl Simplifier for &'static str {
    fn simplify(&self, subject: &Expr) -> Option<Expr> {
        if subject.as_atom()?.as_symbol()? == *self {
            Some(subject.clone())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnyNum;

impl Simplifier for AnyNum {
    fn simplify(&self, subject: &Expr) -> Option<Expr> {
        if subject.as_atom()?.as_num().is_some() {
            Some(subject.clone())
        } else {
            None
        }
    }
}

/// Any atom. Every atom reads as text: a quoted string, a bare symbol or a number.
#[derive(Debug, Clone)]
pub struct AnyText;

impl Simplifier for AnyText {
    fn simplify(&self, subject: &Expr) -> Option<Expr> {
        subject.as_atom().map(|_| subject.clone())
    }
}

#[derive(Debug, Clone)]
pub struct Anything;

impl Simplifier for Anything {
    fn simplify(&self, subject: &Expr) -> Option<Expr> {
        Some(subject.clone())
    }
}

#[derive(Debug, Clone)]
pub struct Cons<A, B>(pub A, pub B);

impl<A, B> Simplifier for Cons<A, B>
where
    A: Simplifier,
    B: Simplifier,
{
    fn simplify(&self, subject: &Expr) -> Option<Expr> {
        let elems = subject.as_list()?;
        let elem = elems.front()?;
        let head = self.0.simplify(elem)?;
        let mut elems = elems.clone();
        elems.pop_front();
        let tail = self.1.simplify(&Expr::List(elems))?;
        if head.is_empty() {
            return Some(tail);
        }
        let Expr::List(mut result) = tail else {
            return None;
        };
        result.push_front(head);
        Some(Expr::List(result))
    }
}

#[derive(Debug, Clone)]
pub struct Head<A>(pub A);

impl<A> Simplifier for Head<A>
where
    A: Simplifier,
{
    fn simplify(&self, subject: &Expr) -> Option<Expr> {
        self.0.simplify(subject.as_list()?.front()?)
    }
}

#[derive(Debug, Clone)]
pub struct Or<A, B>(pub A, pub B);

impl<A, B> Simplifier for Or<A, B>
where
    A: Simplifier,
    B: Simplifier,
{
    fn simplify(&self, subject: &Expr) -> Option<Expr> {
        self.0
            .simplify(subject)
            .or_else(|| self.1.simplify(subject))
    }
}

#[derive(Debug, Clone)]
pub struct Find<A>(pub A);

impl<A> Simplifier for Find<A>
where
    A: Simplifier,
{
    fn simplify(&self, subject: &Expr) -> Option<Expr> {
        subject.as_list()?.iter().find_map(|x| self.0.simplify(x))
    }
}

#[derive(Debug, Clone)]
pub struct Discard<A>(pub A);

impl<A> Simplifier for Discard<A>
where
    A: Simplifier,
{
    fn simplify(&self, subject: &Expr) -> Option<Expr> {
        self.0.simplify(subject).is_some().then_some(Expr::empty())
    }
}

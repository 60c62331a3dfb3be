//! Quoted strings as KiCad writes them: double quotes with backslash escapes.
use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{anychar, char},
    combinator::{cut, map, value},
    error::{context, VerboseError},
    multi::fold_many0,
    sequence::{delimited, preceded},
    IResult, Parser,
};

/// A run of unescaped characters or a single escaped one.
enum Fragment<'a> {
    Literal(&'a str),
    Escaped(char),
}

/// Backslash followed by a character.
/// The control escapes map to their characters, anything else stands for itself.
fn parse_escaped_char(i: &str) -> IResult<&str, char, VerboseError<&str>> {
    preceded(
        char('\\'),
        alt((
            value('\n', char('n')),
            value('\r', char('r')),
            value('\t', char('t')),
            anychar,
        )),
    )
    .parse(i)
}

/// One or more characters that need no escape.
fn parse_literal(i: &str) -> IResult<&str, &str, VerboseError<&str>> {
    is_not("\"\\").parse(i)
}

fn parse_fragment(i: &str) -> IResult<&str, Fragment<'_>, VerboseError<&str>> {
    alt((
        map(parse_literal, Fragment::Literal),
        map(parse_escaped_char, Fragment::Escaped),
    ))
    .parse(i)
}

/// A double quoted string. Once the opening quote is seen
/// a missing closing quote is a hard error.
pub fn parse_string(i: &str) -> IResult<&str, String, VerboseError<&str>> {
    let body = fold_many0(parse_fragment, String::new, |mut s, fragment| {
        match fragment {
            Fragment::Literal(l) => s.push_str(l),
            Fragment::Escaped(c) => s.push(c),
        }
        s
    });
    delimited(
        char('"'),
        body,
        context("closing quote", cut(char('"'))),
    )
    .parse(i)
}

/// The inverse of `parse_string` without the surrounding quotes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

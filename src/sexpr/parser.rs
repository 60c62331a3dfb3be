//! A nom parser for the S-expression dialect of KiCad files.
//!
//! An unquoted token is a number only when the whole token reads as one,
//! so `4k7`, `+5V`, `5.1.9` or `5B301BBD` stay symbols. Numbers keep the
//! text they were written with and print back unchanged.
use super::{Atom, Expr, Number};
use crate::strings;
use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{char, digit0, digit1, multispace0, one_of},
    combinator::{all_consuming, cut, map, map_parser, map_res, opt, recognize, rest},
    error::{context, VerboseError},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult, Parser,
};

/// Characters that end an unquoted token.
const DELIMITERS: &str = " \t\r\n()\"";

/// Decimal text: optional sign, digits with an optional fraction, optional exponent.
/// Nothing here commits, so a token that stops matching part way is just not a number.
fn number_text(i: &str) -> IResult<&str, &str, VerboseError<&str>> {
    let mantissa = alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    ));
    let exponent = tuple((one_of("eE"), opt(one_of("+-")), digit1));
    recognize(tuple((opt(one_of("+-")), mantissa, opt(exponent)))).parse(i)
}

/// A token that is a number from end to end.
fn parse_num(i: &str) -> IResult<&str, Atom, VerboseError<&str>> {
    map_res(all_consuming(number_text), |text: &str| {
        text.parse::<f64>()
            .map(|value| Atom::Num(Number::new(value, text)))
    })
    .parse(i)
}

/// Whatever is left of a token that is not a number.
fn parse_symbol(i: &str) -> IResult<&str, Atom, VerboseError<&str>> {
    map(rest, |s: &str| Atom::Symbol(s.to_owned())).parse(i)
}

/// An unquoted token, classified as a whole.
fn parse_scalar(i: &str) -> IResult<&str, Atom, VerboseError<&str>> {
    map_parser(is_not(DELIMITERS), parse_num.or(parse_symbol)).parse(i)
}

fn parse_string(i: &str) -> IResult<&str, Atom, VerboseError<&str>> {
    map(strings::parse_string, Atom::Str).parse(i)
}

fn parse_constant(i: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    map(parse_string.or(parse_scalar), Expr::Constant).parse(i)
}

/// A list is zero or more expressions in brackets.
fn parse_list(i: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    map(
        delimited(
            char('('),
            parse_bare_list,
            context("closing paren", cut(char(')'))),
        ),
        Expr::list,
    )
    .parse(i)
}

fn parse_expr(i: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    parse_list.or(parse_constant).parse(i)
}

/// Expressions separated by white space, without brackets.
fn parse_bare_list(i: &str) -> IResult<&str, Vec<Expr>, VerboseError<&str>> {
    preceded(multispace0, many0(terminated(parse_expr, multispace0))).parse(i)
}

/// A whole document: one expression, usually a bracketed list.
pub fn parse_s_expr(i: &str) -> IResult<&str, Expr, VerboseError<&str>> {
    all_consuming(delimited(multispace0, parse_expr, multispace0)).parse(i)
}

#[cfg(test)]
mod test {
    use super::parse_s_expr;
    use crate::sexpr::{Atom, Expr};

    fn parse(s: &str) -> Expr {
        parse_s_expr(s).unwrap().1
    }

    fn second(e: &Expr) -> Atom {
        e.as_list().unwrap()[1].as_atom().unwrap().clone()
    }

    #[test]
    fn tokens_are_classified_whole() {
        let numbers = ["0", "-0.825", "1.50", "0805", ".5", "12E45678", "1e400"];
        let symbols = [
            "4k7",
            "+5V",
            "5.1.9",
            "5B301BBD",
            "12EA0000",
            "1e",
            "F.Cu",
            "0x00010fc_ffffffff",
            "5DE8A4E1-0C3F-4A8B-9E0B-1C2D3E4F5A6B",
        ];
        for token in numbers {
            let atom = second(&parse(&format!("(x {token})")));
            assert!(atom.as_num().is_some(), "{token} should be a number");
            assert_eq!(atom.to_string(), token);
        }
        for token in symbols {
            let atom = second(&parse(&format!("(x {token})")));
            assert_eq!(atom.as_symbol(), Some(token));
            assert_eq!(atom.to_string(), token);
        }
    }

    #[test]
    fn number_values() {
        assert_eq!(second(&parse("(x 1.50)")).as_num(), Some(1.5));
        assert_eq!(second(&parse("(x 0805)")).as_num(), Some(805.0));
        assert_eq!(second(&parse("(x -2)")).as_num(), Some(-2.0));
    }

    #[test]
    fn legacy_tokens_print_back_unchanged() {
        let s = "(module R_0603 (layer F.Cu) (tedit 5B301BBD))";
        assert_eq!(parse(s).to_string(), s);
        let s = "(net 2 +5V)";
        assert_eq!(parse(s).to_string(), s);
        let s = "(size 1.50 1.50)";
        assert_eq!(parse(s).to_string(), s);
    }

    #[test]
    fn nested() {
        let e = parse(
            r#"
            (fp_text reference "R1" (at 0 -1.43)
                (effects (font (size 1 1) (thickness 0.15))))
            "#,
        );
        assert!(e.is_keyed("fp_text"));
        let effects = &e.as_list().unwrap()[4];
        assert!(effects.is_keyed("effects"));
    }

    #[test]
    fn string_touching_paren() {
        let e = parse(r#"(property "Value" "10k")"#);
        assert_eq!(e.as_list().unwrap()[2], Expr::from("10k"));
    }

    #[test]
    fn unbalanced() {
        assert!(parse_s_expr("(kicad_pcb (version 1)").is_err());
        assert!(parse_s_expr("(kicad_pcb))").is_err());
    }
}

//! Structural combinators
//!
//! Each combinator restarts its alternatives from the position it was given
//! and never rewinds a parser that already succeeded. Failure handling is
//! fixed per combinator:
//! - `sequence`, `pair`, `pick`, `many1`, `map`, `bind` and `not` pass the
//!   first failure through as-is
//! - `choice` replaces branch failures with one generic message
//! - `many` and `optional` turn failure into an empty success
//! - `parse_or_fail` replaces the message with the caller's
use crate::parser::Parser;
use crate::primitives::{satisfy, string};
use crate::result::ParseResult;

pub const NO_CHOICE: &str = "Did not match any of the given choices";
pub const UNEXPECTED_MATCH: &str = "Parser was not supposed to match";

/// Which value [`pick`] keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    KeepLeft,
    KeepRight,
}

/// Run every parser in order, collecting their values.
pub fn sequence<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    Parser::new("sequence", move |input, pos| {
        let mut values = Vec::with_capacity(parsers.len());
        let mut at = pos;

        for parser in &parsers {
            match parser.parse_at(input, at) {
                ParseResult::Success { value, remaining } => {
                    values.push(value);
                    at = remaining;
                }
                ParseResult::Failure(failure) => return ParseResult::Failure(failure),
            }
        }

        ParseResult::success(values, at)
    })
}

/// Two parsers in sequence, keeping both values.
pub fn pair<A: 'static, B: 'static>(first: Parser<A>, second: Parser<B>) -> Parser<(A, B)> {
    Parser::new("pair", move |input, pos| match first.parse_at(input, pos) {
        ParseResult::Success { value, remaining } => second
            .parse_at(input, remaining)
            .map(|next| (value, next)),
        ParseResult::Failure(failure) => ParseResult::Failure(failure),
    })
}

/// First alternative that matches, each tried from the same position.
pub fn choice<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    Parser::new("choice", move |input, pos| {
        parsers
            .iter()
            .map(|parser| parser.parse_at(input, pos))
            .find(ParseResult::is_success)
            .unwrap_or_else(|| ParseResult::failure(NO_CHOICE))
    })
}

/// Zero or more repetitions. Never fails.
///
/// A repetition that matches without consuming anything ends the loop and is
/// not recorded, so `many` over a parser that can match the empty string
/// still terminates.
pub fn many<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    Parser::new("many", move |input, pos| {
        let mut values = Vec::new();
        let mut at = pos;

        while let ParseResult::Success { value, remaining } = parser.parse_at(input, at) {
            if remaining == at {
                break;
            }
            values.push(value);
            at = remaining;
        }

        ParseResult::success(values, at)
    })
}

/// One or more repetitions. Zero matches fail with the parser's own failure.
pub fn many1<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    let rest = many(parser.clone());
    pair(parser, rest)
        .map(|(first, rest)| std::iter::once(first).chain(rest).collect::<Vec<T>>())
        .labelled("many1")
}

/// Try `parser`; on failure succeed with `None` without consuming input.
pub fn optional<T: 'static>(parser: Parser<T>) -> Parser<Option<T>> {
    Parser::new("optional", move |input, pos| match parser.parse_at(input, pos) {
        ParseResult::Success { value, remaining } => ParseResult::success(Some(value), remaining),
        ParseResult::Failure(_) => ParseResult::success(None, pos),
    })
}

/// Run `left` then `right` and keep the value of one side.
///
/// Both sides are always consumed; the result is positioned after `right`.
pub fn pick<T: 'static>(left: Parser<T>, right: Parser<T>, side: Side) -> Parser<T> {
    keep_side("pick", left, right, move |l, r| match side {
        Side::KeepLeft => l,
        Side::KeepRight => r,
    })
}

pub fn left<A: 'static, B: 'static>(left: Parser<A>, right: Parser<B>) -> Parser<A> {
    keep_side("left", left, right, |l, _| l)
}

pub fn right<A: 'static, B: 'static>(left: Parser<A>, right: Parser<B>) -> Parser<B> {
    keep_side("right", left, right, |_, r| r)
}

fn keep_side<A, B, T, F>(label: &str, left: Parser<A>, right: Parser<B>, select: F) -> Parser<T>
where
    A: 'static,
    B: 'static,
    T: 'static,
    F: Fn(A, B) -> T + Send + Sync + 'static,
{
    pair(left, right)
        .map(move |(l, r)| select(l, r))
        .labelled(label)
}

/// Negative lookahead that consumes one character.
///
/// If `parser` matches here this fails. Otherwise it consumes exactly one
/// character from the original position, however much `parser` would
/// have consumed.
pub fn not<T: 'static>(parser: Parser<T>) -> Parser<char> {
    let any = satisfy(|_| true);

    Parser::new("not", move |input, pos| {
        if parser.parse_at(input, pos).is_success() {
            return ParseResult::failure(UNEXPECTED_MATCH);
        }
        any.parse_at(input, pos)
    })
}

pub fn map<T, U, F>(parser: Parser<T>, f: F) -> Parser<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    Parser::new("map", move |input, pos| parser.parse_at(input, pos).map(&f))
}

/// Run `parser`, then the parser `f` builds from its value.
///
/// This is how a rule that depends on something already parsed is written,
/// e.g. a closing tag that must repeat the opening tag's name.
pub fn bind<T, U, F>(parser: Parser<T>, f: F) -> Parser<U>
where
    T: 'static,
    U: 'static,
    F: Fn(T) -> Parser<U> + Send + Sync + 'static,
{
    Parser::new("bind", move |input, pos| match parser.parse_at(input, pos) {
        ParseResult::Success { value, remaining } => f(value).parse_at(input, remaining),
        ParseResult::Failure(failure) => ParseResult::Failure(failure),
    })
}

/// Text between two delimiters, e.g. `surrounded_by("[", "]")`.
///
/// At least one character must sit between them.
pub fn surrounded_by(start: &str, end: &str) -> Parser<String> {
    let interior = many1(not(string(end))).map(|chars| chars.into_iter().collect::<String>());

    right(string(start), left(interior, string(end)))
        .labelled(format!("surrounded_by({:?}, {:?})", start, end))
}

/// Replace any failure of `parser` with `message`.
pub fn parse_or_fail<T: 'static>(parser: Parser<T>, message: impl Into<String>) -> Parser<T> {
    let message = message.into();

    Parser::new(message.clone(), move |input, pos| {
        match parser.parse_at(input, pos) {
            ParseResult::Failure(_) => ParseResult::failure(message.as_str()),
            success => success,
        }
    })
}

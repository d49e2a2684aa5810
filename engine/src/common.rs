//! Parsers for blanks and lines, built only from the primitives and combinators.
use crate::combinators::{choice, left, many1, not, optional};
use crate::parser::Parser;
use crate::primitives::{character, string};

/// A space or a tab
pub fn whitespace() -> Parser<char> {
    choice(vec![character(' '), character('\t')]).labelled("whitespace")
}

/// `"\n"` or `"\r\n"`
pub fn eol() -> Parser<String> {
    choice(vec![string("\n"), string("\r\n")]).labelled("eol")
}

/// A non-empty line, without its line ending. The ending itself is consumed
/// when present; the last line of the input may lack one.
pub fn line() -> Parser<String> {
    left(many1(not(eol())), optional(eol()))
        .map(|chars| chars.into_iter().collect::<String>())
        .labelled("line")
}

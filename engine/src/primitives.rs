//! Primitive matchers
//!
//! Everything else is composed from these: a predicate over one character,
//! exact characters and literals, and character classes.
use crate::combinators::parse_or_fail;
use crate::error::GrammarError;
use crate::parser::Parser;
use crate::result::ParseResult;

pub const END_OF_INPUT: &str = "Unexpected end of input";
pub const NO_MATCH: &str = "Character could not be matched";

/// Succeed with `value` without consuming anything.
pub fn succeed<T>(value: T) -> Parser<T>
where
    T: Clone + Send + Sync + 'static,
{
    Parser::new("succeed", move |_input, pos| ParseResult::success(value.clone(), pos))
}

/// Fail with `message` without looking at the input.
pub fn fail<T: 'static>(message: impl Into<String>) -> Parser<T> {
    let message = message.into();
    Parser::new("fail", move |_input, _pos| ParseResult::failure(message.as_str()))
}

/// Match one character for which `predicate` holds.
pub fn satisfy<P>(predicate: P) -> Parser<char>
where
    P: Fn(char) -> bool + Send + Sync + 'static,
{
    Parser::new("satisfy", move |input, pos| match input.get(pos) {
        None => ParseResult::failure(END_OF_INPUT),
        Some(c) if predicate(c) => ParseResult::success(c, pos + 1),
        Some(_) => ParseResult::failure(NO_MATCH),
    })
}

/// Match exactly `expected`.
pub fn character(expected: char) -> Parser<char> {
    parse_or_fail(
        satisfy(move |c| c == expected),
        format!("Expected character '{}'", expected),
    )
    .labelled(format!("character({:?})", expected))
}

/// [`character`] for callers holding a string, e.g. a delimiter read from
/// configuration. Anything but exactly one character is rejected while the
/// grammar is being built.
pub fn try_character(s: &str) -> Result<Parser<char>, GrammarError> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(GrammarError::EmptyCharacter),
        (Some(c), None) => Ok(character(c)),
        (Some(_), Some(_)) => Err(GrammarError::NotACharacter(s.to_string())),
    }
}

/// Match the literal `expected`, one character at a time.
pub fn string(expected: &str) -> Parser<String> {
    let characters: Vec<Parser<char>> = expected.chars().map(character).collect();
    let literal = expected.to_string();
    let message = format!("Expected string '{}'", expected);

    Parser::new(format!("string({:?})", expected), move |input, pos| {
        let matched = characters
            .iter()
            .fold(ParseResult::success((), pos), |result, character| {
                result.and_then(|at| character.parse_at(input, at).map(|_| ()))
            });

        match matched {
            ParseResult::Success { remaining, .. } => {
                ParseResult::success(literal.clone(), remaining)
            }
            ParseResult::Failure(_) => ParseResult::failure(message.as_str()),
        }
    })
}

pub fn one_of(set: impl IntoIterator<Item = char>) -> Parser<char> {
    let set: Vec<char> = set.into_iter().collect();
    satisfy(move |c| set.contains(&c)).labelled("one_of")
}

pub fn none_of(set: impl IntoIterator<Item = char>) -> Parser<char> {
    let set: Vec<char> = set.into_iter().collect();
    satisfy(move |c| !set.contains(&c)).labelled("none_of")
}

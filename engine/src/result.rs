//! Success/failure algebra
//!
//! Every parser produces a [`ParseResult`]. Combinators are written in terms
//! of how they interpret it: failures short-circuit through `map` and
//! `and_then` untouched, so no operation here ever invents a message.
use crate::input::Position;
use thiserror::Error;

/// A match failure. Expected and data-dependent, never a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct Failure {
    message: String,
}

impl Failure {
    pub fn new(message: impl Into<String>) -> Self {
        Failure {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Outcome of running a parser at some position
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult<T> {
    /// The parser matched. `remaining` is the position just after the match.
    Success { value: T, remaining: Position },
    Failure(Failure),
}

impl<T> ParseResult<T> {
    pub fn success(value: T, remaining: Position) -> Self {
        ParseResult::Success { value, remaining }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        ParseResult::Failure(Failure::new(message))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ParseResult::Success { value, .. } => Some(value),
            ParseResult::Failure(_) => None,
        }
    }

    pub fn remaining(&self) -> Option<Position> {
        match self {
            ParseResult::Success { remaining, .. } => Some(*remaining),
            ParseResult::Failure(_) => None,
        }
    }

    pub fn failure_ref(&self) -> Option<&Failure> {
        match self {
            ParseResult::Success { .. } => None,
            ParseResult::Failure(failure) => Some(failure),
        }
    }

    /// Transform the value of a success. `f` is never called on failure.
    pub fn map<U, F>(self, f: F) -> ParseResult<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            ParseResult::Success { value, remaining } => ParseResult::Success {
                value: f(value),
                remaining,
            },
            ParseResult::Failure(failure) => ParseResult::Failure(failure),
        }
    }

    /// Continue from the remaining position of a success.
    ///
    /// Whatever `f` returns is passed through verbatim; the value of this
    /// result is dropped. A failure is returned unchanged.
    pub fn and_then<U, F>(self, f: F) -> ParseResult<U>
    where
        F: FnOnce(Position) -> ParseResult<U>,
    {
        match self {
            ParseResult::Success { remaining, .. } => f(remaining),
            ParseResult::Failure(failure) => ParseResult::Failure(failure),
        }
    }

    pub fn into_result(self) -> Result<(T, Position), Failure> {
        match self {
            ParseResult::Success { value, remaining } => Ok((value, remaining)),
            ParseResult::Failure(failure) => Err(failure),
        }
    }
}

impl<T> From<Failure> for ParseResult<T> {
    fn from(failure: Failure) -> Self {
        ParseResult::Failure(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_map_success() {
        let result = ParseResult::success(2, 5).map(|n| n * 10);
        assert_eq!(result, ParseResult::success(20, 5));
    }

    #[test]
    fn test_map_failure_skips_function() {
        let result: ParseResult<i32> = ParseResult::failure("nope");
        let mapped = result.map(|_: i32| -> i32 { panic!("map called on failure") });
        assert_eq!(mapped, ParseResult::failure("nope"));
    }

    #[test]
    fn test_and_then_continues_from_remaining() {
        let result = ParseResult::success('a', 1).and_then(|at| ParseResult::success(at * 2, at + 1));
        assert_eq!(result, ParseResult::success(2, 2));
    }

    #[test]
    fn test_and_then_returns_inner_failure_verbatim() {
        let result: ParseResult<()> =
            ParseResult::success('a', 1).and_then(|_| ParseResult::failure("inner"));
        assert_eq!(result.failure_ref().map(Failure::message), Some("inner"));
    }

    #[test]
    fn test_and_then_keeps_outer_failure() {
        let result: ParseResult<char> = ParseResult::failure("outer");
        let chained: ParseResult<char> =
            result.and_then(|_| -> ParseResult<char> { panic!("and_then called on failure") });
        assert_eq!(chained, ParseResult::failure("outer"));
    }

    #[test]
    fn test_monad_identity_laws() {
        // Right identity: chaining a parser that succeeds where it started
        let result = ParseResult::success("aap", 3);
        let chained = result.clone().and_then(|at| ParseResult::success("aap", at));
        assert_eq!(chained, result);

        // Functor identity
        assert_eq!(result.clone().map(|v| v), result);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(ParseResult::success('x', 1).into_result(), Ok(('x', 1)));
        assert_eq!(
            ParseResult::<char>::failure("bad").into_result(),
            Err(Failure::new("bad"))
        );
    }

    #[test]
    fn test_failure_display() {
        let failure = Failure::new("Unexpected end of input");
        assert_eq!(failure.to_string(), "Unexpected end of input");
    }
}

//! The parser abstraction
//!
//! A [`Parser`] is a labelled function from a position in an [`Input`] to a
//! [`ParseResult`]. It holds no mutable state: running it twice at the same
//! position of the same input gives equal results. Parsers are shared behind
//! an `Arc`, so cloning one is cheap and a built grammar can be used from
//! several threads at once.
use crate::combinators;
use crate::input::{Input, Position};
use crate::result::ParseResult;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

type ParseFn<T> = dyn Fn(&Input<'_>, Position) -> ParseResult<T> + Send + Sync;

pub struct Parser<T> {
    label: Arc<str>,
    run: Arc<ParseFn<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            label: Arc::clone(&self.label),
            run: Arc::clone(&self.run),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Parser").field(&self.label).finish()
    }
}

impl<T: 'static> Parser<T> {
    /// Wrap a parse function. The label only shows up in trace output.
    pub fn new<F>(label: impl Into<Arc<str>>, run: F) -> Self
    where
        F: Fn(&Input<'_>, Position) -> ParseResult<T> + Send + Sync + 'static,
    {
        Parser {
            label: label.into(),
            run: Arc::new(run),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Same behaviour under a different label
    pub fn labelled(self, label: impl Into<Arc<str>>) -> Self {
        Parser {
            label: label.into(),
            run: self.run,
        }
    }

    pub fn parse_at(&self, input: &Input<'_>, pos: Position) -> ParseResult<T> {
        let result = (self.run)(input, pos);
        trace!(
            parser = %self.label,
            pos,
            matched = result.is_success(),
            "parser invoked"
        );
        result
    }

    pub fn map<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        combinators::map(self, f)
    }

    /// Build the next parser from this parser's value.
    pub fn bind<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> Parser<U> + Send + Sync + 'static,
    {
        combinators::bind(self, f)
    }

    pub fn then<U: 'static>(self, next: Parser<U>) -> Parser<(T, U)> {
        combinators::pair(self, next)
    }

    /// Run `next` after this parser but keep this parser's value.
    pub fn left<U: 'static>(self, next: Parser<U>) -> Parser<T> {
        combinators::left(self, next)
    }

    /// Run `next` after this parser and keep `next`'s value.
    pub fn right<U: 'static>(self, next: Parser<U>) -> Parser<U> {
        combinators::right(self, next)
    }

    pub fn or_fail(self, message: impl Into<String>) -> Parser<T> {
        combinators::parse_or_fail(self, message)
    }
}

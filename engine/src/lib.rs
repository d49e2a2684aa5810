//! braid: parser combinators
//!
//! Parsers are built by composing small matchers with ordinary functions
//! instead of generating code from a grammar file:
//!
//! ```
//! use braid::{many1, one_of, run, string};
//!
//! let digits = many1(one_of('0'..='9')).map(|ds| ds.into_iter().collect::<String>());
//! let version = string("v").right(digits);
//!
//! assert_eq!(run(&version, "v42 rest"), Ok(("42".to_string(), " rest")));
//! assert!(run(&version, "x42").is_err());
//! ```
//!
//! Grammars that refer to themselves are assembled through a [`Grammar`],
//! see the [`recursion`] module.

pub mod combinators;
pub mod common;
pub mod error;
pub mod input;
pub mod parser;
pub mod primitives;
pub mod recursion;
pub mod result;

pub use combinators::{
    bind, choice, left, many, many1, map, not, optional, pair, parse_or_fail, pick, right,
    sequence, surrounded_by, Side,
};
pub use common::{eol, line, whitespace};
pub use error::GrammarError;
pub use input::{Input, Position};
pub use parser::Parser;
pub use primitives::{
    character, fail, none_of, one_of, satisfy, string, succeed, try_character,
};
pub use recursion::{recur, recursive, Grammar, Rule};
pub use result::{Failure, ParseResult};

use tracing::debug;

/// Run `parser` over the whole of `text`.
///
/// Returns the parsed value and whatever text the parser left unconsumed.
/// Leftover input is not an error here; callers that need a full parse check
/// that the remainder is empty.
pub fn run<'a, T: 'static>(parser: &Parser<T>, text: &'a str) -> Result<(T, &'a str), Failure> {
    let input = Input::new(text);
    let result = parser.parse_at(&input, 0);

    debug!(
        parser = parser.label(),
        chars = input.len(),
        matched = result.is_success(),
        "run finished"
    );

    result
        .into_result()
        .map(|(value, remaining)| (value, input.rest(remaining)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_run_reports_remaining_text() {
        assert_eq!(
            run(&string("aap"), "aap noot mies"),
            Ok(("aap".to_string(), " noot mies"))
        );
    }

    #[test]
    fn test_run_full_input() {
        let parser = many(none_of(['\n']));
        let (value, rest) = run(&parser, "aap noot").expect("many never fails");
        assert_eq!(value.len(), 8);
        assert_eq!(rest, "");
    }

    #[test]
    fn test_run_failure() {
        let failure = run(&character('a'), "noot").unwrap_err();
        assert_eq!(failure.message(), "Expected character 'a'");
    }
}

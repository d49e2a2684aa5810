//! Errors raised while a grammar is being built.
//!
//! These are distinct from [`Failure`](crate::Failure): a `GrammarError`
//! means the grammar itself is malformed, so it is reported when the grammar
//! is assembled rather than when input is parsed.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("A character should be given")]
    EmptyCharacter,

    #[error("Expected a single character, got {0:?}")]
    NotACharacter(String),

    #[error("Rule `{0}` is already declared")]
    DuplicateRule(String),

    #[error("Rule `{0}` is already defined")]
    AlreadyDefined(String),

    #[error("Rule `{0}` is declared but never defined")]
    UndefinedRule(String),

    #[error("No rule named `{0}`")]
    UnknownRule(String),

    #[error("Rule `{0}` was declared with a different value type")]
    RuleTypeMismatch(String),

    #[error("Rule `{0}` belongs to another grammar")]
    ForeignRule(String),
}

//! Parser for markup documents
//!
//! Uses braid combinators; see [`grammar`] for the individual rules.
use crate::ast::Node;
use braid::{Failure, GrammarError, Parser};
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

pub mod grammar;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("Invalid markup grammar: {0}")]
    Grammar(#[from] GrammarError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] Failure),

    #[error("Unexpected input after the root tag: {0:?}")]
    TrailingInput(String),
}

/// The tag grammar is built once and shared by every caller.
fn document_parser() -> Result<&'static Parser<Node>, MarkupError> {
    static DOCUMENT: OnceLock<Result<Parser<Node>, GrammarError>> = OnceLock::new();

    DOCUMENT
        .get_or_init(grammar::tag)
        .as_ref()
        .map_err(|err| MarkupError::Grammar(err.clone()))
}

/// Parse a document consisting of one root tag.
///
/// Blanks around the root tag are allowed; anything else after it is an error.
pub fn parse_document(source: &str) -> Result<Node, MarkupError> {
    let parser = document_parser()?;
    let (node, rest) = braid::run(parser, source)?;

    if !rest.is_empty() {
        return Err(MarkupError::TrailingInput(rest.to_string()));
    }

    debug!(chars = source.len(), "parsed markup document");
    Ok(node)
}

//! Markup parser
//!
//! A small tag/attribute/text language parsed with braid combinators:
//!
//! ```
//! use braid_markup::{parse_document, Node};
//!
//! let node = parse_document("<a><b>x</b></a>").unwrap();
//! assert_eq!(node, Node::tag("a", vec![], vec![Node::tag("b", vec![], vec![Node::text("x")])]));
//! ```

pub mod ast;
pub mod parser;

pub use ast::{Attribute, Node, OpeningTag, TagNode, TextNode};
pub use parser::{parse_document, MarkupError};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::sync::Once;
use tracing::info;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=braid=trace` to see
/// every parser invocation, or `RUST_LOG=braid_markup=debug` for documents.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

/// Read and parse a markup file
pub fn parse_file(path: &Path) -> Result<Node> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read markup file {}", path.display()))?;

    let node = parse_document(&source)
        .with_context(|| format!("Failed to parse markup file {}", path.display()))?;

    info!(path = %path.display(), "parsed markup file");
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_parse_file() -> Result<()> {
        init_tracing();
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "<list>\n  <item>aap</item>\n  <item>noot</item>\n</list>")?;

        let node = parse_file(file.path())?;
        let list = node.as_tag().context("root is a tag")?;
        assert_eq!(list.name, "list");
        assert_eq!(
            list.children,
            vec![
                Node::tag("item", vec![], vec![Node::text("aap")]),
                Node::tag("item", vec![], vec![Node::text("noot")]),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file(Path::new("/nonexistent/braid/doc.xml")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read markup file"));
    }

    #[test]
    fn test_parse_file_with_syntax_error() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        write!(file, "<a>unclosed")?;

        let err = parse_file(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse markup file"));
        let cause = err.downcast_ref::<MarkupError>().context("markup error cause")?;
        assert_eq!(
            cause,
            &MarkupError::Syntax(braid::Failure::new("Expected closing tag '</a>'"))
        );
        Ok(())
    }
}

//! Grammar rules for the markup language
//!
//! Every rule is a braid parser returning the final AST types. Each one can
//! be run on its own or combined. Only `tag` is recursive; it goes through a
//! [`Grammar`] so a tag's children can contain tags.
use crate::ast::{Attribute, Node, OpeningTag, TagNode, TextNode};
use braid::{
    character, choice, eol, fail, many, many1, none_of, not, recur, succeed, surrounded_by,
    whitespace, Grammar, GrammarError, Parser,
};

/// Characters that end a tag name
const NAME_STOP: [char; 8] = ['>', ' ', '/', '<', '\n', '\r', '\t', '='];

/// Characters that end an attribute key
const KEY_STOP: [char; 8] = ['=', '>', '/', '<', ' ', '\n', '\r', '\t'];

fn collect(chars: Vec<char>) -> String {
    chars.into_iter().collect()
}

/// A space, tab or line ending
fn blank() -> Parser<String> {
    choice(vec![whitespace().map(String::from), eol()]).labelled("blank")
}

/// Parse an attribute, including the blanks in front of it
/// Example: ` foo="bar"`
pub fn attribute() -> Parser<Attribute> {
    let key = many1(none_of(KEY_STOP)).map(collect);

    many1(blank())
        .right(key)
        .left(character('='))
        .then(surrounded_by("\"", "\""))
        .map(|(key, value)| Attribute { key, value })
        .or_fail("Expected attribute")
}

/// Parse an opening tag and the blanks around it
/// Example: `<test foo="bar">`
pub fn opening_tag() -> Parser<OpeningTag> {
    let name = many1(none_of(NAME_STOP)).map(collect);

    many(blank())
        .right(character('<'))
        .right(name.then(many(attribute())))
        .left(many(blank()))
        .left(character('>'))
        .left(many(blank()))
        .map(|(name, attributes)| OpeningTag { name, attributes })
        .or_fail("Expected opening tag")
}

/// Parse the closing tag for `name` and the blanks around it
///
/// Any other closing tag is rejected: `closing_tag("a")` does not accept `</b>`.
pub fn closing_tag(name: &str) -> Parser<String> {
    let expected = name.to_string();

    many(blank())
        .right(surrounded_by("</", ">"))
        .bind(move |found| {
            if found == expected {
                succeed(found)
            } else {
                fail(format!("Mismatched closing tag '</{}>'", found))
            }
        })
        .left(many(blank()))
        .or_fail(format!("Expected closing tag '</{}>'", name))
}

/// Parse text up to the blanks before the next `<`
pub fn text() -> Parser<TextNode> {
    let tag_ahead = many(blank()).then(character('<'));

    many1(not(tag_ahead))
        .map(|chars| TextNode {
            text: collect(chars),
        })
        .or_fail("Expected text node")
}

/// Build the recursive tag parser
///
/// tag  := opening_tag (tag | text)* closing_tag(name of opening_tag)
pub fn tag() -> Result<Parser<Node>, GrammarError> {
    let mut grammar = Grammar::new();
    let tag_rule = grammar.declare::<Node>("tag")?;
    let text_rule = grammar.declare::<Node>("text")?;

    grammar.define(&text_rule, text().map(Node::Text))?;

    let children = many(choice(vec![recur(&tag_rule), recur(&text_rule)]));
    let element = opening_tag().bind(move |OpeningTag { name, attributes }| {
        let closing = closing_tag(&name);
        children.clone().left(closing).map(move |children| {
            Node::Tag(TagNode {
                name: name.clone(),
                attributes: attributes.clone(),
                children,
            })
        })
    });
    grammar.define(&tag_rule, element)?;

    grammar.entry(&tag_rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use braid::{run, Failure};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_attribute() {
        let result = run(&attribute(), " foo=\"bar\">");
        assert_eq!(result, Ok((Attribute::new("foo", "bar"), ">")));
    }

    #[test]
    fn test_attribute_needs_leading_blank() {
        let result = run(&attribute(), "foo=\"bar\"");
        assert_eq!(result, Err(Failure::new("Expected attribute")));
    }

    #[test]
    fn test_parse_opening_tag() {
        let result = run(&opening_tag(), "\n  <test foo=\"bar\" baz=\"qux\">\n  rest");
        assert!(result.is_ok());
        let (tag, rest) = result.unwrap();
        assert_eq!(tag.name, "test");
        assert_eq!(
            tag.attributes,
            vec![Attribute::new("foo", "bar"), Attribute::new("baz", "qux")]
        );
        assert_eq!(rest, "rest");
    }

    #[test]
    fn test_opening_tag_rejects_closing_tag() {
        let result = run(&opening_tag(), "</test>");
        assert_eq!(result, Err(Failure::new("Expected opening tag")));
    }

    #[test]
    fn test_parse_closing_tag() {
        let result = run(&closing_tag("baz"), "  </baz>\n</test>");
        assert_eq!(result, Ok(("baz".to_string(), "</test>")));
    }

    #[test]
    fn test_closing_tag_name_must_match() {
        let result = run(&closing_tag("baz"), "</test>");
        assert_eq!(result, Err(Failure::new("Expected closing tag '</baz>'")));
    }

    #[test]
    fn test_parse_text_stops_before_tag() {
        let result = run(&text(), "ramsam\n    </baz>");
        assert_eq!(
            result,
            Ok((
                TextNode {
                    text: "ramsam".to_string()
                },
                "\n    </baz>"
            ))
        );
    }

    #[test]
    fn test_text_keeps_inner_blanks() {
        let result = run(&text(), "aap noot\tmies<b>");
        assert_eq!(result.map(|(node, _)| node.text), Ok("aap noot\tmies".to_string()));
    }

    #[test]
    fn test_text_needs_content() {
        let result = run(&text(), "  <b>");
        assert_eq!(result, Err(Failure::new("Expected text node")));
    }

    #[test]
    fn test_parse_nested_tags() {
        let parser = tag().expect("grammar builds");
        let result = run(&parser, "<a><b>x</b></a>");
        assert_eq!(
            result,
            Ok((
                Node::tag(
                    "a",
                    vec![],
                    vec![Node::tag("b", vec![], vec![Node::text("x")])]
                ),
                ""
            ))
        );
    }

    #[test]
    fn test_mismatched_closing_tag_fails() {
        let parser = tag().expect("grammar builds");
        let result = run(&parser, "<a><b>x</c></a>");
        assert_eq!(result, Err(Failure::new("Expected closing tag '</a>'")));
    }

    #[test]
    fn test_swapped_closing_tags_fail() {
        let parser = tag().expect("grammar builds");
        assert!(run(&parser, "<a><b>x</a></b>").is_err());
    }

    #[test]
    fn test_mixed_children() {
        let parser = tag().expect("grammar builds");
        let (node, rest) = run(&parser, "<p>aap <b>noot</b> mies</p>").expect("parses");
        assert_eq!(rest, "");
        assert_eq!(
            node,
            Node::tag(
                "p",
                vec![],
                vec![
                    Node::text("aap"),
                    Node::tag("b", vec![], vec![Node::text("noot")]),
                    Node::text("mies"),
                ]
            )
        );
    }
}

//! Attribute serialization.

use std::io::{self, Write};

use headmark_ast::{AttributeValue, Node};

use crate::escape_html;

/// Restricts which attributes are written for an element.
#[derive(Debug, Clone, Copy)]
pub struct AttributeFilter {
    names: &'static [&'static str],
}

impl AttributeFilter {
    pub const fn new(names: &'static [&'static str]) -> Self {
        Self { names }
    }

    /// Returns true if the attribute may be written. `data-*` attributes
    /// are always allowed.
    pub fn allows(&self, name: &str) -> bool {
        name.starts_with("data-") || self.names.contains(&name)
    }
}

/// Global HTML attributes, valid on any element.
pub const GLOBAL_ATTRIBUTE_FILTER: AttributeFilter = AttributeFilter::new(&[
    "accesskey",
    "autocapitalize",
    "autofocus",
    "class",
    "contenteditable",
    "dir",
    "draggable",
    "enterkeyhint",
    "hidden",
    "id",
    "inert",
    "inputmode",
    "is",
    "itemid",
    "itemprop",
    "itemref",
    "itemscope",
    "itemtype",
    "lang",
    "part",
    "role",
    "slot",
    "spellcheck",
    "style",
    "tabindex",
    "title",
    "translate",
]);

/// Attributes allowed on headings.
pub const HEADING_ATTRIBUTE_FILTER: AttributeFilter = GLOBAL_ATTRIBUTE_FILTER;

/// Writes the node's attributes as ` name="escaped-value"` pairs, in
/// insertion order. With a filter, attributes it rejects are skipped.
pub fn render_attributes(
    w: &mut dyn Write,
    node: &Node,
    filter: Option<&AttributeFilter>,
) -> io::Result<()> {
    for attr in node.attributes() {
        if filter.is_some_and(|filter| !filter.allows(&attr.name)) {
            continue;
        }
        w.write_all(b" ")?;
        w.write_all(attr.name.as_bytes())?;
        w.write_all(b"=\"")?;
        match &attr.value {
            AttributeValue::Bytes(bytes) => w.write_all(&escape_html(bytes))?,
            other => w.write_all(&escape_html(other.to_string().as_bytes()))?,
        }
        w.write_all(b"\"")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use headmark_ast::{NodeKind, Span};
    use pretty_assertions::assert_eq;

    use super::*;

    fn render(node: &Node, filter: Option<&AttributeFilter>) -> String {
        let mut out = Vec::new();
        render_attributes(&mut out, node, filter).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_attributes_in_order_and_escaped() {
        let mut node = Node::new(NodeKind::Heading, Span::default());
        node.set_attribute("id", "a\"b");
        node.set_attribute("class", "x<y");
        node.set_attribute("tabindex", AttributeValue::Int(-1));

        assert_eq!(
            render(&node, None),
            r#" id="a&quot;b" class="x&lt;y" tabindex="-1""#
        );
    }

    #[test]
    fn test_filter_skips_unknown_attributes() {
        let mut node = Node::new(NodeKind::Heading, Span::default());
        node.set_attribute("id", "intro");
        node.set_attribute("onclick", "evil()");
        node.set_attribute("data-level", "2");

        assert_eq!(
            render(&node, Some(&HEADING_ATTRIBUTE_FILTER)),
            r#" id="intro" data-level="2""#
        );
    }

    #[test]
    fn test_no_attributes_writes_nothing() {
        let node = Node::new(NodeKind::Paragraph, Span::default());
        assert_eq!(render(&node, None), "");
    }
}

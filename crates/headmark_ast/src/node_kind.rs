//! Node kinds of the document tree.

/// Kinds of nodes in a [`Document`](crate::Document).
///
/// The built-in kinds mirror the Markdown constructs produced by the parser.
/// Extensions contribute their own kinds through [`NodeKind::Extension`],
/// named by a static string unique to the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum NodeKind {
    // Document structure
    /// Root document node.
    Document,

    // Block elements
    /// Paragraph containing inline content.
    Paragraph,
    /// Paragraph inside a tight list item; rendered without `<p>`.
    TextBlock,
    /// Heading (H1-H6).
    Heading,
    /// Block quote.
    BlockQuote,
    /// Ordered or unordered list.
    List,
    /// Item in a list.
    ListItem,
    /// Fenced or indented code block.
    CodeBlock,
    /// Thematic break (`---`).
    ThematicBreak,
    /// Raw HTML block.
    HtmlBlock,

    // Inline elements
    /// Plain text.
    Text,
    /// Hard line break.
    Break,
    /// Emphasis (italic).
    Emphasis,
    /// Strong emphasis (bold).
    Strong,
    /// Strikethrough text (GFM).
    Delete,
    /// Inline code.
    CodeSpan,
    /// Hyperlink.
    Link,
    /// Image.
    Image,
    /// Inline raw HTML.
    RawHtml,

    // Extension elements (GFM, etc.)
    /// Table (GFM).
    Table,
    /// Table row (GFM).
    TableRow,
    /// Table cell (GFM).
    TableCell,
    /// Footnote definition.
    FootnoteDefinition,
    /// Footnote reference.
    FootnoteReference,

    /// A node kind contributed by an extension.
    Extension(&'static str),
}

impl NodeKind {
    /// Returns true if this kind was contributed by an extension.
    #[inline]
    pub const fn is_extension(&self) -> bool {
        matches!(self, NodeKind::Extension(_))
    }

    /// Returns the display name of this kind.
    pub const fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "Document",
            NodeKind::Paragraph => "Paragraph",
            NodeKind::TextBlock => "TextBlock",
            NodeKind::Heading => "Heading",
            NodeKind::BlockQuote => "BlockQuote",
            NodeKind::List => "List",
            NodeKind::ListItem => "ListItem",
            NodeKind::CodeBlock => "CodeBlock",
            NodeKind::ThematicBreak => "ThematicBreak",
            NodeKind::HtmlBlock => "HtmlBlock",
            NodeKind::Text => "Text",
            NodeKind::Break => "Break",
            NodeKind::Emphasis => "Emphasis",
            NodeKind::Strong => "Strong",
            NodeKind::Delete => "Delete",
            NodeKind::CodeSpan => "CodeSpan",
            NodeKind::Link => "Link",
            NodeKind::Image => "Image",
            NodeKind::RawHtml => "RawHtml",
            NodeKind::Table => "Table",
            NodeKind::TableRow => "TableRow",
            NodeKind::TableCell => "TableCell",
            NodeKind::FootnoteDefinition => "FootnoteDefinition",
            NodeKind::FootnoteReference => "FootnoteReference",
            NodeKind::Extension(name) => name,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(NodeKind::Document, "Document")]
    #[case(NodeKind::Heading, "Heading")]
    #[case(NodeKind::CodeBlock, "CodeBlock")]
    #[case(NodeKind::Extension("Anchor"), "Anchor")]
    fn test_display(#[case] kind: NodeKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }

    #[test]
    fn test_extension_kind_uses_its_name() {
        let kind = NodeKind::Extension("Anchor");
        assert!(kind.is_extension());
        assert_eq!(kind.to_string(), "Anchor");
        assert!(!NodeKind::Heading.is_extension());
    }

    #[test]
    fn test_extension_kinds_compare_by_name() {
        assert_eq!(NodeKind::Extension("Anchor"), NodeKind::Extension("Anchor"));
        assert_ne!(NodeKind::Extension("Anchor"), NodeKind::Extension("Toc"));
    }
}

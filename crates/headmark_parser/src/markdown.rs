//! Markdown parser using markdown-rs (wooorm/markdown-rs).
//!
//! This parser converts Markdown to a headmark [`Document`] using the
//! `markdown` crate, which provides mdast-compatible AST output.

use std::collections::HashMap;
use std::convert::Infallible;

use headmark_ast::visitor::{WalkStatus, walk};
use headmark_ast::{Alignment, Document, Node, NodeData, NodeId, NodeKind, Span};
use markdown::mdast;
use markdown::{ParseOptions, to_mdast};
use tracing::{debug, trace};

use crate::{IdGenerator, ParseError, Parser};

/// Options controlling document construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Assign an `id` attribute to every heading, derived from its text.
    pub auto_heading_id: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            auto_heading_id: true,
        }
    }
}

/// Markdown parser implementation.
///
/// Uses `markdown-rs` for parsing, with GFM enabled:
/// - CommonMark
/// - Tables, strikethrough, autolinks
/// - Footnotes
pub struct MarkdownParser {
    options: ParserOptions,
}

impl MarkdownParser {
    /// Creates a new Markdown parser with default options.
    pub fn new() -> Self {
        Self::with_options(ParserOptions::default())
    }

    /// Creates a parser with the given options.
    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Gets default parse options (GFM).
    fn default_options() -> ParseOptions {
        ParseOptions::gfm()
    }
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MarkdownParser {
    fn name(&self) -> &str {
        "markdown"
    }

    fn extensions(&self) -> &[&str] {
        &["md", "markdown", "mdown", "mkdn", "mkd"]
    }

    fn parse(&self, source: &str) -> Result<Document, ParseError> {
        let options = Self::default_options();
        let mdast =
            to_mdast(source, &options).map_err(|e| ParseError::invalid_source(e.to_string()))?;

        let mut converter = Converter::new(self.options);
        converter.collect_definitions(&mdast);
        let root = converter.doc.root();
        converter.convert_node(root, &mdast);

        debug!(nodes = converter.doc.len(), "parsed markdown document");
        Ok(converter.doc)
    }
}

/// State for a single mdast → document conversion.
struct Converter {
    doc: Document,
    ids: Option<IdGenerator>,
    definitions: HashMap<String, (String, Option<String>)>,
}

impl Converter {
    fn new(options: ParserOptions) -> Self {
        Self {
            doc: Document::new(),
            ids: options.auto_heading_id.then(IdGenerator::new),
            definitions: HashMap::new(),
        }
    }

    /// Records link reference definitions; the first definition of a label wins.
    fn collect_definitions(&mut self, node: &mdast::Node) {
        if let mdast::Node::Definition(def) = node {
            self.definitions
                .entry(def.identifier.clone())
                .or_insert_with(|| (def.url.clone(), def.title.clone()));
        }
        if let Some(children) = node.children() {
            for child in children {
                self.collect_definitions(child);
            }
        }
    }

    /// Converts an mdast node and attaches the result below `parent`.
    fn convert_node(&mut self, parent: NodeId, node: &mdast::Node) {
        use markdown::mdast::Node as Md;

        let span = node_span(node);
        match node {
            Md::Root(root) => self.convert_children(parent, &root.children),

            Md::Paragraph(para) => {
                let kind = if self.in_tight_list(parent) {
                    NodeKind::TextBlock
                } else {
                    NodeKind::Paragraph
                };
                self.create_parent_node(parent, kind, span, &para.children);
            }

            Md::Heading(heading) => {
                let mut node = Node::new(NodeKind::Heading, span);
                node.data = NodeData::heading(heading.depth);
                let id = self.push(parent, node);
                self.convert_children(id, &heading.children);
                self.assign_heading_id(id);
            }

            Md::Text(text) => {
                self.push(parent, Node::with_value(NodeKind::Text, span, &text.value));
            }

            Md::Emphasis(em) => {
                self.create_parent_node(parent, NodeKind::Emphasis, span, &em.children);
            }

            Md::Strong(strong) => {
                self.create_parent_node(parent, NodeKind::Strong, span, &strong.children);
            }

            Md::Delete(del) => {
                self.create_parent_node(parent, NodeKind::Delete, span, &del.children);
            }

            Md::InlineCode(code) => {
                self.push(parent, Node::with_value(NodeKind::CodeSpan, span, &code.value));
            }

            Md::Code(code) => {
                let mut node = Node::with_value(NodeKind::CodeBlock, span, &code.value);
                node.data = NodeData::CodeBlock {
                    lang: code.lang.clone(),
                };
                self.push(parent, node);
            }

            Md::Link(link) => {
                let id = self.create_parent_node(parent, NodeKind::Link, span, &link.children);
                self.doc[id].data = NodeData::link(&link.url, link.title.clone());
            }

            Md::Image(image) => {
                self.push_image(parent, span, &image.alt, &image.url, image.title.clone());
            }

            Md::LinkReference(reference) => match self.definitions.get(&reference.identifier) {
                Some((url, title)) => {
                    let data = NodeData::link(url, title.clone());
                    let id =
                        self.create_parent_node(parent, NodeKind::Link, span, &reference.children);
                    self.doc[id].data = data;
                }
                None => self.convert_children(parent, &reference.children),
            },

            Md::ImageReference(reference) => match self.definitions.get(&reference.identifier) {
                Some((url, title)) => {
                    let (url, title) = (url.clone(), title.clone());
                    self.push_image(parent, span, &reference.alt, &url, title);
                }
                None => {
                    self.push(parent, Node::with_value(NodeKind::Text, span, &reference.alt));
                }
            },

            Md::List(list) => {
                let tight = !list.spread
                    && list
                        .children
                        .iter()
                        .all(|item| matches!(item, Md::ListItem(item) if !item.spread));
                let mut node = Node::new(NodeKind::List, span);
                node.data = NodeData::List {
                    ordered: list.ordered,
                    start: list.start,
                    tight,
                };
                let id = self.push(parent, node);
                self.convert_children(id, &list.children);
            }

            Md::ListItem(item) => {
                self.create_parent_node(parent, NodeKind::ListItem, span, &item.children);
            }

            Md::Blockquote(quote) => {
                self.create_parent_node(parent, NodeKind::BlockQuote, span, &quote.children);
            }

            Md::ThematicBreak(_) => {
                self.push(parent, Node::new(NodeKind::ThematicBreak, span));
            }

            Md::Break(_) => {
                self.push(parent, Node::new(NodeKind::Break, span));
            }

            Md::Html(html) => {
                let kind = match self.doc.kind(parent) {
                    NodeKind::Document
                    | NodeKind::BlockQuote
                    | NodeKind::ListItem
                    | NodeKind::FootnoteDefinition => NodeKind::HtmlBlock,
                    _ => NodeKind::RawHtml,
                };
                self.push(parent, Node::with_value(kind, span, &html.value));
            }

            // Table support (GFM)
            Md::Table(table) => {
                let table_id = self.push(parent, Node::new(NodeKind::Table, span));
                for (row_index, row) in table.children.iter().enumerate() {
                    let Md::TableRow(row_node) = row else {
                        continue;
                    };
                    let row_id = self.push(table_id, Node::new(NodeKind::TableRow, node_span(row)));
                    for (column, cell) in row_node.children.iter().enumerate() {
                        let Md::TableCell(cell_node) = cell else {
                            continue;
                        };
                        let align = table
                            .align
                            .get(column)
                            .map(convert_align)
                            .unwrap_or_default();
                        let cell_id = self.create_parent_node(
                            row_id,
                            NodeKind::TableCell,
                            node_span(cell),
                            &cell_node.children,
                        );
                        self.doc[cell_id].data = NodeData::TableCell {
                            header: row_index == 0,
                            align,
                        };
                    }
                }
            }

            // Footnotes (GFM)
            Md::FootnoteDefinition(def) => {
                let id = self.create_parent_node(
                    parent,
                    NodeKind::FootnoteDefinition,
                    span,
                    &def.children,
                );
                self.doc[id].data = NodeData::Footnote {
                    label: def.identifier.clone(),
                };
            }

            Md::FootnoteReference(reference) => {
                let mut node = Node::new(NodeKind::FootnoteReference, span);
                node.data = NodeData::Footnote {
                    label: reference.identifier.clone(),
                };
                self.push(parent, node);
            }

            // Consumed by collect_definitions
            Md::Definition(_) => {}

            _ => trace!(?span, "skipping unsupported mdast node"),
        }
    }

    fn convert_children(&mut self, parent: NodeId, children: &[mdast::Node]) {
        for child in children {
            self.convert_node(parent, child);
        }
    }

    /// Allocates a node and appends it to `parent`.
    fn push(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = self.doc.alloc(node);
        self.doc.append_child(parent, id);
        id
    }

    /// Helper to create a parent node and convert its children.
    fn create_parent_node(
        &mut self,
        parent: NodeId,
        kind: NodeKind,
        span: Span,
        children: &[mdast::Node],
    ) -> NodeId {
        let id = self.push(parent, Node::new(kind, span));
        self.convert_children(id, children);
        id
    }

    fn push_image(
        &mut self,
        parent: NodeId,
        span: Span,
        alt: &str,
        url: &str,
        title: Option<String>,
    ) -> NodeId {
        let mut node = Node::with_value(NodeKind::Image, span, alt);
        node.data = NodeData::link(url, title);
        self.push(parent, node)
    }

    /// Paragraphs directly inside an item of a tight list render without `<p>`.
    fn in_tight_list(&self, parent: NodeId) -> bool {
        if self.doc.kind(parent) != NodeKind::ListItem {
            return false;
        }
        self.doc
            .parent(parent)
            .is_some_and(|list| matches!(self.doc[list].data, NodeData::List { tight: true, .. }))
    }

    fn assign_heading_id(&mut self, heading: NodeId) {
        let Some(ids) = self.ids.as_mut() else {
            return;
        };
        let text = plain_text(&self.doc, heading);
        let id = ids.generate(&text);
        trace!(heading = heading.index(), id = %id, "assigned heading id");
        self.doc.set_attribute(heading, "id", id);
    }
}

/// Concatenates the literal text below a node.
fn plain_text(doc: &Document, node: NodeId) -> String {
    let mut text = String::new();
    let mut collect = |doc: &Document, id: NodeId, entering: bool| {
        if entering && matches!(doc.kind(id), NodeKind::Text | NodeKind::CodeSpan) {
            if let Some(value) = &doc[id].value {
                text.push_str(value);
            }
        }
        Ok::<_, Infallible>(WalkStatus::Continue)
    };
    let _ = walk(&mut collect, doc, node);
    text
}

fn convert_align(align: &mdast::AlignKind) -> Alignment {
    match align {
        mdast::AlignKind::Left => Alignment::Left,
        mdast::AlignKind::Center => Alignment::Center,
        mdast::AlignKind::Right => Alignment::Right,
        mdast::AlignKind::None => Alignment::None,
    }
}

/// Gets the span for an mdast node.
fn node_span(node: &mdast::Node) -> Span {
    if let Some(pos) = node.position() {
        Span::new(pos.start.offset as u32, pos.end.offset as u32)
    } else {
        Span::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use headmark_ast::AttributeValue;
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(source: &str) -> Document {
        MarkdownParser::new().parse(source).unwrap()
    }

    fn children(doc: &Document, id: NodeId) -> Vec<NodeId> {
        doc.children(id).collect()
    }

    fn id_of(doc: &Document, id: NodeId) -> Option<String> {
        doc.attribute(id, "id")
            .and_then(AttributeValue::as_bytes)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    #[test]
    fn test_parse_simple_markdown() {
        let doc = parse("# Hello\n\nThis is a paragraph.");

        assert_eq!(doc.kind(doc.root()), NodeKind::Document);
        assert_eq!(doc.child_count(doc.root()), 2);
    }

    #[test]
    fn test_parse_heading() {
        let doc = parse("# Level 1\n\n## Level 2");
        let top = children(&doc, doc.root());

        assert_eq!(top.len(), 2);
        assert_eq!(doc[top[0]].heading_level(), Some(1));
        assert_eq!(doc[top[1]].heading_level(), Some(2));
        assert_eq!(id_of(&doc, top[0]).as_deref(), Some("level-1"));
        assert_eq!(id_of(&doc, top[1]).as_deref(), Some("level-2"));
    }

    #[test]
    fn test_heading_id_includes_inline_code_and_emphasis() {
        let doc = parse("## Using `walk` *safely*");
        let heading = children(&doc, doc.root())[0];

        assert_eq!(id_of(&doc, heading).as_deref(), Some("using-walk-safely"));
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let doc = parse("## Usage\n\n## Usage\n");
        let top = children(&doc, doc.root());

        assert_eq!(id_of(&doc, top[0]).as_deref(), Some("usage"));
        assert_eq!(id_of(&doc, top[1]).as_deref(), Some("usage-1"));
    }

    #[test]
    fn test_auto_heading_id_disabled() {
        let parser = MarkdownParser::with_options(ParserOptions {
            auto_heading_id: false,
        });
        let doc = parser.parse("## Intro").unwrap();
        let heading = children(&doc, doc.root())[0];

        assert!(doc.attribute(heading, "id").is_none());
    }

    #[test]
    fn test_parse_link() {
        let doc = parse("[Example](https://example.com \"Example Title\")");
        let paragraph = children(&doc, doc.root())[0];
        let link = children(&doc, paragraph)[0];

        assert_eq!(doc.kind(link), NodeKind::Link);
        match &doc[link].data {
            NodeData::Link { url, title } => {
                assert_eq!(url, "https://example.com");
                assert_eq!(title.as_deref(), Some("Example Title"));
            }
            other => panic!("Expected Link data, got {other:?}"),
        }
    }

    #[test]
    fn test_link_reference_resolves_definition() {
        let doc = parse("[docs][1]\n\n[1]: https://example.com/docs\n");
        let paragraph = children(&doc, doc.root())[0];
        let link = children(&doc, paragraph)[0];

        assert_eq!(doc.kind(link), NodeKind::Link);
        assert!(matches!(&doc[link].data, NodeData::Link { url, .. } if url == "https://example.com/docs"));
        // The definition itself produces no node.
        assert_eq!(doc.child_count(doc.root()), 1);
    }

    #[test]
    fn test_extensions() {
        let parser = MarkdownParser::new();

        assert!(parser.can_parse("md"));
        assert!(parser.can_parse("markdown"));
        assert!(parser.can_parse("MD"));
        assert!(!parser.can_parse("txt"));
    }

    #[test]
    fn test_parse_empty_document() {
        let doc = parse("");

        assert_eq!(doc.kind(doc.root()), NodeKind::Document);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_parse_code_block() {
        let doc = parse("```rust\nfn main() {}\n```");
        let code = children(&doc, doc.root())[0];

        assert_eq!(doc.kind(code), NodeKind::CodeBlock);
        assert!(matches!(&doc[code].data, NodeData::CodeBlock { lang: Some(lang) } if lang == "rust"));
        assert_eq!(doc[code].value.as_deref(), Some("fn main() {}"));
    }

    #[test]
    fn test_tight_list_items_use_text_blocks() {
        let doc = parse("- one\n- two\n");
        let list = children(&doc, doc.root())[0];
        let item = children(&doc, list)[0];

        assert!(matches!(doc[list].data, NodeData::List { ordered: false, tight: true, .. }));
        assert_eq!(doc.kind(children(&doc, item)[0]), NodeKind::TextBlock);
    }

    #[test]
    fn test_loose_list_items_use_paragraphs() {
        let doc = parse("1. one\n\n2. two\n");
        let list = children(&doc, doc.root())[0];
        let item = children(&doc, list)[0];

        assert!(matches!(doc[list].data, NodeData::List { ordered: true, tight: false, start: Some(1) }));
        assert_eq!(doc.kind(children(&doc, item)[0]), NodeKind::Paragraph);
    }

    #[test]
    fn test_html_block_and_inline() {
        let doc = parse("<div>block</div>\n\ntext <b>bold</b>\n");
        let top = children(&doc, doc.root());

        assert_eq!(doc.kind(top[0]), NodeKind::HtmlBlock);
        let inline: Vec<_> = children(&doc, top[1]).iter().map(|id| doc.kind(*id)).collect();
        assert!(inline.contains(&NodeKind::RawHtml));
    }

    #[test]
    fn test_parse_table() {
        let doc = parse("| A | B |\n|:--|--:|\n| 1 | 2 |");
        let table = children(&doc, doc.root())[0];
        let rows = children(&doc, table);

        assert_eq!(doc.kind(table), NodeKind::Table);
        assert_eq!(rows.len(), 2);
        let header_cells = children(&doc, rows[0]);
        assert!(matches!(
            doc[header_cells[0]].data,
            NodeData::TableCell { header: true, align: Alignment::Left }
        ));
        let body_cells = children(&doc, rows[1]);
        assert!(matches!(
            doc[body_cells[1]].data,
            NodeData::TableCell { header: false, align: Alignment::Right }
        ));
    }

    #[test]
    fn test_parser_name() {
        let parser = MarkdownParser::default();
        assert_eq!(parser.name(), "markdown");
        assert!(parser.options().auto_heading_id);
    }

    #[test]
    fn test_span_positions() {
        let doc = parse("Hello");
        let paragraph = children(&doc, doc.root())[0];

        assert_eq!(doc[paragraph].span, Span::new(0, 5));
    }
}

//! Tree pass inserting anchor nodes into headings.

use std::convert::Infallible;
use std::sync::Arc;

use headmark_ast::visitor::{MutVisitor, WalkStatus, walk_mut};
use headmark_ast::{AttributeValue, Document, Node, NodeId, NodeKind};
use headmark_core::AstTransformer;
use tracing::{debug, trace};

use crate::{AnchorNode, AnchorRenderer, Attributer, Attributes, HeaderInfo, Position, Text, Texter};

/// Adds an [`AnchorNode`] to every heading that has an `id` and for which
/// the texter produces non-empty text.
///
/// Each run inserts a new anchor, so a document should be transformed
/// exactly once.
#[derive(Clone)]
pub struct Transformer {
    texter: Arc<dyn Texter>,
    position: Position,
    attributer: Arc<dyn Attributer>,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer {
    /// A transformer with the `¶` text, [`Position::After`] and
    /// `class="anchor"`.
    pub fn new() -> Self {
        Self {
            texter: Arc::new(Text::default()),
            position: Position::default(),
            attributer: Arc::new(Attributes::default()),
        }
    }

    pub(crate) fn from_parts(
        texter: Arc<dyn Texter>,
        position: Position,
        attributer: Arc<dyn Attributer>,
    ) -> Self {
        Self {
            texter,
            position,
            attributer,
        }
    }

    pub fn with_texter(mut self, texter: impl Texter + 'static) -> Self {
        self.texter = Arc::new(texter);
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_attributer(mut self, attributer: impl Attributer + 'static) -> Self {
        self.attributer = Arc::new(attributer);
        self
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// A renderer emitting anchors at the position this transformer
    /// inserts them.
    pub fn renderer(&self, unsafe_text: bool) -> AnchorRenderer {
        AnchorRenderer::new(self.position, unsafe_text)
    }

    /// Inserts anchors into every heading of `doc`, returning how many
    /// were inserted.
    pub fn apply(&self, doc: &mut Document) -> usize {
        let mut pass = Pass {
            transformer: self,
            inserted: 0,
            skipped: 0,
        };
        let root = doc.root();
        let Ok(_) = walk_mut(&mut pass, doc, root);
        debug!(
            inserted = pass.inserted,
            skipped = pass.skipped,
            position = %self.position,
            "anchor pass finished"
        );
        pass.inserted
    }

    /// Builds the anchor for `heading`, or `None` if it gets none.
    fn anchor_for(&self, doc: &Document, heading: NodeId) -> Option<Node> {
        let node = &doc[heading];
        let Some(id) = node.attribute("id").and_then(AttributeValue::as_bytes) else {
            trace!(span = ?node.span, "heading without a textual id");
            return None;
        };
        if id.is_empty() {
            trace!(span = ?node.span, "heading with an empty id");
            return None;
        }

        let level = node.heading_level().unwrap_or(1);
        let info = HeaderInfo { level, id };
        let text = self.texter.anchor_text(&info);
        if text.is_empty() {
            trace!(id = %String::from_utf8_lossy(id), "texter suppressed anchor");
            return None;
        }

        let mut anchor = Node::extension(Box::new(AnchorNode {
            id: id.to_vec(),
            level,
            value: text.into_owned(),
        }));
        for (name, value) in self.attributer.anchor_attributes(&info).iter() {
            anchor.set_attribute(name.as_str(), value.as_str());
        }
        Some(anchor)
    }

    fn insert(&self, doc: &mut Document, heading: NodeId, anchor: NodeId) {
        match self.position {
            Position::Before => match doc.first_child(heading) {
                Some(first) => doc.insert_before(heading, first, anchor),
                None => doc.append_child(heading, anchor),
            },
            Position::After => match doc.last_child(heading) {
                Some(last) => doc.insert_after(heading, last, anchor),
                None => doc.append_child(heading, anchor),
            },
        }
    }
}

impl AstTransformer for Transformer {
    fn transform(&self, doc: &mut Document, _source: &str) {
        self.apply(doc);
    }
}

struct Pass<'t> {
    transformer: &'t Transformer,
    inserted: usize,
    skipped: usize,
}

impl MutVisitor for Pass<'_> {
    type Error = Infallible;

    fn visit_mut(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        entering: bool,
    ) -> Result<WalkStatus, Infallible> {
        if !entering || doc.kind(node) != NodeKind::Heading {
            return Ok(WalkStatus::Continue);
        }

        match self.transformer.anchor_for(doc, node) {
            Some(anchor) => {
                let anchor = doc.alloc(anchor);
                self.transformer.insert(doc, node, anchor);
                self.inserted += 1;
            }
            None => self.skipped += 1,
        }
        Ok(WalkStatus::SkipChildren)
    }
}

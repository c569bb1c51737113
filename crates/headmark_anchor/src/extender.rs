//! Installs anchors into a [`MarkdownBuilder`].

use std::sync::Arc;

use headmark_core::{Extender, MarkdownBuilder};

use crate::{AnchorRenderer, Attributer, Attributes, Position, Text, Texter, Transformer};

/// Priority of both the anchor transformer and the anchor renderer.
pub const ANCHOR_PRIORITY: i32 = 100;

/// Adds permalink anchors to headings.
///
/// The transformer and the renderer are both built from the one
/// `position` held here, so anchors are always emitted where they were
/// inserted.
///
/// ```rust
/// use headmark_anchor::{AnchorExtender, Position, Text};
/// use headmark_core::Markdown;
///
/// let md = Markdown::builder()
///     .with_extension(&AnchorExtender::new().texter(Text::new("#")).position(Position::Before))
///     .build();
/// let html = md.convert_to_string("## Intro").unwrap();
/// assert_eq!(html, "<h2 id=\"intro\"><a class=\"anchor\" href=\"#intro\">#</a> Intro</h2>\n");
/// ```
#[derive(Clone)]
pub struct AnchorExtender {
    texter: Arc<dyn Texter>,
    position: Position,
    attributer: Arc<dyn Attributer>,
    unsafe_text: bool,
}

impl Default for AnchorExtender {
    fn default() -> Self {
        Self::new()
    }
}

impl AnchorExtender {
    pub fn new() -> Self {
        Self {
            texter: Arc::new(Text::default()),
            position: Position::default(),
            attributer: Arc::new(Attributes::default()),
            unsafe_text: false,
        }
    }

    /// Sets the anchor text policy. Defaults to `¶`.
    pub fn texter(mut self, texter: impl Texter + 'static) -> Self {
        self.texter = Arc::new(texter);
        self
    }

    /// Sets where anchors are placed. Defaults to [`Position::After`].
    pub fn position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Sets the anchor attribute policy. Defaults to `class="anchor"`.
    pub fn attributer(mut self, attributer: impl Attributer + 'static) -> Self {
        self.attributer = Arc::new(attributer);
        self
    }

    /// Writes anchor text without escaping. Only enable this for trusted
    /// texters.
    pub fn unsafe_text(mut self, unsafe_text: bool) -> Self {
        self.unsafe_text = unsafe_text;
        self
    }

    pub fn transformer(&self) -> Transformer {
        Transformer::from_parts(
            Arc::clone(&self.texter),
            self.position,
            Arc::clone(&self.attributer),
        )
    }

    pub fn renderer(&self) -> AnchorRenderer {
        AnchorRenderer::new(self.position, self.unsafe_text)
    }
}

impl Extender for AnchorExtender {
    fn extend(&self, md: &mut MarkdownBuilder) {
        md.add_transformer(Box::new(self.transformer()), ANCHOR_PRIORITY);
        md.add_node_renderer(Box::new(self.renderer()), ANCHOR_PRIORITY);
    }
}

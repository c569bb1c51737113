//! Render pass writing anchor nodes as `<a>` elements.

use std::io::{self, Write};

use headmark_ast::{Document, Node, NodeId, WalkStatus};
use headmark_html::{NodeRenderer, NodeRendererRegistry, RenderResult, escape_html, render_attributes};

use crate::{AnchorNode, KIND, Position};

/// Renders [`AnchorNode`]s.
///
/// `position` must match the position the anchors were inserted with:
/// `Before` anchors are written when the node is entered, `After` anchors
/// when it is exited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnchorRenderer {
    pub position: Position,
    /// Write the anchor text without escaping it.
    pub unsafe_text: bool,
}

impl AnchorRenderer {
    pub fn new(position: Position, unsafe_text: bool) -> Self {
        Self {
            position,
            unsafe_text,
        }
    }

    /// Render function for anchor nodes.
    pub fn render(&self, w: &mut dyn Write, doc: &Document, id: NodeId, entering: bool) -> RenderResult {
        if (self.position == Position::Before) != entering {
            return Ok(WalkStatus::Continue);
        }
        let Some(anchor) = doc.extension::<AnchorNode>(id) else {
            return Ok(WalkStatus::Continue);
        };
        if anchor.id.is_empty() {
            return Ok(WalkStatus::Continue);
        }

        match self.position {
            Position::After => {
                w.write_all(b" ")?;
                self.write_anchor(w, &doc[id], anchor)?;
            }
            Position::Before => {
                let mut w = SpaceOnDrop(w);
                self.write_anchor(&mut w, &doc[id], anchor)?;
            }
        }
        Ok(WalkStatus::Continue)
    }

    fn write_anchor(&self, w: &mut dyn Write, node: &Node, anchor: &AnchorNode) -> io::Result<()> {
        w.write_all(b"<a")?;
        render_attributes(w, node, None)?;
        w.write_all(b" href=\"#")?;
        w.write_all(&escape_html(&anchor.id))?;
        w.write_all(b"\">")?;
        if self.unsafe_text {
            w.write_all(&anchor.value)?;
        } else {
            w.write_all(&escape_html(&anchor.value))?;
        }
        w.write_all(b"</a>")
    }
}

impl NodeRenderer for AnchorRenderer {
    fn register_funcs(&self, registry: &mut NodeRendererRegistry) {
        let this = *self;
        registry.register(KIND, move |w, doc, node, entering| {
            this.render(w, doc, node, entering)
        });
    }
}

/// Writes the space separating a `Before` anchor from the heading text,
/// even if writing the anchor failed.
struct SpaceOnDrop<'w>(&'w mut dyn Write);

impl Write for SpaceOnDrop<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}

impl Drop for SpaceOnDrop<'_> {
    fn drop(&mut self) {
        let _ = self.0.write_all(b" ");
    }
}

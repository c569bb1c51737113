//! Render dispatch.
//!
//! Node renderers register one function per node kind. [`HtmlRenderer`]
//! walks the document and calls the registered function on every enter
//! and exit of a node of that kind.

use std::collections::HashMap;
use std::io::Write;

use headmark_ast::visitor::{WalkStatus, walk};
use headmark_ast::{Document, NodeId, NodeKind, Prioritized, sort_by_priority};
use tracing::debug;

use crate::{CoreRenderer, HtmlOptions, RenderError};

/// Result of a single render function call.
pub type RenderResult = Result<WalkStatus, RenderError>;

/// A render function: `(sink, document, node, entering)`.
pub type RenderFn = Box<dyn Fn(&mut dyn Write, &Document, NodeId, bool) -> RenderResult + Send + Sync>;

/// Priority of the built-in renderer. Renderers with a lower value take
/// precedence for the kinds they register.
pub const CORE_RENDERER_PRIORITY: i32 = 1000;

/// A participant in HTML rendering.
pub trait NodeRenderer: Send + Sync {
    /// Registers render functions for the node kinds this renderer handles.
    fn register_funcs(&self, registry: &mut NodeRendererRegistry);
}

/// Collects render functions during [`HtmlRendererBuilder::build`].
#[derive(Default)]
pub struct NodeRendererRegistry {
    funcs: HashMap<NodeKind, RenderFn>,
}

impl NodeRendererRegistry {
    /// Registers `func` for `kind` unless a higher-priority renderer already did.
    pub fn register<F>(&mut self, kind: NodeKind, func: F)
    where
        F: Fn(&mut dyn Write, &Document, NodeId, bool) -> RenderResult + Send + Sync + 'static,
    {
        self.funcs.entry(kind).or_insert_with(|| Box::new(func));
    }

    pub fn is_registered(&self, kind: NodeKind) -> bool {
        self.funcs.contains_key(&kind)
    }
}

/// Builder collecting prioritized node renderers.
pub struct HtmlRendererBuilder {
    renderers: Vec<Prioritized<Box<dyn NodeRenderer>>>,
}

impl HtmlRendererBuilder {
    /// Starts with the built-in renderer configured by `options`.
    pub fn new(options: HtmlOptions) -> Self {
        Self {
            renderers: vec![Prioritized::new(
                Box::new(CoreRenderer::new(options)),
                CORE_RENDERER_PRIORITY,
            )],
        }
    }

    /// Adds a node renderer at the given priority.
    pub fn add_node_renderer(mut self, renderer: Box<dyn NodeRenderer>, priority: i32) -> Self {
        self.renderers.push(Prioritized::new(renderer, priority));
        self
    }

    /// Registers every renderer, lowest priority value first.
    pub fn build(mut self) -> HtmlRenderer {
        sort_by_priority(&mut self.renderers);
        let mut registry = NodeRendererRegistry::default();
        for renderer in &self.renderers {
            renderer.value.register_funcs(&mut registry);
        }
        debug!(
            renderers = self.renderers.len(),
            kinds = registry.funcs.len(),
            "built HTML renderer"
        );
        HtmlRenderer {
            funcs: registry.funcs,
        }
    }
}

/// Renders documents to HTML through the registered render functions.
///
/// Nodes whose kind has no render function produce no output of their own,
/// but their children are still rendered.
pub struct HtmlRenderer {
    funcs: HashMap<NodeKind, RenderFn>,
}

impl HtmlRenderer {
    /// A renderer with only the built-in node renderer.
    pub fn new(options: HtmlOptions) -> Self {
        Self::builder(options).build()
    }

    pub fn builder(options: HtmlOptions) -> HtmlRendererBuilder {
        HtmlRendererBuilder::new(options)
    }

    /// Renders the whole document into `w`.
    pub fn render(&self, w: &mut dyn Write, doc: &Document) -> Result<(), RenderError> {
        let mut visit = |doc: &Document, node: NodeId, entering: bool| -> RenderResult {
            match self.funcs.get(&doc.kind(node)) {
                Some(func) => func(&mut *w, doc, node, entering),
                None => Ok(WalkStatus::Continue),
            }
        };
        walk(&mut visit, doc, doc.root())?;
        Ok(())
    }

    /// Renders the document into a string.
    pub fn render_to_string(&self, doc: &Document) -> Result<String, RenderError> {
        let mut out = Vec::new();
        self.render(&mut out, doc)?;
        String::from_utf8(out).map_err(|e| RenderError::custom(e.to_string()))
    }
}

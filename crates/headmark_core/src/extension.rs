//! Extension points of the pipeline.

use headmark_ast::Document;

use crate::MarkdownBuilder;

/// A pass that rewrites the document tree after parsing and before
/// rendering.
///
/// Transformers run once per document, in ascending priority order.
pub trait AstTransformer: Send + Sync {
    /// Transforms `doc`, which was parsed from `source`.
    fn transform(&self, doc: &mut Document, source: &str);
}

/// Installs transformers and node renderers into a pipeline.
pub trait Extender {
    fn extend(&self, md: &mut MarkdownBuilder);
}

impl<F> AstTransformer for F
where
    F: Fn(&mut Document, &str) + Send + Sync,
{
    fn transform(&self, doc: &mut Document, source: &str) {
        self(doc, source)
    }
}

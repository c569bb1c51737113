//! The Markdown to HTML pipeline.

use std::io::Write;

use headmark_ast::{Document, Prioritized, sort_by_priority};
use headmark_html::{HtmlOptions, HtmlRenderer, NodeRenderer};
use headmark_parser::{MarkdownParser, Parser, ParserOptions};
use tracing::debug;

use crate::{AstTransformer, ConvertError, Extender};

/// Collects options, transformers and node renderers for a [`Markdown`].
#[derive(Default)]
pub struct MarkdownBuilder {
    parser_options: ParserOptions,
    html_options: HtmlOptions,
    transformers: Vec<Prioritized<Box<dyn AstTransformer>>>,
    renderers: Vec<Prioritized<Box<dyn NodeRenderer>>>,
}

impl MarkdownBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parser_options(mut self, options: ParserOptions) -> Self {
        self.parser_options = options;
        self
    }

    pub fn html_options(mut self, options: HtmlOptions) -> Self {
        self.html_options = options;
        self
    }

    /// Lets `extender` install its transformers and renderers.
    pub fn with_extension(mut self, extender: &dyn Extender) -> Self {
        extender.extend(&mut self);
        self
    }

    /// Adds an AST transformer. Lower priority values run first.
    pub fn add_transformer(&mut self, transformer: Box<dyn AstTransformer>, priority: i32) {
        self.transformers.push(Prioritized::new(transformer, priority));
    }

    /// Adds a node renderer. For each node kind, the renderer with the
    /// lowest priority value that registers it is used.
    pub fn add_node_renderer(&mut self, renderer: Box<dyn NodeRenderer>, priority: i32) {
        self.renderers.push(Prioritized::new(renderer, priority));
    }

    pub fn build(mut self) -> Markdown {
        sort_by_priority(&mut self.transformers);
        let renderer = self
            .renderers
            .into_iter()
            .fold(HtmlRenderer::builder(self.html_options), |builder, r| {
                builder.add_node_renderer(r.value, r.priority)
            })
            .build();
        debug!(
            transformers = self.transformers.len(),
            auto_heading_id = self.parser_options.auto_heading_id,
            "built markdown pipeline"
        );
        Markdown {
            parser: MarkdownParser::with_options(self.parser_options),
            transformers: self.transformers,
            renderer,
        }
    }
}

/// Converts Markdown to HTML: parse, run the AST transformers, render.
pub struct Markdown {
    parser: MarkdownParser,
    transformers: Vec<Prioritized<Box<dyn AstTransformer>>>,
    renderer: HtmlRenderer,
}

impl Default for Markdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Markdown {
    /// A pipeline with default options and no extensions.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> MarkdownBuilder {
        MarkdownBuilder::new()
    }

    /// Parses `source` and applies every transformer in priority order.
    pub fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        let mut doc = self.parser.parse(source)?;
        debug!(nodes = doc.len(), "parsed document");
        for transformer in &self.transformers {
            transformer.value.transform(&mut doc, source);
        }
        Ok(doc)
    }

    /// Renders an already transformed document.
    pub fn render(&self, doc: &Document, w: &mut dyn Write) -> Result<(), ConvertError> {
        self.renderer.render(w, doc)?;
        Ok(())
    }

    /// Parses, transforms and renders `source` into `w`.
    pub fn convert(&self, source: &str, w: &mut dyn Write) -> Result<(), ConvertError> {
        let doc = self.parse(source)?;
        self.render(&doc, w)
    }

    /// Like [`Markdown::convert`], collecting the output into a string.
    pub fn convert_to_string(&self, source: &str) -> Result<String, ConvertError> {
        let doc = self.parse(source)?;
        Ok(self.renderer.render_to_string(&doc)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use headmark_ast::{NodeKind, WalkStatus};
    use headmark_html::NodeRendererRegistry;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl AstTransformer for Recorder {
        fn transform(&self, _doc: &mut Document, _source: &str) {
            self.log.lock().unwrap().push(self.name);
        }
    }

    struct Bold;

    impl NodeRenderer for Bold {
        fn register_funcs(&self, registry: &mut NodeRendererRegistry) {
            registry.register(NodeKind::Emphasis, |w, _, _, entering| {
                w.write_all(if entering { "<b>" } else { "</b>" }.as_bytes())?;
                Ok(WalkStatus::Continue)
            });
        }
    }

    struct BoldExtension;

    impl Extender for BoldExtension {
        fn extend(&self, md: &mut MarkdownBuilder) {
            md.add_node_renderer(Box::new(Bold), 500);
        }
    }

    #[test]
    fn test_convert_with_defaults() {
        let html = Markdown::new().convert_to_string("# Title\n\nSome *text*.").unwrap();
        assert_eq!(html, "<h1 id=\"title\">Title</h1>\n<p>Some <em>text</em>.</p>\n");
    }

    #[test]
    fn test_transformers_run_in_priority_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut builder = Markdown::builder();
        for (name, priority) in [("late", 900), ("early", 10), ("middle", 100)] {
            let recorder = Recorder {
                name,
                log: Arc::clone(&log),
            };
            builder.add_transformer(Box::new(recorder), priority);
        }

        builder.build().parse("text").unwrap();

        assert_eq!(*log.lock().unwrap(), vec!["early", "middle", "late"]);
    }

    #[test]
    fn test_closure_transformer_mutates_document() {
        let mut builder = Markdown::builder();
        builder.add_transformer(
            Box::new(|doc: &mut Document, _: &str| {
                let root = doc.root();
                if let Some(first) = doc.first_child(root) {
                    doc.set_attribute(first, "class", "lead");
                }
            }),
            100,
        );

        let html = builder.build().convert_to_string("# Hi").unwrap();
        assert_eq!(html, "<h1 id=\"hi\" class=\"lead\">Hi</h1>\n");
    }

    #[test]
    fn test_extension_renderer_overrides_core() {
        let md = Markdown::builder().with_extension(&BoldExtension).build();
        assert_eq!(md.convert_to_string("*x*").unwrap(), "<p><b>x</b></p>\n");
    }

    #[rstest]
    #[case::without_ids(false, "<h1>Title</h1>\n<p><em>raw</em></p>\n")]
    #[case::with_ids(true, "<h1 id=\"title\">Title</h1>\n<p><em>raw</em></p>\n")]
    fn test_options_are_applied(#[case] auto_heading_id: bool, #[case] expected: &str) {
        let md = Markdown::builder()
            .parser_options(ParserOptions { auto_heading_id })
            .html_options(HtmlOptions {
                unsafe_html: true,
                ..Default::default()
            })
            .build();

        let html = md.convert_to_string("# Title\n\n<em>raw</em>").unwrap();
        assert_eq!(html, expected);
    }

    #[test]
    fn test_convert_into_writer() {
        let mut out = Vec::new();
        Markdown::new().convert("plain", &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "<p>plain</p>\n");
    }
}

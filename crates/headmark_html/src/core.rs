//! Built-in renderer for the Markdown node kinds produced by the parser.

use std::io::Write;

use headmark_ast::{Document, NodeData, NodeId, NodeKind, WalkStatus};

use crate::{
    HEADING_ATTRIBUTE_FILTER, HtmlOptions, NodeRenderer, NodeRendererRegistry, RenderResult,
    escape_html, render_attributes,
};

const RAW_HTML_OMITTED: &[u8] = b"<!-- raw HTML omitted -->";

/// Renders every built-in [`NodeKind`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CoreRenderer {
    options: HtmlOptions,
}

impl CoreRenderer {
    pub fn new(options: HtmlOptions) -> Self {
        Self { options }
    }
}

impl NodeRenderer for CoreRenderer {
    fn register_funcs(&self, registry: &mut NodeRendererRegistry) {
        let kinds = [
            NodeKind::Document,
            NodeKind::Paragraph,
            NodeKind::TextBlock,
            NodeKind::Heading,
            NodeKind::BlockQuote,
            NodeKind::List,
            NodeKind::ListItem,
            NodeKind::CodeBlock,
            NodeKind::ThematicBreak,
            NodeKind::HtmlBlock,
            NodeKind::Text,
            NodeKind::Break,
            NodeKind::Emphasis,
            NodeKind::Strong,
            NodeKind::Delete,
            NodeKind::CodeSpan,
            NodeKind::Link,
            NodeKind::Image,
            NodeKind::RawHtml,
            NodeKind::Table,
            NodeKind::TableRow,
            NodeKind::TableCell,
            NodeKind::FootnoteDefinition,
            NodeKind::FootnoteReference,
        ];
        for kind in kinds {
            let this = *self;
            registry.register(kind, move |w, doc, node, entering| {
                this.render(w, doc, node, entering)
            });
        }
    }
}

impl CoreRenderer {
    fn render(&self, w: &mut dyn Write, doc: &Document, id: NodeId, entering: bool) -> RenderResult {
        let node = &doc[id];
        match node.kind {
            NodeKind::Document => {}

            NodeKind::Paragraph => {
                w.write_all(if entering { "<p>" } else { "</p>\n" }.as_bytes())?;
            }

            NodeKind::TextBlock => {
                if !entering
                    && doc.next_sibling(id).is_some()
                    && doc.first_child(id).is_some()
                {
                    w.write_all(b"\n")?;
                }
            }

            NodeKind::Heading => {
                let level = node.heading_level().unwrap_or(1);
                if entering {
                    write!(w, "<h{level}")?;
                    render_attributes(w, node, Some(&HEADING_ATTRIBUTE_FILTER))?;
                    w.write_all(b">")?;
                } else {
                    writeln!(w, "</h{level}>")?;
                }
            }

            NodeKind::BlockQuote => {
                let tag = if entering { "<blockquote>\n" } else { "</blockquote>\n" };
                w.write_all(tag.as_bytes())?;
            }

            NodeKind::List => {
                let (ordered, start) = match node.data {
                    NodeData::List { ordered, start, .. } => (ordered, start),
                    _ => (false, None),
                };
                let tag = if ordered { "ol" } else { "ul" };
                if entering {
                    write!(w, "<{tag}")?;
                    if let Some(start) = start.filter(|start| ordered && *start != 1) {
                        write!(w, " start=\"{start}\"")?;
                    }
                    w.write_all(b">\n")?;
                } else {
                    writeln!(w, "</{tag}>")?;
                }
            }

            NodeKind::ListItem => {
                if entering {
                    w.write_all(b"<li>")?;
                    if let Some(first) = doc.first_child(id)
                        && doc.kind(first) != NodeKind::TextBlock
                    {
                        w.write_all(b"\n")?;
                    }
                } else {
                    w.write_all(b"</li>\n")?;
                }
            }

            NodeKind::CodeBlock => {
                if entering {
                    w.write_all(b"<pre><code")?;
                    if let NodeData::CodeBlock { lang: Some(lang) } = &node.data {
                        w.write_all(b" class=\"language-")?;
                        w.write_all(&escape_html(lang.as_bytes()))?;
                        w.write_all(b"\"")?;
                    }
                    w.write_all(b">")?;
                    let value = node.value.as_deref().unwrap_or_default();
                    w.write_all(&escape_html(value.as_bytes()))?;
                    if !value.is_empty() {
                        w.write_all(b"\n")?;
                    }
                    w.write_all(b"</code></pre>\n")?;
                }
            }

            NodeKind::ThematicBreak => {
                if entering {
                    writeln!(w, "<hr{}", self.options.void_close())?;
                }
            }

            NodeKind::HtmlBlock => {
                if entering {
                    if self.options.unsafe_html {
                        w.write_all(node.value.as_deref().unwrap_or_default().as_bytes())?;
                    } else {
                        w.write_all(RAW_HTML_OMITTED)?;
                    }
                    w.write_all(b"\n")?;
                }
            }

            NodeKind::Text => {
                if entering {
                    let value = node.value.as_deref().unwrap_or_default();
                    self.write_text(w, value)?;
                }
            }

            NodeKind::Break => {
                if entering {
                    writeln!(w, "<br{}", self.options.void_close())?;
                }
            }

            NodeKind::Emphasis => {
                w.write_all(if entering { "<em>" } else { "</em>" }.as_bytes())?;
            }

            NodeKind::Strong => {
                w.write_all(if entering { "<strong>" } else { "</strong>" }.as_bytes())?;
            }

            NodeKind::Delete => {
                w.write_all(if entering { "<del>" } else { "</del>" }.as_bytes())?;
            }

            NodeKind::CodeSpan => {
                if entering {
                    w.write_all(b"<code>")?;
                    let value = node.value.as_deref().unwrap_or_default();
                    w.write_all(&escape_html(value.as_bytes()))?;
                    w.write_all(b"</code>")?;
                }
            }

            NodeKind::Link => {
                if entering {
                    w.write_all(b"<a href=\"")?;
                    if let NodeData::Link { url, title } = &node.data {
                        if self.options.unsafe_html || !is_dangerous_url(url) {
                            w.write_all(&escape_html(url.as_bytes()))?;
                        }
                        w.write_all(b"\"")?;
                        if let Some(title) = title {
                            w.write_all(b" title=\"")?;
                            w.write_all(&escape_html(title.as_bytes()))?;
                            w.write_all(b"\"")?;
                        }
                    } else {
                        w.write_all(b"\"")?;
                    }
                    w.write_all(b">")?;
                } else {
                    w.write_all(b"</a>")?;
                }
            }

            NodeKind::Image => {
                if entering {
                    w.write_all(b"<img src=\"")?;
                    let title = match &node.data {
                        NodeData::Link { url, title } => {
                            if self.options.unsafe_html || !is_dangerous_url(url) {
                                w.write_all(&escape_html(url.as_bytes()))?;
                            }
                            title.as_deref()
                        }
                        _ => None,
                    };
                    w.write_all(b"\" alt=\"")?;
                    let alt = node.value.as_deref().unwrap_or_default();
                    w.write_all(&escape_html(alt.as_bytes()))?;
                    w.write_all(b"\"")?;
                    if let Some(title) = title {
                        w.write_all(b" title=\"")?;
                        w.write_all(&escape_html(title.as_bytes()))?;
                        w.write_all(b"\"")?;
                    }
                    w.write_all(self.options.void_close().as_bytes())?;
                }
            }

            NodeKind::RawHtml => {
                if entering {
                    if self.options.unsafe_html {
                        w.write_all(node.value.as_deref().unwrap_or_default().as_bytes())?;
                    } else {
                        w.write_all(RAW_HTML_OMITTED)?;
                    }
                }
            }

            NodeKind::Table => {
                w.write_all(if entering { "<table>\n" } else { "</table>\n" }.as_bytes())?;
            }

            NodeKind::TableRow => self.render_table_row(w, doc, id, entering)?,

            NodeKind::TableCell => {
                let (header, align) = match node.data {
                    NodeData::TableCell { header, align } => (header, align),
                    _ => (false, Default::default()),
                };
                let tag = if header { "th" } else { "td" };
                if entering {
                    write!(w, "<{tag}")?;
                    if let Some(align) = align.as_css() {
                        write!(w, " style=\"text-align:{align}\"")?;
                    }
                    w.write_all(b">")?;
                } else {
                    writeln!(w, "</{tag}>")?;
                }
            }

            NodeKind::FootnoteDefinition => {
                if entering {
                    w.write_all(b"<div class=\"footnote\" id=\"fn:")?;
                    w.write_all(&escape_html(footnote_label(doc, id).as_bytes()))?;
                    w.write_all(b"\">\n")?;
                } else {
                    w.write_all(b"</div>\n")?;
                }
            }

            NodeKind::FootnoteReference => {
                if entering {
                    let label = escape_html(footnote_label(doc, id).as_bytes()).into_owned();
                    w.write_all(b"<sup id=\"fnref:")?;
                    w.write_all(&label)?;
                    w.write_all(b"\"><a href=\"#fn:")?;
                    w.write_all(&label)?;
                    w.write_all(b"\" class=\"footnote-ref\" role=\"doc-noteref\">")?;
                    w.write_all(&label)?;
                    w.write_all(b"</a></sup>")?;
                }
            }

            _ => {}
        }
        Ok(WalkStatus::Continue)
    }

    /// Writes escaped text, turning soft breaks into `<br>` with hard wraps.
    fn write_text(&self, w: &mut dyn Write, value: &str) -> std::io::Result<()> {
        if !self.options.hard_wraps {
            return w.write_all(&escape_html(value.as_bytes()));
        }
        for (index, line) in value.split('\n').enumerate() {
            if index > 0 {
                writeln!(w, "<br{}", self.options.void_close())?;
            }
            w.write_all(&escape_html(line.as_bytes()))?;
        }
        Ok(())
    }

    /// The first row of a table is its header; the rest form the body.
    fn render_table_row(
        &self,
        w: &mut dyn Write,
        doc: &Document,
        id: NodeId,
        entering: bool,
    ) -> std::io::Result<()> {
        let is_header = doc.prev_sibling(id).is_none();
        let is_first_body = doc
            .prev_sibling(id)
            .is_some_and(|prev| doc.prev_sibling(prev).is_none());
        let is_last_body = !is_header && doc.next_sibling(id).is_none();

        if entering {
            if is_header {
                w.write_all(b"<thead>\n")?;
            } else if is_first_body {
                w.write_all(b"<tbody>\n")?;
            }
            w.write_all(b"<tr>\n")?;
        } else {
            w.write_all(b"</tr>\n")?;
            if is_header {
                w.write_all(b"</thead>\n")?;
            } else if is_last_body {
                w.write_all(b"</tbody>\n")?;
            }
        }
        Ok(())
    }
}

fn footnote_label(doc: &Document, id: NodeId) -> &str {
    match &doc[id].data {
        NodeData::Footnote { label } => label,
        _ => "",
    }
}

/// Reports destinations that could run script when followed. Inline
/// `data:` images of common raster formats are allowed.
fn is_dangerous_url(url: &str) -> bool {
    let lower = url.trim_start().to_ascii_lowercase();
    if let Some(format) = lower.strip_prefix("data:image/") {
        return !["png", "gif", "jpeg", "webp", "svg+xml"]
            .iter()
            .any(|allowed| format.starts_with(allowed));
    }
    ["javascript:", "vbscript:", "file:", "data:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}

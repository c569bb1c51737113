//! # headmark_html
//!
//! HTML rendering for headmark documents.
//!
//! Rendering is driven by [`NodeRenderer`]s: each registers one render
//! function per node kind, and for every kind the renderer with the lowest
//! priority value wins. The built-in [`CoreRenderer`] covers all Markdown
//! node kinds at [`CORE_RENDERER_PRIORITY`].

mod attributes;
mod core;
mod error;
mod escape;
mod options;
mod renderer;

pub use attributes::{
    AttributeFilter, GLOBAL_ATTRIBUTE_FILTER, HEADING_ATTRIBUTE_FILTER, render_attributes,
};
pub use core::CoreRenderer;
pub use error::RenderError;
pub use escape::{escape_html, escape_html_str};
pub use options::HtmlOptions;
pub use renderer::{
    CORE_RENDERER_PRIORITY, HtmlRenderer, HtmlRendererBuilder, NodeRenderer,
    NodeRendererRegistry, RenderFn, RenderResult,
};

//! # headmark_core
//!
//! The Markdown to HTML pipeline of headmark.
//!
//! A [`Markdown`] parses source text into a document tree, runs the
//! registered [`AstTransformer`]s over it, and renders the result with the
//! registered node renderers. [`Extender`]s bundle transformers and
//! renderers into one installable unit.
//!
//! ## Example
//!
//! ```rust
//! use headmark_core::Markdown;
//!
//! let html = Markdown::new().convert_to_string("# Hello").unwrap();
//! assert_eq!(html, "<h1 id=\"hello\">Hello</h1>\n");
//! ```

mod error;
mod extension;
mod markdown;

pub use error::ConvertError;
pub use extension::{AstTransformer, Extender};
pub use markdown::{Markdown, MarkdownBuilder};

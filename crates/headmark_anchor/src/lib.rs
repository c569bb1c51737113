//! # headmark_anchor
//!
//! Permalink anchors for headings.
//!
//! Two passes cooperate:
//! - [`Transformer`] walks the document once after parsing and inserts an
//!   [`AnchorNode`] as the first or last child of every heading that has an
//!   `id` attribute and for which the [`Texter`] yields text.
//! - [`AnchorRenderer`] writes each anchor node as
//!   `<a href="#id" ...>text</a>`, separated from the heading text by one space.
//!
//! [`AnchorExtender`] installs both into a `headmark_core` pipeline.
//!
//! ## Example
//!
//! ```rust
//! use headmark_anchor::AnchorExtender;
//! use headmark_core::Markdown;
//!
//! let md = Markdown::builder().with_extension(&AnchorExtender::new()).build();
//! let html = md.convert_to_string("## Intro").unwrap();
//! assert_eq!(html, "<h2 id=\"intro\">Intro <a class=\"anchor\" href=\"#intro\">¶</a></h2>\n");
//! ```

mod extender;
mod node;
mod policy;
mod render;
mod transform;

pub use extender::{ANCHOR_PRIORITY, AnchorExtender};
pub use node::{AnchorNode, KIND};
pub use policy::{Attributer, Attributes, HeaderInfo, Position, Text, Texter};
pub use render::AnchorRenderer;
pub use transform::Transformer;

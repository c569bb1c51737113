//! # headmark_parser
//!
//! Parser abstraction layer for headmark.
//!
//! This crate provides:
//! - A `Parser` trait for implementing custom parsers
//! - Built-in Markdown parser using `markdown-rs`
//! - Automatic heading identifiers
//!
//! ## Example
//!
//! ```rust
//! use headmark_parser::{MarkdownParser, Parser};
//!
//! let parser = MarkdownParser::new();
//! let doc = parser.parse("# Hello\n\nThis is a paragraph.").unwrap();
//!
//! assert_eq!(doc.child_count(doc.root()), 2);
//! ```

mod error;
mod ids;
mod markdown;
mod traits;

pub use error::ParseError;
pub use ids::IdGenerator;
pub use markdown::{MarkdownParser, ParserOptions};
pub use traits::Parser;

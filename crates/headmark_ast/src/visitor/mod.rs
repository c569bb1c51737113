//! Tree walking for document traversal.
//!
//! This module provides the walk primitive shared by transformers and
//! renderers.
//!
//! # Overview
//!
//! - [`Visitor`] - Read-only traversal trait
//! - [`MutVisitor`] - Traversal trait that may modify the tree
//! - [`walk`] / [`walk_mut`] - Pre-order walks with enter/exit calls
//! - [`WalkStatus`] - What the walk should do next
//!
//! Each node is visited twice: once with `entering == true` before its
//! children and once with `entering == false` after them. Returning
//! [`WalkStatus::SkipChildren`] on enter skips the children but still
//! produces the exit call. An `Err` from the visitor aborts the walk and is
//! returned as-is.
//!
//! # Examples
//!
//! ## Collecting Text Content
//!
//! ```rust
//! use std::convert::Infallible;
//!
//! use headmark_ast::{Document, Node, NodeId, NodeKind, Span};
//! use headmark_ast::visitor::{WalkStatus, walk};
//!
//! let mut doc = Document::new();
//! let text = doc.alloc(Node::with_value(NodeKind::Text, Span::new(0, 5), "hello"));
//! doc.append_child(doc.root(), text);
//!
//! let mut texts = Vec::new();
//! let mut collect = |doc: &Document, id: NodeId, entering: bool| {
//!     if entering {
//!         if let Some(value) = &doc[id].value {
//!             texts.push(value.clone());
//!         }
//!     }
//!     Ok::<_, Infallible>(WalkStatus::Continue)
//! };
//! walk(&mut collect, &doc, doc.root()).unwrap();
//! assert_eq!(texts, vec!["hello"]);
//! ```

mod walk;

pub use walk::{MutVisitor, Visitor, WalkStatus, walk, walk_mut};

//! # headmark_ast
//!
//! Document tree definitions for headmark.
//!
//! This crate provides the tree that the parser produces, transformers
//! decorate and the HTML renderer serializes.
//!
//! ## Architecture
//!
//! - All nodes of a document live in one arena owned by [`Document`]
//! - Nodes refer to each other through [`NodeId`] index links
//!   (parent, first/last child, previous/next sibling)
//! - Extensions add node kinds by storing an [`ExtensionNode`] payload
//! - [`visitor::walk`] and [`visitor::walk_mut`] provide the pre-order
//!   enter/exit traversal shared by every pipeline stage
//!
//! ## Example
//!
//! ```rust
//! use headmark_ast::{Document, Node, NodeData, NodeKind, Span};
//!
//! let mut doc = Document::new();
//!
//! let mut heading = Node::new(NodeKind::Heading, Span::new(0, 8));
//! heading.data = NodeData::heading(2);
//! heading.set_attribute("id", "intro");
//! let heading = doc.alloc(heading);
//! doc.append_child(doc.root(), heading);
//!
//! assert_eq!(doc[heading].heading_level(), Some(2));
//! ```

mod document;
mod node;
mod node_kind;
mod prioritized;
mod span;
pub mod visitor;

pub use document::{Children, Document};
pub use node::{Alignment, Attribute, AttributeValue, ExtensionNode, Node, NodeData, NodeId};
pub use node_kind::NodeKind;
pub use prioritized::{Prioritized, sort_by_priority};
pub use span::Span;

// Re-export commonly used visitor items for convenience
pub use visitor::{MutVisitor, Visitor, WalkStatus};

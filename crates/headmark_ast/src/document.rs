//! Document tree storage.
//!
//! Nodes live in a single arena owned by the [`Document`] and refer to each
//! other through [`NodeId`] index links. The whole tree is freed at once
//! when the document is dropped.

use std::fmt::Write as _;
use std::ops::{Index, IndexMut};

use crate::node::Links;
use crate::{AttributeValue, ExtensionNode, Node, NodeData, NodeId, NodeKind, Span};

/// A parsed document.
///
/// The root node (a [`NodeKind::Document`]) is created with the arena and
/// is always [`Document::root`].
///
/// Node ids are only meaningful for the document that produced them;
/// indexing with a foreign id panics or addresses an unrelated node.
///
/// # Example
///
/// ```rust
/// use headmark_ast::{Document, Node, NodeKind, Span};
///
/// let mut doc = Document::new();
/// let paragraph = doc.alloc(Node::new(NodeKind::Paragraph, Span::new(0, 5)));
/// let text = doc.alloc(Node::with_value(NodeKind::Text, Span::new(0, 5), "Hello"));
///
/// doc.append_child(doc.root(), paragraph);
/// doc.append_child(paragraph, text);
///
/// assert_eq!(doc.child_count(paragraph), 1);
/// assert_eq!(doc.parent(text), Some(paragraph));
/// ```
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Creates a document holding only its root node.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Creates a document with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::new(NodeKind::Document, Span::default()));
        Self { nodes }
    }

    /// Returns the root node id.
    #[inline]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the number of allocated nodes, attached or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the document holds nothing but its root.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.first_child(self.root()).is_none()
    }

    /// Allocates a detached node and returns its id.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocates a detached extension node.
    pub fn alloc_extension(&mut self, ext: Box<dyn ExtensionNode>) -> NodeId {
        self.alloc(Node::extension(ext))
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    #[inline]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.get(id).kind
    }

    #[inline]
    fn links(&self, id: NodeId) -> Links {
        self.get(id).links
    }

    #[inline]
    fn links_mut(&mut self, id: NodeId) -> &mut Links {
        &mut self.get_mut(id).links
    }

    #[inline]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).parent
    }

    #[inline]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).first_child
    }

    #[inline]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).last_child
    }

    #[inline]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).next_sibling
    }

    #[inline]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.links(id).prev_sibling
    }

    /// Iterates over the direct children of a node.
    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            doc: self,
            next: self.first_child(id),
        }
    }

    /// Returns the number of direct children of a node.
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// A child that is already linked somewhere is detached first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        let last = self.last_child(parent);
        {
            let links = self.links_mut(child);
            links.parent = Some(parent);
            links.prev_sibling = last;
            links.next_sibling = None;
        }
        match last {
            Some(last) => self.links_mut(last).next_sibling = Some(child),
            None => self.links_mut(parent).first_child = Some(child),
        }
        self.links_mut(parent).last_child = Some(child);
    }

    /// Inserts `child` immediately before `sibling`, a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, sibling: NodeId, child: NodeId) {
        debug_assert_eq!(self.parent(sibling), Some(parent));
        self.detach(child);
        let prev = self.prev_sibling(sibling);
        {
            let links = self.links_mut(child);
            links.parent = Some(parent);
            links.prev_sibling = prev;
            links.next_sibling = Some(sibling);
        }
        self.links_mut(sibling).prev_sibling = Some(child);
        match prev {
            Some(prev) => self.links_mut(prev).next_sibling = Some(child),
            None => self.links_mut(parent).first_child = Some(child),
        }
    }

    /// Inserts `child` immediately after `sibling`, a child of `parent`.
    pub fn insert_after(&mut self, parent: NodeId, sibling: NodeId, child: NodeId) {
        debug_assert_eq!(self.parent(sibling), Some(parent));
        self.detach(child);
        let next = self.next_sibling(sibling);
        {
            let links = self.links_mut(child);
            links.parent = Some(parent);
            links.prev_sibling = Some(sibling);
            links.next_sibling = next;
        }
        self.links_mut(sibling).next_sibling = Some(child);
        match next {
            Some(next) => self.links_mut(next).prev_sibling = Some(child),
            None => self.links_mut(parent).last_child = Some(child),
        }
    }

    /// Unlinks a node from its parent and siblings. Its own subtree stays intact.
    pub fn detach(&mut self, id: NodeId) {
        let Links {
            parent,
            prev_sibling,
            next_sibling,
            ..
        } = self.links(id);
        let Some(parent) = parent else {
            return;
        };

        match prev_sibling {
            Some(prev) => self.links_mut(prev).next_sibling = next_sibling,
            None => self.links_mut(parent).first_child = next_sibling,
        }
        match next_sibling {
            Some(next) => self.links_mut(next).prev_sibling = prev_sibling,
            None => self.links_mut(parent).last_child = prev_sibling,
        }

        let links = self.links_mut(id);
        links.parent = None;
        links.prev_sibling = None;
        links.next_sibling = None;
    }

    /// Looks up an attribute of a node.
    #[inline]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&AttributeValue> {
        self.get(id).attribute(name)
    }

    /// Sets an attribute on a node.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) {
        self.get_mut(id).set_attribute(name, value);
    }

    /// Returns the extension payload of a node downcast to `T`.
    #[inline]
    pub fn extension<T: ExtensionNode>(&self, id: NodeId) -> Option<&T> {
        self.get(id).extension_data::<T>()
    }

    /// Dumps the tree below `id` in an indented, human-readable form.
    pub fn dump_node(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, id, 0);
        out
    }

    /// Dumps the whole document.
    pub fn dump(&self) -> String {
        self.dump_node(self.root())
    }

    fn dump_into(&self, out: &mut String, id: NodeId, depth: usize) {
        let node = self.get(id);
        let indent = "    ".repeat(depth);
        let inner = "    ".repeat(depth + 1);

        let _ = writeln!(out, "{indent}{} {{", node.kind);
        if let Some(value) = &node.value {
            let _ = writeln!(out, "{inner}Value: {value:?}");
        }
        match &node.data {
            NodeData::None => {}
            NodeData::Heading { level } => {
                let _ = writeln!(out, "{inner}Level: {level}");
            }
            NodeData::List {
                ordered,
                start,
                tight,
            } => {
                let _ = writeln!(out, "{inner}Ordered: {ordered}");
                if let Some(start) = start {
                    let _ = writeln!(out, "{inner}Start: {start}");
                }
                let _ = writeln!(out, "{inner}Tight: {tight}");
            }
            NodeData::CodeBlock { lang } => {
                if let Some(lang) = lang {
                    let _ = writeln!(out, "{inner}Language: {lang}");
                }
            }
            NodeData::Link { url, title } => {
                let _ = writeln!(out, "{inner}Destination: {url}");
                if let Some(title) = title {
                    let _ = writeln!(out, "{inner}Title: {title}");
                }
            }
            NodeData::TableCell { header, align } => {
                let _ = writeln!(out, "{inner}Header: {header}");
                let _ = writeln!(out, "{inner}Alignment: {align:?}");
            }
            NodeData::Footnote { label } => {
                let _ = writeln!(out, "{inner}Label: {label}");
            }
            NodeData::Extension(ext) => {
                for (name, value) in ext.dump_fields() {
                    let _ = writeln!(out, "{inner}{name}: {value}");
                }
            }
        }
        if !node.attributes.is_empty() {
            let attrs: Vec<String> = node
                .attributes
                .iter()
                .map(|attr| format!("{}={:?}", attr.name, attr.value.to_string()))
                .collect();
            let _ = writeln!(out, "{inner}Attributes: {}", attrs.join(" "));
        }
        for child in self.children(id) {
            self.dump_into(out, child, depth + 1);
        }
        let _ = writeln!(out, "{indent}}}");
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeId> for Document {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        self.get(id)
    }
}

impl IndexMut<NodeId> for Document {
    fn index_mut(&mut self, id: NodeId) -> &mut Node {
        self.get_mut(id)
    }
}

/// Iterator over the children of a node, see [`Document::children`].
pub struct Children<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.next_sibling(current);
        Some(current)
    }
}

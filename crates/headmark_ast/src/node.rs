//! Node definition.
//!
//! The payload stored for every node of a [`Document`](crate::Document).

use std::any::Any;
use std::fmt;

use crate::{NodeKind, Span};

/// Index of a node inside its [`Document`](crate::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Value of a node attribute.
///
/// Parsers store textual attributes such as `id` as [`AttributeValue::Bytes`];
/// the other variants exist for attributes set programmatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Bytes(Vec<u8>),
    Bool(bool),
    Int(i64),
}

impl AttributeValue {
    /// Returns the byte payload, or `None` for non-textual values.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AttributeValue::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Bytes(value.as_bytes().to_vec())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Bytes(value.into_bytes())
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(value: Vec<u8>) -> Self {
        AttributeValue::Bytes(value)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            AttributeValue::Bool(value) => write!(f, "{value}"),
            AttributeValue::Int(value) => write!(f, "{value}"),
        }
    }
}

/// A named attribute attached to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: AttributeValue,
}

/// Column alignment of a table cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Returns the CSS `text-align` value, if any.
    pub const fn as_css(&self) -> Option<&'static str> {
        match self {
            Alignment::None => None,
            Alignment::Left => Some("left"),
            Alignment::Center => Some("center"),
            Alignment::Right => Some("right"),
        }
    }
}

/// A node type contributed by an extension.
///
/// Extension nodes are stored behind [`NodeData::Extension`] and recovered
/// with [`Document::extension`](crate::Document::extension).
pub trait ExtensionNode: Any + fmt::Debug + Send + Sync {
    /// The kind under which this node is stored and rendered.
    fn kind(&self) -> NodeKind;

    /// Extra fields printed by [`Document::dump`](crate::Document::dump).
    fn dump_fields(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Kind-specific node data.
#[derive(Debug, Default)]
pub enum NodeData {
    #[default]
    None,
    Heading {
        level: u8,
    },
    List {
        ordered: bool,
        start: Option<u32>,
        tight: bool,
    },
    CodeBlock {
        lang: Option<String>,
    },
    /// Destination of a link or image.
    Link {
        url: String,
        title: Option<String>,
    },
    TableCell {
        header: bool,
        align: Alignment,
    },
    Footnote {
        label: String,
    },
    Extension(Box<dyn ExtensionNode>),
}

impl NodeData {
    /// Creates node data for a heading.
    #[inline]
    pub const fn heading(level: u8) -> Self {
        Self::Heading { level }
    }

    /// Creates node data for a link or image.
    pub fn link(url: impl Into<String>, title: Option<String>) -> Self {
        Self::Link {
            url: url.into(),
            title,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Links {
    pub(crate) parent: Option<NodeId>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) last_child: Option<NodeId>,
    pub(crate) prev_sibling: Option<NodeId>,
    pub(crate) next_sibling: Option<NodeId>,
}

/// A node in the document tree.
///
/// Structural links (parent, children, siblings) are owned by the
/// [`Document`](crate::Document); a `Node` only carries its payload.
#[derive(Debug)]
pub struct Node {
    /// The kind of this node.
    pub kind: NodeKind,

    /// Byte span in the source text.
    pub span: Span,

    /// Literal content (text, code, raw HTML, image alt text).
    pub value: Option<String>,

    /// Additional node-specific data.
    pub data: NodeData,

    pub(crate) attributes: Vec<Attribute>,
    pub(crate) links: Links,
}

impl Node {
    /// Creates a node of the given kind with no value or data.
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            span,
            value: None,
            data: NodeData::None,
            attributes: Vec::new(),
            links: Links::default(),
        }
    }

    /// Creates a node carrying a literal value.
    pub fn with_value(kind: NodeKind, span: Span, value: impl Into<String>) -> Self {
        let mut node = Self::new(kind, span);
        node.value = Some(value.into());
        node
    }

    /// Creates a node from extension data. The kind is taken from the extension.
    pub fn extension(ext: Box<dyn ExtensionNode>) -> Self {
        let mut node = Self::new(ext.kind(), Span::default());
        node.data = NodeData::Extension(ext);
        node
    }

    /// Returns the heading level if this is a heading.
    #[inline]
    pub fn heading_level(&self) -> Option<u8> {
        match self.data {
            NodeData::Heading { level } if self.kind == NodeKind::Heading => Some(level),
            _ => None,
        }
    }

    /// Returns the attributes in insertion order.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Looks up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| &attr.value)
    }

    /// Sets an attribute, replacing an existing one with the same name in place.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|attr| attr.name == name) {
            Some(existing) => existing.value = value,
            None => self.attributes.push(Attribute { name, value }),
        }
    }

    /// Removes an attribute, returning its value.
    pub fn remove_attribute(&mut self, name: &str) -> Option<AttributeValue> {
        let index = self.attributes.iter().position(|attr| attr.name == name)?;
        Some(self.attributes.remove(index).value)
    }

    /// Returns the extension payload downcast to `T`.
    pub fn extension_data<T: ExtensionNode>(&self) -> Option<&T> {
        match &self.data {
            NodeData::Extension(ext) => {
                let any: &dyn Any = &**ext;
                any.downcast_ref::<T>()
            }
            _ => None,
        }
    }
}

//! The anchor node.

use headmark_ast::{ExtensionNode, NodeKind};

/// Kind of anchor nodes.
pub const KIND: NodeKind = NodeKind::Extension("Anchor");

/// An anchor inserted into a heading.
///
/// Attributes of the anchor live on the hosting tree node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorNode {
    /// Identifier of the heading this anchor links to.
    pub id: Vec<u8>,
    /// Level of that heading.
    pub level: u8,
    /// Text inside the anchor.
    pub value: Vec<u8>,
}

impl ExtensionNode for AnchorNode {
    fn kind(&self) -> NodeKind {
        KIND
    }

    fn dump_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("ID", String::from_utf8_lossy(&self.id).into_owned()),
            ("Value", String::from_utf8_lossy(&self.value).into_owned()),
            ("Level", self.level.to_string()),
        ]
    }
}

//! Walk functions for tree traversal.

use crate::{Document, NodeId};

/// What the walk does after a visitor call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    /// Continue with the children (on enter) or the next node.
    Continue,
    /// Do not descend into this node's children. Only meaningful on enter.
    SkipChildren,
    /// Stop the whole walk.
    Stop,
}

/// Read-only tree visitor.
///
/// Closures of the form `FnMut(&Document, NodeId, bool) -> Result<WalkStatus, E>`
/// implement this trait.
pub trait Visitor {
    type Error;

    fn visit(
        &mut self,
        doc: &Document,
        node: NodeId,
        entering: bool,
    ) -> Result<WalkStatus, Self::Error>;
}

/// Tree visitor that may modify the document.
///
/// Closures of the form `FnMut(&mut Document, NodeId, bool) -> Result<WalkStatus, E>`
/// implement this trait.
pub trait MutVisitor {
    type Error;

    fn visit_mut(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        entering: bool,
    ) -> Result<WalkStatus, Self::Error>;
}

impl<F, E> Visitor for F
where
    F: FnMut(&Document, NodeId, bool) -> Result<WalkStatus, E>,
{
    type Error = E;

    fn visit(&mut self, doc: &Document, node: NodeId, entering: bool) -> Result<WalkStatus, E> {
        self(doc, node, entering)
    }
}

impl<F, E> MutVisitor for F
where
    F: FnMut(&mut Document, NodeId, bool) -> Result<WalkStatus, E>,
{
    type Error = E;

    fn visit_mut(
        &mut self,
        doc: &mut Document,
        node: NodeId,
        entering: bool,
    ) -> Result<WalkStatus, E> {
        self(doc, node, entering)
    }
}

/// Walks the subtree rooted at `node` in pre-order.
///
/// # Returns
///
/// `Ok(WalkStatus::Stop)` if a visitor call stopped the walk,
/// `Ok(WalkStatus::Continue)` once every node was visited,
/// or the first error produced by the visitor.
pub fn walk<V>(visitor: &mut V, doc: &Document, node: NodeId) -> Result<WalkStatus, V::Error>
where
    V: Visitor + ?Sized,
{
    let status = visitor.visit(doc, node, true)?;
    if status == WalkStatus::Stop {
        return Ok(WalkStatus::Stop);
    }

    if status != WalkStatus::SkipChildren {
        let mut child = doc.first_child(node);
        while let Some(current) = child {
            if walk(visitor, doc, current)? == WalkStatus::Stop {
                return Ok(WalkStatus::Stop);
            }
            child = doc.next_sibling(current);
        }
    }

    if visitor.visit(doc, node, false)? == WalkStatus::Stop {
        return Ok(WalkStatus::Stop);
    }
    Ok(WalkStatus::Continue)
}

/// Walks the subtree rooted at `node` in pre-order, allowing mutation.
///
/// The next sibling is looked up after a child's subtree has been walked,
/// so nodes inserted after the current child are visited too.
pub fn walk_mut<V>(
    visitor: &mut V,
    doc: &mut Document,
    node: NodeId,
) -> Result<WalkStatus, V::Error>
where
    V: MutVisitor + ?Sized,
{
    let status = visitor.visit_mut(doc, node, true)?;
    if status == WalkStatus::Stop {
        return Ok(WalkStatus::Stop);
    }

    if status != WalkStatus::SkipChildren {
        let mut child = doc.first_child(node);
        while let Some(current) = child {
            if walk_mut(visitor, doc, current)? == WalkStatus::Stop {
                return Ok(WalkStatus::Stop);
            }
            child = doc.next_sibling(current);
        }
    }

    if visitor.visit_mut(doc, node, false)? == WalkStatus::Stop {
        return Ok(WalkStatus::Stop);
    }
    Ok(WalkStatus::Continue)
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{Node, NodeKind, Span};

    /// Records every visit as `+Kind` / `-Kind`.
    struct Tracer {
        events: Vec<String>,
        skip: Option<NodeKind>,
        stop_at: Option<NodeKind>,
    }

    impl Tracer {
        fn new() -> Self {
            Self {
                events: Vec::new(),
                skip: None,
                stop_at: None,
            }
        }
    }

    impl Visitor for Tracer {
        type Error = Infallible;

        fn visit(
            &mut self,
            doc: &Document,
            node: NodeId,
            entering: bool,
        ) -> Result<WalkStatus, Infallible> {
            let kind = doc.kind(node);
            let sign = if entering { '+' } else { '-' };
            self.events.push(format!("{sign}{kind}"));
            if entering && self.stop_at == Some(kind) {
                return Ok(WalkStatus::Stop);
            }
            if entering && self.skip == Some(kind) {
                return Ok(WalkStatus::SkipChildren);
            }
            Ok(WalkStatus::Continue)
        }
    }

    /// Document > [Heading > Text, Paragraph > Text]
    fn sample() -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let heading = doc.alloc(Node::new(NodeKind::Heading, Span::new(0, 5)));
        let heading_text = doc.alloc(Node::with_value(NodeKind::Text, Span::new(2, 5), "Hi"));
        let paragraph = doc.alloc(Node::new(NodeKind::Paragraph, Span::new(6, 10)));
        let body = doc.alloc(Node::with_value(NodeKind::Text, Span::new(6, 10), "body"));
        doc.append_child(root, heading);
        doc.append_child(heading, heading_text);
        doc.append_child(root, paragraph);
        doc.append_child(paragraph, body);
        doc
    }

    #[test]
    fn test_walk_enter_exit_order() {
        let doc = sample();
        let mut tracer = Tracer::new();
        let status = walk(&mut tracer, &doc, doc.root()).unwrap();

        assert_eq!(status, WalkStatus::Continue);
        assert_eq!(
            tracer.events,
            vec![
                "+Document",
                "+Heading",
                "+Text",
                "-Text",
                "-Heading",
                "+Paragraph",
                "+Text",
                "-Text",
                "-Paragraph",
                "-Document",
            ]
        );
    }

    #[test]
    fn test_skip_children_still_exits() {
        let doc = sample();
        let mut tracer = Tracer::new();
        tracer.skip = Some(NodeKind::Heading);
        walk(&mut tracer, &doc, doc.root()).unwrap();

        assert_eq!(&tracer.events[..3], &["+Document", "+Heading", "-Heading"]);
    }

    #[test]
    fn test_stop_ends_walk() {
        let doc = sample();
        let mut tracer = Tracer::new();
        tracer.stop_at = Some(NodeKind::Heading);
        let status = walk(&mut tracer, &doc, doc.root()).unwrap();

        assert_eq!(status, WalkStatus::Stop);
        assert_eq!(tracer.events, vec!["+Document", "+Heading"]);
    }

    #[test]
    fn test_error_aborts_walk() {
        let doc = sample();
        let mut seen = 0;
        let mut failing = |doc: &Document, node: NodeId, entering: bool| {
            seen += 1;
            if entering && doc.kind(node) == NodeKind::Paragraph {
                return Err("boom");
            }
            Ok(WalkStatus::Continue)
        };

        assert_eq!(walk(&mut failing, &doc, doc.root()), Err("boom"));
        assert_eq!(seen, 6);
    }

    #[test]
    fn test_walk_mut_visits_inserted_siblings() {
        let mut doc = sample();
        let mut inserted = false;
        let mut kinds = Vec::new();
        let mut visitor = |doc: &mut Document, node: NodeId, entering: bool| {
            if !entering {
                return Ok::<_, Infallible>(WalkStatus::Continue);
            }
            kinds.push(doc.kind(node));
            if doc.kind(node) == NodeKind::Heading && !inserted {
                inserted = true;
                let rule = doc.alloc(Node::new(NodeKind::ThematicBreak, Span::default()));
                let parent = doc.parent(node).unwrap();
                doc.insert_after(parent, node, rule);
                return Ok(WalkStatus::SkipChildren);
            }
            Ok(WalkStatus::Continue)
        };
        let root = doc.root();
        walk_mut(&mut visitor, &mut doc, root).unwrap();

        assert_eq!(
            kinds,
            vec![
                NodeKind::Document,
                NodeKind::Heading,
                NodeKind::ThematicBreak,
                NodeKind::Paragraph,
                NodeKind::Text,
            ]
        );
    }
}

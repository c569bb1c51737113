//! End-to-end tests for heading anchors
//!
//! Runs the full parse, transform and render pipeline with the anchor
//! extension installed.

use std::collections::BTreeMap;

use headmark_anchor::{AnchorExtender, Attributes, HeaderInfo, KIND, Position, Text, Transformer};
use headmark_ast::{Document, Node, NodeData, NodeId, NodeKind, Span};
use headmark_core::Markdown;
use headmark_html::{HtmlOptions, HtmlRenderer};
use headmark_parser::ParserOptions;
use rstest::rstest;

fn convert(extender: AnchorExtender, source: &str) -> String {
    Markdown::builder()
        .with_extension(&extender)
        .build()
        .convert_to_string(source)
        .unwrap()
}

fn headings(doc: &Document) -> Vec<NodeId> {
    let mut found = Vec::new();
    collect_headings(doc, doc.root(), &mut found);
    found
}

fn collect_headings(doc: &Document, node: NodeId, found: &mut Vec<NodeId>) {
    for child in doc.children(node) {
        if doc.kind(child) == NodeKind::Heading {
            found.push(child);
        }
        collect_headings(doc, child, found);
    }
}

fn anchor_count(doc: &Document, heading: NodeId) -> usize {
    doc.children(heading).filter(|&child| doc.kind(child) == KIND).count()
}

mod scenarios {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_policies_append_pilcrow_anchor() {
        let html = convert(AnchorExtender::new(), "## Intro");
        assert_eq!(
            html,
            "<h2 id=\"intro\">Intro <a class=\"anchor\" href=\"#intro\">¶</a></h2>\n"
        );
    }

    #[test]
    fn empty_text_before_leaves_heading_unmodified() {
        let extender = AnchorExtender::new()
            .position(Position::Before)
            .texter(Text::new(""));
        let md = Markdown::builder().with_extension(&extender).build();

        let doc = md.parse("## Intro").unwrap();
        assert_eq!(anchor_count(&doc, headings(&doc)[0]), 0);
        assert_eq!(
            md.convert_to_string("## Intro").unwrap(),
            Markdown::new().convert_to_string("## Intro").unwrap()
        );
    }

    #[rstest]
    fn heading_without_id_never_gets_anchor(
        #[values(Position::Before, Position::After)] position: Position,
        #[values("¶", "#", "<b>x</b>")] text: &str,
    ) {
        let md = Markdown::builder()
            .parser_options(ParserOptions {
                auto_heading_id: false,
            })
            .with_extension(&AnchorExtender::new().position(position).texter(Text::new(text)))
            .build();

        let doc = md.parse("# One\n\n## Two").unwrap();
        for heading in headings(&doc) {
            assert_eq!(anchor_count(&doc, heading), 0);
        }
        assert_eq!(
            md.convert_to_string("# One\n\n## Two").unwrap(),
            "<h1>One</h1>\n<h2>Two</h2>\n"
        );
    }
}

mod properties {
    use pretty_assertions::assert_eq;

    use super::*;

    fn skip_odd_levels(info: &HeaderInfo<'_>) -> Vec<u8> {
        if info.level % 2 == 1 { Vec::new() } else { b"#".to_vec() }
    }

    fn level_attributes(info: &HeaderInfo<'_>) -> BTreeMap<String, String> {
        BTreeMap::from([
            ("data-level".to_string(), info.level.to_string()),
            ("title".to_string(), format!("\"{}\"", String::from_utf8_lossy(info.id))),
        ])
    }

    #[test]
    fn exactly_one_anchor_per_eligible_heading() {
        let md = Markdown::builder()
            .with_extension(&AnchorExtender::new().texter(skip_odd_levels))
            .build();
        let doc = md
            .parse("# A\n\n## B\n\n### C\n\n#### D\n\n> ## Quoted\n\n- #### Listed")
            .unwrap();

        for heading in headings(&doc) {
            let level = doc[heading].heading_level().unwrap();
            let expected = usize::from(level % 2 == 0);
            assert_eq!(anchor_count(&doc, heading), expected, "level {level}");
        }
    }

    #[test]
    fn double_transform_inserts_two_anchors() {
        let md = Markdown::new();
        let mut doc = md.parse("## Twice").unwrap();
        let transformer = Transformer::new();

        assert_eq!(transformer.apply(&mut doc), 1);
        assert_eq!(transformer.apply(&mut doc), 1);
        assert_eq!(anchor_count(&doc, headings(&doc)[0]), 2);
    }

    #[rstest]
    #[case::childless_before(Position::Before, false)]
    #[case::childless_after(Position::After, false)]
    #[case::populated_before(Position::Before, true)]
    #[case::populated_after(Position::After, true)]
    fn anchor_is_first_or_last_child(#[case] position: Position, #[case] populated: bool) {
        let mut doc = Document::new();
        let mut heading = Node::new(NodeKind::Heading, Span::default());
        heading.data = NodeData::heading(2);
        heading.set_attribute("id", "h");
        let heading = doc.alloc(heading);
        doc.append_child(doc.root(), heading);
        if populated {
            for value in ["a", "b"] {
                let text = doc.alloc(Node::with_value(NodeKind::Text, Span::default(), value));
                doc.append_child(heading, text);
            }
        }

        Transformer::new().with_position(position).apply(&mut doc);

        let anchor = match position {
            Position::Before => doc.first_child(heading),
            Position::After => doc.last_child(heading),
        };
        assert_eq!(anchor.map(|id| doc.kind(id)), Some(KIND));
        assert_eq!(doc.child_count(heading), if populated { 3 } else { 1 });
    }

    #[rstest]
    #[case::after(Position::After, "<h3 id=\"title\">Title <a class=\"anchor\" href=\"#title\">¶</a></h3>\n")]
    #[case::before(Position::Before, "<h3 id=\"title\"><a class=\"anchor\" href=\"#title\">¶</a> Title</h3>\n")]
    fn rendered_anchor_is_separated_by_one_space(#[case] position: Position, #[case] expected: &str) {
        assert_eq!(convert(AnchorExtender::new().position(position), "### Title"), expected);
    }

    #[rstest]
    #[case::escaped(false, "&lt;b&gt;&amp;&lt;/b&gt;")]
    #[case::verbatim(true, "<b>&</b>")]
    fn id_is_always_escaped_and_text_by_flag(#[case] unsafe_text: bool, #[case] text: &str) {
        let md = Markdown::builder()
            .parser_options(ParserOptions {
                auto_heading_id: false,
            })
            .build();
        let mut doc = md.parse("## Quote").unwrap();
        let heading = headings(&doc)[0];
        doc.set_attribute(heading, "id", "say-\"hi\"<now>");
        Transformer::new()
            .with_texter(Text::new("<b>&</b>"))
            .apply(&mut doc);

        let html = HtmlRenderer::builder(HtmlOptions::default())
            .add_node_renderer(
                Box::new(AnchorExtender::new().unsafe_text(unsafe_text).renderer()),
                100,
            )
            .build()
            .render_to_string(&doc)
            .unwrap();

        assert_eq!(
            html,
            format!(
                "<h2 id=\"say-&quot;hi&quot;&lt;now&gt;\">Quote \
                 <a class=\"anchor\" href=\"#say-&quot;hi&quot;&lt;now&gt;\">{text}</a></h2>\n"
            )
        );
    }

    #[test]
    fn policy_attributes_appear_escaped_and_alone() {
        let html = convert(
            AnchorExtender::new().attributer(level_attributes),
            "## Intro",
        );
        assert_eq!(
            html,
            "<h2 id=\"intro\">Intro <a data-level=\"2\" title=\"&quot;intro&quot;\" href=\"#intro\">¶</a></h2>\n"
        );
    }

    #[test]
    fn empty_attribute_policy_renders_bare_anchor() {
        let html = convert(AnchorExtender::new().attributer(Attributes::empty()), "# Top");
        assert_eq!(html, "<h1 id=\"top\">Top <a href=\"#top\">¶</a></h1>\n");
    }

    #[test]
    fn pipeline_is_shareable_across_threads() {
        let md = Markdown::builder()
            .with_extension(&AnchorExtender::new())
            .build();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|i| {
                    let md = &md;
                    scope.spawn(move || md.convert_to_string(&format!("# Part {i}")).unwrap())
                })
                .collect();
            for (i, handle) in handles.into_iter().enumerate() {
                let html = handle.join().unwrap();
                assert!(html.contains(&format!("href=\"#part-{i}\"")), "{html}");
            }
        });
    }
}

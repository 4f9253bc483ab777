//! Integration tests for box-tree construction, constraint generation and flow.

use strut_css::layout::{
    BoxId, BoxKind, BoxTree, Frame, GeneratedLayout, MeasuredBox, PropertyStore, RenderBox,
    ResolvedAreas, ResolvedBox, build_box_tree,
};
use strut_css::style::StyleCache;
use strut_css::{
    ContentMeasurer, DocumentStyles, LayoutError, LayoutWarning, generate_for, generate_with,
};
use strut_dom::{DomTree, NodeId, parse_html};

const EPSILON: f64 = 1e-6;

/// Every element and word has the same natural size.
struct FixedMeasurer {
    width: f64,
    height: f64,
}

impl ContentMeasurer for FixedMeasurer {
    fn measure_node(&self, _styles: &StyleCache<'_>, _node: NodeId) -> MeasuredBox {
        MeasuredBox::sized(self.width, self.height)
    }

    fn measure_text(&self, _styles: &StyleCache<'_>, _node: NodeId, _word: &str) -> MeasuredBox {
        MeasuredBox::sized(self.width, self.height)
    }
}

const MEASURER: FixedMeasurer = FixedMeasurer {
    width: 50.0,
    height: 20.0,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

fn run(html: &str) -> Result<(DomTree, GeneratedLayout), LayoutError> {
    let dom = parse_html(html).unwrap();
    let root = dom.document_element().unwrap();
    let styles = DocumentStyles::from_document(&dom);
    let layout = generate_for(&dom, root, 800.0, 600.0, &styles, &MEASURER)?;
    Ok((dom, layout))
}

fn layout(html: &str) -> (DomTree, GeneratedLayout) {
    run(html).unwrap()
}

fn by_id<'a>(dom: &DomTree, layout: &'a GeneratedLayout, id: &str) -> &'a ResolvedBox {
    let node = dom.element_by_id(id).unwrap();
    layout.for_node(node).unwrap()
}

#[test]
fn test_viewport_is_pinned() {
    let mut tree = BoxTree::new(800.0, 600.0);
    tree.generate(BoxId::VIEWPORT).unwrap();
    assert_eq!(tree.solver().constraint_count(), 16);

    let actual = tree.viewport().frame.actual.resolve(tree.solver());
    for area in [actual.margin, actual.border, actual.padding, actual.content] {
        assert_close(area.top, 0.0);
        assert_close(area.left, 0.0);
        assert_close(area.right, 800.0);
        assert_close(area.bottom, 600.0);
    }
}

#[test]
fn test_viewport_comes_first() {
    let (_, layout) = layout("<body><div></div></body>");
    let viewport = layout.viewport().unwrap();
    assert_eq!(viewport.kind, "Viewport");
    assert_eq!(viewport.id, BoxId::VIEWPORT);
    assert_close(viewport.width, 800.0);
    assert_close(viewport.height, 600.0);
    assert_eq!(
        viewport.to_string(),
        "Viewport: { top: 0, right: 800, bottom: 600, left: 0 }"
    );
}

#[test]
fn test_explicit_width_wins_over_natural_size() {
    let (dom, layout) = layout(r#"<body><div id="a" style="width: 120px; height: 30px"></div></body>"#);
    let a = by_id(&dom, &layout, "a");
    assert_close(a.width, 120.0);
    assert_close(a.height, 30.0);
    let reference = a.reference.unwrap();
    assert_close(reference.content.width(), 120.0);
    // The start edge holds when the box cannot span its flow root.
    assert_close(reference.margin.left, 0.0);
}

#[test]
fn test_auto_width_takes_natural_size() {
    let (dom, layout) = layout(
        r#"<body><div id="a" style="position: absolute; left: 10px; top: 5px"></div></body>"#,
    );
    let a = by_id(&dom, &layout, "a");
    assert_close(a.width, 50.0);
    assert_close(a.height, 20.0);
    assert_close(a.actual.margin.left, 10.0);
    assert_close(a.actual.margin.right, 60.0);
    assert_close(a.actual.margin.top, 5.0);
    assert_close(a.actual.margin.bottom, 25.0);
}

#[test]
fn test_in_flow_block_spans_its_flow_root() {
    let (dom, layout) = layout(r#"<body><div id="a" style="height: 10px"></div></body>"#);
    let a = by_id(&dom, &layout, "a");
    assert_close(a.width, 800.0);
    assert_close(a.actual.margin.left, 0.0);
    assert_close(a.actual.margin.right, 800.0);
}

#[test]
fn test_size_identities_with_padding_and_border() {
    let (_, layout) = layout(
        r#"<body><div style="padding: 5px; border: 2px solid black; margin: 3px; height: 40px">
            <span style="padding-left: 4px">hi</span></div></body>"#,
    );
    for b in layout.boxes.iter().filter(|b| b.reference.is_some()) {
        let reference = b.reference.unwrap();
        assert_close(reference.border.width(), b.width);
        assert_close(reference.border.height(), b.height);
        assert!(b.width >= -EPSILON, "{b}");
        assert!(b.height >= -EPSILON, "{b}");
    }
}

#[test]
fn test_box_model_nesting() {
    let (dom, layout) = layout(
        r#"<body><div id="a" style="padding: 5px; border-width: 2px; border-style: solid; margin: 3px 7px; height: 40px"></div></body>"#,
    );
    let a = by_id(&dom, &layout, "a").reference.unwrap();
    assert_close(a.padding.top, a.content.top - 5.0);
    assert_close(a.border.top, a.padding.top - 2.0);
    assert_close(a.margin.top, a.border.top - 3.0);
    assert_close(a.padding.right, a.content.right + 5.0);
    assert_close(a.border.right, a.padding.right + 2.0);
    assert_close(a.margin.right, a.border.right + 7.0);
    assert_close(a.content.height(), 40.0);
    assert_close(a.margin.left, 0.0);
    assert_close(a.margin.right, 800.0);
}

#[test]
fn test_min_width_floor_beats_natural_size() {
    let (dom, layout) = layout(
        r#"<body><div id="a" style="position: absolute; min-width: 100px; min-height: 30px"></div></body>"#,
    );
    let a = by_id(&dom, &layout, "a");
    assert_close(a.width, 100.0);
    assert_close(a.height, 30.0);
}

#[test]
fn test_max_width_caps_natural_size() {
    let (dom, layout) = layout(
        r#"<body><div id="a" style="position: absolute; max-width: 30px"></div></body>"#,
    );
    assert_close(by_id(&dom, &layout, "a").width, 30.0);
}

#[test]
fn test_relative_offsets_move_only_the_actual_layer() {
    let (dom, layout) = layout(
        r#"<body><div id="r" style="position: relative; top: 10px; left: 5px; height: 40px"></div></body>"#,
    );
    let r = by_id(&dom, &layout, "r");
    let reference = r.reference.unwrap().margin;
    let actual = r.actual.margin;
    assert_close(actual.top, reference.top + 10.0);
    assert_close(actual.left, reference.left + 5.0);
    assert_close(actual.right, reference.right);
    assert_close(actual.bottom, reference.bottom);
}

#[test]
fn test_relative_right_and_bottom_subtract() {
    let (dom, layout) = layout(
        r#"<body><div id="r" style="position: relative; right: 6px; bottom: 4px; height: 40px"></div></body>"#,
    );
    let r = by_id(&dom, &layout, "r");
    let reference = r.reference.unwrap().margin;
    assert_close(r.actual.margin.right, reference.right - 6.0);
    assert_close(r.actual.margin.bottom, reference.bottom - 4.0);
    assert_close(r.actual.margin.top, reference.top);
}

#[test]
fn test_absolute_offsets_use_positioned_ancestor() {
    let (dom, layout) = layout(
        r#"<body><div id="outer" style="position: relative; height: 100px"><div id="inner" style="position: absolute; top: 10px; left: 20px"></div></div></body>"#,
    );
    let outer = by_id(&dom, &layout, "outer").actual.margin;
    let inner = by_id(&dom, &layout, "inner").actual.margin;
    assert_close(inner.top, outer.top + 10.0);
    assert_close(inner.left, outer.left + 20.0);
}

#[test]
fn test_fixed_offsets_use_viewport() {
    let (dom, layout) = layout(
        r#"<body><div style="position: relative; height: 50px"><div id="f" style="position: fixed; top: 7px; left: 3px"></div></div></body>"#,
    );
    let f = by_id(&dom, &layout, "f").actual.margin;
    assert_close(f.top, 7.0);
    assert_close(f.left, 3.0);
}

#[test]
fn test_blocks_stack_in_document_order() {
    let (dom, layout) = layout(
        r#"<body style="height: 0px"><div id="a" style="height: 10px"></div><div id="b" style="height: 20px"></div><div id="c" style="height: 30px"></div></body>"#,
    );
    let a = by_id(&dom, &layout, "a").reference.unwrap().margin;
    let b = by_id(&dom, &layout, "b").reference.unwrap().margin;
    let c = by_id(&dom, &layout, "c").reference.unwrap().margin;
    assert_close(b.top, a.bottom);
    assert_close(c.top, b.bottom);
    assert_close(c.bottom - a.top, 60.0);
    for edge in [a, b, c] {
        assert_close(edge.left, 0.0);
        assert_close(edge.right, 800.0);
    }
}

#[test]
fn test_flow_root_stacks_its_own_children() {
    let (dom, layout) = layout(
        r#"<body><div id="root" style="overflow: hidden; height: 100px; padding-left: 10px"><p id="a" style="height: 10px"></p><p id="b" style="height: 10px"></p></div></body>"#,
    );
    let root = by_id(&dom, &layout, "root").actual.content;
    let a = by_id(&dom, &layout, "a").reference.unwrap().margin;
    let b = by_id(&dom, &layout, "b").reference.unwrap().margin;
    assert_close(a.top, root.top);
    assert_close(a.left, root.left);
    assert_close(a.right, root.right);
    assert_close(b.top, a.bottom);
}

#[test]
fn test_one_anonymous_block_per_inline_run() {
    let dom = parse_html(
        r#"<html><body><div id="d"><span>a</span><span>b</span><p>x</p><span>c</span></div></body></html>"#,
    )
    .unwrap();
    let root = dom.document_element().unwrap();
    let div = dom.element_by_id("d").unwrap();
    let styles = DocumentStyles::from_document(&dom);
    let cache = StyleCache::new(&dom, &styles);
    let tree = build_box_tree(&cache, root, 800.0, 600.0, &MEASURER);

    let (_, div_box) = tree
        .in_document_order()
        .find(|(_, b)| b.node == Some(div))
        .unwrap();
    let anonymous = &div_box.kind.block_state().unwrap().anonymous;
    assert_eq!(anonymous.len(), 2);

    let inline_count = |id: BoxId| match &tree.get(id).unwrap().kind {
        BoxKind::Anonymous { inlines } => inlines.len(),
        other => panic!("expected an anonymous block, got {}", other.name()),
    };
    // Two spans and their words, then one span and its word.
    assert_eq!(inline_count(anonymous[0]), 4);
    assert_eq!(inline_count(anonymous[1]), 2);

    // The paragraph hosts its own text in a third anonymous block.
    assert_eq!(tree.anonymous_blocks().count(), 3);
    // Every anonymous block joins the viewport's flow queue after the block
    // that precedes it.
    let queue = tree.flow_boxes(BoxId::VIEWPORT);
    assert_eq!(queue.len(), 6);
    assert_eq!(queue[2], anonymous[0]);
    assert_eq!(queue[5], anonymous[1]);
}

#[test]
fn test_text_is_split_into_words() {
    let (_, layout) = layout("<body><p>one two  three</p></body>");
    let words: Vec<&str> = layout
        .boxes
        .iter()
        .filter(|b| b.kind == "Text")
        .filter_map(|b| b.label.as_deref())
        .collect();
    assert_eq!(words, vec!["one", "two", "three"]);
    for word in layout.boxes.iter().filter(|b| b.kind == "Text") {
        assert!(word.reference.is_none());
        assert_close(word.width, 50.0);
        assert_close(word.height, 20.0);
    }
}

#[test]
fn test_hidden_subtrees_generate_no_boxes() {
    let (dom, layout) = layout(
        r#"<body><div id="gone" style="display: none"><p id="child">x</p></div><div id="kept"></div></body>"#,
    );
    let gone = dom.element_by_id("gone").unwrap();
    let child = dom.element_by_id("child").unwrap();
    assert!(layout.for_node(gone).is_none());
    assert!(layout.for_node(child).is_none());
    assert!(layout.for_node(dom.element_by_id("kept").unwrap()).is_some());
    assert!(layout.boxes.iter().all(|b| b.label.as_deref() != Some("x")));
}

#[test]
fn test_contradictory_required_constraints_abort() {
    let err = run(r#"<body><div style="width: -10px"></div></body>"#).unwrap_err();
    assert!(matches!(err, LayoutError::Unsatisfiable { .. }), "{err}");
}

fn assert_same_areas(a: &ResolvedAreas, b: &ResolvedAreas, which: &str) {
    for (x, y) in [
        (a.margin, b.margin),
        (a.border, b.border),
        (a.padding, b.padding),
        (a.content, b.content),
    ] {
        for (p, q) in [
            (x.top, y.top),
            (x.right, y.right),
            (x.bottom, y.bottom),
            (x.left, y.left),
        ] {
            assert!((p - q).abs() < EPSILON, "{which}: {p} != {q}");
        }
    }
}

#[test]
fn test_identical_runs_resolve_identically() {
    let html = r#"<body><div><span>a b</span><span>c</span><p>x y</p><span>d</span></div>
        <div style="height: 10px; width: 100px; padding: 4px; margin: 0 6px"></div>
        <div style="position: absolute; height: 5px"><em>e</em></div></body>"#;
    let (_, first) = layout(html);
    for _ in 0..20 {
        let (_, again) = layout(html);
        assert_eq!(first.boxes.len(), again.boxes.len());
        for (a, b) in first.boxes.iter().zip(&again.boxes) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.label, b.label);
            assert_close(a.width, b.width);
            assert_close(a.height, b.height);
            assert_same_areas(&a.actual, &b.actual, &a.to_string());
            if let (Some(x), Some(y)) = (&a.reference, &b.reference) {
                assert_same_areas(x, y, &a.to_string());
            }
        }
    }
}

#[test]
fn test_explicit_edges_win_over_explicit_width() {
    let (dom, layout) = layout(
        r#"<body><div id="w" style="width: 100px; padding: 4px; margin: 0 6px; height: 10px"></div></body>"#,
    );
    let w = by_id(&dom, &layout, "w");
    let reference = w.reference.unwrap();
    assert_close(reference.content.width(), 100.0);
    assert_close(w.width, 108.0);
    assert_close(reference.margin.left, 0.0);
    assert_close(reference.border.left, 6.0);
    assert_close(reference.border.right, 114.0);
}

#[test]
fn test_inline_content_sits_at_the_containing_origin() {
    let (dom, layout) = layout(
        r#"<body><div id="d" style="padding: 3px; height: 30px"><span id="s">a</span></div><div id="n" style="height: 10px"></div></body>"#,
    );
    let d = by_id(&dom, &layout, "d");
    let origin = d.actual.content;

    let span = by_id(&dom, &layout, "s").reference.unwrap().margin;
    assert_close(span.left, origin.left);
    assert_close(span.top, origin.top);

    let word = layout
        .boxes
        .iter()
        .find(|b| b.kind == "Text" && b.label.as_deref() == Some("a"))
        .unwrap();
    assert_close(word.actual.content.left, origin.left);
    assert_close(word.actual.content.top, origin.top);

    // The anonymous block around the span has no height of its own.
    let next = by_id(&dom, &layout, "n").reference.unwrap().margin;
    assert_close(next.top, d.reference.unwrap().margin.bottom);
}

#[test]
fn test_absolute_without_positioned_ancestor_uses_viewport() {
    let html = r#"<body><div><div id="a" style="position: absolute; top: 7px; left: 3px"></div></div></body>"#;
    let dom = parse_html(html).unwrap();
    let root = dom.document_element().unwrap();
    let node = dom.element_by_id("a").unwrap();
    let styles = DocumentStyles::from_document(&dom);
    let cache = StyleCache::new(&dom, &styles);
    let tree = build_box_tree(&cache, root, 800.0, 600.0, &MEASURER);

    let (id, abs) = tree
        .in_document_order()
        .find(|(_, b)| b.node == Some(node))
        .unwrap();
    assert_eq!(abs.containing_block, BoxId::VIEWPORT);
    assert!(
        tree.warnings()
            .contains(&LayoutWarning::UnresolvableContainingBlock { id })
    );

    let (dom, layout) = layout(html);
    let a = by_id(&dom, &layout, "a");
    assert_close(a.actual.margin.top, 7.0);
    assert_close(a.actual.margin.left, 3.0);
    assert!(
        layout
            .warnings
            .iter()
            .any(|w| matches!(w, LayoutWarning::UnresolvableContainingBlock { .. }))
    );
}

#[test]
fn test_unsupported_axis_is_reported() {
    let (dom, layout) = layout(
        r#"<body><div id="r" style="overflow: hidden; block-progression: rl"><p></p></div></body>"#,
    );
    let root = by_id(&dom, &layout, "r").id;
    assert!(layout.warnings.contains(&LayoutWarning::UnsupportedAxis {
        root,
        progression: strut_css::style::BlockProgression::Rl,
    }));
}

fn detached_block(tree: &BoxTree, in_flow: bool) -> RenderBox {
    RenderBox {
        kind: BoxKind::Block(Default::default()),
        node: None,
        frame: Frame::new(),
        props: PropertyStore::auto(),
        containing_block: BoxId::VIEWPORT,
        flow_root: None,
        flow_state: None,
        natural_size: tree.viewport().natural_size,
        in_flow,
    }
}

#[test]
fn test_out_of_flow_box_in_flow_queue_is_skipped() {
    let mut tree = BoxTree::new(800.0, 600.0);
    let stray = tree.push(detached_block(&tree, false));
    tree.register_in_flow(BoxId::VIEWPORT, stray);
    let before = tree.solver().constraint_count();
    tree.flow(BoxId::VIEWPORT).unwrap();

    assert_eq!(tree.solver().constraint_count(), before);
    assert_eq!(
        tree.warnings(),
        &[LayoutWarning::OutOfFlowInFlowList {
            root: BoxId::VIEWPORT,
            id: stray,
        }]
    );
}

#[test]
fn test_anonymous_block_without_flow_root_is_reported() {
    let mut tree = BoxTree::new(800.0, 600.0);
    let orphan = tree.push(detached_block(&tree, false));
    let inline = tree.push(detached_block(&tree, false));
    tree.add_inline(orphan, inline);

    assert!(
        tree.warnings()
            .contains(&LayoutWarning::MissingFlowRoot { owner: orphan })
    );
    assert_eq!(tree.anonymous_blocks().count(), 1);
}

#[test]
fn test_completion_callback_receives_layout() {
    let dom = parse_html("<body><p>hello</p></body>").unwrap();
    let root = dom.document_element().unwrap();
    let styles = DocumentStyles::from_document(&dom);
    let mut seen = 0;
    generate_with(&dom, root, 320.0, 240.0, &styles, &MEASURER, |layout| {
        seen = layout.boxes.len();
    })
    .unwrap();
    // viewport, body, p, one word
    assert_eq!(seen, 4);
}

//! DOM walk that fills the box arena.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)
//!
//! One pre-order pass over the visible nodes below the root element creates
//! every box and wires up its containing block, its flow root and the
//! anonymous blocks around inline runs. No constraint is emitted here;
//! generation runs over the finished arena.

use std::collections::HashMap;
use std::ops::Range;

use strut_dom::{DomTree, FilterResult, NodeId, NodeType, TreeWalker};

use super::LayoutWarning;
use super::flow::FlowRootState;
use super::frame::Frame;
use super::measure::ContentMeasurer;
use super::props::PropertyStore;
use super::render_box::{BlockState, BoxId, BoxKind, RenderBox, TextRun};
use super::tree::BoxTree;
use crate::style::display::{
    is_absolutely_positioned, is_block, is_fixed, is_flow_root, is_in_flow, is_none_display,
    is_positioned,
};
use crate::style::{BlockProgression, StyleCache};

/// Element boxes by node, for the ancestor searches.
type NodeBoxes = HashMap<NodeId, BoxId>;

/// Build the box tree for the subtree below `root` in a viewport of
/// `width` × `height`.
#[must_use]
pub fn build_box_tree(
    styles: &StyleCache<'_>,
    root: NodeId,
    width: f64,
    height: f64,
    measurer: &dyn ContentMeasurer,
) -> BoxTree {
    let dom = styles.tree();
    let mut tree = BoxTree::new(width, height);
    let mut node_boxes = NodeBoxes::new();

    let walker = TreeWalker::new(dom, root, |dom: &DomTree, node| visibility(styles, dom, node));
    for node in walker {
        if dom.as_text(node).is_some() {
            add_text(&mut tree, styles, root, &node_boxes, measurer, node);
        } else {
            let id = add_element(&mut tree, styles, root, &node_boxes, measurer, node);
            let _ = node_boxes.insert(node, id);
        }
    }
    tree
}

/// [§ 6.3 Interface NodeFilter](https://dom.spec.whatwg.org/#interface-nodefilter)
///
/// Text and box-generating elements; `display: none` prunes the subtree.
fn visibility(styles: &StyleCache<'_>, dom: &DomTree, node: NodeId) -> FilterResult {
    match dom.get(node).map(|n| &n.node_type) {
        Some(NodeType::Text(_)) => FilterResult::Accept,
        Some(NodeType::Element(_)) => {
            if is_none_display(styles.value(node, "display").as_str()) {
                FilterResult::Reject
            } else {
                FilterResult::Accept
            }
        }
        Some(NodeType::Document) => FilterResult::Skip,
        Some(NodeType::Comment(_)) | None => FilterResult::Reject,
    }
}

fn add_element(
    tree: &mut BoxTree,
    styles: &StyleCache<'_>,
    root: NodeId,
    node_boxes: &NodeBoxes,
    measurer: &dyn ContentMeasurer,
    node: NodeId,
) -> BoxId {
    let containing = containing_block(styles, root, node_boxes, node);
    let block = is_block(styles, node);
    let in_flow = is_in_flow(styles, node);
    let flow_state = is_flow_root(styles, node).then(|| {
        let progression = styles
            .value(node, "block-progression")
            .as_str()
            .parse::<BlockProgression>()
            .unwrap_or_default();
        FlowRootState::new(progression)
    });

    let id = tree.push(RenderBox {
        kind: if block {
            BoxKind::Block(BlockState::default())
        } else {
            BoxKind::Inline
        },
        node: Some(node),
        frame: Frame::new(),
        props: PropertyStore::from_styles(styles, node),
        containing_block: containing.unwrap_or(BoxId::VIEWPORT),
        flow_root: None,
        flow_state,
        natural_size: measurer.measure_node(styles, node),
        in_flow,
    });
    if containing.is_none() && styles.tree().parent(node) != Some(root) {
        tree.warn(LayoutWarning::UnresolvableContainingBlock { id });
    }

    let parent = containing.unwrap_or(BoxId::VIEWPORT);
    if block {
        tree.add_block(parent, id);
    } else {
        tree.add_inline(parent, id);
    }
    if in_flow {
        let flow_root = nearest_flow_root(tree, styles.tree(), root, node_boxes, node);
        tree.register_in_flow(flow_root, id);
    }
    id
}

fn add_text(
    tree: &mut BoxTree,
    styles: &StyleCache<'_>,
    root: NodeId,
    node_boxes: &NodeBoxes,
    measurer: &dyn ContentMeasurer,
    node: NodeId,
) {
    let Some(text) = styles.tree().as_text(node) else {
        return;
    };
    let parent = containing_block(styles, root, node_boxes, node).unwrap_or(BoxId::VIEWPORT);
    for (range, word) in split_words(text) {
        let id = tree.push(RenderBox {
            kind: BoxKind::Text(TextRun {
                range,
                text: word.to_string(),
            }),
            node: Some(node),
            frame: Frame::actual_only(),
            props: PropertyStore::auto(),
            containing_block: parent,
            flow_root: None,
            flow_state: None,
            natural_size: measurer.measure_text(styles, node, word),
            in_flow: false,
        });
        tree.add_inline(parent, id);
    }
}

/// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
///
/// - fixed: the viewport
/// - absolute: the nearest positioned block-level ancestor
/// - otherwise: the nearest block-level ancestor
///
/// `None` when the walk reaches `root` without a match.
fn containing_block(
    styles: &StyleCache<'_>,
    root: NodeId,
    node_boxes: &NodeBoxes,
    node: NodeId,
) -> Option<BoxId> {
    if styles.tree().is_element(node) && is_fixed(styles, node) {
        return Some(BoxId::VIEWPORT);
    }
    let positioned = styles.tree().is_element(node) && is_absolutely_positioned(styles, node);
    for ancestor in styles.tree().ancestors(node) {
        if ancestor == root {
            break;
        }
        let Some(&id) = node_boxes.get(&ancestor) else {
            continue;
        };
        if !is_block(styles, ancestor) {
            continue;
        }
        if positioned && !is_positioned(styles, ancestor) {
            continue;
        }
        return Some(id);
    }
    None
}

/// The nearest ancestor box that is a flow root; the viewport otherwise.
fn nearest_flow_root(
    tree: &BoxTree,
    dom: &DomTree,
    root: NodeId,
    node_boxes: &NodeBoxes,
    node: NodeId,
) -> BoxId {
    dom.ancestors(node)
        .take_while(|&ancestor| ancestor != root)
        .filter_map(|ancestor| node_boxes.get(&ancestor).copied())
        .find(|&id| tree.get(id).is_some_and(RenderBox::is_flow_root))
        .unwrap_or(BoxId::VIEWPORT)
}

/// Whitespace-separated words with their byte ranges.
fn split_words(text: &str) -> Vec<(Range<usize>, &str)> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                words.push((s..i, &text[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push((s..text.len(), &text[s..]));
    }
    words
}

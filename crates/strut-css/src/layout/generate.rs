//! Per-box constraint rules and the generation driver.
//!
//! [§ 8 Box model](https://www.w3.org/TR/CSS2/box.html)
//! [§ 10 Visual formatting model details](https://www.w3.org/TR/CSS2/visudet.html)
//!
//! Every box emits its own constraints first, in document order, viewport
//! first. Flow roots then stack their queues. Other boxes' geometry is only
//! ever referenced through their variables, never as resolved numbers, so the
//! order of emission does not change the solution.

use std::fmt;

use serde::Serialize;
use strut_common::warning::warn_once;
use strut_dom::{DomTree, NodeId};

use super::builder::build_box_tree;
use super::frame::{AreaSet, ResolvedAreas};
use super::geometry::EdgeBox;
use super::measure::ContentMeasurer;
use super::props::PropertyStore;
use super::render_box::{BoxId, BoxKind, RenderBox};
use super::solver::{ConstraintSolver, Linear, Strength};
use super::tree::BoxTree;
use super::{LayoutError, LayoutWarning};
use crate::style::value::MEDIUM_BORDER_PX;
use crate::style::{BoxProperty, Position, Side, StyleCache, StyleProvider};

/// `+1` for edges that grow outwards as a length grows (right, bottom).
fn outward(side: Side) -> f64 {
    if side.is_far() { 1.0 } else { -1.0 }
}

/// A length that pins a variable, or `None` for `auto`/`none` and for
/// percentages, which are not resolved.
fn explicit_px(props: &PropertyStore, property: BoxProperty) -> Option<f64> {
    let value = props.value(property);
    if !value.is_specified() {
        return None;
    }
    if value.is_pct() {
        warn_once(
            "Layout",
            &format!("percentage {property} '{value}' treated as auto"),
        );
        return None;
    }
    Some(value.px())
}

/// [§ 8.1 Box dimensions](https://www.w3.org/TR/CSS2/box.html#box-dimensions)
///
/// content → padding → border → margin, each edge pushed out by that side's
/// length.
fn chain_areas(
    solver: &mut ConstraintSolver,
    layer: &AreaSet,
    props: &PropertyStore,
) -> Result<(), LayoutError> {
    for side in Side::ALL {
        let out = outward(side);
        solver.eq(
            "padding-edge",
            layer.padding.edge(side),
            Linear::from(layer.content.edge(side)) + out * props.px(BoxProperty::padding(side)),
            Strength::Required,
        )?;
        solver.eq(
            "border-edge",
            layer.border.edge(side),
            Linear::from(layer.padding.edge(side))
                + out * props.px(BoxProperty::border_width(side)),
            Strength::Required,
        )?;
        solver.eq(
            "margin-edge",
            layer.margin.edge(side),
            Linear::from(layer.border.edge(side)) + out * props.px(BoxProperty::margin(side)),
            Strength::Required,
        )?;
    }
    Ok(())
}

/// Weight of an explicit margin, padding, border or offset length, above
/// that of an explicit `width`/`height` and of the trailing flow edge.
const EXPLICIT_EDGE_WEIGHT: f64 = 2.0;

/// Pin a property variable to its explicit value, or let it default.
fn prefer(
    solver: &mut ConstraintSolver,
    props: &PropertyStore,
    property: BoxProperty,
    default: f64,
) -> Result<(), LayoutError> {
    solver.eq("default", props.var(property), default, Strength::Weak)?;
    if let Some(px) = explicit_px(props, property) {
        solver.eq_weighted(
            "explicit",
            props.var(property),
            px,
            Strength::Strong,
            EXPLICIT_EDGE_WEIGHT,
        )?;
    }
    Ok(())
}

/// The constraints every element box emits.
fn generate_element(
    solver: &mut ConstraintSolver,
    render_box: &RenderBox,
    containing: &AreaSet,
) -> Result<(), LayoutError> {
    let Some(reference) = render_box.frame.reference else {
        return Ok(());
    };
    let actual = render_box.frame.actual;
    let props = &render_box.props;
    let width = props.var(BoxProperty::Width);
    let height = props.var(BoxProperty::Height);

    // Nesting of both layers.
    chain_areas(solver, &reference, props)?;
    chain_areas(solver, &actual, props)?;

    // [§ 10.2 Content width](https://www.w3.org/TR/CSS2/visudet.html#the-width-property)
    if let Some(w) = explicit_px(props, BoxProperty::Width) {
        solver.eq(
            "content-width",
            reference.content.right,
            Linear::from(reference.content.left) + w,
            Strength::Required,
        )?;
    }
    // [§ 10.5 Content height](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
    if let Some(h) = explicit_px(props, BoxProperty::Height) {
        solver.eq(
            "content-height",
            reference.content.bottom,
            Linear::from(reference.content.top) + h,
            Strength::Required,
        )?;
    }

    // Own size variables measure the border box.
    solver.eq(
        "width",
        width,
        Linear::from(reference.border.right) - reference.border.left,
        Strength::Required,
    )?;
    solver.eq(
        "height",
        height,
        Linear::from(reference.border.bottom) - reference.border.top,
        Strength::Required,
    )?;

    // Natural size, overridden by an explicit length.
    let natural = render_box.natural_size;
    solver.eq("natural-width", width, natural.width(), Strength::Medium)?;
    solver.eq("natural-height", height, natural.height(), Strength::Medium)?;
    if let Some(w) = explicit_px(props, BoxProperty::Width) {
        solver.eq("explicit-width", width, w, Strength::Strong)?;
    }
    if let Some(h) = explicit_px(props, BoxProperty::Height) {
        solver.eq("explicit-height", height, h, Strength::Strong)?;
    }

    for side in Side::ALL {
        prefer(solver, props, BoxProperty::margin(side), 0.0)?;
        prefer(solver, props, BoxProperty::padding(side), 0.0)?;
    }
    for side in Side::ALL {
        prefer(solver, props, BoxProperty::border_width(side), MEDIUM_BORDER_PX)?;
    }

    // Boxes no flow places sit at their containing block's content origin.
    if !render_box.in_flow {
        anchor_origin(solver, reference.margin, containing.content)?;
    }

    // Actual follows reference unless an offset moves it.
    for (r, a) in [
        (reference.margin, actual.margin),
        (reference.border, actual.border),
        (reference.padding, actual.padding),
        (reference.content, actual.content),
    ] {
        for side in Side::ALL {
            solver.eq("actual", a.edge(side), r.edge(side), Strength::Strong)?;
        }
    }

    // [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
    // [§ 10.7 Minimum and maximum heights](https://www.w3.org/TR/CSS2/visudet.html#min-max-heights)
    let min_width = props.var(BoxProperty::MinWidth);
    let min_height = props.var(BoxProperty::MinHeight);
    solver.eq(
        "min-width",
        min_width,
        explicit_px(props, BoxProperty::MinWidth).unwrap_or(0.0),
        Strength::Strong,
    )?;
    solver.eq(
        "min-height",
        min_height,
        explicit_px(props, BoxProperty::MinHeight).unwrap_or(0.0),
        Strength::Strong,
    )?;
    solver.geq("width-floor", width, 0.0, Strength::Required)?;
    solver.geq("height-floor", height, 0.0, Strength::Required)?;
    solver.geq("min-width-floor", width, min_width, Strength::Required)?;
    solver.geq("min-height-floor", height, min_height, Strength::Required)?;
    if let Some(max) = explicit_px(props, BoxProperty::MaxWidth) {
        solver.leq("max-width", width, max, Strength::Strong)?;
    }
    if let Some(max) = explicit_px(props, BoxProperty::MaxHeight) {
        solver.leq("max-height", height, max, Strength::Strong)?;
    }

    for side in Side::ALL {
        prefer(solver, props, BoxProperty::offset(side), 0.0)?;
    }

    // [§ 9.3.2 Box offsets](https://www.w3.org/TR/CSS2/visuren.html#position-props)
    let anchor = match Position::from_css(props.value(BoxProperty::Position).as_str()) {
        Position::Static => return Ok(()),
        Position::Relative => reference.margin,
        Position::Absolute | Position::Fixed => containing.margin,
    };
    for side in Side::ALL {
        let Some(offset) = explicit_px(props, BoxProperty::offset(side)) else {
            continue;
        };
        solver.eq(
            "offset",
            actual.margin.edge(side),
            Linear::from(anchor.edge(side)) - outward(side) * offset,
            Strength::Required,
        )?;
    }
    Ok(())
}

/// Weakly place the top-left corner of `edges` on the top-left corner of
/// `origin`.
pub(super) fn anchor_origin(
    solver: &mut ConstraintSolver,
    edges: EdgeBox,
    origin: EdgeBox,
) -> Result<(), LayoutError> {
    solver.eq("origin-left", edges.left, origin.left, Strength::Weak)?;
    solver.eq("origin-top", edges.top, origin.top, Strength::Weak)
}

/// A word has no box model of its own: its areas coincide, sized by the
/// word's natural size.
fn generate_text(
    solver: &mut ConstraintSolver,
    render_box: &RenderBox,
    containing: &AreaSet,
) -> Result<(), LayoutError> {
    let actual = render_box.frame.actual;
    anchor_origin(solver, actual.content, containing.content)?;
    let width = cassowary::Variable::new();
    let height = cassowary::Variable::new();
    let natural = render_box.natural_size;

    solver.eq("text-width", width, natural.width(), Strength::Medium)?;
    solver.eq("text-height", height, natural.height(), Strength::Medium)?;
    solver.eq(
        "text-right",
        actual.content.right,
        Linear::from(actual.content.left) + width,
        Strength::Required,
    )?;
    solver.eq(
        "text-bottom",
        actual.content.bottom,
        Linear::from(actual.content.top) + height,
        Strength::Required,
    )?;
    for outer in [actual.padding, actual.border, actual.margin] {
        for side in Side::ALL {
            solver.eq(
                "text-edge",
                outer.edge(side),
                actual.content.edge(side),
                Strength::Required,
            )?;
        }
    }
    Ok(())
}

/// [§ 9.1.1 The viewport](https://www.w3.org/TR/CSS2/visuren.html#viewport)
fn generate_viewport(
    solver: &mut ConstraintSolver,
    render_box: &RenderBox,
) -> Result<(), LayoutError> {
    let actual = render_box.frame.actual;
    let size = render_box.natural_size;
    for area in [actual.margin, actual.border, actual.padding, actual.content] {
        solver.eq("viewport-top", area.top, 0.0, Strength::Required)?;
        solver.eq("viewport-left", area.left, 0.0, Strength::Required)?;
        solver.eq("viewport-right", area.right, size.width(), Strength::Required)?;
        solver.eq("viewport-bottom", area.bottom, size.height(), Strength::Required)?;
    }
    Ok(())
}

impl BoxTree {
    /// Emit the constraints of one box (and of its anonymous blocks).
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the solver rejects a constraint.
    pub fn generate(&mut self, id: BoxId) -> Result<(), LayoutError> {
        let Some(render_box) = self.boxes.get(id.0) else {
            return Ok(());
        };
        let containing = self
            .boxes
            .get(render_box.containing_block.0)
            .map_or_else(AreaSet::new, |cb| cb.frame.actual);
        let solver = &mut self.solver;

        let anonymous = match &render_box.kind {
            BoxKind::Viewport(state) => {
                generate_viewport(solver, render_box)?;
                state.anonymous.clone()
            }
            BoxKind::Block(state) => {
                generate_element(solver, render_box, &containing)?;
                state.anonymous.clone()
            }
            BoxKind::Inline => {
                generate_element(solver, render_box, &containing)?;
                Vec::new()
            }
            BoxKind::Text(_) => {
                generate_text(solver, render_box, &containing)?;
                Vec::new()
            }
            // Hosts inline runs for the flow queue; collapses to its top
            // edge so the next flow box starts there.
            BoxKind::Anonymous { .. } => {
                if let Some(reference) = render_box.frame.reference {
                    solver.eq(
                        "anonymous-height",
                        reference.margin.bottom,
                        reference.margin.top,
                        Strength::Weak,
                    )?;
                }
                Vec::new()
            }
        };
        for child in anonymous {
            self.generate(child)?;
        }
        Ok(())
    }

    /// Generate every box in document order, then flow every flow root.
    ///
    /// # Errors
    ///
    /// Returns the first [`LayoutError`] the solver raises.
    pub fn generate_all(&mut self) -> Result<(), LayoutError> {
        for id in self.order.clone() {
            self.generate(id)?;
        }
        for root in self.flow_roots.clone() {
            self.flow(root)?;
        }
        Ok(())
    }

    /// Snapshot of every non-anonymous box's resolved geometry.
    #[must_use]
    pub fn resolve(&self, dom: &DomTree) -> Vec<ResolvedBox> {
        self.in_document_order()
            .map(|(id, b)| ResolvedBox::new(id, b, dom, &self.solver))
            .collect()
    }
}

/// A box's geometry after solving.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBox {
    /// Arena id.
    pub id: BoxId,
    /// Box kind name (`Viewport`, `Block`, `Inline`, `Text`).
    pub kind: &'static str,
    /// The DOM node behind the box.
    #[serde(skip)]
    pub node: Option<NodeId>,
    /// Tag name for elements, the word for text runs.
    pub label: Option<String>,
    /// Resolved `width` (border box).
    pub width: f64,
    /// Resolved `height` (border box).
    pub height: f64,
    /// Geometry after position offsets.
    pub actual: ResolvedAreas,
    /// Geometry before position offsets; absent for text runs.
    pub reference: Option<ResolvedAreas>,
}

impl ResolvedBox {
    fn new(id: BoxId, render_box: &RenderBox, dom: &DomTree, solver: &ConstraintSolver) -> Self {
        let actual = render_box.frame.actual.resolve(solver);
        let reference = render_box.frame.reference.map(|r| r.resolve(solver));
        let (width, height) = match render_box.kind {
            BoxKind::Block(_) | BoxKind::Inline => (
                solver.value(render_box.props.var(BoxProperty::Width)),
                solver.value(render_box.props.var(BoxProperty::Height)),
            ),
            _ => (actual.border.width(), actual.border.height()),
        };
        let label = match &render_box.kind {
            BoxKind::Text(run) => Some(run.text.clone()),
            _ => render_box
                .node
                .and_then(|node| dom.as_element(node))
                .map(|el| el.tag_name.clone()),
        };
        Self {
            id,
            kind: render_box.kind.name(),
            node: render_box.node,
            label,
            width,
            height,
            actual,
            reference,
        }
    }
}

/// Round away solver noise (and negative zero) for display.
fn tidy(value: f64) -> f64 {
    (value * 1e6).round() / 1e6 + 0.0
}

impl fmt::Display for ResolvedBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.actual.margin;
        write!(
            f,
            "{}: {{ top: {}, right: {}, bottom: {}, left: {} }}",
            self.kind,
            tidy(m.top),
            tidy(m.right),
            tidy(m.bottom),
            tidy(m.left)
        )
    }
}

/// The result of one generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedLayout {
    /// Every non-anonymous box in document order, viewport first.
    pub boxes: Vec<ResolvedBox>,
    /// Anonymous blocks created for inline runs.
    pub anonymous_blocks: usize,
    /// Non-fatal diagnostics.
    pub warnings: Vec<LayoutWarning>,
    /// Constraints handed to the solver.
    pub constraints: usize,
}

impl GeneratedLayout {
    /// The viewport box.
    #[must_use]
    pub fn viewport(&self) -> Option<&ResolvedBox> {
        self.boxes.first()
    }

    /// The first box generated for `node`.
    #[must_use]
    pub fn for_node(&self, node: NodeId) -> Option<&ResolvedBox> {
        self.boxes.iter().find(|b| b.node == Some(node))
    }
}

/// Build, generate and flow the box tree of `root`'s subtree in a viewport
/// of `width` × `height`.
///
/// `root` itself generates no box; the viewport stands in for it.
///
/// # Errors
///
/// Returns [`LayoutError`] when the constraint system is contradictory.
pub fn generate_for(
    dom: &DomTree,
    root: NodeId,
    width: f64,
    height: f64,
    styles: &dyn StyleProvider,
    measurer: &dyn ContentMeasurer,
) -> Result<GeneratedLayout, LayoutError> {
    let cache = StyleCache::new(dom, styles);
    let mut tree = build_box_tree(&cache, root, width, height, measurer);
    tree.generate_all()?;
    Ok(GeneratedLayout {
        boxes: tree.resolve(dom),
        anonymous_blocks: tree.anonymous_blocks().count(),
        warnings: tree.warnings().to_vec(),
        constraints: tree.solver().constraint_count(),
    })
}

/// [`generate_for`], delivering the result to a completion callback.
///
/// # Errors
///
/// Returns [`LayoutError`] when the constraint system is contradictory; the
/// callback is not invoked in that case.
pub fn generate_with<F>(
    dom: &DomTree,
    root: NodeId,
    width: f64,
    height: f64,
    styles: &dyn StyleProvider,
    measurer: &dyn ContentMeasurer,
    on_complete: F,
) -> Result<(), LayoutError>
where
    F: FnOnce(&GeneratedLayout),
{
    let layout = generate_for(dom, root, width, height, styles, measurer)?;
    on_complete(&layout);
    Ok(())
}

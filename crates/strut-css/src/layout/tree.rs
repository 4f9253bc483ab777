//! The box arena.
//!
//! Boxes are created by the builder in document order and refer to each
//! other by [`BoxId`]. Nothing is removed once added.

use strut_common::warning::{error_once, warn_once};

use super::LayoutWarning;
use super::flow::FlowRootState;
use super::frame::Frame;
use super::geometry::MeasuredBox;
use super::props::PropertyStore;
use super::render_box::{BlockState, BoxId, BoxKind, RenderBox};
use super::solver::ConstraintSolver;
use crate::style::BlockProgression;

/// All boxes of one generation run, plus the solver they share.
#[derive(Debug)]
pub struct BoxTree {
    pub(crate) boxes: Vec<RenderBox>,
    /// Non-anonymous boxes in document order, viewport first.
    pub(crate) order: Vec<BoxId>,
    /// Flow roots in creation order.
    pub(crate) flow_roots: Vec<BoxId>,
    pub(crate) solver: ConstraintSolver,
    pub(crate) warnings: Vec<LayoutWarning>,
}

impl BoxTree {
    /// A tree holding only a viewport of the given natural size.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let viewport = RenderBox {
            kind: BoxKind::Viewport(BlockState::default()),
            node: None,
            frame: Frame::new(),
            props: PropertyStore::auto(),
            containing_block: BoxId::VIEWPORT,
            flow_root: None,
            flow_state: Some(FlowRootState::new(BlockProgression::Tb)),
            natural_size: MeasuredBox::sized(width, height),
            in_flow: false,
        };
        let mut tree = Self {
            boxes: Vec::new(),
            order: Vec::new(),
            flow_roots: Vec::new(),
            solver: ConstraintSolver::new(),
            warnings: Vec::new(),
        };
        let _ = tree.push(viewport);
        tree
    }

    /// Add a box, returning its id.
    pub fn push(&mut self, render_box: RenderBox) -> BoxId {
        let id = BoxId(self.boxes.len());
        if !render_box.is_anonymous() {
            self.order.push(id);
        }
        if render_box.is_flow_root() {
            self.flow_roots.push(id);
        }
        self.boxes.push(render_box);
        id
    }

    /// Look up a box.
    #[must_use]
    pub fn get(&self, id: BoxId) -> Option<&RenderBox> {
        self.boxes.get(id.0)
    }

    /// Mutable [`Self::get`].
    pub fn get_mut(&mut self, id: BoxId) -> Option<&mut RenderBox> {
        self.boxes.get_mut(id.0)
    }

    /// The viewport box.
    #[must_use]
    pub fn viewport(&self) -> &RenderBox {
        &self.boxes[BoxId::VIEWPORT.0]
    }

    /// Total number of boxes, anonymous ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Never true; the viewport always exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Non-anonymous boxes in document order, viewport first.
    pub fn in_document_order(&self) -> impl Iterator<Item = (BoxId, &RenderBox)> {
        self.order.iter().map(|&id| (id, &self.boxes[id.0]))
    }

    /// Every anonymous block, in creation order.
    pub fn anonymous_blocks(&self) -> impl Iterator<Item = (BoxId, &RenderBox)> {
        self.boxes
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_anonymous())
            .map(|(i, b)| (BoxId(i), b))
    }

    /// Flow roots in creation order.
    #[must_use]
    pub fn flow_roots(&self) -> &[BoxId] {
        &self.flow_roots
    }

    /// The boxes queued on a flow root, in registration order.
    #[must_use]
    pub fn flow_boxes(&self, root: BoxId) -> &[BoxId] {
        self.get(root)
            .and_then(|b| b.flow_state.as_ref())
            .map_or(&[], |state| state.boxes.as_slice())
    }

    /// The shared solver.
    #[must_use]
    pub const fn solver(&self) -> &ConstraintSolver {
        &self.solver
    }

    /// Diagnostics recorded so far.
    #[must_use]
    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    /// Record a non-fatal condition and echo it on stderr.
    pub fn warn(&mut self, warning: LayoutWarning) {
        match warning {
            LayoutWarning::MissingFlowRoot { .. } => error_once("Layout", &warning.to_string()),
            _ => warn_once("Layout", &warning.to_string()),
        }
        self.warnings.push(warning);
    }

    /// Queue `id` on the flow list of `root`.
    pub fn register_in_flow(&mut self, root: BoxId, id: BoxId) {
        let Some(state) = self.get_mut(root).and_then(|b| b.flow_state.as_mut()) else {
            self.warn(LayoutWarning::MissingFlowRoot { owner: id });
            return;
        };
        state.boxes.push(id);
        if let Some(b) = self.get_mut(id) {
            b.flow_root = Some(root);
        }
    }

    /// A block-level box joined `parent`: any inline run in progress there is
    /// over.
    pub fn add_block(&mut self, parent: BoxId, child: BoxId) {
        if parent == child {
            return;
        }
        if let Some(state) = self.get_mut(parent).and_then(|b| b.kind.block_state_mut()) {
            state.open_anonymous = None;
        }
    }

    /// An inline-level box joined `parent`: append it to the open anonymous
    /// block, creating and registering one first if needed.
    pub fn add_inline(&mut self, parent: BoxId, inline: BoxId) {
        let open = self
            .get(parent)
            .and_then(|b| b.kind.block_state())
            .and_then(|state| state.open_anonymous);
        let anonymous = match open {
            Some(anonymous) => anonymous,
            None => self.open_anonymous(parent),
        };
        if let Some(BoxKind::Anonymous { inlines }) = self.get_mut(anonymous).map(|b| &mut b.kind)
        {
            inlines.push(inline);
        }
    }

    fn open_anonymous(&mut self, parent: BoxId) -> BoxId {
        let anonymous = self.push(RenderBox {
            kind: BoxKind::Anonymous {
                inlines: Vec::new(),
            },
            node: None,
            frame: Frame::new(),
            props: PropertyStore::auto(),
            containing_block: parent,
            flow_root: None,
            flow_state: None,
            natural_size: MeasuredBox::default(),
            in_flow: true,
        });

        let root = self.get(parent).and_then(|p| {
            if p.is_flow_root() {
                Some(parent)
            } else {
                p.flow_root
            }
        });
        match root {
            Some(root) => self.register_in_flow(root, anonymous),
            None => self.warn(LayoutWarning::MissingFlowRoot { owner: parent }),
        }

        if let Some(state) = self.get_mut(parent).and_then(|b| b.kind.block_state_mut()) {
            state.open_anonymous = Some(anonymous);
            state.anonymous.push(anonymous);
        }
        anonymous
    }
}

//! [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
//!
//! "In a block formatting context, boxes are laid out one after the other,
//! vertically, beginning at the top of a containing block."
//!
//! Every in-flow box is queued on its nearest flow root while the tree is
//! built. Once all boxes have emitted their own constraints, each flow root
//! stacks its queue along its block-progression axis.

use super::generate::anchor_origin;
use super::render_box::BoxId;
use super::solver::Strength;
use super::tree::BoxTree;
use super::{LayoutError, LayoutWarning};
use crate::style::BlockProgression;

/// Weight of the start edges (left, top) relative to the end edge, so an
/// explicitly sized box keeps its start edge when it cannot span the root.
const START_EDGE_WEIGHT: f64 = 2.0;
const END_EDGE_WEIGHT: f64 = 1.0;

/// The flow-root capability of a box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRootState {
    /// In-flow boxes in registration (document) order.
    pub boxes: Vec<BoxId>,
    /// Stacking axis.
    pub progression: BlockProgression,
}

impl FlowRootState {
    /// An empty flow list.
    #[must_use]
    pub const fn new(progression: BlockProgression) -> Self {
        Self {
            boxes: Vec::new(),
            progression,
        }
    }
}

impl BoxTree {
    /// Emit the stacking constraints of one flow root.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the solver rejects a constraint.
    pub fn flow(&mut self, root: BoxId) -> Result<(), LayoutError> {
        let Some(root_box) = self.get(root) else {
            return Ok(());
        };
        let Some(state) = root_box.flow_state.clone() else {
            return Ok(());
        };
        let container = root_box.frame.actual.content;

        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[flow] {root} {} ({}) queues {} boxes",
            root_box.kind.name(),
            state.progression,
            state.boxes.len()
        );

        if state.progression != BlockProgression::Tb {
            self.warn(LayoutWarning::UnsupportedAxis {
                root,
                progression: state.progression,
            });
            // Unstacked, but still placed.
            for id in state.boxes {
                let Some(reference) = self.get(id).and_then(|b| b.frame.reference) else {
                    continue;
                };
                anchor_origin(&mut self.solver, reference.margin, container)?;
            }
            return Ok(());
        }

        let mut previous_bottom = None;
        for id in state.boxes {
            let Some(flow_box) = self.get(id) else {
                continue;
            };
            if !flow_box.in_flow && !flow_box.is_anonymous() {
                self.warn(LayoutWarning::OutOfFlowInFlowList { root, id });
                continue;
            }
            let Some(reference) = flow_box.frame.reference else {
                continue;
            };
            let margin = reference.margin;

            let solver = &mut self.solver;
            solver.eq_weighted(
                "flow-left",
                margin.left,
                container.left,
                Strength::Strong,
                START_EDGE_WEIGHT,
            )?;
            solver.eq_weighted(
                "flow-right",
                margin.right,
                container.right,
                Strength::Strong,
                END_EDGE_WEIGHT,
            )?;
            let top = previous_bottom.unwrap_or(container.top);
            solver.eq_weighted(
                "flow-top",
                margin.top,
                top,
                Strength::Strong,
                START_EDGE_WEIGHT,
            )?;
            previous_bottom = Some(margin.bottom);

            #[cfg(feature = "layout-trace")]
            eprintln!("[flow]   {id} stacked under {root}");
        }
        Ok(())
    }
}

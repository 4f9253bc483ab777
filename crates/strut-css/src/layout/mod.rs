//! Constraint-generated box geometry.
//!
//! # Relevant Specifications
//!
//! - [CSS 2.1 Visual Formatting Model](https://www.w3.org/TR/CSS2/visuren.html)
//! - [CSS 2.1 Visual Formatting Model Details](https://www.w3.org/TR/CSS2/visudet.html)
//! - [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! # Module Structure
//!
//! - [`geometry`] - Solver-backed and resolved rectangles
//! - [`frame`] - Reference and actual box-model layers
//! - [`props`] - Per-box property values and variables
//! - [`render_box`] - Box kinds
//! - [`tree`] - The box arena
//! - [`builder`] - DOM walk that fills the arena
//! - [`generate`] - Per-box constraint rules and the run driver
//! - [`flow`] - Block stacking inside flow roots
//! - [`measure`] - Natural content size
//! - [`solver`] - Cassowary wrapper

pub mod builder;
pub mod flow;
pub mod frame;
pub mod generate;
pub mod geometry;
pub mod measure;
pub mod props;
pub mod render_box;
pub mod solver;
pub mod tree;

pub use builder::build_box_tree;
pub use flow::FlowRootState;
pub use frame::{AreaSet, BoxArea, Frame, ResolvedAreas};
pub use generate::{GeneratedLayout, ResolvedBox, generate_for, generate_with};
pub use geometry::{EdgeBox, MeasuredBox};
pub use measure::{ApproximateMeasurer, ContentMeasurer};
pub use props::PropertyStore;
pub use render_box::{BlockState, BoxId, BoxKind, RenderBox, TextRun};
pub use solver::{ConstraintSolver, Linear, Strength};
pub use tree::BoxTree;

use serde::Serialize;
use thiserror::Error;

use crate::style::BlockProgression;

/// A generation run that could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Required constraints contradict each other.
    #[error("unsatisfiable required constraint '{tag}'")]
    Unsatisfiable {
        /// Rule that produced the rejected constraint.
        tag: &'static str,
    },
    /// The same constraint object was added twice.
    #[error("duplicate constraint '{tag}'")]
    Duplicate {
        /// Rule that produced the rejected constraint.
        tag: &'static str,
    },
    /// The solver failed internally.
    #[error("solver failure at '{tag}': {detail}")]
    Solver {
        /// Rule that produced the rejected constraint.
        tag: &'static str,
        /// Solver-provided description.
        detail: String,
    },
}

/// A condition that degrades the layout without stopping it.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum LayoutWarning {
    /// A flow root's block progression is not `tb`; its queue was skipped.
    #[error("block-progression '{progression}' of flow root {root} is not supported")]
    UnsupportedAxis {
        /// The flow root.
        root: BoxId,
        /// Its block progression.
        progression: BlockProgression,
    },
    /// A box on a flow queue is neither in flow nor anonymous.
    #[error("box {id} queued on flow root {root} is not in flow")]
    OutOfFlowInFlowList {
        /// The flow root.
        root: BoxId,
        /// The skipped box.
        id: BoxId,
    },
    /// An anonymous block found no flow root to join.
    #[error("no flow root for the anonymous block of {owner}")]
    MissingFlowRoot {
        /// The block that needed an anonymous child.
        owner: BoxId,
    },
    /// No qualifying ancestor; the viewport was used.
    #[error("no containing block for {id}; using the viewport")]
    UnresolvableContainingBlock {
        /// The box whose containing block fell back.
        id: BoxId,
    },
}

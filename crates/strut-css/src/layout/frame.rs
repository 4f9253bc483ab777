//! [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
//!
//! "Each box has a content area and optional surrounding padding, border,
//! and margin areas."
//!
//! A frame holds that nest of rectangles twice: a reference layer placed by
//! normal flow, and an actual layer with position offsets applied.

use serde::Serialize;

use super::geometry::{EdgeBox, MeasuredBox};
use super::solver::ConstraintSolver;

/// One of the four nested box areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BoxArea {
    /// [§ 3.1 Margins](https://www.w3.org/TR/css-box-3/#margins)
    Margin,
    /// [§ 3.2 Borders](https://www.w3.org/TR/css-box-3/#borders)
    Border,
    /// [§ 3.3 Padding](https://www.w3.org/TR/css-box-3/#paddings)
    Padding,
    /// [§ 3.4 Content](https://www.w3.org/TR/css-box-3/#content-area)
    Content,
}

impl BoxArea {
    /// Outermost first.
    pub const ALL: [Self; 4] = [Self::Margin, Self::Border, Self::Padding, Self::Content];
}

/// `margin ⊇ border ⊇ padding ⊇ content`, as solver variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AreaSet {
    /// Margin edge.
    pub margin: EdgeBox,
    /// Border edge.
    pub border: EdgeBox,
    /// Padding edge.
    pub padding: EdgeBox,
    /// Content edge.
    pub content: EdgeBox,
}

impl AreaSet {
    /// Sixteen fresh variables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            margin: EdgeBox::new(),
            border: EdgeBox::new(),
            padding: EdgeBox::new(),
            content: EdgeBox::new(),
        }
    }

    /// The rectangle of one area.
    #[must_use]
    pub const fn area(&self, area: BoxArea) -> &EdgeBox {
        match area {
            BoxArea::Margin => &self.margin,
            BoxArea::Border => &self.border,
            BoxArea::Padding => &self.padding,
            BoxArea::Content => &self.content,
        }
    }

    /// Always the margin box (box-sizing is `content-box` throughout).
    #[must_use]
    pub const fn outer(&self) -> &EdgeBox {
        &self.margin
    }

    /// Always the content box.
    #[must_use]
    pub const fn inner(&self) -> &EdgeBox {
        &self.content
    }

    /// Read every area back from the solver.
    #[must_use]
    pub fn resolve(&self, solver: &ConstraintSolver) -> ResolvedAreas {
        ResolvedAreas {
            margin: self.margin.resolve(solver),
            border: self.border.resolve(solver),
            padding: self.padding.resolve(solver),
            content: self.content.resolve(solver),
        }
    }
}

impl Default for AreaSet {
    fn default() -> Self {
        Self::new()
    }
}

/// An [`AreaSet`] after solving.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ResolvedAreas {
    /// Margin edge.
    pub margin: MeasuredBox,
    /// Border edge.
    pub border: MeasuredBox,
    /// Padding edge.
    pub padding: MeasuredBox,
    /// Content edge.
    pub content: MeasuredBox,
}

/// The reference and actual layers of one box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// Geometry before position offsets. Text runs have none.
    pub reference: Option<AreaSet>,
    /// Geometry after position offsets; what gets rendered.
    pub actual: AreaSet,
}

impl Frame {
    /// A frame with both layers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reference: Some(AreaSet::new()),
            actual: AreaSet::new(),
        }
    }

    /// A frame with only the actual layer.
    #[must_use]
    pub fn actual_only() -> Self {
        Self {
            reference: None,
            actual: AreaSet::new(),
        }
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

//! Rectangles, both as solver-backed edge quadruples and as resolved
//! snapshots.

use cassowary::Variable;
use serde::Serialize;

use super::solver::ConstraintSolver;
use crate::style::Side;

/// A resolved rectangle in absolute pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MeasuredBox {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
}

impl MeasuredBox {
    /// A box of the given size anchored at the origin.
    #[must_use]
    pub const fn sized(width: f64, height: f64) -> Self {
        Self {
            top: 0.0,
            left: 0.0,
            right: width,
            bottom: height,
        }
    }

    /// `right - left`
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// `bottom - top`
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Four solver variables, one per edge.
///
/// Width and height are never variables of their own here; they are derived
/// from the resolved edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeBox {
    /// Top edge.
    pub top: Variable,
    /// Left edge.
    pub left: Variable,
    /// Right edge.
    pub right: Variable,
    /// Bottom edge.
    pub bottom: Variable,
}

impl EdgeBox {
    /// Four fresh variables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            top: Variable::new(),
            left: Variable::new(),
            right: Variable::new(),
            bottom: Variable::new(),
        }
    }

    /// The variable for one edge.
    #[must_use]
    pub const fn edge(&self, side: Side) -> Variable {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// Read the resolved edges back from the solver.
    #[must_use]
    pub fn resolve(&self, solver: &ConstraintSolver) -> MeasuredBox {
        MeasuredBox {
            top: solver.value(self.top),
            left: solver.value(self.left),
            right: solver.value(self.right),
            bottom: solver.value(self.bottom),
        }
    }
}

impl Default for EdgeBox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measured_box_size() {
        let b = MeasuredBox {
            top: 10.0,
            left: 5.0,
            right: 25.0,
            bottom: 40.0,
        };
        assert!((b.width() - 20.0).abs() < f64::EPSILON);
        assert!((b.height() - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_edge_variables_are_distinct() {
        let b = EdgeBox::new();
        let edges: Vec<Variable> = Side::ALL.iter().map(|&s| b.edge(s)).collect();
        for (i, a) in edges.iter().enumerate() {
            for c in &edges[i + 1..] {
                assert_ne!(a, c);
            }
        }
    }
}

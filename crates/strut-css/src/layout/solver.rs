//! Thin wrapper over the Cassowary solver.
//!
//! Every constraint carries a static tag naming the rule that produced it, so
//! a contradiction can be traced back to the box-model rule that lost.

use std::fmt;
use std::ops::{Add, Neg, Sub};

use cassowary::{
    AddConstraintError, Constraint, Expression, RelationalOperator, Solver, Term, Variable,
    strength,
};

use super::LayoutError;

/// Constraint strength tier.
///
/// A constraint of a higher tier always beats any number of constraints of a
/// lower tier. Within a tier, the weight breaks ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strength {
    /// Defaults that anything else may override.
    Weak,
    /// Preferences such as natural content size.
    Medium,
    /// Explicit author values and flow placement.
    Strong,
    /// Definitional; must hold or the run fails.
    Required,
}

impl Strength {
    /// The solver's numeric strength for this tier scaled by `weight`.
    #[must_use]
    pub fn with_weight(self, weight: f64) -> f64 {
        match self {
            Self::Weak => strength::create(0.0, 0.0, 1.0, weight),
            Self::Medium => strength::create(0.0, 1.0, 0.0, weight),
            Self::Strong => strength::create(1.0, 0.0, 0.0, weight),
            Self::Required => strength::REQUIRED,
        }
    }
}

/// A linear expression over solver variables.
#[derive(Debug, Clone, Default)]
pub struct Linear {
    terms: Vec<(Variable, f64)>,
    constant: f64,
}

impl Linear {
    /// The constant expression `value`.
    #[must_use]
    pub const fn constant(value: f64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// `coefficient * var`
    #[must_use]
    pub fn term(var: Variable, coefficient: f64) -> Self {
        Self {
            terms: vec![(var, coefficient)],
            constant: 0.0,
        }
    }

    fn into_expression(self) -> Expression {
        Expression::new(
            self.terms
                .into_iter()
                .map(|(variable, coefficient)| Term {
                    variable,
                    coefficient,
                })
                .collect(),
            self.constant,
        )
    }
}

impl From<Variable> for Linear {
    fn from(var: Variable) -> Self {
        Self::term(var, 1.0)
    }
}

impl From<f64> for Linear {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl<T: Into<Self>> Add<T> for Linear {
    type Output = Self;

    fn add(mut self, rhs: T) -> Self {
        let rhs = rhs.into();
        self.terms.extend(rhs.terms);
        self.constant += rhs.constant;
        self
    }
}

impl<T: Into<Self>> Sub<T> for Linear {
    type Output = Self;

    fn sub(self, rhs: T) -> Self {
        self + -rhs.into()
    }
}

impl Neg for Linear {
    type Output = Self;

    fn neg(mut self) -> Self {
        for (_, coefficient) in &mut self.terms {
            *coefficient = -*coefficient;
        }
        self.constant = -self.constant;
        self
    }
}

/// The single solver shared by every box of one generation run.
pub struct ConstraintSolver {
    solver: Solver,
    constraints: usize,
}

impl ConstraintSolver {
    /// A fresh solver with no constraints.
    #[must_use]
    pub fn new() -> Self {
        Self {
            solver: Solver::new(),
            constraints: 0,
        }
    }

    /// `lhs == rhs`
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the solver rejects the constraint.
    pub fn eq(
        &mut self,
        tag: &'static str,
        lhs: impl Into<Linear>,
        rhs: impl Into<Linear>,
        strength: Strength,
    ) -> Result<(), LayoutError> {
        self.add(tag, lhs.into(), RelationalOperator::Equal, rhs.into(), strength, 1.0)
    }

    /// `lhs == rhs`, with an explicit tie-breaking weight within the tier.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the solver rejects the constraint.
    pub fn eq_weighted(
        &mut self,
        tag: &'static str,
        lhs: impl Into<Linear>,
        rhs: impl Into<Linear>,
        strength: Strength,
        weight: f64,
    ) -> Result<(), LayoutError> {
        self.add(tag, lhs.into(), RelationalOperator::Equal, rhs.into(), strength, weight)
    }

    /// `lhs >= rhs`
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the solver rejects the constraint.
    pub fn geq(
        &mut self,
        tag: &'static str,
        lhs: impl Into<Linear>,
        rhs: impl Into<Linear>,
        strength: Strength,
    ) -> Result<(), LayoutError> {
        self.add(
            tag,
            lhs.into(),
            RelationalOperator::GreaterOrEqual,
            rhs.into(),
            strength,
            1.0,
        )
    }

    /// `lhs <= rhs`
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError`] when the solver rejects the constraint.
    pub fn leq(
        &mut self,
        tag: &'static str,
        lhs: impl Into<Linear>,
        rhs: impl Into<Linear>,
        strength: Strength,
    ) -> Result<(), LayoutError> {
        self.add(
            tag,
            lhs.into(),
            RelationalOperator::LessOrEqual,
            rhs.into(),
            strength,
            1.0,
        )
    }

    fn add(
        &mut self,
        tag: &'static str,
        lhs: Linear,
        op: RelationalOperator,
        rhs: Linear,
        strength: Strength,
        weight: f64,
    ) -> Result<(), LayoutError> {
        let expression = (lhs - rhs).into_expression();
        let constraint = Constraint::new(expression, op, strength.with_weight(weight));
        self.solver
            .add_constraint(constraint)
            .map_err(|err| match err {
                AddConstraintError::UnsatisfiableConstraint => LayoutError::Unsatisfiable { tag },
                AddConstraintError::DuplicateConstraint => LayoutError::Duplicate { tag },
                AddConstraintError::InternalSolverError(detail) => LayoutError::Solver {
                    tag,
                    detail: detail.to_string(),
                },
            })?;
        self.constraints += 1;
        Ok(())
    }

    /// The resolved value of `var`; 0 for variables no constraint mentions.
    #[must_use]
    pub fn value(&self, var: Variable) -> f64 {
        self.solver.get_value(var)
    }

    /// Number of constraints accepted so far.
    #[must_use]
    pub const fn constraint_count(&self) -> usize {
        self.constraints
    }
}

impl Default for ConstraintSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConstraintSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintSolver")
            .field("constraints", &self.constraints)
            .finish_non_exhaustive()
    }
}

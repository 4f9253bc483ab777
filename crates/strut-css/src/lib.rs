//! CSS box geometry solved as a system of linear constraints.
//!
//! # Scope
//!
//! This crate implements:
//! - **Style input** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - A provider boundary returning used values as immutable [`style::CssValue`]s
//!   - A per-run cache keyed by (element, property)
//!   - A small default provider over `<style>` sheets and inline `style` attributes
//!   - User-agent `display` defaults and box classification
//!
//! - **Constraint generation** ([CSS 2.1 Box Model](https://www.w3.org/TR/CSS2/box.html))
//!   - Reference and actual margin/border/padding/content layers per box
//!   - Natural-size, explicit-size, min/max and position-offset rules
//!   - Containing-block and flow-root resolution
//!   - Anonymous blocks around inline runs that neighbour block content
//!   - Top-to-bottom block stacking inside flow roots
//!
//! Solving is delegated to the [`cassowary`] solver.
//!
//! # Not Yet Implemented
//!
//! - Line breaking (each word is its own box)
//! - Margin collapsing, floats, tables
//! - Percentage lengths
//! - Block progressions other than `tb`

/// Constraint generation, flow and the run driver.
pub mod layout;
/// Style values, the provider boundary and classification.
pub mod style;

pub use layout::{
    ApproximateMeasurer, BoxTree, ContentMeasurer, GeneratedLayout, LayoutError, LayoutWarning,
    ResolvedBox, generate_for, generate_with,
};
pub use style::{CssValue, DocumentStyles, StyleProvider, StyleTable};

//! Style input to the layout core.
//!
//! - [`value`]: immutable used values with unit-aware accessors
//! - [`property`]: the fixed property vocabulary
//! - [`provider`]: the provider boundary and the per-run cache
//! - [`sheet`]: the default provider built from the document's own CSS
//! - [`display`]: user-agent display defaults and box classification

pub mod display;
pub mod property;
pub mod provider;
pub mod sheet;
pub mod value;

pub use property::{BlockProgression, BoxProperty, Position, Side};
pub use provider::{StyleCache, StyleProvider, StyleTable};
pub use sheet::{DocumentStyles, Specificity};
pub use value::CssValue;

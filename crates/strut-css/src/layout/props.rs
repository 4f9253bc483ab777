//! Per-box property store.
//!
//! Each [`BoxProperty`] has a value slot, read once from the style cache
//! when the box is created, and a same-named solver variable that the
//! generation rules constrain.

use cassowary::Variable;
use strut_dom::NodeId;

use crate::style::{BoxProperty, CssValue, StyleCache};

#[derive(Debug, Clone)]
struct Slot {
    value: CssValue,
    var: Variable,
}

/// Property values and their solver variables, indexed by [`BoxProperty`].
#[derive(Debug, Clone)]
pub struct PropertyStore {
    slots: Vec<Slot>,
}

impl PropertyStore {
    /// Every property read from `styles` for `node`.
    #[must_use]
    pub fn from_styles(styles: &StyleCache<'_>, node: NodeId) -> Self {
        Self::build(|property| styles.property(node, property))
    }

    /// Every property `auto`, for boxes with no element behind them.
    #[must_use]
    pub fn auto() -> Self {
        Self::build(|_| CssValue::auto())
    }

    fn build(mut read: impl FnMut(BoxProperty) -> CssValue) -> Self {
        let slots = BoxProperty::ALL
            .into_iter()
            .map(|property| Slot {
                value: read(property),
                var: Variable::new(),
            })
            .collect();
        Self { slots }
    }

    fn slot(&self, property: BoxProperty) -> &Slot {
        // `ALL` lists variants in declaration order, so the discriminant is
        // the slot index.
        &self.slots[property as usize]
    }

    /// The stored value.
    #[must_use]
    pub fn value(&self, property: BoxProperty) -> &CssValue {
        &self.slot(property).value
    }

    /// The solver variable of the same name.
    #[must_use]
    pub fn var(&self, property: BoxProperty) -> Variable {
        self.slot(property).var
    }

    /// Shorthand for `value(property).px()`.
    #[must_use]
    pub fn px(&self, property: BoxProperty) -> f64 {
        self.value(property).px()
    }

    /// Whether the value is neither `auto` nor `none`.
    #[must_use]
    pub fn is_specified(&self, property: BoxProperty) -> bool {
        self.value(property).is_specified()
    }
}

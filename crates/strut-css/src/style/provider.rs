//! Computed-style lookup boundary.
//!
//! The layout core asks for properties by name and gets back immutable
//! [`CssValue`]s. Where those values come from (a cascade, a browser, a test
//! table) is the provider's business.

use std::cell::RefCell;
use std::collections::HashMap;

use strut_dom::{DomTree, NodeId};

use super::display::default_display;
use super::property::BoxProperty;
use super::value::CssValue;

/// [§ 4.5 Used Values](https://www.w3.org/TR/css-cascade-4/#used)
///
/// A source of used property values.
pub trait StyleProvider {
    /// The used value of `property` on `node`, or `None` when the property is
    /// absent (read as `auto`).
    ///
    /// `node` is always an element; text nodes are resolved to their parent
    /// element before the provider is consulted.
    fn computed_value(&self, tree: &DomTree, node: NodeId, property: &str) -> Option<String>;
}

impl<P: StyleProvider + ?Sized> StyleProvider for &P {
    fn computed_value(&self, tree: &DomTree, node: NodeId, property: &str) -> Option<String> {
        (**self).computed_value(tree, node, property)
    }
}

/// A fixed table of values keyed by node, mostly useful for tests and for
/// hosts that already computed style elsewhere.
///
/// Unset `display` falls back to the user-agent default for the tag.
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    values: HashMap<(NodeId, String), String>,
}

impl StyleTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `property` on `node`.
    pub fn set(&mut self, node: NodeId, property: &str, value: &str) {
        let _ = self
            .values
            .insert((node, property.to_ascii_lowercase()), value.to_string());
    }

    /// Builder form of [`Self::set`].
    #[must_use]
    pub fn with(mut self, node: NodeId, property: &str, value: &str) -> Self {
        self.set(node, property, value);
        self
    }
}

impl StyleProvider for StyleTable {
    fn computed_value(&self, tree: &DomTree, node: NodeId, property: &str) -> Option<String> {
        if let Some(value) = self.values.get(&(node, property.to_string())) {
            return Some(value.clone());
        }
        if property == "display" {
            return tree
                .as_element(node)
                .map(|el| default_display(&el.tag_name).to_string());
        }
        None
    }
}

/// Per-run memo of provider lookups keyed by (element, property).
///
/// Lives exactly as long as one generation run.
pub struct StyleCache<'a> {
    tree: &'a DomTree,
    provider: &'a dyn StyleProvider,
    values: RefCell<HashMap<(NodeId, String), CssValue>>,
}

impl<'a> StyleCache<'a> {
    /// Start an empty cache over `tree`.
    #[must_use]
    pub fn new(tree: &'a DomTree, provider: &'a dyn StyleProvider) -> Self {
        Self {
            tree,
            provider,
            values: RefCell::new(HashMap::new()),
        }
    }

    /// The DOM this cache reads.
    #[must_use]
    pub const fn tree(&self) -> &'a DomTree {
        self.tree
    }

    /// The used value of `property` on `node`; `auto` when the provider has
    /// none or `node` has no element to style.
    pub fn value(&self, node: NodeId, property: &str) -> CssValue {
        let Some(element) = self.tree.styled_element(node) else {
            return CssValue::auto();
        };
        let key = (element, property.to_ascii_lowercase());
        if let Some(hit) = self.values.borrow().get(&key) {
            return hit.clone();
        }
        let value = self
            .provider
            .computed_value(self.tree, element, &key.1)
            .map_or_else(CssValue::auto, |raw| CssValue::new(&raw));
        let _ = self.values.borrow_mut().insert(key, value.clone());
        value
    }

    /// [`Self::value`] for one of the box properties.
    pub fn property(&self, node: NodeId, property: BoxProperty) -> CssValue {
        self.value(node, property.name())
    }

    /// Number of distinct (element, property) pairs looked up so far.
    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    /// Whether nothing has been looked up yet.
    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl std::fmt::Debug for StyleCache<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleCache")
            .field("entries", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use strut_dom::ElementData;

    use super::*;

    struct Counting {
        calls: Cell<usize>,
    }

    impl StyleProvider for Counting {
        fn computed_value(&self, _tree: &DomTree, _node: NodeId, property: &str) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            (property == "width").then(|| "10px".to_string())
        }
    }

    #[test]
    fn test_cache_consults_provider_once_per_pair() {
        let mut tree = DomTree::new();
        let div = tree.append_element(NodeId::ROOT, ElementData::new("div"));
        let provider = Counting {
            calls: Cell::new(0),
        };
        let cache = StyleCache::new(&tree, &provider);

        assert_eq!(cache.value(div, "width").px(), 10.0);
        assert_eq!(cache.value(div, "WIDTH").px(), 10.0);
        assert!(cache.value(div, "height").is_auto());
        assert_eq!(provider.calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_text_nodes_read_their_parent_style() {
        let mut tree = DomTree::new();
        let p = tree.append_element(NodeId::ROOT, ElementData::new("p"));
        let text = tree.append_text(p, "hello");
        let table = StyleTable::new().with(p, "position", "relative");
        let cache = StyleCache::new(&tree, &table);

        assert_eq!(cache.value(text, "position").as_str(), "relative");
    }
}

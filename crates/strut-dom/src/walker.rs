//! Filtered document-order traversal.
//!
//! [§ 6.2 Interface TreeWalker](https://dom.spec.whatwg.org/#interface-treewalker)

use crate::{DomTree, NodeId};

/// [§ 6.3 Interface NodeFilter](https://dom.spec.whatwg.org/#interface-nodefilter)
///
/// The verdict a filter returns for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    /// "FILTER_ACCEPT": yield the node and visit its children.
    Accept,
    /// "FILTER_SKIP": do not yield the node, but still visit its children.
    Skip,
    /// "FILTER_REJECT": do not yield the node or anything below it.
    Reject,
}

/// A pre-order walker over the descendants of a root node.
///
/// The root itself is never yielded, matching repeated `nextNode()` calls on
/// a freshly created DOM `TreeWalker`.
pub struct TreeWalker<'a, F> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
    filter: F,
}

impl<'a, F> TreeWalker<'a, F>
where
    F: FnMut(&DomTree, NodeId) -> FilterResult,
{
    /// Create a walker over the descendants of `root`.
    pub fn new(tree: &'a DomTree, root: NodeId, filter: F) -> Self {
        let stack = tree.children(root).iter().rev().copied().collect();
        Self {
            tree,
            stack,
            filter,
        }
    }
}

impl<F> Iterator for TreeWalker<'_, F>
where
    F: FnMut(&DomTree, NodeId) -> FilterResult,
{
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let verdict = (self.filter)(self.tree, id);
            if verdict != FilterResult::Reject {
                self.stack
                    .extend(self.tree.children(id).iter().rev().copied());
            }
            if verdict == FilterResult::Accept {
                return Some(id);
            }
        }
        None
    }
}

//! The box arena's element type.
//!
//! [§ 9.2 Controlling box generation](https://www.w3.org/TR/CSS2/visuren.html#box-gen)

use std::fmt;
use std::ops::Range;

use serde::Serialize;
use strut_dom::NodeId;

use super::flow::FlowRootState;
use super::frame::Frame;
use super::geometry::MeasuredBox;
use super::props::PropertyStore;

/// Index of a box in its [`BoxTree`](super::tree::BoxTree).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BoxId(pub usize);

impl BoxId {
    /// The viewport is always the first box.
    pub const VIEWPORT: Self = Self(0);
}

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State shared by the viewport and ordinary block boxes.
#[derive(Debug, Clone, Default)]
pub struct BlockState {
    /// The anonymous block currently collecting inline content, if any.
    pub open_anonymous: Option<BoxId>,
    /// Every anonymous block this box created, in creation order.
    pub anonymous: Vec<BoxId>,
}

/// One word of a text node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    /// Byte range of the word inside its text node.
    pub range: Range<usize>,
    /// The word itself.
    pub text: String,
}

/// Discriminant plus variant-specific state.
#[derive(Debug, Clone)]
pub enum BoxKind {
    /// [§ 9.1.1 The viewport](https://www.w3.org/TR/CSS2/visuren.html#viewport)
    Viewport(BlockState),
    /// [§ 9.2.1 Block-level elements and block boxes](https://www.w3.org/TR/CSS2/visuren.html#block-boxes)
    Block(BlockState),
    /// [§ 9.2.2 Inline-level elements and inline boxes](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
    Inline,
    /// A single word of text.
    Text(TextRun),
    /// [§ 9.2.1.1 Anonymous block boxes](https://www.w3.org/TR/CSS2/visuren.html#anonymous-block-level)
    Anonymous {
        /// Inline-level boxes hosted by this block, in document order.
        inlines: Vec<BoxId>,
    },
}

impl BoxKind {
    /// Short name used in diagnostics and output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Viewport(_) => "Viewport",
            Self::Block(_) => "Block",
            Self::Inline => "Inline",
            Self::Text(_) => "Text",
            Self::Anonymous { .. } => "Anonymous",
        }
    }

    /// Block state for the kinds that can host inline runs.
    #[must_use]
    pub const fn block_state(&self) -> Option<&BlockState> {
        match self {
            Self::Viewport(state) | Self::Block(state) => Some(state),
            _ => None,
        }
    }

    /// Mutable [`Self::block_state`].
    pub const fn block_state_mut(&mut self) -> Option<&mut BlockState> {
        match self {
            Self::Viewport(state) | Self::Block(state) => Some(state),
            _ => None,
        }
    }
}

/// One box of the tree.
#[derive(Debug, Clone)]
pub struct RenderBox {
    /// Which kind of box this is.
    pub kind: BoxKind,
    /// The DOM node behind the box; `None` for the viewport and anonymous blocks.
    pub node: Option<NodeId>,
    /// Reference and actual geometry.
    pub frame: Frame,
    /// Property values and their variables.
    pub props: PropertyStore,
    /// [§ 10.1 Definition of "containing block"](https://www.w3.org/TR/CSS2/visudet.html#containing-block-details)
    ///
    /// The viewport is its own containing block.
    pub containing_block: BoxId,
    /// The flow root this box is queued on, if it is in one.
    pub flow_root: Option<BoxId>,
    /// Present only on boxes that establish a flow root.
    pub flow_state: Option<FlowRootState>,
    /// Unconstrained content size.
    pub natural_size: MeasuredBox,
    /// In normal flow (block-level, not floated, static or relative).
    pub in_flow: bool,
}

impl RenderBox {
    /// Whether this box establishes a flow root.
    #[must_use]
    pub const fn is_flow_root(&self) -> bool {
        self.flow_state.is_some()
    }

    /// Whether this is a synthesized anonymous block.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        matches!(self.kind, BoxKind::Anonymous { .. })
    }
}

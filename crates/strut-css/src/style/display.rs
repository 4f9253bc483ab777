//! Box classification.
//!
//! [§ 2 Box Layout Modes: the display property](https://www.w3.org/TR/css-display-3/#the-display-properties)
//!
//! The builder only needs a handful of yes/no answers about each element: is
//! it block- or inline-level, is it positioned, does it establish a flow
//! root, does it take part in normal flow. All of them are read through the
//! per-run [`StyleCache`].

use strut_dom::NodeId;

use super::property::Position;
use super::provider::StyleCache;

/// [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements)
///
/// "The following elements must have their display set to none"
const HIDDEN_ELEMENTS: [&str; 15] = [
    "area", "base", "basefont", "datalist", "head", "link", "meta", "noembed", "noframes",
    "param", "rp", "script", "style", "template", "title",
];

/// [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3)
const BLOCK_ELEMENTS: [&str; 42] = [
    "address", "article", "aside", "blockquote", "body", "center", "dd", "details", "dialog",
    "dir", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hgroup", "hr", "html", "legend", "listing", "main",
    "menu", "nav", "ol", "p", "plaintext", "pre", "search", "section", "summary", "ul", "xmp",
];

/// [§ 2.4 Display Type Keywords](https://www.w3.org/TR/css-display-3/#display-keywords)
///
/// `display` values that make the principal box inline-level.
const INLINE_DISPLAYS: [&str; 6] = [
    "inline",
    "inline-block",
    "inline-table",
    "ruby",
    "inline-flex",
    "inline-grid",
];

/// [§ 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
///
/// The user-agent `display` of an element, by tag name.
#[must_use]
pub fn default_display(tag_name: &str) -> &'static str {
    let tag = tag_name.to_ascii_lowercase();
    let tag = tag.as_str();
    if HIDDEN_ELEMENTS.contains(&tag) {
        return "none";
    }
    if BLOCK_ELEMENTS.contains(&tag) {
        return "block";
    }
    match tag {
        // [§ 15.3.7 Lists](https://html.spec.whatwg.org/multipage/rendering.html#lists)
        "li" => "list-item",
        // [§ 15.3.8 Tables](https://html.spec.whatwg.org/multipage/rendering.html#tables-2)
        "table" => "table",
        "caption" => "table-caption",
        "tr" => "table-row",
        "td" | "th" => "table-cell",
        "thead" => "table-header-group",
        "tbody" => "table-row-group",
        "tfoot" => "table-footer-group",
        // Form controls are inline-block by default.
        "input" | "button" | "textarea" | "select" => "inline-block",
        "ruby" => "ruby",
        _ => "inline",
    }
}

/// Whether a `display` keyword generates an inline-level box.
#[must_use]
pub fn is_inline_display(display: &str) -> bool {
    INLINE_DISPLAYS
        .iter()
        .any(|d| d.eq_ignore_ascii_case(display.trim()))
}

/// Whether a `display` keyword generates no box at all.
#[must_use]
pub fn is_none_display(display: &str) -> bool {
    display.trim().eq_ignore_ascii_case("none")
}

/// The used `display` of a node. Text is always inline.
pub fn display(styles: &StyleCache<'_>, node: NodeId) -> String {
    if styles.tree().as_text(node).is_some() {
        return "inline".to_string();
    }
    styles.value(node, "display").as_str().to_ascii_lowercase()
}

/// The used `position` of a node.
pub fn position(styles: &StyleCache<'_>, node: NodeId) -> Position {
    Position::from_css(styles.value(node, "position").as_str())
}

/// [§ 9.2.1 Block-level elements and block boxes](https://www.w3.org/TR/CSS2/visuren.html#block-boxes)
///
/// Any box-generating display that is not one of the inline-level ones.
pub fn is_block(styles: &StyleCache<'_>, node: NodeId) -> bool {
    let display = display(styles, node);
    !is_none_display(&display) && !is_inline_display(&display)
}

/// [§ 9.2.2 Inline-level elements and inline boxes](https://www.w3.org/TR/CSS2/visuren.html#inline-boxes)
pub fn is_inline(styles: &StyleCache<'_>, node: NodeId) -> bool {
    is_inline_display(&display(styles, node))
}

/// [§ 9.6.1 Fixed positioning](https://www.w3.org/TR/CSS2/visuren.html#fixed-positioning)
pub fn is_fixed(styles: &StyleCache<'_>, node: NodeId) -> bool {
    position(styles, node) == Position::Fixed
}

/// [§ 9.3.1 'position'](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
///
/// "An element is said to be positioned if its 'position' property has a
/// value other than 'static'."
pub fn is_positioned(styles: &StyleCache<'_>, node: NodeId) -> bool {
    position(styles, node) != Position::Static
}

/// [§ 9.3.1 'position'](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
///
/// Out of flow by position: `absolute` or `fixed`.
pub fn is_absolutely_positioned(styles: &StyleCache<'_>, node: NodeId) -> bool {
    matches!(
        position(styles, node),
        Position::Absolute | Position::Fixed
    )
}

/// Whether the node is floated.
pub fn is_floated(styles: &StyleCache<'_>, node: NodeId) -> bool {
    let float = styles.value(node, "float");
    float.is_specified() && !float.as_str().eq_ignore_ascii_case("none")
}

/// [§ 9.4.1 Block formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#block-formatting)
///
/// "Floats, absolutely positioned elements, block containers (such as
/// inline-blocks, table-cells, and table-captions) that are not block boxes,
/// and block boxes with 'overflow' other than 'visible' (except when that
/// value has been propagated to the viewport) establish new block formatting
/// contexts for their contents."
pub fn is_flow_root(styles: &StyleCache<'_>, node: NodeId) -> bool {
    if styles.tree().as_text(node).is_some() {
        return false;
    }
    if is_floated(styles, node) || is_absolutely_positioned(styles, node) {
        return true;
    }
    let overflow = styles.value(node, "overflow");
    if overflow.is_specified() && !overflow.as_str().eq_ignore_ascii_case("visible") {
        return true;
    }
    matches!(
        display(styles, node).as_str(),
        "table-cell" | "table-caption" | "inline-block" | "inline-table" | "flow-root"
    )
}

/// Displays whose boxes join a flow root's stacking queue.
const FLOW_DISPLAYS: [&str; 4] = ["block", "list-item", "table", "flow-root"];

/// [§ 9.3 Positioning schemes](https://www.w3.org/TR/CSS2/visuren.html#positioning-scheme)
///
/// A block, list item or table (or `flow-root` block), not floated, and
/// `static` or `relative`. Table parts, flex and grid containers stay out of
/// the stacking queue.
pub fn is_in_flow(styles: &StyleCache<'_>, node: NodeId) -> bool {
    let display = display(styles, node);
    FLOW_DISPLAYS
        .iter()
        .any(|d| display.eq_ignore_ascii_case(d))
        && !is_floated(styles, node)
        && matches!(
            position(styles, node),
            Position::Static | Position::Relative
        )
}

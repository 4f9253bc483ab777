//! Natural content size.
//!
//! The layout core asks how big a node or a single word would be if nothing
//! constrained it. A real host would measure with its text engine; the
//! [`ApproximateMeasurer`] uses fixed font ratios instead.

use strut_dom::NodeId;

use super::geometry::MeasuredBox;
use crate::style::StyleCache;
use crate::style::display::{is_inline, is_none_display};

/// Natural (unconstrained) size oracle.
pub trait ContentMeasurer {
    /// Natural size of an element's content.
    fn measure_node(&self, styles: &StyleCache<'_>, node: NodeId) -> MeasuredBox;

    /// Natural size of one word of text belonging to text node `node`.
    fn measure_text(&self, styles: &StyleCache<'_>, node: NodeId, word: &str) -> MeasuredBox;
}

/// Default font size in pixels.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Average advance of a glyph relative to the font size.
const CHAR_WIDTH_RATIO: f64 = 0.6;

/// [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
///
/// `line-height: normal`, approximated.
const LINE_HEIGHT_RATIO: f64 = 1.2;

/// Monospace-style measurement from the font size alone.
///
/// Inline content of an element sits on a single line (words separated by
/// one space); block children stack beneath it.
#[derive(Debug, Clone, Copy)]
pub struct ApproximateMeasurer {
    /// Used when no `font-size` is specified.
    pub font_size: f64,
}

impl Default for ApproximateMeasurer {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl ApproximateMeasurer {
    /// A measurer with the given default font size.
    #[must_use]
    pub const fn new(font_size: f64) -> Self {
        Self { font_size }
    }

    fn font_size(&self, styles: &StyleCache<'_>, node: NodeId) -> f64 {
        let value = styles.value(node, "font-size");
        if value.is_specified() && !value.is_pct() {
            let px = value.px();
            if px > 0.0 {
                return px;
            }
        }
        self.font_size
    }

    fn text_width(chars: usize, font_size: f64) -> f64 {
        chars as f64 * font_size * CHAR_WIDTH_RATIO
    }

    /// (width, height) of the content of `node`.
    fn content_size(&self, styles: &StyleCache<'_>, node: NodeId) -> (f64, f64) {
        let tree = styles.tree();
        let mut width: f64 = 0.0;
        let mut height = 0.0;
        let mut line = Line::default();

        for &child in tree.children(node) {
            if let Some(text) = tree.as_text(child) {
                let font_size = self.font_size(styles, child);
                for word in text.split_whitespace() {
                    line.push(
                        Self::text_width(word.chars().count(), font_size),
                        font_size * LINE_HEIGHT_RATIO,
                        Self::text_width(1, font_size),
                    );
                }
                continue;
            }
            if !tree.is_element(child) {
                continue;
            }
            if is_none_display(styles.value(child, "display").as_str()) {
                continue;
            }
            let (w, h) = self.content_size(styles, child);
            if is_inline(styles, child) {
                line.push(w, h, 0.0);
            } else {
                let (lw, lh) = line.take();
                width = width.max(lw).max(w);
                height += lh + h;
            }
        }
        let (lw, lh) = line.take();
        (width.max(lw), height + lh)
    }
}

/// Accumulates one line of inline content.
#[derive(Debug, Default)]
struct Line {
    width: f64,
    height: f64,
    pieces: usize,
}

impl Line {
    fn push(&mut self, width: f64, height: f64, gap: f64) {
        if self.pieces > 0 {
            self.width += gap;
        }
        self.width += width;
        self.height = self.height.max(height);
        self.pieces += 1;
    }

    fn take(&mut self) -> (f64, f64) {
        let out = (self.width, self.height);
        *self = Self::default();
        out
    }
}

impl ContentMeasurer for ApproximateMeasurer {
    fn measure_node(&self, styles: &StyleCache<'_>, node: NodeId) -> MeasuredBox {
        let (width, height) = self.content_size(styles, node);
        MeasuredBox::sized(width, height)
    }

    fn measure_text(&self, styles: &StyleCache<'_>, node: NodeId, word: &str) -> MeasuredBox {
        let font_size = self.font_size(styles, node);
        MeasuredBox::sized(
            Self::text_width(word.chars().count(), font_size),
            font_size * LINE_HEIGHT_RATIO,
        )
    }
}

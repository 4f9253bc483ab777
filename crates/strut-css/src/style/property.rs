//! The fixed property vocabulary the layout core can see.
//!
//! Anything outside [`BoxProperty::ALL`] (plus the classification keywords in
//! [`super::display`]) is invisible to constraint generation.

use serde::Serialize;
use strum_macros::{Display, EnumString, IntoStaticStr};

/// Physical side of a box.
///
/// [§ 6.2 Flow-relative Directions](https://www.w3.org/TR/css-writing-modes-4/#logical-directions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    /// Top edge of the box
    Top,
    /// Right edge of the box
    Right,
    /// Bottom edge of the box
    Bottom,
    /// Left edge of the box
    Left,
}

impl Side {
    /// All four sides, in `top, right, bottom, left` order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The side whose edge coordinate grows outwards as the box grows: for
    /// these an outer edge is `inner + length`, otherwise `inner - length`.
    #[must_use]
    pub const fn is_far(self) -> bool {
        matches!(self, Self::Right | Self::Bottom)
    }
}

/// A CSS property carried in every box's property store.
///
/// The string form is the CSS property name (`margin-top`, `min-width`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum BoxProperty {
    /// [§ 9.3.1 'position'](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
    Position,
    /// [§ 10.2 'width'](https://www.w3.org/TR/CSS2/visudet.html#the-width-property)
    Width,
    /// [§ 10.4 'min-width'](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
    MinWidth,
    /// [§ 10.7 'min-height'](https://www.w3.org/TR/CSS2/visudet.html#min-max-heights)
    MinHeight,
    /// [§ 10.5 'height'](https://www.w3.org/TR/CSS2/visudet.html#the-height-property)
    Height,
    /// [§ 10.4 'max-width'](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
    MaxWidth,
    /// [§ 10.7 'max-height'](https://www.w3.org/TR/CSS2/visudet.html#min-max-heights)
    MaxHeight,
    /// [§ 9.3.2 'left'](https://www.w3.org/TR/CSS2/visuren.html#position-props)
    Left,
    /// [§ 9.3.2 'right'](https://www.w3.org/TR/CSS2/visuren.html#position-props)
    Right,
    /// [§ 9.3.2 'top'](https://www.w3.org/TR/CSS2/visuren.html#position-props)
    Top,
    /// [§ 9.3.2 'bottom'](https://www.w3.org/TR/CSS2/visuren.html#position-props)
    Bottom,
    /// [§ 8.3 'margin-top'](https://www.w3.org/TR/CSS2/box.html#margin-properties)
    MarginTop,
    /// [§ 8.3 'margin-right'](https://www.w3.org/TR/CSS2/box.html#margin-properties)
    MarginRight,
    /// [§ 8.3 'margin-bottom'](https://www.w3.org/TR/CSS2/box.html#margin-properties)
    MarginBottom,
    /// [§ 8.3 'margin-left'](https://www.w3.org/TR/CSS2/box.html#margin-properties)
    MarginLeft,
    /// Per-side border slot; its variable carries the medium-width default.
    BorderTop,
    /// Per-side border slot; its variable carries the medium-width default.
    BorderRight,
    /// Per-side border slot; its variable carries the medium-width default.
    BorderBottom,
    /// Per-side border slot; its variable carries the medium-width default.
    BorderLeft,
    /// [§ 8.5.1 'border-top-width'](https://www.w3.org/TR/CSS2/box.html#border-width-properties)
    BorderTopWidth,
    /// [§ 8.5.1 'border-right-width'](https://www.w3.org/TR/CSS2/box.html#border-width-properties)
    BorderRightWidth,
    /// [§ 8.5.1 'border-bottom-width'](https://www.w3.org/TR/CSS2/box.html#border-width-properties)
    BorderBottomWidth,
    /// [§ 8.5.1 'border-left-width'](https://www.w3.org/TR/CSS2/box.html#border-width-properties)
    BorderLeftWidth,
    /// Carried for consumers; unused by layout.
    BorderTopColor,
    /// Carried for consumers; unused by layout.
    BorderRightColor,
    /// Carried for consumers; unused by layout.
    BorderBottomColor,
    /// Carried for consumers; unused by layout.
    BorderLeftColor,
    /// Carried for consumers; unused by layout.
    BorderTopStyle,
    /// Carried for consumers; unused by layout.
    BorderRightStyle,
    /// Carried for consumers; unused by layout.
    BorderBottomStyle,
    /// Carried for consumers; unused by layout.
    BorderLeftStyle,
    /// [§ 8.4 'padding-top'](https://www.w3.org/TR/CSS2/box.html#padding-properties)
    PaddingTop,
    /// [§ 8.4 'padding-right'](https://www.w3.org/TR/CSS2/box.html#padding-properties)
    PaddingRight,
    /// [§ 8.4 'padding-bottom'](https://www.w3.org/TR/CSS2/box.html#padding-properties)
    PaddingBottom,
    /// [§ 8.4 'padding-left'](https://www.w3.org/TR/CSS2/box.html#padding-properties)
    PaddingLeft,
}

impl BoxProperty {
    /// Every property a box consults, in store order.
    pub const ALL: [Self; 35] = [
        Self::Position,
        Self::Width,
        Self::MinWidth,
        Self::MinHeight,
        Self::Height,
        Self::MaxWidth,
        Self::MaxHeight,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::MarginTop,
        Self::MarginRight,
        Self::MarginBottom,
        Self::MarginLeft,
        Self::BorderTop,
        Self::BorderRight,
        Self::BorderBottom,
        Self::BorderLeft,
        Self::BorderTopWidth,
        Self::BorderRightWidth,
        Self::BorderBottomWidth,
        Self::BorderLeftWidth,
        Self::BorderTopColor,
        Self::BorderRightColor,
        Self::BorderBottomColor,
        Self::BorderLeftColor,
        Self::BorderTopStyle,
        Self::BorderRightStyle,
        Self::BorderBottomStyle,
        Self::BorderLeftStyle,
        Self::PaddingTop,
        Self::PaddingRight,
        Self::PaddingBottom,
        Self::PaddingLeft,
    ];

    /// The CSS property name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// `margin-<side>`
    #[must_use]
    pub const fn margin(side: Side) -> Self {
        match side {
            Side::Top => Self::MarginTop,
            Side::Right => Self::MarginRight,
            Side::Bottom => Self::MarginBottom,
            Side::Left => Self::MarginLeft,
        }
    }

    /// `padding-<side>`
    #[must_use]
    pub const fn padding(side: Side) -> Self {
        match side {
            Side::Top => Self::PaddingTop,
            Side::Right => Self::PaddingRight,
            Side::Bottom => Self::PaddingBottom,
            Side::Left => Self::PaddingLeft,
        }
    }

    /// `border-<side>`
    #[must_use]
    pub const fn border(side: Side) -> Self {
        match side {
            Side::Top => Self::BorderTop,
            Side::Right => Self::BorderRight,
            Side::Bottom => Self::BorderBottom,
            Side::Left => Self::BorderLeft,
        }
    }

    /// `border-<side>-width`
    #[must_use]
    pub const fn border_width(side: Side) -> Self {
        match side {
            Side::Top => Self::BorderTopWidth,
            Side::Right => Self::BorderRightWidth,
            Side::Bottom => Self::BorderBottomWidth,
            Side::Left => Self::BorderLeftWidth,
        }
    }

    /// The position offset property for `side` (`top`, `right`, ...).
    #[must_use]
    pub const fn offset(side: Side) -> Self {
        match side {
            Side::Top => Self::Top,
            Side::Right => Self::Right,
            Side::Bottom => Self::Bottom,
            Side::Left => Self::Left,
        }
    }
}

/// [§ 9.3.1 Choosing a positioning scheme](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
///
/// Unrecognised values (including `sticky`) are laid out as `static`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Position {
    /// "The box is a normal box, laid out according to the normal flow."
    #[default]
    Static,
    /// "The box's position is calculated according to the normal flow.
    /// Then the box is offset relative to its normal position."
    Relative,
    /// "The box's position (and possibly size) is specified with the
    /// 'top', 'right', 'bottom', and 'left' properties."
    Absolute,
    /// "The box's position is calculated according to the 'absolute' model,
    /// but in addition, the box is fixed with respect to some reference."
    Fixed,
}

impl Position {
    /// Parse a used `position` value.
    #[must_use]
    pub fn from_css(value: &str) -> Self {
        value.trim().parse().unwrap_or_default()
    }
}

/// The axis along which a flow root stacks its block children.
///
/// Only `tb` (top to bottom) is laid out; the others are recognised so they
/// can be reported rather than silently treated as `tb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BlockProgression {
    /// Top to bottom.
    #[default]
    Tb,
    /// Right to left.
    Rl,
    /// Bottom to top.
    Bt,
    /// Left to right.
    Lr,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_names_are_css_names() {
        assert_eq!(BoxProperty::MinWidth.name(), "min-width");
        assert_eq!(BoxProperty::BorderLeftWidth.name(), "border-left-width");
        assert_eq!(BoxProperty::Top.to_string(), "top");
        assert_eq!(
            "padding-bottom".parse::<BoxProperty>().ok(),
            Some(BoxProperty::PaddingBottom)
        );
    }

    #[test]
    fn test_all_is_exhaustive_and_unique() {
        let mut names: Vec<&str> = BoxProperty::ALL.iter().map(|p| p.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BoxProperty::ALL.len());
    }

    #[test]
    fn test_position_parsing() {
        assert_eq!(Position::from_css("relative"), Position::Relative);
        assert_eq!(Position::from_css(" FIXED "), Position::Fixed);
        assert_eq!(Position::from_css("sticky"), Position::Static);
    }

    #[test]
    fn test_block_progression_parsing() {
        assert_eq!("tb".parse::<BlockProgression>().ok(), Some(BlockProgression::Tb));
        assert_eq!("RL".parse::<BlockProgression>().ok(), Some(BlockProgression::Rl));
        assert!("diagonal".parse::<BlockProgression>().is_err());
    }
}

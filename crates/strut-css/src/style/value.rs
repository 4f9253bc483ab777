//! Computed-style value wrapper.
//!
//! [§ 4.4 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
//!
//! The layout core never parses CSS syntax itself. It receives the used value
//! of a property as a string and reads it through the unit-aware accessors
//! below.

use std::fmt;

use serde::Serialize;
use strut_common::warning::warn_once;

/// [§ 8.5.1 Border width](https://www.w3.org/TR/CSS2/box.html#border-width-properties)
///
/// "The interpretation of the first three values depends on the user agent.
/// The following relationships must hold, however: 'thin' <= 'medium' <= 'thick'."
const THIN_PX: f64 = 1.0;
/// Used width of `medium`, also the default border preference in generation.
pub const MEDIUM_BORDER_PX: f64 = 3.0;
const THICK_PX: f64 = 5.0;

/// An immutable property value as returned by a style provider.
///
/// A missing value is represented by the keyword `auto`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CssValue {
    raw: String,
}

impl CssValue {
    /// The `auto` keyword.
    #[must_use]
    pub fn auto() -> Self {
        Self::new("auto")
    }

    /// Wrap a raw value string, trimming surrounding whitespace.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.trim().to_string(),
        }
    }

    /// The raw string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// [§ 4.4 Automatic values](https://www.w3.org/TR/CSS2/cascade.html#value-def-auto)
    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.raw.eq_ignore_ascii_case("auto")
    }

    /// The `none` keyword (used by `max-width`/`max-height`).
    #[must_use]
    pub fn is_none(&self) -> bool {
        self.raw.eq_ignore_ascii_case("none")
    }

    /// Neither `auto` nor `none`.
    #[must_use]
    pub fn is_specified(&self) -> bool {
        !self.is_auto() && !self.is_none()
    }

    /// [§ 4.3 Percentages](https://www.w3.org/TR/css-values-3/#percentages)
    #[must_use]
    pub fn is_pct(&self) -> bool {
        self.raw.contains('%')
    }

    /// The value as a pixel length.
    ///
    /// `auto` (and `none`) read as 0. Lengths in `px` are parsed exactly.
    /// Border keywords map to their used widths. Any other unit is read as its
    /// leading number and reported, since relative units are not resolved.
    #[must_use]
    pub fn px(&self) -> f64 {
        if !self.is_specified() {
            return 0.0;
        }
        match self.raw.to_ascii_lowercase().as_str() {
            "thin" => return THIN_PX,
            "medium" => return MEDIUM_BORDER_PX,
            "thick" => return THICK_PX,
            _ => {}
        }
        let (number, unit) = split_number(&self.raw);
        let Some(number) = number else {
            warn_once("Style", &format!("not a length: '{}'", self.raw));
            return 0.0;
        };
        if !(unit.is_empty() || unit.eq_ignore_ascii_case("px")) {
            warn_once(
                "Style",
                &format!("unit '{unit}' read as px in '{}'", self.raw),
            );
        }
        number
    }

    /// A number (with or without a unit) or one of the border width keywords.
    #[must_use]
    pub fn is_length(&self) -> bool {
        matches!(
            self.raw.to_ascii_lowercase().as_str(),
            "thin" | "medium" | "thick"
        ) || (split_number(&self.raw).0.is_some() && !self.is_pct())
    }

    /// The leading number of a percentage value (`"50%"` is 50).
    #[must_use]
    pub fn pct(&self) -> f64 {
        split_number(&self.raw).0.unwrap_or(0.0)
    }
}

impl Default for CssValue {
    fn default() -> Self {
        Self::auto()
    }
}

impl fmt::Display for CssValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Split a value into its longest numeric prefix and the remaining unit.
fn split_number(raw: &str) -> (Option<f64>, &str) {
    let bytes = raw.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while let Some(&b) = bytes.get(end) {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return (None, raw);
    }
    (raw[..end].parse().ok(), raw[end..].trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_reads_as_zero() {
        let v = CssValue::auto();
        assert!(v.is_auto());
        assert!(!v.is_specified());
        assert!((v.px() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_px_lengths() {
        assert!((CssValue::new("12px").px() - 12.0).abs() < f64::EPSILON);
        assert!((CssValue::new(" -4.5px ").px() + 4.5).abs() < f64::EPSILON);
        assert!((CssValue::new("0").px() - 0.0).abs() < f64::EPSILON);
        assert!((CssValue::new("thick").px() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_other_units_read_leading_number() {
        assert!((CssValue::new("2em").px() - 2.0).abs() < f64::EPSILON);
        assert!((CssValue::new("solid").px() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_percentages() {
        let v = CssValue::new("50%");
        assert!(v.is_pct());
        assert!((v.pct() - 50.0).abs() < f64::EPSILON);
        assert!(!CssValue::new("50px").is_pct());
    }

    #[test]
    fn test_none_is_unspecified() {
        let v = CssValue::new("none");
        assert!(v.is_none());
        assert!(!v.is_auto());
        assert!(!v.is_specified());
    }
}

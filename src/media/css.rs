//! Reading pixel constraints from a rendering target's computed style.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// CSS property holding an exact fixed height.
pub const HEIGHT_PROPERTY: &str = "height";
/// CSS property holding the maximum height.
pub const MAX_HEIGHT_PROPERTY: &str = "max-height";
/// CSS property holding the maximum width.
pub const MAX_WIDTH_PROPERTY: &str = "max-width";

const MISSING_CONSTRAINTS_HINT: &str = "Invalid value set for height/max-height and/or max-width \
for the attachment element, this can cause scrolling issues inside the message list";

/// Source of computed CSS values for an element the attachment renders into.
pub trait ComputedStyle {
    /// Computed value of `name`, or the empty string when it is not set.
    fn property_value(&self, name: &str) -> String;
}

impl<T: ComputedStyle + ?Sized> ComputedStyle for &T {
    fn property_value(&self, name: &str) -> String {
        (**self).property_value(name)
    }
}

impl ComputedStyle for HashMap<String, String> {
    fn property_value(&self, name: &str) -> String {
        self.get(name).cloned().unwrap_or_default()
    }
}

/// A set of CSS declarations keyed by lower-cased property name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleDeclarations(BTreeMap<String, String>);

impl StyleDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an inline declaration block such as
    /// `"max-height: 100px; max-width: 100px"`.
    ///
    /// Later declarations override earlier ones. Declarations without a
    /// colon or with an empty property name are skipped, and a trailing
    /// `!important` is dropped.
    pub fn parse(block: &str) -> Self {
        let mut declarations = Self::new();
        for declaration in block.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = value.trim();
            let value = value
                .strip_suffix("!important")
                .map(str::trim_end)
                .unwrap_or(value);
            declarations.set(name, value);
        }
        declarations
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.0
            .insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ComputedStyle for StyleDeclarations {
    fn property_value(&self, name: &str) -> String {
        self.0
            .get(&name.to_ascii_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

/// Pixel constraints read from a computed style.
///
/// Each field is `None` unless the property was expressed in `px` with a
/// numeric value. `Some(0.0)` is kept distinct from `None`, but a zero value
/// never counts as a usable constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CssSizeRestrictions {
    pub height: Option<f64>,
    pub max_height: Option<f64>,
    pub max_width: Option<f64>,
}

impl CssSizeRestrictions {
    /// The fixed `height`, if set and non-zero.
    pub fn fixed_height(&self) -> Option<f64> {
        non_zero(self.height)
    }

    /// `max-height` if set and non-zero, else the fixed `height`.
    pub fn height_bound(&self) -> Option<f64> {
        non_zero(self.max_height).or_else(|| self.fixed_height())
    }

    /// `max-width`, if set and non-zero.
    pub fn width_bound(&self) -> Option<f64> {
        non_zero(self.max_width)
    }

    /// Whether `(height OR max-height) AND max-width` is satisfied.
    pub fn is_constrained(&self) -> bool {
        self.height_bound().is_some() && self.width_bound().is_some()
    }
}

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

/// Read `height`, `max-height` and `max-width` from `style`.
///
/// Logs a warning when the element is not constrained enough for resizing
/// and `warn_on_missing` is set.
pub fn read_css_size_restrictions(
    style: &dyn ComputedStyle,
    warn_on_missing: bool,
) -> CssSizeRestrictions {
    let restrictions = CssSizeRestrictions {
        height: parse_px_value(&style.property_value(HEIGHT_PROPERTY)),
        max_height: parse_px_value(&style.property_value(MAX_HEIGHT_PROPERTY)),
        max_width: parse_px_value(&style.property_value(MAX_WIDTH_PROPERTY)),
    };

    if warn_on_missing && !restrictions.is_constrained() {
        warn!(
            height = ?restrictions.height,
            max_height = ?restrictions.max_height,
            max_width = ?restrictions.max_width,
            "{}",
            MISSING_CONSTRAINTS_HINT
        );
    }

    restrictions
}

/// Parse a CSS value expressed in pixels.
///
/// Anything not ending in `px` (percentages, `auto`, `em`, unitless numbers)
/// and anything without a leading number yields `None`.
pub fn parse_px_value(value: &str) -> Option<f64> {
    let value = value.trim();
    if !value.ends_with("px") {
        return None;
    }
    leading_float(value).filter(|n| n.is_finite())
}

/// Parse the longest numeric prefix of `input`, ignoring leading whitespace.
fn leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits + frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

//! Resize dimension calculation.

use serde::{Deserialize, Serialize};
use url::Url;

use super::{ORIGINAL_HEIGHT_PARAM, ORIGINAL_WIDTH_PARAM};

/// Dimension value standing in for "unknown".
pub const UNKNOWN_DIMENSION: f64 = 1.0;

/// How the two candidate sizes are combined for each resized dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResizeAggregate {
    /// Larger of the container bound and the aspect-scaled size. Can exceed
    /// the container; kept so existing resize URLs stay byte-identical.
    #[default]
    Max,
    /// Smaller of the two, so the requested asset fits within the bounds.
    Min,
}

impl ResizeAggregate {
    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            ResizeAggregate::Max => a.max(b),
            ResizeAggregate::Min => a.min(b),
        }
    }
}

impl std::str::FromStr for ResizeAggregate {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "max" => Ok(Self::Max),
            "min" => Ok(Self::Min),
            _ => Err(format!("invalid resize aggregate: {s}")),
        }
    }
}

/// Original asset size as advertised by the `oh`/`ow` query parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginalDimensions {
    pub height: f64,
    pub width: f64,
}

impl Default for OriginalDimensions {
    fn default() -> Self {
        Self {
            height: UNKNOWN_DIMENSION,
            width: UNKNOWN_DIMENSION,
        }
    }
}

impl OriginalDimensions {
    /// Read `oh` and `ow` from `url`. Missing, non-numeric and non-positive
    /// values fall back to [`UNKNOWN_DIMENSION`].
    pub fn from_url(url: &Url) -> Self {
        let mut height = None;
        let mut width = None;
        for (key, value) in url.query_pairs() {
            if height.is_none() && key == ORIGINAL_HEIGHT_PARAM {
                height = Some(parse_dimension(&value));
            } else if width.is_none() && key == ORIGINAL_WIDTH_PARAM {
                width = Some(parse_dimension(&value));
            }
        }
        Self {
            height: height.unwrap_or(UNKNOWN_DIMENSION),
            width: width.unwrap_or(UNKNOWN_DIMENSION),
        }
    }

    /// Both dimensions carry real metadata rather than the sentinel.
    pub fn is_known(&self) -> bool {
        self.height > UNKNOWN_DIMENSION && self.width > UNKNOWN_DIMENSION
    }

    /// Whether the original already fits inside `max_height` x `max_width`.
    pub fn fits_within(&self, max_height: f64, max_width: f64) -> bool {
        self.height <= max_height && self.width <= max_width
    }
}

fn parse_dimension(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => n,
        _ => UNKNOWN_DIMENSION,
    }
}

/// Target pixel size of a resized asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeDimensions {
    pub height: u32,
    pub width: u32,
}

impl ResizeDimensions {
    /// Multiply both dimensions by `factor` for high-density displays.
    pub fn scaled(self, factor: u32) -> Self {
        Self {
            height: self.height.saturating_mul(factor),
            width: self.width.saturating_mul(factor),
        }
    }
}

/// Compute the resize dimensions for an asset rendered into a container
/// bounded by `max_height` x `max_width`.
///
/// Note the width candidate scales by `max_width / original.height`; this
/// matches the URLs the image service has always been asked for.
pub fn resize_dimensions(
    original: OriginalDimensions,
    max_height: f64,
    max_width: f64,
    aggregate: ResizeAggregate,
) -> ResizeDimensions {
    let scaled_height = (max_width / original.width) * original.height;
    let scaled_width = (max_width / original.height) * original.width;
    ResizeDimensions {
        height: round_px(aggregate.apply(max_height, scaled_height)),
        width: round_px(aggregate.apply(max_height, scaled_width)),
    }
}

/// Display height when only `max-height` is known.
///
/// Unknown originals take the full `max_height`; originals that already fit
/// keep their own height; everything else shrinks to the smaller of
/// `max_height` and the width-scaled height. This branch always uses `min`,
/// whatever aggregate the resize URL uses.
pub fn max_height_only_display_height(
    original: OriginalDimensions,
    max_height: f64,
    max_width: f64,
) -> f64 {
    if !original.is_known() {
        return max_height;
    }
    if original.fits_within(max_height, max_width) {
        return original.height;
    }
    let scaled = (max_width / original.width) * original.height;
    round_half_up(max_height.min(scaled))
}

fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to whole pixels, clamping into `u32`.
fn round_px(value: f64) -> u32 {
    let rounded = round_half_up(value);
    if rounded.is_nan() || rounded <= 0.0 {
        0
    } else if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dims(height: f64, width: f64) -> OriginalDimensions {
        OriginalDimensions { height, width }
    }

    #[test]
    fn original_dimensions_from_query() {
        let url = Url::parse("https://cdn.example.com/a.jpg?oh=200&ow=100").unwrap();
        assert_eq!(OriginalDimensions::from_url(&url), dims(200.0, 100.0));
    }

    #[test]
    fn original_dimensions_default_to_sentinel() {
        let url = Url::parse("https://cdn.example.com/a.jpg?oh=abc&ow=").unwrap();
        assert_eq!(OriginalDimensions::from_url(&url), OriginalDimensions::default());

        let url = Url::parse("https://cdn.example.com/a.jpg?oh=0&ow=-3").unwrap();
        assert!(!OriginalDimensions::from_url(&url).is_known());
    }

    #[test]
    fn first_query_value_wins() {
        let url = Url::parse("https://cdn.example.com/a.jpg?oh=30&oh=90&ow=40").unwrap();
        assert_eq!(OriginalDimensions::from_url(&url), dims(30.0, 40.0));
    }

    #[test]
    fn max_aggregate_keeps_observed_values() {
        let result = resize_dimensions(dims(200.0, 100.0), 100.0, 100.0, ResizeAggregate::Max);
        assert_eq!(result, ResizeDimensions { height: 200, width: 100 });
    }

    #[test]
    fn min_aggregate_fits_bounds() {
        let result = resize_dimensions(dims(200.0, 100.0), 100.0, 100.0, ResizeAggregate::Min);
        assert_eq!(result, ResizeDimensions { height: 100, width: 50 });
    }

    #[test]
    fn unknown_original_uses_bounds() {
        let result = resize_dimensions(OriginalDimensions::default(), 300.0, 250.0, ResizeAggregate::Max);
        assert_eq!(result, ResizeDimensions { height: 300, width: 300 });
    }

    #[test]
    fn results_round_half_up() {
        // 100 / 3 * 2 = 66.67 -> 67; 100 / 2 * 3 = 150
        let result = resize_dimensions(dims(2.0, 3.0), 10.0, 100.0, ResizeAggregate::Max);
        assert_eq!(result, ResizeDimensions { height: 67, width: 150 });
        assert_eq!(round_px(2.5), 3);
        assert_eq!(round_px(-7.0), 0);
    }

    #[test]
    fn degenerate_bounds_clamp_to_zero() {
        let result = resize_dimensions(dims(10.0, 10.0), -50.0, -50.0, ResizeAggregate::Min);
        assert_eq!(result, ResizeDimensions { height: 0, width: 0 });
        let result = resize_dimensions(dims(10.0, 10.0), f64::NAN, 20.0, ResizeAggregate::Max);
        assert_eq!(result, ResizeDimensions { height: 20, width: 20 });
    }

    #[test]
    fn scaled_doubles_both() {
        let doubled = ResizeDimensions { height: 200, width: 100 }.scaled(2);
        assert_eq!(doubled, ResizeDimensions { height: 400, width: 200 });
        let saturated = ResizeDimensions { height: u32::MAX, width: 1 }.scaled(2);
        assert_eq!(saturated.height, u32::MAX);
    }

    #[test]
    fn max_height_only_keeps_fitting_original() {
        assert_eq!(max_height_only_display_height(dims(40.0, 40.0), 50.0, 100.0), 40.0);
    }

    #[test]
    fn max_height_only_shrinks_oversized_original() {
        assert_eq!(max_height_only_display_height(dims(200.0, 100.0), 100.0, 100.0), 100.0);
        // 100 / 400 * 300 = 75
        assert_eq!(max_height_only_display_height(dims(300.0, 400.0), 100.0, 100.0), 75.0);
    }

    #[test]
    fn max_height_only_unknown_original_takes_bound() {
        assert_eq!(
            max_height_only_display_height(OriginalDimensions::default(), 120.0, 100.0),
            120.0
        );
    }

    #[test]
    fn aggregate_parses_from_str() {
        assert_eq!("MIN".parse::<ResizeAggregate>(), Ok(ResizeAggregate::Min));
        assert_eq!("max".parse::<ResizeAggregate>(), Ok(ResizeAggregate::Max));
        assert!("avg".parse::<ResizeAggregate>().is_err());
    }

    proptest::proptest! {
        #[test]
        fn max_aggregate_never_requests_below_height_bound(
            oh in 1.0f64..10_000.0,
            ow in 1.0f64..10_000.0,
            max_height in 1.0f64..5_000.0,
            max_width in 1.0f64..5_000.0,
        ) {
            let result = resize_dimensions(dims(oh, ow), max_height, max_width, ResizeAggregate::Max);
            let bound = round_px(max_height);
            proptest::prop_assert!(result.height >= bound);
            proptest::prop_assert!(result.width >= bound);
        }

        #[test]
        fn min_aggregate_never_requests_above_height_bound(
            oh in 1.0f64..10_000.0,
            ow in 1.0f64..10_000.0,
            max_height in 1.0f64..5_000.0,
            max_width in 1.0f64..5_000.0,
        ) {
            let result = resize_dimensions(dims(oh, ow), max_height, max_width, ResizeAggregate::Min);
            let bound = round_px(max_height);
            proptest::prop_assert!(result.height <= bound);
            proptest::prop_assert!(result.width <= bound);
        }

        #[test]
        fn scaling_doubles_exactly(height in 0u32..1_000_000, width in 0u32..1_000_000) {
            let doubled = ResizeDimensions { height, width }.scaled(2);
            proptest::prop_assert_eq!(doubled, ResizeDimensions { height: height * 2, width: width * 2 });
        }

        #[test]
        fn display_height_never_exceeds_max_height(
            oh in 1.0f64..10_000.0,
            ow in 1.0f64..10_000.0,
            max_height in 1.0f64..5_000.0,
            max_width in 1.0f64..5_000.0,
        ) {
            let height = max_height_only_display_height(dims(oh, ow), max_height, max_width);
            proptest::prop_assert!(height <= max_height.max(round_half_up(max_height)));
        }
    }
}


pub mod css;
pub mod resize;
pub mod url_params;

pub use css::{
    parse_px_value, read_css_size_restrictions, ComputedStyle, CssSizeRestrictions,
    StyleDeclarations,
};
pub use resize::{resize_dimensions, OriginalDimensions, ResizeAggregate, ResizeDimensions};
pub use url_params::add_resizing_params;

use crate::config::{MediaConfig, MAX_RETINA_SCALE, MIN_RETINA_SCALE};

/// Query parameter carrying the original asset height.
pub const ORIGINAL_HEIGHT_PARAM: &str = "oh";

/// Query parameter carrying the original asset width.
pub const ORIGINAL_WIDTH_PARAM: &str = "ow";

/// Query parameter requesting a resized height.
pub const RESIZE_HEIGHT_PARAM: &str = "h";

/// Query parameter requesting a resized width.
pub const RESIZE_WIDTH_PARAM: &str = "w";

/// Default pixel density multiplier applied to resize requests.
pub const DEFAULT_RETINA_SCALE: u32 = 2;

/// Options controlling how attachments are sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizingOptions {
    pub aggregate: ResizeAggregate,
    pub retina_scale: u32,
    pub warn_on_missing_constraints: bool,
}

impl Default for SizingOptions {
    fn default() -> Self {
        Self {
            aggregate: ResizeAggregate::default(),
            retina_scale: DEFAULT_RETINA_SCALE,
            warn_on_missing_constraints: true,
        }
    }
}

/// Resolve sizing options from config, falling back to defaults.
pub fn resolve_options(config: Option<&MediaConfig>) -> SizingOptions {
    match config {
        Some(media) => SizingOptions {
            aggregate: media.resize_aggregate,
            retina_scale: media.retina_scale.clamp(MIN_RETINA_SCALE, MAX_RETINA_SCALE),
            warn_on_missing_constraints: media.warn_on_missing_constraints,
        },
        None => SizingOptions::default(),
    }
}

/// Format a pixel count as a CSS length, dropping a zero fraction.
pub fn format_px(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}px", value as i64)
    } else {
        format!("{value}px")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_RETINA_SCALE, 2);
        assert_eq!(ORIGINAL_HEIGHT_PARAM, "oh");
        assert_eq!(ORIGINAL_WIDTH_PARAM, "ow");
    }

    #[test]
    fn test_resolve_options_with_config() {
        let media = MediaConfig {
            resize_aggregate: ResizeAggregate::Min,
            retina_scale: 3,
            warn_on_missing_constraints: false,
        };
        let options = resolve_options(Some(&media));
        assert_eq!(options.aggregate, ResizeAggregate::Min);
        assert_eq!(options.retina_scale, 3);
        assert!(!options.warn_on_missing_constraints);
    }

    #[test]
    fn test_resolve_options_clamps_retina_scale() {
        let mut media = MediaConfig {
            retina_scale: 0,
            ..MediaConfig::default()
        };
        assert_eq!(resolve_options(Some(&media)).retina_scale, MIN_RETINA_SCALE);
        media.retina_scale = 9;
        assert_eq!(resolve_options(Some(&media)).retina_scale, MAX_RETINA_SCALE);
    }

    #[test]
    fn test_resolve_options_without_config() {
        assert_eq!(resolve_options(None), SizingOptions::default());
    }

    #[test]
    fn test_format_px() {
        assert_eq!(format_px(100.0), "100px");
        assert_eq!(format_px(100.5), "100.5px");
        assert_eq!(format_px(0.0), "0px");
    }
}

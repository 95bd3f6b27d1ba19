//! Resolves display height and resize URL for image and video attachments.

use tracing::debug;
use url::Url;

use super::{Attachment, AttachmentKind, ResolvedAttachmentConfig};
use crate::error::SizingError;
use crate::media::css::read_css_size_restrictions;
use crate::media::resize::{max_height_only_display_height, resize_dimensions};
use crate::media::{
    add_resizing_params, format_px, ComputedStyle, OriginalDimensions, ResizeDimensions,
    SizingOptions,
};

/// Sizing restrictions computed for a single source URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizingRestrictions {
    /// CSS height to reserve, or empty.
    pub height: String,
    /// Dimensions to request, before density scaling. `None` when the
    /// element is not constrained enough to resize.
    pub resize: Option<ResizeDimensions>,
}

/// Computes attachment configurations with a fixed set of options.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttachmentSizer {
    options: SizingOptions,
}

impl AttachmentSizer {
    pub fn new(options: SizingOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SizingOptions {
        &self.options
    }

    /// Size an image attachment rendered into `element`.
    ///
    /// Fails when the attachment has no image source or the source is not a
    /// valid absolute URL.
    pub fn image_configuration(
        &self,
        attachment: &Attachment,
        element: &dyn ComputedStyle,
    ) -> Result<ResolvedAttachmentConfig, SizingError> {
        let source = attachment
            .image_source()
            .ok_or(SizingError::MissingSourceUrl)?;
        let mut url = parse_source(source)?;
        let height = self.apply_sizing(&mut url, element);

        Ok(ResolvedAttachmentConfig {
            height,
            url: url.into(),
            thumb_url: None,
        })
    }

    /// Size a video attachment rendered into `element`.
    ///
    /// With a thumbnail URL and `should_generate_thumbnail`, the thumbnail
    /// goes through the image pipeline. Otherwise the height comes straight
    /// from the element's CSS and no thumbnail is returned.
    pub fn video_configuration(
        &self,
        attachment: &Attachment,
        element: &dyn ComputedStyle,
        should_generate_thumbnail: bool,
    ) -> Result<ResolvedAttachmentConfig, SizingError> {
        let asset_url = attachment.asset().unwrap_or_default().to_string();

        match attachment.thumbnail() {
            Some(thumb) if should_generate_thumbnail => {
                let mut thumb_url = parse_source(thumb)?;
                let height = self.apply_sizing(&mut thumb_url, element);
                Ok(ResolvedAttachmentConfig {
                    height,
                    url: asset_url,
                    thumb_url: Some(thumb_url.into()),
                })
            }
            _ => {
                let restrictions =
                    read_css_size_restrictions(element, self.options.warn_on_missing_constraints);
                Ok(ResolvedAttachmentConfig {
                    height: restrictions.height_bound().map(format_px).unwrap_or_default(),
                    url: asset_url,
                    thumb_url: None,
                })
            }
        }
    }

    /// Size any attachment, dispatching on its type.
    ///
    /// Attachments that are neither images nor videos are passed through
    /// with their asset (or image) URL and no height.
    pub fn configuration(
        &self,
        attachment: &Attachment,
        element: &dyn ComputedStyle,
        should_generate_thumbnail: bool,
    ) -> Result<ResolvedAttachmentConfig, SizingError> {
        match attachment.attachment_kind() {
            AttachmentKind::Image => self.image_configuration(attachment, element),
            AttachmentKind::Video => {
                self.video_configuration(attachment, element, should_generate_thumbnail)
            }
            AttachmentKind::Other => Ok(ResolvedAttachmentConfig {
                height: String::new(),
                url: attachment
                    .asset()
                    .or_else(|| attachment.image_source())
                    .unwrap_or_default()
                    .to_string(),
                thumb_url: None,
            }),
        }
    }

    /// Compute the height and resize request for `url` inside `element`.
    pub fn sizing_restrictions(&self, url: &Url, element: &dyn ComputedStyle) -> SizingRestrictions {
        let original = OriginalDimensions::from_url(url);
        let css = read_css_size_restrictions(element, self.options.warn_on_missing_constraints);

        let (Some(max_height), Some(max_width)) = (css.height_bound(), css.width_bound()) else {
            return SizingRestrictions {
                height: String::new(),
                resize: None,
            };
        };

        let resize = resize_dimensions(original, max_height, max_width, self.options.aggregate);
        let height = match css.fixed_height() {
            Some(fixed) => format_px(fixed),
            None => format_px(max_height_only_display_height(original, max_height, max_width)),
        };

        SizingRestrictions {
            height,
            resize: Some(resize),
        }
    }

    /// Rewrite `url` in place with density-scaled resize parameters and
    /// return the CSS height.
    fn apply_sizing(&self, url: &mut Url, element: &dyn ComputedStyle) -> String {
        let restrictions = self.sizing_restrictions(url, element);
        if let Some(resize) = restrictions.resize {
            let scaled = resize.scaled(self.options.retina_scale);
            debug!(
                height = scaled.height,
                width = scaled.width,
                "requesting resized attachment"
            );
            add_resizing_params(&scaled, url);
        }
        restrictions.height
    }
}

fn parse_source(source: &str) -> Result<Url, SizingError> {
    Url::parse(source).map_err(|e| SizingError::invalid_url(source, e))
}

mod resolver;

pub use resolver::*;

use serde::{Deserialize, Serialize};

use crate::error::SizingError;
use crate::media::ComputedStyle;

/// An attachment record as delivered by the chat backend.
///
/// Only the fields that drive sizing are modelled; unknown fields are
/// ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Attachment type, e.g. "image", "video", "file".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl Attachment {
    /// Canonical image source: `img_url`, then `image_url`, then `thumb_url`.
    /// Empty strings are skipped.
    pub fn image_source(&self) -> Option<&str> {
        [&self.img_url, &self.image_url, &self.thumb_url]
            .into_iter()
            .find_map(|field| non_empty(field.as_deref()))
    }

    /// Thumbnail URL, if present and non-empty.
    pub fn thumbnail(&self) -> Option<&str> {
        non_empty(self.thumb_url.as_deref())
    }

    /// Asset URL, if present and non-empty.
    pub fn asset(&self) -> Option<&str> {
        non_empty(self.asset_url.as_deref())
    }

    pub fn attachment_kind(&self) -> AttachmentKind {
        AttachmentKind::from_type(self.kind.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Media category an attachment is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Video,
    Other,
}

impl AttachmentKind {
    pub fn from_type(kind: Option<&str>) -> Self {
        match kind.map(str::trim) {
            Some(k) if k.eq_ignore_ascii_case("image") => AttachmentKind::Image,
            Some(k) if k.eq_ignore_ascii_case("video") => AttachmentKind::Video,
            _ => AttachmentKind::Other,
        }
    }
}

/// Sizing result handed to the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAttachmentConfig {
    /// CSS height to reserve (e.g. `"100px"`), or empty when unknown.
    pub height: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
}

/// Size an image attachment with default options.
pub fn get_image_attachment_configuration(
    attachment: &Attachment,
    element: &dyn ComputedStyle,
) -> Result<ResolvedAttachmentConfig, SizingError> {
    AttachmentSizer::default().image_configuration(attachment, element)
}

/// Size a video attachment with default options.
pub fn get_video_attachment_configuration(
    attachment: &Attachment,
    element: &dyn ComputedStyle,
    should_generate_thumbnail: bool,
) -> Result<ResolvedAttachmentConfig, SizingError> {
    AttachmentSizer::default().video_configuration(attachment, element, should_generate_thumbnail)
}

//! Display sizing for chat image and video attachments.
//!
//! Given an attachment record and the computed style of the element it will
//! be rendered into, the resolver computes the CSS height to reserve and
//! rewrites the asset URL so the image service returns a resized copy.

pub mod attachment;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod media;

pub use attachment::{
    get_image_attachment_configuration, get_video_attachment_configuration, Attachment,
    AttachmentKind, AttachmentSizer, ResolvedAttachmentConfig,
};
pub use error::SizingError;
pub use media::{ComputedStyle, ResizeAggregate, SizingOptions, StyleDeclarations};

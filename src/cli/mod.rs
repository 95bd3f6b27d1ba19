use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::Path;

use crate::attachment::Attachment;
use crate::media::StyleDeclarations;

#[derive(Parser)]
#[command(
    name = "attachment-sizing",
    version,
    about = "Resolve display sizing and resize URLs for chat attachments"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Size an image attachment.
    Image(ImageOpts),
    /// Size a video attachment.
    Video(VideoOpts),
    /// Size an attachment record read from a JSON file.
    Resolve(ResolveOpts),
    Config(ConfigOpts),
    Version,
}

#[derive(clap::Args)]
pub struct StyleArgs {
    /// Inline CSS declarations of the target element,
    /// e.g. "max-height: 300px; max-width: 300px".
    #[arg(short, long, default_value = "")]
    pub style: String,
}

impl StyleArgs {
    pub fn declarations(&self) -> StyleDeclarations {
        StyleDeclarations::parse(&self.style)
    }
}

#[derive(clap::Args)]
pub struct ImageOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    #[arg(long)]
    pub img_url: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub thumb_url: Option<String>,
    #[command(flatten)]
    pub style: StyleArgs,
}

impl ImageOpts {
    pub fn attachment(&self) -> Attachment {
        Attachment {
            kind: Some("image".to_string()),
            img_url: self.img_url.clone(),
            image_url: self.image_url.clone(),
            thumb_url: self.thumb_url.clone(),
            ..Default::default()
        }
    }
}

#[derive(clap::Args)]
pub struct VideoOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    #[arg(long)]
    pub asset_url: Option<String>,
    #[arg(long)]
    pub thumb_url: Option<String>,
    /// Size the thumbnail through the image pipeline.
    #[arg(short = 'g', long)]
    pub generate_thumbnail: bool,
    #[command(flatten)]
    pub style: StyleArgs,
}

impl VideoOpts {
    pub fn attachment(&self) -> Attachment {
        Attachment {
            kind: Some("video".to_string()),
            asset_url: self.asset_url.clone(),
            thumb_url: self.thumb_url.clone(),
            ..Default::default()
        }
    }
}

#[derive(clap::Args)]
pub struct ResolveOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    /// Path to a JSON attachment record.
    pub attachment: String,
    #[arg(short = 'g', long)]
    pub generate_thumbnail: bool,
    #[command(flatten)]
    pub style: StyleArgs,
}

#[derive(clap::Args)]
pub struct ConfigOpts {
    #[arg(short, long)]
    pub config: Option<String>,
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    Show,
    Validate,
    Init,
}

/// Read an attachment record from a JSON (or JSON5) file.
pub fn read_attachment_file(path: &Path) -> Result<Attachment> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read attachment file '{}'", path.display()))?;
    let attachment = json5::from_str(&content)
        .with_context(|| format!("Invalid attachment record in '{}'", path.display()))?;
    Ok(attachment)
}

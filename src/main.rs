use attachment_sizing::cli::{read_attachment_file, Cli, Commands, ConfigAction};
use attachment_sizing::config::{validate_config_object, Config, LoggingLevel};
use attachment_sizing::logging::{self, LogHandle};
use attachment_sizing::{AttachmentSizer, ResolvedAttachmentConfig};
use clap::Parser;
use std::path::Path;
use tracing::info;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let log = logging::init(LoggingLevel::default());

    let cli = Cli::parse();

    match cli.command {
        Commands::Image(opts) => {
            let sizer = load_sizer(opts.config.as_deref(), &log)?;
            let resolved =
                sizer.image_configuration(&opts.attachment(), &opts.style.declarations())?;
            print_resolved(&resolved)?;
        }
        Commands::Video(opts) => {
            let sizer = load_sizer(opts.config.as_deref(), &log)?;
            let resolved = sizer.video_configuration(
                &opts.attachment(),
                &opts.style.declarations(),
                opts.generate_thumbnail,
            )?;
            print_resolved(&resolved)?;
        }
        Commands::Resolve(opts) => {
            let sizer = load_sizer(opts.config.as_deref(), &log)?;
            let attachment = read_attachment_file(Path::new(&opts.attachment))?;
            let resolved = sizer.configuration(
                &attachment,
                &opts.style.declarations(),
                opts.generate_thumbnail,
            )?;
            print_resolved(&resolved)?;
        }
        Commands::Config(opts) => match opts.action {
            ConfigAction::Show => {
                let config = load_config(opts.config.as_deref(), &log)?;
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            ConfigAction::Validate => {
                let config = load_config(opts.config.as_deref(), &log)?;
                validate_config_object(&config)?;
                info!("Configuration is valid");
            }
            ConfigAction::Init => {
                Config::write_default(opts.config.as_deref().unwrap_or("attachment-sizing.json"))?;
                info!("Configuration file created");
            }
        },
        Commands::Version => {
            println!("attachment-sizing {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn load_config(path: Option<&str>, log: &LogHandle) -> anyhow::Result<Config> {
    let config = Config::load(path)?;
    log.set_level(config.logging.level);
    Ok(config)
}

fn load_sizer(path: Option<&str>, log: &LogHandle) -> anyhow::Result<AttachmentSizer> {
    let config = load_config(path, log)?;
    validate_config_object(&config)?;
    Ok(AttachmentSizer::new(config.sizing_options()))
}

fn print_resolved(resolved: &ResolvedAttachmentConfig) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(resolved)?);
    Ok(())
}

// video-source: inspect how URLs resolve to providers, embeds and previews

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use video_modal_lib::config::PageConfig;
use video_modal_lib::sources::{build_embed, classify, preview_url_for, resolve};

#[derive(Parser)]
#[command(name = "video-source")]
#[command(about = "Resolve video URLs the way the playback modal does")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Page configuration (JSON) used as playback defaults
    #[arg(long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify URLs into provider and id
    Classify {
        urls: Vec<String>,
    },
    /// Build the modal embed for a video
    Embed {
        url: String,
        /// Explicit provider (data-video-type)
        #[arg(long, default_value = "")]
        kind: String,
        /// Explicit id (data-video-id)
        #[arg(long, default_value = "")]
        id: String,
        /// Container format for self-hosted files
        #[arg(long, default_value = "")]
        format: String,
    },
    /// Hover preview URL for each video
    Preview {
        urls: Vec<String>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("video_modal_lib=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(json) => PageConfig::from_json(json)?,
        None => PageConfig::default(),
    };

    match cli.command {
        Commands::Classify { urls } => {
            for url in urls {
                let source = classify(&url);
                info!(kind = %source.kind, id = %source.id, "classified");
                println!("{}", serde_json::to_string(&source)?);
            }
        }
        Commands::Embed { url, kind, id, format } => {
            let source = resolve(&kind, &id, &url, &format).or_local_fallback();
            let output = match build_embed(&source, &config.defaults) {
                Ok(target) => json!({ "source": source, "embed": target }),
                Err(e) => json!({ "source": source, "error": e.user_message() }),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Preview { urls } => {
            for url in urls {
                let source = classify(&url);
                let preview = preview_url_for(&source);
                println!("{}", json!({ "url": url, "preview": preview }));
            }
        }
    }

    Ok(())
}

use std::path::PathBuf;

use alistore_kernel::settings::Settings;
use anyhow::Context;
use clap::{Parser, Subcommand};

/// AliStore command-line interface
#[derive(Debug, Parser)]
#[command(name = "alistore-cli", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server until SIGINT/SIGTERM
    Serve {
        /// Override the configured listen port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the merged OpenAPI document as JSON
    Openapi {
        /// Pretty-print the document
        #[arg(long)]
        pretty: bool,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load AliStore settings")?;

    match cli.command {
        Command::Serve { port } => {
            alistore_telemetry::init(&settings.telemetry)?;
            if let Some(port) = port {
                settings.server.port = port;
            }
            tracing::info!(env = ?settings.environment, "alistore-cli serving");
            alistore_app::run(&settings).await
        }
        Command::Openapi { pretty, output } => {
            let (_, openapi) = alistore_app::app(&settings)?;
            let rendered = if pretty {
                serde_json::to_string_pretty(&openapi)
            } else {
                serde_json::to_string(&openapi)
            }
            .context("failed to render OpenAPI document")?;

            match output {
                Some(path) => std::fs::write(&path, rendered)
                    .with_context(|| format!("failed to write {}", path.display())),
                None => {
                    println!("{rendered}");
                    Ok(())
                }
            }
        }
    }
}

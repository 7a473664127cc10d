use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use fontvault::api::{AppState, router};
use fontvault::catalog::{FileFontRepository, FontRepository, InMemoryFontRepository};
use fontvault::storage::{FileImageStore, ImageStore, InMemoryImageStore, cleanup_orphans};
use fontvault::{GateConfig, PinVerifier, SessionTokenCodec, VaultConfig};

#[derive(Parser)]
#[command(name = "fontvault")]
#[command(about = "PIN-gated typeface catalog server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Delete stored images that no font references
    CleanupStorage {
        /// Only report what would be deleted
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fontvault=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = VaultConfig::from_env()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => match &config.data_dir {
            Some(dir) => {
                let fonts = FileFontRepository::open(dir.join("fonts")).await?;
                let images = FileImageStore::open(dir.join("images")).await?;
                serve(&config, fonts, images).await
            }
            None => {
                log::warn!(
                    target: "fontvault::server",
                    "msg=\"DATA_DIR not set, catalog is kept in memory and lost on exit\""
                );
                serve(&config, InMemoryFontRepository::new(), InMemoryImageStore::default()).await
            }
        },
        Command::CleanupStorage { dry_run } => {
            let dir = config
                .data_dir
                .as_ref()
                .context("DATA_DIR must be set to clean up stored images")?;
            let fonts = FileFontRepository::open(dir.join("fonts")).await?;
            let images = FileImageStore::open(dir.join("images")).await?;

            let report = cleanup_orphans(&fonts, &images, dry_run).await?;
            for name in &report.orphans {
                println!("{}{name}", if dry_run { "would delete " } else { "deleted " });
            }
            println!(
                "{} referenced, {} stored, {} orphaned",
                report.referenced,
                report.stored,
                report.orphans.len()
            );
            Ok(())
        }
    }
}

async fn serve<F, I>(config: &VaultConfig, fonts: F, images: I) -> Result<()>
where
    F: FontRepository + Clone + 'static,
    I: ImageStore + Clone + 'static,
{
    let codec = SessionTokenCodec::new(config.token_config()?);
    let state = AppState::new(
        PinVerifier::new(config.admin_pin.clone()),
        codec,
        config.cookie_config(),
        fonts,
        images,
    );
    let app = router(state, GateConfig::default(), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    log::info!(
        target: "fontvault::server",
        "msg=\"listening\" addr=\"{}\" environment=\"{:?}\"",
        config.bind_addr,
        config.environment
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!(target: "fontvault::server", "msg=\"server stopped\"");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!(target: "fontvault::server", "msg=\"failed to listen for ctrl-c\" error=\"{e}\"");
    }
}

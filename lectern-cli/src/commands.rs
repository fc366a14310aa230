//! CLI command handling.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Subcommand;
use lectern_core::config::{LecternConfig, ServerConfig, StorageConfig};
use lectern_core::manifest::LibraryManifest;
use lectern_core::storage::FsBlobStore;
use lectern_core::tracing_setup::{LogLevel, init_tracing};
use lectern_web::auth::StaticTokenAuth;
use lectern_web::server::{AppState, ServeStats, run_server};
use tracing::info;

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Serve course media over HTTP
    Serve {
        /// Library manifest with courses, grants, and auth tokens
        #[arg(short, long, default_value = "library.json")]
        manifest: PathBuf,

        /// Directory holding media blobs, addressed by storage key
        #[arg(short, long, default_value = "content")]
        content_dir: PathBuf,

        /// Address and port to listen on
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        listen: SocketAddr,

        /// Console log level
        #[arg(long, value_enum, default_value_t = LogLevel::Info)]
        log_level: LogLevel,

        /// Directory for full-debug log files
        #[arg(long)]
        log_dir: Option<PathBuf>,
    },
}

pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve {
            manifest,
            content_dir,
            listen,
            log_level,
            log_dir,
        } => {
            init_tracing(log_level.as_tracing_level(), log_dir.as_deref())
                .context("failed to initialize tracing")?;

            let library = LibraryManifest::from_path(&manifest)
                .with_context(|| format!("failed to load manifest {}", manifest.display()))?;

            let config = LecternConfig {
                server: ServerConfig { listen },
                storage: StorageConfig {
                    content_root: content_dir,
                },
            };

            let catalog = library.build_catalog();
            let entitlements = library.build_entitlements();
            info!(
                courses = library.courses.len(),
                assets = catalog.asset_count(),
                grants = entitlements.grant_count(),
                content_root = %config.storage.content_root.display(),
                "library loaded"
            );

            let state = AppState {
                auth: Arc::new(StaticTokenAuth::new(library.build_token_map())),
                catalog: Arc::new(catalog),
                entitlements: Arc::new(entitlements),
                blobs: Arc::new(FsBlobStore::new(&config.storage.content_root)),
                stats: Arc::new(ServeStats::new()),
            };

            run_server(&config.server, state)
                .await
                .context("media server exited with an error")
        }
    }
}

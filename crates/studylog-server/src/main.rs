//! studylog server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! configured store, and serves the JSON API over HTTP.
//!
//! ```toml
//! host       = "127.0.0.1"
//! port       = 5232
//! store_path = "~/.local/share/studylog/study.db"  # omit for in-memory
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use studylog_core::{memory::MemoryStore, store::StudyStore};
use studylog_server::ServerConfig;
use studylog_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "studylog API server")]
struct Cli {
  /// TOML settings file; missing is fine, defaults and env still apply.
  #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("STUDYLOG"))
    .build()
    .context("loading server settings")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("invalid server settings")?;

  let address = server_cfg.address();

  match &server_cfg.store_path {
    Some(path) => {
      let store_path = expand_tilde(path);
      let store = SqliteStore::open(&store_path)
        .await
        .with_context(|| format!("opening study database {}", store_path.display()))?;
      tracing::info!(path = %store_path.display(), "using sqlite store");
      serve(store, &address).await
    }
    None => {
      tracing::warn!("no store_path configured; data will be lost on exit");
      serve(MemoryStore::new(), &address).await
    }
  }
}

async fn serve<S>(store: S, address: &str) -> anyhow::Result<()>
where
  S: StudyStore + 'static,
{
  let app = studylog_server::router(Arc::new(store));

  tracing::info!(%address, "studylog API listening");
  let listener = TcpListener::bind(address)
    .await
    .with_context(|| format!("binding {address}"))?;

  axum::serve(listener, app).await.context("serving HTTP")?;

  Ok(())
}

/// `~/db.sqlite` → `$HOME/db.sqlite`; other paths pass through.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

//! Engagement leaderboard server
//!
//! Architecture:
//! - `scoring`: pure point rules, leaderboard aggregation, streak and
//!   champion calculators
//! - SeaORM for database access (SQLite), one service per aggregate in `sv`
//! - Axum for the HTTP API with rate limiting
//! - Tokio for async runtime

mod entity;
mod error;
mod plugins;
mod prelude;
mod scoring;
mod state;
mod sv;

use std::sync::Arc;

use tracing_subscriber::{
  EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::{
  plugins::{App, server},
  prelude::*,
  state::{AppState, Config},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  dotenvy::dotenv().ok();

  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
      "leaderboard=debug,tower_http=debug,sea_orm=warn".into()
    }))
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = Config::from_env()?;
  if config.admin_token.is_empty() {
    warn!("ADMIN_TOKEN not set, admin routes are disabled");
  }

  info!("Starting Leaderboard Server v{}", env!("CARGO_PKG_VERSION"));

  let app = Arc::new(AppState::new(config).await?);
  info!("{} players registered", app.sv().player.count().await?);
  let handles = App::new().register(server::Plugin).run(app);

  tokio::signal::ctrl_c().await.context("Failed to listen for ctrl-c")?;
  info!("Shutting down...");
  for handle in handles {
    handle.abort();
  }

  Ok(())
}

mod handlers;

use std::{net::SocketAddr, sync::Arc};

use async_trait::async_trait;
use axum::{
  Router,
  routing::{get, patch, post},
};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

use crate::{prelude::*, state::AppState};

pub struct Plugin;

/// Every API route, without rate limiting so it can be driven in tests.
pub fn routes() -> Router<Arc<AppState>> {
  Router::new()
    .route("/health", get(handlers::health))
    .route("/api/cycles", get(handlers::cycles).post(handlers::create_cycle))
    .route("/api/cycles/active", get(handlers::active_cycle))
    .route("/api/cycles/{id}/activate", post(handlers::activate_cycle))
    .route("/api/players", get(handlers::players).post(handlers::sign_up))
    .route("/api/players/{id}", patch(handlers::update_player))
    .route("/api/players/{id}/attendance", get(handlers::attendance_history))
    .route("/api/attendance", post(handlers::check_in))
    .route("/api/attendance/bulk", post(handlers::bulk_attendance))
    .route("/api/courses", post(handlers::add_course))
    .route("/api/courses/{id}/verify", post(handlers::verify_course))
    .route("/api/books", get(handlers::books).post(handlers::add_book))
    .route("/api/readings", post(handlers::add_reading))
    .route("/api/readings/{id}/verify", post(handlers::verify_reading))
    .route("/api/blogs", post(handlers::submit_blog))
    .route("/api/presentations", post(handlers::record_presentation))
    .route("/api/activities", post(handlers::create_activity))
    .route("/api/activities/{id}/participants", post(handlers::participate))
    .route("/api/ideas", post(handlers::submit_idea))
    .route("/api/ideas/{id}/verify", post(handlers::verify_idea))
    .route("/api/penalties", post(handlers::issue_penalty))
    .route("/api/leaderboard", get(handlers::leaderboard))
    .route("/api/leaderboard/{player_id}", get(handlers::player_standing))
    .route("/api/bonuses/streaks", get(handlers::streak_suggestions))
    .route("/api/bonuses/streaks/apply", post(handlers::apply_streaks))
    .route("/api/bonuses/champion", get(handlers::champion_suggestion))
    .route("/api/bonuses/champion/apply", post(handlers::apply_champion))
}

#[async_trait]
impl super::Plugin for Plugin {
  async fn start(&self, app: Arc<AppState>) -> anyhow::Result<()> {
    // 100 requests burst, refilled at 2 per second per IP
    let governor_conf = Arc::new(
      GovernorConfigBuilder::default()
        .per_second(2)
        .burst_size(100)
        .finish()
        .context("Failed to build rate limiter config")?,
    );

    let limiter = governor_conf.limiter().clone();
    let port = app.config.port;

    let router = routes()
      .layer(
        ServiceBuilder::new()
          .layer(TraceLayer::new_for_http())
          .layer(GovernorLayer::new(governor_conf))
          .layer(
            CorsLayer::new()
              .allow_origin(Any)
              .allow_methods(Any)
              .allow_headers(Any),
          ),
      )
      .with_state(app)
      .into_make_service_with_connect_info::<SocketAddr>();

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
      .await
      .with_context(|| format!("Failed to bind {addr}"))?;
    info!("HTTP Server listening on {addr}");

    let limiter = async {
      loop {
        tokio::time::sleep(Duration::from_secs(60)).await;
        limiter.retain_recent();
      }
    };

    let server = async {
      axum::serve(listener, router).await.context("Axum server error")
    };

    tokio::select! {
      result = server => {
        match &result {
          Ok(_) => info!("Server stopped gracefully"),
          Err(err) => error!("Server stopped with error: {err}"),
        }
        result
      }
      _ = limiter => {
        error!("Rate limiter cleaner stopped unexpectedly!");
        Ok(())
      }
    }
  }
}

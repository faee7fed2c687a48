use std::sync::Arc;

use axum::{
  Json,
  extract::{FromRequestParts, Path, State},
  http::request::Parts,
};
use serde::Deserialize;

use crate::{
  entity::{
    activity, attendance, blog, bonus, book, course, cycle, idea,
    participation, penalty, player, presentation, reading,
  },
  prelude::*,
  scoring::{ChampionBonus, LeaderboardEntry, StreakBonus},
  state::AppState,
  sv::{
    activity::NewParticipation, attendance::BulkEntry, learning::NewCourse,
    player::PlayerUpdate, presentation::Presenter,
  },
};

pub const ADMIN_HEADER: &str = "x-admin-token";

/// Guard for admin-only routes.
pub struct Admin;

impl FromRequestParts<Arc<AppState>> for Admin {
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    app: &Arc<AppState>,
  ) -> std::result::Result<Self, Self::Rejection> {
    let expected = app.config.admin_token.as_str();
    let given = parts.headers.get(ADMIN_HEADER).and_then(|v| v.to_str().ok());

    match given {
      Some(token) if !expected.is_empty() && token == expected => Ok(Admin),
      _ => {
        warn!("Rejected admin request to {}", parts.uri.path());
        Err(Error::Forbidden)
      }
    }
  }
}

pub async fn health() -> &'static str {
  "OK"
}

#[derive(Debug, Deserialize)]
pub struct CreateCycleReq {
  pub name: String,
  pub starts_on: NaiveDate,
  pub ends_on: NaiveDate,
}

pub async fn cycles(
  State(app): State<Arc<AppState>>,
) -> Result<Json<Vec<cycle::Model>>> {
  Ok(Json(app.sv().cycle.all().await?))
}

pub async fn active_cycle(
  State(app): State<Arc<AppState>>,
) -> Result<Json<cycle::Model>> {
  Ok(Json(app.sv().cycle.active_or_err().await?))
}

pub async fn create_cycle(
  State(app): State<Arc<AppState>>,
  _: Admin,
  Json(req): Json<CreateCycleReq>,
) -> Result<Json<cycle::Model>> {
  let cycle =
    app.sv().cycle.create(req.name, req.starts_on, req.ends_on).await?;
  Ok(Json(cycle))
}

pub async fn activate_cycle(
  State(app): State<Arc<AppState>>,
  _: Admin,
  Path(id): Path<i32>,
) -> Result<Json<cycle::Model>> {
  Ok(Json(app.sv().cycle.activate(id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SignUpReq {
  pub name: String,
  pub email: String,
  #[serde(default)]
  pub remote: bool,
}

pub async fn players(
  State(app): State<Arc<AppState>>,
) -> Result<Json<Vec<player::Model>>> {
  Ok(Json(app.sv().player.all().await?))
}

pub async fn sign_up(
  State(app): State<Arc<AppState>>,
  Json(req): Json<SignUpReq>,
) -> Result<Json<player::Model>> {
  let player = app.sv().player.create(req.name, req.email, req.remote).await?;
  Ok(Json(player))
}

pub async fn update_player(
  State(app): State<Arc<AppState>>,
  _: Admin,
  Path(id): Path<i32>,
  Json(update): Json<PlayerUpdate>,
) -> Result<Json<player::Model>> {
  Ok(Json(app.sv().player.update(id, update).await?))
}

#[derive(Debug, Deserialize)]
pub struct CheckInReq {
  pub player_id: i32,
}

/// Self check-in for today, office time.
pub async fn check_in(
  State(app): State<Arc<AppState>>,
  Json(req): Json<CheckInReq>,
) -> Result<Json<attendance::Model>> {
  let now = app.config.local_now();
  let early_bird = app.config.is_early_bird(now);

  let record =
    app.sv().attendance.check_in(req.player_id, now.date(), early_bird).await?;
  Ok(Json(record))
}

#[derive(Debug, Deserialize)]
pub struct BulkAttendanceReq {
  pub date: NaiveDate,
  pub entries: Vec<BulkEntry>,
}

pub async fn bulk_attendance(
  State(app): State<Arc<AppState>>,
  _: Admin,
  Json(req): Json<BulkAttendanceReq>,
) -> Result<Json<Vec<attendance::Model>>> {
  Ok(Json(app.sv().attendance.bulk(req.date, req.entries).await?))
}

pub async fn attendance_history(
  State(app): State<Arc<AppState>>,
  Path(id): Path<i32>,
) -> Result<Json<Vec<attendance::Model>>> {
  app.sv().player.get(id).await?;
  Ok(Json(app.sv().attendance.history(id).await?))
}

pub async fn add_course(
  State(app): State<Arc<AppState>>,
  Json(req): Json<NewCourse>,
) -> Result<Json<course::Model>> {
  Ok(Json(app.sv().learning.add_course(req).await?))
}

pub async fn verify_course(
  State(app): State<Arc<AppState>>,
  _: Admin,
  Path(id): Path<i32>,
) -> Result<Json<course::Model>> {
  Ok(Json(app.sv().learning.verify_course(id).await?))
}

#[derive(Debug, Deserialize)]
pub struct AddBookReq {
  pub title: String,
  pub points_per_10_pages: i32,
}

pub async fn books(
  State(app): State<Arc<AppState>>,
) -> Result<Json<Vec<book::Model>>> {
  Ok(Json(app.sv().learning.books().await?))
}

pub async fn add_book(
  State(app): State<Arc<AppState>>,
  _: Admin,
  Json(req): Json<AddBookReq>,
) -> Result<Json<book::Model>> {
  let book =
    app.sv().learning.add_book(req.title, req.points_per_10_pages).await?;
  Ok(Json(book))
}

#[derive(Debug, Deserialize)]
pub struct AddReadingReq {
  pub player_id: i32,
  pub book_id: i32,
  pub pages_read: i32,
}

pub async fn add_reading(
  State(app): State<Arc<AppState>>,
  Json(req): Json<AddReadingReq>,
) -> Result<Json<reading::Model>> {
  let reading = app
    .sv()
    .learning
    .add_reading(req.player_id, req.book_id, req.pages_read)
    .await?;
  Ok(Json(reading))
}

pub async fn verify_reading(
  State(app): State<Arc<AppState>>,
  _: Admin,
  Path(id): Path<i32>,
) -> Result<Json<reading::Model>> {
  Ok(Json(app.sv().learning.verify_reading(id).await?))
}

#[derive(Debug, Deserialize)]
pub struct SubmitBlogReq {
  pub player_id: i32,
  pub url: String,
}

pub async fn submit_blog(
  State(app): State<Arc<AppState>>,
  Json(req): Json<SubmitBlogReq>,
) -> Result<Json<blog::Model>> {
  Ok(Json(app.sv().blog.submit(req.player_id, req.url).await?))
}

#[derive(Debug, Deserialize)]
pub struct PresentationReq {
  pub title: String,
  pub presenters: Vec<Presenter>,
}

pub async fn record_presentation(
  State(app): State<Arc<AppState>>,
  _: Admin,
  Json(req): Json<PresentationReq>,
) -> Result<Json<Vec<presentation::Model>>> {
  let rows = app.sv().presentation.record(req.title, req.presenters).await?;
  Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct CreateActivityReq {
  pub name: String,
  pub held_on: NaiveDate,
}

pub async fn create_activity(
  State(app): State<Arc<AppState>>,
  _: Admin,
  Json(req): Json<CreateActivityReq>,
) -> Result<Json<activity::Model>> {
  Ok(Json(app.sv().activity.create(req.name, req.held_on).await?))
}

pub async fn participate(
  State(app): State<Arc<AppState>>,
  _: Admin,
  Path(id): Path<i32>,
  Json(req): Json<NewParticipation>,
) -> Result<Json<participation::Model>> {
  Ok(Json(app.sv().activity.participate(id, req).await?))
}

#[derive(Debug, Deserialize)]
pub struct SubmitIdeaReq {
  pub player_id: i32,
  pub title: String,
  pub points: i32,
}

#[derive(Debug, Default, Deserialize)]
pub struct VerifyIdeaReq {
  #[serde(default)]
  pub points: Option<i32>,
}

pub async fn submit_idea(
  State(app): State<Arc<AppState>>,
  Json(req): Json<SubmitIdeaReq>,
) -> Result<Json<idea::Model>> {
  let idea = app.sv().idea.submit(req.player_id, req.title, req.points).await?;
  Ok(Json(idea))
}

pub async fn verify_idea(
  State(app): State<Arc<AppState>>,
  _: Admin,
  Path(id): Path<i32>,
  Json(req): Json<VerifyIdeaReq>,
) -> Result<Json<idea::Model>> {
  Ok(Json(app.sv().idea.verify(id, req.points).await?))
}

#[derive(Debug, Deserialize)]
pub struct PenaltyReq {
  pub player_id: i32,
  pub points: i32,
  pub reason: String,
}

pub async fn issue_penalty(
  State(app): State<Arc<AppState>>,
  _: Admin,
  Json(req): Json<PenaltyReq>,
) -> Result<Json<penalty::Model>> {
  let penalty =
    app.sv().penalty.issue(req.player_id, req.points, req.reason).await?;
  Ok(Json(penalty))
}

pub async fn leaderboard(
  State(app): State<Arc<AppState>>,
) -> Result<Json<Vec<LeaderboardEntry>>> {
  Ok(Json(app.sv().leaderboard.current().await?))
}

pub async fn player_standing(
  State(app): State<Arc<AppState>>,
  Path(player_id): Path<i32>,
) -> Result<Json<LeaderboardEntry>> {
  Ok(Json(app.sv().leaderboard.for_player(player_id).await?))
}

pub async fn streak_suggestions(
  State(app): State<Arc<AppState>>,
  _: Admin,
) -> Result<Json<Vec<StreakBonus>>> {
  Ok(Json(app.sv().bonus.streak_suggestions().await?))
}

pub async fn apply_streaks(
  State(app): State<Arc<AppState>>,
  _: Admin,
) -> Result<Json<Vec<bonus::Model>>> {
  Ok(Json(app.sv().bonus.apply_streaks().await?))
}

pub async fn champion_suggestion(
  State(app): State<Arc<AppState>>,
  _: Admin,
) -> Result<Json<Option<ChampionBonus>>> {
  Ok(Json(app.sv().bonus.champion_suggestion().await?))
}

pub async fn apply_champion(
  State(app): State<Arc<AppState>>,
  _: Admin,
) -> Result<Json<Option<bonus::Model>>> {
  Ok(Json(app.sv().bonus.apply_champion().await?))
}

#[cfg(test)]
mod tests {
  use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
  };
  use tower::ServiceExt;

  use super::*;
  use crate::{plugins::server::routes, state::Config, sv::testing::*};

  const TOKEN: &str = "let-me-in";

  async fn app() -> Router {
    let db = setup_test_db().await;
    let config =
      Config { admin_token: TOKEN.to_string(), ..Config::default() };
    routes().with_state(Arc::new(AppState::with_db(db, config)))
  }

  fn post(uri: &str, token: Option<&str>, body: json::Value) -> Request<Body> {
    let mut req = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
      req = req.header(ADMIN_HEADER, token);
    }
    req.body(Body::from(body.to_string())).unwrap()
  }

  async fn body_json(res: axum::response::Response) -> json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    json::from_slice(&bytes).unwrap()
  }

  #[tokio::test]
  async fn test_health() {
    let res = app()
      .await
      .oneshot(Request::get("/health").body(Body::empty()).unwrap())
      .await
      .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
  }

  #[tokio::test]
  async fn test_leaderboard_empty_without_cycle() {
    let res = app()
      .await
      .oneshot(Request::get("/api/leaderboard").body(Body::empty()).unwrap())
      .await
      .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await, json::json!([]));
  }

  #[tokio::test]
  async fn test_admin_routes_need_token() {
    let router = app().await;
    let body = json::json!({
      "name": "H1 2026",
      "starts_on": "2026-01-01",
      "ends_on": "2026-06-30"
    });

    let res = router
      .clone()
      .oneshot(post("/api/cycles", None, body.clone()))
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = router
      .clone()
      .oneshot(post("/api/cycles", Some("nope"), body.clone()))
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res =
      router.oneshot(post("/api/cycles", Some(TOKEN), body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(body_json(res).await["name"], "H1 2026");
  }

  #[tokio::test]
  async fn test_conflict_maps_to_409() {
    let router = app().await;
    let body = json::json!({ "name": "Alice", "email": "alice@example.com" });

    let res = router
      .clone()
      .oneshot(post("/api/players", None, body.clone()))
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = router.oneshot(post("/api/players", None, body)).await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let body = body_json(res).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Email is already registered");
  }

  #[tokio::test]
  async fn test_standing_without_cycle() {
    let router = app().await;
    router
      .clone()
      .oneshot(post(
        "/api/players",
        None,
        json::json!({ "name": "Alice", "email": "alice@example.com" }),
      ))
      .await
      .unwrap();

    let res = router
      .oneshot(Request::get("/api/leaderboard/1").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
  }
}

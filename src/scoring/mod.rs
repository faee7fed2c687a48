//! Scoring core - pure point rules, leaderboard aggregation and bonus
//! calculators.
//!
//! Nothing in here touches the database: services fetch rows for the active
//! cycle, convert them into the plain records below and call in.

pub mod champion;
pub mod leaderboard;
pub mod points;
pub mod streak;

use chrono::NaiveDate;
use serde::Serialize;

pub use champion::{ChampionBonus, compute_champion};
pub use leaderboard::{LeaderboardEntry, compute_leaderboard};
pub use points::PresentationOrder;
pub use streak::{StreakBonus, compute_streaks};

pub type PlayerId = i32;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
  pub id: PlayerId,
  pub name: String,
  pub remote: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Attendance {
  pub player_id: PlayerId,
  pub date: NaiveDate,
  pub is_early_bird: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Participation {
  pub player_id: PlayerId,
  pub is_top_performer: bool,
  pub double_points_used: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
  pub player_id: PlayerId,
  pub hours: f64,
  pub completion_percent: i32,
  pub verified: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
  pub player_id: PlayerId,
  pub pages_read: i32,
  pub points_per_10_pages: i32,
  pub verified: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Blog {
  pub player_id: PlayerId,
  pub is_first: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
  pub player_id: PlayerId,
  /// Tabulated at insert time, see [`points::presentation_points`].
  pub points: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Idea {
  pub player_id: PlayerId,
  pub points: i64,
  pub verified: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Penalty {
  pub player_id: PlayerId,
  pub points: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bonus {
  pub player_id: PlayerId,
  pub points: i64,
}

/// Every record of a single cycle, as fetched by the caller.
#[derive(Debug, Clone, Default)]
pub struct Records {
  pub attendance: Vec<Attendance>,
  pub participations: Vec<Participation>,
  pub courses: Vec<Course>,
  pub readings: Vec<Reading>,
  pub blogs: Vec<Blog>,
  pub presentations: Vec<Presentation>,
  pub ideas: Vec<Idea>,
  pub penalties: Vec<Penalty>,
  pub bonuses: Vec<Bonus>,
}

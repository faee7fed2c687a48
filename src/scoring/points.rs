//! Per-record point rules.
//!
//! Inputs are clamped rather than rejected: data entry validates, these
//! functions only have to stay total.

use serde::{Deserialize, Serialize};

pub const ATTENDANCE_POINTS: i64 = 1;
pub const EARLY_BIRD_POINTS: i64 = 1;
pub const REMOTE_MULTIPLIER: i64 = 2;

pub const ACTIVITY_POINTS: i64 = 10;
pub const TOP_PERFORMER_POINTS: i64 = 20;
pub const DOUBLE_POINTS_MULTIPLIER: i64 = 2;

/// Courses below this completion earn nothing.
pub const COURSE_MIN_COMPLETION: i32 = 60;
pub const COURSE_POINTS_PER_HOUR: i64 = 4;
/// Longest course that still scores; anything above counts as this much.
pub const COURSE_MAX_HOURS: f64 = 10_000.0;

pub const FIRST_BLOG_POINTS: i64 = 30;
pub const BLOG_POINTS: i64 = 20;

pub const IDEA_MIN_POINTS: i64 = 5;
pub const IDEA_MAX_POINTS: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationOrder {
  First,
  Second,
}

impl PresentationOrder {
  pub fn as_i32(self) -> i32 {
    match self {
      Self::First => 1,
      Self::Second => 2,
    }
  }
}

impl TryFrom<i32> for PresentationOrder {
  type Error = i32;

  fn try_from(value: i32) -> Result<Self, Self::Error> {
    match value {
      1 => Ok(Self::First),
      2 => Ok(Self::Second),
      other => Err(other),
    }
  }
}

pub fn attendance_points(is_early_bird: bool, remote: bool) -> i64 {
  let base = ATTENDANCE_POINTS + if is_early_bird { EARLY_BIRD_POINTS } else { 0 };
  if remote { base * REMOTE_MULTIPLIER } else { base }
}

pub fn activity_points(is_top_performer: bool, double_points_used: bool) -> i64 {
  let base =
    ACTIVITY_POINTS + if is_top_performer { TOP_PERFORMER_POINTS } else { 0 };
  if double_points_used { base * DOUBLE_POINTS_MULTIPLIER } else { base }
}

/// `floor(hours * completion / 100 * 4)` once completion reaches 60%.
///
/// Hours are taken to two decimals so the floor is computed on integers and
/// never lands one below because of float error (e.g. `1.1 * 75`).
pub fn course_points(hours: f64, completion_percent: i32) -> i64 {
  let completion = completion_percent.clamp(0, 100);
  if completion < COURSE_MIN_COMPLETION || !hours.is_finite() || hours <= 0.0 {
    return 0;
  }

  let centi_hours = (hours.min(COURSE_MAX_HOURS) * 100.0).round() as i64;
  centi_hours * completion as i64 * COURSE_POINTS_PER_HOUR / 10_000
}

pub fn book_points(pages_read: i32, points_per_10_pages: i32) -> i64 {
  let pages = pages_read.max(0) as i64;
  (pages / 10) * points_per_10_pages.max(0) as i64
}

pub fn blog_points(is_first: bool) -> i64 {
  if is_first { FIRST_BLOG_POINTS } else { BLOG_POINTS }
}

pub fn presentation_points(is_solo: bool, order: PresentationOrder) -> i64 {
  match (is_solo, order) {
    (true, PresentationOrder::First) => 30,
    (true, PresentationOrder::Second) => 20,
    (false, PresentationOrder::First) => 20,
    (false, PresentationOrder::Second) => 15,
  }
}

use std::collections::HashMap;

use serde::Serialize;

use super::{PlayerId, Player, Records, points};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
  pub player_id: PlayerId,
  pub name: String,
  pub remote: bool,
  pub attendance: i64,
  pub activity: i64,
  pub course: i64,
  pub book: i64,
  pub blog: i64,
  pub presentation: i64,
  pub idea: i64,
  pub penalty: i64,
  pub bonus: i64,
  pub total_points: i64,
  /// 1-based position after sorting
  pub rank: usize,
  pub is_last_place: bool,
}

#[derive(Debug, Default)]
struct Tally {
  attendance: i64,
  activity: i64,
  course: i64,
  book: i64,
  blog: i64,
  presentation: i64,
  idea: i64,
  penalty: i64,
  bonus: i64,
}

impl Tally {
  fn total(&self) -> i64 {
    self.attendance
      + self.activity
      + self.course
      + self.book
      + self.blog
      + self.presentation
      + self.idea
      + self.penalty
      + self.bonus
  }
}

/// Sums every category per player and ranks players by total.
///
/// Ordering is total descending, then name, then id, so equal totals always
/// come out in the same order. Records of players missing from `players` are
/// skipped. Positive penalties are treated as zero.
pub fn compute_leaderboard(
  players: &[Player],
  records: &Records,
) -> Vec<LeaderboardEntry> {
  let mut tallies: HashMap<PlayerId, Tally> =
    players.iter().map(|p| (p.id, Tally::default())).collect();
  let remote: HashMap<PlayerId, bool> =
    players.iter().map(|p| (p.id, p.remote)).collect();

  for rec in &records.attendance {
    if let Some(tally) = tallies.get_mut(&rec.player_id) {
      let remote = remote.get(&rec.player_id).copied().unwrap_or(false);
      tally.attendance += points::attendance_points(rec.is_early_bird, remote);
    }
  }

  for rec in &records.participations {
    if let Some(tally) = tallies.get_mut(&rec.player_id) {
      tally.activity +=
        points::activity_points(rec.is_top_performer, rec.double_points_used);
    }
  }

  for rec in records.courses.iter().filter(|c| c.verified) {
    if let Some(tally) = tallies.get_mut(&rec.player_id) {
      tally.course += points::course_points(rec.hours, rec.completion_percent);
    }
  }

  for rec in records.readings.iter().filter(|r| r.verified) {
    if let Some(tally) = tallies.get_mut(&rec.player_id) {
      tally.book +=
        points::book_points(rec.pages_read, rec.points_per_10_pages);
    }
  }

  for rec in &records.blogs {
    if let Some(tally) = tallies.get_mut(&rec.player_id) {
      tally.blog += points::blog_points(rec.is_first);
    }
  }

  for rec in &records.presentations {
    if let Some(tally) = tallies.get_mut(&rec.player_id) {
      tally.presentation += rec.points;
    }
  }

  for rec in records.ideas.iter().filter(|i| i.verified) {
    if let Some(tally) = tallies.get_mut(&rec.player_id) {
      tally.idea += rec.points;
    }
  }

  for rec in &records.penalties {
    if let Some(tally) = tallies.get_mut(&rec.player_id) {
      tally.penalty += rec.points.min(0);
    }
  }

  for rec in &records.bonuses {
    if let Some(tally) = tallies.get_mut(&rec.player_id) {
      tally.bonus += rec.points;
    }
  }

  let mut entries: Vec<LeaderboardEntry> = players
    .iter()
    .map(|player| {
      let tally = tallies.remove(&player.id).unwrap_or_default();
      LeaderboardEntry {
        player_id: player.id,
        name: player.name.clone(),
        remote: player.remote,
        total_points: tally.total(),
        attendance: tally.attendance,
        activity: tally.activity,
        course: tally.course,
        book: tally.book,
        blog: tally.blog,
        presentation: tally.presentation,
        idea: tally.idea,
        penalty: tally.penalty,
        bonus: tally.bonus,
        rank: 0,
        is_last_place: false,
      }
    })
    .collect();

  entries.sort_by(|a, b| {
    b.total_points
      .cmp(&a.total_points)
      .then_with(|| a.name.cmp(&b.name))
      .then_with(|| a.player_id.cmp(&b.player_id))
  });

  let count = entries.len();
  for (idx, entry) in entries.iter_mut().enumerate() {
    entry.rank = idx + 1;
    entry.is_last_place = count > 1 && entry.rank == count;
  }

  entries
}

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::PlayerId;

/// Check-ins exactly this many days apart extend a streak.
pub const STREAK_GAP_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakBonus {
  pub player_id: PlayerId,
  pub max_run: u32,
  pub bonus_points: i64,
}

fn max_run(dates: &[NaiveDate]) -> u32 {
  let mut dates = dates.to_vec();
  dates.sort_unstable();
  dates.dedup();

  let mut current = 0;
  let mut best = 0;
  let mut prev: Option<NaiveDate> = None;

  for date in dates {
    current = match prev {
      Some(prev) if (date - prev).num_days() == STREAK_GAP_DAYS => current + 1,
      _ => 1,
    };
    best = best.max(current);
    prev = Some(date);
  }

  best
}

/// One bonus point for every two consecutive weekly check-ins in a player's
/// longest run. Players earning nothing are left out.
pub fn compute_streaks(
  attendance: &BTreeMap<PlayerId, Vec<NaiveDate>>,
) -> Vec<StreakBonus> {
  attendance
    .iter()
    .filter_map(|(&player_id, dates)| {
      let max_run = max_run(dates);
      let bonus_points = (max_run / 2) as i64;
      (bonus_points > 0).then_some(StreakBonus {
        player_id,
        max_run,
        bonus_points,
      })
    })
    .collect()
}

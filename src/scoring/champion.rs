use std::collections::BTreeMap;

use serde::Serialize;

use super::PlayerId;

pub const CHAMPION_BONUS_POINTS: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChampionBonus {
  pub player_id: PlayerId,
  pub attendance_count: u32,
  pub bonus_points: i64,
  /// Other players with the same count; the lowest id takes the bonus.
  pub tied_with: Vec<PlayerId>,
}

/// Highest attendance of the cycle, or `None` if nobody checked in.
pub fn compute_champion(
  counts: &BTreeMap<PlayerId, u32>,
) -> Option<ChampionBonus> {
  let best = counts.values().copied().max().filter(|&count| count > 0)?;

  let mut leaders =
    counts.iter().filter(|&(_, &count)| count == best).map(|(&id, _)| id);
  let player_id = leaders.next()?;

  Some(ChampionBonus {
    player_id,
    attendance_count: best,
    bonus_points: CHAMPION_BONUS_POINTS,
    tied_with: leaders.collect(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_champion_is_arg_max() {
    let counts = BTreeMap::from([(1, 5), (2, 8), (3, 3)]);

    assert_eq!(
      compute_champion(&counts),
      Some(ChampionBonus {
        player_id: 2,
        attendance_count: 8,
        bonus_points: 10,
        tied_with: vec![],
      })
    );
  }

  #[test]
  fn test_empty_has_no_champion() {
    assert_eq!(compute_champion(&BTreeMap::new()), None);
    assert_eq!(compute_champion(&BTreeMap::from([(1, 0), (2, 0)])), None);
  }

  #[test]
  fn test_tie_goes_to_lowest_id() {
    let counts = BTreeMap::from([(7, 4), (3, 4), (5, 1), (9, 4)]);
    let champion = compute_champion(&counts).unwrap();

    assert_eq!(champion.player_id, 3);
    assert_eq!(champion.tied_with, vec![7, 9]);
  }
}

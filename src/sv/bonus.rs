//! Streak and champion bonuses. Suggestions are computed on demand; an admin
//! applies them, which replaces whatever was applied before for the cycle.

use crate::{
  entity::{BonusKind, bonus},
  prelude::*,
  scoring::{self, ChampionBonus, StreakBonus},
  sv,
};

impl From<bonus::Model> for scoring::Bonus {
  fn from(model: bonus::Model) -> Self {
    Self { player_id: model.player_id, points: model.points as i64 }
  }
}

struct Award {
  player_id: i32,
  points: i64,
  reason: String,
}

pub struct Bonus<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Bonus<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn streak_suggestions(&self) -> Result<Vec<StreakBonus>> {
    let Some(cycle) = sv::Cycle::new(self.db).active().await? else {
      return Ok(Vec::new());
    };

    let dates = sv::Attendance::new(self.db).dates_by_player(cycle.id).await?;
    Ok(scoring::compute_streaks(&dates))
  }

  pub async fn champion_suggestion(&self) -> Result<Option<ChampionBonus>> {
    let Some(cycle) = sv::Cycle::new(self.db).active().await? else {
      return Ok(None);
    };

    let counts = sv::Attendance::new(self.db).counts_by_player(cycle.id).await?;
    Ok(scoring::compute_champion(&counts))
  }

  pub async fn apply_streaks(&self) -> Result<Vec<bonus::Model>> {
    let cycle = sv::Cycle::new(self.db).active_or_err().await?;
    let awards = self
      .streak_suggestions()
      .await?
      .into_iter()
      .map(|streak| Award {
        player_id: streak.player_id,
        points: streak.bonus_points,
        reason: format!("{} consecutive weeks", streak.max_run),
      })
      .collect();

    self.replace(cycle.id, BonusKind::Streak, awards).await
  }

  pub async fn apply_champion(&self) -> Result<Option<bonus::Model>> {
    let cycle = sv::Cycle::new(self.db).active_or_err().await?;
    let awards = self
      .champion_suggestion()
      .await?
      .into_iter()
      .map(|champion| Award {
        player_id: champion.player_id,
        points: champion.bonus_points,
        reason: format!(
          "Attendance champion with {} check-ins",
          champion.attendance_count
        ),
      })
      .collect();

    let applied = self.replace(cycle.id, BonusKind::Champion, awards).await?;
    Ok(applied.into_iter().next())
  }

  async fn replace(
    &self,
    cycle_id: i32,
    kind: BonusKind,
    awards: Vec<Award>,
  ) -> Result<Vec<bonus::Model>> {
    let txn = self.db.begin().await?;

    let removed = bonus::Entity::delete_many()
      .filter(bonus::Column::CycleId.eq(cycle_id))
      .filter(bonus::Column::Kind.eq(kind))
      .exec(&txn)
      .await?;

    let now = Utc::now().naive_utc();
    let mut applied = Vec::with_capacity(awards.len());
    for award in awards {
      let bonus = bonus::ActiveModel {
        id: NotSet,
        player_id: Set(award.player_id),
        cycle_id: Set(cycle_id),
        kind: Set(kind),
        points: Set(award.points as i32),
        reason: Set(award.reason),
        created_at: Set(now),
      }
      .insert(&txn)
      .await?;
      applied.push(bonus);
    }

    txn.commit().await?;
    info!(
      "Applied {} {kind:?} bonuses for cycle #{cycle_id} (replaced {})",
      applied.len(),
      removed.rows_affected
    );
    Ok(applied)
  }

  pub async fn by_cycle(&self, cycle_id: i32) -> Result<Vec<bonus::Model>> {
    let bonuses = bonus::Entity::find()
      .filter(bonus::Column::CycleId.eq(cycle_id))
      .all(self.db)
      .await?;
    Ok(bonuses)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::*;

  async fn weekly(db: &DatabaseConnection, player_id: i32, days: &[u32]) {
    let sv = sv::Attendance::new(db);
    for &d in days {
      sv.check_in(player_id, day(1, d), false).await.unwrap();
    }
  }

  #[tokio::test]
  async fn test_streak_suggestions() {
    let db = setup_test_db().await;
    seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let bob = seed_player(&db, "Bob", false).await;

    weekly(&db, alice.id, &[7, 14, 21]).await;
    weekly(&db, bob.id, &[7, 28]).await;

    let streaks = Bonus::new(&db).streak_suggestions().await.unwrap();
    assert_eq!(
      streaks,
      vec![StreakBonus { player_id: alice.id, max_run: 3, bonus_points: 1 }]
    );
  }

  #[tokio::test]
  async fn test_apply_streaks_is_idempotent() {
    let db = setup_test_db().await;
    let cycle = seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    weekly(&db, alice.id, &[7, 14, 21, 28]).await;
    let sv = Bonus::new(&db);

    sv.apply_streaks().await.unwrap();
    let applied = sv.apply_streaks().await.unwrap();

    assert_eq!(applied.len(), 1);
    assert_eq!(applied[0].points, 2);
    assert_eq!(sv.by_cycle(cycle.id).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_champion() {
    let db = setup_test_db().await;
    let cycle = seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let bob = seed_player(&db, "Bob", false).await;
    let sv = Bonus::new(&db);

    assert_eq!(sv.champion_suggestion().await.unwrap(), None);
    assert!(sv.apply_champion().await.unwrap().is_none());

    weekly(&db, alice.id, &[7]).await;
    weekly(&db, bob.id, &[7, 14]).await;

    let champion = sv.apply_champion().await.unwrap().unwrap();
    assert_eq!(champion.player_id, bob.id);
    assert_eq!(champion.points, 10);
    assert_eq!(champion.kind, BonusKind::Champion);
    assert_eq!(sv.by_cycle(cycle.id).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_no_active_cycle() {
    let db = setup_test_db().await;
    let sv = Bonus::new(&db);

    assert!(sv.streak_suggestions().await.unwrap().is_empty());
    assert!(matches!(sv.apply_streaks().await, Err(Error::NoActiveCycle)));
  }
}

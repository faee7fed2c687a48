use crate::{entity::penalty, prelude::*, scoring, sv};

impl From<penalty::Model> for scoring::Penalty {
  fn from(model: penalty::Model) -> Self {
    Self { player_id: model.player_id, points: model.points as i64 }
  }
}

pub struct Penalty<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Penalty<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn issue(
    &self,
    player_id: i32,
    points: i32,
    reason: String,
  ) -> Result<penalty::Model> {
    if points > 0 {
      return Err(Error::validation("penalty points must not be positive"));
    }
    let reason = reason.trim().to_string();
    if reason.is_empty() {
      return Err(Error::validation("penalty needs a reason"));
    }

    let cycle = sv::Cycle::new(self.db).active_or_err().await?;
    sv::Player::new(self.db).get(player_id).await?;

    let penalty = penalty::ActiveModel {
      id: NotSet,
      player_id: Set(player_id),
      cycle_id: Set(cycle.id),
      points: Set(points),
      reason: Set(reason),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(self.db)
    .await?;

    info!("Player #{player_id} penalized {points}: {}", penalty.reason);
    Ok(penalty)
  }

  pub async fn by_cycle(&self, cycle_id: i32) -> Result<Vec<penalty::Model>> {
    let penalties = penalty::Entity::find()
      .filter(penalty::Column::CycleId.eq(cycle_id))
      .all(self.db)
      .await?;
    Ok(penalties)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::*;

  #[tokio::test]
  async fn test_issue_penalty() {
    let db = setup_test_db().await;
    let cycle = seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let sv = Penalty::new(&db);

    sv.issue(alice.id, -5, "Missed demo".into()).await.unwrap();

    assert!(matches!(
      sv.issue(alice.id, 5, "Typo".into()).await,
      Err(Error::Validation(_))
    ));
    assert!(matches!(
      sv.issue(alice.id, -5, "   ".into()).await,
      Err(Error::Validation(_))
    ));
    assert_eq!(sv.by_cycle(cycle.id).await.unwrap().len(), 1);
  }
}

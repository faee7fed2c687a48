use serde::Deserialize;

use crate::{
  entity::{activity, participation},
  prelude::*,
  scoring, sv,
};

#[derive(Debug, Clone, Deserialize)]
pub struct NewParticipation {
  pub player_id: i32,
  #[serde(default)]
  pub is_top_performer: bool,
  #[serde(default)]
  pub double_points_used: bool,
}

impl From<participation::Model> for scoring::Participation {
  fn from(model: participation::Model) -> Self {
    Self {
      player_id: model.player_id,
      is_top_performer: model.is_top_performer,
      double_points_used: model.double_points_used,
    }
  }
}

pub struct Activity<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Activity<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(
    &self,
    name: String,
    held_on: NaiveDate,
  ) -> Result<activity::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
      return Err(Error::validation("activity name is empty"));
    }

    let cycle = sv::Cycle::new(self.db).active_or_err().await?;
    if !cycle.contains(held_on) {
      return Err(Error::validation(format!(
        "{held_on} is outside cycle `{}`",
        cycle.name
      )));
    }

    let activity = activity::ActiveModel {
      id: NotSet,
      cycle_id: Set(cycle.id),
      name: Set(name),
      held_on: Set(held_on),
    };

    Ok(activity.insert(self.db).await?)
  }

  pub async fn get(&self, id: i32) -> Result<activity::Model> {
    activity::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Activity"))
  }

  /// Double points can be spent once per player per cycle, and an activity
  /// has at most one top performer. Both are checked inside the insert
  /// transaction.
  pub async fn participate(
    &self,
    activity_id: i32,
    new: NewParticipation,
  ) -> Result<participation::Model> {
    let activity = self.get(activity_id).await?;
    sv::Player::new(self.db).get(new.player_id).await?;

    let txn = self.db.begin().await?;

    let joined = participation::Entity::find()
      .filter(participation::Column::ActivityId.eq(activity.id))
      .filter(participation::Column::PlayerId.eq(new.player_id))
      .one(&txn)
      .await?;
    if joined.is_some() {
      return Err(Conflict::Participation.into());
    }

    if new.is_top_performer {
      let top = participation::Entity::find()
        .filter(participation::Column::ActivityId.eq(activity.id))
        .filter(participation::Column::IsTopPerformer.eq(true))
        .one(&txn)
        .await?;
      if top.is_some() {
        return Err(Conflict::TopPerformer.into());
      }
    }

    if new.double_points_used {
      let used = participation::Entity::find()
        .filter(participation::Column::PlayerId.eq(new.player_id))
        .filter(participation::Column::CycleId.eq(activity.cycle_id))
        .filter(participation::Column::DoublePointsUsed.eq(true))
        .one(&txn)
        .await?;
      if used.is_some() {
        warn!(
          "Player #{} tried to use double points twice in cycle #{}",
          new.player_id, activity.cycle_id
        );
        return Err(Conflict::DoublePoints.into());
      }
    }

    let participation = participation::ActiveModel {
      id: NotSet,
      activity_id: Set(activity.id),
      player_id: Set(new.player_id),
      cycle_id: Set(activity.cycle_id),
      is_top_performer: Set(new.is_top_performer),
      double_points_used: Set(new.double_points_used),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!(
      "Player #{} joined activity `{}`",
      participation.player_id, activity.name
    );
    Ok(participation)
  }

  pub async fn participations(
    &self,
    cycle_id: i32,
  ) -> Result<Vec<participation::Model>> {
    let records = participation::Entity::find()
      .filter(participation::Column::CycleId.eq(cycle_id))
      .all(self.db)
      .await?;
    Ok(records)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::*;

  fn joining(player_id: i32, top: bool, double: bool) -> NewParticipation {
    NewParticipation {
      player_id,
      is_top_performer: top,
      double_points_used: double,
    }
  }

  #[tokio::test]
  async fn test_double_points_once_per_cycle() {
    let db = setup_test_db().await;
    seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let sv = Activity::new(&db);

    let quiz = sv.create("Quiz night".into(), day(2, 3)).await.unwrap();
    let hack = sv.create("Hackathon".into(), day(3, 10)).await.unwrap();

    sv.participate(quiz.id, joining(alice.id, false, true)).await.unwrap();
    let again = sv.participate(hack.id, joining(alice.id, false, true)).await;
    assert!(matches!(again, Err(Error::Conflict(Conflict::DoublePoints))));

    // joining without the multiplier is still fine
    sv.participate(hack.id, joining(alice.id, false, false)).await.unwrap();
  }

  #[tokio::test]
  async fn test_store_rejects_second_double_points_row() {
    let db = setup_test_db().await;
    let cycle = seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let sv = Activity::new(&db);
    let quiz = sv.create("Quiz night".into(), day(2, 3)).await.unwrap();
    let hack = sv.create("Hackathon".into(), day(3, 10)).await.unwrap();

    let row = |activity_id: i32, double: bool| participation::ActiveModel {
      id: NotSet,
      activity_id: Set(activity_id),
      player_id: Set(alice.id),
      cycle_id: Set(cycle.id),
      is_top_performer: Set(false),
      double_points_used: Set(double),
    };

    row(quiz.id, true).insert(&db).await.unwrap();
    let again = row(hack.id, true).insert(&db).await.map_err(Error::from);
    assert!(matches!(again, Err(Error::Conflict(Conflict::Duplicate))));

    // rows without the multiplier are not constrained
    row(hack.id, false).insert(&db).await.unwrap();
  }

  #[tokio::test]
  async fn test_join_once_and_single_top_performer() {
    let db = setup_test_db().await;
    let cycle = seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let bob = seed_player(&db, "Bob", false).await;
    let sv = Activity::new(&db);
    let quiz = sv.create("Quiz night".into(), day(2, 3)).await.unwrap();

    sv.participate(quiz.id, joining(alice.id, true, false)).await.unwrap();

    assert!(matches!(
      sv.participate(quiz.id, joining(alice.id, false, false)).await,
      Err(Error::Conflict(Conflict::Participation))
    ));
    assert!(matches!(
      sv.participate(quiz.id, joining(bob.id, true, false)).await,
      Err(Error::Conflict(Conflict::TopPerformer))
    ));

    assert_eq!(sv.participations(cycle.id).await.unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_activity_outside_cycle() {
    let db = setup_test_db().await;
    seed_cycle(&db).await;

    assert!(matches!(
      Activity::new(&db).create("Summer party".into(), day(8, 1)).await,
      Err(Error::Validation(_))
    ));
    assert!(matches!(
      Activity::new(&db).participate(42, joining(1, false, false)).await,
      Err(Error::NotFound("Activity"))
    ));
  }
}

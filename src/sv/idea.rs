use crate::{
  entity::idea,
  prelude::*,
  scoring::{
    self,
    points::{IDEA_MAX_POINTS, IDEA_MIN_POINTS},
  },
  sv,
};

impl From<idea::Model> for scoring::Idea {
  fn from(model: idea::Model) -> Self {
    Self {
      player_id: model.player_id,
      points: model.points as i64,
      verified: model.verified,
    }
  }
}

fn check_points(points: i32) -> Result<()> {
  if (IDEA_MIN_POINTS..=IDEA_MAX_POINTS).contains(&(points as i64)) {
    Ok(())
  } else {
    Err(Error::validation(format!(
      "idea points must be within {IDEA_MIN_POINTS}..={IDEA_MAX_POINTS}"
    )))
  }
}

pub struct Idea<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Idea<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn submit(
    &self,
    player_id: i32,
    title: String,
    points: i32,
  ) -> Result<idea::Model> {
    let title = title.trim().to_string();
    if title.is_empty() {
      return Err(Error::validation("idea title is empty"));
    }
    check_points(points)?;

    let cycle = sv::Cycle::new(self.db).active_or_err().await?;
    sv::Player::new(self.db).get(player_id).await?;

    let idea = idea::ActiveModel {
      id: NotSet,
      player_id: Set(player_id),
      cycle_id: Set(cycle.id),
      title: Set(title),
      points: Set(points),
      verified: Set(false),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(idea.insert(self.db).await?)
  }

  /// Marks the idea as counting; an admin may settle on different points.
  pub async fn verify(&self, id: i32, points: Option<i32>) -> Result<idea::Model> {
    if let Some(points) = points {
      check_points(points)?;
    }

    let idea = idea::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Idea"))?;
    let points = points.unwrap_or(idea.points);

    let idea =
      idea::ActiveModel { verified: Set(true), points: Set(points), ..idea.into() }
        .update(self.db)
        .await?;
    info!("Idea #{} verified at {} points", idea.id, idea.points);
    Ok(idea)
  }

  pub async fn by_cycle(&self, cycle_id: i32) -> Result<Vec<idea::Model>> {
    let ideas = idea::Entity::find()
      .filter(idea::Column::CycleId.eq(cycle_id))
      .all(self.db)
      .await?;
    Ok(ideas)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::*;

  #[tokio::test]
  async fn test_submit_and_verify() {
    let db = setup_test_db().await;
    seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let sv = Idea::new(&db);

    let idea =
      sv.submit(alice.id, "Shared lunch talks".into(), 10).await.unwrap();
    assert!(!idea.verified);

    let idea = sv.verify(idea.id, Some(25)).await.unwrap();
    assert!(idea.verified);
    assert_eq!(idea.points, 25);
  }

  #[tokio::test]
  async fn test_points_range() {
    let db = setup_test_db().await;
    seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let sv = Idea::new(&db);

    assert!(matches!(
      sv.submit(alice.id, "Tiny".into(), 4).await,
      Err(Error::Validation(_))
    ));
    let idea = sv.submit(alice.id, "Fine".into(), 5).await.unwrap();
    assert!(matches!(
      sv.verify(idea.id, Some(31)).await,
      Err(Error::Validation(_))
    ));
  }
}

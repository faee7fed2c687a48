use serde::Deserialize;

use crate::{
  entity::presentation,
  prelude::*,
  scoring::{self, PresentationOrder, points},
  sv,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Presenter {
  pub player_id: i32,
  pub order: PresentationOrder,
}

impl From<presentation::Model> for scoring::Presentation {
  fn from(model: presentation::Model) -> Self {
    Self { player_id: model.player_id, points: model.points as i64 }
  }
}

pub struct Presentation<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Presentation<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Records one row per presenter. A pair gets two rows, each pointing at
  /// the other presenter and scored by its own order.
  pub async fn record(
    &self,
    title: String,
    presenters: Vec<Presenter>,
  ) -> Result<Vec<presentation::Model>> {
    let title = title.trim().to_string();
    if title.is_empty() {
      return Err(Error::validation("presentation title is empty"));
    }
    let is_solo = match presenters.as_slice() {
      [_] => true,
      [a, b] if a.player_id != b.player_id => false,
      [_, _] => {
        return Err(Error::validation("co-presenter must be someone else"));
      }
      _ => return Err(Error::validation("expected one or two presenters")),
    };

    let cycle = sv::Cycle::new(self.db).active_or_err().await?;
    let players = sv::Player::new(self.db);
    for presenter in &presenters {
      players.get(presenter.player_id).await?;
    }

    let txn = self.db.begin().await?;
    let now = Utc::now().naive_utc();
    let mut created = Vec::with_capacity(presenters.len());

    for (idx, presenter) in presenters.iter().enumerate() {
      let co_presenter = presenters
        .iter()
        .enumerate()
        .find(|&(other, _)| other != idx)
        .map(|(_, p)| p.player_id);
      let points = points::presentation_points(is_solo, presenter.order);

      let record = presentation::ActiveModel {
        id: NotSet,
        player_id: Set(presenter.player_id),
        cycle_id: Set(cycle.id),
        co_presenter_id: Set(co_presenter),
        title: Set(title.clone()),
        is_solo: Set(is_solo),
        presentation_order: Set(presenter.order.as_i32()),
        points: Set(points as i32),
        created_at: Set(now),
      }
      .insert(&txn)
      .await?;
      created.push(record);
    }

    txn.commit().await?;
    info!("Presentation `{title}` recorded for {} presenter(s)", created.len());
    Ok(created)
  }

  pub async fn by_cycle(
    &self,
    cycle_id: i32,
  ) -> Result<Vec<presentation::Model>> {
    let records = presentation::Entity::find()
      .filter(presentation::Column::CycleId.eq(cycle_id))
      .all(self.db)
      .await?;
    Ok(records)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::*;

  #[tokio::test]
  async fn test_solo_presentation() {
    let db = setup_test_db().await;
    seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;

    let rows = Presentation::new(&db)
      .record(
        "Ownership in practice".into(),
        vec![Presenter {
          player_id: alice.id,
          order: PresentationOrder::First,
        }],
      )
      .await
      .unwrap();

    assert_eq!(rows.len(), 1);
    assert!(rows[0].is_solo);
    assert_eq!(rows[0].points, 30);
    assert_eq!(rows[0].co_presenter_id, None);
  }

  #[tokio::test]
  async fn test_pair_presentation_creates_two_rows() {
    let db = setup_test_db().await;
    let cycle = seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let bob = seed_player(&db, "Bob", false).await;
    let sv = Presentation::new(&db);

    sv.record(
      "Async Rust".into(),
      vec![
        Presenter { player_id: alice.id, order: PresentationOrder::First },
        Presenter { player_id: bob.id, order: PresentationOrder::Second },
      ],
    )
    .await
    .unwrap();

    let rows = sv.by_cycle(cycle.id).await.unwrap();
    let alice_row = rows.iter().find(|r| r.player_id == alice.id).unwrap();
    let bob_row = rows.iter().find(|r| r.player_id == bob.id).unwrap();

    assert_eq!(alice_row.points, 20);
    assert_eq!(alice_row.co_presenter_id, Some(bob.id));
    assert_eq!(bob_row.points, 15);
    assert_eq!(bob_row.co_presenter_id, Some(alice.id));
    assert!(!alice_row.is_solo && !bob_row.is_solo);
  }

  #[tokio::test]
  async fn test_presenter_validation() {
    let db = setup_test_db().await;
    seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let sv = Presentation::new(&db);
    let slot = Presenter { player_id: alice.id, order: PresentationOrder::First };

    assert!(matches!(
      sv.record("Solo twice".into(), vec![slot.clone(), slot]).await,
      Err(Error::Validation(_))
    ));
    assert!(matches!(
      sv.record("Nobody".into(), Vec::new()).await,
      Err(Error::Validation(_))
    ));
  }
}

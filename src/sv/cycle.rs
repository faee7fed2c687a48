use sea_orm::sea_query::Expr;

use crate::{entity::cycle, prelude::*};

pub struct Cycle<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Cycle<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn active(&self) -> Result<Option<cycle::Model>> {
    let cycle = cycle::Entity::find()
      .filter(cycle::Column::IsActive.eq(true))
      .one(self.db)
      .await?;
    Ok(cycle)
  }

  pub async fn active_or_err(&self) -> Result<cycle::Model> {
    self.active().await?.ok_or(Error::NoActiveCycle)
  }

  pub async fn create(
    &self,
    name: String,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
  ) -> Result<cycle::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
      return Err(Error::validation("cycle name is empty"));
    }
    if ends_on < starts_on {
      return Err(Error::validation("cycle ends before it starts"));
    }

    let cycle = cycle::ActiveModel {
      id: NotSet,
      name: Set(name),
      starts_on: Set(starts_on),
      ends_on: Set(ends_on),
      is_active: Set(false),
    };

    Ok(cycle.insert(self.db).await?)
  }

  /// Makes `id` the only active cycle.
  pub async fn activate(&self, id: i32) -> Result<cycle::Model> {
    let txn = self.db.begin().await?;

    let cycle = cycle::Entity::find_by_id(id)
      .one(&txn)
      .await?
      .ok_or(Error::NotFound("Cycle"))?;

    cycle::Entity::update_many()
      .col_expr(cycle::Column::IsActive, Expr::value(false))
      .filter(cycle::Column::Id.ne(id))
      .exec(&txn)
      .await?;

    let cycle = cycle::ActiveModel { is_active: Set(true), ..cycle.into() }
      .update(&txn)
      .await?;

    txn.commit().await?;
    info!("Cycle `{}` is now active", cycle.name);
    Ok(cycle)
  }

  pub async fn all(&self) -> Result<Vec<cycle::Model>> {
    let cycles = cycle::Entity::find()
      .order_by_desc(cycle::Column::StartsOn)
      .all(self.db)
      .await?;
    Ok(cycles)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::*;

  #[tokio::test]
  async fn test_no_active_cycle() {
    let db = setup_test_db().await;
    let sv = Cycle::new(&db);

    assert!(sv.active().await.unwrap().is_none());
    assert!(matches!(sv.active_or_err().await, Err(Error::NoActiveCycle)));
  }

  #[tokio::test]
  async fn test_activate_keeps_single_active() {
    let db = setup_test_db().await;
    let sv = Cycle::new(&db);

    let first = sv.create("H1".into(), day(1, 1), day(6, 30)).await.unwrap();
    let second = sv.create("H2".into(), day(7, 1), day(12, 31)).await.unwrap();

    sv.activate(first.id).await.unwrap();
    sv.activate(second.id).await.unwrap();

    let active: Vec<_> =
      sv.all().await.unwrap().into_iter().filter(|c| c.is_active).collect();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, second.id);
    assert_eq!(sv.active_or_err().await.unwrap().id, second.id);
  }

  #[tokio::test]
  async fn test_create_validation() {
    let db = setup_test_db().await;
    let sv = Cycle::new(&db);

    assert!(matches!(
      sv.create("Backwards".into(), day(6, 30), day(1, 1)).await,
      Err(Error::Validation(_))
    ));
    assert!(matches!(
      sv.create("  ".into(), day(1, 1), day(6, 30)).await,
      Err(Error::Validation(_))
    ));
    assert!(matches!(sv.activate(99).await, Err(Error::NotFound("Cycle"))));
  }
}

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{
  entity::{attendance, player},
  prelude::*,
  scoring::{self, PlayerId},
  sv,
};

#[derive(Debug, Clone, Deserialize)]
pub struct BulkEntry {
  pub player_id: i32,
  #[serde(default)]
  pub is_early_bird: bool,
}

impl From<attendance::Model> for scoring::Attendance {
  fn from(model: attendance::Model) -> Self {
    Self {
      player_id: model.player_id,
      date: model.date,
      is_early_bird: model.is_early_bird,
    }
  }
}

pub struct Attendance<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Attendance<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn check_in(
    &self,
    player_id: i32,
    date: NaiveDate,
    is_early_bird: bool,
  ) -> Result<attendance::Model> {
    let cycle = sv::Cycle::new(self.db).active_or_err().await?;
    if !cycle.contains(date) {
      return Err(Error::validation(format!(
        "{date} is outside cycle `{}`",
        cycle.name
      )));
    }

    sv::Player::new(self.db).get(player_id).await?;

    if self.on(player_id, date).await?.is_some() {
      warn!("Player #{player_id} tried to check in twice on {date}");
      return Err(Conflict::CheckedIn(date).into());
    }

    let record = attendance::ActiveModel {
      id: NotSet,
      player_id: Set(player_id),
      cycle_id: Set(cycle.id),
      date: Set(date),
      is_early_bird: Set(is_early_bird),
      created_at: Set(Utc::now().naive_utc()),
    };

    let record = record.insert(self.db).await?;
    info!(
      "Player #{player_id} checked in on {date}{}",
      if is_early_bird { " (early bird)" } else { "" }
    );
    Ok(record)
  }

  /// Admin entry for a whole day. Players already checked in that day are
  /// skipped; only the new records are returned.
  pub async fn bulk(
    &self,
    date: NaiveDate,
    entries: Vec<BulkEntry>,
  ) -> Result<Vec<attendance::Model>> {
    let cycle = sv::Cycle::new(self.db).active_or_err().await?;
    if !cycle.contains(date) {
      return Err(Error::validation(format!(
        "{date} is outside cycle `{}`",
        cycle.name
      )));
    }

    let txn = self.db.begin().await?;
    let now = Utc::now().naive_utc();
    let mut created = Vec::with_capacity(entries.len());

    for entry in entries {
      player::Entity::find_by_id(entry.player_id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound("Player"))?;

      let existing = attendance::Entity::find()
        .filter(attendance::Column::PlayerId.eq(entry.player_id))
        .filter(attendance::Column::Date.eq(date))
        .one(&txn)
        .await?;
      if existing.is_some() {
        debug!("Player #{} already checked in on {date}", entry.player_id);
        continue;
      }

      let record = attendance::ActiveModel {
        id: NotSet,
        player_id: Set(entry.player_id),
        cycle_id: Set(cycle.id),
        date: Set(date),
        is_early_bird: Set(entry.is_early_bird),
        created_at: Set(now),
      }
      .insert(&txn)
      .await?;
      created.push(record);
    }

    txn.commit().await?;
    info!("Recorded {} check-ins for {date}", created.len());
    Ok(created)
  }

  pub async fn on(
    &self,
    player_id: i32,
    date: NaiveDate,
  ) -> Result<Option<attendance::Model>> {
    let record = attendance::Entity::find()
      .filter(attendance::Column::PlayerId.eq(player_id))
      .filter(attendance::Column::Date.eq(date))
      .one(self.db)
      .await?;
    Ok(record)
  }

  /// Player's check-ins in the active cycle, oldest first.
  pub async fn history(&self, player_id: i32) -> Result<Vec<attendance::Model>> {
    let Some(cycle) = sv::Cycle::new(self.db).active().await? else {
      return Ok(Vec::new());
    };

    let records = attendance::Entity::find()
      .filter(attendance::Column::CycleId.eq(cycle.id))
      .filter(attendance::Column::PlayerId.eq(player_id))
      .order_by_asc(attendance::Column::Date)
      .all(self.db)
      .await?;
    Ok(records)
  }

  pub async fn by_cycle(&self, cycle_id: i32) -> Result<Vec<attendance::Model>> {
    let records = attendance::Entity::find()
      .filter(attendance::Column::CycleId.eq(cycle_id))
      .order_by_asc(attendance::Column::PlayerId)
      .order_by_asc(attendance::Column::Date)
      .all(self.db)
      .await?;
    Ok(records)
  }

  pub async fn dates_by_player(
    &self,
    cycle_id: i32,
  ) -> Result<BTreeMap<PlayerId, Vec<NaiveDate>>> {
    let mut dates: BTreeMap<PlayerId, Vec<NaiveDate>> = BTreeMap::new();
    for record in self.by_cycle(cycle_id).await? {
      dates.entry(record.player_id).or_default().push(record.date);
    }
    Ok(dates)
  }

  pub async fn counts_by_player(
    &self,
    cycle_id: i32,
  ) -> Result<BTreeMap<PlayerId, u32>> {
    let mut counts: BTreeMap<PlayerId, u32> = BTreeMap::new();
    for record in self.by_cycle(cycle_id).await? {
      *counts.entry(record.player_id).or_default() += 1;
    }
    Ok(counts)
  }
}

use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::player;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attendance")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub player_id: i32,
  pub cycle_id: i32,
  pub date: NaiveDate,
  pub is_early_bird: bool,
  pub created_at: NaiveDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "player::Entity",
    from = "Column::PlayerId",
    to = "player::Column::Id"
  )]
  Player,
}

impl Related<player::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Player.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}

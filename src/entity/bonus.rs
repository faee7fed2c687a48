//! Bonus entity - streak and champion bonuses applied by an admin

use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::player;

#[derive(
  Clone,
  Copy,
  Debug,
  PartialEq,
  Eq,
  EnumIter,
  DeriveActiveEnum,
  Serialize,
  Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum BonusKind {
  #[sea_orm(string_value = "streak")]
  Streak,
  #[sea_orm(string_value = "champion")]
  Champion,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bonuses")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub player_id: i32,
  pub cycle_id: i32,
  pub kind: BonusKind,
  pub points: i32,
  pub reason: String,
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

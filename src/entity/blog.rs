use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::player;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "blogs")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub player_id: i32,
  pub cycle_id: i32,
  #[sea_orm(unique)]
  pub url: String,
  /// Player's first blog ever, across all cycles
  pub is_first: bool,
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

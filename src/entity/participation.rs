use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{activity, player};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "participations")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub activity_id: i32,
  pub player_id: i32,
  pub cycle_id: i32,
  pub is_top_performer: bool,
  /// At most one per player per cycle
  pub double_points_used: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "activity::Entity",
    from = "Column::ActivityId",
    to = "activity::Column::Id",
    on_delete = "Cascade"
  )]
  Activity,
  #[sea_orm(
    belongs_to = "player::Entity",
    from = "Column::PlayerId",
    to = "player::Column::Id"
  )]
  Player,
}

impl Related<activity::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Activity.def()
  }
}

impl Related<player::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Player.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub cycle_id: i32,
  pub name: String,
  pub held_on: NaiveDate,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::participation::Entity")]
  Participations,
}

impl Related<super::participation::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Participations.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}

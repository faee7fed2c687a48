//! Book catalog - what a book is worth per ten pages read

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub title: String,
  #[sea_orm(column_name = "points_per_10_pages")]
  pub points_per_10_pages: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "super::reading::Entity")]
  Readings,
}

impl Related<super::reading::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Readings.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}

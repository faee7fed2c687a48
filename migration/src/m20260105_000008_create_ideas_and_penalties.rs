use sea_orm_migration::prelude::*;

use super::{
  m20260105_000001_create_cycles::Cycles,
  m20260105_000002_create_players::Players,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Ideas::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Ideas::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Ideas::PlayerId).integer().not_null())
          .col(ColumnDef::new(Ideas::CycleId).integer().not_null())
          .col(ColumnDef::new(Ideas::Title).string().not_null())
          .col(ColumnDef::new(Ideas::Points).integer().not_null())
          .col(
            ColumnDef::new(Ideas::Verified)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(ColumnDef::new(Ideas::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_ideas_player")
              .from(Ideas::Table, Ideas::PlayerId)
              .to(Players::Table, Players::Id),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_ideas_cycle")
              .from(Ideas::Table, Ideas::CycleId)
              .to(Cycles::Table, Cycles::Id),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(Penalties::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Penalties::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Penalties::PlayerId).integer().not_null())
          .col(ColumnDef::new(Penalties::CycleId).integer().not_null())
          .col(ColumnDef::new(Penalties::Points).integer().not_null())
          .col(ColumnDef::new(Penalties::Reason).string().not_null())
          .col(ColumnDef::new(Penalties::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_penalties_player")
              .from(Penalties::Table, Penalties::PlayerId)
              .to(Players::Table, Players::Id),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_penalties_cycle")
              .from(Penalties::Table, Penalties::CycleId)
              .to(Cycles::Table, Cycles::Id),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Penalties::Table).to_owned()).await?;
    manager.drop_table(Table::drop().table(Ideas::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Ideas {
  Table,
  Id,
  PlayerId,
  CycleId,
  Title,
  Points,
  Verified,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum Penalties {
  Table,
  Id,
  PlayerId,
  CycleId,
  Points,
  Reason,
  CreatedAt,
}

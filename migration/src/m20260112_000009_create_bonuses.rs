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
          .table(Bonuses::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Bonuses::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Bonuses::PlayerId).integer().not_null())
          .col(ColumnDef::new(Bonuses::CycleId).integer().not_null())
          .col(ColumnDef::new(Bonuses::Kind).string().not_null())
          .col(ColumnDef::new(Bonuses::Points).integer().not_null())
          .col(ColumnDef::new(Bonuses::Reason).string().not_null())
          .col(ColumnDef::new(Bonuses::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_bonuses_player")
              .from(Bonuses::Table, Bonuses::PlayerId)
              .to(Players::Table, Players::Id),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_bonuses_cycle")
              .from(Bonuses::Table, Bonuses::CycleId)
              .to(Cycles::Table, Cycles::Id),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_bonuses_cycle_kind")
          .table(Bonuses::Table)
          .col(Bonuses::CycleId)
          .col(Bonuses::Kind)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Bonuses::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Bonuses {
  Table,
  Id,
  PlayerId,
  CycleId,
  Kind,
  Points,
  Reason,
  CreatedAt,
}

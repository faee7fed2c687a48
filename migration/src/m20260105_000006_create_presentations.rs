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
          .table(Presentations::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Presentations::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Presentations::PlayerId).integer().not_null())
          .col(ColumnDef::new(Presentations::CycleId).integer().not_null())
          .col(ColumnDef::new(Presentations::CoPresenterId).integer().null())
          .col(ColumnDef::new(Presentations::Title).string().not_null())
          .col(ColumnDef::new(Presentations::IsSolo).boolean().not_null())
          .col(
            ColumnDef::new(Presentations::PresentationOrder)
              .integer()
              .not_null()
              .default(1),
          )
          .col(ColumnDef::new(Presentations::Points).integer().not_null())
          .col(
            ColumnDef::new(Presentations::CreatedAt).date_time().not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_presentations_player")
              .from(Presentations::Table, Presentations::PlayerId)
              .to(Players::Table, Players::Id),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_presentations_co_presenter")
              .from(Presentations::Table, Presentations::CoPresenterId)
              .to(Players::Table, Players::Id),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_presentations_cycle")
              .from(Presentations::Table, Presentations::CycleId)
              .to(Cycles::Table, Cycles::Id),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(Presentations::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum Presentations {
  Table,
  Id,
  PlayerId,
  CycleId,
  CoPresenterId,
  Title,
  IsSolo,
  PresentationOrder,
  Points,
  CreatedAt,
}

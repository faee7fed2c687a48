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
          .table(Activities::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Activities::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Activities::CycleId).integer().not_null())
          .col(ColumnDef::new(Activities::Name).string().not_null())
          .col(ColumnDef::new(Activities::HeldOn).date().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_activities_cycle")
              .from(Activities::Table, Activities::CycleId)
              .to(Cycles::Table, Cycles::Id),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(Participations::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Participations::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(Participations::ActivityId).integer().not_null(),
          )
          .col(ColumnDef::new(Participations::PlayerId).integer().not_null())
          .col(ColumnDef::new(Participations::CycleId).integer().not_null())
          .col(
            ColumnDef::new(Participations::IsTopPerformer)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(
            ColumnDef::new(Participations::DoublePointsUsed)
              .boolean()
              .not_null()
              .default(false),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_participations_activity")
              .from(Participations::Table, Participations::ActivityId)
              .to(Activities::Table, Activities::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_participations_player")
              .from(Participations::Table, Participations::PlayerId)
              .to(Players::Table, Players::Id),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_participations_cycle")
              .from(Participations::Table, Participations::CycleId)
              .to(Cycles::Table, Cycles::Id),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_participations_activity_player")
          .table(Participations::Table)
          .col(Participations::ActivityId)
          .col(Participations::PlayerId)
          .unique()
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(Participations::Table).to_owned())
      .await?;
    manager.drop_table(Table::drop().table(Activities::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Activities {
  Table,
  Id,
  CycleId,
  Name,
  HeldOn,
}

#[derive(DeriveIden)]
pub enum Participations {
  Table,
  Id,
  ActivityId,
  PlayerId,
  CycleId,
  IsTopPerformer,
  DoublePointsUsed,
}

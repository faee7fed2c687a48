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
          .table(Attendance::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Attendance::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Attendance::PlayerId).integer().not_null())
          .col(ColumnDef::new(Attendance::CycleId).integer().not_null())
          .col(ColumnDef::new(Attendance::Date).date().not_null())
          .col(
            ColumnDef::new(Attendance::IsEarlyBird)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(ColumnDef::new(Attendance::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_attendance_player")
              .from(Attendance::Table, Attendance::PlayerId)
              .to(Players::Table, Players::Id),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_attendance_cycle")
              .from(Attendance::Table, Attendance::CycleId)
              .to(Cycles::Table, Cycles::Id),
          )
          .to_owned(),
      )
      .await?;

    // one check-in per player per day
    manager
      .create_index(
        Index::create()
          .name("idx_attendance_player_date")
          .table(Attendance::Table)
          .col(Attendance::PlayerId)
          .col(Attendance::Date)
          .unique()
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_attendance_cycle")
          .table(Attendance::Table)
          .col(Attendance::CycleId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Attendance::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Attendance {
  Table,
  Id,
  PlayerId,
  CycleId,
  Date,
  IsEarlyBird,
  CreatedAt,
}

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
          .table(Courses::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Courses::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Courses::PlayerId).integer().not_null())
          .col(ColumnDef::new(Courses::CycleId).integer().not_null())
          .col(ColumnDef::new(Courses::Title).string().not_null())
          .col(ColumnDef::new(Courses::Hours).double().not_null())
          .col(
            ColumnDef::new(Courses::CompletionPercent).integer().not_null(),
          )
          .col(
            ColumnDef::new(Courses::Verified)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(ColumnDef::new(Courses::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_courses_player")
              .from(Courses::Table, Courses::PlayerId)
              .to(Players::Table, Players::Id),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_courses_cycle")
              .from(Courses::Table, Courses::CycleId)
              .to(Cycles::Table, Cycles::Id),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(Books::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Books::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Books::Title).string().not_null())
          .col(
            ColumnDef::new(Books::PointsPer10Pages)
              .integer()
              .not_null()
              .default(1),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(Readings::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Readings::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Readings::PlayerId).integer().not_null())
          .col(ColumnDef::new(Readings::CycleId).integer().not_null())
          .col(ColumnDef::new(Readings::BookId).integer().not_null())
          .col(ColumnDef::new(Readings::PagesRead).integer().not_null())
          .col(
            ColumnDef::new(Readings::Verified)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(ColumnDef::new(Readings::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_readings_player")
              .from(Readings::Table, Readings::PlayerId)
              .to(Players::Table, Players::Id),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_readings_cycle")
              .from(Readings::Table, Readings::CycleId)
              .to(Cycles::Table, Cycles::Id),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_readings_book")
              .from(Readings::Table, Readings::BookId)
              .to(Books::Table, Books::Id),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Readings::Table).to_owned()).await?;
    manager.drop_table(Table::drop().table(Books::Table).to_owned()).await?;
    manager.drop_table(Table::drop().table(Courses::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Courses {
  Table,
  Id,
  PlayerId,
  CycleId,
  Title,
  Hours,
  CompletionPercent,
  Verified,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum Books {
  Table,
  Id,
  Title,
  #[sea_orm(iden = "points_per_10_pages")]
  PointsPer10Pages,
}

#[derive(DeriveIden)]
pub enum Readings {
  Table,
  Id,
  PlayerId,
  CycleId,
  BookId,
  PagesRead,
  Verified,
  CreatedAt,
}

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
          .table(Blogs::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Blogs::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Blogs::PlayerId).integer().not_null())
          .col(ColumnDef::new(Blogs::CycleId).integer().not_null())
          // a link can be claimed by one player only, across all cycles
          .col(ColumnDef::new(Blogs::Url).string().not_null().unique_key())
          .col(
            ColumnDef::new(Blogs::IsFirst)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(ColumnDef::new(Blogs::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_blogs_player")
              .from(Blogs::Table, Blogs::PlayerId)
              .to(Players::Table, Players::Id),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_blogs_cycle")
              .from(Blogs::Table, Blogs::CycleId)
              .to(Cycles::Table, Cycles::Id),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Blogs::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Blogs {
  Table,
  Id,
  PlayerId,
  CycleId,
  Url,
  IsFirst,
  CreatedAt,
}

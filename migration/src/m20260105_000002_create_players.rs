use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Players::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Players::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Players::Name).string().not_null())
          .col(ColumnDef::new(Players::Email).string().not_null().unique_key())
          .col(
            ColumnDef::new(Players::Remote)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(
            ColumnDef::new(Players::IsAdmin)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(ColumnDef::new(Players::CreatedAt).date_time().not_null())
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Players::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Players {
  Table,
  Id,
  Name,
  Email,
  Remote,
  IsAdmin,
  CreatedAt,
}

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Cycles::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Cycles::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Cycles::Name).string().not_null())
          .col(ColumnDef::new(Cycles::StartsOn).date().not_null())
          .col(ColumnDef::new(Cycles::EndsOn).date().not_null())
          .col(
            ColumnDef::new(Cycles::IsActive)
              .boolean()
              .not_null()
              .default(false),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Cycles::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Cycles {
  Table,
  Id,
  Name,
  StartsOn,
  EndsOn,
  IsActive,
}

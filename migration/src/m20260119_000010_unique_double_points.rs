use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Double points can be spent once per player per cycle.
const CREATE_INDEX: &str = "CREATE UNIQUE INDEX IF NOT EXISTS \
  idx_participations_double_points \
  ON participations (player_id, cycle_id) \
  WHERE double_points_used = 1";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.get_connection().execute_unprepared(CREATE_INDEX).await?;
    Ok(())
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .get_connection()
      .execute_unprepared(
        "DROP INDEX IF EXISTS idx_participations_double_points",
      )
      .await?;
    Ok(())
  }
}

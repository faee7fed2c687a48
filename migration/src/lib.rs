pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_cycles;
mod m20260105_000002_create_players;
mod m20260105_000003_create_attendance;
mod m20260105_000004_create_learning;
mod m20260105_000005_create_blogs;
mod m20260105_000006_create_presentations;
mod m20260105_000007_create_activities;
mod m20260105_000008_create_ideas_and_penalties;
mod m20260112_000009_create_bonuses;
mod m20260119_000010_unique_double_points;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260105_000001_create_cycles::Migration),
      Box::new(m20260105_000002_create_players::Migration),
      Box::new(m20260105_000003_create_attendance::Migration),
      Box::new(m20260105_000004_create_learning::Migration),
      Box::new(m20260105_000005_create_blogs::Migration),
      Box::new(m20260105_000006_create_presentations::Migration),
      Box::new(m20260105_000007_create_activities::Migration),
      Box::new(m20260105_000008_create_ideas_and_penalties::Migration),
      Box::new(m20260112_000009_create_bonuses::Migration),
      Box::new(m20260119_000010_unique_double_points::Migration),
    ]
  }
}

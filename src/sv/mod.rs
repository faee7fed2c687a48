pub mod activity;
pub mod attendance;
pub mod blog;
pub mod bonus;
pub mod cycle;
pub mod idea;
pub mod leaderboard;
pub mod learning;
pub mod penalty;
pub mod player;
pub mod presentation;

pub use activity::Activity;
pub use attendance::Attendance;
pub use blog::Blog;
pub use bonus::Bonus;
pub use cycle::Cycle;
pub use idea::Idea;
pub use leaderboard::Leaderboard;
pub use learning::Learning;
pub use penalty::Penalty;
pub use player::Player;
pub use presentation::Presentation;

#[cfg(test)]
pub(crate) mod testing {
  use migration::Migrator;

  use crate::{entity::*, prelude::*};

  /// In-memory database with the real migrations applied.
  pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
  }

  pub fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).unwrap()
  }

  /// Active cycle covering the first half of 2026.
  pub async fn seed_cycle(db: &DatabaseConnection) -> cycle::Model {
    let sv = super::Cycle::new(db);
    let cycle =
      sv.create("H1 2026".into(), day(1, 1), day(6, 30)).await.unwrap();
    sv.activate(cycle.id).await.unwrap()
  }

  pub async fn seed_player(
    db: &DatabaseConnection,
    name: &str,
    remote: bool,
  ) -> player::Model {
    super::Player::new(db)
      .create(
        name.to_string(),
        format!("{}@example.com", name.to_lowercase()),
        remote,
      )
      .await
      .unwrap()
  }
}

use crate::{
  prelude::*,
  scoring::{self, LeaderboardEntry, Records},
  sv,
};

fn convert<M, T: From<M>>(models: Vec<M>) -> Vec<T> {
  models.into_iter().map(T::from).collect()
}

pub struct Leaderboard<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Leaderboard<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Leaderboard of the active cycle; empty when no cycle is active.
  pub async fn current(&self) -> Result<Vec<LeaderboardEntry>> {
    match sv::Cycle::new(self.db).active().await? {
      Some(cycle) => self.for_cycle(cycle.id).await,
      None => Ok(Vec::new()),
    }
  }

  pub async fn for_cycle(&self, cycle_id: i32) -> Result<Vec<LeaderboardEntry>> {
    let players = sv::Player::new(self.db).all().await?;
    let records = self.records(cycle_id).await?;

    let players: Vec<scoring::Player> = convert(players);
    let board = scoring::compute_leaderboard(&players, &records);
    debug!("Computed leaderboard of cycle #{cycle_id} for {} players", board.len());
    Ok(board)
  }

  pub async fn for_player(&self, player_id: i32) -> Result<LeaderboardEntry> {
    sv::Player::new(self.db).get(player_id).await?;
    let cycle = sv::Cycle::new(self.db).active_or_err().await?;

    self
      .for_cycle(cycle.id)
      .await?
      .into_iter()
      .find(|entry| entry.player_id == player_id)
      .ok_or_else(|| {
        Error::Internal(format!("player #{player_id} missing from leaderboard"))
      })
  }

  async fn records(&self, cycle_id: i32) -> Result<Records> {
    let attendance = sv::Attendance::new(self.db);
    let activity = sv::Activity::new(self.db);
    let learning = sv::Learning::new(self.db);
    let blog = sv::Blog::new(self.db);
    let presentation = sv::Presentation::new(self.db);
    let idea = sv::Idea::new(self.db);
    let penalty = sv::Penalty::new(self.db);
    let bonus = sv::Bonus::new(self.db);

    let (attendance, participations, courses, readings, blogs) = futures::try_join!(
      attendance.by_cycle(cycle_id),
      activity.participations(cycle_id),
      learning.courses(cycle_id),
      learning.readings(cycle_id),
      blog.by_cycle(cycle_id),
    )?;
    let (presentations, ideas, penalties, bonuses) = futures::try_join!(
      presentation.by_cycle(cycle_id),
      idea.by_cycle(cycle_id),
      penalty.by_cycle(cycle_id),
      bonus.by_cycle(cycle_id),
    )?;

    Ok(Records {
      attendance: convert(attendance),
      participations: convert(participations),
      courses: convert(courses),
      readings: convert(readings),
      blogs: convert(blogs),
      presentations: convert(presentations),
      ideas: convert(ideas),
      penalties: convert(penalties),
      bonuses: convert(bonuses),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    scoring::PresentationOrder,
    sv::{activity::NewParticipation, presentation::Presenter, testing::*},
  };

  #[tokio::test]
  async fn test_empty_without_active_cycle() {
    let db = setup_test_db().await;
    seed_player(&db, "Alice", false).await;

    assert!(Leaderboard::new(&db).current().await.unwrap().is_empty());
    assert!(matches!(
      Leaderboard::new(&db).for_player(1).await,
      Err(Error::NoActiveCycle)
    ));
  }

  #[tokio::test]
  async fn test_leaderboard_from_store() {
    let db = setup_test_db().await;
    let cycle = seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", true).await;
    let bob = seed_player(&db, "Bob", false).await;
    let carol = seed_player(&db, "Carol", false).await;

    let attendance = sv::Attendance::new(&db);
    attendance.check_in(alice.id, day(1, 7), true).await.unwrap();
    attendance.check_in(alice.id, day(1, 14), false).await.unwrap();
    attendance.check_in(bob.id, day(1, 7), false).await.unwrap();

    let activity = sv::Activity::new(&db);
    let quiz = activity.create("Quiz".into(), day(1, 9)).await.unwrap();
    activity
      .participate(
        quiz.id,
        NewParticipation {
          player_id: bob.id,
          is_top_performer: true,
          double_points_used: true,
        },
      )
      .await
      .unwrap();

    sv::Presentation::new(&db)
      .record(
        "Traits".into(),
        vec![Presenter { player_id: alice.id, order: PresentationOrder::First }],
      )
      .await
      .unwrap();

    let learning = sv::Learning::new(&db);
    let book = learning.add_book("SICP".into(), 1).await.unwrap();
    let reading = learning.add_reading(carol.id, book.id, 9).await.unwrap();
    learning.verify_reading(reading.id).await.unwrap();

    sv::Penalty::new(&db).issue(bob.id, -3, "Late".into()).await.unwrap();

    let board = Leaderboard::new(&db).for_cycle(cycle.id).await.unwrap();
    let ids: Vec<_> = board.iter().map(|e| e.player_id).collect();

    // Bob 60 - 3 + 1, Alice 4 + 2 + 30, Carol 0
    assert_eq!(ids, vec![bob.id, alice.id, carol.id]);
    assert_eq!(board[0].total_points, 58);
    assert_eq!(board[1].attendance, 6);
    assert_eq!(board[1].total_points, 36);
    assert_eq!(board[2].book, 0);
    assert!(board[2].is_last_place);

    let mine = Leaderboard::new(&db).for_player(alice.id).await.unwrap();
    assert_eq!(mine.rank, 2);
  }
}

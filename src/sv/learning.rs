//! Courses and book readings - both need an admin to verify them before
//! they score.

use serde::Deserialize;

use crate::{
  entity::{book, course, reading},
  prelude::*,
  scoring::{self, points::COURSE_MAX_HOURS},
  sv,
};

#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse {
  pub player_id: i32,
  pub title: String,
  pub hours: f64,
  pub completion_percent: i32,
}

impl From<course::Model> for scoring::Course {
  fn from(model: course::Model) -> Self {
    Self {
      player_id: model.player_id,
      hours: model.hours,
      completion_percent: model.completion_percent,
      verified: model.verified,
    }
  }
}

impl From<(reading::Model, Option<book::Model>)> for scoring::Reading {
  fn from((reading, book): (reading::Model, Option<book::Model>)) -> Self {
    Self {
      player_id: reading.player_id,
      pages_read: reading.pages_read,
      points_per_10_pages: book.map_or(0, |b| b.points_per_10_pages),
      verified: reading.verified,
    }
  }
}

pub struct Learning<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Learning<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn add_course(&self, new: NewCourse) -> Result<course::Model> {
    let title = new.title.trim().to_string();
    if title.is_empty() {
      return Err(Error::validation("course title is empty"));
    }
    if !new.hours.is_finite() || new.hours <= 0.0 {
      return Err(Error::validation("course hours must be positive"));
    }
    if new.hours > COURSE_MAX_HOURS {
      return Err(Error::validation(format!(
        "course hours must not exceed {COURSE_MAX_HOURS}"
      )));
    }
    if !(0..=100).contains(&new.completion_percent) {
      return Err(Error::validation("completion must be within 0..=100"));
    }

    let cycle = sv::Cycle::new(self.db).active_or_err().await?;
    sv::Player::new(self.db).get(new.player_id).await?;

    let course = course::ActiveModel {
      id: NotSet,
      player_id: Set(new.player_id),
      cycle_id: Set(cycle.id),
      title: Set(title),
      hours: Set(new.hours),
      completion_percent: Set(new.completion_percent),
      verified: Set(false),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(course.insert(self.db).await?)
  }

  pub async fn verify_course(&self, id: i32) -> Result<course::Model> {
    let course = course::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Course"))?;

    let course = course::ActiveModel { verified: Set(true), ..course.into() }
      .update(self.db)
      .await?;
    info!("Course #{} of player #{} verified", course.id, course.player_id);
    Ok(course)
  }

  pub async fn courses(&self, cycle_id: i32) -> Result<Vec<course::Model>> {
    let courses = course::Entity::find()
      .filter(course::Column::CycleId.eq(cycle_id))
      .all(self.db)
      .await?;
    Ok(courses)
  }

  pub async fn add_book(
    &self,
    title: String,
    points_per_10_pages: i32,
  ) -> Result<book::Model> {
    let title = title.trim().to_string();
    if title.is_empty() {
      return Err(Error::validation("book title is empty"));
    }
    if points_per_10_pages <= 0 {
      return Err(Error::validation("points per 10 pages must be positive"));
    }

    let book = book::ActiveModel {
      id: NotSet,
      title: Set(title),
      points_per_10_pages: Set(points_per_10_pages),
    };

    Ok(book.insert(self.db).await?)
  }

  pub async fn books(&self) -> Result<Vec<book::Model>> {
    let books =
      book::Entity::find().order_by_asc(book::Column::Title).all(self.db).await?;
    Ok(books)
  }

  pub async fn add_reading(
    &self,
    player_id: i32,
    book_id: i32,
    pages_read: i32,
  ) -> Result<reading::Model> {
    if pages_read <= 0 {
      return Err(Error::validation("pages read must be positive"));
    }

    let cycle = sv::Cycle::new(self.db).active_or_err().await?;
    sv::Player::new(self.db).get(player_id).await?;
    book::Entity::find_by_id(book_id)
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Book"))?;

    let reading = reading::ActiveModel {
      id: NotSet,
      player_id: Set(player_id),
      cycle_id: Set(cycle.id),
      book_id: Set(book_id),
      pages_read: Set(pages_read),
      verified: Set(false),
      created_at: Set(Utc::now().naive_utc()),
    };

    Ok(reading.insert(self.db).await?)
  }

  pub async fn verify_reading(&self, id: i32) -> Result<reading::Model> {
    let reading = reading::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Reading"))?;

    let reading = reading::ActiveModel { verified: Set(true), ..reading.into() }
      .update(self.db)
      .await?;
    info!("Reading #{} of player #{} verified", reading.id, reading.player_id);
    Ok(reading)
  }

  pub async fn readings(
    &self,
    cycle_id: i32,
  ) -> Result<Vec<(reading::Model, Option<book::Model>)>> {
    let readings = reading::Entity::find()
      .filter(reading::Column::CycleId.eq(cycle_id))
      .find_also_related(book::Entity)
      .all(self.db)
      .await?;
    Ok(readings)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::*;

  #[tokio::test]
  async fn test_course_flow() {
    let db = setup_test_db().await;
    let cycle = seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let sv = Learning::new(&db);

    let course = sv
      .add_course(NewCourse {
        player_id: alice.id,
        title: "Rust for backend devs".into(),
        hours: 12.5,
        completion_percent: 80,
      })
      .await
      .unwrap();
    assert!(!course.verified);

    sv.verify_course(course.id).await.unwrap();

    let courses = sv.courses(cycle.id).await.unwrap();
    assert!(courses[0].verified);
    assert_eq!(scoring::Course::from(courses[0].clone()).hours, 12.5);
  }

  #[tokio::test]
  async fn test_course_validation() {
    let db = setup_test_db().await;
    seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let sv = Learning::new(&db);

    let bad = NewCourse {
      player_id: alice.id,
      title: "Overachiever".into(),
      hours: 3.0,
      completion_percent: 140,
    };
    assert!(matches!(sv.add_course(bad).await, Err(Error::Validation(_))));
  }

  #[tokio::test]
  async fn test_huge_course_rejected_and_board_survives() {
    let db = setup_test_db().await;
    seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let sv = Learning::new(&db);

    let huge = NewCourse {
      player_id: alice.id,
      title: "Forever course".into(),
      hours: 1e15,
      completion_percent: 100,
    };
    assert!(matches!(sv.add_course(huge).await, Err(Error::Validation(_))));

    let longest = sv
      .add_course(NewCourse {
        player_id: alice.id,
        title: "Longest allowed".into(),
        hours: COURSE_MAX_HOURS,
        completion_percent: 100,
      })
      .await
      .unwrap();
    sv.verify_course(longest.id).await.unwrap();

    let board = sv::Leaderboard::new(&db).current().await.unwrap();
    assert_eq!(board[0].course, 40_000);
  }

  #[tokio::test]
  async fn test_reading_joins_catalog() {
    let db = setup_test_db().await;
    let cycle = seed_cycle(&db).await;
    let alice = seed_player(&db, "Alice", false).await;
    let sv = Learning::new(&db);

    let book = sv.add_book("The Pragmatic Programmer".into(), 2).await.unwrap();
    let reading = sv.add_reading(alice.id, book.id, 45).await.unwrap();
    sv.verify_reading(reading.id).await.unwrap();

    let readings: Vec<scoring::Reading> = sv
      .readings(cycle.id)
      .await
      .unwrap()
      .into_iter()
      .map(Into::into)
      .collect();

    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].points_per_10_pages, 2);
    assert!(readings[0].verified);
    assert!(matches!(
      sv.add_reading(alice.id, 999, 10).await,
      Err(Error::NotFound("Book"))
    ));
  }
}

use std::env;

use chrono::{FixedOffset, NaiveTime, Offset};
use migration::Migrator;

use crate::{prelude::*, sv};

#[derive(Debug, Clone)]
pub struct Config {
  pub database_url: String,
  pub port: u16,
  /// Value expected in the `x-admin-token` header; empty disables admin routes
  pub admin_token: String,
  /// Self check-ins strictly before this local time are early bird
  pub early_bird_cutoff: NaiveTime,
  pub utc_offset_hours: i32,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_url: String::from("sqlite:leaderboard.db?mode=rwc"),
      port: 3000,
      admin_token: String::new(),
      early_bird_cutoff: NaiveTime::from_hms_opt(9, 0, 0)
        .unwrap_or(NaiveTime::MIN),
      utc_offset_hours: 0,
    }
  }
}

impl Config {
  pub fn from_env() -> anyhow::Result<Self> {
    let mut config = Self::default();

    if let Ok(url) = env::var("DATABASE_URL") {
      config.database_url = url;
    }
    if let Ok(port) = env::var("PORT") {
      config.port = port.parse().context("PORT must be a port number")?;
    }
    if let Ok(token) = env::var("ADMIN_TOKEN") {
      config.admin_token = token.trim().to_string();
    }
    if let Ok(cutoff) = env::var("EARLY_BIRD_CUTOFF") {
      config.early_bird_cutoff = NaiveTime::parse_from_str(&cutoff, "%H:%M")
        .context("EARLY_BIRD_CUTOFF must look like 09:00")?;
    }
    if let Ok(offset) = env::var("UTC_OFFSET_HOURS") {
      let hours: i32 =
        offset.parse().context("UTC_OFFSET_HOURS must be an integer")?;
      anyhow::ensure!(
        (-23..=23).contains(&hours),
        "UTC_OFFSET_HOURS out of range: {hours}"
      );
      config.utc_offset_hours = hours;
    }

    Ok(config)
  }

  pub fn offset(&self) -> FixedOffset {
    FixedOffset::east_opt(self.utc_offset_hours * 3600)
      .unwrap_or_else(|| Utc.fix())
  }

  /// Office-local date and time right now.
  pub fn local_now(&self) -> DateTime {
    Utc::now().with_timezone(&self.offset()).naive_local()
  }

  pub fn is_early_bird(&self, at: DateTime) -> bool {
    at.time() < self.early_bird_cutoff
  }
}

pub struct Services<'a> {
  pub cycle: sv::Cycle<'a>,
  pub player: sv::Player<'a>,
  pub attendance: sv::Attendance<'a>,
  pub learning: sv::Learning<'a>,
  pub blog: sv::Blog<'a>,
  pub presentation: sv::Presentation<'a>,
  pub activity: sv::Activity<'a>,
  pub idea: sv::Idea<'a>,
  pub penalty: sv::Penalty<'a>,
  pub bonus: sv::Bonus<'a>,
  pub leaderboard: sv::Leaderboard<'a>,
}

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
}

impl AppState {
  pub async fn new(config: Config) -> anyhow::Result<Self> {
    info!("Connecting to database...");
    let db = Database::connect(config.database_url.as_str())
      .await
      .context("Failed to connect to database")?;

    info!("Running migrations...");
    Migrator::up(&db, None).await.context("Failed to run migrations")?;

    Ok(Self::with_db(db, config))
  }

  pub fn with_db(db: DatabaseConnection, config: Config) -> Self {
    Self { db, config }
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      cycle: sv::Cycle::new(&self.db),
      player: sv::Player::new(&self.db),
      attendance: sv::Attendance::new(&self.db),
      learning: sv::Learning::new(&self.db),
      blog: sv::Blog::new(&self.db),
      presentation: sv::Presentation::new(&self.db),
      activity: sv::Activity::new(&self.db),
      idea: sv::Idea::new(&self.db),
      penalty: sv::Penalty::new(&self.db),
      bonus: sv::Bonus::new(&self.db),
      leaderboard: sv::Leaderboard::new(&self.db),
    }
  }
}

//! Error types for the leaderboard server

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use sea_orm::{DbErr, SqlErr};
use tracing::error;

/// Writes rejected because an equivalent record already exists.
#[derive(Debug, thiserror::Error)]
pub enum Conflict {
  #[error("Already checked in on {0}")]
  CheckedIn(NaiveDate),
  #[error("Blog link was already submitted")]
  BlogLink,
  #[error("Email is already registered")]
  Email,
  #[error("Double points were already used this cycle")]
  DoublePoints,
  #[error("Player already takes part in this activity")]
  Participation,
  #[error("Activity already has a top performer")]
  TopPerformer,
  #[error("Record already exists")]
  Duplicate,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Database error: {0}")]
  Database(DbErr),

  #[error("{0} not found")]
  NotFound(&'static str),

  #[error("No active cycle")]
  NoActiveCycle,

  #[error(transparent)]
  Conflict(Conflict),

  #[error("Invalid input: {0}")]
  Validation(String),

  #[error("Admin access required")]
  Forbidden,

  #[error("Internal error: {0}")]
  Internal(String),
}

impl Error {
  pub fn validation(msg: impl Into<String>) -> Self {
    Self::Validation(msg.into())
  }
}

impl From<Conflict> for Error {
  fn from(conflict: Conflict) -> Self {
    Self::Conflict(conflict)
  }
}

impl From<DbErr> for Error {
  fn from(err: DbErr) -> Self {
    match err.sql_err() {
      Some(SqlErr::UniqueConstraintViolation(_)) => {
        Self::Conflict(Conflict::Duplicate)
      }
      _ => Self::Database(err),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::NotFound(_) => StatusCode::NOT_FOUND,
      Error::NoActiveCycle | Error::Conflict(_) => StatusCode::CONFLICT,
      Error::Validation(_) => StatusCode::BAD_REQUEST,
      Error::Forbidden => StatusCode::FORBIDDEN,
      Error::Database(_) | Error::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
      error!("{self}");
      "Internal error".to_string()
    } else {
      self.to_string()
    };

    let body = json::json!({
      "success": false,
      "error": message
    });

    (status, Json(body)).into_response()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_codes() {
    let cases = [
      (Error::NotFound("Player"), StatusCode::NOT_FOUND),
      (Error::NoActiveCycle, StatusCode::CONFLICT),
      (Conflict::BlogLink.into(), StatusCode::CONFLICT),
      (Error::validation("bad"), StatusCode::BAD_REQUEST),
      (Error::Forbidden, StatusCode::FORBIDDEN),
      (Error::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
    ];

    for (err, status) in cases {
      assert_eq!(err.into_response().status(), status);
    }
  }

  #[test]
  fn test_messages() {
    assert_eq!(Error::NotFound("Cycle").to_string(), "Cycle not found");
    assert_eq!(
      Error::from(Conflict::DoublePoints).to_string(),
      "Double points were already used this cycle"
    );
  }
}

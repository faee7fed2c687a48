//! SeaORM entity definitions, one module per table.

pub mod activity;
pub mod attendance;
pub mod blog;
pub mod bonus;
pub mod book;
pub mod course;
pub mod cycle;
pub mod idea;
pub mod participation;
pub mod penalty;
pub mod player;
pub mod presentation;
pub mod reading;

pub use bonus::BonusKind;

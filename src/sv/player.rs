use serde::Deserialize;

use crate::{entity::player, prelude::*, scoring};

/// Admin edit; absent fields are left untouched.
///
/// `is_admin` only labels the player in listings. Admin routes are guarded
/// by the shared `x-admin-token` header, not by this flag.
#[derive(Debug, Default, Deserialize)]
pub struct PlayerUpdate {
  pub name: Option<String>,
  pub remote: Option<bool>,
  pub is_admin: Option<bool>,
}

impl From<player::Model> for scoring::Player {
  fn from(model: player::Model) -> Self {
    Self { id: model.id, name: model.name, remote: model.remote }
  }
}

pub struct Player<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Player<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(
    &self,
    name: String,
    email: String,
    remote: bool,
  ) -> Result<player::Model> {
    let name = name.trim().to_string();
    let email = email.trim().to_lowercase();

    if name.is_empty() {
      return Err(Error::validation("name is empty"));
    }
    if !email.contains('@') {
      return Err(Error::validation("email is not valid"));
    }
    if self.by_email(&email).await?.is_some() {
      warn!("Signup rejected, {email} is already registered");
      return Err(Conflict::Email.into());
    }

    let now = Utc::now().naive_utc();
    let player = player::ActiveModel {
      id: NotSet,
      name: Set(name),
      email: Set(email),
      remote: Set(remote),
      is_admin: Set(false),
      created_at: Set(now),
    };

    let player = player.insert(self.db).await?;
    info!("Player #{} `{}` signed up", player.id, player.name);
    Ok(player)
  }

  pub async fn get(&self, id: i32) -> Result<player::Model> {
    player::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::NotFound("Player"))
  }

  pub async fn by_email(&self, email: &str) -> Result<Option<player::Model>> {
    let player = player::Entity::find()
      .filter(player::Column::Email.eq(email.trim().to_lowercase()))
      .one(self.db)
      .await?;
    Ok(player)
  }

  pub async fn all(&self) -> Result<Vec<player::Model>> {
    let players = player::Entity::find()
      .order_by_asc(player::Column::Id)
      .all(self.db)
      .await?;
    Ok(players)
  }

  pub async fn update(
    &self,
    id: i32,
    update: PlayerUpdate,
  ) -> Result<player::Model> {
    let player = self.get(id).await?;
    let mut model: player::ActiveModel = player.into();

    if let Some(name) = update.name {
      let name = name.trim().to_string();
      if name.is_empty() {
        return Err(Error::validation("name is empty"));
      }
      model.name = Set(name);
    }
    if let Some(remote) = update.remote {
      model.remote = Set(remote);
    }
    if let Some(is_admin) = update.is_admin {
      model.is_admin = Set(is_admin);
    }

    Ok(model.update(self.db).await?)
  }

  pub async fn count(&self) -> Result<u64> {
    Ok(player::Entity::find().count(self.db).await?)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::testing::*;

  #[tokio::test]
  async fn test_create_player() {
    let db = setup_test_db().await;
    let sv = Player::new(&db);

    let player = sv
      .create(" Alice ".into(), "Alice@Example.com".into(), true)
      .await
      .unwrap();

    assert_eq!(player.name, "Alice");
    assert_eq!(player.email, "alice@example.com");
    assert!(player.remote);
    assert!(!player.is_admin);
    assert_eq!(sv.count().await.unwrap(), 1);
  }

  #[tokio::test]
  async fn test_duplicate_email() {
    let db = setup_test_db().await;
    let sv = Player::new(&db);

    sv.create("Alice".into(), "alice@example.com".into(), false)
      .await
      .unwrap();
    let again =
      sv.create("Alias".into(), "ALICE@example.com".into(), false).await;

    assert!(matches!(again, Err(Error::Conflict(Conflict::Email))));
  }

  #[tokio::test]
  async fn test_update_player() {
    let db = setup_test_db().await;
    let sv = Player::new(&db);
    let player = seed_player(&db, "Bob", false).await;

    let updated = sv
      .update(
        player.id,
        PlayerUpdate { remote: Some(true), ..Default::default() },
      )
      .await
      .unwrap();

    assert!(updated.remote);
    assert_eq!(updated.name, "Bob");

    let labelled = sv
      .update(
        player.id,
        PlayerUpdate { is_admin: Some(true), ..Default::default() },
      )
      .await
      .unwrap();
    assert!(labelled.is_admin);
    assert!(labelled.remote);
    assert!(matches!(
      sv.update(404, PlayerUpdate::default()).await,
      Err(Error::NotFound("Player"))
    ));
  }
}

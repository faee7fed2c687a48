use crate::{entity::blog, prelude::*, scoring, sv};

impl From<blog::Model> for scoring::Blog {
  fn from(model: blog::Model) -> Self {
    Self { player_id: model.player_id, is_first: model.is_first }
  }
}

pub struct Blog<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Blog<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Links are unique across every player and cycle. The player's first
  /// blog ever is flagged so it scores higher.
  pub async fn submit(&self, player_id: i32, url: String) -> Result<blog::Model> {
    let url = url.trim().to_string();
    if !(url.starts_with("https://") || url.starts_with("http://")) {
      return Err(Error::validation("blog link must be an http(s) url"));
    }

    let cycle = sv::Cycle::new(self.db).active_or_err().await?;
    sv::Player::new(self.db).get(player_id).await?;

    let txn = self.db.begin().await?;

    let taken = blog::Entity::find()
      .filter(blog::Column::Url.eq(url.as_str()))
      .one(&txn)
      .await?;
    if taken.is_some() {
      warn!("Player #{player_id} submitted an already claimed link {url}");
      return Err(Conflict::BlogLink.into());
    }

    let earlier = blog::Entity::find()
      .filter(blog::Column::PlayerId.eq(player_id))
      .one(&txn)
      .await?;

    let blog = blog::ActiveModel {
      id: NotSet,
      player_id: Set(player_id),
      cycle_id: Set(cycle.id),
      url: Set(url),
      is_first: Set(earlier.is_none()),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!("Player #{player_id} submitted blog #{}", blog.id);
    Ok(blog)
  }

  pub async fn by_cycle(&self, cycle_id: i32) -> Result<Vec<blog::Model>> {
    let blogs = blog::Entity::find()
      .filter(blog::Column::CycleId.eq(cycle_id))
      .order_by_asc(blog::Column::CreatedAt)
      .all(self.db)
      .await?;
    Ok(blogs)
  }
}

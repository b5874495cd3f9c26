use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;

use super::{Like, LikeAnalytics, NewUser, Post, Result, Store, StoreError, User};

#[derive(Debug, Default)]
struct Tables {
	next_id: i64,
	users: BTreeMap<i64, User>,
	posts: BTreeMap<i64, Post>,
	likes: BTreeMap<i64, Like>,
}

impl Tables {
	fn next_id(&mut self) -> i64 {
		self.next_id += 1;
		self.next_id
	}
}

/// A [`Store`] kept entirely in memory. Selected with a `memory://`
/// database uri, nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
	tables: RwLock<Tables>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Overrides the creation time of a like.
	#[cfg(test)]
	pub async fn set_like_created_at(&self, id: i64, created_at: DateTime<Utc>) -> bool {
		match self.tables.write().await.likes.get_mut(&id) {
			Some(like) => {
				like.created_at = created_at;
				true
			}
			None => false,
		}
	}

	#[cfg(test)]
	pub async fn like_count(&self) -> usize {
		self.tables.read().await.likes.len()
	}
}

#[async_trait::async_trait]
impl Store for MemoryStore {
	async fn create_user(&self, user: NewUser<'_>) -> Result<User> {
		let mut tables = self.tables.write().await;

		if tables.users.values().any(|u| u.username == user.username) {
			return Err(StoreError::UsernameTaken);
		}

		let user = User {
			id: tables.next_id(),
			username: user.username.to_owned(),
			email: user.email.map(ToOwned::to_owned),
			password_hash: user.password_hash.to_owned(),
			created_at: Utc::now(),
		};

		tables.users.insert(user.id, user.clone());

		Ok(user)
	}

	async fn user_by_id(&self, id: i64) -> Result<Option<User>> {
		Ok(self.tables.read().await.users.get(&id).cloned())
	}

	async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
		Ok(self
			.tables
			.read()
			.await
			.users
			.values()
			.find(|u| u.username == username)
			.cloned())
	}

	async fn create_post(&self, user_id: i64, content: &str) -> Result<Post> {
		let mut tables = self.tables.write().await;

		if !tables.users.contains_key(&user_id) {
			return Err(StoreError::MissingReference("user"));
		}

		let post = Post {
			id: tables.next_id(),
			user_id,
			content: content.to_owned(),
			created_at: Utc::now(),
		};

		tables.posts.insert(post.id, post.clone());

		Ok(post)
	}

	async fn post_by_id(&self, id: i64) -> Result<Option<Post>> {
		Ok(self.tables.read().await.posts.get(&id).cloned())
	}

	async fn create_like(&self, user_id: i64, message_id: i64, eval: bool) -> Result<Like> {
		let mut tables = self.tables.write().await;

		if !tables.users.contains_key(&user_id) {
			return Err(StoreError::MissingReference("user"));
		}

		if !tables.posts.contains_key(&message_id) {
			return Err(StoreError::MissingReference("post"));
		}

		let like = Like {
			id: tables.next_id(),
			user_id,
			message_id,
			eval,
			created_at: Utc::now(),
		};

		tables.likes.insert(like.id, like.clone());

		Ok(like)
	}

	async fn like_for_message(&self, user_id: i64, message_id: i64) -> Result<Option<Like>> {
		Ok(self
			.tables
			.read()
			.await
			.likes
			.values()
			.find(|l| l.user_id == user_id && l.message_id == message_id)
			.cloned())
	}

	async fn delete_like_for_message(&self, user_id: i64, message_id: i64) -> Result<Option<Like>> {
		let mut tables = self.tables.write().await;

		let Some(id) = tables
			.likes
			.values()
			.find(|l| l.user_id == user_id && l.message_id == message_id)
			.map(|l| l.id)
		else {
			return Ok(None);
		};

		Ok(tables.likes.remove(&id))
	}

	async fn like_analytics(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<LikeAnalytics>> {
		let tables = self.tables.read().await;

		let mut days = BTreeMap::<NaiveDate, i64>::new();
		for like in tables.likes.values().filter(|l| l.created_at >= from && l.created_at < to) {
			*days.entry(like.created_at.date_naive()).or_default() += 1;
		}

		Ok(days.into_iter().map(|(date, likes)| LikeAnalytics { date, likes }).collect())
	}
}

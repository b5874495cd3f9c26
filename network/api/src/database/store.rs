use chrono::{DateTime, Utc};

use super::{Like, LikeAnalytics, NewUser, Post, User};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
	#[error("database error: {0}")]
	Sqlx(#[from] sqlx::Error),
	#[error("failed to run migrations: {0}")]
	Migrate(#[from] sqlx::migrate::MigrateError),
	#[error("username is already taken")]
	UsernameTaken,
	#[error("referenced {0} does not exist")]
	MissingReference(&'static str),
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Persistence for users, posts and likes.
#[async_trait::async_trait]
pub trait Store: Send + Sync + 'static {
	async fn create_user(&self, user: NewUser<'_>) -> Result<User>;

	async fn user_by_id(&self, id: i64) -> Result<Option<User>>;

	/// Usernames are compared exactly, case included.
	async fn user_by_username(&self, username: &str) -> Result<Option<User>>;

	async fn create_post(&self, user_id: i64, content: &str) -> Result<Post>;

	async fn post_by_id(&self, id: i64) -> Result<Option<Post>>;

	/// Fails with [`StoreError::MissingReference`] when the user or post does
	/// not exist.
	async fn create_like(&self, user_id: i64, message_id: i64, eval: bool) -> Result<Like>;

	/// The oldest like or dislike the user left on the message.
	async fn like_for_message(&self, user_id: i64, message_id: i64) -> Result<Option<Like>>;

	/// Removes the record [`Store::like_for_message`] would return and hands
	/// it back. Lookup and delete happen atomically.
	async fn delete_like_for_message(&self, user_id: i64, message_id: i64) -> Result<Option<Like>>;

	/// Counts like records per UTC day for `from <= created_at < to`, ordered
	/// by day.
	async fn like_analytics(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<LikeAnalytics>>;
}

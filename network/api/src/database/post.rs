use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Post {
	/// The unique identifier for the post.
	pub id: i64,
	/// Foreign key to the user who wrote the post.
	pub user_id: i64,
	/// The text of the post.
	pub content: String,
	/// The time the post was created.
	pub created_at: DateTime<Utc>,
}

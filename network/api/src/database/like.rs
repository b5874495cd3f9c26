use chrono::{DateTime, NaiveDate, Utc};

/// A reaction of a user to a post. `eval` is `true` for a like and `false`
/// for a dislike.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Like {
	pub id: i64,
	pub user_id: i64,
	pub message_id: i64,
	pub eval: bool,
	pub created_at: DateTime<Utc>,
}

/// The number of like records created on a single UTC calendar day.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LikeAnalytics {
	pub date: NaiveDate,
	pub likes: i64,
}

use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{ConnectOptions, PgPool};

use super::{Like, LikeAnalytics, NewUser, Post, Result, Store, StoreError, User};
use crate::config::DatabaseConfig;

/// A [`Store`] backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgStore {
	pool: PgPool,
}

impl PgStore {
	pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
		let options = PgConnectOptions::from_str(&config.uri)?.disable_statement_logging();

		let pool = PgPoolOptions::new()
			.max_connections(config.max_connections)
			.connect_with(options)
			.await?;

		Ok(Self { pool })
	}

	#[cfg(test)]
	pub fn pool(&self) -> &PgPool {
		&self.pool
	}

	pub async fn migrate(&self) -> Result<()> {
		sqlx::migrate!("./migrations").run(&self.pool).await?;
		Ok(())
	}
}

fn map_constraint_error(err: sqlx::Error, reference: &'static str) -> StoreError {
	match err.as_database_error() {
		Some(db_err) if db_err.is_unique_violation() => StoreError::UsernameTaken,
		Some(db_err) if db_err.is_foreign_key_violation() => StoreError::MissingReference(reference),
		_ => StoreError::Sqlx(err),
	}
}

#[async_trait::async_trait]
impl Store for PgStore {
	async fn create_user(&self, user: NewUser<'_>) -> Result<User> {
		sqlx::query_as(
			"INSERT INTO users (username, email, password_hash) VALUES ($1, $2, $3) RETURNING id, username, email, password_hash, created_at",
		)
		.bind(user.username)
		.bind(user.email)
		.bind(user.password_hash)
		.fetch_one(&self.pool)
		.await
		.map_err(|err| map_constraint_error(err, "user"))
	}

	async fn user_by_id(&self, id: i64) -> Result<Option<User>> {
		Ok(sqlx::query_as("SELECT * FROM users WHERE id = $1")
			.bind(id)
			.fetch_optional(&self.pool)
			.await?)
	}

	async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
		Ok(sqlx::query_as("SELECT * FROM users WHERE username = $1")
			.bind(username)
			.fetch_optional(&self.pool)
			.await?)
	}

	async fn create_post(&self, user_id: i64, content: &str) -> Result<Post> {
		sqlx::query_as("INSERT INTO posts (user_id, content) VALUES ($1, $2) RETURNING *")
			.bind(user_id)
			.bind(content)
			.fetch_one(&self.pool)
			.await
			.map_err(|err| map_constraint_error(err, "user"))
	}

	async fn post_by_id(&self, id: i64) -> Result<Option<Post>> {
		Ok(sqlx::query_as("SELECT * FROM posts WHERE id = $1")
			.bind(id)
			.fetch_optional(&self.pool)
			.await?)
	}

	async fn create_like(&self, user_id: i64, message_id: i64, eval: bool) -> Result<Like> {
		sqlx::query_as("INSERT INTO likes (user_id, message_id, eval) VALUES ($1, $2, $3) RETURNING *")
			.bind(user_id)
			.bind(message_id)
			.bind(eval)
			.fetch_one(&self.pool)
			.await
			.map_err(|err| map_constraint_error(err, "post"))
	}

	async fn like_for_message(&self, user_id: i64, message_id: i64) -> Result<Option<Like>> {
		Ok(
			sqlx::query_as("SELECT * FROM likes WHERE user_id = $1 AND message_id = $2 ORDER BY id ASC LIMIT 1")
				.bind(user_id)
				.bind(message_id)
				.fetch_optional(&self.pool)
				.await?,
		)
	}

	async fn delete_like_for_message(&self, user_id: i64, message_id: i64) -> Result<Option<Like>> {
		Ok(sqlx::query_as(
			"DELETE FROM likes WHERE id = (SELECT id FROM likes WHERE user_id = $1 AND message_id = $2 ORDER BY id ASC LIMIT 1) RETURNING *",
		)
		.bind(user_id)
		.bind(message_id)
		.fetch_optional(&self.pool)
		.await?)
	}

	async fn like_analytics(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> Result<Vec<LikeAnalytics>> {
		Ok(sqlx::query_as(
			r#"
			SELECT (created_at AT TIME ZONE 'UTC')::date AS date, COUNT(eval) AS likes
			FROM likes
			WHERE created_at >= $1 AND created_at < $2
			GROUP BY 1
			ORDER BY 1 ASC
			"#,
		)
		.bind(from)
		.bind(to)
		.fetch_all(&self.pool)
		.await?)
	}
}

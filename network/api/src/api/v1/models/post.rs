use chrono::{DateTime, Utc};

use super::{BLANK, REQUIRED};
use crate::api::error::ValidationErrors;
use crate::database::Post;

/// The owner of a post is always the authenticated user, so any owner field
/// the client sends is not part of this type and gets dropped.
#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct CreatePostRequest {
	pub content: Option<String>,
}

impl CreatePostRequest {
	pub fn validate(self) -> Result<String, ValidationErrors> {
		match self.content.as_deref().map(str::trim) {
			None => Err(ValidationErrors::single("content", REQUIRED)),
			Some("") => Err(ValidationErrors::single("content", BLANK)),
			Some(content) => Ok(content.to_owned()),
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PostResponse {
	pub id: i64,
	pub user: i64,
	pub content: String,
	pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostResponse {
	fn from(post: &Post) -> Self {
		Self {
			id: post.id,
			user: post.user_id,
			content: post.content.clone(),
			created_at: post.created_at,
		}
	}
}

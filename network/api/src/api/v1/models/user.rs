use chrono::{DateTime, Utc};

use super::{BLANK, REQUIRED};
use crate::api::error::ValidationErrors;
use crate::api::v1::validators::{validate_email, validate_password, validate_username};
use crate::database::User;

#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct RegisterRequest {
	pub username: Option<String>,
	pub password: Option<String>,
	pub email: Option<String>,
}

/// A registration that passed validation. The username is kept as submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRegistration {
	pub username: String,
	pub password: String,
	pub email: Option<String>,
}

impl RegisterRequest {
	pub fn validate(self) -> Result<NewRegistration, ValidationErrors> {
		let mut errors = ValidationErrors::new();

		let username = match self.username.as_deref() {
			None => {
				errors.add("username", REQUIRED);
				String::new()
			}
			Some("") => {
				errors.add("username", BLANK);
				String::new()
			}
			Some(username) => {
				if let Err(message) = validate_username(username) {
					errors.add("username", message);
				}
				username.to_owned()
			}
		};

		let password = match self.password {
			None => {
				errors.add("password", REQUIRED);
				String::new()
			}
			Some(password) if password.is_empty() => {
				errors.add("password", BLANK);
				password
			}
			Some(password) => {
				if let Err(message) = validate_password(&password) {
					errors.add("password", message);
				}
				password
			}
		};

		// A blank email is the same as not providing one.
		let email = self.email.map(|e| e.trim().to_owned()).filter(|e| !e.is_empty());
		if let Some(email) = &email {
			if let Err(message) = validate_email(email) {
				errors.add("email", message);
			}
		}

		errors.into_result(NewRegistration {
			username,
			password,
			email,
		})
	}
}

#[derive(Debug, Default, Clone, serde::Deserialize)]
pub struct TokenRequest {
	pub username: Option<String>,
	pub password: Option<String>,
}

impl TokenRequest {
	/// Returns the username and the password. Usernames are matched exactly.
	pub fn validate(self) -> Result<(String, String), ValidationErrors> {
		let mut errors = ValidationErrors::new();

		let username = match self.username.as_deref() {
			None => {
				errors.add("username", REQUIRED);
				String::new()
			}
			Some("") => {
				errors.add("username", BLANK);
				String::new()
			}
			Some(username) => username.to_owned(),
		};

		let password = match self.password {
			None => {
				errors.add("password", REQUIRED);
				String::new()
			}
			Some(password) if password.is_empty() => {
				errors.add("password", BLANK);
				password
			}
			Some(password) => password,
		};

		errors.into_result((username, password))
	}
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TokenResponse {
	pub access: String,
	pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct UserResponse {
	pub id: i64,
	pub username: String,
	pub email: Option<String>,
	pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
	fn from(user: &User) -> Self {
		Self {
			id: user.id,
			username: user.username.clone(),
			email: user.email.clone(),
			created_at: user.created_at,
		}
	}
}

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
	/// The unique identifier for the user.
	pub id: i64,
	/// The username of the user, as it was registered.
	pub username: String,
	/// The email of the user.
	pub email: Option<String>,
	/// The hashed password of the user. (argon2)
	pub password_hash: String,
	/// The time the user was created.
	pub created_at: DateTime<Utc>,
}

/// The fields required to insert a user.
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
	pub username: &'a str,
	pub email: Option<&'a str>,
	pub password_hash: &'a str,
}

impl User {
	/// Uses argon2 to verify the password hash against the provided password.
	pub fn verify_password(&self, password: &str) -> bool {
		let hash = match PasswordHash::new(&self.password_hash) {
			Ok(hash) => hash,
			Err(err) => {
				tracing::error!(user_id = self.id, "failed to parse password hash: {}", err);
				return false;
			}
		};

		Argon2::default().verify_password(password.as_bytes(), &hash).is_ok()
	}

	/// Generates a new password hash using argon2.
	pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
		let salt = SaltString::generate(&mut OsRng);

		Ok(Argon2::default().hash_password(password.as_bytes(), &salt)?.to_string())
	}
}

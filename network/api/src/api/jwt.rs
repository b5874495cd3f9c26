use chrono::{DateTime, TimeZone, Utc};
use hmac::{Hmac, Mac};
use jwt::{Claims, Header, RegisteredClaims, SignWithKey, Token, VerifyWithKey};
use sha2::Sha256;

use crate::config::JwtConfig;

/// The claims of an access token handed out by `/v1/auth/token`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthJwtPayload {
	pub user_id: i64,
	pub expiration: Option<DateTime<Utc>>,
	pub issued_at: DateTime<Utc>,
	pub not_before: Option<DateTime<Utc>>,
	pub audience: Option<String>,
}

impl AuthJwtPayload {
	pub fn new(user_id: i64, config: &JwtConfig) -> Self {
		let issued_at = Utc::now();

		Self {
			user_id,
			expiration: chrono::Duration::from_std(config.access_token_ttl)
				.ok()
				.and_then(|ttl| issued_at.checked_add_signed(ttl)),
			issued_at,
			not_before: None,
			audience: None,
		}
	}
}

pub trait JwtState: Sized {
	fn to_claims(&self) -> Claims;

	fn from_claims(claims: &Claims) -> Option<Self>;

	fn serialize(&self, config: &JwtConfig) -> Option<String> {
		let key = Hmac::<Sha256>::new_from_slice(config.secret.as_bytes()).ok()?;
		let mut claims = self.to_claims();

		claims.registered.issuer = Some(config.issuer.clone());

		if claims.registered.issued_at.is_none() {
			claims.registered.issued_at = Some(Utc::now().timestamp() as u64);
		}

		claims.sign_with_key(&key).ok()
	}

	fn verify(config: &JwtConfig, token: &str) -> Option<Self> {
		let key = Hmac::<Sha256>::new_from_slice(config.secret.as_bytes()).ok()?;
		let token: Token<Header, Claims, _> = token.verify_with_key(&key).ok()?;

		let claims = token.claims();

		if claims.registered.issuer.as_ref() != Some(&config.issuer) {
			return None;
		}

		let now = Utc::now();

		let iat = Utc.timestamp_opt(claims.registered.issued_at? as i64, 0).single()?;
		if iat > now {
			return None;
		}

		let nbf = claims
			.registered
			.not_before
			.and_then(|x| Utc.timestamp_opt(x as i64, 0).single());
		if let Some(nbf) = nbf {
			if nbf > now {
				return None;
			}
		}

		// Tokens without an expiry are never issued, so they are rejected.
		let exp = Utc.timestamp_opt(claims.registered.expiration? as i64, 0).single()?;
		if exp < now {
			return None;
		}

		Self::from_claims(claims)
	}
}

impl JwtState for AuthJwtPayload {
	fn to_claims(&self) -> Claims {
		Claims {
			registered: RegisteredClaims {
				issuer: None,
				subject: Some(self.user_id.to_string()),
				audience: self.audience.clone(),
				expiration: self.expiration.map(|x| x.timestamp() as u64),
				not_before: self.not_before.map(|x| x.timestamp() as u64),
				issued_at: Some(self.issued_at.timestamp() as u64),
				json_web_token_id: None,
			},
			private: Default::default(),
		}
	}

	fn from_claims(claims: &Claims) -> Option<Self> {
		Some(Self {
			audience: claims.registered.audience.clone(),
			expiration: claims
				.registered
				.expiration
				.and_then(|x| Utc.timestamp_opt(x as i64, 0).single()),
			issued_at: Utc.timestamp_opt(claims.registered.issued_at? as i64, 0).single()?,
			not_before: claims
				.registered
				.not_before
				.and_then(|x| Utc.timestamp_opt(x as i64, 0).single()),
			user_id: claims.registered.subject.as_ref().and_then(|x| x.parse().ok())?,
		})
	}
}

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use common::config::{LoggingConfig, TlsConfig};

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
/// The API is the backend for the Network service
pub struct AppConfig {
	/// Name of this instance
	pub name: String,

	/// The logging config
	pub logging: LoggingConfig,

	/// API Config
	pub api: ApiConfig,

	/// Database Config
	pub database: DatabaseConfig,

	/// JWT Config
	pub jwt: JwtConfig,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ApiConfig {
	/// Bind address for the API
	pub bind_address: SocketAddr,

	/// If we should use TLS for the API server
	pub tls: Option<TlsConfig>,

	/// The largest request body we accept, in bytes
	pub max_body_size: usize,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			bind_address: SocketAddr::from(([0, 0, 0, 0, 0, 0, 0, 0], 4000)),
			tls: None,
			max_body_size: 64 * 1024,
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
	/// The database URL to use, `memory://` keeps everything in process
	pub uri: String,

	/// If the migrations should be applied on startup
	pub migrate: bool,

	/// The maximum number of pooled connections
	pub max_connections: u32,
}

impl Default for DatabaseConfig {
	fn default() -> Self {
		Self {
			uri: "postgres://root@localhost:5432/network_dev".to_string(),
			migrate: true,
			max_connections: 10,
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct JwtConfig {
	/// JWT secret
	pub secret: String,

	/// JWT issuer
	pub issuer: String,

	/// How long an access token stays valid
	#[serde(with = "humantime_serde")]
	pub access_token_ttl: Duration,
}

impl Default for JwtConfig {
	fn default() -> Self {
		Self {
			secret: "network".to_string(),
			issuer: "network".to_string(),
			access_token_ttl: Duration::from_secs(60 * 60 * 24),
		}
	}
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			name: "network-api".to_string(),
			logging: LoggingConfig::default(),
			api: ApiConfig::default(),
			database: DatabaseConfig::default(),
			jwt: JwtConfig::default(),
		}
	}
}

impl AppConfig {
	/// Returns the config and the files it was loaded from.
	pub fn parse() -> Result<(Self, Vec<String>)> {
		let parsed = common::config::parse("network-api", "The Network social API", "NETWORK", &Self::default())?;

		Ok((parsed.config, parsed.files))
	}
}

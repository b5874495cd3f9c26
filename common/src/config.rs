use std::path::Path;

use clap::ArgAction;
use serde_yaml::{Mapping, Value};

use crate::logging;

const CONFIG_ARG_ID: &str = "config";
const GENERATE_ARG_ID: &str = "generate";
const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
	#[error("failed to read config file {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse config file {path}: {source}")]
	Toml {
		path: String,
		#[source]
		source: toml::de::Error,
	},
	#[error("failed to serialize toml: {0}")]
	TomlSerialize(#[from] toml::ser::Error),
	#[error("{0}")]
	Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
	pub fn is_io(&self) -> bool {
		matches!(self, Self::Io { .. })
	}
}

#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct TlsConfig {
	/// The path to the TLS certificate
	pub cert: String,

	/// The path to the TLS private key
	pub key: String,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// The log level to use, this is a tracing env filter
	pub level: String,

	/// What logging mode we should use
	pub mode: logging::Mode,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			mode: logging::Mode::Default,
		}
	}
}

/// Layers configuration sources on top of the serialized defaults. Later
/// merges win over earlier ones, maps are merged key by key and everything
/// else is replaced.
#[derive(Debug, Clone)]
pub struct ConfigParser<C> {
	root: Value,
	_marker: std::marker::PhantomData<C>,
}

impl<C> ConfigParser<C>
where
	C: serde::Serialize + serde::de::DeserializeOwned,
{
	pub fn new(default: &C) -> Result<Self, ConfigError> {
		Ok(Self {
			root: serde_yaml::to_value(default)?,
			_marker: std::marker::PhantomData,
		})
	}

	pub fn merge(&mut self, incoming: Value) {
		let root = std::mem::take(&mut self.root);
		self.root = merge_values(root, incoming);
	}

	pub fn merge_str(&mut self, s: &str) -> Result<(), ConfigError> {
		self.merge(serde_yaml::from_str(s)?);
		Ok(())
	}

	/// Merges a TOML or YAML file, chosen by extension. Returns `false` if
	/// the file is optional and could not be read.
	pub fn merge_file(&mut self, path: impl AsRef<Path>, optional: bool) -> Result<bool, ConfigError> {
		let path = path.as_ref();
		let file_name = path.display().to_string();

		let contents = match std::fs::read_to_string(path) {
			Ok(contents) => contents,
			Err(err) if optional => {
				tracing::debug!(path = %file_name, error = %err, "skipping optional config file");
				return Ok(false);
			}
			Err(source) => return Err(ConfigError::Io { path: file_name, source }),
		};

		let incoming = match path.extension().and_then(|ext| ext.to_str()) {
			Some("toml") => {
				let value: toml::Value = toml::from_str(&contents).map_err(|source| ConfigError::Toml {
					path: file_name.clone(),
					source,
				})?;
				serde_yaml::to_value(value)?
			}
			_ => serde_yaml::from_str(&contents)?,
		};

		self.merge(incoming);

		Ok(true)
	}

	/// Applies `{PREFIX}_{SECTION}__{KEY}` style environment variables. Only
	/// keys that already exist in the configuration tree are overridden, or
	/// keys below a section that defaults to `null` such as `api.tls`.
	pub fn merge_env(&mut self, prefix: &str) {
		self.merge_env_vars(prefix, std::env::vars());
	}

	pub fn merge_env_vars(&mut self, prefix: &str, vars: impl IntoIterator<Item = (String, String)>) {
		let prefix = format!("{}_", prefix.to_ascii_uppercase());

		for (key, raw) in vars {
			let Some(key) = key.strip_prefix(&prefix) else {
				continue;
			};

			let path = key.to_ascii_lowercase();
			let path = path.split("__").collect::<Vec<_>>();

			if !set_path(&mut self.root, &path, &raw, false) {
				tracing::trace!(key, "ignoring unknown config environment variable");
			}
		}
	}

	pub fn parse(self) -> Result<C, ConfigError> {
		Ok(serde_yaml::from_value(self.root)?)
	}
}

fn merge_values(root: Value, incoming: Value) -> Value {
	match (root, incoming) {
		(Value::Mapping(mut first), Value::Mapping(second)) => {
			for (key, value) in second {
				let combined = match first.remove(&key) {
					Some(existing) => merge_values(existing, value),
					None => value,
				};
				first.insert(key, combined);
			}
			Value::Mapping(first)
		}
		(_, second) => second,
	}
}

/// Sets the value at `path`. Keys must already exist unless `create` is set,
/// which happens below a section that is `null` by default.
fn set_path(node: &mut Value, path: &[&str], raw: &str, create: bool) -> bool {
	let Some((head, rest)) = path.split_first() else {
		return false;
	};

	let Value::Mapping(map) = node else {
		return false;
	};

	if create && !map.contains_key(*head) {
		map.insert(Value::String((*head).to_owned()), Value::Null);
	}

	let Some(child) = map.get_mut(*head) else {
		return false;
	};

	if !rest.is_empty() {
		let create = create || child.is_null();
		if child.is_null() {
			*child = Value::Mapping(Mapping::new());
		}

		return set_path(child, rest, raw, create);
	}

	*child = match &*child {
		// Keep strings as strings, even if they look like numbers or booleans.
		Value::String(_) => Value::String(raw.to_string()),
		_ => serde_yaml::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string())),
	};

	true
}

#[derive(Debug)]
pub struct Parsed<C> {
	pub config: C,
	/// The config files which were found and merged, in order.
	pub files: Vec<String>,
}

fn command(name: &'static str, about: &'static str) -> clap::Command {
	clap::Command::new(name)
		.about(about)
		.arg(
			clap::Arg::new(CONFIG_ARG_ID)
				.long(CONFIG_ARG_ID)
				.short('c')
				.help("The configuration file to use")
				.value_name("FILE")
				.action(ArgAction::Append),
		)
		.arg(
			clap::Arg::new(GENERATE_ARG_ID)
				.long(GENERATE_ARG_ID)
				.help("Generate a configuration file")
				.value_name("FILE")
				.action(ArgAction::Set)
				.num_args(0..=1)
				.default_missing_value(DEFAULT_CONFIG_FILE),
		)
}

/// Parses the command line, then loads defaults, config files and the
/// environment in that order of priority.
pub fn parse<C>(name: &'static str, about: &'static str, env_prefix: &str, default: &C) -> Result<Parsed<C>, ConfigError>
where
	C: serde::Serialize + serde::de::DeserializeOwned,
{
	let args = command(name, about).get_matches();

	if let Some(file) = args.get_one::<String>(GENERATE_ARG_ID) {
		let contents = if file.ends_with(".toml") {
			toml::to_string_pretty(default)?
		} else {
			serde_yaml::to_string(default)?
		};

		std::fs::write(file, contents).map_err(|source| ConfigError::Io {
			path: file.clone(),
			source,
		})?;
		println!("Generated configuration file: {file}");
		std::process::exit(0);
	}

	let files = match args.get_many::<String>(CONFIG_ARG_ID) {
		Some(files) => files.cloned().map(|file| (file, false)).collect::<Vec<_>>(),
		None => vec![(DEFAULT_CONFIG_FILE.to_string(), true)],
	};

	let mut parser = ConfigParser::new(default)?;
	let mut loaded = Vec::new();

	for (file, optional) in files {
		if parser.merge_file(&file, optional)? {
			loaded.push(file);
		}
	}

	parser.merge_env(env_prefix);

	Ok(Parsed {
		config: parser.parse()?,
		files: loaded,
	})
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
	/// Address to bind.
	#[serde(default = "default_bind")]
	pub bind: String,

	/// Port to listen on.
	#[serde(default = "default_port")]
	pub port: u16,

	/// Directory holding `.txt` corpora.
	#[serde(default = "default_corpora_dir")]
	pub corpora_dir: PathBuf,

	/// Corpus loaded at startup (file name without extension).
	#[serde(default)]
	pub corpus: Option<String>,

	/// Only the first `max_lines` lines of a corpus are read.
	#[serde(default)]
	pub max_lines: Option<usize>,

	/// Retry budget of the unconstrained generation modes.
	#[serde(default = "default_max_retries")]
	pub max_retries: i64,

	/// Sentence length after which a boundary is forced.
	#[serde(default)]
	pub max_sentence_tokens: Option<usize>,

	/// RNG seed; seeded from the OS when absent.
	#[serde(default)]
	pub seed: Option<u64>,

	/// Longest reply, in characters, the chat transport accepts.
	#[serde(default = "default_max_message_len")]
	pub max_message_len: usize,

	/// Chat bot settings.
	#[serde(default)]
	pub bot: BotConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
	#[serde(default = "default_bot_name")]
	pub name: String,
	#[serde(default = "default_bot_prefix")]
	pub prefix: String,
}

fn default_bind() -> String {
	"127.0.0.1".to_string()
}
fn default_port() -> u16 {
	5000
}
fn default_corpora_dir() -> PathBuf {
	PathBuf::from("./corpora")
}
fn default_max_retries() -> i64 {
	20
}
fn default_max_message_len() -> usize {
	2000
}
fn default_bot_name() -> String {
	"babble".to_string()
}
fn default_bot_prefix() -> String {
	"!".to_string()
}

impl Default for BotConfig {
	fn default() -> Self {
		Self {
			name: default_bot_name(),
			prefix: default_bot_prefix(),
		}
	}
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			bind: default_bind(),
			port: default_port(),
			corpora_dir: default_corpora_dir(),
			corpus: None,
			max_lines: None,
			max_retries: default_max_retries(),
			max_sentence_tokens: None,
			seed: None,
			max_message_len: default_max_message_len(),
			bot: BotConfig::default(),
		}
	}
}

impl ServerConfig {
	/// Parses a configuration from TOML text.
	pub fn from_toml(text: &str) -> Result<Self> {
		toml::from_str(text).context("invalid configuration")
	}

	/// Loads the configuration file at `path`.
	pub fn load(path: &Path) -> Result<Self> {
		let text = fs::read_to_string(path)
			.with_context(|| format!("failed to read config file '{}'", path.display()))?;
		Self::from_toml(&text).with_context(|| format!("in config file '{}'", path.display()))
	}

	/// Loads `path`, or falls back to defaults when the file does not exist.
	pub fn load_or_default(path: &Path) -> Result<Self> {
		if path.exists() {
			Self::load(path)
		} else {
			log::warn!("config file '{}' not found, using defaults", path.display());
			Ok(Self::default())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_file_gives_defaults() {
		let cfg = ServerConfig::from_toml("").unwrap();
		assert_eq!(cfg.bind, "127.0.0.1");
		assert_eq!(cfg.port, 5000);
		assert_eq!(cfg.corpora_dir, PathBuf::from("./corpora"));
		assert_eq!(cfg.corpus, None);
		assert_eq!(cfg.max_retries, 20);
		assert_eq!(cfg.max_message_len, 2000);
		assert_eq!(cfg.bot.name, "babble");
		assert_eq!(cfg.bot.prefix, "!");
	}

	#[test]
	fn full_file() {
		let cfg = ServerConfig::from_toml(
			r#"
			bind = "0.0.0.0"
			port = 8080
			corpora_dir = "/srv/corpora"
			corpus = "seinfeld"
			max_lines = 10000
			max_retries = 5
			max_sentence_tokens = 64
			seed = 42
			max_message_len = 500

			[bot]
			name = "george"
			prefix = "?"
			"#,
		)
		.unwrap();
		assert_eq!(cfg.port, 8080);
		assert_eq!(cfg.corpus.as_deref(), Some("seinfeld"));
		assert_eq!(cfg.max_lines, Some(10000));
		assert_eq!(cfg.max_sentence_tokens, Some(64));
		assert_eq!(cfg.seed, Some(42));
		assert_eq!(cfg.bot.name, "george");
		assert_eq!(cfg.bot.prefix, "?");
	}

	#[test]
	fn unknown_keys_are_rejected() {
		assert!(ServerConfig::from_toml("colour = \"blue\"").is_err());
	}

	#[test]
	fn missing_file_falls_back_to_defaults() {
		let cfg = ServerConfig::load_or_default(Path::new("/no/such/babble.toml")).unwrap();
		assert_eq!(cfg.port, 5000);
	}
}

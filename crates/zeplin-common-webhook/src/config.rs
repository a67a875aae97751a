// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Webhook configuration loaded from the environment.
//!
//! The secret follows the `VAR` / `VAR_FILE` convention used for Docker and
//! Kubernetes secrets: if `ZEPLIN_WEBHOOK_SECRET_FILE` is set the secret is
//! read from that path, otherwise `ZEPLIN_WEBHOOK_SECRET` is used directly.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::error::VerifierError;
use crate::secret::SecretKey;
use crate::verifier::{SignatureVerifier, VerifierOptions};

pub const SECRET_VAR: &str = "ZEPLIN_WEBHOOK_SECRET";
pub const EXPIRATION_VAR: &str = "ZEPLIN_WEBHOOK_EXPIRATION_MS";

/// Errors that can occur when loading webhook configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("required secret not found: set either {var} or {file_var}")]
	MissingSecret { var: String, file_var: String },

	#[error("secret file path in {var} is empty")]
	EmptyPath { var: String },

	#[error("failed to read secret file at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("invalid {var}: {value}")]
	InvalidExpiration { var: String, value: String },

	#[error(transparent)]
	Verifier(#[from] VerifierError),
}

/// Settings needed to build a [`SignatureVerifier`].
#[derive(Debug, Clone)]
pub struct WebhookConfig {
	secret: SecretKey,
	expiration_window: Option<Duration>,
}

impl WebhookConfig {
	pub fn new(secret: impl Into<SecretKey>) -> Self {
		Self {
			secret: secret.into(),
			expiration_window: None,
		}
	}

	/// Load configuration from process environment variables.
	///
	/// - `ZEPLIN_WEBHOOK_SECRET` / `ZEPLIN_WEBHOOK_SECRET_FILE` (required)
	/// - `ZEPLIN_WEBHOOK_EXPIRATION_MS` (optional, `0` disables expiration)
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_lookup(|var| env::var(var).ok())
	}

	/// Load configuration through an arbitrary variable lookup.
	pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let secret = load_secret(&lookup, SECRET_VAR)?;

		let expiration_window = match lookup(EXPIRATION_VAR) {
			Some(raw) => parse_expiration(&raw)?,
			None => None,
		};

		Ok(Self {
			secret,
			expiration_window,
		})
	}

	pub fn with_expiration_window(mut self, window: Option<Duration>) -> Self {
		self.expiration_window = window;
		self
	}

	pub fn secret(&self) -> &SecretKey {
		&self.secret
	}

	pub fn expiration_window(&self) -> Option<Duration> {
		self.expiration_window
	}

	/// Build a verifier from this configuration.
	pub fn into_verifier(self) -> Result<SignatureVerifier, ConfigError> {
		let options = VerifierOptions {
			expiration_window: self.expiration_window,
		};
		Ok(SignatureVerifier::new(self.secret, options)?)
	}
}

fn load_secret<F>(lookup: &F, var: &str) -> Result<SecretKey, ConfigError>
where
	F: Fn(&str) -> Option<String>,
{
	let file_var = format!("{var}_FILE");

	if let Some(path_str) = lookup(&file_var) {
		if path_str.is_empty() {
			return Err(ConfigError::EmptyPath { var: file_var });
		}

		let path = PathBuf::from(&path_str);
		let content = fs::read_to_string(&path).map_err(|e| ConfigError::Io {
			path: path.clone(),
			source: e,
		})?;

		let secret = content.strip_suffix('\n').unwrap_or(&content);
		return Ok(SecretKey::from(secret));
	}

	lookup(var)
		.map(SecretKey::from)
		.ok_or_else(|| ConfigError::MissingSecret {
			var: var.to_string(),
			file_var,
		})
}

fn parse_expiration(raw: &str) -> Result<Option<Duration>, ConfigError> {
	let millis: u64 = raw
		.trim()
		.parse()
		.map_err(|_| ConfigError::InvalidExpiration {
			var: EXPIRATION_VAR.to_string(),
			value: raw.to_string(),
		})?;

	Ok((millis > 0).then(|| Duration::from_millis(millis)))
}

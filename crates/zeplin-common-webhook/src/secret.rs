// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Secret key wrapper that keeps the webhook secret out of logs.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Placeholder printed in place of secret material.
pub const REDACTED: &str = "[REDACTED]";

/// The shared webhook secret.
///
/// The bytes are wiped from memory when the key is dropped, and neither
/// `Debug` nor `Display` ever print them. Use [`SecretKey::expose`] when the
/// raw bytes are actually needed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
	pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
		Self(bytes.into())
	}

	/// Access the raw secret bytes.
	pub fn expose(&self) -> &[u8] {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Debug for SecretKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SecretKey").field(&REDACTED).finish()
	}
}

impl fmt::Display for SecretKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl From<&str> for SecretKey {
	fn from(value: &str) -> Self {
		Self::new(value.as_bytes())
	}
}

impl From<String> for SecretKey {
	fn from(value: String) -> Self {
		Self::new(value.into_bytes())
	}
}

impl From<&[u8]> for SecretKey {
	fn from(value: &[u8]) -> Self {
		Self::new(value)
	}
}

impl From<Vec<u8>> for SecretKey {
	fn from(value: Vec<u8>) -> Self {
		Self::new(value)
	}
}

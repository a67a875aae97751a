// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for building a signature verifier.

use thiserror::Error;

/// Errors that can occur when constructing a [`crate::SignatureVerifier`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifierError {
	/// The webhook secret was empty.
	#[error("webhook secret must not be empty")]
	EmptySecret,
}

// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Verification of inbound Zeplin webhook deliveries.
//!
//! A delivery carries a timestamp (milliseconds since the Unix epoch), the raw
//! payload and a hex-encoded HMAC-SHA256 signature over
//! `"{timestamp}.{payload}"`. [`SignatureVerifier`] recomputes that signature
//! with the shared secret, compares it in constant time and optionally rejects
//! deliveries older than a configured expiration window.
//!
//! ```
//! use zeplin_common_webhook::{compute_signature, SignatureVerifier, VerificationResult, VerifierOptions};
//!
//! let verifier = SignatureVerifier::new("abc123", VerifierOptions::default())?;
//! let timestamp = 1_700_000_000_000;
//! let payload = br#"{"a":1}"#;
//! let signature = compute_signature(b"abc123", timestamp, payload);
//!
//! assert_eq!(
//! 	verifier.verify(timestamp, payload, &signature),
//! 	VerificationResult::Accepted
//! );
//! # Ok::<(), zeplin_common_webhook::VerifierError>(())
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod secret;
pub mod signature;
pub mod verifier;

pub use compare::{ConstantTimeComparator, SignatureComparator};
pub use config::{ConfigError, WebhookConfig};
pub use error::VerifierError;
pub use secret::SecretKey;
pub use signature::compute_signature;
pub use verifier::{RejectionReason, SignatureVerifier, VerificationResult, VerifierOptions};

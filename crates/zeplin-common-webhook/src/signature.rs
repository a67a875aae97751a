// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HMAC-SHA256 signatures over `"{timestamp}.{payload}"`.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the signature of a webhook delivery.
///
/// The signed message is the decimal timestamp, a `.` separator and the
/// payload bytes exactly as they were sent. The payload must not be
/// re-serialized: any change in key order or whitespace changes the result.
///
/// Returns the lowercase hex-encoded digest without any prefix. Senders use
/// the same function to sign a delivery.
pub fn compute_signature(secret: &[u8], timestamp: i64, payload: &[u8]) -> String {
	let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
	mac.update(timestamp.to_string().as_bytes());
	mac.update(b".");
	mac.update(payload);
	hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
	use super::*;

	const TEST_SECRET: &[u8] = b"abc123";
	const TEST_TIMESTAMP: i64 = 1_700_000_000_000;
	const TEST_PAYLOAD: &[u8] = br#"{"a":1}"#;

	#[test]
	fn test_signature_is_lowercase_hex() {
		let sig = compute_signature(TEST_SECRET, TEST_TIMESTAMP, TEST_PAYLOAD);
		assert_eq!(sig.len(), 64);
		assert!(sig
			.chars()
			.all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
	}

	#[test]
	fn test_signature_covers_joined_message() {
		let mut mac = HmacSha256::new_from_slice(TEST_SECRET).unwrap();
		mac.update(br#"1700000000000.{"a":1}"#);
		let expected = hex::encode(mac.finalize().into_bytes());

		assert_eq!(
			compute_signature(TEST_SECRET, TEST_TIMESTAMP, TEST_PAYLOAD),
			expected
		);
	}

	#[test]
	fn test_known_vector() {
		assert_eq!(
			compute_signature(TEST_SECRET, TEST_TIMESTAMP, TEST_PAYLOAD),
			"c84d3e7051ca755825801249037fffc6b2cd6ea777f6cd1bd63d9f0fe0d9042a"
		);
	}

	#[test]
	fn test_whitespace_changes_signature() {
		let compact = compute_signature(TEST_SECRET, TEST_TIMESTAMP, br#"{"a":1}"#);
		let spaced = compute_signature(TEST_SECRET, TEST_TIMESTAMP, br#"{"a": 1}"#);
		assert_ne!(compact, spaced);
	}

	#[test]
	fn test_timestamp_changes_signature() {
		let a = compute_signature(TEST_SECRET, TEST_TIMESTAMP, TEST_PAYLOAD);
		let b = compute_signature(TEST_SECRET, TEST_TIMESTAMP + 1, TEST_PAYLOAD);
		assert_ne!(a, b);
	}

	#[test]
	fn test_negative_timestamp_is_signed_verbatim() {
		assert_eq!(
			compute_signature(TEST_SECRET, -5, b"x"),
			"1fe7e573ee3252f72540ba7e149ffa3e500bf78ef7e2dafc9be34e833a50ecd2"
		);
	}
}

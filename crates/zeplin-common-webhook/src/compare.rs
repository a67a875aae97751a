// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Signature comparison primitives.

use subtle::ConstantTimeEq;

/// Compares a claimed signature with the expected one.
///
/// Implementations must not short-circuit on the first differing byte.
/// Inputs of different length must compare as not equal.
pub trait SignatureComparator: Send + Sync {
	fn equals(&self, claimed: &[u8], expected: &[u8]) -> bool;
}

/// Comparator backed by [`subtle::ConstantTimeEq`].
///
/// Slices of unequal length are rejected up front; only the length is
/// observable, never the position of a mismatch.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantTimeComparator;

impl SignatureComparator for ConstantTimeComparator {
	fn equals(&self, claimed: &[u8], expected: &[u8]) -> bool {
		claimed.ct_eq(expected).into()
	}
}

impl<F> SignatureComparator for F
where
	F: Fn(&[u8], &[u8]) -> bool + Send + Sync,
{
	fn equals(&self, claimed: &[u8], expected: &[u8]) -> bool {
		self(claimed, expected)
	}
}

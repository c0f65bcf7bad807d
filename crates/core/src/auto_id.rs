// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Cursor over a pre-reserved interval `[current, end)` of identifiers.
///
/// Each allocation hands out the next `n` values and advances the cursor, so
/// a value is never handed out twice by the same range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoIdRange {
	current: i64,
	end: i64,
}

impl AutoIdRange {
	pub fn new(begin: i64, end: i64) -> Self {
		debug_assert!(begin <= end);
		Self {
			current: begin,
			end: end.max(begin),
		}
	}

	pub fn current(&self) -> i64 {
		self.current
	}

	pub fn end(&self) -> i64 {
		self.end
	}

	pub fn remaining(&self) -> u64 {
		self.end.abs_diff(self.current)
	}

	/// Allocates the next `n` identifiers.
	///
	/// Returns `None` without moving the cursor when fewer than `n` values
	/// are left.
	pub fn alloc(&mut self, n: usize) -> Option<Range<i64>> {
		if n as u64 > self.remaining() {
			return None;
		}
		let begin = self.current;
		self.current = begin.checked_add_unsigned(n as u64)?;
		Some(begin..self.current)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_alloc_advances_cursor() {
		let mut range = AutoIdRange::new(1000, 2000);
		assert_eq!(range.alloc(10), Some(1000..1010));
		assert_eq!(range.alloc(5), Some(1010..1015));
		assert_eq!(range.current(), 1015);
		assert_eq!(range.remaining(), 985);
	}

	#[test]
	fn test_alloc_zero() {
		let mut range = AutoIdRange::new(7, 7);
		assert_eq!(range.alloc(0), Some(7..7));
		assert_eq!(range.current(), 7);
	}

	#[test]
	fn test_exhaustion_leaves_cursor() {
		let mut range = AutoIdRange::new(0, 10);
		assert_eq!(range.alloc(8), Some(0..8));
		assert_eq!(range.alloc(3), None);
		assert_eq!(range.current(), 8);
		assert_eq!(range.alloc(2), Some(8..10));
		assert_eq!(range.remaining(), 0);
	}

	#[test]
	fn test_full_width_range() {
		let mut range = AutoIdRange::new(i64::MIN, i64::MAX);
		assert_eq!(range.remaining(), u64::MAX);
		assert_eq!(range.alloc(1), Some(i64::MIN..i64::MIN + 1));
		assert_eq!(range.remaining(), u64::MAX - 1);

		let mut range = AutoIdRange::new(-5, i64::MAX);
		assert_eq!(range.alloc(usize::MAX), None);
		assert_eq!(range.current(), -5);
		assert_eq!(range.alloc(10), Some(-5..5));
	}
}

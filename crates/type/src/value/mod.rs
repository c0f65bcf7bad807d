// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub mod r#type;

/// Hybrid timestamp assigned once per import task.
///
/// Every row written by the task is stamped with the same value, so the
/// time range of each commit collapses to a single point.
#[repr(transparent)]
#[derive(Debug, Copy, Clone, Default, PartialOrd, PartialEq, Ord, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
	/// The timestamp as stored in the timestamp system column.
	pub fn as_i64(self) -> i64 {
		self.0 as i64
	}
}

impl From<u64> for Timestamp {
	fn from(value: u64) -> Self {
		Self(value)
	}
}

impl Display for Timestamp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PrimaryKey {
	Int64(i64),
	VarChar(String),
}

impl PrimaryKey {
	/// Stable byte representation used for hashing.
	pub fn as_bytes(&self) -> Vec<u8> {
		match self {
			PrimaryKey::Int64(v) => v.to_le_bytes().to_vec(),
			PrimaryKey::VarChar(v) => v.as_bytes().to_vec(),
		}
	}
}

impl From<i64> for PrimaryKey {
	fn from(value: i64) -> Self {
		PrimaryKey::Int64(value)
	}
}

impl From<&str> for PrimaryKey {
	fn from(value: &str) -> Self {
		PrimaryKey::VarChar(value.to_string())
	}
}

impl Display for PrimaryKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			PrimaryKey::Int64(v) => Display::fmt(v, f),
			PrimaryKey::VarChar(v) => f.write_str(v),
		}
	}
}

// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Declared data type of a schema field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	Bool,
	Int8,
	Int16,
	Int32,
	Int64,
	Float,
	Double,
	VarChar,
	Json,
	FloatVector,
	BinaryVector,
}

impl Type {
	pub fn is_vector(&self) -> bool {
		matches!(self, Type::FloatVector | Type::BinaryVector)
	}

	/// Whether the type may back a primary key.
	pub fn is_primary_key_capable(&self) -> bool {
		matches!(self, Type::Int64 | Type::VarChar)
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Bool => f.write_str("BOOL"),
			Type::Int8 => f.write_str("INT8"),
			Type::Int16 => f.write_str("INT16"),
			Type::Int32 => f.write_str("INT32"),
			Type::Int64 => f.write_str("INT64"),
			Type::Float => f.write_str("FLOAT"),
			Type::Double => f.write_str("DOUBLE"),
			Type::VarChar => f.write_str("VARCHAR"),
			Type::Json => f.write_str("JSON"),
			Type::FloatVector => f.write_str("FLOAT_VECTOR"),
			Type::BinaryVector => f.write_str("BINARY_VECTOR"),
		}
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::mem::size_of;

use serde::{Deserialize, Serialize};
use stratum_type::Type;

use crate::value::PrimaryKey;

/// Decoded values of one field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColumnData {
	Bool(Vec<bool>),
	Int8(Vec<i8>),
	Int16(Vec<i16>),
	Int32(Vec<i32>),
	Int64(Vec<i64>),
	Float(Vec<f32>),
	Double(Vec<f64>),
	VarChar(Vec<String>),
	Json(Vec<Vec<u8>>),
	/// Row-major floats, `dim` values per row.
	FloatVector {
		dim: usize,
		data: Vec<f32>,
	},
	/// Row-major bit-packed vectors, `dim` bits per row.
	BinaryVector {
		dim: usize,
		data: Vec<u8>,
	},
}

impl ColumnData {
	pub fn get_type(&self) -> Type {
		match self {
			ColumnData::Bool(_) => Type::Bool,
			ColumnData::Int8(_) => Type::Int8,
			ColumnData::Int16(_) => Type::Int16,
			ColumnData::Int32(_) => Type::Int32,
			ColumnData::Int64(_) => Type::Int64,
			ColumnData::Float(_) => Type::Float,
			ColumnData::Double(_) => Type::Double,
			ColumnData::VarChar(_) => Type::VarChar,
			ColumnData::Json(_) => Type::Json,
			ColumnData::FloatVector { .. } => Type::FloatVector,
			ColumnData::BinaryVector { .. } => Type::BinaryVector,
		}
	}

	pub fn row_num(&self) -> usize {
		match self {
			ColumnData::Bool(v) => v.len(),
			ColumnData::Int8(v) => v.len(),
			ColumnData::Int16(v) => v.len(),
			ColumnData::Int32(v) => v.len(),
			ColumnData::Int64(v) => v.len(),
			ColumnData::Float(v) => v.len(),
			ColumnData::Double(v) => v.len(),
			ColumnData::VarChar(v) => v.len(),
			ColumnData::Json(v) => v.len(),
			ColumnData::FloatVector { dim, data } => {
				if *dim == 0 {
					0
				} else {
					data.len() / dim
				}
			}
			ColumnData::BinaryVector { dim, data } => {
				let bytes_per_row = dim / 8;
				if bytes_per_row == 0 {
					0
				} else {
					data.len() / bytes_per_row
				}
			}
		}
	}

	pub fn is_empty(&self) -> bool {
		self.row_num() == 0
	}

	/// Approximate in-memory size of the values in bytes.
	pub fn byte_size(&self) -> usize {
		match self {
			ColumnData::Bool(v) => v.len() * size_of::<bool>(),
			ColumnData::Int8(v) => v.len() * size_of::<i8>(),
			ColumnData::Int16(v) => v.len() * size_of::<i16>(),
			ColumnData::Int32(v) => v.len() * size_of::<i32>(),
			ColumnData::Int64(v) => v.len() * size_of::<i64>(),
			ColumnData::Float(v) => v.len() * size_of::<f32>(),
			ColumnData::Double(v) => v.len() * size_of::<f64>(),
			// strings and json carry an 8 byte offset per row
			ColumnData::VarChar(v) => v.iter().map(|s| s.len() + 8).sum(),
			ColumnData::Json(v) => v.iter().map(|s| s.len() + 8).sum(),
			ColumnData::FloatVector { data, .. } => data.len() * size_of::<f32>(),
			ColumnData::BinaryVector { data, .. } => data.len(),
		}
	}

	/// Primary key at `idx`, for the column types that can back one.
	pub fn primary_key(&self, idx: usize) -> Option<PrimaryKey> {
		match self {
			ColumnData::Int64(v) => v.get(idx).map(|v| PrimaryKey::Int64(*v)),
			ColumnData::VarChar(v) => v.get(idx).map(|v| PrimaryKey::VarChar(v.clone())),
			_ => None,
		}
	}
}

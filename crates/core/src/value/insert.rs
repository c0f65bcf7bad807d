// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use stratum_type::FieldId;

use crate::value::ColumnData;

/// Column-oriented insert buffer keyed by field.
///
/// Columns keep their insertion order, which makes "the first field" of a
/// buffer well defined.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InsertData {
	columns: IndexMap<FieldId, ColumnData>,
}

impl InsertData {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_column(mut self, field: impl Into<FieldId>, data: ColumnData) -> Self {
		self.insert(field.into(), data);
		self
	}

	/// Sets the column of `field`, returning the column it replaced.
	pub fn insert(&mut self, field: FieldId, data: ColumnData) -> Option<ColumnData> {
		self.columns.insert(field, data)
	}

	pub fn get(&self, field: FieldId) -> Option<&ColumnData> {
		self.columns.get(&field)
	}

	pub fn contains(&self, field: FieldId) -> bool {
		self.columns.contains_key(&field)
	}

	pub fn iter(&self) -> impl Iterator<Item = (FieldId, &ColumnData)> {
		self.columns.iter().map(|(field, data)| (*field, data))
	}

	pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
		self.columns.keys().copied()
	}

	/// Number of columns in the buffer.
	pub fn len(&self) -> usize {
		self.columns.len()
	}

	pub fn is_empty(&self) -> bool {
		self.columns.is_empty()
	}

	/// Row count of the first column that holds any rows.
	pub fn row_num(&self) -> usize {
		self.columns.values().map(ColumnData::row_num).find(|rows| *rows > 0).unwrap_or(0)
	}

	/// Approximate size of all columns in bytes.
	pub fn byte_size(&self) -> usize {
		self.columns.values().map(ColumnData::byte_size).sum()
	}
}

impl IntoIterator for InsertData {
	type Item = (FieldId, ColumnData);
	type IntoIter = indexmap::map::IntoIter<FieldId, ColumnData>;

	fn into_iter(self) -> Self::IntoIter {
		self.columns.into_iter()
	}
}

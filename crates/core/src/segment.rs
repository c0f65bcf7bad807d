// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Display, Formatter},
	sync::Arc,
};

use serde::{Deserialize, Serialize};
use stratum_type::{CollectionId, FieldId, PartitionId, SegmentId};

use crate::{
	util::bloom::{BloomFilter, BloomFilterBuilder},
	value::{ColumnData, PrimaryKey},
};

/// Lifecycle state of a segment as tracked by the metadata cache.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentState {
	/// Receiving import batches; the only valid destination for new data.
	Importing,
	/// All batches are durable and the segment is handed to normal lifecycle
	/// management.
	Flushed,
}

impl Display for SegmentState {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			SegmentState::Importing => f.write_str("Importing"),
			SegmentState::Flushed => f.write_str("Flushed"),
		}
	}
}

/// What the import pipeline knows about a segment when it registers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentDescriptor {
	pub id: SegmentId,
	pub collection: CollectionId,
	pub partition: PartitionId,
	pub channel: String,
	pub state: SegmentState,
}

/// Primary-key statistics of one committed batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PkStatistics {
	pub field: FieldId,
	pub min: Option<PrimaryKey>,
	pub max: Option<PrimaryKey>,
	pub bloom: BloomFilter,
}

impl PkStatistics {
	pub fn new(field: FieldId, expected_rows: usize) -> Self {
		Self {
			field,
			min: None,
			max: None,
			bloom: BloomFilterBuilder::new(expected_rows).build(),
		}
	}

	/// Statistics over every key of a primary key column.
	pub fn from_column(field: FieldId, column: &ColumnData) -> Self {
		let rows = column.row_num();
		let mut stats = Self::new(field, rows);
		for idx in 0..rows {
			if let Some(pk) = column.primary_key(idx) {
				stats.update(&pk);
			}
		}
		stats
	}

	pub fn update(&mut self, pk: &PrimaryKey) {
		self.bloom.add(&pk.as_bytes());
		if self.min.as_ref().map_or(true, |min| pk < min) {
			self.min = Some(pk.clone());
		}
		if self.max.as_ref().map_or(true, |max| pk > max) {
			self.max = Some(pk.clone());
		}
	}

	pub fn may_contain(&self, pk: &PrimaryKey) -> bool {
		match (&self.min, &self.max) {
			(Some(min), Some(max)) if pk >= min && pk <= max => self.bloom.might_contain(&pk.as_bytes()),
			_ => false,
		}
	}
}

/// Per-segment history of primary-key statistics used for existence checks.
///
/// Cloning is cheap: the statistics themselves are shared.
#[derive(Debug, Clone, Default)]
pub struct BloomFilterSet {
	history: Vec<Arc<PkStatistics>>,
}

impl BloomFilterSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds the statistics of a newly committed batch.
	pub fn roll(&mut self, stats: Arc<PkStatistics>) {
		self.history.push(stats);
	}

	pub fn may_contain(&self, pk: &PrimaryKey) -> bool {
		self.history.iter().any(|stats| stats.may_contain(pk))
	}

	pub fn history(&self) -> &[Arc<PkStatistics>] {
		&self.history
	}

	pub fn is_empty(&self) -> bool {
		self.history.is_empty()
	}
}

/// A segment entry in a channel's metadata cache.
#[derive(Debug, Clone)]
pub struct SegmentInfo {
	pub id: SegmentId,
	pub collection: CollectionId,
	pub partition: PartitionId,
	pub channel: String,
	pub state: SegmentState,
	/// Rows that reached storage through completed sync tasks.
	pub flushed_rows: u64,
	pub bloom_filter_set: BloomFilterSet,
}

impl SegmentInfo {
	pub fn new(descriptor: SegmentDescriptor, bloom_filter_set: BloomFilterSet) -> Self {
		Self {
			id: descriptor.id,
			collection: descriptor.collection,
			partition: descriptor.partition,
			channel: descriptor.channel,
			state: descriptor.state,
			flushed_rows: 0,
			bloom_filter_set,
		}
	}

	pub fn flushed_rows(&self) -> u64 {
		self.flushed_rows
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! One durable commit: the package handed to a serializer and the task it
//! produces.

use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use stratum_type::{
	CollectionId, FieldId, LogId, PartitionId, Result, SegmentId, Timestamp, diagnostic::storage, return_error,
};
use tracing::{debug, instrument};

use crate::{
	interface::{ChunkManager, MetaCache},
	segment::PkStatistics,
	value::InsertData,
};

/// Immutable description of one commit.
#[derive(Debug, Clone, Default)]
pub struct SyncPack {
	insert_data: Option<InsertData>,
	collection: CollectionId,
	partition: PartitionId,
	channel: String,
	segment: SegmentId,
	ts_from: Timestamp,
	ts_to: Timestamp,
	batch_size: u64,
}

impl SyncPack {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_insert_data(mut self, data: InsertData) -> Self {
		self.insert_data = Some(data);
		self
	}

	pub fn with_collection(mut self, collection: CollectionId) -> Self {
		self.collection = collection;
		self
	}

	pub fn with_partition(mut self, partition: PartitionId) -> Self {
		self.partition = partition;
		self
	}

	pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
		self.channel = channel.into();
		self
	}

	pub fn with_segment(mut self, segment: SegmentId) -> Self {
		self.segment = segment;
		self
	}

	pub fn with_time_range(mut self, from: Timestamp, to: Timestamp) -> Self {
		self.ts_from = from;
		self.ts_to = to;
		self
	}

	pub fn with_batch_size(mut self, batch_size: u64) -> Self {
		self.batch_size = batch_size;
		self
	}

	pub fn insert_data(&self) -> Option<&InsertData> {
		self.insert_data.as_ref()
	}

	pub fn take_insert_data(&mut self) -> Option<InsertData> {
		self.insert_data.take()
	}

	pub fn collection(&self) -> CollectionId {
		self.collection
	}

	pub fn partition(&self) -> PartitionId {
		self.partition
	}

	pub fn channel(&self) -> &str {
		&self.channel
	}

	pub fn segment(&self) -> SegmentId {
		self.segment
	}

	pub fn time_range(&self) -> (Timestamp, Timestamp) {
		(self.ts_from, self.ts_to)
	}

	pub fn batch_size(&self) -> u64 {
		self.batch_size
	}
}

/// Reference to one persisted log artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binlog {
	pub log_id: LogId,
	pub entries_num: u64,
	pub timestamp_from: Timestamp,
	pub timestamp_to: Timestamp,
	pub log_path: String,
	pub log_size: u64,
}

/// Log artifacts of one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinlog {
	pub field: FieldId,
	pub binlogs: Vec<Binlog>,
}

/// The unit of work that makes one batch durable.
///
/// Produced by a [`Serializer`](crate::interface::Serializer); the encoded
/// artifacts are written by [`SyncTask::run`], after which the segment's
/// flushed row counter and bloom filters in the metadata cache reflect the
/// batch.
pub struct SyncTask {
	collection: CollectionId,
	partition: PartitionId,
	segment: SegmentId,
	channel: String,
	batch_rows: u64,
	insert_binlogs: BTreeMap<FieldId, FieldBinlog>,
	stats_binlogs: BTreeMap<FieldId, FieldBinlog>,
	pk_stats: Option<Arc<PkStatistics>>,
	blobs: Vec<(String, Vec<u8>)>,
	synced: bool,
	metacache: Arc<dyn MetaCache>,
}

impl SyncTask {
	pub fn new(metacache: Arc<dyn MetaCache>, pack: &SyncPack) -> Self {
		Self {
			collection: pack.collection(),
			partition: pack.partition(),
			segment: pack.segment(),
			channel: pack.channel().to_string(),
			batch_rows: 0,
			insert_binlogs: BTreeMap::new(),
			stats_binlogs: BTreeMap::new(),
			pk_stats: None,
			blobs: Vec::new(),
			synced: false,
			metacache,
		}
	}

	pub fn with_batch_rows(mut self, rows: u64) -> Self {
		self.batch_rows = rows;
		self
	}

	/// Adds an insert log artifact together with its encoded bytes.
	pub fn with_insert_binlog(mut self, field: FieldId, binlog: Binlog, blob: Vec<u8>) -> Self {
		self.blobs.push((binlog.log_path.clone(), blob));
		push_binlog(&mut self.insert_binlogs, field, binlog);
		self
	}

	/// Adds a statistics log artifact together with its encoded bytes.
	pub fn with_stats_binlog(mut self, field: FieldId, binlog: Binlog, blob: Vec<u8>) -> Self {
		self.blobs.push((binlog.log_path.clone(), blob));
		push_binlog(&mut self.stats_binlogs, field, binlog);
		self
	}

	pub fn with_pk_stats(mut self, stats: PkStatistics) -> Self {
		self.pk_stats = Some(Arc::new(stats));
		self
	}

	pub fn collection(&self) -> CollectionId {
		self.collection
	}

	pub fn partition(&self) -> PartitionId {
		self.partition
	}

	pub fn segment_id(&self) -> SegmentId {
		self.segment
	}

	pub fn channel_name(&self) -> &str {
		&self.channel
	}

	pub fn batch_rows(&self) -> u64 {
		self.batch_rows
	}

	/// Insert and statistics log artifacts, keyed by field.
	pub fn binlogs(&self) -> (&BTreeMap<FieldId, FieldBinlog>, &BTreeMap<FieldId, FieldBinlog>) {
		(&self.insert_binlogs, &self.stats_binlogs)
	}

	pub fn pk_stats(&self) -> Option<&PkStatistics> {
		self.pk_stats.as_deref()
	}

	pub fn is_synced(&self) -> bool {
		self.synced
	}

	/// Writes all pending artifacts and publishes the batch to the metadata
	/// cache.
	///
	/// Artifacts are only dropped once every write succeeded, so a failed run
	/// can be repeated. A completed run is a no-op.
	#[instrument(name = "sync::task::run", level = "debug", skip(self, chunks), fields(segment = %self.segment, channel = %self.channel, rows = self.batch_rows))]
	pub async fn run(&mut self, chunks: &dyn ChunkManager) -> Result<()> {
		if self.synced {
			return Ok(());
		}

		for (path, blob) in &self.blobs {
			chunks.write(path, blob).await?;
		}

		let rows = self.batch_rows;
		let stats = self.pk_stats.clone();
		let found = self.metacache.update_segment(self.segment, &mut |segment| {
			segment.flushed_rows += rows;
			if let Some(stats) = &stats {
				segment.bloom_filter_set.roll(stats.clone());
			}
		});
		if !found {
			return_error!(storage::segment_not_registered(self.segment.0, &self.channel));
		}

		debug!(artifacts = self.blobs.len(), "sync task completed");
		self.blobs.clear();
		self.synced = true;
		Ok(())
	}
}

fn push_binlog(binlogs: &mut BTreeMap<FieldId, FieldBinlog>, field: FieldId, binlog: Binlog) {
	binlogs.entry(field)
		.or_insert_with(|| FieldBinlog {
			field,
			binlogs: Vec::new(),
		})
		.binlogs
		.push(binlog);
}

impl fmt::Debug for SyncTask {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SyncTask")
			.field("collection", &self.collection)
			.field("partition", &self.partition)
			.field("segment", &self.segment)
			.field("channel", &self.channel)
			.field("batch_rows", &self.batch_rows)
			.field("insert_binlogs", &self.insert_binlogs)
			.field("stats_binlogs", &self.stats_binlogs)
			.field("pending_artifacts", &self.blobs.len())
			.field("synced", &self.synced)
			.finish()
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;
use stratum_core::{
	Binlog, CollectionSchema, MetaCache, PkStatistics, Serializer, SerializerFactory, SyncPack, SyncTask,
};
use stratum_type::{LogId, Result, diagnostic::storage, return_error};
use tracing::{debug, instrument};

use crate::{
	codec::{encode_insert_log, encode_stats_log},
	path::{insert_log_path, stats_log_path},
};

#[derive(Debug, Clone)]
pub struct StorageSerializerConfig {
	/// Key prefix of every artifact written through the chunk manager.
	pub root_path: String,
}

impl Default for StorageSerializerConfig {
	fn default() -> Self {
		Self {
			root_path: "files".to_string(),
		}
	}
}

/// Hands out log identifiers, unique across every serializer sharing it.
#[derive(Debug, Clone)]
pub struct LogIdAllocator {
	next: Arc<AtomicU64>,
}

impl LogIdAllocator {
	pub fn new(start: u64) -> Self {
		Self {
			next: Arc::new(AtomicU64::new(start)),
		}
	}

	pub fn alloc(&self) -> LogId {
		LogId(self.next.fetch_add(1, Ordering::Relaxed))
	}
}

impl Default for LogIdAllocator {
	fn default() -> Self {
		Self::new(1)
	}
}

/// Builds [`StorageSerializer`]s for one collection.
#[derive(Clone)]
pub struct StorageSerializerFactory {
	schema: Arc<CollectionSchema>,
	config: StorageSerializerConfig,
	log_ids: LogIdAllocator,
}

impl StorageSerializerFactory {
	pub fn new(schema: Arc<CollectionSchema>, config: StorageSerializerConfig) -> Self {
		Self {
			schema,
			config,
			log_ids: LogIdAllocator::default(),
		}
	}

	pub fn with_log_ids(mut self, log_ids: LogIdAllocator) -> Self {
		self.log_ids = log_ids;
		self
	}
}

impl SerializerFactory for StorageSerializerFactory {
	fn create(&self, metacache: Arc<dyn MetaCache>) -> Result<Box<dyn Serializer>> {
		Ok(Box::new(StorageSerializer {
			schema: self.schema.clone(),
			root_path: self.config.root_path.clone(),
			log_ids: self.log_ids.clone(),
			metacache,
		}))
	}
}

/// Encodes sync packages into v1 insert and statistics binlogs.
///
/// One insert log is produced per column of the batch; the primary key column
/// additionally gets a statistics log holding its min, max and bloom filter.
pub struct StorageSerializer {
	schema: Arc<CollectionSchema>,
	root_path: String,
	log_ids: LogIdAllocator,
	metacache: Arc<dyn MetaCache>,
}

#[async_trait]
impl Serializer for StorageSerializer {
	#[instrument(name = "storage::serializer::encode", level = "debug", skip(self, pack), fields(segment = %pack.segment(), channel = %pack.channel()))]
	async fn encode(&self, pack: SyncPack) -> Result<SyncTask> {
		if self.metacache.get_segment(pack.segment()).is_none() {
			return_error!(storage::segment_not_registered(pack.segment().0, pack.channel()));
		}

		let (ts_from, ts_to) = pack.time_range();
		let mut task = SyncTask::new(self.metacache.clone(), &pack).with_batch_rows(pack.batch_size());

		let Some(data) = pack.insert_data() else {
			return Ok(task);
		};

		for (field, column) in data.iter() {
			let log_id = self.log_ids.alloc();
			let blob = encode_insert_log(column)?;
			let binlog = Binlog {
				log_id,
				entries_num: column.row_num() as u64,
				timestamp_from: ts_from,
				timestamp_to: ts_to,
				log_path: insert_log_path(
					&self.root_path,
					pack.collection(),
					pack.partition(),
					pack.segment(),
					field,
					log_id,
				),
				log_size: blob.len() as u64,
			};
			task = task.with_insert_binlog(field, binlog, blob);
		}

		if let Some(pk_field) = self.schema.primary_field() {
			if let Some(column) = data.get(pk_field.id) {
				let stats = PkStatistics::from_column(pk_field.id, column);
				let log_id = self.log_ids.alloc();
				let blob = encode_stats_log(&stats)?;
				let binlog = Binlog {
					log_id,
					entries_num: column.row_num() as u64,
					timestamp_from: ts_from,
					timestamp_to: ts_to,
					log_path: stats_log_path(
						&self.root_path,
						pack.collection(),
						pack.partition(),
						pack.segment(),
						pk_field.id,
						log_id,
					),
					log_size: blob.len() as u64,
				};
				task = task.with_stats_binlog(pk_field.id, binlog, blob).with_pk_stats(stats);
			}
		}

		debug!(columns = data.len(), rows = pack.batch_size(), "encoded sync pack");
		Ok(task)
	}
}

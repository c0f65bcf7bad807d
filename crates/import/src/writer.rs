// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use stratum_core::{ChunkManager, ImportConfig, InsertData, SerializerFactory, SyncTask};
use stratum_type::{PartitionId, SegmentId};
use tracing::{debug, instrument};

use crate::{
	error::Result,
	pick::pick_segment,
	reduce::new_import_segment_info,
	sync::new_sync_task,
	system::{append_system_fields, insert_data_row_count},
	task::{ImportSegmentInfo, ImportTask},
	validate::check_rows_equal,
};

/// Drives decoded batches of import tasks into segments.
///
/// Callers must serialize `write` calls that may pick the same segment: the
/// imported size counters are read and updated without coordination.
pub struct ImportWriter {
	config: ImportConfig,
	serializers: Arc<dyn SerializerFactory>,
}

impl ImportWriter {
	pub fn new(config: ImportConfig, serializers: Arc<dyn SerializerFactory>) -> Self {
		Self {
			config,
			serializers,
		}
	}

	pub fn config(&self) -> &ImportConfig {
		&self.config
	}

	pub fn pick_segment(
		&self,
		task: &ImportTask,
		imported_sizes: &HashMap<SegmentId, usize>,
		channel: &str,
		partition: PartitionId,
		size_to_import: usize,
	) -> Result<SegmentId> {
		pick_segment(task, imported_sizes, channel, partition, size_to_import, self.config.segment_max_size())
	}

	pub async fn new_sync_task(
		&self,
		task: &ImportTask,
		segment: SegmentId,
		partition: PartitionId,
		channel: &str,
		data: InsertData,
	) -> Result<SyncTask> {
		new_sync_task(&self.config, task, self.serializers.as_ref(), segment, partition, channel, data).await
	}

	/// Validates, completes and encodes one batch bound for `channel` and
	/// `partition`.
	///
	/// Batches without rows are dropped and yield `None`; no segment is
	/// touched for them. Otherwise the batch size is added to the picked
	/// segment's entry in `imported_sizes`.
	#[instrument(name = "import::write", level = "debug", skip(self, task, imported_sizes, data), fields(task = %task.id(), job = %task.job(), channel = %channel, partition = %partition))]
	pub async fn write(
		&self,
		task: &ImportTask,
		imported_sizes: &mut HashMap<SegmentId, usize>,
		channel: &str,
		partition: PartitionId,
		mut data: InsertData,
	) -> Result<Option<SyncTask>> {
		check_rows_equal(task.schema(), &data)?;

		if insert_data_row_count(&data, task.schema()) == 0 {
			debug!("skipping batch without rows");
			return Ok(None);
		}

		append_system_fields(task, &mut data)?;

		let size = data.byte_size();
		let segment = self.pick_segment(task, imported_sizes, channel, partition, size)?;
		let sync_task = self.new_sync_task(task, segment, partition, channel, data).await?;
		*imported_sizes.entry(segment).or_default() += size;

		debug!(segment = %segment, size, "batch encoded");
		Ok(Some(sync_task))
	}

	/// Records the summary of a completed sync task on its import task.
	pub fn finish(&self, task: &ImportTask, sync_task: &SyncTask) -> Result<ImportSegmentInfo> {
		let info = new_import_segment_info(sync_task, task)?;
		task.update_segment_info(info.clone());
		Ok(info)
	}

	/// Runs the sync task to completion and records its summary.
	pub async fn commit(
		&self,
		task: &ImportTask,
		mut sync_task: SyncTask,
		chunks: &dyn ChunkManager,
	) -> Result<ImportSegmentInfo> {
		sync_task.run(chunks).await?;
		self.finish(task, &sync_task)
	}
}

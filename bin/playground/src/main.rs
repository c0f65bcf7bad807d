// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

use std::{collections::HashMap, sync::Arc, time::Duration};

use stratum_core::{
	AutoIdRange, ChunkManager, CollectionSchema, ColumnData, FieldDef, ImportConfig, InsertData, MetaCache,
};
use stratum_import::{
	ImportFile, ImportRequest, ImportRequestSegment, ImportTask, ImportWriter, PreImportTask, StandardTaskManager,
	StatsReporter, Task, TaskManager, TaskState, TaskType, log_stats,
};
use stratum_metacache::StandardMetaCache;
use stratum_storage::{MemoryChunkManager, StorageSerializerConfig, StorageSerializerFactory};
use stratum_type::{CollectionId, JobId, PartitionId, SegmentId, TaskId, Timestamp, Type};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

const COLLECTION: CollectionId = CollectionId(1);
const PARTITION: PartitionId = PartitionId(10);
const DIM: usize = 8;

fn schema() -> CollectionSchema {
	CollectionSchema::new(
		"images",
		vec![
			FieldDef::new(100, "id", Type::Int64).primary_key().auto_id(true),
			FieldDef::new(101, "image_path", Type::VarChar),
			FieldDef::new(102, "embeddings", Type::FloatVector).dim(DIM),
		],
	)
}

fn batch(offset: usize, rows: usize) -> InsertData {
	InsertData::new()
		.with_column(101, ColumnData::VarChar((offset..offset + rows).map(|i| format!("img/{:05}.jpg", i)).collect()))
		.with_column(
			102,
			ColumnData::FloatVector {
				dim: DIM,
				data: (0..rows * DIM).map(|i| (i % 97) as f32 / 97.0).collect(),
			},
		)
}

#[tokio::main]
async fn main() -> Result<(), stratum_type::Error> {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
	fmt().with_env_filter(filter).init();

	let chunks = MemoryChunkManager::new("files");
	for (path, size) in [("upload/part-0.json", 4096), ("upload/part-1.json", 2048)] {
		chunks.write(path, &vec![b' '; size]).await?;
	}

	let config = ImportConfig::default().with_segment_max_size_mb(1);
	let schema = Arc::new(schema());
	let manager: Arc<dyn TaskManager> = Arc::new(StandardTaskManager::new());
	let reporter = StatsReporter::spawn(manager.clone(), Duration::from_millis(200));

	let preimport = PreImportTask::new(
		TaskId(1),
		JobId(1),
		COLLECTION,
		vec![ImportFile::new(["upload/part-0.json", "upload/part-1.json"])],
	);
	manager.add(preimport.into());
	let preimport = manager.get_preimport(TaskId(1))?;
	preimport.collect_file_sizes(&chunks, config.file_size_timeout).await?;
	for stats in preimport.file_stats() {
		info!(paths = stats.file.paths.len(), size = stats.file_size, "file sized");
	}
	manager.update_state(TaskId(1), TaskType::PreImport, TaskState::Completed, "")?;

	let request = ImportRequest {
		task: TaskId(2),
		job: JobId(1),
		collection: COLLECTION,
		schema: schema.clone(),
		ts: Timestamp(449_000_000_000),
		auto_id_range: AutoIdRange::new(1_000_000, 2_000_000),
		request_segments: [(1, "ch-0"), (2, "ch-0"), (3, "ch-1")]
			.into_iter()
			.map(|(segment, vchannel)| ImportRequestSegment {
				segment: SegmentId(segment),
				partition: PARTITION,
				vchannel: vchannel.to_string(),
			})
			.collect(),
	};
	let task = ImportTask::new(request, |channel| -> Arc<dyn MetaCache> {
		Arc::new(StandardMetaCache::new(COLLECTION, channel))
	});
	manager.add(Task::from(task));
	manager.update_state(TaskId(2), TaskType::Import, TaskState::InProgress, "")?;
	let task = manager.get_import(TaskId(2))?;

	let serializers = Arc::new(StorageSerializerFactory::new(schema, StorageSerializerConfig::default()));
	let writer = ImportWriter::new(config, serializers);
	let mut imported = HashMap::new();

	let mut offset = 0;
	for (channel, rows) in [("ch-0", 6000), ("ch-0", 6000), ("ch-0", 6000), ("ch-1", 500), ("ch-0", 0)] {
		let Some(sync_task) = writer.write(&task, &mut imported, channel, PARTITION, batch(offset, rows)).await? else {
			info!(channel, "empty batch skipped");
			continue;
		};
		offset += rows;
		let info = writer.commit(&task, sync_task, &chunks).await?;
		info!(
			segment = %info.segment,
			imported_rows = info.imported_rows,
			binlogs = info.binlogs.len(),
			statslogs = info.statslogs.len(),
			"batch committed"
		);
	}
	manager.update_state(TaskId(2), TaskType::Import, TaskState::Completed, "")?;

	for info in task.segments_info() {
		info!(
			segment = %info.segment,
			imported_rows = info.imported_rows,
			bytes = imported.get(&info.segment).copied().unwrap_or(0),
			"segment summary"
		);
	}
	info!(objects = chunks.len(), next_auto_id = task.auto_id_range().current(), "import finished");

	log_stats(manager.as_ref());
	reporter.shutdown().await;
	Ok(())
}

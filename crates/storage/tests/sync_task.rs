// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use stratum_core::{ChunkManager, PrimaryKey, SyncPack};
use stratum_storage::{
	LocalChunkManager,
	codec::{decode_insert_log, decode_stats_log},
};
use stratum_testing::{
	fixture::{COLLECTION, MemoryBackend, insert_data, manual_pk_schema, register},
	logging::init_tracing,
	tempdir::TempDir,
};
use stratum_type::{PartitionId, Result, SegmentId, Timestamp};

fn pack(channel: &str, segment: u64, rows: usize, backend: &MemoryBackend) -> SyncPack {
	SyncPack::new()
		.with_insert_data(insert_data(&backend.schema, rows))
		.with_collection(COLLECTION)
		.with_partition(PartitionId(2))
		.with_channel(channel)
		.with_segment(SegmentId(segment))
		.with_time_range(Timestamp(77), Timestamp(77))
		.with_batch_size(rows as u64)
}

#[tokio::test]
async fn test_run_writes_artifacts_and_counts_rows() -> Result<()> {
	init_tracing();
	let backend = MemoryBackend::new(manual_pk_schema());
	let metacache = backend.metacache("ch-0");
	register(metacache.as_ref(), 10, 2);

	let serializer = backend.factory().create(metacache.clone())?;
	let mut task = serializer.encode(pack("ch-0", 10, 5, &backend)).await?;

	let (insert, stats) = task.binlogs();
	assert_eq!(insert.len(), 2);
	assert_eq!(stats.len(), 1);
	for binlog in insert.values().flat_map(|f| f.binlogs.iter()) {
		assert_eq!(binlog.entries_num, 5);
		assert_eq!(binlog.timestamp_from, Timestamp(77));
		assert!(binlog.log_path.starts_with("files/insert_log/1/2/10/"));
	}

	task.run(&backend.chunks).await?;
	assert!(task.is_synced());
	assert_eq!(backend.chunks.len(), 3);

	let segment = metacache.get_segment(SegmentId(10)).unwrap();
	assert_eq!(segment.flushed_rows(), 5);
	assert!(segment.bloom_filter_set.may_contain(&PrimaryKey::Int64(3)));
	assert!(!segment.bloom_filter_set.may_contain(&PrimaryKey::Int64(50)));

	// a completed task does not count its rows twice
	task.run(&backend.chunks).await?;
	assert_eq!(metacache.get_segment(SegmentId(10)).unwrap().flushed_rows(), 5);
	Ok(())
}

#[tokio::test]
async fn test_artifacts_decode() -> Result<()> {
	let backend = MemoryBackend::new(manual_pk_schema());
	let metacache = backend.metacache("ch-0");
	register(metacache.as_ref(), 10, 2);

	let serializer = backend.factory().create(metacache)?;
	let mut task = serializer.encode(pack("ch-0", 10, 3, &backend)).await?;
	let (insert, stats) = task.binlogs();
	let pk_path = insert.values().next().unwrap().binlogs[0].log_path.clone();
	let stats_path = stats.values().next().unwrap().binlogs[0].log_path.clone();
	task.run(&backend.chunks).await?;

	let column = decode_insert_log(&backend.chunks.read(&pk_path).await?)?;
	assert_eq!(column.row_num(), 3);

	let stats = decode_stats_log(&backend.chunks.read(&stats_path).await?)?;
	assert_eq!(stats.max, Some(PrimaryKey::Int64(2)));
	Ok(())
}

#[tokio::test]
async fn test_encode_requires_registered_segment() -> Result<()> {
	let backend = MemoryBackend::new(manual_pk_schema());
	let metacache = backend.metacache("ch-0");

	let serializer = backend.factory().create(metacache)?;
	let err = serializer.encode(pack("ch-0", 99, 3, &backend)).await.unwrap_err();
	assert_eq!(err.code(), "STORAGE_004");
	Ok(())
}

#[tokio::test]
async fn test_rows_accumulate_over_batches() -> Result<()> {
	let backend = MemoryBackend::new(manual_pk_schema());
	let metacache = backend.metacache("ch-0");
	register(metacache.as_ref(), 10, 2);
	let serializer = backend.factory().create(metacache.clone())?;

	for rows in [4, 6] {
		let mut task = serializer.encode(pack("ch-0", 10, rows, &backend)).await?;
		task.run(&backend.chunks).await?;
	}

	let segment = metacache.get_segment(SegmentId(10)).unwrap();
	assert_eq!(segment.flushed_rows(), 10);
	assert_eq!(segment.bloom_filter_set.history().len(), 2);
	Ok(())
}

#[tokio::test]
async fn test_local_chunk_manager() -> Result<()> {
	let dir = TempDir::new()?;
	let chunks = LocalChunkManager::new(dir.path());

	chunks.write("files/insert_log/1/2/3/100/1", b"abc").await?;
	assert!(chunks.exists("files/insert_log/1/2/3/100/1").await?);
	assert_eq!(chunks.size("files/insert_log/1/2/3/100/1").await?, 3);
	assert_eq!(chunks.read("files/insert_log/1/2/3/100/1").await?, b"abc".to_vec());

	chunks.remove("files/insert_log/1/2/3/100/1").await?;
	assert!(!chunks.exists("files/insert_log/1/2/3/100/1").await?);
	assert_eq!(chunks.size("files/missing").await.unwrap_err().code(), "STORAGE_002");
	assert_eq!(chunks.write("../escape", b"x").await.unwrap_err().code(), "STORAGE_005");
	Ok(())
}

#[tokio::test]
async fn test_task_runs_against_local_storage() -> Result<()> {
	let dir = TempDir::new()?;
	let chunks = LocalChunkManager::new(dir.path());
	let backend = MemoryBackend::new(manual_pk_schema());
	let metacache = backend.metacache("ch-1");
	register(metacache.as_ref(), 11, 2);

	let serializer = backend.factory().create(metacache.clone())?;
	let mut task = serializer.encode(pack("ch-1", 11, 2, &backend)).await?;
	let (insert, _) = task.binlogs();
	let path = insert.values().next().unwrap().binlogs[0].log_path.clone();
	task.run(&chunks).await?;

	assert!(dir.path().join(&path).is_file());
	assert_eq!(metacache.get_segment(SegmentId(11)).unwrap().flushed_rows(), 2);
	Ok(())
}

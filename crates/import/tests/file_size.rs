// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use async_trait::async_trait;
use stratum_core::{ChunkManager, ImportConfig};
use stratum_import::{ImportError, ImportFile, PreImportTask, get_file_size};
use stratum_storage::MemoryChunkManager;
use stratum_type::{CollectionId, JobId, Result, TaskId};
use tokio::time::sleep;

/// Answers size queries after a fixed delay.
struct SlowChunkManager {
	delay: Duration,
	inner: MemoryChunkManager,
}

#[async_trait]
impl ChunkManager for SlowChunkManager {
	fn root_path(&self) -> &str {
		self.inner.root_path()
	}

	async fn size(&self, path: &str) -> Result<u64> {
		sleep(self.delay).await;
		self.inner.size(path).await
	}

	async fn write(&self, path: &str, data: &[u8]) -> Result<()> {
		self.inner.write(path, data).await
	}

	async fn read(&self, path: &str) -> Result<Vec<u8>> {
		self.inner.read(path).await
	}

	async fn exists(&self, path: &str) -> Result<bool> {
		self.inner.exists(path).await
	}

	async fn remove(&self, path: &str) -> Result<()> {
		self.inner.remove(path).await
	}
}

async fn slow(delay: Duration) -> SlowChunkManager {
	let inner = MemoryChunkManager::new("");
	inner.write("data/part-0.parquet", &[0; 100]).await.unwrap();
	inner.write("data/part-1.parquet", &[0; 50]).await.unwrap();
	SlowChunkManager {
		delay,
		inner,
	}
}

#[tokio::test(start_paused = true)]
async fn test_slow_storage_within_timeout() {
	let chunks = slow(Duration::from_secs(15)).await;
	let file = ImportFile::new(["data/part-0.parquet", "data/part-1.parquet"]);

	// each query gets its own deadline, so the total may exceed it
	let size = get_file_size(&file, &chunks, ImportConfig::default().file_size_timeout).await.unwrap();
	assert_eq!(size, 150);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_is_returned() {
	let chunks = slow(Duration::from_secs(25)).await;
	let file = ImportFile::new(["data/part-0.parquet"]);

	let err = get_file_size(&file, &chunks, Duration::from_secs(20)).await.unwrap_err();
	match err {
		ImportError::Storage(err) => assert_eq!(err.code(), "STORAGE_003"),
		other => panic!("expected a storage timeout, got {:?}", other),
	}
}

#[tokio::test(start_paused = true)]
async fn test_preimport_collects_sizes() {
	let chunks = slow(Duration::from_secs(1)).await;
	let task = PreImportTask::new(
		TaskId(1),
		JobId(1),
		CollectionId(1),
		vec![ImportFile::new(["data/part-0.parquet"]), ImportFile::new(["data/part-0.parquet", "data/part-1.parquet"])],
	);

	task.collect_file_sizes(&chunks, Duration::from_secs(20)).await.unwrap();
	let sizes: Vec<u64> = task.file_stats().iter().map(|s| s.file_size).collect();
	assert_eq!(sizes, vec![100, 150]);
}

#[tokio::test(start_paused = true)]
async fn test_preimport_stops_at_missing_file() {
	let chunks = slow(Duration::from_secs(1)).await;
	let task = PreImportTask::new(
		TaskId(1),
		JobId(1),
		CollectionId(1),
		vec![ImportFile::new(["data/part-1.parquet"]), ImportFile::new(["data/missing.parquet"])],
	);

	assert!(task.collect_file_sizes(&chunks, Duration::from_secs(20)).await.is_err());
	assert_eq!(task.file_stats().len(), 1);
}

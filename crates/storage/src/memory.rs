// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! In-memory object storage.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use stratum_core::ChunkManager;
use stratum_type::{Result, diagnostic::storage, return_error};
use tracing::instrument;

use crate::path::validate;

/// Object storage backed by a concurrent map.
///
/// Clones share the same objects.
#[derive(Clone, Default)]
pub struct MemoryChunkManager {
	inner: Arc<MemoryChunkManagerInner>,
}

#[derive(Default)]
struct MemoryChunkManagerInner {
	root: String,
	objects: DashMap<String, Vec<u8>>,
}

impl MemoryChunkManager {
	pub fn new(root: impl Into<String>) -> Self {
		Self {
			inner: Arc::new(MemoryChunkManagerInner {
				root: root.into(),
				objects: DashMap::new(),
			}),
		}
	}

	/// All stored paths in lexical order.
	pub fn paths(&self) -> Vec<String> {
		let mut paths: Vec<String> = self.inner.objects.iter().map(|entry| entry.key().clone()).collect();
		paths.sort();
		paths
	}

	pub fn len(&self) -> usize {
		self.inner.objects.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.objects.is_empty()
	}
}

#[async_trait]
impl ChunkManager for MemoryChunkManager {
	fn root_path(&self) -> &str {
		&self.inner.root
	}

	#[instrument(name = "storage::memory::size", level = "trace", skip(self))]
	async fn size(&self, path: &str) -> Result<u64> {
		match self.inner.objects.get(path) {
			Some(entry) => Ok(entry.value().len() as u64),
			None => return_error!(storage::not_found(path)),
		}
	}

	#[instrument(name = "storage::memory::write", level = "trace", skip(self, data), fields(len = data.len()))]
	async fn write(&self, path: &str, data: &[u8]) -> Result<()> {
		validate(path)?;
		self.inner.objects.insert(path.to_string(), data.to_vec());
		Ok(())
	}

	#[instrument(name = "storage::memory::read", level = "trace", skip(self))]
	async fn read(&self, path: &str) -> Result<Vec<u8>> {
		match self.inner.objects.get(path) {
			Some(entry) => Ok(entry.value().clone()),
			None => return_error!(storage::not_found(path)),
		}
	}

	async fn exists(&self, path: &str) -> Result<bool> {
		Ok(self.inner.objects.contains_key(path))
	}

	async fn remove(&self, path: &str) -> Result<()> {
		self.inner.objects.remove(path);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_write_read() -> Result<()> {
		let chunks = MemoryChunkManager::new("files");
		chunks.write("files/a/1", b"hello").await?;

		assert_eq!(chunks.read("files/a/1").await?, b"hello".to_vec());
		assert_eq!(chunks.size("files/a/1").await?, 5);
		assert!(chunks.exists("files/a/1").await?);
		assert_eq!(chunks.paths(), vec!["files/a/1".to_string()]);
		Ok(())
	}

	#[tokio::test]
	async fn test_missing_object() {
		let chunks = MemoryChunkManager::default();
		assert_eq!(chunks.size("nope").await.unwrap_err().code(), "STORAGE_002");
		assert!(!chunks.exists("nope").await.unwrap());
	}

	#[tokio::test]
	async fn test_clones_share_objects() -> Result<()> {
		let chunks = MemoryChunkManager::default();
		let clone = chunks.clone();
		clone.write("x", b"1").await?;
		assert_eq!(chunks.len(), 1);

		chunks.remove("x").await?;
		assert!(clone.is_empty());
		Ok(())
	}
}

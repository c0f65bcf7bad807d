// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use async_trait::async_trait;
use stratum_type::Result;

/// Object storage accessor.
///
/// Paths are relative to the manager's root.
#[async_trait]
pub trait ChunkManager: Send + Sync {
	fn root_path(&self) -> &str;

	/// Size of the object in bytes.
	async fn size(&self, path: &str) -> Result<u64>;

	async fn write(&self, path: &str, data: &[u8]) -> Result<()>;

	async fn read(&self, path: &str) -> Result<Vec<u8>>;

	async fn exists(&self, path: &str) -> Result<bool>;

	async fn remove(&self, path: &str) -> Result<()>;
}

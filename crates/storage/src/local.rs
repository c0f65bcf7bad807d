// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Local filesystem object storage.

use std::{
	io::ErrorKind,
	path::{Path, PathBuf},
};

use async_trait::async_trait;
use stratum_core::ChunkManager;
use stratum_type::{Result, diagnostic::storage, error};
use tokio::fs;
use tracing::instrument;

use crate::path::validate;

/// Object storage rooted at a local directory.
///
/// Object paths map one-to-one onto files below the directory; parent
/// directories are created on write.
pub struct LocalChunkManager {
	dir: PathBuf,
	root: String,
}

impl LocalChunkManager {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		let dir = dir.into();
		let root = dir.display().to_string();
		Self {
			dir,
			root,
		}
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	fn resolve(&self, path: &str) -> Result<PathBuf> {
		validate(path)?;
		Ok(self.dir.join(path))
	}
}

fn map_io(path: &str, err: std::io::Error) -> stratum_type::Error {
	match err.kind() {
		ErrorKind::NotFound => error!(storage::not_found(path)),
		_ => error!(storage::io_error(err)),
	}
}

#[async_trait]
impl ChunkManager for LocalChunkManager {
	fn root_path(&self) -> &str {
		&self.root
	}

	#[instrument(name = "storage::local::size", level = "trace", skip(self))]
	async fn size(&self, path: &str) -> Result<u64> {
		let file = self.resolve(path)?;
		let metadata = fs::metadata(&file).await.map_err(|e| map_io(path, e))?;
		Ok(metadata.len())
	}

	#[instrument(name = "storage::local::write", level = "debug", skip(self, data), fields(len = data.len()))]
	async fn write(&self, path: &str, data: &[u8]) -> Result<()> {
		let file = self.resolve(path)?;
		if let Some(parent) = file.parent() {
			fs::create_dir_all(parent).await?;
		}
		fs::write(&file, data).await?;
		Ok(())
	}

	#[instrument(name = "storage::local::read", level = "trace", skip(self))]
	async fn read(&self, path: &str) -> Result<Vec<u8>> {
		let file = self.resolve(path)?;
		fs::read(&file).await.map_err(|e| map_io(path, e))
	}

	async fn exists(&self, path: &str) -> Result<bool> {
		let file = self.resolve(path)?;
		Ok(fs::try_exists(&file).await?)
	}

	async fn remove(&self, path: &str) -> Result<()> {
		let file = self.resolve(path)?;
		match fs::remove_file(&file).await {
			Ok(()) => Ok(()),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
			Err(e) => Err(e.into()),
		}
	}
}

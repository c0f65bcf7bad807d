// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use stratum_core::ChunkManager;
use stratum_type::{diagnostic::storage, error};
use tokio::time;
use tracing::instrument;

use crate::{error::Result, task::ImportFile};

/// Total size in bytes of all objects making up `file`.
///
/// Each size query gets its own `timeout`. The first failure, timeouts
/// included, is returned as is; nothing is retried.
#[instrument(name = "import::file_size", level = "debug", skip(file, chunks), fields(paths = file.paths.len()))]
pub async fn get_file_size(file: &ImportFile, chunks: &dyn ChunkManager, timeout: Duration) -> Result<u64> {
	let mut total = 0;
	for path in &file.paths {
		let size = match time::timeout(timeout, chunks.size(path)).await {
			Ok(size) => size?,
			Err(_) => return Err(error!(storage::timeout(path, timeout)).into()),
		};
		total += size;
	}
	Ok(total)
}

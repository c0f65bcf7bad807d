// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

/// Configuration consumed by the import pipeline.
#[derive(Debug, Clone)]
pub struct ImportConfig {
	/// Storage-v2 layout gate. The import pipeline only writes the v1
	/// binlog layout and refuses to build sync tasks while this is set.
	pub storage_v2_enabled: bool,
	/// Per-segment size target in megabytes.
	pub segment_max_size_mb: usize,
	/// Deadline for a single object size query.
	pub file_size_timeout: Duration,
	/// Period of the task statistics reporter.
	pub stats_interval: Duration,
}

impl ImportConfig {
	/// Per-segment size target in bytes.
	pub fn segment_max_size(&self) -> usize {
		self.segment_max_size_mb * 1024 * 1024
	}

	pub fn with_storage_v2(mut self, enabled: bool) -> Self {
		self.storage_v2_enabled = enabled;
		self
	}

	pub fn with_segment_max_size_mb(mut self, size: usize) -> Self {
		self.segment_max_size_mb = size;
		self
	}

	pub fn with_file_size_timeout(mut self, timeout: Duration) -> Self {
		self.file_size_timeout = timeout;
		self
	}

	pub fn with_stats_interval(mut self, interval: Duration) -> Self {
		self.stats_interval = interval;
		self
	}
}

impl Default for ImportConfig {
	fn default() -> Self {
		Self {
			storage_v2_enabled: false,
			segment_max_size_mb: 1024,
			file_size_timeout: Duration::from_secs(20),
			stats_interval: Duration::from_secs(60),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_segment_max_size_in_bytes() {
		let config = ImportConfig::default().with_segment_max_size_mb(100);
		assert_eq!(config.segment_max_size(), 100 * 1024 * 1024);
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::{Component, Path};

use stratum_type::{CollectionId, FieldId, LogId, PartitionId, Result, SegmentId, diagnostic::storage, return_error};

pub const INSERT_LOG_PREFIX: &str = "insert_log";
pub const STATS_LOG_PREFIX: &str = "stats_log";

pub fn insert_log_path(
	root: &str,
	collection: CollectionId,
	partition: PartitionId,
	segment: SegmentId,
	field: FieldId,
	log: LogId,
) -> String {
	log_path(root, INSERT_LOG_PREFIX, collection, partition, segment, field, log)
}

pub fn stats_log_path(
	root: &str,
	collection: CollectionId,
	partition: PartitionId,
	segment: SegmentId,
	field: FieldId,
	log: LogId,
) -> String {
	log_path(root, STATS_LOG_PREFIX, collection, partition, segment, field, log)
}

fn log_path(
	root: &str,
	prefix: &str,
	collection: CollectionId,
	partition: PartitionId,
	segment: SegmentId,
	field: FieldId,
	log: LogId,
) -> String {
	let root = root.trim_end_matches('/');
	if root.is_empty() {
		format!("{}/{}/{}/{}/{}/{}", prefix, collection, partition, segment, field, log)
	} else {
		format!("{}/{}/{}/{}/{}/{}/{}", root, prefix, collection, partition, segment, field, log)
	}
}

/// Rejects absolute paths and paths that climb out of the storage root.
pub fn validate(path: &str) -> Result<()> {
	if path.is_empty() {
		return_error!(storage::invalid_path(path));
	}
	for component in Path::new(path).components() {
		match component {
			Component::Normal(_) | Component::CurDir => {}
			_ => return_error!(storage::invalid_path(path)),
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_insert_log_path() {
		let path = insert_log_path("files/", CollectionId(1), PartitionId(2), SegmentId(3), FieldId(100), LogId(7));
		assert_eq!(path, "files/insert_log/1/2/3/100/7");
	}

	#[test]
	fn test_stats_log_path_without_root() {
		let path = stats_log_path("", CollectionId(1), PartitionId(2), SegmentId(3), FieldId(100), LogId(8));
		assert_eq!(path, "stats_log/1/2/3/100/8");
	}

	#[test]
	fn test_validate() {
		assert!(validate("files/insert_log/1").is_ok());
		assert_eq!(validate("").unwrap_err().code(), "STORAGE_005");
		assert_eq!(validate("/etc/passwd").unwrap_err().code(), "STORAGE_005");
		assert_eq!(validate("files/../../secret").unwrap_err().code(), "STORAGE_005");
	}
}

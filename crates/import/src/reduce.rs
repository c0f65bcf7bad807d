// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use stratum_core::SyncTask;

use crate::{
	error::{ImportError, Result},
	task::{ImportSegmentInfo, ImportTask},
};

/// Summarizes a completed sync task.
///
/// The imported row count is the segment's flushed row counter as held by
/// the metadata cache of the task's channel.
pub fn new_import_segment_info(sync_task: &SyncTask, task: &ImportTask) -> Result<ImportSegmentInfo> {
	let segment = sync_task.segment_id();
	let (insert_binlogs, stats_binlogs) = sync_task.binlogs();

	let metacache = task.metacache(sync_task.channel_name())?;
	let info = metacache.get_segment(segment).ok_or(ImportError::SegmentNotFound {
		segment,
	})?;

	Ok(ImportSegmentInfo {
		segment,
		imported_rows: info.flushed_rows(),
		binlogs: insert_binlogs.values().cloned().collect(),
		statslogs: stats_binlogs.values().cloned().collect(),
	})
}

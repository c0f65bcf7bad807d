// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::collections::HashMap;

use stratum_type::{PartitionId, SegmentId};
use tracing::{instrument, warn};

use crate::{
	error::{ImportError, Result},
	task::ImportTask,
};

/// Chooses the segment that receives a batch of `size_to_import` bytes.
///
/// Candidates are the task's declared segments on `channel` and `partition`,
/// in declared order. The first candidate with room for the batch under
/// `segment_max_size` wins. When none has room, the candidate with the fewest
/// imported bytes is chosen and will grow past the limit.
#[instrument(name = "import::pick_segment", level = "trace", skip(task, imported_sizes), fields(task = %task.id(), job = %task.job()))]
pub fn pick_segment(
	task: &ImportTask,
	imported_sizes: &HashMap<SegmentId, usize>,
	channel: &str,
	partition: PartitionId,
	size_to_import: usize,
	segment_max_size: usize,
) -> Result<SegmentId> {
	let imported = |segment: SegmentId| imported_sizes.get(&segment).copied().unwrap_or(0);

	let candidates: Vec<SegmentId> = task
		.request_segments()
		.iter()
		.filter(|s| s.vchannel == channel && s.partition == partition)
		.map(|s| s.segment)
		.collect();

	if let Some(segment) =
		candidates.iter().copied().find(|s| imported(*s).saturating_add(size_to_import) <= segment_max_size)
	{
		return Ok(segment);
	}

	let Some(segment) = candidates.iter().copied().min_by_key(|s| imported(*s)) else {
		return Err(ImportError::NoSegmentAvailable {
			channel: channel.to_string(),
			partition,
		});
	};

	let size_imported = imported(segment);
	warn!(
		segment = %segment,
		size_to_import,
		size_imported,
		segment_max_size,
		overflow = size_imported.saturating_add(size_to_import).saturating_sub(segment_max_size),
		"failed to pick an appropriate segment, opt for the smallest one instead"
	);
	Ok(segment)
}

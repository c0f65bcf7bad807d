// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use stratum_type::{CollectionId, SegmentId};

use crate::segment::{BloomFilterSet, SegmentDescriptor, SegmentInfo, SegmentState};

/// Creates the bloom-filter set of a segment at registration time.
pub type BloomFilterFactory<'a> = &'a dyn Fn(&SegmentDescriptor) -> BloomFilterSet;

/// Segment metadata of one channel, shared by every batch written to it.
///
/// Implementations synchronize internally; callers never lock around these
/// calls.
pub trait MetaCache: Send + Sync {
	fn collection(&self) -> CollectionId;

	fn channel(&self) -> &str;

	/// Snapshot of the segment, if registered.
	fn get_segment(&self, segment: SegmentId) -> Option<SegmentInfo>;

	/// Registers the segment unless it is already known.
	///
	/// Returns true if this call created the entry. The factory only runs for
	/// the call that creates it.
	fn add_segment(&self, descriptor: SegmentDescriptor, bloom_filters: BloomFilterFactory<'_>) -> bool;

	/// Applies `update` to the segment under the cache's own lock.
	///
	/// Returns false if the segment is not registered.
	fn update_segment(&self, segment: SegmentId, update: &mut dyn FnMut(&mut SegmentInfo)) -> bool;

	/// Snapshots of all segments, optionally restricted to one state.
	fn segments(&self, state: Option<SegmentState>) -> Vec<SegmentInfo>;

	fn remove_segment(&self, segment: SegmentId) -> Option<SegmentInfo>;
}

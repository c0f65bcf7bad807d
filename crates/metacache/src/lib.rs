// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Segment metadata cache of one virtual channel.
//!
//! The cache is shared by every batch written to the channel; all methods
//! take `&self` and synchronize on the map's shards.

#![cfg_attr(not(debug_assertions), deny(warnings))]

use dashmap::{DashMap, mapref::entry::Entry};
use stratum_core::{BloomFilterFactory, MetaCache, SegmentDescriptor, SegmentInfo, SegmentState};
use stratum_type::{CollectionId, SegmentId};
use tracing::debug;

pub struct StandardMetaCache {
	collection: CollectionId,
	channel: String,
	segments: DashMap<SegmentId, SegmentInfo>,
}

impl StandardMetaCache {
	pub fn new(collection: CollectionId, channel: impl Into<String>) -> Self {
		Self {
			collection,
			channel: channel.into(),
			segments: DashMap::new(),
		}
	}

	pub fn len(&self) -> usize {
		self.segments.len()
	}

	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}
}

impl MetaCache for StandardMetaCache {
	fn collection(&self) -> CollectionId {
		self.collection
	}

	fn channel(&self) -> &str {
		&self.channel
	}

	fn get_segment(&self, segment: SegmentId) -> Option<SegmentInfo> {
		self.segments.get(&segment).map(|entry| entry.value().clone())
	}

	fn add_segment(&self, descriptor: SegmentDescriptor, bloom_filters: BloomFilterFactory<'_>) -> bool {
		match self.segments.entry(descriptor.id) {
			Entry::Occupied(_) => false,
			Entry::Vacant(vacant) => {
				let id = descriptor.id;
				let state = descriptor.state;
				let bloom_filter_set = bloom_filters(&descriptor);
				vacant.insert(SegmentInfo::new(descriptor, bloom_filter_set));
				debug!("Registered segment {} on channel {} as {}", id, self.channel, state);
				true
			}
		}
	}

	fn update_segment(&self, segment: SegmentId, update: &mut dyn FnMut(&mut SegmentInfo)) -> bool {
		match self.segments.get_mut(&segment) {
			Some(mut entry) => {
				update(entry.value_mut());
				true
			}
			None => false,
		}
	}

	fn segments(&self, state: Option<SegmentState>) -> Vec<SegmentInfo> {
		let mut result: Vec<SegmentInfo> = self
			.segments
			.iter()
			.filter(|entry| state.map_or(true, |state| entry.value().state == state))
			.map(|entry| entry.value().clone())
			.collect();
		result.sort_by_key(|segment| segment.id);
		result
	}

	fn remove_segment(&self, segment: SegmentId) -> Option<SegmentInfo> {
		let removed = self.segments.remove(&segment).map(|(_, info)| info);
		if removed.is_some() {
			debug!("Removed segment {} from channel {}", segment, self.channel);
		}
		removed
	}
}

#[cfg(test)]
mod tests {
	use std::{
		sync::{
			Arc,
			atomic::{AtomicUsize, Ordering},
		},
		thread,
	};

	use stratum_core::BloomFilterSet;
	use stratum_type::PartitionId;

	use super::*;

	fn descriptor(id: u64) -> SegmentDescriptor {
		SegmentDescriptor {
			id: SegmentId(id),
			collection: CollectionId(1),
			partition: PartitionId(2),
			channel: "ch-0".to_string(),
			state: SegmentState::Importing,
		}
	}

	#[test]
	fn test_add_segment_is_idempotent() {
		let cache = StandardMetaCache::new(CollectionId(1), "ch-0");
		let calls = AtomicUsize::new(0);
		let factory = |_: &SegmentDescriptor| {
			calls.fetch_add(1, Ordering::SeqCst);
			BloomFilterSet::new()
		};

		assert!(cache.add_segment(descriptor(10), &factory));
		cache.update_segment(SegmentId(10), &mut |segment| segment.flushed_rows = 7);
		assert!(!cache.add_segment(descriptor(10), &factory));

		assert_eq!(cache.len(), 1);
		assert_eq!(calls.load(Ordering::SeqCst), 1);
		assert_eq!(cache.get_segment(SegmentId(10)).unwrap().flushed_rows(), 7);
	}

	#[test]
	fn test_concurrent_registration_creates_one_entry() {
		let cache = Arc::new(StandardMetaCache::new(CollectionId(1), "ch-0"));
		let created = Arc::new(AtomicUsize::new(0));

		let handles: Vec<_> = (0..8)
			.map(|_| {
				let cache = cache.clone();
				let created = created.clone();
				thread::spawn(move || {
					if cache.add_segment(descriptor(42), &|_| BloomFilterSet::new()) {
						created.fetch_add(1, Ordering::SeqCst);
					}
				})
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}

		assert_eq!(cache.len(), 1);
		assert_eq!(created.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn test_update_unknown_segment() {
		let cache = StandardMetaCache::new(CollectionId(1), "ch-0");
		assert!(!cache.update_segment(SegmentId(1), &mut |_| {}));
	}

	#[test]
	fn test_segments_filter_by_state() {
		let cache = StandardMetaCache::new(CollectionId(1), "ch-0");
		cache.add_segment(descriptor(3), &|_| BloomFilterSet::new());
		cache.add_segment(descriptor(1), &|_| BloomFilterSet::new());
		cache.update_segment(SegmentId(3), &mut |segment| segment.state = SegmentState::Flushed);

		let all: Vec<_> = cache.segments(None).into_iter().map(|s| s.id).collect();
		assert_eq!(all, vec![SegmentId(1), SegmentId(3)]);

		let importing: Vec<_> = cache.segments(Some(SegmentState::Importing)).into_iter().map(|s| s.id).collect();
		assert_eq!(importing, vec![SegmentId(1)]);
	}

	#[test]
	fn test_remove_segment() {
		let cache = StandardMetaCache::new(CollectionId(1), "ch-0");
		cache.add_segment(descriptor(5), &|_| BloomFilterSet::new());
		assert_eq!(cache.remove_segment(SegmentId(5)).map(|s| s.id), Some(SegmentId(5)));
		assert!(cache.remove_segment(SegmentId(5)).is_none());
		assert!(cache.is_empty());
	}
}

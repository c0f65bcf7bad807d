// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use stratum_core::{
	BloomFilterSet, ImportConfig, InsertData, SegmentDescriptor, SegmentState, SerializerFactory, SyncPack, SyncTask,
};
use stratum_type::{PartitionId, SegmentId};
use tracing::{debug, instrument};

use crate::{
	error::{ImportError, Result},
	system::insert_data_row_count,
	task::ImportTask,
};

/// Encodes `data` into a sync task for `segment`.
///
/// The segment is registered as importing in the channel's metadata cache
/// the first time a batch targets it. Durability of the returned task is
/// the caller's concern.
#[instrument(
	name = "import::new_sync_task",
	level = "debug",
	skip(config, task, serializers, data),
	fields(task = %task.id(), job = %task.job(), collection = %task.collection(), segment = %segment, channel = %channel)
)]
pub async fn new_sync_task(
	config: &ImportConfig,
	task: &ImportTask,
	serializers: &dyn SerializerFactory,
	segment: SegmentId,
	partition: PartitionId,
	channel: &str,
	data: InsertData,
) -> Result<SyncTask> {
	if config.storage_v2_enabled {
		return Err(ImportError::UnsupportedConfiguration {
			reason: "storage v2 is not supported".to_string(),
		});
	}

	let metacache = task.metacache(channel)?;
	if metacache.get_segment(segment).is_none() {
		let descriptor = SegmentDescriptor {
			id: segment,
			collection: task.collection(),
			partition,
			channel: channel.to_string(),
			state: SegmentState::Importing,
		};
		if metacache.add_segment(descriptor, &|_| BloomFilterSet::new()) {
			debug!("registered importing segment");
		}
	}

	let serializer = serializers.create(metacache)?;

	let rows = insert_data_row_count(&data, task.schema());
	let pack = SyncPack::new()
		.with_insert_data(data)
		.with_collection(task.collection())
		.with_partition(partition)
		.with_channel(channel)
		.with_segment(segment)
		.with_time_range(task.ts(), task.ts())
		.with_batch_size(rows as u64);

	Ok(serializer.encode(pack).await?)
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Schemas, insert buffers and in-memory backends shared by tests.

use std::sync::Arc;

use stratum_core::{
	BloomFilterSet, CollectionSchema, ColumnData, FieldDef, InsertData, MetaCache, SegmentDescriptor, SegmentState,
	SerializerFactory,
};
use stratum_metacache::StandardMetaCache;
use stratum_storage::{MemoryChunkManager, StorageSerializerConfig, StorageSerializerFactory};
use stratum_type::{CollectionId, FieldId, PartitionId, SegmentId, Type};

pub const COLLECTION: CollectionId = CollectionId(1);

pub const VECTOR_DIM: usize = 4;

/// Int64 auto-id primary key, a string, a float vector and the dynamic field.
pub fn auto_id_schema() -> CollectionSchema {
	CollectionSchema::new(
		"images",
		vec![
			FieldDef::new(100, "id", Type::Int64).primary_key().auto_id(true),
			FieldDef::new(101, "image_path", Type::VarChar),
			FieldDef::new(102, "embeddings", Type::FloatVector).dim(VECTOR_DIM),
			FieldDef::new(103, "$meta", Type::Json).dynamic(),
		],
	)
}

/// VarChar auto-id primary key and an integer.
pub fn varchar_auto_id_schema() -> CollectionSchema {
	CollectionSchema::new(
		"documents",
		vec![
			FieldDef::new(100, "doc_id", Type::VarChar).primary_key().auto_id(true),
			FieldDef::new(101, "year", Type::Int32),
		],
	)
}

/// User-supplied Int64 primary key and a float vector.
pub fn manual_pk_schema() -> CollectionSchema {
	CollectionSchema::new(
		"points",
		vec![
			FieldDef::new(100, "pk", Type::Int64).primary_key(),
			FieldDef::new(101, "vector", Type::FloatVector).dim(VECTOR_DIM),
		],
	)
}

/// `rows` rows for every field the user supplies: auto-id primary keys are
/// left out, the dynamic field is included.
pub fn insert_data(schema: &CollectionSchema, rows: usize) -> InsertData {
	let mut data = InsertData::new();
	for field in schema.fields.iter().filter(|f| !f.is_auto_id_primary_key()) {
		data.insert(field.id, column(field, rows));
	}
	data
}

pub fn column(field: &FieldDef, rows: usize) -> ColumnData {
	let dim = field.dim.unwrap_or(VECTOR_DIM);
	match field.r#type {
		Type::Bool => ColumnData::Bool((0..rows).map(|i| i % 2 == 0).collect()),
		Type::Int8 => ColumnData::Int8((0..rows).map(|i| i as i8).collect()),
		Type::Int16 => ColumnData::Int16((0..rows).map(|i| i as i16).collect()),
		Type::Int32 => ColumnData::Int32((0..rows).map(|i| i as i32).collect()),
		Type::Int64 => ColumnData::Int64((0..rows).map(|i| i as i64).collect()),
		Type::Float => ColumnData::Float((0..rows).map(|i| i as f32).collect()),
		Type::Double => ColumnData::Double((0..rows).map(|i| i as f64).collect()),
		Type::VarChar => ColumnData::VarChar((0..rows).map(|i| format!("{}_{}", field.name, i)).collect()),
		Type::Json => ColumnData::Json((0..rows).map(|i| format!("{{\"n\":{}}}", i).into_bytes()).collect()),
		Type::FloatVector => ColumnData::FloatVector {
			dim,
			data: (0..rows * dim).map(|i| i as f32).collect(),
		},
		Type::BinaryVector => ColumnData::BinaryVector {
			dim,
			data: vec![0; rows * dim / 8],
		},
	}
}

/// Int64 column with `rows` rows, used to build misaligned buffers.
pub fn int64_column(rows: usize) -> ColumnData {
	ColumnData::Int64((0..rows as i64).collect())
}

pub fn descriptor(segment: u64, partition: u64, channel: &str) -> SegmentDescriptor {
	SegmentDescriptor {
		id: SegmentId(segment),
		collection: COLLECTION,
		partition: PartitionId(partition),
		channel: channel.to_string(),
		state: SegmentState::Importing,
	}
}

/// Registers `segment` as importing on `metacache`.
pub fn register(metacache: &dyn MetaCache, segment: u64, partition: u64) {
	let descriptor = descriptor(segment, partition, metacache.channel());
	metacache.add_segment(descriptor, &|_| BloomFilterSet::new());
}

/// In-memory storage, a metadata cache per channel and a serializer factory.
pub struct MemoryBackend {
	pub schema: Arc<CollectionSchema>,
	pub chunks: MemoryChunkManager,
	pub serializers: StorageSerializerFactory,
}

impl MemoryBackend {
	pub fn new(schema: CollectionSchema) -> Self {
		let schema = Arc::new(schema);
		Self {
			serializers: StorageSerializerFactory::new(schema.clone(), StorageSerializerConfig::default()),
			chunks: MemoryChunkManager::new("files"),
			schema,
		}
	}

	pub fn metacache(&self, channel: &str) -> Arc<dyn MetaCache> {
		Arc::new(StandardMetaCache::new(COLLECTION, channel))
	}

	pub fn factory(&self) -> &dyn SerializerFactory {
		&self.serializers
	}
}

/// Field identifiers of a buffer, in insertion order.
pub fn fields(data: &InsertData) -> Vec<FieldId> {
	data.fields().collect()
}

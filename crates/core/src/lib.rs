// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Data model and capability interfaces of the stratum import pipeline.
//!
//! This crate provides:
//! - Column-oriented insert buffers ([`InsertData`], [`ColumnData`])
//! - Collection schemas and the reserved system fields
//! - Segment metadata, primary-key statistics and bloom filters
//! - The [`MetaCache`], [`Serializer`] and [`ChunkManager`] interfaces that the
//!   import core consumes without depending on a concrete store
//! - Sync packages and sync tasks describing one durable commit

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod auto_id;
pub mod config;
pub mod interface;
pub mod schema;
pub mod segment;
pub mod sync;
pub mod util;
pub mod value;

pub use auto_id::AutoIdRange;
pub use config::ImportConfig;
pub use interface::{BloomFilterFactory, ChunkManager, MetaCache, Serializer, SerializerFactory};
pub use schema::{CollectionSchema, FieldDef, ROW_ID_FIELD, START_OF_USER_FIELD, TIMESTAMP_FIELD};
pub use segment::{BloomFilterSet, PkStatistics, SegmentDescriptor, SegmentInfo, SegmentState};
pub use stratum_type::{Error, Result};
pub use sync::{Binlog, FieldBinlog, SyncPack, SyncTask};
pub use util::bloom::{BloomFilter, BloomFilterBuilder};
pub use value::{ColumnData, InsertData, PrimaryKey};

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Object storage and binlog encoding.
//!
//! Two [`ChunkManager`](stratum_core::ChunkManager) backends are provided:
//! an in-memory map for tests and embedded use, and a local filesystem
//! backend. [`StorageSerializer`] turns sync packages into v1 binlog
//! artifacts laid out as
//!
//! ```text
//! {root}/insert_log/{collection}/{partition}/{segment}/{field}/{log}
//! {root}/stats_log/{collection}/{partition}/{segment}/{field}/{log}
//! ```

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod codec;
mod local;
mod memory;
pub mod path;
mod serializer;

pub use local::LocalChunkManager;
pub use memory::MemoryChunkManager;
pub use serializer::{LogIdAllocator, StorageSerializer, StorageSerializerConfig, StorageSerializerFactory};

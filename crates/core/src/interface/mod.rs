// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Capabilities the import pipeline consumes.
//!
//! The pipeline never depends on a concrete store: it sees a metadata cache
//! per channel, a serializer bound to one of those caches, and an object
//! storage accessor.

mod chunk;
mod metacache;
mod serializer;

pub use chunk::ChunkManager;
pub use metacache::{BloomFilterFactory, MetaCache};
pub use serializer::{Serializer, SerializerFactory};

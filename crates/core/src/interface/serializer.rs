// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use async_trait::async_trait;
use stratum_type::Result;

use crate::{
	interface::MetaCache,
	sync::{SyncPack, SyncTask},
};

/// Turns a sync package into a sync task holding encoded log artifacts.
#[async_trait]
pub trait Serializer: Send + Sync {
	async fn encode(&self, pack: SyncPack) -> Result<SyncTask>;
}

/// Builds serializers bound to one channel's metadata cache.
pub trait SerializerFactory: Send + Sync {
	fn create(&self, metacache: Arc<dyn MetaCache>) -> Result<Box<dyn Serializer>>;
}

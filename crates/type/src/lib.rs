// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod id;
pub mod value;

pub use error::{
	Error, IntoDiagnostic, Result,
	diagnostic::{self, Diagnostic, DefaultRenderer},
};
pub use id::{CollectionId, FieldId, JobId, LogId, PartitionId, SegmentId, TaskId};
pub use value::{Timestamp, r#type::Type};

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Segment assignment and durable commit of bulk-import batches.
//!
//! A decoded batch flows through:
//! - [`check_rows_equal`]: every field carries the same number of rows
//! - [`append_system_fields`]: generated primary keys, row ids, timestamps
//! - [`pick_segment`]: first-fit placement under the segment size target
//! - [`new_sync_task`]: segment registration and encoding
//! - [`new_import_segment_info`]: the summary reported back to the job
//!
//! [`ImportWriter`] chains these steps for one batch; [`StatsReporter`]
//! periodically logs task counts.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod error;
pub mod file;
pub mod manager;
pub mod pick;
pub mod reduce;
pub mod stats;
pub mod sync;
pub mod system;
pub mod task;
pub mod validate;
pub mod writer;

pub use error::{ImportError, Result};
pub use file::get_file_size;
pub use manager::{StandardTaskManager, TaskFilter, TaskManager};
pub use pick::pick_segment;
pub use reduce::new_import_segment_info;
pub use stats::{StatsReporter, TaskStats, collect_stats, log_stats};
pub use sync::new_sync_task;
pub use system::{append_system_fields, insert_data_row_count};
pub use task::{
	FileStats, ImportFile, ImportRequest, ImportRequestSegment, ImportSegmentInfo, ImportTask, PreImportTask, Task,
	TaskState, TaskType,
};
pub use validate::check_rows_equal;
pub use writer::ImportWriter;

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Pre-import and import tasks.
//!
//! Tasks are shared behind `Arc` between the task manager, the workers that
//! write their batches and the stats reporter. Every piece of state a worker
//! mutates sits behind its own lock.

use std::{
	collections::{BTreeMap, HashMap},
	fmt::{Display, Formatter},
	ops::Range,
	sync::Arc,
	time::Duration,
};

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use stratum_core::{AutoIdRange, ChunkManager, CollectionSchema, FieldBinlog, MetaCache};
use stratum_type::{CollectionId, JobId, PartitionId, SegmentId, TaskId, Timestamp};

use crate::{
	error::{ImportError, Result},
	file::get_file_size,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
	PreImport,
	Import,
}

impl Display for TaskType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			TaskType::PreImport => f.write_str("PreImportTask"),
			TaskType::Import => f.write_str("ImportTask"),
		}
	}
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
	Pending,
	InProgress,
	Completed,
	Failed,
}

impl Display for TaskState {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			TaskState::Pending => f.write_str("Pending"),
			TaskState::InProgress => f.write_str("InProgress"),
			TaskState::Completed => f.write_str("Completed"),
			TaskState::Failed => f.write_str("Failed"),
		}
	}
}

/// One logical input file, possibly split over several objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportFile {
	pub paths: Vec<String>,
}

impl ImportFile {
	pub fn new(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
		Self {
			paths: paths.into_iter().map(Into::into).collect(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
	pub file: ImportFile,
	pub file_size: u64,
}

/// A segment the import task may write to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequestSegment {
	pub segment: SegmentId,
	pub partition: PartitionId,
	pub vchannel: String,
}

/// What an import task reports about one of its segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSegmentInfo {
	pub segment: SegmentId,
	pub imported_rows: u64,
	pub binlogs: Vec<FieldBinlog>,
	pub statslogs: Vec<FieldBinlog>,
}

/// Sizes the input files of a job before the import proper is planned.
pub struct PreImportTask {
	id: TaskId,
	job: JobId,
	collection: CollectionId,
	files: Vec<ImportFile>,
	file_stats: RwLock<Vec<FileStats>>,
	state: RwLock<TaskState>,
	reason: RwLock<String>,
}

impl PreImportTask {
	pub fn new(id: TaskId, job: JobId, collection: CollectionId, files: Vec<ImportFile>) -> Self {
		Self {
			id,
			job,
			collection,
			files,
			file_stats: RwLock::new(Vec::new()),
			state: RwLock::new(TaskState::Pending),
			reason: RwLock::new(String::new()),
		}
	}

	pub fn id(&self) -> TaskId {
		self.id
	}

	pub fn job(&self) -> JobId {
		self.job
	}

	pub fn collection(&self) -> CollectionId {
		self.collection
	}

	pub fn files(&self) -> &[ImportFile] {
		&self.files
	}

	pub fn file_stats(&self) -> Vec<FileStats> {
		self.file_stats.read().clone()
	}

	/// Queries the total size of every input file.
	///
	/// Stops at the first failing file; sizes collected so far are kept.
	#[tracing::instrument(name = "import::preimport::file_sizes", level = "debug", skip(self, chunks), fields(task = %self.id, job = %self.job))]
	pub async fn collect_file_sizes(&self, chunks: &dyn ChunkManager, timeout: Duration) -> Result<()> {
		for file in &self.files {
			let file_size = get_file_size(file, chunks, timeout).await?;
			self.file_stats.write().push(FileStats {
				file: file.clone(),
				file_size,
			});
		}
		Ok(())
	}
}

/// Parameters of an import task as handed down by the job scheduler.
#[derive(Debug, Clone)]
pub struct ImportRequest {
	pub task: TaskId,
	pub job: JobId,
	pub collection: CollectionId,
	pub schema: Arc<CollectionSchema>,
	/// Commit timestamp of every row written by the task.
	pub ts: Timestamp,
	pub auto_id_range: AutoIdRange,
	pub request_segments: Vec<ImportRequestSegment>,
}

/// Writes decoded batches of a job into its declared segments.
pub struct ImportTask {
	id: TaskId,
	job: JobId,
	collection: CollectionId,
	schema: Arc<CollectionSchema>,
	ts: Timestamp,
	request_segments: Vec<ImportRequestSegment>,
	auto_ids: Mutex<AutoIdRange>,
	metacaches: HashMap<String, Arc<dyn MetaCache>>,
	segments_info: RwLock<BTreeMap<SegmentId, ImportSegmentInfo>>,
	state: RwLock<TaskState>,
	reason: RwLock<String>,
}

impl ImportTask {
	/// Creates the task with one metadata cache per channel its segments
	/// live on.
	pub fn new(request: ImportRequest, metacache: impl Fn(&str) -> Arc<dyn MetaCache>) -> Self {
		let mut metacaches = HashMap::new();
		for segment in &request.request_segments {
			if !metacaches.contains_key(&segment.vchannel) {
				metacaches.insert(segment.vchannel.clone(), metacache(&segment.vchannel));
			}
		}
		Self {
			id: request.task,
			job: request.job,
			collection: request.collection,
			schema: request.schema,
			ts: request.ts,
			request_segments: request.request_segments,
			auto_ids: Mutex::new(request.auto_id_range),
			metacaches,
			segments_info: RwLock::new(BTreeMap::new()),
			state: RwLock::new(TaskState::Pending),
			reason: RwLock::new(String::new()),
		}
	}

	pub fn id(&self) -> TaskId {
		self.id
	}

	pub fn job(&self) -> JobId {
		self.job
	}

	pub fn collection(&self) -> CollectionId {
		self.collection
	}

	pub fn schema(&self) -> &CollectionSchema {
		&self.schema
	}

	pub fn ts(&self) -> Timestamp {
		self.ts
	}

	pub fn request_segments(&self) -> &[ImportRequestSegment] {
		&self.request_segments
	}

	pub fn metacache(&self, channel: &str) -> Result<Arc<dyn MetaCache>> {
		self.metacaches.get(channel).cloned().ok_or_else(|| ImportError::MetaCacheNotFound {
			channel: channel.to_string(),
		})
	}

	pub fn channels(&self) -> impl Iterator<Item = &str> {
		self.metacaches.keys().map(String::as_str)
	}

	/// Takes the next `n` identifiers of the task's auto-id range.
	///
	/// The cursor only moves when the whole request fits, so a failed call
	/// leaves the range untouched.
	pub fn alloc_auto_ids(&self, n: usize) -> Result<Range<i64>> {
		let mut range = self.auto_ids.lock();
		range.alloc(n).ok_or_else(|| ImportError::AutoIdExhausted {
			next: range.current(),
			end: range.end(),
			requested: n,
		})
	}

	pub fn auto_id_range(&self) -> AutoIdRange {
		*self.auto_ids.lock()
	}

	pub fn segments_info(&self) -> Vec<ImportSegmentInfo> {
		self.segments_info.read().values().cloned().collect()
	}

	pub fn segment_info(&self, segment: SegmentId) -> Option<ImportSegmentInfo> {
		self.segments_info.read().get(&segment).cloned()
	}

	/// Records the latest summary of a segment, replacing the previous one.
	pub fn update_segment_info(&self, info: ImportSegmentInfo) {
		self.segments_info.write().insert(info.segment, info);
	}

	pub fn state(&self) -> TaskState {
		*self.state.read()
	}

	pub fn reason(&self) -> String {
		self.reason.read().clone()
	}
}

/// Either kind of task, as stored by the task manager.
#[derive(Clone)]
pub enum Task {
	PreImport(Arc<PreImportTask>),
	Import(Arc<ImportTask>),
}

impl Task {
	pub fn id(&self) -> TaskId {
		match self {
			Task::PreImport(task) => task.id,
			Task::Import(task) => task.id,
		}
	}

	pub fn job(&self) -> JobId {
		match self {
			Task::PreImport(task) => task.job,
			Task::Import(task) => task.job,
		}
	}

	pub fn task_type(&self) -> TaskType {
		match self {
			Task::PreImport(_) => TaskType::PreImport,
			Task::Import(_) => TaskType::Import,
		}
	}

	pub fn state(&self) -> TaskState {
		*self.state_lock().read()
	}

	pub fn reason(&self) -> String {
		match self {
			Task::PreImport(task) => task.reason.read().clone(),
			Task::Import(task) => task.reason.read().clone(),
		}
	}

	pub fn set_state(&self, state: TaskState, reason: impl Into<String>) {
		*self.state_lock().write() = state;
		let reason = reason.into();
		match self {
			Task::PreImport(task) => *task.reason.write() = reason,
			Task::Import(task) => *task.reason.write() = reason,
		}
	}

	fn state_lock(&self) -> &RwLock<TaskState> {
		match self {
			Task::PreImport(task) => &task.state,
			Task::Import(task) => &task.state,
		}
	}

	pub fn as_import(&self) -> Option<&Arc<ImportTask>> {
		match self {
			Task::Import(task) => Some(task),
			Task::PreImport(_) => None,
		}
	}

	pub fn as_preimport(&self) -> Option<&Arc<PreImportTask>> {
		match self {
			Task::PreImport(task) => Some(task),
			Task::Import(_) => None,
		}
	}
}

impl From<PreImportTask> for Task {
	fn from(task: PreImportTask) -> Self {
		Task::PreImport(Arc::new(task))
	}
}

impl From<ImportTask> for Task {
	fn from(task: ImportTask) -> Self {
		Task::Import(Arc::new(task))
	}
}

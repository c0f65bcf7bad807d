// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use stratum_type::{JobId, TaskId};
use tracing::debug;

use crate::{
	error::{ImportError, Result},
	task::{ImportTask, PreImportTask, Task, TaskState, TaskType},
};

/// Selects tasks by type, job and state. Unset criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
	task_type: Option<TaskType>,
	job: Option<JobId>,
	states: Vec<TaskState>,
}

impl TaskFilter {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_type(mut self, task_type: TaskType) -> Self {
		self.task_type = Some(task_type);
		self
	}

	pub fn with_job(mut self, job: JobId) -> Self {
		self.job = Some(job);
		self
	}

	pub fn with_states(mut self, states: impl IntoIterator<Item = TaskState>) -> Self {
		self.states.extend(states);
		self
	}

	pub fn matches(&self, task: &Task) -> bool {
		self.task_type.map_or(true, |t| task.task_type() == t)
			&& self.job.map_or(true, |job| task.job() == job)
			&& (self.states.is_empty() || self.states.contains(&task.state()))
	}
}

/// Registry of the tasks a worker node is running.
pub trait TaskManager: Send + Sync {
	/// Adds the task, replacing any task with the same id.
	fn add(&self, task: Task);

	fn get(&self, task: TaskId) -> Option<Task>;

	/// Matching tasks ordered by id.
	fn get_by(&self, filter: &TaskFilter) -> Vec<Task>;

	fn update_state(&self, task: TaskId, kind: TaskType, state: TaskState, reason: &str) -> Result<()>;

	fn remove(&self, task: TaskId) -> Option<Task>;

	fn get_import(&self, task: TaskId) -> Result<Arc<ImportTask>> {
		self.get(task).and_then(|t| t.as_import().cloned()).ok_or(ImportError::TaskNotFound {
			task,
			kind: TaskType::Import,
		})
	}

	fn get_preimport(&self, task: TaskId) -> Result<Arc<PreImportTask>> {
		self.get(task).and_then(|t| t.as_preimport().cloned()).ok_or(ImportError::TaskNotFound {
			task,
			kind: TaskType::PreImport,
		})
	}
}

#[derive(Default)]
pub struct StandardTaskManager {
	tasks: RwLock<HashMap<TaskId, Task>>,
}

impl StandardTaskManager {
	pub fn new() -> Self {
		Self::default()
	}
}

impl TaskManager for StandardTaskManager {
	fn add(&self, task: Task) {
		debug!("Added {} {} of job {}", task.task_type(), task.id(), task.job());
		self.tasks.write().insert(task.id(), task);
	}

	fn get(&self, task: TaskId) -> Option<Task> {
		self.tasks.read().get(&task).cloned()
	}

	fn get_by(&self, filter: &TaskFilter) -> Vec<Task> {
		let mut tasks: Vec<Task> = self.tasks.read().values().filter(|t| filter.matches(t)).cloned().collect();
		tasks.sort_by_key(Task::id);
		tasks
	}

	fn update_state(&self, task: TaskId, kind: TaskType, state: TaskState, reason: &str) -> Result<()> {
		let tasks = self.tasks.read();
		match tasks.get(&task) {
			Some(t) if t.task_type() == kind => {
				t.set_state(state, reason);
				debug!("{} {} is now {}", kind, task, state);
				Ok(())
			}
			_ => Err(ImportError::TaskNotFound {
				task,
				kind,
			}),
		}
	}

	fn remove(&self, task: TaskId) -> Option<Task> {
		self.tasks.write().remove(&task)
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Periodic task statistics.

use std::{
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
	time::Duration,
};

use tokio::{
	sync::oneshot,
	task::JoinHandle,
	time::{self, MissedTickBehavior},
};
use tracing::info;

use crate::{
	manager::{TaskFilter, TaskManager},
	task::{TaskState, TaskType},
};

/// Task counts of one type, by state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskStats {
	pub task_type: TaskType,
	pub pending: usize,
	pub in_progress: usize,
	pub completed: usize,
	pub failed: usize,
}

impl TaskStats {
	fn empty(task_type: TaskType) -> Self {
		Self {
			task_type,
			pending: 0,
			in_progress: 0,
			completed: 0,
			failed: 0,
		}
	}
}

/// Counts the manager's tasks for each type, pre-import first.
pub fn collect_stats(manager: &dyn TaskManager) -> [TaskStats; 2] {
	[TaskType::PreImport, TaskType::Import].map(|task_type| {
		let mut stats = TaskStats::empty(task_type);
		for task in manager.get_by(&TaskFilter::new().with_type(task_type)) {
			match task.state() {
				TaskState::Pending => stats.pending += 1,
				TaskState::InProgress => stats.in_progress += 1,
				TaskState::Completed => stats.completed += 1,
				TaskState::Failed => stats.failed += 1,
			}
		}
		stats
	})
}

pub fn log_stats(manager: &dyn TaskManager) -> [TaskStats; 2] {
	let stats = collect_stats(manager);
	for s in &stats {
		info!(
			"type" = %s.task_type,
			pending = s.pending,
			in_progress = s.in_progress,
			completed = s.completed,
			failed = s.failed,
			"import task stats"
		);
	}
	stats
}

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Background task logging [`log_stats`] every interval.
pub struct StatsReporter {
	shutdown_tx: Option<oneshot::Sender<()>>,
	handle: Option<JoinHandle<()>>,
	reports: Arc<AtomicU64>,
}

impl StatsReporter {
	/// Starts reporting on the current tokio runtime. The first report is
	/// emitted immediately. Intervals shorter than a millisecond are raised
	/// to one.
	pub fn spawn(manager: Arc<dyn TaskManager>, interval: Duration) -> Self {
		let interval = interval.max(MIN_INTERVAL);
		let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
		let reports = Arc::new(AtomicU64::new(0));
		let counter = reports.clone();

		let handle = tokio::spawn(async move {
			let mut ticker = time::interval(interval);
			ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
			loop {
				tokio::select! {
					_ = &mut shutdown_rx => break,
					_ = ticker.tick() => {
						log_stats(manager.as_ref());
						counter.fetch_add(1, Ordering::Relaxed);
					}
				}
			}
		});

		Self {
			shutdown_tx: Some(shutdown_tx),
			handle: Some(handle),
			reports,
		}
	}

	/// Number of reports emitted so far.
	pub fn reports(&self) -> u64 {
		self.reports.load(Ordering::Relaxed)
	}

	pub async fn shutdown(mut self) {
		if let Some(tx) = self.shutdown_tx.take() {
			let _ = tx.send(());
		}
		if let Some(handle) = self.handle.take() {
			let _ = handle.await;
		}
	}
}

impl Drop for StatsReporter {
	fn drop(&mut self) {
		if let Some(handle) = self.handle.take() {
			handle.abort();
		}
	}
}

#[cfg(test)]
mod tests {
	use stratum_testing::util::wait::wait_for;
	use stratum_type::{CollectionId, JobId, TaskId};

	use super::*;
	use crate::{
		manager::StandardTaskManager,
		task::{PreImportTask, Task},
	};

	fn preimport(id: u64) -> Task {
		PreImportTask::new(TaskId(id), JobId(1), CollectionId(1), vec![]).into()
	}

	#[test]
	fn test_empty_manager_reports_zero() {
		let manager = StandardTaskManager::new();
		let [pre, imp] = collect_stats(&manager);
		assert_eq!(pre, TaskStats::empty(TaskType::PreImport));
		assert_eq!(imp, TaskStats::empty(TaskType::Import));
	}

	#[test]
	fn test_counts_by_state() {
		let manager = StandardTaskManager::new();
		for id in 1..=4 {
			manager.add(preimport(id));
		}
		manager.update_state(TaskId(2), TaskType::PreImport, TaskState::InProgress, "").unwrap();
		manager.update_state(TaskId(3), TaskType::PreImport, TaskState::Failed, "io").unwrap();
		manager.update_state(TaskId(4), TaskType::PreImport, TaskState::Failed, "io").unwrap();

		let [stats, _] = log_stats(&manager);
		assert_eq!(stats.pending, 1);
		assert_eq!(stats.in_progress, 1);
		assert_eq!(stats.completed, 0);
		assert_eq!(stats.failed, 2);
	}

	#[tokio::test]
	async fn test_reporter_runs_until_shutdown() {
		let manager: Arc<dyn TaskManager> = Arc::new(StandardTaskManager::new());
		let reporter = StatsReporter::spawn(manager, Duration::from_millis(5));

		wait_for(|| reporter.reports() >= 3, "reporter should tick").await;
		reporter.shutdown().await;
	}

	#[tokio::test]
	async fn test_zero_interval_is_clamped() {
		let manager: Arc<dyn TaskManager> = Arc::new(StandardTaskManager::new());
		let reporter = StatsReporter::spawn(manager, Duration::ZERO);

		wait_for(|| reporter.reports() >= 3, "reporter should survive a zero interval").await;
		reporter.shutdown().await;
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use stratum_type::{Diagnostic, Error, IntoDiagnostic, PartitionId, SegmentId, TaskId, Type};

use crate::task::TaskType;

pub type Result<T> = std::result::Result<T, ImportError>;

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
	#[error(
		"imported rows are not aligned, field '{first_field}' with '{first_rows}' rows, field '{field}' with '{rows}' rows"
	)]
	DataMisaligned {
		first_field: String,
		first_rows: usize,
		field: String,
		rows: usize,
	},

	#[error("unsupported configuration: {reason}")]
	UnsupportedConfiguration {
		reason: String,
	},

	#[error("segment {segment} not found")]
	SegmentNotFound {
		segment: SegmentId,
	},

	#[error("collection '{collection}' has no primary key field")]
	PrimaryFieldMissing {
		collection: String,
	},

	#[error("field '{field}' of type {ty} cannot hold generated primary keys")]
	InvalidPrimaryKeyType {
		field: String,
		ty: Type,
	},

	#[error("auto-id range exhausted: {requested} ids requested at {next}, range ends at {end}")]
	AutoIdExhausted {
		next: i64,
		end: i64,
		requested: usize,
	},

	#[error("no metadata cache for channel '{channel}'")]
	MetaCacheNotFound {
		channel: String,
	},

	#[error("no segment declared for channel '{channel}' and partition {partition}")]
	NoSegmentAvailable {
		channel: String,
		partition: PartitionId,
	},

	#[error("cannot find {kind} with id {task}")]
	TaskNotFound {
		task: TaskId,
		kind: TaskType,
	},

	#[error(transparent)]
	Storage(#[from] Error),
}

impl IntoDiagnostic for ImportError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			ImportError::DataMisaligned { first_field, field, .. } => Diagnostic {
				code: "IMPORT_001".to_string(),
				message,
				label: Some(format!("field '{}' disagrees with field '{}'", field, first_field)),
				help: Some("Every field of a batch must carry the same number of rows".to_string()),
				notes: vec![
					"Auto-generated primary keys and the dynamic field are not compared".to_string(),
				],
				cause: None,
			},

			ImportError::UnsupportedConfiguration { .. } => Diagnostic {
				code: "IMPORT_002".to_string(),
				message,
				label: None,
				help: Some("Disable the storage v2 layout for import jobs".to_string()),
				notes: vec![],
				cause: None,
			},

			ImportError::SegmentNotFound { .. } => Diagnostic {
				code: "IMPORT_003".to_string(),
				message,
				label: Some("import failed".to_string()),
				help: None,
				notes: vec!["The segment was not registered in the metadata cache of its channel".to_string()],
				cause: None,
			},

			ImportError::PrimaryFieldMissing { .. } => Diagnostic {
				code: "IMPORT_004".to_string(),
				message,
				label: None,
				help: Some("Declare exactly one primary key field in the collection schema".to_string()),
				notes: vec![],
				cause: None,
			},

			ImportError::InvalidPrimaryKeyType { .. } => Diagnostic {
				code: "IMPORT_005".to_string(),
				message,
				label: None,
				help: Some("Generated primary keys must be INT64 or VARCHAR".to_string()),
				notes: vec![],
				cause: None,
			},

			ImportError::AutoIdExhausted { .. } => Diagnostic {
				code: "IMPORT_006".to_string(),
				message,
				label: None,
				help: Some("Reserve an auto-id range that covers every row of the task".to_string()),
				notes: vec![],
				cause: None,
			},

			ImportError::MetaCacheNotFound { .. } => Diagnostic {
				code: "IMPORT_007".to_string(),
				message,
				label: None,
				help: Some("Every channel written by the task needs a metadata cache".to_string()),
				notes: vec![],
				cause: None,
			},

			ImportError::NoSegmentAvailable { .. } => Diagnostic {
				code: "IMPORT_008".to_string(),
				message,
				label: None,
				help: Some("Declare at least one target segment per channel and partition".to_string()),
				notes: vec![],
				cause: None,
			},

			ImportError::TaskNotFound { .. } => Diagnostic {
				code: "IMPORT_009".to_string(),
				message,
				label: None,
				help: None,
				notes: vec![],
				cause: None,
			},

			ImportError::Storage(err) => err.diagnostic(),
		}
	}
}

impl From<ImportError> for Error {
	fn from(err: ImportError) -> Self {
		Error(err.into_diagnostic())
	}
}

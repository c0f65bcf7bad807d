// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::time::Duration;

use crate::error::diagnostic::Diagnostic;

/// Underlying storage call failed
pub fn io_error(err: impl std::fmt::Display) -> Diagnostic {
	Diagnostic {
		code: "STORAGE_001".to_string(),
		message: format!("storage io error: {}", err),
		label: None,
		help: Some("Check the availability and permissions of the storage backend".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// Object does not exist at the given path
pub fn not_found(path: &str) -> Diagnostic {
	Diagnostic {
		code: "STORAGE_002".to_string(),
		message: format!("object '{}' not found", path),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

/// Storage call exceeded its deadline
pub fn timeout(path: &str, timeout: Duration) -> Diagnostic {
	Diagnostic {
		code: "STORAGE_003".to_string(),
		message: format!("storage request for '{}' timed out after {:?}", path, timeout),
		label: None,
		help: Some("The caller decides whether to retry".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// Segment is not registered in the metadata cache the serializer is bound to
pub fn segment_not_registered(segment: u64, channel: &str) -> Diagnostic {
	Diagnostic {
		code: "STORAGE_004".to_string(),
		message: format!("segment {} is not registered in the metadata cache of channel '{}'", segment, channel),
		label: None,
		help: Some("Register the segment before encoding data for it".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// Object path escapes the storage root
pub fn invalid_path(path: &str) -> Diagnostic {
	Diagnostic {
		code: "STORAGE_005".to_string(),
		message: format!("invalid object path '{}'", path),
		label: None,
		help: Some("Object paths must be relative and must not contain '..'".to_string()),
		notes: vec![],
		cause: None,
	}
}

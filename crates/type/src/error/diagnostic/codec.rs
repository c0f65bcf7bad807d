// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

pub fn encode_error(err: impl std::fmt::Display) -> Diagnostic {
	Diagnostic {
		code: "CODEC_001".to_string(),
		message: format!("failed to encode: {}", err),
		label: None,
		help: None,
		notes: vec![],
		cause: None,
	}
}

pub fn decode_error(err: impl std::fmt::Display) -> Diagnostic {
	Diagnostic {
		code: "CODEC_002".to_string(),
		message: format!("failed to decode: {}", err),
		label: None,
		help: Some("This may indicate data corruption or version mismatch".to_string()),
		notes: vec![],
		cause: None,
	}
}

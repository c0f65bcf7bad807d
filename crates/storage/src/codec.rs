// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Binlog payload encoding.
//!
//! Insert logs hold one column in postcard; statistics logs hold the
//! primary-key statistics of a batch as JSON.

use stratum_core::{ColumnData, PkStatistics};
use stratum_type::{Result, diagnostic::codec, error};

pub fn encode_insert_log(column: &ColumnData) -> Result<Vec<u8>> {
	postcard::to_stdvec(column).map_err(|e| error!(codec::encode_error(e)))
}

pub fn decode_insert_log(bytes: &[u8]) -> Result<ColumnData> {
	postcard::from_bytes(bytes).map_err(|e| error!(codec::decode_error(e)))
}

pub fn encode_stats_log(stats: &PkStatistics) -> Result<Vec<u8>> {
	serde_json::to_vec(stats).map_err(|e| error!(codec::encode_error(e)))
}

pub fn decode_stats_log(bytes: &[u8]) -> Result<PkStatistics> {
	serde_json::from_slice(bytes).map_err(|e| error!(codec::decode_error(e)))
}

#[cfg(test)]
mod tests {
	use stratum_core::PrimaryKey;
	use stratum_type::FieldId;

	use super::*;

	#[test]
	fn test_insert_log() {
		let column = ColumnData::FloatVector {
			dim: 2,
			data: vec![0.5, 1.5, 2.5, 3.5],
		};
		let bytes = encode_insert_log(&column).unwrap();
		assert_eq!(decode_insert_log(&bytes).unwrap(), column);
	}

	#[test]
	fn test_stats_log_keeps_membership() {
		let stats = PkStatistics::from_column(FieldId(100), &ColumnData::Int64(vec![10, 20, 30]));
		let decoded = decode_stats_log(&encode_stats_log(&stats).unwrap()).unwrap();
		assert!(decoded.may_contain(&PrimaryKey::Int64(20)));
		assert_eq!(decoded.min, Some(PrimaryKey::Int64(10)));
	}

	#[test]
	fn test_decode_garbage() {
		let err = decode_stats_log(b"not json").unwrap_err();
		assert_eq!(err.code(), "CODEC_002");
	}
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use stratum_core::{CollectionSchema, ColumnData, InsertData, ROW_ID_FIELD, TIMESTAMP_FIELD};
use stratum_type::Type;
use tracing::{instrument, trace};

use crate::{
	error::{ImportError, Result},
	task::ImportTask,
};

/// Row count of the first non-dynamic field that holds any rows, 0 if none
/// does.
pub fn insert_data_row_count(data: &InsertData, schema: &CollectionSchema) -> usize {
	data.iter()
		.filter(|(field, _)| !schema.is_dynamic(*field))
		.map(|(_, column)| column.row_num())
		.find(|rows| *rows > 0)
		.unwrap_or(0)
}

/// Adds the row id and timestamp columns to `data`, plus the primary key
/// column when the collection generates its keys.
///
/// Identifiers come from the task's auto-id range, which advances by the row
/// count of the batch. Nothing is changed when an error is returned.
#[instrument(name = "import::append_system_fields", level = "trace", skip(task, data), fields(task = %task.id(), job = %task.job()))]
pub fn append_system_fields(task: &ImportTask, data: &mut InsertData) -> Result<()> {
	let schema = task.schema();
	let pk = schema.primary_field().ok_or_else(|| ImportError::PrimaryFieldMissing {
		collection: schema.name.clone(),
	})?;

	if pk.auto_id && !matches!(pk.r#type, Type::Int64 | Type::VarChar) {
		return Err(ImportError::InvalidPrimaryKeyType {
			field: pk.name.clone(),
			ty: pk.r#type,
		});
	}

	let rows = insert_data_row_count(data, schema);
	let ids: Vec<i64> = task.alloc_auto_ids(rows)?.collect();
	trace!(rows, first = ?ids.first(), "allocated row ids");

	if pk.auto_id {
		let column = match pk.r#type {
			Type::VarChar => ColumnData::VarChar(ids.iter().map(|id| id.to_string()).collect()),
			_ => ColumnData::Int64(ids.clone()),
		};
		data.insert(pk.id, column);
	}
	data.insert(ROW_ID_FIELD, ColumnData::Int64(ids));
	data.insert(TIMESTAMP_FIELD, ColumnData::Int64(vec![task.ts().as_i64(); rows]));
	Ok(())
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use stratum_core::{AutoIdRange, FieldDef};
	use stratum_metacache::StandardMetaCache;
	use stratum_testing::fixture::{auto_id_schema, insert_data, manual_pk_schema, varchar_auto_id_schema};
	use stratum_type::{CollectionId, FieldId, JobId, TaskId, Timestamp};

	use super::*;
	use crate::task::ImportRequest;

	fn task(schema: CollectionSchema, begin: i64, end: i64) -> ImportTask {
		ImportTask::new(
			ImportRequest {
				task: TaskId(1),
				job: JobId(1),
				collection: CollectionId(1),
				schema: Arc::new(schema),
				ts: Timestamp(4242),
				auto_id_range: AutoIdRange::new(begin, end),
				request_segments: vec![],
			},
			|channel| Arc::new(StandardMetaCache::new(CollectionId(1), channel)),
		)
	}

	#[test]
	fn test_row_count_skips_dynamic_and_empty_fields() {
		let schema = auto_id_schema();
		let data = InsertData::new()
			.with_column(103, ColumnData::Json(vec![b"{}".to_vec(); 7]))
			.with_column(101, ColumnData::VarChar(vec![]))
			.with_column(102, ColumnData::FloatVector { dim: 4, data: vec![0.0; 12] });
		assert_eq!(insert_data_row_count(&data, &schema), 3);
		assert_eq!(insert_data_row_count(&InsertData::new(), &schema), 0);
	}

	#[test]
	fn test_int64_auto_id() {
		let task = task(auto_id_schema(), 1000, 2000);
		let mut data = insert_data(task.schema(), 3);
		append_system_fields(&task, &mut data).unwrap();

		assert_eq!(data.get(FieldId(100)), Some(&ColumnData::Int64(vec![1000, 1001, 1002])));
		assert_eq!(data.get(ROW_ID_FIELD), Some(&ColumnData::Int64(vec![1000, 1001, 1002])));
		assert_eq!(data.get(TIMESTAMP_FIELD), Some(&ColumnData::Int64(vec![4242; 3])));
		assert_eq!(task.auto_id_range().current(), 1003);
	}

	#[test]
	fn test_varchar_auto_id_is_decimal() {
		let task = task(varchar_auto_id_schema(), 98, 200);
		let mut data = insert_data(task.schema(), 3);
		append_system_fields(&task, &mut data).unwrap();

		let expected = vec!["98".to_string(), "99".to_string(), "100".to_string()];
		assert_eq!(data.get(FieldId(100)), Some(&ColumnData::VarChar(expected)));
	}

	#[test]
	fn test_user_primary_key_is_kept() {
		let task = task(manual_pk_schema(), 0, 100);
		let mut data = insert_data(task.schema(), 2);
		let before = data.get(FieldId(100)).cloned();
		append_system_fields(&task, &mut data).unwrap();

		assert_eq!(data.get(FieldId(100)).cloned(), before);
		assert_eq!(data.get(ROW_ID_FIELD), Some(&ColumnData::Int64(vec![0, 1])));
		assert_eq!(task.auto_id_range().current(), 2);
	}

	#[test]
	fn test_batches_never_overlap() {
		let task = task(auto_id_schema(), 0, 100);
		let mut first = insert_data(task.schema(), 4);
		let mut second = insert_data(task.schema(), 5);
		append_system_fields(&task, &mut first).unwrap();
		append_system_fields(&task, &mut second).unwrap();

		assert_eq!(first.get(ROW_ID_FIELD), Some(&ColumnData::Int64((0..4).collect())));
		assert_eq!(second.get(ROW_ID_FIELD), Some(&ColumnData::Int64((4..9).collect())));
	}

	#[test]
	fn test_zero_rows() {
		let task = task(auto_id_schema(), 10, 20);
		let mut data = insert_data(task.schema(), 0);
		append_system_fields(&task, &mut data).unwrap();

		assert_eq!(data.get(ROW_ID_FIELD), Some(&ColumnData::Int64(vec![])));
		assert_eq!(task.auto_id_range().current(), 10);
	}

	#[test]
	fn test_exhausted_range_leaves_data_untouched() {
		let task = task(auto_id_schema(), 0, 2);
		let mut data = insert_data(task.schema(), 3);
		let before = data.clone();

		let err = append_system_fields(&task, &mut data).unwrap_err();
		assert!(matches!(err, ImportError::AutoIdExhausted { next: 0, end: 2, requested: 3 }));
		assert_eq!(data, before);
		assert_eq!(task.auto_id_range().current(), 0);
	}

	#[test]
	fn test_missing_primary_key() {
		let task = task(CollectionSchema::new("nopk", vec![FieldDef::new(100, "a", Type::Int64)]), 0, 10);
		let mut data = InsertData::new();
		assert!(matches!(
			append_system_fields(&task, &mut data),
			Err(ImportError::PrimaryFieldMissing { collection }) if collection == "nopk"
		));
	}

	#[test]
	fn test_auto_id_on_float_key() {
		let schema = CollectionSchema::new("bad", vec![FieldDef::new(100, "k", Type::Double).primary_key().auto_id(true)]);
		let task = task(schema, 0, 10);
		let mut data = InsertData::new();
		assert!(matches!(
			append_system_fields(&task, &mut data),
			Err(ImportError::InvalidPrimaryKeyType { ty: Type::Double, .. })
		));
	}
}

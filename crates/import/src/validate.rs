// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use stratum_core::{CollectionSchema, InsertData};
use stratum_type::FieldId;

use crate::error::{ImportError, Result};

fn is_compared(schema: &CollectionSchema, field: FieldId) -> bool {
	!schema.is_auto_id_primary_key(field) && !schema.is_dynamic(field)
}

/// Checks that every compared field of `data` holds the same number of rows.
///
/// The first compared field, in buffer order, sets the reference count.
/// Auto-generated primary keys and the dynamic field are not compared.
pub fn check_rows_equal(schema: &CollectionSchema, data: &InsertData) -> Result<()> {
	let mut compared = data.iter().filter(|(field, _)| is_compared(schema, *field));

	let Some((first_field, first)) = compared.next() else {
		return Ok(());
	};
	let first_rows = first.row_num();

	for (field, column) in compared {
		let rows = column.row_num();
		if rows != first_rows {
			return Err(ImportError::DataMisaligned {
				first_field: schema.field_name(first_field),
				first_rows,
				field: schema.field_name(field),
				rows,
			});
		}
	}
	Ok(())
}

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};
use stratum_type::{FieldId, Type};

/// Implicit row identifier column, present in every committed batch.
pub const ROW_ID_FIELD: FieldId = FieldId(0);

/// Implicit commit timestamp column, present in every committed batch.
pub const TIMESTAMP_FIELD: FieldId = FieldId(1);

/// First identifier available to user-declared fields.
pub const START_OF_USER_FIELD: FieldId = FieldId(100);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
	pub id: FieldId,
	pub name: String,
	pub r#type: Type,
	pub is_primary_key: bool,
	pub auto_id: bool,
	pub is_dynamic: bool,
	/// Vector dimension, only meaningful for vector types.
	pub dim: Option<usize>,
}

impl FieldDef {
	pub fn new(id: impl Into<FieldId>, name: impl Into<String>, r#type: Type) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			r#type,
			is_primary_key: false,
			auto_id: false,
			is_dynamic: false,
			dim: None,
		}
	}

	pub fn primary_key(mut self) -> Self {
		self.is_primary_key = true;
		self
	}

	pub fn auto_id(mut self, auto_id: bool) -> Self {
		self.auto_id = auto_id;
		self
	}

	pub fn dynamic(mut self) -> Self {
		self.is_dynamic = true;
		self
	}

	pub fn dim(mut self, dim: usize) -> Self {
		self.dim = Some(dim);
		self
	}

	/// Primary key whose values are generated by the import pipeline.
	pub fn is_auto_id_primary_key(&self) -> bool {
		self.is_primary_key && self.auto_id
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
	pub name: String,
	pub fields: Vec<FieldDef>,
}

impl CollectionSchema {
	pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
		Self {
			name: name.into(),
			fields,
		}
	}

	pub fn field(&self, id: FieldId) -> Option<&FieldDef> {
		self.fields.iter().find(|f| f.id == id)
	}

	pub fn primary_field(&self) -> Option<&FieldDef> {
		self.fields.iter().find(|f| f.is_primary_key)
	}

	/// Display name of a field, falling back to its identifier for columns
	/// the schema does not declare.
	pub fn field_name(&self, id: FieldId) -> String {
		match self.field(id) {
			Some(field) => field.name.clone(),
			None => format!("field_{}", id),
		}
	}

	pub fn is_dynamic(&self, id: FieldId) -> bool {
		self.field(id).map_or(false, |f| f.is_dynamic)
	}

	pub fn is_auto_id_primary_key(&self, id: FieldId) -> bool {
		self.field(id).map_or(false, |f| f.is_auto_id_primary_key())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn schema() -> CollectionSchema {
		CollectionSchema::new(
			"images",
			vec![
				FieldDef::new(100, "id", Type::Int64).primary_key().auto_id(true),
				FieldDef::new(101, "image_path", Type::VarChar),
				FieldDef::new(102, "embeddings", Type::FloatVector).dim(4),
				FieldDef::new(103, "$meta", Type::Json).dynamic(),
			],
		)
	}

	#[test]
	fn test_primary_field() {
		let schema = schema();
		let pk = schema.primary_field().unwrap();
		assert_eq!(pk.id, FieldId(100));
		assert!(schema.is_auto_id_primary_key(FieldId(100)));
		assert!(!schema.is_auto_id_primary_key(FieldId(101)));
	}

	#[test]
	fn test_field_name_fallback() {
		let schema = schema();
		assert_eq!(schema.field_name(FieldId(101)), "image_path");
		assert_eq!(schema.field_name(ROW_ID_FIELD), "field_0");
	}

	#[test]
	fn test_dynamic() {
		let schema = schema();
		assert!(schema.is_dynamic(FieldId(103)));
		assert!(!schema.is_dynamic(FieldId(102)));
		assert!(!schema.is_dynamic(FieldId(999)));
	}
}

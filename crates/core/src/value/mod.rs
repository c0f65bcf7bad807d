// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod data;
mod insert;
mod pk;

pub use data::ColumnData;
pub use insert::InsertData;
pub use pk::PrimaryKey;

// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	env, fs,
	path::{Path, PathBuf},
};

use uuid::Uuid;

fn fresh_path() -> PathBuf {
	let mut path = env::temp_dir();
	path.push(format!("stratum-{}", Uuid::new_v4()));
	path
}

pub fn temp_dir<F>(f: F) -> std::io::Result<()>
where
	F: FnOnce(&Path) -> std::io::Result<()>,
{
	let path = fresh_path();

	fs::create_dir(&path)?;
	let result = f(&path);

	let _ = fs::remove_dir_all(&path);
	result
}

/// Temporary directory removed on drop, for async tests that cannot run
/// inside a closure.
pub struct TempDir {
	path: PathBuf,
}

impl TempDir {
	pub fn new() -> std::io::Result<Self> {
		let path = fresh_path();
		fs::create_dir(&path)?;
		Ok(Self {
			path,
		})
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl Drop for TempDir {
	fn drop(&mut self) {
		let _ = fs::remove_dir_all(&self.path);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_temp_dir_is_removed() {
		let mut seen = None;
		temp_dir(|path| {
			assert!(path.is_dir());
			seen = Some(path.to_path_buf());
			Ok(())
		})
		.unwrap();
		assert!(!seen.unwrap().exists());
	}

	#[test]
	fn test_guard_is_removed_on_drop() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().to_path_buf();
		assert!(path.is_dir());
		drop(dir);
		assert!(!path.exists());
	}
}

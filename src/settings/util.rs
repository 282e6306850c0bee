use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Resolve `path` against the working directory when it is relative.
pub(super) fn absolutize(path: PathBuf) -> Result<PathBuf> {
	if path.is_absolute() {
		return Ok(path);
	}
	let cwd = env::current_dir().context("failed to determine working directory")?;
	Ok(cwd.join(path))
}

/// Trim a textual setting, treating blank values as unset.
pub(super) fn non_blank(value: Option<String>) -> Option<String> {
	value
		.map(|value| value.trim().to_string())
		.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn relative_paths_are_anchored_to_working_directory() {
		let cwd = env::current_dir().expect("cwd");
		assert_eq!(absolutize(PathBuf::from("data.csv")).expect("path"), cwd.join("data.csv"));
	}

	#[test]
	fn absolute_paths_are_kept() {
		let dir = tempfile::tempdir().expect("tempdir");
		let path = dir.path().join("data.csv");
		assert_eq!(absolutize(path.clone()).expect("path"), path);
	}

	#[test]
	fn blank_values_count_as_unset() {
		assert_eq!(non_blank(Some("  ".into())), None);
		assert_eq!(non_blank(Some(" name ".into())), Some("name".into()));
		assert_eq!(non_blank(None), None);
	}
}

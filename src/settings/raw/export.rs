use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::super::util::absolutize;

/// `[export]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ExportSection {
	pub(super) directory: Option<PathBuf>,
}

impl ExportSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(dir) = cli.export_dir.clone() {
			self.directory = Some(dir);
		}
	}

	/// Export files land in the working directory unless configured otherwise.
	pub(super) fn resolve(self) -> Result<PathBuf> {
		match self.directory {
			Some(dir) => absolutize(dir),
			None => env::current_dir().context("failed to determine working directory"),
		}
	}
}

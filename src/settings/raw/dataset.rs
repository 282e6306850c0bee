use std::path::PathBuf;

use anyhow::Result;
use pkachu::app_dirs;
use serde::Deserialize;

use crate::cli::CliArgs;

use super::super::util::absolutize;

/// `[dataset]` section: where the records are loaded from.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct DatasetSection {
	pub(super) path: Option<PathBuf>,
}

impl DatasetSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(path) = cli.data.clone() {
			self.path = Some(path);
		}
	}

	/// The configured dataset, or `data.csv` in the data directory.
	pub(super) fn resolve(self) -> Result<PathBuf> {
		let path = match self.path {
			Some(path) => path,
			None => app_dirs::default_dataset_path()?,
		};
		absolutize(path)
	}
}

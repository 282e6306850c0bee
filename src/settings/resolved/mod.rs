use std::path::PathBuf;

use pkachu::{MatchMode, PageSize, SortState};

mod errors;
mod sources;
mod summary;
mod validation;

pub(crate) use errors::SettingError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
	pub dataset: PathBuf,
	pub match_mode: MatchMode,
	pub prefer_exact: bool,
	pub page_size: PageSize,
	/// Sort picked in configuration, if any.
	pub sort: Option<SortState>,
	pub export_dir: PathBuf,
}

impl ResolvedConfig {
	pub(super) fn validate(&self, sources: &ConfigSources) -> Result<(), SettingError> {
		validation::validate(self, sources)
	}

	/// Print a human readable summary of the effective configuration.
	pub fn print_summary(&self) {
		print!("{}", summary::format_summary(self));
	}
}

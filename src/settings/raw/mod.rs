use std::env;

use anyhow::{Error, Result};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::resolved::{ConfigSources, ResolvedConfig, SettingSource};

mod dataset;
mod export;
mod search;

use dataset::DatasetSection;
use export::ExportSection;
use search::SearchSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	dataset: DatasetSection,
	search: SearchSection,
	export: ExportSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.dataset.apply_cli_overrides(cli);
		self.search.apply_cli_overrides(cli);
		self.export.apply_cli_overrides(cli);
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			dataset_path: detect_source(
				cli.data.is_some(),
				self.dataset.path.is_some(),
				"PKACHU__DATASET__PATH",
				"--data",
				"dataset.path",
			),
			match_mode: detect_source(
				cli.match_mode.is_some(),
				self.search.match_mode.is_some(),
				"PKACHU__SEARCH__MATCH_MODE",
				"--match-mode",
				"search.match_mode",
			),
			page_size: detect_source(
				cli.limit.is_some(),
				self.search.page_size.is_some(),
				"PKACHU__SEARCH__PAGE_SIZE",
				"--limit",
				"search.page_size",
			),
			sort_by: detect_source(
				cli.sort.is_some(),
				self.search.sort_by.is_some(),
				"PKACHU__SEARCH__SORT_BY",
				"--sort",
				"search.sort_by",
			),
			sort_order: detect_source(
				cli.order.is_some(),
				self.search.sort_order.is_some(),
				"PKACHU__SEARCH__SORT_ORDER",
				"--order",
				"search.sort_order",
			),
			export_dir: detect_source(
				cli.export_dir.is_some(),
				self.export.directory.is_some(),
				"PKACHU__EXPORT__DIRECTORY",
				"--export-dir",
				"export.directory",
			),
		};

		let dataset = self.dataset.resolve()?;
		let search = self.search.resolve(&sources).map_err(Error::new)?;
		let export_dir = self.export.resolve()?;

		let config = ResolvedConfig {
			dataset,
			match_mode: search.match_mode,
			prefer_exact: search.prefer_exact,
			page_size: search.page_size,
			sort: search.sort,
			export_dir,
		};

		config.validate(&sources).map_err(Error::new)?;

		Ok(config)
	}
}

fn detect_source(
	cli_present: bool,
	value_present: bool,
	env_var: &'static str,
	cli_flag: &'static str,
	key: &'static str,
) -> Option<SettingSource> {
	if !value_present {
		return None;
	}

	if cli_present {
		return Some(SettingSource::CliFlag(cli_flag));
	}

	if env::var_os(env_var).is_some() {
		return Some(SettingSource::Environment(env_var));
	}

	Some(SettingSource::ConfigKey(key))
}

//! Resolve the configuration and data directories for `pkachu`.
//!
//! Environment overrides win; otherwise the platform locations from the
//! `directories` crate are used.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::ProjectDirs;

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "albo";
const APPLICATION: &str = "pkachu";

pub const CONFIG_DIR_ENV: &str = "PKACHU_CONFIG_DIR";
pub const DATA_DIR_ENV: &str = "PKACHU_DATA_DIR";

/// File name of the dataset looked up in the data directory when none is
/// configured.
pub const DEFAULT_DATASET_FILE: &str = "data.csv";

fn project_dirs() -> Result<ProjectDirs> {
	ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
		.ok_or_else(|| anyhow!("unable to determine project directories for pkachu"))
}

/// Read a directory override. An empty value counts as unset.
fn dir_from_env(name: &str) -> Option<PathBuf> {
	let value = env::var_os(name)?;
	if value.is_empty() {
		None
	} else {
		Some(PathBuf::from(value))
	}
}

/// Directory holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.config_local_dir().to_path_buf())
}

/// Directory holding the default dataset.
pub fn get_data_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// Dataset used when neither the CLI nor the config names one.
pub fn default_dataset_path() -> Result<PathBuf> {
	Ok(get_data_dir()?.join(DEFAULT_DATASET_FILE))
}

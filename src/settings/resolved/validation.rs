use super::{SettingError, ConfigSources, ResolvedConfig};

pub(super) fn validate(
	config: &ResolvedConfig,
	sources: &ConfigSources,
) -> Result<(), SettingError> {
	if !config.dataset.is_file() {
		let reason = if config.dataset.exists() {
			"not a regular file"
		} else {
			"file does not exist"
		};
		return Err(SettingError::BadPath {
			key: "dataset.path",
			path: config.dataset.clone(),
			origin: sources.source_for_dataset(),
			problem: reason,
		});
	}

	if config.export_dir.exists() && !config.export_dir.is_dir() {
		return Err(SettingError::BadPath {
			key: "export.directory",
			path: config.export_dir.clone(),
			origin: sources.source_for_export_dir(),
			problem: "not a directory",
		});
	}

	Ok(())
}

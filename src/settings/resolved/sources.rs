use std::fmt;

/// Where an effective setting came from, for error messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(&'static str),
	ConfigKey(&'static str),
	Default,
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
			Self::Default => f.write_str("built-in default"),
		}
	}
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) dataset_path: Option<SettingSource>,
	pub(crate) match_mode: Option<SettingSource>,
	pub(crate) page_size: Option<SettingSource>,
	pub(crate) sort_by: Option<SettingSource>,
	pub(crate) sort_order: Option<SettingSource>,
	pub(crate) export_dir: Option<SettingSource>,
}

impl ConfigSources {
	pub(crate) fn source_for_dataset(&self) -> SettingSource {
		self.dataset_path.clone().unwrap_or(SettingSource::Default)
	}

	pub(crate) fn source_for_match_mode(&self) -> SettingSource {
		self.match_mode
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.match_mode"))
	}

	pub(crate) fn source_for_page_size(&self) -> SettingSource {
		self.page_size
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.page_size"))
	}

	pub(crate) fn source_for_sort_by(&self) -> SettingSource {
		self.sort_by
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.sort_by"))
	}

	pub(crate) fn source_for_sort_order(&self) -> SettingSource {
		self.sort_order
			.clone()
			.unwrap_or(SettingSource::ConfigKey("search.sort_order"))
	}

	pub(crate) fn source_for_export_dir(&self) -> SettingSource {
		self.export_dir.clone().unwrap_or(SettingSource::Default)
	}
}

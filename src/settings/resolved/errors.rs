use std::path::PathBuf;

use thiserror::Error;

use super::SettingSource;

/// A resolved setting pkachu cannot run with. Each variant carries the
/// dotted config key and the layer that supplied the value, so the message
/// points at the flag, variable or file entry to fix.
#[derive(Debug, Error)]
pub(crate) enum SettingError {
	/// Text that does not name a sort key, match mode or page size.
	#[error("{key} from {origin} is not usable: {reason} (got `{value}`)")]
	Unparseable {
		key: &'static str,
		value: String,
		origin: SettingSource,
		reason: String,
	},

	#[error("{key} from {origin} points at {}: {problem}", path.display())]
	BadPath {
		key: &'static str,
		path: PathBuf,
		origin: SettingSource,
		problem: &'static str,
	},
}

impl SettingError {
	pub(crate) fn unparseable(
		key: &'static str,
		value: impl Into<String>,
		origin: SettingSource,
		reason: impl ToString,
	) -> Self {
		Self::Unparseable {
			key,
			value: value.into(),
			origin,
			reason: reason.to_string(),
		}
	}

	pub(crate) fn key(&self) -> &'static str {
		match self {
			Self::Unparseable { key, .. } | Self::BadPath { key, .. } => key,
		}
	}
}

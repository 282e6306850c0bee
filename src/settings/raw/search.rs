use std::str::FromStr;

use pkachu::{MatchMode, PageSize, SortDirection, SortKey, SortState};
use serde::Deserialize;

use crate::cli::CliArgs;

use super::super::resolved::{SettingError, ConfigSources, SettingSource};
use super::super::util::non_blank;

/// `[search]` section as read from disk. Enumerated values stay textual until
/// [`SearchSection::resolve`] so parse errors can name their origin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct SearchSection {
	pub(super) match_mode: Option<String>,
	pub(super) prefer_exact: Option<bool>,
	pub(super) page_size: Option<usize>,
	pub(super) sort_by: Option<String>,
	pub(super) sort_order: Option<String>,
}

/// Typed search defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct SearchSettings {
	pub(super) match_mode: MatchMode,
	pub(super) prefer_exact: bool,
	pub(super) page_size: PageSize,
	/// `None` leaves ordering to [`SortState::automatic`].
	pub(super) sort: Option<SortState>,
}

impl SearchSection {
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(mode) = cli.match_mode {
			self.match_mode = Some(mode.as_str().to_string());
		}
		if let Some(value) = cli.prefer_exact {
			self.prefer_exact = Some(value);
		}
		if let Some(limit) = cli.limit {
			self.page_size = Some(limit);
		}
		if let Some(sort) = cli.sort.clone() {
			self.sort_by = Some(sort);
		}
		if let Some(order) = cli.order {
			self.sort_order = Some(order.as_str().to_string());
		}
	}

	pub(super) fn resolve(self, sources: &ConfigSources) -> Result<SearchSettings, SettingError> {
		let match_mode = parse_setting::<MatchMode>(
			"search.match_mode",
			non_blank(self.match_mode),
			sources.source_for_match_mode(),
		)?;
		let key = parse_setting::<SortKey>(
			"search.sort_by",
			non_blank(self.sort_by),
			sources.source_for_sort_by(),
		)?;
		let direction = parse_setting::<SortDirection>(
			"search.sort_order",
			non_blank(self.sort_order),
			sources.source_for_sort_order(),
		)?;

		let sort = (key.is_some() || direction.is_some()).then(|| {
			SortState::new(key.unwrap_or_default(), direction.unwrap_or_default())
		});

		let page_size = match self.page_size {
			Some(size) => PageSize::try_from(size).map_err(|err| {
				SettingError::unparseable(
					"search.page_size",
					size.to_string(),
					sources.source_for_page_size(),
					err,
				)
			})?,
			None => PageSize::default(),
		};

		Ok(SearchSettings {
			match_mode: match_mode.unwrap_or_default(),
			prefer_exact: self.prefer_exact.unwrap_or(true),
			page_size,
			sort,
		})
	}
}

fn parse_setting<T>(
	key: &'static str,
	value: Option<String>,
	origin: SettingSource,
) -> Result<Option<T>, SettingError>
where
	T: FromStr,
	T::Err: ToString,
{
	let Some(value) = value else {
		return Ok(None);
	};
	match value.parse::<T>() {
		Ok(parsed) => Ok(Some(parsed)),
		Err(err) => Err(SettingError::unparseable(key, value, origin, err)),
	}
}

#[cfg(test)]
mod tests {
	use pkachu::Field;

	use super::*;

	#[test]
	fn unset_values_fall_back_to_defaults() {
		let settings = SearchSection::default()
			.resolve(&ConfigSources::default())
			.expect("defaults resolve");
		assert_eq!(settings.match_mode, MatchMode::All);
		assert!(settings.prefer_exact);
		assert_eq!(settings.page_size, PageSize::DEFAULT);
		assert_eq!(settings.sort, None);
	}

	#[test]
	fn order_without_key_applies_to_pka() {
		let section = SearchSection {
			sort_order: Some("desc".into()),
			..SearchSection::default()
		};
		let settings = section
			.resolve(&ConfigSources::default())
			.expect("order resolves");
		assert_eq!(
			settings.sort,
			Some(SortState::new(SortKey::default(), SortDirection::Descending))
		);
	}

	#[test]
	fn textual_values_are_parsed() {
		let section = SearchSection {
			match_mode: Some("Any".into()),
			prefer_exact: Some(false),
			page_size: Some(500),
			sort_by: Some("name".into()),
			sort_order: Some(" desc ".into()),
		};
		let settings = section
			.resolve(&ConfigSources::default())
			.expect("values resolve");
		assert_eq!(settings.match_mode, MatchMode::Any);
		assert!(!settings.prefer_exact);
		assert_eq!(settings.page_size.get(), 500);
		assert_eq!(
			settings.sort,
			Some(SortState::new(
				SortKey::Column(Field::Name),
				SortDirection::Descending
			))
		);
	}

	#[test]
	fn unknown_sort_key_names_its_origin() {
		let section = SearchSection {
			sort_by: Some("colour".into()),
			..SearchSection::default()
		};
		let sources = ConfigSources {
			sort_by: Some(SettingSource::CliFlag("--sort")),
			..ConfigSources::default()
		};
		let err = section.resolve(&sources).unwrap_err();
		assert_eq!(err.key(), "search.sort_by");
		let message = err.to_string();
		assert!(message.contains("CLI flag `--sort`"));
		assert!(message.contains("(got `colour`)"));
	}

	#[test]
	fn page_size_outside_the_allowed_set_is_rejected() {
		let section = SearchSection {
			page_size: Some(30),
			..SearchSection::default()
		};
		let err = section.resolve(&ConfigSources::default()).unwrap_err();
		assert_eq!(err.key(), "search.page_size");
		assert!(err.to_string().contains("25, 50, 100, 250, 500"));
	}
}

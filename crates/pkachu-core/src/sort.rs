//! Single-key ordering of scored records.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseValueError;
use crate::record::{Field, ScoredRecord};

/// What the result list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SortKey {
	/// The transient relevance score.
	Relevance,
	Column(Field),
}

impl Default for SortKey {
	fn default() -> Self {
		SortKey::Column(Field::PkaValue)
	}
}

impl fmt::Display for SortKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SortKey::Relevance => f.write_str("relevance"),
			SortKey::Column(field) => f.write_str(field.column()),
		}
	}
}

impl FromStr for SortKey {
	type Err = ParseValueError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let trimmed = s.trim();
		if trimmed.eq_ignore_ascii_case("relevance") || trimmed.eq_ignore_ascii_case("score") {
			return Ok(SortKey::Relevance);
		}
		Field::from_name(trimmed)
			.map(SortKey::Column)
			.ok_or_else(|| ParseValueError::SortKey(s.to_string()))
	}
}

impl From<SortKey> for String {
	fn from(key: SortKey) -> Self {
		key.to_string()
	}
}

impl TryFrom<String> for SortKey {
	type Error = ParseValueError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		value.parse()
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
	#[default]
	#[serde(rename = "asc")]
	Ascending,
	#[serde(rename = "desc")]
	Descending,
}

impl SortDirection {
	pub fn as_str(self) -> &'static str {
		match self {
			SortDirection::Ascending => "asc",
			SortDirection::Descending => "desc",
		}
	}

	fn apply(self, ordering: Ordering) -> Ordering {
		match self {
			SortDirection::Ascending => ordering,
			SortDirection::Descending => ordering.reverse(),
		}
	}
}

impl fmt::Display for SortDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for SortDirection {
	type Err = ParseValueError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"asc" | "ascending" => Ok(SortDirection::Ascending),
			"desc" | "descending" => Ok(SortDirection::Descending),
			_ => Err(ParseValueError::SortDirection(s.to_string())),
		}
	}
}

/// The single global sort key and its direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
	pub key: SortKey,
	pub direction: SortDirection,
}

impl SortState {
	pub fn new(key: SortKey, direction: SortDirection) -> Self {
		Self { key, direction }
	}

	/// Order used while no sort has been picked: relevance first when free
	/// text is active, ascending pKa otherwise.
	pub fn automatic(query_active: bool) -> Self {
		if query_active {
			Self::new(SortKey::Relevance, SortDirection::Descending)
		} else {
			Self::default()
		}
	}

	/// Header click on `key` against the picked sort, where `None` means the
	/// automatic order. A new key sorts ascending, the active ascending key
	/// flips to descending, and the active descending key returns to the
	/// automatic order.
	pub fn toggled(current: Option<Self>, key: SortKey, query_active: bool) -> Option<Self> {
		let Some(active) = current else {
			let shown = Self::automatic(query_active);
			if shown == Self::new(key, SortDirection::Ascending) {
				return Some(Self::new(key, SortDirection::Descending));
			}
			return Some(Self::new(key, SortDirection::Ascending));
		};
		match (active.key == key, active.direction) {
			(false, _) => Some(Self::new(key, SortDirection::Ascending)),
			(true, SortDirection::Ascending) => Some(Self::new(key, SortDirection::Descending)),
			(true, SortDirection::Descending) => None,
		}
	}
}

/// Stable sort by the active key. When a free-text query is active and the
/// key is not relevance, equal keys fall back to descending score.
pub fn sort_records<'a>(
	mut records: Vec<ScoredRecord<'a>>,
	state: &SortState,
	query_active: bool,
) -> Vec<ScoredRecord<'a>> {
	let tie_break = query_active && state.key != SortKey::Relevance;
	records.sort_by(|a, b| {
		let primary = state.direction.apply(compare(a, b, state.key));
		if tie_break {
			primary.then_with(|| compare_numbers(b.relevance(), a.relevance()))
		} else {
			primary
		}
	});
	records
}

fn compare(a: &ScoredRecord<'_>, b: &ScoredRecord<'_>, key: SortKey) -> Ordering {
	match key {
		SortKey::Relevance => compare_numbers(a.relevance(), b.relevance()),
		SortKey::Column(field) if field.is_numeric() => compare_numbers(
			a.record.number(field).unwrap_or(0.0),
			b.record.number(field).unwrap_or(0.0),
		),
		SortKey::Column(field) => a
			.record
			.text(field)
			.to_lowercase()
			.cmp(&b.record.text(field).to_lowercase()),
	}
}

fn compare_numbers(a: f64, b: f64) -> Ordering {
	a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::Record;

	fn pka_rows(values: &[&str]) -> Vec<Record> {
		values
			.iter()
			.enumerate()
			.map(|(index, value)| {
				Record::new()
					.with(Field::UniqueId, index.to_string())
					.with(Field::PkaValue, *value)
			})
			.collect()
	}

	fn pka_order(records: &[ScoredRecord<'_>]) -> Vec<String> {
		records
			.iter()
			.map(|scored| scored.record.text(Field::PkaValue).into_owned())
			.collect()
	}

	#[test]
	fn unparseable_numbers_sort_as_zero() {
		let rows = pka_rows(&["4.76", "2.1", "n/a", "9.0"]);
		let scored = rows.iter().map(ScoredRecord::unscored).collect();
		let sorted = sort_records(scored, &SortState::default(), false);
		assert_eq!(pka_order(&sorted), ["n/a", "2.1", "4.76", "9.0"]);
	}

	#[test]
	fn descending_keeps_equal_keys_stable() {
		let rows = pka_rows(&["1", "3", "x", "3", "0"]);
		let scored = rows.iter().map(ScoredRecord::unscored).collect();
		let state = SortState::new(SortKey::Column(Field::PkaValue), SortDirection::Descending);
		let sorted = sort_records(scored, &state, false);
		let ids: Vec<_> = sorted
			.iter()
			.map(|scored| scored.record.text(Field::UniqueId).into_owned())
			.collect();
		assert_eq!(ids, ["1", "3", "0", "2", "4"]);
	}

	#[test]
	fn ties_break_by_descending_score_when_query_active() {
		let rows = pka_rows(&["4.0", "4.0", "1.0"]);
		let scored = vec![
			ScoredRecord::scored(&rows[0], 10.0),
			ScoredRecord::scored(&rows[1], 50.0),
			ScoredRecord::scored(&rows[2], 1.0),
		];
		let sorted = sort_records(scored.clone(), &SortState::default(), true);
		let scores: Vec<_> = sorted.iter().map(ScoredRecord::relevance).collect();
		assert_eq!(scores, [1.0, 50.0, 10.0]);

		// Descending order keeps the tie-break descending.
		let state = SortState::new(SortKey::Column(Field::PkaValue), SortDirection::Descending);
		let sorted = sort_records(scored.clone(), &state, true);
		let scores: Vec<_> = sorted.iter().map(ScoredRecord::relevance).collect();
		assert_eq!(scores, [50.0, 10.0, 1.0]);

		let sorted = sort_records(scored, &SortState::default(), false);
		let scores: Vec<_> = sorted.iter().map(ScoredRecord::relevance).collect();
		assert_eq!(scores, [1.0, 10.0, 50.0]);
	}

	#[test]
	fn text_columns_compare_case_insensitively() {
		let rows: Vec<Record> = ["beta", "Alpha", "gamma", ""]
			.iter()
			.map(|name| Record::new().with(Field::Name, *name))
			.collect();
		let scored = rows.iter().map(ScoredRecord::unscored).collect();
		let state = SortState::new(SortKey::Column(Field::Name), SortDirection::Ascending);
		let sorted = sort_records(scored, &state, false);
		let names: Vec<_> = sorted
			.iter()
			.map(|scored| scored.record.text(Field::Name).into_owned())
			.collect();
		assert_eq!(names, ["", "Alpha", "beta", "gamma"]);
	}

	#[test]
	fn relevance_key_orders_by_score() {
		let rows = pka_rows(&["1", "2"]);
		let scored = vec![
			ScoredRecord::scored(&rows[0], 5.0),
			ScoredRecord::scored(&rows[1], 20.0),
		];
		let state = SortState::new(SortKey::Relevance, SortDirection::Descending);
		let sorted = sort_records(scored, &state, true);
		assert_eq!(sorted[0].relevance(), 20.0);
	}

	#[test]
	fn toggle_cycles_through_single_global_key() {
		let name = SortKey::Column(Field::Name);

		let state = SortState::toggled(None, name, false);
		assert_eq!(state, Some(SortState::new(name, SortDirection::Ascending)));
		let state = SortState::toggled(state, name, false);
		assert_eq!(state, Some(SortState::new(name, SortDirection::Descending)));
		let state = SortState::toggled(state, name, false);
		assert_eq!(state, None);

		let state = SortState::toggled(
			Some(SortState::new(name, SortDirection::Ascending)),
			SortKey::Relevance,
			false,
		);
		assert_eq!(
			state,
			Some(SortState::new(SortKey::Relevance, SortDirection::Ascending))
		);
	}

	#[test]
	fn automatic_order_follows_free_text() {
		assert_eq!(SortState::automatic(false), SortState::default());
		assert_eq!(
			SortState::automatic(true),
			SortState::new(SortKey::Relevance, SortDirection::Descending)
		);
	}

	#[test]
	fn first_click_always_changes_the_visible_order() {
		let pka = SortKey::Column(Field::PkaValue);
		assert_eq!(
			SortState::toggled(None, pka, false),
			Some(SortState::new(pka, SortDirection::Descending))
		);
		assert_eq!(
			SortState::toggled(None, SortKey::Relevance, true),
			Some(SortState::new(SortKey::Relevance, SortDirection::Ascending))
		);
		assert_eq!(
			SortState::toggled(None, pka, true),
			Some(SortState::new(pka, SortDirection::Ascending))
		);
	}

	#[test]
	fn sort_keys_parse_columns_aliases_and_relevance() {
		assert_eq!("relevance".parse::<SortKey>(), Ok(SortKey::Relevance));
		assert_eq!("T".parse::<SortKey>(), Ok(SortKey::Column(Field::Temperature)));
		assert_eq!("name".parse::<SortKey>(), Ok(SortKey::Column(Field::Name)));
		assert_eq!(
			"weight".parse::<SortKey>(),
			Err(ParseValueError::SortKey("weight".into()))
		);
		assert_eq!("DESC".parse::<SortDirection>(), Ok(SortDirection::Descending));
		assert_eq!(SortKey::Column(Field::PkaValue).to_string(), "pka_value");
	}

	#[test]
	fn sort_state_serializes_as_strings() {
		let json = serde_json::to_string(&SortState::default()).expect("serialize");
		assert_eq!(json, r#"{"key":"pka_value","direction":"asc"}"#);
		let back: SortState = serde_json::from_str(r#"{"key":"relevance","direction":"desc"}"#)
			.expect("deserialize");
		assert_eq!(back, SortState::new(SortKey::Relevance, SortDirection::Descending));
	}
}

//! Query mini-language: free text, `key:value` filters and numeric hints.
//!
//! The raw query is split on whitespace. Tokens shaped like `key:value`
//! whose key belongs to the closed [`FilterKey`] vocabulary become
//! structured filters; every other token is lower-cased free text.
//! Independently, each numeric substring of the raw query becomes a
//! proximity hint for the scorer.

mod pka;

use std::sync::LazyLock;

use log::trace;
use regex::Regex;
use serde::Serialize;

pub use pka::{Comparison, PkaFilter};

static KEY_VALUE_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*):(.+)$").expect("key:value pattern compiles")
});

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"([+-]?)([0-9]+(?:\.[0-9]+)?|\.[0-9]+)").expect("number pattern compiles")
});

/// Keys recognised as structured filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKey {
	Type,
	Assessment,
	Id,
	Pka,
}

impl FilterKey {
	/// Match a key case-insensitively; `unique_id` is an alias for `id`.
	pub fn from_key(key: &str) -> Option<Self> {
		match key.to_ascii_lowercase().as_str() {
			"type" => Some(FilterKey::Type),
			"assessment" => Some(FilterKey::Assessment),
			"id" | "unique_id" => Some(FilterKey::Id),
			"pka" => Some(FilterKey::Pka),
			_ => None,
		}
	}
}

/// Structured filters extracted from the query. All present filters are
/// combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuredFilters {
	pub pka_type: Option<String>,
	pub assessment: Option<String>,
	pub id: Option<String>,
	pub pka: Option<PkaFilter>,
}

impl StructuredFilters {
	pub fn is_empty(&self) -> bool {
		self.pka_type.is_none() && self.assessment.is_none() && self.id.is_none() && self.pka.is_none()
	}

	// Later occurrences of a key replace earlier ones. A malformed `pka:`
	// value clears nothing and adds nothing.
	fn apply(&mut self, key: FilterKey, value: &str) {
		match key {
			FilterKey::Type => self.pka_type = Some(value.to_string()),
			FilterKey::Assessment => self.assessment = Some(value.to_string()),
			FilterKey::Id => self.id = Some(value.to_string()),
			FilterKey::Pka => {
				if let Some(filter) = PkaFilter::parse(value) {
					self.pka = Some(filter);
				}
			}
		}
	}
}

/// Parsed form of a raw query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedQuery {
	/// Lower-cased free-text tokens in input order, duplicates kept.
	pub tokens: Vec<String>,
	pub filters: StructuredFilters,
	/// Every number found anywhere in the raw query.
	pub hints: Vec<f64>,
}

impl ParsedQuery {
	pub fn parse(raw: &str) -> Self {
		parse(raw)
	}

	/// Whether free-text scoring is in play for this query.
	pub fn has_text(&self) -> bool {
		!self.tokens.is_empty()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty() && self.filters.is_empty()
	}
}

/// Parse a raw query into tokens, structured filters and numeric hints.
pub fn parse(raw: &str) -> ParsedQuery {
	let mut tokens = Vec::new();
	let mut filters = StructuredFilters::default();

	for token in raw.split_whitespace() {
		if let Some(captures) = KEY_VALUE_RE.captures(token)
			&& let Some(key) = FilterKey::from_key(&captures[1])
		{
			let value = captures[2].trim();
			if !value.is_empty() {
				filters.apply(key, value);
				continue;
			}
		}
		tokens.push(token.to_lowercase());
	}

	let hints = numeric_hints(raw);
	trace!("parsed query {raw:?}: tokens={tokens:?} filters={filters:?} hints={hints:?}");

	ParsedQuery {
		tokens,
		filters,
		hints,
	}
}

/// Extract every maximal numeric substring of `raw`.
///
/// Runs are read left to right without overlap, so a second decimal point
/// starts a new fraction: `1.5.3` yields 1.5 and 0.3. A sign glued to a
/// preceding digit or point is a separator, so `4.7-4.9` reads as two
/// positive numbers.
pub fn numeric_hints(raw: &str) -> Vec<f64> {
	NUMBER_RE
		.captures_iter(raw)
		.filter_map(|captures| {
			let start = captures.get(0)?.start();
			let glued = raw[..start].ends_with(|ch: char| ch.is_ascii_digit() || ch == '.');
			let text = if glued { &captures[2] } else { &captures[0] };
			text.parse::<f64>().ok()
		})
		.collect()
}

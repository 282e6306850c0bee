//! Weighted multi-field relevance scoring.
//!
//! Each free-text token is looked up in a fixed set of weighted fields. A hit
//! earns the field's base weight, compounded by bonuses for how the token
//! sits inside the field (see [`field`]). Per-field scores add up across
//! tokens and fields, then a match-mode gate, a cross-field multiplier and a
//! numeric proximity bonus are applied to the total.

mod field;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseValueError;
use crate::record::{Field, Record};

/// Fields searched by free text, with their base weights.
pub const WEIGHTED_FIELDS: [(Field, f64); 6] = [
	(Field::Name, 100.0),
	(Field::Smiles, 80.0),
	(Field::PkaType, 60.0),
	(Field::UniqueId, 40.0),
	(Field::Inchi, 30.0),
	(Field::PkaValue, 20.0),
];

const CLOSE_HINT_BONUS: f64 = 200.0;
const NEAR_HINT_BONUS: f64 = 100.0;

/// How multiple free-text tokens combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
	/// Every token must match some field.
	#[default]
	All,
	/// At least one token must match.
	Any,
}

impl MatchMode {
	pub fn as_str(self) -> &'static str {
		match self {
			MatchMode::All => "all",
			MatchMode::Any => "any",
		}
	}
}

impl fmt::Display for MatchMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for MatchMode {
	type Err = ParseValueError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"all" | "and" => Ok(MatchMode::All),
			"any" | "or" => Ok(MatchMode::Any),
			_ => Err(ParseValueError::MatchMode(s.to_string())),
		}
	}
}

/// Tunables for [`score`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOptions {
	pub match_mode: MatchMode,
	/// Add flat bonuses for exact and base-name matches.
	pub prefer_exact: bool,
}

impl Default for ScoreOptions {
	fn default() -> Self {
		Self {
			match_mode: MatchMode::All,
			prefer_exact: true,
		}
	}
}

/// Relevance of `record` for the given tokens and numeric hints.
///
/// Returns 0 when `tokens` is empty or the match-mode gate fails. Tokens must
/// already be lower-cased, as produced by [`crate::query::parse`].
pub fn score(record: &Record, tokens: &[String], hints: &[f64], options: ScoreOptions) -> f64 {
	if tokens.is_empty() {
		return 0.0;
	}

	let values: Vec<(f64, String)> = WEIGHTED_FIELDS
		.iter()
		.map(|&(field, weight)| (weight, record.text(field).to_lowercase()))
		.collect();

	let mut total = 0.0;
	let mut matched_tokens = 0usize;
	let mut matched_fields = [false; WEIGHTED_FIELDS.len()];

	for token in tokens {
		let mut token_matched = false;
		for (index, (weight, value)) in values.iter().enumerate() {
			if let Some(field_score) = field::field_score(token, value, *weight, options.prefer_exact) {
				total += field_score;
				token_matched = true;
				matched_fields[index] = true;
			}
		}
		if token_matched {
			matched_tokens += 1;
		}
	}

	let passes = match options.match_mode {
		MatchMode::All => matched_tokens == tokens.len(),
		MatchMode::Any => matched_tokens > 0,
	};
	if !passes {
		return 0.0;
	}

	let field_count = matched_fields.iter().filter(|matched| **matched).count();
	if field_count > 1 {
		total *= 1.0 + 0.1 * field_count as f64;
	}

	total + proximity_bonus(record, hints)
}

/// Bonus for numeric hints close to the record's pKa value.
pub fn proximity_bonus(record: &Record, hints: &[f64]) -> f64 {
	let Some(pka) = record.number(Field::PkaValue) else {
		return 0.0;
	};
	hints
		.iter()
		.map(|hint| (hint - pka).abs())
		.map(|diff| {
			if diff < 0.1 {
				CLOSE_HINT_BONUS
			} else if diff < 1.0 {
				NEAR_HINT_BONUS
			} else {
				0.0
			}
		})
		.sum()
}

//! Structured and UI-level record filters.
//!
//! Every stage is a pure filter over the previous stage's output and never
//! reorders. Structured filters come from `key:value` query tokens; the
//! [`FilterState`] holds the independent selection controls. When both name
//! the same field they both apply.

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::StructuredFilters;
use crate::record::{Field, Record, ScoredRecord};

/// A numeric range whose minimum exceeds its maximum. While active the
/// range is not applied at all.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("minimum {label} ({min}) is greater than maximum {label} ({max}); range ignored")]
pub struct RangeError {
	pub label: &'static str,
	pub min: f64,
	pub max: f64,
}

/// Selection controls applied after the query's structured filters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
	/// Exact pKa type, compared case-insensitively.
	pub pka_type: Option<String>,
	/// Exact assessment, compared case-insensitively.
	pub assessment: Option<String>,
	pub min_pka: Option<f64>,
	pub max_pka: Option<f64>,
	pub min_temperature: Option<f64>,
	pub max_temperature: Option<f64>,
	/// Case-insensitive substring of the method code.
	pub method: Option<String>,
}

impl FilterState {
	/// Clear every control.
	pub fn reset(&mut self) {
		*self = Self::default();
	}

	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}

	pub fn pka_range_error(&self) -> Option<RangeError> {
		range_error("pKa", self.min_pka, self.max_pka)
	}

	pub fn temperature_range_error(&self) -> Option<RangeError> {
		range_error("temperature", self.min_temperature, self.max_temperature)
	}

	/// Validation messages for every invalid range, pKa first.
	pub fn range_errors(&self) -> Vec<RangeError> {
		self.pka_range_error()
			.into_iter()
			.chain(self.temperature_range_error())
			.collect()
	}
}

fn range_error(label: &'static str, min: Option<f64>, max: Option<f64>) -> Option<RangeError> {
	match (min, max) {
		(Some(min), Some(max)) if min > max => Some(RangeError { label, min, max }),
		_ => None,
	}
}

/// Stages 2-5: filters extracted from the query text.
pub(crate) fn apply_structured<'a>(
	mut records: Vec<ScoredRecord<'a>>,
	filters: &StructuredFilters,
) -> Vec<ScoredRecord<'a>> {
	if let Some(wanted) = active(&filters.pka_type) {
		records = stage("type:", records, |record| {
			equals_ignore_case(record, Field::PkaType, wanted)
		});
	}
	if let Some(wanted) = active(&filters.assessment) {
		records = stage("assessment:", records, |record| {
			equals_ignore_case(record, Field::Assessment, wanted)
		});
	}
	if let Some(wanted) = active(&filters.id) {
		records = stage("id:", records, |record| {
			equals_ignore_case(record, Field::UniqueId, wanted)
		});
	}
	if let Some(pka) = filters.pka {
		records = stage(&format!("pka:{pka}"), records, |record| {
			record
				.number(Field::PkaValue)
				.is_some_and(|value| pka.matches(value))
		});
	}
	records
}

/// Stages 6-9: selection controls.
pub(crate) fn apply_ui<'a>(mut records: Vec<ScoredRecord<'a>>, state: &FilterState) -> Vec<ScoredRecord<'a>> {
	if let Some(wanted) = active(&state.pka_type) {
		records = stage("pKa type", records, |record| {
			equals_ignore_case(record, Field::PkaType, wanted)
		});
	}
	if state.pka_range_error().is_none() {
		records = bounds("pKa range", records, Field::PkaValue, state.min_pka, state.max_pka);
	}
	if let Some(wanted) = active(&state.assessment) {
		records = stage("assessment", records, |record| {
			equals_ignore_case(record, Field::Assessment, wanted)
		});
	}
	if state.temperature_range_error().is_none() {
		records = bounds(
			"temperature range",
			records,
			Field::Temperature,
			state.min_temperature,
			state.max_temperature,
		);
	}
	if let Some(wanted) = active(&state.method) {
		let wanted = wanted.to_lowercase();
		records = stage("method", records, |record| {
			record.text(Field::Method).to_lowercase().contains(&wanted)
		});
	}
	records
}

// Records whose value does not parse are dropped by any active bound.
fn bounds<'a>(
	name: &str,
	mut records: Vec<ScoredRecord<'a>>,
	field: Field,
	min: Option<f64>,
	max: Option<f64>,
) -> Vec<ScoredRecord<'a>> {
	if let Some(min) = min {
		records = stage(name, records, |record| {
			record.number(field).is_some_and(|value| value >= min)
		});
	}
	if let Some(max) = max {
		records = stage(name, records, |record| {
			record.number(field).is_some_and(|value| value <= max)
		});
	}
	records
}

fn stage<'a>(
	name: &str,
	records: Vec<ScoredRecord<'a>>,
	keep: impl Fn(&Record) -> bool,
) -> Vec<ScoredRecord<'a>> {
	let before = records.len();
	let kept: Vec<_> = records
		.into_iter()
		.filter(|scored| keep(scored.record))
		.collect();
	debug!("{name} filter kept {} of {before} records", kept.len());
	kept
}

fn active(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

fn equals_ignore_case(record: &Record, field: Field, wanted: &str) -> bool {
	record.text(field).trim().to_lowercase() == wanted.to_lowercase()
}

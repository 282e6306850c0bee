//! Flat pKa records and the transient scored view the pipeline works on.

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::numeric::leading_number;

/// Logical fields every pKa record is expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
	UniqueId,
	Name,
	Smiles,
	Inchi,
	PkaType,
	PkaValue,
	Temperature,
	Method,
	Assessment,
	Remarks,
	Source,
}

impl Field {
	pub const ALL: [Field; 11] = [
		Field::UniqueId,
		Field::Name,
		Field::Smiles,
		Field::Inchi,
		Field::PkaType,
		Field::PkaValue,
		Field::Temperature,
		Field::Method,
		Field::Assessment,
		Field::Remarks,
		Field::Source,
	];

	/// Column header used by the dataset for this field.
	pub const fn column(self) -> &'static str {
		match self {
			Field::UniqueId => "unique_ID",
			Field::Name => "original_IUPAC_names",
			Field::Smiles => "SMILES",
			Field::Inchi => "InChI",
			Field::PkaType => "pka_type",
			Field::PkaValue => "pka_value",
			Field::Temperature => "T",
			Field::Method => "method",
			Field::Assessment => "assessment",
			Field::Remarks => "remarks",
			Field::Source => "source",
		}
	}

	/// Fields compared numerically when sorting.
	pub const fn is_numeric(self) -> bool {
		matches!(self, Field::PkaValue | Field::Temperature)
	}

	/// Resolve a column header or a short alias, ignoring case.
	pub fn from_name(name: &str) -> Option<Self> {
		let name = name.trim();
		if let Some(field) = Self::ALL
			.into_iter()
			.find(|field| field.column().eq_ignore_ascii_case(name))
		{
			return Some(field);
		}
		match name.to_ascii_lowercase().as_str() {
			"id" => Some(Field::UniqueId),
			"name" | "names" => Some(Field::Name),
			"type" => Some(Field::PkaType),
			"pka" => Some(Field::PkaValue),
			"temperature" | "temp" => Some(Field::Temperature),
			_ => None,
		}
	}
}

impl fmt::Display for Field {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.column())
	}
}

/// A single cell. CSV input only produces text; JSON input may carry numbers
/// and nulls, which are preserved so exports round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
	Text(String),
	Number(f64),
	Missing,
}

impl FieldValue {
	/// String form of the value; missing cells read as empty.
	pub fn as_text(&self) -> Cow<'_, str> {
		match self {
			FieldValue::Text(text) => Cow::Borrowed(text),
			FieldValue::Number(number) => Cow::Owned(number.to_string()),
			FieldValue::Missing => Cow::Borrowed(""),
		}
	}

	/// Numeric reading of the value, `None` when it does not parse.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			FieldValue::Text(text) => leading_number(text),
			FieldValue::Number(number) if number.is_finite() => Some(*number),
			FieldValue::Number(_) | FieldValue::Missing => None,
		}
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		FieldValue::Text(value.to_string())
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		FieldValue::Text(value)
	}
}

impl From<f64> for FieldValue {
	fn from(value: f64) -> Self {
		FieldValue::Number(value)
	}
}

/// Flat mapping of column names to cells, in dataset column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
	fields: IndexMap<String, FieldValue>,
}

impl Record {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style helper that sets a logical field.
	#[must_use]
	pub fn with(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
		self.fields.insert(field.column().to_string(), value.into());
		self
	}

	/// Look a cell up by raw column name.
	pub fn get(&self, column: &str) -> Option<&FieldValue> {
		self.fields.get(column)
	}

	pub fn value(&self, field: Field) -> Option<&FieldValue> {
		self.fields.get(field.column())
	}

	/// Text of a logical field, empty when the column is absent.
	pub fn text(&self, field: Field) -> Cow<'_, str> {
		self.value(field)
			.map_or(Cow::Borrowed(""), FieldValue::as_text)
	}

	/// Numeric reading of a logical field.
	pub fn number(&self, field: Field) -> Option<f64> {
		self.value(field).and_then(FieldValue::as_number)
	}

	pub fn contains(&self, column: &str) -> bool {
		self.fields.contains_key(column)
	}

	/// Iterate over `(column, value)` pairs in column order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
		self.fields
			.iter()
			.map(|(column, value)| (column.as_str(), value))
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl FromIterator<(String, FieldValue)> for Record {
	fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
		Self {
			fields: iter.into_iter().collect(),
		}
	}
}

/// A record paired with the relevance score computed for one pipeline run.
///
/// The score is `None` when no free-text query was active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredRecord<'a> {
	pub record: &'a Record,
	pub score: Option<f64>,
}

impl<'a> ScoredRecord<'a> {
	pub fn unscored(record: &'a Record) -> Self {
		Self {
			record,
			score: None,
		}
	}

	pub fn scored(record: &'a Record, score: f64) -> Self {
		Self {
			record,
			score: Some(score),
		}
	}

	/// Score used for ordering; absent scores rank as zero.
	pub fn relevance(&self) -> f64 {
		self.score.unwrap_or(0.0)
	}
}

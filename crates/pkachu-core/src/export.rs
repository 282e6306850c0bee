//! CSV and JSON serialisation of a full match set.

use std::borrow::Cow;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ParseValueError};
use crate::record::{Field, Record};

/// Columns written to CSV exports, in order.
pub const EXPORT_COLUMNS: [Field; 10] = [
	Field::UniqueId,
	Field::Name,
	Field::Smiles,
	Field::PkaType,
	Field::PkaValue,
	Field::Temperature,
	Field::Method,
	Field::Assessment,
	Field::Remarks,
	Field::Source,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
	Csv,
	Json,
}

impl ExportFormat {
	pub fn extension(self) -> &'static str {
		match self {
			ExportFormat::Csv => "csv",
			ExportFormat::Json => "json",
		}
	}

	/// `pka_export_<date>.<ext>`.
	pub fn file_name(self, date: NaiveDate) -> String {
		format!("pka_export_{}.{}", date.format("%Y-%m-%d"), self.extension())
	}

	/// Serialise `records` in this format.
	///
	/// # Errors
	///
	/// Returns an error when the CSV writer or JSON serialiser fails.
	pub fn render<'r>(self, records: impl IntoIterator<Item = &'r Record>) -> Result<String, ExportError> {
		match self {
			ExportFormat::Csv => to_csv(records),
			ExportFormat::Json => to_json(records),
		}
	}
}

impl fmt::Display for ExportFormat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.extension())
	}
}

impl FromStr for ExportFormat {
	type Err = ParseValueError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"csv" => Ok(ExportFormat::Csv),
			"json" => Ok(ExportFormat::Json),
			_ => Err(ParseValueError::ExportFormat(s.to_string())),
		}
	}
}

/// Result of an export request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
	Written(PathBuf),
	/// Nothing matched, so no file was produced.
	Empty,
}

/// Header row plus one line per record, joined by `\n` with no trailing
/// newline. Cells are quoted only when they need it.
///
/// # Errors
///
/// Returns an error if the CSV writer fails.
pub fn to_csv<'r>(records: impl IntoIterator<Item = &'r Record>) -> Result<String, ExportError> {
	let mut writer = csv::WriterBuilder::new()
		.quote_style(csv::QuoteStyle::Necessary)
		.terminator(csv::Terminator::Any(b'\n'))
		.from_writer(Vec::new());

	writer.write_record(EXPORT_COLUMNS.iter().map(|field| field.column()))?;
	for record in records {
		for field in EXPORT_COLUMNS {
			writer.write_field(export_cell(record.text(field)).as_bytes())?;
		}
		writer.write_record(None::<&[u8]>)?;
	}

	let mut bytes = writer
		.into_inner()
		.map_err(|err| csv::Error::from(err.into_error()))?;
	if bytes.last() == Some(&b'\n') {
		bytes.pop();
	}
	let text = String::from_utf8(bytes)
		.map_err(|err| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, err)))?;
	Ok(text)
}

/// `NaN` placeholders are written as empty cells.
fn export_cell(value: Cow<'_, str>) -> Cow<'_, str> {
	if value == "NaN" { Cow::Borrowed("") } else { value }
}

/// Pretty-printed JSON array of the records' field mappings.
///
/// # Errors
///
/// Returns an error if a record cannot be serialised.
pub fn to_json<'r>(records: impl IntoIterator<Item = &'r Record>) -> Result<String, ExportError> {
	let records: Vec<&Record> = records.into_iter().collect();
	Ok(serde_json::to_string_pretty(&records)?)
}

/// Write `records` into `dir` under the dated export file name.
///
/// An empty match set writes nothing and yields [`ExportOutcome::Empty`].
///
/// # Errors
///
/// Returns an error when serialisation fails or the file cannot be written.
pub fn export_to_dir<'r>(
	records: impl IntoIterator<Item = &'r Record>,
	format: ExportFormat,
	dir: &Path,
	date: NaiveDate,
) -> Result<ExportOutcome, ExportError> {
	let records: Vec<&Record> = records.into_iter().collect();
	if records.is_empty() {
		return Ok(ExportOutcome::Empty);
	}

	let contents = format.render(records.iter().copied())?;
	let path = dir.join(format.file_name(date));
	fs::write(&path, contents).map_err(|source| ExportError::Io {
		path: path.clone(),
		source,
	})?;

	info!("exported {} records to {}", records.len(), path.display());
	Ok(ExportOutcome::Written(path))
}

#[cfg(test)]
mod tests {
	use tempfile::tempdir;

	use super::*;
	use crate::record::FieldValue;

	fn date() -> NaiveDate {
		NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date")
	}

	#[test]
	fn csv_quotes_only_when_needed() {
		let record = Record::new()
			.with(Field::UniqueId, "1")
			.with(Field::Name, "2,4-dinitrophenol")
			.with(Field::Smiles, "O=[N+]([O-])c1ccc(O)c(c1)[N+](=O)[O-]")
			.with(Field::PkaValue, "NaN")
			.with(Field::Remarks, "said \"approx\"\nsee notes");

		let csv = to_csv([&record]).expect("csv");
		let lines: Vec<&str> = csv.splitn(2, '\n').collect();
		assert_eq!(
			lines[0],
			"unique_ID,original_IUPAC_names,SMILES,pka_type,pka_value,T,method,assessment,remarks,source"
		);
		assert_eq!(
			lines[1],
			"1,\"2,4-dinitrophenol\",O=[N+]([O-])c1ccc(O)c(c1)[N+](=O)[O-],,,,,,\"said \"\"approx\"\"\nsee notes\","
		);
	}

	#[test]
	fn csv_has_no_trailing_newline_and_skips_inchi() {
		let record = Record::new()
			.with(Field::UniqueId, "9")
			.with(Field::Inchi, "InChI=1S/H2O/h1H2")
			.with(Field::Temperature, FieldValue::Number(25.0));
		let csv = to_csv([&record]).expect("csv");
		assert!(!csv.ends_with('\n'));
		assert!(!csv.contains("InChI"));
		assert!(csv.ends_with("9,,,,,25,,,,"));
	}

	#[test]
	fn csv_quotes_carriage_returns_and_keeps_plain_cells_bare() {
		let record = Record::new()
			.with(Field::UniqueId, "7")
			.with(Field::Name, "pyridine")
			.with(Field::Method, "POT\r\nCON")
			.with(Field::Source, "Lange's Handbook");
		let csv = to_csv([&record]).expect("csv");
		assert!(csv.ends_with("7,pyridine,,,,,\"POT\r\nCON\",,,Lange's Handbook"));
	}

	#[test]
	fn csv_of_no_records_is_just_the_header() {
		let csv = to_csv(std::iter::empty::<&Record>()).expect("csv");
		assert_eq!(csv, EXPORT_COLUMNS.map(|field| field.column()).join(","));
	}

	#[test]
	fn json_round_trips_records() {
		let records = vec![
			Record::new()
				.with(Field::UniqueId, "1")
				.with(Field::Name, "phenol")
				.with(Field::PkaValue, FieldValue::Number(9.99)),
			Record::new()
				.with(Field::UniqueId, "2")
				.with(Field::Name, "water")
				.with(Field::Temperature, FieldValue::Missing),
		];
		let json = to_json(&records).expect("serialize");
		assert!(json.starts_with("[\n  {\n    \"unique_ID\": \"1\""));

		let back: Vec<Record> = serde_json::from_str(&json).expect("parse");
		assert_eq!(back, records);
	}

	#[test]
	fn empty_export_writes_nothing() {
		let dir = tempdir().expect("tempdir");
		let outcome = export_to_dir(&[], ExportFormat::Csv, dir.path(), date()).expect("export");
		assert_eq!(outcome, ExportOutcome::Empty);
		assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 0);
	}

	#[test]
	fn export_writes_dated_file() {
		let dir = tempdir().expect("tempdir");
		let records = vec![Record::new().with(Field::UniqueId, "1")];
		let outcome = export_to_dir(&records, ExportFormat::Json, dir.path(), date()).expect("export");

		let expected = dir.path().join("pka_export_2024-03-09.json");
		assert_eq!(outcome, ExportOutcome::Written(expected.clone()));
		let written = fs::read_to_string(expected).expect("read back");
		assert_eq!(written, "[\n  {\n    \"unique_ID\": \"1\"\n  }\n]");
	}

	#[test]
	fn export_reports_unwritable_directory() {
		let dir = tempdir().expect("tempdir");
		let missing = dir.path().join("missing");
		let records = vec![Record::new().with(Field::UniqueId, "1")];
		let err = export_to_dir(&records, ExportFormat::Csv, &missing, date()).unwrap_err();
		assert!(matches!(err, ExportError::Io { .. }));
	}

	#[test]
	fn formats_parse_and_name_files() {
		assert_eq!("JSON".parse::<ExportFormat>(), Ok(ExportFormat::Json));
		assert!("xlsx".parse::<ExportFormat>().is_err());
		assert_eq!(ExportFormat::Csv.file_name(date()), "pka_export_2024-03-09.csv");
	}
}

//! Immutable dataset snapshot and its CSV/JSON loaders.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::{debug, info, warn};

use crate::error::DatasetError;
use crate::record::{Field, FieldValue, Record};

/// Columns without which a record cannot be identified or displayed.
const REQUIRED_FIELDS: [Field; 2] = [Field::UniqueId, Field::Name];

/// Ordered, read-only collection of records handed to the pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
	records: Vec<Record>,
}

impl Dataset {
	/// Wrap already materialised records.
	#[must_use]
	pub fn from_records(records: Vec<Record>) -> Self {
		Self { records }
	}

	/// Load a dataset, choosing the parser from the file extension.
	///
	/// # Errors
	///
	/// Returns an error when the file cannot be read, is not `.csv` or
	/// `.json`, fails to parse, or lacks a required column.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
		let path = path.as_ref();
		let extension = path
			.extension()
			.and_then(|ext| ext.to_str())
			.map(str::to_ascii_lowercase);

		let open = || {
			File::open(path)
				.map(BufReader::new)
				.map_err(|source| DatasetError::Io {
					path: path.to_path_buf(),
					source,
				})
		};

		let dataset = match extension.as_deref() {
			Some("csv") => Self::from_csv_reader(open()?)?,
			Some("json") => Self::from_json_reader(open()?)?,
			_ => {
				return Err(DatasetError::UnsupportedFormat {
					path: path.to_path_buf(),
				});
			}
		};

		info!(
			"loaded {} records from {}",
			dataset.total(),
			path.display()
		);
		Ok(dataset)
	}

	/// Parse CSV with a header row. Every cell is kept as text and rows whose
	/// cells are all blank are skipped.
	///
	/// # Errors
	///
	/// Returns an error on malformed CSV or missing required columns.
	pub fn from_csv_reader(reader: impl Read) -> Result<Self, DatasetError> {
		let mut reader = csv::ReaderBuilder::new()
			.has_headers(true)
			.flexible(true)
			.from_reader(reader);

		let headers: Vec<String> = reader
			.headers()?
			.iter()
			.map(|header| header.trim().to_string())
			.collect();

		for field in REQUIRED_FIELDS {
			if !headers.iter().any(|header| header == field.column()) {
				return Err(DatasetError::MissingColumn {
					column: field.column(),
				});
			}
		}

		let mut records = Vec::new();
		for (line, row) in reader.records().enumerate() {
			let row = row?;
			if row.iter().all(|cell| cell.trim().is_empty()) {
				debug!("skipping blank CSV row {}", line + 2);
				continue;
			}
			if row.len() != headers.len() {
				warn!(
					"CSV row {} has {} cells for {} columns",
					line + 2,
					row.len(),
					headers.len()
				);
			}
			let record: Record = headers
				.iter()
				.zip(row.iter())
				.map(|(header, cell)| (header.clone(), FieldValue::Text(cell.to_string())))
				.collect();
			records.push(record);
		}

		Ok(Self { records })
	}

	/// Parse a JSON array of flat objects whose values are strings, numbers
	/// or nulls.
	///
	/// # Errors
	///
	/// Returns an error on malformed JSON or when a record lacks a required
	/// column.
	pub fn from_json_reader(reader: impl Read) -> Result<Self, DatasetError> {
		let records: Vec<Record> = serde_json::from_reader(reader)?;

		for field in REQUIRED_FIELDS {
			if records.iter().any(|record| !record.contains(field.column())) {
				return Err(DatasetError::MissingColumn {
					column: field.column(),
				});
			}
		}

		Ok(Self { records })
	}

	pub fn records(&self) -> &[Record] {
		&self.records
	}

	/// Number of records before any filtering.
	pub fn total(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use tempfile::tempdir;

	use super::*;

	const SAMPLE: &str = "\
unique_ID,original_IUPAC_names,SMILES,pka_type,pka_value,T,assessment
1,acetic acid,CC(=O)O,pKa,4.76,25,Reliable

2,\"ethanoic acid, glacial\",CC(=O)O,pKa,n/a,,Uncertain
";

	#[test]
	fn csv_rows_keep_header_order_and_skip_blank_lines() {
		let dataset = Dataset::from_csv_reader(SAMPLE.as_bytes()).expect("parse");
		assert_eq!(dataset.total(), 2);

		let first = &dataset.records()[0];
		let columns: Vec<&str> = first.iter().map(|(column, _)| column).collect();
		assert_eq!(columns[0], "unique_ID");
		assert_eq!(columns[6], "assessment");
		assert_eq!(first.text(Field::Name), "acetic acid");

		let second = &dataset.records()[1];
		assert_eq!(second.text(Field::Name), "ethanoic acid, glacial");
		assert_eq!(second.number(Field::PkaValue), None);
	}

	#[test]
	fn csv_without_required_columns_is_rejected() {
		let err = Dataset::from_csv_reader("unique_ID,SMILES\n1,C\n".as_bytes()).unwrap_err();
		assert!(matches!(
			err,
			DatasetError::MissingColumn {
				column: "original_IUPAC_names"
			}
		));
	}

	#[test]
	fn json_preserves_numbers_and_nulls() {
		let json = r#"[{"unique_ID":"1","original_IUPAC_names":"phenol","pka_value":9.99,"T":null}]"#;
		let dataset = Dataset::from_json_reader(json.as_bytes()).expect("parse");
		let record = &dataset.records()[0];
		assert_eq!(record.get("pka_value"), Some(&FieldValue::Number(9.99)));
		assert_eq!(record.get("T"), Some(&FieldValue::Missing));
	}

	#[test]
	fn json_rejects_nested_values() {
		let json = r#"[{"unique_ID":"1","original_IUPAC_names":{"en":"phenol"}}]"#;
		assert!(matches!(
			Dataset::from_json_reader(json.as_bytes()),
			Err(DatasetError::Json(_))
		));
	}

	#[test]
	fn load_dispatches_on_extension() {
		let dir = tempdir().expect("tempdir");
		let path = dir.path().join("data.CSV");
		let mut file = File::create(&path).expect("create");
		file.write_all(SAMPLE.as_bytes()).expect("write");

		let dataset = Dataset::load(&path).expect("load");
		assert_eq!(dataset.total(), 2);

		let other = dir.path().join("data.xlsx");
		File::create(&other).expect("create");
		assert!(matches!(
			Dataset::load(&other),
			Err(DatasetError::UnsupportedFormat { .. })
		));
	}

	#[test]
	fn load_reports_missing_files() {
		let dir = tempdir().expect("tempdir");
		let err = Dataset::load(dir.path().join("absent.csv")).unwrap_err();
		assert!(matches!(err, DatasetError::Io { .. }));
		assert!(err.to_string().contains("absent.csv"));
	}
}

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a dataset snapshot.
#[derive(Debug, Error)]
pub enum DatasetError {
	/// The dataset file could not be opened or read.
	#[error("failed to read dataset {path}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// The CSV reader rejected the input.
	#[error("malformed CSV dataset: {0}")]
	Csv(#[from] csv::Error),

	/// The JSON input was not an array of flat objects.
	#[error("malformed JSON dataset: {0}")]
	Json(#[from] serde_json::Error),

	/// The file extension does not name a supported format.
	#[error("unsupported dataset format for {path} (expected .csv or .json)")]
	UnsupportedFormat { path: PathBuf },

	/// A column every record needs is absent.
	#[error("dataset is missing required column `{column}`")]
	MissingColumn { column: &'static str },
}

/// Errors raised while writing an export file.
#[derive(Debug, Error)]
pub enum ExportError {
	#[error("failed to write export file {path}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("failed to write CSV export: {0}")]
	Csv(#[from] csv::Error),

	#[error("failed to serialize export: {0}")]
	Json(#[from] serde_json::Error),
}

/// Errors raised when a textual setting does not name a known value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseValueError {
	#[error("unknown sort key `{0}`")]
	SortKey(String),

	#[error("unknown sort direction `{0}` (expected asc or desc)")]
	SortDirection(String),

	#[error("unknown match mode `{0}` (expected all or any)")]
	MatchMode(String),

	#[error("unknown export format `{0}` (expected csv or json)")]
	ExportFormat(String),

	#[error("page size {0} is not one of 25, 50, 100, 250, 500")]
	PageSize(usize),
}

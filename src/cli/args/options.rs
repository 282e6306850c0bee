use clap::ValueEnum;
use pkachu::{ExportFormat, MatchMode, SortDirection};

/// Match modes accepted via the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum MatchModeArg {
	All,
	Any,
}

impl MatchModeArg {
	/// Return the string representation consumed by configuration loading.
	pub(crate) fn as_str(self) -> &'static str {
		MatchMode::from(self).as_str()
	}
}

impl From<MatchModeArg> for MatchMode {
	fn from(arg: MatchModeArg) -> Self {
		match arg {
			MatchModeArg::All => MatchMode::All,
			MatchModeArg::Any => MatchMode::Any,
		}
	}
}

/// Sort directions accepted via the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OrderArg {
	Asc,
	Desc,
}

impl OrderArg {
	pub(crate) fn as_str(self) -> &'static str {
		SortDirection::from(self).as_str()
	}
}

impl From<OrderArg> for SortDirection {
	fn from(arg: OrderArg) -> Self {
		match arg {
			OrderArg::Asc => SortDirection::Ascending,
			OrderArg::Desc => SortDirection::Descending,
		}
	}
}

/// Export formats selectable from the CLI.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ExportArg {
	Csv,
	Json,
}

impl From<ExportArg> for ExportFormat {
	fn from(arg: ExportArg) -> Self {
		match arg {
			ExportArg::Csv => ExportFormat::Csv,
			ExportArg::Json => ExportFormat::Json,
		}
	}
}

/// Output formats supported by the CLI utility.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	Plain,
	Json,
}

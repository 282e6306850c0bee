use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{ArgAction, ColorChoice, Parser};

use super::options::{ExportArg, MatchModeArg, OrderArg, OutputFormat};
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `pkachu` binary.
#[derive(Parser, Debug)]
#[command(
	name = "pkachu",
	version,
	long_version = long_version(),
	about = "Relevance search, filtering and export over pKa datasets",
	after_help = "Query syntax: free text plus type:<t>, assessment:<a>, id:<id> and \
	              pka:<n | a-b | a..b | <n | <=n | >n | >=n>.",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[arg(
		value_name = "QUERY",
		help = "Search query; words are joined with spaces (default: match everything)"
	)]
	pub(crate) query: Vec<String>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "PKACHU_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'd',
		long = "data",
		value_name = "FILE",
		help = "Dataset to search, .csv or .json (default: data.csv in the data directory)"
	)]
	pub(crate) data: Option<PathBuf>,
	#[arg(
		short = 't',
		long = "type",
		value_name = "TYPE",
		help = "Only show records of this pKa type (default: all)"
	)]
	pub(crate) pka_type: Option<String>,
	#[arg(
		short = 'a',
		long,
		value_name = "ASSESSMENT",
		help = "Only show records with this assessment (default: all)"
	)]
	pub(crate) assessment: Option<String>,
	#[arg(
		long = "min-pka",
		value_name = "NUM",
		allow_negative_numbers = true,
		help = "Lower pKa bound, inclusive (default: none)"
	)]
	pub(crate) min_pka: Option<f64>,
	#[arg(
		long = "max-pka",
		value_name = "NUM",
		allow_negative_numbers = true,
		help = "Upper pKa bound, inclusive (default: none)"
	)]
	pub(crate) max_pka: Option<f64>,
	#[arg(
		long = "min-temp",
		value_name = "NUM",
		allow_negative_numbers = true,
		help = "Lower temperature bound, inclusive (default: none)"
	)]
	pub(crate) min_temp: Option<f64>,
	#[arg(
		long = "max-temp",
		value_name = "NUM",
		allow_negative_numbers = true,
		help = "Upper temperature bound, inclusive (default: none)"
	)]
	pub(crate) max_temp: Option<f64>,
	#[arg(
		long,
		value_name = "CODE",
		help = "Only show records whose method contains CODE (default: all)"
	)]
	pub(crate) method: Option<String>,
	#[arg(
		short = 'm',
		long = "match-mode",
		value_enum,
		help = "How free-text words combine (default: all)"
	)]
	pub(crate) match_mode: Option<MatchModeArg>,
	#[arg(
		long = "prefer-exact",
		value_name = "BOOL",
		num_args = 0..=1,
		default_missing_value = "true",
		value_parser = BoolishValueParser::new(),
		help = "Boost exact and base-name matches (default: enabled)"
	)]
	pub(crate) prefer_exact: Option<bool>,
	#[arg(
		short = 's',
		long = "sort",
		value_name = "KEY",
		help = "Sort by a column name or `relevance` (default: relevance with free text, else pka_value)"
	)]
	pub(crate) sort: Option<String>,
	#[arg(
		long,
		value_enum,
		help = "Sort direction (default: asc)"
	)]
	pub(crate) order: Option<OrderArg>,
	#[arg(
		short = 'l',
		long,
		value_name = "NUM",
		help = "Rows to display: 25, 50, 100, 250 or 500 (default: 100)"
	)]
	pub(crate) limit: Option<usize>,
	#[arg(
		short = 'e',
		long,
		value_enum,
		help = "Export the full match set in this format (default: no export)"
	)]
	pub(crate) export: Option<ExportArg>,
	#[arg(
		long = "export-dir",
		value_name = "DIR",
		help = "Directory for export files (default: current directory)"
	)]
	pub(crate) export_dir: Option<PathBuf>,
	#[arg(
		short = 'f',
		long,
		help = "List pKa types and assessments present in the dataset (default: disabled)"
	)]
	pub(crate) facets: bool,
	#[arg(
		short = 'p',
		long = "print-config",
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Choose how to print the result"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		short = 'v',
		long = "verbose",
		action = ArgAction::Count,
		help = "Increase log verbosity; repeat for more (default: warnings only)"
	)]
	pub(crate) verbose: u8,
}

impl CliArgs {
	/// Query words joined back into a single query string.
	pub(crate) fn query_string(&self) -> String {
		self.query.join(" ")
	}
}

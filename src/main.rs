mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use pkachu::logging;
use settings::ResolvedConfig;
use workflow::{SearchInputs, SearchWorkflow};

fn main() -> Result<()> {
	let cli = parse_cli();
	logging::initialize(cli.verbose);

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	run_search(cli.output, resolved, SearchInputs::from_cli(&cli))
}

/// Execute the search workflow and print output in the chosen format.
fn run_search(format: OutputFormat, settings: ResolvedConfig, inputs: SearchInputs) -> Result<()> {
	let report = SearchWorkflow::new(settings, inputs).run()?;

	match format {
		OutputFormat::Plain => print_plain(&report),
		OutputFormat::Json => print_json(&report)?,
	}

	Ok(())
}

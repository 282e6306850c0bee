use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use log::debug;
use pkachu::{
	Dataset, ExportFormat, ExportOutcome, Facets, FilterState, Record, ResultSummary,
	SearchSession,
};
use serde::Serialize;

use crate::cli::CliArgs;
use crate::settings::ResolvedConfig;

/// Per-invocation inputs that never come from configuration files.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct SearchInputs {
	pub(crate) query: String,
	pub(crate) filters: FilterState,
	pub(crate) export: Option<ExportFormat>,
	pub(crate) facets: bool,
}

impl SearchInputs {
	pub(crate) fn from_cli(cli: &CliArgs) -> Self {
		Self {
			query: cli.query_string(),
			filters: FilterState {
				pka_type: cli.pka_type.clone(),
				assessment: cli.assessment.clone(),
				min_pka: cli.min_pka,
				max_pka: cli.max_pka,
				min_temperature: cli.min_temp,
				max_temperature: cli.max_temp,
				method: cli.method.clone(),
			},
			export: cli.export.map(ExportFormat::from),
			facets: cli.facets,
		}
	}
}

/// One displayed row: the record plus its relevance score when a free-text
/// query was active.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ReportRow {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub(crate) score: Option<f64>,
	#[serde(flatten)]
	pub(crate) record: Record,
}

/// Owned result of a single search run, ready for printing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct SearchReport {
	pub(crate) query: String,
	pub(crate) summary: ResultSummary,
	pub(crate) rows: Vec<ReportRow>,
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub(crate) messages: Vec<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub(crate) exported: Option<PathBuf>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub(crate) facets: Option<Facets>,
}

/// Loads the dataset named by the configuration and runs one search over it.
pub(crate) struct SearchWorkflow {
	config: ResolvedConfig,
	inputs: SearchInputs,
}

impl SearchWorkflow {
	pub(crate) fn new(config: ResolvedConfig, inputs: SearchInputs) -> Self {
		Self { config, inputs }
	}

	pub(crate) fn run(self) -> Result<SearchReport> {
		let path = &self.config.dataset;
		let dataset = Dataset::load(path)
			.with_context(|| format!("failed to load dataset {}", path.display()))?;
		self.search(&dataset, Local::now().date_naive())
	}

	fn search(self, dataset: &Dataset, today: NaiveDate) -> Result<SearchReport> {
		let Self { config, inputs } = self;
		let mut session = SearchSession::new(dataset);
		session.set_match_mode(config.match_mode);
		session.set_prefer_exact(config.prefer_exact);
		session.set_page_size(config.page_size);
		if let Some(sort) = config.sort {
			session.set_sort(sort);
		}
		*session.filters_mut() = inputs.filters;
		session.set_query(inputs.query.as_str());

		let mut messages = session.range_messages();
		let results = session.results();
		let summary = results.summary(config.page_size);
		debug!("{summary}");
		let rows = results
			.page(config.page_size)
			.iter()
			.map(|scored| ReportRow {
				score: scored.score,
				record: scored.record.clone(),
			})
			.collect();

		let mut exported = None;
		if let Some(format) = inputs.export {
			let now = Instant::now();
			let outcome = session
				.export(format, &config.export_dir, today, now)
				.context("export failed")?;
			if let ExportOutcome::Written(path) = outcome {
				exported = Some(path);
			}
			if let Some(notice) = session.notice(now) {
				messages.push(notice.message.clone());
			}
		}

		let facets = inputs.facets.then(|| session.facets());

		Ok(SearchReport {
			query: inputs.query,
			summary,
			rows,
			messages,
			exported,
			facets,
		})
	}
}

#[cfg(test)]
mod tests {
	use pkachu::{Field, MatchMode, PageSize, SortState};

	use super::*;

	fn dataset() -> Dataset {
		let rows = [
			("1", "acetic acid", "4.76", "pKa"),
			("2", "formic acid", "3.75", "pKa"),
			("3", "ammonium", "9.25", "pKaH"),
		];
		Dataset::from_records(
			rows.into_iter()
				.map(|(id, name, pka, kind)| {
					Record::new()
						.with(Field::UniqueId, id)
						.with(Field::Name, name)
						.with(Field::PkaValue, pka)
						.with(Field::PkaType, kind)
				})
				.collect(),
		)
	}

	fn config(export_dir: PathBuf) -> ResolvedConfig {
		ResolvedConfig {
			dataset: PathBuf::from("unused.csv"),
			match_mode: MatchMode::All,
			prefer_exact: true,
			page_size: PageSize::DEFAULT,
			sort: None,
			export_dir,
		}
	}

	fn ids(report: &SearchReport) -> Vec<String> {
		report
			.rows
			.iter()
			.map(|row| row.record.text(Field::UniqueId).into_owned())
			.collect()
	}

	fn today() -> NaiveDate {
		NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")
	}

	#[test]
	fn free_text_rows_carry_scores() {
		let inputs = SearchInputs {
			query: "acid".into(),
			..SearchInputs::default()
		};
		let report = SearchWorkflow::new(config(PathBuf::from(".")), inputs)
			.search(&dataset(), today())
			.expect("search");
		assert!(report.rows.iter().all(|row| row.score.is_some()));
		let scores: Vec<f64> = report.rows.iter().filter_map(|row| row.score).collect();
		assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
		assert_eq!(report.summary.matched, 2);
		assert_eq!(report.summary.total, 3);
	}

	#[test]
	fn configured_sort_replaces_relevance_order() {
		let inputs = SearchInputs {
			query: "acid".into(),
			..SearchInputs::default()
		};
		let mut config = config(PathBuf::from("."));
		config.sort = Some(SortState::default());
		let report = SearchWorkflow::new(config, inputs)
			.search(&dataset(), today())
			.expect("search");
		assert_eq!(ids(&report), ["2", "1"]);
	}

	#[test]
	fn inverted_range_reports_message_and_keeps_rows() {
		let inputs = SearchInputs {
			filters: FilterState {
				min_pka: Some(9.0),
				max_pka: Some(3.0),
				..FilterState::default()
			},
			..SearchInputs::default()
		};
		let report = SearchWorkflow::new(config(PathBuf::from(".")), inputs)
			.search(&dataset(), today())
			.expect("search");
		assert_eq!(report.rows.len(), 3);
		assert_eq!(report.messages.len(), 1);
		assert!(report.messages[0].contains("range ignored"));
	}

	#[test]
	fn export_writes_full_match_set() {
		let dir = tempfile::tempdir().expect("tempdir");
		let inputs = SearchInputs {
			query: "type:pKa".into(),
			export: Some(ExportFormat::Csv),
			..SearchInputs::default()
		};
		let report = SearchWorkflow::new(config(dir.path().to_path_buf()), inputs)
			.search(&dataset(), today())
			.expect("search");
		let path = report.exported.expect("file written");
		assert_eq!(path, dir.path().join("pka_export_2024-03-01.csv"));
		let body = std::fs::read_to_string(path).expect("read export");
		assert_eq!(body.lines().count(), 3);
	}

	#[test]
	fn empty_export_posts_notice() {
		let dir = tempfile::tempdir().expect("tempdir");
		let inputs = SearchInputs {
			query: "nothing-matches-this".into(),
			export: Some(ExportFormat::Json),
			facets: true,
			..SearchInputs::default()
		};
		let report = SearchWorkflow::new(config(dir.path().to_path_buf()), inputs)
			.search(&dataset(), today())
			.expect("search");
		assert_eq!(report.exported, None);
		assert_eq!(report.messages, [pkachu::session::EMPTY_EXPORT_NOTICE]);
		let facets = report.facets.expect("facets requested");
		assert_eq!(facets.pka_types.len(), 2);
	}
}

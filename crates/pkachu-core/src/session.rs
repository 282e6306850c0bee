//! Interactive search state: debounced query, controls and notices.

use std::path::Path;
use std::time::Instant;

use chrono::NaiveDate;
use log::debug;

use crate::dataset::Dataset;
use crate::error::ExportError;
use crate::export::{self, ExportFormat, ExportOutcome};
use crate::facets::Facets;
use crate::filter::FilterState;
use crate::pipeline::{PageSize, SearchRequest, SearchResults, evaluate};
use crate::query::ParsedQuery;
use crate::schedule::{Debouncer, Notice, NoticeBoard};
use crate::scoring::{MatchMode, ScoreOptions};
use crate::sort::{SortKey, SortState};

pub const EMPTY_EXPORT_NOTICE: &str = "No data to export";

/// One user's view over a dataset.
///
/// Typed input goes through [`SearchSession::input`] and only reaches the
/// pipeline once [`SearchSession::poll`] sees the quiet period elapse.
/// Every other control applies immediately. Results are recomputed from
/// scratch on each [`SearchSession::results`] call.
#[derive(Debug, Clone)]
pub struct SearchSession<'a> {
	dataset: &'a Dataset,
	raw_query: String,
	debouncer: Debouncer<String>,
	request: SearchRequest,
	page_size: PageSize,
	notices: NoticeBoard,
}

impl<'a> SearchSession<'a> {
	pub fn new(dataset: &'a Dataset) -> Self {
		Self {
			dataset,
			raw_query: String::new(),
			debouncer: Debouncer::default(),
			request: SearchRequest::default(),
			page_size: PageSize::default(),
			notices: NoticeBoard::default(),
		}
	}

	/// Record a keystroke. The query is applied after the debounce period.
	pub fn input(&mut self, raw: impl Into<String>, now: Instant) {
		let raw = raw.into();
		self.raw_query.clone_from(&raw);
		self.debouncer.input(raw, now);
	}

	/// Apply the pending query if it has settled. Returns whether the
	/// applied query changed.
	pub fn poll(&mut self, now: Instant) -> bool {
		match self.debouncer.poll(now) {
			Some(raw) => self.apply_query(&raw),
			None => false,
		}
	}

	/// Apply the pending query immediately.
	pub fn flush(&mut self) -> bool {
		match self.debouncer.flush() {
			Some(raw) => self.apply_query(&raw),
			None => false,
		}
	}

	/// Replace the query without debouncing, discarding pending input.
	pub fn set_query(&mut self, raw: impl Into<String>) -> bool {
		self.debouncer.cancel();
		self.raw_query = raw.into();
		let raw = self.raw_query.clone();
		self.apply_query(&raw)
	}

	fn apply_query(&mut self, raw: &str) -> bool {
		let parsed = ParsedQuery::parse(raw);
		if parsed == self.request.query {
			return false;
		}
		debug!("applying query {raw:?}");
		self.request.query = parsed;
		true
	}

	/// The text as typed, possibly not yet applied.
	pub fn raw_query(&self) -> &str {
		&self.raw_query
	}

	/// The query the pipeline currently runs with.
	pub fn query(&self) -> &ParsedQuery {
		&self.request.query
	}

	pub fn is_query_pending(&self) -> bool {
		self.debouncer.is_pending()
	}

	pub fn filters(&self) -> &FilterState {
		&self.request.filters
	}

	pub fn filters_mut(&mut self) -> &mut FilterState {
		&mut self.request.filters
	}

	/// The order results are currently shown in, picked or automatic.
	pub fn sort(&self) -> SortState {
		self.request
			.sort
			.unwrap_or_else(|| SortState::automatic(self.request.query.has_text()))
	}

	pub fn set_sort(&mut self, sort: SortState) {
		self.request.sort = Some(sort);
	}

	/// Header click on `key`.
	pub fn toggle_sort(&mut self, key: SortKey) {
		self.request.sort =
			SortState::toggled(self.request.sort, key, self.request.query.has_text());
	}

	pub fn page_size(&self) -> PageSize {
		self.page_size
	}

	pub fn set_page_size(&mut self, size: PageSize) {
		self.page_size = size;
	}

	pub fn options(&self) -> ScoreOptions {
		self.request.options
	}

	pub fn set_match_mode(&mut self, mode: MatchMode) {
		self.request.options.match_mode = mode;
	}

	pub fn set_prefer_exact(&mut self, prefer_exact: bool) {
		self.request.options.prefer_exact = prefer_exact;
	}

	pub fn dataset(&self) -> &'a Dataset {
		self.dataset
	}

	pub fn request(&self) -> &SearchRequest {
		&self.request
	}

	/// Run the pipeline with the applied query and current controls.
	pub fn results(&self) -> SearchResults<'a> {
		evaluate(self.dataset.records(), &self.request)
	}

	/// Validation messages for inverted numeric ranges.
	pub fn range_messages(&self) -> Vec<String> {
		self.request
			.filters
			.range_errors()
			.iter()
			.map(ToString::to_string)
			.collect()
	}

	pub fn facets(&self) -> Facets {
		Facets::from_records(self.dataset.records())
	}

	/// Export the full match set into `dir`. An empty match set posts a
	/// notice instead of writing a file.
	///
	/// # Errors
	///
	/// Returns an error when the export file cannot be written.
	pub fn export(
		&mut self,
		format: ExportFormat,
		dir: &Path,
		date: NaiveDate,
		now: Instant,
	) -> Result<ExportOutcome, ExportError> {
		let results = self.results();
		let outcome = export::export_to_dir(results.records(), format, dir, date)?;
		if outcome == ExportOutcome::Empty {
			self.notices.post(EMPTY_EXPORT_NOTICE, now);
		}
		Ok(outcome)
	}

	/// The notice visible at `now`, if any.
	pub fn notice(&mut self, now: Instant) -> Option<&Notice> {
		self.notices.current(now)
	}

	/// Clear the query and every filter and return to the automatic sort.
	/// Page size and scoring options are kept.
	pub fn reset(&mut self) {
		self.debouncer.cancel();
		self.raw_query.clear();
		self.request.query = ParsedQuery::default();
		self.request.filters.reset();
		self.request.sort = None;
		self.notices.dismiss();
	}
}

//! The search pipeline: score, filter, sort, then paginate.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ParseValueError;
use crate::filter::{self, FilterState};
use crate::query::ParsedQuery;
use crate::record::{Record, ScoredRecord};
use crate::scoring::{ScoreOptions, score};
use crate::sort::{SortState, sort_records};

/// Number of rows shown at once. Only a fixed set of sizes is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
	pub const ALLOWED: [usize; 5] = [25, 50, 100, 250, 500];
	pub const DEFAULT: PageSize = PageSize(100);

	pub fn get(self) -> usize {
		self.0
	}
}

impl Default for PageSize {
	fn default() -> Self {
		Self::DEFAULT
	}
}

impl TryFrom<usize> for PageSize {
	type Error = ParseValueError;

	fn try_from(value: usize) -> Result<Self, Self::Error> {
		if Self::ALLOWED.contains(&value) {
			Ok(PageSize(value))
		} else {
			Err(ParseValueError::PageSize(value))
		}
	}
}

impl From<PageSize> for usize {
	fn from(size: PageSize) -> Self {
		size.0
	}
}

impl fmt::Display for PageSize {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Everything one pipeline run depends on besides the dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchRequest {
	pub query: ParsedQuery,
	pub filters: FilterState,
	/// Picked sort. `None` follows [`SortState::automatic`].
	pub sort: Option<SortState>,
	pub options: ScoreOptions,
}

impl SearchRequest {
	/// Request for `raw` with default filters, sort and options.
	pub fn new(raw: &str) -> Self {
		Self {
			query: ParsedQuery::parse(raw),
			..Self::default()
		}
	}
}

/// The three counts that describe a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultSummary {
	/// Records matching every filter.
	pub matched: usize,
	/// Records in the display slice.
	pub displayed: usize,
	/// Records in the unfiltered dataset.
	pub total: usize,
}

impl fmt::Display for ResultSummary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Results ({} of {} entries)", self.matched, self.total)?;
		if self.displayed < self.matched {
			write!(f, ", showing first {}", self.displayed)?;
		}
		Ok(())
	}
}

/// Full match set of one run, sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults<'a> {
	matches: Vec<ScoredRecord<'a>>,
	total: usize,
}

impl<'a> SearchResults<'a> {
	pub fn matches(&self) -> &[ScoredRecord<'a>] {
		&self.matches
	}

	/// Matched records without their scores, as exported.
	pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
		self.matches.iter().map(|scored| scored.record)
	}

	pub fn match_count(&self) -> usize {
		self.matches.len()
	}

	pub fn total_count(&self) -> usize {
		self.total
	}

	pub fn is_empty(&self) -> bool {
		self.matches.is_empty()
	}

	/// The display slice: the first `size` matches.
	pub fn page(&self, size: PageSize) -> &[ScoredRecord<'a>] {
		&self.matches[..self.matches.len().min(size.get())]
	}

	pub fn summary(&self, size: PageSize) -> ResultSummary {
		ResultSummary {
			matched: self.match_count(),
			displayed: self.page(size).len(),
			total: self.total,
		}
	}
}

/// Run the pipeline over `records`.
///
/// With free-text tokens every record is scored and only positive scores
/// survive; structured filters, then the UI filters narrow the set, which
/// is finally sorted. Without a picked sort, free-text queries rank by
/// relevance. `records` itself is never touched.
pub fn evaluate<'a>(records: &'a [Record], request: &SearchRequest) -> SearchResults<'a> {
	let query = &request.query;
	let query_active = query.has_text();

	let mut matches: Vec<ScoredRecord<'a>> = if query_active {
		records
			.iter()
			.map(|record| {
				let relevance = score(record, &query.tokens, &query.hints, request.options);
				ScoredRecord::scored(record, relevance)
			})
			.filter(|scored| scored.relevance() > 0.0)
			.collect()
	} else {
		records.iter().map(ScoredRecord::unscored).collect()
	};
	debug!(
		"scoring kept {} of {} records (tokens: {:?})",
		matches.len(),
		records.len(),
		query.tokens
	);

	matches = filter::apply_structured(matches, &query.filters);
	matches = filter::apply_ui(matches, &request.filters);
	let sort = request
		.sort
		.unwrap_or_else(|| SortState::automatic(query_active));
	let matches = sort_records(matches, &sort, query_active);

	SearchResults {
		matches,
		total: records.len(),
	}
}

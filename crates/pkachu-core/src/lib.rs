//! Search pipeline for tabular pKa datasets.
//!
//! A raw query string is parsed into free-text tokens, structured `key:value`
//! filters and numeric hints. Records are scored against the tokens, narrowed
//! by the structured and UI-level filters, sorted, and finally paginated or
//! exported. Every stage is a pure function over an immutable [`Dataset`];
//! scores live on transient [`ScoredRecord`] pairs and never touch the
//! underlying records.

pub mod dataset;
pub mod error;
pub mod export;
pub mod facets;
pub mod filter;
pub mod numeric;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod schedule;
pub mod scoring;
pub mod session;
pub mod sort;

pub use dataset::Dataset;
pub use error::{DatasetError, ExportError, ParseValueError};
pub use export::{ExportFormat, ExportOutcome};
pub use facets::{FacetCount, Facets};
pub use filter::{FilterState, RangeError};
pub use pipeline::{PageSize, ResultSummary, SearchRequest, SearchResults, evaluate};
pub use query::{FilterKey, ParsedQuery, PkaFilter, StructuredFilters};
pub use record::{Field, FieldValue, Record, ScoredRecord};
pub use schedule::{Debouncer, Notice, NoticeBoard, Timer, TimerHandle};
pub use scoring::{MatchMode, ScoreOptions, score};
pub use session::SearchSession;
pub use sort::{SortDirection, SortKey, SortState};

use std::path::PathBuf;

use pkachu_core::export::{to_csv, to_json};
use pkachu_core::{
	Dataset, Facets, Field, FilterState, MatchMode, Record, SearchRequest, SearchResults,
	SortDirection, SortKey, SortState, evaluate,
};

fn fixture() -> Dataset {
	let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample.csv");
	Dataset::load(path).expect("fixture loads")
}

fn ids(results: &SearchResults<'_>) -> Vec<String> {
	results
		.records()
		.map(|record| record.text(Field::UniqueId).into_owned())
		.collect()
}

fn run(dataset: &Dataset, query: &str) -> Vec<String> {
	ids(&evaluate(dataset.records(), &SearchRequest::new(query)))
}

fn run_by_pka(dataset: &Dataset, query: &str) -> Vec<String> {
	let request = SearchRequest {
		sort: Some(SortState::default()),
		..SearchRequest::new(query)
	};
	ids(&evaluate(dataset.records(), &request))
}

#[test]
fn fixture_loads_every_row() {
	let dataset = fixture();
	assert_eq!(dataset.total(), 10);
	assert_eq!(dataset.records()[3].text(Field::Name), "2,4-dinitrophenol");
}

#[test]
fn free_text_ranks_exact_name_first() {
	let dataset = fixture();
	assert_eq!(run(&dataset, "acetic acid"), ["1", "10", "3"]);
}

#[test]
fn picked_pka_sort_replaces_relevance_order() {
	let dataset = fixture();
	assert_eq!(run_by_pka(&dataset, "acid"), ["3", "9", "8", "1", "10"]);

	let request = SearchRequest {
		sort: Some(SortState::new(
			SortKey::Column(Field::PkaValue),
			SortDirection::Descending,
		)),
		..SearchRequest::new("acid")
	};
	assert_eq!(ids(&evaluate(dataset.records(), &request)), ["10", "1", "8", "9", "3"]);
}

#[test]
fn pka_filters_are_inclusive_and_drop_non_numeric() {
	let dataset = fixture();
	assert_eq!(run(&dataset, "pka:4.7-4.9"), ["1", "10"]);
	assert_eq!(run(&dataset, "pka:4.9..4.7"), ["1", "10"]);
	assert_eq!(run(&dataset, "pka:>=4.5"), ["1", "10", "7", "6", "5"]);
	assert!(!run(&dataset, "pka:<100").contains(&"2".to_string()));
}

#[test]
fn malformed_pka_filter_is_ignored() {
	let dataset = fixture();
	assert_eq!(run(&dataset, "pka:abc").len(), dataset.total());
}

#[test]
fn structured_and_free_text_combine() {
	let dataset = fixture();
	assert_eq!(run(&dataset, "TYPE:pkah pyridine"), ["7"]);
	assert_eq!(run_by_pka(&dataset, "assessment:reliable acid"), ["3", "8", "1"]);
	assert_eq!(run(&dataset, "id:6"), ["6"]);
}

#[test]
fn unknown_keys_are_searched_as_text() {
	let dataset = fixture();
	assert!(run(&dataset, "solvent:water").is_empty());
}

#[test]
fn ui_filters_narrow_after_query() {
	let dataset = fixture();
	let request = SearchRequest {
		filters: FilterState {
			assessment: Some("Reliable".into()),
			min_temperature: Some(25.0),
			method: Some("pot".into()),
			..FilterState::default()
		},
		sort: Some(SortState::default()),
		..SearchRequest::new("acid")
	};
	assert_eq!(ids(&evaluate(dataset.records(), &request)), ["3", "8", "1"]);
}

#[test]
fn inverted_ui_range_keeps_the_result_set() {
	let dataset = fixture();
	let request = SearchRequest {
		filters: FilterState {
			min_pka: Some(8.0),
			max_pka: Some(3.0),
			..FilterState::default()
		},
		..SearchRequest::new("")
	};
	let results = evaluate(dataset.records(), &request);
	assert_eq!(results.match_count(), dataset.total());
	assert!(request.filters.pka_range_error().is_some());
}

#[test]
fn any_mode_widens_unsatisfiable_query() {
	let dataset = fixture();
	let mut request = SearchRequest::new("phenol pyridine");
	request.sort = Some(SortState::default());
	assert_eq!(evaluate(dataset.records(), &request).match_count(), 0);

	request.options.match_mode = MatchMode::Any;
	let widened = evaluate(dataset.records(), &request);
	// "phenol" also hits 2,4-dinitrophenol.
	assert_eq!(ids(&widened), ["4", "7", "5"]);
}

#[test]
fn json_export_round_trips_without_scores() {
	let dataset = fixture();
	let results = evaluate(dataset.records(), &SearchRequest::new("acid"));
	let json = to_json(results.records()).expect("serialize");
	assert!(!json.contains("score"));

	let back: Vec<Record> = serde_json::from_str(&json).expect("parse");
	let expected: Vec<Record> = results.records().cloned().collect();
	assert_eq!(back, expected);
}

#[test]
fn csv_export_quotes_awkward_cells() {
	let dataset = fixture();
	let results = evaluate(dataset.records(), &SearchRequest::new("id:4"));
	let csv = to_csv(results.records()).expect("csv");
	assert_eq!(
		csv.lines().nth(1),
		Some(
			"4,\"2,4-dinitrophenol\",Oc1ccc(cc1[N+](=O)[O-])[N+](=O)[O-],pKa,4.09,25,SPECTRO,Approximate,\"measured in \"\"dilute\"\" solution\",Kortum 1961"
		)
	);
}

#[test]
fn facets_cover_the_whole_dataset() {
	let dataset = fixture();
	let facets = Facets::from_records(dataset.records());
	let types: Vec<_> = facets
		.pka_types
		.iter()
		.map(|facet| (facet.name.as_str(), facet.count))
		.collect();
	assert_eq!(types, [("pKa", 8), ("pKaH", 2)]);
	assert_eq!(facets.assessments.len(), 3);
}

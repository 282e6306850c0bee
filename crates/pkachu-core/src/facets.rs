//! Distinct categorical values for populating selection controls.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::record::{Field, Record};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetCount {
	pub name: String,
	pub count: usize,
}

/// Sorted distinct pKa types and assessments with occurrence counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
	pub pka_types: Vec<FacetCount>,
	pub assessments: Vec<FacetCount>,
}

impl Facets {
	pub fn from_records<'r>(records: impl IntoIterator<Item = &'r Record>) -> Self {
		let mut pka_types = BTreeMap::new();
		let mut assessments = BTreeMap::new();
		for record in records {
			count(&mut pka_types, record, Field::PkaType);
			count(&mut assessments, record, Field::Assessment);
		}
		Self {
			pka_types: collect(pka_types),
			assessments: collect(assessments),
		}
	}
}

fn count(counts: &mut BTreeMap<String, usize>, record: &Record, field: Field) {
	let value = record.text(field);
	let value = value.trim();
	if !value.is_empty() {
		*counts.entry(value.to_string()).or_default() += 1;
	}
}

fn collect(counts: BTreeMap<String, usize>) -> Vec<FacetCount> {
	counts
		.into_iter()
		.map(|(name, count)| FacetCount { name, count })
		.collect()
}

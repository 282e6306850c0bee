use std::fmt;

use serde::Serialize;

use crate::numeric::strict_number;

/// Open comparison operators accepted by `pka:`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
	Less,
	LessOrEqual,
	Greater,
	GreaterOrEqual,
}

impl Comparison {
	// Two-character operators first so `<=` is not read as `<` + `=4`.
	const PREFIXES: [(&'static str, Comparison); 4] = [
		("<=", Comparison::LessOrEqual),
		(">=", Comparison::GreaterOrEqual),
		("<", Comparison::Less),
		(">", Comparison::Greater),
	];

	pub fn symbol(self) -> &'static str {
		match self {
			Comparison::Less => "<",
			Comparison::LessOrEqual => "<=",
			Comparison::Greater => ">",
			Comparison::GreaterOrEqual => ">=",
		}
	}
}

/// Numeric constraint parsed from a `pka:` filter value.
///
/// Displays in the query grammar: `4.76`, `4.7..4.9` or `<=4.5`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PkaFilter {
	/// Inclusive range; an exact value has `min == max`.
	Range { min: f64, max: f64 },
	/// One-sided bound.
	Compare { op: Comparison, bound: f64 },
}

impl PkaFilter {
	pub fn exact(value: f64) -> Self {
		PkaFilter::Range {
			min: value,
			max: value,
		}
	}

	/// Build an inclusive range, swapping the ends when given out of order.
	pub fn range(a: f64, b: f64) -> Self {
		PkaFilter::Range {
			min: a.min(b),
			max: a.max(b),
		}
	}

	/// Parse `A-B`, `A..B`, `<op>N` or a bare number. Anything else yields
	/// `None`.
	pub fn parse(value: &str) -> Option<Self> {
		let value = value.trim();

		for (prefix, op) in Comparison::PREFIXES {
			if let Some(rest) = value.strip_prefix(prefix) {
				return strict_number(rest).map(|bound| PkaFilter::Compare { op, bound });
			}
		}

		if let Some((low, high)) = value.split_once("..") {
			return Some(Self::range(strict_number(low)?, strict_number(high)?));
		}

		// The first character may be a minus sign on the lower bound.
		for (index, _) in value.match_indices('-').filter(|(index, _)| *index > 0) {
			if let (Some(low), Some(high)) = (
				strict_number(&value[..index]),
				strict_number(&value[index + 1..]),
			) {
				return Some(Self::range(low, high));
			}
		}

		strict_number(value).map(Self::exact)
	}

	/// Whether a record's numeric pKa satisfies the filter.
	pub fn matches(&self, value: f64) -> bool {
		match *self {
			PkaFilter::Range { min, max } => value >= min && value <= max,
			PkaFilter::Compare { op, bound } => match op {
				Comparison::Less => value < bound,
				Comparison::LessOrEqual => value <= bound,
				Comparison::Greater => value > bound,
				Comparison::GreaterOrEqual => value >= bound,
			},
		}
	}

	/// Lower bound, if any.
	pub fn min(&self) -> Option<f64> {
		match *self {
			PkaFilter::Range { min, .. } => Some(min),
			PkaFilter::Compare {
				op: Comparison::Greater | Comparison::GreaterOrEqual,
				bound,
			} => Some(bound),
			PkaFilter::Compare { .. } => None,
		}
	}

	/// Upper bound, if any.
	pub fn max(&self) -> Option<f64> {
		match *self {
			PkaFilter::Range { max, .. } => Some(max),
			PkaFilter::Compare {
				op: Comparison::Less | Comparison::LessOrEqual,
				bound,
			} => Some(bound),
			PkaFilter::Compare { .. } => None,
		}
	}
}

impl fmt::Display for PkaFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match *self {
			PkaFilter::Range { min, max } if min == max => write!(f, "{min}"),
			PkaFilter::Range { min, max } => write!(f, "{min}..{max}"),
			PkaFilter::Compare { op, bound } => write!(f, "{}{bound}", op.symbol()),
		}
	}
}

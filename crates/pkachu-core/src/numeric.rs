//! Lenient and strict number parsing for dataset cells and filter values.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^\s*([+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
		.expect("leading number pattern compiles")
});

/// Parse the longest leading decimal number in `text`.
///
/// Leading whitespace is skipped, then an optional sign, digits with an
/// optional fraction and an optional exponent are consumed. Anything after
/// the number is ignored, so `"4.76 (approx.)"` reads as `4.76` while
/// `"n/a"` and `"<2"` do not parse at all.
pub fn leading_number(text: &str) -> Option<f64> {
	let number = LEADING_NUMBER_RE.captures(text)?.get(1)?;
	number
		.as_str()
		.parse::<f64>()
		.ok()
		.filter(|value| value.is_finite())
}

/// Parse `text` as a whole, finite number. Used for filter values where
/// trailing garbage means the value is malformed.
pub fn strict_number(text: &str) -> Option<f64> {
	let trimmed = text.trim();
	if trimmed.is_empty() {
		return None;
	}
	trimmed
		.parse::<f64>()
		.ok()
		.filter(|value| value.is_finite())
}

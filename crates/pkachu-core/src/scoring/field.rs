//! Per-field scoring of a single token.

/// Characters that end a field's base name.
const BASE_NAME_SEPARATORS: [char; 4] = [';', ',', '(', ')'];

/// How a token relates to the field it was found in. Exactly one tier
/// applies per (token, field) pair, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MatchTier {
	/// The whole field equals the token.
	Exact,
	/// The token equals the field's base name.
	BaseName,
	/// Base-name match directly followed by a modifier such as " derivative".
	ModifiedBaseName,
	/// The field starts with the token.
	Prefix { soft_boundary: bool },
	/// Some occurrence is delimited by non-alphanumerics or string edges.
	WordBoundary,
	/// Plain substring hit.
	Substring,
}

impl MatchTier {
	/// Classify a token already known to occur in `value`. Both must be
	/// lower-cased.
	pub(crate) fn classify(token: &str, value: &str) -> Self {
		if value == token {
			return MatchTier::Exact;
		}

		if let Some((base, rest)) = split_base_name(value)
			&& base == token
		{
			return if rest.chars().take(2).any(is_modifier) {
				MatchTier::ModifiedBaseName
			} else {
				MatchTier::BaseName
			};
		}

		if let Some(rest) = value.strip_prefix(token) {
			let soft_boundary = matches!(rest.chars().next(), Some(',' | '-' | ')'));
			return MatchTier::Prefix { soft_boundary };
		}

		if has_word_boundary_occurrence(token, value) {
			MatchTier::WordBoundary
		} else {
			MatchTier::Substring
		}
	}

	pub(crate) fn multiplier(self) -> f64 {
		match self {
			MatchTier::Exact => 5.0,
			MatchTier::BaseName => 3.5,
			MatchTier::ModifiedBaseName => 2.0,
			MatchTier::Prefix {
				soft_boundary: true,
			} => 1.3,
			MatchTier::Prefix {
				soft_boundary: false,
			} => 2.0,
			MatchTier::WordBoundary => 1.5,
			MatchTier::Substring => 1.0,
		}
	}

	/// Flat bonus added when exact matches are preferred.
	pub(crate) fn exact_bonus(self) -> f64 {
		match self {
			MatchTier::Exact => 1000.0,
			MatchTier::BaseName => 500.0,
			MatchTier::ModifiedBaseName => 100.0,
			_ => 0.0,
		}
	}
}

/// Score one token against one lower-cased field value, or `None` when the
/// token does not occur in it.
pub(crate) fn field_score(token: &str, value: &str, weight: f64, prefer_exact: bool) -> Option<f64> {
	let byte_index = value.find(token)?;
	let tier = MatchTier::classify(token, value);

	let value_len = value.chars().count() as f64;
	let token_len = token.chars().count() as f64;
	let position = value[..byte_index].chars().count() as f64;

	let mut score = weight * tier.multiplier();

	let ratio = token_len / value_len;
	if ratio > 0.8 {
		score *= 1.5;
	} else if ratio > 0.5 {
		score *= 1.2;
	}

	if byte_index == 0 {
		score *= 1.3;
	} else if position < value_len * 0.2 {
		score *= 1.1;
	}

	if prefer_exact {
		score += tier.exact_bonus();
	}

	Some(score)
}

/// Split a value into its base name (text before the first separator,
/// trimmed, trailing hyphens removed) and whatever follows that base name.
fn split_base_name(value: &str) -> Option<(&str, &str)> {
	let head_end = value.find(BASE_NAME_SEPARATORS).unwrap_or(value.len());
	let leading = value.len() - value.trim_start().len();
	let base = value[..head_end].trim().trim_end_matches('-');
	if base.is_empty() {
		return None;
	}
	let base_end = leading + base.len();
	Some((base, &value[base_end..]))
}

fn is_modifier(ch: char) -> bool {
	ch.is_whitespace() || matches!(ch, '-' | '/' | '(' | ')' | '[' | ']' | '{' | '}')
}

fn has_word_boundary_occurrence(token: &str, value: &str) -> bool {
	value.match_indices(token).any(|(start, matched)| {
		let before = value[..start].chars().next_back();
		let after = value[start + matched.len()..].chars().next();
		!before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
	})
}

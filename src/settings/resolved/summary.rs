use std::fmt::Write;

use super::ResolvedConfig;

pub(super) fn format_summary(config: &ResolvedConfig) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "Effective configuration:");
	let _ = writeln!(out, "  Dataset: {}", config.dataset.display());
	let _ = writeln!(out, "  Match mode: {}", config.match_mode);
	let _ = writeln!(out, "  Prefer exact: {}", bool_to_word(config.prefer_exact));
	let _ = writeln!(out, "  Page size: {}", config.page_size);
	match config.sort {
		Some(sort) => {
			let _ = writeln!(out, "  Sort: {} ({})", sort.key, sort.direction);
		}
		None => {
			let _ = writeln!(out, "  Sort: automatic");
		}
	}
	let _ = writeln!(out, "  Export directory: {}", config.export_dir.display());
	out
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}

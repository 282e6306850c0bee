use std::borrow::Cow;
use std::fmt::Write;

use anyhow::Result;
use pkachu::{FacetCount, Field};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::workflow::SearchReport;

/// Columns shown in the plain table, with their headings.
const TABLE_COLUMNS: [(Field, &str); 7] = [
	(Field::UniqueId, "ID"),
	(Field::Name, "Name"),
	(Field::PkaValue, "pKa"),
	(Field::PkaType, "Type"),
	(Field::Temperature, "T"),
	(Field::Method, "Method"),
	(Field::Assessment, "Assessment"),
];
const MAX_CELL_WIDTH: usize = 48;
const COLUMN_GAP: &str = "  ";

/// Print a plain-text table of the search report. Messages go to stderr.
pub(crate) fn print_plain(report: &SearchReport) {
	for message in &report.messages {
		eprintln!("{message}");
	}
	print!("{}", format_plain(report));
	if let Some(path) = &report.exported {
		eprintln!(
			"Exported {} records to {}",
			report.summary.matched,
			path.display()
		);
	}
}

/// Render the report as an aligned table preceded by the result summary.
pub(crate) fn format_plain(report: &SearchReport) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "{}", report.summary);

	if !report.rows.is_empty() {
		let scored = report.rows.iter().any(|row| row.score.is_some());
		let mut table: Vec<Vec<Cow<'_, str>>> = Vec::with_capacity(report.rows.len() + 1);

		let mut heading: Vec<Cow<'_, str>> = Vec::new();
		if scored {
			heading.push(Cow::Borrowed("Score"));
		}
		heading.extend(TABLE_COLUMNS.iter().map(|(_, title)| Cow::Borrowed(*title)));
		table.push(heading);

		for row in &report.rows {
			let mut cells = Vec::with_capacity(TABLE_COLUMNS.len() + 1);
			if scored {
				cells.push(Cow::Owned(
					row.score.map(|score| format!("{score:.1}")).unwrap_or_default(),
				));
			}
			for (field, _) in TABLE_COLUMNS {
				let text = row.record.text(field);
				cells.push(Cow::Owned(clip(&flatten(&text), MAX_CELL_WIDTH).into_owned()));
			}
			table.push(cells);
		}

		let _ = writeln!(out);
		write_table(&mut out, &table);
	}

	if let Some(facets) = &report.facets {
		let _ = writeln!(out);
		write_facets(&mut out, "pKa types", &facets.pka_types);
		write_facets(&mut out, "Assessments", &facets.assessments);
	}

	out
}

fn write_table(out: &mut String, table: &[Vec<Cow<'_, str>>]) {
	let columns = table.first().map_or(0, Vec::len);
	let widths: Vec<usize> = (0..columns)
		.map(|column| {
			table
				.iter()
				.map(|row| row[column].width())
				.max()
				.unwrap_or(0)
		})
		.collect();

	for row in table {
		let mut line = String::new();
		for (cell, width) in row.iter().zip(&widths) {
			line.push_str(cell);
			line.push_str(&" ".repeat(width - cell.width()));
			line.push_str(COLUMN_GAP);
		}
		let _ = writeln!(out, "{}", line.trim_end());
	}
}

fn write_facets(out: &mut String, title: &str, counts: &[FacetCount]) {
	let _ = writeln!(out, "{title}:");
	for FacetCount { name, count } in counts {
		let _ = writeln!(out, "  {name} ({count})");
	}
}

/// Collapse line breaks so a cell stays on one line.
fn flatten(text: &str) -> Cow<'_, str> {
	if text.contains(['\n', '\r']) {
		Cow::Owned(text.replace("\r\n", " ").replace(['\n', '\r'], " "))
	} else {
		Cow::Borrowed(text)
	}
}

/// Shorten `text` to at most `max` display columns, marking the cut.
fn clip(text: &str, max: usize) -> Cow<'_, str> {
	if text.width() <= max {
		return Cow::Borrowed(text);
	}
	let mut clipped = String::new();
	let mut width = 0;
	for ch in text.chars() {
		let ch_width = ch.width().unwrap_or(0);
		if width + ch_width + 1 > max {
			break;
		}
		clipped.push(ch);
		width += ch_width;
	}
	clipped.push('…');
	Cow::Owned(clipped)
}

/// Format the search report as a JSON string.
pub(crate) fn format_report_json(report: &SearchReport) -> Result<String> {
	Ok(serde_json::to_string_pretty(report)?)
}

/// Print the JSON representation of the search report.
pub(crate) fn print_json(report: &SearchReport) -> Result<()> {
	println!("{}", format_report_json(report)?);
	Ok(())
}

//! Normalization engine: enriches raw label-value records with derived
//! hierarchy metadata before the tree and graph builders run.

use crate::model::{LabelValueRecord, NormalizedValue, last_segment};

/// Content-type tag for a hierarchy level.
pub fn content_type(level: usize) -> String {
	match level {
		1 => "root".to_owned(),
		n => format!("child {}", n - 1),
	}
}

/// Enrich a single record. Pure and deterministic.
pub fn normalize_value(record: &LabelValueRecord, locale: &str) -> NormalizedValue {
	let level = record.value.split('/').count();
	NormalizedValue {
		level,
		content_type: content_type(level),
		last_value: last_segment(&record.value).to_owned(),
		last_parent: record
			.parent_value
			.as_deref()
			.map(|p| last_segment(p).to_owned()),
		value: record.value.clone(),
		parent_value: record.parent_value.clone(),
		name: record.display_name(locale),
	}
}

/// Enrich every record, preserving input order. Empty input is fine.
pub fn normalize_values(records: &[LabelValueRecord], locale: &str) -> Vec<NormalizedValue> {
	records.iter().map(|r| normalize_value(r, locale)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(value: &str, parent: Option<&str>, name: &str) -> LabelValueRecord {
		LabelValueRecord {
			value: value.to_owned(),
			parent_value: parent.map(str::to_owned),
			name: [("nb-NO".to_owned(), name.to_owned())].into(),
		}
	}

	#[test]
	fn nested_value_gets_level_and_terminal_segments() {
		let out = normalize_value(&record("a/b/c", Some("a/b"), "C"), "nb-NO");
		assert_eq!(out.level, 3);
		assert_eq!(out.content_type, "child 2");
		assert_eq!(out.last_value, "c");
		assert_eq!(out.last_parent.as_deref(), Some("b"));
		assert_eq!(out.name, "C");
	}

	#[test]
	fn root_value_has_no_parent_segment() {
		let out = normalize_value(&record("root1", None, "Root"), "nb-NO");
		assert_eq!(out.level, 1);
		assert_eq!(out.content_type, "root");
		assert_eq!(out.last_value, "root1");
		assert_eq!(out.last_parent, None);
	}

	#[test]
	fn empty_input_yields_empty_output() {
		assert_eq!(normalize_values(&[], "nb-NO"), vec![]);
	}

	#[test]
	fn output_order_matches_input_order() {
		let records = vec![
			record("b", None, "B"),
			record("a", None, "A"),
			record("a/x", Some("a"), "X"),
		];
		let values: Vec<String> = normalize_values(&records, "nb-NO")
			.into_iter()
			.map(|v| v.value)
			.collect();
		assert_eq!(values, ["b", "a", "a/x"]);
	}
}

//! Wire and derived data types for the label taxonomy service.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A named category, identified by a unique key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
	pub key: String,
	pub name: String,
}

/// A label value as the server sends it: a slash-delimited path, an optional
/// parent path and per-locale display names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelValueRecord {
	pub value: String,
	/// Explicit `null` on the wire for root values.
	pub parent_value: Option<String>,
	pub name: BTreeMap<String, String>,
}

impl LabelValueRecord {
	/// Display name for `locale`. Falls back to the first locale present,
	/// then to the final path segment, so a missing translation never
	/// renders as nothing.
	pub fn display_name(&self, locale: &str) -> String {
		self.name
			.get(locale)
			.or_else(|| self.name.values().next())
			.cloned()
			.unwrap_or_else(|| last_segment(&self.value).to_owned())
	}
}

/// Final segment of a slash-delimited path.
pub fn last_segment(path: &str) -> &str {
	path.rsplit('/').next().unwrap_or(path)
}

/// A label value enriched with derived hierarchy metadata; built once per
/// fetch and immutable until the next one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizedValue {
	/// Segment count of `value`, >= 1.
	pub level: usize,
	/// `"root"` for level 1, otherwise `"child {level - 1}"`.
	pub content_type: String,
	/// Final segment of `value`.
	pub last_value: String,
	/// Final segment of `parent_value`, when present.
	pub last_parent: Option<String>,
	pub value: String,
	pub parent_value: Option<String>,
	/// Locale-resolved display name.
	pub name: String,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn record(value: &str, parent: Option<&str>, names: &[(&str, &str)]) -> LabelValueRecord {
		LabelValueRecord {
			value: value.to_owned(),
			parent_value: parent.map(str::to_owned),
			name: names
				.iter()
				.map(|(k, v)| (k.to_string(), v.to_string()))
				.collect(),
		}
	}

	#[test]
	fn last_segment_takes_the_tail() {
		assert_eq!(last_segment("a/b/c"), "c");
		assert_eq!(last_segment("root"), "root");
	}

	#[test]
	fn display_name_prefers_requested_locale() {
		let r = record("a/b", Some("a"), &[("en-US", "Bee"), ("nb-NO", "Bi")]);
		assert_eq!(r.display_name("nb-NO"), "Bi");
	}

	#[test]
	fn display_name_falls_back_to_first_locale_then_segment() {
		let r = record("a/b", Some("a"), &[("en-US", "Bee")]);
		assert_eq!(r.display_name("nb-NO"), "Bee");

		let r = record("a/b", Some("a"), &[]);
		assert_eq!(r.display_name("nb-NO"), "b");
	}

	#[test]
	fn record_uses_camel_case_and_explicit_null_parent() {
		let root = record("root1", None, &[("nb-NO", "Rot")]);
		let json = serde_json::to_value(&root).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"value": "root1",
				"parentValue": null,
				"name": { "nb-NO": "Rot" }
			})
		);

		let parsed: LabelValueRecord = serde_json::from_value(serde_json::json!({
			"value": "a/b",
			"parentValue": "a",
			"name": { "nb-NO": "B" }
		}))
		.unwrap();
		assert_eq!(parsed.parent_value.as_deref(), Some("a"));
	}
}

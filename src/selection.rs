//! Selection and interaction state: which label and which node are being
//! edited, the controlled form state behind the CRUD actions, and the
//! guards that gate them.

use std::sync::atomic::{AtomicU64, Ordering};

use thiserror::Error;

use crate::model::NormalizedValue;

/// Why a CRUD action is currently unavailable. Guards short-circuit the
/// action without surfacing anything to the user; the variants exist so the
/// "disabled until valid" policy is explicit and testable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
	#[error("no label selected")]
	NoLabelSelected,
	#[error("no value selected")]
	NoValueSelected,
	#[error("required field `{0}` is empty")]
	EmptyField(&'static str),
}

fn require_field(field: &'static str, value: &str) -> Result<(), ValidationError> {
	if value.is_empty() {
		Err(ValidationError::EmptyField(field))
	} else {
		Ok(())
	}
}

/// Which label the operator is working on. An empty key means none.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelSelection {
	pub key: String,
	pub name: String,
}

impl LabelSelection {
	pub fn select(key: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			name: name.into(),
		}
	}

	/// The cleared state, as after deleting the selected label.
	pub fn cleared() -> Self {
		Self::default()
	}

	pub fn is_selected(&self) -> bool {
		!self.key.is_empty()
	}

	pub fn require(&self) -> Result<(), ValidationError> {
		if self.is_selected() {
			Ok(())
		} else {
			Err(ValidationError::NoLabelSelected)
		}
	}
}

/// The node currently loaded into the value edit form, if any. Replaced
/// wholesale on each selection or CRUD response, cleared after delete.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectedNode(Option<NormalizedValue>);

impl SelectedNode {
	pub fn select(node: NormalizedValue) -> Self {
		Self(Some(node))
	}

	pub fn cleared() -> Self {
		Self(None)
	}

	/// Full-path id of the selected node, when one is selected.
	pub fn value(&self) -> Option<&str> {
		self.0.as_ref().map(|n| n.value.as_str())
	}

	pub fn node(&self) -> Option<&NormalizedValue> {
		self.0.as_ref()
	}

	pub fn require(&self) -> Result<&NormalizedValue, ValidationError> {
		self.0.as_ref().ok_or(ValidationError::NoValueSelected)
	}
}

/// Controlled state of the label key/name form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelForm {
	pub key: String,
	pub name: String,
}

impl LabelForm {
	/// Mirror a selection into the form, as clicking a label does.
	pub fn for_selection(selection: &LabelSelection) -> Self {
		Self {
			key: selection.key.clone(),
			name: selection.name.clone(),
		}
	}

	/// POST needs a non-empty key and name.
	pub fn validate_create(&self) -> Result<(), ValidationError> {
		require_field("key", &self.key)?;
		require_field("name", &self.name)
	}

	/// PUT additionally needs an existing selection.
	pub fn validate_update(&self, selection: &LabelSelection) -> Result<(), ValidationError> {
		selection.require()?;
		self.validate_create()
	}
}

/// DELETE on a label needs an existing selection.
pub fn validate_label_delete(selection: &LabelSelection) -> Result<(), ValidationError> {
	selection.require()
}

/// Controlled state of the value edit form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueForm {
	pub value: String,
	pub parent_value: String,
	pub name: String,
	pub update_children: bool,
}

impl ValueForm {
	/// Mirror a node into the form, as clicking a graph node does.
	pub fn for_node(node: &NormalizedValue) -> Self {
		Self {
			value: node.value.clone(),
			parent_value: node.parent_value.clone().unwrap_or_default(),
			name: node.name.clone(),
			update_children: false,
		}
	}

	/// `parentValue` goes on the wire as `null` when the field is empty.
	pub fn parent_value_opt(&self) -> Option<String> {
		if self.parent_value.is_empty() {
			None
		} else {
			Some(self.parent_value.clone())
		}
	}

	/// POST needs a selected label plus non-empty value and name.
	pub fn validate_create(&self, label: &LabelSelection) -> Result<(), ValidationError> {
		label.require()?;
		require_field("value", &self.value)?;
		require_field("name", &self.name)
	}

	/// PUT additionally needs a selected node.
	pub fn validate_update(
		&self,
		label: &LabelSelection,
		selected: &SelectedNode,
	) -> Result<(), ValidationError> {
		selected.require()?;
		self.validate_create(label)
	}
}

/// DELETE on a value needs a selected label and a selected node.
pub fn validate_value_delete(
	label: &LabelSelection,
	selected: &SelectedNode,
) -> Result<(), ValidationError> {
	label.require()?;
	selected.require().map(|_| ())
}

/// Sequence numbers for one fetch type. Responses that lose the race are
/// discarded instead of overwriting fresher state.
#[derive(Debug, Default)]
pub struct FetchGate {
	issued: AtomicU64,
	applied: AtomicU64,
}

impl FetchGate {
	/// Take a ticket before issuing a request.
	pub fn begin(&self) -> u64 {
		let ticket = self.issued.load(Ordering::Relaxed) + 1;
		self.issued.store(ticket, Ordering::Relaxed);
		ticket
	}

	/// True when `ticket` is newer than the last applied response; the
	/// caller must then apply it. False means drop the response.
	pub fn try_apply(&self, ticket: u64) -> bool {
		if ticket > self.applied.load(Ordering::Relaxed) {
			self.applied.store(ticket, Ordering::Relaxed);
			true
		} else {
			false
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::Label;

	fn node(value: &str, parent: Option<&str>) -> NormalizedValue {
		NormalizedValue {
			value: value.to_owned(),
			parent_value: parent.map(str::to_owned),
			..Default::default()
		}
	}

	#[test]
	fn label_create_requires_key_and_name() {
		let form = LabelForm::default();
		assert_eq!(form.validate_create(), Err(ValidationError::EmptyField("key")));

		let form = LabelForm {
			key: "cat".into(),
			name: String::new(),
		};
		assert_eq!(form.validate_create(), Err(ValidationError::EmptyField("name")));

		let form = LabelForm {
			key: "cat".into(),
			name: "Category".into(),
		};
		assert_eq!(form.validate_create(), Ok(()));
	}

	#[test]
	fn label_update_and_delete_require_a_selection() {
		let form = LabelForm {
			key: "cat".into(),
			name: "Category".into(),
		};
		assert_eq!(
			form.validate_update(&LabelSelection::cleared()),
			Err(ValidationError::NoLabelSelected)
		);
		assert_eq!(form.validate_update(&LabelSelection::select("cat", "Category")), Ok(()));
		assert_eq!(
			validate_label_delete(&LabelSelection::cleared()),
			Err(ValidationError::NoLabelSelected)
		);
	}

	#[test]
	fn value_guards_chain_label_node_and_fields() {
		let label = LabelSelection::select("cat", "Category");
		let form = ValueForm {
			value: "a/b".into(),
			name: "B".into(),
			..Default::default()
		};
		assert_eq!(
			form.validate_create(&LabelSelection::cleared()),
			Err(ValidationError::NoLabelSelected)
		);
		assert_eq!(form.validate_create(&label), Ok(()));
		assert_eq!(
			form.validate_update(&label, &SelectedNode::cleared()),
			Err(ValidationError::NoValueSelected)
		);
		assert_eq!(
			form.validate_update(&label, &SelectedNode::select(node("a/b", Some("a")))),
			Ok(())
		);
		assert_eq!(
			validate_value_delete(&label, &SelectedNode::cleared()),
			Err(ValidationError::NoValueSelected)
		);
	}

	#[test]
	fn empty_parent_field_serializes_as_none() {
		let mut form = ValueForm::default();
		assert_eq!(form.parent_value_opt(), None);
		form.parent_value = "a".into();
		assert_eq!(form.parent_value_opt(), Some("a".into()));
	}

	#[test]
	fn label_crud_transitions_drive_the_selection() {
		// POST response selects the created label.
		let created = Label {
			key: "cat".into(),
			name: "Category".into(),
		};
		let selection = LabelSelection::select(created.key.clone(), created.name.clone());
		assert!(selection.is_selected());
		assert_eq!(LabelForm::for_selection(&selection).key, "cat");

		// DELETE clears both selection and form mirror.
		let cleared = LabelSelection::cleared();
		assert!(!cleared.is_selected());
		assert_eq!(LabelForm::for_selection(&cleared), LabelForm::default());
	}

	#[test]
	fn node_selection_mirrors_into_the_value_form() {
		let mut n = node("a/b", Some("a"));
		n.name = "B".into();
		let selected = SelectedNode::select(n.clone());
		assert_eq!(selected.value(), Some("a/b"));

		let form = ValueForm::for_node(&n);
		assert_eq!(form.value, "a/b");
		assert_eq!(form.parent_value, "a");
		assert_eq!(form.name, "B");
		assert!(!form.update_children);

		assert_eq!(SelectedNode::cleared().value(), None);
	}

	#[test]
	fn fetch_gate_discards_out_of_order_responses() {
		let gate = FetchGate::default();
		let first = gate.begin();
		let second = gate.begin();
		// The later request resolves first; the earlier one must be dropped.
		assert!(gate.try_apply(second));
		assert!(!gate.try_apply(first));
		// A fresh ticket is applied again.
		let third = gate.begin();
		assert!(gate.try_apply(third));
	}
}

//! Form field declarations for job configuration
//!
//! Tasks declare the fields a job operator fills in as an ordered list of
//! descriptors. The host renders them in declaration order and submits the
//! operator's values back as a [`FieldMap`] when the job starts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Submitted configuration values, keyed by field name
pub type FieldMap = HashMap<String, String>;

/// The rendering kind of a configurable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text input
    Text,
    /// Boolean checkbox
    Checkbox,
}

/// Declarative descriptor for one configurable field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    /// Field name, the key under which the value is submitted
    pub name: String,
    /// Localized label shown next to the field
    pub label: String,
    /// Localized help text, empty when the field needs none
    pub description: String,
    /// Pre-filled value, empty when the field has no default
    pub default_value: String,
    /// How the host renders the field
    pub kind: FieldKind,
}

/// Ordered builder for a task's form field list
///
/// Fields appear in the configuration form in the order they are added.
#[derive(Debug, Default)]
pub struct FormFieldSet {
    fields: Vec<FormField>,
}

impl FormFieldSet {
    /// Create an empty field set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a free-text field with a pre-filled default value
    pub fn add_text(
        &mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        default_value: impl Into<String>,
    ) -> &mut Self {
        self.fields.push(FormField {
            name: name.into(),
            label: label.into(),
            description: String::new(),
            default_value: default_value.into(),
            kind: FieldKind::Text,
        });
        self
    }

    /// Add a checkbox field with a label and help text
    pub fn add_checkbox(
        &mut self,
        name: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.fields.push(FormField {
            name: name.into(),
            label: label.into(),
            description: description.into(),
            default_value: String::new(),
            kind: FieldKind::Checkbox,
        });
        self
    }

    /// Consume the builder, returning the fields in declaration order
    pub fn into_vec(self) -> Vec<FormField> {
        self.fields
    }
}

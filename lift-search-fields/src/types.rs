//! Core field types for the search form.
//!
//! A field descriptor is an immutable description of one form control:
//! its stable key, the label shown for it, and the control itself with
//! its options and current selection. Descriptors serialize via serde so
//! they can be handed to templates unchanged.

use serde::{Deserialize, Serialize};

use crate::error::{FieldsError, Result};

/// A single option in a select field, in display order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// The current selection of a select field.
///
/// The empty string is the "unset" sentinel and resolves to the
/// catch-all option ("All Types", "All Dates").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Selection {
    #[default]
    None,
    Single(String),
    Many(Vec<String>),
}

impl Selection {
    /// All selected values as a slice, normalizing scalars to one element.
    pub fn values(&self) -> &[String] {
        match self {
            Selection::None => &[],
            Selection::Single(value) => std::slice::from_ref(value),
            Selection::Many(values) => values,
        }
    }

    /// True when nothing meaningful is selected.
    pub fn is_unset(&self) -> bool {
        self.values().iter().all(|v| v.is_empty())
    }

    /// The first selected value, if any.
    pub fn first(&self) -> Option<&str> {
        self.values().first().map(String::as_str)
    }
}

/// Kind of a form control.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    Select,
    Hidden,
    Text,
}

/// The control a field renders as, with its kind-specific state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Control {
    Select {
        options: Vec<SelectOption>,
        #[serde(default)]
        selected: Selection,
        /// Checkbox-style multi selection rather than a single dropdown.
        #[serde(default)]
        multiple: bool,
    },
    Hidden {
        value: String,
    },
    Text {
        #[serde(default)]
        value: String,
    },
}

impl Control {
    pub fn kind(&self) -> FieldKind {
        match self {
            Control::Select { .. } => FieldKind::Select,
            Control::Hidden { .. } => FieldKind::Hidden,
            Control::Text { .. } => FieldKind::Text,
        }
    }
}

/// A field descriptor: the complete description of a single form control.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub key: String,
    #[serde(default)]
    pub label: String,
    pub control: Control,
}

impl FieldDescriptor {
    /// A single-choice dropdown.
    pub fn select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
        selected: Selection,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            control: Control::Select {
                options,
                selected,
                multiple: false,
            },
        }
    }

    /// A checkbox-style select allowing several values.
    pub fn multi_select(
        key: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
        selected: Vec<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            control: Control::Select {
                options,
                selected: Selection::Many(selected),
                multiple: true,
            },
        }
    }

    /// A hidden input carrying a raw value. Hidden fields have no label.
    pub fn hidden(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: String::new(),
            control: Control::Hidden {
                value: value.into(),
            },
        }
    }

    /// A free-text input.
    pub fn text(
        key: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            control: Control::Text {
                value: value.into(),
            },
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.control.kind()
    }

    /// Options of a select field; empty for other kinds.
    pub fn options(&self) -> &[SelectOption] {
        match &self.control {
            Control::Select { options, .. } => options,
            _ => &[],
        }
    }

    /// Selection of a select field; `Selection::None` for other kinds.
    pub fn selected(&self) -> &Selection {
        static NONE: Selection = Selection::None;
        match &self.control {
            Control::Select { selected, .. } => selected,
            _ => &NONE,
        }
    }

    /// Raw value of a hidden or text field.
    pub fn raw_value(&self) -> Option<&str> {
        match &self.control {
            Control::Hidden { value } | Control::Text { value } => Some(value),
            Control::Select { .. } => None,
        }
    }

    pub fn is_multiple(&self) -> bool {
        matches!(self.control, Control::Select { multiple: true, .. })
    }

    /// Whether the option with `value` is currently selected.
    ///
    /// An unset selection selects the empty-valued catch-all option.
    pub fn is_selected(&self, value: &str) -> bool {
        let selected = self.selected();
        if selected.is_unset() {
            return value.is_empty();
        }
        selected.values().iter().any(|v| v == value)
    }

    /// Display labels of the selected options, in option order.
    pub fn selected_labels(&self) -> Vec<&str> {
        let selected = self.selected().values();
        self.options()
            .iter()
            .filter(|o| selected.contains(&o.value))
            .map(|o| o.label.as_str())
            .collect()
    }

    /// Check the descriptor is well formed on its own.
    ///
    /// Every non-empty selected value of a select must be one of its options;
    /// the empty string is the unset sentinel and always allowed.
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(FieldsError::EmptyKey);
        }
        if let Control::Select {
            options, selected, ..
        } = &self.control
        {
            if options.is_empty() {
                return Err(FieldsError::MissingOptions {
                    key: self.key.clone(),
                });
            }
            if let Some(unknown) = selected
                .values()
                .iter()
                .find(|v| !v.is_empty() && !options.iter().any(|o| &o.value == *v))
            {
                return Err(FieldsError::UnknownSelection {
                    key: self.key.clone(),
                    value: unknown.clone(),
                });
            }
        }
        Ok(())
    }
}

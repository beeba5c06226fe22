use std::collections::BTreeMap;

use super::rules::{first_failure, Rule};

/// A file picked in a file input, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// The raw value held by a form field.
///
/// Inputs keep their text exactly as typed; parsing happens in rules and
/// when the submitted values are turned into a request.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Files(Vec<SelectedFile>),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// Whitespace-only text counts as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::Files(files) => files.is_empty(),
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            FieldValue::Text(text) => text,
            FieldValue::Files(_) => "",
        }
    }

    pub fn as_files(&self) -> &[SelectedFile] {
        match self {
            FieldValue::Files(files) => files,
            FieldValue::Text(_) => &[],
        }
    }

    /// Finite number parsed from the trimmed text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Text(text) => text.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            FieldValue::Files(_) => None,
        }
    }
}

/// Snapshot of every field's value, keyed by field.
#[derive(Debug, Clone, PartialEq)]
pub struct FormValues<K> {
    values: BTreeMap<K, FieldValue>,
}

impl<K> Default for FormValues<K> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<K: Copy + Ord> FormValues<K> {
    pub fn get(&self, key: K) -> Option<&FieldValue> {
        self.values.get(&key)
    }

    /// Text of a field; empty for unknown or file fields.
    pub fn text(&self, key: K) -> &str {
        self.get(key).map(FieldValue::as_text).unwrap_or("")
    }

    pub fn files(&self, key: K) -> &[SelectedFile] {
        self.get(key).map(FieldValue::as_files).unwrap_or(&[])
    }

    pub fn number(&self, key: K) -> Option<f64> {
        self.get(key).and_then(FieldValue::as_number)
    }
}

impl<K: Ord> FromIterator<(K, FieldValue)> for FormValues<K> {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone)]
struct Field<K> {
    default: FieldValue,
    value: FieldValue,
    rules: Vec<Rule<K>>,
    error: Option<String>,
}

/// Headless form state: registered fields with their values, rules and
/// current errors.
///
/// Validation runs on submit. Once a submit has been attempted, editing a
/// field re-checks that field so its message clears as soon as it is fixed.
#[derive(Debug, Clone)]
pub struct FormState<K> {
    fields: BTreeMap<K, Field<K>>,
    submit_count: u32,
    reset_count: u32,
}

impl<K> Default for FormState<K> {
    fn default() -> Self {
        Self {
            fields: BTreeMap::new(),
            submit_count: 0,
            reset_count: 0,
        }
    }
}

impl<K: Copy + Ord> FormState<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a field with its default value and rules.
    ///
    /// Registering the same key again replaces the earlier registration.
    pub fn register(mut self, key: K, default: FieldValue, rules: Vec<Rule<K>>) -> Self {
        self.fields.insert(
            key,
            Field {
                value: default.clone(),
                default,
                rules,
                error: None,
            },
        );
        self
    }

    /// Change handler for a registered field. Unknown keys are ignored.
    pub fn set_value(&mut self, key: K, value: FieldValue) {
        let Some(field) = self.fields.get_mut(&key) else {
            return;
        };
        field.value = value;

        if self.submit_count > 0 {
            self.revalidate(key);
        }
    }

    /// Blur handler. Before the first submit nothing is checked; after it,
    /// leaving a field re-checks it like an edit does.
    pub fn blur(&mut self, key: K) {
        if self.submit_count > 0 {
            self.revalidate(key);
        }
    }

    pub fn value(&self, key: K) -> Option<&FieldValue> {
        self.fields.get(&key).map(|f| &f.value)
    }

    /// Current text of a field; empty for unknown or file fields.
    pub fn text(&self, key: K) -> &str {
        self.value(key).map(FieldValue::as_text).unwrap_or("")
    }

    pub fn files(&self, key: K) -> &[SelectedFile] {
        self.value(key).map(FieldValue::as_files).unwrap_or(&[])
    }

    /// Snapshot of all current values.
    pub fn get_values(&self) -> FormValues<K> {
        self.fields
            .iter()
            .map(|(key, field)| (*key, field.value.clone()))
            .collect()
    }

    /// Run every field's rules, replacing the stored errors.
    /// Returns whether the form is valid.
    pub fn validate(&mut self) -> bool {
        let values = self.get_values();
        for field in self.fields.values_mut() {
            field.error = first_failure(&field.rules, &field.value, &values).map(str::to_string);
        }
        self.is_valid()
    }

    fn revalidate(&mut self, key: K) {
        let values = self.get_values();
        if let Some(field) = self.fields.get_mut(&key) {
            field.error = first_failure(&field.rules, &field.value, &values).map(str::to_string);
        }
    }

    /// Submission trigger: validate, then call `on_valid` with the values
    /// or `on_invalid` with the errors. Nothing is submitted when any field
    /// fails.
    pub fn handle_submit<R>(
        &mut self,
        on_valid: impl FnOnce(FormValues<K>) -> R,
        on_invalid: impl FnOnce(&BTreeMap<K, String>),
    ) -> Option<R> {
        self.submit_count += 1;
        if self.validate() {
            Some(on_valid(self.get_values()))
        } else {
            on_invalid(&self.errors());
            None
        }
    }

    /// Attach an error reported from elsewhere (e.g. the server).
    pub fn set_error(&mut self, key: K, message: impl Into<String>) {
        if let Some(field) = self.fields.get_mut(&key) {
            field.error = Some(message.into());
        }
    }

    pub fn error(&self, key: K) -> Option<&str> {
        self.fields.get(&key).and_then(|f| f.error.as_deref())
    }

    pub fn errors(&self) -> BTreeMap<K, String> {
        self.fields
            .iter()
            .filter_map(|(key, field)| field.error.clone().map(|e| (*key, e)))
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|f| f.error.is_none())
    }

    /// Whether any field differs from its default.
    pub fn is_dirty(&self) -> bool {
        self.fields.values().any(|f| f.value != f.default)
    }

    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Bumped on every reset; used to remount inputs the DOM owns (file pickers).
    pub fn reset_count(&self) -> u32 {
        self.reset_count
    }

    /// Restore every field to its default and forget errors and submit
    /// history.
    pub fn reset(&mut self) {
        for field in self.fields.values_mut() {
            field.value = field.default.clone();
            field.error = None;
        }
        self.submit_count = 0;
        self.reset_count = self.reset_count.wrapping_add(1);
    }
}

//! Per-field values and the single-row record assembled by the form.

use std::fmt;

use crate::schema::FieldSchema;

/// Current value of one form field, tagged by the field kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Free-form text.
    Text(String),
    /// Raw text for a numeric field; parsing happens in the pipeline.
    Ranged(String),
    /// Selection borrowed from the schema's choice set.
    Choice(&'static str),
}

impl FieldValue {
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Text(text) | FieldValue::Ranged(text) => text,
            FieldValue::Choice(choice) => choice,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Live form values, one entry per schema field in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserInputRecord {
    entries: Vec<(&'static str, FieldValue)>,
}

impl UserInputRecord {
    /// Record holding every field's blank default.
    pub fn blank(schema: &FieldSchema) -> Self {
        Self {
            entries: schema
                .fields()
                .iter()
                .map(|field| (field.name, field.blank_value()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut FieldValue> {
        self.entries
            .iter_mut()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    pub(crate) fn from_entries(entries: Vec<(&'static str, FieldValue)>) -> Self {
        Self { entries }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.entries.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Read-only snapshot taken when Predict fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrozenRecord(UserInputRecord);

impl FrozenRecord {
    pub(crate) fn new(record: UserInputRecord) -> Self {
        Self(record)
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
        self.0.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.names()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

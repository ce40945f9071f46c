//! Field schema describing every column the prediction pipeline was fit on.
//!
//! Field names double as display labels and pipeline column names, so they
//! must match the training data exactly. Order only drives layout; the
//! pipeline matches columns by name.

use crate::record::FieldValue;
use crate::samples::SampleValue;

/// Choices for boolean-like availability fields.
pub const YES_NO: &[&str] = &["Yes", "No"];
/// Extracurricular activity categories.
pub const ACTIVITY_TYPES: &[&str] = &["Music", "Sports", "Debate", "Drama", "None"];
/// Highest education level reached by a parent.
pub const PARENTAL_EDUCATION_LEVELS: &[&str] = &["Primary", "Secondary", "Tertiary", "None"];
/// Gender categories present in the training data.
pub const GENDERS: &[&str] = &["Male", "Female"];
/// Subject combinations. Spellings follow the training data verbatim.
pub const SUBJECT_COMBINATIONS: &[&str] = &[
    "Theoretical Arts",
    "Applied commerce",
    "Pure Sciences",
    "Applied Sciences",
    "Theoretical commerce",
];

/// How a field is entered and what values it documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free-form text with no declared domain.
    Text,
    /// Free-form text expected to hold an integer in `min..=max`.
    ///
    /// The range is advisory; nothing rejects out-of-range input before
    /// the pipeline sees it.
    IntegerRange { min: i64, max: i64 },
    /// Single selection from a closed set. The first entry is the blank default.
    Choice(&'static [&'static str]),
}

/// One input column of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Column name; also rendered as the field label.
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDefinition {
    const fn range(name: &'static str, min: i64, max: i64) -> Self {
        Self {
            name,
            kind: FieldKind::IntegerRange { min, max },
        }
    }

    const fn choice(name: &'static str, choices: &'static [&'static str]) -> Self {
        Self {
            name,
            kind: FieldKind::Choice(choices),
        }
    }

    /// Label shown next to the input control.
    pub fn label(&self) -> String {
        format!("{}:", self.name)
    }

    /// Declared choices, or `None` for free-text fields.
    pub fn choices(&self) -> Option<&'static [&'static str]> {
        match self.kind {
            FieldKind::Choice(choices) => Some(choices),
            _ => None,
        }
    }

    /// Hint describing the expected range of a numeric field.
    pub fn range_hint(&self) -> Option<String> {
        match self.kind {
            FieldKind::IntegerRange { min, max } => Some(format!("{min}-{max}")),
            _ => None,
        }
    }

    /// Look up `candidate` in this field's choice set.
    ///
    /// Returns the schema-owned string so stored selections can never
    /// outlive or escape the declared domain.
    pub fn resolve_choice(&self, candidate: &str) -> Option<&'static str> {
        self.choices()?
            .iter()
            .copied()
            .find(|choice| *choice == candidate)
    }

    /// Value used when no sample supplies one: empty text, or the first choice.
    pub fn blank_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::IntegerRange { .. } => FieldValue::Ranged(String::new()),
            FieldKind::Choice(choices) => FieldValue::Choice(choices.first().copied().unwrap_or("")),
        }
    }

    /// Value seeded from a sample, falling back to [`Self::blank_value`].
    ///
    /// A sample choice outside the declared set is treated as absent.
    pub fn seeded_value(&self, sample: Option<&SampleValue>) -> FieldValue {
        let Some(sample) = sample else {
            return self.blank_value();
        };
        match self.kind {
            FieldKind::Text => FieldValue::Text(sample.to_string()),
            FieldKind::IntegerRange { .. } => FieldValue::Ranged(sample.to_string()),
            FieldKind::Choice(_) => self
                .resolve_choice(&sample.to_string())
                .map(FieldValue::Choice)
                .unwrap_or_else(|| self.blank_value()),
        }
    }
}

static STUDENT_FIELDS: [FieldDefinition; 18] = [
    FieldDefinition::choice("Internet Availability", YES_NO),
    FieldDefinition::choice("Access to Textbooks", YES_NO),
    FieldDefinition::range("Attendance Rate", 0, 100),
    FieldDefinition::range("Class Participation Score", 0, 100),
    FieldDefinition::range("Homework Completion Rate", 0, 100),
    FieldDefinition::range("Hours Spent on Self-study", 0, 40),
    FieldDefinition::choice("Type of Activity", ACTIVITY_TYPES),
    FieldDefinition::range("Hours per Week", 0, 40),
    FieldDefinition::choice("Parental Education Level", PARENTAL_EDUCATION_LEVELS),
    FieldDefinition::range("Household Income", 0, 1_000_000),
    FieldDefinition::range("Number of Siblings", 0, 15),
    FieldDefinition::range("Library Hours Used", 0, 40),
    FieldDefinition::range("Teacher-to-student Ratio", 1, 100),
    FieldDefinition::choice("Access to Study Materials", YES_NO),
    FieldDefinition::range("Extra Tutoring Hours", 0, 40),
    FieldDefinition::range("Age", 10, 60),
    FieldDefinition::choice("Gender", GENDERS),
    FieldDefinition::choice("Subject Combinations", SUBJECT_COMBINATIONS),
];

/// Ordered, fixed set of form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    fields: &'static [FieldDefinition],
}

impl FieldSchema {
    /// The student-performance schema the bundled pipeline expects.
    pub fn student() -> Self {
        Self {
            fields: &STUDENT_FIELDS,
        }
    }

    /// Build a schema over caller-provided definitions.
    pub fn from_static(fields: &'static [FieldDefinition]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &'static [FieldDefinition] {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.fields.iter().map(|field| field.name)
    }

    /// Left layout column: the first half of the fields.
    pub fn first_partition(&self) -> &'static [FieldDefinition] {
        &self.fields[..self.split_point()]
    }

    /// Right layout column: everything after the first half.
    pub fn second_partition(&self) -> &'static [FieldDefinition] {
        &self.fields[self.split_point()..]
    }

    fn split_point(&self) -> usize {
        self.fields.len() / 2
    }
}

impl Default for FieldSchema {
    fn default() -> Self {
        Self::student()
    }
}

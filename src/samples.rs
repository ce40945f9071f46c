//! Built-in sample records used to pre-fill the form.

use std::collections::BTreeMap;
use std::fmt;

/// A concrete sample value as it appears in the source data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleValue::Integer(value) => write!(f, "{value}"),
            SampleValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for SampleValue {
    fn from(value: i64) -> Self {
        SampleValue::Integer(value)
    }
}

impl From<&str> for SampleValue {
    fn from(value: &str) -> Self {
        SampleValue::Text(value.to_string())
    }
}

/// Field name to value mapping for one sample. Empty means "no sample".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleRecord {
    values: BTreeMap<String, SampleValue>,
}

impl SampleRecord {
    pub fn get(&self, field: &str) -> Option<&SampleValue> {
        self.values.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl<K, V> FromIterator<(K, V)> for SampleRecord
where
    K: Into<String>,
    V: Into<SampleValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Named samples in display order.
#[derive(Debug, Clone, Default)]
pub struct SampleStore {
    samples: Vec<(String, SampleRecord)>,
}

impl SampleStore {
    /// Samples bundled with the app.
    pub fn builtin() -> Self {
        Self {
            samples: vec![
                ("Sample 1".to_string(), sample_one()),
                ("Sample 2".to_string(), sample_two()),
            ],
        }
    }

    pub fn from_samples(samples: Vec<(String, SampleRecord)>) -> Self {
        Self { samples }
    }

    pub fn list_sample_names(&self) -> Vec<&str> {
        self.samples.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn get_sample(&self, name: &str) -> Option<&SampleRecord> {
        self.samples
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, record)| record)
    }

    /// Resolve a sidebar selection, yielding an empty record for "none" or
    /// an unknown name.
    pub fn sample_or_empty(&self, name: Option<&str>) -> SampleRecord {
        name.and_then(|name| self.get_sample(name))
            .cloned()
            .unwrap_or_default()
    }
}

fn n(value: i64) -> SampleValue {
    SampleValue::Integer(value)
}

fn t(text: &str) -> SampleValue {
    SampleValue::Text(text.to_string())
}

fn sample_one() -> SampleRecord {
    [
        ("Internet Availability", t("Yes")),
        ("Access to Textbooks", t("Yes")),
        ("Attendance Rate", n(83)),
        ("Class Participation Score", n(76)),
        ("Homework Completion Rate", n(87)),
        ("Hours Spent on Self-study", n(5)),
        ("Type of Activity", t("Music")),
        ("Hours per Week", n(1)),
        ("Parental Education Level", t("Secondary")),
        ("Household Income", n(141_851)),
        ("Number of Siblings", n(0)),
        ("Library Hours Used", n(4)),
        ("Teacher-to-student Ratio", n(25)),
        ("Access to Study Materials", t("Yes")),
        ("Extra Tutoring Hours", n(0)),
        ("Age", n(24)),
        ("Gender", t("Male")),
        ("Subject Combinations", t("Theoretical Arts")),
    ]
    .into_iter()
    .collect()
}

fn sample_two() -> SampleRecord {
    [
        ("Internet Availability", t("Yes")),
        ("Access to Textbooks", t("Yes")),
        ("Attendance Rate", n(80)),
        ("Class Participation Score", n(63)),
        ("Homework Completion Rate", n(69)),
        ("Hours Spent on Self-study", n(9)),
        ("Type of Activity", t("Sports")),
        ("Hours per Week", n(11)),
        ("Parental Education Level", t("Primary")),
        ("Household Income", n(209_440)),
        ("Number of Siblings", n(0)),
        ("Library Hours Used", n(9)),
        ("Teacher-to-student Ratio", n(25)),
        ("Access to Study Materials", t("Yes")),
        ("Extra Tutoring Hours", n(3)),
        ("Age", n(23)),
        ("Gender", t("Male")),
        ("Subject Combinations", t("Applied commerce")),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSchema;

    #[test]
    fn builtin_names_keep_declaration_order() {
        assert_eq!(SampleStore::builtin().list_sample_names(), vec!["Sample 1", "Sample 2"]);
    }

    #[test]
    fn every_builtin_sample_covers_the_schema() {
        let schema = FieldSchema::student();
        let store = SampleStore::builtin();
        for name in store.list_sample_names() {
            let sample = store.get_sample(name).unwrap();
            assert_eq!(sample.len(), schema.len(), "{name}");
            for field in schema.fields() {
                let value = sample
                    .get(field.name)
                    .unwrap_or_else(|| panic!("{name} missing {}", field.name));
                if let Some(choices) = field.choices() {
                    assert!(choices.contains(&value.to_string().as_str()), "{name}: {value}");
                }
            }
        }
    }

    #[test]
    fn none_and_unknown_resolve_to_empty() {
        let store = SampleStore::builtin();
        assert!(store.sample_or_empty(None).is_empty());
        assert!(store.sample_or_empty(Some("Sample 9")).is_empty());
        assert!(store.get_sample("Sample 9").is_none());
        let first = store.sample_or_empty(Some("Sample 1"));
        assert_eq!(first.get("Attendance Rate"), Some(&SampleValue::Integer(83)));
    }
}

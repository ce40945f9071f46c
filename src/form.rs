//! Input collection: binds one value per schema field and freezes the record
//! when the user asks for a prediction.

use thiserror::Error;

use crate::record::{FieldValue, FrozenRecord, UserInputRecord};
use crate::samples::SampleRecord;
use crate::schema::{FieldKind, FieldSchema};

/// Rejected form edits. The record is left untouched when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Unknown field {0:?}")]
    UnknownField(String),
    #[error("Field {field:?} takes a selection, not free text")]
    NotTextField { field: String },
    #[error("Field {field:?} does not offer choices")]
    NotChoiceField { field: String },
    #[error("{value:?} is not a valid choice for {field:?}")]
    InvalidChoice { field: String, value: String },
}

/// Owns the mutable record for one render cycle.
#[derive(Debug, Clone)]
pub struct InputCollector {
    schema: FieldSchema,
    record: UserInputRecord,
}

impl InputCollector {
    /// Collector with every field at its blank default.
    pub fn new(schema: FieldSchema) -> Self {
        Self {
            record: UserInputRecord::blank(&schema),
            schema,
        }
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Reseed every field from `sample`; absent fields get their blank default.
    pub fn seed_from(&mut self, sample: &SampleRecord) {
        let entries = self
            .schema
            .fields()
            .iter()
            .map(|field| (field.name, field.seeded_value(sample.get(field.name))))
            .collect();
        self.record = UserInputRecord::from_entries(entries);
    }

    /// Replace the text of a free-text or numeric field.
    pub fn set_text(&mut self, name: &str, text: impl Into<String>) -> Result<(), FormError> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        let value = match field.kind {
            FieldKind::Text => FieldValue::Text(text.into()),
            FieldKind::IntegerRange { .. } => FieldValue::Ranged(text.into()),
            FieldKind::Choice(_) => {
                return Err(FormError::NotTextField {
                    field: name.to_string(),
                });
            }
        };
        self.store(name, value)
    }

    /// Select a value of a choice field. Values outside the declared set are rejected.
    pub fn select_choice(&mut self, name: &str, choice: &str) -> Result<(), FormError> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        if field.choices().is_none() {
            return Err(FormError::NotChoiceField {
                field: name.to_string(),
            });
        }
        let resolved = field
            .resolve_choice(choice)
            .ok_or_else(|| FormError::InvalidChoice {
                field: name.to_string(),
                value: choice.to_string(),
            })?;
        self.store(name, FieldValue::Choice(resolved))
    }

    fn store(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        let slot = self
            .record
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        *slot = value;
        Ok(())
    }

    pub fn record(&self) -> &UserInputRecord {
        &self.record
    }

    /// Snapshot the current values for submission.
    pub fn freeze(&self) -> FrozenRecord {
        FrozenRecord::new(self.record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::samples::SampleStore;
    use proptest::prelude::*;

    #[test]
    fn seeding_from_sample_copies_every_value() {
        let store = SampleStore::builtin();
        let mut collector = InputCollector::new(FieldSchema::student());
        collector.seed_from(store.get_sample("Sample 1").unwrap());
        let record = collector.freeze();
        assert_eq!(record.get("Attendance Rate").unwrap().as_str(), "83");
        assert_eq!(record.get("Household Income").unwrap().as_str(), "141851");
        assert_eq!(
            record.get("Subject Combinations"),
            Some(&FieldValue::Choice("Theoretical Arts"))
        );
    }

    #[test]
    fn seeding_from_empty_sample_resets_to_blank() {
        let store = SampleStore::builtin();
        let schema = FieldSchema::student();
        let mut collector = InputCollector::new(schema);
        collector.seed_from(store.get_sample("Sample 2").unwrap());
        collector.seed_from(&store.sample_or_empty(None));
        assert_eq!(collector.record(), &UserInputRecord::blank(&schema));
    }

    #[test]
    fn invalid_choice_leaves_record_unchanged() {
        let mut collector = InputCollector::new(FieldSchema::student());
        let before = collector.record().clone();
        let err = collector.select_choice("Gender", "Unknown").unwrap_err();
        assert!(matches!(err, FormError::InvalidChoice { .. }));
        assert_eq!(collector.record(), &before);
    }

    #[test]
    fn text_and_choice_setters_respect_field_kind() {
        let mut collector = InputCollector::new(FieldSchema::student());
        assert!(matches!(
            collector.set_text("Gender", "Male"),
            Err(FormError::NotTextField { .. })
        ));
        assert!(matches!(
            collector.select_choice("Age", "24"),
            Err(FormError::NotChoiceField { .. })
        ));
        assert!(matches!(
            collector.set_text("Shoe Size", "9"),
            Err(FormError::UnknownField(_))
        ));
        collector.set_text("Age", "not a number").unwrap();
        assert_eq!(collector.record().get("Age").unwrap().as_str(), "not a number");
    }

    #[test]
    fn frozen_record_ignores_later_edits() {
        let mut collector = InputCollector::new(FieldSchema::student());
        collector.set_text("Age", "20").unwrap();
        let frozen = collector.freeze();
        collector.set_text("Age", "30").unwrap();
        assert_eq!(frozen.get("Age").unwrap().as_str(), "20");
    }

    fn choice_fields() -> Vec<&'static str> {
        FieldSchema::student()
            .fields()
            .iter()
            .filter(|field| field.choices().is_some())
            .map(|field| field.name)
            .collect()
    }

    proptest! {
        #[test]
        fn selections_never_escape_declared_choices(
            edits in proptest::collection::vec((0usize..7, "[A-Za-z ]{0,20}", any::<bool>()), 0..40)
        ) {
            let schema = FieldSchema::student();
            let names = choice_fields();
            let mut collector = InputCollector::new(schema);
            for (field_idx, candidate, pick_valid) in edits {
                let name = names[field_idx % names.len()];
                let choices = schema.field(name).unwrap().choices().unwrap();
                let value = if pick_valid {
                    choices[candidate.len() % choices.len()].to_string()
                } else {
                    candidate
                };
                let _ = collector.select_choice(name, &value);
            }
            let record = collector.freeze();
            prop_assert_eq!(record.len(), schema.len());
            for field in schema.fields() {
                let value = record.get(field.name).unwrap();
                if let Some(choices) = field.choices() {
                    prop_assert!(choices.contains(&value.as_str()));
                }
            }
        }
    }
}

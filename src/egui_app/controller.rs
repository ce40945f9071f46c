//! Bridges the form model, sample store and pipeline to the egui renderer.

use tracing::{info, warn};

use crate::egui_app::state::{FormPhase, StatusTone, UiState};
use crate::form::{FormError, InputCollector};
use crate::pipeline::PipelineInvoker;
use crate::record::{FieldValue, UserInputRecord};
use crate::samples::SampleStore;
use crate::schema::FieldSchema;

#[cfg(test)]
mod tests;

/// Owns the live record and drives the Idle -> Invoking -> Displaying cycle.
pub struct FormController {
    pub ui: UiState,
    samples: SampleStore,
    collector: InputCollector,
    invoker: PipelineInvoker,
}

impl FormController {
    pub fn new(schema: FieldSchema, samples: SampleStore, invoker: PipelineInvoker) -> Self {
        Self {
            ui: UiState::default(),
            samples,
            collector: InputCollector::new(schema),
            invoker,
        }
    }

    pub fn schema(&self) -> &FieldSchema {
        self.collector.schema()
    }

    pub fn sample_names(&self) -> Vec<&str> {
        self.samples.list_sample_names()
    }

    pub fn selected_sample(&self) -> Option<&str> {
        self.ui.selected_sample.as_deref()
    }

    /// Switch the pre-fill sample and reseed every field from it.
    ///
    /// `None` (or a name the store does not know) reseeds blank defaults.
    pub fn select_sample(&mut self, name: Option<&str>) {
        let sample = self.samples.sample_or_empty(name);
        let resolved = if sample.is_empty() { None } else { name };
        self.collector.seed_from(&sample);
        self.ui.selected_sample = resolved.map(str::to_string);
        self.return_to_idle();
        match resolved {
            Some(name) => self.set_status(format!("Loaded {name}"), StatusTone::Info),
            None => self.set_status("Form reset to blank values", StatusTone::Idle),
        }
    }

    pub fn field_value(&self, name: &str) -> Option<&FieldValue> {
        self.collector.record().get(name)
    }

    pub fn record(&self) -> &UserInputRecord {
        self.collector.record()
    }

    pub fn set_field_text(&mut self, name: &str, text: impl Into<String>) {
        let outcome = self.collector.set_text(name, text);
        self.after_edit(outcome);
    }

    pub fn select_field_choice(&mut self, name: &str, choice: &str) {
        let outcome = self.collector.select_choice(name, choice);
        self.after_edit(outcome);
    }

    fn after_edit(&mut self, outcome: Result<(), FormError>) {
        match outcome {
            Ok(()) => {
                if self.ui.phase != FormPhase::Idle {
                    self.return_to_idle();
                    self.set_status("Edited; press Predict for a new result", StatusTone::Idle);
                }
            }
            Err(err) => {
                warn!(error = %err, "Rejected form edit");
                self.set_status(err.to_string(), StatusTone::Warning);
            }
        }
    }

    fn return_to_idle(&mut self) {
        self.ui.phase = FormPhase::Idle;
        self.ui.result.clear();
    }

    /// Freeze the record, run the pipeline once and show the outcome.
    ///
    /// Failures are shown as-is; nothing is retried.
    pub fn predict(&mut self) {
        let record = self.collector.freeze();
        self.ui.phase = FormPhase::Invoking;
        self.set_status("Running prediction", StatusTone::Busy);
        match self.invoker.predict(&record) {
            Ok(prediction) => {
                info!(
                    label = %prediction.label,
                    confidence = ?prediction.confidence,
                    sample = ?self.ui.selected_sample,
                    "Prediction complete"
                );
                self.set_status(format!("The model predicts {}", prediction.label), StatusTone::Info);
                self.ui.result.show(prediction);
            }
            Err(err) => {
                warn!(error = %err, "Prediction failed");
                self.set_status(format!("Prediction failed: {err}"), StatusTone::Error);
                self.ui.result.show_failure(err.to_string());
            }
        }
        self.ui.phase = FormPhase::Displaying;
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text, tone);
    }
}

use super::*;
use crate::egui_app::state::ResultState;
use crate::pipeline::{ArtifactLoader, LoadError, Pipeline, PredictError, Prediction, TabularRow};
use std::sync::{Arc, Mutex};

/// Records every row it sees and labels it by attendance.
#[derive(Default)]
struct RecordingPipeline {
    rows: Mutex<Vec<TabularRow>>,
    fail_with: Option<PredictError>,
}

impl Pipeline for RecordingPipeline {
    fn columns(&self) -> Vec<String> {
        FieldSchema::student().names().map(str::to_string).collect()
    }

    fn predict(&self, row: &TabularRow) -> Result<Prediction, PredictError> {
        self.rows.lock().unwrap().push(row.clone());
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let attendance = row.get("Attendance Rate").unwrap_or_default();
        Ok(Prediction::label(format!("attendance={attendance}")))
    }
}

struct SharedLoader(Arc<RecordingPipeline>);

impl ArtifactLoader for SharedLoader {
    fn load_artifact(&self) -> Result<Arc<dyn Pipeline>, LoadError> {
        let pipeline: Arc<dyn Pipeline> = self.0.clone();
        Ok(pipeline)
    }
}

fn controller_with(pipeline: RecordingPipeline) -> (FormController, Arc<RecordingPipeline>) {
    let pipeline = Arc::new(pipeline);
    let controller = FormController::new(
        FieldSchema::student(),
        SampleStore::builtin(),
        PipelineInvoker::new(SharedLoader(Arc::clone(&pipeline))),
    );
    (controller, pipeline)
}

fn seen_rows(pipeline: &RecordingPipeline) -> Vec<TabularRow> {
    pipeline.rows.lock().unwrap().clone()
}

#[test]
fn predicting_a_sample_sends_that_sample() {
    let (mut controller, pipeline) = controller_with(RecordingPipeline::default());
    controller.select_sample(Some("Sample 1"));
    controller.predict();

    let rows = seen_rows(&pipeline);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    let sample = SampleStore::builtin().sample_or_empty(Some("Sample 1"));
    assert_eq!(row.len(), sample.len());
    for column in row.columns() {
        assert_eq!(
            row.get(column).unwrap(),
            sample.get(column).unwrap().to_string(),
            "{column}"
        );
    }
    assert_eq!(row.get("Subject Combinations"), Some("Theoretical Arts"));
    assert_eq!(controller.ui.result.label(), Some("attendance=83"));
    assert_eq!(controller.ui.phase, FormPhase::Displaying);
}

#[test]
fn predicting_without_sample_sends_blank_defaults() {
    let (mut controller, pipeline) = controller_with(RecordingPipeline::default());
    controller.select_sample(None);
    controller.predict();

    let row = seen_rows(&pipeline).remove(0);
    let schema = FieldSchema::student();
    assert_eq!(row.columns().collect::<Vec<_>>(), schema.names().collect::<Vec<_>>());
    for field in schema.fields() {
        let expected = field.choices().map(|choices| choices[0]).unwrap_or("");
        assert_eq!(row.get(field.name), Some(expected), "{}", field.name);
    }
    assert_eq!(controller.ui.result.label(), Some("attendance="));
}

#[test]
fn repeated_predictions_agree() {
    let (mut controller, pipeline) = controller_with(RecordingPipeline::default());
    controller.select_sample(Some("Sample 2"));
    controller.predict();
    let first = controller.ui.result.clone();
    controller.predict();
    assert_eq!(controller.ui.result, first);
    let rows = seen_rows(&pipeline);
    assert_eq!(rows[0], rows[1]);
}

#[test]
fn prediction_failure_is_surfaced_without_label() {
    let failure = PredictError::UnknownCategory {
        column: "Gender".into(),
        value: "Male".into(),
    };
    let (mut controller, _pipeline) = controller_with(RecordingPipeline {
        fail_with: Some(failure.clone()),
        ..Default::default()
    });
    controller.select_sample(Some("Sample 1"));
    controller.predict();

    assert_eq!(controller.ui.result.label(), None);
    assert_eq!(controller.ui.result.failure(), Some(failure.to_string().as_str()));
    assert!(controller.ui.status.text.contains(&failure.to_string()));
    assert_eq!(controller.ui.status.badge_label, "Error");
}

#[test]
fn editing_after_a_result_returns_to_idle() {
    let (mut controller, _pipeline) = controller_with(RecordingPipeline::default());
    controller.select_sample(Some("Sample 1"));
    controller.predict();
    assert!(matches!(controller.ui.result, ResultState::Label(_)));

    controller.set_field_text("Age", "30");
    assert_eq!(controller.ui.phase, FormPhase::Idle);
    assert_eq!(controller.ui.result, ResultState::Empty);
    assert_eq!(controller.field_value("Age").unwrap().as_str(), "30");
}

#[test]
fn switching_samples_clears_the_result() {
    let (mut controller, _pipeline) = controller_with(RecordingPipeline::default());
    controller.select_sample(Some("Sample 1"));
    controller.predict();
    controller.select_sample(Some("Sample 2"));
    assert_eq!(controller.ui.result, ResultState::Empty);
    assert_eq!(controller.selected_sample(), Some("Sample 2"));
    assert_eq!(controller.field_value("Attendance Rate").unwrap().as_str(), "80");
}

#[test]
fn unknown_sample_behaves_like_none() {
    let (mut controller, _pipeline) = controller_with(RecordingPipeline::default());
    controller.select_sample(Some("Sample 1"));
    controller.select_sample(Some("Sample 42"));
    assert_eq!(controller.selected_sample(), None);
    assert_eq!(
        controller.record(),
        &UserInputRecord::blank(&FieldSchema::student())
    );
}

#[test]
fn rejected_choice_keeps_value_and_warns() {
    let (mut controller, _pipeline) = controller_with(RecordingPipeline::default());
    controller.select_field_choice("Gender", "Female");
    controller.select_field_choice("Gender", "Other");
    assert_eq!(controller.field_value("Gender"), Some(&FieldValue::Choice("Female")));
    assert_eq!(controller.ui.status.badge_label, "Warning");
}

#[test]
fn nothing_is_predicted_until_asked() {
    let (mut controller, pipeline) = controller_with(RecordingPipeline::default());
    controller.select_sample(Some("Sample 1"));
    controller.set_field_text("Age", "25");
    controller.select_field_choice("Gender", "Female");
    assert!(seen_rows(&pipeline).is_empty());
    assert_eq!(controller.ui.phase, FormPhase::Idle);
}

//! UI model consumed by the egui renderer.

use egui::Color32;

use crate::egui_app::ui::style;
use crate::pipeline::Prediction;

/// Severity of the footer status message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Warning,
    Error,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Pick a sample or fill in the form, then press Predict".into(),
            badge_label: "Idle".into(),
            badge_color: style::status_badge_color(StatusTone::Idle),
        }
    }

    pub fn set(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.text = text.into();
        self.badge_label = style::status_badge_label(tone).into();
        self.badge_color = style::status_badge_color(tone);
    }
}

/// Where the form is in its edit / predict / show cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// Record is editable; no result is shown.
    #[default]
    Idle,
    /// Record is frozen and the pipeline is running.
    Invoking,
    /// A label or a failure is on screen.
    Displaying,
}

/// What the result area below the form shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResultState {
    #[default]
    Empty,
    Label(Prediction),
    /// Prediction failure surfaced verbatim.
    Failure(String),
}

impl ResultState {
    /// Replace whatever was shown with `prediction`.
    pub fn show(&mut self, prediction: Prediction) {
        *self = ResultState::Label(prediction);
    }

    pub fn show_failure(&mut self, message: impl Into<String>) {
        *self = ResultState::Failure(message.into());
    }

    pub fn clear(&mut self) {
        *self = ResultState::Empty;
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            ResultState::Label(prediction) => Some(&prediction.label),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            ResultState::Failure(message) => Some(message),
            _ => None,
        }
    }
}

/// Top-level UI model.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub phase: FormPhase,
    pub result: ResultState,
    /// Sidebar sample selection; `None` means no sample.
    pub selected_sample: Option<String>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            phase: FormPhase::Idle,
            result: ResultState::Empty,
            selected_sample: None,
        }
    }
}

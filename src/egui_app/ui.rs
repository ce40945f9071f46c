//! egui renderer for the prediction form.

pub mod style;

use eframe::egui::{self, Color32, ComboBox, Frame, RichText, TextEdit, Ui};

use crate::egui_app::controller::FormController;
use crate::egui_app::state::ResultState;
use crate::schema::{FieldDefinition, FieldKind};
use crate::settings::AppSettings;

/// Heading shown above the form.
pub const APP_HEADING: &str = "🎓 Providus College";

/// Renders the form using the controller's state.
pub struct PredictorApp {
    controller: FormController,
    input_width: f32,
    visuals_set: bool,
}

impl PredictorApp {
    pub fn new(controller: FormController, settings: &AppSettings) -> Self {
        Self {
            controller,
            input_width: settings.form.input_width,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("settings_panel")
            .resizable(false)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Settings");
                ui.add_space(8.0);
                ui.label("Select a Sample");
                let selected = self.controller.selected_sample().map(str::to_string);
                let names: Vec<String> = self
                    .controller
                    .sample_names()
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                let mut picked: Option<Option<String>> = None;
                ComboBox::from_id_salt("sample_select")
                    .selected_text(selected.clone().unwrap_or_else(|| "None".to_string()))
                    .show_ui(ui, |ui| {
                        if ui.selectable_label(selected.is_none(), "None").clicked() {
                            picked = Some(None);
                        }
                        for name in &names {
                            let is_selected = selected.as_deref() == Some(name.as_str());
                            if ui.selectable_label(is_selected, name.as_str()).clicked() {
                                picked = Some(Some(name.clone()));
                            }
                        }
                    });
                if let Some(choice) = picked
                    && choice != selected
                {
                    self.controller.select_sample(choice.as_deref());
                }
            });
    }

    fn render_status(&self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(Frame::NONE.fill(palette.bg_primary))
            .show(ctx, |ui| {
                let status = &self.controller.ui.status;
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.painter().circle_filled(
                        ui.cursor().min + egui::vec2(9.0, 11.0),
                        9.0,
                        status.badge_color,
                    );
                    ui.add_space(24.0);
                    ui.label(RichText::new(&status.badge_label).color(Color32::WHITE));
                    ui.separator();
                    ui.label(RichText::new(&status.text).color(palette.text_muted));
                });
            });
    }

    fn render_form(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading(APP_HEADING);
                ui.add_space(4.0);
                ui.label(RichText::new("Enter Input Values").size(18.0).strong());
                ui.add_space(8.0);
                let schema = *self.controller.schema();
                ui.columns(2, |columns| {
                    self.render_partition(&mut columns[0], "Features - Part 1", schema.first_partition());
                    self.render_partition(&mut columns[1], "Features - Part 2", schema.second_partition());
                });
                ui.add_space(12.0);
                if ui.button(RichText::new("Predict").strong()).clicked() {
                    self.controller.predict();
                }
                ui.add_space(12.0);
                self.render_result(ui);
            });
        });
    }

    fn render_partition(&mut self, ui: &mut Ui, title: &str, fields: &'static [FieldDefinition]) {
        ui.label(RichText::new(title).size(16.0).color(style::palette().accent_ice));
        ui.add_space(6.0);
        for field in fields {
            self.render_field(ui, field);
            ui.add_space(6.0);
        }
    }

    fn render_field(&mut self, ui: &mut Ui, field: &'static FieldDefinition) {
        ui.label(field.label());
        let current = self
            .controller
            .field_value(field.name)
            .map(|value| value.as_str().to_string())
            .unwrap_or_default();
        match field.kind {
            FieldKind::Choice(choices) => {
                let mut picked = None;
                ComboBox::from_id_salt(field.name)
                    .width(self.input_width)
                    .selected_text(current.clone())
                    .show_ui(ui, |ui| {
                        for choice in choices {
                            if ui.selectable_label(current == *choice, *choice).clicked() {
                                picked = Some(*choice);
                            }
                        }
                    });
                if let Some(choice) = picked
                    && choice != current
                {
                    self.controller.select_field_choice(field.name, choice);
                }
            }
            FieldKind::Text | FieldKind::IntegerRange { .. } => {
                let mut text = current;
                let mut edit = TextEdit::singleline(&mut text)
                    .id_salt(field.name)
                    .desired_width(self.input_width);
                if let Some(hint) = field.range_hint() {
                    edit = edit.hint_text(hint);
                }
                let response = ui.add(edit);
                let response = match field.range_hint() {
                    Some(hint) => response.on_hover_text(format!("Expected range: {hint}")),
                    None => response,
                };
                if response.changed() {
                    self.controller.set_field_text(field.name, text);
                }
            }
        }
    }

    fn render_result(&self, ui: &mut Ui) {
        match &self.controller.ui.result {
            ResultState::Empty => {}
            ResultState::Label(prediction) => {
                ui.label(RichText::new("Prediction Result").size(16.0).strong());
                ui.horizontal(|ui| {
                    ui.label("The model predicts:");
                    ui.label(
                        RichText::new(&prediction.label)
                            .strong()
                            .color(style::palette().accent_mint),
                    );
                });
                if let Some(confidence) = prediction.confidence {
                    ui.small(format!("Confidence: {:.0}%", confidence * 100.0));
                }
            }
            ResultState::Failure(message) => {
                ui.label(RichText::new("Prediction Result").size(16.0).strong());
                ui.colored_label(style::palette().warning, format!("Prediction failed: {message}"));
            }
        }
    }
}

impl eframe::App for PredictorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.render_sidebar(ctx);
        self.render_status(ctx);
        self.render_form(ctx);
    }
}

#![deny(missing_docs)]

//! Entry point for the student performance prediction form.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use prognos::egui_app::ui::PredictorApp;
use prognos::logging;
use prognos::pipeline::JsonArtifactLoader;
use prognos::settings::{self, AppSettings, WindowSettings};
use prognos::startup::{self, StartupError};

const WINDOW_TITLE: &str = "Student Performance Prediction App";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let launched = settings::load_or_default()
        .map_err(StartupError::from)
        .and_then(|settings| {
            let loader = JsonArtifactLoader::new(&settings.pipeline.path);
            startup::bootstrap(loader).map(|controller| (settings, controller))
        });

    match launched {
        Ok((settings, controller)) => {
            let app = PredictorApp::new(controller, &settings);
            eframe::run_native(
                WINDOW_TITLE,
                native_options(&settings.window),
                Box::new(move |_cc| Ok(Box::new(app))),
            )?;
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "Startup failed");
            let message = err.to_string();
            eframe::run_native(
                WINDOW_TITLE,
                native_options(&AppSettings::default().window),
                Box::new(move |_cc| Ok(Box::new(LaunchError { message }))),
            )?;
            Err(Box::new(err))
        }
    }
}

fn native_options(window: &WindowSettings) -> eframe::NativeOptions {
    let viewport = egui::ViewportBuilder::default()
        .with_title(WINDOW_TITLE)
        .with_min_inner_size([window.min_width, window.min_height])
        .with_maximized(window.maximized);
    eframe::NativeOptions {
        viewport,
        ..Default::default()
    }
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start");
                ui.label(&self.message);
            });
        });
    }
}

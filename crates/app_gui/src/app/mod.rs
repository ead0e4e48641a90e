//! Host screen that owns the photo history and opens the gallery modal.

mod history;
mod settings;

pub use settings::Settings;

use eframe::{App, Frame, egui};
use history::HistoryModal;
use history_core::{PhotoRecord, load_history};
use std::path::PathBuf;

pub struct UiApp {
    history_path: PathBuf,
    records: Vec<PhotoRecord>,
    history_visible: bool,
    history: HistoryModal,
    status: String,
}

impl UiApp {
    pub fn new(settings: &Settings, history_path: PathBuf) -> Self {
        let mut app = Self {
            history_path,
            records: Vec::new(),
            history_visible: false,
            history: HistoryModal::new(settings.form_factor),
            status: String::new(),
        };
        app.reload_history();
        app
    }

    fn reload_history(&mut self) {
        match load_history(&self.history_path) {
            Ok(rows) => {
                self.status = format!("{} photos in history", rows.len());
                self.records = rows;
            }
            Err(e) => {
                tracing::warn!("Failed to load history: {e:#}");
                self.status = format!("Could not load history: {e}");
                self.records.clear();
            }
        }
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("History").clicked() {
                    self.history_visible = true;
                }
                if ui.button("Reload").clicked() {
                    self.reload_history();
                }
                if !self.status.is_empty() {
                    ui.label(&self.status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Photo history");
            ui.label(format!("Source: {}", self.history_path.display()));
            if self.records.is_empty() {
                ui.label("No investigated photos yet");
            }
        });

        let visible = self.history_visible;
        let history_visible = &mut self.history_visible;
        self.history
            .show(ctx, visible, &self.records, || *history_visible = false);
    }
}

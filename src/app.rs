use eframe::egui;

use student_profile::config::AppConfig;
use student_profile::state::AppState;

use crate::ui::{panels, profile};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct StudentProfileApp {
    pub state: AppState,
}

impl StudentProfileApp {
    pub fn new(config: &AppConfig) -> Self {
        let mut state = AppState::default();
        if let Some(path) = &config.data_file {
            // Failures land in the status line like any other upload.
            let _ = state.open_path(path);
        }
        Self { state }
    }
}

impl eframe::App for StudentProfileApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar + upload status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: search + student list ----
        egui::SidePanel::left("selector_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: profile cards and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            profile::profile_view(ui, &self.state);
        });
    }
}

mod app;
mod fonts;
mod ui;

use std::path::PathBuf;

use app::StudentProfileApp;
use eframe::egui;
use student_profile::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::discover(std::env::args_os().nth(1).map(PathBuf::from));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "航空工程学院学生数据分析系统",
        options,
        Box::new(move |cc| {
            fonts::install_cjk_font(&cc.egui_ctx, config.font_path.as_deref());
            Ok(Box::new(StudentProfileApp::new(&config)))
        }),
    )
}

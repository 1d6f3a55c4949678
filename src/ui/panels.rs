use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use student_profile::data::columns::REQUIRED_COLUMNS;
use student_profile::data::loader::SPREADSHEET_EXTENSIONS;
use student_profile::data::profile::option_label;
use student_profile::state::{AppState, StatusMessage};
use student_profile::theme;

/// Headers listed per line in the "表头要求" menu.
const COLUMNS_PER_ROW: usize = 6;

// ---------------------------------------------------------------------------
// Left side panel – student selector
// ---------------------------------------------------------------------------

/// Render the search box, counters, student list and prev/next buttons.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("学生选择器");
    ui.separator();

    if state.table.is_none() {
        ui.label("请上传Excel文件开始分析学生数据");
        ui.label(
            RichText::new("支持学生基本信息、成绩、奖学金等多维度数据分析")
                .color(theme::hex(theme::MUTED_TEXT))
                .small(),
        );
        return;
    }

    let mut query = state.query.clone();
    ui.add(
        egui::TextEdit::singleline(&mut query)
            .hint_text("输入姓名、学号或班级进行搜索...")
            .desired_width(f32::INFINITY),
    );
    state.set_query(&query);

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("总学生数 {}", state.total_count()));
        ui.separator();
        ui.label(format!("筛选结果 {}", state.filtered_count()));
    });

    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(state.selector.has_previous(), egui::Button::new("⬅ 上一个"))
            .clicked()
        {
            state.selector.previous();
        }
        if ui
            .add_enabled(state.selector.has_next(), egui::Button::new("下一个 ➡"))
            .clicked()
        {
            state.selector.next();
        }
    });
    ui.separator();

    if state.filtered_count() == 0 {
        ui.colored_label(
            theme::hex("#d97706"),
            "未找到匹配的学生，请调整搜索条件",
        );
        return;
    }

    student_list(ui, state);
}

fn student_list(ui: &mut Ui, state: &mut AppState) {
    let labels: Vec<String> = state
        .visible_records()
        .map(|(_, rec)| option_label(rec))
        .collect();
    let selected = state.selector.current();
    let mut clicked = None;

    TableBuilder::new(ui)
        .striped(true)
        .sense(egui::Sense::click())
        .column(Column::auto())
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("#");
            });
            header.col(|ui: &mut Ui| {
                ui.strong("姓名 - 学号");
            });
        })
        .body(|body| {
            body.rows(20.0, labels.len(), |mut row| {
                let pos = row.index();
                row.set_selected(selected == Some(pos));
                row.col(|ui: &mut Ui| {
                    ui.label((pos + 1).to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(labels[pos].as_str());
                });
                if row.response().clicked() {
                    clicked = Some(pos);
                }
            });
        });

    if let Some(pos) = clicked {
        state.selector.select(pos);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("文件", |ui: &mut Ui| {
            if ui.button("打开…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.menu_button("表头要求", |ui: &mut Ui| {
            ui.label("请确保上传的 Excel 文件包含以下列（表头名称需完全一致）：");
            ui.separator();
            for chunk in REQUIRED_COLUMNS.chunks(COLUMNS_PER_ROW) {
                ui.label(chunk.join("，"));
            }
        });

        ui.separator();

        match &state.status_message {
            Some(StatusMessage::Success(msg)) => {
                ui.label(RichText::new(msg).color(theme::hex("#16a34a")));
            }
            Some(StatusMessage::Error(msg)) => {
                ui.label(RichText::new(msg).color(theme::hex("#dc2626")));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("选择Excel文件上传学生数据")
        .add_filter("Excel", &["xlsx", "xls"])
        .add_filter("Spreadsheets", SPREADSHEET_EXTENSIONS)
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        // Outcome is reported through `state.status_message`.
        let _ = state.open_path(&path);
    }
}

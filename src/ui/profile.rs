use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use student_profile::data::normalize::COMPETENCY_AXES;
use student_profile::data::profile::{Badge, BadgeTone, HelpStatus, StudentProfile};
use student_profile::state::AppState;
use student_profile::theme;

use super::plot;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Render the selected student's profile, or a welcome/empty notice.
pub fn profile_view(ui: &mut Ui, state: &AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("欢迎使用学生数据分析系统\n请上传Excel文件开始分析学生数据  (文件 → 打开…)");
        });
        return;
    }

    let Some(record) = state.selected_record() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("未找到匹配的学生，请调整搜索条件");
        });
        return;
    };
    let profile = StudentProfile::build(record);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            card(ui, "个人信息", |ui| personal_info(ui, &profile));
            card(ui, "帮助需求", |ui| help_card(ui, &profile.help));
            card(ui, "心理评测等级", |ui| {
                ui.horizontal(|ui: &mut Ui| {
                    ui.label("心理评测等级：");
                    badge_pill(ui, &profile.psych.level, profile.psych.tone);
                });
                ui.label(profile.psych.description);
            });
            card(ui, "贫困等级", |ui| badge_rows(ui, "hardship", &profile.hardship));
            card(ui, "奖学金信息", |ui| {
                badge_rows(ui, "scholarships", &profile.scholarships)
            });
            card(ui, "综合素质雷达图", |ui| competency_card(ui, &profile));
            card(ui, "学业成绩分析", |ui| study_card(ui, &profile));
        });
}

fn card(ui: &mut Ui, title: &str, body: impl FnOnce(&mut Ui)) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.heading(title);
        ui.separator();
        body(ui);
    });
    ui.add_space(8.0);
}

fn badge_pill(ui: &mut Ui, text: &str, tone: BadgeTone) {
    let (fg, bg) = theme::badge_colors(tone);
    ui.label(RichText::new(format!(" {text} ")).strong().color(fg).background_color(bg));
}

fn badge_rows(ui: &mut Ui, id: &str, badges: &[Badge]) {
    egui::Grid::new(id)
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            for badge in badges {
                ui.label(format!("{}：", badge.label));
                badge_pill(ui, &badge.value, badge.tone);
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

fn personal_info(ui: &mut Ui, profile: &StudentProfile) {
    let muted = theme::hex(theme::MUTED_TEXT);
    egui::Grid::new("personal_info")
        .num_columns(4)
        .striped(true)
        .spacing([24.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            for pair in profile.personal_info.chunks(2) {
                for (label, value) in pair {
                    ui.label(RichText::new(format!("{label}：")).color(muted));
                    ui.label(RichText::new(value).strong());
                }
                ui.end_row();
            }
        });
}

fn help_card(ui: &mut Ui, help: &HelpStatus) {
    match help {
        HelpStatus::NotNeeded => {
            badge_pill(ui, "无需帮助", BadgeTone::NoHelp);
        }
        HelpStatus::Needed {
            details,
            psych_state,
        } => {
            let (fg, _) = theme::badge_colors(BadgeTone::Help);
            badge_pill(ui, "需要帮助", BadgeTone::Help);
            ui.label(RichText::new(format!("困难详情: {details}")).color(fg));
            ui.label(
                RichText::new(format!("心理状态: {psych_state}"))
                    .color(theme::hex(theme::MUTED_TEXT))
                    .small(),
            );
        }
    }
}

fn competency_card(ui: &mut Ui, profile: &StudentProfile) {
    plot::radar_chart(ui, &profile.competency);

    let accent = theme::hex(theme::ACCENT);
    let metric = |ui: &mut Ui, label: &str, value: &str| {
        ui.vertical_centered(|ui: &mut Ui| {
            ui.strong(label);
            ui.label(RichText::new(value).color(accent).size(18.0).strong());
        });
    };

    // Left: moral / academic / bonus.  Right: physical score / grade / total.
    let by_label = |label: &str| {
        profile
            .competency
            .iter()
            .find(|c| c.label == label)
            .map_or_else(String::new, |c| c.text.clone())
    };
    ui.columns(2, |cols: &mut [Ui]| {
        metric(&mut cols[0], "第一学年德育", &by_label("第一学年德育"));
        metric(&mut cols[0], "第一学年智育", &by_label("第一学年智育"));
        metric(&mut cols[0], "第一学年附加分", &by_label("第一学年附加分"));
        metric(&mut cols[1], "第一学年体测成绩", &by_label("第一学年体测"));
        metric(&mut cols[1], "第一学年体测等级", &profile.physical_grade);
        metric(&mut cols[1], "第一学年综测总分", &by_label("第一学年总分"));
    });

    egui::CollapsingHeader::new("雷达图评分归一化细则")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.label("雷达图中的各项评分均已通过以下方式进行归一化处理，以便在统一的0-100范围内进行比较：");
            ui.label(RichText::new("各维度具体归一化参数 (预设最小值 / 预设最大值)：").strong());
            for axis in &COMPETENCY_AXES {
                ui.label(format!(
                    "• {}: {} / {}",
                    axis.label,
                    axis.range.min(),
                    axis.range.max()
                ));
            }
        });
}

fn study_card(ui: &mut Ui, profile: &StudentProfile) {
    let gpa_color = theme::hex(theme::GPA_LINE);
    if profile.gpa.points.is_empty() {
        ui.label("暂无绩点数据");
    } else {
        plot::gpa_chart(ui, &profile.gpa);
        ui.horizontal(|ui: &mut Ui| {
            for point in &profile.gpa.points {
                gpa_metric(ui, &point.semester, point.gpa, gpa_color);
            }
            if let Some(avg) = profile.gpa.average() {
                gpa_metric(ui, "平均绩点", avg, gpa_color);
            }
        });
    }
    ui.separator();
    badge_rows(ui, "study_items", &profile.study);
}

fn gpa_metric(ui: &mut Ui, label: &str, gpa: f64, color: Color32) {
    ui.vertical(|ui: &mut Ui| {
        ui.strong(label);
        ui.label(RichText::new(format!("{gpa:.2}")).color(color).size(22.0).strong());
    });
    ui.add_space(16.0);
}

//! Render-ready view of one student: every decision the profile page makes
//! (which badge colour, which text, which chart points) happens here, so the
//! UI only lays things out.

use super::columns;
use super::model::{CellValue, StudentRecord};
use super::normalize::{COMPETENCY_AXES, display_value, normalize};
use super::resolve::{AliasGroup, PLACEHOLDER, format_value};

/// CET-4/CET-6 score at which the exam counts as passed.
pub const CET_PASS_SCORE: f64 = 425.0;

/// Colour family of a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    /// Needs attention.
    Help,
    /// Explicitly fine.
    NoHelp,
    Scholarship,
    None,
    Psych3,
    Psych2,
    Psych1,
}

/// A labelled value rendered as a coloured pill.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub label: String,
    pub value: String,
    pub tone: BadgeTone,
}

impl Badge {
    fn new(label: &str, value: String, tone: BadgeTone) -> Self {
        Self {
            label: label.to_string(),
            value,
            tone,
        }
    }

    /// Highlighted with `tone` when there is a value, grey otherwise.
    fn when_present(label: &str, value: String, tone: BadgeTone) -> Self {
        let tone = if value == PLACEHOLDER { BadgeTone::None } else { tone };
        Self::new(label, value, tone)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HelpStatus {
    NotNeeded,
    Needed { details: String, psych_state: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PsychAssessment {
    pub level: String,
    pub tone: BadgeTone,
    pub description: &'static str,
}

/// One radar spoke after scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetencyScore {
    pub label: &'static str,
    /// 0–100.
    pub score: f64,
    /// Raw figure, 0 when absent.
    pub actual: f64,
    pub text: String,
}

impl CompetencyScore {
    /// Radar vertex caption: label, normalized score, raw figure.
    pub fn caption(&self) -> String {
        format!(
            "{}\n{:.0} ({})",
            self.label,
            self.score,
            CellValue::Float(self.actual)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GpaPoint {
    pub semester: String,
    pub gpa: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GpaTrend {
    pub points: Vec<GpaPoint>,
}

impl GpaTrend {
    /// Mean of the recorded semesters; `None` when nothing was recorded.
    pub fn average(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points.iter().map(|p| p.gpa).sum::<f64>() / self.points.len() as f64)
    }

    /// `(x labels, y values)` for the line chart.
    pub fn series(&self) -> (Vec<String>, Vec<f64>) {
        self.points
            .iter()
            .map(|p| (p.semester.clone(), p.gpa))
            .unzip()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StudentProfile {
    /// Selector entry, `姓名 - 学号`.
    pub title: String,
    pub personal_info: Vec<(String, String)>,
    pub help: HelpStatus,
    pub psych: PsychAssessment,
    pub hardship: Vec<Badge>,
    pub scholarships: Vec<Badge>,
    pub competency: Vec<CompetencyScore>,
    pub physical_grade: String,
    pub gpa: GpaTrend,
    pub study: Vec<Badge>,
}

impl StudentProfile {
    pub fn build(record: &StudentRecord) -> Self {
        Self {
            title: option_label(record),
            personal_info: columns::PERSONAL_INFO
                .iter()
                .map(|(label, group)| (label.to_string(), group.text(record)))
                .collect(),
            help: help_status(record),
            psych: psych_assessment(record),
            hardship: columns::HARDSHIP_LEVELS
                .iter()
                .map(|col| {
                    let value = AliasGroup::new(std::slice::from_ref(col)).text(record);
                    Badge::when_present(col, value, BadgeTone::Help)
                })
                .collect(),
            scholarships: [
                ("人民奖学金", columns::PEOPLE_SCHOLARSHIP),
                ("助学奖学金", columns::AID_SCHOLARSHIP),
                ("助学金", columns::GRANT),
                ("获得奖项", columns::AWARDS),
            ]
            .into_iter()
            .map(|(label, group)| {
                Badge::when_present(label, group.text(record), BadgeTone::Scholarship)
            })
            .collect(),
            competency: competency_scores(record),
            physical_grade: columns::PHYSICAL_GRADE.text(record),
            gpa: gpa_trend(record),
            study: study_items(record),
        }
    }
}

/// `姓名 - 学号`, used by the selector list.
pub fn option_label(record: &StudentRecord) -> String {
    format!(
        "{} - {}",
        format_value(record.get(columns::NAME)),
        format_value(record.get(columns::STUDENT_ID))
    )
}

fn help_status(record: &StudentRecord) -> HelpStatus {
    let needed = columns::HELP_NEEDED.resolve(record).is_some_and(|v| {
        !v.is_falsy() && !matches!(v.to_string().to_lowercase().as_str(), "无" | "nan" | "none" | "")
    });

    if !needed {
        return HelpStatus::NotNeeded;
    }
    HelpStatus::Needed {
        details: text_or(record, columns::HELP_DETAILS, "未详述"),
        psych_state: text_or(record, columns::PSYCH_LEVEL, "未评估"),
    }
}

/// `absent` only when the sheet has none of the group's columns; a present
/// but blank cell still renders as [`PLACEHOLDER`].
fn text_or(record: &StudentRecord, group: AliasGroup, absent: &str) -> String {
    if group.columns().iter().any(|col| record.has_column(col)) {
        group.text(record)
    } else {
        absent.to_string()
    }
}

fn psych_assessment(record: &StudentRecord) -> PsychAssessment {
    let level = columns::PSYCH_LEVEL.text(record);
    let (tone, description) = match level.as_str() {
        "3级" | "3" | "III级" | "III" | "三级" => (BadgeTone::Psych3, "心理健康状况良好，正常"),
        "2级" | "2" | "II级" | "II" | "二级" => (BadgeTone::Psych2, "存在轻微心理问题，建议关注"),
        "1级" | "1" | "I级" | "I" | "一级" => (BadgeTone::Psych1, "存在严重心理问题，需要专业帮助"),
        _ => (BadgeTone::None, "暂无心理评测数据"),
    };
    PsychAssessment {
        level,
        tone,
        description,
    }
}

fn competency_scores(record: &StudentRecord) -> Vec<CompetencyScore> {
    COMPETENCY_AXES
        .iter()
        .map(|axis| {
            let raw = axis.source.resolve(record);
            CompetencyScore {
                label: axis.label,
                score: normalize(raw, axis.range),
                actual: display_value(raw),
                text: format_value(raw),
            }
        })
        .collect()
}

/// Semesters with a usable GPA, in order. Blank or non-numeric semesters are
/// left out rather than plotted as zero.
pub fn gpa_trend(record: &StudentRecord) -> GpaTrend {
    let points = columns::GPA_SEMESTERS
        .iter()
        .filter_map(|col| {
            let gpa = record.get(col)?.as_f64()?;
            Some(GpaPoint {
                semester: col.replace("绩点", ""),
                gpa,
            })
        })
        .collect();
    GpaTrend { points }
}

fn study_items(record: &StudentRecord) -> Vec<Badge> {
    let cet = |label: &str, group: AliasGroup| {
        let value = group.text(record);
        let tone = if cet_passed(&value) {
            BadgeTone::NoHelp
        } else {
            BadgeTone::Help
        };
        Badge::new(label, value, tone)
    };

    let failed = columns::FAILED_COURSES.text(record);
    let failed_tone = if failed == PLACEHOLDER || failed == "0" {
        BadgeTone::None
    } else {
        BadgeTone::Help
    };

    vec![
        cet("是否过四级", columns::CET4),
        cet("是否过六级", columns::CET6),
        Badge::new("挂科次数", failed, failed_tone),
        Badge::when_present("所获学分", columns::CREDITS.text(record), BadgeTone::Scholarship),
    ]
}

/// A score column passes at [`CET_PASS_SCORE`]; a yes/no column passes on
/// an affirmative answer.
fn cet_passed(value: &str) -> bool {
    if value == PLACEHOLDER {
        return false;
    }
    match value.trim().parse::<f64>() {
        Ok(score) => score >= CET_PASS_SCORE,
        Err(_) => matches!(
            value.to_lowercase().as_str(),
            "是" | "yes" | "true" | "pass" | "通过"
        ),
    }
}

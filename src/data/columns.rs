//! Column names of the student sheet and the alias groups that map current
//! and legacy header spellings onto one logical field.
//!
//! Headers must match the sheet byte for byte; nothing here is trimmed or
//! case-folded.

use super::resolve::AliasGroup;

/// Headers every uploaded sheet must carry.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "序号",
    "学号",
    "姓名",
    "原班级",
    "新班级",
    "原专业",
    "分流专业",
    "辅导员",
    "政治面貌",
    "入团申请书编号",
    "是否递交入党申请书",
    "是否积极分子",
    "民族",
    "性别",
    "是否过四级",
    "是否过六级",
    "第一学期绩点",
    "第二学期绩点",
    "第三学期绩点",
    "第一学年德育",
    "第一学年智育",
    "第一学年附加分",
    "第一学年体测成绩",
    "第一学年体测评级",
    "第一学年综测总分",
    "心理评测等级",
    "第一学年困难等级",
    "第二学年困难等级",
    "有无需要学院协助解决的困难",
    "有何困难",
    "去年困难生",
    "今年困难生",
    "挂科",
    "所获学分",
    "奖项",
    "人民奖学金",
    "助学奖学金",
    "助学金",
];

pub const NAME: &str = "姓名";
pub const STUDENT_ID: &str = "学号";

/// Semester GPA columns in chronological order.
pub const GPA_SEMESTERS: &[&str] = &["第一学期绩点", "第二学期绩点", "第三学期绩点"];

// -- Identity --

pub const NEW_CLASS: AliasGroup = AliasGroup::new(&[
    "新班级",
    "班级_基本信息",
    "班 级_基本信息",
    "班级",
    "班 级",
]);
pub const ORIGINAL_CLASS: AliasGroup = AliasGroup::new(&["原班级", "班级"]);
/// Class columns consulted by the search box.
pub const CLASS_SEARCH: AliasGroup =
    AliasGroup::new(&["班级", "班级_基本信息", "班 级", "班 级_基本信息"]);

// -- Wellbeing --

pub const HELP_NEEDED: AliasGroup = AliasGroup::new(&["有无需要学院协助解决的困难"]);
pub const HELP_DETAILS: AliasGroup = AliasGroup::new(&["有何困难"]);
pub const PSYCH_LEVEL: AliasGroup = AliasGroup::new(&["心理评测等级", "最新心理等级", "心理等级"]);
pub const HARDSHIP_LEVELS: &[&str] = &["第一学年困难等级", "第二学年困难等级"];

// -- Awards --

pub const PEOPLE_SCHOLARSHIP: AliasGroup = AliasGroup::new(&["人民奖学金"]);
pub const AID_SCHOLARSHIP: AliasGroup = AliasGroup::new(&["助学奖学金"]);
/// A second `助学金` header is loaded as `助学金.1`.
pub const GRANT: AliasGroup = AliasGroup::new(&["助学金", "助学金.1"]);
pub const AWARDS: AliasGroup = AliasGroup::new(&["奖项"]);

// -- Comprehensive assessment --

pub const MORAL: AliasGroup = AliasGroup::new(&["第一学年德育", "德育"]);
pub const ACADEMIC: AliasGroup = AliasGroup::new(&["第一学年智育", "智育"]);
pub const PHYSICAL_SCORE: AliasGroup = AliasGroup::new(&["第一学年体测成绩", "体测成绩"]);
pub const PHYSICAL_GRADE: AliasGroup = AliasGroup::new(&["第一学年体测评级", "体测等级"]);
pub const BONUS: AliasGroup = AliasGroup::new(&["第一学年附加分", "附加分", "23-24附加分"]);
pub const COMPOSITE: AliasGroup =
    AliasGroup::new(&["第一学年综测总分", "第一学年总分", "测评总分"]);

// -- Study --

pub const CET4: AliasGroup = AliasGroup::new(&["是否过四级", "四级成绩"]);
pub const CET6: AliasGroup = AliasGroup::new(&["是否过六级", "六级成绩"]);
pub const FAILED_COURSES: AliasGroup = AliasGroup::new(&["挂科"]);
pub const CREDITS: AliasGroup = AliasGroup::new(&["所获学分"]);

/// Personal-info card rows: (label, source columns).
pub const PERSONAL_INFO: &[(&str, AliasGroup)] = &[
    ("姓名", AliasGroup::new(&[NAME])),
    ("学号", AliasGroup::new(&[STUDENT_ID])),
    ("分流专业", AliasGroup::new(&["分流专业"])),
    ("原专业", AliasGroup::new(&["原专业"])),
    ("新班级", NEW_CLASS),
    ("原班级", ORIGINAL_CLASS),
    ("辅导员", AliasGroup::new(&["辅导员"])),
    ("政治面貌", AliasGroup::new(&["政治面貌"])),
    ("民族", AliasGroup::new(&["民族"])),
    ("性别", AliasGroup::new(&["性别"])),
    ("是否积极分子", AliasGroup::new(&["是否积极分子"])),
    ("是否递交入党申请书", AliasGroup::new(&["是否递交入党申请书"])),
];

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn required_columns_are_unique() {
        let unique: BTreeSet<_> = REQUIRED_COLUMNS.iter().collect();
        assert_eq!(unique.len(), REQUIRED_COLUMNS.len());
    }

    #[test]
    fn gpa_columns_are_required() {
        for col in GPA_SEMESTERS {
            assert!(REQUIRED_COLUMNS.contains(col), "{col}");
        }
    }
}

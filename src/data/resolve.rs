use super::model::{CellValue, StudentRecord};

/// Text shown wherever a field has no usable value.
pub const PLACEHOLDER: &str = "无";

// ---------------------------------------------------------------------------
// AliasGroup – ordered fallback over header spellings
// ---------------------------------------------------------------------------

/// Ordered list of interchangeable column names for one logical field.
/// Earlier names win: sheets are migrated to the newer header over time, and
/// the older spelling stays as a fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliasGroup(&'static [&'static str]);

impl AliasGroup {
    pub const fn new(columns: &'static [&'static str]) -> Self {
        Self(columns)
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.0
    }

    /// First present, non-null cell among the candidates.
    pub fn resolve<'r>(&self, record: &'r StudentRecord) -> Option<&'r CellValue> {
        resolve(record, self.0)
    }

    /// Display text of the resolved cell, or [`PLACEHOLDER`].
    pub fn text(&self, record: &StudentRecord) -> String {
        format_value(self.resolve(record))
    }
}

/// Try each candidate column in order and return the first cell that exists
/// and holds a value.
pub fn resolve<'r>(record: &'r StudentRecord, candidates: &[&str]) -> Option<&'r CellValue> {
    candidates
        .iter()
        .filter_map(|col| record.get(col))
        .find(|value| !value.is_null())
}

/// Render a cell for display, collapsing every flavour of "nothing"
/// (null, NaN, the literal strings `nan`/`none`, empty text) to [`PLACEHOLDER`].
pub fn format_value(value: Option<&CellValue>) -> String {
    match value {
        Some(v) if !v.is_null() => {
            let text = v.to_string();
            match text.to_lowercase().as_str() {
                "" | "nan" | "none" => PLACEHOLDER.to_string(),
                _ => text,
            }
        }
        _ => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEW_OR_OLD: AliasGroup = AliasGroup::new(&["A", "B"]);

    fn record(a: CellValue, b: CellValue) -> StudentRecord {
        [("A", a), ("B", b)].into_iter().collect()
    }

    #[test]
    fn first_alias_wins_when_present() {
        let rec = record(CellValue::from("new"), CellValue::from("old"));
        assert_eq!(NEW_OR_OLD.resolve(&rec), Some(&CellValue::from("new")));

        let rec = record(CellValue::from("new"), CellValue::Null);
        assert_eq!(NEW_OR_OLD.resolve(&rec), Some(&CellValue::from("new")));
    }

    #[test]
    fn falls_back_to_later_alias() {
        let rec = record(CellValue::Null, CellValue::from("old"));
        assert_eq!(NEW_OR_OLD.resolve(&rec), Some(&CellValue::from("old")));

        let rec: StudentRecord = [("B", CellValue::Integer(2))].into_iter().collect();
        assert_eq!(NEW_OR_OLD.resolve(&rec), Some(&CellValue::Integer(2)));
    }

    #[test]
    fn nan_is_skipped_like_null() {
        let rec = record(CellValue::Float(f64::NAN), CellValue::Float(1.5));
        assert_eq!(NEW_OR_OLD.resolve(&rec), Some(&CellValue::Float(1.5)));
    }

    #[test]
    fn none_when_every_alias_is_empty() {
        let rec = record(CellValue::Null, CellValue::Null);
        assert_eq!(NEW_OR_OLD.resolve(&rec), None);
        assert_eq!(NEW_OR_OLD.text(&rec), PLACEHOLDER);
        assert_eq!(NEW_OR_OLD.resolve(&StudentRecord::default()), None);
    }

    #[test]
    fn placeholder_for_textual_nothing() {
        assert_eq!(format_value(Some(&CellValue::from("NaN"))), PLACEHOLDER);
        assert_eq!(format_value(Some(&CellValue::from("None"))), PLACEHOLDER);
        assert_eq!(format_value(Some(&CellValue::from(""))), PLACEHOLDER);
        assert_eq!(format_value(None), PLACEHOLDER);
        assert_eq!(format_value(Some(&CellValue::from("张三"))), "张三");
        assert_eq!(format_value(Some(&CellValue::Float(85.0))), "85");
    }
}

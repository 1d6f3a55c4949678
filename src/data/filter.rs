use super::columns;
use super::model::{StudentRecord, StudentTable};
use super::resolve::AliasGroup;

// ---------------------------------------------------------------------------
// Field predicates
// ---------------------------------------------------------------------------

/// A single "does this field contain the query" test.
#[derive(Debug, Clone, Copy)]
pub enum FieldPredicate {
    /// One named column.
    Column(&'static str),
    /// Every column of the group that the record carries; any hit counts.
    AnyOf(AliasGroup),
}

impl FieldPredicate {
    /// `needle` must already be lower-cased.
    fn matches(&self, record: &StudentRecord, needle: &str) -> bool {
        match self {
            FieldPredicate::Column(col) => cell_contains(record, col, needle),
            FieldPredicate::AnyOf(group) => group
                .columns()
                .iter()
                .any(|col| cell_contains(record, col, needle)),
        }
    }
}

fn cell_contains(record: &StudentRecord, column: &str, needle: &str) -> bool {
    match record.get(column) {
        Some(value) if !value.is_null() => value.to_string().to_lowercase().contains(needle),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// SearchMatcher – OR over field predicates
// ---------------------------------------------------------------------------

/// Free-text search: a record matches when any predicate finds the query as
/// a case-insensitive substring.
#[derive(Debug, Clone)]
pub struct SearchMatcher {
    predicates: Vec<FieldPredicate>,
}

impl Default for SearchMatcher {
    /// Name, student ID, and the class columns.
    fn default() -> Self {
        Self::new(vec![
            FieldPredicate::Column(columns::NAME),
            FieldPredicate::Column(columns::STUDENT_ID),
            FieldPredicate::AnyOf(columns::CLASS_SEARCH),
        ])
    }
}

impl SearchMatcher {
    pub fn new(predicates: Vec<FieldPredicate>) -> Self {
        Self { predicates }
    }

    /// An empty query matches every record.
    pub fn matches(&self, record: &StudentRecord, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.predicates.iter().any(|p| p.matches(record, &needle))
    }

    /// Indices of the records passing `query`, in table order.
    pub fn filtered_indices(&self, table: &StudentTable, query: &str) -> Vec<usize> {
        table
            .records
            .iter()
            .enumerate()
            .filter(|(_, rec)| self.matches(rec, query))
            .map(|(i, _)| i)
            .collect()
    }
}

/// [`SearchMatcher::matches`] with the default field set.
pub fn matches(record: &StudentRecord, query: &str) -> bool {
    SearchMatcher::default().matches(record, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn zhang_san() -> StudentRecord {
        [
            ("姓名", CellValue::from("张三")),
            ("学号", CellValue::from("1001")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(matches(&zhang_san(), ""));
        assert!(matches(&StudentRecord::default(), ""));
    }

    #[test]
    fn name_and_id_substrings() {
        let rec = zhang_san();
        assert!(matches(&rec, "张三"));
        assert!(matches(&rec, "张"));
        assert!(matches(&rec, "100"));
        assert!(!matches(&rec, "李四"));
    }

    #[test]
    fn matching_ignores_case() {
        let rec: StudentRecord = [("姓名", CellValue::from("Alice Wang"))].into_iter().collect();
        assert!(matches(&rec, "alice"));
        assert!(matches(&rec, "WANG"));
    }

    #[test]
    fn numeric_ids_match_their_display_text() {
        let rec: StudentRecord = [("学号", CellValue::Float(2023001.0))].into_iter().collect();
        assert!(matches(&rec, "2023001"));
        assert!(!matches(&rec, ".0"));
    }

    #[test]
    fn any_class_alias_can_match() {
        let rec: StudentRecord = [
            ("姓名", CellValue::from("李四")),
            ("班级", CellValue::Null),
            ("班 级_基本信息", CellValue::from("飞行器2301")),
        ]
        .into_iter()
        .collect();
        assert!(matches(&rec, "2301"));
        assert!(!matches(&rec, "2302"));
    }

    #[test]
    fn null_fields_never_match() {
        let rec: StudentRecord = [
            ("姓名", CellValue::Null),
            ("学号", CellValue::Float(f64::NAN)),
        ]
        .into_iter()
        .collect();
        assert!(!matches(&rec, "nan"));
        assert!(!matches(&rec, "无"));
    }

    #[test]
    fn filtered_indices_keep_table_order() {
        let rows: Vec<StudentRecord> = ["1001", "1002", "2002"]
            .into_iter()
            .map(|id| [("学号", CellValue::from(id))].into_iter().collect::<StudentRecord>())
            .collect();
        let table = StudentTable::new(vec!["学号".to_string()], rows);
        let matcher = SearchMatcher::default();
        assert_eq!(matcher.filtered_indices(&table, "002"), vec![1, 2]);
        assert_eq!(matcher.filtered_indices(&table, ""), vec![0, 1, 2]);
        assert!(matcher.filtered_indices(&table, "9").is_empty());
    }
}

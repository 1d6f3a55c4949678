use std::path::Path;

use thiserror::Error;

use crate::data::columns::REQUIRED_COLUMNS;
use crate::data::filter::SearchMatcher;
use crate::data::loader;
use crate::data::model::{StudentRecord, StudentTable};
use crate::data::schema::{self, SchemaError};

// ---------------------------------------------------------------------------
// Upload errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("文件读取或处理失败: {0:#}")]
    Parse(anyhow::Error),
    #[error("Excel文件校验失败：{0}")]
    Schema(#[from] SchemaError),
}

/// What the status line shows after the last action.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Success(String),
    Error(String),
}

/// Parse outcome checked against the required headers.
fn validated(parsed: anyhow::Result<StudentTable>) -> Result<StudentTable, UploadError> {
    let table = parsed.map_err(UploadError::Parse)?;
    schema::validate(&table.columns, REQUIRED_COLUMNS)?;
    Ok(table)
}

// ---------------------------------------------------------------------------
// Record selector
// ---------------------------------------------------------------------------

/// Cursor into the filtered rows, always within `[0, count - 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecordSelector {
    index: usize,
    count: usize,
}

impl RecordSelector {
    pub fn new(count: usize) -> Self {
        Self { index: 0, count }
    }

    /// Selected position, `None` when there is nothing to select.
    pub fn current(&self) -> Option<usize> {
        (self.count > 0).then_some(self.index)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.count
    }

    pub fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn next(&mut self) {
        if self.has_next() {
            self.index += 1;
        }
    }

    pub fn select(&mut self, index: usize) {
        self.index = index.min(self.count.saturating_sub(1));
    }

    /// The filtered set changed: start over at the first row.
    pub fn reset(&mut self, count: usize) {
        *self = Self::new(count);
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Default)]
pub struct AppState {
    /// Loaded sheet (None until a file passes validation).
    pub table: Option<StudentTable>,

    /// Current search box contents.
    pub query: String,

    /// Row indices (into `table`) passing the current query.
    pub visible_indices: Vec<usize>,

    /// Position within `visible_indices`.
    pub selector: RecordSelector,

    /// Outcome of the last upload.
    pub status_message: Option<StatusMessage>,

    matcher: SearchMatcher,
}

impl AppState {
    /// Parse, validate, and on success replace the current table.
    /// On any failure the previous table, query and selection stay as they were.
    pub fn upload(&mut self, bytes: &[u8], filename: &str) -> Result<usize, UploadError> {
        let result = validated(loader::parse_bytes(bytes, filename));
        self.finish_upload(filename, result)
    }

    /// [`AppState::upload`] for a file on disk.
    pub fn open_path(&mut self, path: &Path) -> Result<usize, UploadError> {
        let filename = path.display().to_string();
        let result = validated(loader::load_file(path));
        self.finish_upload(&filename, result)
    }

    fn finish_upload(
        &mut self,
        source: &str,
        result: Result<StudentTable, UploadError>,
    ) -> Result<usize, UploadError> {
        match result {
            Ok(table) => {
                let rows = table.len();
                log::info!(
                    "Loaded {rows} students with {} columns from {source}",
                    table.columns.len()
                );
                self.set_table(table);
                self.status_message = Some(StatusMessage::Success(format!(
                    "成功加载 {rows} 名学生的数据，表头校验通过。"
                )));
                Ok(rows)
            }
            Err(e) => {
                log::error!("Rejected {source}: {e}");
                self.status_message = Some(StatusMessage::Error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Install a validated table and clear the search.
    pub fn set_table(&mut self, table: StudentTable) {
        self.query.clear();
        self.visible_indices = (0..table.len()).collect();
        self.selector.reset(self.visible_indices.len());
        self.table = Some(table);
    }

    /// Update the query and recompute the visible rows.
    pub fn set_query(&mut self, query: &str) {
        if self.query == query {
            return;
        }
        self.query = query.to_string();
        self.refilter();
    }

    /// Recompute `visible_indices` after a query change.
    pub fn refilter(&mut self) {
        if let Some(table) = &self.table {
            self.visible_indices = self.matcher.filtered_indices(table, &self.query);
            log::debug!(
                "query {:?} matched {} of {} students",
                self.query,
                self.visible_indices.len(),
                table.len()
            );
        }
        self.selector.reset(self.visible_indices.len());
    }

    pub fn total_count(&self) -> usize {
        self.table.as_ref().map_or(0, StudentTable::len)
    }

    pub fn filtered_count(&self) -> usize {
        self.visible_indices.len()
    }

    /// The record under the selector, if any.
    pub fn selected_record(&self) -> Option<&StudentRecord> {
        let pos = self.selector.current()?;
        let row = *self.visible_indices.get(pos)?;
        self.table.as_ref()?.record(row)
    }

    /// Iterate `(position in filtered list, record)`.
    pub fn visible_records(&self) -> impl Iterator<Item = (usize, &StudentRecord)> + '_ {
        self.visible_indices
            .iter()
            .enumerate()
            .filter_map(|(pos, &row)| Some((pos, self.table.as_ref()?.record(row)?)))
    }
}

#[cfg(test)]
mod tests {
    use rust_xlsxwriter::Workbook;

    use super::*;
    use crate::data::profile::gpa_trend;

    /// Workbook with every required header and one row per `(学号, 姓名, gpa)`.
    fn roster(rows: &[(&str, &str, [Option<f64>; 3])], skip_column: Option<&str>) -> Vec<u8> {
        let headers: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| Some(*c) != skip_column)
            .collect();

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (c, header) in headers.iter().enumerate() {
            sheet.write_string(0, c as u16, *header).unwrap();
        }
        for (r, (id, name, gpas)) in rows.iter().enumerate() {
            let r = r as u32 + 1;
            for (c, header) in headers.iter().enumerate() {
                let c = c as u16;
                match *header {
                    "学号" => {
                        sheet.write_string(r, c, *id).unwrap();
                    }
                    "姓名" => {
                        sheet.write_string(r, c, *name).unwrap();
                    }
                    "第一学期绩点" | "第二学期绩点" | "第三学期绩点" => {
                        let semester = match *header {
                            "第一学期绩点" => 0,
                            "第二学期绩点" => 1,
                            _ => 2,
                        };
                        if let Some(gpa) = gpas[semester] {
                            sheet.write_number(r, c, gpa).unwrap();
                        }
                    }
                    _ => {}
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    fn three_students() -> Vec<u8> {
        roster(
            &[
                ("1001", "张三", [Some(3.0), Some(3.1), Some(3.3)]),
                ("1002", "李四", [Some(3.2), None, Some(3.6)]),
                ("1003", "王五", [None, None, None]),
            ],
            None,
        )
    }

    #[test]
    fn selector_clamps_at_both_ends() {
        let mut sel = RecordSelector::new(3);
        sel.previous();
        assert_eq!(sel.current(), Some(0));
        sel.next();
        sel.next();
        sel.next();
        assert_eq!(sel.current(), Some(2));
        assert!(!sel.has_next());
        sel.select(10);
        assert_eq!(sel.current(), Some(2));
        sel.select(1);
        assert_eq!(sel.current(), Some(1));
        sel.reset(5);
        assert_eq!(sel.current(), Some(0));
    }

    #[test]
    fn empty_selector_selects_nothing() {
        let mut sel = RecordSelector::new(0);
        sel.next();
        sel.select(3);
        assert_eq!(sel.current(), None);
        assert!(!sel.has_previous());
        assert!(!sel.has_next());
    }

    #[test]
    fn upload_search_select_and_trend() {
        let mut state = AppState::default();
        assert_eq!(state.upload(&three_students(), "students.xlsx").unwrap(), 3);
        assert_eq!(state.total_count(), 3);
        assert!(matches!(
            &state.status_message,
            Some(StatusMessage::Success(msg)) if msg.contains('3')
        ));

        state.set_query("1002");
        assert_eq!(state.filtered_count(), 1);
        state.selector.select(0);
        let record = state.selected_record().unwrap();
        let trend = gpa_trend(record);
        let (semesters, gpas) = trend.series();
        assert_eq!(semesters, vec!["第一学期", "第三学期"]);
        assert_eq!(gpas, vec![3.2, 3.6]);
        assert!((trend.average().unwrap() - 3.4).abs() < 1e-9);
    }

    #[test]
    fn query_change_resets_selection() {
        let mut state = AppState::default();
        state.upload(&three_students(), "students.xlsx").unwrap();
        state.selector.select(2);
        state.set_query("100");
        assert_eq!(state.filtered_count(), 3);
        assert_eq!(state.selector.current(), Some(0));

        state.set_query("赵六");
        assert_eq!(state.filtered_count(), 0);
        assert!(state.selected_record().is_none());
    }

    #[test]
    fn missing_column_keeps_previous_table() {
        let mut state = AppState::default();
        state.upload(&three_students(), "good.xlsx").unwrap();
        state.set_query("李四");
        let before = state.visible_indices.clone();

        let bad = roster(&[("2001", "赵六", [None; 3])], Some("学号"));
        let err = state.upload(&bad, "bad.xlsx").unwrap_err();
        assert!(matches!(
            &err,
            UploadError::Schema(SchemaError::MissingColumns(cols)) if cols == &vec!["学号".to_string()]
        ));
        assert!(err.to_string().contains("学号"));

        assert_eq!(state.total_count(), 3);
        assert_eq!(state.query, "李四");
        assert_eq!(state.visible_indices, before);
        assert!(matches!(state.status_message, Some(StatusMessage::Error(_))));
    }

    #[test]
    fn unreadable_file_keeps_previous_table() {
        let mut state = AppState::default();
        state.upload(&three_students(), "good.xlsx").unwrap();
        let err = state.upload(b"not a spreadsheet", "broken.xls").unwrap_err();
        assert!(matches!(err, UploadError::Parse(_)));
        assert!(err.to_string().starts_with("文件读取或处理失败"));
        assert_eq!(state.total_count(), 3);
    }

    #[test]
    fn header_only_sheet_loads_zero_students() {
        let mut state = AppState::default();
        assert_eq!(state.upload(&roster(&[], None), "empty.xlsx").unwrap(), 0);
        assert!(state.table.is_some());
        assert!(state.selected_record().is_none());
    }

    #[test]
    fn new_upload_replaces_table_and_clears_query() {
        let mut state = AppState::default();
        state.upload(&three_students(), "a.xlsx").unwrap();
        state.set_query("王五");
        let one = roster(&[("3001", "孙七", [Some(2.5), None, None])], None);
        assert_eq!(state.upload(&one, "b.xlsx").unwrap(), 1);
        assert!(state.query.is_empty());
        assert_eq!(state.visible_records().count(), 1);
    }

    #[test]
    fn disk_and_byte_uploads_share_validation() {
        let bad = roster(&[("2001", "赵六", [None; 3])], Some("姓名"));
        assert!(matches!(
            validated(loader::parse_bytes(&bad, "bad.xlsx")),
            Err(UploadError::Schema(_))
        ));

        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        std::io::Write::write_all(&mut file, &bad).unwrap();
        let mut state = AppState::default();
        state.upload(&three_students(), "good.xlsx").unwrap();
        let err = state.open_path(file.path()).unwrap_err();
        assert!(matches!(
            err,
            UploadError::Schema(SchemaError::MissingColumns(cols)) if cols == vec!["姓名".to_string()]
        ));
        assert_eq!(state.total_count(), 3);
    }
}

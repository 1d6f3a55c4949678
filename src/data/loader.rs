use std::collections::{BTreeMap, HashMap};
use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto_from_rs};

use super::model::{CellValue, StudentRecord, StudentTable};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Extensions offered in the file dialog.
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xls", "xlsm", "xlsb", "ods"];

/// Load a student sheet from disk.  Dispatch by extension.
pub fn load_file(path: &Path) -> Result<StudentTable> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    parse_bytes(&bytes, filename)
}

/// Parse an uploaded file.  `filename` is only used for its extension.
///
/// Supported formats:
/// * `.xlsx` / `.xls` (and `.xlsm`, `.xlsb`, `.ods`) – first worksheet
/// * `.csv` – comma separated, UTF-8
pub fn parse_bytes(bytes: &[u8], filename: &str) -> Result<StudentTable> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        e if SPREADSHEET_EXTENSIONS.contains(&e) => parse_workbook(bytes),
        "csv" => parse_csv(bytes),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Workbook loader
// ---------------------------------------------------------------------------

/// Layout: first worksheet, header row first, one student per following row.
fn parse_workbook(bytes: &[u8]) -> Result<StudentTable> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes.to_vec())).context("opening workbook")?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("Workbook contains no worksheets")?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("reading worksheet '{sheet_name}'"))?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        bail!("Worksheet '{sheet_name}' is empty");
    };
    let headers = dedupe_headers(header_row.iter().map(header_text));

    let records = rows
        .map(|row| row.iter().map(workbook_cell).collect::<Vec<_>>())
        .filter(|cells| !cells.iter().all(CellValue::is_null))
        .map(|cells| build_record(&headers, cells))
        .collect();

    Ok(StudentTable::new(headers, records))
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => workbook_cell(other).to_string(),
    }
}

fn workbook_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) if s.is_empty() => CellValue::Null,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            CellValue::String(s.clone())
        }
        Data::Empty | Data::Error(_) => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one student per row.
fn parse_csv(bytes: &[u8]) -> Result<StudentTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);
    let headers = dedupe_headers(
        reader
            .headers()
            .context("reading CSV headers")?
            .iter()
            .map(str::to_string),
    );

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cells: Vec<CellValue> = row.iter().map(guess_cell_type).collect();
        if cells.iter().all(CellValue::is_null) {
            continue;
        }
        records.push(build_record(&headers, cells));
    }

    Ok(StudentTable::new(headers, records))
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Make header names unique the way the sheets' legacy tooling did: blank
/// headers become `Unnamed: <i>`, a repeated name gets `.1`, `.2`, ...
fn dedupe_headers(raw: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers: Vec<String> = Vec::new();

    for (i, name) in raw.enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {i}")
        } else {
            name
        };
        let mut candidate = base.clone();
        if seen.contains_key(&base) {
            let mut n = seen.get(&base).copied().unwrap_or(0);
            loop {
                n += 1;
                candidate = format!("{base}.{n}");
                if !seen.contains_key(&candidate) {
                    break;
                }
            }
            seen.insert(base, n);
        }
        seen.insert(candidate.clone(), 0);
        headers.push(candidate);
    }
    headers
}

/// Zip cells onto headers. Short rows are padded with nulls; cells beyond the
/// header are dropped.
fn build_record(headers: &[String], cells: Vec<CellValue>) -> StudentRecord {
    let mut cells = cells.into_iter();
    let map: BTreeMap<String, CellValue> = headers
        .iter()
        .map(|h| (h.clone(), cells.next().unwrap_or(CellValue::Null)))
        .collect();
    StudentRecord::new(map)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rust_xlsxwriter::Workbook;

    use super::*;

    fn xlsx(rows: &[&[&str]]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if cell.is_empty() {
                    continue;
                }
                match cell.parse::<f64>() {
                    Ok(n) => sheet.write_number(r as u32, c as u16, n).unwrap(),
                    Err(_) => sheet.write_string(r as u32, c as u16, *cell).unwrap(),
                };
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn reads_first_sheet_of_xlsx() {
        let bytes = xlsx(&[
            &["学号", "姓名", "第一学期绩点"],
            &["1001", "张三", "3.2"],
            &["1002", "李四", ""],
        ]);
        let table = parse_bytes(&bytes, "students.xlsx").unwrap();

        assert_eq!(table.columns, vec!["学号", "姓名", "第一学期绩点"]);
        assert_eq!(table.len(), 2);
        let first = table.record(0).unwrap();
        assert_eq!(first.get("姓名"), Some(&CellValue::from("张三")));
        assert_eq!(first.get("学号").map(ToString::to_string).as_deref(), Some("1001"));
        assert_eq!(first.get("第一学期绩点").and_then(CellValue::as_f64), Some(3.2));
        let second = table.record(1).unwrap();
        assert_eq!(second.get("第一学期绩点"), Some(&CellValue::Null));
    }

    #[test]
    fn extension_is_case_insensitive() {
        let bytes = xlsx(&[&["学号"], &["1"]]);
        assert_eq!(parse_bytes(&bytes, "DATA.XLSX").unwrap().len(), 1);
    }

    #[test]
    fn header_only_sheet_has_zero_rows() {
        let bytes = xlsx(&[&["学号", "姓名"]]);
        let table = parse_bytes(&bytes, "empty.xlsx").unwrap();
        assert_eq!(table.columns.len(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let err = parse_bytes(b"definitely not a workbook", "broken.xlsx").unwrap_err();
        assert!(format!("{err:#}").contains("opening workbook"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = parse_bytes(b"", "notes.txt").unwrap_err();
        assert!(err.to_string().contains(".txt"));
    }

    #[test]
    fn csv_cells_are_typed_and_blank_rows_skipped() {
        let data = "学号,姓名,挂科,有何困难\n1001,张三,0,\n,,,\n1002,李四,1.5,经济\n";
        let table = parse_bytes(data.as_bytes(), "students.csv").unwrap();
        assert_eq!(table.len(), 2);
        let first = table.record(0).unwrap();
        assert_eq!(first.get("学号"), Some(&CellValue::Integer(1001)));
        assert_eq!(first.get("有何困难"), Some(&CellValue::Null));
        let second = table.record(1).unwrap();
        assert_eq!(second.get("挂科"), Some(&CellValue::Float(1.5)));
        assert_eq!(second.get("有何困难"), Some(&CellValue::from("经济")));
    }

    #[test]
    fn short_csv_rows_are_padded() {
        let table = parse_bytes("a,b,c\n1\n".as_bytes(), "x.csv").unwrap();
        let rec = table.record(0).unwrap();
        assert_eq!(rec.get("a"), Some(&CellValue::Integer(1)));
        assert_eq!(rec.get("c"), Some(&CellValue::Null));
    }

    #[test]
    fn duplicate_and_blank_headers_are_renamed() {
        let headers = dedupe_headers(
            ["助学金", "", "助学金", "助学金", "x.1", "x", "x"]
                .into_iter()
                .map(String::from),
        );
        assert_eq!(
            headers,
            vec!["助学金", "Unnamed: 1", "助学金.1", "助学金.2", "x.1", "x", "x.2"]
        );
    }

    #[test]
    fn load_file_reads_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all("学号,姓名\n1001,张三\n".as_bytes()).unwrap();
        let table = load_file(file.path()).unwrap();
        assert_eq!(table.len(), 1);
    }
}

use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value as it comes out of the spreadsheet reader.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Spreadsheets store most numbers as floats; `1001.0` should read as `1001`.
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => Ok(()),
        }
    }
}

impl CellValue {
    /// Empty cells and NaN floats carry no value.
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Zero and `false`: a 0/1-coded flag column saying "no".
    pub fn is_falsy(&self) -> bool {
        match self {
            CellValue::Integer(i) => *i == 0,
            CellValue::Float(v) => *v == 0.0,
            CellValue::Bool(b) => !b,
            CellValue::String(_) | CellValue::Null => false,
        }
    }

    /// Interpret the cell as a number. Text is parsed after trimming, so a
    /// score typed into a text-formatted cell still counts.
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            CellValue::Float(v) => *v,
            CellValue::Integer(i) => *i as f64,
            CellValue::Bool(b) => f64::from(u8::from(*b)),
            CellValue::String(s) => s.trim().parse::<f64>().ok()?,
            CellValue::Null => return None,
        };
        (!value.is_nan()).then_some(value)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

// ---------------------------------------------------------------------------
// StudentRecord – one row of the sheet
// ---------------------------------------------------------------------------

/// One student's row: column name → cell value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentRecord {
    cells: BTreeMap<String, CellValue>,
}

impl StudentRecord {
    pub fn new(cells: BTreeMap<String, CellValue>) -> Self {
        Self { cells }
    }

    /// Raw lookup; `None` when the column does not exist in this record.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }
}

impl<K, V> FromIterator<(K, V)> for StudentRecord
where
    K: Into<String>,
    V: Into<CellValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// StudentTable – the complete loaded sheet
// ---------------------------------------------------------------------------

/// The parsed sheet: header order plus every data row.
#[derive(Debug, Clone, Default)]
pub struct StudentTable {
    /// Header names in sheet order.
    pub columns: Vec<String>,
    /// All data rows.
    pub records: Vec<StudentRecord>,
}

impl StudentTable {
    pub fn new(columns: Vec<String>, records: Vec<StudentRecord>) -> Self {
        Self { columns, records }
    }

    /// Number of students.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the sheet has no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, index: usize) -> Option<&StudentRecord> {
        self.records.get(index)
    }
}

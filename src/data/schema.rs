use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Sorted list of every required header the sheet lacks.
    #[error("缺少以下必需的列名，请检查文件后重新上传：{}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// Check that every required header is present in `columns`.
///
/// Matching is exact: a header with stray whitespace counts as missing.
pub fn validate<S: AsRef<str>>(columns: &[S], required: &[&str]) -> Result<(), SchemaError> {
    let present: BTreeSet<&str> = columns.iter().map(AsRef::as_ref).collect();
    let missing: BTreeSet<&str> = required
        .iter()
        .copied()
        .filter(|col| !present.contains(col))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns(
            missing.into_iter().map(str::to_string).collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::columns::REQUIRED_COLUMNS;

    fn all_required() -> Vec<String> {
        REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn full_header_set_passes() {
        assert_eq!(validate(&all_required(), REQUIRED_COLUMNS), Ok(()));
    }

    #[test]
    fn extra_columns_are_tolerated() {
        let mut cols = all_required();
        cols.push("备注".to_string());
        cols.insert(0, "Unnamed: 0".to_string());
        assert_eq!(validate(&cols, REQUIRED_COLUMNS), Ok(()));
    }

    #[test]
    fn reports_exactly_the_missing_set() {
        let cols: Vec<String> = all_required()
            .into_iter()
            .filter(|c| c != "学号" && c != "助学金" && c != "挂科")
            .collect();
        let Err(SchemaError::MissingColumns(missing)) = validate(&cols, REQUIRED_COLUMNS) else {
            panic!("expected missing columns");
        };
        let got: BTreeSet<_> = missing.iter().map(String::as_str).collect();
        assert_eq!(got, BTreeSet::from(["学号", "助学金", "挂科"]));

        let mut sorted = missing.clone();
        sorted.sort();
        assert_eq!(missing, sorted);
    }

    #[test]
    fn whitespace_in_header_is_a_mismatch() {
        let cols: Vec<String> = all_required()
            .into_iter()
            .map(|c| if c == "姓名" { " 姓名".to_string() } else { c })
            .collect();
        assert_eq!(
            validate(&cols, REQUIRED_COLUMNS),
            Err(SchemaError::MissingColumns(vec!["姓名".to_string()]))
        );
    }

    #[test]
    fn message_names_every_missing_header() {
        let err = validate(&["序号"], &["序号", "学号", "姓名"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("学号"));
        assert!(msg.contains("姓名"));
    }
}

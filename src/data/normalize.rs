use thiserror::Error;

use super::columns;
use super::model::CellValue;
use super::resolve::AliasGroup;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RangeError {
    #[error("normalization range must satisfy min < max, got ({min}, {max})")]
    Degenerate { min: f64, max: f64 },
    #[error("normalization bounds must be finite, got ({min}, {max})")]
    NonFinite { min: f64, max: f64 },
}

// ---------------------------------------------------------------------------
// NormalizationRange
// ---------------------------------------------------------------------------

/// Fixed `(min, max)` window mapped onto 0–100. Construction guarantees
/// `min < max`, so scaling never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationRange {
    min: f64,
    max: f64,
}

impl NormalizationRange {
    pub fn new(min: f64, max: f64) -> Result<Self, RangeError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RangeError::NonFinite { min, max });
        }
        if min >= max {
            return Err(RangeError::Degenerate { min, max });
        }
        Ok(Self { min, max })
    }

    /// For compile-time tables whose bounds are known to be valid.
    const fn fixed(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Linear rescale into [0, 100], clamped.
    pub fn scale(&self, value: f64) -> f64 {
        (((value - self.min) / (self.max - self.min)) * 100.0).clamp(0.0, 100.0)
    }
}

/// Score a raw cell on `range`. Missing or non-numeric cells score 0.
pub fn normalize(value: Option<&CellValue>, range: NormalizationRange) -> f64 {
    value
        .and_then(CellValue::as_f64)
        .map_or(0.0, |v| range.scale(v))
}

/// The unscaled figure shown beside the score; 0 when unparsable.
pub fn display_value(value: Option<&CellValue>) -> f64 {
    value.and_then(CellValue::as_f64).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Competency axes
// ---------------------------------------------------------------------------

/// One spoke of the competency radar chart.
#[derive(Debug, Clone, Copy)]
pub struct CompetencyAxis {
    pub label: &'static str,
    pub source: AliasGroup,
    pub range: NormalizationRange,
}

/// The five radar axes. The explanatory panel renders its bounds from this
/// same table, so what is documented is what is computed.
pub const COMPETENCY_AXES: [CompetencyAxis; 5] = [
    CompetencyAxis {
        label: "第一学年德育",
        source: columns::MORAL,
        range: NormalizationRange::fixed(12.0, 15.0),
    },
    CompetencyAxis {
        label: "第一学年智育",
        source: columns::ACADEMIC,
        range: NormalizationRange::fixed(15.0, 80.0),
    },
    CompetencyAxis {
        label: "第一学年体测",
        source: columns::PHYSICAL_SCORE,
        range: NormalizationRange::fixed(15.0, 110.0),
    },
    CompetencyAxis {
        label: "第一学年附加分",
        source: columns::BONUS,
        range: NormalizationRange::fixed(-1.0, 6.0),
    },
    CompetencyAxis {
        label: "第一学年总分",
        source: columns::COMPOSITE,
        range: NormalizationRange::fixed(20.0, 100.0),
    },
];

// Layout errors - everything that can stop a chart before it is drawn

use thiserror::Error;

/// Errors raised while loading or laying out a dataset
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// No records at all, nothing to render
    #[error("Dataset is empty: nothing to render")]
    EmptyDataset,

    /// No record carries the centered code
    #[error("No record with centered code '{0}'")]
    MissingCenterRecord(String),

    /// A numeric column could not be parsed after stripping separators
    #[error("Malformed number for {code} in '{field}': {value:?}")]
    MalformedNumber {
        code: String,
        field: String,
        value: String,
    },

    /// Two records share a code
    #[error("Duplicate currency code '{0}'")]
    DuplicateCode(String),

    /// Every record is zero for a column that is used as a divisor
    #[error("Every record has a zero '{0}', scores cannot be normalized")]
    DegenerateData(String),

    /// Configuration values that cannot produce a chart
    #[error("Invalid chart configuration: {0}")]
    InvalidConfig(String),
}

impl LayoutError {
    pub fn malformed(code: &str, field: &str, value: &str) -> Self {
        LayoutError::MalformedNumber {
            code: code.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

pub type LayoutResult<T> = std::result::Result<T, LayoutError>;

use serde_json::{Number, Value};

/// A single spreadsheet cell as written by the sync.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CellValue {
    #[default]
    Blank,
    Text(String),
    Number(Number),
}

impl CellValue {
    /// Absent cells and empty strings both count as blank.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Blank => true,
            CellValue::Text(text) => text.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// JSON value sent to the Sheets API. Blanks are written as empty strings.
    pub fn to_json(&self) -> Value {
        match self {
            CellValue::Blank => Value::String(String::new()),
            CellValue::Text(text) => Value::String(text.clone()),
            CellValue::Number(number) => Value::Number(number.clone()),
        }
    }
}

/// Record fields map to cells without any type check: strings stay strings and
/// numbers stay numbers. Mappings and arrays have no cell representation.
impl From<&Value> for CellValue {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => CellValue::Blank,
            Value::Bool(flag) => CellValue::Text(if *flag { "TRUE" } else { "FALSE" }.into()),
            Value::Number(number) => CellValue::Number(number.clone()),
            Value::String(text) => CellValue::Text(text.clone()),
            Value::Array(_) | Value::Object(_) => CellValue::Blank,
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_owned())
    }
}

impl From<i64> for CellValue {
    fn from(number: i64) -> Self {
        CellValue::Number(number.into())
    }
}

use serde::{Deserialize, Serialize};

/// Scalar type a column can carry. Drives the input affordance and the
/// coercion applied when a raw value is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Date,
}

impl ColumnType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "date" => Some(Self::Date),
            _ => None,
        }
    }

    /// Default value for an untouched field of this type.
    pub fn default_value(&self) -> Value {
        match self {
            Self::Number => Value::Number(0.0),
            Self::Text | Self::Date => Value::Text(String::new()),
        }
    }
}

/// One cell of a row. Dates stay as strings (YYYY-MM-DD) since the engine
/// never does date arithmetic on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Coerce raw input according to the column type. Number parse failures
    /// fall back to 0.
    pub fn coerce(typ: ColumnType, raw: &str) -> Value {
        match typ {
            ColumnType::Number => Value::Number(raw.trim().parse::<f64>().unwrap_or(0.0)),
            ColumnType::Text | ColumnType::Date => Value::Text(raw.to_string()),
        }
    }

    /// Numeric reading of a cell; anything non-numeric counts as 0.
    pub fn as_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Text(_) => 0.0,
        }
    }

    /// Whether a required field counts as unfilled. Mirrors the historic
    /// form check exactly: empty string is unfilled, and so is numeric 0
    /// (a legitimately entered 0 does not pass). Product has not decided
    /// whether to change that.
    pub fn is_empty_for_required(&self) -> bool {
        match self {
            Value::Text(s) => s.is_empty(),
            Value::Number(n) => *n == 0.0 || n.is_nan(),
        }
    }

    /// Display form used by tables and reports. Whole numbers print without
    /// a trailing ".0".
    pub fn display(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

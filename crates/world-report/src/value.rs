//! Neutral SQL value representation for store rows.
//!
//! The store decodes each column into one of these kinds so that query
//! building, execution, and record mapping stay independent of the driver's
//! row type. The `world` schema only carries text, integer, and float
//! columns, so those are the only non-null kinds.

/// One decoded column value.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL.
    Null,

    /// Integer column (TINYINT through BIGINT), widened to i64.
    Int(i64),

    /// Floating point column, widened to f64.
    Float(f64),

    /// Text column.
    Text(String),
}

impl SqlValue {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// View as text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// View as an integer, if this is an integer value.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            SqlValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// View as a float. Integer values widen, matching the store's
    /// handling of FLOAT columns that MySQL reports as exact.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            SqlValue::Float(v) => Some(*v),
            SqlValue::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    /// Short kind name for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            SqlValue::Null => "null",
            SqlValue::Int(_) => "integer",
            SqlValue::Float(_) => "float",
            SqlValue::Text(_) => "text",
        }
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null() {
        assert!(SqlValue::Null.is_null());
        assert!(!SqlValue::Int(42).is_null());
    }

    #[test]
    fn test_accessors() {
        assert_eq!(SqlValue::Text("Asia".into()).as_text(), Some("Asia"));
        assert_eq!(SqlValue::Int(7).as_int(), Some(7));
        assert_eq!(SqlValue::Int(7).as_float(), Some(7.0));
        assert_eq!(SqlValue::Float(1.5).as_int(), None);
        assert_eq!(SqlValue::Null.as_text(), None);
    }

    #[test]
    fn test_from_implementations() {
        let v: SqlValue = 42i64.into();
        assert_eq!(v, SqlValue::Int(42));

        let v: SqlValue = "hello".into();
        assert_eq!(v, SqlValue::Text("hello".to_string()));
    }
}

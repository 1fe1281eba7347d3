//! Row and cell types
//!
//! A query result is an ordered sequence of rows; each row is an ordered
//! sequence of heterogeneous scalar cells. `Scalar`'s `Display` impl defines
//! the field rendering used by the artifact writer: text is rendered verbatim
//! with no quoting or escaping, and NULL renders as the empty string.

use std::fmt;

use base64::Engine as _;

/// One row of a query result
pub type Row = Vec<Scalar>;

/// A single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// SQL NULL
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer (all integer widths collapse here)
    Int(i64),
    /// Floating point
    Float(f64),
    /// Text, rendered verbatim
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<duckdb::types::Value> for Scalar {
    fn from(value: duckdb::types::Value) -> Self {
        use duckdb::types::Value;
        match value {
            Value::Null => Scalar::Null,
            Value::Boolean(b) => Scalar::Bool(b),
            Value::TinyInt(i) => Scalar::Int(i.into()),
            Value::SmallInt(i) => Scalar::Int(i.into()),
            Value::Int(i) => Scalar::Int(i.into()),
            Value::BigInt(i) => Scalar::Int(i),
            Value::HugeInt(i) => Scalar::Text(i.to_string()),
            Value::UTinyInt(i) => Scalar::Int(i.into()),
            Value::USmallInt(i) => Scalar::Int(i.into()),
            Value::UInt(i) => Scalar::Int(i.into()),
            Value::UBigInt(i) => Scalar::Text(i.to_string()),
            Value::Float(v) => Scalar::Float(f64::from(v)),
            Value::Double(v) => Scalar::Float(v),
            Value::Text(s) => Scalar::Text(s),
            Value::Blob(b) => Scalar::Text(base64::engine::general_purpose::STANDARD.encode(b)),
            Value::Timestamp(unit, v) => {
                let micros = to_micros(unit, v);
                let secs = micros / 1_000_000;
                let nsecs = ((micros % 1_000_000) * 1000) as u32;
                chrono::DateTime::from_timestamp(secs, nsecs)
                    .map(|dt| Scalar::Text(dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()))
                    .unwrap_or(Scalar::Int(v))
            }
            Value::Date32(d) => {
                // Days since epoch; 719163 days from 1 CE to 1970-01-01
                chrono::NaiveDate::from_num_days_from_ce_opt(d + 719_163)
                    .map(|date| Scalar::Text(date.format("%Y-%m-%d").to_string()))
                    .unwrap_or(Scalar::Int(d.into()))
            }
            Value::Time64(unit, v) => {
                let t = to_micros(unit, v);
                let secs = t / 1_000_000;
                let micros = t % 1_000_000;
                Scalar::Text(format!(
                    "{:02}:{:02}:{:02}.{:06}",
                    secs / 3600,
                    (secs % 3600) / 60,
                    secs % 60,
                    micros
                ))
            }
            _ => Scalar::Text(format!("{value:?}")),
        }
    }
}

/// Normalize a temporal value to microseconds
fn to_micros(unit: duckdb::types::TimeUnit, v: i64) -> i64 {
    use duckdb::types::TimeUnit;
    match unit {
        TimeUnit::Second => v * 1_000_000,
        TimeUnit::Millisecond => v * 1_000,
        TimeUnit::Microsecond => v,
        TimeUnit::Nanosecond => v / 1_000,
    }
}

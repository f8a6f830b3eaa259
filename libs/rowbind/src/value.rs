use base64::Engine;
use serde::ser::{Serialize, Serializer};

/// Canonical column value, as delivered by an executor for one cell.
///
/// Closed set of kinds, so decoding is an exhaustive match rather than an
/// open-ended convertibility check.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    /// `(mantissa, scale)`: `Decimal(1250, 2)` is `12.50`.
    Decimal(i128, u8),
    /// Microseconds since the Unix epoch, UTC.
    Timestamp(i64),
    Text(String),
    /// Opaque binary data (bytea, UUID, ...).
    Bytes(Vec<u8>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short kind name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int64(_) => "int64",
            Value::UInt64(_) => "uint64",
            Value::Float32(_) => "float32",
            Value::Float64(_) => "float64",
            Value::Decimal(..) => "decimal",
            Value::Timestamp(_) => "timestamp",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
        }
    }
}

/// Render a decimal mantissa/scale pair as a plain decimal string.
pub(crate) fn decimal_to_string(mantissa: i128, scale: u8) -> String {
    if scale == 0 {
        return mantissa.to_string();
    }
    let digits = mantissa.unsigned_abs().to_string();
    let scale = scale as usize;
    let padded = if digits.len() <= scale {
        format!("{}{digits}", "0".repeat(scale - digits.len() + 1))
    } else {
        digits
    };
    let (int_part, frac_part) = padded.split_at(padded.len() - scale);
    let sign = if mantissa < 0 { "-" } else { "" };
    format!("{sign}{int_part}.{frac_part}")
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::UInt64(v) => serializer.serialize_u64(*v),
            Value::Float32(v) => serializer.serialize_f32(*v),
            Value::Float64(v) => serializer.serialize_f64(*v),
            Value::Decimal(m, s) => serializer.serialize_str(&decimal_to_string(*m, *s)),
            Value::Timestamp(micros) => match chrono::DateTime::from_timestamp_micros(*micros) {
                Some(ts) => serializer
                    .serialize_str(&ts.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)),
                None => Err(serde::ser::Error::custom(format!(
                    "timestamp out of range: {micros}us"
                ))),
            },
            Value::Text(v) => serializer.serialize_str(v),
            Value::Bytes(v) => {
                serializer.serialize_str(&base64::engine::general_purpose::STANDARD.encode(v))
            }
        }
    }
}

//! Conversions between `Value` and field types.
//!
//! Decoding is soft: `assign` sets the zero value for `Null`, converts when
//! the value kind fits the field type, and otherwise leaves the field alone.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::value::Value;

/// Field types a row value can be decoded into.
pub trait FromValue: Sized {
    /// `None` when the value kind does not convert to `Self`.
    fn from_value(value: &Value) -> Option<Self>;
}

/// Field types that can be read out as a `Value` for insertion.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Decode `value` into `slot`.
///
/// 1. `Null` → `T::default()`.
/// 2. Convertible → converted value.
/// 3. Otherwise `slot` is left as it was.
pub fn assign<T: FromValue + Default>(slot: &mut T, value: &Value) {
    if value.is_null() {
        *slot = T::default();
        return;
    }
    match T::from_value(value) {
        Some(v) => *slot = v,
        None => tracing::trace!(
            kind = value.kind(),
            field_type = std::any::type_name::<T>(),
            "value not convertible, field left unchanged"
        ),
    }
}

fn pow10(scale: u8) -> Option<i128> {
    10i128.checked_pow(scale as u32)
}

fn decimal_to_f64(mantissa: i128, scale: u8) -> f64 {
    mantissa as f64 / 10f64.powi(scale as i32)
}

fn decimal_trunc(mantissa: i128, scale: u8) -> i128 {
    // Scales beyond i128 range mean |value| < 1.
    pow10(scale).map_or(0, |p| mantissa / p)
}

macro_rules! int_from_value {
    ($($t:ty),*) => {$(
        impl FromValue for $t {
            fn from_value(value: &Value) -> Option<Self> {
                match *value {
                    Value::Int64(v) => Some(v as $t),
                    Value::UInt64(v) => Some(v as $t),
                    Value::Float32(v) => Some(v as $t),
                    Value::Float64(v) => Some(v as $t),
                    Value::Decimal(m, s) => Some(decimal_trunc(m, s) as $t),
                    _ => None,
                }
            }
        }
    )*};
}

macro_rules! float_from_value {
    ($($t:ty),*) => {$(
        impl FromValue for $t {
            fn from_value(value: &Value) -> Option<Self> {
                match *value {
                    Value::Int64(v) => Some(v as $t),
                    Value::UInt64(v) => Some(v as $t),
                    Value::Float32(v) => Some(v as $t),
                    Value::Float64(v) => Some(v as $t),
                    Value::Decimal(m, s) => Some(decimal_to_f64(m, s) as $t),
                    _ => None,
                }
            }
        }
    )*};
}

int_from_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
float_from_value!(f32, f64);

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            Value::Bytes(v) => String::from_utf8(v.clone()).ok(),
            _ => None,
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bytes(v) => Some(v.clone()),
            Value::Text(v) => Some(v.clone().into_bytes()),
            _ => None,
        }
    }
}

impl FromValue for DateTime<Utc> {
    fn from_value(value: &Value) -> Option<Self> {
        match *value {
            Value::Timestamp(micros) => DateTime::from_timestamp_micros(micros),
            _ => None,
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: &Value) -> Option<Self> {
        DateTime::<Utc>::from_value(value).map(|ts| ts.naive_utc())
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            v => T::from_value(v).map(Some),
        }
    }
}

macro_rules! to_value {
    ($variant:ident as $cast:ty: $($t:ty),*) => {$(
        impl ToValue for $t {
            fn to_value(&self) -> Value {
                Value::$variant(*self as $cast)
            }
        }
    )*};
}

to_value!(Int64 as i64: i8, i16, i32, i64, isize, u8, u16, u32);
to_value!(UInt64 as u64: u64, usize);
to_value!(Float32 as f32: f32);
to_value!(Float64 as f64: f64);

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for Vec<u8> {
    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self) -> Value {
        Value::Timestamp(self.timestamp_micros())
    }
}

impl ToValue for NaiveDateTime {
    fn to_value(&self) -> Value {
        Value::Timestamp(self.and_utc().timestamp_micros())
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

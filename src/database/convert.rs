// Value conversion: raw column values → typed destinations
//
// Destinations are a closed set of tagged variants. Each variant borrows the
// field it writes into, either directly (`Slot::Value`) or through an
// `Option` (`Slot::Nullable`, the pointer-like "indirect" case).

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::error::ConvertError;
use super::kind::{TypeDescriptor, ValueKind};
use super::raw::RawValue;
use crate::utils::time_format::{FORMAT_DATE, FORMAT_DATETIME};

/// A borrowed field, written directly or through an `Option`
#[derive(Debug)]
pub enum Slot<'a, T> {
    Value(&'a mut T),
    Nullable(&'a mut Option<T>),
}

impl<T> Slot<'_, T> {
    pub fn is_indirect(&self) -> bool {
        matches!(self, Slot::Nullable(_))
    }

    fn set(&mut self, value: T) {
        match self {
            Slot::Value(dest) => **dest = value,
            Slot::Nullable(dest) => **dest = Some(value),
        }
    }

    fn set_null(&mut self, to: &str) -> Result<(), ConvertError> {
        match self {
            Slot::Nullable(dest) => {
                **dest = None;
                Ok(())
            }
            Slot::Value(_) => Err(ConvertError::NullIntoValue { to: to.to_string() }),
        }
    }
}

/// Where a scanned column value goes
#[derive(Debug)]
pub enum Destination<'a> {
    Bool(Slot<'a, bool>),
    I8(Slot<'a, i8>),
    I16(Slot<'a, i16>),
    I32(Slot<'a, i32>),
    I64(Slot<'a, i64>),
    Isize(Slot<'a, isize>),
    U8(Slot<'a, u8>),
    U16(Slot<'a, u16>),
    U32(Slot<'a, u32>),
    U64(Slot<'a, u64>),
    Usize(Slot<'a, usize>),
    F32(Slot<'a, f32>),
    F64(Slot<'a, f64>),
    Text(Slot<'a, String>),
    Bytes(Slot<'a, Vec<u8>>),
    Date(Slot<'a, NaiveDate>),
    DateTime(Slot<'a, NaiveDateTime>),
    Json(Slot<'a, serde_json::Value>),
    /// Column has no matching field; the value is read and dropped
    Ignore,
}

impl Destination<'_> {
    /// Rust type written by this destination, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Destination::Bool(_) => "bool",
            Destination::I8(_) => "i8",
            Destination::I16(_) => "i16",
            Destination::I32(_) => "i32",
            Destination::I64(_) => "i64",
            Destination::Isize(_) => "isize",
            Destination::U8(_) => "u8",
            Destination::U16(_) => "u16",
            Destination::U32(_) => "u32",
            Destination::U64(_) => "u64",
            Destination::Usize(_) => "usize",
            Destination::F32(_) => "f32",
            Destination::F64(_) => "f64",
            Destination::Text(_) => "String",
            Destination::Bytes(_) => "Vec<u8>",
            Destination::Date(_) => "NaiveDate",
            Destination::DateTime(_) => "NaiveDateTime",
            Destination::Json(_) => "serde_json::Value",
            Destination::Ignore => "ignored",
        }
    }

    /// Whether the destination is an `Option` (pointer-like) slot
    pub fn is_indirect(&self) -> bool {
        match self {
            Destination::Bool(s) => s.is_indirect(),
            Destination::I8(s) => s.is_indirect(),
            Destination::I16(s) => s.is_indirect(),
            Destination::I32(s) => s.is_indirect(),
            Destination::I64(s) => s.is_indirect(),
            Destination::Isize(s) => s.is_indirect(),
            Destination::U8(s) => s.is_indirect(),
            Destination::U16(s) => s.is_indirect(),
            Destination::U32(s) => s.is_indirect(),
            Destination::U64(s) => s.is_indirect(),
            Destination::Usize(s) => s.is_indirect(),
            Destination::F32(s) => s.is_indirect(),
            Destination::F64(s) => s.is_indirect(),
            Destination::Text(s) => s.is_indirect(),
            Destination::Bytes(s) => s.is_indirect(),
            Destination::Date(s) => s.is_indirect(),
            Destination::DateTime(s) => s.is_indirect(),
            Destination::Json(s) => s.is_indirect(),
            Destination::Ignore => false,
        }
    }

    /// Type of the value stored, ignoring any `Option` wrapper
    pub fn element_type(&self) -> TypeDescriptor {
        let kind = match self {
            Destination::Bool(_) => ValueKind::Bool,
            Destination::I8(_) => ValueKind::Int8,
            Destination::I16(_) => ValueKind::Int16,
            Destination::I32(_) => ValueKind::Int32,
            Destination::I64(_) => ValueKind::Int64,
            Destination::Isize(_) => ValueKind::Int,
            Destination::U8(_) => ValueKind::Uint8,
            Destination::U16(_) => ValueKind::Uint16,
            Destination::U32(_) => ValueKind::Uint32,
            Destination::U64(_) => ValueKind::Uint64,
            Destination::Usize(_) => ValueKind::Uint,
            Destination::F32(_) => ValueKind::Float32,
            Destination::F64(_) => ValueKind::Float64,
            Destination::Text(_) => ValueKind::String,
            Destination::Bytes(_) => return TypeDescriptor::slice_of(TypeDescriptor::of(ValueKind::Uint8)),
            Destination::Date(_) | Destination::DateTime(_) | Destination::Json(_) => ValueKind::Struct,
            Destination::Ignore => ValueKind::Interface,
        };
        TypeDescriptor::of(kind)
    }

    /// Full destination type: `*elem` for indirect slots
    pub fn type_descriptor(&self) -> TypeDescriptor {
        let elem = self.element_type();
        if self.is_indirect() {
            TypeDescriptor::pointer_to(elem)
        } else {
            elem
        }
    }
}

/// Coerces a raw column value into a destination
///
/// `indirect` and `target` come from the caller's column metadata; `target`
/// is the element type, already dereferenced for indirect slots.
pub trait ValueConverter {
    fn convert_assign(
        &self,
        dest: &mut Destination<'_>,
        raw: &RawValue,
        indirect: bool,
        target: &TypeDescriptor,
    ) -> Result<(), ConvertError>;
}

/// Converter for SQLite storage classes, with configurable date layouts
#[derive(Debug, Clone)]
pub struct DefaultConverter {
    date_format: String,
    datetime_format: String,
}

impl Default for DefaultConverter {
    fn default() -> Self {
        Self::new(FORMAT_DATE, FORMAT_DATETIME)
    }
}

impl DefaultConverter {
    pub fn new(date_format: impl Into<String>, datetime_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
            datetime_format: datetime_format.into(),
        }
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn datetime_format(&self) -> &str {
        &self.datetime_format
    }

    fn assign_value(&self, dest: &mut Destination<'_>, raw: &RawValue) -> Result<(), ConvertError> {
        match dest {
            Destination::Bool(s) => assign(s, raw, "bool", to_bool),
            Destination::I8(s) => assign(s, raw, "i8", |r| to_integer(r, "i8")),
            Destination::I16(s) => assign(s, raw, "i16", |r| to_integer(r, "i16")),
            Destination::I32(s) => assign(s, raw, "i32", |r| to_integer(r, "i32")),
            Destination::I64(s) => assign(s, raw, "i64", |r| to_integer(r, "i64")),
            Destination::Isize(s) => assign(s, raw, "isize", |r| to_integer(r, "isize")),
            Destination::U8(s) => assign(s, raw, "u8", |r| to_integer(r, "u8")),
            Destination::U16(s) => assign(s, raw, "u16", |r| to_integer(r, "u16")),
            Destination::U32(s) => assign(s, raw, "u32", |r| to_integer(r, "u32")),
            Destination::U64(s) => assign(s, raw, "u64", |r| to_integer(r, "u64")),
            Destination::Usize(s) => assign(s, raw, "usize", |r| to_integer(r, "usize")),
            Destination::F32(s) => assign(s, raw, "f32", to_f32),
            Destination::F64(s) => assign(s, raw, "f64", to_f64),
            Destination::Text(s) => assign(s, raw, "String", to_text),
            Destination::Date(s) => assign(s, raw, "NaiveDate", |r| self.to_date(r)),
            Destination::DateTime(s) => assign(s, raw, "NaiveDateTime", |r| self.to_datetime(r)),
            Destination::Json(s) => assign(s, raw, "serde_json::Value", to_json),
            Destination::Ignore => Ok(()),
            Destination::Bytes(_) => Err(unsupported(raw, "Vec<u8>")),
        }
    }

    // Container destinations get copied whole rather than coerced
    fn assign_structural(&self, dest: &mut Destination<'_>, raw: &RawValue) -> Result<(), ConvertError> {
        let to = dest.type_name();
        match dest {
            Destination::Bytes(s) => assign(s, raw, "Vec<u8>", to_bytes),
            Destination::Ignore => Ok(()),
            _ => Err(unsupported(raw, to)),
        }
    }

    fn to_date(&self, raw: &RawValue) -> Result<NaiveDate, ConvertError> {
        match raw {
            RawValue::Integer(secs) => timestamp(*secs, 0).map(|dt| dt.date()),
            RawValue::Text(_) | RawValue::Blob(_) => {
                let text = to_text(raw)?;
                NaiveDate::parse_from_str(&text, &self.date_format)
                    .or_else(|_| {
                        NaiveDateTime::parse_from_str(&text, &self.datetime_format).map(|dt| dt.date())
                    })
                    .map_err(|e| parse_error(&text, "NaiveDate", e))
            }
            _ => Err(unsupported(raw, "NaiveDate")),
        }
    }

    fn to_datetime(&self, raw: &RawValue) -> Result<NaiveDateTime, ConvertError> {
        match raw {
            RawValue::Integer(secs) => timestamp(*secs, 0),
            RawValue::Real(f) => {
                if !f.is_finite() || *f < i64::MIN as f64 || *f >= i64::MAX as f64 {
                    return Err(out_of_range(f, "NaiveDateTime"));
                }
                let secs = f.floor();
                let nanos = ((f - secs) * 1e9) as u32;
                timestamp(secs as i64, nanos)
            }
            RawValue::Text(_) | RawValue::Blob(_) => {
                let text = to_text(raw)?;
                NaiveDateTime::parse_from_str(&text, &self.datetime_format)
                    .or_else(|_| DateTime::parse_from_rfc3339(&text).map(|dt| dt.naive_utc()))
                    .or_else(|_| {
                        NaiveDate::parse_from_str(&text, &self.date_format)
                            .map(|d| d.and_time(chrono::NaiveTime::MIN))
                    })
                    .map_err(|e| parse_error(&text, "NaiveDateTime", e))
            }
            RawValue::Null => Err(unsupported(raw, "NaiveDateTime")),
        }
    }
}

impl ValueConverter for DefaultConverter {
    fn convert_assign(
        &self,
        dest: &mut Destination<'_>,
        raw: &RawValue,
        indirect: bool,
        target: &TypeDescriptor,
    ) -> Result<(), ConvertError> {
        if matches!(dest, Destination::Ignore) {
            return Ok(());
        }

        let element = dest.element_type();
        if indirect != dest.is_indirect() || *target != element {
            let expected = if indirect {
                TypeDescriptor::pointer_to(target.clone())
            } else {
                target.clone()
            };
            return Err(ConvertError::Mismatch {
                expected,
                actual: dest.type_descriptor(),
            });
        }

        if target.kind().is_value() {
            self.assign_value(dest, raw)
        } else {
            self.assign_structural(dest, raw)
        }
    }
}

fn assign<T>(
    slot: &mut Slot<'_, T>,
    raw: &RawValue,
    to: &str,
    convert: impl FnOnce(&RawValue) -> Result<T, ConvertError>,
) -> Result<(), ConvertError> {
    if raw.is_null() {
        return slot.set_null(to);
    }
    let value = convert(raw)?;
    slot.set(value);
    Ok(())
}

fn unsupported(raw: &RawValue, to: &str) -> ConvertError {
    ConvertError::Unsupported {
        from: raw.type_name(),
        to: to.to_string(),
    }
}

fn parse_error(value: &str, to: &str, reason: impl Display) -> ConvertError {
    ConvertError::Parse {
        value: value.to_string(),
        to: to.to_string(),
        reason: reason.to_string(),
    }
}

fn out_of_range(value: impl Display, to: &str) -> ConvertError {
    ConvertError::OutOfRange {
        value: value.to_string(),
        to: to.to_string(),
    }
}

fn timestamp(secs: i64, nanos: u32) -> Result<NaiveDateTime, ConvertError> {
    DateTime::from_timestamp(secs, nanos)
        .map(|dt| dt.naive_utc())
        .ok_or_else(|| out_of_range(secs, "NaiveDateTime"))
}

fn to_bool(raw: &RawValue) -> Result<bool, ConvertError> {
    match raw {
        RawValue::Integer(i) => Ok(*i != 0),
        RawValue::Text(_) | RawValue::Blob(_) => {
            let text = to_text(raw)?;
            match text.as_str() {
                "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
                "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
                _ => Err(parse_error(&text, "bool", "invalid syntax")),
            }
        }
        _ => Err(unsupported(raw, "bool")),
    }
}

fn to_integer<T>(raw: &RawValue, to: &str) -> Result<T, ConvertError>
where
    T: TryFrom<i64> + FromStr,
    <T as FromStr>::Err: Display,
{
    match raw {
        RawValue::Integer(i) => T::try_from(*i).map_err(|_| out_of_range(i, to)),
        RawValue::Real(f) => {
            if f.fract() != 0.0 || !f.is_finite() || *f < i64::MIN as f64 || *f >= i64::MAX as f64 {
                return Err(out_of_range(f, to));
            }
            T::try_from(*f as i64).map_err(|_| out_of_range(f, to))
        }
        RawValue::Text(_) | RawValue::Blob(_) => {
            let text = to_text(raw)?;
            text.parse::<T>().map_err(|e| parse_error(&text, to, e))
        }
        RawValue::Null => Err(unsupported(raw, to)),
    }
}

fn to_f64(raw: &RawValue) -> Result<f64, ConvertError> {
    match raw {
        RawValue::Integer(i) => Ok(*i as f64),
        RawValue::Real(f) => Ok(*f),
        RawValue::Text(_) | RawValue::Blob(_) => {
            let text = to_text(raw)?;
            text.parse::<f64>().map_err(|e| parse_error(&text, "f64", e))
        }
        RawValue::Null => Err(unsupported(raw, "f64")),
    }
}

fn to_f32(raw: &RawValue) -> Result<f32, ConvertError> {
    let value = to_f64(raw)?;
    if value.is_finite() && value.abs() > f32::MAX as f64 {
        return Err(out_of_range(value, "f32"));
    }
    Ok(value as f32)
}

fn to_text(raw: &RawValue) -> Result<String, ConvertError> {
    match raw {
        RawValue::Integer(i) => Ok(i.to_string()),
        RawValue::Real(f) => Ok(f.to_string()),
        RawValue::Text(s) => Ok(s.clone()),
        RawValue::Blob(bytes) => String::from_utf8(bytes.clone())
            .map_err(|e| parse_error(&String::from_utf8_lossy(bytes), "String", e)),
        RawValue::Null => Err(unsupported(raw, "String")),
    }
}

fn to_bytes(raw: &RawValue) -> Result<Vec<u8>, ConvertError> {
    match raw {
        RawValue::Blob(bytes) => Ok(bytes.clone()),
        _ => to_text(raw).map(String::into_bytes),
    }
}

fn to_json(raw: &RawValue) -> Result<serde_json::Value, ConvertError> {
    match raw {
        RawValue::Integer(i) => Ok(serde_json::Value::from(*i)),
        RawValue::Real(f) => Ok(serde_json::Value::from(*f)),
        RawValue::Text(_) | RawValue::Blob(_) => {
            let text = to_text(raw)?;
            serde_json::from_str(&text).map_err(|e| parse_error(&text, "serde_json::Value", e))
        }
        RawValue::Null => Ok(serde_json::Value::Null),
    }
}

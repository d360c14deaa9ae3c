use std::any::type_name;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::ValueFormatError;

/// Default format used for date and time fields (`strftime` syntax).
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Settings available while converting one raw value.
#[derive(Debug, Clone, Copy)]
pub struct CoerceContext<'a> {
    pub date_format: &'a str,
}

impl Default for CoerceContext<'_> {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT,
        }
    }
}

/// A field type that can be read from XML text or attribute content.
pub trait FromXmlText: Sized {
    /// Whether empty content still produces a value. Types that reject it leave their field
    /// at its default instead of failing.
    const ACCEPTS_EMPTY: bool = false;

    fn from_xml_text(raw: &str, ctx: &CoerceContext<'_>) -> Result<Self, String>;
}

/// Converts raw text into `V`, wrapping failures into a [`ValueFormatError`].
pub fn coerce<V: FromXmlText>(raw: &str, ctx: &CoerceContext<'_>) -> Result<V, ValueFormatError> {
    V::from_xml_text(raw, ctx).map_err(|reason| ValueFormatError {
        value: raw.to_string(),
        target: type_name::<V>(),
        reason,
    })
}

impl FromXmlText for String {
    const ACCEPTS_EMPTY: bool = true;

    fn from_xml_text(raw: &str, _ctx: &CoerceContext<'_>) -> Result<Self, String> {
        Ok(raw.to_string())
    }
}

impl FromXmlText for char {
    fn from_xml_text(raw: &str, _ctx: &CoerceContext<'_>) -> Result<Self, String> {
        let mut chars = raw.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err("expected exactly one character".to_string()),
        }
    }
}

impl FromXmlText for bool {
    fn from_xml_text(raw: &str, _ctx: &CoerceContext<'_>) -> Result<Self, String> {
        let value = raw.trim();
        if value.eq_ignore_ascii_case("true") || value == "1" {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") || value == "0" {
            Ok(false)
        } else {
            Err("expected true, false, 1 or 0".to_string())
        }
    }
}

macro_rules! from_xml_text_via_parse {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromXmlText for $ty {
                fn from_xml_text(raw: &str, _ctx: &CoerceContext<'_>) -> Result<Self, String> {
                    raw.trim().parse::<$ty>().map_err(|e| e.to_string())
                }
            }
        )*
    };
}

from_xml_text_via_parse!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl FromXmlText for NaiveDateTime {
    fn from_xml_text(raw: &str, ctx: &CoerceContext<'_>) -> Result<Self, String> {
        NaiveDateTime::parse_from_str(raw.trim(), ctx.date_format).map_err(|e| e.to_string())
    }
}

impl FromXmlText for NaiveDate {
    fn from_xml_text(raw: &str, ctx: &CoerceContext<'_>) -> Result<Self, String> {
        NaiveDate::parse_from_str(raw.trim(), ctx.date_format).map_err(|e| e.to_string())
    }
}

impl FromXmlText for NaiveTime {
    fn from_xml_text(raw: &str, ctx: &CoerceContext<'_>) -> Result<Self, String> {
        NaiveTime::parse_from_str(raw.trim(), ctx.date_format).map_err(|e| e.to_string())
    }
}

impl FromXmlText for DateTime<FixedOffset> {
    fn from_xml_text(raw: &str, ctx: &CoerceContext<'_>) -> Result<Self, String> {
        DateTime::parse_from_str(raw.trim(), ctx.date_format).map_err(|e| e.to_string())
    }
}

impl FromXmlText for DateTime<Utc> {
    fn from_xml_text(raw: &str, ctx: &CoerceContext<'_>) -> Result<Self, String> {
        let value = raw.trim();
        // Formats without an offset are read as UTC.
        match DateTime::parse_from_str(value, ctx.date_format) {
            Ok(date) => Ok(date.with_timezone(&Utc)),
            Err(_) => NaiveDateTime::parse_from_str(value, ctx.date_format)
                .map(|date| date.and_utc())
                .map_err(|e| e.to_string()),
        }
    }
}

impl<V: FromXmlText> FromXmlText for Option<V> {
    const ACCEPTS_EMPTY: bool = V::ACCEPTS_EMPTY;

    fn from_xml_text(raw: &str, ctx: &CoerceContext<'_>) -> Result<Self, String> {
        V::from_xml_text(raw, ctx).map(Some)
    }
}

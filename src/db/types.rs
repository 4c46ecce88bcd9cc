//! Row normalization.
//!
//! This module converts database-specific rows into [`ResultRow`] maps of portable
//! scalars.
//!
//! # Architecture
//!
//! Conversion uses a two-phase approach:
//! 1. `TypeCategory` classifies column types into logical categories
//! 2. Database-specific decoders handle the actual value extraction
//!
//! Backends: MySQL, PostgreSQL and SQLite rows from sqlx, SQL Server rows from
//! tiberius, Oracle rows from the `oracle` crate.
//!
//! Date-time values become `YYYY-MM-DD HH:MM:SS` strings, dates `YYYY-MM-DD`,
//! UUIDs their hyphenated form.

use crate::models::{DATE_FORMAT, ResultRow, TIME_FORMAT, TIMESTAMP_FORMAT};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::mysql::{MySqlRow, MySqlTypeInfo, MySqlValueRef};
use sqlx::postgres::{PgRow, PgTypeInfo, PgValueRef};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Decode, Row, Type, TypeInfo, ValueRef};
use uuid::Uuid;

// =============================================================================
// Type Classification
// =============================================================================

/// Logical category for database column types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    Integer,
    Float,
    Decimal,
    Boolean,
    Timestamp,
    Date,
    Time,
    Binary,
    Json,
    Uuid,
    Unknown,
}

/// Classify a database type name into a logical category.
pub fn categorize_type(type_name: &str) -> TypeCategory {
    let lower = type_name.to_lowercase();

    // Temporal types first: "interval" and "point" would otherwise match "int"
    if lower.contains("timestamp") || lower.contains("datetime") {
        return TypeCategory::Timestamp;
    }
    if lower == "date" {
        return TypeCategory::Date;
    }
    if lower == "time" || lower == "timetz" {
        return TypeCategory::Time;
    }
    if lower.contains("interval") || lower.contains("point") {
        return TypeCategory::Unknown;
    }

    if lower.contains("decimal") || lower.contains("numeric") {
        return TypeCategory::Decimal;
    }

    if lower.contains("int") || lower.contains("serial") || lower.contains("tiny") {
        // MySQL reports BOOLEAN columns as TINYINT(1)
        return TypeCategory::Integer;
    }

    if lower == "bool" || lower == "boolean" {
        return TypeCategory::Boolean;
    }

    if lower.contains("float")
        || lower.contains("double")
        || lower == "real"
        || lower == "float4"
        || lower == "float8"
    {
        return TypeCategory::Float;
    }

    if lower == "json" || lower == "jsonb" {
        return TypeCategory::Json;
    }

    if lower == "uuid" {
        return TypeCategory::Uuid;
    }

    if lower.contains("blob") || lower.contains("binary") || lower == "bytea" {
        return TypeCategory::Binary;
    }

    // Everything else is decoded as text (varchar, text, char, enum, ...)
    TypeCategory::Unknown
}

// =============================================================================
// Scalar Rendering
// =============================================================================

pub fn timestamp_value(value: NaiveDateTime) -> JsonValue {
    JsonValue::String(value.format(TIMESTAMP_FORMAT).to_string())
}

/// Timezone-aware values are rendered in UTC.
pub fn timestamp_tz_value(value: DateTime<Utc>) -> JsonValue {
    timestamp_value(value.naive_utc())
}

pub fn date_value(value: NaiveDate) -> JsonValue {
    JsonValue::String(value.format(DATE_FORMAT).to_string())
}

pub fn time_value(value: NaiveTime) -> JsonValue {
    JsonValue::String(value.format(TIME_FORMAT).to_string())
}

pub fn uuid_value(value: Uuid) -> JsonValue {
    JsonValue::String(value.hyphenated().to_string())
}

fn float_value(value: f64) -> JsonValue {
    serde_json::Number::from_f64(value)
        .map(JsonValue::Number)
        .unwrap_or_else(|| JsonValue::String(value.to_string()))
}

/// Binary data is base64 encoded.
pub fn binary_value(bytes: &[u8]) -> JsonValue {
    use base64::{Engine as _, engine::general_purpose::STANDARD};

    JsonValue::String(STANDARD.encode(bytes))
}

// =============================================================================
// Decimal Type Support
// =============================================================================

/// Wrapper type for raw DECIMAL/NUMERIC values as strings.
/// This preserves the exact database representation.
#[derive(Debug)]
pub struct RawDecimal(pub String);

impl Type<sqlx::MySql> for RawDecimal {
    fn type_info() -> MySqlTypeInfo {
        <String as Type<sqlx::MySql>>::type_info()
    }

    fn compatible(ty: &MySqlTypeInfo) -> bool {
        let name = ty.name().to_lowercase();
        name.contains("decimal") || name.contains("numeric")
    }
}

impl<'r> Decode<'r, sqlx::MySql> for RawDecimal {
    fn decode(value: MySqlValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<sqlx::MySql>>::decode(value)?;
        Ok(RawDecimal(s.to_string()))
    }
}

impl Type<sqlx::Postgres> for RawDecimal {
    fn type_info() -> PgTypeInfo {
        <String as Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        let name = ty.name().to_lowercase();
        name.contains("numeric") || name.contains("decimal")
    }
}

impl<'r> Decode<'r, sqlx::Postgres> for RawDecimal {
    fn decode(value: PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as Decode<sqlx::Postgres>>::decode(value)?;
        Ok(RawDecimal(s.to_string()))
    }
}

// =============================================================================
// Row Conversion Trait
// =============================================================================

/// Trait for converting database rows to result rows.
pub trait ToResultRow {
    fn to_result_row(&self) -> ResultRow;
}

impl ToResultRow for MySqlRow {
    fn to_result_row(&self) -> ResultRow {
        self.columns()
            .iter()
            .enumerate()
            .map(|(idx, col)| {
                let category = categorize_type(col.type_info().name());
                (col.name().to_string(), mysql::decode_column(self, idx, category))
            })
            .collect()
    }
}

impl ToResultRow for PgRow {
    fn to_result_row(&self) -> ResultRow {
        self.columns()
            .iter()
            .enumerate()
            .map(|(idx, col)| {
                let category = categorize_type(col.type_info().name());
                (col.name().to_string(), postgres::decode_column(self, idx, category))
            })
            .collect()
    }
}

impl ToResultRow for SqliteRow {
    fn to_result_row(&self) -> ResultRow {
        self.columns()
            .iter()
            .enumerate()
            .map(|(idx, col)| {
                // Expression columns carry no declared type; use the stored value's type
                let category = match categorize_type(col.type_info().name()) {
                    TypeCategory::Unknown => sqlite::storage_category(self, idx),
                    category => category,
                };
                (col.name().to_string(), sqlite::decode_column(self, idx, category))
            })
            .collect()
    }
}

impl ToResultRow for tiberius::Row {
    fn to_result_row(&self) -> ResultRow {
        self.cells()
            .map(|(col, data)| (col.name().to_string(), tds::decode_column(data)))
            .collect()
    }
}

impl ToResultRow for oracle::Row {
    fn to_result_row(&self) -> ResultRow {
        self.column_info()
            .iter()
            .zip(self.sql_values())
            .map(|(col, value)| (col.name().to_string(), oci::decode_value(col.oracle_type(), value)))
            .collect()
    }
}

// =============================================================================
// Database-Specific Decoders
// =============================================================================
//
// Each decoder tries the candidate Rust types in order and falls back to NULL when a
// value cannot be decoded; the Option wrapper distinguishes SQL NULL from a type
// mismatch.

mod mysql {
    use super::*;

    pub fn decode_column(row: &MySqlRow, idx: usize, category: TypeCategory) -> JsonValue {
        match category {
            TypeCategory::Decimal => decode_decimal(row, idx),
            TypeCategory::Integer => decode_integer(row, idx),
            TypeCategory::Boolean => decode_boolean(row, idx),
            TypeCategory::Float => decode_float(row, idx),
            TypeCategory::Timestamp => decode_timestamp(row, idx),
            TypeCategory::Date => decode_date(row, idx),
            TypeCategory::Time => decode_time(row, idx),
            TypeCategory::Binary => decode_binary(row, idx),
            TypeCategory::Json => decode_json(row, idx),
            TypeCategory::Uuid | TypeCategory::Unknown => decode_text(row, idx),
        }
    }

    fn decode_decimal(row: &MySqlRow, idx: usize) -> JsonValue {
        match row.try_get::<Option<RawDecimal>, _>(idx) {
            Ok(Some(v)) => JsonValue::String(v.0),
            Ok(None) => JsonValue::Null,
            Err(e) => {
                tracing::error!("Failed to decode DECIMAL: {:?}", e);
                JsonValue::Null
            }
        }
    }

    fn decode_integer(row: &MySqlRow, idx: usize) -> JsonValue {
        if let Ok(Some(v)) = row.try_get::<Option<i64>, _>(idx) {
            return JsonValue::Number(v.into());
        }
        if let Ok(Some(v)) = row.try_get::<Option<i32>, _>(idx) {
            return JsonValue::Number(v.into());
        }
        if let Ok(Some(v)) = row.try_get::<Option<i16>, _>(idx) {
            return JsonValue::Number(v.into());
        }
        if let Ok(Some(v)) = row.try_get::<Option<i8>, _>(idx) {
            return JsonValue::Number(v.into());
        }
        if let Ok(Some(v)) = row.try_get::<Option<u64>, _>(idx) {
            return JsonValue::Number(v.into());
        }
        if let Ok(Some(v)) = row.try_get::<Option<u32>, _>(idx) {
            return JsonValue::Number(v.into());
        }
        if let Ok(Some(v)) = row.try_get::<Option<u16>, _>(idx) {
            return JsonValue::Number(v.into());
        }
        if let Ok(Some(v)) = row.try_get::<Option<u8>, _>(idx) {
            return JsonValue::Number(v.into());
        }
        JsonValue::Null
    }

    fn decode_boolean(row: &MySqlRow, idx: usize) -> JsonValue {
        row.try_get::<Option<bool>, _>(idx)
            .ok()
            .flatten()
            .map(JsonValue::Bool)
            .unwrap_or(JsonValue::Null)
    }

    fn decode_float(row: &MySqlRow, idx: usize) -> JsonValue {
        if let Ok(Some(v)) = row.try_get::<Option<f64>, _>(idx) {
            return float_value(v);
        }
        if let Ok(Some(v)) = row.try_get::<Option<f32>, _>(idx) {
            return float_value(v as f64);
        }
        JsonValue::Null
    }

    fn decode_timestamp(row: &MySqlRow, idx: usize) -> JsonValue {
        // DATETIME decodes as NaiveDateTime, TIMESTAMP as DateTime<Utc>
        if let Ok(Some(v)) = row.try_get::<Option<NaiveDateTime>, _>(idx) {
            return timestamp_value(v);
        }
        if let Ok(Some(v)) = row.try_get::<Option<DateTime<Utc>>, _>(idx) {
            return timestamp_tz_value(v);
        }
        decode_text(row, idx)
    }

    fn decode_date(row: &MySqlRow, idx: usize) -> JsonValue {
        match row.try_get::<Option<NaiveDate>, _>(idx) {
            Ok(Some(v)) => date_value(v),
            Ok(None) => JsonValue::Null,
            // Zero dates ('0000-00-00') cannot be represented
            Err(_) => decode_text(row, idx),
        }
    }

    fn decode_time(row: &MySqlRow, idx: usize) -> JsonValue {
        match row.try_get::<Option<NaiveTime>, _>(idx) {
            Ok(Some(v)) => time_value(v),
            Ok(None) => JsonValue::Null,
            // TIME columns may hold durations outside 00:00-23:59
            Err(_) => decode_text(row, idx),
        }
    }

    fn decode_binary(row: &MySqlRow, idx: usize) -> JsonValue {
        row.try_get::<Option<Vec<u8>>, _>(idx)
            .ok()
            .flatten()
            .map(|v| binary_value(&v))
            .unwrap_or(JsonValue::Null)
    }

    fn decode_json(row: &MySqlRow, idx: usize) -> JsonValue {
        row.try_get::<Option<JsonValue>, _>(idx)
            .ok()
            .flatten()
            .unwrap_or(JsonValue::Null)
    }

    fn decode_text(row: &MySqlRow, idx: usize) -> JsonValue {
        if let Ok(Some(v)) = row.try_get_unchecked::<Option<String>, _>(idx) {
            return JsonValue::String(v);
        }
        row.try_get_unchecked::<Option<Vec<u8>>, _>(idx)
            .ok()
            .flatten()
            .map(|v| JsonValue::String(String::from_utf8_lossy(&v).into_owned()))
            .unwrap_or(JsonValue::Null)
    }
}

mod postgres {
    use super::*;

    pub fn decode_column(row: &PgRow, idx: usize, category: TypeCategory) -> JsonValue {
        match category {
            TypeCategory::Decimal => decode_decimal(row, idx),
            TypeCategory::Integer => decode_integer(row, idx),
            TypeCategory::Boolean => decode_boolean(row, idx),
            TypeCategory::Float => decode_float(row, idx),
            TypeCategory::Timestamp => decode_timestamp(row, idx),
            TypeCategory::Date => decode_date(row, idx),
            TypeCategory::Time => decode_time(row, idx),
            TypeCategory::Binary => decode_binary(row, idx),
            TypeCategory::Json => decode_json(row, idx),
            TypeCategory::Uuid => decode_uuid(row, idx),
            TypeCategory::Unknown => decode_text(row, idx),
        }
    }

    fn decode_decimal(row: &PgRow, idx: usize) -> JsonValue {
        match row.try_get::<Option<RawDecimal>, _>(idx) {
            Ok(Some(v)) => JsonValue::String(v.0),
            Ok(None) => JsonValue::Null,
            Err(e) => {
                tracing::error!("Failed to decode NUMERIC: {:?}", e);
                JsonValue::Null
            }
        }
    }

    fn decode_integer(row: &PgRow, idx: usize) -> JsonValue {
        if let Ok(Some(v)) = row.try_get::<Option<i64>, _>(idx) {
            return JsonValue::Number(v.into());
        }
        if let Ok(Some(v)) = row.try_get::<Option<i32>, _>(idx) {
            return JsonValue::Number(v.into());
        }
        if let Ok(Some(v)) = row.try_get::<Option<i16>, _>(idx) {
            return JsonValue::Number(v.into());
        }
        JsonValue::Null
    }

    fn decode_boolean(row: &PgRow, idx: usize) -> JsonValue {
        row.try_get::<Option<bool>, _>(idx)
            .ok()
            .flatten()
            .map(JsonValue::Bool)
            .unwrap_or(JsonValue::Null)
    }

    fn decode_float(row: &PgRow, idx: usize) -> JsonValue {
        if let Ok(Some(v)) = row.try_get::<Option<f64>, _>(idx) {
            return float_value(v);
        }
        if let Ok(Some(v)) = row.try_get::<Option<f32>, _>(idx) {
            return float_value(v as f64);
        }
        JsonValue::Null
    }

    fn decode_timestamp(row: &PgRow, idx: usize) -> JsonValue {
        // TIMESTAMP decodes as NaiveDateTime, TIMESTAMPTZ as DateTime<Utc>
        if let Ok(Some(v)) = row.try_get::<Option<NaiveDateTime>, _>(idx) {
            return timestamp_value(v);
        }
        if let Ok(Some(v)) = row.try_get::<Option<DateTime<Utc>>, _>(idx) {
            return timestamp_tz_value(v);
        }
        JsonValue::Null
    }

    fn decode_date(row: &PgRow, idx: usize) -> JsonValue {
        row.try_get::<Option<NaiveDate>, _>(idx)
            .ok()
            .flatten()
            .map(date_value)
            .unwrap_or(JsonValue::Null)
    }

    fn decode_time(row: &PgRow, idx: usize) -> JsonValue {
        match row.try_get::<Option<NaiveTime>, _>(idx) {
            Ok(Some(v)) => time_value(v),
            Ok(None) => JsonValue::Null,
            // TIMETZ carries an offset NaiveTime cannot hold; keep the server's text
            Err(_) => decode_text(row, idx),
        }
    }

    fn decode_binary(row: &PgRow, idx: usize) -> JsonValue {
        row.try_get::<Option<Vec<u8>>, _>(idx)
            .ok()
            .flatten()
            .map(|v| binary_value(&v))
            .unwrap_or(JsonValue::Null)
    }

    fn decode_json(row: &PgRow, idx: usize) -> JsonValue {
        row.try_get::<Option<JsonValue>, _>(idx)
            .ok()
            .flatten()
            .unwrap_or(JsonValue::Null)
    }

    fn decode_uuid(row: &PgRow, idx: usize) -> JsonValue {
        row.try_get::<Option<Uuid>, _>(idx)
            .ok()
            .flatten()
            .map(uuid_value)
            .unwrap_or(JsonValue::Null)
    }

    fn decode_text(row: &PgRow, idx: usize) -> JsonValue {
        row.try_get_unchecked::<Option<String>, _>(idx)
            .ok()
            .flatten()
            .map(JsonValue::String)
            .unwrap_or(JsonValue::Null)
    }
}

mod sqlite {
    use super::*;

    pub fn decode_column(row: &SqliteRow, idx: usize, category: TypeCategory) -> JsonValue {
        match category {
            TypeCategory::Integer => decode_integer(row, idx),
            TypeCategory::Boolean => decode_boolean(row, idx),
            TypeCategory::Float | TypeCategory::Decimal => decode_float(row, idx),
            TypeCategory::Timestamp => decode_timestamp(row, idx),
            TypeCategory::Date => decode_date(row, idx),
            TypeCategory::Time => decode_time(row, idx),
            TypeCategory::Binary => decode_binary(row, idx),
            TypeCategory::Uuid | TypeCategory::Json | TypeCategory::Unknown => {
                decode_text(row, idx)
            }
        }
    }

    pub fn storage_category(row: &SqliteRow, idx: usize) -> TypeCategory {
        match row.try_get_raw(idx) {
            Ok(value) if !value.is_null() => categorize_type(value.type_info().name()),
            _ => TypeCategory::Unknown,
        }
    }

    fn decode_integer(row: &SqliteRow, idx: usize) -> JsonValue {
        row.try_get::<Option<i64>, _>(idx)
            .ok()
            .flatten()
            .map(|v| JsonValue::Number(v.into()))
            .unwrap_or(JsonValue::Null)
    }

    fn decode_boolean(row: &SqliteRow, idx: usize) -> JsonValue {
        row.try_get::<Option<bool>, _>(idx)
            .ok()
            .flatten()
            .map(JsonValue::Bool)
            .unwrap_or(JsonValue::Null)
    }

    fn decode_float(row: &SqliteRow, idx: usize) -> JsonValue {
        row.try_get::<Option<f64>, _>(idx)
            .ok()
            .flatten()
            .map(float_value)
            .unwrap_or(JsonValue::Null)
    }

    fn decode_timestamp(row: &SqliteRow, idx: usize) -> JsonValue {
        match row.try_get::<Option<NaiveDateTime>, _>(idx) {
            Ok(Some(v)) => timestamp_value(v),
            Ok(None) => JsonValue::Null,
            Err(_) => decode_text(row, idx),
        }
    }

    fn decode_date(row: &SqliteRow, idx: usize) -> JsonValue {
        match row.try_get::<Option<NaiveDate>, _>(idx) {
            Ok(Some(v)) => date_value(v),
            Ok(None) => JsonValue::Null,
            Err(_) => decode_text(row, idx),
        }
    }

    fn decode_time(row: &SqliteRow, idx: usize) -> JsonValue {
        match row.try_get::<Option<NaiveTime>, _>(idx) {
            Ok(Some(v)) => time_value(v),
            Ok(None) => JsonValue::Null,
            Err(_) => decode_text(row, idx),
        }
    }

    fn decode_binary(row: &SqliteRow, idx: usize) -> JsonValue {
        row.try_get::<Option<Vec<u8>>, _>(idx)
            .ok()
            .flatten()
            .map(|v| binary_value(&v))
            .unwrap_or(JsonValue::Null)
    }

    fn decode_text(row: &SqliteRow, idx: usize) -> JsonValue {
        row.try_get_unchecked::<Option<String>, _>(idx)
            .ok()
            .flatten()
            .map(JsonValue::String)
            .unwrap_or(JsonValue::Null)
    }
}

mod tds {
    use super::*;
    use tiberius::{ColumnData, FromSql};

    pub fn decode_column(data: &ColumnData<'static>) -> JsonValue {
        match data {
            ColumnData::U8(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
            ColumnData::I16(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
            ColumnData::I32(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
            ColumnData::I64(v) => v.map(JsonValue::from).unwrap_or(JsonValue::Null),
            ColumnData::F32(v) => v.map(|f| float_value(f as f64)).unwrap_or(JsonValue::Null),
            ColumnData::F64(v) => v.map(float_value).unwrap_or(JsonValue::Null),
            ColumnData::Bit(v) => v.map(JsonValue::Bool).unwrap_or(JsonValue::Null),
            ColumnData::String(v) => v
                .as_ref()
                .map(|s| JsonValue::String(s.to_string()))
                .unwrap_or(JsonValue::Null),
            ColumnData::Guid(v) => v.map(uuid_value).unwrap_or(JsonValue::Null),
            ColumnData::Binary(v) => v
                .as_ref()
                .map(|b| binary_value(b))
                .unwrap_or(JsonValue::Null),
            // Exact representation, like DECIMAL on the other backends
            ColumnData::Numeric(v) => v
                .as_ref()
                .map(|n| JsonValue::String(n.to_string()))
                .unwrap_or(JsonValue::Null),
            ColumnData::Xml(v) => v
                .as_ref()
                .map(|x| JsonValue::String(x.clone().into_owned().into_string()))
                .unwrap_or(JsonValue::Null),
            ColumnData::DateTime(_) | ColumnData::SmallDateTime(_) | ColumnData::DateTime2(_) => {
                match NaiveDateTime::from_sql(data) {
                    Ok(Some(v)) => timestamp_value(v),
                    _ => JsonValue::Null,
                }
            }
            ColumnData::DateTimeOffset(_) => match DateTime::<Utc>::from_sql(data) {
                Ok(Some(v)) => timestamp_tz_value(v),
                _ => JsonValue::Null,
            },
            ColumnData::Date(_) => match NaiveDate::from_sql(data) {
                Ok(Some(v)) => date_value(v),
                _ => JsonValue::Null,
            },
            ColumnData::Time(_) => match NaiveTime::from_sql(data) {
                Ok(Some(v)) => time_value(v),
                _ => JsonValue::Null,
            },
        }
    }
}

mod oci {
    use super::*;
    use oracle::SqlValue;
    use oracle::sql_type::OracleType;

    pub fn decode_value(ty: &OracleType, value: &SqlValue) -> JsonValue {
        if value.is_null().unwrap_or(true) {
            return JsonValue::Null;
        }

        match ty {
            // NUMBER has no separate integer type; integral values become JSON numbers,
            // everything else keeps its exact text
            OracleType::Number(_, _) | OracleType::Int64 | OracleType::UInt64 => {
                match value.get::<String>() {
                    Ok(text) => text
                        .parse::<i64>()
                        .map(JsonValue::from)
                        .unwrap_or(JsonValue::String(text)),
                    Err(_) => JsonValue::Null,
                }
            }
            OracleType::BinaryFloat | OracleType::BinaryDouble | OracleType::Float(_) => value
                .get::<f64>()
                .map(float_value)
                .unwrap_or(JsonValue::Null),
            OracleType::Boolean => value
                .get::<bool>()
                .map(JsonValue::Bool)
                .unwrap_or(JsonValue::Null),
            // Oracle DATE carries a time of day
            OracleType::Date | OracleType::Timestamp(_) => value
                .get::<NaiveDateTime>()
                .map(timestamp_value)
                .unwrap_or(JsonValue::Null),
            OracleType::TimestampTZ(_) | OracleType::TimestampLTZ(_) => value
                .get::<DateTime<Utc>>()
                .map(timestamp_tz_value)
                .unwrap_or(JsonValue::Null),
            OracleType::Raw(_) | OracleType::LongRaw | OracleType::BLOB => value
                .get::<Vec<u8>>()
                .map(|b| binary_value(&b))
                .unwrap_or(JsonValue::Null),
            _ => value
                .get::<String>()
                .map(JsonValue::String)
                .unwrap_or(JsonValue::Null),
        }
    }
}

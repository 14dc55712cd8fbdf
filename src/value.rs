//! Projection of a row into the value stored under its key
use serde_json::{Map, Value};

use crate::{Headers, Row};

fn field_value(headers: &Headers, row: &Row, column: &str) -> Value {
    headers
        .get_field(row, column)
        .map(|v| Value::String(v.to_string()))
        .unwrap_or(Value::Null)
}

/// The whole row as an object, in column order.
pub fn row_to_object(headers: &Headers, row: &Row) -> Map<String, Value> {
    let mut object = Map::with_capacity(headers.len());

    for (name, value) in headers.iter().zip(row.iter()) {
        object
            .entry(name)
            .or_insert_with(|| Value::String(value.to_string()));
    }

    object
}

/// Builds the value stored for `row`.
///
/// - in duplicate-keys mode, the scalar of the first value column;
/// - with no value columns, the whole row;
/// - with one value column, that column's scalar;
/// - otherwise an object holding only the listed columns, in listed order.
///
/// Absent scalars become `null`. Absent columns are left out of objects.
pub fn build_value<S: AsRef<str>>(
    headers: &Headers,
    row: &Row,
    columns: &[S],
    duplicate_keys: bool,
) -> Value {
    if duplicate_keys {
        return match columns.first() {
            Some(column) => field_value(headers, row, column.as_ref()),
            None => Value::Null,
        };
    }

    match columns {
        [] => Value::Object(row_to_object(headers, row)),
        [column] => field_value(headers, row, column.as_ref()),
        columns => {
            let mut object = Map::with_capacity(columns.len());

            for column in columns {
                let column = column.as_ref();

                if let Some(v) = headers.get_field(row, column) {
                    object.insert(column.to_string(), Value::String(v.to_string()));
                }
            }

            Value::Object(object)
        }
    }
}

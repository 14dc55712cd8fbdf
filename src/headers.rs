use csv::StringRecordIter;
use std::collections::HashMap;

use super::Row;

/// A structure for keeping relationship between the headers and their positions
#[derive(Debug, Clone, PartialEq)]
pub struct Headers {
    indexes: HashMap<String, usize>,
    names: Row,
}

impl Headers {
    pub fn from_row(row: Row) -> Headers {
        let mut indexes = HashMap::new();

        // first occurrence wins when a header row repeats a name
        for (index, entry) in row.iter().enumerate() {
            indexes.entry(entry.to_string()).or_insert(index);
        }

        Headers {
            indexes,
            names: row,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn as_row(&self) -> &Row {
        &self.names
    }

    pub fn get(&self, field: &str) -> Option<usize> {
        self.indexes.get(field).copied()
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.indexes.contains_key(field)
    }

    /// Value of the named column in `row`, or `None` if this header set has
    /// no such column or the row is too short to hold it.
    pub fn get_field<'r>(&self, row: &'r Row, field: &str) -> Option<&'r str> {
        self.get(field).and_then(|i| row.get(i))
    }

    pub fn iter(&self) -> StringRecordIter {
        self.names.iter()
    }
}

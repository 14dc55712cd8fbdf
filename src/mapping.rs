use crate::{
    error::{Error, Result},
    key::DEFAULT_DELIMITER,
};

/// Which columns form the key and the value, and how rows sharing a key are
/// combined. Can only be obtained validated, through [`Mapping::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mapping {
    key_columns: Vec<String>,
    value_columns: Vec<String>,
    delimiter: String,
    duplicate_keys: bool,
}

impl Mapping {
    /// Checks the combination of options.
    ///
    /// Fails if `key_columns` is empty, or if `duplicate_keys` is set and
    /// there isn't exactly one value column.
    pub fn new(
        key_columns: Vec<String>,
        value_columns: Vec<String>,
        delimiter: Option<String>,
        duplicate_keys: bool,
    ) -> Result<Mapping> {
        if key_columns.is_empty() {
            return Err(Error::Config("at least one key column is required".to_string()));
        }

        if duplicate_keys && value_columns.len() != 1 {
            return Err(Error::Config(format!(
                "duplicate keys mode needs exactly one value column, got {}",
                value_columns.len()
            )));
        }

        Ok(Mapping {
            key_columns,
            value_columns,
            delimiter: delimiter.unwrap_or_else(|| DEFAULT_DELIMITER.to_string()),
            duplicate_keys,
        })
    }

    pub fn key_columns(&self) -> &[String] {
        &self.key_columns
    }

    pub fn value_columns(&self) -> &[String] {
        &self.value_columns
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn duplicate_keys(&self) -> bool {
        self.duplicate_keys
    }
}

use std::io;
use std::result;

use thiserror::Error;

use crate::Row;

/// An error found somewhere while building the mapping.
#[derive(Debug, Error)]
pub enum Error {
    /// The options given to the build are not usable. Raised before any input
    /// is read.
    #[error("configuration error: {0}")]
    Config(String),

    /// An input could not be opened or read.
    #[error("could not read {source_name}: {source}")]
    Io {
        source_name: String,
        #[source]
        source: io::Error,
    },

    /// The CSV reader rejected the contents of an input.
    #[error("malformed CSV in {source_name}: {source}")]
    Csv {
        source_name: String,
        #[source]
        source: csv::Error,
    },

    /// The result could not be serialized or written.
    #[error("could not write output: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(source_name: &str, source: io::Error) -> Error {
        Error::Io {
            source_name: source_name.to_string(),
            source,
        }
    }

    pub(crate) fn csv(source_name: &str, source: csv::Error) -> Error {
        Error::Csv {
            source_name: source_name.to_string(),
            source,
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

/// The type that actually flows out of a row source. Either a row or an
/// error.
pub type RowResult = result::Result<Row, Error>;

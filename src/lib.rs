//! Builds a JSON object out of CSV rows: some columns form the key, some
//! others the value, and rows sharing a key either overwrite each other or
//! pile up in a list.
mod aggregator;
mod error;
mod headers;
mod mapping;
mod row_stream;

pub mod build;
pub mod input;
pub mod key;
pub mod mock;
pub mod output;
pub mod value;

pub use aggregator::{Aggregator, ResultMap};
pub use build::{build, build_with_stats, split_list, BuildOptions, BuildStats};
pub use error::{Error, Result, RowResult};
pub use headers::Headers;
pub use input::{Input, InputStream, ReaderSource};
pub use mapping::Mapping;
pub use output::{write_output, Output};
pub use row_stream::RowStream;

pub type Row = csv::StringRecord;

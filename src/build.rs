//! Turns a set of options into a finished [`ResultMap`]
use encoding::label::encoding_from_whatwg_label;
use encoding::EncodingRef;
use log::debug;

use crate::{
    error::{Error, Result},
    input::{Input, InputStream},
    Aggregator, Mapping, ResultMap, RowStream,
};

/// Splits a comma separated list, dropping empty items.
pub fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .filter(|item| !item.is_empty())
        .map(|item| item.to_string())
        .collect()
}

/// Everything a build needs. Inputs are consumed by [`build`], so options are
/// used once.
#[derive(Debug, Default)]
pub struct BuildOptions {
    pub key_columns: Vec<String>,
    pub value_columns: Vec<String>,
    /// `None` means `_`.
    pub key_delimiter: Option<String>,
    pub duplicate_keys: bool,
    /// Read in order. Empty means standard input.
    pub inputs: Vec<Input>,
    /// WHATWG label of the input encoding. `None` means UTF-8.
    pub encoding: Option<String>,
}

impl BuildOptions {
    pub fn new<I, S>(key_columns: I) -> BuildOptions
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        BuildOptions {
            key_columns: key_columns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn value_columns<I, S>(mut self, value_columns: I) -> BuildOptions
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.value_columns = value_columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn key_delimiter(mut self, delimiter: &str) -> BuildOptions {
        self.key_delimiter = Some(delimiter.to_string());
        self
    }

    pub fn duplicate_keys(mut self, duplicate_keys: bool) -> BuildOptions {
        self.duplicate_keys = duplicate_keys;
        self
    }

    pub fn input<T: Into<Input>>(mut self, input: T) -> BuildOptions {
        self.inputs.push(input.into());
        self
    }

    pub fn encoding(mut self, label: &str) -> BuildOptions {
        self.encoding = Some(label.to_string());
        self
    }

    /// Validated column layout of these options.
    pub fn mapping(&self) -> Result<Mapping> {
        Mapping::new(
            self.key_columns.clone(),
            self.value_columns.clone(),
            self.key_delimiter.clone(),
            self.duplicate_keys,
        )
    }

    fn resolve_encoding(&self) -> Result<EncodingRef> {
        let label = self.encoding.as_deref().unwrap_or("utf-8");

        encoding_from_whatwg_label(label)
            .ok_or_else(|| Error::Config(format!("unknown encoding '{}'", label)))
    }
}

/// Counters collected along a build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub sources: usize,
    pub rows: usize,
}

/// Reads every input, one after the other, into a single map.
///
/// Options are checked before anything is read. Each source is drained
/// completely before the next one is opened, so sources don't need to share
/// columns, only the ones named by the options. The first failing source
/// aborts the whole build.
pub fn build(options: BuildOptions) -> Result<ResultMap> {
    build_with_stats(options).map(|(map, _)| map)
}

/// Same as [`build`], also returning counters about the work done.
pub fn build_with_stats(options: BuildOptions) -> Result<(ResultMap, BuildStats)> {
    let mapping = options.mapping()?;
    let encoding = options.resolve_encoding()?;
    let mut aggregator = Aggregator::new(mapping);
    let mut stats = BuildStats::default();

    let mut inputs = InputStream::new(options.inputs, encoding);

    while let Some(source) = inputs.next() {
        let source = source?;
        let name = source.name().to_string();
        let rows = source.aggregate(&mut aggregator)?;

        debug!("read {} rows from {}, {} sources left", rows, name, inputs.remaining());

        stats.sources += 1;
        stats.rows += rows;
    }

    let map = aggregator.finish();

    debug!("built {} keys from {} rows", map.len(), stats.rows);

    Ok((map, stats))
}

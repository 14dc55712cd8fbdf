use csv::{ByteRecord, ByteRecordsIntoIter, Reader, ReaderBuilder};
use encoding::{DecoderTrap, EncodingRef};
use log::debug;
use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use crate::{
    error::{Error, Result},
    Headers, Row, RowResult, RowStream,
};

fn decode(data: &ByteRecord, encoding: EncodingRef) -> Row {
    let mut row = Row::with_capacity(data.as_slice().len(), data.len());

    for item in data.iter() {
        let field = encoding
            .decode(item, DecoderTrap::Replace)
            .unwrap_or_else(|_| String::from_utf8_lossy(item).into_owned());

        row.push_field(&field);
    }

    row
}

/// Where the bytes of one source come from.
pub enum Input {
    /// A CSV document held in memory.
    Text(String),
    /// A file to open for reading.
    Path(PathBuf),
    /// The process' standard input.
    Stdin,
    /// Any other already open stream, with a name used in errors and logs.
    Reader(String, Box<dyn Read>),
}

impl Input {
    /// Interprets a string argument: if it spans several lines it is CSV
    /// text, otherwise it names a file.
    pub fn detect(arg: &str) -> Input {
        if arg.contains('\n') {
            Input::Text(arg.to_string())
        } else {
            Input::Path(PathBuf::from(arg))
        }
    }

    pub fn name(&self) -> String {
        match self {
            Input::Text(_) => "<text>".to_string(),
            Input::Path(path) => path.display().to_string(),
            Input::Stdin => "<stdin>".to_string(),
            Input::Reader(name, _) => name.clone(),
        }
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Input::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Input::Stdin => f.write_str("Stdin"),
            Input::Reader(name, _) => f.debug_tuple("Reader").field(name).finish(),
        }
    }
}

impl From<&str> for Input {
    fn from(arg: &str) -> Input {
        Input::detect(arg)
    }
}

/// One opened input, read as CSV whose first row names the columns.
pub struct ReaderSource {
    reader: Reader<Box<dyn Read>>,
    headers: Headers,
    name: String,
    encoding: EncodingRef,
}

impl ReaderSource {
    pub fn from_reader<R: Read + 'static>(
        reader: R,
        name: &str,
        encoding: EncodingRef,
    ) -> Result<ReaderSource> {
        let boxed: Box<dyn Read> = Box::new(reader);
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(boxed);

        let headers = match reader.byte_headers() {
            Ok(data) => Headers::from_row(decode(data, encoding)),
            Err(e) => return Err(Error::csv(name, e)),
        };

        Ok(ReaderSource {
            reader,
            headers,
            name: name.to_string(),
            encoding,
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P, encoding: EncodingRef) -> Result<ReaderSource> {
        let name = path.as_ref().display().to_string();
        let file = File::open(&path).map_err(|e| Error::io(&name, e))?;

        ReaderSource::from_reader(file, &name, encoding)
    }

    pub fn open(input: Input, encoding: EncodingRef) -> Result<ReaderSource> {
        let name = input.name();

        match input {
            Input::Text(text) => ReaderSource::from_reader(Cursor::new(text.into_bytes()), &name, encoding),
            Input::Path(path) => ReaderSource::from_path(path, encoding),
            Input::Stdin => ReaderSource::from_reader(io::stdin(), &name, encoding),
            Input::Reader(_, reader) => ReaderSource::from_reader(reader, &name, encoding),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

pub struct IntoIter {
    records: ByteRecordsIntoIter<Box<dyn Read>>,
    name: String,
    encoding: EncodingRef,
}

impl Iterator for IntoIter {
    type Item = RowResult;

    fn next(&mut self) -> Option<Self::Item> {
        self.records.next().map(|result| match result {
            Ok(record) => Ok(decode(&record, self.encoding)),
            Err(e) => Err(Error::csv(&self.name, e)),
        })
    }
}

impl IntoIterator for ReaderSource {
    type Item = RowResult;

    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            records: self.reader.into_byte_records(),
            name: self.name,
            encoding: self.encoding,
        }
    }
}

impl RowStream for ReaderSource {
    fn headers(&self) -> &Headers {
        &self.headers
    }
}

/// The ordered list of inputs of a build. Yields each one opened as a
/// [`ReaderSource`], and only opens an input when asked for it, so a source
/// is never touched before the previous one has been drained.
pub struct InputStream {
    inputs: VecDeque<Input>,
    encoding: EncodingRef,
}

impl InputStream {
    /// With no inputs at all the stream reads standard input.
    pub fn new(inputs: Vec<Input>, encoding: EncodingRef) -> InputStream {
        let mut inputs: VecDeque<Input> = inputs.into();

        if inputs.is_empty() {
            inputs.push_back(Input::Stdin);
        }

        InputStream { inputs, encoding }
    }

    /// Inputs not yet opened.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Iterator for InputStream {
    type Item = Result<ReaderSource>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inputs.pop_front().map(|input| {
            debug!("opening {}", input.name());

            ReaderSource::open(input, self.encoding)
        })
    }
}

//! Writing the finished map
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::{
    error::{Error, Result},
    ResultMap,
};

const INDENT: &[u8] = b"   ";

/// Where the JSON document goes.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Stdout,
    Path(PathBuf),
}

impl Output {
    pub fn name(&self) -> String {
        match self {
            Output::Stdout => "<stdout>".to_string(),
            Output::Path(path) => path.display().to_string(),
        }
    }
}

/// The map as a JSON document indented with three spaces, ending in a
/// newline.
pub fn to_json(map: &ResultMap) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));

    map.serialize(&mut ser)?;
    buf.push(b'\n');

    Ok(buf)
}

/// Serializes the map and writes it to `output` in one go.
pub fn write_output(map: &ResultMap, output: &Output) -> Result<()> {
    let document = to_json(map)?;

    let written = match output {
        Output::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();

            handle.write_all(&document).and_then(|_| handle.flush())
        }
        Output::Path(path) => fs::write(path, &document),
    };

    written.map_err(|e| Error::io(&output.name(), e))
}

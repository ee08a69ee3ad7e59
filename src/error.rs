use std::io;
use std::num::ParseFloatError;

use thiserror::Error;

/// 读取坐标记录时可能出现的错误
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: bare \" in non-quoted field")]
    BareQuote { line: usize },

    #[error("line {line}: extraneous or missing \" in quoted field")]
    Quote { line: usize },

    #[error("line {line}: quoted field is never closed")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: expected 3 fields (id,lat,lon), found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: failed to parse {field} ({value}): {source}")]
    Coordinate {
        line: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },
}

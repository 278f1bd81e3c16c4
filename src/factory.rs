//! The parsing entry point.
//!
//! A format implements one primitive, [`ConfigFactory::parse_reader`], which
//! reads UTF-8 text from a borrowed reader and never takes ownership of it.
//! The provided methods layer the common sources on top:
//!
//! | Method | Source | Who releases the source |
//! |--------|--------|-------------------------|
//! | `parse_reader` | `&mut dyn Read` | the caller |
//! | `parse_path` | file on disk | this crate, on every exit path |
//! | `parse_bytes` | owned byte reader + encoding | this crate, on every exit path |
//! | `parse_str` | in-memory text | nothing to release |
//!
//! Parsing blocks the calling thread until the source is exhausted or fails.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use encoding_rs::Encoding;
use encoding_rs_io::DecodeReaderBytesBuilder;

use crate::error::{ConfettiError, Result};
use crate::node::ConfigNode;

pub trait ConfigFactory {
    /// Parse UTF-8 text from `reader` into a root node.
    ///
    /// Syntax errors surface as [`ConfettiError::Parse`], read errors as
    /// [`ConfettiError::Io`]. The reader is borrowed and stays open.
    fn parse_reader(&self, reader: &mut dyn Read) -> Result<ConfigNode>;

    /// Parse the UTF-8 file at `path`.
    ///
    /// A missing or unreadable file is an [`ConfettiError::Io`] carrying the
    /// path. The file handle is closed before this returns.
    fn parse_path(&self, path: &Path) -> Result<ConfigNode> {
        tracing::debug!(path = %path.display(), "parsing config file");
        let file = File::open(path).map_err(|source| ConfettiError::Io {
            path: Some(path.to_path_buf()),
            source,
        })?;
        let mut reader = BufReader::new(file);
        self.parse_reader(&mut reader)
            .map_err(|e| with_path(e, path))
    }

    /// Decode `input` with `encoding` and parse the result.
    ///
    /// Takes ownership of `input` and drops it before returning, whether
    /// parsing succeeded or not. A leading byte order mark is honoured and
    /// stripped; malformed sequences decode to U+FFFD.
    fn parse_bytes<R: Read>(&self, input: R, encoding: &'static Encoding) -> Result<ConfigNode>
    where
        Self: Sized,
    {
        tracing::debug!(encoding = encoding.name(), "parsing config byte stream");
        let mut decoder = DecodeReaderBytesBuilder::new()
            .encoding(Some(encoding))
            .strip_bom(true)
            .build(input);
        self.parse_reader(&mut decoder)
    }

    /// Parse in-memory text.
    ///
    /// Never reports [`ConfettiError::Io`]: an I/O failure from the primitive
    /// is unexpected here and is re-signalled as a parse failure with the
    /// original error as its source.
    fn parse_str(&self, input: &str) -> Result<ConfigNode> {
        let mut reader = input.as_bytes();
        self.parse_reader(&mut reader).map_err(|e| match e {
            ConfettiError::Io { source, .. } => ConfettiError::parse_with_cause(
                "unexpected I/O error while parsing string",
                source,
            ),
            other => other,
        })
    }
}

fn with_path(err: ConfettiError, path: &Path) -> ConfettiError {
    match err {
        ConfettiError::Io { path: None, source } => ConfettiError::Io {
            path: Some(path.to_path_buf()),
            source,
        },
        other => other,
    }
}

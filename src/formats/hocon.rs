//! HOCON documents via the `hocon` crate.
//!
//! [`HoconConfigFactory`] checks that a file exists before handing it to the
//! loader, so a missing file is always an I/O failure and never a load error.

use std::io::{self, ErrorKind, Read};
use std::path::Path;

use ::hocon::{Hocon, HoconLoader};

use crate::adapter::{Document, ExternalKind, ExternalValue};
use crate::error::{ConfettiError, Result};
use crate::factory::ConfigFactory;
use crate::node::ConfigNode;
use crate::value::Scalar;

impl ExternalValue for Hocon {
    fn kind(&self) -> ExternalKind {
        match self {
            Hocon::Hash(_) => ExternalKind::Object,
            Hocon::Array(_) => ExternalKind::List,
            Hocon::String(s) => ExternalKind::Scalar(Scalar::String(s.clone())),
            Hocon::Integer(i) => ExternalKind::Scalar(Scalar::Integer(*i)),
            Hocon::Real(x) => ExternalKind::Scalar(Scalar::Float(*x)),
            Hocon::Boolean(b) => ExternalKind::Scalar(Scalar::Boolean(*b)),
            // Unresolvable values carry no data.
            Hocon::Null | Hocon::BadValue(_) => ExternalKind::Null,
        }
    }

    fn member(&self, key: &str) -> Option<&dyn ExternalValue> {
        match self {
            Hocon::Hash(map) => map.get(key).map(|v| v as &dyn ExternalValue),
            _ => None,
        }
    }

    fn member_keys(&self) -> Vec<String> {
        match self {
            Hocon::Hash(map) => map.keys().cloned().collect(),
            _ => Vec::new(),
        }
    }

    fn element(&self, index: usize) -> Option<&dyn ExternalValue> {
        match self {
            Hocon::Array(items) => items.get(index).map(|v| v as &dyn ExternalValue),
            _ => None,
        }
    }

    fn element_count(&self) -> usize {
        match self {
            Hocon::Array(items) => items.len(),
            _ => 0,
        }
    }
}

/// [`ConfigFactory`] for HOCON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoconConfigFactory;

impl ConfigFactory for HoconConfigFactory {
    fn parse_reader(&self, reader: &mut dyn Read) -> Result<ConfigNode> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(ConfettiError::io)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| ConfettiError::parse_with_cause("HOCON input is not valid UTF-8", e))?;

        let hocon = HoconLoader::new()
            .load_str(&text)
            .and_then(|loader| loader.hocon())
            .map_err(|e| ConfettiError::parse(format!("malformed HOCON: {e}")))?;
        tracing::trace!(kind = ?hocon.kind(), "parsed HOCON document");
        Ok(Document::new(hocon).into_root())
    }

    /// Parse the HOCON file at `path`, resolving includes relative to it.
    ///
    /// A file that does not exist is an [`ConfettiError::Io`] carrying the
    /// path; anything the loader rejects is a [`ConfettiError::Parse`].
    fn parse_path(&self, path: &Path) -> Result<ConfigNode> {
        tracing::debug!(path = %path.display(), "parsing HOCON file");
        let io_failure = |source: io::Error| ConfettiError::Io {
            path: Some(path.to_path_buf()),
            source,
        };
        if !path.try_exists().map_err(io_failure)? {
            return Err(io_failure(io::Error::new(
                ErrorKind::NotFound,
                "config file does not exist",
            )));
        }

        let hocon = HoconLoader::new()
            .load_file(path)
            .and_then(|loader| loader.hocon())
            .map_err(|e| {
                ConfettiError::parse(format!("malformed HOCON in {}: {e}", path.display()))
            })?;
        Ok(Document::new(hocon).into_root())
    }
}

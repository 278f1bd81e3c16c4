//! TOML documents via the `toml` crate.
//!
//! A TOML document is always a table, so the root is always an object node.
//! TOML has no null; datetimes surface as RFC 3339 strings.

use std::io::Read;

use ::toml::{Table, Value};

use crate::adapter::{Document, ExternalKind, ExternalValue};
use crate::error::{ConfettiError, Result};
use crate::factory::ConfigFactory;
use crate::node::ConfigNode;
use crate::value::Scalar;

impl ExternalValue for Value {
    fn kind(&self) -> ExternalKind {
        match self {
            Value::Table(_) => ExternalKind::Object,
            Value::Array(_) => ExternalKind::List,
            Value::String(s) => ExternalKind::Scalar(Scalar::String(s.clone())),
            Value::Integer(i) => ExternalKind::Scalar(Scalar::Integer(*i)),
            Value::Float(x) => ExternalKind::Scalar(Scalar::Float(*x)),
            Value::Boolean(b) => ExternalKind::Scalar(Scalar::Boolean(*b)),
            Value::Datetime(dt) => ExternalKind::Scalar(Scalar::String(dt.to_string())),
        }
    }

    fn member(&self, key: &str) -> Option<&dyn ExternalValue> {
        self.as_table()?.get(key).map(|v| v as &dyn ExternalValue)
    }

    fn member_keys(&self) -> Vec<String> {
        self.as_table()
            .map(|table| table.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn element(&self, index: usize) -> Option<&dyn ExternalValue> {
        self.as_array()?.get(index).map(|v| v as &dyn ExternalValue)
    }

    fn element_count(&self) -> usize {
        self.as_array().map_or(0, Vec::len)
    }
}

/// [`ConfigFactory`] for TOML text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlConfigFactory;

impl ConfigFactory for TomlConfigFactory {
    fn parse_reader(&self, reader: &mut dyn Read) -> Result<ConfigNode> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).map_err(ConfettiError::io)?;
        let content = String::from_utf8(bytes)
            .map_err(|e| ConfettiError::parse_with_cause("TOML input is not valid UTF-8", e))?;

        let table: Table = content.parse().map_err(|e: ::toml::de::Error| {
            let message = e.message().to_string();
            ConfettiError::parse_with_cause(message, e)
        })?;
        tracing::trace!(keys = table.len(), "parsed TOML document");
        Ok(Document::new(Value::Table(table)).into_root())
    }
}

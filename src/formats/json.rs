//! JSON documents via `serde_json`.
//!
//! Any JSON value may be the root, so a JSON document can produce a root node
//! of every kind. Integers that fit in `i64` become [`Scalar::Integer`]; all
//! other numbers become [`Scalar::Float`].

use std::io::Read;

use serde_json::error::Category;
use serde_json::{Map, Number, Value};

use crate::adapter::{Document, ExternalKind, ExternalValue};
use crate::error::{ConfettiError, Result};
use crate::factory::ConfigFactory;
use crate::node::ConfigNode;
use crate::value::Scalar;

impl ExternalValue for Value {
    fn kind(&self) -> ExternalKind {
        match self {
            Value::Object(_) => ExternalKind::Object,
            Value::Array(_) => ExternalKind::List,
            Value::String(s) => ExternalKind::Scalar(Scalar::String(s.clone())),
            Value::Number(n) => ExternalKind::Scalar(number_scalar(n)),
            Value::Bool(b) => ExternalKind::Scalar(Scalar::Boolean(*b)),
            Value::Null => ExternalKind::Null,
        }
    }

    fn member(&self, key: &str) -> Option<&dyn ExternalValue> {
        self.as_object()?.get(key).map(|v| v as &dyn ExternalValue)
    }

    fn member_keys(&self) -> Vec<String> {
        self.as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn element(&self, index: usize) -> Option<&dyn ExternalValue> {
        self.as_array()?.get(index).map(|v| v as &dyn ExternalValue)
    }

    fn element_count(&self) -> usize {
        self.as_array().map_or(0, Vec::len)
    }
}

fn number_scalar(n: &Number) -> Scalar {
    match (n.as_i64(), n.as_f64()) {
        (Some(i), _) => Scalar::Integer(i),
        (None, Some(x)) => Scalar::Float(x),
        (None, None) => Scalar::String(n.to_string()),
    }
}

/// [`ConfigFactory`] for JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonConfigFactory;

impl ConfigFactory for JsonConfigFactory {
    fn parse_reader(&self, reader: &mut dyn Read) -> Result<ConfigNode> {
        let value: Value = serde_json::from_reader(reader).map_err(|e| match e.classify() {
            Category::Io => ConfettiError::io(e.into()),
            _ => {
                let message = e.to_string();
                ConfettiError::parse_with_cause(message, e)
            }
        })?;
        tracing::trace!(kind = ?value.kind(), "parsed JSON document");
        Ok(from_json_value(value))
    }
}

/// Wrap an owned JSON value as the root of a new tree.
pub fn from_json_value(value: Value) -> ConfigNode {
    Document::new(value).into_root()
}

/// Materialize `node` and everything below it as an owned JSON value.
///
/// Non-finite floats have no JSON form and become `null`.
pub fn to_json_value(node: &ConfigNode) -> Value {
    match node {
        ConfigNode::Object(obj) => Value::Object(
            obj.to_map()
                .iter()
                .map(|(k, child)| (k.clone(), to_json_value(child)))
                .collect::<Map<String, Value>>(),
        ),
        ConfigNode::Array(arr) => Value::Array(arr.iter().map(|n| to_json_value(&n)).collect()),
        ConfigNode::Value(v) => match v.value() {
            Scalar::String(s) => Value::String(s.clone()),
            Scalar::Integer(i) => Value::from(*i),
            Scalar::Float(x) => Number::from_f64(*x).map_or(Value::Null, Value::Number),
            Scalar::Boolean(b) => Value::Bool(*b),
        },
        ConfigNode::Null(_) => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{FailingReader, TrackedReader};
    use crate::node::NodeType;
    use crate::path::{NodePath, PathSegment};
    use serde_json::json;
    use std::fs;
    use std::sync::atomic::Ordering;
    use tempfile::TempDir;

    #[test]
    fn nested_array_element_has_full_path() {
        let root = JsonConfigFactory
            .parse_str(r#"{"a":1,"d":[1,2,3]}"#)
            .unwrap();
        let element = root
            .to_object()
            .unwrap()
            .get("d")
            .unwrap()
            .to_array()
            .unwrap()
            .get(1)
            .unwrap();
        let expected: NodePath = [PathSegment::key("d"), PathSegment::index(1)]
            .into_iter()
            .collect();
        assert_eq!(element.path(), &expected);
        assert_eq!(element.to_value().unwrap().as_long().unwrap(), 2);
    }

    #[test]
    fn root_can_be_any_kind() {
        let cases = [
            ("{}", NodeType::Object),
            ("[1]", NodeType::Array),
            ("\"text\"", NodeType::Value),
            ("null", NodeType::Null),
        ];
        for (text, expected) in cases {
            let root = JsonConfigFactory.parse_str(text).unwrap();
            assert_eq!(root.node_type(), expected, "{text}");
            assert!(root.path().is_empty());
        }
    }

    #[test]
    fn scalars_keep_their_types() {
        let root = JsonConfigFactory
            .parse_str(r#"{"s": "hello", "i": 123, "d": 2.5, "b": true, "big": 18446744073709551615}"#)
            .unwrap();
        let obj = root.to_object().unwrap();
        let scalar = |key: &str| obj.get(key).unwrap().to_value().unwrap().value().clone();
        assert_eq!(scalar("s"), Scalar::String("hello".into()));
        assert_eq!(scalar("i"), Scalar::Integer(123));
        assert_eq!(scalar("d"), Scalar::Float(2.5));
        assert_eq!(scalar("b"), Scalar::Boolean(true));
        assert!(matches!(scalar("big"), Scalar::Float(_)));
    }

    #[test]
    fn unclosed_container_is_parse_failure() {
        let err = JsonConfigFactory.parse_str(r#"{"a": {"#).unwrap_err();
        assert!(err.is_parse(), "{err:?}");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn failing_reader_is_io_failure() {
        let mut reader = FailingReader;
        let err = JsonConfigFactory.parse_reader(&mut reader).unwrap_err();
        assert!(err.is_io(), "{err:?}");
    }

    #[test]
    fn missing_file_is_io_failure() {
        let dir = TempDir::new().unwrap();
        let err = JsonConfigFactory
            .parse_path(&dir.path().join("missing.json"))
            .unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.json");
        fs::write(&path, r#"{"server": {"port": 8080}}"#).unwrap();
        let root = JsonConfigFactory.parse_path(&path).unwrap();
        let port = root
            .find(&NodePath::empty().append("server").append("port"))
            .unwrap();
        assert_eq!(port.to_value().unwrap().as_long().unwrap(), 8080);
    }

    #[test]
    fn malformed_file_is_parse_failure() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "[1, 2").unwrap();
        assert!(JsonConfigFactory.parse_path(&path).unwrap_err().is_parse());
    }

    #[test]
    fn byte_stream_is_closed_either_way() {
        let (ok_reader, ok_closed) = TrackedReader::new(br#"{"k": 1}"#.to_vec());
        assert!(JsonConfigFactory.parse_bytes(ok_reader, encoding_rs::UTF_8).is_ok());
        assert!(ok_closed.load(Ordering::SeqCst));

        let (bad_reader, bad_closed) = TrackedReader::new(br#"{"k": "#.to_vec());
        assert!(JsonConfigFactory
            .parse_bytes(bad_reader, encoding_rs::UTF_8)
            .is_err());
        assert!(bad_closed.load(Ordering::SeqCst));
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(br#"{"k": true}"#);
        let root = JsonConfigFactory
            .parse_bytes(bytes.as_slice(), encoding_rs::UTF_8)
            .unwrap();
        assert!(root.to_object().unwrap().get("k").is_some());
    }

    #[test]
    fn materializes_subtrees() {
        let source = json!({"a": 1, "d": [1, 2.5, null, {"x": "y"}], "flag": false});
        let root = from_json_value(source.clone());
        assert_eq!(to_json_value(&root), source);

        let d = root.to_object().unwrap().get("d").unwrap();
        assert_eq!(to_json_value(&d), json!([1, 2.5, null, {"x": "y"}]));
    }

    #[test]
    fn concurrent_readers_see_the_same_tree() {
        let root = JsonConfigFactory
            .parse_str(r#"{"items": [{"n": 0}, {"n": 1}, {"n": 2}, {"n": 3}]}"#)
            .unwrap();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    let items = root.to_object().unwrap().get("items").unwrap();
                    for (i, item) in items.to_array().unwrap().iter().enumerate() {
                        let n = item.to_object().unwrap().get("n").unwrap();
                        assert_eq!(n.to_value().unwrap().as_long().unwrap(), i as i64);
                        assert_eq!(n.path(), &items.path().append(i).append("n"));
                    }
                });
            }
        });
    }
}

//! Contract for schema migrations between configuration versions.
//!
//! A migrator is a pure transformation from one tree to another, declared for
//! a half-open version window `[from, to)`. Choosing which migrators to run
//! for a given stored version is left to the caller.

use std::fmt;

use crate::error::{ConfettiError, Result};
use crate::node::ConfigNode;

/// Half-open version window `[from, to)` with `from < to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VersionRange {
    from: u32,
    to: u32,
}

impl VersionRange {
    pub fn new(from: u32, to: u32) -> Result<Self> {
        if from >= to {
            return Err(ConfettiError::InvalidVersionRange { from, to });
        }
        Ok(VersionRange { from, to })
    }

    pub fn from(&self) -> u32 {
        self.from
    }

    pub fn to(&self) -> u32 {
        self.to
    }

    pub fn contains(&self, version: u32) -> bool {
        self.from <= version && version < self.to
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.from, self.to)
    }
}

/// Transforms a configuration tree written for an older schema version.
///
/// Implementations must:
/// - leave the input untouched and return a new tree;
/// - be idempotent, so that migrating an already migrated tree returns an
///   equivalent tree;
/// - report incompatible input as [`ConfettiError::Migration`] instead of
///   dropping data silently.
pub trait ConfigMigrator: Send + Sync {
    fn range(&self) -> VersionRange;

    fn migrate(&self, config: &ConfigNode) -> Result<ConfigNode>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_requires_from_below_to() {
        assert!(VersionRange::new(1, 2).is_ok());
        assert!(VersionRange::new(1, 4).is_ok());
        assert!(matches!(
            VersionRange::new(2, 2),
            Err(ConfettiError::InvalidVersionRange { from: 2, to: 2 })
        ));
        assert!(VersionRange::new(3, 1).is_err());
    }

    #[test]
    fn range_is_half_open() {
        let range = VersionRange::new(1, 3).unwrap();
        assert!(!range.contains(0));
        assert!(range.contains(1));
        assert!(range.contains(2));
        assert!(!range.contains(3));
        assert_eq!(range.to_string(), "[1, 3)");
    }

    #[cfg(feature = "json")]
    mod rename {
        use super::*;
        use crate::factory::ConfigFactory;
        use crate::formats::json::{JsonConfigFactory, from_json_value, to_json_value};
        use serde_json::Value;

        /// v1 stored the listen port as `port`; v2 nests it under `server`.
        struct NestPort;

        impl ConfigMigrator for NestPort {
            fn range(&self) -> VersionRange {
                VersionRange { from: 1, to: 2 }
            }

            fn migrate(&self, config: &ConfigNode) -> Result<ConfigNode> {
                let Value::Object(mut map) = to_json_value(config) else {
                    return Err(ConfettiError::Migration {
                        range: self.range(),
                        reason: format!("expected an object root, found {}", config.node_type()),
                    });
                };
                if let Some(port) = map.remove("port") {
                    let server = map
                        .entry("server")
                        .or_insert_with(|| Value::Object(Default::default()));
                    match server {
                        Value::Object(server) => {
                            server.entry("port").or_insert(port);
                        }
                        _ => {
                            return Err(ConfettiError::Migration {
                                range: self.range(),
                                reason: "`server` is not an object".into(),
                            });
                        }
                    }
                }
                Ok(from_json_value(Value::Object(map)))
            }
        }

        fn port_of(node: &ConfigNode) -> i64 {
            let path = crate::path::NodePath::empty().append("server").append("port");
            node.find(&path).unwrap().to_value().unwrap().as_long().unwrap()
        }

        #[test]
        fn migrates_and_leaves_input_alone() {
            let v1 = JsonConfigFactory.parse_str(r#"{"port": 8080}"#).unwrap();
            let v2 = NestPort.migrate(&v1).unwrap();
            assert_eq!(port_of(&v2), 8080);
            assert!(v2.to_object().unwrap().get("port").is_none());
            assert!(v1.to_object().unwrap().get("port").is_some());
        }

        #[test]
        fn migration_is_idempotent() {
            let v1 = JsonConfigFactory.parse_str(r#"{"port": 8080, "name": "x"}"#).unwrap();
            let once = NestPort.migrate(&v1).unwrap();
            let twice = NestPort.migrate(&once).unwrap();
            assert_eq!(to_json_value(&once), to_json_value(&twice));
        }

        #[test]
        fn incompatible_input_is_signalled() {
            let array = JsonConfigFactory.parse_str("[1, 2]").unwrap();
            assert!(matches!(
                NestPort.migrate(&array),
                Err(ConfettiError::Migration { .. })
            ));

            let clash = JsonConfigFactory
                .parse_str(r#"{"port": 1, "server": "inline"}"#)
                .unwrap();
            assert!(NestPort.migrate(&clash).is_err());
        }
    }
}

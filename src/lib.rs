//! A format-agnostic configuration document model. Parse a document, then
//! walk it as a tree of nodes that always know where they are.
//!
//! ```ignore
//! use confetti::{ConfigFactory, JsonConfigFactory};
//!
//! let root = JsonConfigFactory.parse_str(r#"{"a": 1, "d": [1, 2, 3]}"#)?;
//! let second = root.to_object()?.get("d").unwrap().to_array()?.get(1)?;
//! assert_eq!(second.path().to_string(), "d[1]");
//! ```
//!
//! # Node model
//!
//! Every node is a [`ConfigNode`], a closed enum over four kinds:
//!
//! | Kind | Type | Holds |
//! |------|------|-------|
//! | [`NodeType::Object`] | [`ObjectNode`] | string keys → nodes |
//! | [`NodeType::Array`] | [`ArrayNode`] | zero-indexed sequence of nodes |
//! | [`NodeType::Value`] | [`ValueNode`] | one [`Scalar`] |
//! | [`NodeType::Null`] | [`NullNode`] | an explicit `null` |
//!
//! `to_object`/`to_array`/`to_value`/`to_null` return the inner node when the
//! kind matches and [`ConfettiError::InvalidNodeType`] otherwise. A key that
//! is not present is `None`; only an explicit `null` in the source produces a
//! [`NullNode`].
//!
//! # Paths
//!
//! Each node knows the [`PathSegment`] it was reached through (`key()`) and
//! its full [`NodePath`] from the root (`path()`). Roots have no key and the
//! empty path. For a child `c` of `p` reached through `s`,
//! `c.path() == p.path().append(s)`. Paths are persistent: appending never
//! changes the path appended to.
//!
//! # Lazy adaptation
//!
//! Parsing hands the parser's value graph to a [`Document`] and wraps its
//! root. Children are not converted up front. Every `get` classifies the
//! addressed external value and builds a fresh node for it (see [`adapter`]).
//! Two lookups of the same key therefore return two distinct nodes with the
//! same path and contents; do not rely on node identity across lookups.
//!
//! Trees are immutable and `Send + Sync`, so any number of threads may read
//! one concurrently.
//!
//! # Formats
//!
//! [`ConfigFactory`] is the parsing entry point. A format implements
//! `parse_reader`; parsing from a path, an encoded byte stream or a string is
//! provided on top. Bundled bindings, each behind a Cargo feature enabled by
//! default:
//!
//! - `json`: [`JsonConfigFactory`] over `serde_json`.
//! - `toml`: [`TomlConfigFactory`] over `toml`.
//! - `hocon`: [`HoconConfigFactory`] over `hocon`.
//!
//! Other parsers plug in by implementing [`ExternalValue`] for their value
//! type.
//!
//! # Migrations
//!
//! [`ConfigMigrator`] describes a pure tree-to-tree transformation for a
//! [`VersionRange`]. Selecting and chaining migrators is up to the caller.
//!
//! # Error handling
//!
//! All fallible operations return [`ConfettiError`]. Parse and I/O failures
//! describe the input; the remaining variants describe a node used the wrong
//! way and point at a bug in the calling code.

pub mod adapter;
pub mod error;
pub mod formats;
pub mod migration;
pub mod path;

mod array;
mod factory;
mod node;
mod object;
mod value;

#[cfg(test)]
mod fixtures;

pub use adapter::{Document, ExternalKind, ExternalValue};
pub use array::{ArrayIter, ArrayNode};
pub use error::{ConfettiError, Result};
pub use factory::ConfigFactory;
#[cfg(feature = "hocon")]
pub use formats::hocon::HoconConfigFactory;
#[cfg(feature = "json")]
pub use formats::json::JsonConfigFactory;
#[cfg(feature = "toml")]
pub use formats::toml::TomlConfigFactory;
pub use migration::{ConfigMigrator, VersionRange};
pub use node::{ConfigNode, NodeBase, NodeType, NullNode};
pub use object::ObjectNode;
pub use path::{NodePath, PathSegment};
pub use value::{Scalar, ValueNode};

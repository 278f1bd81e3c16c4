use std::collections::{BTreeMap, BTreeSet};

use crate::adapter::{self, Document, ExternalValue};
use crate::node::{ConfigNode, NodeBase};
use crate::path::{NodePath, PathSegment};

/// A key → node mapping backed by an object of an external document.
///
/// Children are converted on every access; see [`adapter`](crate::adapter).
/// Key order is lexicographic.
#[derive(Debug, Clone)]
pub struct ObjectNode {
    base: NodeBase,
    doc: Document,
}

impl ObjectNode {
    pub(crate) fn from_parts(doc: Document, base: NodeBase) -> Self {
        ObjectNode { base, doc }
    }

    pub fn get(&self, key: &str) -> Option<ConfigNode> {
        adapter::to_config_node(&self.doc, &self.as_parent(), PathSegment::key(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.external().is_some_and(|v| v.member(key).is_some())
    }

    pub fn keys(&self) -> BTreeSet<String> {
        self.external()
            .map(|v| v.member_keys().into_iter().collect())
            .unwrap_or_default()
    }

    /// Child nodes in [`keys`](Self::keys) order.
    pub fn values(&self) -> Vec<ConfigNode> {
        self.keys().iter().filter_map(|k| self.get(k)).collect()
    }

    /// Snapshot of all children. Later reads of the node are unaffected by
    /// changes made to the returned map.
    pub fn to_map(&self) -> BTreeMap<String, ConfigNode> {
        self.keys()
            .into_iter()
            .filter_map(|k| self.get(&k).map(|node| (k, node)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.external().map_or(0, |v| v.member_keys().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn key(&self) -> Option<&PathSegment> {
        self.base.key()
    }

    pub fn path(&self) -> &NodePath {
        self.base.path()
    }

    pub(crate) fn base(&self) -> &NodeBase {
        &self.base
    }

    fn external(&self) -> Option<&dyn ExternalValue> {
        self.doc.resolve(self.base.path())
    }

    fn as_parent(&self) -> ConfigNode {
        ConfigNode::Object(self.clone())
    }
}

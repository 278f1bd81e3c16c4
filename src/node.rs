//! The closed node model: [`NodeType`], [`ConfigNode`] and the shared
//! parent/key composition every concrete node is built on.

use std::fmt;
use std::sync::Arc;

use crate::array::ArrayNode;
use crate::error::{ConfettiError, Result};
use crate::object::ObjectNode;
use crate::path::{NodePath, PathSegment};
use crate::value::ValueNode;

/// Discriminator for the four node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Object,
    Array,
    Value,
    Null,
}

impl NodeType {
    /// Object and array nodes hold further nodes.
    pub fn is_container(self) -> bool {
        matches!(self, NodeType::Object | NodeType::Array)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Object => "object",
            NodeType::Array => "array",
            NodeType::Value => "value",
            NodeType::Null => "null",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a node sits in its tree.
///
/// A root has neither parent nor key; a child has both. The path is derived
/// once from the parent's path at construction time.
#[derive(Clone)]
pub struct NodeBase {
    parent: Option<Arc<ConfigNode>>,
    key: Option<PathSegment>,
    path: NodePath,
}

impl NodeBase {
    pub fn root() -> Self {
        NodeBase {
            parent: None,
            key: None,
            path: NodePath::empty(),
        }
    }

    pub fn child(parent: Arc<ConfigNode>, key: PathSegment) -> Self {
        let path = parent.path().append(key.clone());
        NodeBase {
            parent: Some(parent),
            key: Some(key),
            path,
        }
    }

    /// Build a base from optional parts. Exactly one of the two being present
    /// fails with [`ConfettiError::MissingArgument`].
    pub fn new(parent: Option<Arc<ConfigNode>>, key: Option<PathSegment>) -> Result<Self> {
        match (parent, key) {
            (None, None) => Ok(NodeBase::root()),
            (Some(parent), Some(key)) => Ok(NodeBase::child(parent, key)),
            (Some(_), None) => Err(ConfettiError::MissingArgument("key")),
            (None, Some(_)) => Err(ConfettiError::MissingArgument("parent")),
        }
    }

    pub fn key(&self) -> Option<&PathSegment> {
        self.key.as_ref()
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    pub fn parent(&self) -> Option<&ConfigNode> {
        self.parent.as_deref()
    }
}

impl fmt::Debug for NodeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeBase")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Explicitly present `null`. A missing key is `None`, never a `NullNode`.
#[derive(Debug, Clone)]
pub struct NullNode {
    base: NodeBase,
}

impl NullNode {
    pub fn new() -> Self {
        NullNode {
            base: NodeBase::root(),
        }
    }

    pub fn with_base(base: NodeBase) -> Self {
        NullNode { base }
    }

    pub fn key(&self) -> Option<&PathSegment> {
        self.base.key()
    }

    pub fn path(&self) -> &NodePath {
        self.base.path()
    }
}

impl Default for NullNode {
    fn default() -> Self {
        NullNode::new()
    }
}

/// Any node of a configuration tree.
#[derive(Debug, Clone)]
pub enum ConfigNode {
    Object(ObjectNode),
    Array(ArrayNode),
    Value(ValueNode),
    Null(NullNode),
}

impl ConfigNode {
    pub fn node_type(&self) -> NodeType {
        match self {
            ConfigNode::Object(_) => NodeType::Object,
            ConfigNode::Array(_) => NodeType::Array,
            ConfigNode::Value(_) => NodeType::Value,
            ConfigNode::Null(_) => NodeType::Null,
        }
    }

    pub fn is_object(&self) -> bool {
        self.node_type() == NodeType::Object
    }

    pub fn is_array(&self) -> bool {
        self.node_type() == NodeType::Array
    }

    pub fn is_value(&self) -> bool {
        self.node_type() == NodeType::Value
    }

    pub fn is_null(&self) -> bool {
        self.node_type() == NodeType::Null
    }

    pub fn to_object(&self) -> Result<&ObjectNode> {
        match self {
            ConfigNode::Object(node) => Ok(node),
            other => Err(other.wrong_type(NodeType::Object)),
        }
    }

    pub fn to_array(&self) -> Result<&ArrayNode> {
        match self {
            ConfigNode::Array(node) => Ok(node),
            other => Err(other.wrong_type(NodeType::Array)),
        }
    }

    pub fn to_value(&self) -> Result<&ValueNode> {
        match self {
            ConfigNode::Value(node) => Ok(node),
            other => Err(other.wrong_type(NodeType::Value)),
        }
    }

    pub fn to_null(&self) -> Result<&NullNode> {
        match self {
            ConfigNode::Null(node) => Ok(node),
            other => Err(other.wrong_type(NodeType::Null)),
        }
    }

    pub fn into_object(self) -> Result<ObjectNode> {
        match self {
            ConfigNode::Object(node) => Ok(node),
            other => Err(other.wrong_type(NodeType::Object)),
        }
    }

    pub fn into_array(self) -> Result<ArrayNode> {
        match self {
            ConfigNode::Array(node) => Ok(node),
            other => Err(other.wrong_type(NodeType::Array)),
        }
    }

    pub fn into_value(self) -> Result<ValueNode> {
        match self {
            ConfigNode::Value(node) => Ok(node),
            other => Err(other.wrong_type(NodeType::Value)),
        }
    }

    /// The segment addressing this node within its parent; `None` for a root.
    pub fn key(&self) -> Option<&PathSegment> {
        self.base().key()
    }

    /// The full path from the tree root; empty for a root.
    pub fn path(&self) -> &NodePath {
        self.base().path()
    }

    pub fn parent(&self) -> Option<&ConfigNode> {
        self.base().parent()
    }

    /// Resolve a descendant by following `path` relative to this node.
    ///
    /// Returns `None` when a step is missing, addresses an index past the end,
    /// or uses a key on an array (or an index on an object).
    pub fn find(&self, path: &NodePath) -> Option<ConfigNode> {
        let mut current = self.clone();
        for segment in path {
            let next = match (&current, segment) {
                (ConfigNode::Object(obj), PathSegment::Key(k)) => obj.get(k)?,
                (ConfigNode::Array(arr), PathSegment::Index(i)) => arr.get(*i).ok()?,
                _ => return None,
            };
            current = next;
        }
        Some(current)
    }

    pub(crate) fn base(&self) -> &NodeBase {
        match self {
            ConfigNode::Object(node) => node.base(),
            ConfigNode::Array(node) => node.base(),
            ConfigNode::Value(node) => node.base(),
            ConfigNode::Null(node) => &node.base,
        }
    }

    fn wrong_type(&self, expected: NodeType) -> ConfettiError {
        ConfettiError::InvalidNodeType {
            expected,
            actual: self.node_type(),
            path: self.path().clone(),
        }
    }
}

impl From<ObjectNode> for ConfigNode {
    fn from(node: ObjectNode) -> Self {
        ConfigNode::Object(node)
    }
}

impl From<ArrayNode> for ConfigNode {
    fn from(node: ArrayNode) -> Self {
        ConfigNode::Array(node)
    }
}

impl From<ValueNode> for ConfigNode {
    fn from(node: ValueNode) -> Self {
        ConfigNode::Value(node)
    }
}

impl From<NullNode> for ConfigNode {
    fn from(node: NullNode) -> Self {
        ConfigNode::Null(node)
    }
}

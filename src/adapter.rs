//! Lazy conversion from an externally parsed document to [`ConfigNode`]s.
//!
//! A format binding implements [`ExternalValue`] for its parser's value type.
//! The parsed root is wrapped in a [`Document`], and from then on nodes are
//! produced one access at a time:
//!
//! 1. A container node looks up its own external value by walking the
//!    document from the root along the node's path.
//! 2. The member or element addressed by the requested segment is classified
//!    by its [`ExternalKind`].
//! 3. A fresh node of the matching kind is built, carrying the container as
//!    parent and the requested segment as key.
//!
//! The value a node stands for is always the one found at its path in its
//! own document, so a node can never report one value's kind and expose
//! another value's contents.
//!
//! Nothing is memoized. Asking for the same child twice converts it twice and
//! yields two independent nodes for the same logical value. A missing member
//! or element yields `None`; an explicit external null yields a
//! [`NullNode`](crate::NullNode).

use std::fmt;
use std::sync::Arc;

use crate::array::ArrayNode;
use crate::node::{ConfigNode, NodeBase, NullNode};
use crate::object::ObjectNode;
use crate::path::{NodePath, PathSegment};
use crate::value::{Scalar, ValueNode};

/// Type tag an external value reports about itself.
#[derive(Debug, Clone, PartialEq)]
pub enum ExternalKind {
    Object,
    List,
    Scalar(Scalar),
    Null,
}

/// Read-only view of one value in an externally parsed document.
///
/// Implementations must be immutable for the lifetime of the [`Document`]
/// that owns them; nodes may be traversed from several threads at once.
pub trait ExternalValue: fmt::Debug + Send + Sync {
    fn kind(&self) -> ExternalKind;

    /// Member `key` of an object value. `None` if absent or not an object.
    fn member(&self, key: &str) -> Option<&dyn ExternalValue>;

    /// Keys of an object value. Empty for every other kind.
    fn member_keys(&self) -> Vec<String>;

    /// Element `index` of a list value. `None` if out of range or not a list.
    fn element(&self, index: usize) -> Option<&dyn ExternalValue>;

    /// Number of elements of a list value. Zero for every other kind.
    fn element_count(&self) -> usize;
}

/// Shared, immutable root of an externally parsed document.
#[derive(Clone)]
pub struct Document {
    root: Arc<dyn ExternalValue>,
}

impl Document {
    pub fn new(root: impl ExternalValue + 'static) -> Self {
        Document {
            root: Arc::new(root),
        }
    }

    pub fn root(&self) -> &dyn ExternalValue {
        self.root.as_ref()
    }

    /// Walk from the root along `path`.
    pub fn resolve(&self, path: &NodePath) -> Option<&dyn ExternalValue> {
        let mut current = self.root.as_ref();
        for segment in path {
            current = match segment {
                PathSegment::Key(k) => current.member(k)?,
                PathSegment::Index(i) => current.element(*i)?,
            };
        }
        Some(current)
    }

    /// Wrap the document root as a root node of the matching kind.
    pub fn into_root(self) -> ConfigNode {
        let kind = self.root.kind();
        build(self, kind, NodeBase::root())
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root.kind())
            .finish()
    }
}

/// Convert the value addressed as `segment` below `parent` in `doc` into a
/// fresh node.
///
/// A missing value converts to `None`, never to a null node. So does a
/// segment of the wrong shape, such as an index below an object.
pub(crate) fn to_config_node(
    doc: &Document,
    parent: &ConfigNode,
    segment: PathSegment,
) -> Option<ConfigNode> {
    let container = doc.resolve(parent.path())?;
    let value = match &segment {
        PathSegment::Key(k) => container.member(k),
        PathSegment::Index(i) => container.element(*i),
    }?;
    let kind = value.kind();
    let base = NodeBase::child(Arc::new(parent.clone()), segment);
    tracing::trace!(path = %base.path(), kind = ?kind, "adapting external value");
    Some(build(doc.clone(), kind, base))
}

fn build(doc: Document, kind: ExternalKind, base: NodeBase) -> ConfigNode {
    match kind {
        ExternalKind::Object => ObjectNode::from_parts(doc, base).into(),
        ExternalKind::List => ArrayNode::from_parts(doc, base).into(),
        ExternalKind::Scalar(scalar) => ValueNode::with_base(scalar, base).into(),
        ExternalKind::Null => NullNode::with_base(base).into(),
    }
}

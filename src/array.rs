use crate::adapter::{self, Document, ExternalValue};
use crate::error::{ConfettiError, Result};
use crate::node::{ConfigNode, NodeBase};
use crate::path::{NodePath, PathSegment};

/// A zero-indexed sequence of nodes backed by a list of an external document.
#[derive(Debug, Clone)]
pub struct ArrayNode {
    base: NodeBase,
    doc: Document,
}

impl ArrayNode {
    pub(crate) fn from_parts(doc: Document, base: NodeBase) -> Self {
        ArrayNode { base, doc }
    }

    /// The element at `index`, or [`ConfettiError::IndexOutOfBounds`] unless
    /// `index < size()`.
    pub fn get(&self, index: usize) -> Result<ConfigNode> {
        adapter::to_config_node(
            &self.doc,
            &ConfigNode::Array(self.clone()),
            PathSegment::index(index),
        )
        .ok_or_else(|| ConfettiError::IndexOutOfBounds {
            index,
            size: self.size(),
            path: self.path().clone(),
        })
    }

    pub fn size(&self) -> usize {
        self.external().map_or(0, |v| v.element_count())
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn iter(&self) -> ArrayIter<'_> {
        ArrayIter {
            array: self,
            position: 0,
        }
    }

    /// All elements in index order.
    pub fn to_list(&self) -> Vec<ConfigNode> {
        self.iter().collect()
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
}

/// Visits `0..size()` in order, through [`ArrayNode::get`].
#[derive(Debug)]
pub struct ArrayIter<'a> {
    array: &'a ArrayNode,
    position: usize,
}

impl Iterator for ArrayIter<'_> {
    type Item = ConfigNode;

    fn next(&mut self) -> Option<ConfigNode> {
        if self.position >= self.array.size() {
            return None;
        }
        let node = self.array.get(self.position).ok()?;
        self.position += 1;
        Some(node)
    }
}

impl<'a> IntoIterator for &'a ArrayNode {
    type Item = ConfigNode;
    type IntoIter = ArrayIter<'a>;

    fn into_iter(self) -> ArrayIter<'a> {
        self.iter()
    }
}

//! Addressing nodes within a configuration tree.
//!
//! A [`NodePath`] is an immutable sequence of [`PathSegment`]s leading from the
//! tree root to a node. Paths are persistent: [`NodePath::append`] shares the
//! receiver's storage and returns a new path one segment longer, so any holder
//! of the original path keeps observing exactly what it had.
//!
//! ```text
//! root            <root>
//! root["d"]       d
//! root["d"][1]    d[1]
//! root["a.b"]     ["a.b"]
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, LazyLock};

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::error::{ConfettiError, Result};

/// A single addressing step: a named key or a zero-based index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl PathSegment {
    pub fn key(key: impl Into<String>) -> Self {
        PathSegment::Key(key.into())
    }

    pub fn index(index: usize) -> Self {
        PathSegment::Index(index)
    }

    pub fn is_key(&self) -> bool {
        matches!(self, PathSegment::Key(_))
    }

    pub fn is_index(&self) -> bool {
        matches!(self, PathSegment::Index(_))
    }

    /// The key of a key segment.
    ///
    /// Fails with [`ConfettiError::IllegalSegmentAccess`] on an index segment.
    pub fn get_key(&self) -> Result<&str> {
        match self {
            PathSegment::Key(k) => Ok(k),
            PathSegment::Index(_) => Err(ConfettiError::IllegalSegmentAccess {
                requested: "key",
                segment: self.clone(),
            }),
        }
    }

    /// The index of an index segment.
    ///
    /// Fails with [`ConfettiError::IllegalSegmentAccess`] on a key segment.
    pub fn get_index(&self) -> Result<usize> {
        match self {
            PathSegment::Index(i) => Ok(*i),
            PathSegment::Key(_) => Err(ConfettiError::IllegalSegmentAccess {
                requested: "index",
                segment: self.clone(),
            }),
        }
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(k) => Some(k),
            PathSegment::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(i) => Some(*i),
            PathSegment::Key(_) => None,
        }
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => write!(f, "{k:?}"),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

/// One link of the persistent path list. Links point towards the root.
#[derive(Debug)]
struct Link {
    prev: Option<Arc<Link>>,
    segment: PathSegment,
    len: usize,
}

impl Drop for Link {
    // Unlink iteratively; the default drop recurses once per segment.
    fn drop(&mut self) {
        let mut prev = self.prev.take();
        while let Some(link) = prev {
            match Arc::try_unwrap(link) {
                Ok(mut owned) => prev = owned.prev.take(),
                Err(_) => break,
            }
        }
    }
}

static EMPTY: LazyLock<NodePath> = LazyLock::new(|| NodePath { tail: None });

/// An immutable, ordered sequence of [`PathSegment`]s.
///
/// Equality and hashing are structural. Cloning is O(1).
#[derive(Clone)]
pub struct NodePath {
    tail: Option<Arc<Link>>,
}

impl NodePath {
    /// The canonical zero-length path of a root node.
    pub fn empty() -> NodePath {
        EMPTY.clone()
    }

    /// Return a new path with `segment` appended. `self` is left untouched.
    pub fn append(&self, segment: impl Into<PathSegment>) -> NodePath {
        let len = self.len() + 1;
        NodePath {
            tail: Some(Arc::new(Link {
                prev: self.tail.clone(),
                segment: segment.into(),
                len,
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.tail.as_ref().map_or(0, |link| link.len)
    }

    pub fn is_empty(&self) -> bool {
        self.tail.is_none()
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.tail.as_deref().map(|link| &link.segment)
    }

    /// The path without its last segment, or `None` for the empty path.
    pub fn parent(&self) -> Option<NodePath> {
        self.tail.as_ref().map(|link| NodePath {
            tail: link.prev.clone(),
        })
    }

    /// Snapshot of the segments, root first.
    pub fn segments(&self) -> Vec<PathSegment> {
        self.iter().cloned().collect()
    }

    /// Iterate the segments from the root towards the addressed node.
    pub fn iter(&self) -> std::vec::IntoIter<&PathSegment> {
        let mut out = Vec::with_capacity(self.len());
        let mut cursor = self.tail.as_deref();
        while let Some(link) = cursor {
            out.push(&link.segment);
            cursor = link.prev.as_deref();
        }
        out.reverse();
        out.into_iter()
    }
}

impl Default for NodePath {
    fn default() -> Self {
        NodePath::empty()
    }
}

impl PartialEq for NodePath {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let mut a = self.tail.as_ref();
        let mut b = other.tail.as_ref();
        while let (Some(x), Some(y)) = (a, b) {
            if Arc::ptr_eq(x, y) {
                return true;
            }
            if x.segment != y.segment {
                return false;
            }
            a = x.prev.as_ref();
            b = y.prev.as_ref();
        }
        true
    }
}

impl Eq for NodePath {}

impl Hash for NodePath {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for segment in self.iter() {
            segment.hash(state);
        }
    }
}

impl fmt::Debug for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.iter().enumerate() {
            match segment {
                PathSegment::Key(k) if needs_quoting(k) => write!(f, "[{k:?}]")?,
                PathSegment::Key(k) if i == 0 => write!(f, "{k}")?,
                PathSegment::Key(k) => write!(f, ".{k}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

/// Keys that would read as more than one segment, or as none, when dotted.
fn needs_quoting(key: &str) -> bool {
    key.is_empty() || key.contains(['.', '[', ']', '"'])
}

impl FromIterator<PathSegment> for NodePath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        iter.into_iter()
            .fold(NodePath::empty(), |path, segment| path.append(segment))
    }
}

impl<'a> IntoIterator for &'a NodePath {
    type Item = &'a PathSegment;
    type IntoIter = std::vec::IntoIter<&'a PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for segment in self.iter() {
            seq.serialize_element(segment)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for NodePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let segments = Vec::<PathSegment>::deserialize(deserializer)?;
        Ok(segments.into_iter().collect())
    }
}

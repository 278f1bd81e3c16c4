use std::fmt;

use crate::error::{ConfettiError, Result};
use crate::node::NodeBase;
use crate::path::{NodePath, PathSegment};

/// A scalar read from an external document.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
}

impl Scalar {
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::String(_) => "string",
            Scalar::Integer(_) => "integer",
            Scalar::Float(_) => "float",
            Scalar::Boolean(_) => "boolean",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{s}"),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// A leaf node holding one [`Scalar`].
///
/// The `as_*` accessors do not convert between strings and numbers or
/// booleans. Numbers convert among themselves: a float read as a long is
/// truncated towards zero.
#[derive(Debug, Clone)]
pub struct ValueNode {
    base: NodeBase,
    scalar: Scalar,
}

impl ValueNode {
    /// A root value node.
    pub fn new(scalar: Scalar) -> Self {
        ValueNode::with_base(scalar, NodeBase::root())
    }

    pub fn with_base(scalar: Scalar, base: NodeBase) -> Self {
        ValueNode { base, scalar }
    }

    /// The raw underlying scalar.
    pub fn value(&self) -> &Scalar {
        &self.scalar
    }

    pub fn as_string(&self) -> Result<&str> {
        match &self.scalar {
            Scalar::String(s) => Ok(s),
            other => Err(self.mismatch("string", other)),
        }
    }

    pub fn as_long(&self) -> Result<i64> {
        match &self.scalar {
            Scalar::Integer(i) => Ok(*i),
            Scalar::Float(x) => Ok(*x as i64),
            other => Err(self.mismatch("long", other)),
        }
    }

    pub fn as_double(&self) -> Result<f64> {
        match &self.scalar {
            Scalar::Integer(i) => Ok(*i as f64),
            Scalar::Float(x) => Ok(*x),
            other => Err(self.mismatch("double", other)),
        }
    }

    pub fn as_boolean(&self) -> Result<bool> {
        match &self.scalar {
            Scalar::Boolean(b) => Ok(*b),
            other => Err(self.mismatch("boolean", other)),
        }
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

    fn mismatch(&self, expected: &'static str, found: &Scalar) -> ConfettiError {
        ConfettiError::TypeCoercion {
            expected,
            found: found.type_name(),
            path: self.base.path().clone(),
        }
    }
}

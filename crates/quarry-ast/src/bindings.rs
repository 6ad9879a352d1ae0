use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a local variable or field within one tree.
///
/// Occurrences of the same variable share a `VarId`; the resolver behind
/// the tree builder assigns them. Shadowed names get distinct ids even
/// when their label text is identical.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VarId(pub(crate) u32);

impl VarId {
    pub fn from_raw(raw: u32) -> Self {
        VarId(raw)
    }

    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VarId({})", self.0)
    }
}

/// Resolved variable metadata stored alongside the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VarBinding {
    pub name: String,
}

/// A resolved type reference.
///
/// `identifier` is the stable form used as an index term (the fully
/// qualified name); `name` is the simple name shown to users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeBinding {
    pub identifier: String,
    pub name: String,
}

impl TypeBinding {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        TypeBinding {
            identifier: identifier.into(),
            name: name.into(),
        }
    }
}

/// A resolved method reference, in the same two forms as [`TypeBinding`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodBinding {
    pub identifier: String,
    pub name: String,
}

impl MethodBinding {
    pub fn new(identifier: impl Into<String>, name: impl Into<String>) -> Self {
        MethodBinding {
            identifier: identifier.into(),
            name: name.into(),
        }
    }
}

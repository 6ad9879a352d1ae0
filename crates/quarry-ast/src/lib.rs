//! Syntax-tree facade over the compiler front end.
//!
//! Quarry does not parse Java itself. The front end hands us parsed trees
//! with resolved bindings; this crate defines the tree shape those trees
//! arrive in (a compact arena with parent links and structural child
//! roles) together with the binding data the query layer consumes.
//! [`TreeBuilder`] is the construction surface used by front-end adapters
//! and test fixtures alike.

mod bindings;
mod builder;
mod node;
mod tree;

pub use bindings::{MethodBinding, TypeBinding, VarId};
pub use builder::TreeBuilder;
pub use node::{ChildRole, NodeKind};
pub use tree::{NodeId, SourceTree};

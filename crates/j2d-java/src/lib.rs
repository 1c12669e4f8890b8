//! Java origin tree for the j2d translator.
//!
//! The parser and binding resolver live outside this workspace. Their output is a
//! [`ResolvedProgram`]: the parsed compilation units, where every identifier may
//! carry a [`BindingId`], plus the [`BindingTable`] describing each declared
//! entity. Two identifiers denote the same declaration iff their binding ids are
//! equal.
//!
//! All types deserialize from the resolver's JSON dump (`serde`), which is how
//! the CLI receives them.

pub mod ast;
pub use ast::*;

pub mod binding;
pub use binding::{
    BindingId, BindingInfo, BindingKind, BindingTable, Modifiers, TypeKind, TypeNesting,
};

pub mod program;
pub use program::{MergeError, ResolvedProgram};

mod remap;

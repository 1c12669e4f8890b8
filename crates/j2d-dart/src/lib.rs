//! Dart destination tree for the j2d translator.
//!
//! The tree lives in a [`DartArena`]; nodes reference each other by
//! [`NodeIndex`]. [`DartPrinter`] turns a subtree into formatted source.

pub mod node;
pub use node::{DartNode, MethodKind, NodeFlags, NodeIndex};

pub mod arena;
pub use arena::{DartArena, ExtendedNodeInfo};

pub mod writer;
pub use writer::SourceWriter;

pub mod printer;
pub use printer::{DEFAULT_INDENT_WIDTH, DartPrinter, print_unit, quote_string};

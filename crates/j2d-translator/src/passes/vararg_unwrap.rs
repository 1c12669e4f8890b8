//! Vararg unwrap.
//!
//! A call that passes an array where a variable-arity parameter is expected
//! must not wrap it a second time: a packed argument list holding exactly one
//! array-typed element is replaced by that element.

use super::{RewritePass, all_nodes};
use crate::context::TranslationContext;
use crate::error::Result;
use j2d_dart::{DartArena, DartNode, NodeFlags, NodeIndex};
use tracing::trace;

/// The single array-typed element of a packed vararg list, if that is all the
/// list holds.
#[must_use]
pub fn unwrapped_pack(arena: &DartArena, list: NodeIndex) -> Option<NodeIndex> {
    if !arena.has_flag(list, NodeFlags::VARARGS_PACK) {
        return None;
    }
    match arena.get(list)? {
        DartNode::ListLiteral { elements, .. } => match elements.as_slice() {
            [element] if arena.has_flag(*element, NodeFlags::ARRAY_TYPED) => Some(*element),
            _ => None,
        },
        _ => None,
    }
}

pub struct VarargUnwrap;

impl RewritePass for VarargUnwrap {
    fn name(&self) -> &'static str {
        "vararg-unwrap"
    }

    fn run(&mut self, ctx: &mut TranslationContext) -> Result<()> {
        for node in all_nodes(ctx) {
            if let Some(element) = unwrapped_pack(&ctx.arena, node)
                && ctx.arena.replace(node, element)
            {
                trace!(list = node.0, element = element.0, "unwrapped vararg pack");
            }
        }
        Ok(())
    }
}

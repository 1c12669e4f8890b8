//! Local-variable self-shadow avoidance.
//!
//! In Dart a local is in scope in its own initializer, so `int x = x + 1;`
//! where the right-hand `x` is a field no longer compiles. Such a local is
//! renamed. Occurrences are compared by binding, never by text alone.

use super::{RewritePass, all_nodes, is_bare_reference, is_unqualified_call};
use crate::context::TranslationContext;
use crate::error::Result;
use j2d_dart::{DartNode, NodeIndex};
use tracing::debug;

pub struct LocalShadow;

impl RewritePass for LocalShadow {
    fn name(&self) -> &'static str {
        "local-shadow"
    }

    fn run(&mut self, ctx: &mut TranslationContext) -> Result<()> {
        let locals: Vec<NodeIndex> = all_nodes(ctx)
            .into_iter()
            .filter(|&n| is_local_variable(ctx, n))
            .collect();
        for variable in locals {
            let Some(DartNode::VariableDeclaration { name, initializer }) =
                ctx.arena.get(variable)
            else {
                continue;
            };
            let (name, initializer) = (*name, *initializer);
            let Some(binding) = ctx.binding_of(name) else {
                continue;
            };
            let Some(text) = ctx.current_name(binding).map(str::to_string) else {
                continue;
            };
            let shadowed = ctx.arena.descendants(initializer).into_iter().any(|node| {
                ctx.arena.identifier_text(node) == Some(text.as_str())
                    && (is_bare_reference(&ctx.arena, node)
                        || is_unqualified_call(&ctx.arena, node))
                    && ctx.binding_of(node) != Some(binding)
            });
            if shadowed {
                let fresh = ctx.generate_unique_name(&text);
                debug!(from = %text, to = %fresh, "local shadows a name in its initializer");
                ctx.rename(binding, &fresh);
            }
        }
        Ok(())
    }
}

fn is_local_variable(ctx: &TranslationContext, node: NodeIndex) -> bool {
    matches!(ctx.arena.get(node),
        Some(DartNode::VariableDeclaration { initializer, .. }) if initializer.is_some())
        && matches!(
            ctx.arena.get(ctx.arena.parent(node)),
            Some(DartNode::VariableDeclarationStatement { .. })
        )
}

//! Parameters never hide methods.
//!
//! Java keeps methods and variables in separate namespaces; Dart does not, so
//! a parameter `size` makes a call `size()` in the same body call the
//! parameter. A parameter whose name matches an unqualified call in its
//! method or constructor is renamed.

use super::{RewritePass, all_nodes, is_unqualified_call};
use crate::context::TranslationContext;
use crate::error::Result;
use j2d_dart::{DartNode, NodeFlags, NodeIndex};
use tracing::debug;

pub struct ParamHidesMethod;

impl RewritePass for ParamHidesMethod {
    fn name(&self) -> &'static str {
        "param-hides-method"
    }

    fn run(&mut self, ctx: &mut TranslationContext) -> Result<()> {
        let functions: Vec<NodeIndex> = all_nodes(ctx)
            .into_iter()
            .filter(|&n| {
                matches!(
                    ctx.arena.get(n),
                    Some(DartNode::MethodDeclaration { .. } | DartNode::ConstructorDeclaration { .. })
                )
            })
            .collect();
        for function in functions {
            let (parameters, scope) = match ctx.arena.get(function) {
                Some(DartNode::MethodDeclaration {
                    parameters, body, ..
                }) => (parameters.clone(), vec![*body]),
                Some(DartNode::ConstructorDeclaration {
                    parameters,
                    initializers,
                    body,
                    ..
                }) => {
                    let mut scope = initializers.clone();
                    scope.push(*body);
                    (parameters.clone(), scope)
                }
                _ => continue,
            };
            let called: Vec<NodeIndex> = scope
                .iter()
                .flat_map(|&root| ctx.arena.descendants(root))
                .filter(|&n| is_unqualified_call(&ctx.arena, n))
                .collect();
            if called.is_empty() {
                continue;
            }
            for parameter in parameters {
                rename_if_hiding(ctx, parameter, &called);
            }
        }
        Ok(())
    }
}

fn rename_if_hiding(ctx: &mut TranslationContext, parameter: NodeIndex, called: &[NodeIndex]) {
    if ctx.arena.has_flag(parameter, NodeFlags::SYNTHETIC) {
        return;
    }
    let Some(DartNode::FormalParameter {
        name,
        is_field: false,
        ..
    }) = ctx.arena.get(parameter)
    else {
        return;
    };
    let name = *name;
    let Some(binding) = ctx.binding_of(name) else {
        return;
    };
    let Some(text) = ctx.current_name(binding).map(str::to_string) else {
        return;
    };
    let hides = called.iter().any(|&call_name| {
        ctx.arena.identifier_text(call_name) == Some(text.as_str())
            && ctx.binding_of(call_name) != Some(binding)
    });
    if hides {
        let fresh = ctx.generate_unique_name(&text);
        debug!(from = %text, to = %fresh, "parameter hides a called method");
        ctx.rename(binding, &fresh);
    }
}

//! Library members with a Dart counterpart.
//!
//! Calls are matched on the resolved binding of the called method: its root
//! override for `Object` members, its declaring type otherwise. Declarations
//! overriding `Object.equals` become `operator ==` and `hashCode()` becomes a
//! getter. Calls whose binding is unknown are left as written.

use super::{RewritePass, all_nodes, property};
use crate::context::TranslationContext;
use crate::error::Result;
use crate::library;
use j2d_dart::{DartNode, MethodKind, NodeIndex};
use j2d_java::{BindingId, BindingKind, TypeKind};
use tracing::trace;

pub struct ObjectMembers;

impl RewritePass for ObjectMembers {
    fn name(&self) -> &'static str {
        "object-members"
    }

    fn run(&mut self, ctx: &mut TranslationContext) -> Result<()> {
        // Innermost calls first so a rewritten receiver is already in place.
        let invocations: Vec<NodeIndex> = all_nodes(ctx)
            .into_iter()
            .rev()
            .filter(|&n| matches!(ctx.arena.get(n), Some(DartNode::MethodInvocation { .. })))
            .collect();
        for invocation in invocations {
            rewrite_call(ctx, invocation);
        }
        rewrite_declarations(ctx);
        Ok(())
    }
}

/// Parts of a `MethodInvocation` the rewrites need.
struct Call {
    node: NodeIndex,
    target: NodeIndex,
    name: NodeIndex,
    arguments: Vec<NodeIndex>,
    binding: BindingId,
}

/// Dart counterpart of a library call.
enum Rewrite {
    /// `(a == b)`
    Equals,
    /// `target.name` keeping the original name node.
    Property,
    /// `target.newName`
    RenamedProperty(&'static str),
    /// `target.newName(args)`
    RenamedCall(&'static str),
    /// `target[arg]`
    Index,
    /// `target[key] = value`
    IndexAssign,
    /// `print(args)`, with `""` when there are none.
    Print,
}

fn rewrite_call(ctx: &mut TranslationContext, node: NodeIndex) {
    let Some(DartNode::MethodInvocation {
        target,
        name,
        arguments,
        ..
    }) = ctx.arena.get(node)
    else {
        return;
    };
    let Some(binding) = ctx.binding_of(*name) else {
        return;
    };
    let call = Call {
        node,
        target: *target,
        name: *name,
        arguments: arguments.clone(),
        binding,
    };
    let Some(rewrite) = classify(ctx, &call) else {
        return;
    };
    let replacement = match rewrite {
        Rewrite::Equals => {
            let left = if call.target.is_none() {
                ctx.arena.add(DartNode::This)
            } else {
                call.target
            };
            let comparison = ctx.arena.add(DartNode::Binary {
                operator: "==".to_string(),
                left,
                right: call.arguments[0],
            });
            ctx.arena.add(DartNode::Parenthesized {
                expression: comparison,
            })
        }
        Rewrite::Property => property(&mut ctx.arena, call.target, call.name),
        Rewrite::RenamedProperty(text) => {
            let name = ctx.identifier(text, None);
            property(&mut ctx.arena, call.target, name)
        }
        Rewrite::RenamedCall(text) => {
            let name = ctx.identifier(text, None);
            ctx.arena.replace(call.name, name);
            trace!(call = node.0, to = text, "renamed library call");
            return;
        }
        Rewrite::Index => {
            let target = receiver(ctx, call.target);
            ctx.arena.add(DartNode::Index {
                target,
                index: call.arguments[0],
            })
        }
        Rewrite::IndexAssign => {
            let target = receiver(ctx, call.target);
            let left = ctx.arena.add(DartNode::Index {
                target,
                index: call.arguments[0],
            });
            ctx.arena.add(DartNode::Assignment {
                operator: "=".to_string(),
                left,
                right: call.arguments[1],
            })
        }
        Rewrite::Print => {
            let name = ctx.identifier("print", None);
            let arguments = if call.arguments.is_empty() {
                vec![ctx.arena.add(DartNode::StringLiteral {
                    value: String::new(),
                })]
            } else {
                call.arguments.clone()
            };
            ctx.arena.add(DartNode::MethodInvocation {
                target: NodeIndex::NONE,
                name,
                type_arguments: Vec::new(),
                arguments,
            })
        }
    };
    if ctx.arena.replace(call.node, replacement) {
        trace!(call = node.0, "rewrote library call");
    }
}

fn receiver(ctx: &mut TranslationContext, target: NodeIndex) -> NodeIndex {
    if target.is_none() {
        ctx.arena.add(DartNode::This)
    } else {
        target
    }
}

fn classify(ctx: &TranslationContext, call: &Call) -> Option<Rewrite> {
    let bindings = ctx.bindings();
    let info = bindings.get(call.binding)?;
    if info.kind != BindingKind::Method {
        return None;
    }
    let argc = call.arguments.len();
    let name = info.name.as_str();
    let root = bindings.root_override(call.binding);
    let is_super_call = matches!(ctx.arena.get(call.target), Some(DartNode::Super));

    if bindings.declaring_type_name(root) == Some(library::OBJECT) {
        return match (name, argc) {
            ("equals", 1) if !is_super_call => Some(Rewrite::Equals),
            ("hashCode", 0) => Some(Rewrite::Property),
            ("getClass", 0) => Some(Rewrite::RenamedProperty("runtimeType")),
            _ => None,
        };
    }

    let owner = bindings.declaring_type_name(call.binding)?;
    if owner == library::STRING {
        return match (name, argc) {
            ("length" | "isEmpty", 0) => Some(Rewrite::Property),
            ("charAt", 1) => Some(Rewrite::RenamedCall("codeUnitAt")),
            _ => None,
        };
    }
    if library::is_list_type(owner) {
        return match (name, argc) {
            ("size", 0) => Some(Rewrite::RenamedProperty("length")),
            ("isEmpty", 0) => Some(Rewrite::Property),
            ("get", 1) => Some(Rewrite::Index),
            _ => None,
        };
    }
    if library::is_map_type(owner) {
        let in_statement = matches!(
            ctx.arena.get(ctx.arena.parent(call.node)),
            Some(DartNode::ExpressionStatement { .. })
        );
        return match (name, argc) {
            ("size", 0) => Some(Rewrite::RenamedProperty("length")),
            ("isEmpty", 0) => Some(Rewrite::Property),
            ("get", 1) => Some(Rewrite::Index),
            ("put", 2) if in_statement => Some(Rewrite::IndexAssign),
            _ => None,
        };
    }
    if owner == library::ENUM {
        return match (name, argc) {
            ("name" | "ordinal", 0) => Some(Rewrite::Property),
            _ => None,
        };
    }
    if owner == library::PRINT_STREAM && name == "println" && argc <= 1 {
        return Some(Rewrite::Print);
    }
    let is_enum_values = name == "values"
        && argc == 0
        && info.is_static()
        && info
            .declaring_type
            .and_then(|t| bindings.get(t))
            .and_then(|t| t.type_kind)
            == Some(TypeKind::Enum);
    is_enum_values.then_some(Rewrite::Property)
}

/// `equals` overrides become `operator ==`, `hashCode` overrides a getter.
fn rewrite_declarations(ctx: &mut TranslationContext) {
    let overrides: Vec<(BindingId, MethodKind, &'static str)> = ctx
        .bindings()
        .iter()
        .filter(|(id, info)| info.kind == BindingKind::Method && ctx.is_declared(*id))
        .filter(|(id, _)| {
            ctx.bindings().declaring_type_name(ctx.bindings().root_override(*id))
                == Some(library::OBJECT)
        })
        .filter_map(|(id, info)| match (info.name.as_str(), info.parameter_count) {
            ("equals", 1) => Some((id, MethodKind::Operator, "==")),
            ("hashCode", 0) => Some((id, MethodKind::Getter, "hashCode")),
            _ => None,
        })
        .collect();
    for (binding, kind, name) in overrides {
        let declaration = ctx.declaration(binding);
        if let Some(DartNode::MethodDeclaration { kind: slot, .. }) =
            ctx.arena.get_mut(declaration)
        {
            *slot = kind;
        }
        ctx.rename(binding, name);
        ctx.pin(binding);
    }
}

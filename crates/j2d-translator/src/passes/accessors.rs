//! Property accessors.
//!
//! `T getX()` and `bool isX()` become getters `x`, `void setX(T v)` becomes a
//! setter `x`. Methods are handled per override group (a declared root and
//! every method overriding it) so a hierarchy converts as a whole. A setter
//! group converts only when every call stands alone as a statement.

use super::RewritePass;
use crate::context::TranslationContext;
use crate::error::Result;
use indexmap::IndexMap;
use j2d_common::{Diagnostic, diagnostic_codes};
use j2d_dart::{DartNode, MethodKind, NodeIndex};
use j2d_java::{BindingId, BindingKind};
use tracing::debug;

pub struct Accessors;

impl RewritePass for Accessors {
    fn name(&self) -> &'static str {
        "accessors"
    }

    fn run(&mut self, ctx: &mut TranslationContext) -> Result<()> {
        for (root, members) in override_groups(ctx) {
            let Some(kind) = accessor_kind(ctx, root) else {
                continue;
            };
            let Some(property) = property_name(ctx, root, kind) else {
                continue;
            };
            let calls: Vec<NodeIndex> = members
                .iter()
                .flat_map(|&m| call_sites(ctx, m))
                .collect();
            if kind == MethodKind::Setter
                && let Some(&misplaced) = calls.iter().find(|&&c| !in_statement_position(ctx, c))
            {
                let name = ctx.current_name(root).unwrap_or_default().to_string();
                let location = ctx.arena.nearest_location(misplaced).cloned();
                ctx.report(Diagnostic::warning(
                    diagnostic_codes::SETTER_CALL_NOT_IN_STATEMENT,
                    &[&name],
                    location,
                ));
                continue;
            }
            debug!(
                property = %property,
                ?kind,
                methods = members.len(),
                calls = calls.len(),
                "converting accessor"
            );
            for call in calls {
                rewrite_call(ctx, call, kind);
            }
            for &member in &members {
                let declaration = ctx.declaration(member);
                if let Some(DartNode::MethodDeclaration { kind: slot, .. }) =
                    ctx.arena.get_mut(declaration)
                {
                    *slot = kind;
                }
                ctx.rename(member, &property);
            }
        }
        Ok(())
    }
}

/// Declared, unpinned methods grouped under their declared root override.
fn override_groups(ctx: &TranslationContext) -> IndexMap<BindingId, Vec<BindingId>> {
    let mut groups: IndexMap<BindingId, Vec<BindingId>> = IndexMap::new();
    for (id, info) in ctx.bindings().iter() {
        if info.kind != BindingKind::Method || !ctx.is_declared(id) || ctx.is_pinned(id) {
            continue;
        }
        let root = ctx.bindings().root_override(id);
        if ctx.is_declared(root) {
            groups.entry(root).or_default().push(id);
        }
    }
    groups
}

/// Getter or setter shape of the root declaration, if it has one.
fn accessor_kind(ctx: &TranslationContext, root: BindingId) -> Option<MethodKind> {
    let info = ctx.binding_info(root)?;
    let Some(DartNode::MethodDeclaration {
        kind: MethodKind::Method,
        return_type,
        type_parameters,
        parameters,
        ..
    }) = ctx.arena.get(ctx.declaration(root))
    else {
        return None;
    };
    if !type_parameters.is_empty() {
        return None;
    }
    let returns_void = match ctx.arena.get(*return_type) {
        Some(DartNode::TypeName { name, .. }) => ctx.arena.identifier_text(*name) == Some("void"),
        _ => false,
    };
    let name = info.name.as_str();
    match parameters.len() {
        0 if !returns_void && (has_prefix(name, "get") || has_prefix(name, "is")) => {
            Some(MethodKind::Getter)
        }
        1 if returns_void && has_prefix(name, "set") => Some(MethodKind::Setter),
        _ => None,
    }
}

/// `prefix` followed by an upper-case letter.
fn has_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_uppercase)
}

/// `getFooBar` -> `fooBar`.
fn property_name(ctx: &TranslationContext, root: BindingId, kind: MethodKind) -> Option<String> {
    let name = ctx.binding_info(root)?.name.as_str();
    let rest = match kind {
        MethodKind::Getter => name
            .strip_prefix("get")
            .filter(|rest| !rest.is_empty())
            .or_else(|| name.strip_prefix("is"))?,
        _ => name.strip_prefix("set")?,
    };
    let mut chars = rest.chars();
    let first = chars.next()?;
    Some(first.to_lowercase().chain(chars).collect())
}

/// Attached invocation nodes whose name is an occurrence of `method`.
fn call_sites(ctx: &TranslationContext, method: BindingId) -> Vec<NodeIndex> {
    ctx.occurrences(method)
        .iter()
        .map(|&ident| ctx.arena.parent(ident))
        .filter(|&call| {
            matches!(ctx.arena.get(call), Some(DartNode::MethodInvocation { .. }))
                && ctx.arena.parent(call).is_some()
        })
        .collect()
}

fn in_statement_position(ctx: &TranslationContext, call: NodeIndex) -> bool {
    matches!(
        ctx.arena.get(ctx.arena.parent(call)),
        Some(DartNode::ExpressionStatement { .. })
    )
}

/// `a.getX()` -> `a.x`, `a.setX(v)` -> `a.x = v`. The name node is reused so
/// the rename that follows reaches it.
fn rewrite_call(ctx: &mut TranslationContext, call: NodeIndex, kind: MethodKind) {
    let Some(DartNode::MethodInvocation {
        target,
        name,
        arguments,
        ..
    }) = ctx.arena.get(call)
    else {
        return;
    };
    let (target, name, value) = (*target, *name, arguments.first().copied());
    let access = super::property(&mut ctx.arena, target, name);
    let replacement = match (kind, value) {
        (MethodKind::Setter, Some(value)) => ctx.arena.add(DartNode::Assignment {
            operator: "=".to_string(),
            left: access,
            right: value,
        }),
        _ => access,
    };
    ctx.arena.replace(call, replacement);
}

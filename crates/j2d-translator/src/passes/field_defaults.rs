//! Field-initializer completion.
//!
//! Fields of a Java primitive type declared without an initializer get their
//! zero value. Boxed types (`Integer`, `Boolean`, ...) map to the same Dart
//! names but default to `null`, so they are left alone. Final fields without
//! an initializer lose `final`: they are assigned in constructor bodies, which
//! Dart does not allow for final fields.

use super::RewritePass;
use crate::context::TranslationContext;
use crate::error::Result;
use crate::library;
use j2d_dart::{DartNode, NodeFlags, NodeIndex};

pub struct FieldDefaults;

impl RewritePass for FieldDefaults {
    fn name(&self) -> &'static str {
        "field-defaults"
    }

    fn run(&mut self, ctx: &mut TranslationContext) -> Result<()> {
        let classes: Vec<NodeIndex> = ctx.classes.iter().map(|c| c.declaration).collect();
        for class in classes {
            let fields: Vec<NodeIndex> = ctx
                .arena
                .class_members(class)
                .iter()
                .copied()
                .filter(|&m| !ctx.arena.has_flag(m, NodeFlags::SYNTHETIC))
                .collect();
            for field in fields {
                complete_field(ctx, field);
            }
        }
        Ok(())
    }
}

fn complete_field(ctx: &mut TranslationContext, field: NodeIndex) {
    let Some(DartNode::FieldDeclaration {
        is_final,
        ty,
        variables,
        ..
    }) = ctx.arena.get(field)
    else {
        return;
    };
    let (is_final, ty, variables) = (*is_final, *ty, variables.clone());
    let uninitialized: Vec<NodeIndex> = variables
        .into_iter()
        .filter(|&v| {
            matches!(ctx.arena.get(v),
                Some(DartNode::VariableDeclaration { initializer, .. }) if initializer.is_none())
        })
        .collect();
    if uninitialized.is_empty() {
        return;
    }
    if is_final {
        if let Some(DartNode::FieldDeclaration { is_final, .. }) = ctx.arena.get_mut(field) {
            *is_final = false;
        }
        return;
    }
    if !ctx.arena.has_flag(field, NodeFlags::PRIMITIVE_TYPED) {
        return;
    }
    let type_name = match ctx.arena.get(ty) {
        Some(DartNode::TypeName {
            name,
            type_arguments,
        }) if type_arguments.is_empty() => ctx.arena.identifier_text(*name).map(str::to_string),
        _ => None,
    };
    let Some(type_name) = type_name else {
        return;
    };
    for variable in uninitialized {
        let Some(value) = library::default_literal(&mut ctx.arena, &type_name) else {
            return;
        };
        if let Some(DartNode::VariableDeclaration { initializer, .. }) = ctx.arena.get_mut(variable)
        {
            *initializer = value;
        }
        ctx.arena.set_parent(value, variable);
    }
}

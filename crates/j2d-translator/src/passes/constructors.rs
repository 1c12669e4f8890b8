//! Constructor disambiguation.
//!
//! Dart allows one unnamed constructor per class; the others need names.
//! Per class:
//! - no constructor: nothing to do;
//! - one constructor: it keeps the unnamed slot, and is dropped entirely when
//!   it takes no parameters and does nothing beyond an implicit `super()`;
//! - several: a configured name wins, the first constructor without declared
//!   parameters keeps the unnamed slot, the rest become `con1`, `con2`, ...
//!   skipping numbers whose name is already a member of the class.
//!
//! Every rename goes through [`TranslationContext::rename_constructor`], which
//! updates the declaration and all recorded call sites together.

use super::{RewritePass, constructors_of};
use crate::context::TranslationContext;
use crate::error::Result;
use j2d_common::{Diagnostic, diagnostic_codes};
use j2d_dart::{DartNode, NodeFlags, NodeIndex};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

pub struct Constructors;

impl RewritePass for Constructors {
    fn name(&self) -> &'static str {
        "constructors"
    }

    fn run(&mut self, ctx: &mut TranslationContext) -> Result<()> {
        for record in 0..ctx.classes.len() {
            let class = ctx.classes[record].declaration;
            match constructors_of(&ctx.arena, class).as_slice() {
                [] => {}
                [single] => {
                    if is_trivial(ctx, *single) {
                        trace!(class = %ctx.class_name(record), "dropping trivial constructor");
                        ctx.arena.detach(*single);
                    }
                }
                several => name_constructors(ctx, record, several),
            }
        }
        Ok(())
    }
}

/// No parameters, no body and nothing but an optional `super()` with no
/// arguments: Dart supplies the same constructor implicitly.
fn is_trivial(ctx: &TranslationContext, constructor: NodeIndex) -> bool {
    let Some(DartNode::ConstructorDeclaration {
        parameters,
        initializers,
        body,
        ..
    }) = ctx.arena.get(constructor)
    else {
        return false;
    };
    let initializers_trivial = match initializers.as_slice() {
        [] => true,
        [only] => matches!(ctx.arena.get(*only),
            Some(DartNode::SuperConstructorInvocation { name, arguments })
                if name.is_none() && arguments.is_empty()),
        _ => false,
    };
    parameters.is_empty()
        && initializers_trivial
        && (body.is_none() || ctx.arena.block_statements(*body).is_empty())
}

fn declared_parameter_count(ctx: &TranslationContext, constructor: NodeIndex) -> usize {
    match ctx.arena.get(constructor) {
        Some(DartNode::ConstructorDeclaration { parameters, .. }) => parameters
            .iter()
            .filter(|&&p| !ctx.arena.has_flag(p, NodeFlags::SYNTHETIC))
            .count(),
        _ => 0,
    }
}

/// Names of the class's methods and fields.
fn member_names(ctx: &TranslationContext, class: NodeIndex) -> FxHashSet<String> {
    let mut names = FxHashSet::default();
    for &member in ctx.arena.class_members(class) {
        let nodes = match ctx.arena.get(member) {
            Some(DartNode::MethodDeclaration { name, .. }) => vec![*name],
            Some(DartNode::FieldDeclaration { variables, .. }) => variables
                .iter()
                .map(|&v| ctx.arena.declaration_name(v))
                .collect(),
            _ => Vec::new(),
        };
        names.extend(
            nodes
                .into_iter()
                .filter_map(|n| ctx.arena.identifier_text(n))
                .map(str::to_string),
        );
    }
    names
}

fn name_constructors(ctx: &mut TranslationContext, record: usize, constructors: &[NodeIndex]) {
    let class = ctx.classes[record].declaration;
    let class_name = ctx.class_name(record);
    let mut taken = member_names(ctx, class);
    let mut unnamed_used = false;
    let mut next = 1;
    for &constructor in constructors {
        let Some(binding) = ctx.constructor_binding(constructor) else {
            let location = ctx.arena.nearest_location(constructor).cloned();
            ctx.report(Diagnostic::warning(
                diagnostic_codes::CONSTRUCTOR_WITHOUT_BINDING,
                &[&class_name],
                location,
            ));
            continue;
        };
        if let Some(name) = ctx.configured_rename(binding).map(str::to_string) {
            ctx.rename_constructor(binding, Some(&name));
            taken.insert(name);
            continue;
        }
        if !unnamed_used && declared_parameter_count(ctx, constructor) == 0 {
            unnamed_used = true;
            continue;
        }
        let name = loop {
            let candidate = format!("con{next}");
            next += 1;
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        let updated = ctx.rename_constructor(binding, Some(&name));
        debug!(class = %class_name, constructor = %name, updated, "named constructor");
        taken.insert(name);
    }
}

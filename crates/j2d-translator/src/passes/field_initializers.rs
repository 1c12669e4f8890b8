//! Self-reference extraction from field initializers.
//!
//! Dart field initializers run before the instance exists and cannot read
//! `this`. An instance field initializer that refers to the instance (a `this`
//! node, or an unqualified instance field or method) is moved into the
//! constructors as `this.f = init;`. Instance initializer blocks always move.
//! Moved code lands at the start of every constructor that does not redirect,
//! in class-body order; a class without constructors gets a synthesized one.
//!
//! Anything else stays where it is. An initializer reaching the instance
//! through `super` is not moved and is reported.

use super::{RewritePass, constructors_of, is_bare_reference, is_unqualified_call};
use crate::context::{InstanceInit, TranslationContext};
use crate::error::Result;
use j2d_common::{Diagnostic, diagnostic_codes};
use j2d_dart::{DartNode, NodeFlags, NodeIndex};
use j2d_java::BindingKind;
use tracing::{debug, trace};

pub struct FieldInitializers;

impl RewritePass for FieldInitializers {
    fn name(&self) -> &'static str {
        "field-initializers"
    }

    fn run(&mut self, ctx: &mut TranslationContext) -> Result<()> {
        for record in 0..ctx.classes.len() {
            if ctx.classes[record].instance_inits.is_empty() {
                continue;
            }
            let statements = extract(ctx, record);
            if !statements.is_empty() {
                debug!(class = %ctx.class_name(record), count = statements.len(), "moved instance initializers");
                insert_into_constructors(ctx, record, &statements);
            }
        }
        Ok(())
    }
}

/// What to do with one field initializer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InitializerShape {
    /// Independent of the instance.
    Stays,
    /// Refers to the instance in a recognized form.
    Moves,
    /// Refers to the instance in a form that is not handled.
    Unrecognized,
}

/// Collect the statements that replace a class's instance-dependent
/// initializers, detaching them from their declarations.
fn extract(ctx: &mut TranslationContext, record: usize) -> Vec<NodeIndex> {
    let inits = ctx.classes[record].instance_inits.clone();
    let mut statements = Vec::new();
    for init in inits {
        match init {
            InstanceInit::Field(variable) => {
                let Some(DartNode::VariableDeclaration { initializer, .. }) =
                    ctx.arena.get(variable)
                else {
                    continue;
                };
                let initializer = *initializer;
                if initializer.is_none() {
                    continue;
                }
                match classify(ctx, initializer) {
                    InitializerShape::Stays => {}
                    InitializerShape::Moves => {
                        statements.push(move_initializer(ctx, variable));
                    }
                    InitializerShape::Unrecognized => {
                        let name = ctx.arena.declaration_name(variable);
                        let name = ctx.arena.identifier_text(name).unwrap_or_default().to_string();
                        let location = ctx.arena.nearest_location(variable).cloned();
                        ctx.report(Diagnostic::warning(
                            diagnostic_codes::FIELD_INITIALIZER_NOT_EXTRACTED,
                            &[&name],
                            location,
                        ));
                    }
                }
            }
            InstanceInit::Block(block) => {
                let body = ctx.arena.block_statements(block).to_vec();
                for &statement in &body {
                    ctx.arena.set_parent(statement, NodeIndex::NONE);
                }
                statements.extend(body);
            }
        }
    }
    statements
}

fn classify(ctx: &TranslationContext, initializer: NodeIndex) -> InitializerShape {
    let mut shape = InitializerShape::Stays;
    for node in ctx.arena.descendants(initializer) {
        match ctx.arena.get(node) {
            Some(DartNode::Super) => return InitializerShape::Unrecognized,
            Some(DartNode::This) => shape = InitializerShape::Moves,
            Some(DartNode::Identifier { .. }) if is_instance_member_reference(ctx, node) => {
                shape = InitializerShape::Moves;
            }
            _ => {}
        }
    }
    shape
}

/// An unqualified identifier bound to an instance field or method.
fn is_instance_member_reference(ctx: &TranslationContext, ident: NodeIndex) -> bool {
    if !is_bare_reference(&ctx.arena, ident) && !is_unqualified_call(&ctx.arena, ident) {
        return false;
    }
    ctx.binding_of(ident)
        .and_then(|b| ctx.binding_info(b))
        .is_some_and(|info| {
            matches!(info.kind, BindingKind::Field | BindingKind::Method) && !info.is_static()
        })
}

fn is_instance_field_reference(ctx: &TranslationContext, ident: NodeIndex) -> bool {
    is_bare_reference(&ctx.arena, ident)
        && ctx
            .binding_of(ident)
            .and_then(|b| ctx.binding_info(b))
            .is_some_and(|info| info.kind == BindingKind::Field && !info.is_static())
}

/// Detach the initializer of `variable` and build `this.f = init;`.
fn move_initializer(ctx: &mut TranslationContext, variable: NodeIndex) -> NodeIndex {
    let initializer = match ctx.arena.get(variable) {
        Some(DartNode::VariableDeclaration { initializer, .. }) => *initializer,
        _ => NodeIndex::NONE,
    };
    // Inside a constructor a parameter may shadow the field, so bare field
    // reads become `this.x` while the initializer is still attached.
    let fields: Vec<NodeIndex> = ctx
        .arena
        .descendants(initializer)
        .into_iter()
        .filter(|&n| is_instance_field_reference(ctx, n))
        .collect();
    for ident in fields {
        qualify_with_this(ctx, ident);
    }
    let initializer = match ctx.arena.get_mut(variable) {
        Some(DartNode::VariableDeclaration { initializer, .. }) => {
            std::mem::replace(initializer, NodeIndex::NONE)
        }
        _ => NodeIndex::NONE,
    };
    ctx.arena.set_parent(initializer, NodeIndex::NONE);

    let field = ctx.arena.parent(variable);
    if let Some(DartNode::FieldDeclaration { is_final, .. }) = ctx.arena.get_mut(field) {
        *is_final = false;
    }

    let name = ctx.arena.declaration_name(variable);
    let text = ctx.arena.identifier_text(name).unwrap_or_default().to_string();
    let binding = ctx.binding_of(name);
    trace!(field = %text, "extracting field initializer");
    let target = ctx.arena.add(DartNode::This);
    let field_name = ctx.identifier(&text, binding);
    let left = ctx.arena.add(DartNode::PropertyAccess {
        target,
        name: field_name,
    });
    let assignment = ctx.arena.add(DartNode::Assignment {
        operator: "=".to_string(),
        left,
        right: initializer,
    });
    ctx.arena.add_flagged(
        DartNode::ExpressionStatement {
            expression: assignment,
        },
        NodeFlags::SYNTHETIC,
    )
}

/// Replace the identifier `ident` with `this.ident`.
fn qualify_with_this(ctx: &mut TranslationContext, ident: NodeIndex) {
    let target = ctx.arena.add(DartNode::This);
    let access = ctx.arena.add(DartNode::PropertyAccess {
        target,
        name: NodeIndex::NONE,
    });
    if !ctx.arena.replace(ident, access) {
        return;
    }
    if let Some(DartNode::PropertyAccess { name, .. }) = ctx.arena.get_mut(access) {
        *name = ident;
    }
    ctx.arena.set_parent(ident, access);
}

fn is_redirecting(ctx: &TranslationContext, constructor: NodeIndex) -> bool {
    matches!(ctx.arena.get(constructor),
        Some(DartNode::ConstructorDeclaration { initializers, .. })
            if initializers.iter().any(|&i| matches!(
                ctx.arena.get(i),
                Some(DartNode::RedirectingConstructorInvocation { .. })
            )))
}

/// Prepend `statements` to every non-redirecting constructor body. The first
/// constructor receives the nodes themselves, the others receive copies.
fn insert_into_constructors(ctx: &mut TranslationContext, record: usize, statements: &[NodeIndex]) {
    let class = ctx.classes[record].declaration;
    let targets: Vec<NodeIndex> = constructors_of(&ctx.arena, class)
        .into_iter()
        .filter(|&c| !is_redirecting(ctx, c))
        .collect();

    if targets.is_empty() {
        let constructor = synthesize_constructor(ctx, record, statements.to_vec());
        let position = ctx
            .arena
            .class_members(class)
            .iter()
            .position(|&m| !matches!(ctx.arena.get(m), Some(DartNode::FieldDeclaration { .. })))
            .unwrap_or(usize::MAX);
        ctx.arena.insert_member(class, position, constructor);
        return;
    }

    for (i, &constructor) in targets.iter().enumerate() {
        let body = constructor_body(ctx, constructor);
        for (position, &statement) in statements.iter().enumerate() {
            let statement = if i == 0 {
                statement
            } else {
                ctx.clone_subtree(statement)
            };
            ctx.arena.insert_statement(body, position, statement);
        }
    }
}

/// The body block of a constructor, created when it has none.
fn constructor_body(ctx: &mut TranslationContext, constructor: NodeIndex) -> NodeIndex {
    if let Some(DartNode::ConstructorDeclaration { body, .. }) = ctx.arena.get(constructor)
        && matches!(ctx.arena.get(*body), Some(DartNode::Block { .. }))
    {
        return *body;
    }
    let block = ctx.arena.add(DartNode::Block {
        statements: Vec::new(),
    });
    if let Some(DartNode::ConstructorDeclaration { body, .. }) = ctx.arena.get_mut(constructor) {
        *body = block;
    }
    ctx.arena.set_parent(block, constructor);
    block
}

/// `ClassName() { statements }`
fn synthesize_constructor(
    ctx: &mut TranslationContext,
    record: usize,
    statements: Vec<NodeIndex>,
) -> NodeIndex {
    let name = ctx.class_name(record);
    let binding = ctx.classes[record].binding;
    let class_name = ctx.identifier(&name, binding);
    let body = ctx.arena.add(DartNode::Block { statements });
    ctx.arena.add_flagged(
        DartNode::ConstructorDeclaration {
            class_name,
            name: NodeIndex::NONE,
            parameters: Vec::new(),
            initializers: Vec::new(),
            body,
        },
        NodeFlags::SYNTHETIC,
    )
}

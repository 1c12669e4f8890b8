//! Semantic rewrite pipeline.
//!
//! Passes run strictly one after another over the whole translated forest, in
//! the order [`default_passes`] returns them. Each pass may rely on what the
//! passes before it established; none of them runs twice.

pub mod accessors;
pub mod configured_renames;
pub mod constructors;
pub mod field_defaults;
pub mod field_initializers;
pub mod inner_class_names;
pub mod local_shadow;
pub mod object_members;
pub mod param_hides_method;
pub mod unique_names;
pub mod vararg_unwrap;

use crate::context::TranslationContext;
use crate::error::Result;
use j2d_dart::{DartArena, DartNode, NodeIndex};
use tracing::{debug, debug_span};

/// One whole-program rewrite.
pub trait RewritePass {
    /// Stable name used in logs.
    fn name(&self) -> &'static str;

    fn run(&mut self, ctx: &mut TranslationContext) -> Result<()>;
}

/// The pipeline in execution order. Accessor conversion is opt-in.
#[must_use]
pub fn default_passes(convert_accessors: bool) -> Vec<Box<dyn RewritePass>> {
    let mut passes: Vec<Box<dyn RewritePass>> = vec![
        Box::new(configured_renames::ConfiguredRenames),
        Box::new(inner_class_names::InnerClassNames),
        Box::new(vararg_unwrap::VarargUnwrap),
        Box::new(field_defaults::FieldDefaults),
        Box::new(field_initializers::FieldInitializers),
        Box::new(object_members::ObjectMembers),
    ];
    if convert_accessors {
        passes.push(Box::new(accessors::Accessors));
    }
    passes.push(Box::new(unique_names::UniqueNames));
    passes.push(Box::new(local_shadow::LocalShadow));
    passes.push(Box::new(param_hides_method::ParamHidesMethod));
    passes.push(Box::new(constructors::Constructors));
    passes
}

/// Run `passes` in order, stopping at the first fatal error.
pub fn run_passes(ctx: &mut TranslationContext, passes: &mut [Box<dyn RewritePass>]) -> Result<()> {
    for pass in passes {
        let _span = debug_span!("pass", name = pass.name()).entered();
        let before = ctx.diagnostics().len();
        pass.run(ctx)?;
        debug!(
            diagnostics = ctx.diagnostics().len() - before,
            "pass finished"
        );
    }
    Ok(())
}

// =============================================================================
// Tree queries shared by passes
// =============================================================================

/// Every node reachable from an output unit, pre-order, units in order.
pub(crate) fn all_nodes(ctx: &TranslationContext) -> Vec<NodeIndex> {
    ctx.units
        .iter()
        .flat_map(|unit| ctx.arena.descendants(unit.root))
        .collect()
}

/// True when the identifier `ident` is read as a plain name: not a member
/// selected from a target, not a type, not a declaration's own name.
pub(crate) fn is_bare_reference(arena: &DartArena, ident: NodeIndex) -> bool {
    let parent = arena.parent(ident);
    match arena.get(parent) {
        Some(DartNode::PropertyAccess { name, .. }) => *name != ident,
        Some(
            DartNode::MethodInvocation { .. }
            | DartNode::TypeName { .. }
            | DartNode::RedirectingConstructorInvocation { .. }
            | DartNode::SuperConstructorInvocation { .. },
        ) => false,
        Some(DartNode::ConstructorDeclaration {
            class_name, name, ..
        }) => *class_name != ident && *name != ident,
        Some(DartNode::InstanceCreation {
            constructor_name, ..
        }) => *constructor_name != ident,
        Some(
            DartNode::VariableDeclaration { name, .. }
            | DartNode::FormalParameter { name, .. }
            | DartNode::MethodDeclaration { name, .. }
            | DartNode::ClassDeclaration { name, .. }
            | DartNode::TypeParameter { name, .. }
            | DartNode::ForEach { name, .. }
            | DartNode::CatchClause { name, .. },
        ) => *name != ident,
        _ => true,
    }
}

/// True when `ident` names a method called without a target (`foo(x)`).
pub(crate) fn is_unqualified_call(arena: &DartArena, ident: NodeIndex) -> bool {
    matches!(arena.get(arena.parent(ident)),
        Some(DartNode::MethodInvocation { target, name, .. }) if *name == ident && target.is_none())
}

/// Constructor declarations of a class, in member order.
pub(crate) fn constructors_of(arena: &DartArena, class: NodeIndex) -> Vec<NodeIndex> {
    arena
        .class_members(class)
        .iter()
        .copied()
        .filter(|&m| matches!(arena.get(m), Some(DartNode::ConstructorDeclaration { .. })))
        .collect()
}

/// `target.name`, or the bare name when there is no target.
pub(crate) fn property(arena: &mut DartArena, target: NodeIndex, name: NodeIndex) -> NodeIndex {
    if target.is_none() {
        return name;
    }
    arena.add(DartNode::PropertyAccess { target, name })
}

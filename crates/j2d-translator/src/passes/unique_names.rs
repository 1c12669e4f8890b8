//! Unique names.
//!
//! Dart has no overloading and a single member namespace per class, so:
//! - top-level class names are made unique across the merged forest;
//! - within a class, a method that overrides a translated method takes that
//!   method's name, one overriding a library method keeps its name, and every
//!   other member that collides with an inherited or earlier member is renamed.
//!   Methods are settled before fields, so a method keeps its name over a field.
//!   A getter and a setter may share a name;
//! - finally, any translated name that is a reserved word is renamed.
//!
//! Classes are visited interfaces first, then by superclass depth, so a
//! superclass's names are final before its subclasses look at them.

use super::RewritePass;
use crate::context::TranslationContext;
use crate::error::Result;
use j2d_dart::{DartNode, MethodKind, NodeIndex};
use j2d_java::{BindingId, BindingKind, TypeKind};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

pub struct UniqueNames;

impl RewritePass for UniqueNames {
    fn name(&self) -> &'static str {
        "unique-names"
    }

    fn run(&mut self, ctx: &mut TranslationContext) -> Result<()> {
        unique_class_names(ctx);
        for record in class_order(ctx) {
            unique_member_names(ctx, record);
        }
        avoid_reserved_words(ctx);
        follow_overridden_names(ctx);
        Ok(())
    }
}

/// How a name is held within one class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Member,
    Getter,
    Setter,
    /// A getter and a setter sharing the name.
    Accessors,
}

impl Slot {
    fn of(kind: MethodKind) -> Self {
        match kind {
            MethodKind::Getter => Self::Getter,
            MethodKind::Setter => Self::Setter,
            MethodKind::Method | MethodKind::Operator => Self::Member,
        }
    }
}

#[derive(Default)]
struct ClassNames {
    taken: FxHashMap<String, Slot>,
}

impl ClassNames {
    fn fits(&self, name: &str, slot: Slot) -> bool {
        matches!(
            (self.taken.get(name), slot),
            (None, _) | (Some(Slot::Getter), Slot::Setter) | (Some(Slot::Setter), Slot::Getter)
        )
    }

    fn claim(&mut self, name: &str, slot: Slot) {
        let merged = match (self.taken.get(name), slot) {
            (Some(Slot::Getter), Slot::Setter) | (Some(Slot::Setter), Slot::Getter) => {
                Slot::Accessors
            }
            _ => slot,
        };
        self.taken.insert(name.to_string(), merged);
    }
}

/// A named class member.
struct Member {
    binding: Option<BindingId>,
    name: String,
    slot: Slot,
    is_method: bool,
}

fn unique_class_names(ctx: &mut TranslationContext) {
    let mut seen = FxHashSet::default();
    for record in 0..ctx.classes.len() {
        let name = ctx.class_name(record);
        if seen.insert(name.clone()) {
            continue;
        }
        let Some(binding) = ctx.classes[record].binding else {
            continue;
        };
        if ctx.is_pinned(binding) {
            continue;
        }
        let fresh = ctx.generate_unique_name(&name);
        debug!(from = %name, to = %fresh, "duplicate class name");
        ctx.rename(binding, &fresh);
        seen.insert(fresh);
    }
}

/// Binding of the class a record extends, read from its `extends` clause.
fn superclass_of(ctx: &TranslationContext, record: usize) -> Option<BindingId> {
    let record = &ctx.classes[record];
    if let Some(binding) = record.binding
        && let Some(superclass) = ctx.binding_info(binding).and_then(|i| i.superclass)
    {
        return Some(superclass);
    }
    match ctx.arena.get(record.declaration) {
        Some(DartNode::ClassDeclaration { extends, .. }) => match ctx.arena.get(*extends) {
            Some(DartNode::TypeName { name, .. }) => ctx.binding_of(*name),
            _ => None,
        },
        _ => None,
    }
}

/// Superclasses of a record, nearest first.
fn ancestors(ctx: &TranslationContext, record: usize) -> Vec<BindingId> {
    let Some(superclass) = superclass_of(ctx, record) else {
        return Vec::new();
    };
    let mut chain = vec![superclass];
    chain.extend(ctx.bindings().superclasses(superclass));
    chain
}

fn class_order(ctx: &TranslationContext) -> Vec<usize> {
    let mut order: Vec<usize> = (0..ctx.classes.len()).collect();
    order.sort_by_key(|&record| {
        (
            ctx.classes[record].type_kind != TypeKind::Interface,
            ancestors(ctx, record).len(),
        )
    });
    order
}

fn members_of(ctx: &TranslationContext, class: NodeIndex) -> Vec<Member> {
    let mut members = Vec::new();
    for &member in ctx.arena.class_members(class) {
        match ctx.arena.get(member) {
            Some(DartNode::MethodDeclaration { kind, name, .. }) => {
                if *kind == MethodKind::Operator {
                    continue;
                }
                members.push(Member {
                    binding: ctx.binding_of(*name),
                    name: ctx.arena.identifier_text(*name).unwrap_or_default().to_string(),
                    slot: Slot::of(*kind),
                    is_method: true,
                });
            }
            Some(DartNode::FieldDeclaration { variables, .. }) => {
                for &variable in variables {
                    let name = ctx.arena.declaration_name(variable);
                    members.push(Member {
                        binding: ctx.binding_of(name),
                        name: ctx.arena.identifier_text(name).unwrap_or_default().to_string(),
                        slot: Slot::Member,
                        is_method: false,
                    });
                }
            }
            _ => {}
        }
    }
    members
}

fn unique_member_names(ctx: &mut TranslationContext, record: usize) {
    let mut names = ClassNames::default();
    for ancestor in ancestors(ctx, record) {
        for (id, info) in ctx.bindings().members_of(ancestor) {
            if matches!(
                info.kind,
                BindingKind::Method | BindingKind::Field | BindingKind::EnumConstant
            ) {
                let name = ctx.current_name(id).unwrap_or(info.name.as_str());
                names.claim(name, Slot::Member);
            }
        }
    }

    let class = ctx.classes[record].declaration;
    let members = members_of(ctx, class);

    // Synthetic members have no binding and cannot move.
    for member in members.iter().filter(|m| m.binding.is_none()) {
        names.claim(&member.name, member.slot);
    }

    // Overriding methods.
    for member in members.iter().filter(|m| m.is_method) {
        let Some(binding) = member.binding else {
            continue;
        };
        let root = ctx.bindings().root_override(binding);
        if root == binding {
            continue;
        }
        let mut name = member.name.clone();
        if ctx.is_declared(root)
            && !ctx.is_pinned(binding)
            && let Some(root_name) = ctx.current_name(root)
            && root_name != name
        {
            name = root_name.to_string();
            ctx.rename(binding, &name);
        }
        names.claim(&name, member.slot);
    }

    // Everything else, methods before fields.
    let rest = members
        .iter()
        .filter(|m| m.is_method)
        .chain(members.iter().filter(|m| !m.is_method));
    for member in rest {
        let Some(binding) = member.binding else {
            continue;
        };
        if member.is_method && ctx.bindings().root_override(binding) != binding {
            continue;
        }
        if ctx.is_pinned(binding) || names.fits(&member.name, member.slot) {
            names.claim(&member.name, member.slot);
            continue;
        }
        let fresh = fresh_name(ctx, &names, &member.name);
        debug!(
            class = %ctx.class_name(record),
            from = %member.name,
            to = %fresh,
            "member name collision"
        );
        ctx.rename(binding, &fresh);
        names.claim(&fresh, member.slot);
    }
}

/// Globally unused name based on `base` that is also free in this class.
fn fresh_name(ctx: &mut TranslationContext, names: &ClassNames, base: &str) -> String {
    loop {
        let candidate = ctx.generate_unique_name(base);
        if !names.taken.contains_key(&candidate) {
            return candidate;
        }
    }
}

fn avoid_reserved_words(ctx: &mut TranslationContext) {
    let bindings = ctx.bindings();
    let targets: Vec<(BindingId, String)> = ctx
        .registered_bindings()
        .filter(|&b| ctx.is_declared(b) && !ctx.is_pinned(b))
        .filter(|&b| ctx.binding_kind(b) != Some(BindingKind::Constructor))
        .filter(|&b| {
            ctx.binding_kind(b) != Some(BindingKind::Method) || bindings.root_override(b) == b
        })
        .filter_map(|b| {
            let name = ctx.current_name(b)?;
            ctx.is_forbidden(name).then(|| (b, name.to_string()))
        })
        .collect();
    for (binding, name) in targets {
        let fresh = ctx.generate_unique_name(&name);
        ctx.rename(binding, &fresh);
    }
}

/// Give every overriding method the current name of the method it overrides.
fn follow_overridden_names(ctx: &mut TranslationContext) {
    let pending: Vec<(BindingId, String)> = ctx
        .bindings()
        .iter()
        .filter(|(id, info)| {
            info.kind == BindingKind::Method && ctx.is_declared(*id) && !ctx.is_pinned(*id)
        })
        .filter_map(|(id, _)| {
            let root = ctx.bindings().root_override(id);
            if root == id || !ctx.is_declared(root) {
                return None;
            }
            let wanted = ctx.current_name(root)?;
            (ctx.current_name(id) != Some(wanted)).then(|| (id, wanted.to_string()))
        })
        .collect();
    for (binding, name) in pending {
        ctx.rename(binding, &name);
    }
}

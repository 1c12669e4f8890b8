//! Resolved program: the unit of input the translator consumes.

use crate::ast::{BodyDeclaration, CompilationUnit, TypeDeclaration};
use crate::binding::{BindingId, BindingInfo, BindingKind, BindingTable};
use crate::remap::BindingRemapper;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

/// Bindings plus the compilation units that reference them.
///
/// Serialized form:
///
/// ```json
/// { "bindings": [ { "kind": "type", "name": "Foo", ... } ],
///   "units": [ { "path": "Foo.java", "types": [ ... ] } ] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedProgram {
    #[serde(default)]
    pub bindings: BindingTable,
    #[serde(default)]
    pub units: Vec<CompilationUnit>,
}

/// Dumps that cannot be combined into one program.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("`{name}` is declared in more than one resolver dump")]
    DuplicateDeclaration { name: String },
    #[error("`{member}` is used as a member of `{owner}`, which declares no unique matching member")]
    UnresolvedMember { member: String, owner: String },
}

/// Identity of a declaration that holds across dumps.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum MergeKey {
    Type(String),
    Signature(BindingKind, String),
    Member {
        kind: BindingKind,
        owner: BindingId,
        name: String,
        parameters: usize,
    },
}

impl ResolvedProgram {
    #[must_use]
    pub const fn new(bindings: BindingTable, units: Vec<CompilationUnit>) -> Self {
        Self { bindings, units }
    }

    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Append `other`, giving each declaration one binding in the merged table.
    ///
    /// Each dump carries its own bindings for declarations it only references.
    /// Those are unified with the binding of the same declaration from the other
    /// side: types by qualified name, members by signature, or by kind, owner,
    /// name and parameter count when the resolver recorded no signature.
    /// Parameters and locals are never shared. Everything else gets a fresh id.
    pub fn merge(&mut self, mut other: ResolvedProgram) -> Result<(), MergeError> {
        let own_declared = declared_types(&self.units);
        let other_declared = declared_types(&other.units);
        let index = self.merge_index();
        let incoming = std::mem::take(other.bindings.bindings_mut());

        let mut targets: Vec<Option<BindingId>> = vec![None; incoming.len()];
        let mut adopted: FxHashMap<usize, BindingId> = FxHashMap::default();
        // Types first: member keys need the owner's merged id.
        for types in [true, false] {
            for (i, info) in incoming.iter().enumerate() {
                if (info.kind == BindingKind::Type) != types {
                    continue;
                }
                let owner = merged_owner(info, &targets);
                let Some(key) = merge_key(info, owner) else {
                    continue;
                };
                let incoming_declares = declares(info, binding_id(i), &other_declared);
                let Some(&Some(existing)) = index.get(&key) else {
                    if !incoming_declares
                        && let Some(owner) = owner
                        && own_declared.contains(&owner)
                    {
                        return Err(MergeError::UnresolvedMember {
                            member: info.name.clone(),
                            owner: self.display_name(owner),
                        });
                    }
                    continue;
                };
                let existing_declares = self
                    .bindings
                    .get(existing)
                    .is_some_and(|e| declares(e, existing, &own_declared));
                if incoming_declares && existing_declares {
                    return Err(MergeError::DuplicateDeclaration {
                        name: self.display_name(existing),
                    });
                }
                targets[i] = Some(existing);
                if incoming_declares {
                    adopted.insert(i, existing);
                }
            }
        }
        self.check_adopted_members(&incoming, &targets, &adopted)?;

        let mut next = self.bindings.len();
        let map: Vec<BindingId> = targets
            .iter()
            .map(|target| {
                target.unwrap_or_else(|| {
                    next += 1;
                    binding_id(next - 1)
                })
            })
            .collect();
        let remapper = BindingRemapper::new(map);

        for (i, mut info) in incoming.into_iter().enumerate() {
            remapper.info(&mut info);
            if targets[i].is_none() {
                self.bindings.bindings_mut().push(info);
            } else if let Some(existing) = adopted.get(&i)
                && let Some(slot) = self.bindings.bindings_mut().get_mut(existing.index())
            {
                // The declaring dump knows more (modifiers, overrides) than a reference.
                *slot = info;
            }
        }
        for unit in &mut other.units {
            remapper.unit(unit);
        }
        self.units.append(&mut other.units);
        Ok(())
    }

    /// Total number of top-level type declarations across all units.
    #[must_use]
    pub fn type_count(&self) -> usize {
        self.units.iter().map(|u| u.types.len()).sum()
    }

    /// Keys of this program's bindings. `None` marks a key shared by several
    /// bindings, which is never unified.
    fn merge_index(&self) -> FxHashMap<MergeKey, Option<BindingId>> {
        let mut index = FxHashMap::default();
        for (id, info) in self.bindings.iter() {
            if let Some(key) = merge_key(info, info.declaring_type) {
                index
                    .entry(key)
                    .and_modify(|slot| *slot = None)
                    .or_insert(Some(id));
            }
        }
        index
    }

    /// Members this program only referenced on a type the incoming dump
    /// declares must all have found their declaration.
    fn check_adopted_members(
        &self,
        incoming: &[BindingInfo],
        targets: &[Option<BindingId>],
        adopted: &FxHashMap<usize, BindingId>,
    ) -> Result<(), MergeError> {
        let adopted_types: FxHashSet<BindingId> = adopted
            .iter()
            .filter(|(i, _)| incoming[**i].kind == BindingKind::Type)
            .map(|(_, existing)| *existing)
            .collect();
        if adopted_types.is_empty() {
            return Ok(());
        }
        let unified: FxHashSet<BindingId> = targets.iter().flatten().copied().collect();
        for (id, info) in self.bindings.iter() {
            if let Some(owner) = info.declaring_type
                && is_member(info.kind)
                && adopted_types.contains(&owner)
                && !unified.contains(&id)
            {
                return Err(MergeError::UnresolvedMember {
                    member: info.name.clone(),
                    owner: self.display_name(owner),
                });
            }
        }
        Ok(())
    }

    fn display_name(&self, id: BindingId) -> String {
        self.bindings.get(id).map_or_else(
            || format!("#{}", id.0),
            |info| info.qualified_name.clone().unwrap_or_else(|| info.name.clone()),
        )
    }
}

const fn is_member(kind: BindingKind) -> bool {
    matches!(
        kind,
        BindingKind::Field | BindingKind::Method | BindingKind::Constructor | BindingKind::EnumConstant
    )
}

fn binding_id(index: usize) -> BindingId {
    BindingId(index as u32)
}

fn merged_owner(info: &BindingInfo, targets: &[Option<BindingId>]) -> Option<BindingId> {
    let owner = info.declaring_type?;
    targets.get(owner.index()).copied().flatten()
}

fn merge_key(info: &BindingInfo, owner: Option<BindingId>) -> Option<MergeKey> {
    if info.kind == BindingKind::Type {
        return info.qualified_name.clone().map(MergeKey::Type);
    }
    if !is_member(info.kind) {
        return None;
    }
    if let Some(signature) = &info.signature {
        return Some(MergeKey::Signature(info.kind, signature.clone()));
    }
    owner.map(|owner| MergeKey::Member {
        kind: info.kind,
        owner,
        name: info.name.clone(),
        parameters: info.parameter_count,
    })
}

/// Whether the program owning `declared` holds the declaration of `id`.
fn declares(info: &BindingInfo, id: BindingId, declared: &FxHashSet<BindingId>) -> bool {
    if info.kind == BindingKind::Type {
        declared.contains(&id)
    } else {
        info.declaring_type
            .is_some_and(|owner| declared.contains(&owner))
    }
}

/// Bindings of the top-level and member types declared in `units`.
fn declared_types(units: &[CompilationUnit]) -> FxHashSet<BindingId> {
    fn visit(decl: &TypeDeclaration, out: &mut FxHashSet<BindingId>) {
        out.extend(decl.name.binding);
        for member in &decl.body {
            if let BodyDeclaration::Type { declaration } = member {
                visit(declaration, out);
            }
        }
    }
    let mut declared = FxHashSet::default();
    for unit in units {
        for ty in &unit.types {
            visit(ty, &mut declared);
        }
    }
    declared
}

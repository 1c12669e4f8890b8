//! Resolver bindings.
//!
//! A binding is the resolver-supplied identity of a declared entity. The engine
//! never creates bindings; it only keys its tables by [`BindingId`] and reads the
//! facts recorded in [`BindingInfo`].

use serde::{Deserialize, Serialize};

/// Opaque identity of a declared entity. Index into the [`BindingTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingId(pub u32);

impl BindingId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingKind {
    Type,
    Field,
    Method,
    Constructor,
    Parameter,
    LocalVariable,
    EnumConstant,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

/// Where a type is declared relative to other types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeNesting {
    TopLevel,
    Member,
    Local,
    Anonymous,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Modifiers {
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub is_public: bool,
    pub is_protected: bool,
    pub is_private: bool,
}

impl Modifiers {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            is_static: false,
            is_final: false,
            is_abstract: false,
            is_public: false,
            is_protected: false,
            is_private: false,
        }
    }

    #[must_use]
    pub const fn static_() -> Self {
        let mut m = Self::none();
        m.is_static = true;
        m
    }

    #[must_use]
    pub const fn final_() -> Self {
        let mut m = Self::none();
        m.is_final = true;
        m
    }

    #[must_use]
    pub const fn abstract_() -> Self {
        let mut m = Self::none();
        m.is_abstract = true;
        m
    }
}

/// Facts the resolver records about one declared entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingInfo {
    pub kind: BindingKind,
    pub name: String,
    /// Stable textual key (declaring type + member name + erased parameters).
    #[serde(default)]
    pub signature: Option<String>,
    /// Declaring type for members, enclosing type for nested types.
    #[serde(default)]
    pub declaring_type: Option<BindingId>,
    /// Fully qualified name, types only (`java.util.List`).
    #[serde(default)]
    pub qualified_name: Option<String>,
    #[serde(default)]
    pub superclass: Option<BindingId>,
    #[serde(default)]
    pub type_kind: Option<TypeKind>,
    #[serde(default)]
    pub nesting: Option<TypeNesting>,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub is_varargs: bool,
    /// Declared parameter count for methods and constructors, vararg included.
    #[serde(default)]
    pub parameter_count: usize,
    /// The method this method overrides, if any.
    #[serde(default)]
    pub overrides: Option<BindingId>,
}

impl BindingInfo {
    pub fn new(kind: BindingKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            signature: None,
            declaring_type: None,
            qualified_name: None,
            superclass: None,
            type_kind: None,
            nesting: None,
            modifiers: Modifiers::none(),
            is_varargs: false,
            parameter_count: 0,
            overrides: None,
        }
    }

    /// A top-level class binding.
    pub fn class(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut info = Self::new(BindingKind::Type, name.clone());
        info.qualified_name = Some(name);
        info.type_kind = Some(TypeKind::Class);
        info.nesting = Some(TypeNesting::TopLevel);
        info
    }

    #[must_use]
    pub fn declared_in(mut self, declaring_type: BindingId) -> Self {
        self.declaring_type = Some(declaring_type);
        self
    }

    #[must_use]
    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    #[must_use]
    pub fn qualified(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = Some(qualified_name.into());
        self
    }

    #[must_use]
    pub const fn extending(mut self, superclass: BindingId) -> Self {
        self.superclass = Some(superclass);
        self
    }

    #[must_use]
    pub const fn of_kind(mut self, type_kind: TypeKind) -> Self {
        self.type_kind = Some(type_kind);
        self
    }

    #[must_use]
    pub const fn nested(mut self, nesting: TypeNesting) -> Self {
        self.nesting = Some(nesting);
        self
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn params(mut self, count: usize) -> Self {
        self.parameter_count = count;
        self
    }

    #[must_use]
    pub const fn varargs(mut self) -> Self {
        self.is_varargs = true;
        self
    }

    #[must_use]
    pub const fn overriding(mut self, method: BindingId) -> Self {
        self.overrides = Some(method);
        self
    }

    #[must_use]
    pub const fn is_static(&self) -> bool {
        self.modifiers.is_static
    }
}

/// All bindings known to the resolver, indexed by [`BindingId`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingTable {
    bindings: Vec<BindingInfo>,
}

impl BindingTable {
    /// Upper bound on override-chain walks; resolver output with a cycle stops here.
    const MAX_OVERRIDE_DEPTH: usize = 256;

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new binding and return its id.
    pub fn declare(&mut self, info: BindingInfo) -> BindingId {
        let id = BindingId(self.bindings.len() as u32);
        self.bindings.push(info);
        id
    }

    #[must_use]
    pub fn get(&self, id: BindingId) -> Option<&BindingInfo> {
        self.bindings.get(id.index())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BindingId, &BindingInfo)> {
        self.bindings
            .iter()
            .enumerate()
            .map(|(i, info)| (BindingId(i as u32), info))
    }

    pub(crate) fn bindings_mut(&mut self) -> &mut Vec<BindingInfo> {
        &mut self.bindings
    }

    /// Follow the override chain to the top-most overridden method.
    #[must_use]
    pub fn root_override(&self, method: BindingId) -> BindingId {
        let mut current = method;
        for _ in 0..Self::MAX_OVERRIDE_DEPTH {
            match self.get(current).and_then(|info| info.overrides) {
                Some(next) if next != current => current = next,
                _ => break,
            }
        }
        current
    }

    /// Qualified name of the type declaring `member`.
    #[must_use]
    pub fn declaring_type_name(&self, member: BindingId) -> Option<&str> {
        let owner = self.get(member)?.declaring_type?;
        let info = self.get(owner)?;
        Some(info.qualified_name.as_deref().unwrap_or(&info.name))
    }

    /// Superclass chain of `ty`, nearest first, excluding `ty` itself.
    #[must_use]
    pub fn superclasses(&self, ty: BindingId) -> Vec<BindingId> {
        let mut chain = Vec::new();
        let mut current = self.get(ty).and_then(|info| info.superclass);
        while let Some(next) = current {
            if next == ty || chain.contains(&next) {
                break;
            }
            chain.push(next);
            current = self.get(next).and_then(|info| info.superclass);
        }
        chain
    }

    /// Members whose declaring type is `ty`, in declaration order.
    pub fn members_of(&self, ty: BindingId) -> impl Iterator<Item = (BindingId, &BindingInfo)> {
        self.iter()
            .filter(move |(_, info)| info.declaring_type == Some(ty) && info.kind != BindingKind::Type)
    }
}

#[cfg(test)]
#[path = "../tests/binding_tests.rs"]
mod tests;

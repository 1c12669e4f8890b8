//! Translation context.
//!
//! Owns the destination arena and every table that must stay consistent across
//! the whole program: the occurrence registry (binding to identifier nodes),
//! the used and forbidden name sets, constructor descriptions and the
//! configured rename table. The structural translator fills it; rewrite passes
//! read and mutate it one at a time.

use indexmap::IndexMap;
use j2d_common::keywords::RESERVED_WORDS;
use j2d_common::{Diagnostic, SourceLocation};
use j2d_dart::{DartArena, DartNode, NodeIndex};
use j2d_java::{BindingId, BindingInfo, BindingKind, BindingTable, TypeKind, TypeNesting};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

/// Call-site kinds tracked per constructor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConstructorSite {
    /// `this(...)` / `this.name(...)` in an initializer list.
    Redirecting,
    /// `super(...)` / `super.name(...)` in an initializer list.
    Super,
    /// `new T(...)` / `new T.name(...)`.
    Creation,
    /// Call of the synthetic method holding a lowered constructor body.
    ImplInvocation,
}

/// Everything that must change together when a constructor is renamed.
#[derive(Clone, Debug, Default)]
pub struct ConstructorDescription {
    pub declaration: NodeIndex,
    pub redirecting: Vec<NodeIndex>,
    pub super_invocations: Vec<NodeIndex>,
    pub creations: Vec<NodeIndex>,
    /// Synthetic method holding the lowered body, if the class was lowered.
    pub impl_declaration: NodeIndex,
    pub impl_invocations: Vec<NodeIndex>,
}

impl ConstructorDescription {
    #[must_use]
    pub fn call_site_count(&self) -> usize {
        self.redirecting.len()
            + self.super_invocations.len()
            + self.creations.len()
            + self.impl_invocations.len()
    }

    fn sites_mut(&mut self, kind: ConstructorSite) -> &mut Vec<NodeIndex> {
        match kind {
            ConstructorSite::Redirecting => &mut self.redirecting,
            ConstructorSite::Super => &mut self.super_invocations,
            ConstructorSite::Creation => &mut self.creations,
            ConstructorSite::ImplInvocation => &mut self.impl_invocations,
        }
    }
}

/// Name of the synthetic method holding a lowered constructor body.
#[must_use]
pub fn impl_method_name(constructor_name: Option<&str>) -> String {
    constructor_name.map_or_else(|| "_impl".to_string(), |name| format!("_{name}_impl"))
}

/// One instance initializer in class-body order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstanceInit {
    /// A `VariableDeclaration` of an instance field that has an initializer.
    Field(NodeIndex),
    /// A detached `Block` from an instance initializer block.
    Block(NodeIndex),
}

/// A destination class and the facts passes need about its origin.
#[derive(Clone, Debug)]
pub struct ClassRecord {
    pub binding: Option<BindingId>,
    pub declaration: NodeIndex,
    pub type_kind: TypeKind,
    pub nesting: TypeNesting,
    /// Index of the enclosing class record, for nested, local and anonymous classes.
    pub enclosing: Option<usize>,
    pub unit: usize,
    pub instance_inits: Vec<InstanceInit>,
}

/// One output file.
#[derive(Clone, Debug)]
pub struct OutputUnit {
    /// Output path relative to the output root, with a `.dart` extension.
    pub path: String,
    pub root: NodeIndex,
}

#[derive(Debug)]
pub struct TranslationContext {
    pub arena: DartArena,
    bindings: BindingTable,
    occurrences: IndexMap<BindingId, Vec<NodeIndex>>,
    node_bindings: FxHashMap<NodeIndex, BindingId>,
    original_names: FxHashMap<BindingId, String>,
    current_names: FxHashMap<BindingId, String>,
    used_names: FxHashSet<String>,
    forbidden_names: FxHashSet<String>,
    constructors: IndexMap<BindingId, ConstructorDescription>,
    constructor_sites: FxHashMap<NodeIndex, (BindingId, ConstructorSite)>,
    constructor_nodes: FxHashMap<NodeIndex, BindingId>,
    declarations: FxHashMap<BindingId, NodeIndex>,
    renames: IndexMap<String, String>,
    pinned: FxHashSet<BindingId>,
    anonymous_counters: FxHashMap<String, u32>,
    pub classes: Vec<ClassRecord>,
    pub units: Vec<OutputUnit>,
    diagnostics: Vec<Diagnostic>,
}

impl TranslationContext {
    #[must_use]
    pub fn new(bindings: BindingTable) -> Self {
        Self::with_renames(bindings, IndexMap::new())
    }

    #[must_use]
    pub fn with_renames(bindings: BindingTable, renames: IndexMap<String, String>) -> Self {
        Self {
            arena: DartArena::new(),
            bindings,
            occurrences: IndexMap::new(),
            node_bindings: FxHashMap::default(),
            original_names: FxHashMap::default(),
            current_names: FxHashMap::default(),
            used_names: FxHashSet::default(),
            forbidden_names: RESERVED_WORDS.iter().map(|w| (*w).to_string()).collect(),
            constructors: IndexMap::new(),
            constructor_sites: FxHashMap::default(),
            constructor_nodes: FxHashMap::default(),
            declarations: FxHashMap::default(),
            renames,
            pinned: FxHashSet::default(),
            anonymous_counters: FxHashMap::default(),
            classes: Vec::new(),
            units: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    #[must_use]
    pub const fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    #[must_use]
    pub fn binding_info(&self, binding: BindingId) -> Option<&BindingInfo> {
        self.bindings.get(binding)
    }

    // =========================================================================
    // Occurrence registry
    // =========================================================================

    /// Create an identifier node and register it.
    pub fn identifier(&mut self, name: &str, binding: Option<BindingId>) -> NodeIndex {
        let node = self.arena.add(DartNode::Identifier {
            name: name.to_string(),
        });
        self.register_occurrence(binding, node, name);
        node
    }

    /// Same as [`Self::identifier`], with an origin location attached.
    pub fn identifier_at(
        &mut self,
        name: &str,
        binding: Option<BindingId>,
        location: Option<&SourceLocation>,
    ) -> NodeIndex {
        let node = self.identifier(name, binding);
        self.arena.set_location(node, location.cloned());
        node
    }

    /// Record `node` as an occurrence of `binding` and reserve `declared_name`.
    pub fn register_occurrence(
        &mut self,
        binding: Option<BindingId>,
        node: NodeIndex,
        declared_name: &str,
    ) {
        if let Some(binding) = binding {
            self.occurrences.entry(binding).or_default().push(node);
            self.node_bindings.insert(node, binding);
            self.original_names
                .entry(binding)
                .or_insert_with(|| declared_name.to_string());
            self.current_names
                .entry(binding)
                .or_insert_with(|| declared_name.to_string());
        }
        self.used_names.insert(declared_name.to_string());
    }

    #[must_use]
    pub fn binding_of(&self, node: NodeIndex) -> Option<BindingId> {
        self.node_bindings.get(&node).copied()
    }

    #[must_use]
    pub fn occurrences(&self, binding: BindingId) -> &[NodeIndex] {
        self.occurrences
            .get(&binding)
            .map_or(&[], |nodes| nodes.as_slice())
    }

    /// Bindings with at least one occurrence, in first-registration order.
    pub fn registered_bindings(&self) -> impl Iterator<Item = BindingId> + '_ {
        self.occurrences.keys().copied()
    }

    #[must_use]
    pub fn original_name(&self, binding: BindingId) -> Option<&str> {
        self.original_names.get(&binding).map(String::as_str)
    }

    /// Name every occurrence of `binding` currently renders as.
    #[must_use]
    pub fn current_name(&self, binding: BindingId) -> Option<&str> {
        self.current_names.get(&binding).map(String::as_str)
    }

    /// Rewrite every occurrence of `binding` to `new_name`. Returns the number of
    /// nodes rewritten.
    pub fn rename(&mut self, binding: BindingId, new_name: &str) -> usize {
        let Some(nodes) = self.occurrences.get(&binding) else {
            return 0;
        };
        let mut count = 0;
        for &node in nodes {
            if self.arena.set_identifier_text(node, new_name) {
                count += 1;
            }
        }
        debug!(
            binding = binding.0,
            from = self.current_names.get(&binding).map(String::as_str),
            to = new_name,
            count,
            "rename"
        );
        self.current_names.insert(binding, new_name.to_string());
        self.used_names.insert(new_name.to_string());
        count
    }

    // =========================================================================
    // Name sets
    // =========================================================================

    /// `base` if free, otherwise the first free `base2`, `base3`, ... The
    /// returned name is reserved.
    pub fn generate_unique_name(&mut self, base: &str) -> String {
        if !self.is_forbidden(base) && !self.used_names.contains(base) {
            self.used_names.insert(base.to_string());
            return base.to_string();
        }
        let mut n: u32 = 2;
        loop {
            let candidate = format!("{base}{n}");
            if !self.is_forbidden(&candidate) && !self.used_names.contains(&candidate) {
                trace!(base, name = %candidate, "generated unique name");
                self.used_names.insert(candidate.clone());
                return candidate;
            }
            n += 1;
        }
    }

    pub fn reserve_name(&mut self, name: &str) {
        self.used_names.insert(name.to_string());
    }

    #[must_use]
    pub fn is_name_used(&self, name: &str) -> bool {
        self.used_names.contains(name)
    }

    #[must_use]
    pub fn is_forbidden(&self, name: &str) -> bool {
        self.forbidden_names.contains(name)
    }

    // =========================================================================
    // Declarations and pinned names
    // =========================================================================

    /// Record the destination declaration node of a translated binding.
    pub fn declare(&mut self, binding: BindingId, declaration: NodeIndex) {
        self.declarations.insert(binding, declaration);
    }

    /// True when the binding's declaration was translated (not a library symbol).
    #[must_use]
    pub fn is_declared(&self, binding: BindingId) -> bool {
        self.declarations.contains_key(&binding)
    }

    #[must_use]
    pub fn declaration(&self, binding: BindingId) -> NodeIndex {
        self.declarations
            .get(&binding)
            .copied()
            .unwrap_or(NodeIndex::NONE)
    }

    /// Fix the current name of `binding`; later passes leave it alone.
    pub fn pin(&mut self, binding: BindingId) {
        self.pinned.insert(binding);
    }

    #[must_use]
    pub fn is_pinned(&self, binding: BindingId) -> bool {
        self.pinned.contains(&binding)
    }

    /// Configured new name for a binding, looked up by its signature.
    #[must_use]
    pub fn configured_rename(&self, binding: BindingId) -> Option<&str> {
        let signature = self.bindings.get(binding)?.signature.as_deref()?;
        self.renames.get(signature).map(String::as_str)
    }

    #[must_use]
    pub const fn renames(&self) -> &IndexMap<String, String> {
        &self.renames
    }

    /// Next `N` for an anonymous class named `{enclosing}_N`.
    pub fn next_anonymous_index(&mut self, enclosing: &str) -> u32 {
        let counter = self
            .anonymous_counters
            .entry(enclosing.to_string())
            .or_insert(0);
        *counter += 1;
        *counter
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Get or create the description of a constructor.
    pub fn constructor_description(&mut self, binding: BindingId) -> &mut ConstructorDescription {
        self.constructors.entry(binding).or_default()
    }

    #[must_use]
    pub fn constructor(&self, binding: BindingId) -> Option<&ConstructorDescription> {
        self.constructors.get(&binding)
    }

    /// Register a constructor declaration node.
    pub fn declare_constructor(&mut self, binding: BindingId, declaration: NodeIndex) {
        self.constructor_description(binding).declaration = declaration;
        self.constructor_nodes.insert(declaration, binding);
        self.declare(binding, declaration);
    }

    /// Binding of a `ConstructorDeclaration` node.
    #[must_use]
    pub fn constructor_binding(&self, declaration: NodeIndex) -> Option<BindingId> {
        self.constructor_nodes.get(&declaration).copied()
    }

    pub fn record_constructor_site(
        &mut self,
        binding: BindingId,
        kind: ConstructorSite,
        node: NodeIndex,
    ) {
        self.constructor_description(binding).sites_mut(kind).push(node);
        self.constructor_sites.insert(node, (binding, kind));
    }

    pub fn set_impl_declaration(&mut self, binding: BindingId, method: NodeIndex) {
        self.constructor_description(binding).impl_declaration = method;
    }

    /// Name a constructor (`None` for the unnamed slot) and update every recorded
    /// site. Returns the number of declaration and call-site occurrences updated.
    pub fn rename_constructor(&mut self, binding: BindingId, name: Option<&str>) -> usize {
        let Some(description) = self.constructors.get(&binding).cloned() else {
            return 0;
        };
        let mut count = 0;
        if description.declaration.is_some() {
            self.set_constructor_name(description.declaration, binding, name);
            count += 1;
        }
        for &site in description
            .redirecting
            .iter()
            .chain(&description.super_invocations)
            .chain(&description.creations)
        {
            self.set_constructor_name(site, binding, name);
            count += 1;
        }
        let impl_name = impl_method_name(name);
        if description.impl_declaration.is_some() {
            let name_node = self.arena.declaration_name(description.impl_declaration);
            self.arena.set_identifier_text(name_node, &impl_name);
        }
        for &site in &description.impl_invocations {
            if let Some(DartNode::MethodInvocation { name, .. }) = self.arena.get(site) {
                let name = *name;
                self.arena.set_identifier_text(name, &impl_name);
                count += 1;
            }
        }
        if let Some(name) = name {
            self.used_names.insert(name.to_string());
        }
        debug!(binding = binding.0, name, count, "rename constructor");
        count
    }

    /// Set the constructor-name slot of a declaration or call-site node.
    fn set_constructor_name(&mut self, node: NodeIndex, binding: BindingId, name: Option<&str>) {
        let existing = match self.arena.get(node) {
            Some(
                DartNode::ConstructorDeclaration { name, .. }
                | DartNode::RedirectingConstructorInvocation { name, .. }
                | DartNode::SuperConstructorInvocation { name, .. }
                | DartNode::InstanceCreation {
                    constructor_name: name,
                    ..
                },
            ) => *name,
            _ => return,
        };
        let replacement = match name {
            Some(text) if existing.is_some() => {
                self.arena.set_identifier_text(existing, text);
                return;
            }
            Some(text) => self.identifier(text, Some(binding)),
            None => NodeIndex::NONE,
        };
        if let Some(
            DartNode::ConstructorDeclaration { name, .. }
            | DartNode::RedirectingConstructorInvocation { name, .. }
            | DartNode::SuperConstructorInvocation { name, .. }
            | DartNode::InstanceCreation {
                constructor_name: name,
                ..
            },
        ) = self.arena.get_mut(node)
        {
            *name = replacement;
        }
        self.arena.set_parent(replacement, node);
        self.arena.set_parent(existing, NodeIndex::NONE);
    }

    // =========================================================================
    // Subtree copies
    // =========================================================================

    /// Deep-copy a subtree, registering every copied identifier and constructor
    /// site against the same binding as its original.
    pub fn clone_subtree(&mut self, root: NodeIndex) -> NodeIndex {
        let mut pairs = Vec::new();
        let copy = self
            .arena
            .deep_clone(root, &mut |from, to| pairs.push((from, to)));
        for (from, to) in pairs {
            if let Some(binding) = self.binding_of(from) {
                let name = self.arena.identifier_text(to).unwrap_or_default().to_string();
                self.register_occurrence(Some(binding), to, &name);
            }
            if let Some(&(binding, kind)) = self.constructor_sites.get(&from) {
                self.record_constructor_site(binding, kind, to);
            }
        }
        copy
    }

    // =========================================================================
    // Classes and units
    // =========================================================================

    /// Register a class and return its record index.
    pub fn add_class(&mut self, record: ClassRecord) -> usize {
        if let Some(binding) = record.binding {
            self.declare(binding, record.declaration);
        }
        self.classes.push(record);
        self.classes.len() - 1
    }

    /// Record index of the class declaring `binding`.
    #[must_use]
    pub fn class_index(&self, binding: BindingId) -> Option<usize> {
        self.classes.iter().position(|c| c.binding == Some(binding))
    }

    /// Current rendered name of a class record.
    #[must_use]
    pub fn class_name(&self, index: usize) -> String {
        self.classes
            .get(index)
            .map(|record| self.arena.declaration_name(record.declaration))
            .and_then(|name| self.arena.identifier_text(name))
            .unwrap_or_default()
            .to_string()
    }

    /// Binding kind shortcut.
    #[must_use]
    pub fn binding_kind(&self, binding: BindingId) -> Option<BindingKind> {
        self.bindings.get(binding).map(|info| info.kind)
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(code = diagnostic.code, "{}", diagnostic.message_text);
        self.diagnostics.push(diagnostic);
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

#[cfg(test)]
#[path = "../tests/context_tests.rs"]
mod tests;

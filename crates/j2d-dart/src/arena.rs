//! Arena storage for the destination tree.
//!
//! Nodes are never freed. Rewrites detach a subtree by replacing the slot that
//! references it; the detached nodes stay in the arena with no parent.

use crate::node::{DartNode, MethodKind, NodeFlags, NodeIndex};
use j2d_common::SourceLocation;

/// Per-node bookkeeping kept alongside the node data.
#[derive(Clone, Debug, Default)]
pub struct ExtendedNodeInfo {
    pub parent: NodeIndex,
    pub flags: NodeFlags,
    pub location: Option<SourceLocation>,
}

#[derive(Clone, Debug, Default)]
pub struct DartArena {
    nodes: Vec<DartNode>,
    extended_info: Vec<ExtendedNodeInfo>,
}

impl DartArena {
    #[must_use]
    pub fn new() -> DartArena {
        DartArena::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Add a node and adopt its children.
    pub fn add(&mut self, node: DartNode) -> NodeIndex {
        let index = next_index(self.nodes.len());
        let mut children = Vec::new();
        node.for_each_child(|child| children.push(child));
        self.nodes.push(node);
        self.extended_info.push(ExtendedNodeInfo::default());
        for child in children {
            self.set_parent(child, index);
        }
        index
    }

    pub fn add_flagged(&mut self, node: DartNode, flags: NodeFlags) -> NodeIndex {
        let index = self.add(node);
        self.insert_flags(index, flags);
        index
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&DartNode> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut DartNode> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    #[inline]
    #[must_use]
    pub fn get_extended(&self, index: NodeIndex) -> Option<&ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get(index.0 as usize)
        }
    }

    #[inline]
    fn get_extended_mut(&mut self, index: NodeIndex) -> Option<&mut ExtendedNodeInfo> {
        if index.is_none() {
            None
        } else {
            self.extended_info.get_mut(index.0 as usize)
        }
    }

    #[must_use]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get_extended(index)
            .map_or(NodeIndex::NONE, |info| info.parent)
    }

    pub fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(info) = self.get_extended_mut(child) {
            info.parent = parent;
        }
    }

    #[must_use]
    pub fn flags(&self, index: NodeIndex) -> NodeFlags {
        self.get_extended(index)
            .map_or(NodeFlags::empty(), |info| info.flags)
    }

    #[must_use]
    pub fn has_flag(&self, index: NodeIndex, flag: NodeFlags) -> bool {
        self.flags(index).contains(flag)
    }

    pub fn insert_flags(&mut self, index: NodeIndex, flags: NodeFlags) {
        if let Some(info) = self.get_extended_mut(index) {
            info.flags.insert(flags);
        }
    }

    pub fn remove_flags(&mut self, index: NodeIndex, flags: NodeFlags) {
        if let Some(info) = self.get_extended_mut(index) {
            info.flags.remove(flags);
        }
    }

    #[must_use]
    pub fn location(&self, index: NodeIndex) -> Option<&SourceLocation> {
        self.get_extended(index).and_then(|info| info.location.as_ref())
    }

    pub fn set_location(&mut self, index: NodeIndex, location: Option<SourceLocation>) {
        if let Some(info) = self.get_extended_mut(index) {
            info.location = location;
        }
    }

    /// Nearest location found walking up from `index`.
    #[must_use]
    pub fn nearest_location(&self, index: NodeIndex) -> Option<&SourceLocation> {
        let mut current = index;
        while current.is_some() {
            if let Some(loc) = self.location(current) {
                return Some(loc);
            }
            current = self.parent(current);
        }
        None
    }

    /// Direct children in source order.
    #[must_use]
    pub fn children(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut children = Vec::new();
        if let Some(node) = self.get(index) {
            node.for_each_child(|child| children.push(child));
        }
        children
    }

    /// `index` and every node below it, pre-order.
    #[must_use]
    pub fn descendants(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            if current.is_none() {
                continue;
            }
            out.push(current);
            let children = self.children(current);
            stack.extend(children.into_iter().rev());
        }
        out
    }

    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeIndex, node: NodeIndex) -> bool {
        let mut current = self.parent(node);
        while current.is_some() {
            if current == ancestor {
                return true;
            }
            current = self.parent(current);
        }
        false
    }

    /// Nearest ancestor (excluding `index`) whose node satisfies `pred`.
    #[must_use]
    pub fn find_ancestor(&self, index: NodeIndex, pred: impl Fn(&DartNode) -> bool) -> NodeIndex {
        let mut current = self.parent(index);
        while current.is_some() {
            if self.get(current).is_some_and(&pred) {
                return current;
            }
            current = self.parent(current);
        }
        NodeIndex::NONE
    }

    /// Swap `old` for `new` in the slot of `old`'s parent. Returns false when
    /// `old` is detached.
    pub fn replace(&mut self, old: NodeIndex, new: NodeIndex) -> bool {
        let parent = self.parent(old);
        let Some(node) = self.get_mut(parent) else {
            return false;
        };
        let mut replaced = false;
        node.for_each_slot_mut(|slot| {
            if *slot == old && !replaced {
                *slot = new;
                replaced = true;
            }
        });
        if replaced {
            self.set_parent(new, parent);
            self.set_parent(old, NodeIndex::NONE);
        }
        replaced
    }

    /// Copy the subtree at `index`. `on_copy` sees every (original, copy) pair.
    pub fn deep_clone(
        &mut self,
        index: NodeIndex,
        on_copy: &mut dyn FnMut(NodeIndex, NodeIndex),
    ) -> NodeIndex {
        let Some(node) = self.get(index).cloned() else {
            return NodeIndex::NONE;
        };
        let mut copy = node;
        let mut slots = Vec::new();
        copy.for_each_slot_mut(|slot| slots.push(*slot));
        let mut cloned = Vec::with_capacity(slots.len());
        for slot in slots {
            if slot.is_none() {
                cloned.push(slot);
            } else {
                cloned.push(self.deep_clone(slot, &mut *on_copy));
            }
        }
        let mut iter = cloned.into_iter();
        copy.for_each_slot_mut(|slot| {
            if let Some(next) = iter.next() {
                *slot = next;
            }
        });
        let flags = self.flags(index);
        let location = self.location(index).cloned();
        let new_index = self.add(copy);
        self.insert_flags(new_index, flags);
        self.set_location(new_index, location);
        on_copy(index, new_index);
        new_index
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    #[must_use]
    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match self.get(index)? {
            DartNode::Identifier { name } => Some(name),
            _ => None,
        }
    }

    /// Rename an identifier node in place.
    pub fn set_identifier_text(&mut self, index: NodeIndex, text: &str) -> bool {
        match self.get_mut(index) {
            Some(DartNode::Identifier { name }) => {
                if name != text {
                    *name = text.to_string();
                }
                true
            }
            _ => false,
        }
    }

    /// Statements of a `Block`.
    #[must_use]
    pub fn block_statements(&self, index: NodeIndex) -> &[NodeIndex] {
        match self.get(index) {
            Some(DartNode::Block { statements }) => statements,
            _ => &[],
        }
    }

    /// Members of a `ClassDeclaration`.
    #[must_use]
    pub fn class_members(&self, index: NodeIndex) -> &[NodeIndex] {
        match self.get(index) {
            Some(DartNode::ClassDeclaration { members, .. }) => members,
            _ => &[],
        }
    }

    /// Name node of a declaration (class, method, constructor, variable, parameter).
    #[must_use]
    pub fn declaration_name(&self, index: NodeIndex) -> NodeIndex {
        match self.get(index) {
            Some(
                DartNode::ClassDeclaration { name, .. }
                | DartNode::MethodDeclaration { name, .. }
                | DartNode::ConstructorDeclaration { name, .. }
                | DartNode::VariableDeclaration { name, .. }
                | DartNode::FormalParameter { name, .. }
                | DartNode::TypeParameter { name, .. },
            ) => *name,
            _ => NodeIndex::NONE,
        }
    }

    #[must_use]
    pub fn method_kind(&self, index: NodeIndex) -> Option<MethodKind> {
        match self.get(index)? {
            DartNode::MethodDeclaration { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Insert `statement` into the block at `position` (clamped).
    pub fn insert_statement(&mut self, block: NodeIndex, position: usize, statement: NodeIndex) {
        if let Some(DartNode::Block { statements }) = self.get_mut(block) {
            let at = position.min(statements.len());
            statements.insert(at, statement);
            self.set_parent(statement, block);
        }
    }

    /// Append `member` to a class body.
    pub fn push_member(&mut self, class: NodeIndex, member: NodeIndex) {
        if let Some(DartNode::ClassDeclaration { members, .. }) = self.get_mut(class) {
            members.push(member);
            self.set_parent(member, class);
        }
    }

    /// Insert `member` into a class body at `position` (clamped).
    pub fn insert_member(&mut self, class: NodeIndex, position: usize, member: NodeIndex) {
        if let Some(DartNode::ClassDeclaration { members, .. }) = self.get_mut(class) {
            let at = position.min(members.len());
            members.insert(at, member);
            self.set_parent(member, class);
        }
    }

    /// Remove `child` from whichever list of its parent holds it.
    pub fn detach(&mut self, child: NodeIndex) -> bool {
        let parent = self.parent(child);
        let removed = match self.get_mut(parent) {
            Some(
                DartNode::ClassDeclaration { members: list, .. }
                | DartNode::Block { statements: list }
                | DartNode::CompilationUnit { declarations: list }
                | DartNode::ConstructorDeclaration {
                    initializers: list, ..
                },
            ) => {
                let before = list.len();
                list.retain(|idx| *idx != child);
                before != list.len()
            }
            _ => false,
        };
        if removed {
            self.set_parent(child, NodeIndex::NONE);
        }
        removed
    }
}

/// Index for the node stored at `len`. `u32::MAX` is the `NONE` sentinel, so the
/// arena holds at most `u32::MAX` nodes.
fn next_index(len: usize) -> NodeIndex {
    match u32::try_from(len) {
        Ok(raw) if raw != NodeIndex::NONE.0 => NodeIndex(raw),
        _ => panic!("Dart arena overflow: cannot index node {len}"),
    }
}

#[cfg(test)]
#[path = "../tests/arena_tests.rs"]
mod tests;

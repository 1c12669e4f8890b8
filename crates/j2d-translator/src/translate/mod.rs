//! Structural translator: Java origin tree to Dart destination tree.
//!
//! One call per compilation unit. Every origin node shape has exactly one
//! handler (the matches are exhaustive), every emitted identifier goes through
//! [`TranslationContext::identifier`], and nested, local and anonymous classes
//! are flattened into the unit's top-level declaration list right after the
//! class that encloses them.

mod expressions;
mod statements;
mod types;

use crate::context::{OutputUnit, TranslationContext};
use crate::error::{Result, TranslateError};
use crate::library;
use j2d_common::SourceLocation;
use j2d_dart::{DartNode, NodeIndex};
use j2d_java::{BindingId, BindingKind, CompilationUnit, Identifier, JavaType, TypeNesting};
use rustc_hash::FxHashMap;
use tracing::debug_span;

/// Translation state of the class currently being emitted.
#[derive(Clone, Debug)]
struct ClassFrame {
    record: usize,
    binding: Option<BindingId>,
    /// Declared name, used for references to the class from inside itself.
    name: String,
    /// Enclosing-path name (`Outer_Inner`) used to name anonymous classes.
    flat_name: String,
    /// `binding` followed by its superclass chain.
    chain: Vec<BindingId>,
}

pub struct StructuralTranslator<'c> {
    ctx: &'c mut TranslationContext,
    unit_index: usize,
    source_path: String,
    declarations: Vec<NodeIndex>,
    frames: Vec<ClassFrame>,
    /// Frame depth at which each local variable or parameter was declared.
    local_depth: FxHashMap<BindingId, usize>,
}

impl<'c> StructuralTranslator<'c> {
    pub fn new(ctx: &'c mut TranslationContext) -> Self {
        Self {
            ctx,
            unit_index: 0,
            source_path: String::new(),
            declarations: Vec::new(),
            frames: Vec::new(),
            local_depth: FxHashMap::default(),
        }
    }

    /// Translate one compilation unit and register it as an output unit.
    pub fn translate_unit(mut self, unit: &CompilationUnit) -> Result<usize> {
        let _span = debug_span!("translate_unit", path = %unit.path).entered();
        self.unit_index = self.ctx.units.len();
        self.source_path = unit.path.clone();
        for ty in &unit.types {
            self.translate_type_declaration(ty, TypeNesting::TopLevel)?;
        }
        let declarations: Vec<NodeIndex> = std::mem::take(&mut self.declarations)
            .into_iter()
            .filter(|d| d.is_some())
            .collect();
        let root = self
            .ctx
            .arena
            .add(DartNode::CompilationUnit { declarations });
        self.ctx.units.push(OutputUnit {
            path: output_path(&unit.path),
            root,
        });
        Ok(self.unit_index)
    }

    /// Location with the unit path filled in.
    fn loc(&self, location: Option<&SourceLocation>) -> Option<SourceLocation> {
        location.map(|loc| {
            if loc.file.is_some() {
                loc.clone()
            } else {
                loc.clone().in_file(self.source_path.clone())
            }
        })
    }

    fn unsupported(
        &self,
        kind: &str,
        detail: impl Into<String>,
        location: Option<&SourceLocation>,
    ) -> TranslateError {
        TranslateError::unsupported(kind, detail, self.loc(location).as_ref())
    }

    fn invariant(
        &self,
        kind: &str,
        detail: impl Into<String>,
        location: Option<&SourceLocation>,
    ) -> TranslateError {
        TranslateError::invariant(kind, detail, self.loc(location).as_ref())
    }

    fn frame(&self) -> Option<&ClassFrame> {
        self.frames.last()
    }

    fn add(&mut self, node: DartNode) -> NodeIndex {
        self.ctx.arena.add(node)
    }

    fn ident(&mut self, name: &str, binding: Option<BindingId>) -> NodeIndex {
        self.ctx.identifier(name, binding)
    }

    /// Identifier referring to a type binding, by its current name.
    fn type_identifier(&mut self, binding: BindingId) -> NodeIndex {
        let info = self.ctx.binding_info(binding);
        let qualified = info
            .and_then(|i| i.qualified_name.clone())
            .or_else(|| info.map(|i| i.name.clone()))
            .unwrap_or_default();
        if let Some(dart) = library::library_type(&qualified) {
            return self.ident(dart, None);
        }
        let name = self
            .ctx
            .current_name(binding)
            .map(str::to_string)
            .or_else(|| self.ctx.binding_info(binding).map(|i| i.name.clone()))
            .unwrap_or_default();
        self.ident(&name, Some(binding))
    }

    fn type_name(&mut self, name: &str, type_arguments: Vec<NodeIndex>) -> NodeIndex {
        let name = self.ident(name, None);
        self.add(DartNode::TypeName {
            name,
            type_arguments,
        })
    }

    /// `T` wrapped `dimensions` times in `List<...>`.
    fn list_type(&mut self, mut inner: NodeIndex, dimensions: u32) -> NodeIndex {
        for _ in 0..dimensions {
            inner = self.type_name("List", vec![inner]);
        }
        inner
    }

    /// Remember the class depth a local or parameter belongs to.
    fn mark_local(&mut self, binding: Option<BindingId>) {
        if let Some(binding) = binding {
            self.local_depth.insert(binding, self.frames.len());
        }
    }

    fn declare_local(&mut self, binding: Option<BindingId>, node: NodeIndex) {
        self.mark_local(binding);
        if let Some(binding) = binding {
            self.ctx.declare(binding, node);
        }
    }

    /// Library mapping of a named type. Resolved types are looked up by
    /// qualified name; unresolved ones by simple name.
    fn library_name(&self, name: &Identifier) -> Option<&'static str> {
        match name
            .binding
            .and_then(|b| self.ctx.binding_info(b))
            .and_then(|info| info.qualified_name.as_deref())
        {
            Some(qualified) => library::library_type(qualified),
            None => library::library_type(&name.name),
        }
    }

    /// Dart type name (`int`, `List`, `Foo`) of an origin type, for default values.
    fn dart_type_name(&self, ty: &JavaType) -> Option<String> {
        match ty {
            JavaType::Primitive { primitive } => {
                Some(library::primitive_name(*primitive).to_string())
            }
            JavaType::Simple { name, .. } | JavaType::Qualified { name, .. } => Some(
                self.library_name(name)
                    .map_or_else(|| name.name.clone(), str::to_string),
            ),
            JavaType::Array { .. } => Some("List".to_string()),
            JavaType::Wildcard { .. } => None,
        }
    }

    fn binding_kind(&self, binding: Option<BindingId>) -> Option<BindingKind> {
        binding.and_then(|b| self.ctx.binding_kind(b))
    }
}

/// `ty` with `extra` more array dimensions.
fn with_dimensions(ty: &JavaType, extra: u32) -> JavaType {
    match (ty, extra) {
        (_, 0) => ty.clone(),
        (JavaType::Array {
            element,
            dimensions,
        }, _) => JavaType::Array {
            element: element.clone(),
            dimensions: dimensions + extra,
        },
        _ => JavaType::array(ty.clone(), extra),
    }
}

/// `com/x/Foo.java` -> `com/x/Foo.dart`.
#[must_use]
pub fn output_path(source_path: &str) -> String {
    let stem = source_path.strip_suffix(".java").unwrap_or(source_path);
    format!("{stem}.dart")
}

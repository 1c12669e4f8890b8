//! Classes, members, constructors and enums.

use super::{ClassFrame, StructuralTranslator, with_dimensions};
use crate::context::{ClassRecord, ConstructorSite, InstanceInit, impl_method_name};
use crate::error::Result;
use crate::library;
use j2d_dart::{DartNode, MethodKind, NodeFlags, NodeIndex};
use j2d_java::{
    BindingId, BodyDeclaration, EnumConstant, Identifier, JavaType, MethodDeclaration,
    SingleVariable, Statement, TypeDeclaration, TypeKind, TypeNesting, TypeParameter,
    VariableDeclaration,
};
use rustc_hash::FxHashMap;
use tracing::trace;

/// Shape shared by declared and anonymous classes.
pub(super) struct ClassShape<'a> {
    pub name: &'a Identifier,
    pub type_kind: TypeKind,
    pub nesting: TypeNesting,
    pub is_abstract: bool,
    pub type_parameters: &'a [TypeParameter],
    pub superclass: Option<&'a JavaType>,
    pub interfaces: &'a [JavaType],
    pub enum_constants: &'a [EnumConstant],
    pub body: &'a [BodyDeclaration],
}

/// A constructor that delegates with `this(...)` in a lowered class. Its
/// initializer list receives a copy of the target's `super()` call.
struct Delegation {
    constructor: NodeIndex,
    binding: Option<BindingId>,
    target: BindingId,
}

impl StructuralTranslator<'_> {
    pub(super) fn translate_type_declaration(
        &mut self,
        decl: &TypeDeclaration,
        nesting: TypeNesting,
    ) -> Result<usize> {
        self.translate_class(&ClassShape {
            name: &decl.name,
            type_kind: decl.type_kind,
            nesting,
            is_abstract: decl.modifiers.is_abstract,
            type_parameters: &decl.type_parameters,
            superclass: decl.superclass.as_ref(),
            interfaces: &decl.interfaces,
            enum_constants: &decl.enum_constants,
            body: &decl.body,
        })
    }

    /// Emit one class. Its slot in the unit is reserved before members are
    /// translated so nested classes land after it.
    pub(super) fn translate_class(&mut self, shape: &ClassShape<'_>) -> Result<usize> {
        let slot = self.declarations.len();
        self.declarations.push(NodeIndex::NONE);

        let binding = shape.name.binding;
        let location = self.loc(shape.name.location.as_ref());
        let name = self
            .ctx
            .identifier_at(&shape.name.name, binding, location.as_ref());
        let type_parameters = self.translate_type_parameters(shape.type_parameters)?;
        let extends = match shape.superclass {
            Some(superclass)
                if shape.type_kind == TypeKind::Class && !self.is_object_type(superclass) =>
            {
                self.translate_type(superclass)?
            }
            _ => NodeIndex::NONE,
        };
        let implements = self.translate_types(shape.interfaces)?;
        let class = self.add(DartNode::ClassDeclaration {
            is_abstract: shape.is_abstract || shape.type_kind == TypeKind::Interface,
            name,
            type_parameters,
            extends,
            implements,
            members: Vec::new(),
        });
        self.ctx.arena.set_location(class, location);

        let enclosing = self.frame().map(|f| f.record);
        let record = self.ctx.add_class(ClassRecord {
            binding,
            declaration: class,
            type_kind: shape.type_kind,
            nesting: shape.nesting,
            enclosing,
            unit: self.unit_index,
            instance_inits: Vec::new(),
        });
        let flat_name = match (shape.nesting, self.frame()) {
            (TypeNesting::Member | TypeNesting::Local, Some(outer)) => {
                format!("{}_{}", outer.flat_name, shape.name.name)
            }
            _ => shape.name.name.clone(),
        };
        let chain = binding.map_or_else(Vec::new, |b| {
            let mut chain = vec![b];
            chain.extend(self.ctx.bindings().superclasses(b));
            chain
        });
        trace!(class = %shape.name.name, record, "translate class");
        self.frames.push(ClassFrame {
            record,
            binding,
            name: shape.name.name.clone(),
            flat_name,
            chain,
        });
        let result = self.translate_members(class, record, shape);
        self.frames.pop();
        result?;

        self.declarations[slot] = class;
        Ok(record)
    }

    fn translate_members(
        &mut self,
        class: NodeIndex,
        record: usize,
        shape: &ClassShape<'_>,
    ) -> Result<()> {
        let is_interface = shape.type_kind == TypeKind::Interface;
        let is_enum = shape.type_kind == TypeKind::Enum;
        if is_enum {
            self.translate_enum_constants(class, shape.enum_constants)?;
        }

        // One constructor that delegates and then keeps going forces every
        // constructor of the class into the `_impl` form.
        let lowered = shape.body.iter().any(|member| {
            matches!(member, BodyDeclaration::Method { declaration }
                if declaration.is_constructor && delegates_then_continues(declaration))
        });

        let mut delegations = Vec::new();
        let mut has_constructor = false;
        let mut has_to_string = false;
        for member in shape.body {
            match member {
                BodyDeclaration::Field { declaration } => {
                    let is_static = declaration.modifiers.is_static || is_interface;
                    let is_final = declaration.modifiers.is_final || is_interface;
                    for field in self.translate_field(declaration, is_static, is_final)? {
                        self.ctx.arena.push_member(class, field);
                        if !is_static {
                            self.record_field_inits(record, field);
                        }
                    }
                }
                BodyDeclaration::Method { declaration } if declaration.is_constructor => {
                    has_constructor = true;
                    let nodes =
                        self.translate_constructor(declaration, is_enum, lowered, &mut delegations)?;
                    for node in nodes {
                        self.ctx.arena.push_member(class, node);
                    }
                }
                BodyDeclaration::Method { declaration } => {
                    has_to_string |=
                        declaration.name.name == "toString" && declaration.parameters.is_empty();
                    let method = self.translate_method(declaration)?;
                    self.ctx.arena.push_member(class, method);
                }
                BodyDeclaration::Initializer { is_static: true, .. } => {
                    return Err(self.unsupported(
                        "Initializer",
                        format!("static initializer in `{}`", shape.name.name),
                        shape.name.location.as_ref(),
                    ));
                }
                BodyDeclaration::Initializer {
                    is_static: false,
                    body,
                } => {
                    let block = self.translate_block(body)?;
                    self.ctx.classes[record]
                        .instance_inits
                        .push(InstanceInit::Block(block));
                }
                BodyDeclaration::Type { declaration } => {
                    self.translate_type_declaration(declaration, TypeNesting::Member)?;
                }
            }
        }
        self.copy_delegated_super_calls(&delegations)?;

        if is_enum {
            if !has_constructor {
                let constructor = self.default_enum_constructor();
                self.ctx.arena.push_member(class, constructor);
            }
            if !has_to_string {
                let to_string = self.enum_to_string();
                self.ctx.arena.push_member(class, to_string);
            }
        }
        Ok(())
    }

    fn record_field_inits(&mut self, record: usize, field: NodeIndex) {
        let Some(DartNode::FieldDeclaration { variables, .. }) = self.ctx.arena.get(field) else {
            return;
        };
        let inits: Vec<InstanceInit> = variables
            .iter()
            .copied()
            .filter(|&var| {
                matches!(self.ctx.arena.get(var),
                    Some(DartNode::VariableDeclaration { initializer, .. }) if initializer.is_some())
            })
            .map(InstanceInit::Field)
            .collect();
        self.ctx.classes[record].instance_inits.extend(inits);
    }

    // =========================================================================
    // Types
    // =========================================================================

    pub(super) fn translate_type(&mut self, ty: &JavaType) -> Result<NodeIndex> {
        match ty {
            JavaType::Primitive { primitive } => {
                Ok(self.type_name(library::primitive_name(*primitive), Vec::new()))
            }
            JavaType::Simple {
                name,
                type_arguments,
            }
            | JavaType::Qualified {
                name,
                type_arguments,
                ..
            } => {
                let type_arguments = self.translate_types(type_arguments)?;
                if let Some(dart) = self.library_name(name) {
                    return Ok(self.type_name(dart, type_arguments));
                }
                let location = self.loc(name.location.as_ref());
                let name = self
                    .ctx
                    .identifier_at(&name.name, name.binding, location.as_ref());
                Ok(self.add(DartNode::TypeName {
                    name,
                    type_arguments,
                }))
            }
            JavaType::Array {
                element,
                dimensions,
            } => {
                let inner = self.translate_type(element)?;
                Ok(self.list_type(inner, *dimensions))
            }
            JavaType::Wildcard {
                bound: Some(bound),
                is_upper_bound: true,
            } => self.translate_type(bound),
            JavaType::Wildcard { .. } => Ok(self.type_name("dynamic", Vec::new())),
        }
    }

    pub(super) fn translate_types(&mut self, types: &[JavaType]) -> Result<Vec<NodeIndex>> {
        types.iter().map(|ty| self.translate_type(ty)).collect()
    }

    fn translate_type_parameters(&mut self, params: &[TypeParameter]) -> Result<Vec<NodeIndex>> {
        let mut nodes = Vec::with_capacity(params.len());
        for param in params {
            let name = self.ident(&param.name.name, param.name.binding);
            let bound = match param.bounds.first() {
                Some(bound) => self.translate_type(bound)?,
                None => NodeIndex::NONE,
            };
            let node = self.add(DartNode::TypeParameter { name, bound });
            if let Some(binding) = param.name.binding {
                self.ctx.declare(binding, node);
            }
            nodes.push(node);
        }
        Ok(nodes)
    }

    /// Types that Dart classes extend implicitly.
    pub(super) fn is_object_type(&self, ty: &JavaType) -> bool {
        ty.name()
            .is_some_and(|name| self.library_name(name) == Some("Object"))
    }

    // =========================================================================
    // Fields, variables, parameters
    // =========================================================================

    fn translate_field(
        &mut self,
        decl: &VariableDeclaration,
        is_static: bool,
        is_final: bool,
    ) -> Result<Vec<NodeIndex>> {
        let mut fields = Vec::new();
        let primitive = matches!(decl.ty, JavaType::Primitive { .. });
        for (ty, variables) in self.translate_variables(decl, false)? {
            let field = self.add(DartNode::FieldDeclaration {
                is_static,
                is_final,
                ty,
                variables,
            });
            if is_final {
                self.ctx.arena.insert_flags(field, NodeFlags::WAS_FINAL);
            }
            if primitive {
                self.ctx.arena.insert_flags(field, NodeFlags::PRIMITIVE_TYPED);
            }
            fields.push(field);
        }
        Ok(fields)
    }

    /// Translate declaration fragments, one group per run of fragments with the
    /// same extra array dimensions (`int a, b[];` declares two types).
    pub(super) fn translate_variables(
        &mut self,
        decl: &VariableDeclaration,
        local: bool,
    ) -> Result<Vec<(NodeIndex, Vec<NodeIndex>)>> {
        let mut groups: Vec<(NodeIndex, Vec<NodeIndex>)> = Vec::new();
        let mut current_dimensions = None;
        for fragment in &decl.fragments {
            let declared = with_dimensions(&decl.ty, fragment.extra_dimensions);
            if current_dimensions != Some(fragment.extra_dimensions) {
                let ty = self.translate_type(&declared)?;
                groups.push((ty, Vec::new()));
                current_dimensions = Some(fragment.extra_dimensions);
            }
            let location = self.loc(fragment.name.location.as_ref());
            let name =
                self.ctx
                    .identifier_at(&fragment.name.name, fragment.name.binding, location.as_ref());
            let initializer = match &fragment.initializer {
                Some(init) => self.translate_initializer(init, &declared)?,
                None => NodeIndex::NONE,
            };
            let variable = self.add(DartNode::VariableDeclaration { name, initializer });
            if local {
                self.declare_local(fragment.name.binding, variable);
            } else if let Some(binding) = fragment.name.binding {
                self.ctx.declare(binding, variable);
            }
            if let Some((_, variables)) = groups.last_mut() {
                variables.push(variable);
            }
        }
        Ok(groups)
    }

    pub(super) fn translate_parameter_type(&mut self, param: &SingleVariable) -> Result<NodeIndex> {
        let extra = param.extra_dimensions + u32::from(param.is_varargs);
        self.translate_type(&with_dimensions(&param.ty, extra))
    }

    fn translate_parameters(&mut self, params: &[SingleVariable]) -> Result<Vec<NodeIndex>> {
        let mut nodes = Vec::with_capacity(params.len());
        for param in params {
            let ty = self.translate_parameter_type(param)?;
            let location = self.loc(param.name.location.as_ref());
            let name = self
                .ctx
                .identifier_at(&param.name.name, param.name.binding, location.as_ref());
            let node = self.add(DartNode::FormalParameter {
                ty,
                name,
                is_field: false,
            });
            self.declare_local(param.name.binding, node);
            nodes.push(node);
        }
        Ok(nodes)
    }

    // =========================================================================
    // Methods
    // =========================================================================

    fn translate_method(&mut self, method: &MethodDeclaration) -> Result<NodeIndex> {
        let return_type = match &method.return_type {
            Some(ty) => self.translate_type(ty)?,
            None => self.type_name("void", Vec::new()),
        };
        let location = self.loc(method.name.location.as_ref());
        let name = self
            .ctx
            .identifier_at(&method.name.name, method.name.binding, location.as_ref());
        let type_parameters = self.translate_type_parameters(&method.type_parameters)?;
        let parameters = self.translate_parameters(&method.parameters)?;
        let body = match &method.body {
            Some(block) => self.translate_block(block)?,
            None => NodeIndex::NONE,
        };
        let node = self.add(DartNode::MethodDeclaration {
            is_static: method.modifiers.is_static,
            kind: MethodKind::Method,
            return_type,
            name,
            type_parameters,
            parameters,
            body,
        });
        self.ctx.arena.set_location(node, location);
        if let Some(binding) = method.name.binding {
            self.ctx.declare(binding, node);
        }
        Ok(node)
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Identifier naming the class being translated, for constructor headers.
    fn current_class_identifier(&mut self) -> NodeIndex {
        let (name, binding) = self
            .frame()
            .map(|f| (f.name.clone(), f.binding))
            .unwrap_or_default();
        self.ident(&name, binding)
    }

    fn push_initializer(&mut self, constructor: NodeIndex, initializer: NodeIndex) {
        if let Some(DartNode::ConstructorDeclaration { initializers, .. }) =
            self.ctx.arena.get_mut(constructor)
        {
            initializers.push(initializer);
            self.ctx.arena.set_parent(initializer, constructor);
        }
    }

    fn set_constructor_body(&mut self, constructor: NodeIndex, block: NodeIndex) {
        if let Some(DartNode::ConstructorDeclaration { body, .. }) =
            self.ctx.arena.get_mut(constructor)
        {
            *body = block;
            self.ctx.arena.set_parent(block, constructor);
        }
    }

    /// Call of the synthetic method holding a lowered constructor body.
    fn impl_invocation(&mut self, arguments: Vec<NodeIndex>) -> NodeIndex {
        let name = self.ident(&impl_method_name(None), None);
        self.ctx.arena.add_flagged(
            DartNode::MethodInvocation {
                target: NodeIndex::NONE,
                name,
                type_arguments: Vec::new(),
                arguments,
            },
            NodeFlags::CONSTRUCTOR_IMPL,
        )
    }

    fn translate_constructor(
        &mut self,
        method: &MethodDeclaration,
        is_enum: bool,
        lowered: bool,
        delegations: &mut Vec<Delegation>,
    ) -> Result<Vec<NodeIndex>> {
        let binding = method.name.binding;
        let statements = method.body.as_ref().map_or(&[][..], |b| b.statements.as_slice());
        let (lead, rest) = match statements.split_first() {
            Some((
                first @ (Statement::ConstructorInvocation { .. }
                | Statement::SuperConstructorInvocation { .. }),
                rest,
            )) => (Some(first), rest),
            _ => (None, statements),
        };
        let redirects = matches!(lead, Some(Statement::ConstructorInvocation { .. }));

        let class_name = self.current_class_identifier();
        let mut parameters = if is_enum {
            self.enum_prefix_parameters(redirects && !lowered)
        } else {
            Vec::new()
        };
        parameters.extend(self.translate_parameters(&method.parameters)?);
        let constructor = self.add(DartNode::ConstructorDeclaration {
            class_name,
            name: NodeIndex::NONE,
            parameters,
            initializers: Vec::new(),
            body: NodeIndex::NONE,
        });
        let location = self.loc(method.name.location.as_ref());
        self.ctx.arena.set_location(constructor, location);
        if let Some(binding) = binding {
            self.ctx.declare_constructor(binding, constructor);
        }

        match lead {
            Some(Statement::SuperConstructorInvocation {
                constructor: target,
                arguments,
                location,
            }) => {
                let arguments = self.pack_arguments(*target, arguments, location.as_ref())?;
                let call = self.add(DartNode::SuperConstructorInvocation {
                    name: NodeIndex::NONE,
                    arguments,
                });
                let location = self.loc(location.as_ref());
                self.ctx.arena.set_location(call, location);
                if let Some(target) = target {
                    self.ctx
                        .record_constructor_site(*target, ConstructorSite::Super, call);
                }
                self.push_initializer(constructor, call);
            }
            Some(Statement::ConstructorInvocation {
                constructor: target,
                arguments,
                location,
            }) if !lowered => {
                let mut forwarded = if is_enum {
                    vec![self.ident("name", None), self.ident("ordinal", None)]
                } else {
                    Vec::new()
                };
                forwarded.extend(self.pack_arguments(*target, arguments, location.as_ref())?);
                let call = self.add(DartNode::RedirectingConstructorInvocation {
                    name: NodeIndex::NONE,
                    arguments: forwarded,
                });
                let location = self.loc(location.as_ref());
                self.ctx.arena.set_location(call, location);
                if let Some(target) = target {
                    self.ctx
                        .record_constructor_site(*target, ConstructorSite::Redirecting, call);
                }
                self.push_initializer(constructor, call);
            }
            _ => {}
        }

        if !lowered {
            if !rest.is_empty() {
                let body = self.translate_statement_list(rest)?;
                self.set_constructor_body(constructor, body);
            }
            return Ok(vec![constructor]);
        }

        // Lowered: the body moves into `void _impl(params)` and the constructor
        // only calls it.
        let mut impl_statements = Vec::new();
        if let Some(Statement::ConstructorInvocation {
            constructor: target,
            arguments,
            location,
        }) = lead
        {
            let arguments = self.pack_arguments(*target, arguments, location.as_ref())?;
            let call = self.impl_invocation(arguments);
            if let Some(target) = target {
                self.ctx
                    .record_constructor_site(*target, ConstructorSite::ImplInvocation, call);
                delegations.push(Delegation {
                    constructor,
                    binding,
                    target: *target,
                });
            }
            impl_statements.push(self.add(DartNode::ExpressionStatement { expression: call }));
        }
        for statement in rest {
            impl_statements.extend(self.translate_statement(statement)?);
        }

        let forwarded: Vec<NodeIndex> = method
            .parameters
            .iter()
            .map(|p| self.ident(&p.name.name, p.name.binding))
            .collect();
        let call = self.impl_invocation(forwarded);
        if let Some(binding) = binding {
            self.ctx
                .record_constructor_site(binding, ConstructorSite::ImplInvocation, call);
        }
        let statement = self.add(DartNode::ExpressionStatement { expression: call });
        let body = self.add(DartNode::Block {
            statements: vec![statement],
        });
        self.set_constructor_body(constructor, body);

        let parameters = self.translate_parameters(&method.parameters)?;
        let return_type = self.type_name("void", Vec::new());
        let name = self.ident(&impl_method_name(None), None);
        let impl_body = self.add(DartNode::Block {
            statements: impl_statements,
        });
        let impl_method = self.ctx.arena.add_flagged(
            DartNode::MethodDeclaration {
                is_static: false,
                kind: MethodKind::Method,
                return_type,
                name,
                type_parameters: Vec::new(),
                parameters,
                body: impl_body,
            },
            NodeFlags::SYNTHETIC | NodeFlags::CONSTRUCTOR_IMPL,
        );
        if let Some(binding) = binding {
            self.ctx.set_impl_declaration(binding, impl_method);
        }
        Ok(vec![constructor, impl_method])
    }

    /// Give each delegating constructor of a lowered class the `super()` call of
    /// the constructor it ends up in.
    fn copy_delegated_super_calls(&mut self, delegations: &[Delegation]) -> Result<()> {
        let targets: FxHashMap<BindingId, BindingId> = delegations
            .iter()
            .filter_map(|d| d.binding.map(|b| (b, d.target)))
            .collect();
        for delegation in delegations {
            let mut current = delegation.target;
            let mut seen = vec![current];
            loop {
                let declaration = self
                    .ctx
                    .constructor(current)
                    .map_or(NodeIndex::NONE, |d| d.declaration);
                if let Some(super_call) = self.super_initializer(declaration) {
                    let has_arguments = matches!(self.ctx.arena.get(super_call),
                        Some(DartNode::SuperConstructorInvocation { arguments, .. }) if !arguments.is_empty());
                    if has_arguments {
                        let location = self.ctx.arena.nearest_location(super_call).cloned();
                        return Err(self.unsupported(
                            "ConstructorInvocation",
                            "delegating constructor followed by statements in a class whose super call takes arguments",
                            location.as_ref(),
                        ));
                    }
                    let copy = self.ctx.clone_subtree(super_call);
                    self.push_initializer(delegation.constructor, copy);
                    break;
                }
                match targets.get(&current) {
                    Some(&next) if !seen.contains(&next) => {
                        seen.push(next);
                        current = next;
                    }
                    _ => break,
                }
            }
        }
        Ok(())
    }

    fn super_initializer(&self, constructor: NodeIndex) -> Option<NodeIndex> {
        match self.ctx.arena.get(constructor)? {
            DartNode::ConstructorDeclaration { initializers, .. } => initializers
                .iter()
                .copied()
                .find(|&i| {
                    matches!(
                        self.ctx.arena.get(i),
                        Some(DartNode::SuperConstructorInvocation { .. })
                    )
                }),
            _ => None,
        }
    }

    // =========================================================================
    // Enums
    // =========================================================================

    fn enum_type(&mut self) -> NodeIndex {
        let name = self.current_class_identifier();
        self.add(DartNode::TypeName {
            name,
            type_arguments: Vec::new(),
        })
    }

    /// `static final E A = new E("A", 0, ...);` per constant, then `values`,
    /// `name` and `ordinal`.
    fn translate_enum_constants(
        &mut self,
        class: NodeIndex,
        constants: &[EnumConstant],
    ) -> Result<()> {
        for (ordinal, constant) in constants.iter().enumerate() {
            let ty = self.enum_type();
            let location = self.loc(constant.name.location.as_ref());
            let name = self.ctx.identifier_at(
                &constant.name.name,
                constant.name.binding,
                location.as_ref(),
            );
            let mut arguments = vec![
                self.add(DartNode::StringLiteral {
                    value: constant.name.name.clone(),
                }),
                self.add(DartNode::IntegerLiteral {
                    token: ordinal.to_string(),
                }),
            ];
            arguments.extend(self.pack_arguments(
                constant.constructor,
                &constant.arguments,
                constant.name.location.as_ref(),
            )?);
            let creation_type = self.enum_type();
            let creation = self.add(DartNode::InstanceCreation {
                ty: creation_type,
                constructor_name: NodeIndex::NONE,
                arguments,
            });
            if let Some(target) = constant.constructor {
                self.ctx
                    .record_constructor_site(target, ConstructorSite::Creation, creation);
            }
            let variable = self.add(DartNode::VariableDeclaration {
                name,
                initializer: creation,
            });
            if let Some(binding) = constant.name.binding {
                self.ctx.declare(binding, variable);
            }
            let field = self.add(DartNode::FieldDeclaration {
                is_static: true,
                is_final: true,
                ty,
                variables: vec![variable],
            });
            self.ctx.arena.push_member(class, field);
        }

        let elements: Vec<NodeIndex> = constants
            .iter()
            .map(|c| self.ident(&c.name.name, c.name.binding))
            .collect();
        let element_type = self.enum_type();
        let list = self.add(DartNode::ListLiteral {
            type_argument: element_type,
            elements,
        });
        let list_element = self.enum_type();
        let values_type = self.type_name("List", vec![list_element]);
        let values = self.synthetic_field(true, values_type, "values", list);
        self.ctx.arena.push_member(class, values);

        let name_type = self.type_name("String", Vec::new());
        let name_field = self.synthetic_field(false, name_type, "name", NodeIndex::NONE);
        self.ctx.arena.push_member(class, name_field);
        let ordinal_type = self.type_name("int", Vec::new());
        let ordinal_field = self.synthetic_field(false, ordinal_type, "ordinal", NodeIndex::NONE);
        self.ctx.arena.push_member(class, ordinal_field);
        Ok(())
    }

    fn synthetic_field(
        &mut self,
        is_static: bool,
        ty: NodeIndex,
        name: &str,
        initializer: NodeIndex,
    ) -> NodeIndex {
        let name = self.ident(name, None);
        let variable = self.add(DartNode::VariableDeclaration { name, initializer });
        self.ctx.arena.add_flagged(
            DartNode::FieldDeclaration {
                is_static,
                is_final: true,
                ty,
                variables: vec![variable],
            },
            NodeFlags::SYNTHETIC,
        )
    }

    /// Leading `name` and `ordinal` parameters of every enum constructor.
    /// Redirecting constructors take them as plain parameters and pass them on.
    fn enum_prefix_parameters(&mut self, redirecting: bool) -> Vec<NodeIndex> {
        [("String", "name"), ("int", "ordinal")]
            .into_iter()
            .map(|(ty, name)| {
                let ty = if redirecting {
                    self.type_name(ty, Vec::new())
                } else {
                    NodeIndex::NONE
                };
                let name = self.ident(name, None);
                self.ctx.arena.add_flagged(
                    DartNode::FormalParameter {
                        ty,
                        name,
                        is_field: !redirecting,
                    },
                    NodeFlags::SYNTHETIC,
                )
            })
            .collect()
    }

    fn default_enum_constructor(&mut self) -> NodeIndex {
        let class_name = self.current_class_identifier();
        let parameters = self.enum_prefix_parameters(false);
        self.ctx.arena.add_flagged(
            DartNode::ConstructorDeclaration {
                class_name,
                name: NodeIndex::NONE,
                parameters,
                initializers: Vec::new(),
                body: NodeIndex::NONE,
            },
            NodeFlags::SYNTHETIC,
        )
    }

    /// `String toString() => name;`
    fn enum_to_string(&mut self) -> NodeIndex {
        let return_type = self.type_name("String", Vec::new());
        let name = self.ident("toString", None);
        let body = self.ident("name", None);
        self.ctx.arena.add_flagged(
            DartNode::MethodDeclaration {
                is_static: false,
                kind: MethodKind::Method,
                return_type,
                name,
                type_parameters: Vec::new(),
                parameters: Vec::new(),
                body,
            },
            NodeFlags::SYNTHETIC,
        )
    }
}

/// `this(...)` followed by more statements.
fn delegates_then_continues(method: &MethodDeclaration) -> bool {
    method.body.as_ref().is_some_and(|body| {
        matches!(
            body.statements.as_slice(),
            [Statement::ConstructorInvocation { .. }, _, ..]
        )
    })
}

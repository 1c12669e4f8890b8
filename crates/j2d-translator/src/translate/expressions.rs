use super::StructuralTranslator;
use super::types::ClassShape;
use super::with_dimensions;
use crate::context::ConstructorSite;
use crate::error::Result;
use crate::library;
use crate::passes::vararg_unwrap;
use j2d_common::{Diagnostic, SourceLocation, diagnostic_codes};
use j2d_dart::{DartNode, NodeFlags, NodeIndex};
use j2d_java::{
    AnonymousClass, BindingId, BindingKind, Expression, ExpressionKind, Identifier, JavaType,
    PrimitiveKind, TypeKind, TypeNesting,
};

const INFIX_OPERATORS: &[&str] = &[
    "*", "/", "%", "+", "-", "<<", ">>", ">>>", "<", ">", "<=", ">=", "==", "!=", "&", "^", "|",
    "&&", "||",
];
const ASSIGNMENT_OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=", ">>>=",
];
const PREFIX_OPERATORS: &[&str] = &["+", "-", "!", "~", "++", "--"];
const POSTFIX_OPERATORS: &[&str] = &["++", "--"];

impl StructuralTranslator<'_> {
    pub(super) fn translate_expression(&mut self, expr: &Expression) -> Result<NodeIndex> {
        let node = self.translate_expression_kind(expr)?;
        if expr.static_type.as_ref().is_some_and(JavaType::is_array) {
            self.ctx.arena.insert_flags(node, NodeFlags::ARRAY_TYPED);
        }
        if self.ctx.arena.location(node).is_none() {
            let location = self.loc(expr.location.as_ref());
            self.ctx.arena.set_location(node, location);
        }
        Ok(node)
    }

    /// Initializer of a declaration whose type is `declared`. Array initializers
    /// take their element type from the declaration.
    pub(super) fn translate_initializer(
        &mut self,
        expr: &Expression,
        declared: &JavaType,
    ) -> Result<NodeIndex> {
        match (&expr.kind, declared) {
            (
                ExpressionKind::ArrayInitializer { elements },
                JavaType::Array {
                    element,
                    dimensions,
                },
            ) => self.translate_array_literal(element, *dimensions, elements),
            _ => self.translate_expression(expr),
        }
    }

    fn translate_expression_kind(&mut self, expr: &Expression) -> Result<NodeIndex> {
        let location = expr.location.as_ref();
        let node = match &expr.kind {
            ExpressionKind::NumberLiteral { token } => {
                let Some((text, is_double)) = normalize_number(token) else {
                    return Err(self.invariant(
                        "NumberLiteral",
                        format!("malformed number literal `{token}`"),
                        location,
                    ));
                };
                if is_double {
                    self.add(DartNode::DoubleLiteral { token: text })
                } else {
                    self.add(DartNode::IntegerLiteral { token: text })
                }
            }
            ExpressionKind::CharacterLiteral { value } => self.add(DartNode::IntegerLiteral {
                token: format!("0x{:x}", u32::from(*value)),
            }),
            ExpressionKind::StringLiteral { value } => self.add(DartNode::StringLiteral {
                value: value.clone(),
            }),
            ExpressionKind::BooleanLiteral { value } => {
                self.add(DartNode::BooleanLiteral { value: *value })
            }
            ExpressionKind::NullLiteral => self.add(DartNode::NullLiteral),
            ExpressionKind::TypeLiteral { ty } => self.translate_type_literal(ty, location)?,
            ExpressionKind::Name { name } => self.translate_name(name)?,
            ExpressionKind::QualifiedName { qualifier, name } => {
                if let Some(binding) = name.binding
                    && self.ctx.binding_kind(binding) == Some(BindingKind::Type)
                {
                    self.type_identifier(binding)
                } else {
                    let target = self.translate_expression(qualifier)?;
                    self.property_access(target, name)
                }
            }
            ExpressionKind::FieldAccess { target, name } => {
                let target = self.translate_expression(target)?;
                self.property_access(target, name)
            }
            ExpressionKind::SuperFieldAccess { name } => {
                let target = self.add(DartNode::Super);
                self.property_access(target, name)
            }
            ExpressionKind::This { qualifier } => self.translate_this(qualifier.as_ref(), location)?,
            ExpressionKind::MethodInvocation {
                target,
                name,
                type_arguments,
                arguments,
            } => {
                let target = match target {
                    Some(target) => self.translate_expression(target)?,
                    None => self.implicit_target(name)?,
                };
                self.invocation(target, name, type_arguments, arguments, location)?
            }
            ExpressionKind::SuperMethodInvocation { name, arguments } => {
                let target = self.add(DartNode::Super);
                self.invocation(target, name, &[], arguments, location)?
            }
            ExpressionKind::ClassInstanceCreation {
                ty,
                constructor,
                arguments,
                anonymous_body: Some(anonymous),
            } => self.translate_anonymous_creation(ty, *constructor, arguments, anonymous, location)?,
            ExpressionKind::ClassInstanceCreation {
                ty,
                constructor,
                arguments,
                anonymous_body: None,
            } => {
                let ty = self.translate_type(ty)?;
                let arguments = self.pack_arguments(*constructor, arguments, location)?;
                let creation = self.add(DartNode::InstanceCreation {
                    ty,
                    constructor_name: NodeIndex::NONE,
                    arguments,
                });
                if let Some(constructor) = constructor {
                    self.ctx
                        .record_constructor_site(*constructor, ConstructorSite::Creation, creation);
                }
                creation
            }
            ExpressionKind::ArrayCreation {
                element_type,
                dimensions,
                extra_dimensions,
                initializer,
            } => {
                let total = u32::try_from(dimensions.len()).unwrap_or(u32::MAX) + extra_dimensions;
                match initializer {
                    Some(elements) => self.translate_array_literal(element_type, total, elements)?,
                    None if dimensions.is_empty() => {
                        return Err(self.invariant(
                            "ArrayCreation",
                            "array creation without dimensions or initializer",
                            location,
                        ));
                    }
                    None => self.translate_array_dimensions(element_type, dimensions, *extra_dimensions)?,
                }
            }
            ExpressionKind::ArrayInitializer { elements } => match &expr.static_type {
                Some(JavaType::Array {
                    element,
                    dimensions,
                }) => self.translate_array_literal(element, *dimensions, elements)?,
                _ => {
                    let elements = self.translate_all(elements)?;
                    self.add(DartNode::ListLiteral {
                        type_argument: NodeIndex::NONE,
                        elements,
                    })
                }
            },
            ExpressionKind::ArrayAccess { array, index } => {
                let target = self.translate_expression(array)?;
                let index = self.translate_expression(index)?;
                self.add(DartNode::Index { target, index })
            }
            ExpressionKind::Assignment {
                operator,
                left,
                right,
            } => self.translate_assignment(operator, left, right, location)?,
            ExpressionKind::Infix {
                operator,
                left,
                right,
            } => self.translate_infix(operator, left, right, location)?,
            ExpressionKind::Prefix { operator, operand } => {
                if !PREFIX_OPERATORS.contains(&operator.as_str()) {
                    return Err(self.invariant("Prefix", format!("operator `{operator}`"), location));
                }
                let operand = self.translate_expression(operand)?;
                // Dart has no unary plus.
                if operator == "+" {
                    operand
                } else {
                    self.add(DartNode::Prefix {
                        operator: operator.clone(),
                        operand,
                    })
                }
            }
            ExpressionKind::Postfix { operator, operand } => {
                if !POSTFIX_OPERATORS.contains(&operator.as_str()) {
                    return Err(self.invariant("Postfix", format!("operator `{operator}`"), location));
                }
                let operand = self.translate_expression(operand)?;
                self.add(DartNode::Postfix {
                    operator: operator.clone(),
                    operand,
                })
            }
            ExpressionKind::Conditional {
                condition,
                then_expression,
                else_expression,
            } => {
                let condition = self.translate_expression(condition)?;
                let then_expression = self.translate_expression(then_expression)?;
                let else_expression = self.translate_expression(else_expression)?;
                self.add(DartNode::Conditional {
                    condition,
                    then_expression,
                    else_expression,
                })
            }
            ExpressionKind::Cast { ty, expression } => self.translate_cast(ty, expression)?,
            ExpressionKind::InstanceOf { expression, ty } => {
                let expression = self.translate_expression(expression)?;
                let ty = self.translate_type(ty)?;
                self.add(DartNode::Is {
                    expression,
                    ty,
                    negated: false,
                })
            }
            ExpressionKind::Parenthesized { expression } => {
                let inner = self.translate_expression(expression)?;
                if matches!(self.ctx.arena.get(inner), Some(DartNode::Parenthesized { .. })) {
                    inner
                } else {
                    self.add(DartNode::Parenthesized { expression: inner })
                }
            }
        };
        Ok(node)
    }

    fn translate_all(&mut self, expressions: &[Expression]) -> Result<Vec<NodeIndex>> {
        expressions
            .iter()
            .map(|e| self.translate_expression(e))
            .collect()
    }

    fn property_access(&mut self, target: NodeIndex, name: &Identifier) -> NodeIndex {
        let location = self.loc(name.location.as_ref());
        let name = self
            .ctx
            .identifier_at(&name.name, name.binding, location.as_ref());
        self.add(DartNode::PropertyAccess { target, name })
    }

    // =========================================================================
    // Names
    // =========================================================================

    fn translate_name(&mut self, name: &Identifier) -> Result<NodeIndex> {
        let location = name.location.as_ref();
        match (name.binding, self.binding_kind(name.binding)) {
            (Some(binding), Some(BindingKind::LocalVariable | BindingKind::Parameter)) => {
                if self
                    .local_depth
                    .get(&binding)
                    .is_some_and(|&depth| depth < self.frames.len())
                {
                    return Err(self.unsupported(
                        "Name",
                        format!("local `{}` captured by a nested class", name.name),
                        location,
                    ));
                }
            }
            (
                Some(binding),
                Some(BindingKind::Field | BindingKind::Method | BindingKind::EnumConstant),
            ) => {
                if let Some(target) = self.static_qualifier(binding, &name.name, location)? {
                    return Ok(self.property_access(target, name));
                }
            }
            (Some(binding), Some(BindingKind::Type)) => {
                let node = self.type_identifier(binding);
                let location = self.loc(location);
                self.ctx.arena.set_location(node, location);
                return Ok(node);
            }
            _ => {}
        }
        let location = self.loc(location);
        Ok(self
            .ctx
            .identifier_at(&name.name, name.binding, location.as_ref()))
    }

    /// Target for a member referenced without one. Static members declared in
    /// another class are qualified with that class; instance members of an
    /// enclosing class cannot be reached once classes are flattened.
    fn static_qualifier(
        &mut self,
        member: BindingId,
        name: &str,
        location: Option<&SourceLocation>,
    ) -> Result<Option<NodeIndex>> {
        let Some(info) = self.ctx.binding_info(member) else {
            return Ok(None);
        };
        let Some(owner) = info.declaring_type else {
            return Ok(None);
        };
        let is_static = info.is_static() || info.kind == BindingKind::EnumConstant;
        let Some(frame) = self.frame() else {
            return Ok(None);
        };
        if is_static {
            if frame.binding == Some(owner) {
                return Ok(None);
            }
            return Ok(Some(self.type_identifier(owner)));
        }
        if frame.chain.contains(&owner) {
            return Ok(None);
        }
        let enclosing = self
            .frames
            .iter()
            .rev()
            .skip(1)
            .any(|outer| outer.chain.contains(&owner));
        if enclosing {
            return Err(self.unsupported(
                "Name",
                format!("instance member `{name}` of an enclosing class"),
                location,
            ));
        }
        Ok(None)
    }

    fn implicit_target(&mut self, name: &Identifier) -> Result<NodeIndex> {
        match name.binding {
            Some(binding) if self.ctx.binding_kind(binding) == Some(BindingKind::Method) => Ok(self
                .static_qualifier(binding, &name.name, name.location.as_ref())?
                .unwrap_or(NodeIndex::NONE)),
            _ => Ok(NodeIndex::NONE),
        }
    }

    fn translate_this(
        &mut self,
        qualifier: Option<&Identifier>,
        location: Option<&SourceLocation>,
    ) -> Result<NodeIndex> {
        if let Some(qualifier) = qualifier {
            let current = self.frame().is_some_and(|frame| match qualifier.binding {
                Some(binding) => frame.binding == Some(binding),
                None => frame.name == qualifier.name,
            });
            if !current {
                return Err(self.unsupported(
                    "This",
                    format!("`{}.this` from a nested class", qualifier.name),
                    location,
                ));
            }
        }
        Ok(self.add(DartNode::This))
    }

    fn translate_type_literal(
        &mut self,
        ty: &JavaType,
        location: Option<&SourceLocation>,
    ) -> Result<NodeIndex> {
        match ty {
            JavaType::Primitive { primitive } => {
                Ok(self.ident(library::primitive_name(*primitive), None))
            }
            JavaType::Simple { name, .. } | JavaType::Qualified { name, .. } => {
                if let Some(dart) = self.library_name(name) {
                    return Ok(self.ident(dart, None));
                }
                let location = self.loc(name.location.as_ref());
                Ok(self
                    .ctx
                    .identifier_at(&name.name, name.binding, location.as_ref()))
            }
            JavaType::Array { .. } => Ok(self.ident("List", None)),
            JavaType::Wildcard { .. } => Err(self.invariant(
                "TypeLiteral",
                "wildcard used as a class literal",
                location,
            )),
        }
    }

    // =========================================================================
    // Invocations
    // =========================================================================

    fn invocation(
        &mut self,
        target: NodeIndex,
        name: &Identifier,
        type_arguments: &[JavaType],
        arguments: &[Expression],
        location: Option<&SourceLocation>,
    ) -> Result<NodeIndex> {
        let name_location = self.loc(name.location.as_ref());
        let method = self
            .ctx
            .identifier_at(&name.name, name.binding, name_location.as_ref());
        let type_arguments = self.translate_types(type_arguments)?;
        let arguments = self.pack_arguments(name.binding, arguments, location)?;
        Ok(self.add(DartNode::MethodInvocation {
            target,
            name: method,
            type_arguments,
            arguments,
        }))
    }

    /// Translate call arguments. For a variable-arity callee the trailing
    /// arguments are packed into one list literal.
    pub(super) fn pack_arguments(
        &mut self,
        callee: Option<BindingId>,
        arguments: &[Expression],
        location: Option<&SourceLocation>,
    ) -> Result<Vec<NodeIndex>> {
        let mut nodes = self.translate_all(arguments)?;
        let Some(callee) = callee else {
            return Ok(nodes);
        };
        let Some(info) = self.ctx.binding_info(callee) else {
            let location = self.loc(location);
            self.ctx.report(Diagnostic::warning(
                diagnostic_codes::UNRESOLVED_VARARGS_CALL,
                &[&callee.0.to_string()],
                location,
            ));
            return Ok(nodes);
        };
        if !info.is_varargs || info.parameter_count == 0 {
            return Ok(nodes);
        }
        let fixed = info.parameter_count - 1;
        if nodes.len() < fixed {
            return Ok(nodes);
        }
        let packed = nodes.split_off(fixed);
        let type_argument = self.common_type(&arguments[fixed..])?;
        let list = self.ctx.arena.add_flagged(
            DartNode::ListLiteral {
                type_argument,
                elements: packed,
            },
            NodeFlags::VARARGS_PACK | NodeFlags::SYNTHETIC,
        );
        let argument = match vararg_unwrap::unwrapped_pack(&self.ctx.arena, list) {
            Some(element) => {
                self.ctx.arena.set_parent(element, NodeIndex::NONE);
                element
            }
            None => list,
        };
        nodes.push(argument);
        Ok(nodes)
    }

    /// Element type for packed arguments when they all share one static type.
    fn common_type(&mut self, arguments: &[Expression]) -> Result<NodeIndex> {
        let Some(first) = arguments.first().and_then(|a| a.static_type.as_ref()) else {
            return Ok(NodeIndex::NONE);
        };
        if first.is_array()
            || arguments
                .iter()
                .any(|a| a.static_type.as_ref() != Some(first))
        {
            return Ok(NodeIndex::NONE);
        }
        let first = first.clone();
        self.translate_type(&first)
    }

    // =========================================================================
    // Anonymous classes
    // =========================================================================

    /// `new Base(args) { body }` becomes a top-level `Enclosing_N` class and
    /// `new Enclosing_N(args)`.
    fn translate_anonymous_creation(
        &mut self,
        base: &JavaType,
        constructor: Option<BindingId>,
        arguments: &[Expression],
        anonymous: &AnonymousClass,
        location: Option<&SourceLocation>,
    ) -> Result<NodeIndex> {
        let enclosing = self
            .frame()
            .map(|f| f.flat_name.clone())
            .unwrap_or_default();
        let index = self.ctx.next_anonymous_index(&enclosing);
        let class_name = format!("{enclosing}_{index}");
        let base_is_interface = base
            .name()
            .and_then(|n| n.binding)
            .and_then(|b| self.ctx.binding_info(b))
            .and_then(|info| info.type_kind)
            == Some(TypeKind::Interface);

        // Arguments belong to the enclosing scope.
        let arguments = self.pack_arguments(constructor, arguments, location)?;

        let name = Identifier {
            name: class_name.clone(),
            binding: anonymous.binding,
            location: location.cloned(),
        };
        let interfaces = if base_is_interface {
            vec![base.clone()]
        } else {
            Vec::new()
        };
        let record = self.translate_class(&ClassShape {
            name: &name,
            type_kind: TypeKind::Class,
            nesting: TypeNesting::Anonymous,
            is_abstract: false,
            type_parameters: &[],
            superclass: (!base_is_interface).then_some(base),
            interfaces: &interfaces,
            enum_constants: &[],
            body: &anonymous.body,
        })?;

        if !base_is_interface {
            let class = self.ctx.classes[record].declaration;
            let forwarding = self.forwarding_constructor(&class_name, anonymous.binding, constructor, arguments.len());
            self.ctx.arena.insert_member(class, 0, forwarding);
        }

        let type_name = self.ident(&class_name, anonymous.binding);
        let ty = self.add(DartNode::TypeName {
            name: type_name,
            type_arguments: Vec::new(),
        });
        Ok(self.add(DartNode::InstanceCreation {
            ty,
            constructor_name: NodeIndex::NONE,
            arguments,
        }))
    }

    /// `Name(p0, p1) : super(p0, p1);`
    fn forwarding_constructor(
        &mut self,
        class_name: &str,
        class_binding: Option<BindingId>,
        super_constructor: Option<BindingId>,
        arity: usize,
    ) -> NodeIndex {
        let class_ident = self.ident(class_name, class_binding);
        let mut parameters = Vec::with_capacity(arity);
        let mut forwarded = Vec::with_capacity(arity);
        for i in 0..arity {
            let param_name = format!("p{i}");
            let name = self.ident(&param_name, None);
            parameters.push(self.add(DartNode::FormalParameter {
                ty: NodeIndex::NONE,
                name,
                is_field: false,
            }));
            forwarded.push(self.ident(&param_name, None));
        }
        let super_call = self.add(DartNode::SuperConstructorInvocation {
            name: NodeIndex::NONE,
            arguments: forwarded,
        });
        if let Some(super_constructor) = super_constructor {
            self.ctx
                .record_constructor_site(super_constructor, ConstructorSite::Super, super_call);
        }
        self.ctx.arena.add_flagged(
            DartNode::ConstructorDeclaration {
                class_name: class_ident,
                name: NodeIndex::NONE,
                parameters,
                initializers: vec![super_call],
                body: NodeIndex::NONE,
            },
            NodeFlags::SYNTHETIC,
        )
    }

    // =========================================================================
    // Arrays
    // =========================================================================

    /// `{a, b}` / `new T[] {a, b}` as `<T>[a, b]`, nested per dimension.
    fn translate_array_literal(
        &mut self,
        element: &JavaType,
        dimensions: u32,
        elements: &[Expression],
    ) -> Result<NodeIndex> {
        let inner = dimensions.saturating_sub(1);
        let type_argument = self.translate_type(&with_dimensions(element, inner))?;
        let mut nodes = Vec::with_capacity(elements.len());
        for item in elements {
            let node = match &item.kind {
                ExpressionKind::ArrayInitializer { elements } if inner > 0 => {
                    self.translate_array_literal(element, inner, elements)?
                }
                _ => self.translate_expression(item)?,
            };
            nodes.push(node);
        }
        Ok(self.add(DartNode::ListLiteral {
            type_argument,
            elements: nodes,
        }))
    }

    /// `new T[n]` as `new List<T>.filled(n, default)`; each further sized
    /// dimension wraps it in `new List<..>.generate(n, (_) => ...)`.
    fn translate_array_dimensions(
        &mut self,
        element: &JavaType,
        dimensions: &[Expression],
        extra: u32,
    ) -> Result<NodeIndex> {
        let Some((first, rest)) = dimensions.split_first() else {
            return Ok(self.add(DartNode::NullLiteral));
        };
        let size = self.translate_expression(first)?;
        let remaining = u32::try_from(rest.len()).unwrap_or(u32::MAX) + extra;
        let item_type = self.translate_type(&with_dimensions(element, remaining))?;
        let list_type = self.type_name("List", vec![item_type]);
        if rest.is_empty() {
            let fill = if extra == 0 {
                self.dart_type_name(element)
                    .and_then(|name| library::default_literal(&mut self.ctx.arena, &name))
            } else {
                None
            };
            let fill = fill.unwrap_or_else(|| self.add(DartNode::NullLiteral));
            let constructor_name = self.ident("filled", None);
            return Ok(self.add(DartNode::InstanceCreation {
                ty: list_type,
                constructor_name,
                arguments: vec![size, fill],
            }));
        }
        let inner = self.translate_array_dimensions(element, rest, extra)?;
        let param_name = self.ident("_", None);
        let param = self.add(DartNode::FormalParameter {
            ty: NodeIndex::NONE,
            name: param_name,
            is_field: false,
        });
        let generator = self.add(DartNode::FunctionExpression {
            parameters: vec![param],
            body: inner,
        });
        let constructor_name = self.ident("generate", None);
        Ok(self.add(DartNode::InstanceCreation {
            ty: list_type,
            constructor_name,
            arguments: vec![size, generator],
        }))
    }

    // =========================================================================
    // Operators
    // =========================================================================

    fn translate_infix(
        &mut self,
        operator: &str,
        left: &Expression,
        right: &Expression,
        location: Option<&SourceLocation>,
    ) -> Result<NodeIndex> {
        if !INFIX_OPERATORS.contains(&operator) {
            return Err(self.invariant("Infix", format!("operator `{operator}`"), location));
        }
        let integral = is_integral(left.static_type.as_ref()) && is_integral(right.static_type.as_ref());
        let mapped = match operator {
            "/" if integral => "~/",
            ">>>" => ">>",
            other => other,
        };
        let mut left_node = self.translate_expression(left)?;
        let mut right_node = self.translate_expression(right)?;
        if operator == "+" {
            let left_string = is_string(left.static_type.as_ref());
            let right_string = is_string(right.static_type.as_ref());
            if left_string && !right_string && right.static_type.is_some() {
                right_node = self.stringify(right_node, right.static_type.as_ref());
            } else if right_string && !left_string && left.static_type.is_some() {
                left_node = self.stringify(left_node, left.static_type.as_ref());
            }
        }
        Ok(self.add(DartNode::Binary {
            operator: mapped.to_string(),
            left: left_node,
            right: right_node,
        }))
    }

    fn translate_assignment(
        &mut self,
        operator: &str,
        left: &Expression,
        right: &Expression,
        location: Option<&SourceLocation>,
    ) -> Result<NodeIndex> {
        if !ASSIGNMENT_OPERATORS.contains(&operator) {
            return Err(self.invariant("Assignment", format!("operator `{operator}`"), location));
        }
        let mapped = match operator {
            "/=" if is_integral(left.static_type.as_ref()) => "~/=",
            ">>>=" => ">>=",
            other => other,
        };
        let left_node = self.translate_expression(left)?;
        let mut right_node = self.translate_expression(right)?;
        if operator == "+="
            && is_string(left.static_type.as_ref())
            && right.static_type.is_some()
            && !is_string(right.static_type.as_ref())
        {
            right_node = self.stringify(right_node, right.static_type.as_ref());
        }
        Ok(self.add(DartNode::Assignment {
            operator: mapped.to_string(),
            left: left_node,
            right: right_node,
        }))
    }

    /// String form of a non-string operand of `+`. Characters are code units.
    fn stringify(&mut self, node: NodeIndex, ty: Option<&JavaType>) -> NodeIndex {
        let (target, method, arguments) =
            if ty.and_then(JavaType::as_primitive) == Some(PrimitiveKind::Char) {
                (self.ident("String", None), "fromCharCode", vec![node])
            } else {
                (self.ensure_primary(node), "toString", Vec::new())
            };
        let name = self.ident(method, None);
        self.add(DartNode::MethodInvocation {
            target,
            name,
            type_arguments: Vec::new(),
            arguments,
        })
    }

    fn translate_cast(&mut self, ty: &JavaType, expression: &Expression) -> Result<NodeIndex> {
        let inner = self.translate_expression(expression)?;
        let source = expression.static_type.as_ref();
        let conversion = match ty.as_primitive() {
            Some(p) if p.is_integral() && !is_integral(source) => Some("toInt"),
            Some(p) if p.is_floating() && !is_floating(source) => Some("toDouble"),
            Some(_) => None,
            None => {
                let ty = self.translate_type(ty)?;
                let cast = self.add(DartNode::As {
                    expression: inner,
                    ty,
                });
                return Ok(self.add(DartNode::Parenthesized { expression: cast }));
            }
        };
        let Some(method) = conversion else {
            return Ok(inner);
        };
        let target = self.ensure_primary(inner);
        let name = self.ident(method, None);
        Ok(self.add(DartNode::MethodInvocation {
            target,
            name,
            type_arguments: Vec::new(),
            arguments: Vec::new(),
        }))
    }

    /// Wrap `node` in parentheses unless it can be a member-access target as is.
    fn ensure_primary(&mut self, node: NodeIndex) -> NodeIndex {
        let primary = matches!(
            self.ctx.arena.get(node),
            Some(
                DartNode::Identifier { .. }
                    | DartNode::IntegerLiteral { .. }
                    | DartNode::DoubleLiteral { .. }
                    | DartNode::StringLiteral { .. }
                    | DartNode::BooleanLiteral { .. }
                    | DartNode::NullLiteral
                    | DartNode::MethodInvocation { .. }
                    | DartNode::PropertyAccess { .. }
                    | DartNode::Index { .. }
                    | DartNode::Parenthesized { .. }
                    | DartNode::This
                    | DartNode::ListLiteral { .. }
                    | DartNode::InstanceCreation { .. }
            )
        );
        if primary {
            node
        } else {
            self.add(DartNode::Parenthesized { expression: node })
        }
    }
}

fn is_string(ty: Option<&JavaType>) -> bool {
    ty.and_then(JavaType::name)
        .is_some_and(|name| name.name == "String")
}

fn is_integral(ty: Option<&JavaType>) -> bool {
    ty.is_some_and(JavaType::is_integral)
}

fn is_floating(ty: Option<&JavaType>) -> bool {
    match ty {
        Some(JavaType::Primitive { primitive }) => primitive.is_floating(),
        Some(JavaType::Simple { name, .. } | JavaType::Qualified { name, .. }) => {
            matches!(name.name.as_str(), "Double" | "Float")
        }
        _ => false,
    }
}

/// Java numeric literal token to Dart. Returns the text and whether it is a
/// double. Suffixes and digit separators are dropped; octal and binary
/// integers become decimal.
pub(crate) fn normalize_number(token: &str) -> Option<(String, bool)> {
    let cleaned: String = token.chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }
    let lower = cleaned.to_ascii_lowercase();

    if lower.starts_with("0x") {
        let digits = cleaned[2..].trim_end_matches(['l', 'L']);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        return Some((format!("0x{digits}"), false));
    }
    if let Some(bits) = lower.strip_prefix("0b") {
        let bits = bits.trim_end_matches('l');
        let value = u64::from_str_radix(bits, 2).ok()?;
        return Some((value.to_string(), false));
    }

    let (body, suffix) = match lower.chars().last() {
        Some(c @ ('l' | 'f' | 'd')) => (&lower[..lower.len() - 1], Some(c)),
        _ => (lower.as_str(), None),
    };
    if body.is_empty() {
        return None;
    }
    let is_double = match suffix {
        Some('l') => false,
        Some(_) => true,
        None => body.contains(['.', 'e']),
    };

    if !is_double {
        if !body.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        if body.len() > 1 && body.starts_with('0') {
            let value = u64::from_str_radix(&body[1..], 8).ok()?;
            return Some((value.to_string(), false));
        }
        return Some((body.to_string(), false));
    }

    if !body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | '+' | '-'))
    {
        return None;
    }
    let (mantissa, exponent) = match body.find('e') {
        Some(at) => (&body[..at], &body[at..]),
        None => (body, ""),
    };
    let mut mantissa = mantissa.to_string();
    if mantissa.starts_with('.') {
        mantissa.insert(0, '0');
    }
    if mantissa.ends_with('.') {
        mantissa.push('0');
    }
    if !mantissa.contains('.') && exponent.is_empty() {
        mantissa.push_str(".0");
    }
    Some((format!("{mantissa}{exponent}"), true))
}

#[cfg(test)]
#[path = "../../tests/number_literal_tests.rs"]
mod tests;

//! Destination tree node shapes.
//!
//! Children are referenced by [`NodeIndex`] into a [`crate::DartArena`]. A child
//! slot that is absent holds [`NodeIndex::NONE`].

use bitflags::bitflags;

/// Stable index of a node in the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }
}

impl Default for NodeIndex {
    fn default() -> Self {
        Self::NONE
    }
}

bitflags! {
    /// Facts attached to a node by the translator and read by later passes.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u16 {
        /// Expression whose origin static type was an array.
        const ARRAY_TYPED = 1 << 0;
        /// List literal synthesized to pack trailing vararg arguments.
        const VARARGS_PACK = 1 << 1;
        /// Node with no origin counterpart.
        const SYNTHETIC = 1 << 2;
        /// Method holding a lowered constructor body, or a call to one.
        const CONSTRUCTOR_IMPL = 1 << 3;
        /// Field or local originally declared `final`.
        const WAS_FINAL = 1 << 4;
        /// Field whose origin type is a Java primitive, not a boxed class.
        const PRIMITIVE_TYPED = 1 << 5;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    Getter,
    Setter,
    Operator,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DartNode {
    // =========================================================================
    // Declarations
    // =========================================================================
    /// One output file.
    CompilationUnit {
        declarations: Vec<NodeIndex>,
    },
    ClassDeclaration {
        is_abstract: bool,
        name: NodeIndex,
        type_parameters: Vec<NodeIndex>,
        extends: NodeIndex,
        implements: Vec<NodeIndex>,
        members: Vec<NodeIndex>,
    },
    /// `T extends Bound`
    TypeParameter {
        name: NodeIndex,
        bound: NodeIndex,
    },
    FieldDeclaration {
        is_static: bool,
        is_final: bool,
        ty: NodeIndex,
        variables: Vec<NodeIndex>,
    },
    /// `name = initializer` inside a field or local declaration.
    VariableDeclaration {
        name: NodeIndex,
        initializer: NodeIndex,
    },
    /// `body` is a `Block`, an expression (`=> e;`), or NONE (`;`).
    MethodDeclaration {
        is_static: bool,
        kind: MethodKind,
        return_type: NodeIndex,
        name: NodeIndex,
        type_parameters: Vec<NodeIndex>,
        parameters: Vec<NodeIndex>,
        body: NodeIndex,
    },
    /// `class_name.name(params) : initializers body`. `name` is NONE for the
    /// unnamed constructor, `body` is NONE for `;`.
    ConstructorDeclaration {
        class_name: NodeIndex,
        name: NodeIndex,
        parameters: Vec<NodeIndex>,
        initializers: Vec<NodeIndex>,
        body: NodeIndex,
    },
    /// `T name` or `this.name` when `is_field`.
    FormalParameter {
        ty: NodeIndex,
        name: NodeIndex,
        is_field: bool,
    },
    /// `this.name(args)` in an initializer list.
    RedirectingConstructorInvocation {
        name: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    /// `super.name(args)` in an initializer list.
    SuperConstructorInvocation {
        name: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    /// `Name<Args>`
    TypeName {
        name: NodeIndex,
        type_arguments: Vec<NodeIndex>,
    },

    // =========================================================================
    // Statements
    // =========================================================================
    Block {
        statements: Vec<NodeIndex>,
    },
    VariableDeclarationStatement {
        is_final: bool,
        ty: NodeIndex,
        variables: Vec<NodeIndex>,
    },
    ExpressionStatement {
        expression: NodeIndex,
    },
    If {
        condition: NodeIndex,
        then_statement: NodeIndex,
        else_statement: NodeIndex,
    },
    /// `variables` is a `VariableDeclarationStatement` or NONE.
    For {
        variables: NodeIndex,
        initializers: Vec<NodeIndex>,
        condition: NodeIndex,
        updaters: Vec<NodeIndex>,
        body: NodeIndex,
    },
    ForEach {
        ty: NodeIndex,
        name: NodeIndex,
        iterable: NodeIndex,
        body: NodeIndex,
    },
    While {
        condition: NodeIndex,
        body: NodeIndex,
    },
    Do {
        body: NodeIndex,
        condition: NodeIndex,
    },
    Switch {
        expression: NodeIndex,
        members: Vec<NodeIndex>,
    },
    SwitchMember {
        labels: Vec<NodeIndex>,
        is_default: bool,
        statements: Vec<NodeIndex>,
    },
    Try {
        body: NodeIndex,
        catches: Vec<NodeIndex>,
        finally: NodeIndex,
    },
    /// `on T catch (e)`; `ty` NONE means a bare `catch (e)`.
    CatchClause {
        ty: NodeIndex,
        name: NodeIndex,
        body: NodeIndex,
    },
    Return {
        expression: NodeIndex,
    },
    Break {
        label: Option<String>,
    },
    Continue {
        label: Option<String>,
    },
    Labeled {
        label: String,
        body: NodeIndex,
    },
    Empty,
    Assert {
        condition: NodeIndex,
        message: NodeIndex,
    },

    // =========================================================================
    // Expressions
    // =========================================================================
    Identifier {
        name: String,
    },
    IntegerLiteral {
        token: String,
    },
    DoubleLiteral {
        token: String,
    },
    StringLiteral {
        value: String,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    Binary {
        operator: String,
        left: NodeIndex,
        right: NodeIndex,
    },
    Prefix {
        operator: String,
        operand: NodeIndex,
    },
    Postfix {
        operator: String,
        operand: NodeIndex,
    },
    Assignment {
        operator: String,
        left: NodeIndex,
        right: NodeIndex,
    },
    Conditional {
        condition: NodeIndex,
        then_expression: NodeIndex,
        else_expression: NodeIndex,
    },
    /// `target.name<T>(args)`, or `name(args)` when `target` is NONE.
    MethodInvocation {
        target: NodeIndex,
        name: NodeIndex,
        type_arguments: Vec<NodeIndex>,
        arguments: Vec<NodeIndex>,
    },
    PropertyAccess {
        target: NodeIndex,
        name: NodeIndex,
    },
    Index {
        target: NodeIndex,
        index: NodeIndex,
    },
    /// `new T.name(args)`
    InstanceCreation {
        ty: NodeIndex,
        constructor_name: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    /// `<T>[a, b]`
    ListLiteral {
        type_argument: NodeIndex,
        elements: Vec<NodeIndex>,
    },
    As {
        expression: NodeIndex,
        ty: NodeIndex,
    },
    Is {
        expression: NodeIndex,
        ty: NodeIndex,
        negated: bool,
    },
    This,
    Super,
    Parenthesized {
        expression: NodeIndex,
    },
    Throw {
        expression: NodeIndex,
    },
    /// `(params) => body` or `(params) { ... }`.
    FunctionExpression {
        parameters: Vec<NodeIndex>,
        body: NodeIndex,
    },
}

impl DartNode {
    /// Short name of the node shape, for diagnostics and logs.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::CompilationUnit { .. } => "CompilationUnit",
            Self::ClassDeclaration { .. } => "ClassDeclaration",
            Self::TypeParameter { .. } => "TypeParameter",
            Self::FieldDeclaration { .. } => "FieldDeclaration",
            Self::VariableDeclaration { .. } => "VariableDeclaration",
            Self::MethodDeclaration { .. } => "MethodDeclaration",
            Self::ConstructorDeclaration { .. } => "ConstructorDeclaration",
            Self::FormalParameter { .. } => "FormalParameter",
            Self::RedirectingConstructorInvocation { .. } => "RedirectingConstructorInvocation",
            Self::SuperConstructorInvocation { .. } => "SuperConstructorInvocation",
            Self::TypeName { .. } => "TypeName",
            Self::Block { .. } => "Block",
            Self::VariableDeclarationStatement { .. } => "VariableDeclarationStatement",
            Self::ExpressionStatement { .. } => "ExpressionStatement",
            Self::If { .. } => "If",
            Self::For { .. } => "For",
            Self::ForEach { .. } => "ForEach",
            Self::While { .. } => "While",
            Self::Do { .. } => "Do",
            Self::Switch { .. } => "Switch",
            Self::SwitchMember { .. } => "SwitchMember",
            Self::Try { .. } => "Try",
            Self::CatchClause { .. } => "CatchClause",
            Self::Return { .. } => "Return",
            Self::Break { .. } => "Break",
            Self::Continue { .. } => "Continue",
            Self::Labeled { .. } => "Labeled",
            Self::Empty => "Empty",
            Self::Assert { .. } => "Assert",
            Self::Identifier { .. } => "Identifier",
            Self::IntegerLiteral { .. } => "IntegerLiteral",
            Self::DoubleLiteral { .. } => "DoubleLiteral",
            Self::StringLiteral { .. } => "StringLiteral",
            Self::BooleanLiteral { .. } => "BooleanLiteral",
            Self::NullLiteral => "NullLiteral",
            Self::Binary { .. } => "Binary",
            Self::Prefix { .. } => "Prefix",
            Self::Postfix { .. } => "Postfix",
            Self::Assignment { .. } => "Assignment",
            Self::Conditional { .. } => "Conditional",
            Self::MethodInvocation { .. } => "MethodInvocation",
            Self::PropertyAccess { .. } => "PropertyAccess",
            Self::Index { .. } => "Index",
            Self::InstanceCreation { .. } => "InstanceCreation",
            Self::ListLiteral { .. } => "ListLiteral",
            Self::As { .. } => "As",
            Self::Is { .. } => "Is",
            Self::This => "This",
            Self::Super => "Super",
            Self::Parenthesized { .. } => "Parenthesized",
            Self::Throw { .. } => "Throw",
            Self::FunctionExpression { .. } => "FunctionExpression",
        }
    }

    #[must_use]
    pub const fn is_identifier(&self) -> bool {
        matches!(self, Self::Identifier { .. })
    }

    /// Visit every child slot in source order.
    pub fn for_each_child(&self, mut f: impl FnMut(NodeIndex)) {
        let mut visit = |idx: &NodeIndex| {
            if idx.is_some() {
                f(*idx);
            }
        };
        match self {
            Self::CompilationUnit { declarations } => declarations.iter().for_each(visit),
            Self::ClassDeclaration {
                name,
                type_parameters,
                extends,
                implements,
                members,
                ..
            } => {
                visit(name);
                type_parameters.iter().for_each(&mut visit);
                visit(extends);
                implements.iter().for_each(&mut visit);
                members.iter().for_each(visit);
            }
            Self::TypeParameter { name, bound } => {
                visit(name);
                visit(bound);
            }
            Self::FieldDeclaration { ty, variables, .. }
            | Self::VariableDeclarationStatement { ty, variables, .. } => {
                visit(ty);
                variables.iter().for_each(visit);
            }
            Self::VariableDeclaration { name, initializer } => {
                visit(name);
                visit(initializer);
            }
            Self::MethodDeclaration {
                return_type,
                name,
                type_parameters,
                parameters,
                body,
                ..
            } => {
                visit(return_type);
                visit(name);
                type_parameters.iter().for_each(&mut visit);
                parameters.iter().for_each(&mut visit);
                visit(body);
            }
            Self::ConstructorDeclaration {
                class_name,
                name,
                parameters,
                initializers,
                body,
            } => {
                visit(class_name);
                visit(name);
                parameters.iter().for_each(&mut visit);
                initializers.iter().for_each(&mut visit);
                visit(body);
            }
            Self::FormalParameter { ty, name, .. } => {
                visit(ty);
                visit(name);
            }
            Self::RedirectingConstructorInvocation { name, arguments }
            | Self::SuperConstructorInvocation { name, arguments } => {
                visit(name);
                arguments.iter().for_each(visit);
            }
            Self::TypeName {
                name,
                type_arguments,
            } => {
                visit(name);
                type_arguments.iter().for_each(visit);
            }
            Self::Block { statements } => statements.iter().for_each(visit),
            Self::ExpressionStatement { expression }
            | Self::Return { expression }
            | Self::Parenthesized { expression }
            | Self::Throw { expression } => visit(expression),
            Self::If {
                condition,
                then_statement,
                else_statement,
            } => {
                visit(condition);
                visit(then_statement);
                visit(else_statement);
            }
            Self::For {
                variables,
                initializers,
                condition,
                updaters,
                body,
            } => {
                visit(variables);
                initializers.iter().for_each(&mut visit);
                visit(condition);
                updaters.iter().for_each(&mut visit);
                visit(body);
            }
            Self::ForEach {
                ty,
                name,
                iterable,
                body,
            } => {
                visit(ty);
                visit(name);
                visit(iterable);
                visit(body);
            }
            Self::While { condition, body } => {
                visit(condition);
                visit(body);
            }
            Self::Do { body, condition } => {
                visit(body);
                visit(condition);
            }
            Self::Switch {
                expression,
                members,
            } => {
                visit(expression);
                members.iter().for_each(visit);
            }
            Self::SwitchMember {
                labels, statements, ..
            } => {
                labels.iter().for_each(&mut visit);
                statements.iter().for_each(visit);
            }
            Self::Try {
                body,
                catches,
                finally,
            } => {
                visit(body);
                catches.iter().for_each(&mut visit);
                visit(finally);
            }
            Self::CatchClause { ty, name, body } => {
                visit(ty);
                visit(name);
                visit(body);
            }
            Self::Labeled { body, .. } => visit(body),
            Self::Assert { condition, message } => {
                visit(condition);
                visit(message);
            }
            Self::Binary { left, right, .. } | Self::Assignment { left, right, .. } => {
                visit(left);
                visit(right);
            }
            Self::Prefix { operand, .. } | Self::Postfix { operand, .. } => visit(operand),
            Self::Conditional {
                condition,
                then_expression,
                else_expression,
            } => {
                visit(condition);
                visit(then_expression);
                visit(else_expression);
            }
            Self::MethodInvocation {
                target,
                name,
                type_arguments,
                arguments,
            } => {
                visit(target);
                visit(name);
                type_arguments.iter().for_each(&mut visit);
                arguments.iter().for_each(visit);
            }
            Self::PropertyAccess { target, name } => {
                visit(target);
                visit(name);
            }
            Self::Index { target, index } => {
                visit(target);
                visit(index);
            }
            Self::InstanceCreation {
                ty,
                constructor_name,
                arguments,
            } => {
                visit(ty);
                visit(constructor_name);
                arguments.iter().for_each(visit);
            }
            Self::ListLiteral {
                type_argument,
                elements,
            } => {
                visit(type_argument);
                elements.iter().for_each(visit);
            }
            Self::As { expression, ty } | Self::Is { expression, ty, .. } => {
                visit(expression);
                visit(ty);
            }
            Self::FunctionExpression { parameters, body } => {
                parameters.iter().for_each(&mut visit);
                visit(body);
            }
            Self::Break { .. }
            | Self::Continue { .. }
            | Self::Empty
            | Self::Identifier { .. }
            | Self::IntegerLiteral { .. }
            | Self::DoubleLiteral { .. }
            | Self::StringLiteral { .. }
            | Self::BooleanLiteral { .. }
            | Self::NullLiteral
            | Self::This
            | Self::Super => {}
        }
    }

    /// Visit every child slot mutably, including NONE slots.
    pub fn for_each_slot_mut(&mut self, mut f: impl FnMut(&mut NodeIndex)) {
        match self {
            Self::CompilationUnit { declarations } => declarations.iter_mut().for_each(f),
            Self::ClassDeclaration {
                name,
                type_parameters,
                extends,
                implements,
                members,
                ..
            } => {
                f(name);
                type_parameters.iter_mut().for_each(&mut f);
                f(extends);
                implements.iter_mut().for_each(&mut f);
                members.iter_mut().for_each(f);
            }
            Self::TypeParameter { name, bound } => {
                f(name);
                f(bound);
            }
            Self::FieldDeclaration { ty, variables, .. }
            | Self::VariableDeclarationStatement { ty, variables, .. } => {
                f(ty);
                variables.iter_mut().for_each(f);
            }
            Self::VariableDeclaration { name, initializer } => {
                f(name);
                f(initializer);
            }
            Self::MethodDeclaration {
                return_type,
                name,
                type_parameters,
                parameters,
                body,
                ..
            } => {
                f(return_type);
                f(name);
                type_parameters.iter_mut().for_each(&mut f);
                parameters.iter_mut().for_each(&mut f);
                f(body);
            }
            Self::ConstructorDeclaration {
                class_name,
                name,
                parameters,
                initializers,
                body,
            } => {
                f(class_name);
                f(name);
                parameters.iter_mut().for_each(&mut f);
                initializers.iter_mut().for_each(&mut f);
                f(body);
            }
            Self::FormalParameter { ty, name, .. } => {
                f(ty);
                f(name);
            }
            Self::RedirectingConstructorInvocation { name, arguments }
            | Self::SuperConstructorInvocation { name, arguments } => {
                f(name);
                arguments.iter_mut().for_each(f);
            }
            Self::TypeName {
                name,
                type_arguments,
            } => {
                f(name);
                type_arguments.iter_mut().for_each(f);
            }
            Self::Block { statements } => statements.iter_mut().for_each(f),
            Self::ExpressionStatement { expression }
            | Self::Return { expression }
            | Self::Parenthesized { expression }
            | Self::Throw { expression } => f(expression),
            Self::If {
                condition,
                then_statement,
                else_statement,
            } => {
                f(condition);
                f(then_statement);
                f(else_statement);
            }
            Self::For {
                variables,
                initializers,
                condition,
                updaters,
                body,
            } => {
                f(variables);
                initializers.iter_mut().for_each(&mut f);
                f(condition);
                updaters.iter_mut().for_each(&mut f);
                f(body);
            }
            Self::ForEach {
                ty,
                name,
                iterable,
                body,
            } => {
                f(ty);
                f(name);
                f(iterable);
                f(body);
            }
            Self::While { condition, body } => {
                f(condition);
                f(body);
            }
            Self::Do { body, condition } => {
                f(body);
                f(condition);
            }
            Self::Switch {
                expression,
                members,
            } => {
                f(expression);
                members.iter_mut().for_each(f);
            }
            Self::SwitchMember {
                labels, statements, ..
            } => {
                labels.iter_mut().for_each(&mut f);
                statements.iter_mut().for_each(f);
            }
            Self::Try {
                body,
                catches,
                finally,
            } => {
                f(body);
                catches.iter_mut().for_each(&mut f);
                f(finally);
            }
            Self::CatchClause { ty, name, body } => {
                f(ty);
                f(name);
                f(body);
            }
            Self::Labeled { body, .. } => f(body),
            Self::Assert { condition, message } => {
                f(condition);
                f(message);
            }
            Self::Binary { left, right, .. } | Self::Assignment { left, right, .. } => {
                f(left);
                f(right);
            }
            Self::Prefix { operand, .. } | Self::Postfix { operand, .. } => f(operand),
            Self::Conditional {
                condition,
                then_expression,
                else_expression,
            } => {
                f(condition);
                f(then_expression);
                f(else_expression);
            }
            Self::MethodInvocation {
                target,
                name,
                type_arguments,
                arguments,
            } => {
                f(target);
                f(name);
                type_arguments.iter_mut().for_each(&mut f);
                arguments.iter_mut().for_each(f);
            }
            Self::PropertyAccess { target, name } => {
                f(target);
                f(name);
            }
            Self::Index { target, index } => {
                f(target);
                f(index);
            }
            Self::InstanceCreation {
                ty,
                constructor_name,
                arguments,
            } => {
                f(ty);
                f(constructor_name);
                arguments.iter_mut().for_each(f);
            }
            Self::ListLiteral {
                type_argument,
                elements,
            } => {
                f(type_argument);
                elements.iter_mut().for_each(f);
            }
            Self::As { expression, ty } | Self::Is { expression, ty, .. } => {
                f(expression);
                f(ty);
            }
            Self::FunctionExpression { parameters, body } => {
                parameters.iter_mut().for_each(&mut f);
                f(body);
            }
            Self::Break { .. }
            | Self::Continue { .. }
            | Self::Empty
            | Self::Identifier { .. }
            | Self::IntegerLiteral { .. }
            | Self::DoubleLiteral { .. }
            | Self::StringLiteral { .. }
            | Self::BooleanLiteral { .. }
            | Self::NullLiteral
            | Self::This
            | Self::Super => {}
        }
    }
}

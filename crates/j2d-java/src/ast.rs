//! Java syntax tree as produced by the external parser.
//!
//! The tree is a closed set of node shapes. The structural translator matches on
//! every variant exhaustively, so adding a shape here is a compile error until
//! the translator handles it.

use crate::binding::{BindingId, Modifiers};
use j2d_common::SourceLocation;
use serde::{Deserialize, Serialize};

// =============================================================================
// Identifiers and types
// =============================================================================

/// An identifier occurrence and the declaration it resolves to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    pub name: String,
    #[serde(default)]
    pub binding: Option<BindingId>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

impl Identifier {
    /// An identifier the resolver could not bind (library or unresolved).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            binding: None,
            location: None,
        }
    }

    pub fn bound(name: impl Into<String>, binding: BindingId) -> Self {
        Self {
            name: name.into(),
            binding: Some(binding),
            location: None,
        }
    }

    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Char,
    Float,
    Double,
    Void,
}

impl PrimitiveKind {
    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::Char
        )
    }

    #[must_use]
    pub const fn is_floating(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum JavaType {
    Primitive {
        primitive: PrimitiveKind,
    },
    /// `Foo`, `List<String>`
    Simple {
        name: Identifier,
        #[serde(default)]
        type_arguments: Vec<JavaType>,
    },
    /// `Outer.Inner`, `java.util.List<T>`
    Qualified {
        qualifier: Box<JavaType>,
        name: Identifier,
        #[serde(default)]
        type_arguments: Vec<JavaType>,
    },
    /// `T[]`, `int[][]`
    Array {
        element: Box<JavaType>,
        dimensions: u32,
    },
    /// `?`, `? extends T`, `? super T`
    Wildcard {
        #[serde(default)]
        bound: Option<Box<JavaType>>,
        #[serde(default)]
        is_upper_bound: bool,
    },
}

impl JavaType {
    pub const fn primitive(primitive: PrimitiveKind) -> Self {
        Self::Primitive { primitive }
    }

    pub const fn int() -> Self {
        Self::primitive(PrimitiveKind::Int)
    }

    pub const fn boolean() -> Self {
        Self::primitive(PrimitiveKind::Boolean)
    }

    pub const fn void() -> Self {
        Self::primitive(PrimitiveKind::Void)
    }

    pub fn simple(name: Identifier) -> Self {
        Self::Simple {
            name,
            type_arguments: Vec::new(),
        }
    }

    pub fn generic(name: Identifier, type_arguments: Vec<JavaType>) -> Self {
        Self::Simple {
            name,
            type_arguments,
        }
    }

    pub fn array(element: JavaType, dimensions: u32) -> Self {
        Self::Array {
            element: Box::new(element),
            dimensions,
        }
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array { .. })
    }

    #[must_use]
    pub const fn as_primitive(&self) -> Option<PrimitiveKind> {
        match self {
            Self::Primitive { primitive } => Some(*primitive),
            _ => None,
        }
    }

    /// Integral primitives and their boxed forms.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        match self {
            Self::Primitive { primitive } => primitive.is_integral(),
            Self::Simple { name, .. } | Self::Qualified { name, .. } => matches!(
                name.name.as_str(),
                "Integer" | "Long" | "Short" | "Byte" | "Character"
            ),
            _ => false,
        }
    }

    /// The identifier naming this type, if it is a named type.
    #[must_use]
    pub const fn name(&self) -> Option<&Identifier> {
        match self {
            Self::Simple { name, .. } | Self::Qualified { name, .. } => Some(name),
            _ => None,
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expression {
    #[serde(flatten)]
    pub kind: ExpressionKind,
    /// Static type computed by the resolver, when known.
    #[serde(default)]
    pub static_type: Option<JavaType>,
    #[serde(default)]
    pub location: Option<SourceLocation>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ExpressionKind {
    NumberLiteral {
        token: String,
    },
    CharacterLiteral {
        value: char,
    },
    StringLiteral {
        value: String,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    /// `Foo.class`
    TypeLiteral {
        ty: JavaType,
    },
    Name {
        name: Identifier,
    },
    /// `a.b` where the parser could not tell a package, type or field apart.
    QualifiedName {
        qualifier: Box<Expression>,
        name: Identifier,
    },
    FieldAccess {
        target: Box<Expression>,
        name: Identifier,
    },
    SuperFieldAccess {
        name: Identifier,
    },
    This {
        #[serde(default)]
        qualifier: Option<Identifier>,
    },
    MethodInvocation {
        #[serde(default)]
        target: Option<Box<Expression>>,
        name: Identifier,
        #[serde(default)]
        type_arguments: Vec<JavaType>,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    SuperMethodInvocation {
        name: Identifier,
        #[serde(default)]
        arguments: Vec<Expression>,
    },
    ClassInstanceCreation {
        ty: JavaType,
        #[serde(default)]
        constructor: Option<BindingId>,
        #[serde(default)]
        arguments: Vec<Expression>,
        #[serde(default)]
        anonymous_body: Option<AnonymousClass>,
    },
    /// `new T[a][b]`, `new T[][] {{..}}`. `element_type` is the innermost element.
    ArrayCreation {
        element_type: JavaType,
        #[serde(default)]
        dimensions: Vec<Expression>,
        #[serde(default)]
        extra_dimensions: u32,
        #[serde(default)]
        initializer: Option<Vec<Expression>>,
    },
    /// `{a, b}` in a declaration initializer.
    ArrayInitializer {
        elements: Vec<Expression>,
    },
    ArrayAccess {
        array: Box<Expression>,
        index: Box<Expression>,
    },
    Assignment {
        operator: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Infix {
        operator: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Prefix {
        operator: String,
        operand: Box<Expression>,
    },
    Postfix {
        operator: String,
        operand: Box<Expression>,
    },
    Conditional {
        condition: Box<Expression>,
        then_expression: Box<Expression>,
        else_expression: Box<Expression>,
    },
    Cast {
        ty: JavaType,
        expression: Box<Expression>,
    },
    InstanceOf {
        expression: Box<Expression>,
        ty: JavaType,
    },
    Parenthesized {
        expression: Box<Expression>,
    },
}

/// Body of `new T(...) { ... }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousClass {
    #[serde(default)]
    pub binding: Option<BindingId>,
    #[serde(default)]
    pub body: Vec<BodyDeclaration>,
}

impl Expression {
    pub const fn new(kind: ExpressionKind) -> Self {
        Self {
            kind,
            static_type: None,
            location: None,
        }
    }

    #[must_use]
    pub fn typed(mut self, ty: JavaType) -> Self {
        self.static_type = Some(ty);
        self
    }

    #[must_use]
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn number(token: impl Into<String>) -> Self {
        Self::new(ExpressionKind::NumberLiteral {
            token: token.into(),
        })
    }

    /// Integer literal typed as `int`.
    pub fn int(value: i64) -> Self {
        Self::number(value.to_string()).typed(JavaType::int())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ExpressionKind::StringLiteral {
            value: value.into(),
        })
    }

    pub const fn null() -> Self {
        Self::new(ExpressionKind::NullLiteral)
    }

    pub fn name(name: Identifier) -> Self {
        Self::new(ExpressionKind::Name { name })
    }

    pub const fn this() -> Self {
        Self::new(ExpressionKind::This { qualifier: None })
    }

    pub fn field(target: Expression, name: Identifier) -> Self {
        Self::new(ExpressionKind::FieldAccess {
            target: Box::new(target),
            name,
        })
    }

    pub fn call(target: Option<Expression>, name: Identifier, arguments: Vec<Expression>) -> Self {
        Self::new(ExpressionKind::MethodInvocation {
            target: target.map(Box::new),
            name,
            type_arguments: Vec::new(),
            arguments,
        })
    }

    pub fn new_instance(
        ty: JavaType,
        constructor: Option<BindingId>,
        arguments: Vec<Expression>,
    ) -> Self {
        Self::new(ExpressionKind::ClassInstanceCreation {
            ty,
            constructor,
            arguments,
            anonymous_body: None,
        })
    }

    pub fn assign(left: Expression, right: Expression) -> Self {
        Self::new(ExpressionKind::Assignment {
            operator: "=".to_string(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn infix(operator: impl Into<String>, left: Expression, right: Expression) -> Self {
        Self::new(ExpressionKind::Infix {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl Block {
    pub const fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// `int a = 1, b[];` as a local, a field or a `for` initializer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDeclaration {
    #[serde(default)]
    pub modifiers: Modifiers,
    pub ty: JavaType,
    pub fragments: Vec<VariableFragment>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableFragment {
    pub name: Identifier,
    #[serde(default)]
    pub extra_dimensions: u32,
    #[serde(default)]
    pub initializer: Option<Expression>,
}

impl VariableDeclaration {
    pub fn single(ty: JavaType, name: Identifier, initializer: Option<Expression>) -> Self {
        Self {
            modifiers: Modifiers::none(),
            ty,
            fragments: vec![VariableFragment {
                name,
                extra_dimensions: 0,
                initializer,
            }],
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A parameter, catch variable or enhanced-for variable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleVariable {
    #[serde(default)]
    pub modifiers: Modifiers,
    pub ty: JavaType,
    #[serde(default)]
    pub is_varargs: bool,
    pub name: Identifier,
    #[serde(default)]
    pub extra_dimensions: u32,
}

impl SingleVariable {
    pub const fn new(ty: JavaType, name: Identifier) -> Self {
        Self {
            modifiers: Modifiers::none(),
            ty,
            is_varargs: false,
            name,
            extra_dimensions: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchCase {
    /// Empty for `default:`.
    #[serde(default)]
    pub labels: Vec<Expression>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchClause {
    pub exception: SingleVariable,
    pub body: Block,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Statement {
    Block {
        #[serde(default)]
        statements: Vec<Statement>,
    },
    LocalVariable {
        declaration: VariableDeclaration,
    },
    LocalClass {
        declaration: Box<TypeDeclaration>,
    },
    Expression {
        expression: Expression,
    },
    If {
        condition: Expression,
        then_statement: Box<Statement>,
        #[serde(default)]
        else_statement: Option<Box<Statement>>,
    },
    For {
        #[serde(default)]
        variables: Option<VariableDeclaration>,
        #[serde(default)]
        initializers: Vec<Expression>,
        #[serde(default)]
        condition: Option<Expression>,
        #[serde(default)]
        updaters: Vec<Expression>,
        body: Box<Statement>,
    },
    EnhancedFor {
        parameter: SingleVariable,
        iterable: Expression,
        body: Box<Statement>,
    },
    While {
        condition: Expression,
        body: Box<Statement>,
    },
    Do {
        body: Box<Statement>,
        condition: Expression,
    },
    Switch {
        expression: Expression,
        #[serde(default)]
        cases: Vec<SwitchCase>,
    },
    Try {
        body: Block,
        #[serde(default)]
        catches: Vec<CatchClause>,
        #[serde(default)]
        finally: Option<Block>,
    },
    Throw {
        expression: Expression,
    },
    Return {
        #[serde(default)]
        expression: Option<Expression>,
    },
    Break {
        #[serde(default)]
        label: Option<String>,
    },
    Continue {
        #[serde(default)]
        label: Option<String>,
    },
    Labeled {
        label: String,
        body: Box<Statement>,
    },
    Empty,
    Assert {
        condition: Expression,
        #[serde(default)]
        message: Option<Expression>,
    },
    Synchronized {
        lock: Expression,
        body: Block,
    },
    /// `this(...)`
    ConstructorInvocation {
        #[serde(default)]
        constructor: Option<BindingId>,
        #[serde(default)]
        arguments: Vec<Expression>,
        #[serde(default)]
        location: Option<SourceLocation>,
    },
    /// `super(...)`
    SuperConstructorInvocation {
        #[serde(default)]
        constructor: Option<BindingId>,
        #[serde(default)]
        arguments: Vec<Expression>,
        #[serde(default)]
        location: Option<SourceLocation>,
    },
}

impl Statement {
    pub const fn expr(expression: Expression) -> Self {
        Self::Expression { expression }
    }

    pub const fn ret(expression: Option<Expression>) -> Self {
        Self::Return { expression }
    }

    pub const fn local(declaration: VariableDeclaration) -> Self {
        Self::LocalVariable { declaration }
    }

    pub const fn super_call(constructor: Option<BindingId>, arguments: Vec<Expression>) -> Self {
        Self::SuperConstructorInvocation {
            constructor,
            arguments,
            location: None,
        }
    }

    pub const fn this_call(constructor: Option<BindingId>, arguments: Vec<Expression>) -> Self {
        Self::ConstructorInvocation {
            constructor,
            arguments,
            location: None,
        }
    }

    /// Short name of the statement shape, for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Block { .. } => "Block",
            Self::LocalVariable { .. } => "LocalVariable",
            Self::LocalClass { .. } => "LocalClass",
            Self::Expression { .. } => "ExpressionStatement",
            Self::If { .. } => "If",
            Self::For { .. } => "For",
            Self::EnhancedFor { .. } => "EnhancedFor",
            Self::While { .. } => "While",
            Self::Do { .. } => "Do",
            Self::Switch { .. } => "Switch",
            Self::Try { .. } => "Try",
            Self::Throw { .. } => "Throw",
            Self::Return { .. } => "Return",
            Self::Break { .. } => "Break",
            Self::Continue { .. } => "Continue",
            Self::Labeled { .. } => "Labeled",
            Self::Empty => "Empty",
            Self::Assert { .. } => "Assert",
            Self::Synchronized { .. } => "Synchronized",
            Self::ConstructorInvocation { .. } => "ConstructorInvocation",
            Self::SuperConstructorInvocation { .. } => "SuperConstructorInvocation",
        }
    }
}

// =============================================================================
// Declarations
// =============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameter {
    pub name: Identifier,
    #[serde(default)]
    pub bounds: Vec<JavaType>,
}

/// A method or constructor declaration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDeclaration {
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    /// `None` for constructors.
    #[serde(default)]
    pub return_type: Option<JavaType>,
    pub name: Identifier,
    #[serde(default)]
    pub parameters: Vec<SingleVariable>,
    /// `None` for abstract and interface methods.
    #[serde(default)]
    pub body: Option<Block>,
    #[serde(default)]
    pub is_constructor: bool,
}

impl MethodDeclaration {
    pub fn method(
        name: Identifier,
        return_type: JavaType,
        parameters: Vec<SingleVariable>,
        body: Vec<Statement>,
    ) -> Self {
        Self {
            modifiers: Modifiers::none(),
            type_parameters: Vec::new(),
            return_type: Some(return_type),
            name,
            parameters,
            body: Some(Block::new(body)),
            is_constructor: false,
        }
    }

    pub fn constructor(name: Identifier, parameters: Vec<SingleVariable>, body: Vec<Statement>) -> Self {
        Self {
            modifiers: Modifiers::none(),
            type_parameters: Vec::new(),
            return_type: None,
            name,
            parameters,
            body: Some(Block::new(body)),
            is_constructor: true,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumConstant {
    pub name: Identifier,
    #[serde(default)]
    pub arguments: Vec<Expression>,
    #[serde(default)]
    pub constructor: Option<BindingId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum BodyDeclaration {
    Field {
        declaration: VariableDeclaration,
    },
    Method {
        declaration: MethodDeclaration,
    },
    Initializer {
        #[serde(default)]
        is_static: bool,
        body: Block,
    },
    Type {
        declaration: Box<TypeDeclaration>,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
    pub type_kind: crate::binding::TypeKind,
    pub name: Identifier,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default)]
    pub superclass: Option<JavaType>,
    #[serde(default)]
    pub interfaces: Vec<JavaType>,
    #[serde(default)]
    pub enum_constants: Vec<EnumConstant>,
    #[serde(default)]
    pub body: Vec<BodyDeclaration>,
}

impl TypeDeclaration {
    pub const fn class(name: Identifier) -> Self {
        Self {
            type_kind: crate::binding::TypeKind::Class,
            name,
            modifiers: Modifiers::none(),
            type_parameters: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            enum_constants: Vec::new(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn extends(mut self, superclass: JavaType) -> Self {
        self.superclass = Some(superclass);
        self
    }

    #[must_use]
    pub fn field(mut self, declaration: VariableDeclaration) -> Self {
        self.body.push(BodyDeclaration::Field { declaration });
        self
    }

    #[must_use]
    pub fn method(mut self, declaration: MethodDeclaration) -> Self {
        self.body.push(BodyDeclaration::Method { declaration });
        self
    }

    #[must_use]
    pub fn member_type(mut self, declaration: TypeDeclaration) -> Self {
        self.body.push(BodyDeclaration::Type {
            declaration: Box::new(declaration),
        });
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilationUnit {
    /// Path relative to the source root, e.g. `com/example/Foo.java`.
    pub path: String,
    #[serde(default)]
    pub package: Option<String>,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

impl CompilationUnit {
    pub fn new(path: impl Into<String>, types: Vec<TypeDeclaration>) -> Self {
        Self {
            path: path.into(),
            package: None,
            imports: Vec::new(),
            types,
        }
    }
}

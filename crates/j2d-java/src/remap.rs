//! Binding id rewriting over an origin tree.
//!
//! Used when several resolver dumps are merged into one program: every id in
//! the later dump is replaced by its id in the merged table, which is either a
//! fresh slot or the binding of the same declaration from an earlier dump.

use crate::ast::*;
use crate::binding::{BindingId, BindingInfo};

pub(crate) struct BindingRemapper {
    /// Merged id for each id of the incoming dump.
    map: Vec<BindingId>,
}

impl BindingRemapper {
    pub(crate) const fn new(map: Vec<BindingId>) -> Self {
        Self { map }
    }

    pub(crate) fn info(&self, info: &mut BindingInfo) {
        self.id(&mut info.declaring_type);
        self.id(&mut info.superclass);
        self.id(&mut info.overrides);
    }

    pub(crate) fn unit(&self, unit: &mut CompilationUnit) {
        for ty in &mut unit.types {
            self.type_declaration(ty);
        }
    }

    /// Ids outside the dump's own table resolve to nothing.
    fn id(&self, id: &mut Option<BindingId>) {
        if let Some(inner) = *id {
            *id = self.map.get(inner.index()).copied();
        }
    }

    fn ident(&self, ident: &mut Identifier) {
        self.id(&mut ident.binding);
    }

    fn java_type(&self, ty: &mut JavaType) {
        match ty {
            JavaType::Primitive { .. } => {}
            JavaType::Simple {
                name,
                type_arguments,
            } => {
                self.ident(name);
                type_arguments.iter_mut().for_each(|t| self.java_type(t));
            }
            JavaType::Qualified {
                qualifier,
                name,
                type_arguments,
            } => {
                self.java_type(qualifier);
                self.ident(name);
                type_arguments.iter_mut().for_each(|t| self.java_type(t));
            }
            JavaType::Array { element, .. } => self.java_type(element),
            JavaType::Wildcard { bound, .. } => {
                if let Some(bound) = bound {
                    self.java_type(bound);
                }
            }
        }
    }

    fn type_declaration(&self, decl: &mut TypeDeclaration) {
        self.ident(&mut decl.name);
        for tp in &mut decl.type_parameters {
            self.type_parameter(tp);
        }
        if let Some(superclass) = &mut decl.superclass {
            self.java_type(superclass);
        }
        decl.interfaces.iter_mut().for_each(|t| self.java_type(t));
        for constant in &mut decl.enum_constants {
            self.ident(&mut constant.name);
            self.id(&mut constant.constructor);
            constant.arguments.iter_mut().for_each(|e| self.expression(e));
        }
        self.body(&mut decl.body);
    }

    fn type_parameter(&self, tp: &mut TypeParameter) {
        self.ident(&mut tp.name);
        tp.bounds.iter_mut().for_each(|t| self.java_type(t));
    }

    fn body(&self, body: &mut [BodyDeclaration]) {
        for member in body {
            match member {
                BodyDeclaration::Field { declaration } => self.variables(declaration),
                BodyDeclaration::Method { declaration } => self.method(declaration),
                BodyDeclaration::Initializer { body, .. } => self.block(body),
                BodyDeclaration::Type { declaration } => self.type_declaration(declaration),
            }
        }
    }

    fn method(&self, method: &mut MethodDeclaration) {
        self.ident(&mut method.name);
        for tp in &mut method.type_parameters {
            self.type_parameter(tp);
        }
        if let Some(ret) = &mut method.return_type {
            self.java_type(ret);
        }
        method.parameters.iter_mut().for_each(|p| self.single(p));
        if let Some(body) = &mut method.body {
            self.block(body);
        }
    }

    fn variables(&self, decl: &mut VariableDeclaration) {
        self.java_type(&mut decl.ty);
        for fragment in &mut decl.fragments {
            self.ident(&mut fragment.name);
            if let Some(init) = &mut fragment.initializer {
                self.expression(init);
            }
        }
    }

    fn single(&self, var: &mut SingleVariable) {
        self.java_type(&mut var.ty);
        self.ident(&mut var.name);
    }

    fn block(&self, block: &mut Block) {
        block.statements.iter_mut().for_each(|s| self.statement(s));
    }

    fn statement(&self, stmt: &mut Statement) {
        match stmt {
            Statement::Block { statements } => statements.iter_mut().for_each(|s| self.statement(s)),
            Statement::LocalVariable { declaration } => self.variables(declaration),
            Statement::LocalClass { declaration } => self.type_declaration(declaration),
            Statement::Expression { expression }
            | Statement::Throw { expression } => self.expression(expression),
            Statement::If {
                condition,
                then_statement,
                else_statement,
            } => {
                self.expression(condition);
                self.statement(then_statement);
                if let Some(else_statement) = else_statement {
                    self.statement(else_statement);
                }
            }
            Statement::For {
                variables,
                initializers,
                condition,
                updaters,
                body,
            } => {
                if let Some(variables) = variables {
                    self.variables(variables);
                }
                initializers.iter_mut().for_each(|e| self.expression(e));
                if let Some(condition) = condition {
                    self.expression(condition);
                }
                updaters.iter_mut().for_each(|e| self.expression(e));
                self.statement(body);
            }
            Statement::EnhancedFor {
                parameter,
                iterable,
                body,
            } => {
                self.single(parameter);
                self.expression(iterable);
                self.statement(body);
            }
            Statement::While { condition, body } | Statement::Do { body, condition } => {
                self.expression(condition);
                self.statement(body);
            }
            Statement::Switch { expression, cases } => {
                self.expression(expression);
                for case in cases {
                    case.labels.iter_mut().for_each(|e| self.expression(e));
                    case.statements.iter_mut().for_each(|s| self.statement(s));
                }
            }
            Statement::Try {
                body,
                catches,
                finally,
            } => {
                self.block(body);
                for catch in catches {
                    self.single(&mut catch.exception);
                    self.block(&mut catch.body);
                }
                if let Some(finally) = finally {
                    self.block(finally);
                }
            }
            Statement::Return { expression } => {
                if let Some(expression) = expression {
                    self.expression(expression);
                }
            }
            Statement::Break { .. } | Statement::Continue { .. } | Statement::Empty => {}
            Statement::Labeled { body, .. } => self.statement(body),
            Statement::Assert { condition, message } => {
                self.expression(condition);
                if let Some(message) = message {
                    self.expression(message);
                }
            }
            Statement::Synchronized { lock, body } => {
                self.expression(lock);
                self.block(body);
            }
            Statement::ConstructorInvocation {
                constructor,
                arguments,
                ..
            }
            | Statement::SuperConstructorInvocation {
                constructor,
                arguments,
                ..
            } => {
                self.id(constructor);
                arguments.iter_mut().for_each(|e| self.expression(e));
            }
        }
    }

    fn expression(&self, expr: &mut Expression) {
        if let Some(ty) = &mut expr.static_type {
            self.java_type(ty);
        }
        match &mut expr.kind {
            ExpressionKind::NumberLiteral { .. }
            | ExpressionKind::CharacterLiteral { .. }
            | ExpressionKind::StringLiteral { .. }
            | ExpressionKind::BooleanLiteral { .. }
            | ExpressionKind::NullLiteral => {}
            ExpressionKind::TypeLiteral { ty } => self.java_type(ty),
            ExpressionKind::Name { name } | ExpressionKind::SuperFieldAccess { name } => {
                self.ident(name);
            }
            ExpressionKind::QualifiedName { qualifier, name }
            | ExpressionKind::FieldAccess {
                target: qualifier,
                name,
            } => {
                self.expression(qualifier);
                self.ident(name);
            }
            ExpressionKind::This { qualifier } => {
                if let Some(q) = qualifier {
                    self.ident(q);
                }
            }
            ExpressionKind::MethodInvocation {
                target,
                name,
                type_arguments,
                arguments,
            } => {
                if let Some(target) = target {
                    self.expression(target);
                }
                self.ident(name);
                type_arguments.iter_mut().for_each(|t| self.java_type(t));
                arguments.iter_mut().for_each(|e| self.expression(e));
            }
            ExpressionKind::SuperMethodInvocation { name, arguments } => {
                self.ident(name);
                arguments.iter_mut().for_each(|e| self.expression(e));
            }
            ExpressionKind::ClassInstanceCreation {
                ty,
                constructor,
                arguments,
                anonymous_body,
            } => {
                self.java_type(ty);
                self.id(constructor);
                arguments.iter_mut().for_each(|e| self.expression(e));
                if let Some(anon) = anonymous_body {
                    self.id(&mut anon.binding);
                    self.body(&mut anon.body);
                }
            }
            ExpressionKind::ArrayCreation {
                element_type,
                dimensions,
                initializer,
                ..
            } => {
                self.java_type(element_type);
                dimensions.iter_mut().for_each(|e| self.expression(e));
                if let Some(init) = initializer {
                    init.iter_mut().for_each(|e| self.expression(e));
                }
            }
            ExpressionKind::ArrayInitializer { elements } => {
                elements.iter_mut().for_each(|e| self.expression(e));
            }
            ExpressionKind::ArrayAccess { array, index } => {
                self.expression(array);
                self.expression(index);
            }
            ExpressionKind::Assignment { left, right, .. }
            | ExpressionKind::Infix { left, right, .. } => {
                self.expression(left);
                self.expression(right);
            }
            ExpressionKind::Prefix { operand, .. } | ExpressionKind::Postfix { operand, .. } => {
                self.expression(operand);
            }
            ExpressionKind::Conditional {
                condition,
                then_expression,
                else_expression,
            } => {
                self.expression(condition);
                self.expression(then_expression);
                self.expression(else_expression);
            }
            ExpressionKind::Cast { ty, expression }
            | ExpressionKind::InstanceOf { expression, ty } => {
                self.java_type(ty);
                self.expression(expression);
            }
            ExpressionKind::Parenthesized { expression } => self.expression(expression),
        }
    }
}

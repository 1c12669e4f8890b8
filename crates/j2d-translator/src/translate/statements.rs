use super::{StructuralTranslator, with_dimensions};
use crate::error::Result;
use j2d_common::{Diagnostic, diagnostic_codes};
use j2d_dart::{DartNode, NodeFlags, NodeIndex};
use j2d_java::{
    BindingKind, Block, CatchClause, Expression, ExpressionKind, Statement, SwitchCase,
    TypeNesting, VariableDeclaration,
};

impl StructuralTranslator<'_> {
    pub(super) fn translate_block(&mut self, block: &Block) -> Result<NodeIndex> {
        self.translate_statement_list(&block.statements)
    }

    pub(super) fn translate_statement_list(&mut self, statements: &[Statement]) -> Result<NodeIndex> {
        let mut nodes = Vec::with_capacity(statements.len());
        for statement in statements {
            nodes.extend(self.translate_statement(statement)?);
        }
        Ok(self.add(DartNode::Block { statements: nodes }))
    }

    /// A statement in a single-statement slot such as a loop body.
    fn translate_nested(&mut self, statement: &Statement) -> Result<NodeIndex> {
        let mut nodes = self.translate_statement(statement)?;
        if nodes.len() == 1
            && let Some(node) = nodes.pop()
        {
            return Ok(node);
        }
        Ok(self.add(DartNode::Block { statements: nodes }))
    }

    /// Translate one statement. Local class declarations produce no statement;
    /// a declaration mixing array dimensions produces several.
    pub(super) fn translate_statement(&mut self, statement: &Statement) -> Result<Vec<NodeIndex>> {
        let node = match statement {
            Statement::Block { statements } => self.translate_statement_list(statements)?,
            Statement::LocalVariable { declaration } => {
                return self.translate_local_variables(declaration);
            }
            Statement::LocalClass { declaration } => {
                self.translate_type_declaration(declaration, TypeNesting::Local)?;
                return Ok(Vec::new());
            }
            Statement::Expression { expression } => {
                let expression = self.translate_expression(expression)?;
                self.add(DartNode::ExpressionStatement { expression })
            }
            Statement::If {
                condition,
                then_statement,
                else_statement,
            } => {
                let condition = self.translate_expression(condition)?;
                let then_statement = self.translate_nested(then_statement)?;
                let else_statement = match else_statement {
                    Some(statement) => self.translate_nested(statement)?,
                    None => NodeIndex::NONE,
                };
                self.add(DartNode::If {
                    condition,
                    then_statement,
                    else_statement,
                })
            }
            Statement::For {
                variables,
                initializers,
                condition,
                updaters,
                body,
            } => {
                let variables = match variables {
                    Some(declaration) => {
                        let mut groups = self.translate_local_variables(declaration)?;
                        match (groups.pop(), groups.is_empty()) {
                            (Some(group), true) => group,
                            (None, _) => NodeIndex::NONE,
                            (Some(_), false) => {
                                return Err(self.unsupported(
                                    "For",
                                    "loop variables with different array dimensions",
                                    declaration
                                        .fragments
                                        .first()
                                        .and_then(|f| f.name.location.as_ref()),
                                ));
                            }
                        }
                    }
                    None => NodeIndex::NONE,
                };
                let initializers = self.translate_expressions(initializers)?;
                let condition = match condition {
                    Some(condition) => self.translate_expression(condition)?,
                    None => NodeIndex::NONE,
                };
                let updaters = self.translate_expressions(updaters)?;
                let body = self.translate_nested(body)?;
                self.add(DartNode::For {
                    variables,
                    initializers,
                    condition,
                    updaters,
                    body,
                })
            }
            Statement::EnhancedFor {
                parameter,
                iterable,
                body,
            } => {
                let ty = self.translate_parameter_type(parameter)?;
                let location = self.loc(parameter.name.location.as_ref());
                let name = self.ctx.identifier_at(
                    &parameter.name.name,
                    parameter.name.binding,
                    location.as_ref(),
                );
                self.mark_local(parameter.name.binding);
                let iterable = self.translate_expression(iterable)?;
                let body = self.translate_nested(body)?;
                let node = self.add(DartNode::ForEach {
                    ty,
                    name,
                    iterable,
                    body,
                });
                self.declare_local(parameter.name.binding, node);
                node
            }
            Statement::While { condition, body } => {
                let condition = self.translate_expression(condition)?;
                let body = self.translate_nested(body)?;
                self.add(DartNode::While { condition, body })
            }
            Statement::Do { body, condition } => {
                let body = self.translate_nested(body)?;
                let condition = self.translate_expression(condition)?;
                self.add(DartNode::Do { body, condition })
            }
            Statement::Switch { expression, cases } => self.translate_switch(expression, cases)?,
            Statement::Try {
                body,
                catches,
                finally,
            } => {
                let body = self.translate_block(body)?;
                let catches = catches
                    .iter()
                    .map(|clause| self.translate_catch(clause))
                    .collect::<Result<Vec<_>>>()?;
                let finally = match finally {
                    Some(block) => self.translate_block(block)?,
                    None => NodeIndex::NONE,
                };
                self.add(DartNode::Try {
                    body,
                    catches,
                    finally,
                })
            }
            Statement::Throw { expression } => {
                let expression = self.translate_expression(expression)?;
                let throw = self.add(DartNode::Throw { expression });
                self.add(DartNode::ExpressionStatement { expression: throw })
            }
            Statement::Return { expression } => {
                let expression = match expression {
                    Some(expression) => self.translate_expression(expression)?,
                    None => NodeIndex::NONE,
                };
                self.add(DartNode::Return { expression })
            }
            Statement::Break { label } => self.add(DartNode::Break {
                label: label.clone(),
            }),
            Statement::Continue { label } => self.add(DartNode::Continue {
                label: label.clone(),
            }),
            Statement::Labeled { label, body } => {
                let body = self.translate_nested(body)?;
                self.add(DartNode::Labeled {
                    label: label.clone(),
                    body,
                })
            }
            Statement::Empty => self.add(DartNode::Empty),
            Statement::Assert { condition, message } => {
                let condition = self.translate_expression(condition)?;
                let message = match message {
                    Some(message) => self.translate_expression(message)?,
                    None => NodeIndex::NONE,
                };
                self.add(DartNode::Assert { condition, message })
            }
            // Single-threaded target: the lock is dropped, the body kept.
            Statement::Synchronized { body, .. } => self.translate_block(body)?,
            Statement::ConstructorInvocation { location, .. }
            | Statement::SuperConstructorInvocation { location, .. } => {
                return Err(self.unsupported(
                    statement.kind_name(),
                    "constructor invocation outside the first statement of a constructor",
                    location.as_ref(),
                ));
            }
        };
        Ok(vec![node])
    }

    fn translate_expressions(&mut self, expressions: &[Expression]) -> Result<Vec<NodeIndex>> {
        expressions
            .iter()
            .map(|e| self.translate_expression(e))
            .collect()
    }

    fn translate_local_variables(&mut self, decl: &VariableDeclaration) -> Result<Vec<NodeIndex>> {
        let groups = self.translate_variables(decl, true)?;
        let mut statements = Vec::with_capacity(groups.len());
        for (ty, variables) in groups {
            // `final` locals must be initialized at the declaration in Dart.
            let initialized = variables.iter().all(|&v| {
                matches!(self.ctx.arena.get(v),
                    Some(DartNode::VariableDeclaration { initializer, .. }) if initializer.is_some())
            });
            let is_final = decl.modifiers.is_final && initialized;
            let statement = self.add(DartNode::VariableDeclarationStatement {
                is_final,
                ty,
                variables,
            });
            if decl.modifiers.is_final {
                self.ctx.arena.insert_flags(statement, NodeFlags::WAS_FINAL);
            }
            statements.push(statement);
        }
        Ok(statements)
    }

    fn translate_switch(&mut self, expression: &Expression, cases: &[SwitchCase]) -> Result<NodeIndex> {
        let expression = self.translate_expression(expression)?;
        let mut members = Vec::with_capacity(cases.len());
        for (i, case) in cases.iter().enumerate() {
            let labels = case
                .labels
                .iter()
                .map(|label| self.translate_case_label(label))
                .collect::<Result<Vec<_>>>()?;
            let mut statements = Vec::new();
            for statement in &case.statements {
                statements.extend(self.translate_statement(statement)?);
            }
            let is_last = i + 1 == cases.len();
            if !is_last && !case.statements.is_empty() && !completes_abruptly(&case.statements) {
                let location = self.loc(case.labels.first().and_then(|l| l.location.as_ref()));
                let class = self.frame().map(|f| f.name.clone()).unwrap_or_default();
                self.ctx.report(Diagnostic::warning(
                    diagnostic_codes::CASE_FALLTHROUGH,
                    &[&class],
                    location,
                ));
            }
            members.push(self.add(DartNode::SwitchMember {
                labels,
                is_default: case.is_default,
                statements,
            }));
        }
        Ok(self.add(DartNode::Switch {
            expression,
            members,
        }))
    }

    /// Enum constants are written bare in origin case labels and qualified in
    /// the destination.
    fn translate_case_label(&mut self, label: &Expression) -> Result<NodeIndex> {
        if let ExpressionKind::Name { name } = &label.kind
            && let Some(binding) = name.binding
            && self.ctx.binding_kind(binding) == Some(BindingKind::EnumConstant)
            && let Some(owner) = self
                .ctx
                .binding_info(binding)
                .and_then(|info| info.declaring_type)
        {
            let target = self.type_identifier(owner);
            let location = self.loc(name.location.as_ref());
            let name = self
                .ctx
                .identifier_at(&name.name, Some(binding), location.as_ref());
            return Ok(self.add(DartNode::PropertyAccess { target, name }));
        }
        self.translate_expression(label)
    }

    fn translate_catch(&mut self, clause: &CatchClause) -> Result<NodeIndex> {
        let exception = &clause.exception;
        let declared = with_dimensions(&exception.ty, exception.extra_dimensions);
        let ty = if self.is_object_type(&declared) {
            NodeIndex::NONE
        } else {
            self.translate_type(&declared)?
        };
        let location = self.loc(exception.name.location.as_ref());
        let name = self.ctx.identifier_at(
            &exception.name.name,
            exception.name.binding,
            location.as_ref(),
        );
        self.mark_local(exception.name.binding);
        let body = self.translate_block(&clause.body)?;
        let node = self.add(DartNode::CatchClause { ty, name, body });
        self.declare_local(exception.name.binding, node);
        Ok(node)
    }
}

/// True when control never falls off the end of `statements`.
fn completes_abruptly(statements: &[Statement]) -> bool {
    statements.last().is_some_and(|last| match last {
        Statement::Break { .. }
        | Statement::Continue { .. }
        | Statement::Return { .. }
        | Statement::Throw { .. } => true,
        Statement::Block { statements } => completes_abruptly(statements),
        Statement::If {
            then_statement,
            else_statement: Some(else_statement),
            ..
        } => {
            completes_abruptly(std::slice::from_ref(then_statement.as_ref()))
                && completes_abruptly(std::slice::from_ref(else_statement.as_ref()))
        }
        _ => false,
    })
}

//! Dart pretty-printer.
//!
//! Output depends only on the tree and the indent width. Layout rules:
//! - one blank line between top-level declarations
//! - consecutive fields are grouped; every other member is separated by a blank line
//! - empty blocks and class bodies print as `{}`
//! - the output ends with exactly one newline

use crate::arena::DartArena;
use crate::node::{DartNode, MethodKind, NodeIndex};
use crate::writer::SourceWriter;

pub const DEFAULT_INDENT_WIDTH: usize = 2;

pub struct DartPrinter<'a> {
    arena: &'a DartArena,
    writer: SourceWriter,
}

impl<'a> DartPrinter<'a> {
    #[must_use]
    pub fn new(arena: &'a DartArena, indent_width: usize) -> Self {
        Self {
            arena,
            writer: SourceWriter::new(indent_width),
        }
    }

    /// Print the subtree at `root` with the given indent width.
    #[must_use]
    pub fn emit_to_string(arena: &'a DartArena, root: NodeIndex, indent_width: usize) -> String {
        let mut printer = Self::new(arena, indent_width);
        printer.emit_node(root);
        printer.finish()
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.writer.finish()
    }

    fn get(&self, idx: NodeIndex) -> Option<&'a DartNode> {
        let arena = self.arena;
        arena.get(idx)
    }

    fn is_kind(&self, idx: NodeIndex, pred: impl Fn(&DartNode) -> bool) -> bool {
        self.get(idx).is_some_and(pred)
    }

    /// Emit any node, dispatching on whether it is a declaration, statement or expression.
    pub fn emit_node(&mut self, idx: NodeIndex) {
        let Some(node) = self.get(idx) else {
            return;
        };
        match node {
            DartNode::CompilationUnit { declarations } => {
                for (i, &decl) in declarations.iter().enumerate() {
                    if i > 0 {
                        self.writer.blank_line();
                    }
                    self.emit_node(decl);
                }
            }
            DartNode::ClassDeclaration { .. } => self.emit_class(idx),
            DartNode::FieldDeclaration { .. }
            | DartNode::MethodDeclaration { .. }
            | DartNode::ConstructorDeclaration { .. } => self.emit_member(idx),
            DartNode::Block { .. }
            | DartNode::VariableDeclarationStatement { .. }
            | DartNode::ExpressionStatement { .. }
            | DartNode::If { .. }
            | DartNode::For { .. }
            | DartNode::ForEach { .. }
            | DartNode::While { .. }
            | DartNode::Do { .. }
            | DartNode::Switch { .. }
            | DartNode::Try { .. }
            | DartNode::Return { .. }
            | DartNode::Break { .. }
            | DartNode::Continue { .. }
            | DartNode::Labeled { .. }
            | DartNode::Empty
            | DartNode::Assert { .. } => self.emit_statement(idx),
            DartNode::SwitchMember { .. } => self.emit_switch_member(idx),
            _ => self.emit_expression(idx),
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn emit_class(&mut self, idx: NodeIndex) {
        let Some(DartNode::ClassDeclaration {
            is_abstract,
            name,
            type_parameters,
            extends,
            implements,
            members,
        }) = self.get(idx)
        else {
            return;
        };
        if *is_abstract {
            self.writer.write("abstract ");
        }
        self.writer.write("class ");
        self.emit_expression(*name);
        self.emit_type_parameters(type_parameters);
        if extends.is_some() {
            self.writer.write(" extends ");
            self.emit_expression(*extends);
        }
        if !implements.is_empty() {
            self.writer.write(" implements ");
            self.emit_comma_list(implements);
        }
        if members.is_empty() {
            self.writer.write(" {}");
            self.writer.write_line();
            return;
        }
        self.writer.write(" {");
        self.writer.write_line();
        self.writer.increase_indent();
        let mut previous_was_field: Option<bool> = None;
        for &member in members {
            let is_field = self.is_kind(member, |n| matches!(n, DartNode::FieldDeclaration { .. }));
            if let Some(prev_field) = previous_was_field {
                if !(prev_field && is_field) {
                    self.writer.blank_line();
                }
            }
            self.emit_member(member);
            previous_was_field = Some(is_field);
        }
        self.writer.decrease_indent();
        self.writer.write("}");
        self.writer.write_line();
    }

    fn emit_member(&mut self, idx: NodeIndex) {
        let Some(node) = self.get(idx) else {
            return;
        };
        match node {
            DartNode::FieldDeclaration {
                is_static,
                is_final,
                ty,
                variables,
            } => {
                if *is_static {
                    self.writer.write("static ");
                }
                self.emit_variable_list(*is_final, *ty, variables);
                self.writer.write(";");
                self.writer.write_line();
            }
            DartNode::MethodDeclaration {
                is_static,
                kind,
                return_type,
                name,
                type_parameters,
                parameters,
                body,
            } => {
                if *is_static {
                    self.writer.write("static ");
                }
                if return_type.is_some() {
                    self.emit_expression(*return_type);
                    self.writer.write(" ");
                }
                match kind {
                    MethodKind::Method => {}
                    MethodKind::Getter => self.writer.write("get "),
                    MethodKind::Setter => self.writer.write("set "),
                    MethodKind::Operator => self.writer.write("operator "),
                }
                self.emit_expression(*name);
                self.emit_type_parameters(type_parameters);
                if *kind != MethodKind::Getter {
                    self.writer.write("(");
                    self.emit_comma_list(parameters);
                    self.writer.write(")");
                }
                self.emit_function_body(*body);
            }
            DartNode::ConstructorDeclaration {
                class_name,
                name,
                parameters,
                initializers,
                body,
            } => {
                self.emit_expression(*class_name);
                if name.is_some() {
                    self.writer.write(".");
                    self.emit_expression(*name);
                }
                self.writer.write("(");
                self.emit_comma_list(parameters);
                self.writer.write(")");
                if !initializers.is_empty() {
                    self.writer.write(" : ");
                    self.emit_comma_list(initializers);
                }
                self.emit_function_body(*body);
            }
            DartNode::ClassDeclaration { .. } => self.emit_class(idx),
            _ => self.emit_statement(idx),
        }
    }

    /// `;`, ` {...}` or ` => expr;`, followed by a newline.
    fn emit_function_body(&mut self, body: NodeIndex) {
        if body.is_none() {
            self.writer.write(";");
        } else if self.is_kind(body, |n| matches!(n, DartNode::Block { .. })) {
            self.writer.write(" ");
            self.emit_block(body);
        } else {
            self.writer.write(" => ");
            self.emit_expression(body);
            self.writer.write(";");
        }
        self.writer.write_line();
    }

    fn emit_type_parameters(&mut self, params: &[NodeIndex]) {
        if params.is_empty() {
            return;
        }
        self.writer.write("<");
        self.emit_comma_list(params);
        self.writer.write(">");
    }

    /// `final T a = 1, b` without the trailing semicolon.
    fn emit_variable_list(&mut self, is_final: bool, ty: NodeIndex, variables: &[NodeIndex]) {
        if is_final {
            self.writer.write("final ");
        }
        if ty.is_some() {
            self.emit_expression(ty);
            self.writer.write(" ");
        } else if !is_final {
            self.writer.write("var ");
        }
        self.emit_comma_list(variables);
    }

    fn emit_comma_list(&mut self, items: &[NodeIndex]) {
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                self.writer.write(", ");
            }
            self.emit_expression(item);
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn emit_block(&mut self, idx: NodeIndex) {
        let arena = self.arena;
        let statements = arena.block_statements(idx);
        if statements.is_empty() {
            self.writer.write("{}");
            return;
        }
        self.writer.write("{");
        self.writer.write_line();
        self.writer.increase_indent();
        for &stmt in statements {
            self.emit_statement(stmt);
        }
        self.writer.decrease_indent();
        self.writer.write("}");
    }

    /// Body of a control statement. Blocks stay on the header line and the
    /// line is left open; other statements go on their own indented line.
    /// Returns true when the line is left open.
    fn emit_body(&mut self, body: NodeIndex) -> bool {
        if self.is_kind(body, |n| matches!(n, DartNode::Block { .. })) {
            self.writer.write(" ");
            self.emit_block(body);
            true
        } else {
            self.writer.write_line();
            self.writer.increase_indent();
            self.emit_statement(body);
            self.writer.decrease_indent();
            false
        }
    }

    fn emit_statement(&mut self, idx: NodeIndex) {
        let Some(node) = self.get(idx) else {
            return;
        };
        match node {
            DartNode::Block { .. } => {
                self.emit_block(idx);
                self.writer.write_line();
            }
            DartNode::VariableDeclarationStatement {
                is_final,
                ty,
                variables,
            } => {
                self.emit_variable_list(*is_final, *ty, variables);
                self.writer.write(";");
                self.writer.write_line();
            }
            DartNode::ExpressionStatement { expression } => {
                self.emit_expression(*expression);
                self.writer.write(";");
                self.writer.write_line();
            }
            DartNode::If {
                condition,
                then_statement,
                else_statement,
            } => {
                self.writer.write("if (");
                self.emit_expression(*condition);
                self.writer.write(")");
                let open = self.emit_body(*then_statement);
                if else_statement.is_none() {
                    if open {
                        self.writer.write_line();
                    }
                    return;
                }
                self.writer.write(if open { " else" } else { "else" });
                if self.is_kind(*else_statement, |n| matches!(n, DartNode::If { .. })) {
                    self.writer.write(" ");
                    self.emit_statement(*else_statement);
                } else if self.emit_body(*else_statement) {
                    self.writer.write_line();
                }
            }
            DartNode::For {
                variables,
                initializers,
                condition,
                updaters,
                body,
            } => {
                self.writer.write("for (");
                if let Some(DartNode::VariableDeclarationStatement {
                    is_final,
                    ty,
                    variables,
                }) = self.get(*variables)
                {
                    self.emit_variable_list(*is_final, *ty, variables);
                } else {
                    self.emit_comma_list(initializers);
                }
                self.writer.write(";");
                if condition.is_some() {
                    self.writer.write(" ");
                    self.emit_expression(*condition);
                }
                self.writer.write(";");
                if !updaters.is_empty() {
                    self.writer.write(" ");
                    self.emit_comma_list(updaters);
                }
                self.writer.write(")");
                if self.emit_body(*body) {
                    self.writer.write_line();
                }
            }
            DartNode::ForEach {
                ty,
                name,
                iterable,
                body,
            } => {
                self.writer.write("for (");
                if ty.is_some() {
                    self.emit_expression(*ty);
                } else {
                    self.writer.write("var");
                }
                self.writer.write(" ");
                self.emit_expression(*name);
                self.writer.write(" in ");
                self.emit_expression(*iterable);
                self.writer.write(")");
                if self.emit_body(*body) {
                    self.writer.write_line();
                }
            }
            DartNode::While { condition, body } => {
                self.writer.write("while (");
                self.emit_expression(*condition);
                self.writer.write(")");
                if self.emit_body(*body) {
                    self.writer.write_line();
                }
            }
            DartNode::Do { body, condition } => {
                self.writer.write("do");
                if self.emit_body(*body) {
                    self.writer.write(" ");
                }
                self.writer.write("while (");
                self.emit_expression(*condition);
                self.writer.write(");");
                self.writer.write_line();
            }
            DartNode::Switch {
                expression,
                members,
            } => {
                self.writer.write("switch (");
                self.emit_expression(*expression);
                self.writer.write(") {");
                self.writer.write_line();
                self.writer.increase_indent();
                for &member in members {
                    self.emit_switch_member(member);
                }
                self.writer.decrease_indent();
                self.writer.write("}");
                self.writer.write_line();
            }
            DartNode::Try {
                body,
                catches,
                finally,
            } => {
                self.writer.write("try ");
                self.emit_block(*body);
                for &catch in catches {
                    if let Some(DartNode::CatchClause { ty, name, body }) = self.get(catch) {
                        if ty.is_some() {
                            self.writer.write(" on ");
                            self.emit_expression(*ty);
                        }
                        self.writer.write(" catch (");
                        self.emit_expression(*name);
                        self.writer.write(") ");
                        self.emit_block(*body);
                    }
                }
                if finally.is_some() {
                    self.writer.write(" finally ");
                    self.emit_block(*finally);
                }
                self.writer.write_line();
            }
            DartNode::Return { expression } => {
                self.writer.write("return");
                if expression.is_some() {
                    self.writer.write(" ");
                    self.emit_expression(*expression);
                }
                self.writer.write(";");
                self.writer.write_line();
            }
            DartNode::Break { label } | DartNode::Continue { label } => {
                let keyword = if matches!(node, DartNode::Break { .. }) {
                    "break"
                } else {
                    "continue"
                };
                self.writer.write(keyword);
                if let Some(label) = label {
                    self.writer.write(" ");
                    self.writer.write(label);
                }
                self.writer.write(";");
                self.writer.write_line();
            }
            DartNode::Labeled { label, body } => {
                self.writer.write(label);
                self.writer.write(": ");
                self.emit_statement(*body);
            }
            DartNode::Empty => {
                self.writer.write(";");
                self.writer.write_line();
            }
            DartNode::Assert { condition, message } => {
                self.writer.write("assert(");
                self.emit_expression(*condition);
                if message.is_some() {
                    self.writer.write(", ");
                    self.emit_expression(*message);
                }
                self.writer.write(");");
                self.writer.write_line();
            }
            DartNode::ClassDeclaration { .. }
            | DartNode::FieldDeclaration { .. }
            | DartNode::MethodDeclaration { .. }
            | DartNode::ConstructorDeclaration { .. } => self.emit_member(idx),
            _ => {
                self.emit_expression(idx);
                self.writer.write(";");
                self.writer.write_line();
            }
        }
    }

    fn emit_switch_member(&mut self, idx: NodeIndex) {
        let Some(DartNode::SwitchMember {
            labels,
            is_default,
            statements,
        }) = self.get(idx)
        else {
            return;
        };
        for &label in labels {
            self.writer.write("case ");
            self.emit_expression(label);
            self.writer.write(":");
            self.writer.write_line();
        }
        if *is_default {
            self.writer.write("default:");
            self.writer.write_line();
        }
        self.writer.increase_indent();
        for &stmt in statements {
            self.emit_statement(stmt);
        }
        self.writer.decrease_indent();
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn emit_expression(&mut self, idx: NodeIndex) {
        let Some(node) = self.get(idx) else {
            return;
        };
        match node {
            DartNode::Identifier { name } => self.writer.write(name),
            DartNode::IntegerLiteral { token } | DartNode::DoubleLiteral { token } => {
                self.writer.write(token);
            }
            DartNode::StringLiteral { value } => {
                let quoted = quote_string(value);
                self.writer.write(&quoted);
            }
            DartNode::BooleanLiteral { value } => {
                self.writer.write(if *value { "true" } else { "false" });
            }
            DartNode::NullLiteral => self.writer.write("null"),
            DartNode::Binary {
                operator,
                left,
                right,
            }
            | DartNode::Assignment {
                operator,
                left,
                right,
            } => {
                self.emit_expression(*left);
                self.writer.write(" ");
                self.writer.write(operator);
                self.writer.write(" ");
                self.emit_expression(*right);
            }
            DartNode::Prefix { operator, operand } => {
                self.writer.write(operator);
                self.emit_expression(*operand);
            }
            DartNode::Postfix { operator, operand } => {
                self.emit_expression(*operand);
                self.writer.write(operator);
            }
            DartNode::Conditional {
                condition,
                then_expression,
                else_expression,
            } => {
                self.emit_expression(*condition);
                self.writer.write(" ? ");
                self.emit_expression(*then_expression);
                self.writer.write(" : ");
                self.emit_expression(*else_expression);
            }
            DartNode::MethodInvocation {
                target,
                name,
                type_arguments,
                arguments,
            } => {
                if target.is_some() {
                    self.emit_expression(*target);
                    self.writer.write(".");
                }
                self.emit_expression(*name);
                self.emit_type_parameters(type_arguments);
                self.writer.write("(");
                self.emit_comma_list(arguments);
                self.writer.write(")");
            }
            DartNode::PropertyAccess { target, name } => {
                self.emit_expression(*target);
                self.writer.write(".");
                self.emit_expression(*name);
            }
            DartNode::Index { target, index } => {
                self.emit_expression(*target);
                self.writer.write("[");
                self.emit_expression(*index);
                self.writer.write("]");
            }
            DartNode::InstanceCreation {
                ty,
                constructor_name,
                arguments,
            } => {
                self.writer.write("new ");
                self.emit_expression(*ty);
                if constructor_name.is_some() {
                    self.writer.write(".");
                    self.emit_expression(*constructor_name);
                }
                self.writer.write("(");
                self.emit_comma_list(arguments);
                self.writer.write(")");
            }
            DartNode::ListLiteral {
                type_argument,
                elements,
            } => {
                if type_argument.is_some() {
                    self.writer.write("<");
                    self.emit_expression(*type_argument);
                    self.writer.write(">");
                }
                self.writer.write("[");
                self.emit_comma_list(elements);
                self.writer.write("]");
            }
            DartNode::As { expression, ty } => {
                self.emit_expression(*expression);
                self.writer.write(" as ");
                self.emit_expression(*ty);
            }
            DartNode::Is {
                expression,
                ty,
                negated,
            } => {
                self.emit_expression(*expression);
                self.writer.write(if *negated { " is! " } else { " is " });
                self.emit_expression(*ty);
            }
            DartNode::This => self.writer.write("this"),
            DartNode::Super => self.writer.write("super"),
            DartNode::Parenthesized { expression } => {
                self.writer.write("(");
                self.emit_expression(*expression);
                self.writer.write(")");
            }
            DartNode::Throw { expression } => {
                self.writer.write("throw ");
                self.emit_expression(*expression);
            }
            DartNode::FunctionExpression { parameters, body } => {
                self.writer.write("(");
                self.emit_comma_list(parameters);
                self.writer.write(")");
                if self.is_kind(*body, |n| matches!(n, DartNode::Block { .. })) {
                    self.writer.write(" ");
                    self.emit_block(*body);
                } else {
                    self.writer.write(" => ");
                    self.emit_expression(*body);
                }
            }
            DartNode::TypeName {
                name,
                type_arguments,
            } => {
                self.emit_expression(*name);
                self.emit_type_parameters(type_arguments);
            }
            DartNode::TypeParameter { name, bound } => {
                self.emit_expression(*name);
                if bound.is_some() {
                    self.writer.write(" extends ");
                    self.emit_expression(*bound);
                }
            }
            DartNode::VariableDeclaration { name, initializer } => {
                self.emit_expression(*name);
                if initializer.is_some() {
                    self.writer.write(" = ");
                    self.emit_expression(*initializer);
                }
            }
            DartNode::FormalParameter { ty, name, is_field } => {
                if *is_field {
                    self.writer.write("this.");
                } else if ty.is_some() {
                    self.emit_expression(*ty);
                    self.writer.write(" ");
                }
                self.emit_expression(*name);
            }
            DartNode::RedirectingConstructorInvocation { name, arguments }
            | DartNode::SuperConstructorInvocation { name, arguments } => {
                let keyword = if matches!(node, DartNode::SuperConstructorInvocation { .. }) {
                    "super"
                } else {
                    "this"
                };
                self.writer.write(keyword);
                if name.is_some() {
                    self.writer.write(".");
                    self.emit_expression(*name);
                }
                self.writer.write("(");
                self.emit_comma_list(arguments);
                self.writer.write(")");
            }
            DartNode::CompilationUnit { .. }
            | DartNode::ClassDeclaration { .. }
            | DartNode::FieldDeclaration { .. }
            | DartNode::MethodDeclaration { .. }
            | DartNode::ConstructorDeclaration { .. }
            | DartNode::SwitchMember { .. } => self.emit_node(idx),
            // Statements and catch clauses never appear in expression position.
            _ => {}
        }
    }
}

/// Double-quoted Dart string literal.
#[must_use]
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '$' => out.push_str("\\$"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{{{:x}}}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Print a whole compilation unit with the default indent width.
#[must_use]
pub fn print_unit(arena: &DartArena, unit: NodeIndex) -> String {
    DartPrinter::emit_to_string(arena, unit, DEFAULT_INDENT_WIDTH)
}

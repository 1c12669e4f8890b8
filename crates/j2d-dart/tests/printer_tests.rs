//! Printer layout tests.

use j2d_dart::{DartArena, DartNode, DartPrinter, MethodKind, NodeIndex, print_unit, quote_string};

struct Builder {
    arena: DartArena,
}

impl Builder {
    fn new() -> Self {
        Self {
            arena: DartArena::new(),
        }
    }

    fn id(&mut self, name: &str) -> NodeIndex {
        self.arena.add(DartNode::Identifier {
            name: name.to_string(),
        })
    }

    fn ty(&mut self, name: &str) -> NodeIndex {
        let name = self.id(name);
        self.arena.add(DartNode::TypeName {
            name,
            type_arguments: vec![],
        })
    }

    fn int(&mut self, token: &str) -> NodeIndex {
        self.arena.add(DartNode::IntegerLiteral {
            token: token.to_string(),
        })
    }

    fn binary(&mut self, op: &str, left: NodeIndex, right: NodeIndex) -> NodeIndex {
        self.arena.add(DartNode::Binary {
            operator: op.to_string(),
            left,
            right,
        })
    }

    fn stmt(&mut self, expression: NodeIndex) -> NodeIndex {
        self.arena.add(DartNode::ExpressionStatement { expression })
    }

    fn block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        self.arena.add(DartNode::Block { statements })
    }

    fn field(&mut self, ty: &str, name: &str, init: Option<NodeIndex>) -> NodeIndex {
        let ty = self.ty(ty);
        let name = self.id(name);
        let var = self.arena.add(DartNode::VariableDeclaration {
            name,
            initializer: init.unwrap_or(NodeIndex::NONE),
        });
        self.arena.add(DartNode::FieldDeclaration {
            is_static: false,
            is_final: false,
            ty,
            variables: vec![var],
        })
    }

    fn class(&mut self, name: &str, extends: Option<&str>, members: Vec<NodeIndex>) -> NodeIndex {
        let name = self.id(name);
        let extends = extends.map_or(NodeIndex::NONE, |e| self.ty(e));
        self.arena.add(DartNode::ClassDeclaration {
            is_abstract: false,
            name,
            type_parameters: vec![],
            extends,
            implements: vec![],
            members,
        })
    }

    fn unit(&mut self, declarations: Vec<NodeIndex>) -> NodeIndex {
        self.arena.add(DartNode::CompilationUnit { declarations })
    }
}

fn point_class(b: &mut Builder) -> NodeIndex {
    let zero = b.int("0");
    let fx = b.field("int", "x", Some(zero));
    let fy = b.field("int", "y", None);

    let class_name = b.id("Point");
    let pname = b.id("x");
    let param = b.arena.add(DartNode::FormalParameter {
        ty: NodeIndex::NONE,
        name: pname,
        is_field: true,
    });
    let super_call = b.arena.add(DartNode::SuperConstructorInvocation {
        name: NodeIndex::NONE,
        arguments: vec![],
    });
    let y = b.id("y");
    let one = b.int("1");
    let assign = b.arena.add(DartNode::Assignment {
        operator: "=".to_string(),
        left: y,
        right: one,
    });
    let assign_stmt = b.stmt(assign);
    let ctor_body = b.block(vec![assign_stmt]);
    let ctor = b.arena.add(DartNode::ConstructorDeclaration {
        class_name,
        name: NodeIndex::NONE,
        parameters: vec![param],
        initializers: vec![super_call],
        body: ctor_body,
    });

    let x = b.id("x");
    let y2 = b.id("y");
    let sum = b.binary("+", x, y2);
    let ret = b.arena.add(DartNode::Return { expression: sum });
    let body = b.block(vec![ret]);
    let rt = b.ty("int");
    let mname = b.id("sum");
    let method = b.arena.add(DartNode::MethodDeclaration {
        is_static: false,
        kind: MethodKind::Method,
        return_type: rt,
        name: mname,
        type_parameters: vec![],
        parameters: vec![],
        body,
    });

    b.class("Point", Some("Base"), vec![fx, fy, ctor, method])
}

#[test]
fn test_class_layout() {
    let mut b = Builder::new();
    let class = point_class(&mut b);
    let unit = b.unit(vec![class]);
    let text = print_unit(&b.arena, unit);
    assert_eq!(
        text,
        "class Point extends Base {\n  int x = 0;\n  int y;\n\n  Point(this.x) : super() {\n    y = 1;\n  }\n\n  int sum() {\n    return x + y;\n  }\n}\n"
    );
}

#[test]
fn test_top_level_declarations_separated_by_blank_line() {
    let mut b = Builder::new();
    let a = b.class("A", None, vec![]);
    let c = b.class("B", Some("A"), vec![]);
    let unit = b.unit(vec![a, c]);
    assert_eq!(
        print_unit(&b.arena, unit),
        "class A {}\n\nclass B extends A {}\n"
    );
}

#[test]
fn test_indent_width_is_configurable() {
    let mut b = Builder::new();
    let f = b.field("int", "x", None);
    let class = b.class("A", None, vec![f]);
    assert_eq!(
        DartPrinter::emit_to_string(&b.arena, class, 4),
        "class A {\n    int x;\n}\n"
    );
}

#[test]
fn test_control_flow_layout() {
    let mut b = Builder::new();
    let a = b.id("a");
    let one = b.int("1");
    let cond = b.binary(">", a, one);
    let r1 = b.arena.add(DartNode::Return {
        expression: NodeIndex::NONE,
    });
    let then_block = b.block(vec![r1]);
    let a2 = b.id("a");
    let zero = b.int("0");
    let cond2 = b.binary("==", a2, zero);
    let brk = b.arena.add(DartNode::Break { label: None });
    let inner_if = b.arena.add(DartNode::If {
        condition: cond2,
        then_statement: brk,
        else_statement: NodeIndex::NONE,
    });
    let else_block = b.block(vec![inner_if]);
    let if_stmt = b.arena.add(DartNode::If {
        condition: cond,
        then_statement: then_block,
        else_statement: else_block,
    });
    let text = DartPrinter::emit_to_string(&b.arena, if_stmt, 2);
    assert_eq!(
        text,
        "if (a > 1) {\n  return;\n} else {\n  if (a == 0)\n    break;\n}\n"
    );
}

#[test]
fn test_switch_layout() {
    let mut b = Builder::new();
    let e = b.id("e");
    let label = b.int("1");
    let brk = b.arena.add(DartNode::Break { label: None });
    let case = b.arena.add(DartNode::SwitchMember {
        labels: vec![label],
        is_default: false,
        statements: vec![brk],
    });
    let empty = b.arena.add(DartNode::Empty);
    let default = b.arena.add(DartNode::SwitchMember {
        labels: vec![],
        is_default: true,
        statements: vec![empty],
    });
    let switch = b.arena.add(DartNode::Switch {
        expression: e,
        members: vec![case, default],
    });
    assert_eq!(
        DartPrinter::emit_to_string(&b.arena, switch, 2),
        "switch (e) {\n  case 1:\n    break;\n  default:\n    ;\n}\n"
    );
}

#[test]
fn test_expression_bodied_getter_and_list_literal() {
    let mut b = Builder::new();
    let rt = b.ty("String");
    let name = b.id("label");
    let one = b.int("1");
    let two = b.int("2");
    let int_ty = b.ty("int");
    let list = b.arena.add(DartNode::ListLiteral {
        type_argument: int_ty,
        elements: vec![one, two],
    });
    let to_string = b.id("toString");
    let call = b.arena.add(DartNode::MethodInvocation {
        target: list,
        name: to_string,
        type_arguments: vec![],
        arguments: vec![],
    });
    let getter = b.arena.add(DartNode::MethodDeclaration {
        is_static: false,
        kind: MethodKind::Getter,
        return_type: rt,
        name,
        type_parameters: vec![],
        parameters: vec![],
        body: call,
    });
    assert_eq!(
        DartPrinter::emit_to_string(&b.arena, getter, 2),
        "String get label => <int>[1, 2].toString();\n"
    );
}

#[test]
fn test_string_escaping() {
    assert_eq!(quote_string("a\"b"), "\"a\\\"b\"");
    assert_eq!(quote_string("$x\\n"), "\"\\$x\\\\n\"");
    assert_eq!(quote_string("line\n"), "\"line\\n\"");
}

#[test]
fn test_printing_is_deterministic_across_clones() {
    let mut b = Builder::new();
    let class = point_class(&mut b);
    let unit = b.unit(vec![class]);
    let first = print_unit(&b.arena, unit);
    let second = print_unit(&b.arena, unit);
    assert_eq!(first, second);

    let copy = b.arena.deep_clone(unit, &mut |_, _| {});
    assert_eq!(print_unit(&b.arena, copy), first);
}

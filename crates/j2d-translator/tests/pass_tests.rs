//! Individual rewrite passes over structurally translated programs.

mod support;

use indexmap::IndexMap;
use j2d_common::diagnostic_codes;
use j2d_dart::{DartArena, DartNode, NodeFlags, NodeIndex};
use j2d_java::{
    BindingInfo, BindingKind, Block, BodyDeclaration, CompilationUnit, Expression, ExpressionKind,
    Identifier, JavaType, MethodDeclaration, Modifiers, PrimitiveKind, ResolvedProgram, Statement,
    TypeDeclaration, TypeNesting, VariableDeclaration,
};
use j2d_translator::passes::{
    configured_renames::ConfiguredRenames, constructors::Constructors,
    field_defaults::FieldDefaults, field_initializers::FieldInitializers,
    inner_class_names::InnerClassNames, local_shadow::LocalShadow,
    param_hides_method::ParamHidesMethod, unique_names::UniqueNames, vararg_unwrap,
};
use j2d_translator::pipeline::{prepare, render};
use j2d_translator::{RewritePass, TranslateOptions, TranslationContext, run_passes};
use support::{ProgramBuilder, id, param, ty};

/// Structurally translate `program`, run `passes` and print every unit.
fn run(program: ResolvedProgram, mut passes: Vec<Box<dyn RewritePass>>) -> (TranslationContext, String) {
    let mut ctx = prepare(program, &TranslateOptions::default()).expect("structural translation");
    run_passes(&mut ctx, &mut passes).expect("passes succeed");
    let text = render(&ctx, 2).into_iter().map(|f| f.text).collect();
    (ctx, text)
}

#[test]
fn test_member_and_local_classes_are_flattened() {
    let mut p = ProgramBuilder::new();
    let outer = p.class("Outer");
    let inner = p
        .bindings
        .declare(BindingInfo::class("Inner").nested(TypeNesting::Member));
    let deep = p
        .bindings
        .declare(BindingInfo::class("Deep").nested(TypeNesting::Member));
    let run_method = p.method(outer, "run", 0);
    p.unit(CompilationUnit::new(
        "Outer.java",
        vec![
            TypeDeclaration::class(id("Outer", outer))
                .member_type(TypeDeclaration::class(id("Inner", inner)).member_type(
                    TypeDeclaration::class(id("Deep", deep)),
                ))
                .method(MethodDeclaration::method(
                    id("run", run_method),
                    JavaType::void(),
                    vec![],
                    vec![Statement::expr(Expression::new_instance(
                        ty("Inner", inner),
                        None,
                        vec![],
                    ))],
                )),
        ],
    ));

    let (ctx, text) = run(p.build(), vec![Box::new(InnerClassNames)]);
    assert_eq!(
        text,
        "class Outer {\n  void run() {\n    new Outer_Inner();\n  }\n}\n\n\
         class Outer_Inner {}\n\n\
         class Outer_Inner_Deep {}\n"
    );
    assert_eq!(ctx.original_name(inner), Some("Inner"));
    assert_eq!(ctx.current_name(deep), Some("Outer_Inner_Deep"));
}

#[test]
fn test_pack_with_single_array_element_unwraps() {
    let mut arena = DartArena::new();
    let array = arena.add_flagged(
        DartNode::Identifier {
            name: "xs".to_string(),
        },
        NodeFlags::ARRAY_TYPED,
    );
    let pack = arena.add_flagged(
        DartNode::ListLiteral {
            type_argument: NodeIndex::NONE,
            elements: vec![array],
        },
        NodeFlags::VARARGS_PACK,
    );
    assert_eq!(vararg_unwrap::unwrapped_pack(&arena, pack), Some(array));

    let plain = arena.add(DartNode::Identifier {
        name: "x".to_string(),
    });
    let scalar_pack = arena.add_flagged(
        DartNode::ListLiteral {
            type_argument: NodeIndex::NONE,
            elements: vec![plain],
        },
        NodeFlags::VARARGS_PACK,
    );
    assert_eq!(vararg_unwrap::unwrapped_pack(&arena, scalar_pack), None);

    let other = arena.add_flagged(
        DartNode::Identifier {
            name: "ys".to_string(),
        },
        NodeFlags::ARRAY_TYPED,
    );
    let literal = arena.add(DartNode::ListLiteral {
        type_argument: NodeIndex::NONE,
        elements: vec![other],
    });
    assert_eq!(vararg_unwrap::unwrapped_pack(&arena, literal), None);
}

#[test]
fn test_field_defaults_by_type() {
    let mut p = ProgramBuilder::new();
    let a = p.class("A");
    let fields = ["i", "d", "b", "s", "k", "n"].map(|name| p.field(a, name));
    let string = p.library_class("java.lang.String");
    let decl = TypeDeclaration::class(id("A", a))
        .field(VariableDeclaration::single(JavaType::int(), id("i", fields[0]), None))
        .field(VariableDeclaration::single(
            JavaType::primitive(PrimitiveKind::Double),
            id("d", fields[1]),
            None,
        ))
        .field(VariableDeclaration::single(JavaType::boolean(), id("b", fields[2]), None))
        .field(VariableDeclaration::single(ty("String", string), id("s", fields[3]), None))
        .field(
            VariableDeclaration::single(JavaType::int(), id("k", fields[4]), None)
                .with_modifiers(Modifiers::final_()),
        )
        .field(VariableDeclaration::single(
            JavaType::primitive(PrimitiveKind::Long),
            id("n", fields[5]),
            Some(Expression::number("7L")),
        ));
    p.unit(CompilationUnit::new("A.java", vec![decl]));

    let (_, text) = run(p.build(), vec![Box::new(FieldDefaults)]);
    assert_eq!(
        text,
        "class A {\n  int i = 0;\n  double d = 0.0;\n  bool b = false;\n  String s;\n  int k;\n  int n = 7;\n}\n"
    );
}

#[test]
fn test_boxed_fields_keep_null_default() {
    let mut p = ProgramBuilder::new();
    let a = p.class("A");
    let count = p.field(a, "count");
    let flag = p.field(a, "flag");
    let ratio = p.field(a, "ratio");
    let integer = p.library_class("java.lang.Integer");
    let boolean = p.library_class("java.lang.Boolean");
    let double = p.library_class("java.lang.Double");
    let decl = TypeDeclaration::class(id("A", a))
        .field(VariableDeclaration::single(ty("Integer", integer), id("count", count), None))
        .field(VariableDeclaration::single(ty("Boolean", boolean), id("flag", flag), None))
        .field(VariableDeclaration::single(ty("Double", double), id("ratio", ratio), None));
    p.unit(CompilationUnit::new("A.java", vec![decl]));

    let (_, text) = run(p.build(), vec![Box::new(FieldDefaults)]);
    assert_eq!(text, "class A {\n  int count;\n  bool flag;\n  double ratio;\n}\n");
}

#[test]
fn test_initializer_through_super_stays_and_is_reported() {
    let mut p = ProgramBuilder::new();
    let base = p.class("Base");
    let base_a = p.field(base, "a");
    let a = p.subclass("A", base);
    let b = p.field(a, "b");
    p.unit(CompilationUnit::new(
        "A.java",
        vec![
            TypeDeclaration::class(id("A", a))
                .extends(ty("Base", base))
                .field(VariableDeclaration::single(
                    JavaType::int(),
                    id("b", b),
                    Some(Expression::new(ExpressionKind::SuperFieldAccess {
                        name: id("a", base_a),
                    })),
                )),
        ],
    ));

    let (ctx, text) = run(p.build(), vec![Box::new(FieldInitializers)]);
    assert_eq!(text, "class A extends Base {\n  int b = super.a;\n}\n");
    let codes: Vec<u32> = ctx.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(codes, vec![diagnostic_codes::FIELD_INITIALIZER_NOT_EXTRACTED]);
}

#[test]
fn test_instance_initializers_skip_redirecting_constructors() {
    let mut p = ProgramBuilder::new();
    let a = p.class("A");
    let fa = p.field(a, "a");
    let fb = p.field(a, "b");
    let ctor0 = p.constructor(a, 0);
    let ctor1 = p.constructor(a, 1);
    let x = p.param("x");
    let mut decl = TypeDeclaration::class(id("A", a))
        .field(VariableDeclaration::single(JavaType::int(), id("a", fa), Some(Expression::int(1))))
        .field(VariableDeclaration::single(
            JavaType::int(),
            id("b", fb),
            Some(Expression::field(Expression::this(), id("a", fa))),
        ));
    decl.body.push(BodyDeclaration::Initializer {
        is_static: false,
        body: Block::new(vec![Statement::expr(Expression::call(
            None,
            Identifier::new("setup"),
            vec![],
        ))]),
    });
    decl = decl
        .method(MethodDeclaration::constructor(
            id("A", ctor0),
            vec![],
            vec![Statement::this_call(Some(ctor1), vec![Expression::int(0)])],
        ))
        .method(MethodDeclaration::constructor(
            id("A", ctor1),
            vec![param(JavaType::int(), "x", x)],
            vec![],
        ));
    p.unit(CompilationUnit::new("A.java", vec![decl]));

    let (_, text) = run(p.build(), vec![Box::new(FieldInitializers)]);
    assert_eq!(
        text,
        "class A {\n  int a = 1;\n  int b;\n\n  A() : this(0);\n\n  \
         A(int x) {\n    this.b = this.a;\n    setup();\n  }\n}\n"
    );
}

#[test]
fn test_moved_initializer_is_copied_into_each_constructor() {
    let mut p = ProgramBuilder::new();
    let a = p.class("A");
    let fa = p.field(a, "a");
    let get = p.method(a, "get", 0);
    let ctor0 = p.constructor(a, 0);
    let ctor1 = p.constructor(a, 1);
    let x = p.param("x");
    p.unit(CompilationUnit::new(
        "A.java",
        vec![
            TypeDeclaration::class(id("A", a))
                .field(VariableDeclaration::single(
                    JavaType::int(),
                    id("a", fa),
                    Some(Expression::call(None, id("get", get), vec![])),
                ))
                .method(MethodDeclaration::constructor(id("A", ctor0), vec![], vec![]))
                .method(MethodDeclaration::constructor(
                    id("A", ctor1),
                    vec![param(JavaType::int(), "x", x)],
                    vec![],
                ))
                .method(MethodDeclaration::method(
                    id("get", get),
                    JavaType::int(),
                    vec![],
                    vec![Statement::ret(Some(Expression::int(3)))],
                )),
        ],
    ));

    let (ctx, text) = run(p.build(), vec![Box::new(FieldInitializers)]);
    assert!(text.contains("  A() {\n    this.a = get();\n  }\n"), "{text}");
    assert!(text.contains("  A(int x) {\n    this.a = get();\n  }\n"), "{text}");
    // Both copies answer to the same bindings.
    assert_eq!(ctx.occurrences(get).len(), 3);
}

#[test]
fn test_moved_initializers_keep_class_body_order_ahead_of_constructor_code() {
    let mut p = ProgramBuilder::new();
    let a = p.class("A");
    let fa = p.field(a, "a");
    let fb = p.field(a, "b");
    let fc = p.field(a, "c");
    let fd = p.field(a, "d");
    let get = p.method(a, "get", 0);
    let ctor0 = p.constructor(a, 0);
    let ctor1 = p.constructor(a, 1);
    let x = p.param("x");
    let mut decl = TypeDeclaration::class(id("A", a))
        .field(VariableDeclaration::single(JavaType::int(), id("a", fa), Some(Expression::int(1))))
        .field(VariableDeclaration::single(
            JavaType::int(),
            id("b", fb),
            Some(Expression::field(Expression::this(), id("a", fa))),
        ));
    decl.body.push(BodyDeclaration::Initializer {
        is_static: false,
        body: Block::new(vec![Statement::expr(Expression::call(
            None,
            Identifier::new("setup"),
            vec![],
        ))]),
    });
    decl = decl
        .field(VariableDeclaration::single(
            JavaType::int(),
            id("c", fc),
            Some(Expression::call(None, id("get", get), vec![])),
        ))
        .field(VariableDeclaration::single(
            JavaType::int(),
            id("d", fd),
            Some(Expression::name(id("b", fb))),
        ))
        .method(MethodDeclaration::constructor(id("A", ctor0), vec![], vec![]))
        .method(MethodDeclaration::constructor(
            id("A", ctor1),
            vec![param(JavaType::int(), "x", x)],
            vec![Statement::expr(Expression::assign(
                Expression::field(Expression::this(), id("a", fa)),
                Expression::name(id("x", x)),
            ))],
        ))
        .method(MethodDeclaration::method(
            id("get", get),
            JavaType::int(),
            vec![],
            vec![Statement::ret(Some(Expression::int(3)))],
        ));
    p.unit(CompilationUnit::new("A.java", vec![decl]));

    let (_, text) = run(p.build(), vec![Box::new(FieldInitializers)]);
    assert!(
        text.contains("  int a = 1;\n  int b;\n  int c;\n  int d;\n"),
        "{text}"
    );
    assert!(
        text.contains(
            "  A() {\n    this.b = this.a;\n    setup();\n    this.c = get();\n    \
             this.d = this.b;\n  }\n"
        ),
        "{text}"
    );
    assert!(
        text.contains(
            "  A(int x) {\n    this.b = this.a;\n    setup();\n    this.c = get();\n    \
             this.d = this.b;\n    this.a = x;\n  }\n"
        ),
        "{text}"
    );
}

#[test]
fn test_local_initialized_from_same_named_field_is_renamed() {
    let mut p = ProgramBuilder::new();
    let a = p.class("A");
    let field = p.field(a, "x");
    let run_method = p.method(a, "run", 0);
    let x = p.local("x");
    p.unit(CompilationUnit::new(
        "A.java",
        vec![
            TypeDeclaration::class(id("A", a))
                .field(VariableDeclaration::single(JavaType::int(), id("x", field), None))
                .method(MethodDeclaration::method(
                    id("run", run_method),
                    JavaType::int(),
                    vec![],
                    vec![
                        Statement::local(VariableDeclaration::single(
                            JavaType::int(),
                            id("x", x),
                            Some(Expression::infix(
                                "+",
                                Expression::name(id("x", field)),
                                Expression::int(1),
                            )),
                        )),
                        Statement::ret(Some(Expression::name(id("x", x)))),
                    ],
                )),
        ],
    ));

    let (ctx, text) = run(p.build(), vec![Box::new(LocalShadow)]);
    assert!(
        text.contains("    int x2 = x + 1;\n    return x2;\n"),
        "{text}"
    );
    assert_eq!(ctx.current_name(field), Some("x"));
}

#[test]
fn test_parameter_named_like_called_method_is_renamed() {
    let mut p = ProgramBuilder::new();
    let a = p.class("A");
    let size = p.method(a, "size", 0);
    let grow = p.method(a, "grow", 1);
    let param_size = p.param("size");
    p.unit(CompilationUnit::new(
        "A.java",
        vec![
            TypeDeclaration::class(id("A", a))
                .method(MethodDeclaration::method(
                    id("size", size),
                    JavaType::int(),
                    vec![],
                    vec![Statement::ret(Some(Expression::int(0)))],
                ))
                .method(MethodDeclaration::method(
                    id("grow", grow),
                    JavaType::int(),
                    vec![param(JavaType::int(), "size", param_size)],
                    vec![Statement::ret(Some(Expression::infix(
                        "+",
                        Expression::call(None, id("size", size), vec![]),
                        Expression::name(id("size", param_size)),
                    )))],
                )),
        ],
    ));

    let (ctx, text) = run(p.build(), vec![Box::new(ParamHidesMethod)]);
    assert!(
        text.contains("  int grow(int size2) {\n    return size() + size2;\n  }\n"),
        "{text}"
    );
    assert_eq!(ctx.current_name(size), Some("size"));
}

#[test]
fn test_override_follows_configured_root_name() {
    let mut p = ProgramBuilder::new();
    let base = p.class("Base");
    let base_count = p.bindings.declare(
        BindingInfo::new(BindingKind::Method, "count")
            .declared_in(base)
            .with_signature("Base.count()"),
    );
    let a = p.subclass("A", base);
    let field = p.field(a, "count");
    let override_count = p.overriding(a, "count", 0, base_count);
    let mut renames = IndexMap::new();
    renames.insert("Base.count()".to_string(), "total".to_string());
    let body = |value| vec![Statement::ret(Some(Expression::int(value)))];
    p.unit(CompilationUnit::new(
        "Base.java",
        vec![TypeDeclaration::class(id("Base", base)).method(MethodDeclaration::method(
            id("count", base_count),
            JavaType::int(),
            vec![],
            body(0),
        ))],
    ));
    p.unit(CompilationUnit::new(
        "A.java",
        vec![
            TypeDeclaration::class(id("A", a))
                .extends(ty("Base", base))
                .field(VariableDeclaration::single(JavaType::int(), id("count", field), None))
                .method(MethodDeclaration::method(
                    id("count", override_count),
                    JavaType::int(),
                    vec![],
                    body(1),
                )),
        ],
    ));

    let options = TranslateOptions {
        renames,
        ..TranslateOptions::default()
    };
    let mut ctx = prepare(p.build(), &options).expect("structural translation");
    let mut passes: Vec<Box<dyn RewritePass>> = vec![
        Box::new(ConfiguredRenames),
        Box::new(UniqueNames),
    ];
    run_passes(&mut ctx, &mut passes).expect("passes succeed");

    assert_eq!(ctx.current_name(base_count), Some("total"));
    assert_eq!(ctx.current_name(override_count), Some("total"));
    assert_eq!(ctx.current_name(field), Some("count"));
    let files = render(&ctx, 2);
    assert!(files[1].text.contains("  int total() {\n    return 1;\n  }\n"), "{}", files[1].text);
}

#[test]
fn test_reserved_word_names_are_replaced() {
    let mut p = ProgramBuilder::new();
    let a = p.class("A");
    let field = p.field(a, "in");
    let run_method = p.method(a, "run", 0);
    p.unit(CompilationUnit::new(
        "A.java",
        vec![
            TypeDeclaration::class(id("A", a))
                .field(VariableDeclaration::single(JavaType::int(), id("in", field), None))
                .method(MethodDeclaration::method(
                    id("run", run_method),
                    JavaType::int(),
                    vec![],
                    vec![Statement::ret(Some(Expression::name(id("in", field))))],
                )),
        ],
    ));

    let (ctx, text) = run(p.build(), vec![Box::new(UniqueNames)]);
    assert_eq!(ctx.current_name(field), Some("in2"));
    assert!(text.contains("  int in2;\n"), "{text}");
    assert!(text.contains("    return in2;\n"), "{text}");
}

#[test]
fn test_duplicate_top_level_class_names_are_made_unique() {
    let mut p = ProgramBuilder::new();
    let first = p.class("Node");
    let second = p.class("Node");
    p.unit(CompilationUnit::new(
        "a/Node.java",
        vec![TypeDeclaration::class(id("Node", first))],
    ));
    p.unit(CompilationUnit::new(
        "b/Node.java",
        vec![TypeDeclaration::class(id("Node", second))],
    ));

    let (ctx, text) = run(p.build(), vec![Box::new(UniqueNames)]);
    assert_eq!(text, "class Node {}\nclass Node2 {}\n");
    assert_eq!(ctx.current_name(second), Some("Node2"));
}

#[test]
fn test_lowered_constructors_name_their_impl_methods() {
    let mut p = ProgramBuilder::new();
    let a = p.class("A");
    let ctor0 = p.constructor(a, 0);
    let ctor1 = p.constructor(a, 1);
    let x = p.param("x");
    p.unit(CompilationUnit::new(
        "A.java",
        vec![
            TypeDeclaration::class(id("A", a))
                .method(MethodDeclaration::constructor(
                    id("A", ctor0),
                    vec![],
                    vec![
                        Statement::this_call(Some(ctor1), vec![Expression::int(1)]),
                        Statement::expr(Expression::call(None, Identifier::new("log"), vec![])),
                    ],
                ))
                .method(MethodDeclaration::constructor(
                    id("A", ctor1),
                    vec![param(JavaType::int(), "x", x)],
                    vec![Statement::expr(Expression::call(
                        None,
                        Identifier::new("use"),
                        vec![Expression::name(id("x", x))],
                    ))],
                )),
        ],
    ));

    let (_, text) = run(p.build(), vec![Box::new(Constructors)]);
    assert_eq!(
        text,
        "class A {\n  A() {\n    _impl();\n  }\n\n  void _impl() {\n    _con1_impl(1);\n    log();\n  }\n\n  \
         A.con1(int x) {\n    _con1_impl(x);\n  }\n\n  void _con1_impl(int x) {\n    use(x);\n  }\n}\n"
    );
}

#[test]
fn test_constructor_without_binding_is_reported() {
    let mut p = ProgramBuilder::new();
    let a = p.class("A");
    let x = p.param("x");
    p.unit(CompilationUnit::new(
        "A.java",
        vec![
            TypeDeclaration::class(id("A", a))
                .method(MethodDeclaration::constructor(Identifier::new("A"), vec![], vec![]))
                .method(MethodDeclaration::constructor(
                    Identifier::new("A"),
                    vec![param(JavaType::int(), "x", x)],
                    vec![],
                )),
        ],
    ));

    let (ctx, text) = run(p.build(), vec![Box::new(Constructors)]);
    assert!(text.contains("  A();\n\n  A(int x);\n"), "{text}");
    let codes: Vec<u32> = ctx.diagnostics().iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            diagnostic_codes::CONSTRUCTOR_WITHOUT_BINDING,
            diagnostic_codes::CONSTRUCTOR_WITHOUT_BINDING
        ]
    );
}

//! Builders shared by the translator integration tests.

#![allow(dead_code)]

use j2d_java::{
    BindingId, BindingInfo, BindingKind, BindingTable, CompilationUnit, Identifier, JavaType,
    Modifiers, ResolvedProgram, SingleVariable, TypeKind,
};
use j2d_translator::{TranslateOptions, Translation, translate_program};

/// Binding table under construction plus the compilation units using it.
#[derive(Default)]
pub struct ProgramBuilder {
    pub bindings: BindingTable,
    pub units: Vec<CompilationUnit>,
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(&mut self, name: &str) -> BindingId {
        self.bindings.declare(BindingInfo::class(name))
    }

    pub fn subclass(&mut self, name: &str, superclass: BindingId) -> BindingId {
        self.bindings
            .declare(BindingInfo::class(name).extending(superclass))
    }

    pub fn enum_type(&mut self, name: &str) -> BindingId {
        self.bindings
            .declare(BindingInfo::class(name).of_kind(TypeKind::Enum))
    }

    /// A type declared outside the translated units.
    pub fn library_class(&mut self, qualified: &str) -> BindingId {
        let simple = qualified.rsplit('.').next().unwrap_or(qualified);
        self.bindings
            .declare(BindingInfo::class(simple).qualified(qualified))
    }

    pub fn constructor(&mut self, class: BindingId, params: usize) -> BindingId {
        let name = self.bindings.get(class).map(|i| i.name.clone()).unwrap();
        self.bindings.declare(
            BindingInfo::new(BindingKind::Constructor, name)
                .declared_in(class)
                .params(params),
        )
    }

    pub fn field(&mut self, class: BindingId, name: &str) -> BindingId {
        self.bindings
            .declare(BindingInfo::new(BindingKind::Field, name).declared_in(class))
    }

    pub fn static_field(&mut self, class: BindingId, name: &str) -> BindingId {
        self.bindings.declare(
            BindingInfo::new(BindingKind::Field, name)
                .declared_in(class)
                .with_modifiers(Modifiers::static_()),
        )
    }

    pub fn method(&mut self, class: BindingId, name: &str, params: usize) -> BindingId {
        self.bindings.declare(
            BindingInfo::new(BindingKind::Method, name)
                .declared_in(class)
                .params(params),
        )
    }

    pub fn static_method(&mut self, class: BindingId, name: &str, params: usize) -> BindingId {
        self.bindings.declare(
            BindingInfo::new(BindingKind::Method, name)
                .declared_in(class)
                .params(params)
                .with_modifiers(Modifiers::static_()),
        )
    }

    pub fn overriding(&mut self, class: BindingId, name: &str, params: usize, overridden: BindingId) -> BindingId {
        self.bindings.declare(
            BindingInfo::new(BindingKind::Method, name)
                .declared_in(class)
                .params(params)
                .overriding(overridden),
        )
    }

    pub fn param(&mut self, name: &str) -> BindingId {
        self.bindings
            .declare(BindingInfo::new(BindingKind::Parameter, name))
    }

    pub fn local(&mut self, name: &str) -> BindingId {
        self.bindings
            .declare(BindingInfo::new(BindingKind::LocalVariable, name))
    }

    pub fn unit(&mut self, unit: CompilationUnit) {
        self.units.push(unit);
    }

    pub fn build(self) -> ResolvedProgram {
        ResolvedProgram::new(self.bindings, self.units)
    }
}

pub fn id(name: &str, binding: BindingId) -> Identifier {
    Identifier::bound(name, binding)
}

pub fn ty(name: &str, binding: BindingId) -> JavaType {
    JavaType::simple(Identifier::bound(name, binding))
}

pub fn param(ty: JavaType, name: &str, binding: BindingId) -> SingleVariable {
    SingleVariable::new(ty, Identifier::bound(name, binding))
}

pub fn translate(program: ResolvedProgram) -> Translation {
    translate_program(program, &TranslateOptions::default()).expect("translation succeeds")
}

pub fn translate_with(program: ResolvedProgram, options: &TranslateOptions) -> Translation {
    translate_program(program, options).expect("translation succeeds")
}

/// Text of the output file at `path`.
pub fn text<'a>(translation: &'a Translation, path: &str) -> &'a str {
    match translation.file(path) {
        Some(file) => &file.text,
        None => panic!(
            "no output file {path}; have {:?}",
            translation.files.iter().map(|f| &f.path).collect::<Vec<_>>()
        ),
    }
}

use super::*;

fn sample_table() -> (BindingTable, BindingId, BindingId, BindingId) {
    let mut table = BindingTable::new();
    let base = table.declare(BindingInfo::class("Base"));
    let derived = table.declare(BindingInfo::class("Derived").extending(base));
    let field = table.declare(BindingInfo::new(BindingKind::Field, "value").declared_in(derived));
    (table, base, derived, field)
}

#[test]
fn test_declare_assigns_sequential_ids() {
    let (table, base, derived, field) = sample_table();
    assert_eq!(base, BindingId(0));
    assert_eq!(derived, BindingId(1));
    assert_eq!(field, BindingId(2));
    assert_eq!(table.len(), 3);
    assert_eq!(table.get(field).map(|b| b.name.as_str()), Some("value"));
    assert!(table.get(BindingId(99)).is_none());
}

#[test]
fn test_superclasses_nearest_first() {
    let (mut table, base, derived, _) = sample_table();
    let leaf = table.declare(BindingInfo::class("Leaf").extending(derived));
    assert_eq!(table.superclasses(leaf), vec![derived, base]);
    assert!(table.superclasses(base).is_empty());
}

#[test]
fn test_superclasses_stops_on_cycle() {
    let mut table = BindingTable::new();
    let a = table.declare(BindingInfo::class("A").extending(BindingId(1)));
    let _b = table.declare(BindingInfo::class("B").extending(a));
    assert_eq!(table.superclasses(a), vec![BindingId(1)]);
}

#[test]
fn test_root_override_follows_chain() {
    let (mut table, base, derived, _) = sample_table();
    let top = table.declare(BindingInfo::new(BindingKind::Method, "run").declared_in(base));
    let mid = table.declare(
        BindingInfo::new(BindingKind::Method, "run")
            .declared_in(derived)
            .overriding(top),
    );
    assert_eq!(table.root_override(mid), top);
    assert_eq!(table.root_override(top), top);
}

#[test]
fn test_members_of_excludes_nested_types() {
    let (mut table, _, derived, field) = sample_table();
    let _inner = table.declare(
        BindingInfo::class("Inner")
            .declared_in(derived)
            .nested(TypeNesting::Member),
    );
    let members: Vec<_> = table.members_of(derived).map(|(id, _)| id).collect();
    assert_eq!(members, vec![field]);
    assert_eq!(table.declaring_type_name(field), Some("Derived"));
}

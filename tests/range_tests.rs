//! Integration tests for member tables exposed as ranges.

use introspect::prelude::*;
use introspect::{FnPredicate, Method, Visibility};

#[derive(Clone, Debug, PartialEq)]
struct Sprite {
    x: f32,
    y: f32,
    hidden: bool,
}

native_type!(Sprite, "Sprite");

/// Five methods, three of them public.
fn sprite_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry
        .register_class::<Sprite>()
        .method("x", |s: &Sprite| s.x)
        .unwrap()
        .method(MemberDecl::new("layout").private(), |_s: &Sprite| ())
        .unwrap()
        .method("y", |s: &Sprite| s.y)
        .unwrap()
        .method(MemberDecl::new("invalidate").protected(), |_s: &Sprite| ())
        .unwrap()
        .method_mut("hide", |s: &mut Sprite| s.hidden = true)
        .unwrap()
        .build()
        .unwrap();
    registry
}

fn names<'a>(methods: impl Iterator<Item = &'a Method>) -> Vec<&'a str> {
    methods.map(|m| m.name()).collect()
}

#[test]
fn public_methods_in_declaration_order() {
    let registry = sprite_registry();
    let class = registry.class::<Sprite>().unwrap();

    assert_eq!(class.methods().len(), 5);

    let public = class.public_methods();
    assert_eq!(public.len(), 3);
    assert!(!public.is_empty());
    assert_eq!(names(public.iter()), ["x", "y", "hide"]);
    assert_eq!(names(public.iter().rev()), ["hide", "y", "x"]);
}

#[test]
fn reverse_iteration_reaches_rend() {
    let registry = sprite_registry();
    let class = registry.class::<Sprite>().unwrap();
    let public = class.public_methods();

    let mut it = public.rbegin();
    let mut steps = 0;
    while it != public.rend() {
        assert!(it.get().unwrap().is_public());
        it.next();
        steps += 1;
    }
    assert_eq!(steps, 3);
}

#[test]
fn begin_skips_rejected_elements() {
    let registry = sprite_registry();
    let class = registry.class::<Sprite>().unwrap();

    let mutating = class.methods().filter(|m: &Method| m.name() == "hide");
    assert_eq!(mutating.begin().get().map(|m| m.name()), Some("hide"));
    assert_eq!(mutating.rbegin().get().map(|m| m.name()), Some("hide"));
    assert_eq!(mutating.len(), 1);
}

#[test]
fn reject_all_is_empty() {
    let registry = sprite_registry();
    let class = registry.class::<Sprite>().unwrap();

    let none = ArrayRange::with_predicate(
        class.methods().as_slice(),
        (|_: &Method| false) as FnPredicate<Method>,
    );
    assert_eq!(none.len(), 0);
    assert!(none.is_empty());
    assert!(none.begin() == none.end());
    assert!(none.rbegin() == none.rend());
    assert_eq!(none.iter().next().map(|m| m.name()), None);
}

#[test]
fn class_without_members_has_empty_ranges() {
    let mut registry = TypeRegistry::new();
    registry.register_class::<Sprite>().build().unwrap();
    let class = registry.class::<Sprite>().unwrap();

    assert!(class.methods().is_empty());
    assert!(class.public_methods().is_empty());
    assert!(class.properties().is_empty());
    assert!(class.constructors().begin() == class.constructors().end());
}

#[test]
fn default_range_is_empty() {
    let range: ArrayRange<'_, Method> = ArrayRange::default();
    assert_eq!(range.len(), 0);
    assert!(range.is_empty());
    assert!(range.begin() == range.end());
    assert!(range.rbegin() == range.rend());
}

#[test]
fn predicate_sees_current_state() {
    let registry = sprite_registry();
    let class = registry.class::<Sprite>().unwrap();
    let visibility = std::cell::Cell::new(Visibility::Public);

    let by_visibility = class
        .methods()
        .filter(|m: &Method| m.visibility() == visibility.get());
    assert_eq!(by_visibility.len(), 3);

    visibility.set(Visibility::Private);
    assert_eq!(names(by_visibility.iter()), ["layout"]);
}

#[test]
fn registry_ranges() {
    let mut registry = sprite_registry();
    registry.register_function("origin", || 0.0).unwrap();
    registry
        .register_function(MemberDecl::new("debug_dump").private(), || ())
        .unwrap();

    assert_eq!(registry.classes().len(), 1);
    assert_eq!(registry.classes().first().map(|c| c.name()), Some("Sprite"));
    assert_eq!(registry.functions().len(), 2);
    assert_eq!(names(registry.public_functions().iter()), ["origin"]);
}

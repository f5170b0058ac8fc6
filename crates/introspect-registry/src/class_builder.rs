//! Fluent registration of a class and its members.
//!
//! # Example
//!
//! ```
//! use introspect_core::{native_type, Dynamic, Instance};
//! use introspect_registry::{DefaultArgs, MemberDecl, TypeRegistry};
//!
//! #[derive(Clone, Default)]
//! struct Vec2 {
//!     x: f32,
//!     y: f32,
//! }
//!
//! native_type!(Vec2, "Vec2");
//!
//! let mut registry = TypeRegistry::new();
//! registry
//!     .register_class::<Vec2>()
//!     .constructor(|x: f32, y: f32| Vec2 { x, y })?
//!     .method("length", |v: &Vec2| (v.x * v.x + v.y * v.y).sqrt())?
//!     .method_mut(
//!         MemberDecl::new("scale").defaults(DefaultArgs::new().with(2.0)),
//!         |v: &mut Vec2, by: f32| {
//!             v.x *= by;
//!             v.y *= by;
//!         },
//!     )?
//!     .property("x", |v: &Vec2| v.x, |v: &mut Vec2, x: f32| v.x = x)?
//!     .build()?;
//!
//! let class = registry.class::<Vec2>().unwrap();
//! assert_eq!(class.methods().len(), 2);
//!
//! let mut v = Vec2 { x: 3.0, y: 4.0 };
//! let length = class.invoke_method("length", &mut Instance::new(&v), &[]).unwrap();
//! assert_eq!(length, Dynamic::Float(5.0));
//!
//! class.invoke_method("scale", &mut Instance::new_mut(&mut v), &[]).unwrap();
//! assert_eq!(v.x, 6.0);
//! # Ok::<(), introspect_core::RegistrationError>(())
//! ```

use std::any::TypeId;
use std::marker::PhantomData;

use introspect_core::{IntoDynamic, Reflected, RegistrationError};

use crate::accessor::{Accessor, IntoFunction, IntoMethod, IntoMethodMut};
use crate::class::ClassEntry;
use crate::default_args::DefaultArgs;
use crate::descriptors::{Constructor, Method, Property};
use crate::registry::TypeRegistry;
use crate::signature::Owner;
use crate::visibility::Visibility;
use crate::wrapper::MethodWrapper;

// ============================================================================
// MemberDecl
// ============================================================================

/// Name and options of a member being registered.
///
/// A plain `&str` converts into a public declaration with no defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberDecl {
    name: String,
    visibility: Visibility,
    defaults: DefaultArgs,
}

impl MemberDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            defaults: DefaultArgs::new(),
        }
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn protected(self) -> Self {
        self.visibility(Visibility::Protected)
    }

    pub fn private(self) -> Self {
        self.visibility(Visibility::Private)
    }

    /// Defaults for the trailing parameters.
    pub fn defaults(mut self, defaults: DefaultArgs) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn into_parts(self) -> (String, Visibility, DefaultArgs) {
        (self.name, self.visibility, self.defaults)
    }
}

impl From<&str> for MemberDecl {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for MemberDecl {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

// ============================================================================
// ClassBuilder
// ============================================================================

/// Builder for registering a class with a [`TypeRegistry`].
///
/// Created by [`TypeRegistry::register_class`]. Nothing is visible in the
/// registry until [`build`](ClassBuilder::build) succeeds.
pub struct ClassBuilder<'r, T: Reflected> {
    registry: &'r mut TypeRegistry,
    methods: Vec<Method>,
    properties: Vec<Property>,
    constructors: Vec<Constructor>,
    _marker: PhantomData<T>,
}

impl<'r, T: Reflected> ClassBuilder<'r, T> {
    pub(crate) fn new(registry: &'r mut TypeRegistry) -> Self {
        Self {
            registry,
            methods: Vec::new(),
            properties: Vec::new(),
            constructors: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Register a `&self` method.
    pub fn method<F, Args, R>(
        self,
        decl: impl Into<MemberDecl>,
        f: F,
    ) -> Result<Self, RegistrationError>
    where
        F: IntoMethod<T, Args, R>,
    {
        self.push_method(decl.into(), f.into_accessor())
    }

    /// Register a `&mut self` method.
    pub fn method_mut<F, Args, R>(
        self,
        decl: impl Into<MemberDecl>,
        f: F,
    ) -> Result<Self, RegistrationError>
    where
        F: IntoMethodMut<T, Args, R>,
    {
        self.push_method(decl.into(), f.into_accessor())
    }

    /// Register a method that does not take an instance.
    pub fn static_method<F, Args, R>(
        self,
        decl: impl Into<MemberDecl>,
        f: F,
    ) -> Result<Self, RegistrationError>
    where
        F: IntoFunction<Args, R>,
    {
        let mut accessor = f.into_accessor();
        accessor.set_owner(Owner::of::<T>());
        self.push_method(decl.into(), accessor)
    }

    /// Register a read/write property.
    pub fn property<G, S, V>(
        self,
        decl: impl Into<MemberDecl>,
        getter: G,
        setter: S,
    ) -> Result<Self, RegistrationError>
    where
        G: IntoMethod<T, (), V>,
        S: IntoMethodMut<T, (V,), ()>,
    {
        self.push_property(
            decl.into(),
            getter.into_accessor(),
            Some(setter.into_accessor()),
        )
    }

    /// Register a property without a setter.
    pub fn property_readonly<G, V>(
        self,
        decl: impl Into<MemberDecl>,
        getter: G,
    ) -> Result<Self, RegistrationError>
    where
        G: IntoMethod<T, (), V>,
    {
        self.push_property(decl.into(), getter.into_accessor(), None)
    }

    /// Register a read-only property that does not take an instance.
    pub fn static_property<G, V>(
        self,
        decl: impl Into<MemberDecl>,
        getter: G,
    ) -> Result<Self, RegistrationError>
    where
        G: IntoFunction<(), V>,
    {
        let mut accessor = getter.into_accessor();
        accessor.set_owner(Owner::of::<T>());
        self.push_property(decl.into(), accessor, None)
    }

    /// Register a public constructor.
    pub fn constructor<F, Args>(self, f: F) -> Result<Self, RegistrationError>
    where
        F: IntoFunction<Args, T>,
        T: IntoDynamic,
    {
        self.constructor_with(Visibility::Public, DefaultArgs::new(), f)
    }

    /// Register a constructor with a visibility and trailing defaults.
    pub fn constructor_with<F, Args>(
        mut self,
        visibility: Visibility,
        defaults: DefaultArgs,
        f: F,
    ) -> Result<Self, RegistrationError>
    where
        F: IntoFunction<Args, T>,
        T: IntoDynamic,
    {
        let mut accessor = f.into_accessor();
        accessor.set_owner(Owner::of::<T>());
        let wrapper = self.wrap(T::type_name(), accessor, defaults)?;
        let constructor = Constructor::new(T::type_name(), T::type_hash(), visibility, wrapper);
        if self.constructors.iter().any(|c| c.hash() == constructor.hash()) {
            return Err(self.reject(RegistrationError::DuplicateMember {
                owner: T::type_name().to_string(),
                name: T::type_name().to_string(),
            }));
        }
        self.constructors.push(constructor);
        Ok(self)
    }

    /// Finish registration and add the class to the registry.
    pub fn build(self) -> Result<(), RegistrationError> {
        let entry = ClassEntry::new(
            T::type_name().to_string(),
            T::type_hash(),
            TypeId::of::<T>(),
            self.methods,
            self.properties,
            self.constructors,
        );
        self.registry.insert_class(entry)
    }

    fn push_method(
        mut self,
        decl: MemberDecl,
        accessor: Accessor,
    ) -> Result<Self, RegistrationError> {
        self.check_unique(&decl.name)?;
        let wrapper = self.wrap(&decl.name, accessor, decl.defaults)?;
        self.methods.push(Method::new(decl.name, decl.visibility, wrapper));
        Ok(self)
    }

    fn push_property(
        mut self,
        decl: MemberDecl,
        getter: Accessor,
        setter: Option<Accessor>,
    ) -> Result<Self, RegistrationError> {
        self.check_unique(&decl.name)?;
        // Getters take no parameters, so only an empty default list validates.
        let getter = self.wrap(&decl.name, getter, decl.defaults)?;
        let setter = setter.map(MethodWrapper::without_defaults);
        self.properties
            .push(Property::new(decl.name, decl.visibility, getter, setter));
        Ok(self)
    }

    fn wrap(
        &self,
        member: &str,
        accessor: Accessor,
        defaults: DefaultArgs,
    ) -> Result<MethodWrapper, RegistrationError> {
        MethodWrapper::new(accessor, defaults).map_err(|err| {
            tracing::warn!(class = T::type_name(), member, error = %err, "member rejected");
            err
        })
    }

    fn check_unique(&self, name: &str) -> Result<(), RegistrationError> {
        let taken = self.methods.iter().any(|m| m.name() == name)
            || self.properties.iter().any(|p| p.name() == name);
        if taken {
            return Err(self.reject(RegistrationError::DuplicateMember {
                owner: T::type_name().to_string(),
                name: name.to_string(),
            }));
        }
        Ok(())
    }

    fn reject(&self, err: RegistrationError) -> RegistrationError {
        tracing::warn!(class = T::type_name(), error = %err, "member rejected");
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use introspect_core::{Dynamic, Instance, InvokeError, native_type};

    #[derive(Clone, Debug, Default, PartialEq)]
    struct Account {
        owner: String,
        balance: i64,
    }

    native_type!(Account, "Account");

    impl Account {
        fn deposit(&mut self, amount: i64) -> i64 {
            self.balance += amount;
            self.balance
        }
    }

    #[test]
    fn registers_members_in_order() {
        let mut registry = TypeRegistry::new();
        registry
            .register_class::<Account>()
            .constructor(|owner: String| Account { owner, balance: 0 })
            .unwrap()
            .method("balance", |a: &Account| a.balance)
            .unwrap()
            .method_mut("deposit", Account::deposit)
            .unwrap()
            .method(MemberDecl::new("audit").private(), |_a: &Account| true)
            .unwrap()
            .property("owner", |a: &Account| a.owner.clone(), |a: &mut Account, o: String| {
                a.owner = o
            })
            .unwrap()
            .build()
            .unwrap();

        let class = registry.class::<Account>().unwrap();
        let names: Vec<&str> = class.methods().iter().map(|m| m.name()).collect();
        assert_eq!(names, ["balance", "deposit", "audit"]);
        assert_eq!(class.public_methods().len(), 2);
        assert_eq!(class.properties().len(), 1);
        assert_eq!(class.constructors().len(), 1);
    }

    #[test]
    fn duplicate_member_rejected() {
        let mut registry = TypeRegistry::new();
        let err = registry
            .register_class::<Account>()
            .method("balance", |a: &Account| a.balance)
            .unwrap()
            .property_readonly("balance", |a: &Account| a.balance)
            .err();
        assert!(matches!(
            err,
            Some(RegistrationError::DuplicateMember { ref name, .. }) if name == "balance"
        ));
        // Nothing reaches the registry without build().
        assert!(registry.class::<Account>().is_none());
    }

    #[test]
    fn invalid_defaults_rejected() {
        let mut registry = TypeRegistry::new();
        let result = registry.register_class::<Account>().method_mut(
            MemberDecl::new("deposit").defaults(DefaultArgs::new().with("ten")),
            Account::deposit,
        );
        assert!(matches!(
            result,
            Err(RegistrationError::DefaultTypeMismatch { index: 0, .. })
        ));
    }

    #[test]
    fn static_members_have_owner() {
        let mut registry = TypeRegistry::new();
        registry
            .register_class::<Account>()
            .static_method("bank", || "Example Bank")
            .unwrap()
            .static_property("currency", || "EUR")
            .unwrap()
            .build()
            .unwrap();

        let class = registry.class::<Account>().unwrap();
        let bank = class.method("bank").unwrap();
        assert!(bank.is_static());
        assert_eq!(bank.owner_name(), Some("Account"));
        assert_eq!(class.static_methods().len(), 1);

        let currency = class.property("currency").unwrap();
        assert!(currency.is_readonly());
        assert_eq!(currency.get(&mut Instance::empty()), Ok(Dynamic::from("EUR")));
    }

    #[test]
    fn constructor_with_defaults() {
        let mut registry = TypeRegistry::new();
        registry
            .register_class::<Account>()
            .constructor_with(
                Visibility::Public,
                DefaultArgs::new().with(100),
                |owner: String, balance: i64| Account { owner, balance },
            )
            .unwrap()
            .build()
            .unwrap();

        let class = registry.class::<Account>().unwrap();
        let account = class.create(&[Dynamic::from("ada")]).unwrap();
        assert_eq!(
            account.downcast_ref::<Account>(),
            Some(&Account {
                owner: "ada".into(),
                balance: 100,
            })
        );
        assert!(matches!(
            class.create(&[]),
            Err(InvokeError::MissingArguments { .. })
        ));
    }

    #[test]
    fn member_decl_from_str() {
        let decl = MemberDecl::from("len");
        assert_eq!(decl.name(), "len");
        assert_eq!(decl, MemberDecl::new("len").visibility(Visibility::Public));
    }
}

//! Runtime reflection for native Rust types.
//!
//! Register classes and free functions once, then look them up and call
//! them by name with type-erased [`Dynamic`] arguments:
//!
//! ```
//! use introspect::prelude::*;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Counter {
//!     value: i32,
//! }
//!
//! native_type!(Counter, "Counter");
//!
//! let mut registry = TypeRegistry::new();
//! registry
//!     .register_class::<Counter>()
//!     .constructor(|value: i32| Counter { value })?
//!     .method("get", |c: &Counter| c.value)?
//!     .method_mut(
//!         MemberDecl::new("add").defaults(DefaultArgs::new().with(1)),
//!         |c: &mut Counter, by: i32| c.value += by,
//!     )?
//!     .build()?;
//!
//! let class = registry.class::<Counter>().unwrap();
//! let mut counter = Counter { value: 1 };
//! let mut instance = Instance::new_mut(&mut counter);
//!
//! class.invoke_method("add", &mut instance, &[])?;
//! class.invoke_method("add", &mut instance, &[Dynamic::Int(5)])?;
//! assert_eq!(class.invoke_method("get", &mut instance, &[])?, Dynamic::Int(7));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The building blocks live in two crates, re-exported here:
//!
//! - `introspect-core`: type identity, [`Dynamic`], [`Instance`], [`ArrayRange`]
//! - `introspect-registry`: [`MethodWrapper`], descriptors, [`TypeRegistry`]

pub use introspect_core::*;
pub use introspect_registry::*;

/// Commonly used types.
pub mod prelude {
    pub use introspect_core::{
        ArrayRange, Dynamic, FromDynamic, Instance, IntoDynamic, InvokeError, NativeValue,
        Predicate, Reflected, RegistrationError, TypeHash, native_type,
    };
    pub use introspect_registry::{
        Accessor, ClassEntry, DefaultArgs, MemberDecl, Method, MethodWrapper, TypeRegistry,
        Visibility,
    };
}

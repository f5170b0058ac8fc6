//! Invocation wrappers and the type registry.
//!
//! Native callables are turned into type-erased [`Accessor`]s, wrapped with
//! trailing defaults into a [`MethodWrapper`] and stored as member
//! descriptors on a [`ClassEntry`] inside the [`TypeRegistry`].
//!
//! - [`MethodWrapper`]: fixed-arity and variadic invocation, introspection
//! - [`DefaultArgs`]: trailing default argument values
//! - [`ClassBuilder`]: fluent class registration
//! - [`ClassEntry`]: member tables exposed as ranges

mod accessor;
mod class;
mod class_builder;
mod default_args;
mod descriptors;
mod registry;
mod signature;
mod visibility;
mod wrapper;

pub use accessor::{
    Accessor, AccessorKind, IntoFunction, IntoMethod, IntoMethodMut, MAX_ARITY, Thunk,
};
pub use class::{ClassEntry, PublicRange};
pub use class_builder::{ClassBuilder, MemberDecl};
pub use default_args::DefaultArgs;
pub use descriptors::{Constructor, Method, Property};
pub use registry::TypeRegistry;
pub use signature::{Owner, Param, Signature};
pub use visibility::Visibility;
pub use wrapper::{Args, MethodWrapper};

//! Core types for runtime reflection.
//!
//! This crate holds everything the invocation layer consumes but does not
//! own: type identity, the type-erased value container, the instance handle
//! and the borrowed range view used to expose member tables.
//!
//! - [`TypeHash`] / [`Reflected`]: deterministic identity of reflected types
//! - [`Dynamic`]: arguments and return values
//! - [`FromDynamic`] / [`IntoDynamic`]: typed conversion with fallibility
//! - [`Instance`]: target of a member call
//! - [`ArrayRange`]: filtered, borrowed view over a member table

mod dynamic;
mod error;
mod instance;
mod range;
mod reflected;
mod type_hash;

pub mod convert;

pub use convert::{FromDynamic, IntoDynamic, ParamFlags};
pub use dynamic::{Dynamic, NativeValue};
pub use error::{ConversionError, InvokeError, RegistrationError};
pub use instance::Instance;
pub use range::{
    ArrayRange, Direction, FnPredicate, Forward, NoPredicate, Predicate, RangeIter, Reverse,
};
pub use reflected::Reflected;
pub use type_hash::{TypeHash, hash_constants, primitives};

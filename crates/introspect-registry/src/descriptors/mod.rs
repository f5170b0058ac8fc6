//! Member descriptors.
//!
//! Each descriptor owns the [`MethodWrapper`](crate::MethodWrapper)s for one
//! registered member and adds its name, identity and visibility:
//!
//! - [`Method`]: a named callable (also used for global functions)
//! - [`Property`]: a getter plus an optional setter
//! - [`Constructor`]: a static callable producing a new instance

mod constructor;
mod method;
mod property;

pub use constructor::Constructor;
pub use method::Method;
pub use property::Property;

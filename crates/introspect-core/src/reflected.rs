//! The `Reflected` trait for types that can cross the reflection boundary.
//!
//! Every type that appears as a receiver, parameter or return value of a
//! registered member implements [`Reflected`], which supplies its identity
//! ([`TypeHash`]) and its reflected name.
//!
//! # Example
//!
//! ```
//! use introspect_core::{Reflected, TypeHash};
//!
//! struct Player {
//!     health: i32,
//! }
//!
//! impl Reflected for Player {
//!     fn type_hash() -> TypeHash {
//!         TypeHash::from_name("Player")
//!     }
//!
//!     fn type_name() -> &'static str {
//!         "Player"
//!     }
//! }
//!
//! assert_eq!(Player::type_name(), "Player");
//! ```
//!
//! Types that should also travel inside a [`Dynamic`](crate::Dynamic) by value
//! use [`native_type!`](crate::native_type), which implements `Reflected`
//! together with the conversion traits.

use crate::{TypeHash, primitives};

/// Trait for types that can be registered with a reflection registry.
pub trait Reflected: 'static {
    /// Get the type hash for this type.
    fn type_hash() -> TypeHash;

    /// Get the reflected type name.
    fn type_name() -> &'static str;
}

macro_rules! impl_reflected {
    ($($ty:ty => $hash:expr, $name:literal;)*) => {
        $(
            impl Reflected for $ty {
                #[inline]
                fn type_hash() -> TypeHash {
                    $hash
                }

                #[inline]
                fn type_name() -> &'static str {
                    $name
                }
            }
        )*
    };
}

impl_reflected! {
    () => primitives::VOID, "void";
    bool => primitives::BOOL, "bool";
    i8 => primitives::INT8, "int8";
    i16 => primitives::INT16, "int16";
    i32 => primitives::INT32, "int";
    i64 => primitives::INT64, "int64";
    u8 => primitives::UINT8, "uint8";
    u16 => primitives::UINT16, "uint16";
    u32 => primitives::UINT32, "uint";
    u64 => primitives::UINT64, "uint64";
    f32 => primitives::FLOAT, "float";
    f64 => primitives::DOUBLE, "double";
    String => primitives::STRING, "string";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_type_hashes() {
        assert_eq!(<()>::type_hash(), primitives::VOID);
        assert_eq!(bool::type_hash(), primitives::BOOL);
        assert_eq!(i32::type_hash(), primitives::INT32);
        assert_eq!(f32::type_hash(), primitives::FLOAT);
        assert_eq!(String::type_hash(), primitives::STRING);
    }

    #[test]
    fn primitive_type_names() {
        assert_eq!(<()>::type_name(), "void");
        assert_eq!(i64::type_name(), "int64");
        assert_eq!(u32::type_name(), "uint");
        assert_eq!(f64::type_name(), "double");
        assert_eq!(String::type_name(), "string");
    }

    #[test]
    fn custom_type_implementation() {
        struct CustomType;

        impl Reflected for CustomType {
            fn type_hash() -> TypeHash {
                TypeHash::from_name("CustomType")
            }

            fn type_name() -> &'static str {
                "CustomType"
            }
        }

        assert_eq!(CustomType::type_name(), "CustomType");
        assert_eq!(CustomType::type_hash(), TypeHash::from_name("CustomType"));
    }
}

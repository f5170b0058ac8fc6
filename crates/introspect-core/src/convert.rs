//! Conversion traits between Rust values and [`Dynamic`].
//!
//! - [`FromDynamic`]: extract a parameter value from a `Dynamic`, and describe
//!   the parameter (type identity and qualifier flags) for signatures
//! - [`IntoDynamic`]: turn a return value into a `Dynamic`
//!
//! ## Supported types
//!
//! - Integers: `i8`, `i16`, `i32`, `i64`, `u8`, `u16`, `u32`, `u64`
//! - Floats: `f32`, `f64` (integers widen into floats)
//! - `bool`, `String`, `()`
//! - `Arc<T>` for any registered `T`: borrows a native value without copying it
//! - `Dynamic` itself, for parameters that accept any value
//! - user types declared with [`native_type!`](crate::native_type)

use std::sync::Arc;

use bitflags::bitflags;

use crate::error::ConversionError;
use crate::{Dynamic, NativeValue, Reflected, TypeHash, primitives};

bitflags! {
    /// Qualifiers of a formal parameter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ParamFlags: u8 {
        /// The callable receives a reference to the caller's value.
        const REFERENCE = 1 << 0;
        /// The referenced value cannot be modified through the parameter.
        const CONST = 1 << 1;
    }
}

/// Extract a value from a [`Dynamic`].
pub trait FromDynamic: Sized + 'static {
    /// Qualifiers reported for parameters of this type.
    const FLAGS: ParamFlags = ParamFlags::empty();

    /// Identity of the parameter type.
    fn param_type() -> TypeHash;

    /// Reflected name of the parameter type.
    fn param_type_name() -> &'static str;

    /// Extract a value from the given dynamic.
    ///
    /// Returns a `ConversionError` if the value holds an incompatible type.
    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError>;
}

/// Convert a value into a [`Dynamic`].
pub trait IntoDynamic {
    /// Identity of the produced type.
    fn return_type() -> TypeHash;

    /// Reflected name of the produced type.
    fn return_type_name() -> &'static str;

    /// Convert this value into a dynamic.
    fn into_dynamic(self) -> Dynamic;
}

// ============================================================================
// Integer implementations
// ============================================================================

macro_rules! impl_convert_int {
    ($($ty:ty),*) => {
        $(
            impl FromDynamic for $ty {
                fn param_type() -> TypeHash {
                    <$ty as Reflected>::type_hash()
                }

                fn param_type_name() -> &'static str {
                    <$ty as Reflected>::type_name()
                }

                fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
                    match value {
                        Dynamic::Int(v) => <$ty>::try_from(*v).map_err(|_| {
                            ConversionError::IntegerOverflow {
                                value: i128::from(*v),
                                target_type: <$ty as Reflected>::type_name(),
                            }
                        }),
                        Dynamic::UInt(v) => <$ty>::try_from(*v).map_err(|_| {
                            ConversionError::IntegerOverflow {
                                value: i128::from(*v),
                                target_type: <$ty as Reflected>::type_name(),
                            }
                        }),
                        _ => Err(ConversionError::TypeMismatch {
                            expected: <$ty as Reflected>::type_name(),
                            actual: value.type_name(),
                        }),
                    }
                }
            }

            impl IntoDynamic for $ty {
                fn return_type() -> TypeHash {
                    <$ty as Reflected>::type_hash()
                }

                fn return_type_name() -> &'static str {
                    <$ty as Reflected>::type_name()
                }

                fn into_dynamic(self) -> Dynamic {
                    Dynamic::from(self)
                }
            }
        )*
    };
}

impl_convert_int!(i8, i16, i32, i64, u8, u16, u32, u64);

// ============================================================================
// Float implementations
// ============================================================================

impl FromDynamic for f32 {
    fn param_type() -> TypeHash {
        primitives::FLOAT
    }

    fn param_type_name() -> &'static str {
        "float"
    }

    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Float(v) => {
                if !v.is_finite() || (*v <= f32::MAX as f64 && *v >= f32::MIN as f64) {
                    Ok(*v as f32)
                } else {
                    Err(ConversionError::FloatConversion {
                        value: *v,
                        target_type: "float",
                    })
                }
            }
            Dynamic::Int(v) => Ok(*v as f32),
            Dynamic::UInt(v) => Ok(*v as f32),
            _ => Err(ConversionError::TypeMismatch {
                expected: "float",
                actual: value.type_name(),
            }),
        }
    }
}

impl IntoDynamic for f32 {
    fn return_type() -> TypeHash {
        primitives::FLOAT
    }

    fn return_type_name() -> &'static str {
        "float"
    }

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Float(self as f64)
    }
}

impl FromDynamic for f64 {
    fn param_type() -> TypeHash {
        primitives::DOUBLE
    }

    fn param_type_name() -> &'static str {
        "double"
    }

    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Float(v) => Ok(*v),
            Dynamic::Int(v) => Ok(*v as f64),
            Dynamic::UInt(v) => Ok(*v as f64),
            _ => Err(ConversionError::TypeMismatch {
                expected: "double",
                actual: value.type_name(),
            }),
        }
    }
}

impl IntoDynamic for f64 {
    fn return_type() -> TypeHash {
        primitives::DOUBLE
    }

    fn return_type_name() -> &'static str {
        "double"
    }

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Float(self)
    }
}

// ============================================================================
// Bool, String and unit
// ============================================================================

impl FromDynamic for bool {
    fn param_type() -> TypeHash {
        primitives::BOOL
    }

    fn param_type_name() -> &'static str {
        "bool"
    }

    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::Bool(v) => Ok(*v),
            _ => Err(ConversionError::TypeMismatch {
                expected: "bool",
                actual: value.type_name(),
            }),
        }
    }
}

impl IntoDynamic for bool {
    fn return_type() -> TypeHash {
        primitives::BOOL
    }

    fn return_type_name() -> &'static str {
        "bool"
    }

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Bool(self)
    }
}

impl FromDynamic for String {
    fn param_type() -> TypeHash {
        primitives::STRING
    }

    fn param_type_name() -> &'static str {
        "string"
    }

    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        match value {
            Dynamic::String(s) => Ok(s.clone()),
            _ => Err(ConversionError::TypeMismatch {
                expected: "string",
                actual: value.type_name(),
            }),
        }
    }
}

impl IntoDynamic for String {
    fn return_type() -> TypeHash {
        primitives::STRING
    }

    fn return_type_name() -> &'static str {
        "string"
    }

    fn into_dynamic(self) -> Dynamic {
        Dynamic::String(self)
    }
}

impl IntoDynamic for &'static str {
    fn return_type() -> TypeHash {
        primitives::STRING
    }

    fn return_type_name() -> &'static str {
        "string"
    }

    fn into_dynamic(self) -> Dynamic {
        Dynamic::String(self.to_string())
    }
}

impl IntoDynamic for () {
    fn return_type() -> TypeHash {
        primitives::VOID
    }

    fn return_type_name() -> &'static str {
        "void"
    }

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Void
    }
}

// ============================================================================
// Pass-through and shared native values
// ============================================================================

impl FromDynamic for Dynamic {
    fn param_type() -> TypeHash {
        primitives::ANY
    }

    fn param_type_name() -> &'static str {
        "any"
    }

    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        Ok(value.clone())
    }
}

impl IntoDynamic for Dynamic {
    fn return_type() -> TypeHash {
        primitives::ANY
    }

    fn return_type_name() -> &'static str {
        "any"
    }

    fn into_dynamic(self) -> Dynamic {
        self
    }
}

impl<T: Reflected + Send + Sync> FromDynamic for Arc<T> {
    const FLAGS: ParamFlags = ParamFlags::REFERENCE.union(ParamFlags::CONST);

    fn param_type() -> TypeHash {
        T::type_hash()
    }

    fn param_type_name() -> &'static str {
        T::type_name()
    }

    fn from_dynamic(value: &Dynamic) -> Result<Self, ConversionError> {
        value
            .as_native()
            .and_then(NativeValue::downcast_arc::<T>)
            .ok_or(ConversionError::TypeMismatch {
                expected: T::type_name(),
                actual: value.type_name(),
            })
    }
}

impl<T: Reflected + Send + Sync> IntoDynamic for Arc<T> {
    fn return_type() -> TypeHash {
        T::type_hash()
    }

    fn return_type_name() -> &'static str {
        T::type_name()
    }

    fn into_dynamic(self) -> Dynamic {
        Dynamic::Native(NativeValue::from_arc(self))
    }
}

/// Clone a native `T` out of a dynamic. Used by [`native_type!`](crate::native_type).
pub fn clone_native<T: Reflected + Clone>(value: &Dynamic) -> Result<T, ConversionError> {
    value
        .downcast_ref::<T>()
        .cloned()
        .ok_or(ConversionError::TypeMismatch {
            expected: T::type_name(),
            actual: value.type_name(),
        })
}

/// Implement [`Reflected`], [`FromDynamic`] and [`IntoDynamic`] for a
/// `Clone + Send + Sync` user type, storing it as a native value.
///
/// ```
/// use introspect_core::{native_type, Dynamic, FromDynamic, IntoDynamic};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Color(u8, u8, u8);
///
/// native_type!(Color, "Color");
///
/// let value = Color(1, 2, 3).into_dynamic();
/// assert_eq!(value.type_name(), "Color");
/// assert_eq!(Color::from_dynamic(&value).unwrap(), Color(1, 2, 3));
/// ```
#[macro_export]
macro_rules! native_type {
    ($ty:ty, $name:literal) => {
        impl $crate::Reflected for $ty {
            fn type_hash() -> $crate::TypeHash {
                $crate::TypeHash::from_name($name)
            }

            fn type_name() -> &'static str {
                $name
            }
        }

        impl $crate::FromDynamic for $ty {
            fn param_type() -> $crate::TypeHash {
                <$ty as $crate::Reflected>::type_hash()
            }

            fn param_type_name() -> &'static str {
                $name
            }

            fn from_dynamic(
                value: &$crate::Dynamic,
            ) -> ::std::result::Result<Self, $crate::ConversionError> {
                $crate::convert::clone_native::<$ty>(value)
            }
        }

        impl $crate::IntoDynamic for $ty {
            fn return_type() -> $crate::TypeHash {
                <$ty as $crate::Reflected>::type_hash()
            }

            fn return_type_name() -> &'static str {
                $name
            }

            fn into_dynamic(self) -> $crate::Dynamic {
                $crate::Dynamic::native(self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
    }

    crate::native_type!(Point, "Point");

    #[test]
    fn int_narrowing_is_bounds_checked() {
        assert_eq!(i8::from_dynamic(&Dynamic::Int(127)).unwrap(), 127);
        assert!(matches!(
            i8::from_dynamic(&Dynamic::Int(128)),
            Err(ConversionError::IntegerOverflow { value: 128, .. })
        ));
        assert!(u32::from_dynamic(&Dynamic::Int(-1)).is_err());
        assert_eq!(i64::from_dynamic(&Dynamic::Int(i64::MAX)).unwrap(), i64::MAX);
    }

    #[test]
    fn u64_round_trips_above_i64_max() {
        for value in [0, i64::MAX as u64, i64::MAX as u64 + 1, u64::MAX] {
            assert_eq!(u64::from_dynamic(&value.into_dynamic()), Ok(value));
        }
        assert_eq!(u64::MAX.into_dynamic(), Dynamic::UInt(u64::MAX));
        assert!(matches!(
            i64::from_dynamic(&u64::MAX.into_dynamic()),
            Err(ConversionError::IntegerOverflow { value, .. }) if value == i128::from(u64::MAX)
        ));
        assert_eq!(f64::from_dynamic(&Dynamic::UInt(1 << 63)), Ok(9.223372036854776e18));
    }

    #[test]
    fn int_rejects_other_kinds() {
        let err = i32::from_dynamic(&Dynamic::String("1".into())).unwrap_err();
        assert_eq!(
            err,
            ConversionError::TypeMismatch {
                expected: "int",
                actual: "string",
            }
        );
    }

    #[test]
    fn floats_accept_ints() {
        assert_eq!(f64::from_dynamic(&Dynamic::Int(3)).unwrap(), 3.0);
        assert_eq!(f32::from_dynamic(&Dynamic::Float(0.5)).unwrap(), 0.5);
        assert!(f32::from_dynamic(&Dynamic::Float(f64::MAX)).is_err());
        assert!(f32::from_dynamic(&Dynamic::Float(f64::INFINITY)).unwrap().is_infinite());
        assert!(f64::from_dynamic(&Dynamic::Bool(true)).is_err());
    }

    #[test]
    fn bool_and_string() {
        assert!(bool::from_dynamic(&Dynamic::Bool(true)).unwrap());
        assert!(bool::from_dynamic(&Dynamic::Int(1)).is_err());
        assert_eq!(String::from_dynamic(&Dynamic::from("abc")).unwrap(), "abc");
        assert_eq!("abc".into_dynamic(), Dynamic::String("abc".into()));
    }

    #[test]
    fn into_dynamic_primitives() {
        assert_eq!(5u16.into_dynamic(), Dynamic::Int(5));
        assert_eq!(2.5f32.into_dynamic(), Dynamic::Float(2.5));
        assert_eq!(().into_dynamic(), Dynamic::Void);
        assert_eq!(<() as IntoDynamic>::return_type(), primitives::VOID);
    }

    #[test]
    fn native_type_round_trip() {
        let value = Point { x: 1, y: 2 }.into_dynamic();
        assert_eq!(value.type_name(), "Point");
        assert_eq!(Point::from_dynamic(&value).unwrap(), Point { x: 1, y: 2 });
        assert!(Point::from_dynamic(&Dynamic::Int(0)).is_err());
        assert_eq!(Point::param_type(), TypeHash::from_name("Point"));
        assert_eq!(Point::FLAGS, ParamFlags::empty());
    }

    #[test]
    fn arc_parameters_share_the_payload() {
        let value = Point { x: 4, y: 5 }.into_dynamic();
        let a = Arc::<Point>::from_dynamic(&value).unwrap();
        let b = Arc::<Point>::from_dynamic(&value).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.x, 4);
        assert_eq!(
            <Arc<Point> as FromDynamic>::FLAGS,
            ParamFlags::REFERENCE | ParamFlags::CONST
        );
        assert!(Arc::<Point>::from_dynamic(&Dynamic::Int(1)).is_err());
    }

    #[test]
    fn dynamic_passes_through() {
        let value = Dynamic::from(1.25f64);
        assert_eq!(Dynamic::from_dynamic(&value).unwrap(), value);
        assert_eq!(<Dynamic as FromDynamic>::param_type(), primitives::ANY);
    }
}

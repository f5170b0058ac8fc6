//! Type-erased callables.
//!
//! An [`Accessor`] wraps a typed Rust closure behind one calling convention:
//! an [`Instance`] plus a slice of argument slots. The conversion traits
//! ([`IntoFunction`], [`IntoMethod`], [`IntoMethodMut`]) are implemented for
//! closures of up to [`MAX_ARITY`] parameters and produce the accessor
//! together with its [`Signature`].
//!
//! # Example
//!
//! ```
//! use introspect_core::{Dynamic, Instance};
//! use introspect_registry::Accessor;
//!
//! let add = Accessor::function(|a: i32, b: i32| a + b);
//! assert!(add.is_static());
//! assert_eq!(add.signature().param_count(), 2);
//!
//! let (a, b) = (Dynamic::Int(2), Dynamic::Int(3));
//! let result = add.call(&mut Instance::empty(), &[&a, &b]).unwrap();
//! assert_eq!(result, Dynamic::Int(5));
//! ```

use std::fmt;

use introspect_core::{Dynamic, FromDynamic, Instance, IntoDynamic, InvokeError, Reflected};

use crate::signature::{Owner, Param, Signature};

/// Largest number of parameters a registered callable can take.
pub const MAX_ARITY: usize = 6;

/// Erased call: target instance plus positional argument slots.
pub type Thunk =
    Box<dyn Fn(&mut Instance<'_>, &[&Dynamic]) -> Result<Dynamic, InvokeError> + Send + Sync>;

/// Receiver shape of an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    /// No receiver; the instance is ignored.
    Function,
    /// `&self` receiver.
    Method,
    /// `&mut self` receiver.
    MethodMut,
}

/// A callable with a known signature.
pub struct Accessor {
    kind: AccessorKind,
    signature: Signature,
    thunk: Thunk,
}

impl Accessor {
    pub(crate) fn new(kind: AccessorKind, signature: Signature, thunk: Thunk) -> Self {
        Self {
            kind,
            signature,
            thunk,
        }
    }

    /// Wrap a free function or closure.
    pub fn function<Args, R>(f: impl IntoFunction<Args, R>) -> Self {
        f.into_accessor()
    }

    /// Wrap a closure taking `&T` as its first parameter.
    pub fn method<T, Args, R>(f: impl IntoMethod<T, Args, R>) -> Self {
        f.into_accessor()
    }

    /// Wrap a closure taking `&mut T` as its first parameter.
    pub fn method_mut<T, Args, R>(f: impl IntoMethodMut<T, Args, R>) -> Self {
        f.into_accessor()
    }

    pub fn kind(&self) -> AccessorKind {
        self.kind
    }

    pub fn is_static(&self) -> bool {
        self.kind == AccessorKind::Function
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Attach a static callable to the type that declares it.
    pub(crate) fn set_owner(&mut self, owner: Owner) {
        self.signature.set_owner(owner);
    }

    /// Call with exactly one slot per parameter.
    ///
    /// No default arguments are applied here; see
    /// [`MethodWrapper`](crate::MethodWrapper) for the full invocation rules.
    pub fn call(
        &self,
        instance: &mut Instance<'_>,
        args: &[&Dynamic],
    ) -> Result<Dynamic, InvokeError> {
        let expected = self.signature.param_count();
        if args.len() > expected {
            return Err(InvokeError::TooManyArguments {
                max: expected,
                supplied: args.len(),
            });
        }
        if args.len() < expected {
            return Err(InvokeError::MissingArguments {
                required: expected,
                supplied: args.len(),
            });
        }
        (self.thunk)(instance, args)
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("kind", &self.kind)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Conversion traits
// ============================================================================

/// Closures usable as static callables.
pub trait IntoFunction<Args, R> {
    fn into_accessor(self) -> Accessor;
}

/// Closures usable as `&self` methods of `T`.
pub trait IntoMethod<T, Args, R> {
    fn into_accessor(self) -> Accessor;
}

/// Closures usable as `&mut self` methods of `T`.
pub trait IntoMethodMut<T, Args, R> {
    fn into_accessor(self) -> Accessor;
}

/// Convert the slot at `index` to its parameter type.
#[inline]
fn arg<A: FromDynamic>(args: &[&Dynamic], index: usize) -> Result<A, InvokeError> {
    let value = args.get(index).ok_or(InvokeError::MissingArguments {
        required: index + 1,
        supplied: args.len(),
    })?;
    A::from_dynamic(value).map_err(|source| InvokeError::ArgumentMismatch { index, source })
}

macro_rules! impl_accessor_traits {
    ($($arg:ident $idx:tt),*) => {
        impl<F, R, $($arg,)*> IntoFunction<($($arg,)*), R> for F
        where
            F: Fn($($arg),*) -> R + Send + Sync + 'static,
            R: IntoDynamic + 'static,
            $($arg: FromDynamic,)*
        {
            fn into_accessor(self) -> Accessor {
                let signature = Signature::new::<R>(None, vec![$(Param::of::<$arg>()),*]);
                Accessor::new(
                    AccessorKind::Function,
                    signature,
                    Box::new(move |_instance: &mut Instance<'_>, args: &[&Dynamic]| {
                        let _ = args;
                        Ok((self)($(arg::<$arg>(args, $idx)?),*).into_dynamic())
                    }),
                )
            }
        }

        impl<T, F, R, $($arg,)*> IntoMethod<T, ($($arg,)*), R> for F
        where
            T: Reflected,
            F: Fn(&T, $($arg),*) -> R + Send + Sync + 'static,
            R: IntoDynamic + 'static,
            $($arg: FromDynamic,)*
        {
            fn into_accessor(self) -> Accessor {
                let signature =
                    Signature::new::<R>(Some(Owner::of::<T>()), vec![$(Param::of::<$arg>()),*]);
                Accessor::new(
                    AccessorKind::Method,
                    signature,
                    Box::new(move |instance: &mut Instance<'_>, args: &[&Dynamic]| {
                        let _ = args;
                        let this = instance.bind::<T>()?;
                        Ok((self)(this, $(arg::<$arg>(args, $idx)?),*).into_dynamic())
                    }),
                )
            }
        }

        impl<T, F, R, $($arg,)*> IntoMethodMut<T, ($($arg,)*), R> for F
        where
            T: Reflected,
            F: Fn(&mut T, $($arg),*) -> R + Send + Sync + 'static,
            R: IntoDynamic + 'static,
            $($arg: FromDynamic,)*
        {
            fn into_accessor(self) -> Accessor {
                let signature =
                    Signature::new::<R>(Some(Owner::of::<T>()), vec![$(Param::of::<$arg>()),*]);
                Accessor::new(
                    AccessorKind::MethodMut,
                    signature,
                    Box::new(move |instance: &mut Instance<'_>, args: &[&Dynamic]| {
                        let _ = args;
                        let this = instance.bind_mut::<T>()?;
                        Ok((self)(this, $(arg::<$arg>(args, $idx)?),*).into_dynamic())
                    }),
                )
            }
        }
    };
}

impl_accessor_traits!();
impl_accessor_traits!(A0 0);
impl_accessor_traits!(A0 0, A1 1);
impl_accessor_traits!(A0 0, A1 1, A2 2);
impl_accessor_traits!(A0 0, A1 1, A2 2, A3 3);
impl_accessor_traits!(A0 0, A1 1, A2 2, A3 3, A4 4);
impl_accessor_traits!(A0 0, A1 1, A2 2, A3 3, A4 4, A5 5);

#[cfg(test)]
mod tests {
    use super::*;
    use introspect_core::{ConversionError, TypeHash, primitives};

    #[derive(Debug, Default)]
    struct Counter {
        value: i64,
    }

    impl Reflected for Counter {
        fn type_hash() -> TypeHash {
            TypeHash::from_name("Counter")
        }

        fn type_name() -> &'static str {
            "Counter"
        }
    }

    #[test]
    fn function_binds_positionally() {
        let concat = Accessor::function(|a: String, n: u8, b: bool| format!("{a}{n}{b}"));
        assert_eq!(concat.kind(), AccessorKind::Function);
        assert_eq!(concat.signature().return_type(), primitives::STRING);

        let args = [Dynamic::from("x"), Dynamic::Int(7), Dynamic::Bool(false)];
        let slots: Vec<&Dynamic> = args.iter().collect();
        let result = concat.call(&mut Instance::empty(), &slots).unwrap();
        assert_eq!(result, Dynamic::from("x7false"));
    }

    #[test]
    fn argument_mismatch_reports_index() {
        let f = Accessor::function(|_a: i32, _b: i32| ());
        let (a, b) = (Dynamic::Int(1), Dynamic::from("no"));
        let err = f.call(&mut Instance::empty(), &[&a, &b]).unwrap_err();
        assert_eq!(
            err,
            InvokeError::ArgumentMismatch {
                index: 1,
                source: ConversionError::TypeMismatch {
                    expected: "int",
                    actual: "string",
                },
            }
        );
    }

    #[test]
    fn call_requires_exact_slot_count() {
        let f = Accessor::function(|a: i32| a);
        let one = Dynamic::Int(1);
        assert!(matches!(
            f.call(&mut Instance::empty(), &[]),
            Err(InvokeError::MissingArguments { required: 1, supplied: 0 })
        ));
        assert!(matches!(
            f.call(&mut Instance::empty(), &[&one, &one]),
            Err(InvokeError::TooManyArguments { max: 1, supplied: 2 })
        ));
    }

    #[test]
    fn static_function_ignores_instance() {
        let f = Accessor::function(|| 42i32);
        let counter = Counter::default();
        assert_eq!(f.call(&mut Instance::new(&counter), &[]).unwrap(), Dynamic::Int(42));
        assert_eq!(f.call(&mut Instance::empty(), &[]).unwrap(), Dynamic::Int(42));
    }

    #[test]
    fn method_checks_instance() {
        let get = Accessor::method(|c: &Counter| c.value);
        assert_eq!(get.kind(), AccessorKind::Method);
        assert_eq!(get.signature().owner(), Some(Owner::of::<Counter>()));

        let counter = Counter { value: 5 };
        assert_eq!(get.call(&mut Instance::new(&counter), &[]).unwrap(), Dynamic::Int(5));
        assert!(matches!(
            get.call(&mut Instance::empty(), &[]),
            Err(InvokeError::MissingInstance { expected: "Counter" })
        ));
        let other = 1u8;
        assert!(matches!(
            get.call(&mut Instance::new(&other), &[]),
            Err(InvokeError::InstanceMismatch { .. })
        ));
    }

    #[test]
    fn method_mut_updates_target() {
        let add = Accessor::method_mut(|c: &mut Counter, n: i64| {
            c.value += n;
            c.value
        });
        let mut counter = Counter { value: 1 };
        let n = Dynamic::Int(4);
        {
            let mut instance = Instance::new_mut(&mut counter);
            assert_eq!(add.call(&mut instance, &[&n]).unwrap(), Dynamic::Int(5));
        }
        assert_eq!(counter.value, 5);

        let shared = Counter::default();
        assert!(matches!(
            add.call(&mut Instance::new(&shared), &[&n]),
            Err(InvokeError::ReadOnlyInstance { .. })
        ));
    }

    #[test]
    fn six_parameters() {
        let sum = Accessor::function(|a: i8, b: i16, c: i32, d: i64, e: u8, f: u16| {
            a as i64 + b as i64 + c as i64 + d + e as i64 + f as i64
        });
        let args: Vec<Dynamic> = (1..=6).map(Dynamic::Int).collect();
        let slots: Vec<&Dynamic> = args.iter().collect();
        assert_eq!(sum.call(&mut Instance::empty(), &slots).unwrap(), Dynamic::Int(21));
        assert_eq!(sum.signature().param_count(), MAX_ARITY);
    }
}

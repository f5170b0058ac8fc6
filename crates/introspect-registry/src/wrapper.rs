//! Uniform invocation of registered callables.
//!
//! [`MethodWrapper`] pairs an [`Accessor`] with its [`DefaultArgs`] and
//! applies the invocation rules shared by every member kind:
//!
//! - more arguments than parameters fails with `TooManyArguments`
//! - fewer arguments than required parameters fails with `MissingArguments`
//! - missing trailing arguments are taken from the defaults
//! - static callables ignore the instance
//!
//! Arguments are passed as a tuple of up to six `&Dynamic` ([`invoke`]) or
//! as a slice ([`invoke_variadic`]). Both bind through a fixed-size stack
//! buffer, so a call never allocates for its argument list.
//!
//! [`invoke`]: MethodWrapper::invoke
//! [`invoke_variadic`]: MethodWrapper::invoke_variadic

use introspect_core::{Dynamic, Instance, InvokeError, RegistrationError, TypeHash};

use crate::accessor::{Accessor, MAX_ARITY};
use crate::default_args::DefaultArgs;
use crate::signature::Signature;

static VOID: Dynamic = Dynamic::Void;

// ============================================================================
// Argument tuples
// ============================================================================

/// A fixed-size argument list.
pub trait Args<'a> {
    /// Number of arguments.
    const LEN: usize;

    /// Write the arguments into the first `LEN` slots.
    fn fill(self, slots: &mut [&'a Dynamic; MAX_ARITY]);
}

macro_rules! impl_args {
    (@slot $name:ident) => { &'a Dynamic };
    ($len:literal; $($name:ident $idx:tt),*) => {
        impl<'a> Args<'a> for ($(impl_args!(@slot $name),)*) {
            const LEN: usize = $len;

            #[inline]
            fn fill(self, slots: &mut [&'a Dynamic; MAX_ARITY]) {
                let _ = &slots;
                $(slots[$idx] = self.$idx;)*
            }
        }
    };
}

impl_args!(0;);
impl_args!(1; a 0);
impl_args!(2; a 0, b 1);
impl_args!(3; a 0, b 1, c 2);
impl_args!(4; a 0, b 1, c 2, d 3);
impl_args!(5; a 0, b 1, c 2, d 3, e 4);
impl_args!(6; a 0, b 1, c 2, d 3, e 4, f 5);

// ============================================================================
// MethodWrapper
// ============================================================================

/// A callable plus the defaults for its trailing parameters.
///
/// Immutable after construction.
///
/// ```
/// use introspect_core::{Dynamic, Instance};
/// use introspect_registry::{Accessor, DefaultArgs, MethodWrapper};
///
/// let scale = MethodWrapper::new(
///     Accessor::function(|v: i32, by: i32| v * by),
///     DefaultArgs::new().with(2),
/// )
/// .unwrap();
///
/// let v = Dynamic::Int(21);
/// assert_eq!(scale.invoke(&mut Instance::empty(), (&v,)), Ok(Dynamic::Int(42)));
/// ```
#[derive(Debug)]
pub struct MethodWrapper {
    accessor: Accessor,
    defaults: DefaultArgs,
}

impl MethodWrapper {
    /// Wrap `accessor`, checking `defaults` against its parameters.
    pub fn new(accessor: Accessor, defaults: DefaultArgs) -> Result<Self, RegistrationError> {
        defaults.validate(accessor.signature())?;
        Ok(Self { accessor, defaults })
    }

    /// Wrap `accessor` with no default arguments.
    pub fn without_defaults(accessor: Accessor) -> Self {
        Self {
            accessor,
            defaults: DefaultArgs::new(),
        }
    }

    pub fn accessor(&self) -> &Accessor {
        &self.accessor
    }

    pub fn signature(&self) -> &Signature {
        self.accessor.signature()
    }

    pub fn defaults(&self) -> &DefaultArgs {
        &self.defaults
    }

    /// Whether the callable ignores the instance.
    pub fn is_static(&self) -> bool {
        self.accessor.is_static()
    }

    pub fn return_type(&self) -> TypeHash {
        self.signature().return_type()
    }

    /// Parameter types in declaration order.
    pub fn parameter_types(&self) -> Vec<TypeHash> {
        self.signature().params().iter().map(|p| p.type_hash).collect()
    }

    /// Per parameter, whether it is passed by reference.
    pub fn is_reference(&self) -> Vec<bool> {
        self.signature().params().iter().map(|p| p.is_reference()).collect()
    }

    /// Per parameter, whether it is a const reference.
    pub fn is_const(&self) -> Vec<bool> {
        self.signature().params().iter().map(|p| p.is_const()).collect()
    }

    /// Total number of parameters.
    pub fn param_count(&self) -> usize {
        self.signature().param_count()
    }

    /// Number of parameters without a default.
    pub fn required_count(&self) -> usize {
        self.param_count() - self.defaults.len()
    }

    /// Invoke with a tuple of up to six arguments.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn invoke<'a, A: Args<'a>>(
        &self,
        instance: &mut Instance<'_>,
        args: A,
    ) -> Result<Dynamic, InvokeError> {
        let mut supplied: [&'a Dynamic; MAX_ARITY] = [&VOID; MAX_ARITY];
        args.fill(&mut supplied);
        self.dispatch(instance, &supplied[..A::LEN])
    }

    /// Invoke with any number of arguments.
    ///
    /// Fails with `TooManyArguments` when `args` is longer than the
    /// parameter list.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn invoke_variadic(
        &self,
        instance: &mut Instance<'_>,
        args: &[Dynamic],
    ) -> Result<Dynamic, InvokeError> {
        let params = self.param_count();
        if args.len() > params {
            return Err(InvokeError::TooManyArguments {
                max: params,
                supplied: args.len(),
            });
        }
        let mut supplied: [&Dynamic; MAX_ARITY] = [&VOID; MAX_ARITY];
        for (slot, value) in supplied.iter_mut().zip(args) {
            *slot = value;
        }
        self.dispatch(instance, &supplied[..args.len()])
    }

    fn dispatch(
        &self,
        instance: &mut Instance<'_>,
        supplied: &[&Dynamic],
    ) -> Result<Dynamic, InvokeError> {
        let params = self.param_count();
        let required = self.required_count();
        let n = supplied.len();
        if n > params {
            return Err(InvokeError::TooManyArguments {
                max: params,
                supplied: n,
            });
        }
        if n < required {
            return Err(InvokeError::MissingArguments {
                required,
                supplied: n,
            });
        }

        let mut slots: [&Dynamic; MAX_ARITY] = [&VOID; MAX_ARITY];
        slots[..n].copy_from_slice(supplied);
        // Parameter j >= n takes defaults[j - required].
        for (slot, value) in slots[n..params]
            .iter_mut()
            .zip(&self.defaults.values()[n - required..])
        {
            *slot = value;
        }
        self.accessor.call(instance, &slots[..params])
    }
}

//! Type-erased value container used for arguments and return values.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{Reflected, TypeHash};

/// A dynamically typed value.
///
/// Primitives are stored inline; every other registered type is stored as a
/// shared [`NativeValue`]. Cloning is cheap: native values are reference
/// counted, so default arguments and return values can be handed out without
/// copying the underlying object.
///
/// `Dynamic::Void` is the result of callables returning `()`. It is a value,
/// not a failure: failed invocations are reported through `Err`.
#[derive(Clone, Default)]
pub enum Dynamic {
    /// Void/empty
    #[default]
    Void,
    /// Integer value (all fixed-width integers are stored as i64)
    Int(i64),
    /// Unsigned value above `i64::MAX`
    UInt(u64),
    /// Floating point value (f32 and f64 are stored as f64)
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// String value (owned)
    String(String),
    /// Any other registered type
    Native(NativeValue),
}

impl Dynamic {
    /// Wrap a registered value as a native dynamic.
    pub fn native<T: Reflected + Send + Sync>(value: T) -> Self {
        Dynamic::Native(NativeValue::new(value))
    }

    /// Get a human-readable name for the held type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Dynamic::Void => "void",
            Dynamic::Int(_) => "int",
            Dynamic::UInt(_) => "uint64",
            Dynamic::Float(_) => "float",
            Dynamic::Bool(_) => "bool",
            Dynamic::String(_) => "string",
            Dynamic::Native(n) => n.type_name(),
        }
    }

    /// Check if this value is void.
    pub fn is_void(&self) -> bool {
        matches!(self, Dynamic::Void)
    }

    /// Borrow the native payload, if any.
    pub fn as_native(&self) -> Option<&NativeValue> {
        match self {
            Dynamic::Native(n) => Some(n),
            _ => None,
        }
    }

    /// Borrow the payload as `T` when it is a native value of that type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_native()?.downcast_ref::<T>()
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Void => write!(f, "Void"),
            Dynamic::Int(v) => write!(f, "Int({})", v),
            Dynamic::UInt(v) => write!(f, "UInt({})", v),
            Dynamic::Float(v) => write!(f, "Float({})", v),
            Dynamic::Bool(v) => write!(f, "Bool({})", v),
            Dynamic::String(s) => write!(f, "String({:?})", s),
            Dynamic::Native(n) => write!(f, "Native({})", n.type_name()),
        }
    }
}

impl PartialEq for Dynamic {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Dynamic::Void, Dynamic::Void) => true,
            (Dynamic::Int(a), Dynamic::Int(b)) => a == b,
            (Dynamic::UInt(a), Dynamic::UInt(b)) => a == b,
            (Dynamic::Int(a), Dynamic::UInt(b)) | (Dynamic::UInt(b), Dynamic::Int(a)) => {
                u64::try_from(*a) == Ok(*b)
            }
            (Dynamic::Float(a), Dynamic::Float(b)) => a == b,
            (Dynamic::Bool(a), Dynamic::Bool(b)) => a == b,
            (Dynamic::String(a), Dynamic::String(b)) => a == b,
            // Native values compare by identity
            (Dynamic::Native(a), Dynamic::Native(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

macro_rules! impl_from_for_dynamic {
    ($($ty:ty => $variant:ident as $store:ty),* $(,)?) => {
        $(
            impl From<$ty> for Dynamic {
                fn from(value: $ty) -> Self {
                    Dynamic::$variant(value as $store)
                }
            }
        )*
    };
}

impl_from_for_dynamic!(
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float as f64,
);

impl From<u64> for Dynamic {
    fn from(value: u64) -> Self {
        i64::try_from(value).map_or(Dynamic::UInt(value), Dynamic::Int)
    }
}

impl From<bool> for Dynamic {
    fn from(value: bool) -> Self {
        Dynamic::Bool(value)
    }
}

impl From<String> for Dynamic {
    fn from(value: String) -> Self {
        Dynamic::String(value)
    }
}

impl From<&str> for Dynamic {
    fn from(value: &str) -> Self {
        Dynamic::String(value.to_string())
    }
}

impl From<()> for Dynamic {
    fn from(_: ()) -> Self {
        Dynamic::Void
    }
}

impl From<NativeValue> for Dynamic {
    fn from(value: NativeValue) -> Self {
        Dynamic::Native(value)
    }
}

/// A shared, type-tagged registered value.
#[derive(Clone)]
pub struct NativeValue {
    type_hash: TypeHash,
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync>,
}

impl NativeValue {
    /// Move a value into a new native payload.
    pub fn new<T: Reflected + Send + Sync>(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Share an existing `Arc` as a native payload.
    pub fn from_arc<T: Reflected + Send + Sync>(value: Arc<T>) -> Self {
        Self {
            type_hash: T::type_hash(),
            type_name: T::type_name(),
            value,
        }
    }

    /// Reflected identity of the payload.
    pub fn type_hash(&self) -> TypeHash {
        self.type_hash
    }

    /// Reflected name of the payload.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check whether the payload is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Get a new strong reference to the payload as `T`.
    pub fn downcast_arc<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.value).downcast::<T>().ok()
    }

    /// Borrow the payload as `dyn Any`.
    pub fn as_any(&self) -> &(dyn Any + Send + Sync) {
        &*self.value
    }

    /// Whether both handles share the same allocation.
    pub fn ptr_eq(&self, other: &NativeValue) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for NativeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeValue")
            .field("type_name", &self.type_name)
            .field("type_hash", &self.type_hash)
            .finish_non_exhaustive()
    }
}

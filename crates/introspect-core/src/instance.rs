//! Type-erased target of a member invocation.

use std::any::{Any, TypeId};
use std::fmt;

use crate::error::InvokeError;
use crate::{Dynamic, Reflected};

/// The object a member is invoked on.
///
/// An instance is either empty (for static members), a shared borrow, or an
/// exclusive borrow. `&self` members accept both borrow kinds; `&mut self`
/// members require an exclusive one.
///
/// ```
/// use introspect_core::Instance;
///
/// let mut counter = 3u32;
/// let mut instance = Instance::new_mut(&mut counter);
/// *instance.downcast_mut::<u32>().unwrap() += 1;
/// assert_eq!(counter, 4);
/// ```
#[derive(Default)]
pub struct Instance<'a> {
    target: Target<'a>,
}

#[derive(Default)]
enum Target<'a> {
    #[default]
    Empty,
    Shared(&'a dyn Any),
    Exclusive(&'a mut dyn Any),
}

impl<'a> Instance<'a> {
    /// An instance with no target, used for static members.
    pub fn empty() -> Self {
        Self {
            target: Target::Empty,
        }
    }

    /// Borrow `value` as a shared target.
    pub fn new<T: Any>(value: &'a T) -> Self {
        Self {
            target: Target::Shared(value),
        }
    }

    /// Borrow `value` as an exclusive target.
    pub fn new_mut<T: Any>(value: &'a mut T) -> Self {
        Self {
            target: Target::Exclusive(value),
        }
    }

    /// Use the payload of a dynamic as a shared target.
    ///
    /// `Void` produces an empty instance.
    pub fn from_dynamic(value: &'a Dynamic) -> Self {
        let target: Target<'a> = match value {
            Dynamic::Void => Target::Empty,
            Dynamic::Int(v) => Target::Shared(v),
            Dynamic::UInt(v) => Target::Shared(v),
            Dynamic::Float(v) => Target::Shared(v),
            Dynamic::Bool(v) => Target::Shared(v),
            Dynamic::String(s) => Target::Shared(s),
            Dynamic::Native(n) => Target::Shared(n.as_any()),
        };
        Self { target }
    }

    /// Check if there is no target.
    pub fn is_empty(&self) -> bool {
        matches!(self.target, Target::Empty)
    }

    /// Check if the target is borrowed exclusively.
    pub fn is_exclusive(&self) -> bool {
        matches!(self.target, Target::Exclusive(_))
    }

    /// Runtime type of the target.
    pub fn type_id(&self) -> Option<TypeId> {
        match &self.target {
            Target::Empty => None,
            Target::Shared(value) => Some((**value).type_id()),
            Target::Exclusive(value) => Some((**value).type_id()),
        }
    }

    /// Check if the target is a `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.type_id() == Some(TypeId::of::<T>())
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match &self.target {
            Target::Empty => None,
            Target::Shared(value) => value.downcast_ref::<T>(),
            Target::Exclusive(value) => value.downcast_ref::<T>(),
        }
    }

    /// Mutable access, available only for exclusive targets.
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        match &mut self.target {
            Target::Exclusive(value) => value.downcast_mut::<T>(),
            _ => None,
        }
    }

    /// Bind the target as the receiver of a `&self` member of `T`.
    pub fn bind<T: Reflected>(&self) -> Result<&T, InvokeError> {
        match &self.target {
            Target::Empty => Err(InvokeError::MissingInstance {
                expected: T::type_name(),
            }),
            _ => self
                .downcast_ref::<T>()
                .ok_or(InvokeError::InstanceMismatch {
                    expected: T::type_name(),
                }),
        }
    }

    /// Bind the target as the receiver of a `&mut self` member of `T`.
    pub fn bind_mut<T: Reflected>(&mut self) -> Result<&mut T, InvokeError> {
        match &mut self.target {
            Target::Empty => Err(InvokeError::MissingInstance {
                expected: T::type_name(),
            }),
            Target::Shared(value) if value.is::<T>() => Err(InvokeError::ReadOnlyInstance {
                expected: T::type_name(),
            }),
            Target::Shared(_) => Err(InvokeError::InstanceMismatch {
                expected: T::type_name(),
            }),
            Target::Exclusive(value) => value
                .downcast_mut::<T>()
                .ok_or(InvokeError::InstanceMismatch {
                    expected: T::type_name(),
                }),
        }
    }
}

impl fmt::Debug for Instance<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.target {
            Target::Empty => "empty",
            Target::Shared(_) => "shared",
            Target::Exclusive(_) => "exclusive",
        };
        f.debug_struct("Instance").field("target", &kind).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TypeHash;

    struct Counter(u32);

    impl Reflected for Counter {
        fn type_hash() -> TypeHash {
            TypeHash::from_name("Counter")
        }

        fn type_name() -> &'static str {
            "Counter"
        }
    }

    #[test]
    fn empty_instance() {
        let instance = Instance::empty();
        assert!(instance.is_empty());
        assert!(instance.type_id().is_none());
        assert!(matches!(
            instance.bind::<Counter>(),
            Err(InvokeError::MissingInstance { expected: "Counter" })
        ));
    }

    #[test]
    fn shared_binding() {
        let counter = Counter(7);
        let instance = Instance::new(&counter);
        assert!(instance.is::<Counter>());
        assert!(!instance.is_exclusive());
        assert_eq!(instance.bind::<Counter>().unwrap().0, 7);
        assert!(matches!(
            instance.bind::<String>(),
            Err(InvokeError::InstanceMismatch { expected: "string" })
        ));
    }

    #[test]
    fn shared_instance_rejects_mutation() {
        let counter = Counter(1);
        let mut instance = Instance::new(&counter);
        assert!(matches!(
            instance.bind_mut::<Counter>(),
            Err(InvokeError::ReadOnlyInstance { .. })
        ));
        assert!(matches!(
            instance.bind_mut::<String>(),
            Err(InvokeError::InstanceMismatch { .. })
        ));
        assert!(instance.downcast_mut::<Counter>().is_none());
    }

    #[test]
    fn exclusive_binding() {
        let mut counter = Counter(1);
        {
            let mut instance = Instance::new_mut(&mut counter);
            assert!(instance.is_exclusive());
            instance.bind_mut::<Counter>().unwrap().0 += 10;
            assert_eq!(instance.bind::<Counter>().unwrap().0, 11);
            assert!(matches!(
                instance.bind_mut::<String>(),
                Err(InvokeError::InstanceMismatch { expected: "string" })
            ));
        }
        assert_eq!(counter.0, 11);
    }

    #[test]
    fn from_dynamic_targets() {
        let native = Dynamic::native(Counter(3));
        assert_eq!(Instance::from_dynamic(&native).bind::<Counter>().unwrap().0, 3);

        let int = Dynamic::Int(5);
        assert_eq!(Instance::from_dynamic(&int).downcast_ref::<i64>(), Some(&5));

        assert!(Instance::from_dynamic(&Dynamic::Void).is_empty());
    }

    #[test]
    fn debug_names_target_kind() {
        let value = 1u8;
        assert!(format!("{:?}", Instance::new(&value)).contains("shared"));
        assert!(format!("{:?}", Instance::empty()).contains("empty"));
    }
}

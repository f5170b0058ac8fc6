//! TypeRegistry - classes and global functions.
//!
//! # Storage Model
//!
//! - **Classes**: stored in registration order in a `Vec`, indexed by
//!   `TypeHash` and by name. [`classes`](TypeRegistry::classes) returns a
//!   range over the `Vec` directly.
//! - **Functions**: global functions are [`Method`]s without an owner, stored
//!   the same way and indexed by name.
//!
//! # Thread Safety
//!
//! Registration takes `&mut self` and every lookup or invocation takes
//! `&self`, so the borrow checker keeps registration and reads apart. A fully
//! built registry is `Send + Sync` and can be shared behind an `Arc`.
//!
//! # Example
//!
//! ```
//! use introspect_core::Dynamic;
//! use introspect_registry::TypeRegistry;
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_function("add", |a: i32, b: i32| a + b)?;
//!
//! let sum = registry.invoke_function("add", &[Dynamic::Int(2), Dynamic::Int(3)]);
//! assert_eq!(sum, Ok(Dynamic::Int(5)));
//! # Ok::<(), introspect_core::RegistrationError>(())
//! ```

use rustc_hash::FxHashMap;

use introspect_core::{
    ArrayRange, Dynamic, FnPredicate, Instance, InvokeError, Reflected, RegistrationError,
    TypeHash,
};

use crate::accessor::IntoFunction;
use crate::class::ClassEntry;
use crate::class_builder::{ClassBuilder, MemberDecl};
use crate::descriptors::Method;
use crate::wrapper::MethodWrapper;

/// Registry of reflected classes and global functions.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    classes: Vec<ClassEntry>,
    /// Index into `classes` by type hash.
    class_by_hash: FxHashMap<TypeHash, usize>,
    /// Index into `classes` by name.
    class_by_name: FxHashMap<String, usize>,

    functions: Vec<Method>,
    /// Index into `functions` by name.
    function_by_name: FxHashMap<String, usize>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ==========================================================================
    // Registration
    // ==========================================================================

    /// Start registering the class `T`.
    pub fn register_class<T: Reflected>(&mut self) -> ClassBuilder<'_, T> {
        ClassBuilder::new(self)
    }

    pub(crate) fn insert_class(&mut self, entry: ClassEntry) -> Result<(), RegistrationError> {
        if self.class_by_hash.contains_key(&entry.type_hash())
            || self.class_by_name.contains_key(entry.name())
        {
            let err = RegistrationError::DuplicateType {
                name: entry.name().to_string(),
            };
            tracing::warn!(error = %err, "class rejected");
            return Err(err);
        }

        tracing::debug!(
            class = entry.name(),
            methods = entry.methods().len(),
            properties = entry.properties().len(),
            constructors = entry.constructors().len(),
            "registered class"
        );
        let index = self.classes.len();
        self.class_by_hash.insert(entry.type_hash(), index);
        self.class_by_name.insert(entry.name().to_string(), index);
        self.classes.push(entry);
        Ok(())
    }

    /// Register a global function.
    pub fn register_function<F, Args, R>(
        &mut self,
        decl: impl Into<MemberDecl>,
        f: F,
    ) -> Result<(), RegistrationError>
    where
        F: IntoFunction<Args, R>,
    {
        let decl = decl.into();
        if self.function_by_name.contains_key(decl.name()) {
            let err = RegistrationError::DuplicateFunction {
                name: decl.name().to_string(),
            };
            tracing::warn!(error = %err, "function rejected");
            return Err(err);
        }

        let (name, visibility, defaults) = decl.into_parts();
        let wrapper = MethodWrapper::new(f.into_accessor(), defaults).inspect_err(|err| {
            tracing::warn!(function = %name, error = %err, "function rejected");
        })?;
        tracing::debug!(function = %name, params = wrapper.param_count(), "registered function");

        self.function_by_name.insert(name.clone(), self.functions.len());
        self.functions.push(Method::new(name, visibility, wrapper));
        Ok(())
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    /// Look up the class registered for `T`.
    pub fn class<T: Reflected>(&self) -> Option<&ClassEntry> {
        self.class_by_hash(T::type_hash())
    }

    pub fn class_by_hash(&self, hash: TypeHash) -> Option<&ClassEntry> {
        self.class_by_hash.get(&hash).map(|&i| &self.classes[i])
    }

    pub fn class_by_name(&self, name: &str) -> Option<&ClassEntry> {
        self.class_by_name.get(name).map(|&i| &self.classes[i])
    }

    /// All classes in registration order.
    pub fn classes(&self) -> ArrayRange<'_, ClassEntry> {
        ArrayRange::new(&self.classes)
    }

    /// All global functions in registration order.
    pub fn functions(&self) -> ArrayRange<'_, Method> {
        ArrayRange::new(&self.functions)
    }

    pub fn public_functions(&self) -> ArrayRange<'_, Method, FnPredicate<Method>> {
        ArrayRange::with_predicate(&self.functions, Method::is_public as FnPredicate<Method>)
    }

    pub fn function(&self, name: &str) -> Option<&Method> {
        self.function_by_name.get(name).map(|&i| &self.functions[i])
    }

    /// Look up a global function by name and invoke it.
    pub fn invoke_function(&self, name: &str, args: &[Dynamic]) -> Result<Dynamic, InvokeError> {
        let function = self.function(name).ok_or_else(|| {
            tracing::trace!(function = name, "unknown function");
            InvokeError::UnknownMember {
                name: name.to_string(),
            }
        })?;
        function.invoke_variadic(&mut Instance::empty(), args)
    }
}

//! Registered classes and their member tables.

use std::any::TypeId;

use introspect_core::{ArrayRange, Dynamic, FnPredicate, Instance, InvokeError, TypeHash};

use crate::descriptors::{Constructor, Method, Property};

/// Range over the public members of a table.
pub type PublicRange<'a, T> = ArrayRange<'a, T, FnPredicate<T>>;

/// A registered type with its methods, properties and constructors.
///
/// Member tables are fixed once the class is built; ranges borrow them
/// directly.
#[derive(Debug)]
pub struct ClassEntry {
    name: String,
    type_hash: TypeHash,
    type_id: TypeId,
    methods: Vec<Method>,
    properties: Vec<Property>,
    constructors: Vec<Constructor>,
}

impl ClassEntry {
    pub(crate) fn new(
        name: String,
        type_hash: TypeHash,
        type_id: TypeId,
        methods: Vec<Method>,
        properties: Vec<Property>,
        constructors: Vec<Constructor>,
    ) -> Self {
        Self {
            name,
            type_hash,
            type_id,
            methods,
            properties,
            constructors,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_hash(&self) -> TypeHash {
        self.type_hash
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    // ==========================================================================
    // Ranges
    // ==========================================================================

    /// All methods in registration order.
    pub fn methods(&self) -> ArrayRange<'_, Method> {
        ArrayRange::new(&self.methods)
    }

    pub fn public_methods(&self) -> PublicRange<'_, Method> {
        ArrayRange::with_predicate(&self.methods, Method::is_public as FnPredicate<Method>)
    }

    /// Methods that ignore the instance.
    pub fn static_methods(&self) -> ArrayRange<'_, Method, FnPredicate<Method>> {
        ArrayRange::with_predicate(&self.methods, Method::is_static as FnPredicate<Method>)
    }

    pub fn properties(&self) -> ArrayRange<'_, Property> {
        ArrayRange::new(&self.properties)
    }

    pub fn public_properties(&self) -> PublicRange<'_, Property> {
        ArrayRange::with_predicate(
            &self.properties,
            Property::is_public as FnPredicate<Property>,
        )
    }

    pub fn constructors(&self) -> ArrayRange<'_, Constructor> {
        ArrayRange::new(&self.constructors)
    }

    pub fn public_constructors(&self) -> PublicRange<'_, Constructor> {
        ArrayRange::with_predicate(
            &self.constructors,
            Constructor::is_public as FnPredicate<Constructor>,
        )
    }

    // ==========================================================================
    // Lookup
    // ==========================================================================

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods().find_by(|m| m.name() == name)
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties().find_by(|p| p.name() == name)
    }

    /// Constructor whose parameter types match `params` exactly.
    pub fn constructor(&self, params: &[TypeHash]) -> Option<&Constructor> {
        let hash = TypeHash::from_constructor(self.type_hash, params);
        self.constructors().find_by(|c| c.hash() == hash)
    }

    /// Look up a method by name and invoke it with any number of arguments.
    pub fn invoke_method(
        &self,
        name: &str,
        instance: &mut Instance<'_>,
        args: &[Dynamic],
    ) -> Result<Dynamic, InvokeError> {
        self.method(name)
            .ok_or_else(|| InvokeError::UnknownMember {
                name: name.to_string(),
            })?
            .invoke_variadic(instance, args)
    }

    /// Construct with the first constructor accepting `args`.
    pub fn create(&self, args: &[Dynamic]) -> Result<Dynamic, InvokeError> {
        let mut last_err = InvokeError::UnknownMember {
            name: self.name.clone(),
        };
        for ctor in self.constructors() {
            match ctor.create(args) {
                Ok(value) => return Ok(value),
                Err(err) => last_err = err,
            }
        }
        Err(last_err)
    }
}

use introspect_core::{Dynamic, Instance, InvokeError, TypeHash};

use crate::visibility::Visibility;
use crate::wrapper::MethodWrapper;

/// A registered property: a getter and an optional setter.
///
/// The getter takes no arguments; the setter takes the new value.
#[derive(Debug)]
pub struct Property {
    name: String,
    hash: TypeHash,
    visibility: Visibility,
    getter: MethodWrapper,
    setter: Option<MethodWrapper>,
}

impl Property {
    pub fn new(
        name: impl Into<String>,
        visibility: Visibility,
        getter: MethodWrapper,
        setter: Option<MethodWrapper>,
    ) -> Self {
        let name = name.into();
        let owner = getter
            .signature()
            .owner()
            .map_or(TypeHash::EMPTY, |owner| owner.type_hash);
        Self {
            hash: TypeHash::from_member(owner, &name),
            name,
            visibility,
            getter,
            setter,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hash(&self) -> TypeHash {
        self.hash
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility.is_public()
    }

    pub fn is_readonly(&self) -> bool {
        self.setter.is_none()
    }

    pub fn is_static(&self) -> bool {
        self.getter.is_static()
    }

    /// Type produced by the getter.
    pub fn value_type(&self) -> TypeHash {
        self.getter.return_type()
    }

    pub fn getter(&self) -> &MethodWrapper {
        &self.getter
    }

    pub fn setter(&self) -> Option<&MethodWrapper> {
        self.setter.as_ref()
    }

    /// Read the property from `instance`.
    pub fn get(&self, instance: &mut Instance<'_>) -> Result<Dynamic, InvokeError> {
        self.getter.invoke(instance, ()).inspect_err(|err| {
            tracing::trace!(property = %self.name, error = %err, "property read failed");
        })
    }

    /// Write `value` to the property on `instance`.
    pub fn set(&self, instance: &mut Instance<'_>, value: &Dynamic) -> Result<(), InvokeError> {
        let setter = self.setter.as_ref().ok_or_else(|| InvokeError::ReadOnlyProperty {
            name: self.name.clone(),
        });
        setter
            .and_then(|setter| setter.invoke(instance, (value,)))
            .map(drop)
            .inspect_err(|err| {
                tracing::trace!(property = %self.name, error = %err, "property write failed");
            })
    }
}

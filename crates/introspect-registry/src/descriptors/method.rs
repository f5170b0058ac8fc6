use introspect_core::{Dynamic, Instance, InvokeError, TypeHash};

use crate::signature::Signature;
use crate::visibility::Visibility;
use crate::wrapper::{Args, MethodWrapper};

/// A registered method or global function.
#[derive(Debug)]
pub struct Method {
    name: String,
    hash: TypeHash,
    visibility: Visibility,
    wrapper: MethodWrapper,
}

impl Method {
    pub fn new(name: impl Into<String>, visibility: Visibility, wrapper: MethodWrapper) -> Self {
        let name = name.into();
        let owner = wrapper
            .signature()
            .owner()
            .map_or(TypeHash::EMPTY, |owner| owner.type_hash);
        Self {
            hash: TypeHash::from_member(owner, &name),
            name,
            visibility,
            wrapper,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity derived from the owner and the name.
    pub fn hash(&self) -> TypeHash {
        self.hash
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility.is_public()
    }

    /// Name of the declaring type, `None` for global functions.
    pub fn owner_name(&self) -> Option<&'static str> {
        self.wrapper.signature().owner().map(|owner| owner.name)
    }

    pub fn wrapper(&self) -> &MethodWrapper {
        &self.wrapper
    }

    pub fn signature(&self) -> &Signature {
        self.wrapper.signature()
    }

    pub fn is_static(&self) -> bool {
        self.wrapper.is_static()
    }

    pub fn return_type(&self) -> TypeHash {
        self.wrapper.return_type()
    }

    pub fn parameter_types(&self) -> Vec<TypeHash> {
        self.wrapper.parameter_types()
    }

    pub fn is_reference(&self) -> Vec<bool> {
        self.wrapper.is_reference()
    }

    pub fn is_const(&self) -> Vec<bool> {
        self.wrapper.is_const()
    }

    pub fn invoke<'a, A: Args<'a>>(
        &self,
        instance: &mut Instance<'_>,
        args: A,
    ) -> Result<Dynamic, InvokeError> {
        self.wrapper
            .invoke(instance, args)
            .inspect_err(|err| self.trace_failure(err))
    }

    pub fn invoke_variadic(
        &self,
        instance: &mut Instance<'_>,
        args: &[Dynamic],
    ) -> Result<Dynamic, InvokeError> {
        self.wrapper
            .invoke_variadic(instance, args)
            .inspect_err(|err| self.trace_failure(err))
    }

    fn trace_failure(&self, err: &InvokeError) {
        tracing::trace!(
            method = %self.name,
            owner = self.owner_name().unwrap_or("<global>"),
            error = %err,
            "method invocation failed"
        );
    }
}

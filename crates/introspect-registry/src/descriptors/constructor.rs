use introspect_core::{Dynamic, Instance, InvokeError, TypeHash};

use crate::visibility::Visibility;
use crate::wrapper::{Args, MethodWrapper};

/// A registered constructor.
///
/// Constructors are static callables; the produced value is returned as a
/// [`Dynamic`], usually a native one.
#[derive(Debug)]
pub struct Constructor {
    owner: &'static str,
    hash: TypeHash,
    visibility: Visibility,
    wrapper: MethodWrapper,
}

impl Constructor {
    pub fn new(
        owner: &'static str,
        owner_hash: TypeHash,
        visibility: Visibility,
        wrapper: MethodWrapper,
    ) -> Self {
        Self {
            owner,
            hash: TypeHash::from_constructor(owner_hash, &wrapper.parameter_types()),
            visibility,
            wrapper,
        }
    }

    /// Name of the constructed type.
    pub fn owner_name(&self) -> &'static str {
        self.owner
    }

    /// Identity derived from the owner and the parameter types.
    pub fn hash(&self) -> TypeHash {
        self.hash
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility.is_public()
    }

    pub fn wrapper(&self) -> &MethodWrapper {
        &self.wrapper
    }

    pub fn parameter_types(&self) -> Vec<TypeHash> {
        self.wrapper.parameter_types()
    }

    /// Construct from a fixed argument tuple.
    pub fn invoke<'a, A: Args<'a>>(&self, args: A) -> Result<Dynamic, InvokeError> {
        self.wrapper
            .invoke(&mut Instance::empty(), args)
            .inspect_err(|err| self.trace_failure(err))
    }

    /// Construct from any number of arguments.
    pub fn create(&self, args: &[Dynamic]) -> Result<Dynamic, InvokeError> {
        self.wrapper
            .invoke_variadic(&mut Instance::empty(), args)
            .inspect_err(|err| self.trace_failure(err))
    }

    fn trace_failure(&self, err: &InvokeError) {
        tracing::trace!(owner = self.owner, error = %err, "constructor invocation failed");
    }
}

//! Signature metadata derived from a callable's Rust type.

use std::fmt;

use introspect_core::{
    ConversionError, Dynamic, FromDynamic, IntoDynamic, ParamFlags, Reflected, TypeHash,
};

/// Type owning a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
    pub type_hash: TypeHash,
    pub name: &'static str,
}

impl Owner {
    pub fn of<T: Reflected>() -> Self {
        Self {
            type_hash: T::type_hash(),
            name: T::type_name(),
        }
    }
}

/// Checks that a dynamic converts to a parameter's type.
pub type ParamCheck = fn(&Dynamic) -> Result<(), ConversionError>;

fn check<A: FromDynamic>(value: &Dynamic) -> Result<(), ConversionError> {
    A::from_dynamic(value).map(drop)
}

/// A formal parameter.
#[derive(Clone, Copy)]
pub struct Param {
    pub type_hash: TypeHash,
    pub type_name: &'static str,
    pub flags: ParamFlags,
    check: ParamCheck,
}

impl Param {
    /// Describe a parameter of type `A`.
    pub fn of<A: FromDynamic>() -> Self {
        Self {
            type_hash: A::param_type(),
            type_name: A::param_type_name(),
            flags: A::FLAGS,
            check: check::<A>,
        }
    }

    pub fn is_reference(&self) -> bool {
        self.flags.contains(ParamFlags::REFERENCE)
    }

    pub fn is_const(&self) -> bool {
        self.flags.contains(ParamFlags::CONST)
    }

    /// Check whether `value` would bind to this parameter.
    pub fn accepts(&self, value: &Dynamic) -> Result<(), ConversionError> {
        (self.check)(value)
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Param")
            .field("type_name", &self.type_name)
            .field("flags", &self.flags)
            .finish()
    }
}

/// Owner, parameters and return type of a callable.
#[derive(Debug, Clone)]
pub struct Signature {
    owner: Option<Owner>,
    return_type: TypeHash,
    return_type_name: &'static str,
    params: Vec<Param>,
}

impl Signature {
    /// Signature of a callable returning `R`.
    pub fn new<R: IntoDynamic>(owner: Option<Owner>, params: Vec<Param>) -> Self {
        Self {
            owner,
            return_type: R::return_type(),
            return_type_name: R::return_type_name(),
            params,
        }
    }

    pub fn owner(&self) -> Option<Owner> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Owner) {
        self.owner = Some(owner);
    }

    pub fn return_type(&self) -> TypeHash {
        self.return_type
    }

    pub fn return_type_name(&self) -> &'static str {
        self.return_type_name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn param_count(&self) -> usize {
        self.params.len()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.return_type_name)?;
        if let Some(owner) = self.owner {
            write!(f, "{}::", owner.name)?;
        }
        write!(f, "(")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if param.is_const() {
                write!(f, "const ")?;
            }
            write!(f, "{}", param.type_name)?;
            if param.is_reference() {
                write!(f, "&")?;
            }
        }
        write!(f, ")")
    }
}

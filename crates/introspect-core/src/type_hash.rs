//! Deterministic hash-based type identity.
//!
//! [`TypeHash`] is a 64-bit hash computed from a type's reflected name, so the
//! same name always yields the same identity regardless of registration order.
//! Member hashes (methods, properties, constructors) mix the owner hash with a
//! domain constant so that a method and a property sharing a name never collide.
//!
//! # Examples
//!
//! ```
//! use introspect_core::TypeHash;
//!
//! let a = TypeHash::from_name("Vec3");
//! let b = TypeHash::from_name("Vec3");
//! assert_eq!(a, b);
//!
//! let length = TypeHash::from_member(a, "length");
//! assert_ne!(length, a);
//! ```

use std::fmt;

use xxhash_rust::const_xxh64::xxh64;

/// Domain-specific mixing constants for hash computation.
pub mod hash_constants {
    /// Domain marker for type hashes
    pub const TYPE: u64 = 0x2fac10b63a6cc57c;

    /// Domain marker for member hashes (methods and properties)
    pub const MEMBER: u64 = 0x7d3c8b4a92e15f6d;

    /// Domain marker for constructor hashes
    pub const CONSTRUCTOR: u64 = 0x9a7f3d5e2b8c4601;

    /// Separator used to make parameter order significant
    pub const SEP: u64 = 0x4bc94d6bd06053ad;
}

/// A deterministic 64-bit hash identifying a reflected type or member.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Empty/invalid hash constant.
    pub const EMPTY: TypeHash = TypeHash(0);

    /// Create a type hash from a reflected type name.
    #[inline]
    pub const fn from_name(name: &str) -> Self {
        TypeHash(hash_constants::TYPE ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a member hash from the owning type and the member name.
    #[inline]
    pub const fn from_member(owner: TypeHash, name: &str) -> Self {
        TypeHash(hash_constants::MEMBER ^ owner.0 ^ xxh64(name.as_bytes(), 0))
    }

    /// Create a constructor hash from the owning type and its parameter types.
    ///
    /// Parameter order matters: `(int, float)` and `(float, int)` differ.
    #[inline]
    pub fn from_constructor(owner: TypeHash, params: &[TypeHash]) -> Self {
        let mut hash = hash_constants::CONSTRUCTOR ^ owner.0;
        for (i, param) in params.iter().enumerate() {
            hash = hash
                .wrapping_mul(hash_constants::SEP)
                .wrapping_add(param.0 ^ (i as u64).wrapping_add(1));
        }
        TypeHash(hash)
    }

    /// Check if this is an empty/invalid hash.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the underlying u64 value.
    #[inline]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Hashes of the built-in reflected types, computed at compile time.
pub mod primitives {
    use super::TypeHash;

    pub const VOID: TypeHash = TypeHash::from_name("void");
    pub const BOOL: TypeHash = TypeHash::from_name("bool");
    pub const INT8: TypeHash = TypeHash::from_name("int8");
    pub const INT16: TypeHash = TypeHash::from_name("int16");
    pub const INT32: TypeHash = TypeHash::from_name("int");
    pub const INT64: TypeHash = TypeHash::from_name("int64");
    pub const UINT8: TypeHash = TypeHash::from_name("uint8");
    pub const UINT16: TypeHash = TypeHash::from_name("uint16");
    pub const UINT32: TypeHash = TypeHash::from_name("uint");
    pub const UINT64: TypeHash = TypeHash::from_name("uint64");
    pub const FLOAT: TypeHash = TypeHash::from_name("float");
    pub const DOUBLE: TypeHash = TypeHash::from_name("double");
    pub const STRING: TypeHash = TypeHash::from_name("string");
    /// Parameters and returns that accept any value
    pub const ANY: TypeHash = TypeHash::from_name("any");
}

use core::fmt::{self, Display, Formatter};

use crate::{
    any::TypeInfo,
    dependency::Dependency,
    key::{Key, RawKey},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Member {
    Constructor { parameter: usize },
    Field { name: &'static str },
    Method { name: &'static str, parameter: usize },
}

impl Display for Member {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Member::Constructor { parameter } => write!(f, "new[{parameter}]"),
            Member::Field { name } => f.write_str(name),
            Member::Method { name, parameter } => write!(f, "{name}()[{parameter}]"),
        }
    }
}

/// A single injectable slot declared by a type.
///
/// There is no reflection to discover these, so providers list their own
/// injection points (see [`crate::Provider::injection_points`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InjectionPoint {
    declaring_type: TypeInfo,
    member: Member,
    key: RawKey,
    optional: bool,
}

impl InjectionPoint {
    #[inline]
    #[must_use]
    pub fn constructor_parameter<D, T>(parameter: usize, key: Key<T>) -> Self
    where
        D: ?Sized + 'static,
        T: ?Sized,
    {
        Self::new::<D>(Member::Constructor { parameter }, key.into_raw())
    }

    #[inline]
    #[must_use]
    pub fn field<D, T>(name: &'static str, key: Key<T>) -> Self
    where
        D: ?Sized + 'static,
        T: ?Sized,
    {
        Self::new::<D>(Member::Field { name }, key.into_raw())
    }

    #[inline]
    #[must_use]
    pub fn method_parameter<D, T>(name: &'static str, parameter: usize, key: Key<T>) -> Self
    where
        D: ?Sized + 'static,
        T: ?Sized,
    {
        Self::new::<D>(Member::Method { name, parameter }, key.into_raw())
    }

    #[inline]
    fn new<D: ?Sized + 'static>(member: Member, key: RawKey) -> Self {
        Self {
            declaring_type: TypeInfo::of::<D>(),
            member,
            key,
            optional: false,
        }
    }

    /// Marks the slot as satisfiable by an absent binding
    #[inline]
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    #[inline]
    #[must_use]
    pub const fn declaring_type(&self) -> &TypeInfo {
        &self.declaring_type
    }

    #[inline]
    #[must_use]
    pub const fn member(&self) -> &Member {
        &self.member
    }

    #[inline]
    #[must_use]
    pub const fn key(&self) -> &RawKey {
        &self.key
    }

    #[inline]
    #[must_use]
    pub const fn is_optional(&self) -> bool {
        self.optional
    }

    #[must_use]
    pub fn dependency(&self) -> Dependency {
        Dependency::for_injection_point(self.clone())
    }
}

impl Display for InjectionPoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.member)
    }
}

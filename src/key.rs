use alloc::borrow::Cow;
use core::{
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    marker::PhantomData,
};

use crate::any::TypeInfo;

/// Disambiguates several bindings of the same type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qualifier {
    Named(Cow<'static, str>),
    /// Zero-sized marker type used as a qualifier, for example `struct Primary;`
    Marker(TypeInfo),
}

impl Display for Qualifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::Named(name) => write!(f, "named({name:?})"),
            Qualifier::Marker(marker) => write!(f, "marker({marker})"),
        }
    }
}

/// Type-erased [`Key`], used where bindings of different types live together
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawKey {
    pub type_info: TypeInfo,
    pub qualifier: Option<Qualifier>,
}

impl RawKey {
    #[inline]
    #[must_use]
    pub const fn new(type_info: TypeInfo, qualifier: Option<Qualifier>) -> Self {
        Self { type_info, qualifier }
    }

    #[inline]
    #[must_use]
    pub const fn has_qualifier(&self) -> bool {
        self.qualifier.is_some()
    }
}

impl Display for RawKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Key[type={}, qualifier=", self.type_info)?;
        match &self.qualifier {
            Some(qualifier) => write!(f, "{qualifier}]"),
            None => f.write_str("[none]]"),
        }
    }
}

/// Identifies a dependency slot: the type `T` plus an optional [`Qualifier`].
///
/// Keys are plain values. Equality, ordering and hashing are structural,
/// so two independently built keys for the same type and qualifier are interchangeable.
pub struct Key<T: ?Sized> {
    raw: RawKey,
    marker: PhantomData<fn() -> T>,
}

impl<T: ?Sized + 'static> Key<T> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(None)
    }

    #[inline]
    #[must_use]
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self::from_parts(Some(Qualifier::Named(name.into())))
    }

    #[inline]
    #[must_use]
    pub fn qualified_with<M: ?Sized + 'static>() -> Self {
        Self::from_parts(Some(Qualifier::Marker(TypeInfo::of::<M>())))
    }

    #[inline]
    #[must_use]
    pub fn with_qualifier(qualifier: Qualifier) -> Self {
        Self::from_parts(Some(qualifier))
    }

    #[inline]
    fn from_parts(qualifier: Option<Qualifier>) -> Self {
        Self {
            raw: RawKey::new(TypeInfo::of::<T>(), qualifier),
            marker: PhantomData,
        }
    }
}

impl<T: ?Sized> Key<T> {
    #[inline]
    #[must_use]
    pub const fn raw(&self) -> &RawKey {
        &self.raw
    }

    #[inline]
    #[must_use]
    pub fn into_raw(self) -> RawKey {
        self.raw
    }

    #[inline]
    #[must_use]
    pub const fn type_info(&self) -> &TypeInfo {
        &self.raw.type_info
    }

    #[inline]
    #[must_use]
    pub const fn qualifier(&self) -> Option<&Qualifier> {
        self.raw.qualifier.as_ref()
    }

    /// Same type, no qualifier
    #[inline]
    #[must_use]
    pub fn without_qualifier(&self) -> Self {
        Self {
            raw: RawKey::new(self.raw.type_info, None),
            marker: PhantomData,
        }
    }
}

impl<T: ?Sized + 'static> Default for Key<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Key<T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            marker: PhantomData,
        }
    }
}

impl<T: ?Sized> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T: ?Sized> Eq for Key<T> {}

impl<T: ?Sized> PartialOrd for Key<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: ?Sized> Ord for Key<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl<T: ?Sized> Hash for Key<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T: ?Sized> Debug for Key<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Key").field(&self.raw).finish()
    }
}

impl<T: ?Sized> Display for Key<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.raw, f)
    }
}

impl<T: ?Sized> From<Key<T>> for RawKey {
    fn from(key: Key<T>) -> Self {
        key.raw
    }
}

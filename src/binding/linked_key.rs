use alloc::collections::BTreeSet;
use core::{
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
};

use super::BindingCore;
use crate::{
    binder::Binder,
    dependency::Dependency,
    factory::InternalFactory,
    injector::InjectorRef,
    key::{Key, RawKey},
    scope::Scoping,
    source::Source,
    visitor::BindingTargetVisitor,
};

/// Binding that forwards requests for its key to another key
pub struct LinkedKeyBinding<T> {
    core: BindingCore<T>,
    target: RawKey,
}

impl<T> LinkedKeyBinding<T> {
    #[inline]
    #[must_use]
    pub fn new(injector: InjectorRef, key: Key<T>, source: Source, internal_factory: InternalFactory<T>, scoping: Scoping, target: RawKey) -> Self {
        Self {
            core: BindingCore::new(injector, key, source, internal_factory, scoping),
            target,
        }
    }

    #[inline]
    #[must_use]
    pub const fn deferred(source: Source, key: Key<T>, scoping: Scoping, target: RawKey) -> Self {
        Self {
            core: BindingCore::deferred(source, key, scoping),
            target,
        }
    }

    #[inline]
    #[must_use]
    pub const fn core(&self) -> &BindingCore<T> {
        &self.core
    }

    #[inline]
    #[must_use]
    pub const fn key(&self) -> &Key<T> {
        self.core.key()
    }

    #[inline]
    #[must_use]
    pub const fn source(&self) -> &Source {
        self.core.source()
    }

    #[inline]
    #[must_use]
    pub const fn scoping(&self) -> &Scoping {
        self.core.scoping()
    }

    #[inline]
    #[must_use]
    pub const fn target_key(&self) -> &RawKey {
        &self.target
    }

    #[must_use]
    pub fn with_key(&self, key: Key<T>) -> Self {
        Self {
            core: self.core.with_key(key),
            target: self.target.clone(),
        }
    }

    #[must_use]
    pub fn with_scoping(&self, scoping: Scoping) -> Self {
        Self {
            core: self.core.with_scoping(scoping),
            target: self.target.clone(),
        }
    }

    /// The target key only
    #[must_use]
    pub fn dependencies(&self) -> BTreeSet<Dependency> {
        BTreeSet::from([Dependency::for_raw_key(self.target.clone())])
    }
}

impl<T: 'static> LinkedKeyBinding<T> {
    #[inline]
    pub fn accept_target_visitor<Vis, V>(&self, visitor: &mut Vis) -> V
    where
        Vis: BindingTargetVisitor<T, V>,
    {
        visitor.visit_linked_key(self)
    }

    pub fn apply_to(&self, binder: &mut Binder) {
        let builder = binder
            .with_source(*self.source())
            .bind(self.key().clone())
            .to_raw_key(self.target.clone());
        self.scoping().apply_to(builder);
    }
}

impl<T> Clone for LinkedKeyBinding<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
            target: self.target.clone(),
        }
    }
}

impl<T> PartialEq for LinkedKeyBinding<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key() && self.scoping() == other.scoping() && self.target == other.target
    }
}

impl<T> Eq for LinkedKeyBinding<T> {}

impl<T> Hash for LinkedKeyBinding<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
        self.scoping().hash(state);
    }
}

impl<T> Display for LinkedKeyBinding<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LinkedKeyBinding{{key={}, source={}, scope={}, target={}}}",
            self.key(),
            self.source(),
            self.scoping(),
            self.target,
        )
    }
}

impl<T> Debug for LinkedKeyBinding<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedKeyBinding")
            .field("core", &self.core)
            .field("target", &self.target)
            .finish()
    }
}

use alloc::collections::BTreeSet;
use core::{
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
};

use super::BindingCore;
use crate::{binder::Binder, dependency::Dependency, key::Key, scope::Scoping, source::Source, visitor::BindingTargetVisitor};

/// Binding declared without a target, e.g. `binder.bind(key)` alone.
/// The container decides how to produce its instances.
pub struct UntargettedBinding<T> {
    core: BindingCore<T>,
}

impl<T> UntargettedBinding<T> {
    #[inline]
    #[must_use]
    pub const fn new(source: Source, key: Key<T>, scoping: Scoping) -> Self {
        Self {
            core: BindingCore::deferred(source, key, scoping),
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

    #[must_use]
    pub fn with_key(&self, key: Key<T>) -> Self {
        Self {
            core: self.core.with_key(key),
        }
    }

    #[must_use]
    pub fn with_scoping(&self, scoping: Scoping) -> Self {
        Self {
            core: self.core.with_scoping(scoping),
        }
    }

    #[inline]
    #[must_use]
    pub fn dependencies(&self) -> BTreeSet<Dependency> {
        BTreeSet::new()
    }
}

impl<T: 'static> UntargettedBinding<T> {
    #[inline]
    pub fn accept_target_visitor<Vis, V>(&self, visitor: &mut Vis) -> V
    where
        Vis: BindingTargetVisitor<T, V>,
    {
        visitor.visit_untargetted(self)
    }

    pub fn apply_to(&self, binder: &mut Binder) {
        let builder = binder.with_source(*self.source()).bind(self.key().clone());
        self.scoping().apply_to(builder.into());
    }
}

impl<T> Clone for UntargettedBinding<T> {
    fn clone(&self) -> Self {
        Self { core: self.core.clone() }
    }
}

impl<T> PartialEq for UntargettedBinding<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key() && self.scoping() == other.scoping()
    }
}

impl<T> Eq for UntargettedBinding<T> {}

impl<T> Hash for UntargettedBinding<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
        self.scoping().hash(state);
    }
}

impl<T> Display for UntargettedBinding<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UntargettedBinding{{key={}, source={}, scope={}}}",
            self.key(),
            self.source(),
            self.scoping(),
        )
    }
}

impl<T> Debug for UntargettedBinding<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UntargettedBinding").field(&self.core).finish()
    }
}

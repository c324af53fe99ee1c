use alloc::{collections::BTreeSet, sync::Arc};
use core::{
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
};
use tracing::{debug, warn};

use super::BindingCore;
use crate::{
    binder::Binder,
    dependency::Dependency,
    factory::InternalFactory,
    injection_point::InjectionPoint,
    injector::InjectorRef,
    key::Key,
    provider::SharedProvider,
    scope::Scoping,
    source::Source,
    visitor::{BindingTargetVisitor, VisitAdapter},
};

/// Binding whose instances come from a user-supplied provider.
///
/// The provider is shared with whoever else holds it and is never copied.
/// The injection points are owned by the binding and shared only with its copies.
pub struct ProviderInstanceBinding<T> {
    core: BindingCore<T>,
    provider: SharedProvider<T>,
    injection_points: Arc<BTreeSet<InjectionPoint>>,
}

impl<T> ProviderInstanceBinding<T> {
    #[must_use]
    pub fn new(
        injector: InjectorRef,
        key: Key<T>,
        source: Source,
        internal_factory: InternalFactory<T>,
        scoping: Scoping,
        provider: SharedProvider<T>,
        injection_points: impl IntoIterator<Item = InjectionPoint>,
    ) -> Self {
        Self {
            core: BindingCore::new(injector, key, source, internal_factory, scoping),
            provider,
            injection_points: Arc::new(injection_points.into_iter().collect()),
        }
    }

    /// Binding without injector and internal factory, see [`BindingCore::deferred`]
    #[must_use]
    pub fn deferred(
        source: Source,
        key: Key<T>,
        scoping: Scoping,
        injection_points: impl IntoIterator<Item = InjectionPoint>,
        provider: SharedProvider<T>,
    ) -> Self {
        Self::from_parts(
            BindingCore::deferred(source, key, scoping),
            provider,
            Arc::new(injection_points.into_iter().collect()),
        )
    }

    #[inline]
    pub(crate) const fn from_parts(core: BindingCore<T>, provider: SharedProvider<T>, injection_points: Arc<BTreeSet<InjectionPoint>>) -> Self {
        Self {
            core,
            provider,
            injection_points,
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
    pub const fn user_supplied_provider(&self) -> &SharedProvider<T> {
        &self.provider
    }

    #[inline]
    #[must_use]
    pub fn injection_points(&self) -> &BTreeSet<InjectionPoint> {
        &self.injection_points
    }

    #[must_use]
    pub fn with_key(&self, key: Key<T>) -> Self {
        Self::from_parts(self.core.with_key(key), self.provider.clone(), self.injection_points.clone())
    }

    #[must_use]
    pub fn with_scoping(&self, scoping: Scoping) -> Self {
        Self::from_parts(self.core.with_scoping(scoping), self.provider.clone(), self.injection_points.clone())
    }
}

impl<T: 'static> ProviderInstanceBinding<T> {
    /// Dependencies reported by the provider, or one per injection point
    /// if the provider doesn't report them itself
    #[must_use]
    pub fn dependencies(&self) -> BTreeSet<Dependency> {
        match self.provider.as_dependency_reporter() {
            Some(reporter) => reporter.dependencies().into_iter().collect(),
            None => Dependency::for_injection_points(self.injection_points.iter()),
        }
    }

    /// Visits the binding, letting a provider with an extension visitor intercept the visit.
    /// Exactly one of the provider's visit and [`BindingTargetVisitor::visit_provider_instance`] takes effect.
    pub fn accept_target_visitor<Vis, V>(&self, visitor: &mut Vis) -> V
    where
        Vis: BindingTargetVisitor<T, V> + 'static,
        V: 'static,
    {
        let Some(extension) = self.provider.as_extension_visitable() else {
            return visitor.visit_provider_instance(self);
        };

        let mut adapter = VisitAdapter::new(&mut *visitor);
        extension.accept_extension_visitor(&mut adapter, self);
        if let Some(output) = adapter.into_output() {
            debug!(key = %self.key(), "Visited by provider");
            return output;
        }

        warn!(key = %self.key(), "Provider with extension visitor didn't visit, falling back to generic visit");
        visitor.visit_provider_instance(self)
    }

    /// Fully specified sibling of this binding, producing instances with the provider
    #[must_use]
    pub fn initialize(&self, injector: InjectorRef) -> Self {
        Self::from_parts(
            BindingCore::new(
                injector,
                self.key().clone(),
                *self.source(),
                InternalFactory::for_provider(self.provider.clone()),
                *self.scoping(),
            ),
            self.provider.clone(),
            self.injection_points.clone(),
        )
    }

    /// Declares the key again on `binder`, bound to the same provider and scoped the same way
    pub fn apply_to(&self, binder: &mut Binder) {
        let builder = binder
            .with_source(*self.source())
            .bind(self.key().clone())
            .to_provider_instance(self.provider.clone(), self.injection_points.clone());
        self.scoping().apply_to(builder);
    }
}

impl<T> Clone for ProviderInstanceBinding<T> {
    fn clone(&self) -> Self {
        Self::from_parts(self.core.clone(), self.provider.clone(), self.injection_points.clone())
    }
}

/// Equal keys, equal scopings and equal providers.
/// Providers are compared by value, the same provider is always equal to itself.
impl<T: 'static> PartialEq for ProviderInstanceBinding<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
            && self.scoping() == other.scoping()
            && (Arc::ptr_eq(&self.provider, &other.provider) || self.provider.dyn_eq(&*other.provider))
    }
}

impl<T: 'static> Eq for ProviderInstanceBinding<T> {}

/// Only the key and scoping are hashed
impl<T> Hash for ProviderInstanceBinding<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
        self.scoping().hash(state);
    }
}

impl<T> Display for ProviderInstanceBinding<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProviderInstanceBinding{{key={}, source={}, scope={}, provider={:?}}}",
            self.key(),
            self.source(),
            self.scoping(),
            self.provider,
        )
    }
}

impl<T> Debug for ProviderInstanceBinding<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderInstanceBinding")
            .field("core", &self.core)
            .field("provider", &self.provider)
            .field("injection_points", &self.injection_points)
            .finish()
    }
}

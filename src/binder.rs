use alloc::{
    boxed::Box,
    collections::{btree_map::Entry, BTreeMap, BTreeSet},
    sync::Arc,
    vec::Vec,
};
use core::{fmt::Debug, marker::PhantomData};
use tracing::{debug, error, warn};

use crate::{
    binding::{Binding, BindingCore, ErasedBinding, LinkedKeyBinding, ProviderInstanceBinding, UntargettedBinding},
    config::Config,
    errors::BinderErrorKind,
    injection_point::InjectionPoint,
    injector::Injector,
    key::{Key, RawKey},
    provider::{instance, Provider, SharedProvider},
    scope::{ScopeData, Scoping},
    source::Source,
};

/// Records binding declarations in order.
///
/// Declarations are only checked against each other in [`Binder::into_elements`].
#[derive(Debug, Default)]
pub struct Binder {
    config: Config,
    elements: Vec<Box<dyn ErasedBinding>>,
}

impl Binder {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    #[inline]
    #[must_use]
    pub const fn with_config(config: Config) -> Self {
        Self {
            config,
            elements: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Declares `key`, with the caller location as the source of the binding
    #[track_caller]
    pub fn bind<T: 'static>(&mut self, key: Key<T>) -> LinkedBindingBuilder<'_, T> {
        self.with_source(Source::caller()).bind(key)
    }

    #[inline]
    pub fn with_source(&mut self, source: Source) -> SourcedBinder<'_> {
        SourcedBinder { binder: self, source }
    }

    /// Replays bindings recorded by another binder, keeping their sources
    pub fn install(&mut self, elements: &Elements) {
        for binding in elements.iter() {
            binding.apply_to(self);
        }
    }

    /// Declarations recorded so far, duplicates included
    pub fn elements(&self) -> impl Iterator<Item = &dyn ErasedBinding> {
        self.elements.iter().map(|binding| &**binding)
    }

    /// Collects the declarations by key.
    ///
    /// # Errors
    /// - [`BinderErrorKind::AlreadyConfigured`] if a key is declared twice by bindings that aren't equal,
    ///   or declared twice at all when [`Config::deduplicate_bindings`] is off.
    pub fn into_elements(self) -> Result<Elements, BinderErrorKind> {
        let mut bindings = BTreeMap::<RawKey, Box<dyn ErasedBinding>>::new();

        for binding in self.elements {
            match bindings.entry(binding.raw_key().clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(binding);
                }
                Entry::Occupied(entry) => {
                    let first = entry.get();
                    if self.config.deduplicate_bindings && first.dyn_eq(&*binding) {
                        warn!(key = %binding.raw_key(), source = %binding.source(), "Duplicate binding collapsed");
                        continue;
                    }

                    let err = BinderErrorKind::AlreadyConfigured {
                        key: binding.raw_key().clone(),
                        first: *first.source(),
                        second: *binding.source(),
                    };
                    error!("{}", err);
                    return Err(err);
                }
            }
        }

        Ok(Elements {
            config: self.config,
            bindings,
        })
    }

    fn replace(&mut self, index: usize, binding: Box<dyn ErasedBinding>) {
        if let Some(slot) = self.elements.get_mut(index) {
            *slot = binding;
        }
    }
}

/// Binder that declares bindings under an explicit source
pub struct SourcedBinder<'a> {
    binder: &'a mut Binder,
    source: Source,
}

impl<'a> SourcedBinder<'a> {
    /// Declares `key` as an untargetted binding until a target is chosen
    pub fn bind<T: 'static>(self, key: Key<T>) -> LinkedBindingBuilder<'a, T> {
        debug!(key = %key, source = %self.source, "Binding recorded");

        let index = self.binder.elements.len();
        self.binder
            .elements
            .push(Box::new(Binding::from(UntargettedBinding::new(self.source, key.clone(), Scoping::Unscoped))));

        LinkedBindingBuilder {
            binder: self.binder,
            index,
            source: self.source,
            key,
        }
    }
}

pub struct LinkedBindingBuilder<'a, T> {
    binder: &'a mut Binder,
    index: usize,
    source: Source,
    key: Key<T>,
}

impl<'a, T: 'static> LinkedBindingBuilder<'a, T> {
    #[inline]
    pub fn to_provider<P>(self, provider: P) -> ScopedBindingBuilder<'a, T>
    where
        P: Provider<T> + PartialEq,
    {
        self.to_shared_provider(Arc::new(provider))
    }

    /// Binds to a provider that may be shared with other bindings.
    /// The injection points are taken from the provider.
    pub fn to_shared_provider(self, provider: SharedProvider<T>) -> ScopedBindingBuilder<'a, T> {
        let injection_points = provider.injection_points();
        self.to_provider_instance(provider, Arc::new(injection_points))
    }

    #[inline]
    pub fn to_instance(self, value: T) -> ScopedBindingBuilder<'a, T>
    where
        T: Clone + Debug + PartialEq + Send + Sync,
    {
        self.to_provider(instance(value))
    }

    /// Forwards requests for the key to `target`
    #[inline]
    pub fn to<U: ?Sized>(self, target: Key<U>) -> ScopedBindingBuilder<'a, T> {
        self.to_raw_key(target.into_raw())
    }

    pub(crate) fn to_provider_instance(
        self,
        provider: SharedProvider<T>,
        injection_points: Arc<BTreeSet<InjectionPoint>>,
    ) -> ScopedBindingBuilder<'a, T> {
        let core = BindingCore::deferred(self.source, self.key.clone(), Scoping::Unscoped);
        let binding = ProviderInstanceBinding::from_parts(core, provider, injection_points);
        self.target(binding.into())
    }

    pub(crate) fn to_raw_key(self, target: RawKey) -> ScopedBindingBuilder<'a, T> {
        let binding = LinkedKeyBinding::deferred(self.source, self.key.clone(), Scoping::Unscoped, target);
        self.target(binding.into())
    }

    fn target(self, binding: Binding<T>) -> ScopedBindingBuilder<'a, T> {
        debug!(key = %self.key, "Binding targeted");
        self.binder.replace(self.index, Box::new(binding));
        self.into()
    }
}

/// Scoping an untargetted declaration
impl<T> LinkedBindingBuilder<'_, T> {
    #[inline]
    pub fn in_scope(self, scope: impl Into<ScopeData>) {
        ScopedBindingBuilder::from(self).in_scope(scope);
    }

    #[inline]
    pub fn in_singleton(self) {
        ScopedBindingBuilder::from(self).in_singleton();
    }

    #[inline]
    pub fn as_eager_singleton(self) {
        ScopedBindingBuilder::from(self).as_eager_singleton();
    }

    #[inline]
    pub fn with_scoping(self, scoping: Scoping) {
        ScopedBindingBuilder::from(self).with_scoping(scoping);
    }
}

impl<'a, T> From<LinkedBindingBuilder<'a, T>> for ScopedBindingBuilder<'a, T> {
    fn from(builder: LinkedBindingBuilder<'a, T>) -> Self {
        Self {
            binder: builder.binder,
            index: builder.index,
            _marker: PhantomData,
        }
    }
}

/// Sets the scoping of the binding just declared. Leaving it unused keeps the binding unscoped.
pub struct ScopedBindingBuilder<'a, T> {
    binder: &'a mut Binder,
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ScopedBindingBuilder<'_, T> {
    #[inline]
    pub fn in_scope(self, scope: impl Into<ScopeData>) {
        self.with_scoping(Scoping::Scoped(scope.into()));
    }

    #[inline]
    pub fn in_singleton(self) {
        self.with_scoping(Scoping::Singleton);
    }

    #[inline]
    pub fn as_eager_singleton(self) {
        self.with_scoping(Scoping::EagerSingleton);
    }

    pub fn with_scoping(self, scoping: Scoping) {
        let Some(binding) = self.binder.elements.get(self.index) else {
            return;
        };
        debug!(key = %binding.raw_key(), scope = %scoping, "Binding scoped");

        let rescoped = binding.with_scoping_erased(scoping);
        self.binder.replace(self.index, rescoped);
    }
}

/// Bindings recorded by a [`Binder`], one per key
#[derive(Debug)]
pub struct Elements {
    config: Config,
    bindings: BTreeMap<RawKey, Box<dyn ErasedBinding>>,
}

impl Elements {
    #[must_use]
    pub fn get<T: 'static>(&self, key: &Key<T>) -> Option<&Binding<T>> {
        self.bindings.get(key.raw())?.as_any().downcast_ref()
    }

    /// Bindings ordered by key
    pub fn iter(&self) -> impl Iterator<Item = &dyn ErasedBinding> {
        self.bindings.values().map(|binding| &**binding)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    #[inline]
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Bindings to instantiate when the container is built, see [`Scoping::is_eager_singleton`]
    pub fn eager_singletons(&self) -> impl Iterator<Item = &dyn ErasedBinding> {
        let stage = self.config.stage;
        self.iter().filter(move |binding| binding.scoping().is_eager_singleton(stage))
    }
}

impl Injector for Elements {
    #[inline]
    fn binding(&self, key: &RawKey) -> Option<&dyn ErasedBinding> {
        self.bindings.get(key).map(|binding| &**binding)
    }
}

mod linked_key;
mod provider_instance;
mod untargetted;

pub use linked_key::LinkedKeyBinding;
pub use provider_instance::ProviderInstanceBinding;
pub use untargetted::UntargettedBinding;

use alloc::{boxed::Box, collections::BTreeSet};
use core::{
    any::Any,
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
};

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

/// Attributes every binding variant shares.
///
/// There are no setters, a modified binding is always a new value.
pub struct BindingCore<T> {
    injector: Option<InjectorRef>,
    key: Key<T>,
    source: Source,
    internal_factory: Option<InternalFactory<T>>,
    scoping: Scoping,
}

impl<T> BindingCore<T> {
    #[inline]
    #[must_use]
    pub fn new(injector: InjectorRef, key: Key<T>, source: Source, internal_factory: InternalFactory<T>, scoping: Scoping) -> Self {
        Self {
            injector: Some(injector),
            key,
            source,
            internal_factory: Some(internal_factory),
            scoping,
        }
    }

    /// Binding declared before its container exists.
    /// The injector and the internal factory are attached by the resolver later.
    #[inline]
    #[must_use]
    pub const fn deferred(source: Source, key: Key<T>, scoping: Scoping) -> Self {
        Self {
            injector: None,
            key,
            source,
            internal_factory: None,
            scoping,
        }
    }

    #[inline]
    #[must_use]
    pub const fn key(&self) -> &Key<T> {
        &self.key
    }

    #[inline]
    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }

    #[inline]
    #[must_use]
    pub const fn scoping(&self) -> &Scoping {
        &self.scoping
    }

    #[inline]
    #[must_use]
    pub const fn internal_factory(&self) -> Option<&InternalFactory<T>> {
        self.internal_factory.as_ref()
    }

    #[inline]
    #[must_use]
    pub const fn injector(&self) -> Option<&InjectorRef> {
        self.injector.as_ref()
    }

    #[inline]
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.internal_factory.is_some()
    }

    #[inline]
    pub(crate) fn with_key(&self, key: Key<T>) -> Self {
        Self::deferred(self.source, key, self.scoping)
    }

    #[inline]
    pub(crate) fn with_scoping(&self, scoping: Scoping) -> Self {
        Self::deferred(self.source, self.key.clone(), scoping)
    }
}

impl<T> Clone for BindingCore<T> {
    fn clone(&self) -> Self {
        Self {
            injector: self.injector.clone(),
            key: self.key.clone(),
            source: self.source,
            internal_factory: self.internal_factory.clone(),
            scoping: self.scoping,
        }
    }
}

impl<T> Debug for BindingCore<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingCore")
            .field("key", &self.key)
            .field("source", &self.source)
            .field("scoping", &self.scoping)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

/// A key bound to a strategy for producing its instances, one case per known variant
pub enum Binding<T> {
    ProviderInstance(ProviderInstanceBinding<T>),
    LinkedKey(LinkedKeyBinding<T>),
    Untargetted(UntargettedBinding<T>),
}

impl<T: 'static> Binding<T> {
    #[inline]
    #[must_use]
    pub const fn core(&self) -> &BindingCore<T> {
        match self {
            Binding::ProviderInstance(binding) => binding.core(),
            Binding::LinkedKey(binding) => binding.core(),
            Binding::Untargetted(binding) => binding.core(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn key(&self) -> &Key<T> {
        self.core().key()
    }

    #[inline]
    #[must_use]
    pub const fn source(&self) -> &Source {
        self.core().source()
    }

    #[inline]
    #[must_use]
    pub const fn scoping(&self) -> &Scoping {
        self.core().scoping()
    }

    #[must_use]
    pub fn dependencies(&self) -> BTreeSet<Dependency> {
        match self {
            Binding::ProviderInstance(binding) => binding.dependencies(),
            Binding::LinkedKey(binding) => binding.dependencies(),
            Binding::Untargetted(binding) => binding.dependencies(),
        }
    }

    #[must_use]
    pub fn with_key(&self, key: Key<T>) -> Self {
        match self {
            Binding::ProviderInstance(binding) => binding.with_key(key).into(),
            Binding::LinkedKey(binding) => binding.with_key(key).into(),
            Binding::Untargetted(binding) => binding.with_key(key).into(),
        }
    }

    #[must_use]
    pub fn with_scoping(&self, scoping: Scoping) -> Self {
        match self {
            Binding::ProviderInstance(binding) => binding.with_scoping(scoping).into(),
            Binding::LinkedKey(binding) => binding.with_scoping(scoping).into(),
            Binding::Untargetted(binding) => binding.with_scoping(scoping).into(),
        }
    }

    pub fn apply_to(&self, binder: &mut Binder) {
        match self {
            Binding::ProviderInstance(binding) => binding.apply_to(binder),
            Binding::LinkedKey(binding) => binding.apply_to(binder),
            Binding::Untargetted(binding) => binding.apply_to(binder),
        }
    }

    pub fn accept_target_visitor<Vis, V>(&self, visitor: &mut Vis) -> V
    where
        Vis: BindingTargetVisitor<T, V> + 'static,
        V: 'static,
    {
        match self {
            Binding::ProviderInstance(binding) => binding.accept_target_visitor(visitor),
            Binding::LinkedKey(binding) => binding.accept_target_visitor(visitor),
            Binding::Untargetted(binding) => binding.accept_target_visitor(visitor),
        }
    }
}

impl<T> From<ProviderInstanceBinding<T>> for Binding<T> {
    fn from(binding: ProviderInstanceBinding<T>) -> Self {
        Self::ProviderInstance(binding)
    }
}

impl<T> From<LinkedKeyBinding<T>> for Binding<T> {
    fn from(binding: LinkedKeyBinding<T>) -> Self {
        Self::LinkedKey(binding)
    }
}

impl<T> From<UntargettedBinding<T>> for Binding<T> {
    fn from(binding: UntargettedBinding<T>) -> Self {
        Self::Untargetted(binding)
    }
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        match self {
            Binding::ProviderInstance(binding) => Binding::ProviderInstance(binding.clone()),
            Binding::LinkedKey(binding) => Binding::LinkedKey(binding.clone()),
            Binding::Untargetted(binding) => Binding::Untargetted(binding.clone()),
        }
    }
}

/// Bindings of different variants are never equal
impl<T: 'static> PartialEq for Binding<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Binding::ProviderInstance(this), Binding::ProviderInstance(other)) => this == other,
            (Binding::LinkedKey(this), Binding::LinkedKey(other)) => this == other,
            (Binding::Untargetted(this), Binding::Untargetted(other)) => this == other,
            _ => false,
        }
    }
}

impl<T: 'static> Eq for Binding<T> {}

impl<T> Hash for Binding<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Binding::ProviderInstance(binding) => binding.hash(state),
            Binding::LinkedKey(binding) => binding.hash(state),
            Binding::Untargetted(binding) => binding.hash(state),
        }
    }
}

impl<T> Display for Binding<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Binding::ProviderInstance(binding) => Display::fmt(binding, f),
            Binding::LinkedKey(binding) => Display::fmt(binding, f),
            Binding::Untargetted(binding) => Display::fmt(binding, f),
        }
    }
}

impl<T> Debug for Binding<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Binding::ProviderInstance(binding) => Debug::fmt(binding, f),
            Binding::LinkedKey(binding) => Debug::fmt(binding, f),
            Binding::Untargetted(binding) => Debug::fmt(binding, f),
        }
    }
}

/// Object-safe view of a [`Binding`] of any type
pub trait ErasedBinding: Debug + Display + Send + Sync {
    fn raw_key(&self) -> &RawKey;

    fn source(&self) -> &Source;

    fn scoping(&self) -> &Scoping;

    fn dependencies(&self) -> BTreeSet<Dependency>;

    /// Downcasts to `Binding<T>`
    fn as_any(&self) -> &dyn Any;

    fn dyn_eq(&self, other: &dyn ErasedBinding) -> bool;

    #[must_use]
    fn with_scoping_erased(&self, scoping: Scoping) -> Box<dyn ErasedBinding>;

    fn apply_to(&self, binder: &mut Binder);
}

impl<T: 'static> ErasedBinding for Binding<T> {
    #[inline]
    fn raw_key(&self) -> &RawKey {
        self.key().raw()
    }

    #[inline]
    fn source(&self) -> &Source {
        Binding::source(self)
    }

    #[inline]
    fn scoping(&self) -> &Scoping {
        Binding::scoping(self)
    }

    #[inline]
    fn dependencies(&self) -> BTreeSet<Dependency> {
        Binding::dependencies(self)
    }

    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn ErasedBinding) -> bool {
        other.as_any().downcast_ref::<Self>().is_some_and(|other| self == other)
    }

    fn with_scoping_erased(&self, scoping: Scoping) -> Box<dyn ErasedBinding> {
        Box::new(Binding::with_scoping(self, scoping))
    }

    #[inline]
    fn apply_to(&self, binder: &mut Binder) {
        Binding::apply_to(self, binder);
    }
}

#[cfg(test)]
mod tests {
    use super::{Binding, BindingCore, ErasedBinding, LinkedKeyBinding, ProviderInstanceBinding, UntargettedBinding};
    use crate::{
        key::Key,
        provider::{instance, SharedProvider},
        scope::{DefaultScope, Scoping},
        source::Source,
        visitor::BindingTargetVisitor,
    };

    use alloc::{
        string::{String, ToString as _},
        sync::Arc,
        vec,
        vec::Vec,
    };
    use core::iter;

    struct Greeter;

    #[derive(Default)]
    struct VariantNames(Vec<&'static str>);

    impl BindingTargetVisitor<String, ()> for VariantNames {
        fn visit_other(&mut self, _binding: &BindingCore<String>) {
            self.0.push("other");
        }

        fn visit_provider_instance(&mut self, _binding: &ProviderInstanceBinding<String>) {
            self.0.push("provider instance");
        }
    }

    fn bindings() -> [Binding<String>; 3] {
        let provider: SharedProvider<String> = Arc::new(instance("hello".to_string()));
        [
            ProviderInstanceBinding::deferred(Source::named("a"), Key::<String>::new(), Scoping::Singleton, iter::empty(), provider).into(),
            LinkedKeyBinding::deferred(Source::named("b"), Key::<String>::new(), Scoping::Singleton, Key::<Greeter>::new().into_raw()).into(),
            UntargettedBinding::new(Source::named("c"), Key::<String>::new(), Scoping::Singleton).into(),
        ]
    }

    #[test]
    fn test_variants_never_equal() {
        let [provider_instance, linked_key, untargetted] = bindings();

        assert_ne!(provider_instance, linked_key);
        assert_ne!(linked_key, untargetted);
        assert_ne!(untargetted, provider_instance);
        assert_eq!(untargetted, untargetted.clone());
        assert!(!untargetted.dyn_eq(&linked_key));
        assert!(untargetted.dyn_eq(&untargetted.with_key(Key::new())));
    }

    #[test]
    fn test_dispatch() {
        let mut visitor = VariantNames::default();
        for binding in bindings() {
            binding.accept_target_visitor(&mut visitor);
        }
        assert_eq!(visitor.0, vec!["provider instance", "other", "other"]);
    }

    #[test]
    fn test_with_scoping_keeps_variant() {
        for binding in bindings() {
            let rescoped = binding.with_scoping(Scoping::for_scope(DefaultScope::Request));

            assert_eq!(rescoped.scoping(), &Scoping::for_scope(DefaultScope::Request));
            assert_eq!(binding.scoping(), &Scoping::Singleton);
            assert_eq!(rescoped.source(), binding.source());
            assert_eq!(core::mem::discriminant(&rescoped), core::mem::discriminant(&binding));
        }
    }

    #[test]
    fn test_erased() {
        let [provider_instance, ..] = bindings();
        let erased: &dyn ErasedBinding = &provider_instance;

        assert_eq!(erased.raw_key(), Key::<String>::new().raw());
        assert_eq!(erased.source(), &Source::named("a"));
        assert!(erased.dependencies().is_empty());
        assert_eq!(erased.as_any().downcast_ref::<Binding<String>>(), Some(&provider_instance));
        assert_eq!(erased.with_scoping_erased(Scoping::EagerSingleton).scoping(), &Scoping::EagerSingleton);
        assert_eq!(erased.to_string(), provider_instance.to_string());
    }
}

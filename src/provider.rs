use alloc::{collections::BTreeSet, sync::Arc, vec::Vec};
use core::{any::Any, fmt::Debug};

use crate::{
    binding::ProviderInstanceBinding, dependency::Dependency, errors::InstantiateErrorKind, injection_point::InjectionPoint,
    visitor::ExtensionVisit,
};

/// User-supplied factory for instances of `T`.
///
/// Besides producing instances, a provider may opt into two capabilities by
/// overriding the `as_*` methods:
/// - [`HasDependencies`], to report its dependencies instead of having them derived
///   from [`Provider::injection_points`];
/// - [`ProviderWithExtensionVisitor`], to intercept visitors of the binding it is bound by.
pub trait Provider<T>: Debug + Send + Sync + 'static {
    fn get(&self) -> Result<T, InstantiateErrorKind>;

    /// Injectable slots of the provider type
    #[must_use]
    fn injection_points(&self) -> BTreeSet<InjectionPoint> {
        BTreeSet::new()
    }

    #[must_use]
    fn as_dependency_reporter(&self) -> Option<&dyn HasDependencies> {
        None
    }

    #[must_use]
    fn as_extension_visitable(&self) -> Option<&dyn ProviderWithExtensionVisitor<T>> {
        None
    }
}

pub trait HasDependencies {
    /// The returned collection is copied by the caller, it doesn't have to be stable
    fn dependencies(&self) -> Vec<Dependency>;
}

pub trait ProviderWithExtensionVisitor<T> {
    /// Either redirects `visitor` to an extension-specific visit with [`ExtensionVisit::visit_as`],
    /// or falls back to [`ExtensionVisit::visit_generic`].
    fn accept_extension_visitor(&self, visitor: &mut dyn ExtensionVisit<T>, binding: &ProviderInstanceBinding<T>);
}

/// Object-safe provider with value equality.
///
/// Implemented for every [`Provider`] that is also [`PartialEq`].
pub trait DynProvider<T>: Provider<T> {
    fn as_any(&self) -> &dyn Any;

    /// `false` for providers of different concrete types
    fn dyn_eq(&self, other: &dyn DynProvider<T>) -> bool;
}

impl<T: 'static, P> DynProvider<T> for P
where
    P: Provider<T> + PartialEq,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn dyn_eq(&self, other: &dyn DynProvider<T>) -> bool {
        other.as_any().downcast_ref::<P>().is_some_and(|other| self == other)
    }
}

pub type SharedProvider<T> = Arc<dyn DynProvider<T>>;

/// Provider that returns a clone of a value created outside the container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceProvider<T>(T);

impl<T> InstanceProvider<T> {
    #[inline]
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.0
    }
}

impl<T> Provider<T> for InstanceProvider<T>
where
    T: Clone + Debug + Send + Sync + 'static,
{
    #[inline]
    fn get(&self) -> Result<T, InstantiateErrorKind> {
        Ok(self.0.clone())
    }
}

/// Wrapper to create a provider that just returns passed value.
/// It can be used when the value was created outside the container.
#[inline]
#[must_use]
pub const fn instance<T>(val: T) -> InstanceProvider<T> {
    InstanceProvider(val)
}

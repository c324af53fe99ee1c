use alloc::sync::Arc;
use core::{
    any::type_name,
    fmt::{self, Debug, Formatter},
};
use tracing::{debug, debug_span, error};

use crate::{dependency::Dependency, errors::InstantiateErrorKind, provider::SharedProvider};

pub trait Factory<T>: Send + Sync {
    fn produce(&self, dependency: &Dependency) -> Result<T, InstantiateErrorKind>;
}

impl<F, T> Factory<T> for F
where
    F: Fn(&Dependency) -> Result<T, InstantiateErrorKind> + Send + Sync,
{
    #[inline]
    fn produce(&self, dependency: &Dependency) -> Result<T, InstantiateErrorKind> {
        self(dependency)
    }
}

/// Production strategy of a binding, attached by the injector.
///
/// Clones share the same underlying factory.
pub struct InternalFactory<T>(Arc<dyn Factory<T>>);

impl<T: 'static> InternalFactory<T> {
    #[inline]
    #[must_use]
    pub fn new(factory: impl Factory<T> + 'static) -> Self {
        Self(Arc::new(factory))
    }

    /// Factory that asks `provider` for every instance.
    /// Provider errors are returned as is.
    #[must_use]
    pub fn for_provider(provider: SharedProvider<T>) -> Self {
        Self::new(move |dependency: &Dependency| {
            let span = debug_span!("provide", dependency = %dependency.key());
            let _guard = span.enter();

            match provider.get() {
                Ok(instance) => {
                    debug!("Provided");
                    Ok(instance)
                }
                Err(err) => {
                    error!("{}", err);
                    Err(err)
                }
            }
        })
    }
}

impl<T> InternalFactory<T> {
    #[inline]
    pub fn produce(&self, dependency: &Dependency) -> Result<T, InstantiateErrorKind> {
        self.0.produce(dependency)
    }
}

impl<T> Clone for InternalFactory<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> Debug for InternalFactory<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "InternalFactory<{}>", type_name::<T>())
    }
}

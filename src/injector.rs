use alloc::sync::Arc;

use crate::{binding::ErasedBinding, key::RawKey};

/// Container that owns fully initialized bindings.
///
/// Graph resolution and instantiation live behind this seam,
/// bindings only keep a reference to the container they belong to.
pub trait Injector: Send + Sync {
    fn binding(&self, key: &RawKey) -> Option<&dyn ErasedBinding>;
}

pub type InjectorRef = Arc<dyn Injector>;

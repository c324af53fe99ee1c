#![no_std]

extern crate alloc;

pub(crate) mod any;
pub(crate) mod binder;
pub(crate) mod binding;
pub(crate) mod config;
pub(crate) mod dependency;
pub(crate) mod errors;
pub(crate) mod factory;
pub(crate) mod injection_point;
pub(crate) mod injector;
pub(crate) mod key;
pub(crate) mod provider;
pub(crate) mod scope;
pub(crate) mod source;
pub(crate) mod visitor;

pub use any::TypeInfo;
pub use binder::{Binder, Elements, LinkedBindingBuilder, ScopedBindingBuilder, SourcedBinder};
pub use binding::{Binding, BindingCore, ErasedBinding, LinkedKeyBinding, ProviderInstanceBinding, UntargettedBinding};
pub use config::{Config, Stage};
pub use dependency::Dependency;
pub use errors::{BinderErrorKind, InstantiateErrorKind};
pub use factory::{Factory, InternalFactory};
pub use injection_point::{InjectionPoint, Member};
pub use injector::{Injector, InjectorRef};
pub use key::{Key, Qualifier, RawKey};
pub use provider::{instance, DynProvider, HasDependencies, InstanceProvider, Provider, ProviderWithExtensionVisitor, SharedProvider};
pub use scope::{DefaultScope, Scope, ScopeData, Scoping};
pub use source::Source;
pub use visitor::{BindingTargetVisitor, ExtensionVisit};

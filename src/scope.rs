use core::fmt::{self, Display, Formatter};

use crate::{binder::ScopedBindingBuilder, config::Stage};

pub trait Scope: Into<ScopeData> {
    #[must_use]
    fn name(&self) -> &'static str;

    #[must_use]
    fn priority(&self) -> u8;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum DefaultScope {
    App,
    Session,
    Request,
    Action,
    Step,
}

impl Scope for DefaultScope {
    #[inline]
    fn name(&self) -> &'static str {
        match self {
            DefaultScope::App => "app",
            DefaultScope::Session => "session",
            DefaultScope::Request => "request",
            DefaultScope::Action => "action",
            DefaultScope::Step => "step",
        }
    }

    #[inline]
    fn priority(&self) -> u8 {
        *self as u8
    }
}

impl From<DefaultScope> for ScopeData {
    fn from(scope: DefaultScope) -> Self {
        Self {
            priority: scope.priority(),
            name: scope.name(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeData {
    pub priority: u8,
    pub name: &'static str,
}

/// Lifecycle policy of a binding: whether and where produced instances are cached.
///
/// The scope implementations themselves live in the container,
/// a scoping only names the policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Scoping {
    /// A new instance for every request
    #[default]
    Unscoped,
    /// One instance per container, created on first request
    Singleton,
    /// One instance per container, created when the container is built
    EagerSingleton,
    /// One instance per instance of a named scope
    Scoped(ScopeData),
}

impl Scoping {
    #[inline]
    #[must_use]
    pub fn for_scope<S: Scope>(scope: S) -> Self {
        Self::Scoped(scope.into())
    }

    #[inline]
    #[must_use]
    pub const fn is_no_scope(&self) -> bool {
        matches!(self, Scoping::Unscoped)
    }

    /// Plain singletons are created eagerly in [`Stage::Production`] only
    #[inline]
    #[must_use]
    pub fn is_eager_singleton(&self, stage: Stage) -> bool {
        match self {
            Scoping::EagerSingleton => true,
            Scoping::Singleton => stage == Stage::Production,
            Scoping::Unscoped | Scoping::Scoped(_) => false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn scope_data(&self) -> Option<&ScopeData> {
        match self {
            Scoping::Scoped(scope_data) => Some(scope_data),
            _ => None,
        }
    }

    /// Re-attaches this policy to a freshly declared binding
    pub fn apply_to<T: 'static>(&self, builder: ScopedBindingBuilder<'_, T>) {
        match *self {
            Scoping::Unscoped => {}
            Scoping::Singleton => builder.in_singleton(),
            Scoping::EagerSingleton => builder.as_eager_singleton(),
            Scoping::Scoped(scope_data) => builder.in_scope(scope_data),
        }
    }
}

impl Display for Scoping {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Scoping::Unscoped => f.write_str("unscoped"),
            Scoping::Singleton => f.write_str("singleton"),
            Scoping::EagerSingleton => f.write_str("eager singleton"),
            Scoping::Scoped(ScopeData { name, priority }) => write!(f, "{name} ({priority} priority)"),
        }
    }
}

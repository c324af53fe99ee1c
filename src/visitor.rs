use alloc::boxed::Box;
use core::any::{Any, TypeId};

use self::token::Token;
use crate::binding::{BindingCore, LinkedKeyBinding, ProviderInstanceBinding, UntargettedBinding};

/// Visits the target of a binding, producing `V`.
///
/// Every variant falls back to [`BindingTargetVisitor::visit_other`] unless overridden.
///
/// Provider instance bindings, and [`Binding`](crate::Binding) as a whole, can only be visited by
/// `'static` visitors producing `'static` outputs, since a provider with an extension visitor
/// identifies them by [`TypeId`]. Linked key and untargetted bindings accept borrowing visitors too.
pub trait BindingTargetVisitor<T, V> {
    fn visit_other(&mut self, binding: &BindingCore<T>) -> V;

    #[inline]
    fn visit_provider_instance(&mut self, binding: &ProviderInstanceBinding<T>) -> V {
        self.visit_other(binding.core())
    }

    #[inline]
    fn visit_linked_key(&mut self, binding: &LinkedKeyBinding<T>) -> V {
        self.visit_other(binding.core())
    }

    #[inline]
    fn visit_untargetted(&mut self, binding: &UntargettedBinding<T>) -> V {
        self.visit_other(binding.core())
    }
}

/// A visit in progress, as seen by a provider with an extension visitor.
///
/// The concrete visitor and its output type are erased, use [`visit_as`](#method.visit_as)
/// to reach a visitor type the provider knows about or [`ExtensionVisit::visit_generic`] otherwise.
/// Only the first visit counts, later ones are ignored.
///
/// The visitor itself is only reachable through these two paths:
///
/// ```compile_fail
/// use bindery::ExtensionVisit;
///
/// fn peek(visit: &mut dyn ExtensionVisit<u8>) {
///     let _ = visit.lend_visitor(Default::default(), core::any::TypeId::of::<()>(), core::any::TypeId::of::<u8>());
/// }
/// ```
pub trait ExtensionVisit<T> {
    /// Visits the binding as a plain provider instance binding
    fn visit_generic(&mut self, binding: &ProviderInstanceBinding<T>);

    fn is_visited(&self) -> bool;

    /// The concrete visitor if it is a `visitor` producing `output`.
    /// Lending it takes the visit, `None` once the visit is taken.
    #[doc(hidden)]
    fn lend_visitor(&mut self, token: Token, visitor: TypeId, output: TypeId) -> Option<&mut dyn Any>;

    /// Stores the output of the lent visitor.
    /// Outputs of another type or of a second visit are dropped.
    #[doc(hidden)]
    fn complete(&mut self, token: Token, output: Box<dyn Any>);
}

mod token {
    /// Only this crate can call the lending half of [`super::ExtensionVisit`]
    #[derive(Debug)]
    pub struct Token(());

    impl Token {
        #[inline]
        pub(in crate::visitor) const fn new() -> Self {
            Self(())
        }
    }
}

impl<T> dyn ExtensionVisit<T> + '_ {
    /// Runs `visit` if the visitor is a `Vis` producing `V` and nothing visited yet.
    /// Returns `false` without running it otherwise.
    pub fn visit_as<Vis: 'static, V: 'static>(&mut self, visit: impl FnOnce(&mut Vis) -> V) -> bool {
        let Some(visitor) = self
            .lend_visitor(Token::new(), TypeId::of::<Vis>(), TypeId::of::<V>())
            .and_then(|visitor| visitor.downcast_mut::<Vis>())
        else {
            return false;
        };

        let output = visit(visitor);
        self.complete(Token::new(), Box::new(output));
        true
    }
}

pub(crate) struct VisitAdapter<'a, Vis, V> {
    visitor: &'a mut Vis,
    lent: bool,
    output: Option<V>,
}

impl<'a, Vis, V> VisitAdapter<'a, Vis, V> {
    #[inline]
    pub(crate) fn new(visitor: &'a mut Vis) -> Self {
        Self {
            visitor,
            lent: false,
            output: None,
        }
    }

    #[inline]
    pub(crate) fn into_output(self) -> Option<V> {
        self.output
    }

    #[inline]
    fn is_taken(&self) -> bool {
        self.lent || self.output.is_some()
    }
}

impl<T, Vis, V> ExtensionVisit<T> for VisitAdapter<'_, Vis, V>
where
    Vis: BindingTargetVisitor<T, V> + 'static,
    V: 'static,
{
    fn visit_generic(&mut self, binding: &ProviderInstanceBinding<T>) {
        if !self.is_taken() {
            self.output = Some(self.visitor.visit_provider_instance(binding));
        }
    }

    #[inline]
    fn is_visited(&self) -> bool {
        self.is_taken()
    }

    fn lend_visitor(&mut self, _token: Token, visitor: TypeId, output: TypeId) -> Option<&mut dyn Any> {
        if self.is_taken() || visitor != TypeId::of::<Vis>() || output != TypeId::of::<V>() {
            return None;
        }
        self.lent = true;
        Some(&mut *self.visitor)
    }

    fn complete(&mut self, _token: Token, output: Box<dyn Any>) {
        if self.output.is_some() {
            return;
        }
        if let Ok(output) = output.downcast::<V>() {
            self.output = Some(*output);
        }
    }
}

use bindery::{
    instance, Binder, Binding, BindingCore, BindingTargetVisitor, DefaultScope::Request, Dependency, Elements, ExtensionVisit, InjectionPoint,
    InjectorRef, InstantiateErrorKind, Key, Provider, ProviderInstanceBinding, ProviderWithExtensionVisitor, Scoping, Source,
};
use std::{
    collections::BTreeSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

struct Greeter;
struct Clock;

#[derive(Debug, Default)]
struct GreeterProvider {
    calls: AtomicUsize,
}

impl PartialEq for GreeterProvider {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Provider<String> for GreeterProvider {
    fn get(&self) -> Result<String, InstantiateErrorKind> {
        let calls = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("hello #{calls}"))
    }

    fn injection_points(&self) -> BTreeSet<InjectionPoint> {
        BTreeSet::from([InjectionPoint::method_parameter::<GreeterProvider, _>("set_clock", 0, Key::<Clock>::new())])
    }
}

#[derive(Debug, PartialEq)]
struct Offline;

impl Provider<String> for Offline {
    fn get(&self) -> Result<String, InstantiateErrorKind> {
        Err(anyhow::anyhow!("greeting service offline").into())
    }
}

/// Tooling visitor that lists set elements
#[derive(Default)]
struct SetElements(Vec<&'static str>);

impl BindingTargetVisitor<Vec<&'static str>, bool> for SetElements {
    fn visit_other(&mut self, _binding: &BindingCore<Vec<&'static str>>) -> bool {
        false
    }
}

#[derive(Debug, PartialEq)]
struct SetProvider(Vec<&'static str>);

impl Provider<Vec<&'static str>> for SetProvider {
    fn get(&self) -> Result<Vec<&'static str>, InstantiateErrorKind> {
        Ok(self.0.clone())
    }

    fn as_extension_visitable(&self) -> Option<&dyn ProviderWithExtensionVisitor<Vec<&'static str>>> {
        Some(self)
    }
}

impl ProviderWithExtensionVisitor<Vec<&'static str>> for SetProvider {
    fn accept_extension_visitor(&self, visitor: &mut dyn ExtensionVisit<Vec<&'static str>>, binding: &ProviderInstanceBinding<Vec<&'static str>>) {
        let handled = visitor.visit_as(|elements: &mut SetElements| {
            elements.0.extend(&self.0);
            true
        });
        if !handled {
            visitor.visit_generic(binding);
        }
    }
}

fn greeter_elements() -> Elements {
    let mut binder = Binder::new();
    binder
        .with_source(Source::named("GreeterModule"))
        .bind(Key::<String>::qualified_with::<Greeter>())
        .to_provider(GreeterProvider::default())
        .in_scope(Request);
    binder.into_elements().unwrap()
}

fn provider_instance<T: 'static>(elements: &Elements, key: &Key<T>) -> ProviderInstanceBinding<T> {
    match elements.get(key) {
        Some(Binding::ProviderInstance(binding)) => binding.clone(),
        other => panic!("expected provider instance binding, got {other:?}"),
    }
}

#[test]
fn test_declared_binding() {
    let elements = greeter_elements();
    let binding = provider_instance(&elements, &Key::<String>::qualified_with::<Greeter>());
    let set_clock = InjectionPoint::method_parameter::<GreeterProvider, _>("set_clock", 0, Key::<Clock>::new());

    assert_eq!(binding.source(), &Source::named("GreeterModule"));
    assert_eq!(binding.scoping(), &Scoping::for_scope(Request));
    assert!(!binding.core().is_initialized());
    assert_eq!(binding.dependencies(), BTreeSet::from([Dependency::for_injection_point(set_clock)]));
}

#[test]
fn test_initialized_binding_produces_from_provider() {
    let elements = Arc::new(greeter_elements());
    let binding = provider_instance(&elements, &Key::<String>::qualified_with::<Greeter>());
    let injector: InjectorRef = elements.clone();

    let initialized = binding.initialize(injector);
    let factory = initialized.core().internal_factory().unwrap();
    let dependency = Dependency::get(Key::<String>::qualified_with::<Greeter>());

    assert_eq!(factory.produce(&dependency).unwrap(), "hello #0");
    assert_eq!(factory.produce(&dependency).unwrap(), "hello #1");
    assert_eq!(initialized, binding);

    let owner = initialized.core().injector().unwrap();
    assert!(owner.binding(Key::<String>::qualified_with::<Greeter>().raw()).is_some());
}

#[test]
fn test_provider_error_propagates() {
    let mut binder = Binder::new();
    binder.bind(Key::<String>::new()).to_provider(Offline);
    let elements = Arc::new(binder.into_elements().unwrap());

    let binding = provider_instance(&elements, &Key::<String>::new()).initialize(elements.clone());
    let err = binding
        .core()
        .internal_factory()
        .unwrap()
        .produce(&Dependency::get(Key::<String>::new()))
        .unwrap_err();

    assert_eq!(err.to_string(), "greeting service offline");
}

#[test]
fn test_rebinding_under_other_key() {
    let elements = greeter_elements();
    let binding = provider_instance(&elements, &Key::<String>::qualified_with::<Greeter>());

    let mut binder = Binder::new();
    binder.install(&elements);
    binding.with_key(Key::named("farewell")).apply_to(&mut binder);
    binding.with_scoping(Scoping::Singleton).with_key(Key::named("shared")).apply_to(&mut binder);

    let rebound = binder.into_elements().unwrap();
    assert_eq!(rebound.len(), 3);

    let farewell = provider_instance(&rebound, &Key::<String>::named("farewell"));
    let shared = provider_instance(&rebound, &Key::<String>::named("shared"));
    assert!(Arc::ptr_eq(farewell.user_supplied_provider(), binding.user_supplied_provider()));
    assert_eq!(farewell.scoping(), binding.scoping());
    assert_eq!(shared.scoping(), &Scoping::Singleton);
    assert_eq!(shared.injection_points(), binding.injection_points());
}

#[test]
fn test_extension_visitor() {
    let binding = ProviderInstanceBinding::deferred(
        Source::caller(),
        Key::<Vec<&'static str>>::named("languages"),
        Scoping::Unscoped,
        [],
        Arc::new(SetProvider(vec!["en", "fr"])),
    );
    let mut elements = SetElements::default();

    assert!(binding.accept_target_visitor(&mut elements));
    assert_eq!(elements.0, ["en", "fr"]);

    let plain = ProviderInstanceBinding::deferred(
        Source::caller(),
        Key::<Vec<&'static str>>::named("languages"),
        Scoping::Unscoped,
        [],
        Arc::new(instance(vec!["de"])),
    );
    assert!(!plain.accept_target_visitor(&mut elements));
    assert_eq!(elements.0, ["en", "fr"]);
}

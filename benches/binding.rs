#![allow(dead_code)]

use bindery::{instance, Binder, Binding, DefaultScope::*, Dependency, Elements, InjectionPoint, Key, ProviderInstanceBinding, Scoping, SharedProvider, Source};
use criterion::{criterion_group, criterion_main, Criterion};
use std::{hint::black_box, sync::Arc};

struct A;
struct B;
struct C;
struct CA;

#[inline]
fn binder_into_elements() -> Elements {
    let mut binder = Binder::new();
    binder.bind(Key::<u8>::new()).to_instance(1).in_scope(App);
    binder.bind(Key::<u16>::new()).to_instance(2).in_scope(Session);
    binder.bind(Key::<u32>::new()).to_instance(3).in_scope(Request);
    binder.bind(Key::<u64>::new()).to_instance(4).in_scope(Action);
    binder.bind(Key::<u128>::new()).to_instance(5).in_scope(Step);
    binder.bind(Key::<A>::new()).to(Key::<B>::new()).in_singleton();
    binder.bind(Key::<C>::new()).as_eager_singleton();
    binder.into_elements().unwrap()
}

#[inline]
fn binding_with_points() -> ProviderInstanceBinding<String> {
    let provider: SharedProvider<String> = Arc::new(instance("hello".to_owned()));
    ProviderInstanceBinding::deferred(
        Source::caller(),
        Key::named("greeting"),
        Scoping::for_scope(Request),
        [
            InjectionPoint::field::<A, _>("b", Key::<B>::new()),
            InjectionPoint::field::<A, _>("c", Key::<C>::new()),
            InjectionPoint::constructor_parameter::<C, _>(0, Key::<CA>::new()),
            InjectionPoint::method_parameter::<C, _>("set_a", 0, Key::<A>::new()),
        ],
        provider,
    )
}

fn criterion_benchmark(c: &mut Criterion) {
    let binding = binding_with_points();
    let elements = Arc::new(binder_into_elements());
    let initialized = binding.initialize(elements.clone());
    let factory = initialized.core().internal_factory().unwrap().clone();
    let dependency = Dependency::get(Key::<String>::named("greeting"));

    c.bench_function("binder_into_elements", |b| b.iter(binder_into_elements))
        .bench_function("binding_dependencies", |b| b.iter(|| black_box(&binding).dependencies()))
        .bench_function("binding_with_key", |b| b.iter(|| black_box(&binding).with_key(Key::named("farewell"))))
        .bench_function("binding_with_scoping", |b| b.iter(|| black_box(&binding).with_scoping(Scoping::Singleton)))
        .bench_function("binding_eq", |b| b.iter(|| black_box(&binding) == black_box(&initialized)))
        .bench_function("binding_apply_to", |b| {
            b.iter(|| {
                let mut binder = Binder::new();
                Binding::from(binding.clone()).apply_to(&mut binder);
                binder.into_elements().unwrap()
            })
        })
        .bench_function("factory_produce", |b| b.iter(|| factory.produce(black_box(&dependency)).unwrap()))
        .bench_function("elements_get", |b| b.iter(|| elements.get(black_box(&Key::<u32>::new())).is_some()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

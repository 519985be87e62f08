use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use wiring::container::registry::SingletonStore;
use wiring::prelude::*;
use wiring::provider;

struct X;

#[component]
impl X {
    #[inject]
    fn new() -> Self {
        Self
    }
}

/// A builder with its own registration helpers.
struct ExtendedBuilder {
    inner: ContainerBuilder,
}

impl ExtendedBuilder {
    fn new() -> Self {
        Self {
            inner: ContainerBuilder::new(),
        }
    }

    fn register_greeting(&mut self, text: &str) -> Result<&mut TypeConfig, RegistryError> {
        self.inner
            .register_instance(Arc::new(text.to_owned()), "greeting")
    }
}

impl Registry for ExtendedBuilder {
    fn from_builder(builder: ContainerBuilder) -> Self {
        Self { inner: builder }
    }

    fn as_builder(&self) -> &ContainerBuilder {
        &self.inner
    }

    fn as_builder_mut(&mut self) -> &mut ContainerBuilder {
        &mut self.inner
    }
}

struct GreetingModule;

impl Module for GreetingModule {
    fn configure(&self, builder: &mut ContainerBuilder) -> Result<(), Box<dyn Error + Send + Sync>> {
        builder.register_instance(Arc::new(String::from("hello")), "greeting")?;
        builder.register_as(provider::component::<X>(), "x")?;
        Ok(())
    }
}

#[test]
fn container_is_created_from_empty_builder() {
    let container = ContainerBuilder::new().container().unwrap();
    assert!(container.aliases().is_empty());
}

#[test]
fn extended_builder_is_derived_from_its_container() -> Result<(), Box<dyn Error>> {
    let mut builder = ExtendedBuilder::new();
    builder.register_greeting("hello")?;
    let container: Container<ExtendedBuilder> = builder.container()?;

    let mut derived: ExtendedBuilder = container.builder();
    assert_eq!(derived.as_builder().types().len(), 1);

    derived.register_greeting("bonjour")?;
    let derived = derived.container()?;
    let greeting: Arc<String> = derived.get("greeting")?;
    assert_eq!(*greeting, "bonjour");

    let greeting: Arc<String> = container.get("greeting")?;
    assert_eq!(*greeting, "hello");
    Ok(())
}

#[test]
fn register_adds_component() {
    let mut builder = ContainerBuilder::new();
    builder
        .register_as(provider::component::<X>(), "x")
        .unwrap();

    let container = builder.container().unwrap();
    assert!(container.get::<Arc<X>>("x").is_ok());
}

#[test]
fn register_adds_factory() {
    let mut builder = ContainerBuilder::new();
    builder
        .register_as(factory(|_| Ok(Arc::new(X))), "x")
        .unwrap();

    let container = builder.container().unwrap();
    assert!(container.get::<Arc<X>>("x").is_ok());
}

#[test]
fn register_without_alias_instantiates_on_container_creation() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut builder = ContainerBuilder::new();
    builder.register(factory({
        let counter = Arc::clone(&counter);
        move |_| Ok(counter.fetch_add(1, Ordering::SeqCst))
    }));

    assert_eq!(counter.load(Ordering::SeqCst), 0);
    let _container = builder.container().unwrap();
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn register_fails_when_alias_is_invalid() {
    let mut builder = ContainerBuilder::new();

    for reserved in ["get", "get_all", "create_instance", "has"] {
        let err = builder
            .register_as(factory(|_| Ok(Arc::new(X))), reserved)
            .err()
            .unwrap();
        assert!(matches!(err, RegistryError::ReservedAlias { .. }));
    }

    assert!(matches!(
        builder.register_as(factory(|_| Ok(Arc::new(X))), ""),
        Err(RegistryError::EmptyAlias)
    ));

    let config = builder
        .register_as(factory(|_| Ok(Arc::new(X))), "x")
        .unwrap();
    let err = config.as_alias("x").err().unwrap();
    assert_eq!(err.to_string(), "alias \"x\" is already registered for the type");

    assert_eq!(builder.types().len(), 1);
}

#[test]
fn install_registers_module_types() -> Result<(), Box<dyn Error>> {
    let mut builder = ContainerBuilder::new();
    builder.install(Configuration::new().with(GreetingModule))?;

    let container = builder.container()?;
    let greeting: Arc<String> = container.get("greeting")?;
    assert_eq!(*greeting, "hello");
    assert_eq!(container.aliases(), ["greeting", "x"]);
    Ok(())
}

#[test]
fn with_options_shares_singleton_store() -> Result<(), Box<dyn Error>> {
    let singletons = SingletonStore::new();

    let mut first = ContainerBuilder::with_options(BuilderOptions {
        types: Vec::new(),
        singletons: singletons.clone(),
    });
    first
        .register_as(factory(|_| Ok(Arc::new(X))), "x")?
        .as_single_instance();
    let first = first.container()?;

    let second = ContainerBuilder::with_options(BuilderOptions {
        types: first.builder().types().to_vec(),
        singletons: singletons.clone(),
    })
    .container()?;

    let x1: Arc<X> = first.get("x")?;
    let x2: Arc<X> = second.get("x")?;
    assert!(Arc::ptr_eq(&x1, &x2));
    assert_eq!(singletons.len(), 1);
    Ok(())
}

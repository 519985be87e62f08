use std::error::Error;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use wiring::prelude::*;
use wiring::provider;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut builder = ContainerBuilder::new();
    builder.install(AppModule::new("greeter"))?;
    let container = builder.container()?;

    let app: Arc<App> = container.get("app")?;
    app.run();

    // A derived container shares the sink but builds its own app.
    let mut derived = container.builder();
    derived.register_instance("greeter (derived)", "app_name")?;
    let derived = derived.container()?;
    let app: Arc<App> = derived.get("app")?;
    app.run();

    Ok(())
}

struct AppModule {
    app_name: &'static str,
}

impl AppModule {
    fn new(app_name: &'static str) -> Self {
        Self { app_name }
    }
}

impl Module for AppModule {
    fn configure(&self, builder: &mut ContainerBuilder) -> Result<(), Box<dyn Error + Send + Sync>> {
        builder.register_instance(self.app_name, "app_name")?;
        builder.register_instance(Arc::new(TracingLogger) as Arc<dyn Logger>, LOGGER_ALIAS)?;

        builder
            .register_as(provider::component::<ConsoleSink>(), "sink")?
            .as_single_instance();
        builder.register_as(provider::component::<EnglishGreeter>(), "greeter")?;
        builder.register_as(provider::component::<ChineseGreeter>(), "greeter")?;
        builder.register_as(provider::component::<App>(), "app")?;

        Ok(())
    }
}

trait Sink: Send + Sync + 'static {
    fn write(&self, app_name: &str, message: &str);
}

struct ConsoleSink;

#[component(Arc<dyn Sink>, Arc::new)]
impl ConsoleSink {
    #[inject]
    fn new() -> Self {
        Self
    }
}

impl Sink for ConsoleSink {
    fn write(&self, app_name: &str, message: &str) {
        println!("[{app_name}] {message}");
    }
}

trait Greeter: Send + Sync + 'static {
    fn greeting(&self) -> &'static str;
}

struct EnglishGreeter;

#[component(Arc<dyn Greeter>, Arc::new)]
impl EnglishGreeter {
    #[inject]
    fn new() -> Self {
        Self
    }
}

impl Greeter for EnglishGreeter {
    fn greeting(&self) -> &'static str {
        "Hello World!"
    }
}

struct ChineseGreeter;

#[component(Arc<dyn Greeter>, Arc::new)]
impl ChineseGreeter {
    #[inject]
    fn new() -> Self {
        Self
    }
}

impl Greeter for ChineseGreeter {
    fn greeting(&self) -> &'static str {
        "你好世界!"
    }
}

struct App {
    app_name: &'static str,
    sink: Arc<dyn Sink>,
    greeters: Vec<Arc<dyn Greeter>>,
}

#[component]
impl App {
    #[inject]
    fn new(
        app_name: &'static str,
        sink: Arc<dyn Sink>,
        #[all("greeter")] greeters: Vec<Arc<dyn Greeter>>,
    ) -> Self {
        Self {
            app_name,
            sink,
            greeters,
        }
    }

    fn run(&self) {
        self.sink
            .write(self.app_name, "Greeting from wiring managed objects:");
        for greeter in &self.greeters {
            self.sink.write(self.app_name, greeter.greeting());
        }
    }
}

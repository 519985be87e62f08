use tracing::Level;

/// The alias under which a [`Logger`] is looked up.
pub const LOGGER_ALIAS: &str = "logger";

/// An optional collaborator notified whenever a container creates an
/// instance.
///
/// Register it as an `Arc<dyn Logger>` under [`LOGGER_ALIAS`]. The container
/// calls [`Logger::log`] with [`Level::TRACE`] and a message naming the
/// resolution path, such as `service.repository instance created`.
pub trait Logger: Send + Sync + 'static {
    fn log(&self, level: Level, message: &str);
}

/// A [`Logger`] forwarding every message to [`tracing`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str) {
        if level == Level::ERROR {
            tracing::error!(target: "wiring::logger", "{message}");
        } else if level == Level::WARN {
            tracing::warn!(target: "wiring::logger", "{message}");
        } else if level == Level::INFO {
            tracing::info!(target: "wiring::logger", "{message}");
        } else if level == Level::DEBUG {
            tracing::debug!(target: "wiring::logger", "{message}");
        } else {
            tracing::trace!(target: "wiring::logger", "{message}");
        }
    }
}

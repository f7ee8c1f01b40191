mod gracefullshutdown;
mod logs;
mod metadata;
mod metrics;
mod otel;
mod tracer;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::metadata::HeaderInjector;
pub use self::metrics::{Method, Metrics, Status, SystemMetrics, run_metrics_collector};
pub use self::otel::{Telemetry, TracingContext};
pub use self::tracer::OperationTracer;

use crate::{
    errors::ServiceError,
    utils::{Method, Metrics, Status, TracingContext},
};
use opentelemetry::{
    Context, KeyValue,
    global::{self, BoxedTracer},
    trace::{Span, SpanKind, TraceContextExt, Tracer},
};
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::{sync::Mutex, time::Instant};
use tracing::{error, info, warn};

/// Span and request-metric bookkeeping shared by every service operation.
///
/// Each operation calls [`OperationTracer::start`] and then exactly one of
/// `success`, `rejected` or `failure`. Rejections are caller mistakes (404,
/// validation) and log at `warn`; failures log at `error`.
#[derive(Clone)]
pub struct OperationTracer {
    tracer_name: &'static str,
    metrics: Metrics,
}

enum Outcome {
    Success,
    Rejected,
    Failure,
}

impl OperationTracer {
    pub async fn new(
        tracer_name: &'static str,
        metric_prefix: &str,
        registry: &Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics = Metrics::new();

        let mut registry = registry.lock().await;
        registry.register(
            format!("{metric_prefix}_request_counter"),
            format!("Total number of requests to the {tracer_name}"),
            metrics.request_counter.clone(),
        );
        registry.register(
            format!("{metric_prefix}_request_duration"),
            format!("Histogram of request durations for the {tracer_name}"),
            metrics.request_duration.clone(),
        );

        Self {
            tracer_name,
            metrics,
        }
    }

    fn tracer(&self) -> BoxedTracer {
        global::tracer(self.tracer_name)
    }

    pub fn start(&self, operation_name: &str, attributes: Vec<KeyValue>) -> TracingContext {
        let start_time = Instant::now();
        let tracer = self.tracer();
        let mut span = tracer
            .span_builder(operation_name.to_string())
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        info!("Starting operation: {operation_name}");

        span.add_event(
            "Operation started",
            vec![KeyValue::new("operation", operation_name.to_string())],
        );

        let cx = Context::current_with_span(span);
        TracingContext { cx, start_time }
    }

    pub fn success(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, Outcome::Success, message);
    }

    pub fn rejected(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, Outcome::Rejected, message);
    }

    pub fn failure(&self, tracing_ctx: &TracingContext, method: Method, message: &str) {
        self.complete(tracing_ctx, method, Outcome::Failure, message);
    }

    /// Closes the span from a service result, picking the outcome from the error kind.
    pub fn finish<T>(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        result: &Result<T, ServiceError>,
        success_message: &str,
    ) {
        match result {
            Ok(_) => self.success(tracing_ctx, method, success_message),
            Err(e) if e.is_client_error() => self.rejected(tracing_ctx, method, &e.to_string()),
            Err(e) => self.failure(tracing_ctx, method, &e.to_string()),
        }
    }

    fn complete(
        &self,
        tracing_ctx: &TracingContext,
        method: Method,
        outcome: Outcome,
        message: &str,
    ) {
        let elapsed = tracing_ctx.start_time.elapsed().as_secs_f64();
        let (status_str, status) = match outcome {
            Outcome::Success => ("SUCCESS", Status::Success),
            Outcome::Rejected | Outcome::Failure => ("ERROR", Status::Error),
        };

        tracing_ctx.cx.span().add_event(
            "Operation completed",
            vec![
                KeyValue::new("status", status_str),
                KeyValue::new("duration_secs", elapsed.to_string()),
                KeyValue::new("message", message.to_string()),
            ],
        );

        match outcome {
            Outcome::Success => info!("✅ Operation completed successfully: {message}"),
            Outcome::Rejected => warn!("⚠️ Operation rejected: {message}"),
            Outcome::Failure => error!("❌ Operation failed: {message}"),
        }

        self.metrics.record(method, status, elapsed);

        tracing_ctx.cx.span().end();
    }
}

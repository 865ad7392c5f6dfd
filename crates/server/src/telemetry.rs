use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_SERVICE_NAME: &str = "casedesk";

/// Keep the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Runtime for the OTLP gRPC exporters. `dioxus::serve` may call the init
/// closure before a Tokio context is entered, and tonic needs one.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Configure OTLP trace and log export, if an endpoint is configured.
///
/// Dioxus owns the tracing subscriber; this only registers the global
/// tracer provider and bridges the `log` crate.
///
/// Environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address
///   - `OTEL_SERVICE_NAME`: service name tag (default `casedesk`)
///   - `DEPLOY_ENV`: deployment environment tag (default `development`)
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        tracing::info!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return;
    };
    if let Err(e) = install_exporters(&endpoint) {
        tracing::error!(error = %e, endpoint = %endpoint, "Telemetry setup failed");
    }
}

fn install_exporters(endpoint: &str) -> Result<(), String> {
    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    if OTEL_RUNTIME.get().is_none() {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .build()
            .map_err(|e| format!("failed to create OTEL runtime: {e}"))?;
        let _ = OTEL_RUNTIME.set(rt);
    }
    let rt = OTEL_RUNTIME
        .get()
        .ok_or_else(|| "OTEL runtime missing".to_string())?;
    let _guard = rt.enter();

    let tls = endpoint.starts_with("https://");

    let mut span_builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint);
    if tls {
        span_builder = span_builder.with_tls_config(
            opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots(),
        );
    }
    let exporter = span_builder
        .build()
        .map_err(|e| format!("failed to create OTLP span exporter: {e}"))?;

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(provider);

    let mut log_builder = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint);
    if tls {
        log_builder = log_builder.with_tls_config(
            opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots(),
        );
    }
    let log_exporter = log_builder
        .build()
        .map_err(|e| format!("failed to create OTLP log exporter: {e}"))?;

    let logger_provider = opentelemetry_sdk::logs::SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();
    let _ = LOGGER_PROVIDER.set(logger_provider);

    // The `log` bridge is separate from the tracing subscriber Dioxus installs.
    if let Some(provider) = LOGGER_PROVIDER.get() {
        let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(provider);
        match log::set_boxed_logger(Box::new(bridge)) {
            Ok(()) => log::set_max_level(log::LevelFilter::Info),
            Err(_) => tracing::warn!("Log bridge skipped, a logger is already set"),
        }
    }

    tracing::info!(version = APP_VERSION, endpoint = %endpoint, "Telemetry initialized");
    Ok(())
}

/// Span name for a request: method plus path with trailing ids trimmed,
/// so `/api/delete_case/17` and `/api/delete_case/18` share a name.
fn route_name(method: &str, path: &str) -> String {
    let route = path.trim_end_matches(|c: char| c.is_ascii_digit());
    format!("{method} {route}")
}

/// Tower layer that creates an OpenTelemetry span for each HTTP request.
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer(DEFAULT_SERVICE_NAME);
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        };
        let attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path.clone()),
            KeyValue::new("http.user_agent", header("user-agent")),
            KeyValue::new("http.request_id", header("x-request-id")),
        ];

        let span = tracer
            .span_builder(route_name(&method, &path))
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));

            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}

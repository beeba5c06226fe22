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
const DEFAULT_SERVICE_NAME: &str = "oasis";

/// Keep the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Tokio runtime for the OTLP gRPC exporters. Tonic's `connect_lazy()`
/// calls `tokio::spawn`, and the runtime context is not guaranteed to be
/// entered when `dioxus::serve` runs our init closure.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Exporter settings read from the environment.
struct OtlpSettings {
    endpoint: String,
    ingestion_key: Option<String>,
}

impl OtlpSettings {
    fn from_env() -> Option<Self> {
        let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok()?;
        let ingestion_key = std::env::var("SIGNOZ_INGESTION_KEY")
            .ok()
            .filter(|k| !k.is_empty());
        Some(Self {
            endpoint,
            ingestion_key,
        })
    }

    fn metadata(&self) -> Option<opentelemetry_otlp::tonic_types::metadata::MetadataMap> {
        let key = self.ingestion_key.as_ref()?;
        let value = match key.parse() {
            Ok(value) => value,
            Err(_) => {
                eprintln!("SIGNOZ_INGESTION_KEY is not a valid header value; ignoring it");
                return None;
            }
        };
        let mut metadata = opentelemetry_otlp::tonic_types::metadata::MetadataMap::new();
        metadata.insert("signoz-ingestion-key", value);
        Some(metadata)
    }

    fn tls(&self) -> Option<opentelemetry_otlp::tonic_types::transport::ClientTlsConfig> {
        self.endpoint.starts_with("https://").then(|| {
            opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots()
        })
    }
}

/// Set up OTLP trace and log export and register the providers globally.
///
/// Dioxus owns the `tracing` subscriber; this only wires the exporters so
/// request spans from `OtelTraceLayer` and `log` records reach the collector.
///
/// Environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address (required)
///   - `OTEL_SERVICE_NAME`: service name tag (default `oasis`)
///   - `SIGNOZ_INGESTION_KEY`: cloud access token (optional)
///   - `DEPLOY_ENV`: deployment environment tag (default `development`)
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    let Some(settings) = OtlpSettings::from_env() else {
        eprintln!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return;
    };

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    let rt = match otel_runtime() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create OTEL runtime: {e}");
            return;
        }
    };
    let _guard = rt.enter();

    let mut span_builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&settings.endpoint);
    if let Some(tls) = settings.tls() {
        span_builder = span_builder.with_tls_config(tls);
    }
    if let Some(metadata) = settings.metadata() {
        span_builder = span_builder.with_metadata(metadata);
    }
    let span_exporter = match span_builder.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            eprintln!("Failed to create OTLP span exporter: {e}");
            return;
        }
    };

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(tracer_provider);

    let mut log_builder = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&settings.endpoint);
    if let Some(tls) = settings.tls() {
        log_builder = log_builder.with_tls_config(tls);
    }
    if let Some(metadata) = settings.metadata() {
        log_builder = log_builder.with_metadata(metadata);
    }
    let log_exporter = match log_builder.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            eprintln!("Failed to create OTLP log exporter: {e}; exporting traces only");
            return;
        }
    };

    let logger_provider = LOGGER_PROVIDER.get_or_init(|| {
        opentelemetry_sdk::logs::SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    // Bridge the `log` crate to OpenTelemetry, separate from the Dioxus
    // `tracing` subscriber.
    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => log::set_max_level(log::LevelFilter::Info),
        Err(_) => eprintln!("Log bridge skipped, log crate logger already set"),
    }

    let mode = if settings.ingestion_key.is_some() {
        "cloud"
    } else {
        "local"
    };
    eprintln!(
        "Telemetry initialized v{APP_VERSION}, exporting to {} ({mode})",
        settings.endpoint
    );
}

/// The exporter runtime, created on first use.
fn otel_runtime() -> std::io::Result<&'static tokio::runtime::Runtime> {
    if let Some(rt) = OTEL_RUNTIME.get() {
        return Ok(rt);
    }
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(1)
        .build()?;
    Ok(OTEL_RUNTIME.get_or_init(|| rt))
}

/// Collapse numeric path segments so spans group by route.
///
/// `/api/cabins/42` becomes `/api/cabins/{id}`; photo keys under
/// `/api/cabin-images/` become `{key}`.
fn route_template(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("/api/cabin-images/") {
        if !rest.is_empty() {
            return "/api/cabin-images/{key}".to_string();
        }
    }
    path.split('/')
        .map(|segment| {
            if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Tower layer that creates an OpenTelemetry span for each HTTP request.
///
/// Captures method, route, user-agent, request ID, and response status.
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
        let route = route_template(&path);

        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string()
        };

        let attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path),
            KeyValue::new("http.route", route.clone()),
            KeyValue::new("http.user_agent", header("user-agent")),
            KeyValue::new("http.request_id", header("x-request-id")),
        ];

        let span = tracer
            .span_builder(format!("{method} {route}"))
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_segments_become_id() {
        assert_eq!(route_template("/api/cabins/42"), "/api/cabins/{id}");
        assert_eq!(route_template("/api/cabins"), "/api/cabins");
        assert_eq!(route_template("/"), "/");
    }

    #[test]
    fn image_keys_are_collapsed() {
        assert_eq!(
            route_template("/api/cabin-images/0b6f-cabin-001.jpg"),
            "/api/cabin-images/{key}"
        );
    }

    #[test]
    fn mixed_segments_are_kept() {
        assert_eq!(route_template("/cabins/v2"), "/cabins/v2");
    }
}

use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{tonic_types, WithExportConfig, WithTonicConfig};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};

use crate::auth::cookies;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_SERVICE_NAME: &str = "school-portal";
const INGESTION_KEY_HEADER: &str = "signoz-ingestion-key";

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Keep the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Tokio runtime for the OTLP gRPC exporters. Tonic's `connect_lazy()`
/// calls `tokio::spawn`, and `dioxus::serve` may run our init closure
/// before its own runtime context is entered.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// Exporter settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct OtelSettings {
    /// Collector gRPC address, e.g. `http://localhost:4317`.
    pub endpoint: String,
    pub service_name: String,
    pub environment: String,
    /// Cloud ingestion key sent as gRPC metadata when present.
    pub ingestion_key: Option<String>,
}

impl OtelSettings {
    /// Build settings from an env lookup. `None` when no endpoint is configured.
    ///
    ///   - `OTEL_EXPORTER_OTLP_ENDPOINT` collector address (required)
    ///   - `OTEL_SERVICE_NAME` service name tag (default `school-portal`)
    ///   - `OTEL_INGESTION_KEY` ingestion token (optional)
    ///   - `DEPLOY_ENV` deployment environment tag (default `development`)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.is_empty())?;
        Some(Self {
            endpoint,
            service_name: lookup("OTEL_SERVICE_NAME")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            environment: lookup("DEPLOY_ENV")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "development".to_string()),
            ingestion_key: lookup("OTEL_INGESTION_KEY").filter(|k| !k.is_empty()),
        })
    }

    fn uses_tls(&self) -> bool {
        self.endpoint.starts_with("https://")
    }

    fn metadata(&self) -> Result<Option<tonic_types::metadata::MetadataMap>, BoxError> {
        let Some(key) = &self.ingestion_key else {
            return Ok(None);
        };
        let mut metadata = tonic_types::metadata::MetadataMap::new();
        metadata.insert(INGESTION_KEY_HEADER, key.parse()?);
        Ok(Some(metadata))
    }
}

/// Set up OTLP trace and log export when `OTEL_EXPORTER_OTLP_ENDPOINT` is set.
///
/// Dioxus owns the tracing subscriber; this only registers the global
/// tracer provider (used by [`OtelTraceLayer`]) and bridges the `log`
/// crate to the OTLP log exporter.
pub fn init_telemetry() {
    let _ = dotenvy::dotenv();

    let Some(settings) = OtelSettings::from_lookup(|k| std::env::var(k).ok()) else {
        eprintln!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return;
    };

    match install(&settings) {
        Ok(()) => eprintln!(
            "Telemetry initialized v{APP_VERSION}, traces + logs exporting to {}",
            settings.endpoint
        ),
        Err(e) => eprintln!("Telemetry disabled, exporter setup failed: {e}"),
    }
}

fn otel_runtime() -> Result<&'static tokio::runtime::Runtime, BoxError> {
    if let Some(rt) = OTEL_RUNTIME.get() {
        return Ok(rt);
    }
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .worker_threads(1)
        .build()?;
    Ok(OTEL_RUNTIME.get_or_init(|| rt))
}

fn install(settings: &OtelSettings) -> Result<(), BoxError> {
    let _guard = otel_runtime()?.enter();
    let metadata = settings.metadata()?;

    let mut span_builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&settings.endpoint);
    if settings.uses_tls() {
        span_builder = span_builder.with_tls_config(
            tonic_types::transport::ClientTlsConfig::new().with_native_roots(),
        );
    }
    if let Some(md) = metadata.clone() {
        span_builder = span_builder.with_metadata(md);
    }
    let span_exporter = span_builder.build()?;

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(settings.service_name.clone())
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new(
            "deployment.environment",
            settings.environment.clone(),
        ))
        .build();

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(provider);

    let mut log_builder = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&settings.endpoint);
    if settings.uses_tls() {
        log_builder = log_builder.with_tls_config(
            tonic_types::transport::ClientTlsConfig::new().with_native_roots(),
        );
    }
    if let Some(md) = metadata {
        log_builder = log_builder.with_metadata(md);
    }
    let log_exporter = log_builder.build()?;

    let logger_provider = LOGGER_PROVIDER.get_or_init(|| {
        opentelemetry_sdk::logs::SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    // The `log` bridge is independent of the tracing subscriber Dioxus installs.
    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => log::set_max_level(log::LevelFilter::Info),
        Err(_) => eprintln!("Log bridge skipped, a `log` logger is already set"),
    }

    Ok(())
}

/// Detect client platform from User-Agent and optional X-Client-Platform header.
///
/// The explicit header wins. Dioxus native clients send no User-Agent and
/// show up as "native" unless they set the header.
fn detect_platform(ua: &str, explicit: Option<&str>) -> &'static str {
    if let Some(p) = explicit {
        return match p {
            "ios" => "ios",
            "android" => "android",
            "desktop" => "desktop",
            "mobile" => "mobile",
            "web" => "web",
            _ => "unknown",
        };
    }

    if ua == "unknown" || ua.is_empty() {
        return "native";
    }
    if ua.contains("iPhone") || ua.contains("iPad") || ua.contains("CFNetwork") {
        "ios"
    } else if ua.contains("Android") {
        "android"
    } else if ua.contains("Mozilla") || ua.contains("Chrome") || ua.contains("Safari") {
        "web"
    } else {
        "native"
    }
}

/// Collapse record ids in a path so span names stay low-cardinality.
///
/// Segments that are all digits, or 24-char hex object ids, become `:id`.
fn span_route(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            let numeric = !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit());
            let object_id = segment.len() == 24 && segment.chars().all(|c| c.is_ascii_hexdigit());
            if numeric || object_id {
                ":id"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Tower layer that creates an OpenTelemetry span for each HTTP request.
///
/// Captures method, route, user-agent, client platform, request id,
/// response status and whether the caller carried a session.
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

        let user_agent = req
            .headers()
            .get("user-agent")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let explicit_platform = req
            .headers()
            .get("x-client-platform")
            .and_then(|v| v.to_str().ok());
        let client_platform = detect_platform(&user_agent, explicit_platform);

        let request_id = req
            .headers()
            .get(crate::school_api::REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let auth_status = if cookies::extract_session_token(req.headers()).is_some() {
            "session"
        } else {
            "anonymous"
        };

        let attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path.clone()),
            KeyValue::new("http.user_agent", user_agent),
            KeyValue::new("client.platform", client_platform),
            KeyValue::new("http.request_id", request_id),
            KeyValue::new("auth.status", auth_status),
        ];

        let span = tracer
            .span_builder(format!("{} {}", &method, span_route(&path)))
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

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
const DEFAULT_SERVICE_NAME: &str = "password-reset";

/// Keep the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Tonic's `connect_lazy()` needs a Tokio runtime context, which is not
/// guaranteed inside the `dioxus::serve` init closure.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

/// OTLP export settings.
///
/// - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address (required)
/// - `OTEL_SERVICE_NAME`: service name tag
/// - `SIGNOZ_INGESTION_KEY`: SigNoz Cloud access token
/// - `DEPLOY_ENV`: deployment environment tag (default `development`)
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    pub endpoint: String,
    pub service_name: String,
    pub environment: String,
    pub ingestion_key: Option<String>,
}

impl TelemetryConfig {
    /// Read settings from the process environment (after loading `.env`).
    pub fn from_env() -> Option<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|e| !e.is_empty())?;
        Some(Self {
            endpoint,
            service_name: lookup("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
            environment: lookup("DEPLOY_ENV").unwrap_or_else(|| "development".to_string()),
            ingestion_key: lookup("SIGNOZ_INGESTION_KEY").filter(|k| !k.is_empty()),
        })
    }

    fn uses_tls(&self) -> bool {
        self.endpoint.starts_with("https://")
    }

    fn mode(&self) -> &'static str {
        if self.ingestion_key.is_some() {
            "cloud"
        } else {
            "local"
        }
    }

    /// Apply TLS and the ingestion key to a tonic exporter builder.
    fn configure<B: WithTonicConfig>(&self, mut builder: B) -> B {
        if self.uses_tls() {
            builder = builder.with_tls_config(
                opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new()
                    .with_native_roots(),
            );
        }
        if let Some(key) = &self.ingestion_key {
            match key.parse() {
                Ok(value) => {
                    let mut metadata =
                        opentelemetry_otlp::tonic_types::metadata::MetadataMap::new();
                    metadata.insert("signoz-ingestion-key", value);
                    builder = builder.with_metadata(metadata);
                }
                Err(_) => tracing::warn!("SIGNOZ_INGESTION_KEY is not a valid header value"),
            }
        }
        builder
    }
}

/// Set up OTLP trace and log export.
///
/// Dioxus owns the tracing subscriber; this only registers the global
/// TracerProvider (used by [`OtelTraceLayer`]) and bridges the `log` crate.
pub fn init_telemetry() {
    let Some(config) = TelemetryConfig::from_env() else {
        tracing::info!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return;
    };

    if OTEL_RUNTIME.get().is_none() {
        let built = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .build();
        match built {
            Ok(rt) => {
                let _ = OTEL_RUNTIME.set(rt);
            }
            Err(e) => {
                tracing::error!("Failed to create OTEL runtime: {e}");
                return;
            }
        }
    }
    let Some(rt) = OTEL_RUNTIME.get() else {
        return;
    };
    let _guard = rt.enter();

    let span_exporter = config.configure(
        opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&config.endpoint),
    );
    let span_exporter = match span_exporter.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::error!("Failed to create OTLP span exporter: {e}");
            return;
        }
    };

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(config.service_name.clone())
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new(
            "deployment.environment",
            config.environment.clone(),
        ))
        .build();

    let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(tracer_provider);

    let log_exporter = config.configure(
        opentelemetry_otlp::LogExporter::builder()
            .with_tonic()
            .with_endpoint(&config.endpoint),
    );
    let log_exporter = match log_exporter.build() {
        Ok(exporter) => exporter,
        Err(e) => {
            tracing::error!("Failed to create OTLP log exporter: {e}");
            return;
        }
    };

    let logger_provider = LOGGER_PROVIDER.get_or_init(|| {
        opentelemetry_sdk::logs::SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    // `log` records go to OTLP; `tracing` stays with the Dioxus subscriber.
    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => log::set_max_level(log::LevelFilter::Info),
        Err(_) => tracing::warn!("log bridge skipped, a logger is already installed"),
    }

    tracing::info!(
        "Telemetry initialized v{APP_VERSION}: exporting to {} ({})",
        config.endpoint,
        config.mode()
    );
}

fn header<'a>(req: &'a Request<Body>, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Tower layer that creates an OpenTelemetry server span per HTTP request.
///
/// Records method, path, user agent, `x-client-platform`, request ID and the
/// response status.
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

        let attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path.clone()),
            KeyValue::new(
                "http.user_agent",
                header(&req, "user-agent").unwrap_or("unknown").to_string(),
            ),
            KeyValue::new(
                "client.platform",
                header(&req, "x-client-platform").unwrap_or("unknown").to_string(),
            ),
            KeyValue::new(
                "http.request_id",
                header(&req, "x-request-id").unwrap_or("").to_string(),
            ),
        ];

        let span = tracer
            .span_builder(format!("{method} {path}"))
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
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Option<TelemetryConfig> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        TelemetryConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn missing_endpoint_disables_telemetry() {
        assert_eq!(config_from(&[]), None);
        assert_eq!(config_from(&[("OTEL_EXPORTER_OTLP_ENDPOINT", "")]), None);
    }

    #[test]
    fn defaults_fill_optional_settings() {
        let config = config_from(&[("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317")])
            .unwrap();
        assert_eq!(config.service_name, "password-reset");
        assert_eq!(config.environment, "development");
        assert_eq!(config.ingestion_key, None);
        assert!(!config.uses_tls());
        assert_eq!(config.mode(), "local");
    }

    #[test]
    fn cloud_settings_are_picked_up() {
        let config = config_from(&[
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "https://ingest.us.signoz.cloud:443"),
            ("OTEL_SERVICE_NAME", "reset-web"),
            ("DEPLOY_ENV", "production"),
            ("SIGNOZ_INGESTION_KEY", "abc123"),
        ])
        .unwrap();
        assert!(config.uses_tls());
        assert_eq!(config.mode(), "cloud");
        assert_eq!(config.service_name, "reset-web");
        assert_eq!(config.environment, "production");
    }

    #[test]
    fn blank_ingestion_key_is_ignored() {
        let config = config_from(&[
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
            ("SIGNOZ_INGESTION_KEY", ""),
        ])
        .unwrap();
        assert_eq!(config.ingestion_key, None);
    }
}

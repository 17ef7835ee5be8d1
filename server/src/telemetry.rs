//! Logging setup.
//!
//! Console output always goes through `tracing_subscriber::fmt`, filtered by
//! `RUST_LOG`. When `OTEL_EXPORTER_OTLP_ENDPOINT` names a collector that
//! accepts a quick TCP connection, spans and log events are also exported over
//! OTLP/gRPC.

use opentelemetry::trace::TracerProvider;
use opentelemetry_appender_tracing::layer::OpenTelemetryTracingBridge;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::logs::SdkLoggerProvider;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use std::env;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_SERVICE_NAME: &str = "recipe-box-server";
const CONNECT_TIMEOUT: Duration = Duration::from_millis(100);

/// Providers that must outlive the subscriber so buffered telemetry is
/// flushed on shutdown.
#[derive(Default)]
pub struct TelemetryGuard {
    providers: Option<(SdkTracerProvider, SdkLoggerProvider)>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some((traces, logs)) = self.providers.take() {
            if let Err(e) = traces.shutdown() {
                eprintln!("failed to flush traces: {e}");
            }
            if let Err(e) = logs.shutdown() {
                eprintln!("failed to flush logs: {e}");
            }
        }
    }
}

fn collector_reachable(endpoint: &str) -> bool {
    let host_port = endpoint
        .trim_start_matches("http://")
        .trim_start_matches("https://")
        .trim_end_matches('/');

    host_port
        .to_socket_addrs()
        .ok()
        .and_then(|mut addrs| addrs.next())
        .map(|addr| TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT).is_ok())
        .unwrap_or(false)
}

fn build_providers(
    endpoint: &str,
    service_name: &str,
) -> Result<(SdkTracerProvider, SdkLoggerProvider), opentelemetry_otlp::ExporterBuildError> {
    let resource = Resource::builder()
        .with_service_name(service_name.to_string())
        .build();

    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;
    let traces = SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();

    let log_exporter = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;
    let logs = SdkLoggerProvider::builder()
        .with_batch_exporter(log_exporter)
        .with_resource(resource)
        .build();

    Ok((traces, logs))
}

/// Installs the global subscriber. Keep the returned guard alive for the
/// lifetime of the process.
pub fn init_telemetry() -> TelemetryGuard {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    let Ok(endpoint) = env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        registry.init();
        tracing::debug!("OTEL_EXPORTER_OTLP_ENDPOINT not set, using console logging only");
        return TelemetryGuard::default();
    };

    if !collector_reachable(&endpoint) {
        registry.init();
        tracing::info!(%endpoint, "OpenTelemetry collector not reachable, using console logging only");
        return TelemetryGuard::default();
    }

    let service_name =
        env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());

    match build_providers(&endpoint, &service_name) {
        Ok((traces, logs)) => {
            let tracer = traces.tracer(DEFAULT_SERVICE_NAME);
            opentelemetry::global::set_tracer_provider(traces.clone());

            registry
                .with(tracing_opentelemetry::layer().with_tracer(tracer))
                .with(OpenTelemetryTracingBridge::new(&logs))
                .init();

            tracing::info!(%endpoint, %service_name, "OpenTelemetry enabled, exporting traces and logs");
            TelemetryGuard {
                providers: Some((traces, logs)),
            }
        }
        Err(e) => {
            registry.init();
            tracing::warn!(%endpoint, error = %e, "failed to build OTLP exporters, using console logging only");
            TelemetryGuard::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    #[test]
    fn test_collector_reachable() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        assert!(collector_reachable(&format!("http://{addr}/")));

        drop(listener);
        assert!(!collector_reachable(&format!("http://{addr}")));
        assert!(!collector_reachable("not a host"));
    }

    #[tokio::test]
    async fn test_build_providers() {
        // Exporters connect lazily, so no collector is needed.
        let (traces, logs) = build_providers("http://127.0.0.1:4317", "recipe-box-test").unwrap();
        drop(TelemetryGuard {
            providers: Some((traces, logs)),
        });
    }
}

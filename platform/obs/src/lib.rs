use anyhow::{Result, anyhow};
use once_cell::sync::OnceCell;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::{self as sdk, Resource};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: OnceCell<()> = OnceCell::new();

const DEFAULT_FILTER: &str = "warn,registry_console=info,platform_api=info";

/// Configuration for tracing initialization.
#[derive(Clone, Debug)]
pub struct ObsConfig {
    pub service_name: &'static str,
    pub env_filter: Option<String>,
    pub otlp_endpoint: Option<String>,
    /// Colour output; off when stderr is redirected to a file.
    pub ansi: bool,
}

impl Default for ObsConfig {
    fn default() -> Self {
        Self {
            service_name: "registry-console",
            env_filter: None,
            otlp_endpoint: None,
            ansi: true,
        }
    }
}

/// Keeps the span exporter alive; dropping it flushes pending spans.
#[must_use = "dropping the guard immediately discards buffered spans"]
#[derive(Default)]
pub struct ObsGuard {
    provider: Option<sdk::trace::SdkTracerProvider>,
}

impl Drop for ObsGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(err) = provider.shutdown() {
                eprintln!("failed to flush spans: {err}");
            }
        }
    }
}

/// Install the tracing subscriber.
///
/// Events go to stderr so they never interleave with whatever the console
/// paints on stdout. Set `OTLP_ENDPOINT` (or `otlp_endpoint`) to also export
/// spans over OTLP/HTTP.
pub fn init_tracing(config: ObsConfig) -> Result<ObsGuard> {
    if INIT.get().is_some() {
        return Ok(ObsGuard::default());
    }

    let filter = config
        .env_filter
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string());

    let env_filter = EnvFilter::try_new(filter)?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.ansi)
        .with_target(false);
    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    let otlp_endpoint = config
        .otlp_endpoint
        .or_else(|| std::env::var("OTLP_ENDPOINT").ok())
        .filter(|endpoint| !endpoint.trim().is_empty());

    let guard = if let Some(endpoint) = otlp_endpoint {
        let exporter = SpanExporter::builder()
            .with_http()
            .with_protocol(Protocol::HttpBinary)
            .with_endpoint(endpoint)
            .build()?;

        let resource = Resource::builder()
            .with_service_name(config.service_name)
            .build();

        let provider = sdk::trace::SdkTracerProvider::builder()
            .with_resource(resource)
            .with_batch_exporter(exporter)
            .build();
        let tracer = provider.tracer(config.service_name);

        registry
            .with(tracing_opentelemetry::layer().with_tracer(tracer))
            .try_init()?;
        ObsGuard {
            provider: Some(provider),
        }
    } else {
        registry.try_init()?;
        ObsGuard::default()
    };

    INIT.set(())
        .map_err(|_| anyhow!("tracing already initialized"))?;
    Ok(guard)
}

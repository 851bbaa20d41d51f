//! Capture replay worker binary.
//!
//! Usage: `podium-worker [CAPTURE_PATH]`. Prints the analysis result, or an
//! error report, as JSON on stdout.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use podium_worker::{AnalysisLogger, Capture, CaptureRunner, WorkerConfig};

fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("podium=info"));

    // Logs go to stderr so stdout carries only the JSON result.
    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }
}

fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    Ok(PrometheusBuilder::new().install_recorder()?)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = WorkerConfig::from_env()?;
    info!("Worker config: {:?}", config);

    let metrics_handle = if config.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    let path = std::env::args()
        .nth(1)
        .or_else(|| config.capture_path.clone())
        .ok_or_else(|| anyhow::anyhow!("usage: podium-worker <capture.json>"))?;

    let logger = AnalysisLogger::default();
    let span = logger.span(&path);
    let outcome = span.in_scope(|| {
        let runner = CaptureRunner::new(&config);
        Capture::load(&path).and_then(|capture| runner.run(capture, &logger))
    });

    let (json, failed) = match outcome {
        Ok(output) => (to_json(&output, config.pretty_output)?, false),
        Err(e) => {
            logger.run_failed(&e);
            (to_json(&e.to_report(), config.pretty_output)?, true)
        }
    };
    println!("{json}");

    if let Some(handle) = metrics_handle {
        info!(snapshot = %handle.render(), "Metrics snapshot");
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

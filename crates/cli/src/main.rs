//! Gitter notifier CLI entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse arguments** — request name, body source, configuration file,
//!    command-line overrides for the two plugin settings.
//! 2. **Wire observability** — configure `tracing-subscriber` (human or JSON
//!    output on stderr) and, with `--otlp-endpoint`, an OpenTelemetry OTLP
//!    exporter.
//! 3. **Construct infrastructure** — the rustls [`gitter::HttpsWebhookClient`]
//!    and the file-backed settings provider, injected into
//!    [`plugin::GitterNotificationPlugin`].
//! 4. **Answer one request** — read the body (file or stdin), handle it, and
//!    print the response body on stdout.
//!
//! Exit status is zero when the response code is 200. A stage-status request
//! whose delivery failed still answers 200; check the printed `status`.
//!
//! Each invocation answers a single request, so the plugin's settings cache
//! lives only for that request and `go.plugin-settings.plugin-settings-changed`
//! has nothing to invalidate; settings are read from the file every run.

mod config;
mod telemetry;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::AsyncReadExt;

use config::{ConfigFile, FileSettings, SettingsOverrides};
use gitter::{HttpsWebhookClient, WebhookClientConfig};
use plugin::{GitterNotificationPlugin, PluginRequest, PluginResponse};
use telemetry::LogFormat;

/// Deliver GoCD stage-status notifications to a Gitter webhook.
#[derive(Debug, Parser)]
#[command(name = "gitter-notifier", version)]
struct Cli {
    /// Plugin request name, e.g. `stage-status` or `go.plugin-settings.get-configuration`.
    request: String,

    /// File holding the JSON request body; `-` reads stdin. Omit for requests without a body.
    #[arg(long)]
    body: Option<PathBuf>,

    /// Configuration file (TOML).
    #[arg(long, env = "GITTER_NOTIFIER_CONFIG", default_value = "gitter-notifier.toml")]
    config: PathBuf,

    /// GoCD server base URL; overrides the configuration file.
    #[arg(long, env = "GO_SERVER_URL")]
    server_url: Option<String>,

    /// Gitter webhook URL; overrides the configuration file.
    #[arg(long, env = "GITTER_WEBHOOK_URL")]
    webhook_url: Option<String>,

    /// Log line format.
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// OTLP gRPC endpoint to export spans to.
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    otlp_endpoint: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let _telemetry = telemetry::init(cli.log_format, cli.otlp_endpoint.as_deref())?;

    let body = read_body(cli.body.as_deref()).await?;
    let response = answer(cli, body).await?;

    tracing::debug!(code = response.code, "request answered");
    println!("{}", response.body);

    Ok(if response.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Builds the plugin and answers the request named on the command line.
///
/// An unreadable configuration file only costs the client tuning here; the
/// settings provider reports it again when the request needs settings.
async fn answer(cli: Cli, body: String) -> anyhow::Result<PluginResponse> {
    let client = match ConfigFile::load(&cli.config).await {
        Ok(file) => file.client,
        Err(err) => {
            tracing::warn!(
                error = %format!("{err:#}"),
                "configuration unreadable; using default client settings"
            );
            WebhookClientConfig::default()
        }
    };
    let transport = HttpsWebhookClient::new(&client).context("creating webhook client")?;
    let settings = FileSettings::new(
        cli.config,
        SettingsOverrides {
            go_server_url: cli.server_url,
            gitter_webhook_url: cli.webhook_url,
        },
    );
    let plugin = GitterNotificationPlugin::new(Arc::new(settings), Arc::new(transport));

    Ok(plugin.handle(&PluginRequest::new(cli.request, body)).await?)
}

async fn read_body(source: Option<&Path>) -> anyhow::Result<String> {
    match source {
        None => Ok(String::new()),
        Some(path) if path == Path::new("-") => {
            let mut body = String::new();
            tokio::io::stdin()
                .read_to_string(&mut body)
                .await
                .context("reading request body from stdin")?;
            Ok(body)
        }
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading request body from {}", path.display())),
    }
}

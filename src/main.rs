mod command;
mod config;
mod runner;
mod session;

use command::CommandExecutor;
use config::ServerConfig;
use runner::{CommandRunner, ShellRunner};
use session::McpSession;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout carries the protocol so logs go to stderr
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = ServerConfig::default();

    info!("Apple Maps MCP server starting: {} v{}", config.server_name, config.server_version);

    let runner = Arc::new(ShellRunner::new(config.shell.clone(), config.max_output_bytes));
    info!("  Command runner: {} ({})", runner.name(), config.shell);

    let executor = CommandExecutor::new(runner);
    let session = McpSession::new(config, executor);

    if let Err(e) = session.run(tokio::io::stdin(), tokio::io::stdout()).await {
        error!("Session terminated: {}", e);
        return Err(e);
    }

    info!("Apple Maps MCP server stopped");
    Ok(())
}

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tower_lsp::{LspService, Server};
use tracing::info;

use webedit_language_server::backend::EditorBackend;
use webedit_language_server::completion::CompletionDispatch;
use webedit_language_server::logging;

#[derive(Parser, Debug)]
#[command(name = "webedit-language-server", version, about = "HTML/CSS completion language server for embedded code editors")]
struct Args {
    /// Log level override (otherwise RUST_LOG or "info")
    #[arg(long)]
    log_level: Option<String>,

    /// Disable ANSI colors in stderr output
    #[arg(long)]
    no_color: bool,

    /// Disable session file logging
    #[arg(long)]
    no_file_log: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _guard = logging::init_logger(args.no_color, args.log_level.as_deref(), !args.no_file_log)
        .context("failed to initialize logging")?;

    info!(
        "Starting webedit-language-server {}",
        env!("CARGO_PKG_VERSION")
    );

    let dispatch = Arc::new(CompletionDispatch::new());

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) =
        LspService::new(move |client| EditorBackend::new(client, Arc::clone(&dispatch)));

    Server::new(stdin, stdout, socket).serve(service).await;

    info!("Server stopped");
    Ok(())
}

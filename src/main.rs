use clap::Parser;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workbook_import::{
    config::Config,
    host::WorkbookFolder,
    import::ImportController,
    models::internal::FileHandle,
    services::upload_client::UploadClient,
    switcher::{DocumentHost, DocumentSwitcher, MenuEntry},
};

/// Upload files to the import endpoint and save the workbooks it returns
#[derive(Parser, Debug)]
#[command(name = "workbook-import", version)]
struct Args {
    /// Files to import, sent as a single pick
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Override the configured upload endpoint
    #[arg(long)]
    upload_url: Option<String>,

    /// Override the configured output directory
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = Config::load()?;
    if let Some(url) = args.upload_url {
        config.upload_url = url;
    }
    if let Some(dir) = args.output_dir {
        config.output_dir = dir.to_string_lossy().into_owned();
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("workbook_import={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let output_dir = config.output_path().to_path_buf();
    std::fs::create_dir_all(&output_dir)?;

    let folder = WorkbookFolder::new(output_dir);
    let documents = folder.documents()?;
    let host = Arc::new(Mutex::new(folder));
    let handler_host = host.clone();

    let client = UploadClient::with_timeout(config.upload_url.clone(), config.request_timeout())?;
    let mut controller = ImportController::new(
        Arc::new(client),
        Box::new(move |artifact| {
            if let Ok(mut host) = handler_host.lock() {
                host.artifact_imported(artifact);
            }
        }),
    );

    let mut status = controller.subscribe_status();
    let printer = tokio::spawn(async move {
        loop {
            match status.recv().await {
                Ok(line) => tracing::info!("{}", line),
                Err(RecvError::Lagged(skipped)) => tracing::debug!(skipped, "Status lines skipped"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut switcher = DocumentSwitcher::new(documents, None)?;
    tracing::info!(
        documents = switcher.documents().len(),
        upload_url = %config.upload_url,
        "Importing {} file(s)",
        args.files.len()
    );
    switcher.open_menu();
    switcher.choose(MenuEntry::Import, &mut controller)?;

    controller.on_files_entered(args.files.into_iter().map(FileHandle::Path).collect());
    controller.settle().await;

    let final_status = controller.status_message().unwrap_or_default().to_string();
    controller.close();
    drop(controller);
    printer.await?;

    let imported = host.lock().map(|h| h.saved().len()).unwrap_or_default();
    tracing::info!(imported, "{}", final_status);

    Ok(())
}

use actix_web::{web, HttpServer};
use anyhow::Context;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pdf_text_upload::{build_app, storage::ScratchDir, AppState, Args};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let scratch = ScratchDir::create(&args.uploads_dir).with_context(|| {
        format!(
            "failed to create uploads directory {}",
            args.uploads_dir.display()
        )
    })?;
    info!("Uploads directory: {}", scratch.path().display());

    let state = web::Data::new(AppState::new(scratch, args.max_upload_bytes));

    let mut server = HttpServer::new(move || build_app(state.clone()));
    if let Some(workers) = args.workers {
        server = server.workers(workers);
    }

    let server = server
        .bind((args.host.as_str(), args.port))
        .with_context(|| format!("failed to bind {}:{}", args.host, args.port))?;

    info!("Listening on http://{}:{}", args.host, args.port);
    info!("Max upload size: {} bytes", args.max_upload_bytes);

    server.run().await?;
    Ok(())
}

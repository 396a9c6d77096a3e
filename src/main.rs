use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marcenaria::{
    Store,
    config::{AppConfig, ReportFormat},
    services::report_service::render_text,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,marcenaria=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;
    let store = Store::open(&config.database_url).await?;
    tracing::info!(database_url = %config.database_url, "store opened");

    let report = store.full_report().await;
    match config.report_format {
        ReportFormat::Text => print!("{}", render_text(&report)),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    store.close().await?;
    Ok(())
}

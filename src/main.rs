use cartelera::config::env_loader::{load_config, load_loki_url};
use cartelera::config::model::Config;
use cartelera::dashboard::payload::{DashboardPayload, PayloadMeta};
use cartelera::dashboard::writer::write_dashboard;
use cartelera::dinaticket::api::Fetcher;
use cartelera::dinaticket::extractor::Extractor;
use cartelera::dinaticket::model::MonthTable;
use cartelera::scrape::scrape_catalog;
use cartelera::tracing::setup_loki;
use chrono::Utc;
use std::error::Error;
use std::process::ExitCode;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let loki = setup_loki(load_loki_url().as_deref()).await;
    let config = load_config();

    let exit_code = match generate_dashboard(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Dashboard generation failed: {}", err);
            ExitCode::FAILURE
        }
    };

    if let Some(loki) = loki {
        loki.shutdown().await;
    }

    exit_code
}

async fn generate_dashboard(config: &Config) -> Result<(), Box<dyn Error>> {
    let fetcher = Fetcher::new(config.fetch_timeout)?;
    let extractor = Extractor::for_current_year(MonthTable::spanish());

    info!(
        "Scraping {} events for {}",
        config.scraped_events().len(),
        extractor.year()
    );

    let catalog = scrape_catalog(&fetcher, &extractor, config.scraped_events()).await;
    let generated_at = Utc::now().with_timezone(&config.timezone);
    let payload = DashboardPayload::build(&catalog, generated_at, PayloadMeta::new(&config.dashboard));

    info!(
        "Scraped {} sessions across {} events",
        catalog.total_sessions(),
        catalog.len()
    );

    if config.debug_config.skip_writing {
        info!("Skipping dashboard write");
        return Ok(());
    }

    write_dashboard(&payload, &config.output_path)?;

    Ok(())
}

use std::io::Write;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use stop_pois::cache::DiskStore;
use stop_pois::config::AppConfig;
use stop_pois::error::PipelineError;
use stop_pois::geocode::{GeocodingClient, GeocodingConfig};
use stop_pois::pipeline::DiscoveryPipeline;
use stop_pois::poi::{SearchFilters, YelpClient, YelpConfig};
use stop_pois::report::write_report;
use stop_pois::transit::{TransitClient, TransitConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), PipelineError> {
    let config = AppConfig::from_env()?;
    let taxonomy = config.taxonomy()?;

    let pipeline = DiscoveryPipeline::new(
        GeocodingClient::new(GeocodingConfig::new())?,
        TransitClient::new(TransitConfig::new())?,
        YelpClient::new(YelpConfig::new(config.api_key.as_str()))?,
        DiskStore::new(&config.cache_dir),
        SearchFilters::default(),
    );

    let results = pipeline
        .run(
            &config.home_address,
            &config.route_prefix,
            config.walk_radius_miles,
        )
        .await?;

    let mut out = std::io::stdout().lock();
    write_report(&mut out, &results, &taxonomy)?;
    out.flush()?;

    Ok(())
}

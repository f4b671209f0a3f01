use collector::Collector;
use config::Config;
use harvest::{Harvester, Report};
use std::error::Error;
use std::fs::File;
use tracing::info;

pub mod article;
pub mod collector;
pub mod config;
pub mod encoding;
pub mod harvest;
pub mod lookup;
pub mod title;

/// The main function of this library. Running this writes the links of every
/// page the seed page links to into the configured output file.
///
/// The output file is truncated before anything is fetched, so a failing
/// seed lookup still leaves an empty file behind.
pub async fn run(cfg: Config) -> Result<Report, Box<dyn Error>> {
    let file = File::create(&cfg.output)?;
    let collector = Collector::new(cfg.api_url.as_str(), cfg.timeout)?;
    let mut harvester = Harvester::new(collector)
        .with_encoding(cfg.encoding)
        .with_on_failure(cfg.on_failure);
    let report = harvester.harvest(cfg.seed.as_str(), file).await?;
    info!(
        titles = report.titles,
        failed_lookups = report.failed_lookups,
        skipped_writes = report.skipped_writes,
        requests = harvester.source().requests(),
        output = %cfg.output.display(),
        "harvest complete"
    );
    Ok(report)
}

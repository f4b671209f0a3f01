use super::encoding::{EncodeError, Encoding};
use super::lookup::{LinkSource, LookupError};
use clap::ValueEnum;
use std::io::{self, BufWriter, Write};
use thiserror::Error;
use tracing::{info, warn};

/// Joins the link titles on a link-list line.
pub const SEPARATOR: &str = ", ";

/// What to write for a title whose lookup failed recoverably.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OnFailure {
    /// Write the link list of the last successful lookup again.
    #[default]
    Reuse,
    /// Write an empty link list.
    Empty,
}

/// Counters of a finished harvest.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    /// Title lines written, i.e. links of the seed page.
    pub titles: usize,
    /// Lookups that ended in page-not-found or disambiguation.
    pub failed_lookups: usize,
    /// Link lists left out because they could not be encoded.
    pub skipped_writes: usize,
}

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("Could not get links of seed page \"{seed}\". ({source})")]
    Seed {
        seed: String,
        #[source]
        source: LookupError,
    },
    #[error("Lookup of \"{title}\" failed. ({source})")]
    Lookup {
        title: String,
        #[source]
        source: LookupError,
    },
    #[error("Could not write title \"{title}\". ({source})")]
    Title {
        title: String,
        #[source]
        source: EncodeError,
    },
    #[error("Could not write output. ({0})")]
    Io(#[from] io::Error),
}

/// Walks the links of a seed page and writes every linked page together with
/// its own links.
///
/// The output has two lines per link of the seed page: the linked title, then
/// its link list joined by `SEPARATOR`.
pub struct Harvester<S> {
    source: S,
    encoding: Encoding,
    on_failure: OnFailure,
}

impl<S: LinkSource> Harvester<S> {
    pub fn new(source: S) -> Self {
        Harvester {
            source,
            encoding: Encoding::default(),
            on_failure: OnFailure::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_on_failure(mut self, on_failure: OnFailure) -> Self {
        self.on_failure = on_failure;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs the harvest for `seed` and writes the records to `out`.
    ///
    /// Every record is flushed once complete, so whatever was written before
    /// a fatal error stays in the output.
    pub async fn harvest<W: Write>(&mut self, seed: &str, out: W) -> Result<Report, HarvestError> {
        let mut out = BufWriter::new(out);
        let titles = self
            .source
            .links(seed)
            .await
            .map_err(|source| HarvestError::Seed {
                seed: seed.to_string(),
                source,
            })?;
        info!(seed, links = titles.len(), "fetched seed page");

        let mut report = Report::default();
        let mut links: Vec<String> = Vec::new();
        for title in titles.iter() {
            let line = self
                .encoding
                .encode(title)
                .map_err(|source| HarvestError::Title {
                    title: title.clone(),
                    source,
                })?;
            out.write_all(&line)?;
            out.write_all(b"\n")?;

            match self.source.links(title).await {
                Ok(fetched) => links = fetched,
                Err(e) if e.is_recoverable() => {
                    warn!(%title, error = %e, "failed {}", title);
                    report.failed_lookups += 1;
                    if self.on_failure == OnFailure::Empty {
                        links.clear();
                    }
                }
                Err(source) => {
                    return Err(HarvestError::Lookup {
                        title: title.clone(),
                        source,
                    })
                }
            }

            match self.encoding.encode(&links.join(SEPARATOR)) {
                Ok(bytes) => out.write_all(&bytes)?,
                Err(e) => {
                    warn!(%title, error = %e, "skipped write {}", title);
                    report.skipped_writes += 1;
                }
            }
            out.write_all(b"\n")?;
            out.flush()?;

            report.titles += 1;
            info!(count = report.titles, "{}", report.titles);
        }
        out.flush()?;
        Ok(report)
    }
}

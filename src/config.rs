use super::collector::DEFAULT_API_URL;
use super::encoding::Encoding;
use super::harvest::OnFailure;
use super::title::{Title, TitleErr};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

pub const DEFAULT_SEED: &str = "List of most expensive films";
pub const DEFAULT_OUTPUT: &str = "high-budget.txt";

/// ConfigErr is an enum that contains possible error values that
/// could occur during the configuration of a harvest in Config::new.
#[derive(Error, Debug)]
pub enum ConfigErr {
    #[error(transparent)]
    Arguments(#[from] clap::Error),
    #[error("Invalid seed page. ({0})")]
    Seed(#[from] TitleErr),
    #[error("Invalid API URL. (found {0})")]
    ApiUrl(String),
    #[error("Timeout must be at least one second.")]
    ZeroTimeout,
}

/// Harvests the links of every page a seed page links to.
#[derive(Parser, Debug)]
#[command(name = "wikiharvest")]
#[command(version)]
struct Args {
    /// Seed page, as a title or an article URL
    #[arg(default_value = DEFAULT_SEED)]
    seed: String,

    /// File the records are written to (truncated first)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// MediaWiki api.php endpoint
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Text encoding of the output file
    #[arg(short, long, value_enum, default_value_t = Encoding::Utf8)]
    encoding: Encoding,

    /// Link list written for a page whose lookup failed
    #[arg(long, value_enum, default_value_t = OnFailure::Reuse)]
    on_failure: OnFailure,

    /// Per request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

/// Config is a struct used to bundle all the possible configurations
/// of a harvest.
#[derive(Debug, Clone)]
pub struct Config {
    /// Page whose links are harvested.
    pub seed: Title,
    pub output: PathBuf,
    pub api_url: Url,
    pub encoding: Encoding,
    pub on_failure: OnFailure,
    pub timeout: Duration,
}

impl Config {
    /// Given (command-line) arguments, including the program name, this
    /// function creates a validated configuration.
    pub fn new<I, T>(args: I) -> Result<Config, ConfigErr>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = Args::try_parse_from(args)?;
        let seed = Title::new(&args.seed)?;
        let api_url = match Url::parse(&args.api_url) {
            Ok(u) if u.scheme() == "http" || u.scheme() == "https" => u,
            _ => return Err(ConfigErr::ApiUrl(args.api_url)),
        };
        if args.timeout == 0 {
            return Err(ConfigErr::ZeroTimeout);
        }
        Ok(Config {
            seed,
            output: args.output,
            api_url,
            encoding: args.encoding,
            on_failure: args.on_failure,
            timeout: Duration::from_secs(args.timeout),
        })
    }
}

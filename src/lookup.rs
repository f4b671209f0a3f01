use thiserror::Error;

/// LookupError contains the ways fetching the link list of a page can fail.
///
/// Only `PageNotFound` and `Disambiguation` are expected during a harvest,
/// see `LookupError::is_recoverable`.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("\"{0}\" does not match any pages. Try another query!")]
    PageNotFound(String),
    #[error("\"{title}\" may refer to: {}", .options.join(", "))]
    Disambiguation { title: String, options: Vec<String> },
    #[error("HTTP request failed. ({0})")]
    Request(#[from] reqwest::Error),
    #[error("API returned an error. ({code}: {info})")]
    Api { code: String, info: String },
    #[error("Could not parse API response. ({0})")]
    Decode(#[from] serde_json::Error),
}

impl LookupError {
    /// Whether a harvest may carry on after this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LookupError::PageNotFound(_) | LookupError::Disambiguation { .. }
        )
    }
}

/// Anything that can tell which pages a page links to.
///
/// The returned titles are in the order the source reports them.
#[allow(async_fn_in_trait)]
pub trait LinkSource {
    async fn links(&mut self, title: &str) -> Result<Vec<String>, LookupError>;
}

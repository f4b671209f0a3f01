use super::article::{Article, Response};
use super::lookup::{LinkSource, LookupError};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// The `api.php` endpoint of English Wikipedia.
pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";

/// Wikimedia asks clients to identify themselves.
pub const USER_AGENT: &str = concat!(
    env!("CARGO_PKG_NAME"),
    "/",
    env!("CARGO_PKG_VERSION"),
    " (link harvester)"
);

/// Query parameters sent with every link lookup. Only links into the main
/// namespace are listed and redirects are resolved by the API.
const QUERY_PARAMS: [(&str, &str); 8] = [
    ("action", "query"),
    ("format", "json"),
    ("formatversion", "2"),
    ("redirects", "1"),
    ("prop", "links|pageprops"),
    ("ppprop", "disambiguation"),
    ("plnamespace", "0"),
    ("pllimit", "max"),
];

/// A struct to look up the links of articles through the MediaWiki API.
///
/// One reqwest client is kept for the whole harvest so connections get
/// reused. Lookups are strictly one after another.
pub struct Collector {
    client: reqwest::Client,
    endpoint: String,
    requests: usize,
}

impl Collector {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Collector {
            client,
            endpoint: endpoint.to_string(),
            requests: 0,
        })
    }

    /// Number of HTTP requests sent so far, continuation requests included.
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Fetches every batch of links for `title`, following `continue` until
    /// the API reports the listing complete.
    pub async fn get(&mut self, title: &str) -> Result<Article, LookupError> {
        let mut article = Article::new(title);
        let mut cont: Option<HashMap<String, String>> = None;
        loop {
            let params: Vec<(String, String)> =
                cont.clone().unwrap_or_default().into_iter().collect();
            let batch = self.get_batch(title, &params).await?;
            let next = batch.cont.clone();
            article.absorb(batch)?;
            match next {
                Some(c) if cont.as_ref() == Some(&c) => {
                    return Err(LookupError::Api {
                        code: "continuation".to_string(),
                        info: format!("continue parameters repeated for \"{}\"", title),
                    });
                }
                Some(c) => {
                    debug!(title, "continuing link listing");
                    cont = Some(c);
                }
                None => break,
            }
        }
        debug!(title = %article.title, links = article.links.len(), "fetched article");
        Ok(article)
    }

    async fn get_batch(
        &mut self,
        title: &str,
        cont: &[(String, String)],
    ) -> Result<Response, LookupError> {
        self.requests += 1;
        let body = self
            .client
            .get(&self.endpoint)
            .query(&QUERY_PARAMS[..])
            .query(&[("titles", title)])
            .query(cont)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Response::parse(&body)
    }
}

impl LinkSource for Collector {
    async fn links(&mut self, title: &str) -> Result<Vec<String>, LookupError> {
        self.get(title).await?.into_links()
    }
}

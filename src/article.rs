use super::lookup::LookupError;
use serde::Deserialize;
use std::collections::HashMap;

/// A struct representing a Wikipedia article as far as a harvest cares:
/// its resolved title and the titles of the articles it links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    /// Title after the API followed redirects and normalised it.
    pub title: String,
    /// Main namespace links in the order the API listed them.
    pub links: Vec<String>,
    /// Set when the page carries the `disambiguation` page property.
    pub disambiguation: bool,
    /// Set once a batch carried the page that was asked for.
    resolved: bool,
}

/// One batch of an `action=query` response with `formatversion=2`.
#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub query: Option<Query>,
    /// Parameters to send along with the next request to get the rest.
    #[serde(rename = "continue", default)]
    pub cont: Option<HashMap<String, String>>,
    #[serde(default)]
    pub error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub pages: Vec<Page>,
}

#[derive(Debug, Deserialize)]
pub struct Page {
    pub title: String,
    #[serde(default)]
    pub missing: bool,
    #[serde(default)]
    pub invalid: bool,
    #[serde(default)]
    pub links: Vec<Link>,
    #[serde(default)]
    pub pageprops: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct Link {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiError {
    pub code: String,
    #[serde(default)]
    pub info: String,
}

impl Response {
    pub fn parse(body: &str) -> Result<Self, LookupError> {
        let r: Response = serde_json::from_str(body)?;
        if let Some(e) = r.error {
            return Err(LookupError::Api {
                code: e.code,
                info: e.info,
            });
        }
        Ok(r)
    }
}

impl Article {
    pub fn new(title: &str) -> Self {
        Article {
            title: title.to_string(),
            links: Vec::new(),
            disambiguation: false,
            resolved: false,
        }
    }

    /// Merges one response batch into the article. The first page of the
    /// batch is the one that was asked for; missing or invalid pages end the
    /// lookup. Only continuation batches may come without a page, e.g. an
    /// interwiki title never resolves to one.
    pub fn absorb(&mut self, batch: Response) -> Result<(), LookupError> {
        let page = match batch.query.and_then(|q| q.pages.into_iter().next()) {
            Some(p) => p,
            None if self.resolved => return Ok(()),
            None => return Err(LookupError::PageNotFound(self.title.clone())),
        };
        if page.missing || page.invalid {
            return Err(LookupError::PageNotFound(self.title.clone()));
        }
        self.title = page.title;
        self.resolved = true;
        if page.pageprops.contains_key("disambiguation") {
            self.disambiguation = true;
        }
        self.links.extend(page.links.into_iter().map(|l| l.title));
        Ok(())
    }

    /// Turns the article into its link list, or the error the harvest
    /// expects for disambiguation pages.
    pub fn into_links(self) -> Result<Vec<String>, LookupError> {
        if self.disambiguation {
            return Err(LookupError::Disambiguation {
                title: self.title,
                options: self.links,
            });
        }
        Ok(self.links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn links_accumulate_over_batches() -> Result<(), Box<dyn Error>> {
        let first = Response::parse(
            r#"{"continue":{"plcontinue":"736|0|Cleopatra","continue":"||"},
                "query":{"pages":[{"pageid":736,"ns":0,"title":"Avatar (2009 film)",
                "links":[{"ns":0,"title":"Avatar (franchise)"},{"ns":0,"title":"Big Rock"}]}]}}"#,
        )?;
        assert_eq!(
            first.cont.as_ref().and_then(|c| c.get("plcontinue")).map(String::as_str),
            Some("736|0|Cleopatra")
        );
        let second = Response::parse(
            r#"{"batchcomplete":true,"query":{"pages":[{"pageid":736,"ns":0,
                "title":"Avatar (2009 film)","links":[{"ns":0,"title":"Cleopatra"}]}]}}"#,
        )?;
        assert!(second.cont.is_none());

        let mut a = Article::new("Avatar");
        a.absorb(first)?;
        a.absorb(second)?;
        assert_eq!(a.title, "Avatar (2009 film)");
        assert_eq!(
            a.into_links()?,
            vec!["Avatar (franchise)", "Big Rock", "Cleopatra"]
        );
        Ok(())
    }

    #[test]
    fn missing_page_is_not_found() -> Result<(), Box<dyn Error>> {
        let r = Response::parse(
            r#"{"batchcomplete":true,"query":{"pages":[{"ns":0,"title":"Nope","missing":true}]}}"#,
        )?;
        let mut a = Article::new("Nope");
        match a.absorb(r) {
            Err(LookupError::PageNotFound(t)) => assert_eq!(t, "Nope"),
            other => panic!("expected PageNotFound, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn response_without_page_is_not_found() -> Result<(), Box<dyn Error>> {
        let r = Response::parse(
            r#"{"batchcomplete":true,"query":{"interwiki":[{"title":"fr:Paris","iw":"fr"}]}}"#,
        )?;
        let mut a = Article::new("fr:Paris");
        match a.absorb(r) {
            Err(LookupError::PageNotFound(t)) => assert_eq!(t, "fr:Paris"),
            other => panic!("expected PageNotFound, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn continuation_batch_may_lack_page() -> Result<(), Box<dyn Error>> {
        let first = Response::parse(
            r#"{"continue":{"plcontinue":"1|0|B","continue":"||"},
                "query":{"pages":[{"pageid":1,"ns":0,"title":"Up","links":[{"ns":0,"title":"Pixar"}]}]}}"#,
        )?;
        let second = Response::parse(r#"{"batchcomplete":true}"#)?;
        let mut a = Article::new("Up");
        a.absorb(first)?;
        a.absorb(second)?;
        assert_eq!(a.into_links()?, vec!["Pixar"]);
        Ok(())
    }

    #[test]
    fn disambiguation_pages_are_reported() -> Result<(), Box<dyn Error>> {
        let r = Response::parse(
            r#"{"query":{"pages":[{"pageid":1,"ns":0,"title":"Mercury",
                "pageprops":{"disambiguation":""},
                "links":[{"ns":0,"title":"Mercury (planet)"}]}]}}"#,
        )?;
        let mut a = Article::new("Mercury");
        a.absorb(r)?;
        match a.into_links() {
            Err(LookupError::Disambiguation { title, options }) => {
                assert_eq!(title, "Mercury");
                assert_eq!(options, vec!["Mercury (planet)"]);
            }
            other => panic!("expected Disambiguation, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn api_errors_are_surfaced() {
        let r = Response::parse(r#"{"error":{"code":"badvalue","info":"Unrecognized value"}}"#);
        match r {
            Err(LookupError::Api { code, .. }) => assert_eq!(code, "badvalue"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }
}

use std::fmt;
use thiserror::Error;
use url::Url;

/// Contains the path prefix that is used to identify article URLs.
///
/// Any article URL must therefore be of the form
/// "<SCHEME>://<HOST><WIKI_ARTICLE_PATH><ARTICLE_NAME>".
pub const WIKI_ARTICLE_PATH: &str = "/wiki/";

/// Contains prefixes of pages that are not considered articles.
///
/// Any title of the form "<BLACKLIST_ELEMENT><REST>", where BLACKLIST_ELEMENT
/// is one of the elements in this array and REST is the possibly empty rest
/// of the string, is therefore invalid.
pub const WIKI_ARTICLE_BLACKLIST: [&str; 3] = ["Help:", "Wikipedia:", "Special:"];

/// Contains possible errors that may occur when trying to create a Title.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TitleErr {
    #[error("Title is empty.")]
    Empty,
    #[error("Not an article URL. ({0})")]
    NotAnArticle(String),
    #[error("Could not decode URL path. ({0})")]
    BadEncoding(String),
    #[error("Blacklisted article prefix found. ({0})")]
    BlacklistedPrefix(String),
}

/// The human readable name of an article, as the API expects it in `titles=`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    /// Accepts either a plain title or an article URL and normalises it into
    /// a title with spaces instead of underscores.
    ///
    /// # Examples
    ///
    /// ```
    /// use whlib::title::Title;
    ///
    /// let t = Title::new("https://en.wikipedia.org/wiki/Help!_(film)").unwrap();
    /// assert_eq!(t.as_str(), "Help! (film)");
    ///
    /// let t = Title::new("List of most expensive films").unwrap();
    /// assert_eq!(t.as_str(), "List of most expensive films");
    ///
    /// Title::new("https://en.wikipedia.org/wiki/Wikipedia:Contact_us").unwrap_err();
    /// ```
    pub fn new(input: &str) -> Result<Self, TitleErr> {
        let input = input.trim();
        let body = if input.starts_with("http://") || input.starts_with("https://") {
            Title::extract_body(input)?
        } else {
            input.to_string()
        };
        let name = body.replace('_', " ").trim().to_string();
        if name.is_empty() {
            return Err(TitleErr::Empty);
        }
        // MediaWiki ignores the case of the first letter.
        let mut chars = name.chars();
        let folded: String = chars
            .next()
            .map(|c| c.to_uppercase().chain(chars).collect())
            .unwrap_or_default();
        for blacklisted in WIKI_ARTICLE_BLACKLIST.iter() {
            if folded.starts_with(blacklisted) {
                return Err(TitleErr::BlacklistedPrefix(String::from(*blacklisted)));
            }
        }
        Ok(Title(name))
    }

    /// Takes the part of an article URL after `WIKI_ARTICLE_PATH` and
    /// percent-decodes it.
    fn extract_body(url: &str) -> Result<String, TitleErr> {
        let parsed = Url::parse(url).map_err(|_| TitleErr::NotAnArticle(url.to_string()))?;
        let body = parsed
            .path()
            .strip_prefix(WIKI_ARTICLE_PATH)
            .ok_or_else(|| TitleErr::NotAnArticle(url.to_string()))?;
        urlencoding::decode(body)
            .map(|s| s.into_owned())
            .map_err(|e| TitleErr::BadEncoding(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_titles_are_kept() -> Result<(), TitleErr> {
        assert_eq!(Title::new("Avatar (2009 film)")?.as_str(), "Avatar (2009 film)");
        assert_eq!(Title::new("  Titanic  ")?.as_str(), "Titanic");
        Ok(())
    }

    #[test]
    fn urls_are_decoded() -> Result<(), TitleErr> {
        let t = Title::new("https://en.wikipedia.org/wiki/List_of_philosophers_(A%E2%80%93C)")?;
        assert_eq!(t.as_str(), "List of philosophers (A–C)");
        let t = Title::new("https://de.wikipedia.org/wiki/Wikipedia")?;
        assert_eq!(t.to_string(), "Wikipedia");
        Ok(())
    }

    #[test]
    fn invalid_titles_are_rejected() {
        assert_eq!(Title::new("   "), Err(TitleErr::Empty));
        assert_eq!(
            Title::new("https://en.wikipedia.org/wiki/Help:Contents"),
            Err(TitleErr::BlacklistedPrefix("Help:".to_string()))
        );
        assert_eq!(
            Title::new("Special:Random"),
            Err(TitleErr::BlacklistedPrefix("Special:".to_string()))
        );
        assert_eq!(
            Title::new("special:Random"),
            Err(TitleErr::BlacklistedPrefix("Special:".to_string()))
        );
        assert_eq!(
            Title::new("https://en.wikipedia.org/wiki/help:Contents"),
            Err(TitleErr::BlacklistedPrefix("Help:".to_string()))
        );
        assert!(matches!(
            Title::new("https://en.wikipedia.org/w/index.php?title=Tree"),
            Err(TitleErr::NotAnArticle(_))
        ));
    }
}

use crate::github::Result;
use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use url::Url;

// -------------------------------------------------------------------------------------------------
// Page
// -------------------------------------------------------------------------------------------------
/// One page of a paginated listing, with the link to the following page if there is one.
pub struct Page<T> {
    pub items: Vec<T>,
    pub links: HeaderLinks,
}

impl<T: serde::de::DeserializeOwned> Page<T> {
    pub async fn from_response(response: reqwest::Response) -> Result<Self> {
        let links = HeaderLinks::from_headers(response.headers());
        let items = response.json().await?;
        Ok(Page { items, links })
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct HeaderLinks {
    pub next: Option<Url>,
}

lazy_static! {
    static ref HEADER_LINKS_PATTERN: Regex =
        RegexBuilder::new(r#"<([^>]+)>; \s* rel \s* = \s* "next""#)
            .ignore_whitespace(true)
            .build()
            .expect("header links regex should compile");
}

impl HeaderLinks {
    /// Find the `rel="next"` URL among the `Link` headers, ignoring anything malformed.
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Self {
        let next = headers
            .get_all(reqwest::header::LINK)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| HEADER_LINKS_PATTERN.captures(value))
            .filter_map(|captures| Url::parse(captures.get(1)?.as_str()).ok())
            .next();
        HeaderLinks { next }
    }
}

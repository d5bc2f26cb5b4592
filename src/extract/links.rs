// src/extract/links.rs
// =============================================================================
// Pulls candidate sites out of a search-results page.
//
// Results pages don't link to sites directly. Each result is a redirect link
// such as:
//
//   <a href="/url?q=https://www.rust-lang.org/learn&sa=U&ved=...">
//
// so the destination host is buried inside a query string. Rather than
// parsing that query string (its shape varies), we scan the whole href with
// a domain-name pattern and keep every host it finds.
//
// Steps:
// 1. Select every <a href> element
// 2. Keep only hrefs starting with the redirect prefix ("/url?q=")
// 3. Find every non-overlapping domain-name match in the href
// 4. Lower-case + trim each match, build a CandidateUrl, insert into a set
//
// A match that can't become a URL is logged and skipped; it never aborts the
// rest of the extraction.
// =============================================================================

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};
use url::Url;

use super::CandidateUrl;
use crate::config::CrawlConfig;

/// Deduplicated candidates, ordered by their normalized form.
pub type CandidateSet = BTreeSet<CandidateUrl>;

// One or more DNS labels followed by a 2-6 letter top-level domain.
static DOMAIN_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,6}")
        .expect("domain name pattern is valid")
});

/// The fetched search-results page.
///
/// Only the raw text travels between tasks; the node tree is built by
/// `parse()` inside whichever task needs it, because scraper's `Html` can't
/// be sent across threads.
#[derive(Debug, Clone)]
pub struct ResultsDocument {
    /// Where the page came from
    pub url: Url,
    /// Response body as received
    pub raw: String,
}

impl ResultsDocument {
    pub fn new(url: Url, raw: impl Into<String>) -> Self {
        Self {
            url,
            raw: raw.into(),
        }
    }

    /// Parses the raw text into a queryable node tree.
    pub fn parse(&self) -> Html {
        Html::parse_document(&self.raw)
    }
}

/// What counts as a redirect link and how candidates are built.
#[derive(Debug, Clone)]
pub struct LinkRules {
    /// Literal prefix a redirect href starts with
    pub redirect_prefix: String,
    /// Scheme given to every candidate
    pub scheme: String,
}

impl Default for LinkRules {
    fn default() -> Self {
        Self::from_config(&CrawlConfig::default())
    }
}

impl LinkRules {
    pub fn from_config(config: &CrawlConfig) -> Self {
        Self {
            redirect_prefix: config.redirect_prefix.clone(),
            scheme: config.site_scheme.clone(),
        }
    }
}

/// Extracts the set of candidate sites from a results page.
///
/// Consumes the document; it is not needed once the candidates exist.
/// Zero matching anchors is not an error and gives an empty set.
pub fn extract_links(doc: ResultsDocument, rules: &LinkRules) -> CandidateSet {
    let html = doc.parse();
    let selector = Selector::parse("a[href]").expect("static selector is valid");

    let mut candidates = CandidateSet::new();

    let redirects = html
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.starts_with(&rules.redirect_prefix));

    for href in redirects {
        for host in domain_names(href) {
            match CandidateUrl::from_host(&host, &rules.scheme) {
                Ok(candidate) => {
                    if candidates.insert(candidate) {
                        debug!(%host, "new candidate site");
                    }
                }
                Err(e) => {
                    warn!(%host, error = %e, "skipping domain that is not a valid URL");
                }
            }
        }
    }

    info!(count = candidates.len(), source = %doc.url, "extracted candidate sites");
    candidates
}

/// Every non-overlapping domain name in `value`, lower-cased and trimmed.
///
/// Each call gets its own iterator over its own input; there is no shared
/// match state between callers.
pub fn domain_names(value: &str) -> impl Iterator<Item = String> + '_ {
    DOMAIN_NAME
        .find_iter(value)
        .map(|m| m.as_str().to_lowercase().trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results_page(body: &str) -> ResultsDocument {
        let url = Url::parse("https://www.google.com/search?q=test").unwrap();
        ResultsDocument::new(url, format!("<html><body>{}</body></html>", body))
    }

    fn hosts(set: &CandidateSet) -> Vec<&str> {
        set.iter().map(CandidateUrl::host).collect()
    }

    #[test]
    fn extracts_host_from_redirect_link() {
        let doc = results_page(r#"<a href="/url?q=http://example.com/page&sa=U">Example</a>"#);
        let links = extract_links(doc, &LinkRules::default());

        assert_eq!(links.len(), 1);
        let candidate = links.iter().next().unwrap();
        assert_eq!(candidate.host(), "example.com");
        assert_eq!(candidate.port(), Some(80));
        assert_eq!(candidate.as_str(), "http://example.com/");
    }

    #[test]
    fn ignores_links_without_redirect_prefix() {
        let doc = results_page(
            r#"
            <a href="https://example.com/">direct</a>
            <a href="/search?q=more">more</a>
            <a>no href</a>
            "#,
        );
        assert!(extract_links(doc, &LinkRules::default()).is_empty());
    }

    #[test]
    fn empty_document_gives_empty_set() {
        let doc = results_page("");
        assert!(extract_links(doc, &LinkRules::default()).is_empty());
    }

    #[test]
    fn same_host_in_two_anchors_is_kept_once() {
        let doc = results_page(
            r#"
            <a href="/url?q=https://example.com/one&sa=U">1</a>
            <a href="/url?q=https://EXAMPLE.com/two&sa=U">2</a>
            <a href="/url?q=https://www.rust-lang.org/learn&sa=U">3</a>
            "#,
        );
        let links = extract_links(doc, &LinkRules::default());
        assert_eq!(hosts(&links), vec!["example.com", "www.rust-lang.org"]);
    }

    #[test]
    fn extraction_is_repeatable() {
        let doc = results_page(
            r#"
            <a href="/url?q=https://a.example.org/&sa=U">a</a>
            <a href="/url?q=https://b.example.org/&sa=U">b</a>
            "#,
        );
        let first = extract_links(doc.clone(), &LinkRules::default());
        let second = extract_links(doc, &LinkRules::default());
        assert_eq!(first, second);
    }

    #[test]
    fn every_domain_in_an_href_is_kept() {
        // The pattern runs over the whole href, so a file name that looks
        // like a domain is picked up too
        let doc = results_page(r#"<a href="/url?q=http://docs.example.com/index.html&sa=U">d</a>"#);
        let links = extract_links(doc, &LinkRules::default());
        assert_eq!(hosts(&links), vec!["docs.example.com", "index.html"]);
    }

    #[test]
    fn invalid_domain_is_skipped_and_the_rest_kept() {
        // xn--a.com matches the pattern but fails IDNA when building the URL
        let doc = results_page(
            r#"
            <a href="/url?q=http://xn--a.com/&sa=U">bad</a>
            <a href="/url?q=http://good.example.com/&sa=U">good</a>
            "#,
        );
        let links = extract_links(doc, &LinkRules::default());
        let urls: Vec<&str> = links.iter().map(CandidateUrl::as_str).collect();
        assert_eq!(urls, vec!["http://good.example.com/"]);
    }

    #[test]
    fn href_without_domain_contributes_nothing() {
        let doc = results_page(r#"<a href="/url?q=nothing-here&sa=U">x</a>"#);
        assert!(extract_links(doc, &LinkRules::default()).is_empty());
    }

    #[test]
    fn scheme_comes_from_rules() {
        let rules = LinkRules {
            redirect_prefix: "/url?q=".into(),
            scheme: "https".into(),
        };
        let doc = results_page(r#"<a href="/url?q=http://example.com/&sa=U">x</a>"#);
        let links = extract_links(doc, &rules);
        assert_eq!(links.iter().next().unwrap().as_str(), "https://example.com/");
    }

    #[test]
    fn custom_prefix() {
        let rules = LinkRules {
            redirect_prefix: "/l/?uddg=".into(),
            scheme: "http".into(),
        };
        let doc = results_page(
            r#"
            <a href="/l/?uddg=https://www.example.net/">x</a>
            <a href="/url?q=http://example.com/">y</a>
            "#,
        );
        let links = extract_links(doc, &rules);
        assert_eq!(hosts(&links), vec!["www.example.net"]);
    }

    #[test]
    fn domain_names_are_lowercased() {
        let found: Vec<String> = domain_names("/url?q=http://WWW.Example.COM/x").collect();
        assert_eq!(found, vec!["www.example.com"]);
    }
}

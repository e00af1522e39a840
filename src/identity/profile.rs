//! Simulated client identities
//!
//! An identity bundles the fingerprint-affecting request headers (user agent,
//! locale, referrer, fetch metadata) with a dedicated HTTP client whose cookie
//! store carries session state across requests. Identities are built randomly
//! and handed out by the pool; a request always works on its own clone.

use rand::prelude::*;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Browser user-agent strings rotated across identities
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 OPR/106.0.0.0",
];

/// Referrer values rotated across identities; empty means no Referer header
pub const REFERRERS: &[&str] = &[
    "https://www.google.com/",
    "https://www.bing.com/",
    "https://duckduckgo.com/",
    "https://yachtworld.com/",
    "https://www.yachtworld.com/boats/",
    "",
];

const ACCEPT_LANGUAGES: &[&str] = &["en-US,en;q=0.9", "en-GB,en;q=0.9", "en-US,en;q=0.8,fr;q=0.6"];

const SEC_FETCH_SITES: &[&str] = &["cross-site", "same-origin", "none"];

const CACHE_CONTROLS: &[&str] = &["max-age=0", "no-cache", "no-store"];

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,\
                      image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

/// One simulated client configuration
///
/// The client keeps its cookie jar when the user agent and referrer drift,
/// so session-level state is not discarded by a header refresh.
#[derive(Debug, Clone)]
pub struct Identity {
    client: Client,
    pub user_agent: String,
    pub accept_language: String,
    pub referrer: String,
    dnt: &'static str,
    sec_fetch_site: &'static str,
    cache_control: &'static str,
}

impl Identity {
    /// Builds a freshly randomized identity with its own cookie-carrying client
    pub fn generate() -> Result<Self, reqwest::Error> {
        let mut rng = rand::rng();

        let client = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .redirect(Policy::limited(10))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            user_agent: pick(&mut rng, USER_AGENTS).to_string(),
            accept_language: pick(&mut rng, ACCEPT_LANGUAGES).to_string(),
            referrer: pick(&mut rng, REFERRERS).to_string(),
            dnt: if rng.random_bool(0.5) { "1" } else { "0" },
            sec_fetch_site: pick(&mut rng, SEC_FETCH_SITES),
            cache_control: pick(&mut rng, CACHE_CONTROLS),
        })
    }

    /// The HTTP client bound to this identity's session
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Builds the fingerprint header set for one request
    pub fn header_map(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        insert(&mut headers, "User-Agent", &self.user_agent);
        insert(&mut headers, "Accept", ACCEPT);
        insert(&mut headers, "Accept-Language", &self.accept_language);
        insert(&mut headers, "DNT", self.dnt);
        insert(&mut headers, "Upgrade-Insecure-Requests", "1");
        insert(&mut headers, "Sec-Fetch-Dest", "document");
        insert(&mut headers, "Sec-Fetch-Mode", "navigate");
        insert(&mut headers, "Sec-Fetch-Site", self.sec_fetch_site);
        insert(&mut headers, "Sec-Fetch-User", "?1");
        insert(&mut headers, "Cache-Control", self.cache_control);
        if !self.referrer.is_empty() {
            insert(&mut headers, "Referer", &self.referrer);
        }

        headers
    }

    /// Replaces the user agent and referrer in place, keeping the client
    /// (and with it all session cookies) untouched
    pub(crate) fn drift(&mut self) {
        let mut rng = rand::rng();
        self.user_agent = pick(&mut rng, USER_AGENTS).to_string();
        self.referrer = pick(&mut rng, REFERRERS).to_string();
    }
}

fn pick<'a>(rng: &mut impl Rng, values: &[&'a str]) -> &'a str {
    values[rng.random_range(0..values.len())]
}

fn insert(headers: &mut HeaderMap, name: &'static str, value: &str) {
    // All candidate values are fixed ASCII tables; an unparsable value is
    // simply not sent rather than failing the request.
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(name, value);
    }
}

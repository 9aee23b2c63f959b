//! HTTP GET behind an injectable [`Fetcher`] trait.
use anyhow::{Context as _, Result};
use std::io::Read;

/// Performs plain HTTP(S) GET requests.
///
/// Non-2xx responses are errors; no retry or backoff is attempted beyond
/// what the underlying client does.
pub trait Fetcher: Send + Sync {
    /// Start a GET request for `url` and return the response body as a
    /// stream, so large payloads never have to be held in memory.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure or a non-2xx status.
    fn get(&self, url: &str) -> Result<Box<dyn Read>>;

    /// Fetch the whole body of `url` into memory.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a read
    /// error part-way through the body.
    fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        self.get(url)?
            .read_to_end(&mut body)
            .with_context(|| format!("reading response body from {url}"))?;
        Ok(body)
    }
}

/// [`Fetcher`] backed by a shared [`ureq::Agent`].
#[derive(Clone)]
pub struct UreqFetcher {
    agent: ureq::Agent,
}

impl std::fmt::Debug for UreqFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UreqFetcher").finish_non_exhaustive()
    }
}

impl UreqFetcher {
    /// Create a fetcher with ureq's default agent configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }
}

impl Default for UreqFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher for UreqFetcher {
    fn get(&self, url: &str) -> Result<Box<dyn Read>> {
        let response = self
            .agent
            .get(url)
            .call()
            .with_context(|| format!("GET {url}"))?;
        Ok(Box::new(response.into_body().into_reader()))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct StaticFetcher(&'static [u8]);

    impl Fetcher for StaticFetcher {
        fn get(&self, _url: &str) -> Result<Box<dyn Read>> {
            Ok(Box::new(Cursor::new(self.0)))
        }
    }

    #[test]
    fn get_bytes_drains_the_stream() {
        let body = StaticFetcher(b"payload").get_bytes("http://x").unwrap();
        assert_eq!(body, b"payload");
    }

    #[test]
    fn unroutable_url_is_an_error() {
        let err = UreqFetcher::new()
            .get("http://127.0.0.1:9/never")
            .err()
            .expect("connection to the discard port should fail");
        assert!(format!("{err:#}").contains("GET http://127.0.0.1:9/never"));
    }
}

//! External font description source.
//!
//! [`FontSource`] is the seam between the cache and the outside world: one
//! call returns the textual description for a family, another downloads a
//! referenced file. [`GoogleFontsSource`] talks to the Google Fonts CSS API.

use super::FontWeight;
use crate::Result;
use futures::future::BoxFuture;

/// Source of font descriptions and font files
pub trait FontSource: Send + Sync {
    /// Fetch the `@font-face` description for `family` at the given weights
    fn describe<'a>(&'a self, family: &'a str, weights: &'a [FontWeight]) -> BoxFuture<'a, Result<String>>;

    /// Download one font file referenced by a description
    fn fetch_file<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>>>;
}

#[cfg(feature = "http")]
pub use http::GoogleFontsSource;

#[cfg(feature = "http")]
mod http {
    use super::FontSource;
    use crate::typography::FontWeight;
    use crate::{Error, RendererConfig, Result};
    use futures::future::{BoxFuture, FutureExt};
    use reqwest::header::USER_AGENT;
    use reqwest::Client;
    use std::time::Duration;

    /// Google Fonts CSS API client.
    ///
    /// The v1 endpoint answers with TrueType URLs when asked with an old
    /// user agent, which is what the PDF backend can embed.
    pub struct GoogleFontsSource {
        client: Client,
        endpoint: String,
        user_agent: String,
    }

    impl GoogleFontsSource {
        pub fn new(config: &RendererConfig) -> Result<Self> {
            let client = Client::builder()
                .timeout(Duration::from_millis(config.timeout_ms))
                .build()
                .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

            Ok(Self {
                client,
                endpoint: config.font_css_endpoint.clone(),
                user_agent: config.font_user_agent.clone(),
            })
        }

        /// Description URL, e.g. `.../css?family=Open+Sans%3A400%2C700%2C900`
        pub fn description_url(&self, family: &str, weights: &[FontWeight]) -> Result<String> {
            let weights = weights
                .iter()
                .map(|w| w.numeric().to_string())
                .collect::<Vec<_>>()
                .join(",");
            let mut url = url::Url::parse(&self.endpoint)
                .map_err(|e| Error::ConfigError(format!("Bad font endpoint '{}': {}", self.endpoint, e)))?;
            url.query_pairs_mut()
                .append_pair("family", &format!("{}:{}", family, weights));
            Ok(url.to_string())
        }

        async fn get(&self, url: &str) -> Result<reqwest::Response> {
            let resp = self
                .client
                .get(url)
                .header(USER_AGENT, self.user_agent.clone())
                .send()
                .await
                .map_err(|e| Error::FontLookup(format!("Failed to fetch {}: {}", url, e)))?;

            if !resp.status().is_success() {
                return Err(Error::FontLookup(format!("{} returned {}", url, resp.status())));
            }
            Ok(resp)
        }
    }

    impl FontSource for GoogleFontsSource {
        fn describe<'a>(&'a self, family: &'a str, weights: &'a [FontWeight]) -> BoxFuture<'a, Result<String>> {
            async move {
                let url = self.description_url(family, weights)?;
                let resp = self.get(&url).await?;
                resp.text()
                    .await
                    .map_err(|e| Error::FontLookup(format!("Failed to read description body: {}", e)))
            }
            .boxed()
        }

        fn fetch_file<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<Vec<u8>>> {
            async move {
                let resp = self.get(url).await?;
                let bytes = resp
                    .bytes()
                    .await
                    .map_err(|e| Error::FontLookup(format!("Failed to read font file {}: {}", url, e)))?;
                Ok(bytes.to_vec())
            }
            .boxed()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::typography::PDF_WEIGHTS;

        #[test]
        fn description_url_lists_weights() {
            let source = GoogleFontsSource::new(&RendererConfig::default()).expect("client");
            let url = source.description_url("Open Sans", &PDF_WEIGHTS).expect("url");
            assert!(url.starts_with("https://fonts.googleapis.com/css?family="));
            assert!(url.contains("Open+Sans"));
            assert!(url.contains("400%2C700%2C900"));
        }
    }
}

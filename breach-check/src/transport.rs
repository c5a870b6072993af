use std::future::Future;

use reqwest::header::{HeaderMap, HeaderValue};

use crate::config::Config;
use crate::error::Error;

/// Issues a single GET and returns the response body.
///
/// Implementations make exactly one attempt per call. Retrying is the
/// caller's job (see [`crate::RangeClient`]). A non-success status must come
/// back as an error, never as a body.
pub trait Transport {
    fn get(&self, url: &str) -> impl Future<Output = Result<String, Error>> + Send;
}

impl<T: Transport + Sync> Transport for &T {
    fn get(&self, url: &str) -> impl Future<Output = Result<String, Error>> + Send {
        (**self).get(url)
    }
}

/// [`Transport`] backed by a `reqwest` client.
///
/// Certificates are always verified (rustls with the bundled web roots).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a dedicated client from `config`.
    ///
    /// Most hosts should use the shared client from
    /// [`crate::environment::transport`] instead of building one per checker.
    pub fn new(config: &Config) -> Result<Self, Error> {
        Ok(Self { client: build_client(config)? })
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<String, Error> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| Error::HttpRequest { url: url.to_string(), source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus { url: url.to_string(), status: status.as_u16() });
        }

        response.text().await.map_err(|source| Error::HttpRequest { url: url.to_string(), source })
    }
}

pub(crate) fn build_client(config: &Config) -> Result<reqwest::Client, Error> {
    let mut headers = HeaderMap::new();
    if config.add_padding {
        headers.insert("Add-Padding", HeaderValue::from_static("true"));
    }

    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.request_timeout)
        .default_headers(headers)
        .build()
        .map_err(Error::ClientBuild)
}

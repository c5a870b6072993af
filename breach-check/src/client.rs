use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Error;
use crate::retry::RetryPolicy;
use crate::transport::Transport;

/// Queries the range API for a hash prefix, retrying with a fixed delay.
#[derive(Debug, Clone)]
pub struct RangeClient<T> {
    transport: T,
    endpoint: String,
    retry: RetryPolicy,
}

impl<T: Transport> RangeClient<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        Self {
            transport,
            endpoint: config.endpoint.trim().trim_end_matches('/').to_string(),
            retry: RetryPolicy::from_config(config),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Fetches every `SUFFIX:COUNT` record sharing `prefix`.
    ///
    /// The body is returned unmodified. After the last failed attempt the
    /// final transport error is wrapped in [`Error::MaxRetriesExceeded`].
    pub async fn lookup(&self, prefix: &str) -> Result<String, Error> {
        let url = format!("{}/{}", self.endpoint, prefix);
        let max_attempts = self.retry.max_attempts();

        self.retry
            .run(|attempt| {
                let url = url.as_str();
                async move {
                    debug!(prefix, attempt, "querying range API");
                    self.transport.get(url).await.inspect_err(|e| {
                        if attempt < max_attempts {
                            warn!(prefix, attempt, max_attempts, error = %e, "range query failed, retrying");
                        }
                    })
                }
            })
            .await
            .map_err(|exhausted| {
                warn!(
                    prefix,
                    attempts = exhausted.attempts,
                    error = %exhausted.last,
                    "range query failed on every attempt, giving up. Check that the endpoint is reachable"
                );
                Error::MaxRetriesExceeded {
                    prefix: prefix.to_string(),
                    attempts: exhausted.attempts,
                    source: Box::new(exhausted.last),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    /// Replays canned responses and records every requested URL.
    struct Scripted {
        responses: Mutex<Vec<Result<String, u16>>>,
        urls: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(mut responses: Vec<Result<String, u16>>) -> Self {
            responses.reverse();
            Self { responses: Mutex::new(responses), urls: Mutex::new(Vec::new()) }
        }
    }

    impl Transport for Scripted {
        async fn get(&self, url: &str) -> Result<String, Error> {
            self.urls.lock().unwrap().push(url.to_string());
            match self.responses.lock().unwrap().pop() {
                Some(Ok(body)) => Ok(body),
                Some(Err(status)) => Err(Error::HttpStatus { url: url.to_string(), status }),
                None => Err(Error::HttpStatus { url: url.to_string(), status: 599 }),
            }
        }
    }

    fn config(endpoint: &str) -> Config {
        Config {
            endpoint: endpoint.to_string(),
            retry_delay: Duration::from_secs(2),
            ..Config::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_builds_url_from_prefix() {
        let transport = Scripted::new(vec![Ok("BODY".to_string())]);
        let client = RangeClient::new(&transport, &config("https://example.test/range/"));

        let body = client.lookup("5BAA6").await.unwrap();

        assert_eq!(body, "BODY");
        assert_eq!(*transport.urls.lock().unwrap(), vec!["https://example.test/range/5BAA6"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_retries_on_status_error() {
        let transport = Scripted::new(vec![Err(503), Err(429), Ok("BODY".to_string())]);
        let client = RangeClient::new(&transport, &config("https://example.test/range"));

        let body = client.lookup("5BAA6").await.unwrap();

        assert_eq!(body, "BODY");
        assert_eq!(transport.urls.lock().unwrap().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_gives_up_after_max_attempts() {
        let transport = Scripted::new(vec![Err(500), Err(500), Err(502), Ok("late".to_string())]);
        let client = RangeClient::new(&transport, &config("https://example.test/range"));

        let err = client.lookup("5BAA6").await.unwrap_err();

        match err {
            Error::MaxRetriesExceeded { prefix, attempts, source } => {
                assert_eq!(prefix, "5BAA6");
                assert_eq!(attempts, 3);
                assert!(matches!(*source, Error::HttpStatus { status: 502, .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(transport.urls.lock().unwrap().len(), 3);
    }
}

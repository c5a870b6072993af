use tracing::debug;

use crate::client::RangeClient;
use crate::config::{Config, MatchMode};
use crate::digest::digest;
use crate::error::Error;
use crate::response::parse_count;
use crate::transport::Transport;

/// Checks credentials against the range API.
///
/// Each call to [`BreachChecker::check`] is independent: it owns its digest,
/// URL and response body, and nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct BreachChecker<T> {
    client: RangeClient<T>,
    max_credential_len: usize,
    match_mode: MatchMode,
}

impl<T: Transport> BreachChecker<T> {
    pub fn new(transport: T, config: &Config) -> Self {
        Self {
            client: RangeClient::new(transport, config),
            max_credential_len: config.max_credential_len,
            match_mode: config.match_mode,
        }
    }

    pub fn client(&self) -> &RangeClient<T> {
        &self.client
    }

    /// Returns how many times `credential` appeared in known breaches.
    ///
    /// `Ok(0)` means the suffix was not in the candidate set for its prefix.
    /// Input errors are returned before any network activity.
    pub async fn check(&self, credential: &[u8]) -> Result<u64, Error> {
        self.validate(credential)?;

        let digest = digest(credential);
        let prefix = digest.prefix();

        let body = self.client.lookup(prefix).await?;
        let count = parse_count(&body, digest.suffix(), self.match_mode).map_err(|e| {
            Error::MalformedResponse { prefix: prefix.to_string(), reason: e.to_string() }
        })?;

        debug!(prefix, candidates = body.lines().count(), count, "range lookup complete");
        Ok(count)
    }

    fn validate(&self, credential: &[u8]) -> Result<(), Error> {
        if credential.is_empty() {
            return Err(Error::EmptyCredential);
        }
        if credential.len() > self.max_credential_len {
            return Err(Error::CredentialTooLong {
                len: credential.len(),
                max: self.max_credential_len,
            });
        }
        std::str::from_utf8(credential).map_err(|_| Error::InvalidEncoding)?;
        Ok(())
    }
}

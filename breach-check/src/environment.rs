//! Process-wide HTTP environment.
//!
//! The host calls [`init`] once before the first lookup and [`shutdown`] once
//! after the last one has finished. Between the two, every
//! [`crate::PasswordValidator::from_environment`] shares one connection pool.
//! [`shutdown`] is a no-op when nothing is initialized, so calling it twice or
//! without a prior [`init`] is harmless.

use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::transport::{HttpTransport, build_client};

static SHARED_CLIENT: RwLock<Option<reqwest::Client>> = RwLock::new(None);

/// Builds the shared HTTP client from `config`.
///
/// Returns `Ok(false)` without touching the existing client if already initialized.
pub fn init(config: &Config) -> Result<bool, Error> {
    config.validate()?;

    let mut guard = SHARED_CLIENT.write().unwrap_or_else(PoisonError::into_inner);
    if guard.is_some() {
        debug!("HTTP environment already initialized");
        return Ok(false);
    }

    *guard = Some(build_client(config)?);
    debug!(endpoint = %config.endpoint, "HTTP environment initialized");
    Ok(true)
}

/// Drops the shared HTTP client.
///
/// Returns whether there was anything to tear down. Lookups already holding a
/// transport keep working until they complete.
pub fn shutdown() -> bool {
    let released = SHARED_CLIENT.write().unwrap_or_else(PoisonError::into_inner).take().is_some();
    if released {
        debug!("HTTP environment shut down");
    }
    released
}

pub fn is_initialized() -> bool {
    SHARED_CLIENT.read().unwrap_or_else(PoisonError::into_inner).is_some()
}

/// A transport backed by the shared client.
pub fn transport() -> Result<HttpTransport, Error> {
    SHARED_CLIENT
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(|client| HttpTransport::from_client(client.clone()))
        .ok_or(Error::NotInitialized)
}

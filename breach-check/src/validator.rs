//! Host-facing password policy entry points.
//!
//! Every failure collapses to [`INCONCLUSIVE`] here, and both policy answers
//! treat it like a breached password.

use secrecy::{ExposeSecret, SecretString};
use tracing::{error, warn};

use crate::checker::BreachChecker;
use crate::config::Config;
use crate::digest::digest;
use crate::environment;
use crate::error::Error;
use crate::principal::{NoPrincipal, PrincipalSource};
use crate::transport::{HttpTransport, Transport};
use crate::{INCONCLUSIVE, MAX_STRENGTH, MIN_STRENGTH};

/// Acceptability of a raw breach count. Only a confirmed zero is acceptable.
#[inline]
pub fn is_acceptable_count(count: u64) -> bool {
    count == 0
}

/// Binary strength of a raw breach count.
#[inline]
pub fn strength_for_count(count: u64) -> u32 {
    if count == 0 { MAX_STRENGTH } else { MIN_STRENGTH }
}

pub struct PasswordValidator<T = HttpTransport, P = NoPrincipal> {
    checker: BreachChecker<T>,
    principal: P,
}

impl PasswordValidator {
    /// Validator using the shared client from [`environment::init`].
    pub fn from_environment(config: Config) -> Result<Self, Error> {
        config.validate()?;
        let transport = environment::transport()?;
        Ok(Self::new(BreachChecker::new(transport, &config)))
    }
}

impl<T: Transport> PasswordValidator<T> {
    pub fn new(checker: BreachChecker<T>) -> Self {
        Self { checker, principal: NoPrincipal }
    }
}

impl<T: Transport, P: PrincipalSource> PasswordValidator<T, P> {
    /// Attaches a principal source used to tag log events.
    pub fn with_principal<Q: PrincipalSource>(self, principal: Q) -> PasswordValidator<T, Q> {
        PasswordValidator { checker: self.checker, principal }
    }

    pub fn checker(&self) -> &BreachChecker<T> {
        &self.checker
    }

    /// Breach count for `password`: `0`, a positive count, or [`INCONCLUSIVE`].
    pub async fn raw_breach_count(&self, password: &SecretString) -> u64 {
        self.raw_breach_count_bytes(password.expose_secret().as_bytes()).await
    }

    /// Same as [`Self::raw_breach_count`] for a credential the host holds as bytes.
    ///
    /// Bytes that are not valid UTF-8 are inconclusive.
    pub async fn raw_breach_count_bytes(&self, credential: &[u8]) -> u64 {
        self.breach_count(credential).await.unwrap_or(INCONCLUSIVE)
    }

    /// Logged lookup that keeps the failure reason, so a genuine count equal
    /// to [`INCONCLUSIVE`] can be told apart from a failed lookup.
    pub async fn breach_count(&self, credential: &[u8]) -> Result<u64, Error> {
        match self.checker.check(credential).await {
            Ok(0) => Ok(0),
            Ok(count) => {
                let hash = digest(credential);
                let principal = self.principal.current_principal();
                warn!(
                    prefix = hash.prefix(),
                    user = principal.as_ref().map(|p| p.user.as_str()),
                    host = principal.as_ref().map(|p| p.host.as_str()),
                    count,
                    "password has appeared in breaches"
                );
                Ok(count)
            }
            Err(e) => {
                self.report(&e);
                Err(e)
            }
        }
    }

    /// `true` only when the password was positively confirmed absent from breaches.
    pub async fn is_acceptable(&self, password: &SecretString) -> bool {
        is_acceptable_count(self.raw_breach_count(password).await)
    }

    /// [`MAX_STRENGTH`] for a password absent from breaches, [`MIN_STRENGTH`] otherwise.
    pub async fn strength_score(&self, password: &SecretString) -> u32 {
        strength_for_count(self.raw_breach_count(password).await)
    }

    fn report(&self, e: &Error) {
        let principal = self.principal.current_principal();
        let user = principal.as_ref().map(|p| p.user.as_str());
        let host = principal.as_ref().map(|p| p.host.as_str());

        // retries already logged each failed attempt
        if let Error::MaxRetriesExceeded { attempts, .. } = e {
            warn!(user, host, attempts, error = %e, "breach lookup inconclusive");
        } else if e.is_input_error() {
            error!(user, host, error = %e, "credential rejected before lookup");
        } else {
            error!(user, host, error = %e, "breach lookup inconclusive");
        }
    }
}

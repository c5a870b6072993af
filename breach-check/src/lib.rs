//! Breached password lookups against the Have I Been Pwned range API.
//!
//! The password never leaves the process. It is hashed with SHA1, and only the
//! first 5 hex characters of that hash are sent to the remote service. The
//! service answers with every hash suffix sharing that prefix (k-anonymity),
//! and the exact suffix is matched locally to find how many times the password
//! appeared in known breaches.
//!
//! # Lookup results
//!
//! Every host-facing entry point reduces a lookup to a single `u64`:
//!
//! - `0`: the password was not found in any breach.
//! - a positive count: the number of recorded breach occurrences.
//! - [`INCONCLUSIVE`]: the lookup could not be completed (empty or oversized
//!   input, network exhausted, malformed response).
//!
//! Policy decisions treat [`INCONCLUSIVE`] the same as a breached password, so
//! a password that could not be verified is rejected rather than accepted.
//!
//! # Usage
//!
//! ```no_run
//! use breach_check::{Config, PasswordValidator, environment};
//! use secrecy::SecretString;
//!
//! # async fn run() -> Result<(), breach_check::Error> {
//! let config = Config::from_env()?;
//! environment::init(&config)?;
//!
//! let validator = PasswordValidator::from_environment(config)?;
//! let password = SecretString::new("password123".into());
//! if !validator.is_acceptable(&password).await {
//!     println!("pick another password");
//! }
//!
//! environment::shutdown();
//! # Ok(())
//! # }
//! ```

pub mod checker;
pub mod client;
pub mod config;
pub mod digest;
pub mod environment;
pub mod error;
pub mod principal;
pub mod response;
pub mod retry;
pub mod transport;
pub mod validator;

pub use checker::BreachChecker;
pub use client::RangeClient;
pub use config::{Config, MatchMode};
pub use digest::{HashDigest, digest};
pub use error::Error;
pub use principal::{NoPrincipal, Principal, PrincipalSource};
pub use response::parse_count;
pub use retry::RetryPolicy;
pub use transport::{HttpTransport, Transport};
pub use validator::PasswordValidator;

/// Lookup result meaning "breach status could not be determined".
///
/// Chosen well above any count the service reports for a single hash, so a
/// caller can tell "safe" (0) from "unknown" from "breached".
pub const INCONCLUSIVE: u64 = 1_000_000;

/// Strength reported for a password that was not found in any breach.
pub const MAX_STRENGTH: u32 = 100;

/// Strength reported for a breached or unverifiable password.
pub const MIN_STRENGTH: u32 = 0;

/// The length of the hash prefix sent to the service (5 hex characters).
pub const PREFIX_LEN: usize = 5;

/// The length of the hash suffix matched locally (35 hex characters).
pub const SUFFIX_LEN: usize = 35;

/// The length of a full SHA1 digest rendered as hex.
pub const DIGEST_HEX_LEN: usize = PREFIX_LEN + SUFFIX_LEN;

/// Hex lookup table for digest rendering.
pub const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

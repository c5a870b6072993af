use std::fmt;

use breach_check::{INCONCLUSIVE, Principal, digest, validator};
use serde::Serialize;

/// Which host entry point a run reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Mode {
    /// Raw breach count (0, count, or the inconclusive sentinel)
    Count,
    /// Accept or reject
    Validate,
    /// Strength score, 0 or 100
    Strength,
}

/// One checked password. The password itself is never part of a report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// 1-based position of the password in the input.
    pub index: usize,
    /// Hash prefix sent to the service, absent for empty input.
    pub prefix: Option<String>,
    pub count: u64,
    pub inconclusive: bool,
    pub acceptable: bool,
    pub strength: u32,
}

impl Report {
    /// `count` is `None` when the lookup failed.
    pub fn new(index: usize, credential: &[u8], count: Option<u64>) -> Self {
        let raw = count.unwrap_or(INCONCLUSIVE);
        Self {
            index,
            prefix: (!credential.is_empty()).then(|| digest(credential).prefix().to_string()),
            count: raw,
            inconclusive: count.is_none(),
            acceptable: count.is_some_and(validator::is_acceptable_count),
            strength: validator::strength_for_count(raw),
        }
    }

    pub fn display(&self, mode: Mode) -> ReportLine<'_> {
        ReportLine { report: self, mode }
    }
}

/// Plain-text rendering of a [`Report`] for one [`Mode`].
pub struct ReportLine<'a> {
    report: &'a Report,
    mode: Mode,
}

impl fmt::Display for ReportLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.report;
        write!(f, "#{:<4} {:<5}  ", r.index, r.prefix.as_deref().unwrap_or("-"))?;
        match self.mode {
            Mode::Count if r.inconclusive => write!(f, "{} (inconclusive)", r.count),
            Mode::Count => write!(f, "{}", r.count),
            Mode::Validate if r.acceptable => write!(f, "accepted"),
            Mode::Validate if r.inconclusive => write!(f, "rejected (could not verify)"),
            Mode::Validate => write!(f, "rejected (seen {} times)", r.count),
            Mode::Strength => write!(f, "{}", r.strength),
        }
    }
}

/// Principal for audit logs: the invoking OS user on this machine.
pub fn local_principal() -> Option<Principal> {
    let user = std::env::var("USER").or_else(|_| std::env::var("USERNAME")).ok()?;
    let host = std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
    Some(Principal { user, host })
}
